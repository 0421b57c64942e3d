//! Small tooling-side data contracts.
//!
//! These carry no algorithmic content; they are the shapes exchanged with
//! tooling clients and composite-build configuration.

use std::path::{Path, PathBuf};

/// A build script as exposed to tooling clients.
///
/// `source_file`, when present, points at an existing file; a script with no
/// associated source file carries `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildScript {
    source_file: Option<PathBuf>,
}

impl BuildScript {
    pub fn new(source_file: Option<PathBuf>) -> Self {
        Self { source_file }
    }

    pub fn source_file(&self) -> Option<&Path> {
        self.source_file.as_deref()
    }
}

/// A build included in a composite.
pub trait IncludedBuild {
    fn name(&self) -> &str;
    fn project_dir(&self) -> &Path;
}

/// A plugin build included in the composite whose name may be overridden
/// before inclusion.
pub trait ConfigurableIncludedBuild: IncludedBuild {
    fn set_name(&mut self, name: String);
}

/// Plain handle for a plugin build included in the composite.
#[derive(Debug, Clone)]
pub struct IncludedPluginBuild {
    name: String,
    project_dir: PathBuf,
}

impl IncludedPluginBuild {
    pub fn new(name: impl Into<String>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            project_dir: project_dir.into(),
        }
    }
}

impl IncludedBuild for IncludedPluginBuild {
    fn name(&self) -> &str {
        &self.name
    }

    fn project_dir(&self) -> &Path {
        &self.project_dir
    }
}

impl ConfigurableIncludedBuild for IncludedPluginBuild {
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

//! Compiled application binaries as seen by the distribution pipeline.
//!
//! The compilation pipeline that produces these jars lives outside this
//! crate; a binary is an opaque, immutable handle here.

use std::path::{Path, PathBuf};

use crate::error::GraphError;

/// A compiled application binary with its primary and assets jars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppBinary {
    name: String,
    jar_file: PathBuf,
    assets_jar_file: PathBuf,
    jar_task_names: Vec<String>,
}

impl AppBinary {
    pub fn new(
        name: impl Into<String>,
        jar_file: impl Into<PathBuf>,
        assets_jar_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            jar_file: jar_file.into(),
            assets_jar_file: assets_jar_file.into(),
            jar_task_names: Vec::new(),
        }
    }

    /// Record the previously registered jar-producing tasks owned by this
    /// binary. A rewritten distribution jar must run after all of them.
    pub fn with_jar_tasks(mut self, tasks: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.jar_task_names = tasks.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn jar_file(&self) -> &Path {
        &self.jar_file
    }

    pub fn assets_jar_file(&self) -> &Path {
        &self.assets_jar_file
    }

    pub fn jar_task_names(&self) -> &[String] {
        &self.jar_task_names
    }

    /// Check that the inputs the pipeline needs are present.
    pub(crate) fn validate(&self) -> Result<(), GraphError> {
        if self.name.is_empty() {
            return Err(GraphError::MissingInput {
                binary: "<unnamed>".to_string(),
                what: "name",
            });
        }
        if self.jar_file.as_os_str().is_empty() {
            return Err(GraphError::MissingInput {
                binary: self.name.clone(),
                what: "primary jar",
            });
        }
        if self.assets_jar_file.as_os_str().is_empty() {
            return Err(GraphError::MissingInput {
                binary: self.name.clone(),
                what: "assets jar",
            });
        }
        Ok(())
    }
}

/// Insertion-ordered collection of binaries.
#[derive(Debug, Clone, Default)]
pub struct BinaryContainer {
    binaries: Vec<AppBinary>,
}

impl BinaryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, binary: AppBinary) {
        self.binaries.push(binary);
    }

    pub fn iter(&self) -> impl Iterator<Item = &AppBinary> {
        self.binaries.iter()
    }

    pub fn len(&self) -> usize {
        self.binaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.binaries.is_empty()
    }
}

impl<'a> IntoIterator for &'a BinaryContainer {
    type Item = &'a AppBinary;
    type IntoIter = std::slice::Iter<'a, AppBinary>;

    fn into_iter(self) -> Self::IntoIter {
        self.binaries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_a_complete_binary() {
        let binary = AppBinary::new("hello", "build/hello.jar", "build/hello-assets.jar");
        assert!(binary.validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_jar_paths() {
        let binary = AppBinary::new("hello", "", "build/hello-assets.jar");
        assert_eq!(
            binary.validate().unwrap_err(),
            GraphError::MissingInput {
                binary: "hello".to_string(),
                what: "primary jar",
            }
        );

        let binary = AppBinary::new("hello", "build/hello.jar", "");
        assert_eq!(
            binary.validate().unwrap_err(),
            GraphError::MissingInput {
                binary: "hello".to_string(),
                what: "assets jar",
            }
        );
    }

    #[test]
    fn validate_rejects_an_empty_name() {
        let binary = AppBinary::new("", "a.jar", "b.jar");
        assert!(matches!(
            binary.validate(),
            Err(GraphError::MissingInput { what: "name", .. })
        ));
    }

    #[test]
    fn container_preserves_insertion_order() {
        let mut container = BinaryContainer::new();
        container.push(AppBinary::new("svc", "svc.jar", "svc-assets.jar"));
        container.push(AppBinary::new("api", "api.jar", "api-assets.jar"));

        let names: Vec<_> = container.iter().map(AppBinary::name).collect();
        assert_eq!(names, vec!["svc", "api"]);
    }
}

//! Declarative copy-spec trees.
//!
//! A copy-spec describes WHAT lands where in a staged layout, not HOW it is
//! copied. The external copy engine interprets the tree at execution time;
//! sources that cite other tasks become implicit task dependencies.
//!
//! [`CopySpec::resolve_entries`] flattens a tree into planned entries so the
//! resulting layout can be inspected (and tested) without running any engine.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::GraphError;
use crate::files::FileCollection;

/// A single source feeding a copy-spec node.
#[derive(Debug, Clone)]
pub enum CopySource {
    /// A file or directory path. Relative paths resolve against the project
    /// directory; directories are flattened into the node's destination.
    Path(PathBuf),
    /// A lazily resolved set of files.
    Files(FileCollection),
    /// The outputs of another task; induces an implicit dependency edge.
    Task(String),
}

/// Node of a copy-spec tree.
///
/// Each node carries a destination relative to its parent (`into`), an
/// ordered bag of sources, exclusion patterns, an optional forced Unix file
/// mode, and ordered children. Ownership of a tree is exclusive to the entity
/// that built it.
#[derive(Debug, Clone, Default)]
pub struct CopySpec {
    into: Option<PathBuf>,
    sources: Vec<CopySource>,
    excludes: Vec<String>,
    file_mode: Option<u32>,
    children: Vec<CopySpec>,
}

impl CopySpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty child node and return it for configuration.
    pub fn child(&mut self) -> &mut CopySpec {
        let index = self.children.len();
        self.children.push(CopySpec::new());
        &mut self.children[index]
    }

    /// Set the destination of this node, relative to its parent.
    pub fn into_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.into = Some(path.into());
        self
    }

    /// Add a path source.
    pub fn from_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.sources.push(CopySource::Path(path.into()));
        self
    }

    /// Add a lazily resolved file-collection source.
    pub fn from_files(&mut self, files: FileCollection) -> &mut Self {
        self.sources.push(CopySource::Files(files));
        self
    }

    /// Add the outputs of another task as a source.
    pub fn from_task(&mut self, task: impl Into<String>) -> &mut Self {
        self.sources.push(CopySource::Task(task.into()));
        self
    }

    /// Exclude entries matching `pattern` (a path relative to the source
    /// root; the pattern also matches everything underneath it).
    pub fn exclude(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.excludes.push(pattern.into());
        self
    }

    /// Force a Unix file mode on every file this node (and its children,
    /// unless they override it) contributes.
    pub fn set_file_mode(&mut self, mode: u32) -> &mut Self {
        self.file_mode = Some(mode);
        self
    }

    /// Graft another spec's whole tree under this node, preserving it.
    pub fn with(&mut self, other: CopySpec) -> &mut Self {
        self.children.push(other);
        self
    }

    pub fn destination(&self) -> Option<&Path> {
        self.into.as_deref()
    }

    pub fn sources(&self) -> &[CopySource] {
        &self.sources
    }

    pub fn children(&self) -> &[CopySpec] {
        &self.children
    }

    pub fn file_mode(&self) -> Option<u32> {
        self.file_mode
    }

    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }

    /// Every task cited anywhere in this tree, in first-citation order.
    pub fn task_citations(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_citations(&mut out);
        out
    }

    fn collect_citations(&self, out: &mut Vec<String>) {
        for source in &self.sources {
            if let CopySource::Task(name) = source {
                if !out.iter().any(|existing| existing == name) {
                    out.push(name.clone());
                }
            }
        }
        for child in &self.children {
            child.collect_citations(out);
        }
    }

    /// Flatten the tree into planned entries.
    ///
    /// Relative path sources resolve against `base_dir`. Directory sources
    /// that exist on disk are walked (sorted, excludes applied against the
    /// path relative to the source root); anything else contributes a single
    /// entry named after its basename. Task citations are resolved through
    /// `outputs`.
    pub fn resolve_entries(
        &self,
        base_dir: &Path,
        outputs: &dyn TaskOutputLookup,
    ) -> Result<Vec<PlannedEntry>, GraphError> {
        let mut entries = Vec::new();
        self.resolve_node(base_dir, outputs, Path::new(""), None, &mut entries)?;
        Ok(entries)
    }

    fn resolve_node(
        &self,
        base_dir: &Path,
        outputs: &dyn TaskOutputLookup,
        prefix: &Path,
        inherited_mode: Option<u32>,
        entries: &mut Vec<PlannedEntry>,
    ) -> Result<(), GraphError> {
        let prefix = match &self.into {
            Some(into) => prefix.join(into),
            None => prefix.to_path_buf(),
        };
        let mode = self.file_mode.or(inherited_mode);

        for source in &self.sources {
            match source {
                CopySource::Path(path) => {
                    let absolute = absolutize(base_dir, path);
                    self.resolve_path_source(&absolute, &prefix, mode, entries);
                }
                CopySource::Files(files) => {
                    for path in files.resolve()? {
                        let absolute = absolutize(base_dir, &path);
                        self.resolve_path_source(&absolute, &prefix, mode, entries);
                    }
                }
                CopySource::Task(name) => {
                    for output in outputs.output_files(name) {
                        self.resolve_path_source(&output, &prefix, mode, entries);
                    }
                }
            }
        }

        for child in &self.children {
            child.resolve_node(base_dir, outputs, &prefix, mode, entries)?;
        }
        Ok(())
    }

    fn resolve_path_source(
        &self,
        source: &Path,
        prefix: &Path,
        mode: Option<u32>,
        entries: &mut Vec<PlannedEntry>,
    ) {
        if source.is_dir() {
            let mut files: Vec<PathBuf> = WalkDir::new(source)
                .follow_links(false)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .collect();
            files.sort();

            for file in files {
                let relative = file.strip_prefix(source).unwrap_or(&file);
                if self.is_excluded(relative) {
                    continue;
                }
                entries.push(PlannedEntry {
                    path: prefix.join(relative),
                    source: file.clone(),
                    mode,
                });
            }
            return;
        }

        let Some(name) = source.file_name() else {
            return;
        };
        if self.is_excluded(Path::new(name)) {
            return;
        }
        entries.push(PlannedEntry {
            path: prefix.join(name),
            source: source.to_path_buf(),
            mode,
        });
    }

    fn is_excluded(&self, relative: &Path) -> bool {
        self.excludes.iter().any(|pattern| {
            let pattern = Path::new(pattern);
            relative == pattern || relative.starts_with(pattern)
        })
    }
}

/// Resolves a cited task name to the files it will produce.
pub trait TaskOutputLookup {
    fn output_files(&self, task: &str) -> Vec<PathBuf>;
}

impl<F> TaskOutputLookup for F
where
    F: Fn(&str) -> Vec<PathBuf>,
{
    fn output_files(&self, task: &str) -> Vec<PathBuf> {
        self(task)
    }
}

/// One file of a resolved staging plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    /// Destination path relative to the plan root.
    pub path: PathBuf,
    /// Where the bytes come from.
    pub source: PathBuf,
    /// Unix mode forced by the owning node, if any.
    pub mode: Option<u32>,
}

fn absolutize(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

//! Lazily resolved file collections.
//!
//! The run-time classpath is not fully resolved while the task graph is being
//! configured. Consumers therefore hold a [`FileCollection`] handle and call
//! [`FileCollection::resolve`] only when the concrete paths are needed (for
//! example when a jar manifest is written).

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::GraphError;

type Provider = Arc<dyn Fn() -> Result<Vec<PathBuf>, String> + Send + Sync>;

/// An ordered set of files that may not be resolvable until late in the build.
#[derive(Clone)]
pub enum FileCollection {
    /// Paths known up-front.
    Fixed(Vec<PathBuf>),
    /// Paths produced by a provider invoked at resolution time.
    Deferred(Provider),
}

impl FileCollection {
    /// Collection with no files.
    pub fn empty() -> Self {
        FileCollection::Fixed(Vec::new())
    }

    /// Collection over paths known at configuration time.
    pub fn fixed(paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        FileCollection::Fixed(paths.into_iter().map(Into::into).collect())
    }

    /// Collection resolved by calling `provider` when the files are needed.
    pub fn deferred(
        provider: impl Fn() -> Result<Vec<PathBuf>, String> + Send + Sync + 'static,
    ) -> Self {
        FileCollection::Deferred(Arc::new(provider))
    }

    /// Resolve to concrete paths.
    ///
    /// Exact duplicate paths are dropped, keeping first-occurrence order.
    /// Provider failure surfaces as [`GraphError::ClasspathResolution`]; a
    /// partial list is never returned.
    pub fn resolve(&self) -> Result<Vec<PathBuf>, GraphError> {
        let raw = match self {
            FileCollection::Fixed(paths) => paths.clone(),
            FileCollection::Deferred(provider) => {
                provider().map_err(GraphError::ClasspathResolution)?
            }
        };

        let mut seen = BTreeSet::new();
        let mut out = Vec::with_capacity(raw.len());
        for path in raw {
            if seen.insert(path.clone()) {
                out.push(path);
            }
        }
        Ok(out)
    }
}

impl fmt::Debug for FileCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileCollection::Fixed(paths) => f.debug_tuple("Fixed").field(paths).finish(),
            FileCollection::Deferred(_) => f.debug_tuple("Deferred").field(&"<provider>").finish(),
        }
    }
}

/// The plugin-level configurations consumed by the pipeline.
///
/// Only the run-time classpath matters here; it is the set of jars a launcher
/// needs next to the application jar.
#[derive(Debug, Clone)]
pub struct RuntimeConfigurations {
    run: FileCollection,
}

impl RuntimeConfigurations {
    pub fn new(run: FileCollection) -> Self {
        Self { run }
    }

    /// The resolved-late classpath used to run the application.
    pub fn run(&self) -> &FileCollection {
        &self.run
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_resolve_keeps_order_and_drops_duplicates() {
        let files = FileCollection::fixed(["b.jar", "a.jar", "b.jar"]);
        let resolved = files.resolve().unwrap();
        assert_eq!(resolved, vec![PathBuf::from("b.jar"), PathBuf::from("a.jar")]);
    }

    #[test]
    fn deferred_resolve_invokes_provider_late() {
        let files = FileCollection::deferred(|| Ok(vec![PathBuf::from("late.jar")]));
        assert_eq!(files.resolve().unwrap(), vec![PathBuf::from("late.jar")]);
    }

    #[test]
    fn deferred_failure_maps_to_classpath_resolution() {
        let files = FileCollection::deferred(|| Err("repository unreachable".to_string()));
        let err = files.resolve().unwrap_err();
        assert_eq!(
            err,
            GraphError::ClasspathResolution("repository unreachable".to_string())
        );
    }

    #[test]
    fn empty_collection_resolves_to_nothing() {
        assert!(FileCollection::empty().resolve().unwrap().is_empty());
    }
}

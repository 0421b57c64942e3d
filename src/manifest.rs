//! Deferred `Class-Path` manifest attribute.

use std::path::PathBuf;

use crate::error::GraphError;
use crate::files::FileCollection;

/// A jar manifest classpath rendered only at jar-write time.
///
/// The run-time classpath is not fully resolved during configuration, so the
/// value is carried as a handle and turned into text when the manifest is
/// written. An eager render would freeze a not-yet-resolved classpath.
#[derive(Debug, Clone)]
pub struct ManifestClasspath {
    runtime: FileCollection,
    assets_jar: PathBuf,
}

impl ManifestClasspath {
    pub fn new(runtime: FileCollection, assets_jar: impl Into<PathBuf>) -> Self {
        Self {
            runtime,
            assets_jar: assets_jar.into(),
        }
    }

    /// Space-joined basenames of the run-time classpath plus the assets jar.
    ///
    /// Renders from a local copy of the resolved set; the shared collection is
    /// never mutated. Exact duplicate paths collapse, but distinct files that
    /// happen to share a basename are emitted as they appear. An empty
    /// classpath renders the empty string. Resolution failure propagates; a
    /// partial list is never emitted.
    pub fn render(&self) -> Result<String, GraphError> {
        let mut files = self.runtime.resolve()?;
        if !files.contains(&self.assets_jar) {
            files.push(self.assets_jar.clone());
        }

        let names: Vec<String> = files
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        Ok(names.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_joins_basenames_with_assets_jar_last() {
        let classpath = ManifestClasspath::new(
            FileCollection::fixed(["lib/a.jar", "lib/b.jar"]),
            "build/hello-assets.jar",
        );
        assert_eq!(classpath.render().unwrap(), "a.jar b.jar hello-assets.jar");
    }

    #[test]
    fn render_of_empty_classpath_is_just_the_assets_jar() {
        let classpath =
            ManifestClasspath::new(FileCollection::empty(), "build/hello-assets.jar");
        assert_eq!(classpath.render().unwrap(), "hello-assets.jar");
    }

    #[test]
    fn duplicate_assets_jar_path_is_not_listed_twice() {
        let classpath = ManifestClasspath::new(
            FileCollection::fixed(["lib/a.jar", "build/hello-assets.jar"]),
            "build/hello-assets.jar",
        );
        assert_eq!(classpath.render().unwrap(), "a.jar hello-assets.jar");
    }

    #[test]
    fn distinct_files_with_equal_basenames_are_kept() {
        let classpath = ManifestClasspath::new(
            FileCollection::fixed(["one/util.jar", "two/util.jar"]),
            "assets.jar",
        );
        assert_eq!(classpath.render().unwrap(), "util.jar util.jar assets.jar");
    }

    #[test]
    fn resolution_failure_propagates() {
        let classpath = ManifestClasspath::new(
            FileCollection::deferred(|| Err("offline".to_string())),
            "assets.jar",
        );
        assert_eq!(
            classpath.render().unwrap_err(),
            GraphError::ClasspathResolution("offline".to_string())
        );
    }

    #[test]
    fn render_is_deferred_until_called() {
        // The provider must not run at construction time.
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let fired = Arc::new(AtomicBool::new(false));
        let probe = Arc::clone(&fired);
        let classpath = ManifestClasspath::new(
            FileCollection::deferred(move || {
                probe.store(true, Ordering::SeqCst);
                Ok(vec![PathBuf::from("a.jar")])
            }),
            "assets.jar",
        );
        assert!(!fired.load(Ordering::SeqCst));
        classpath.render().unwrap();
        assert!(fired.load(Ordering::SeqCst));
    }
}

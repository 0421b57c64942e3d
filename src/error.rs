//! Typed errors for task-graph construction.

use thiserror::Error;

/// Errors raised while synthesizing the distribution task graph.
///
/// Every variant is fatal to the configuration pass; nothing is recovered
/// locally. Partially created tasks are not rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A task or distribution already exists under the chosen name.
    #[error("{entity} named '{name}' already exists")]
    NameCollision { entity: &'static str, name: String },

    /// A binary lacks an input the pipeline needs (name or jar path).
    #[error("binary '{binary}' is missing its {what}")]
    MissingInput { binary: String, what: &'static str },

    /// The run-time classpath could not be resolved at manifest-render time.
    #[error("failed to resolve runtime classpath: {0}")]
    ClasspathResolution(String),

    /// The distribution container was mutated after lifecycle wiring sealed it.
    #[error("distributions are sealed once lifecycle wiring has run")]
    MutationAfterFinalize,
}

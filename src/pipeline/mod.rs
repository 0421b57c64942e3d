//! Configuration-time pipeline that synthesizes the distribution task graph.
//!
//! The pipeline runs as five phases, each a plain function with explicit
//! typed inputs so a scheduler can order them by data dependencies:
//!
//! ```text
//! Phase A : lifecycle roots            (requires: task container)
//! Phase B : seed distributions         (requires: binary container)
//! Phase C : content + jar/script tasks (requires: B, build dir, configurations)
//! Phase D : stage + zip tasks          (requires: C, build dir)
//! Phase E : wire lifecycle (finalizer) (requires: D, roots)
//! ```
//!
//! Any valid topological order produces an identical graph; [`configure`]
//! runs one such order. Configuration is single-threaded; the containers are
//! mutated here and frozen before execution begins.

mod archives;
mod content;
mod distributions;
mod lifecycle;

use std::path::Path;

pub use archives::create_archive_tasks;
pub use content::create_content_tasks;
pub use distributions::seed_distributions;
pub use lifecycle::{create_lifecycle_roots, wire_lifecycle};

use crate::binary::BinaryContainer;
use crate::distribution::DistributionContainer;
use crate::error::GraphError;
use crate::files::RuntimeConfigurations;
use crate::task::TaskContainer;

/// Task group shared by every stage/zip task and the two lifecycle roots.
pub const DISTRIBUTION_GROUP: &str = "distribution";

/// Launcher entry point used when the host does not override it.
pub const DEFAULT_MAIN_CLASS: &str = "play.core.server.NettyServer";

/// Host-supplied knobs for the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    main_class: String,
}

impl PipelineSettings {
    pub fn new(main_class: impl Into<String>) -> Self {
        Self {
            main_class: main_class.into(),
        }
    }

    pub fn main_class(&self) -> &str {
        &self.main_class
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::new(DEFAULT_MAIN_CLASS)
    }
}

/// First byte ASCII-uppercased, remainder unchanged. Not Unicode title-case.
pub(crate) fn capitalized(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// `create<Cap(binary)>DistributionJar`
pub fn distribution_jar_task_name(binary: &str) -> String {
    format!("create{}DistributionJar", capitalized(binary))
}

/// `create<Cap(dist)>StartScripts`
pub fn start_scripts_task_name(distribution: &str) -> String {
    format!("create{}StartScripts", capitalized(distribution))
}

/// `stage<Cap(dist)>Dist`
pub fn stage_task_name(distribution: &str) -> String {
    format!("stage{}Dist", capitalized(distribution))
}

/// `create<Cap(dist)>Dist`
pub fn zip_task_name(distribution: &str) -> String {
    format!("create{}Dist", capitalized(distribution))
}

/// Run all five phases in one valid topological order and return the
/// populated containers. Re-running on the same inputs yields a structurally
/// identical graph.
pub fn configure(
    binaries: &BinaryContainer,
    configurations: &RuntimeConfigurations,
    build_dir: &Path,
    settings: &PipelineSettings,
) -> Result<(DistributionContainer, TaskContainer), GraphError> {
    let mut tasks = TaskContainer::new();
    let mut distributions = DistributionContainer::new();

    create_lifecycle_roots(&mut tasks)?;
    seed_distributions(&mut distributions, binaries)?;
    create_content_tasks(
        &mut tasks,
        &mut distributions,
        build_dir,
        configurations,
        settings,
    )?;
    create_archive_tasks(&mut tasks, &distributions, build_dir)?;
    wire_lifecycle(&mut tasks, &mut distributions)?;

    Ok((distributions, tasks))
}

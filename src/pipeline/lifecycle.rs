//! Phases A and E: the `dist`/`stage` lifecycle roots and their live wiring.

use crate::distribution::DistributionContainer;
use crate::error::GraphError;
use crate::task::{Dependency, Task, TaskContainer, TaskKind, TaskKindFilter, TaskMatcher};

use super::DISTRIBUTION_GROUP;

const DIST_ROOT: &str = "dist";
const DIST_DESCRIPTION: &str = "Assembles all distributions.";
const STAGE_ROOT: &str = "stage";
const STAGE_DESCRIPTION: &str = "Stages all distributions.";

/// Create the two aggregate roots up-front with description and group.
pub fn create_lifecycle_roots(tasks: &mut TaskContainer) -> Result<(), GraphError> {
    tasks.create(
        Task::new(DIST_ROOT, TaskKind::Lifecycle)
            .describe(DIST_DESCRIPTION)
            .in_group(DISTRIBUTION_GROUP),
    )?;
    tasks.create(
        Task::new(STAGE_ROOT, TaskKind::Lifecycle)
            .describe(STAGE_DESCRIPTION)
            .in_group(DISTRIBUTION_GROUP),
    )?;
    Ok(())
}

/// Finalizer: install the live queries on the roots and seal the
/// distribution container.
///
/// The dependency is a filtered view over the task container, re-evaluated
/// whenever the execution graph is computed: `dist` closes over every zip
/// task in the `distribution` group, `stage` over every copy task in that
/// group, including tasks registered later by other plugins. A root missing
/// because the host skipped Phase A is synthesized here.
pub fn wire_lifecycle(
    tasks: &mut TaskContainer,
    distributions: &mut DistributionContainer,
) -> Result<(), GraphError> {
    install_root_matcher(tasks, DIST_ROOT, DIST_DESCRIPTION, TaskKindFilter::Zip)?;
    install_root_matcher(tasks, STAGE_ROOT, STAGE_DESCRIPTION, TaskKindFilter::Copy)?;
    distributions.seal();
    Ok(())
}

fn install_root_matcher(
    tasks: &mut TaskContainer,
    root: &str,
    description: &str,
    kind: TaskKindFilter,
) -> Result<(), GraphError> {
    if !tasks.contains(root) {
        tasks.create(
            Task::new(root, TaskKind::Lifecycle)
                .describe(description)
                .in_group(DISTRIBUTION_GROUP),
        )?;
    }
    if let Some(task) = tasks.get_mut(root) {
        task.add_dependency(Dependency::Matching(TaskMatcher {
            kind,
            group: Some(DISTRIBUTION_GROUP.to_string()),
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roots_carry_description_and_group() {
        let mut tasks = TaskContainer::new();
        create_lifecycle_roots(&mut tasks).unwrap();

        let dist = tasks.get("dist").unwrap();
        assert_eq!(dist.group(), Some(DISTRIBUTION_GROUP));
        assert_eq!(dist.description(), Some("Assembles all distributions."));
        assert!(tasks.contains("stage"));
    }

    #[test]
    fn wiring_seals_the_distribution_container() {
        let mut tasks = TaskContainer::new();
        let mut distributions = DistributionContainer::new();
        create_lifecycle_roots(&mut tasks).unwrap();
        wire_lifecycle(&mut tasks, &mut distributions).unwrap();

        assert!(distributions.is_sealed());
        assert_eq!(
            distributions.create("late").unwrap_err(),
            GraphError::MutationAfterFinalize
        );
    }

    #[test]
    fn wiring_synthesizes_missing_roots() {
        let mut tasks = TaskContainer::new();
        let mut distributions = DistributionContainer::new();
        wire_lifecycle(&mut tasks, &mut distributions).unwrap();

        assert!(tasks.contains("dist"));
        assert!(tasks.contains("stage"));
    }

    #[test]
    fn roots_never_match_each_other() {
        let mut tasks = TaskContainer::new();
        let mut distributions = DistributionContainer::new();
        create_lifecycle_roots(&mut tasks).unwrap();
        wire_lifecycle(&mut tasks, &mut distributions).unwrap();

        // Both roots carry the distribution group but are lifecycle tasks,
        // so the zip/copy matchers skip them.
        assert!(tasks.dependencies_of("dist").is_empty());
        assert!(tasks.dependencies_of("stage").is_empty());
    }
}

//! Phase D: emit the staging copy and zip tasks per distribution.

use std::path::Path;

use crate::copyspec::CopySpec;
use crate::distribution::DistributionContainer;
use crate::error::GraphError;
use crate::task::{Task, TaskContainer, TaskKind};

use super::{stage_task_name, zip_task_name, DISTRIBUTION_GROUP};

/// For every distribution backed by a binary, create the stage task (copies
/// the distribution contents under `<buildDir>/stage/<baseName>/`) and the
/// zip task (`<buildDir>/distributions/<baseName>.zip`, sourcing the stage
/// task, which induces the dependency edge).
pub fn create_archive_tasks(
    tasks: &mut TaskContainer,
    distributions: &DistributionContainer,
    build_dir: &Path,
) -> Result<(), GraphError> {
    for distribution in distributions.iter() {
        if distribution.binary().is_none() {
            continue;
        }

        let base_name = distribution.resolved_base_name().to_string();
        let stage_task = stage_task_name(distribution.name());
        let zip_task = zip_task_name(distribution.name());

        let mut stage_root = CopySpec::new();
        stage_root
            .child()
            .into_path(&base_name)
            .with(distribution.contents().clone());
        tasks.create(
            Task::new(
                &stage_task,
                TaskKind::Copy {
                    destination_dir: build_dir.join("stage"),
                    root: stage_root,
                },
            )
            .describe("Copies the binary distribution to a staging directory.")
            .in_group(DISTRIBUTION_GROUP),
        )?;

        let mut zip_root = CopySpec::new();
        zip_root.from_task(&stage_task);
        tasks.create(
            Task::new(
                &zip_task,
                TaskKind::Zip {
                    archive_name: format!("{base_name}.zip"),
                    destination_dir: build_dir.join("distributions"),
                    root: zip_root,
                },
            )
            .describe("Bundles the application as a distribution.")
            .in_group(DISTRIBUTION_GROUP),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{AppBinary, BinaryContainer};
    use crate::pipeline::seed_distributions;
    use std::path::PathBuf;

    fn seeded() -> DistributionContainer {
        let mut binaries = BinaryContainer::new();
        binaries.push(AppBinary::new("hello", "hello.jar", "hello-assets.jar"));
        let mut distributions = DistributionContainer::new();
        seed_distributions(&mut distributions, &binaries).unwrap();
        distributions
    }

    #[test]
    fn stage_and_zip_tasks_carry_group_and_destinations() {
        let distributions = seeded();
        let mut tasks = TaskContainer::new();
        create_archive_tasks(&mut tasks, &distributions, Path::new("build")).unwrap();

        let stage = tasks.get("stageHelloDist").unwrap();
        assert_eq!(stage.group(), Some(DISTRIBUTION_GROUP));
        let TaskKind::Copy {
            destination_dir, ..
        } = stage.kind()
        else {
            panic!("expected a copy task");
        };
        assert_eq!(destination_dir, &PathBuf::from("build/stage"));

        let zip = tasks.get("createHelloDist").unwrap();
        assert_eq!(zip.group(), Some(DISTRIBUTION_GROUP));
        let TaskKind::Zip {
            archive_name,
            destination_dir,
            ..
        } = zip.kind()
        else {
            panic!("expected a zip task");
        };
        assert_eq!(archive_name, "hello.zip");
        assert_eq!(destination_dir, &PathBuf::from("build/distributions"));
    }

    #[test]
    fn zip_sources_the_stage_task() {
        let distributions = seeded();
        let mut tasks = TaskContainer::new();
        create_archive_tasks(&mut tasks, &distributions, Path::new("build")).unwrap();

        assert!(tasks
            .dependencies_of("createHelloDist")
            .contains("stageHelloDist"));
    }
}

//! Phase C: emit the jar-rewrite and start-script tasks per distribution and
//! augment each distribution's content tree with `lib/` and `bin/`.

use std::path::Path;

use crate::distribution::DistributionContainer;
use crate::error::GraphError;
use crate::files::RuntimeConfigurations;
use crate::manifest::ManifestClasspath;
use crate::task::{Task, TaskContainer, TaskKind};

use super::{distribution_jar_task_name, start_scripts_task_name, PipelineSettings};

/// For every distribution backed by a binary, create the distribution-jar
/// task (repacks the binary's primary jar, adding a manifest with a deferred
/// `Class-Path`) and the start-scripts task, then append the `lib/` and
/// `bin/` children to the distribution contents. Distributions without a
/// binary are skipped without failure.
pub fn create_content_tasks(
    tasks: &mut TaskContainer,
    distributions: &mut DistributionContainer,
    build_dir: &Path,
    configurations: &RuntimeConfigurations,
    settings: &PipelineSettings,
) -> Result<(), GraphError> {
    for distribution in distributions.iter_mut()? {
        let Some(binary) = distribution.binary().cloned() else {
            continue;
        };

        let jar_task = distribution_jar_task_name(binary.name());
        let scripts_task = start_scripts_task_name(distribution.name());

        let dist_jar_dir = build_dir.join("distributionJars").join(distribution.name());
        let jar_archive_name = jar_basename(binary.jar_file(), binary.name())?;

        let mut jar = Task::new(
            &jar_task,
            TaskKind::Jar {
                source_jar: binary.jar_file().to_path_buf(),
                destination_dir: dist_jar_dir.clone(),
                archive_name: jar_archive_name.clone(),
                manifest_classpath: ManifestClasspath::new(
                    configurations.run().clone(),
                    binary.assets_jar_file(),
                ),
            },
        )
        .describe("Repackages the binary jar with a distribution manifest.");
        for owned in binary.jar_task_names() {
            jar = jar.depends_on_task(owned);
        }
        tasks.create(jar)?;

        let rewritten_jar = dist_jar_dir.join(&jar_archive_name);
        tasks.create(
            Task::new(
                &scripts_task,
                TaskKind::StartScripts {
                    classpath: vec![rewritten_jar],
                    main_class: settings.main_class().to_string(),
                    application_name: binary.name().to_string(),
                    output_dir: build_dir.join("scripts").join(distribution.name()),
                },
            )
            .describe("Creates OS specific scripts to run the application.")
            .depends_on_task(&jar_task),
        )?;

        let contents = distribution.contents_mut();
        contents
            .child()
            .into_path("lib")
            .from_task(&jar_task)
            .from_path(binary.assets_jar_file())
            .from_files(configurations.run().clone());
        contents
            .child()
            .into_path("bin")
            .from_task(&scripts_task)
            .set_file_mode(0o755);
    }
    Ok(())
}

fn jar_basename(jar_file: &Path, binary: &str) -> Result<String, GraphError> {
    jar_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| GraphError::MissingInput {
            binary: binary.to_string(),
            what: "primary jar",
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{AppBinary, BinaryContainer};
    use crate::copyspec::CopySource;
    use crate::files::FileCollection;
    use crate::pipeline::seed_distributions;

    fn seeded() -> (DistributionContainer, RuntimeConfigurations) {
        let mut binaries = BinaryContainer::new();
        binaries.push(
            AppBinary::new("hello", "build/hello.jar", "build/hello-assets.jar")
                .with_jar_tasks(["helloJar"]),
        );
        let mut distributions = DistributionContainer::new();
        seed_distributions(&mut distributions, &binaries).unwrap();
        let configurations = RuntimeConfigurations::new(FileCollection::fixed(["a.jar"]));
        (distributions, configurations)
    }

    #[test]
    fn content_tree_gains_lib_and_bin_children() {
        let (mut distributions, configurations) = seeded();
        let mut tasks = TaskContainer::new();
        create_content_tasks(
            &mut tasks,
            &mut distributions,
            Path::new("build"),
            &configurations,
            &PipelineSettings::default(),
        )
        .unwrap();

        let contents = distributions.get("hello").unwrap().contents();
        let children: Vec<_> = contents
            .children()
            .iter()
            .filter_map(|c| c.destination())
            .collect();
        assert_eq!(children, [Path::new("conf"), Path::new("lib"), Path::new("bin")]);

        let bin = &contents.children()[2];
        assert_eq!(bin.file_mode(), Some(0o755));
        assert!(matches!(
            &bin.sources()[0],
            CopySource::Task(name) if name == "createHelloStartScripts"
        ));

        let lib = &contents.children()[1];
        assert!(matches!(
            &lib.sources()[0],
            CopySource::Task(name) if name == "createHelloDistributionJar"
        ));
    }

    #[test]
    fn jar_rewrite_depends_on_the_binarys_own_jar_tasks() {
        let (mut distributions, configurations) = seeded();
        let mut tasks = TaskContainer::new();
        create_content_tasks(
            &mut tasks,
            &mut distributions,
            Path::new("build"),
            &configurations,
            &PipelineSettings::default(),
        )
        .unwrap();

        assert!(tasks
            .dependencies_of("createHelloDistributionJar")
            .contains("helloJar"));
    }
}

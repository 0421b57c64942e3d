use std::path::Path;

use anyhow::{bail, Context, Result};
use dist_builder::config::{load_planner_config, PlannerConfig};
use dist_builder::pipeline;
use dist_builder::{DistributionContainer, TaskContainer};

fn usage() -> &'static str {
    "Usage:\n  dist-builder plan <config.toml>\n  dist-builder graph <config.toml>"
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        [cmd, config] if cmd == "plan" => plan(Path::new(config)),
        [cmd, config] if cmd == "graph" => graph(Path::new(config)),
        _ => bail!(usage()),
    }
}

fn configure_from(path: &Path) -> Result<(DistributionContainer, TaskContainer)> {
    let config: PlannerConfig = load_planner_config(path)?;

    let mut tasks = TaskContainer::new();
    let mut distributions = DistributionContainer::new();

    pipeline::create_lifecycle_roots(&mut tasks)?;
    pipeline::seed_distributions(&mut distributions, &config.binaries)?;
    for (name, base_name) in &config.base_names {
        match distributions.get_mut(name)? {
            Some(distribution) => distribution.set_base_name(base_name),
            None => bail!(
                "config '{}' names unknown distribution '{}'",
                path.display(),
                name
            ),
        }
    }
    pipeline::create_content_tasks(
        &mut tasks,
        &mut distributions,
        &config.build_dir,
        &config.configurations,
        &config.settings,
    )?;
    pipeline::create_archive_tasks(&mut tasks, &distributions, &config.build_dir)?;
    pipeline::wire_lifecycle(&mut tasks, &mut distributions)?;

    Ok((distributions, tasks))
}

fn plan(path: &Path) -> Result<()> {
    let (distributions, tasks) = configure_from(path)
        .with_context(|| format!("configuring distribution graph from '{}'", path.display()))?;

    println!("Distributions:");
    for distribution in distributions.iter() {
        println!(
            "  {} (archive base: {})",
            distribution.name(),
            distribution.resolved_base_name()
        );
    }

    println!("Tasks:");
    for task in tasks.iter() {
        match task.group() {
            Some(group) => println!("  {} [{}]", task.name(), group),
            None => println!("  {}", task.name()),
        }
        if let Some(description) = task.description() {
            println!("    {}", description);
        }
        let dependencies = tasks.dependencies_of(task.name());
        if !dependencies.is_empty() {
            let list: Vec<&str> = dependencies.iter().map(String::as_str).collect();
            println!("    depends on: {}", list.join(", "));
        }
    }
    Ok(())
}

fn graph(path: &Path) -> Result<()> {
    let (_, tasks) = configure_from(path)
        .with_context(|| format!("configuring distribution graph from '{}'", path.display()))?;

    let json = serde_json::to_string_pretty(&tasks.export())
        .context("serializing task graph to JSON")?;
    println!("{json}");
    Ok(())
}

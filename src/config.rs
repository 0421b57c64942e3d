//! TOML configuration for the command-line planner.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::binary::{AppBinary, BinaryContainer};
use crate::files::{FileCollection, RuntimeConfigurations};
use crate::pipeline::PipelineSettings;

/// Loaded planner inputs.
#[derive(Debug)]
pub struct PlannerConfig {
    pub build_dir: PathBuf,
    pub binaries: BinaryContainer,
    pub configurations: RuntimeConfigurations,
    pub settings: PipelineSettings,
    /// Per-distribution base-name overrides, `(distribution, base_name)`.
    pub base_names: Vec<(String, String)>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    build_dir: Option<PathBuf>,
    main_class: Option<String>,
    #[serde(default)]
    runtime_classpath: Vec<PathBuf>,
    #[serde(default)]
    binary: Vec<BinaryToml>,
    #[serde(default)]
    distribution: Vec<DistributionToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BinaryToml {
    name: String,
    jar: PathBuf,
    assets_jar: PathBuf,
    #[serde(default)]
    jar_tasks: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DistributionToml {
    name: String,
    base_name: String,
}

/// Load a planner configuration from `path`.
pub fn load_planner_config(path: &Path) -> Result<PlannerConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading planner config '{}'", path.display()))?;
    let parsed: ConfigToml = toml::from_str(&raw)
        .with_context(|| format!("parsing planner config '{}'", path.display()))?;

    if parsed.binary.is_empty() {
        bail!(
            "invalid planner config '{}': at least one [[binary]] table is required",
            path.display()
        );
    }

    let mut binaries = BinaryContainer::new();
    for binary in parsed.binary {
        if binary.name.trim().is_empty() {
            bail!(
                "invalid planner config '{}': binary name must not be empty",
                path.display()
            );
        }
        binaries.push(
            AppBinary::new(binary.name, binary.jar, binary.assets_jar)
                .with_jar_tasks(binary.jar_tasks),
        );
    }

    let settings = match parsed.main_class {
        Some(main_class) => PipelineSettings::new(main_class),
        None => PipelineSettings::default(),
    };

    Ok(PlannerConfig {
        build_dir: parsed.build_dir.unwrap_or_else(|| PathBuf::from("build")),
        binaries,
        configurations: RuntimeConfigurations::new(FileCollection::fixed(
            parsed.runtime_classpath,
        )),
        settings,
        base_names: parsed
            .distribution
            .into_iter()
            .map(|d| (d.name, d.base_name))
            .collect(),
    })
}

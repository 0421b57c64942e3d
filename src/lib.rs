//! Task-graph construction for assembling runnable application distributions.
//!
//! Given a set of already-compiled application binaries, this crate
//! synthesizes a dependency graph of build steps and hands it to an external
//! task engine. It never executes the steps itself: the design lives in what
//! nodes exist, how they are named, what their inputs and outputs are, and
//! how the graph is closed under the two lifecycle roots (`stage`, `dist`).
//!
//! Per binary, the pipeline emits:
//!
//! - a jar-rewrite task that repacks the binary's primary jar with a
//!   deferred `Class-Path` manifest,
//! - a start-scripts task producing OS-specific launchers,
//! - a staging copy task laying out `conf/`, `lib/`, `bin/` and `README`,
//! - a zip task bundling the staged tree into `<baseName>.zip`.
//!
//! # Architecture
//!
//! ```text
//! BinaryContainer ──▶ seed_distributions ──▶ create_content_tasks
//!                        (one Distribution       (jar + start scripts,
//!                         per binary)             lib/ and bin/ children)
//!                                                        │
//!                                                        ▼
//!                     wire_lifecycle ◀── create_archive_tasks
//!                        (dist/stage live       (stage copy + zip
//!                         queries, seal)         per distribution)
//! ```
//!
//! # Example
//!
//! ```rust
//! use dist_builder::{configure, AppBinary, BinaryContainer};
//! use dist_builder::{FileCollection, PipelineSettings, RuntimeConfigurations};
//! use std::path::Path;
//!
//! let mut binaries = BinaryContainer::new();
//! binaries.push(
//!     AppBinary::new("hello", "build/hello.jar", "build/hello-assets.jar")
//!         .with_jar_tasks(["helloJar"]),
//! );
//! let configurations = RuntimeConfigurations::new(FileCollection::fixed(["lib/a.jar"]));
//!
//! let (distributions, tasks) = configure(
//!     &binaries,
//!     &configurations,
//!     Path::new("build"),
//!     &PipelineSettings::default(),
//! )?;
//!
//! assert!(tasks.contains("createHelloDist"));
//! assert!(distributions.is_sealed());
//! # Ok::<(), dist_builder::GraphError>(())
//! ```

pub mod binary;
pub mod config;
pub mod convention;
pub mod copyspec;
pub mod distribution;
pub mod error;
pub mod files;
pub mod manifest;
pub mod pipeline;
pub mod task;
pub mod tooling;

pub use binary::{AppBinary, BinaryContainer};
pub use copyspec::{CopySource, CopySpec, PlannedEntry};
pub use distribution::{Distribution, DistributionContainer};
pub use error::GraphError;
pub use files::{FileCollection, RuntimeConfigurations};
pub use manifest::ManifestClasspath;
pub use pipeline::{configure, PipelineSettings, DISTRIBUTION_GROUP};
pub use task::{Task, TaskContainer, TaskKind};

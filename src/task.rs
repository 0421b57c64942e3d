//! Task graph surface handed to the external execution engine.
//!
//! Tasks are nodes in a global graph keyed by string name. This crate only
//! synthesizes the graph: what nodes exist, how they are named, what their
//! inputs and outputs are, and which edges connect them. Execution is the
//! engine's job.
//!
//! Dependencies come in three forms: explicit edges, live filtered queries
//! (re-evaluated every time dependencies are computed, never snapshotted),
//! and implicit edges induced by copy-spec sources that cite other tasks.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;

use crate::copyspec::{CopySpec, TaskOutputLookup};
use crate::error::GraphError;
use crate::manifest::ManifestClasspath;

/// Type-specific inputs and outputs of a task.
#[derive(Debug, Clone)]
pub enum TaskKind {
    /// Repack an existing jar, adding a manifest with a deferred classpath.
    Jar {
        source_jar: PathBuf,
        destination_dir: PathBuf,
        archive_name: String,
        manifest_classpath: ManifestClasspath,
    },
    /// Generate OS-specific launcher scripts.
    StartScripts {
        classpath: Vec<PathBuf>,
        main_class: String,
        application_name: String,
        output_dir: PathBuf,
    },
    /// Copy a spec tree into a destination directory.
    Copy {
        destination_dir: PathBuf,
        root: CopySpec,
    },
    /// Zip a spec tree into `<destination_dir>/<archive_name>`.
    Zip {
        archive_name: String,
        destination_dir: PathBuf,
        root: CopySpec,
    },
    /// Aggregation-only root with no action of its own.
    Lifecycle,
}

impl TaskKind {
    fn kind_name(&self) -> &'static str {
        match self {
            TaskKind::Jar { .. } => "jar",
            TaskKind::StartScripts { .. } => "start-scripts",
            TaskKind::Copy { .. } => "copy",
            TaskKind::Zip { .. } => "zip",
            TaskKind::Lifecycle => "lifecycle",
        }
    }

    fn copy_spec(&self) -> Option<&CopySpec> {
        match self {
            TaskKind::Copy { root, .. } | TaskKind::Zip { root, .. } => Some(root),
            _ => None,
        }
    }
}

/// Kind predicate for live task queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKindFilter {
    Jar,
    StartScripts,
    Copy,
    Zip,
    Lifecycle,
}

impl TaskKindFilter {
    fn matches(self, kind: &TaskKind) -> bool {
        matches!(
            (self, kind),
            (TaskKindFilter::Jar, TaskKind::Jar { .. })
                | (TaskKindFilter::StartScripts, TaskKind::StartScripts { .. })
                | (TaskKindFilter::Copy, TaskKind::Copy { .. })
                | (TaskKindFilter::Zip, TaskKind::Zip { .. })
                | (TaskKindFilter::Lifecycle, TaskKind::Lifecycle)
        )
    }
}

/// A live filtered view over the task container.
///
/// A matcher stored as a dependency is a query, not a snapshot: a task added
/// after the matcher was installed is still picked up the next time
/// dependencies are computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMatcher {
    pub kind: TaskKindFilter,
    pub group: Option<String>,
}

impl TaskMatcher {
    fn matches(&self, task: &Task) -> bool {
        if !self.kind.matches(&task.kind) {
            return false;
        }
        match &self.group {
            Some(group) => task.group.as_deref() == Some(group.as_str()),
            None => true,
        }
    }
}

/// A dependency edge: either a concrete task name or a live query.
#[derive(Debug, Clone)]
pub enum Dependency {
    Task(String),
    Matching(TaskMatcher),
}

/// Node in the task graph.
#[derive(Debug, Clone)]
pub struct Task {
    name: String,
    description: Option<String>,
    group: Option<String>,
    depends_on: Vec<Dependency>,
    kind: TaskKind,
}

impl Task {
    pub fn new(name: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            name: name.into(),
            description: None,
            group: None,
            depends_on: Vec::new(),
            kind,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn depends_on_task(mut self, task: impl Into<String>) -> Self {
        self.depends_on.push(Dependency::Task(task.into()));
        self
    }

    pub fn depends_on_matching(mut self, matcher: TaskMatcher) -> Self {
        self.depends_on.push(Dependency::Matching(matcher));
        self
    }

    pub fn add_dependency(&mut self, dependency: Dependency) {
        self.depends_on.push(dependency);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn declared_dependencies(&self) -> &[Dependency] {
        &self.depends_on
    }

    /// Files this task will produce, as known at configuration time.
    pub fn output_files(&self) -> Vec<PathBuf> {
        match &self.kind {
            TaskKind::Jar {
                destination_dir,
                archive_name,
                ..
            } => vec![destination_dir.join(archive_name)],
            TaskKind::StartScripts { output_dir, .. } => vec![output_dir.clone()],
            TaskKind::Copy {
                destination_dir, ..
            } => vec![destination_dir.clone()],
            TaskKind::Zip {
                archive_name,
                destination_dir,
                ..
            } => vec![destination_dir.join(archive_name)],
            TaskKind::Lifecycle => Vec::new(),
        }
    }
}

/// Process-wide task container keyed by unique name, insertion ordered.
#[derive(Debug, Clone, Default)]
pub struct TaskContainer {
    tasks: Vec<Task>,
}

impl TaskContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task; task names must be unique.
    pub fn create(&mut self, task: Task) -> Result<(), GraphError> {
        if self.contains(&task.name) {
            return Err(GraphError::NameCollision {
                entity: "task",
                name: task.name,
            });
        }
        self.tasks.push(task);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.iter().any(|t| t.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Direct dependencies of `name`: declared edges, live matcher hits, and
    /// implicit edges from copy-spec task citations. Matchers are evaluated
    /// against the container's current contents on every call.
    pub fn dependencies_of(&self, name: &str) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        let Some(task) = self.get(name) else {
            return out;
        };

        for dependency in &task.depends_on {
            match dependency {
                Dependency::Task(dep) => {
                    out.insert(dep.clone());
                }
                Dependency::Matching(matcher) => {
                    for candidate in &self.tasks {
                        if candidate.name != task.name && matcher.matches(candidate) {
                            out.insert(candidate.name.clone());
                        }
                    }
                }
            }
        }

        if let Some(spec) = task.kind.copy_spec() {
            for cited in spec.task_citations() {
                if cited != task.name {
                    out.insert(cited);
                }
            }
        }
        out
    }

    /// Transitive closure of [`TaskContainer::dependencies_of`]. Names that
    /// refer to tasks registered elsewhere (outside this container) stay in
    /// the result but are not expanded further.
    pub fn transitive_dependencies_of(&self, name: &str) -> BTreeSet<String> {
        let mut closed = BTreeSet::new();
        let mut queue: Vec<String> = self.dependencies_of(name).into_iter().collect();
        while let Some(next) = queue.pop() {
            if closed.insert(next.clone()) && self.contains(&next) {
                queue.extend(self.dependencies_of(&next));
            }
        }
        closed
    }

    /// Serializable snapshot of the graph with dependency queries resolved.
    pub fn export(&self) -> GraphExport {
        let tasks = self
            .tasks
            .iter()
            .map(|task| TaskExport {
                name: task.name.clone(),
                kind: task.kind.kind_name().to_string(),
                group: task.group.clone(),
                description: task.description.clone(),
                depends_on: self.dependencies_of(&task.name).into_iter().collect(),
                outputs: task
                    .output_files()
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect(),
            })
            .collect();
        GraphExport { tasks }
    }
}

impl TaskOutputLookup for TaskContainer {
    fn output_files(&self, task: &str) -> Vec<PathBuf> {
        self.get(task).map(Task::output_files).unwrap_or_default()
    }
}

/// Snapshot of the task graph for inspection and JSON export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphExport {
    pub tasks: Vec<TaskExport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskExport {
    pub name: String,
    pub kind: String,
    pub group: Option<String>,
    pub description: Option<String>,
    pub depends_on: Vec<String>,
    pub outputs: Vec<String>,
}

//! Distribution records and their container.
//!
//! A distribution is a named, staged runnable layout for one binary. The
//! container is created during configuration, mutated by the pipeline phases,
//! and sealed once lifecycle wiring has run.

use crate::binary::AppBinary;
use crate::copyspec::CopySpec;
use crate::error::GraphError;

/// A named runnable layout for one binary.
#[derive(Debug, Clone)]
pub struct Distribution {
    name: String,
    base_name: String,
    binary: Option<AppBinary>,
    contents: CopySpec,
}

impl Distribution {
    fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            base_name: name.clone(),
            name,
            binary: None,
            contents: CopySpec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw archive base name; may be empty, in which case consumers fall
    /// back to the distribution name.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn set_base_name(&mut self, base_name: impl Into<String>) {
        self.base_name = base_name.into();
    }

    /// `base_name` when non-empty, else the distribution name.
    pub fn resolved_base_name(&self) -> &str {
        if self.base_name.is_empty() {
            &self.name
        } else {
            &self.base_name
        }
    }

    pub fn binary(&self) -> Option<&AppBinary> {
        self.binary.as_ref()
    }

    pub fn set_binary(&mut self, binary: AppBinary) {
        self.binary = Some(binary);
    }

    /// The copy-spec tree describing this distribution's staged layout.
    /// Ownership is exclusive to the distribution.
    pub fn contents(&self) -> &CopySpec {
        &self.contents
    }

    pub fn contents_mut(&mut self) -> &mut CopySpec {
        &mut self.contents
    }
}

/// Insertion-ordered container of distributions keyed by unique name.
#[derive(Debug, Clone, Default)]
pub struct DistributionContainer {
    distributions: Vec<Distribution>,
    sealed: bool,
}

impl DistributionContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new distribution under `name`.
    pub fn create(&mut self, name: impl Into<String>) -> Result<&mut Distribution, GraphError> {
        if self.sealed {
            return Err(GraphError::MutationAfterFinalize);
        }
        let name = name.into();
        if self.distributions.iter().any(|d| d.name == name) {
            return Err(GraphError::NameCollision {
                entity: "distribution",
                name,
            });
        }
        let index = self.distributions.len();
        self.distributions.push(Distribution::new(name));
        Ok(&mut self.distributions[index])
    }

    pub fn get(&self, name: &str) -> Option<&Distribution> {
        self.distributions.iter().find(|d| d.name == name)
    }

    /// Mutable access by name; refused once the container is sealed.
    pub fn get_mut(&mut self, name: &str) -> Result<Option<&mut Distribution>, GraphError> {
        if self.sealed {
            return Err(GraphError::MutationAfterFinalize);
        }
        Ok(self.distributions.iter_mut().find(|d| d.name == name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Distribution> {
        self.distributions.iter()
    }

    /// Mutable iteration; refused once the container is sealed.
    pub fn iter_mut(
        &mut self,
    ) -> Result<impl Iterator<Item = &mut Distribution> + '_, GraphError> {
        if self.sealed {
            return Err(GraphError::MutationAfterFinalize);
        }
        Ok(self.distributions.iter_mut())
    }

    /// Freeze the container. Runs once lifecycle wiring is done; any later
    /// attempt to add or alter distributions is an error.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn len(&self) -> usize {
        self.distributions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distributions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_duplicate_names() {
        let mut container = DistributionContainer::new();
        container.create("hello").unwrap();
        assert_eq!(
            container.create("hello").unwrap_err(),
            GraphError::NameCollision {
                entity: "distribution",
                name: "hello".to_string(),
            }
        );
    }

    #[test]
    fn iteration_is_stable_in_insertion_order() {
        let mut container = DistributionContainer::new();
        container.create("svc").unwrap();
        container.create("api").unwrap();
        let names: Vec<_> = container.iter().map(Distribution::name).collect();
        assert_eq!(names, vec!["svc", "api"]);
    }

    #[test]
    fn base_name_defaults_to_the_distribution_name() {
        let mut container = DistributionContainer::new();
        let dist = container.create("hello").unwrap();
        assert_eq!(dist.resolved_base_name(), "hello");

        dist.set_base_name("my-app");
        assert_eq!(dist.resolved_base_name(), "my-app");

        dist.set_base_name("");
        assert_eq!(dist.resolved_base_name(), "hello");
    }

    #[test]
    fn sealing_refuses_further_mutation() {
        let mut container = DistributionContainer::new();
        container.create("hello").unwrap();
        container.seal();

        assert_eq!(
            container.create("late").unwrap_err(),
            GraphError::MutationAfterFinalize
        );
        assert_eq!(
            container.get_mut("hello").unwrap_err(),
            GraphError::MutationAfterFinalize
        );
        assert!(container.iter_mut().is_err());
        // Read access stays available.
        assert!(container.get("hello").is_some());
    }
}

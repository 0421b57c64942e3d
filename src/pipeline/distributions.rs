//! Phase B: seed one distribution per binary with its baseline content tree.

use crate::binary::BinaryContainer;
use crate::distribution::DistributionContainer;
use crate::error::GraphError;

const CONF_DIR: &str = "conf";
const ROUTES_FILE: &str = "routes";
const README_FILE: &str = "README";

/// Create exactly one distribution per binary in the container.
///
/// Every distribution starts with a `conf/` child sourcing the project `conf`
/// directory (minus `routes`, which only makes sense inside the running
/// application) and the project-root `README`. The base name defaults to the
/// distribution name.
pub fn seed_distributions(
    distributions: &mut DistributionContainer,
    binaries: &BinaryContainer,
) -> Result<(), GraphError> {
    for binary in binaries {
        binary.validate()?;

        let distribution = distributions.create(binary.name())?;
        distribution.set_binary(binary.clone());

        let contents = distribution.contents_mut();
        contents
            .child()
            .into_path(CONF_DIR)
            .from_path(CONF_DIR)
            .exclude(ROUTES_FILE);
        contents.from_path(README_FILE);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::AppBinary;
    use crate::copyspec::CopySource;
    use std::path::Path;

    #[test]
    fn one_distribution_per_binary_with_matching_name() {
        let mut binaries = BinaryContainer::new();
        binaries.push(AppBinary::new("svc", "svc.jar", "svc-assets.jar"));
        binaries.push(AppBinary::new("api", "api.jar", "api-assets.jar"));

        let mut distributions = DistributionContainer::new();
        seed_distributions(&mut distributions, &binaries).unwrap();

        assert_eq!(distributions.len(), 2);
        for binary in &binaries {
            let dist = distributions.get(binary.name()).unwrap();
            assert_eq!(dist.name(), binary.name());
            assert_eq!(dist.resolved_base_name(), binary.name());
            assert_eq!(dist.binary().map(AppBinary::name), Some(binary.name()));
        }
    }

    #[test]
    fn contents_start_with_conf_child_and_readme_source() {
        let mut binaries = BinaryContainer::new();
        binaries.push(AppBinary::new("hello", "hello.jar", "hello-assets.jar"));

        let mut distributions = DistributionContainer::new();
        seed_distributions(&mut distributions, &binaries).unwrap();

        let contents = distributions.get("hello").unwrap().contents();
        let conf = &contents.children()[0];
        assert_eq!(conf.destination(), Some(Path::new("conf")));
        assert_eq!(conf.excludes(), ["routes"]);
        assert!(matches!(
            &contents.sources()[0],
            CopySource::Path(p) if p == Path::new("README")
        ));
    }

    #[test]
    fn duplicate_binary_names_collide() {
        let mut binaries = BinaryContainer::new();
        binaries.push(AppBinary::new("hello", "a.jar", "a-assets.jar"));
        binaries.push(AppBinary::new("hello", "b.jar", "b-assets.jar"));

        let mut distributions = DistributionContainer::new();
        let err = seed_distributions(&mut distributions, &binaries).unwrap_err();
        assert_eq!(
            err,
            GraphError::NameCollision {
                entity: "distribution",
                name: "hello".to_string(),
            }
        );
    }

    #[test]
    fn incomplete_binary_is_fatal() {
        let mut binaries = BinaryContainer::new();
        binaries.push(AppBinary::new("hello", "", "hello-assets.jar"));

        let mut distributions = DistributionContainer::new();
        assert!(matches!(
            seed_distributions(&mut distributions, &binaries),
            Err(GraphError::MissingInput { .. })
        ));
    }
}

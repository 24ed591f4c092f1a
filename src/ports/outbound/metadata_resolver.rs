use super::inventory_provider::EnvironmentInventory;
use crate::env_reduction::domain::{RawDependencies, RawPackageRecord};
use crate::shared::Result;

/// MetadataResolver port for looking up the declared dependencies of one package
///
/// Native packages are located by their distribution name, index packages by
/// name and version inside the environment prefix.
pub trait MetadataResolver {
    /// Returns `Ok(None)` when no metadata exists for the package.
    ///
    /// # Errors
    /// Returns an error only when metadata exists but cannot be read or parsed.
    /// The use case downgrades such errors to an empty dependency set.
    fn resolve_dependencies(
        &self,
        inventory: &EnvironmentInventory,
        record: &RawPackageRecord,
    ) -> Result<Option<RawDependencies>>;
}

pub mod catalog;
pub mod dag;
pub mod dependency_graph;
pub mod environment_spec;
pub mod package;
pub mod version_policy;

pub use catalog::{NameCollision, PackageCatalog};
pub use dag::{CyclePolicy, DirectedAcyclicGraph, Edge};
pub use dependency_graph::{DependencyGraph, DependencyTree, DEFAULT_TREE_DEPTH};
pub use environment_spec::{DependencyEntry, EnvironmentSpec};
pub use package::{
    normalize_name, Package, PackageOrigin, RawDependencies, RawPackageRecord, PYPI_CHANNEL,
};
pub use version_policy::{format_version, format_version_str, VersionPolicy};

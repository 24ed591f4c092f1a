//! Package dependency graph over normalized names, built from a catalog.

use super::catalog::PackageCatalog;
use super::dag::{CyclePolicy, DirectedAcyclicGraph};
use super::package::normalize_name;
use crate::shared::error::ReductionError;
use std::collections::{BTreeMap, BTreeSet};

/// Default number of levels explored by [`DependencyGraph::get_package_dependency_tree`]
pub const DEFAULT_TREE_DEPTH: usize = 15;

/// Dependencies grouped by the deepest level they were found at; level 0 is
/// the queried package.
pub type DependencyTree = BTreeMap<usize, BTreeSet<String>>;

/// DependencyGraph aggregate representing the dependency structure of an environment
///
/// Nodes are normalized package names. Packages without any dependency
/// relationship are still nodes, so they show up as top-level packages.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    dag: DirectedAcyclicGraph,
}

impl DependencyGraph {
    pub fn new(policy: CyclePolicy) -> Self {
        Self {
            dag: DirectedAcyclicGraph::new(policy),
        }
    }

    /// Rebuilds the graph from every package in `catalog`, in catalog order.
    pub fn build(catalog: &PackageCatalog, policy: CyclePolicy) -> Result<Self, ReductionError> {
        let mut dag = DirectedAcyclicGraph::new(policy);

        for package in catalog.packages() {
            let node = dag.add_node(package.normalized_key());
            let deps: Vec<&str> = package.dependencies().keys().map(String::as_str).collect();
            let added = dag.add_connections(&node, &deps)?;

            for (dep, edge) in deps.iter().zip(&added) {
                if edge.is_none() {
                    log::debug!(
                        "Ignored dependency {} -> {}: it would create a cycle",
                        node,
                        dep
                    );
                }
            }
        }

        Ok(Self { dag })
    }

    /// Packages that depend on nothing in the environment (graph roots).
    pub fn lowest_dependencies(&self) -> Vec<String> {
        self.dag
            .nodes()
            .filter(|node| self.dag.dependencies_of(node).map_or(true, BTreeSet::is_empty))
            .map(str::to_string)
            .collect()
    }

    /// Packages no other package depends on (top-level packages).
    pub fn highest_dependents(&self) -> Vec<String> {
        self.dag
            .nodes()
            .filter(|node| self.dag.dependents_of(node).map_or(true, BTreeSet::is_empty))
            .map(str::to_string)
            .collect()
    }

    /// Direct dependencies of `name`; empty for unknown packages.
    pub fn get_package_dependencies(&self, name: &str) -> BTreeSet<String> {
        self.dag.dependencies_of(name).cloned().unwrap_or_default()
    }

    /// Breadth-first dependency levels below `name`, at most `max_depth` deep.
    ///
    /// A dependency reachable at several depths is reported only at the
    /// deepest one, so each level holds what must be installed before the
    /// level above it. Unknown packages yield an empty tree.
    pub fn get_package_dependency_tree(&self, name: &str, max_depth: usize) -> DependencyTree {
        let root = normalize_name(name);
        if !self.dag.has_node(&root) {
            return DependencyTree::new();
        }

        let mut tree = DependencyTree::new();
        let mut level_of: BTreeMap<String, usize> = BTreeMap::new();
        tree.entry(0).or_default().insert(root.clone());
        level_of.insert(root, 0);

        for depth in 0..max_depth {
            let Some(current) = tree.get(&depth).cloned() else {
                break;
            };
            let next_level = depth + 1;

            for node in &current {
                for dep in self.get_package_dependencies(node) {
                    if let Some(&previous) = level_of.get(&dep) {
                        if previous < next_level {
                            if let Some(level) = tree.get_mut(&previous) {
                                level.remove(&dep);
                            }
                        }
                    }
                    level_of.insert(dep.clone(), next_level);
                    tree.entry(next_level).or_default().insert(dep);
                }
            }

            if tree.get(&next_level).map_or(true, BTreeSet::is_empty) {
                break;
            }
        }

        tree.retain(|_, level| !level.is_empty());
        tree
    }

    pub fn dag(&self) -> &DirectedAcyclicGraph {
        &self.dag
    }

    pub fn node_count(&self) -> usize {
        self.dag.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.dag.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env_reduction::domain::package::Package;

    fn package(name: &str, deps: &[&str]) -> Package {
        Package::new(
            name.to_string(),
            "1.0.0".to_string(),
            "0".to_string(),
            "conda-forge".to_string(),
            deps.iter().map(|d| (d.to_string(), String::new())).collect(),
        )
    }

    fn build(packages: Vec<Package>) -> DependencyGraph {
        DependencyGraph::build(&PackageCatalog::from_packages(packages), CyclePolicy::Ignore)
            .unwrap()
    }

    #[test]
    fn test_leaves_and_roots() {
        let graph = build(vec![
            package("a", &["b"]),
            package("b", &[]),
            package("c", &["b"]),
        ]);

        assert_eq!(graph.highest_dependents(), vec!["a", "c"]);
        assert_eq!(graph.lowest_dependencies(), vec!["b"]);
    }

    #[test]
    fn test_isolated_package_is_leaf_and_root() {
        let graph = build(vec![package("a", &["b"]), package("b", &[]), package("zlib", &[])]);

        assert!(graph.highest_dependents().contains(&"zlib".to_string()));
        assert!(graph.lowest_dependencies().contains(&"zlib".to_string()));
    }

    #[test]
    fn test_dangling_dependency_is_a_node() {
        let graph = build(vec![package("pandas", &["numpy", "pytz"])]);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.highest_dependents(), vec!["pandas"]);
        assert_eq!(graph.lowest_dependencies(), vec!["numpy", "pytz"]);
    }

    #[test]
    fn test_nodes_use_normalized_names() {
        let graph = build(vec![package("Python-Dateutil", &["six"])]);

        assert!(graph.dag().has_node("python_dateutil"));
        assert_eq!(
            graph.get_package_dependencies("python.dateutil"),
            BTreeSet::from(["six".to_string()])
        );
    }

    #[test]
    fn test_get_package_dependencies_unknown_is_empty() {
        let graph = build(vec![package("a", &["b"])]);
        assert!(graph.get_package_dependencies("missing").is_empty());
    }

    #[test]
    fn test_cycle_is_ignored_by_default() {
        let graph = build(vec![package("a", &["b"]), package("b", &["a"])]);

        assert_eq!(graph.edge_count(), 1);
        assert!(graph.dag().has_edge("a", "b"));
        assert_eq!(graph.highest_dependents(), vec!["a"]);
    }

    #[test]
    fn test_cycle_raises_under_raise_policy() {
        let catalog =
            PackageCatalog::from_packages(vec![package("a", &["b"]), package("b", &["a"])]);
        let result = DependencyGraph::build(&catalog, CyclePolicy::Raise);

        assert_eq!(
            result.unwrap_err(),
            ReductionError::Cycle {
                dependent: "b".to_string(),
                dependency: "a".to_string(),
            }
        );
    }

    #[test]
    fn test_dependency_tree_promotes_to_deepest_level() {
        // a -> b -> c, a -> c
        let graph = build(vec![
            package("a", &["b", "c"]),
            package("b", &["c"]),
            package("c", &[]),
        ]);

        let tree = graph.get_package_dependency_tree("a", DEFAULT_TREE_DEPTH);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree[&0], BTreeSet::from(["a".to_string()]));
        assert_eq!(tree[&1], BTreeSet::from(["b".to_string()]));
        assert_eq!(tree[&2], BTreeSet::from(["c".to_string()]));
    }

    #[test]
    fn test_dependency_tree_same_level_rediscovery_keeps_node() {
        // b and c both depend on d at the same depth
        let graph = build(vec![
            package("a", &["b", "c"]),
            package("b", &["d"]),
            package("c", &["d"]),
            package("d", &[]),
        ]);

        let tree = graph.get_package_dependency_tree("a", DEFAULT_TREE_DEPTH);
        assert_eq!(tree[&1], BTreeSet::from(["b".to_string(), "c".to_string()]));
        assert_eq!(tree[&2], BTreeSet::from(["d".to_string()]));
    }

    #[test]
    fn test_dependency_tree_respects_max_depth() {
        let graph = build(vec![
            package("a", &["b"]),
            package("b", &["c"]),
            package("c", &["d"]),
            package("d", &[]),
        ]);

        let tree = graph.get_package_dependency_tree("a", 2);
        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(tree[&2], BTreeSet::from(["c".to_string()]));
    }

    #[test]
    fn test_dependency_tree_leaf_package() {
        let graph = build(vec![package("zlib", &[])]);
        let tree = graph.get_package_dependency_tree("zlib", DEFAULT_TREE_DEPTH);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[&0], BTreeSet::from(["zlib".to_string()]));
    }

    #[test]
    fn test_dependency_tree_unknown_package() {
        let graph = build(vec![package("a", &[])]);
        assert!(graph.get_package_dependency_tree("nope", DEFAULT_TREE_DEPTH).is_empty());
    }

    #[test]
    fn test_build_empty_catalog() {
        let graph = build(vec![]);
        assert_eq!(graph.node_count(), 0);
        assert!(graph.highest_dependents().is_empty());
        assert!(graph.lowest_dependencies().is_empty());
    }
}

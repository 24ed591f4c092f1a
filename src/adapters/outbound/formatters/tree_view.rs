use crate::env_reduction::domain::DependencyTree;
use serde::Serialize;
use std::collections::BTreeMap;

/// Serializable shape of a dependency tree
#[derive(Debug, Serialize)]
pub(super) struct TreeView<'a> {
    package: &'a str,
    levels: BTreeMap<usize, Vec<&'a str>>,
}

impl<'a> TreeView<'a> {
    pub(super) fn new(package: &'a str, tree: &'a DependencyTree) -> Self {
        let levels = tree
            .iter()
            .map(|(depth, names)| (*depth, names.iter().map(String::as_str).collect()))
            .collect();
        Self { package, levels }
    }
}

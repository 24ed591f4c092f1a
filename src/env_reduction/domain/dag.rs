//! Directed acyclic graph over normalized package names.
//!
//! Nodes carry no payload beyond their name. Every node lives in both the
//! forward index (its dependencies) and the reverse index (its dependents),
//! even when one side is empty.

use super::package::normalize_name;
use crate::shared::error::ReductionError;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// An edge that was committed to the graph: `(dependent, dependency)`
pub type Edge = (String, String);

/// What to do with an edge that would close a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePolicy {
    /// Drop the edge and report that nothing was added
    #[default]
    Ignore,
    /// Fail with `ReductionError::Cycle`
    Raise,
}

impl FromStr for CyclePolicy {
    type Err = ReductionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ignore" => Ok(CyclePolicy::Ignore),
            "raise" => Ok(CyclePolicy::Raise),
            _ => Err(ReductionError::InvalidArgument {
                argument: "cycle policy".to_string(),
                value: s.to_string(),
                allowed: "ignore, raise".to_string(),
            }),
        }
    }
}

impl fmt::Display for CyclePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CyclePolicy::Ignore => write!(f, "ignore"),
            CyclePolicy::Raise => write!(f, "raise"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DirectedAcyclicGraph {
    policy: CyclePolicy,
    outward: BTreeMap<String, BTreeSet<String>>,
    inward: BTreeMap<String, BTreeSet<String>>,
}

impl DirectedAcyclicGraph {
    pub fn new(policy: CyclePolicy) -> Self {
        Self {
            policy,
            outward: BTreeMap::new(),
            inward: BTreeMap::new(),
        }
    }

    pub fn policy(&self) -> CyclePolicy {
        self.policy
    }

    /// Registers `name` if absent and returns its normalized id.
    pub fn add_node(&mut self, name: &str) -> String {
        let node = normalize_name(name);
        if !self.outward.contains_key(&node) {
            self.outward.insert(node.clone(), BTreeSet::new());
            self.inward.insert(node.clone(), BTreeSet::new());
        }
        node
    }

    /// Adds `source -> dest` unless it would close a cycle.
    ///
    /// Both nodes are registered even when the edge is rejected.
    /// Returns `Ok(None)` for an edge dropped under [`CyclePolicy::Ignore`].
    pub fn add_edge(&mut self, source: &str, dest: &str) -> Result<Option<Edge>, ReductionError> {
        let s_node = self.add_node(source);
        let d_node = self.add_node(dest);

        // A path dest -> source means the new edge would be a back edge
        if self.find_path(&d_node, &s_node).is_some() {
            return match self.policy {
                CyclePolicy::Ignore => Ok(None),
                CyclePolicy::Raise => Err(ReductionError::Cycle {
                    dependent: s_node,
                    dependency: d_node,
                }),
            };
        }

        if let Some(deps) = self.outward.get_mut(&s_node) {
            deps.insert(d_node.clone());
        }
        if let Some(dependents) = self.inward.get_mut(&d_node) {
            dependents.insert(s_node.clone());
        }
        Ok(Some((s_node, d_node)))
    }

    /// Adds `source -> dest` for every dest, in order.
    ///
    /// Not transactional: when a later edge raises, earlier edges stay.
    pub fn add_connections<S: AsRef<str>>(
        &mut self,
        source: &str,
        dests: &[S],
    ) -> Result<Vec<Option<Edge>>, ReductionError> {
        dests
            .iter()
            .map(|dest| self.add_edge(source, dest.as_ref()))
            .collect()
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.outward.contains_key(&normalize_name(name))
    }

    pub fn has_edge(&self, source: &str, dest: &str) -> bool {
        self.outward
            .get(&normalize_name(source))
            .is_some_and(|deps| deps.contains(&normalize_name(dest)))
    }

    /// First simple path from `start` to `end` found by depth-first search.
    ///
    /// Not necessarily the shortest. `Some([start])` when both are the same
    /// node; `None` when either endpoint is unknown.
    pub fn find_path(&self, start: &str, end: &str) -> Option<Vec<String>> {
        let start = normalize_name(start);
        let end = normalize_name(end);
        if !self.outward.contains_key(&start) || !self.outward.contains_key(&end) {
            return None;
        }

        let mut path = vec![start];
        let mut visited = BTreeSet::new();
        if self.extend_path(&end, &mut path, &mut visited) {
            Some(path)
        } else {
            None
        }
    }

    // Nodes stay in `visited` after a failed descent: in an acyclic graph a
    // node that cannot reach `end` once never can.
    fn extend_path(&self, end: &str, path: &mut Vec<String>, visited: &mut BTreeSet<String>) -> bool {
        let Some(current) = path.last().cloned() else {
            return false;
        };
        if current == end {
            return true;
        }
        visited.insert(current.clone());

        if let Some(next_nodes) = self.outward.get(&current) {
            for next in next_nodes {
                if visited.contains(next) {
                    continue;
                }
                path.push(next.clone());
                if self.extend_path(end, path, visited) {
                    return true;
                }
                path.pop();
            }
        }

        false
    }

    /// All node ids in ascending order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.outward.keys().map(String::as_str)
    }

    /// Outgoing neighbours of `name` (what it depends on)
    pub fn dependencies_of(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.outward.get(&normalize_name(name))
    }

    /// Incoming neighbours of `name` (what depends on it)
    pub fn dependents_of(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.inward.get(&normalize_name(name))
    }

    pub fn node_count(&self) -> usize {
        self.outward.len()
    }

    pub fn edge_count(&self) -> usize {
        self.outward.values().map(BTreeSet::len).sum()
    }

    /// Every committed edge in ascending `(dependent, dependency)` order
    pub fn edges(&self) -> Vec<Edge> {
        self.outward
            .iter()
            .flat_map(|(source, deps)| deps.iter().map(move |dest| (source.clone(), dest.clone())))
            .collect()
    }
}

//! Rename graph: old-name → new-name edges and their decomposition.
//!
//! Every key has exactly one outgoing edge. Restricted to keys, the graph is
//! therefore functional, and each weakly connected component contains at
//! most one cycle:
//!
//! - **Chain**: following edges from any key ends at a name that is not a
//!   key (the terminal). With duplicate targets the chain is an in-tree.
//! - **Cycle**: following edges returns to a key already visited. Keys that
//!   are not on the cycle hang off it (only possible with duplicate targets).

use std::collections::{HashMap, HashSet};

/// Whether a component drains to a free name or loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Chain,
    Cycle,
}

/// One weakly connected component of the rename graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub kind: ComponentKind,
    /// All keys of the component, in mapping order.
    pub keys: Vec<String>,
    /// Cycle members in edge order (`cycle[i] → cycle[i + 1]`), empty for chains.
    pub cycle: Vec<String>,
}

/// Directed graph of pending renames.
#[derive(Debug, Clone, Default)]
pub struct RenameGraph {
    order: Vec<String>,
    targets: HashMap<String, String>,
}

impl RenameGraph {
    /// Build a graph from `(old, new)` edges.
    ///
    /// Self-loops are dropped: a name mapped to itself is already satisfied.
    /// Later duplicates of a key are ignored; keys are unique by construction
    /// of [`RenameMapping`](crate::mapping::RenameMapping).
    pub fn new<'s>(edges: impl IntoIterator<Item = (&'s str, &'s str)>) -> Self {
        let mut graph = RenameGraph::default();
        for (old, new) in edges {
            if old == new || graph.targets.contains_key(old) {
                continue;
            }
            graph.order.push(old.to_string());
            graph.targets.insert(old.to_string(), new.to_string());
        }
        graph
    }

    /// Target of `name`, if it is a key.
    pub fn target(&self, name: &str) -> Option<&str> {
        self.targets.get(name).map(String::as_str)
    }

    pub fn is_key(&self, name: &str) -> bool {
        self.targets.contains_key(name)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Keys whose target is `name`, in insertion order.
    pub fn sources_of(&self, name: &str) -> Vec<&str> {
        self.keys().filter(|k| self.target(k) == Some(name)).collect()
    }

    /// Targets shared by two or more keys, with their sources.
    pub fn duplicate_targets(&self) -> Vec<(String, Vec<String>)> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for key in self.keys() {
            let target = &self.targets[key];
            if !seen.insert(target.as_str()) {
                continue;
            }
            let sources = self.sources_of(target);
            if sources.len() > 1 {
                out.push((
                    target.clone(),
                    sources.into_iter().map(str::to_string).collect(),
                ));
            }
        }
        out
    }

    /// Decompose into weakly connected components, ordered by first key.
    pub fn components(&self) -> Vec<Component> {
        let index: HashMap<&str, usize> = self
            .order
            .iter()
            .enumerate()
            .map(|(i, k)| (k.as_str(), i))
            .collect();

        let mut parent: Vec<usize> = (0..self.order.len()).collect();
        for (i, key) in self.order.iter().enumerate() {
            if let Some(&j) = index.get(self.targets[key].as_str()) {
                union(&mut parent, i, j);
            }
        }

        let mut groups: Vec<(usize, Vec<String>)> = Vec::new();
        let mut group_of_root: HashMap<usize, usize> = HashMap::new();
        for (i, key) in self.order.iter().enumerate() {
            let root = find(&mut parent, i);
            let slot = *group_of_root.entry(root).or_insert_with(|| {
                groups.push((root, Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(key.clone());
        }

        groups
            .into_iter()
            .map(|(_, keys)| {
                let cycle = self.find_cycle(&keys[0]);
                let kind = if cycle.is_empty() {
                    ComponentKind::Chain
                } else {
                    ComponentKind::Cycle
                };
                Component { kind, keys, cycle }
            })
            .collect()
    }

    /// Follow edges from `start`; return the cycle reached, or empty if the
    /// walk leaves the key set.
    fn find_cycle(&self, start: &str) -> Vec<String> {
        let mut path: Vec<&str> = Vec::new();
        let mut position: HashMap<&str, usize> = HashMap::new();
        let mut current = start;
        loop {
            if let Some(&at) = position.get(current) {
                return path[at..].iter().map(|s| s.to_string()).collect();
            }
            position.insert(current, path.len());
            path.push(current);
            match self.targets.get(current) {
                Some(next) if self.is_key(next) => current = next.as_str(),
                _ => return Vec::new(),
            }
        }
    }
}

fn find(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

fn union(parent: &mut [usize], a: usize, b: usize) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        parent[ra.max(rb)] = ra.min(rb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &str)]) -> RenameGraph {
        RenameGraph::new(edges.iter().copied())
    }

    #[test]
    fn three_cycle_is_one_cycle_component() {
        let g = graph(&[("a", "b"), ("b", "c"), ("c", "a")]);
        let components = g.components();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].kind, ComponentKind::Cycle);
        assert_eq!(components[0].cycle, vec!["a", "b", "c"]);
    }

    #[test]
    fn chain_terminates_at_free_name() {
        let g = graph(&[("x", "y"), ("y", "z")]);
        let components = g.components();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].kind, ComponentKind::Chain);
        assert_eq!(components[0].keys, vec!["x", "y"]);
        assert!(components[0].cycle.is_empty());
    }

    #[test]
    fn independent_edges_are_separate_components() {
        let g = graph(&[("a", "apple"), ("b", "banana"), ("p", "q"), ("q", "p")]);
        let kinds: Vec<_> = g.components().iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![ComponentKind::Chain, ComponentKind::Chain, ComponentKind::Cycle]
        );
    }

    #[test]
    fn self_loop_is_dropped() {
        let g = graph(&[("a", "a"), ("b", "c")]);
        assert!(!g.is_key("a"));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn tail_into_cycle_found_from_tail_start() {
        // t -> a, a <-> b: the walk from `t` still finds the a/b cycle.
        let g = graph(&[("t", "a"), ("a", "b"), ("b", "a")]);
        let components = g.components();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].kind, ComponentKind::Cycle);
        assert_eq!(components[0].cycle, vec!["a", "b"]);
        assert_eq!(components[0].keys, vec!["t", "a", "b"]);
    }

    #[test]
    fn duplicate_targets_reported() {
        let g = graph(&[("a", "z"), ("b", "z"), ("c", "y")]);
        assert_eq!(
            g.duplicate_targets(),
            vec![("z".to_string(), vec!["a".to_string(), "b".to_string()])]
        );
        assert_eq!(g.sources_of("y"), vec!["c"]);
    }

    #[test]
    fn two_cycle_swap() {
        let g = graph(&[("b", "a"), ("a", "b")]);
        let components = g.components();
        assert_eq!(components[0].cycle, vec!["b", "a"]);
    }
}

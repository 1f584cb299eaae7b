//! Rename mapping: old-name → new-name with unique keys.

use std::collections::HashMap;

use crate::error::{RelabelError, RelabelResult};

/// A batch of renames.
///
/// Keys are unique. Insertion order carries no meaning for the result text;
/// it is kept so that per-entry results come back in the caller's order and
/// planning is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameMapping {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl RenameMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry.
    ///
    /// Fails with `InvalidArguments` if either name is empty or `old` is
    /// already a key.
    pub fn insert(&mut self, old: impl Into<String>, new: impl Into<String>) -> RelabelResult<()> {
        let old = old.into();
        let new = new.into();
        if old.is_empty() || new.is_empty() {
            return Err(RelabelError::invalid_args(format!(
                "empty name in mapping entry '{}' -> '{}'",
                old, new
            )));
        }
        if self.index.contains_key(&old) {
            return Err(RelabelError::invalid_args(format!(
                "'{}' is renamed more than once",
                old
            )));
        }
        self.index.insert(old.clone(), self.entries.len());
        self.entries.push((old, new));
        Ok(())
    }

    /// Build a mapping from pairs.
    pub fn from_pairs<I, O, N>(pairs: I) -> RelabelResult<Self>
    where
        I: IntoIterator<Item = (O, N)>,
        O: Into<String>,
        N: Into<String>,
    {
        let mut mapping = RenameMapping::new();
        for (old, new) in pairs {
            mapping.insert(old, new)?;
        }
        Ok(mapping)
    }

    /// Parse a single `old=new` argument.
    pub fn parse_pair(arg: &str) -> RelabelResult<(String, String)> {
        let Some((old, new)) = arg.split_once('=') else {
            return Err(RelabelError::invalid_args(format!(
                "invalid mapping '{}', expected 'old=new'",
                arg
            )));
        };
        Ok((old.trim().to_string(), new.trim().to_string()))
    }

    /// Target for `old`, if it is a key.
    pub fn get(&self, old: &str) -> Option<&str> {
        self.index.get(old).map(|&i| self.entries[i].1.as_str())
    }

    /// Whether `name` is a key.
    pub fn contains_key(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(o, n)| (o.as_str(), n.as_str()))
    }

    /// Every name mentioned by the mapping, keys and targets.
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .flat_map(|(o, n)| [o.as_str(), n.as_str()])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

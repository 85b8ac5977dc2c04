use log::debug;
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::catalog::Catalog;
use crate::config::*;

/// A chain of identifiers that must all be present in a row.
///
/// The parent of a path is the same path without its last identifier.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct GroupPath {
    /// The comma-joined chain, as displayed and sorted.
    pub path: String,
    pub segments: Vec<String>,
    // None for the segments that are not even shaped like an identifier.
    ids: Vec<Option<QaId>>,
}

impl GroupPath {
    fn from_segments(segments: Vec<String>) -> GroupPath {
        let ids = segments.iter().map(|s| QaId::parse(s)).collect();
        GroupPath {
            path: segments.join(PATH_SEPARATOR),
            segments,
            ids,
        }
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_top_level(&self) -> bool {
        self.segments.len() == 1
    }

    /// The chain of the parent path, None for a top-level path.
    pub fn parent(&self) -> Option<String> {
        match self.segments.split_last() {
            Some((_, rest)) if !rest.is_empty() => {
                Some(rest.join(PATH_SEPARATOR))
            }
            _ => None,
        }
    }

    /// The parsed identifiers, or None if one of the segments is malformed.
    /// Such a path can never be matched.
    pub fn ids(&self) -> Option<Vec<QaId>> {
        self.ids.iter().cloned().collect()
    }

    /// True if every identifier of the path is in `row_ids`.
    pub fn matches(&self, row_ids: &HashSet<QaId>) -> bool {
        self.ids
            .iter()
            .all(|id| matches!(id, Some(x) if row_ids.contains(x)))
    }

    pub fn last_segment(&self) -> &str {
        self.segments.last().map(|s| s.as_str()).unwrap_or("")
    }
}

fn split_definition(definition: &str) -> Vec<String> {
    definition
        .split(PATH_SEPARATOR)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Expands raw group definitions into all their non-empty prefixes.
///
/// Blank definitions are skipped. The result is deduplicated and sorted
/// lexicographically, so that a parent always comes before its children.
pub fn expand_groups<S: AsRef<str>>(definitions: &[S]) -> Vec<String> {
    let mut expanded: BTreeSet<String> = BTreeSet::new();
    for definition in definitions {
        let segments = split_definition(definition.as_ref());
        for end in 1..=segments.len() {
            expanded.insert(segments[..end].join(PATH_SEPARATOR));
        }
    }
    expanded.into_iter().collect()
}

/// The expanded group paths, in sorted order, with an index from chain to
/// position.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct GroupSet {
    paths: Vec<GroupPath>,
    positions: HashMap<String, usize>,
}

impl GroupSet {
    pub fn new<S: AsRef<str>>(definitions: &[S]) -> GroupSet {
        let paths: Vec<GroupPath> = expand_groups(definitions)
            .iter()
            .map(|p| GroupPath::from_segments(split_definition(p)))
            .collect();
        let positions = paths
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.path.clone(), idx))
            .collect();
        debug!(
            "GroupSet::new: {} definitions expanded to {} paths",
            definitions.len(),
            paths.len()
        );
        GroupSet { paths, positions }
    }

    pub fn paths(&self) -> &[GroupPath] {
        self.paths.as_slice()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn position(&self, path: &str) -> Option<usize> {
        self.positions.get(path).cloned()
    }

    /// The position of the parent of the path at `idx`.
    pub fn parent_position(&self, idx: usize) -> Option<usize> {
        let parent = self.paths.get(idx)?.parent()?;
        self.position(&parent)
    }

    /// The distinct segments that do not designate an answer of the catalog, in
    /// path order.
    pub fn unresolved(&self, catalog: &Catalog) -> Vec<String> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut res: Vec<String> = Vec::new();
        for p in self.paths.iter() {
            for s in p.segments.iter() {
                if catalog.decode(s).is_none() && seen.insert(s.as_str()) {
                    res.push(s.clone());
                }
            }
        }
        res
    }
}

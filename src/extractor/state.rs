//! Extraction state tracking.
//!
//! Per-pass side tables keyed by `NodeId`: content scores, the ranked top
//! candidates and the set of tables judged to hold tabular data. The score
//! never lives on the node itself, and a fresh set is built for every retry
//! attempt so a relaxed pass cannot see scores left by a stricter one.

use std::collections::{HashMap, HashSet};

use dom_query::{NodeId, NodeRef};

/// The three heuristics the retry loop relaxes one at a time.
///
/// All start enabled. Flags are only ever dropped within one page's retry
/// cycle, in the fixed order of [`Flags::drop_next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    /// Remove nodes whose class/id looks like boilerplate before scoring.
    pub strip_unlikelys: bool,

    /// Add class/id weights to scores.
    pub weight_classes: bool,

    /// Run the conditional cleaner on forms, tables, lists and divs.
    pub clean_conditionally: bool,
}

impl Flags {
    /// All heuristics enabled.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            strip_unlikelys: true,
            weight_classes: true,
            clean_conditionally: true,
        }
    }

    /// Drop the highest-priority flag still set. Returns `false` when every
    /// flag was already dropped.
    pub fn drop_next(&mut self) -> bool {
        if self.strip_unlikelys {
            self.strip_unlikelys = false;
        } else if self.weight_classes {
            self.weight_classes = false;
        } else if self.clean_conditionally {
            self.clean_conditionally = false;
        } else {
            return false;
        }
        true
    }

    /// Whether no heuristic is left to relax.
    #[must_use]
    pub const fn exhausted(&self) -> bool {
        !self.strip_unlikelys && !self.weight_classes && !self.clean_conditionally
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::all()
    }
}

/// Node to content score mapping.
///
/// Absence means "not yet scored", which is different from a score of 0.
#[derive(Debug, Default)]
pub struct ScoreTable {
    scores: HashMap<NodeId, f64>,
}

impl ScoreTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the node has been initialized.
    #[must_use]
    pub fn contains(&self, node: &NodeRef) -> bool {
        self.scores.contains_key(&node.id)
    }

    /// Score of an initialized node.
    #[must_use]
    pub fn get(&self, node: &NodeRef) -> Option<f64> {
        self.scores.get(&node.id).copied()
    }

    /// Score of a node, `0.0` when it was never initialized.
    #[must_use]
    pub fn score_or_zero(&self, node: &NodeRef) -> f64 {
        self.get(node).unwrap_or(0.0)
    }

    /// Set (or initialize) a node's score.
    pub fn set(&mut self, node: &NodeRef, score: f64) {
        self.scores.insert(node.id, score);
    }

    /// Add to an initialized node's score.
    pub fn add(&mut self, node: &NodeRef, delta: f64) {
        *self.scores.entry(node.id).or_insert(0.0) += delta;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Top-N candidates, sorted by descending score.
pub struct CandidateList<'a> {
    entries: Vec<(NodeRef<'a>, f64)>,
    capacity: usize,
}

impl<'a> CandidateList<'a> {
    /// An empty list holding at most `capacity` candidates.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Insert in front of the first entry with a strictly lower score,
    /// evicting the lowest entry when the list overflows. A candidate that
    /// does not beat any full-list entry is not inserted.
    pub fn insert(&mut self, node: NodeRef<'a>, score: f64) {
        if self.capacity == 0 {
            return;
        }
        let position = self
            .entries
            .iter()
            .position(|(_, existing)| score > *existing)
            .unwrap_or(self.entries.len());

        if position < self.capacity {
            self.entries.insert(position, (node, score));
            self.entries.truncate(self.capacity);
        }
    }

    /// Best candidate.
    #[must_use]
    pub fn top(&self) -> Option<(NodeRef<'a>, f64)> {
        self.entries.first().copied()
    }

    /// Candidates ranked 2..N.
    #[must_use]
    pub fn rest(&self) -> &[(NodeRef<'a>, f64)] {
        self.entries.get(1..).unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Scores in rank order.
    #[must_use]
    pub fn scores(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, score)| *score).collect()
    }
}

/// Tables judged to hold tabular data rather than layout.
#[derive(Debug, Default)]
pub struct DataTables {
    tables: HashSet<NodeId>,
}

impl DataTables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, table: &NodeRef) {
        self.tables.insert(table.id);
    }

    #[must_use]
    pub fn contains(&self, table: &NodeRef) -> bool {
        self.tables.contains(&table.id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Byline captured during node prepping.
///
/// Only the first match per document is kept; it survives retries of the
/// same page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Byline {
    pub text: Option<String>,
    pub author: Option<String>,
}

impl Byline {
    #[must_use]
    pub fn is_found(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_query::Document;

    #[test]
    fn test_flags_drop_in_priority_order() {
        let mut flags = Flags::all();

        assert!(flags.drop_next());
        assert_eq!(flags, Flags { strip_unlikelys: false, weight_classes: true, clean_conditionally: true });

        assert!(flags.drop_next());
        assert_eq!(flags, Flags { strip_unlikelys: false, weight_classes: false, clean_conditionally: true });

        assert!(flags.drop_next());
        assert!(flags.exhausted());

        assert!(!flags.drop_next());
    }

    #[test]
    fn test_score_table_absence_is_not_zero() {
        let doc = Document::from("<div id=\"a\"></div><div id=\"b\"></div>");
        let a = *doc.select("#a").nodes().first().unwrap();
        let b = *doc.select("#b").nodes().first().unwrap();
        let mut table = ScoreTable::new();

        table.set(&a, 0.0);
        table.add(&a, 2.5);

        assert!(table.contains(&a));
        assert_eq!(table.get(&a), Some(2.5));
        assert!(!table.contains(&b));
        assert_eq!(table.get(&b), None);
        assert_eq!(table.score_or_zero(&b), 0.0);
    }

    #[test]
    fn test_candidate_list_capped_and_sorted() {
        let doc = Document::from("<p></p><p></p><p></p><p></p><p></p>");
        let nodes: Vec<_> = doc.select("p").nodes().to_vec();
        let mut list = CandidateList::new(3);

        for (node, score) in nodes.iter().zip([5.0, 1.0, 9.0, 7.0, 3.0]) {
            list.insert(*node, score);
            let scores = list.scores();
            assert!(scores.len() <= 3);
            assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        }

        assert_eq!(list.scores(), vec![9.0, 7.0, 5.0]);
        assert_eq!(list.top().map(|(n, _)| n.id), Some(nodes[2].id));
        assert_eq!(list.rest().len(), 2);
    }

    #[test]
    fn test_candidate_list_ties_keep_first() {
        let doc = Document::from("<p id=\"a\"></p><p id=\"b\"></p>");
        let nodes: Vec<_> = doc.select("p").nodes().to_vec();
        let mut list = CandidateList::new(1);

        list.insert(nodes[0], 4.0);
        list.insert(nodes[1], 4.0);

        assert_eq!(list.top().map(|(n, _)| n.id), Some(nodes[0].id));
    }

    #[test]
    fn test_data_tables() {
        let doc = Document::from("<table id=\"t\"></table>");
        let table = *doc.select("#t").nodes().first().unwrap();
        let mut tables = DataTables::new();

        assert!(!tables.contains(&table));
        tables.mark(&table);
        assert!(tables.contains(&table));
        assert_eq!(tables.len(), 1);
    }
}

//! Skiplist-backed ordered term index.
//!
//! Terms are kept in lexicographic order in a skiplist whose nodes live in an
//! arena (`Vec<IndexNode>`) and link to each other by index. Slot 0 of the
//! arena is the head sentinel: it never holds a term, is never matched, and
//! has a forward link for every level up to the configured maximum.
//!
//! Each node is assigned a random level when it is created. A node at level
//! `k` is linked into the chains of levels `0..=k`, so searching starts on
//! the sparse top chain and drops a level whenever the next term would
//! overshoot. Expected cost is O(log n) for [`insert`](TermSkipList::insert)
//! and [`lookup`](TermSkipList::lookup) and O(log n + k) for a range spanning
//! `k` terms. The worst case is O(n); the balance is only probabilistic.
//!
//! Nodes are never removed and posting sets only grow.
//!
//! # Examples
//!
//! ```
//! use skiff::index::{IndexConfig, TermSkipList};
//!
//! let mut index = TermSkipList::new(IndexConfig::default().with_seed(1)).unwrap();
//! index.insert("batman", 0);
//! index.insert("joker", 0);
//! index.insert("batman", 1);
//!
//! assert_eq!(index.len(), 2);
//! assert!(index.lookup("batman").contains(&1));
//! assert!(index.lookup("robin").is_empty());
//! ```

use ahash::AHashSet;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SkiffError};
use crate::index::config::IndexConfig;
use crate::index::level::{LevelGenerator, LevelSource, RngLevelSource};
use crate::index::{DocId, PostingSet};

/// Arena slot of a node.
type NodeId = usize;

/// Arena slot of the head sentinel.
const HEAD: NodeId = 0;

/// One distinct term in the index.
#[derive(Debug, Clone)]
struct IndexNode {
    term: String,
    postings: PostingSet,
    /// One link per level this node participates in.
    forward: Vec<Option<NodeId>>,
}

impl IndexNode {
    fn head(max_level: usize) -> Self {
        IndexNode {
            term: String::new(),
            postings: PostingSet::default(),
            forward: vec![None; max_level + 1],
        }
    }

    /// Highest level this node is linked at.
    fn level(&self) -> usize {
        self.forward.len() - 1
    }
}

/// Summary of the index shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of distinct terms.
    pub terms: usize,
    /// Number of (term, document) pairs.
    pub postings: usize,
    /// Highest level holding at least one term.
    pub current_level: usize,
    /// Configured ceiling on node levels.
    pub max_level: usize,
    /// `level_histogram[k]` is the number of terms whose node level is `k`.
    pub level_histogram: Vec<usize>,
}

/// Ordered map from term to the set of documents containing it.
#[derive(Debug)]
pub struct TermSkipList {
    config: IndexConfig,
    nodes: Vec<IndexNode>,
    current_level: usize,
    levels: LevelGenerator,
    posting_count: usize,
}

impl TermSkipList {
    /// Create an empty index. Level draws are seeded from `config.seed` when
    /// present.
    pub fn new(config: IndexConfig) -> Result<Self> {
        let source = RngLevelSource::for_seed(config.seed);
        Self::with_level_source(config, Box::new(source))
    }

    /// Create an empty index drawing node levels from `source`.
    pub fn with_level_source(config: IndexConfig, source: Box<dyn LevelSource>) -> Result<Self> {
        config.validate()?;

        let levels =
            LevelGenerator::new(source, config.max_level, config.promotion_probability);

        Ok(TermSkipList {
            nodes: vec![IndexNode::head(config.max_level)],
            current_level: 0,
            levels,
            posting_count: 0,
            config,
        })
    }

    /// Add `doc` to the postings of `term`, creating the term if needed.
    ///
    /// Returns `true` if the pair was not already present. Inserting the same
    /// pair again changes nothing.
    pub fn insert(&mut self, term: &str, doc: DocId) -> bool {
        let mut update = vec![HEAD; self.config.max_level + 1];
        let mut current = HEAD;
        for level in (0..=self.current_level).rev() {
            current = self.advance(current, level, term);
            update[level] = current;
        }

        if let Some(next) = self.nodes[current].forward[0] {
            let node = &mut self.nodes[next];
            if node.term == term {
                let added = node.postings.insert(doc);
                if added {
                    self.posting_count += 1;
                }
                return added;
            }
        }

        let new_level = self.levels.next_level();
        if new_level > self.current_level {
            // update[current_level + 1..=new_level] already points at HEAD.
            debug!(
                "index height raised from {} to {} by term '{}'",
                self.current_level, new_level, term
            );
            self.current_level = new_level;
        }

        let id = self.nodes.len();
        let mut forward = vec![None; new_level + 1];
        for (level, link) in forward.iter_mut().enumerate() {
            let predecessor = &mut self.nodes[update[level]];
            *link = predecessor.forward[level];
            predecessor.forward[level] = Some(id);
        }

        let mut postings = PostingSet::default();
        postings.insert(doc);
        self.nodes.push(IndexNode {
            term: term.to_string(),
            postings,
            forward,
        });
        self.posting_count += 1;

        true
    }

    /// Documents containing `term`, or an empty set if the term is unknown.
    pub fn lookup(&self, term: &str) -> PostingSet {
        self.postings(term).cloned().unwrap_or_default()
    }

    /// Borrow the postings of `term` without copying them.
    pub fn postings(&self, term: &str) -> Option<&PostingSet> {
        self.find(term).map(|id| &self.nodes[id].postings)
    }

    /// Whether `term` has been indexed.
    pub fn contains(&self, term: &str) -> bool {
        self.find(term).is_some()
    }

    /// Union of the postings of every term `t` with `low <= t <= high`.
    ///
    /// Per-term detail is not kept; see
    /// [`terms_in_range`](Self::terms_in_range) for that.
    pub fn range_lookup(&self, low: &str, high: &str) -> PostingSet {
        let mut result = PostingSet::default();
        for (_, postings) in self.terms_in_range(low, high) {
            result.extend(postings.iter().copied());
        }
        result
    }

    /// Every term `t` with `low <= t <= high`, in order, with its postings.
    pub fn terms_in_range(&self, low: &str, high: &str) -> Vec<(&str, &PostingSet)> {
        let mut matched = Vec::new();
        if low > high {
            return matched;
        }

        let mut cursor = self.nodes[self.predecessor(low)].forward[0];
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            if node.term.as_str() > high {
                break;
            }
            if node.term.as_str() >= low {
                matched.push((node.term.as_str(), &node.postings));
            }
            cursor = node.forward[0];
        }

        matched
    }

    /// Iterate over `(term, postings)` in ascending term order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.nodes[HEAD].forward[0],
        }
    }

    /// Terms linked at `level`, head to tail. Empty above the current level.
    pub fn level_terms(&self, level: usize) -> Vec<&str> {
        let mut terms = Vec::new();
        if level > self.config.max_level {
            return terms;
        }

        let mut cursor = self.nodes[HEAD].forward[level];
        while let Some(id) = cursor {
            terms.push(self.nodes[id].term.as_str());
            cursor = self.nodes[id].forward[level];
        }
        terms
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Whether no term has been indexed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of (term, document) pairs.
    pub fn posting_count(&self) -> usize {
        self.posting_count
    }

    /// Highest level holding at least one term (0 when empty).
    pub fn current_level(&self) -> usize {
        self.current_level
    }

    /// Configured ceiling on node levels.
    pub fn max_level(&self) -> usize {
        self.config.max_level
    }

    /// The configuration this index was built with.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Summarize the index shape.
    pub fn stats(&self) -> IndexStats {
        let mut level_histogram = vec![0; self.current_level + 1];
        for node in &self.nodes[1..] {
            level_histogram[node.level()] += 1;
        }

        IndexStats {
            terms: self.len(),
            postings: self.posting_count,
            current_level: self.current_level,
            max_level: self.config.max_level,
            level_histogram,
        }
    }

    /// Check the structural invariants.
    ///
    /// Every chain must be strictly increasing, every node linked at level
    /// `k` must also be linked at `k - 1`, level 0 must hold every term, no
    /// posting set may be empty, and no chain above the current level may
    /// hold a term.
    pub fn validate(&self) -> Result<()> {
        let mut below: Option<AHashSet<NodeId>> = None;

        for level in 0..=self.config.max_level {
            let mut chain = Vec::new();
            let mut cursor = self.nodes[HEAD].forward[level];
            while let Some(id) = cursor {
                let node = self.nodes.get(id).ok_or_else(|| {
                    SkiffError::index(format!("level {level} links to missing node {id}"))
                })?;
                if node.level() < level {
                    return Err(SkiffError::index(format!(
                        "term '{}' of level {} is linked at level {level}",
                        node.term,
                        node.level()
                    )));
                }
                if let Some(&previous) = chain.last() {
                    let previous: &IndexNode = &self.nodes[previous];
                    if previous.term >= node.term {
                        return Err(SkiffError::index(format!(
                            "level {level} out of order: '{}' before '{}'",
                            previous.term, node.term
                        )));
                    }
                }
                chain.push(id);
                cursor = node.forward[level];
            }

            if level > self.current_level && !chain.is_empty() {
                return Err(SkiffError::index(format!(
                    "level {level} is above the current level {} but holds terms",
                    self.current_level
                )));
            }

            match &below {
                None => {
                    if chain.len() != self.len() {
                        return Err(SkiffError::index(format!(
                            "level 0 holds {} of {} terms",
                            chain.len(),
                            self.len()
                        )));
                    }
                    let empty = chain.iter().find(|&&id| self.nodes[id].postings.is_empty());
                    if let Some(&empty) = empty {
                        return Err(SkiffError::index(format!(
                            "term '{}' has no postings",
                            self.nodes[empty].term
                        )));
                    }
                }
                Some(lower) => {
                    if let Some(&missing) = chain.iter().find(|&&id| !lower.contains(&id)) {
                        return Err(SkiffError::index(format!(
                            "term '{}' is linked at level {level} but not at level {}",
                            self.nodes[missing].term,
                            level - 1
                        )));
                    }
                }
            }

            below = Some(chain.into_iter().collect());
        }

        Ok(())
    }

    /// Move right along `level` while the next term sorts before `term`.
    fn advance(&self, mut current: NodeId, level: usize, term: &str) -> NodeId {
        while let Some(next) = self.nodes[current].forward[level] {
            if self.nodes[next].term.as_str() < term {
                current = next;
            } else {
                break;
            }
        }
        current
    }

    /// The last node whose term sorts before `term` (HEAD if none).
    fn predecessor(&self, term: &str) -> NodeId {
        let mut current = HEAD;
        for level in (0..=self.current_level).rev() {
            current = self.advance(current, level, term);
        }
        current
    }

    fn find(&self, term: &str) -> Option<NodeId> {
        let next = self.nodes[self.predecessor(term)].forward[0]?;
        (self.nodes[next].term == term).then_some(next)
    }
}

/// Iterator over `(term, postings)` in term order.
pub struct Iter<'a> {
    list: &'a TermSkipList,
    cursor: Option<NodeId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a PostingSet);

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.list.nodes[self.cursor?];
        self.cursor = node.forward[0];
        Some((node.term.as_str(), &node.postings))
    }
}

impl<'a> IntoIterator for &'a TermSkipList {
    type Item = (&'a str, &'a PostingSet);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Cycles through a fixed list of levels, expressed as draws.
    struct FixedLevels {
        levels: Vec<usize>,
        next: usize,
        flips_left: Option<usize>,
    }

    impl FixedLevels {
        fn new(levels: Vec<usize>) -> Self {
            FixedLevels {
                levels,
                next: 0,
                flips_left: None,
            }
        }
    }

    impl LevelSource for FixedLevels {
        fn next_draw(&mut self) -> f64 {
            let left = match self.flips_left {
                Some(left) => left,
                None => {
                    let level = self.levels[self.next % self.levels.len()];
                    self.next += 1;
                    level
                }
            };
            if left == 0 {
                self.flips_left = None;
                0.99
            } else {
                self.flips_left = Some(left - 1);
                0.0
            }
        }
    }

    fn seeded(seed: u64) -> TermSkipList {
        TermSkipList::new(IndexConfig::default().with_seed(seed)).unwrap()
    }

    fn sorted(set: &PostingSet) -> Vec<DocId> {
        let mut docs: Vec<DocId> = set.iter().copied().collect();
        docs.sort_unstable();
        docs
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(TermSkipList::new(IndexConfig::default().with_max_level(0)).is_err());
        assert!(
            TermSkipList::new(IndexConfig::default().with_promotion_probability(0.0)).is_err()
        );
    }

    #[test]
    fn test_empty_index() {
        let index = seeded(1);
        assert!(index.is_empty());
        assert_eq!(index.current_level(), 0);
        assert!(index.lookup("anything").is_empty());
        assert!(index.range_lookup("a", "z").is_empty());
        assert_eq!(index.iter().count(), 0);
        assert!(index.validate().is_ok());
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut index = seeded(7);
        assert!(index.insert("batman", 0));
        assert!(index.insert("joker", 0));
        assert!(index.insert("batman", 1));

        assert_eq!(sorted(&index.lookup("batman")), vec![0, 1]);
        assert_eq!(sorted(&index.lookup("joker")), vec![0]);
        assert!(index.lookup("robin").is_empty());
        assert!(index.contains("joker"));
        assert!(!index.contains("jok"));
        assert_eq!(index.len(), 2);
        assert_eq!(index.posting_count(), 3);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut index = seeded(3);
        assert!(index.insert("term", 4));
        assert!(!index.insert("term", 4));
        assert!(!index.insert("term", 4));

        assert_eq!(sorted(&index.lookup("term")), vec![4]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.posting_count(), 1);
    }

    #[test]
    fn test_lookup_returns_a_copy() {
        let mut index = seeded(3);
        index.insert("term", 1);

        let mut copy = index.lookup("term");
        copy.insert(99);
        assert_eq!(sorted(&index.lookup("term")), vec![1]);
    }

    #[test]
    fn test_iteration_is_sorted() {
        let mut index = seeded(11);
        for (doc, term) in ["pear", "apple", "fig", "banana", "apple", "cherry"]
            .iter()
            .enumerate()
        {
            index.insert(term, doc as DocId);
        }

        let terms: Vec<&str> = index.iter().map(|(term, _)| term).collect();
        assert_eq!(terms, vec!["apple", "banana", "cherry", "fig", "pear"]);
        assert_eq!(sorted(index.postings("apple").unwrap()), vec![1, 4]);
    }

    #[test]
    fn test_explicit_levels_shape() {
        let config = IndexConfig::default().with_max_level(4);
        let source = FixedLevels::new(vec![2, 0, 1, 3]);
        let mut index = TermSkipList::with_level_source(config, Box::new(source)).unwrap();

        index.insert("m", 0); // level 2
        index.insert("c", 0); // level 0
        index.insert("x", 0); // level 1
        index.insert("f", 0); // level 3

        assert_eq!(index.current_level(), 3);
        assert_eq!(index.level_terms(0), vec!["c", "f", "m", "x"]);
        assert_eq!(index.level_terms(1), vec!["f", "m", "x"]);
        assert_eq!(index.level_terms(2), vec!["f", "m"]);
        assert_eq!(index.level_terms(3), vec!["f"]);
        assert!(index.level_terms(4).is_empty());
        assert!(index.level_terms(9).is_empty());

        let stats = index.stats();
        assert_eq!(stats.level_histogram, vec![1, 1, 1, 1]);
        assert!(index.validate().is_ok());
    }

    #[test]
    fn test_existing_term_does_not_draw_a_level() {
        let config = IndexConfig::default().with_max_level(4);
        let source = FixedLevels::new(vec![1, 4]);
        let mut index = TermSkipList::with_level_source(config, Box::new(source)).unwrap();

        index.insert("a", 0); // level 1
        index.insert("a", 1); // no draw
        index.insert("a", 2); // no draw
        assert_eq!(index.current_level(), 1);

        index.insert("b", 0); // level 4
        assert_eq!(index.current_level(), 4);
    }

    #[test]
    fn test_height_never_exceeds_max_level() {
        let config = IndexConfig::default()
            .with_max_level(2)
            .with_promotion_probability(0.9)
            .with_seed(5);
        let mut index = TermSkipList::new(config).unwrap();
        for i in 0..500 {
            index.insert(&format!("t{i:04}"), i);
        }
        assert!(index.current_level() <= 2);
        assert!(index.validate().is_ok());
    }

    #[test]
    fn test_range_lookup() {
        let mut index = seeded(9);
        index.insert("apple", 0);
        index.insert("banana", 1);
        index.insert("cherry", 2);
        index.insert("date", 3);
        index.insert("banana", 4);

        assert_eq!(sorted(&index.range_lookup("b", "cz")), vec![1, 2, 4]);
        assert_eq!(sorted(&index.range_lookup("banana", "cherry")), vec![1, 2, 4]);
        assert_eq!(sorted(&index.range_lookup("a", "zzz")), vec![0, 1, 2, 3, 4]);
        assert_eq!(sorted(&index.range_lookup("date", "date")), vec![3]);
        assert!(index.range_lookup("e", "z").is_empty());
        assert!(index.range_lookup("cherry", "banana").is_empty());
    }

    #[test]
    fn test_terms_in_range_breakdown() {
        let mut index = seeded(9);
        index.insert("apple", 0);
        index.insert("banana", 1);
        index.insert("cherry", 2);

        let terms: Vec<&str> = index
            .terms_in_range("b", "d")
            .into_iter()
            .map(|(term, _)| term)
            .collect();
        assert_eq!(terms, vec!["banana", "cherry"]);
    }

    #[test]
    fn test_stats() {
        let mut index = seeded(2);
        index.insert("a", 0);
        index.insert("b", 0);
        index.insert("a", 1);

        let stats = index.stats();
        assert_eq!(stats.terms, 2);
        assert_eq!(stats.postings, 3);
        assert_eq!(stats.max_level, 16);
        assert_eq!(stats.current_level, index.current_level());
        assert_eq!(stats.level_histogram.iter().sum::<usize>(), 2);
    }

    #[test]
    fn test_validate_detects_disorder() {
        let mut index = seeded(4);
        index.insert("a", 0);
        index.insert("b", 0);

        index.nodes.swap(1, 2);
        // Relink so level 0 reads b -> a.
        index.nodes[HEAD].forward[0] = Some(1);
        index.nodes[1].forward[0] = Some(2);
        index.nodes[2].forward[0] = None;
        for level in 1..index.nodes[HEAD].forward.len() {
            index.nodes[HEAD].forward[level] = None;
        }
        for node in &mut index.nodes[1..] {
            node.forward.truncate(1);
        }
        index.current_level = 0;

        assert!(matches!(index.validate(), Err(SkiffError::Index(_))));
    }
}

//! Storage for CFR regrets and strategies.
//!
//! The regret table maps infoset keys to per-action regret and strategy
//! sums. Training threads batch their updates locally during a traversal
//! and merge them under the table's write lock at iteration end, so no
//! update is ever lost and readers never observe a torn vector.

use crate::cfr::error::SolverError;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::RwLock;

/// Sanity bound on decoded key lengths; real keys stay well under 100 bytes.
const MAX_KEY_LEN: u64 = 4096;

/// Sanity bound on decoded action counts.
const MAX_ACTIONS: i32 = 10_000;

/// Learned statistics for one infoset. The action count is implicit in the
/// vector lengths, which always agree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Cumulative counterfactual regret per action.
    pub regret_sum: Vec<f64>,
    /// Cumulative reach-weighted strategy per action.
    pub strategy_sum: Vec<f64>,
}

impl Node {
    /// A fresh zeroed node for `num_actions` actions.
    fn new(num_actions: usize) -> Self {
        Self {
            regret_sum: vec![0.0; num_actions],
            strategy_sum: vec![0.0; num_actions],
        }
    }

    /// Number of actions this node was sized for.
    #[inline]
    pub fn num_actions(&self) -> usize {
        self.regret_sum.len()
    }

    /// Regret matching: probabilities proportional to positive regrets,
    /// uniform when no regret is positive.
    pub fn matched_strategy(&self) -> Vec<f64> {
        let positive: Vec<f64> = self.regret_sum.iter().map(|&r| r.max(0.0)).collect();
        let total: f64 = positive.iter().sum();
        if total > 0.0 {
            positive.iter().map(|&p| p / total).collect()
        } else {
            uniform(self.num_actions())
        }
    }

    /// The time-averaged strategy, which is what converges to equilibrium.
    pub fn average_strategy(&self) -> Vec<f64> {
        let total: f64 = self.strategy_sum.iter().sum();
        if total > 0.0 {
            self.strategy_sum.iter().map(|&s| s / total).collect()
        } else {
            uniform(self.num_actions())
        }
    }

    /// Add a batch delta in place.
    fn add(&mut self, delta: &Node) {
        for (r, d) in self.regret_sum.iter_mut().zip(&delta.regret_sum) {
            *r += d;
        }
        for (s, d) in self.strategy_sum.iter_mut().zip(&delta.strategy_sum) {
            *s += d;
        }
    }
}

/// A uniform distribution over `n` actions.
fn uniform(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    vec![1.0 / n as f64; n]
}

/// Thread-local update buffer accumulated over one traversal.
#[derive(Debug, Default)]
pub struct UpdateBatch {
    updates: FxHashMap<String, Node>,
}

impl UpdateBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate deltas for one infoset. A key recurring with a different
    /// action count follows the same reset rule as the table: the stale
    /// deltas are dropped and the buffer restarts at the new width.
    pub fn accumulate(&mut self, key: &str, regret_delta: &[f64], strategy_delta: &[f64]) {
        debug_assert_eq!(regret_delta.len(), strategy_delta.len());
        let entry = self
            .updates
            .entry(key.to_string())
            .or_insert_with(|| Node::new(regret_delta.len()));
        if entry.num_actions() != regret_delta.len() {
            *entry = Node::new(regret_delta.len());
        }
        for (r, d) in entry.regret_sum.iter_mut().zip(regret_delta) {
            *r += d;
        }
        for (s, d) in entry.strategy_sum.iter_mut().zip(strategy_delta) {
            *s += d;
        }
    }

    /// Number of touched infosets.
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    /// Whether the batch holds no updates.
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

/// The shared infoset table.
#[derive(Debug, Default)]
pub struct RegretTable {
    nodes: RwLock<FxHashMap<String, Node>>,
}

impl RegretTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of infosets learned so far.
    pub fn len(&self) -> usize {
        self.nodes.read().unwrap().len()
    }

    /// Whether nothing has been learned yet.
    pub fn is_empty(&self) -> bool {
        self.nodes.read().unwrap().is_empty()
    }

    /// Drop every node.
    pub fn clear(&self) {
        self.nodes.write().unwrap().clear();
    }

    /// The regret-matched strategy at a key. Unseen keys, and nodes whose
    /// stored width disagrees with `num_actions` (they will be reset at the
    /// next merge), answer uniform.
    pub fn current_strategy(&self, key: &str, num_actions: usize) -> Vec<f64> {
        let nodes = self.nodes.read().unwrap();
        match nodes.get(key) {
            Some(node) if node.num_actions() == num_actions => node.matched_strategy(),
            _ => uniform(num_actions),
        }
    }

    /// The average strategy at a key, uniform for unseen or mismatched
    /// nodes.
    pub fn average_strategy(&self, key: &str, num_actions: usize) -> Vec<f64> {
        let nodes = self.nodes.read().unwrap();
        match nodes.get(key) {
            Some(node) if node.num_actions() == num_actions => node.average_strategy(),
            _ => uniform(num_actions),
        }
    }

    /// Merge a traversal's batch under the write lock. A node revisited
    /// with a different action count is reset to fresh zero vectors at the
    /// new width before the delta lands.
    pub fn merge(&self, batch: UpdateBatch) {
        if batch.is_empty() {
            return;
        }
        let mut nodes = self.nodes.write().unwrap();
        for (key, delta) in batch.updates {
            let entry = nodes
                .entry(key)
                .or_insert_with(|| Node::new(delta.num_actions()));
            if entry.num_actions() != delta.num_actions() {
                log::debug!(
                    "resetting node from {} to {} actions",
                    entry.num_actions(),
                    delta.num_actions()
                );
                *entry = Node::new(delta.num_actions());
            }
            entry.add(&delta);
        }
    }

    /// Copy out every node, sorted by key. Drives persistence and makes
    /// table comparisons in tests deterministic.
    pub fn dump(&self) -> Vec<(String, Node)> {
        let nodes = self.nodes.read().unwrap();
        let mut out: Vec<(String, Node)> =
            nodes.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// Write the table to disk: little-endian `node_count`, then per node
    /// the key length, raw key bytes, action count, regrets and strategy
    /// sums.
    pub fn save(&self, path: &Path) -> Result<(), SolverError> {
        let nodes = self.dump();
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_u64::<LittleEndian>(nodes.len() as u64)?;
        for (key, node) in &nodes {
            writer.write_u64::<LittleEndian>(key.len() as u64)?;
            writer.write_all(key.as_bytes())?;
            writer.write_i32::<LittleEndian>(node.num_actions() as i32)?;
            for &r in &node.regret_sum {
                writer.write_f64::<LittleEndian>(r)?;
            }
            for &s in &node.strategy_sum {
                writer.write_f64::<LittleEndian>(s)?;
            }
        }
        writer.flush()?;
        log::info!("saved {} infosets to {}", nodes.len(), path.display());
        Ok(())
    }

    /// Replace the table with a checkpoint. A missing file logs a warning
    /// and leaves an empty table; a corrupt file errors without touching
    /// the current contents.
    pub fn load(&self, path: &Path) -> Result<(), SolverError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!(
                    "strategy file {} missing, starting from an empty table",
                    path.display()
                );
                self.clear();
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let mut reader = BufReader::new(file);

        let count = reader
            .read_u64::<LittleEndian>()
            .map_err(|e| read_error(0, e))?;
        let mut loaded = FxHashMap::default();
        for node_idx in 0..count {
            let key_len = reader
                .read_u64::<LittleEndian>()
                .map_err(|e| read_error(node_idx, e))?;
            if key_len > MAX_KEY_LEN {
                return Err(malformed(node_idx, format!("implausible key length {}", key_len)));
            }
            let mut key_bytes = vec![0u8; key_len as usize];
            reader
                .read_exact(&mut key_bytes)
                .map_err(|e| read_error(node_idx, e))?;
            let key = String::from_utf8(key_bytes)
                .map_err(|_| malformed(node_idx, "key is not UTF-8".to_string()))?;

            let num_actions = reader
                .read_i32::<LittleEndian>()
                .map_err(|e| read_error(node_idx, e))?;
            if !(0..=MAX_ACTIONS).contains(&num_actions) {
                return Err(malformed(
                    node_idx,
                    format!("implausible action count {}", num_actions),
                ));
            }

            let mut node = Node::new(num_actions as usize);
            for r in node.regret_sum.iter_mut() {
                *r = reader
                    .read_f64::<LittleEndian>()
                    .map_err(|e| read_error(node_idx, e))?;
            }
            for s in node.strategy_sum.iter_mut() {
                *s = reader
                    .read_f64::<LittleEndian>()
                    .map_err(|e| read_error(node_idx, e))?;
            }
            loaded.insert(key, node);
        }

        log::info!("loaded {} infosets from {}", loaded.len(), path.display());
        *self.nodes.write().unwrap() = loaded;
        Ok(())
    }
}

fn malformed(node: u64, reason: String) -> SolverError {
    SolverError::MalformedCheckpoint { node, reason }
}

fn read_error(node: u64, e: io::Error) -> SolverError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        malformed(node, "truncated file".to_string())
    } else {
        SolverError::Io(e)
    }
}

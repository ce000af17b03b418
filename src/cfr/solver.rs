//! Monte Carlo CFR over OFC Pineapple self-play.
//!
//! Each iteration samples one shuffled deck, then walks the placement tree
//! it induces in full: at every decision the acting player's regrets are
//! updated against the counterfactual value of each alternative, weighted
//! by the opponent's reach probability. Chance is the only thing sampled;
//! no in-tree action sampling is performed. The average of the accumulated
//! strategies converges toward a Nash equilibrium of the placement game.

use crate::cfr::config::{SolverConfig, SolverStats};
use crate::cfr::error::SolverError;
use crate::cfr::storage::{RegretTable, UpdateBatch};
use crate::games::ofc::{infoset_key, Action, GameState, HandEvaluator};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

/// The self-play trainer.
///
/// Owns the regret table exclusively; the hand evaluator is shared
/// read-only across worker threads. Game states are cheap value types
/// produced fresh per iteration.
pub struct MccfrSolver {
    config: SolverConfig,
    evaluator: HandEvaluator,
    table: RegretTable,
    iterations_done: AtomicU64,
    empty_action_warned: AtomicBool,
    stats: SolverStats,
}

impl MccfrSolver {
    /// Create a solver with an empty table.
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            evaluator: HandEvaluator::new(),
            table: RegretTable::new(),
            iterations_done: AtomicU64::new(0),
            empty_action_warned: AtomicBool::new(false),
            stats: SolverStats::new(),
        }
    }

    /// Run `iterations` self-play iterations, blocking until done.
    ///
    /// Iterations are independent given the shared table and fan out over
    /// the configured worker pool; each worker owns an OS-seeded generator.
    /// With `num_workers = 1` the run stays on the calling thread and
    /// honours `SolverConfig::seed`.
    pub fn train(&mut self, iterations: u32) -> &SolverStats {
        let start = Instant::now();

        if self.config.num_workers == Some(1) {
            let mut rng = match self.config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            for _ in 0..iterations {
                self.run_iteration(&mut rng);
            }
        } else {
            if self.config.seed.is_some() {
                log::warn!("seed is ignored by parallel training; set num_workers = 1");
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.num_workers.unwrap_or(0))
                .build()
                .expect("failed to build worker pool");
            let solver = &*self;
            pool.install(|| {
                (0..iterations)
                    .into_par_iter()
                    .for_each(|_| solver.run_iteration(&mut rand::thread_rng()));
            });
        }

        self.stats.iterations = self.iterations_done.load(Ordering::Relaxed);
        self.stats.info_sets = self.table.len();
        self.stats.elapsed_seconds = start.elapsed().as_secs_f64();
        self.stats.update_rate(iterations as u64);
        log::info!(
            "trained {} iterations, {} infosets, {:.1} it/s",
            self.stats.iterations,
            self.stats.info_sets,
            self.stats.iterations_per_second
        );
        &self.stats
    }

    /// One self-play hand: fresh shuffle, full traversal, batched flush.
    fn run_iteration<R: Rng>(&self, rng: &mut R) {
        let state = GameState::new(rng);
        let mut batch = UpdateBatch::new();
        self.traverse(&state, [1.0, 1.0], &mut batch);
        self.table.merge(batch);

        let done = self.iterations_done.fetch_add(1, Ordering::Relaxed) + 1;
        if done % self.config.log_every == 0 {
            log::info!("iteration {}: {} infosets", done, self.table.len());
        }
    }

    /// Recursive CFR step returning both players' expected utility.
    fn traverse(&self, state: &GameState, reach: [f64; 2], batch: &mut UpdateBatch) -> [f64; 2] {
        if state.is_terminal() {
            return state.payoffs(&self.evaluator);
        }

        let actions = state.legal_actions();
        if actions.is_empty() {
            // Unreachable under a total action generator; kept as a safety
            // valve so a generator gap degrades instead of diverging.
            if !self.empty_action_warned.swap(true, Ordering::Relaxed) {
                log::warn!("empty action set on a non-terminal state, taking the null action");
            }
            return self.traverse(&state.apply_action(&Action::null()), reach, batch);
        }

        let actor = state.current_player();
        let key = infoset_key(state);
        let strategy = self.table.current_strategy(&key, actions.len());

        let mut action_utils = vec![[0.0f64; 2]; actions.len()];
        let mut node_util = [0.0f64; 2];
        for (i, action) in actions.iter().enumerate() {
            let mut next_reach = reach;
            next_reach[actor] *= strategy[i];
            let util = self.traverse(&state.apply_action(action), next_reach, batch);
            action_utils[i] = util;
            node_util[0] += strategy[i] * util[0];
            node_util[1] += strategy[i] * util[1];
        }

        let opponent_reach = reach[1 - actor];
        let regret_delta: Vec<f64> = action_utils
            .iter()
            .map(|util| opponent_reach * (util[actor] - node_util[actor]))
            .collect();
        let strategy_delta: Vec<f64> = strategy.iter().map(|&p| reach[actor] * p).collect();
        batch.accumulate(&key, &regret_delta, &strategy_delta);

        node_util
    }

    /// Write the current table to `path`. Fails loudly on any I/O error.
    pub fn save_strategy(&self, path: impl AsRef<Path>) -> Result<(), SolverError> {
        self.table.save(path.as_ref())
    }

    /// Replace the table from `path`. A missing file is not an error: the
    /// solver starts from an empty table.
    pub fn load_strategy(&mut self, path: impl AsRef<Path>) -> Result<(), SolverError> {
        self.table.load(path.as_ref())
    }

    /// The average (equilibrium-approximating) strategy at an infoset key.
    pub fn average_strategy(&self, key: &str, num_actions: usize) -> Vec<f64> {
        self.table.average_strategy(key, num_actions)
    }

    /// The current regret-matched strategy at an infoset key.
    pub fn current_strategy(&self, key: &str, num_actions: usize) -> Vec<f64> {
        self.table.current_strategy(key, num_actions)
    }

    /// Number of infosets discovered.
    pub fn num_infosets(&self) -> usize {
        self.table.len()
    }

    /// The underlying regret table.
    pub fn table(&self) -> &RegretTable {
        &self.table
    }

    /// The shared hand evaluator.
    pub fn evaluator(&self) -> &HandEvaluator {
        &self.evaluator
    }

    /// The solver's configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Stats from the last training run.
    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Play forward with the first legal action until the requested street.
    fn state_at_street(seed: u64, street: u8) -> GameState {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = GameState::with_dealer(&mut rng, 0);
        while state.street() < street {
            let actions = state.legal_actions();
            state = state.apply_action(&actions[0]);
        }
        assert!(!state.is_terminal());
        state
    }

    #[test]
    fn test_traverse_returns_zero_sum_utilities() {
        let solver = MccfrSolver::new(SolverConfig::default());
        for seed in 0..3 {
            let state = state_at_street(seed, 5);
            let mut batch = UpdateBatch::new();
            let util = solver.traverse(&state, [1.0, 1.0], &mut batch);
            assert!(
                (util[0] + util[1]).abs() < 1e-9,
                "utilities {:?} not zero-sum",
                util
            );
            assert!(!batch.is_empty());
        }
    }

    #[test]
    fn test_traverse_populates_the_table() {
        let solver = MccfrSolver::new(SolverConfig::default());
        let state = state_at_street(1, 5);
        let key = infoset_key(&state);
        let num_actions = state.legal_actions().len();

        let mut batch = UpdateBatch::new();
        solver.traverse(&state, [1.0, 1.0], &mut batch);
        solver.table.merge(batch);

        assert!(solver.num_infosets() >= 2); // both players acted
        // The visited root node now carries this street's strategy weight.
        let avg = solver.average_strategy(&key, num_actions);
        assert_eq!(avg.len(), num_actions);
        assert!((avg.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(avg.iter().all(|&p| p >= 0.0));
    }

    #[test]
    fn test_repeated_traversals_keep_strategies_normalized() {
        let solver = MccfrSolver::new(SolverConfig::default());
        for seed in 0..5 {
            let state = state_at_street(seed, 5);
            let mut batch = UpdateBatch::new();
            solver.traverse(&state, [1.0, 1.0], &mut batch);
            solver.table.merge(batch);
        }
        for (key, node) in solver.table.dump() {
            let strategy = solver.current_strategy(&key, node.num_actions());
            assert!(
                (strategy.iter().sum::<f64>() - 1.0).abs() < 1e-9,
                "strategy at {} does not normalize",
                key
            );
            assert!(strategy.iter().all(|&p| p >= 0.0));
        }
    }

    #[test]
    fn test_unseen_key_answers_uniform() {
        let solver = MccfrSolver::new(SolverConfig::default());
        let strategy = solver.average_strategy("S1|B:E;M:E;T:E|OB:E;OM:E;OT:E|H:", 6);
        assert_eq!(strategy, vec![1.0 / 6.0; 6]);
    }

    #[test]
    fn test_save_and_reload_through_the_solver() {
        let mut solver = MccfrSolver::new(SolverConfig::default());
        let state = state_at_street(2, 5);
        let mut batch = UpdateBatch::new();
        solver.traverse(&state, [1.0, 1.0], &mut batch);
        solver.table.merge(batch);
        let before = solver.table.dump();

        let path = std::env::temp_dir().join(format!("ofc_solver_ckpt_{}", std::process::id()));
        solver.save_strategy(&path).unwrap();
        solver.load_strategy(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(solver.table.dump(), before);
    }
}

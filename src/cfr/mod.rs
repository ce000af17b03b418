//! CFR (Counterfactual Regret Minimization) solver module.
//!
//! Vanilla CFR with the chance outcome — the shuffled deck — sampled once
//! per iteration:
//!
//! 1. Regret matching derives each infoset's strategy from its accumulated
//!    positive regrets.
//! 2. A full traversal of the sampled hand updates both players' regrets
//!    and strategy sums, weighted by reach probabilities.
//! 3. The *average* of the accumulated strategies, not the latest matched
//!    one, is what converges to Nash equilibrium and what is persisted.
//!
//! # Usage
//!
//! ```no_run
//! use ofc_solver::cfr::{MccfrSolver, SolverConfig};
//!
//! let mut solver = MccfrSolver::new(SolverConfig::default().with_workers(4));
//! solver.train(10_000);
//! solver.save_strategy("strategy.bin").unwrap();
//! ```
//!
//! # References
//!
//! - Zinkevich, M., et al. "Regret Minimization in Games with Incomplete
//!   Information" (2007)
//! - Lanctot, M., et al. "Monte Carlo Sampling for Regret Minimization in
//!   Extensive Games" (2009)

pub mod config;
pub mod error;
pub mod solver;
pub mod storage;

// Re-export main types for convenient access
pub use config::{ConfigError, SolverConfig, SolverStats};
pub use error::SolverError;
pub use solver::MccfrSolver;
pub use storage::{Node, RegretTable, UpdateBatch};

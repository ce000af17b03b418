//! # OFC Solver
//!
//! A self-play trainer for two-player Pineapple Open-Face Chinese poker.
//! The trainer approximates a Nash-equilibrium placement policy with Monte
//! Carlo Counterfactual Regret Minimization: every iteration samples one
//! shuffled deck, traverses the placement tree it induces, and accumulates
//! per-infoset regret and strategy statistics that persist to disk as a
//! binary checkpoint.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ofc_solver::{MccfrSolver, SolverConfig};
//!
//! let mut solver = MccfrSolver::new(SolverConfig::default());
//! solver.load_strategy("strategy.bin").unwrap(); // missing file is fine
//! solver.train(1_000);
//! solver.save_strategy("strategy.bin").unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`cfr`]: the solver — regret table, traversal, training, persistence
//! - [`games`]: the OFC Pineapple engine the solver trains on
//!
//! ## Architecture
//!
//! ```text
//! MccfrSolver ── traverse ──► GameState ── payoffs ──► Board + HandEvaluator
//!      │                          │
//!      │ regret/strategy sums     │ lossy key
//!      ▼                          ▼
//! RegretTable ◄────────────── infoset_key
//! ```

#![warn(missing_docs)]

pub mod cfr;
pub mod games;

// Re-export commonly used types at crate root for convenience
pub use cfr::{MccfrSolver, RegretTable, SolverConfig, SolverError, SolverStats};
pub use games::ofc::{
    Action, Board, Card, Deck, GameState, HandClass, HandEvaluator, HandRank, Row,
};

//! Two-player OFC Pineapple.
//!
//! Street 1 deals five cards which are all placed; streets 2-5 deal three,
//! of which two are placed and one discarded. A complete board holds 13
//! cards over the 3/5/5 rows; rows must not grow weaker from bottom to top
//! or the board fouls. Terminal scoring compares rows pairwise and adds
//! royalties, scoop and Fantasyland bonuses.

pub mod action;
pub mod board;
pub mod card;
pub mod hand_eval;
pub mod info_state;
pub mod state;

pub use action::{Action, Placement};
pub use board::{Board, Row};
pub use card::{Card, CardSet, Deck};
pub use hand_eval::{HandClass, HandEvaluator, HandRank};
pub use info_state::{infoset_key, row_summary};
pub use state::{GameState, NUM_PLAYERS, SCOOP_BONUS};

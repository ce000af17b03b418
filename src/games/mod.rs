//! Game implementations.
//!
//! Home of the OFC Pineapple engine the solver trains on: the card and
//! board model, hand evaluation, dealing and street progression, legal
//! placement actions and terminal scoring.

pub mod ofc;

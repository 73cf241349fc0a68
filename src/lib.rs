//! Combat Odds - dice probability engine for tabletop wargame combat
//!
//! Per-die success chances under reroll rules, binomial outcome
//! distributions, the analytic hit → wound chain and a Monte Carlo kill
//! simulation against multi-wound models.

pub mod combat;
pub mod core;
pub mod dice;
pub mod distribution;
pub mod input;

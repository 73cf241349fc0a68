//! Probability primitives for a single dice stage

pub mod profile;
pub mod reroll;
pub mod tables;

pub use profile::{
    feel_no_pain_chance, resolve_success_profile, resolve_wound_success_profile, save_chance,
    SuccessProfile,
};
pub use reroll::{apply_reroll, Chances};
pub use tables::{d6_table, two_d6_table, D6Row, RiskBand, TwoD6Row};

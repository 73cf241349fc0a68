//! Normalization of loosely-typed calculator input

pub mod lenient;
pub mod request;

pub use lenient::{lenient_count, lenient_stat, parse_int_prefix, NumericInput};
pub use request::{ChainRequest, KillRequest};

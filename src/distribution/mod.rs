//! Binomial outcome distributions

pub mod binomial;
pub mod outcome;

pub use binomial::{
    binomial_lower_tail, binomial_mean, binomial_pmf, binomial_pmf_range, binomial_std_dev,
    binomial_variance,
};
pub use outcome::{
    build_distribution, build_shifted_distribution, OutcomeEntry, OutcomeWindow,
    TrialOutcomeDistribution,
};

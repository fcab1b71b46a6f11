//! Soft-factor models.
//!
//! Fairness, coverage, and weekend balance depend on peer and historical
//! data the engine does not yet derive itself. They sit behind
//! [`FactorModel`] so the evaluator stays deterministic with respect to its
//! own inputs: callers pick a stochastic stand-in, a fixed model, or their
//! own implementation backed by real data.
//!
//! # Score Convention
//! Every factor returns a desirability score in [0,1]; higher is better.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::models::{CommittedShift, Employee, ShiftRequirement};

/// Source of the peer-relative soft factors.
///
/// Methods take `&mut self` so stochastic implementations can advance
/// internal state; implementations must not mutate their arguments.
pub trait FactorModel {
    /// How underrepresented this employee is in recent assignments.
    fn fairness(&mut self, employee: &Employee, history: &[CommittedShift]) -> f64;

    /// How critical it is to fill this particular shift.
    fn coverage(&mut self, shift: &ShiftRequirement, history: &[CommittedShift]) -> f64;

    /// How evenly weekend shifts are spread for this employee.
    fn weekend_balance(&mut self, employee: &Employee, history: &[CommittedShift]) -> f64;
}

/// Stand-in model that samples each factor from a fixed band:
/// fairness [0.6, 1.0), coverage [0.7, 1.0), weekend balance [0.4, 1.0).
///
/// The bands keep scores plausible until a model backed by real peer data
/// replaces this one. Runs using it are not reproducible across different
/// seeds; tests should pin the seed or use [`FixedFactors`].
// TODO: derive fairness and weekend balance from per-employee counts in
// `history` instead of sampling.
#[derive(Debug, Clone)]
pub struct StochasticFactors<R: Rng> {
    rng: R,
}

impl StochasticFactors<SmallRng> {
    /// Creates a model seeded for reproducible draws.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> StochasticFactors<R> {
    /// Creates a model over a caller-supplied generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> FactorModel for StochasticFactors<R> {
    fn fairness(&mut self, _employee: &Employee, _history: &[CommittedShift]) -> f64 {
        self.rng.random_range(0.6..1.0)
    }

    fn coverage(&mut self, _shift: &ShiftRequirement, _history: &[CommittedShift]) -> f64 {
        self.rng.random_range(0.7..1.0)
    }

    fn weekend_balance(&mut self, _employee: &Employee, _history: &[CommittedShift]) -> f64 {
        self.rng.random_range(0.4..1.0)
    }
}

/// Deterministic model returning the same value for every query.
///
/// Defaults to the midpoint of each stochastic band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedFactors {
    /// Fairness score returned for every employee.
    pub fairness: f64,
    /// Coverage score returned for every shift.
    pub coverage: f64,
    /// Weekend balance score returned for every employee.
    pub weekend_balance: f64,
}

impl FixedFactors {
    /// Creates a model with the given constant scores.
    pub fn new(fairness: f64, coverage: f64, weekend_balance: f64) -> Self {
        Self {
            fairness,
            coverage,
            weekend_balance,
        }
    }
}

impl Default for FixedFactors {
    fn default() -> Self {
        Self::new(0.8, 0.85, 0.7)
    }
}

impl FactorModel for FixedFactors {
    fn fairness(&mut self, _employee: &Employee, _history: &[CommittedShift]) -> f64 {
        self.fairness
    }

    fn coverage(&mut self, _shift: &ShiftRequirement, _history: &[CommittedShift]) -> f64 {
        self.coverage
    }

    fn weekend_balance(&mut self, _employee: &Employee, _history: &[CommittedShift]) -> f64 {
        self.weekend_balance
    }
}

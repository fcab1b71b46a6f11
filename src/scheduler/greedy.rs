//! Greedy sequential-assignment scheduler.
//!
//! # Algorithm
//!
//! 1. Validate the run inputs; invalid configuration fails fast.
//! 2. For each requirement, in input order:
//!    a. Evaluate every employee against it.
//!    b. Stable-sort descending by score; ties keep roster order.
//!    c. If the top score is 0, leave the requirement unfilled and move on.
//!    d. Otherwise commit the winner, advance its rolling counters, and
//!       record up to 3 runners-up with a derived reason each.
//!
//! Assignment is greedy per requirement with no backtracking; each commit
//! feeds the counters read by every later evaluation, so processing is
//! strictly sequential.
//!
//! # Complexity
//! O(r · e) evaluations plus O(r · e log e) for sorting, where
//! r = requirements and e = employees.

use log::debug;
use rand::rngs::SmallRng;
use thiserror::Error;

use crate::evaluator::{evaluate, CandidateEvaluation, FactorModel, StochasticFactors};
use crate::models::{
    Alternative, AssignmentResult, CommittedShift, Employee, RollingState, Roster,
    ScheduleParams, ShiftRequirement,
};
use crate::validation::{self, ValidationError};

use super::RosterState;

/// Error returned when a run cannot start.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The configuration or inputs failed validation.
    #[error("invalid scheduling input ({} issues)", .0.len())]
    InvalidInput(Vec<ValidationError>),
}

/// Greedy rostering scheduler.
///
/// Owns the run configuration and the soft-factor model. The factor model
/// is `&mut` across the run so stochastic models can advance; use
/// [`FixedFactors`](crate::evaluator::FixedFactors) for reproducible runs.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, NaiveTime, Weekday};
/// use shift_roster::evaluator::FixedFactors;
/// use shift_roster::models::{Employee, ScheduleParams, ShiftRequirement};
/// use shift_roster::scheduler::GreedyScheduler;
///
/// let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
/// let employees = vec![Employee::new("E1")
///     .with_day(Weekday::Mon, t(8), t(20))
///     .with_skill("customer service")
///     .with_skill_level(3)];
/// let requirements = vec![ShiftRequirement::new(
///     NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     t(8),
///     t(16),
/// )
/// .with_required_skill("customer service")
/// .with_min_skill_level(2)];
/// let params = ScheduleParams::new(
///     NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
/// );
///
/// let mut scheduler = GreedyScheduler::new(params, FixedFactors::default());
/// let roster = scheduler.run(&employees, &requirements, &[]).unwrap();
/// assert_eq!(roster.assignment_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GreedyScheduler<F: FactorModel> {
    params: ScheduleParams,
    factors: F,
}

impl GreedyScheduler<StochasticFactors<SmallRng>> {
    /// Creates a scheduler with the seeded stochastic factor model.
    pub fn with_seed(params: ScheduleParams, seed: u64) -> Self {
        Self::new(params, StochasticFactors::seeded(seed))
    }
}

impl<F: FactorModel> GreedyScheduler<F> {
    /// Creates a scheduler over the given factor model.
    pub fn new(params: ScheduleParams, factors: F) -> Self {
        Self { params, factors }
    }

    /// The run configuration.
    pub fn params(&self) -> &ScheduleParams {
        &self.params
    }

    /// Fills the requirement list from the roster.
    ///
    /// Returns one [`AssignmentResult`] per requirement that found a
    /// non-zero-score candidate, in requirement order. A requirement no
    /// candidate can fill is skipped silently; callers detect it by absence
    /// from the roster. Input employees are read-only; counters live in a
    /// run-scoped [`RosterState`].
    pub fn run(
        &mut self,
        employees: &[Employee],
        requirements: &[ShiftRequirement],
        history: &[CommittedShift],
    ) -> Result<Roster, ScheduleError> {
        validation::validate_inputs(&self.params, employees, requirements)
            .map_err(ScheduleError::InvalidInput)?;

        let mut state = RosterState::from_employees(employees);
        let mut roster = Roster::new();
        let unseeded = RollingState::default();

        for shift in requirements {
            let mut scored: Vec<(usize, CandidateEvaluation)> = employees
                .iter()
                .enumerate()
                .map(|(idx, employee)| {
                    let counters = state.get(&employee.id).unwrap_or(&unseeded);
                    let evaluation = evaluate(
                        employee,
                        counters,
                        shift,
                        history,
                        &self.params,
                        &mut self.factors,
                    );
                    (idx, evaluation)
                })
                .collect();

            // Stable sort: equal scores keep roster order.
            scored.sort_by(|a, b| {
                b.1.score
                    .partial_cmp(&a.1.score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            let mut ranked = scored.into_iter();
            let Some((best_idx, best)) = ranked.next() else {
                continue;
            };
            if best.score <= 0.0 {
                debug!(
                    "requirement on {} {}-{} left unfilled",
                    shift.date, shift.start, shift.end
                );
                continue;
            }

            let winner = &employees[best_idx];
            let alternatives: Vec<Alternative> = ranked
                .take(3)
                .map(|(idx, evaluation)| Alternative {
                    employee_id: employees[idx].id.clone(),
                    score: evaluation.score,
                    reason: alternative_reason(&best, &evaluation),
                })
                .collect();

            state.commit(&winner.id, shift);
            debug!(
                "assigned {} to {} {}-{} ({:.0}% match)",
                winner.id,
                shift.date,
                shift.start,
                shift.end,
                best.score * 100.0
            );

            roster.add_assignment(AssignmentResult {
                requirement: shift.clone(),
                employee_id: winner.id.clone(),
                score: best.score,
                decision_path: best.decision_path,
                alternatives,
            });
        }

        Ok(roster)
    }
}

const NARROW_MARGIN_REASON: &str =
    "scored marginally lower under the selected optimization method";

/// Derives a reason from the dominant factor gap between the winner and a
/// runner-up. A rejected runner-up carries its failing check instead.
fn alternative_reason(chosen: &CandidateEvaluation, alt: &CandidateEvaluation) -> String {
    let Some(alt_factors) = alt.factors else {
        return alt
            .decision_path
            .last()
            .cloned()
            .unwrap_or_else(|| "rejected by a hard constraint".to_string());
    };
    let Some(chosen_factors) = chosen.factors else {
        return NARROW_MARGIN_REASON.to_string();
    };

    let mut gaps = vec![
        (
            chosen_factors.fairness - alt_factors.fairness,
            "has had more recent assignments than the selected employee",
        ),
        (
            chosen_factors.efficiency - alt_factors.efficiency,
            "weaker skill or shift-time fit than the selected employee",
        ),
    ];
    if let (Some(chosen_pref), Some(alt_pref)) =
        (chosen_factors.preference, alt_factors.preference)
    {
        gaps.push((
            chosen_pref - alt_pref,
            "the shift aligns less with this employee's preferred times",
        ));
    }
    if let (Some(chosen_wk), Some(alt_wk)) = (
        chosen_factors.weekend_balance,
        alt_factors.weekend_balance,
    ) {
        gaps.push((
            chosen_wk - alt_wk,
            "weekend shifts are spread less evenly for this employee",
        ));
    }

    gaps.into_iter()
        .filter(|(gap, _)| *gap > 1e-9)
        .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(_, phrase)| phrase.to_string())
        .unwrap_or_else(|| NARROW_MARGIN_REASON.to_string())
}

//! Candidate evaluation: hard-constraint gate plus multi-factor scoring.
//!
//! Evaluates one (employee, shift) pair and returns a score in [0,1] with
//! an ordered, human-readable decision path. A score of 0 means the
//! candidate was rejected by a hard constraint.
//!
//! # Algorithm
//!
//! 1. Hard constraints, short-circuiting in a fixed order: availability,
//!    consecutive-day cap, rest gap, weekly-hours cap, skill match. The
//!    first failure returns score 0 immediately; later checks are neither
//!    performed nor logged.
//! 2. Soft factors, each in [0,1]: fairness, efficiency, coverage, and
//!    conditionally preference and weekend balance.
//! 3. Weighted combination selected by the optimization method, followed by
//!    preference and weekend post-adjustments.
//!
//! The evaluator never mutates its inputs. Rolling counters are passed
//! separately from the employee so the scheduler's run-scoped store stays
//! the single source of truth.
//!
//! # Reference
//! Ernst et al. (2004), "Staff scheduling and rostering: A review of
//! applications, methods and models"

mod factors;

pub use factors::{FactorModel, FixedFactors, StochasticFactors};

use log::trace;

use crate::models::{
    Availability, CommittedShift, Employee, OptimizationMethod, RollingState, ScheduleParams,
    ShiftRequirement,
};

/// Per-factor breakdown of a scored candidate.
///
/// `preference` and `weekend_balance` are `None` when the run configuration
/// or the shift date keeps those factors out of the combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorScores {
    /// Peer-relative underrepresentation score.
    pub fairness: f64,
    /// Skill and shift-time fit score.
    pub efficiency: f64,
    /// Criticality of filling this shift.
    pub coverage: f64,
    /// Preference match, when preferences are prioritized.
    pub preference: Option<f64>,
    /// Weekend spread, when balancing is on and the shift is a weekend day.
    pub weekend_balance: Option<f64>,
}

/// Result of evaluating one (employee, shift) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateEvaluation {
    /// Final score in [0,1]; exactly 0 for a rejected candidate.
    pub score: f64,
    /// Ordered trace of every check and scoring step performed.
    pub decision_path: Vec<String>,
    /// Factor breakdown; `None` when the candidate was rejected before
    /// scoring.
    pub factors: Option<FactorScores>,
}

impl CandidateEvaluation {
    fn rejected(decision_path: Vec<String>) -> Self {
        Self {
            score: 0.0,
            decision_path,
            factors: None,
        }
    }

    /// Whether a hard constraint rejected this candidate.
    pub fn is_rejected(&self) -> bool {
        self.factors.is_none()
    }
}

/// Normalized (fairness, efficiency, coverage) weights for a method.
///
/// The three weights sum to exactly 1.0 for every method, assuming the
/// balanced weights were validated to sum to 100.
pub fn combination_weights(params: &ScheduleParams) -> (f64, f64, f64) {
    match params.method {
        OptimizationMethod::Fairness => (0.7, 0.3, 0.0),
        OptimizationMethod::Efficiency => (0.3, 0.7, 0.0),
        OptimizationMethod::Coverage => (0.15, 0.15, 0.7),
        OptimizationMethod::Balanced => (
            params.fairness_weight as f64 / 100.0,
            params.efficiency_weight as f64 / 100.0,
            0.0,
        ),
    }
}

/// Evaluates one employee against one shift requirement.
///
/// `state` carries the employee's rolling counters as tracked by the
/// scheduler for the current run; `history` is forwarded to the factor
/// model. Returns score 0 with the failing check named in the decision
/// path if any hard constraint fails.
pub fn evaluate<F: FactorModel>(
    employee: &Employee,
    state: &RollingState,
    shift: &ShiftRequirement,
    history: &[CommittedShift],
    params: &ScheduleParams,
    factors: &mut F,
) -> CandidateEvaluation {
    let mut path = Vec::new();
    let avail = &employee.availability;
    let day = shift.weekday();

    // Gate 1: availability (weekday, time off, covering window).
    let available = avail.is_day_available(day)
        && !avail.is_time_off(shift.date)
        && avail.window_covering(day, shift.start, shift.end).is_some();
    if !available {
        path.push(format!("availability check: not available on {day} {}", shift.date));
        trace!("{}: rejected, not available on {} {}", employee.id, day, shift.date);
        return CandidateEvaluation::rejected(path);
    }
    path.push(format!("availability check: available on {day}"));

    // Gate 2: consecutive-day cap. At the cap is already too many.
    if state.consecutive_days >= params.max_consecutive_days {
        path.push(format!(
            "consecutive days check: at the {}-day limit",
            params.max_consecutive_days
        ));
        trace!("{}: rejected, at consecutive-day limit", employee.id);
        return CandidateEvaluation::rejected(path);
    }
    path.push(format!(
        "consecutive days check: {} of {} before this shift",
        state.consecutive_days, params.max_consecutive_days
    ));

    // Gate 3: rest gap since the last assigned shift.
    match state.last_shift_end {
        None => path.push("rest gap check: no previous shift".to_string()),
        Some(last_end) => {
            let gap_hours = (shift.start_dt() - last_end).num_minutes() as f64 / 60.0;
            if gap_hours < params.min_hours_between_shifts as f64 {
                path.push(format!(
                    "rest gap check: {gap_hours:.1} h since last shift, {} h required",
                    params.min_hours_between_shifts
                ));
                trace!("{}: rejected, rest gap {:.1} h", employee.id, gap_hours);
                return CandidateEvaluation::rejected(path);
            }
            path.push(format!("rest gap check: {gap_hours:.1} h since last shift"));
        }
    }

    // Gate 4: weekly-hours cap. Landing exactly on the cap still passes.
    let projected_hours = state.hours_this_week + shift.duration_hours();
    if projected_hours > params.max_weekly_hours as f64 {
        path.push(format!(
            "weekly hours check: {projected_hours:.1} h would exceed the {} h limit",
            params.max_weekly_hours
        ));
        trace!("{}: rejected, weekly hours {:.1}", employee.id, projected_hours);
        return CandidateEvaluation::rejected(path);
    }
    path.push(format!(
        "weekly hours check: {projected_hours:.1} h within the {} h limit",
        params.max_weekly_hours
    ));

    // Gate 5: skill tags and proficiency level.
    if let Some(missing) = shift
        .required_skills
        .iter()
        .find(|s| !avail.has_skill(s))
    {
        path.push(format!("skill check: missing required skill '{missing}'"));
        trace!("{}: rejected, missing skill '{}'", employee.id, missing);
        return CandidateEvaluation::rejected(path);
    }
    if avail.skill_level < shift.min_skill_level {
        path.push(format!(
            "skill check: level {} below required {}",
            avail.skill_level, shift.min_skill_level
        ));
        trace!("{}: rejected, skill level too low", employee.id);
        return CandidateEvaluation::rejected(path);
    }
    path.push("skill check: meets requirements".to_string());

    // Soft factors.
    let fairness = factors.fairness(employee, history);
    let efficiency = efficiency_score(avail, shift);
    let coverage = factors.coverage(shift, history);

    let preference = params
        .prioritize_preferences
        .then(|| preference_score(avail, shift));
    if let Some(p) = preference {
        path.push(format!(
            "preference match: {}",
            if p > 0.7 { "high" } else { "low" }
        ));
    }

    let weekend_balance = (params.balance_weekend_shifts && shift.is_weekend())
        .then(|| factors.weekend_balance(employee, history));
    if let Some(w) = weekend_balance {
        path.push(format!(
            "weekend balance: {}",
            if w > 0.5 { "good" } else { "poor" }
        ));
    }

    // Weighted combination, then post-adjustments in a fixed order.
    let (wf, we, wc) = combination_weights(params);
    let mut score = wf * fairness + we * efficiency + wc * coverage;
    path.push(match params.method {
        OptimizationMethod::Fairness => {
            format!("optimization: fairness-first ({:.0}% match)", score * 100.0)
        }
        OptimizationMethod::Efficiency => {
            format!("optimization: efficiency-first ({:.0}% match)", score * 100.0)
        }
        OptimizationMethod::Coverage => {
            format!("optimization: coverage-first ({:.0}% match)", score * 100.0)
        }
        OptimizationMethod::Balanced => format!(
            "optimization: balanced {}/{} ({:.0}% match)",
            params.fairness_weight,
            params.efficiency_weight,
            score * 100.0
        ),
    });

    if let Some(p) = preference {
        score = score * 0.8 + p * 0.2;
    }
    if let Some(w) = weekend_balance {
        score = score * 0.8 + w * 0.2;
    }

    debug_assert!((0.0..=1.0).contains(&score), "score out of range: {score}");

    CandidateEvaluation {
        score,
        decision_path: path,
        factors: Some(FactorScores {
            fairness,
            efficiency,
            coverage,
            preference,
            weekend_balance,
        }),
    }
}

/// Efficiency: skill level (70%) blended with shift-time fit (30%).
fn efficiency_score(avail: &Availability, shift: &ShiftRequirement) -> f64 {
    let skill = avail.skill_level as f64 / 5.0;
    let time_fit = if avail.preferred_period.matches_start(shift.start) {
        1.0
    } else {
        0.5
    };
    skill * 0.7 + time_fit * 0.3
}

/// Preference: 0.5 base, +0.3 for a period match, +0.2 for an available
/// weekday, capped at 1.0.
fn preference_score(avail: &Availability, shift: &ShiftRequirement) -> f64 {
    let mut score: f64 = 0.5;
    if avail.preferred_period.matches_start(shift.start) {
        score += 0.3;
    }
    if avail.is_day_available(shift.weekday()) {
        score += 0.2;
    }
    score.min(1.0)
}

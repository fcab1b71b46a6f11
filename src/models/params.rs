//! Run configuration.
//!
//! [`ScheduleParams`] is the immutable configuration for one scheduling
//! pass: the date range to fill, hard-constraint limits, and the weighting
//! policy used to combine factor scores.
//!
//! Weights and limits are plain integers as entered by an operator;
//! normalization to [0,1] happens inside the evaluator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Weighting policy for combining factor scores into a final score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationMethod {
    /// Operator-weighted mix of fairness and efficiency (default).
    #[default]
    Balanced,
    /// Favor employees underrepresented in recent assignments.
    Fairness,
    /// Favor the best skill and shift-time fit.
    Efficiency,
    /// Favor filling the most critical slots.
    Coverage,
}

/// Immutable configuration for one scheduling run.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use shift_roster::models::{OptimizationMethod, ScheduleParams};
///
/// let params = ScheduleParams::new(
///     NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
/// )
/// .with_method(OptimizationMethod::Fairness)
/// .with_max_consecutive_days(4);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleParams {
    /// First date of the range to fill (inclusive).
    pub start_date: NaiveDate,
    /// Last date of the range to fill (inclusive).
    pub end_date: NaiveDate,
    /// Department scope of this run. `None` = all departments.
    /// Roster and requirement filtering is the caller's responsibility;
    /// the engine carries this as run metadata only.
    pub department: Option<String>,
    /// Blend employee shift preferences into the final score.
    pub prioritize_preferences: bool,
    /// Carried for interface compatibility; the skill gate always applies.
    pub consider_skill_level: bool,
    /// Blend weekend-spread balance into scores on Saturday/Sunday shifts.
    pub balance_weekend_shifts: bool,
    /// An employee already at this many consecutive worked days is rejected.
    pub max_consecutive_days: u32,
    /// Minimum rest gap between the end of one shift and the start of the next.
    pub min_hours_between_shifts: u32,
    /// Weekly hour cap; a shift that would push past it is rejected.
    pub max_weekly_hours: u32,
    /// Fairness weight for the balanced method (0-100).
    pub fairness_weight: u32,
    /// Efficiency weight for the balanced method (0-100).
    /// Must sum to 100 with `fairness_weight` under the balanced method.
    pub efficiency_weight: u32,
    /// Depth of the explanation tree (2-6). Consumed only by
    /// [`build_decision_tree`](crate::explain::build_decision_tree); has no
    /// effect on evaluation.
    pub tree_depth: u8,
    /// Weighting policy.
    pub method: OptimizationMethod,
}

impl ScheduleParams {
    /// Creates parameters for a date range with default limits:
    /// 5 consecutive days, 12 h rest, 40 h/week, 70/30 weights, tree depth 4,
    /// balanced method, preferences and weekend balancing enabled.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            department: None,
            prioritize_preferences: true,
            consider_skill_level: true,
            balance_weekend_shifts: true,
            max_consecutive_days: 5,
            min_hours_between_shifts: 12,
            max_weekly_hours: 40,
            fairness_weight: 70,
            efficiency_weight: 30,
            tree_depth: 4,
            method: OptimizationMethod::Balanced,
        }
    }

    /// Scopes the run to one department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Sets the weighting policy.
    pub fn with_method(mut self, method: OptimizationMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the balanced-method weights. Expected to sum to 100.
    pub fn with_weights(mut self, fairness: u32, efficiency: u32) -> Self {
        self.fairness_weight = fairness;
        self.efficiency_weight = efficiency;
        self
    }

    /// Sets the consecutive-day cap.
    pub fn with_max_consecutive_days(mut self, days: u32) -> Self {
        self.max_consecutive_days = days;
        self
    }

    /// Sets the minimum rest gap in hours.
    pub fn with_min_rest_hours(mut self, hours: u32) -> Self {
        self.min_hours_between_shifts = hours;
        self
    }

    /// Sets the weekly hour cap.
    pub fn with_max_weekly_hours(mut self, hours: u32) -> Self {
        self.max_weekly_hours = hours;
        self
    }

    /// Sets the explanation tree depth (2-6).
    pub fn with_tree_depth(mut self, depth: u8) -> Self {
        self.tree_depth = depth;
        self
    }

    /// Enables or disables preference blending.
    pub fn with_preference_priority(mut self, enabled: bool) -> Self {
        self.prioritize_preferences = enabled;
        self
    }

    /// Enables or disables weekend balancing.
    pub fn with_weekend_balancing(mut self, enabled: bool) -> Self {
        self.balance_weekend_shifts = enabled;
        self
    }
}

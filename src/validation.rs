//! Input validation for scheduling runs.
//!
//! Checks the integrity of the run configuration, roster, and requirement
//! list before the scheduler touches them. Detects:
//! - Reversed date ranges
//! - Balanced-method weights that do not sum to 100
//! - Skill levels outside 1-5
//! - Explanation tree depth outside 2-6
//! - Limits of zero that would reject every candidate
//! - Duplicate employee IDs
//! - Time windows or shifts that end before they start
//!
//! Invalid configuration is the caller's error; it is reported eagerly
//! here instead of surfacing later as meaningless scores.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{Employee, OptimizationMethod, ScheduleParams, ShiftRequirement};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The date range ends before it starts.
    EmptyDateRange,
    /// Balanced-method weights do not sum to 100.
    WeightsNotNormalized,
    /// A skill level lies outside 1-5.
    SkillLevelOutOfRange,
    /// Explanation tree depth lies outside 2-6.
    TreeDepthOutOfRange,
    /// A limit of zero would reject every candidate.
    ZeroLimit,
    /// Two employees share the same ID.
    DuplicateEmployeeId,
    /// A time window or shift ends at or before its start.
    EmptyTimeWindow,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the inputs of a scheduling run.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_inputs(
    params: &ScheduleParams,
    employees: &[Employee],
    requirements: &[ShiftRequirement],
) -> ValidationResult {
    let mut errors = Vec::new();

    if params.end_date < params.start_date {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyDateRange,
            format!(
                "scheduling range ends {} before it starts {}",
                params.end_date, params.start_date
            ),
        ));
    }

    if params.method == OptimizationMethod::Balanced
        && params.fairness_weight + params.efficiency_weight != 100
    {
        errors.push(ValidationError::new(
            ValidationErrorKind::WeightsNotNormalized,
            format!(
                "balanced weights must sum to 100, got {} + {}",
                params.fairness_weight, params.efficiency_weight
            ),
        ));
    }

    if !(2..=6).contains(&params.tree_depth) {
        errors.push(ValidationError::new(
            ValidationErrorKind::TreeDepthOutOfRange,
            format!("tree depth {} outside 2-6", params.tree_depth),
        ));
    }

    if params.max_consecutive_days == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroLimit,
            "max consecutive days of 0 rejects every candidate",
        ));
    }
    if params.max_weekly_hours == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroLimit,
            "max weekly hours of 0 rejects every candidate",
        ));
    }

    let mut employee_ids = HashSet::new();
    for employee in employees {
        if !employee_ids.insert(employee.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateEmployeeId,
                format!("duplicate employee ID: {}", employee.id),
            ));
        }

        if !(1..=5).contains(&employee.availability.skill_level) {
            errors.push(ValidationError::new(
                ValidationErrorKind::SkillLevelOutOfRange,
                format!(
                    "employee '{}' has skill level {}, expected 1-5",
                    employee.id, employee.availability.skill_level
                ),
            ));
        }

        for window in &employee.availability.day_windows {
            if window.end <= window.start {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyTimeWindow,
                    format!(
                        "employee '{}' window on {} ends {} at or before start {}",
                        employee.id, window.day, window.end, window.start
                    ),
                ));
            }
        }
    }

    for (index, requirement) in requirements.iter().enumerate() {
        if !(1..=5).contains(&requirement.min_skill_level) {
            errors.push(ValidationError::new(
                ValidationErrorKind::SkillLevelOutOfRange,
                format!(
                    "requirement #{index} has minimum skill level {}, expected 1-5",
                    requirement.min_skill_level
                ),
            ));
        }

        if requirement.end <= requirement.start {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyTimeWindow,
                format!(
                    "requirement #{index} on {} ends {} at or before start {}",
                    requirement.date, requirement.end, requirement.start
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Weekday};

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn params() -> ScheduleParams {
        ScheduleParams::new(d(3), d(9))
    }

    fn sample_employees() -> Vec<Employee> {
        vec![
            Employee::new("E1")
                .with_day(Weekday::Mon, t(8), t(20))
                .with_skill("customer service")
                .with_skill_level(3),
            Employee::new("E2")
                .with_day(Weekday::Tue, t(8), t(20))
                .with_skill("customer service")
                .with_skill_level(4),
        ]
    }

    fn sample_requirements() -> Vec<ShiftRequirement> {
        vec![ShiftRequirement::new(d(3), t(8), t(16))
            .with_required_skill("customer service")
            .with_min_skill_level(2)]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_inputs(&params(), &sample_employees(), &sample_requirements()).is_ok());
    }

    #[test]
    fn test_reversed_date_range() {
        let p = ScheduleParams::new(d(9), d(3));
        let errors = validate_inputs(&p, &sample_employees(), &sample_requirements()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyDateRange));
    }

    #[test]
    fn test_unbalanced_weights() {
        let p = params().with_weights(60, 30);
        let errors = validate_inputs(&p, &sample_employees(), &sample_requirements()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::WeightsNotNormalized));
    }

    #[test]
    fn test_weights_unchecked_for_named_methods() {
        // 60/30 is only an error under the balanced method.
        let p = params()
            .with_weights(60, 30)
            .with_method(OptimizationMethod::Coverage);
        assert!(validate_inputs(&p, &sample_employees(), &sample_requirements()).is_ok());
    }

    #[test]
    fn test_skill_level_bounds() {
        let mut employees = sample_employees();
        employees[0].availability.skill_level = 0;
        let errors = validate_inputs(&params(), &employees, &sample_requirements()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::SkillLevelOutOfRange));

        let requirements = vec![sample_requirements().remove(0).with_min_skill_level(6)];
        let errors =
            validate_inputs(&params(), &sample_employees(), &requirements).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::SkillLevelOutOfRange));
    }

    #[test]
    fn test_tree_depth_bounds() {
        for depth in [1, 7] {
            let p = params().with_tree_depth(depth);
            let errors =
                validate_inputs(&p, &sample_employees(), &sample_requirements()).unwrap_err();
            assert!(errors
                .iter()
                .any(|e| e.kind == ValidationErrorKind::TreeDepthOutOfRange));
        }
    }

    #[test]
    fn test_zero_limits() {
        let p = params().with_max_consecutive_days(0).with_max_weekly_hours(0);
        let errors = validate_inputs(&p, &sample_employees(), &sample_requirements()).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::ZeroLimit)
                .count(),
            2
        );
    }

    #[test]
    fn test_duplicate_employee_id() {
        let mut employees = sample_employees();
        employees.push(Employee::new("E1").with_skill_level(3));
        let errors = validate_inputs(&params(), &employees, &sample_requirements()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateEmployeeId));
    }

    #[test]
    fn test_empty_windows() {
        let mut employees = sample_employees();
        employees[0] = Employee::new("E3")
            .with_day(Weekday::Mon, t(20), t(8))
            .with_skill_level(3);
        let errors = validate_inputs(&params(), &employees, &sample_requirements()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyTimeWindow));

        let requirements = vec![ShiftRequirement::new(d(3), t(16), t(8))];
        let errors =
            validate_inputs(&params(), &sample_employees(), &requirements).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyTimeWindow));
    }

    #[test]
    fn test_multiple_errors_collected() {
        let p = ScheduleParams::new(d(9), d(3)).with_weights(10, 20);
        let mut employees = sample_employees();
        employees[1].availability.skill_level = 9;
        let errors = validate_inputs(&p, &employees, &sample_requirements()).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_error_display() {
        let errors = validate_inputs(&params().with_weights(60, 30), &[], &[]).unwrap_err();
        assert!(errors[0].to_string().contains("sum to 100"));
    }
}

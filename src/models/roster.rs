//! Roster (run output) model.
//!
//! A [`Roster`] is the ordered list of assignments produced by one
//! scheduling run. Each [`AssignmentResult`] carries the winning employee,
//! its score and decision path, and up to three ranked runners-up with a
//! reason each. Requirements no candidate could fill are simply absent.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ShiftRequirement;

/// A runner-up candidate for one requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    /// Employee that was not chosen.
    pub employee_id: String,
    /// The score it reached (0 when it was rejected outright).
    pub score: f64,
    /// Why it ranked below the winner.
    pub reason: String,
}

/// One filled requirement: the winner, the audit trail, and the runners-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentResult {
    /// The requirement that was filled.
    pub requirement: ShiftRequirement,
    /// Winning employee.
    pub employee_id: String,
    /// Final combined score in [0,1].
    pub score: f64,
    /// Ordered trace of every check and scoring step performed.
    pub decision_path: Vec<String>,
    /// Up to 3 ranked runners-up.
    pub alternatives: Vec<Alternative>,
}

/// Ordered output of one scheduling run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    /// Assignments in requirement order. Unfilled requirements are absent.
    pub assignments: Vec<AssignmentResult>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an assignment.
    pub fn add_assignment(&mut self, assignment: AssignmentResult) {
        self.assignments.push(assignment);
    }

    /// Number of filled requirements.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Assignments for one employee, in requirement order.
    pub fn assignments_for_employee(&self, employee_id: &str) -> Vec<&AssignmentResult> {
        self.assignments
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .collect()
    }

    /// Assignments on one calendar date.
    pub fn assignments_on(&self, date: NaiveDate) -> Vec<&AssignmentResult> {
        self.assignments
            .iter()
            .filter(|a| a.requirement.date == date)
            .collect()
    }

    /// Total hours assigned to one employee in this run.
    pub fn assigned_hours_for(&self, employee_id: &str) -> f64 {
        self.assignments_for_employee(employee_id)
            .iter()
            .map(|a| a.requirement.duration_hours())
            .sum()
    }

    /// Fraction of requirements that were filled.
    ///
    /// Returns `None` if `requirement_count` is zero.
    pub fn fill_rate(&self, requirement_count: usize) -> Option<f64> {
        if requirement_count == 0 {
            return None;
        }
        Some(self.assignments.len() as f64 / requirement_count as f64)
    }
}

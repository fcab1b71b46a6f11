//! Run-scoped rolling state store.

use std::collections::HashMap;

use crate::models::{Employee, RollingState, ShiftRequirement};

/// Single-owner store of per-employee rolling counters for one run.
///
/// Seeded from the employees' counters at run start. The scheduler is the
/// only writer; input employees are never written back. Counters are
/// monotonic within a run: every commit increments the consecutive-day
/// counter and adds the shift's hours, with no calendar-adjacency gate and
/// no week-boundary reset.
#[derive(Debug, Clone, Default)]
pub struct RosterState {
    states: HashMap<String, RollingState>,
}

impl RosterState {
    /// Seeds the store from the employees' run-start counters.
    pub fn from_employees(employees: &[Employee]) -> Self {
        Self {
            states: employees
                .iter()
                .map(|e| (e.id.clone(), e.state.clone()))
                .collect(),
        }
    }

    /// Current counters for one employee.
    pub fn get(&self, employee_id: &str) -> Option<&RollingState> {
        self.states.get(employee_id)
    }

    /// Applies a committed shift: one more consecutive day, the shift's
    /// hours added to the weekly total, and a new last-shift-end timestamp.
    pub fn commit(&mut self, employee_id: &str, shift: &ShiftRequirement) {
        let state = self.states.entry(employee_id.to_string()).or_default();
        state.consecutive_days += 1;
        state.hours_this_week += shift.duration_hours();
        state.last_shift_end = Some(shift.end_dt());
    }

    /// Number of employees tracked.
    pub fn employee_count(&self) -> usize {
        self.states.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test]
    fn test_seeding_copies_starting_counters() {
        let employees = vec![
            Employee::new("E1").with_state(RollingState::new(2, 16.0)),
            Employee::new("E2"),
        ];
        let state = RosterState::from_employees(&employees);

        assert_eq!(state.employee_count(), 2);
        assert_eq!(state.get("E1").unwrap().consecutive_days, 2);
        assert!((state.get("E1").unwrap().hours_this_week - 16.0).abs() < 1e-10);
        assert_eq!(state.get("E2").unwrap(), &RollingState::default());
        assert!(state.get("E3").is_none());
    }

    #[test]
    fn test_commit_advances_counters() {
        let employees = vec![Employee::new("E1").with_state(RollingState::new(2, 10.0))];
        let mut state = RosterState::from_employees(&employees);
        let shift = ShiftRequirement::new(d(3), t(8), t(16));

        state.commit("E1", &shift);

        let s = state.get("E1").unwrap();
        assert_eq!(s.consecutive_days, 3);
        assert!((s.hours_this_week - 18.0).abs() < 1e-10);
        assert_eq!(s.last_shift_end, Some(d(3).and_time(t(16))));
    }

    #[test]
    fn test_commits_are_monotonic() {
        let employees = vec![Employee::new("E1")];
        let mut state = RosterState::from_employees(&employees);

        let shifts = [
            ShiftRequirement::new(d(3), t(8), t(16)),
            ShiftRequirement::new(d(4), t(8), t(16)),
            ShiftRequirement::new(d(5), t(12), t(20)),
        ];
        for shift in &shifts {
            state.commit("E1", shift);
        }

        let s = state.get("E1").unwrap();
        assert_eq!(s.consecutive_days, 3);
        assert!((s.hours_this_week - 24.0).abs() < 1e-10);
        assert_eq!(s.last_shift_end, Some(d(5).and_time(t(20))));
    }

    #[test]
    fn test_commit_for_unseeded_employee_starts_from_zero() {
        let mut state = RosterState::default();
        state.commit("E9", &ShiftRequirement::new(d(3), t(8), t(12)));

        let s = state.get("E9").unwrap();
        assert_eq!(s.consecutive_days, 1);
        assert!((s.hours_this_week - 4.0).abs() < 1e-10);
    }
}

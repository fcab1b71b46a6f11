//! Shift requirement and shift history models.
//!
//! A [`ShiftRequirement`] is one staffing slot to fill. Its weekday is
//! always derived from the calendar date, so the two cannot disagree.
//! [`CommittedShift`] is the interface type for already-persisted shifts
//! supplied by the history provider.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// One staffing slot: a date, a time range, a department, and the skills
/// required to fill it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftRequirement {
    /// Calendar date of the shift.
    pub date: NaiveDate,
    /// Shift start time of day.
    pub start: NaiveTime,
    /// Shift end time of day. Must be after `start`.
    pub end: NaiveTime,
    /// Department the slot belongs to.
    pub department: String,
    /// Skill tags a candidate must all carry.
    pub required_skills: Vec<String>,
    /// Minimum proficiency level (1-5).
    pub min_skill_level: u8,
}

impl ShiftRequirement {
    /// Creates a requirement with no skill demands (minimum level 1).
    pub fn new(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            date,
            start,
            end,
            department: String::new(),
            required_skills: Vec::new(),
            min_skill_level: 1,
        }
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Adds a required skill tag.
    pub fn with_required_skill(mut self, skill: impl Into<String>) -> Self {
        self.required_skills.push(skill.into());
        self
    }

    /// Sets the minimum proficiency level.
    pub fn with_min_skill_level(mut self, level: u8) -> Self {
        self.min_skill_level = level;
        self
    }

    /// Weekday of the shift, derived from the date.
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Shift length in hours.
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_minutes() as f64 / 60.0
    }

    /// Shift start as a full timestamp.
    pub fn start_dt(&self) -> NaiveDateTime {
        self.date.and_time(self.start)
    }

    /// Shift end as a full timestamp.
    pub fn end_dt(&self) -> NaiveDateTime {
        self.date.and_time(self.end)
    }

    /// Whether the shift falls on a Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

/// An already-committed shift, as supplied by the history provider.
///
/// The engine accepts history for the whole run and passes it to the factor
/// model; the hard-constraint gate reads rolling counters instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommittedShift {
    /// Employee the shift belongs to.
    pub employee_id: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// Start time of day.
    pub start: NaiveTime,
    /// End time of day.
    pub end: NaiveTime,
    /// Department worked.
    pub department: String,
}

impl CommittedShift {
    /// Creates a committed shift record.
    pub fn new(
        employee_id: impl Into<String>,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            date,
            start,
            end,
            department: String::new(),
        }
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }
}

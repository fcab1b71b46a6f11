//! Employee model.
//!
//! An employee is the assignable unit of this engine: static availability
//! (days, time windows, time off, preferences, skills) plus the rolling
//! counters the scheduler advances as shifts are committed.
//!
//! # Ownership
//! `state` holds the counters *at run start*. The scheduler copies them into
//! its own run-scoped store and never writes back; employees are read-only
//! inputs for the duration of a run.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// An employee that can be assigned to shifts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Static availability, preferences, and skills.
    pub availability: Availability,
    /// Rolling counters at run start.
    pub state: RollingState,
}

/// Static availability and skill data for one employee.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Availability {
    /// Weekdays the employee can work at all.
    pub available_days: Vec<Weekday>,
    /// Per-weekday working windows. A shift fits only if some window for
    /// its weekday fully contains it.
    pub day_windows: Vec<DayWindow>,
    /// Dates the employee has requested off.
    pub time_off: Vec<NaiveDate>,
    /// Preferred part of day.
    pub preferred_period: ShiftPeriod,
    /// Personal weekly-hour ceiling, as stored in the roster. The run-wide
    /// cap in [`ScheduleParams`](super::ScheduleParams) is what the
    /// evaluator enforces.
    pub max_weekly_hours: u32,
    /// Skill tags.
    pub skills: Vec<String>,
    /// Proficiency level (1-5).
    pub skill_level: u8,
}

/// A working window on one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    /// Weekday this window applies to.
    pub day: Weekday,
    /// Earliest time the employee can start.
    pub start: NaiveTime,
    /// Latest time the employee can finish.
    pub end: NaiveTime,
}

/// Preferred part of day for shift starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftPeriod {
    /// Shift starts before 12:00.
    Morning,
    /// Shift starts between 12:00 and 16:59.
    Afternoon,
    /// Shift starts at 17:00 or later.
    Evening,
    /// No preference; every start time matches.
    #[default]
    Any,
}

/// Per-employee counters advanced as shifts are committed within one run.
///
/// Counters are run-scoped: consecutive days increment on every commit
/// regardless of calendar adjacency, and weekly hours never reset at a week
/// boundary inside a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollingState {
    /// Consecutive days worked before the next candidate shift.
    pub consecutive_days: u32,
    /// Hours already accumulated this week.
    pub hours_this_week: f64,
    /// End of the most recently assigned shift. `None` = no prior shift.
    pub last_shift_end: Option<NaiveDateTime>,
}

impl Employee {
    /// Creates an employee with empty availability and zeroed counters.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            availability: Availability::default(),
            state: RollingState::default(),
        }
    }

    /// Sets the employee name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Marks a weekday as available with a working window.
    pub fn with_day(mut self, day: Weekday, start: NaiveTime, end: NaiveTime) -> Self {
        self.availability.available_days.push(day);
        self.availability.day_windows.push(DayWindow { day, start, end });
        self
    }

    /// Adds a requested day off.
    pub fn with_time_off(mut self, date: NaiveDate) -> Self {
        self.availability.time_off.push(date);
        self
    }

    /// Sets the preferred part of day.
    pub fn with_preferred_period(mut self, period: ShiftPeriod) -> Self {
        self.availability.preferred_period = period;
        self
    }

    /// Sets the personal weekly-hour ceiling.
    pub fn with_max_weekly_hours(mut self, hours: u32) -> Self {
        self.availability.max_weekly_hours = hours;
        self
    }

    /// Adds a skill tag.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.availability.skills.push(skill.into());
        self
    }

    /// Sets the proficiency level (1-5).
    pub fn with_skill_level(mut self, level: u8) -> Self {
        self.availability.skill_level = level;
        self
    }

    /// Sets the rolling counters at run start.
    pub fn with_state(mut self, state: RollingState) -> Self {
        self.state = state;
        self
    }
}

impl Availability {
    /// Whether a weekday is in the available set.
    pub fn is_day_available(&self, day: Weekday) -> bool {
        self.available_days.contains(&day)
    }

    /// Whether a date was requested off.
    pub fn is_time_off(&self, date: NaiveDate) -> bool {
        self.time_off.contains(&date)
    }

    /// Finds a window for the weekday that fully contains [start, end].
    pub fn window_covering(&self, day: Weekday, start: NaiveTime, end: NaiveTime) -> Option<&DayWindow> {
        self.day_windows
            .iter()
            .find(|w| w.day == day && w.start <= start && w.end >= end)
    }

    /// Whether the employee carries a given skill tag.
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }
}

impl ShiftPeriod {
    /// Whether a shift starting at `start` falls in this period.
    pub fn matches_start(self, start: NaiveTime) -> bool {
        let hour = start.hour();
        match self {
            Self::Morning => hour < 12,
            Self::Afternoon => (12..17).contains(&hour),
            Self::Evening => hour >= 17,
            Self::Any => true,
        }
    }
}

impl RollingState {
    /// Creates counters with the given starting values.
    pub fn new(consecutive_days: u32, hours_this_week: f64) -> Self {
        Self {
            consecutive_days,
            hours_this_week,
            last_shift_end: None,
        }
    }

    /// Sets the end of the most recent shift.
    pub fn with_last_shift_end(mut self, end: NaiveDateTime) -> Self {
        self.last_shift_end = Some(end);
        self
    }
}

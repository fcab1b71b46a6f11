//! Rostering domain models.
//!
//! Core data types for shift-assignment problems and their solutions.
//! These types carry no scoring behavior; the evaluator and scheduler
//! operate on them.
//!
//! | Type | Role |
//! |------|------|
//! | [`Employee`] | Assignable unit: availability, skills, rolling counters |
//! | [`ShiftRequirement`] | One staffing slot to fill |
//! | [`CommittedShift`] | History interface type |
//! | [`ScheduleParams`] | Immutable run configuration |
//! | [`Roster`] | Ordered run output |

mod employee;
mod params;
mod roster;
mod shift;

pub use employee::{Availability, DayWindow, Employee, RollingState, ShiftPeriod};
pub use params::{OptimizationMethod, ScheduleParams};
pub use roster::{Alternative, AssignmentResult, Roster};
pub use shift::{CommittedShift, ShiftRequirement};

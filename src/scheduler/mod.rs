//! Greedy scheduler and run-scoped state.
//!
//! [`GreedyScheduler`] walks the requirement list in input order, commits
//! the best-scoring candidate per requirement, and feeds each commit back
//! into later evaluations through [`RosterState`]. Processing is strictly
//! sequential: every assignment mutates counters read by every subsequent
//! evaluation, so requirements cannot be evaluated in parallel.
//!
//! # Reference
//! Ernst et al. (2004), "Staff scheduling and rostering: A review of
//! applications, methods and models"

mod greedy;
mod state;

pub use greedy::{GreedyScheduler, ScheduleError};
pub use state::RosterState;

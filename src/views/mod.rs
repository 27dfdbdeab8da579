//! Projections of booked date ranges onto day-by-day tables.
//!
//! - [`long_form`] lists one row per working day per scheme.
//! - [`TeamPivot`] folds the long form into one row per day, one column per team.
//! - [`CalendarMatrix`] lays schemes out against every calendar date in the
//!   schedule horizon.

pub mod long_form;
pub mod matrix;

pub use long_form::{DayAssignment, PivotRow, TeamPivot, long_form};
pub use matrix::{CalendarMatrix, MatrixRow, SHUTDOWN_MARKER};

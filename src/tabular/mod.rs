//! Reading and writing the tool's tables.
//!
//! Work items arrive as CSV (or JSON) and are validated once on entry;
//! every output view can leave as CSV, JSON or a polars `DataFrame`.

pub mod export;
pub mod frames;
pub mod input;

pub use export::{
    save_json, save_matrix_to_csv, save_pivot_to_csv, save_planned_tasks_to_csv,
    save_schedule_to_csv,
};
pub use input::{load_work_items_from_csv, load_work_items_from_json, read_work_items};

/// Formats dates the way every output table carries them.
pub(crate) fn iso(date: chrono::NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

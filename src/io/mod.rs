pub mod csv_grid;
pub mod excel_read;
pub mod schedule_json;

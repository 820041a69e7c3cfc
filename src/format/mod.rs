pub mod csv;
pub mod table;

pub use self::csv::{format_csv, CSV_HEADER};
pub use table::{format_table, wrap_text, ColumnWidths, TableLayout, NO_COMMITS};

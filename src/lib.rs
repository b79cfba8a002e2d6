// Flight booking planner: collects trip details and flight options, then renders
// a markdown summary, a copyable text block and a styled spreadsheet

pub mod collector;
pub mod config;
pub mod copy_text;
pub mod exporter;
pub mod options_table;
pub mod spreadsheet;
pub mod summary;
pub mod trip;
pub mod xlsx_sheet;

// Re-export key types for convenience
pub use collector::{PlanRequest, RecordCollector, RequestError};
pub use config::{ConfigError, ExportConfig};
pub use copy_text::build_copy_text;
pub use exporter::{validate_trip, ExportBundle, ExportError, FlightPlanExporter};
pub use options_table::{build_options_table, OptionsTable, OPTION_COLUMNS};
pub use spreadsheet::{export_spreadsheet, ExportedFile, SpreadsheetLayout};
pub use summary::{build_summary_text, search_links_markdown, SEARCH_LINKS};
pub use trip::{FlightOption, TravelClass, TripDetails};

// Export pipeline: validate the submission, then render every output artifact from it
use crate::config::ExportConfig;
use crate::copy_text::build_copy_text;
use crate::options_table::{build_options_table, OptionsTable};
use crate::spreadsheet::{export_spreadsheet, ExportedFile};
use crate::summary::{build_summary_text, search_links_markdown};
use crate::trip::{FlightOption, TripDetails};
use thiserror::Error;
use tracing::{info, instrument, warn};

pub const MISSING_CITY_MESSAGE: &str = "Please enter both departure and arrival cities.";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Conversion error: {0}")]
    ConversionError(String),

    #[error("Archive error: {0}")]
    ArchiveError(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ExportError {
    /// Text shown inline to the user when an export is refused.
    pub fn user_message(&self) -> String {
        match self {
            ExportError::MissingRequiredField(_) => MISSING_CITY_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

/// Both cities must be non-empty before anything is rendered. Whitespace
/// alone counts as empty.
pub fn validate_trip(trip: &TripDetails) -> Result<(), ExportError> {
    if trip.from_city.trim().is_empty() {
        return Err(ExportError::MissingRequiredField("from_city".to_string()));
    }
    if trip.to_city.trim().is_empty() {
        return Err(ExportError::MissingRequiredField("to_city".to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ExportBundle {
    pub summary_text: String,
    pub options_table: OptionsTable,
    pub copy_text: String,
    pub links_markdown: Option<String>,
    pub spreadsheet: ExportedFile,
}

pub struct FlightPlanExporter {
    config: ExportConfig,
}

impl FlightPlanExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    #[instrument(skip_all, fields(from = %trip.from_city, to = %trip.to_city, options = options.len()))]
    pub fn export(
        &self,
        trip: &TripDetails,
        options: &[FlightOption],
    ) -> Result<ExportBundle, ExportError> {
        if let Err(e) = validate_trip(trip) {
            warn!(error = %e, "export refused");
            return Err(e);
        }

        let spreadsheet = export_spreadsheet(trip, options, self.config.layout)?;
        let bundle = ExportBundle {
            summary_text: build_summary_text(trip),
            options_table: build_options_table(options),
            copy_text: build_copy_text(trip, options),
            links_markdown: self.config.include_links.then(search_links_markdown),
            spreadsheet,
        };

        info!(
            file_name = %bundle.spreadsheet.file_name,
            layout = ?self.config.layout,
            "flight plan exported"
        );
        Ok(bundle)
    }
}

impl Default for FlightPlanExporter {
    fn default() -> Self {
        Self::new(ExportConfig::default())
    }
}

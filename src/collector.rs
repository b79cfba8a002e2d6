// Record collection: holds the trip fields and the N flight options of one submission

use crate::trip::{FlightOption, TripDetails, MAX_TRAVELLERS, MIN_TRAVELLERS};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const MIN_OPTIONS: usize = 1;
pub const MAX_OPTIONS: usize = 20;

pub const SAMPLE_REQUEST_PATH: &str = "samples/plan_request.json";

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("JSON parse error: {0}")]
    JsonParseError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// JSON shape of one form submission
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlanRequest {
    #[serde(default)]
    pub trip: TripDetails,
    #[serde(default)]
    pub options: Vec<FlightOption>,
}

impl PlanRequest {
    pub fn from_json_str(json: &str) -> Result<Self, RequestError> {
        serde_json::from_str(json).map_err(|e| RequestError::JsonParseError(e.to_string()))
    }

    pub fn load_sample() -> Result<Self, RequestError> {
        let content = std::fs::read_to_string(SAMPLE_REQUEST_PATH)?;
        Self::from_json_str(&content)
    }
}

#[derive(Debug, Clone)]
pub struct RecordCollector {
    trip: TripDetails,
    options: Vec<FlightOption>,
}

impl RecordCollector {
    pub fn new() -> Self {
        Self::with_trip(TripDetails::default())
    }

    pub fn with_trip(trip: TripDetails) -> Self {
        let mut collector = Self {
            trip,
            options: Vec::new(),
        };
        collector.set_travellers(collector.trip.travellers);
        collector.set_option_count(MIN_OPTIONS);
        collector
    }

    /// Builds a collector from a submitted request, applying the same
    /// bounds the form widgets enforce.
    pub fn from_request(request: PlanRequest) -> Self {
        let mut collector = Self {
            trip: request.trip,
            options: request.options,
        };
        collector.set_travellers(collector.trip.travellers);
        let count = collector.options.len();
        collector.set_option_count(count);
        collector
    }

    pub fn trip(&self) -> &TripDetails {
        &self.trip
    }

    pub fn trip_mut(&mut self) -> &mut TripDetails {
        &mut self.trip
    }

    pub fn set_travellers(&mut self, travellers: u8) -> u8 {
        self.trip.travellers = travellers.clamp(MIN_TRAVELLERS, MAX_TRAVELLERS);
        self.trip.travellers
    }

    /// Resizes the option list, keeping existing entries. Returns the
    /// count actually applied.
    pub fn set_option_count(&mut self, count: usize) -> usize {
        let count = count.clamp(MIN_OPTIONS, MAX_OPTIONS);
        if count != self.options.len() {
            debug!(from = self.options.len(), to = count, "resizing flight options");
        }

        self.options.truncate(count);
        while self.options.len() < count {
            self.options.push(FlightOption::new(self.options.len()));
        }
        for (position, option) in self.options.iter_mut().enumerate() {
            option.index = position;
        }

        count
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    pub fn option_mut(&mut self, position: usize) -> Option<&mut FlightOption> {
        self.options.get_mut(position)
    }

    pub fn options(&self) -> &[FlightOption] {
        &self.options
    }

    pub fn into_parts(self) -> (TripDetails, Vec<FlightOption>) {
        (self.trip, self.options)
    }
}

impl Default for RecordCollector {
    fn default() -> Self {
        Self::new()
    }
}

// Trip-level fields and per-option itinerary records entered by the admin team

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DATE_FORMAT: &str = "%d-%b-%Y";
pub const ONE_WAY: &str = "One-way";

pub const MIN_TRAVELLERS: u8 = 1;
pub const MAX_TRAVELLERS: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TravelClass {
    #[default]
    Economy,
    #[serde(rename = "Premium Economy", alias = "PremiumEconomy")]
    PremiumEconomy,
    Business,
    #[serde(rename = "First Class", alias = "First")]
    First,
}

impl TravelClass {
    pub const ALL: [TravelClass; 4] = [
        TravelClass::Economy,
        TravelClass::PremiumEconomy,
        TravelClass::Business,
        TravelClass::First,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TravelClass::Economy => "Economy",
            TravelClass::PremiumEconomy => "Premium Economy",
            TravelClass::Business => "Business",
            TravelClass::First => "First Class",
        }
    }
}

impl fmt::Display for TravelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn default_travellers() -> u8 {
    MIN_TRAVELLERS
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// Created fresh for every submission, never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDetails {
    #[serde(default)]
    pub from_city: String,
    #[serde(default)]
    pub to_city: String,
    #[serde(default = "today")]
    pub departure_date: NaiveDate,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    #[serde(default = "default_travellers")]
    pub travellers: u8,
    #[serde(default)]
    pub travel_class: TravelClass,
}

impl TripDetails {
    pub fn new(from_city: &str, to_city: &str, departure_date: NaiveDate) -> Self {
        Self {
            from_city: from_city.to_string(),
            to_city: to_city.to_string(),
            departure_date,
            ..Self::default()
        }
    }

    pub fn with_return(mut self, return_date: NaiveDate) -> Self {
        self.return_date = Some(return_date);
        self
    }

    pub fn departure_label(&self) -> String {
        format_date(self.departure_date)
    }

    /// Formatted return date, or the literal `One-way` when none was picked.
    pub fn return_label(&self) -> String {
        self.return_date
            .map(format_date)
            .unwrap_or_else(|| ONE_WAY.to_string())
    }
}

impl Default for TripDetails {
    fn default() -> Self {
        Self {
            from_city: String::new(),
            to_city: String::new(),
            departure_date: today(),
            return_date: None,
            travellers: MIN_TRAVELLERS,
            travel_class: TravelClass::default(),
        }
    }
}

// One outbound + return candidate. Times and cost stay free text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightOption {
    pub index: usize,
    pub outbound_airline: String,
    pub outbound_departure: String,
    pub outbound_arrival: String,
    pub return_airline: String,
    pub return_departure: String,
    pub return_arrival: String,
    pub round_trip_cost: String,
}

impl FlightOption {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    pub fn label(&self) -> String {
        option_label(self.index)
    }
}

pub fn option_label(position: usize) -> String {
    format!("Option {}", position + 1)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// Tabular view of the flight options, shared by the on-screen table and the spreadsheet

use crate::trip::{option_label, FlightOption};

pub const OPTION_COLUMNS: [&str; 8] = [
    "Option",
    "Outbound Airline",
    "Return Airline",
    "Outbound Departure Time",
    "Outbound Arrival Time",
    "Return Departure Time",
    "Return Arrival Time",
    "Round Trip Cost",
];

pub type OptionRow = [String; 8];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsTable {
    rows: Vec<OptionRow>,
}

impl OptionsTable {
    pub fn headers(&self) -> &'static [&'static str; 8] {
        &OPTION_COLUMNS
    }

    pub fn rows(&self) -> &[OptionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of each column in character units: the longest text in the
    /// column, header included, plus two.
    pub fn column_widths(&self) -> [usize; 8] {
        let mut widths = OPTION_COLUMNS.map(|header| header.chars().count());
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths.map(|width| width + 2)
    }
}

pub fn build_options_table(options: &[FlightOption]) -> OptionsTable {
    let rows = options
        .iter()
        .enumerate()
        .map(|(position, option)| {
            [
                option_label(position),
                option.outbound_airline.clone(),
                option.return_airline.clone(),
                option.outbound_departure.clone(),
                option.outbound_arrival.clone(),
                option.return_departure.clone(),
                option.return_arrival.clone(),
                option.round_trip_cost.clone(),
            ]
        })
        .collect();

    OptionsTable { rows }
}

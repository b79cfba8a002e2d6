// Plain-text rendering of the flight options for copy-paste into mail or chat

use crate::trip::{option_label, FlightOption, TripDetails};

pub const SEPARATOR_WIDTH: usize = 80;
pub const CURRENCY_SYMBOL: char = '₹';

pub fn separator_line() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

pub fn build_copy_text(trip: &TripDetails, options: &[FlightOption]) -> String {
    let mut text = String::with_capacity(256 + options.len() * 192);

    text.push_str(&format!(
        "Flight Options: {} to {} ({} - {})\n",
        trip.from_city,
        trip.to_city,
        trip.departure_label(),
        trip.return_label()
    ));
    text.push_str(&format!(
        "Travellers: {} | Class: {}\n",
        trip.travellers, trip.travel_class
    ));
    text.push_str(&separator_line());
    text.push('\n');

    let blocks: Vec<String> = options
        .iter()
        .enumerate()
        .map(|(position, option)| option_block(position, option))
        .collect();
    text.push_str(&blocks.join("\n"));

    text
}

fn option_block(position: usize, option: &FlightOption) -> String {
    format!(
        "{}\n\
         Outbound: {} | Departure: {} | Arrival: {}\n\
         Return: {} | Departure: {} | Arrival: {}\n\
         Round Trip Cost: {}{}\n",
        option_label(position),
        option.outbound_airline,
        option.outbound_departure,
        option.outbound_arrival,
        option.return_airline,
        option.return_departure,
        option.return_arrival,
        CURRENCY_SYMBOL,
        option.round_trip_cost,
    )
}

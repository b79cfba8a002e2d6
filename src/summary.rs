// Markdown summary of the trip fields and the static flight search links

use crate::trip::TripDetails;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLink {
    pub name: &'static str,
    pub url: &'static str,
}

// Surfaced to the user only; nothing here is ever requested
pub const SEARCH_LINKS: [SearchLink; 6] = [
    SearchLink {
        name: "MakeMyTrip",
        url: "https://www.makemytrip.com/flights/",
    },
    SearchLink {
        name: "EaseMyTrip",
        url: "https://www.easemytrip.com/flight.html",
    },
    SearchLink {
        name: "Skyscanner",
        url: "https://www.skyscanner.co.in/",
    },
    SearchLink {
        name: "Goibibo",
        url: "https://www.goibibo.com/flights/",
    },
    SearchLink {
        name: "Cleartrip",
        url: "https://www.cleartrip.com/flights",
    },
    SearchLink {
        name: "Yatra",
        url: "https://www.yatra.com/flights",
    },
];

pub fn build_summary_text(trip: &TripDetails) -> String {
    format!(
        "**Flight Booking Details**\n\
         - From: {}\n\
         - To: {}\n\
         - Departure: {}\n\
         - Return: {}\n\
         - Travellers: {}\n\
         - Class: {}\n",
        trip.from_city,
        trip.to_city,
        trip.departure_label(),
        trip.return_label(),
        trip.travellers,
        trip.travel_class,
    )
}

pub fn search_links_markdown() -> String {
    SEARCH_LINKS
        .iter()
        .map(|link| format!("- [{}]({})\n", link.name, link.url))
        .collect()
}

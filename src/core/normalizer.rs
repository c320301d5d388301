//! Delivery date and time normalization
//!
//! Turns a package entry from the tracking payload into the two derived output
//! fields. Every function here is pure.
//!
//! The rules are deliberately permissive: strings are sliced by character
//! position without calendar or clock validation, and an absent field yields an
//! empty string rather than an error.
//!
//! ```text
//! deliveryDate[type == "DEL"].date   "20240115"  ->  "01/15"
//! deliveryTime.endTime               "1430"      ->  "2:30 pm"
//! ```

use crate::api::payload::PackageEntry;

/// Delivery-date type marking the actual or estimated delivery
pub const DELIVERY_DATE_TYPE: &str = "DEL";

/// Derive `(arrival_date, arrival_time)` from a package entry
pub fn normalize(package: &PackageEntry) -> (String, String) {
    let arrival_date = package
        .delivery_date_of_type(DELIVERY_DATE_TYPE)
        .map(format_delivery_date)
        .unwrap_or_default();

    let arrival_time = package
        .delivery_end_time()
        .map(format_delivery_time)
        .unwrap_or_default();

    (arrival_date, arrival_time)
}

/// Reformat a `YYYYMMDD` date as `MM/DD`
///
/// Shorter inputs produce whatever characters are available at those positions.
pub fn format_delivery_date(date: &str) -> String {
    let month = slice_chars(date, 4, 6);
    let day = slice_chars(date, 6, 8);
    format!("{}/{}", month, day)
}

/// Reformat a 24-hour `HHMM...` time as `H:MM am|pm`
///
/// Returns an empty string when the input is shorter than four characters or
/// the hour has no leading digits.
pub fn format_delivery_time(time: &str) -> String {
    if time.chars().count() < 4 {
        return String::new();
    }

    let Some(hour) = parse_leading_digits(&slice_chars(time, 0, 2)) else {
        return String::new();
    };
    let minutes = slice_chars(time, 2, 4);

    let meridiem = if hour >= 12 { "pm" } else { "am" };
    let hour = match hour % 12 {
        0 => 12,
        h => h,
    };

    format!("{}:{} {}", hour, minutes, meridiem)
}

fn slice_chars(value: &str, start: usize, end: usize) -> String {
    value.chars().skip(start).take(end.saturating_sub(start)).collect()
}

fn parse_leading_digits(value: &str) -> Option<u32> {
    let digits: String = value.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

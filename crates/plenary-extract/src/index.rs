//! The session's plenary meeting listing.
//!
//! Each listing row is `number | time of day | date`. Header and layout
//! rows without a numeric first cell are skipped.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use plenary_core::text::normalize;
use plenary_core::{MeetingInfo, TimeOfDay};
use regex::Regex;
use scraper::Html;
use tracing::{debug, info};

use crate::ExtractError;
use crate::transcript::{TD, TR};

static NUMERIC_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{1,2})[/-]([0-9]{1,2})[/-]([0-9]{4})").expect("valid regex"));
static LONG_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{1,2})\s+([a-z]+)\s+([0-9]{4})").expect("valid regex"));

/// Month number of a Dutch or French month name, diacritics folded.
fn month_number(name: &str) -> Option<u32> {
    let month = match name {
        "januari" | "janvier" => 1,
        "februari" | "fevrier" => 2,
        "maart" | "mars" => 3,
        "april" | "avril" => 4,
        "mei" | "mai" => 5,
        "juni" | "juin" => 6,
        "juli" | "juillet" => 7,
        "augustus" | "aout" => 8,
        "september" | "septembre" => 9,
        "oktober" | "octobre" => 10,
        "november" | "novembre" => 11,
        "december" | "decembre" => 12,
        _ => return None,
    };
    Some(month)
}

/// Parse a listing date: `17/10/2019`, `donderdag 17 oktober 2019` or
/// `jeudi 17 octobre 2019`.
pub fn parse_listing_date(text: &str) -> Result<NaiveDate, ExtractError> {
    let folded = normalize(text).to_lowercase();
    let (day, month, year): (Option<u32>, Option<u32>, Option<i32>) = if let Some(caps) = NUMERIC_DATE.captures(&folded) {
        (caps[1].parse().ok(), caps[2].parse().ok(), caps[3].parse().ok())
    } else if let Some(caps) = LONG_DATE.captures(&folded) {
        (caps[1].parse().ok(), month_number(&caps[2]), caps[3].parse().ok())
    } else {
        (None, None, None)
    };
    match (day, month, year) {
        (Some(d), Some(m), Some(y)) => NaiveDate::from_ymd_opt(y, m, d),
        _ => None,
    }
    .ok_or_else(|| ExtractError::Date(text.to_string()))
}

/// Meetings listed on a session's plenary overview page.
pub fn parse_meeting_listing(session: u32, source: &str) -> Vec<MeetingInfo> {
    let html = Html::parse_document(source);
    let mut meetings = Vec::new();
    for row in html.select(&TR) {
        let cells: Vec<String> = row
            .select(&TD)
            .map(|td| td.text().collect::<String>().trim().to_string())
            .collect();
        if cells.len() < 3 {
            continue;
        }
        let Ok(id) = cells[0].parse::<u32>() else {
            continue;
        };
        match parse_listing_date(&cells[2]) {
            Ok(date) => meetings.push(MeetingInfo {
                session,
                id,
                time_of_day: TimeOfDay::from_listing(&cells[1]),
                date,
            }),
            Err(e) => debug!(meeting = id, error = %e, "skipping listing row"),
        }
    }
    info!(session, meetings = meetings.len(), "parsed meeting listing");
    meetings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_dates() {
        assert_eq!(
            parse_listing_date("17/10/2019").unwrap(),
            NaiveDate::from_ymd_opt(2019, 10, 17).unwrap()
        );
        assert_eq!(
            parse_listing_date(" 3-2-2011 ").unwrap(),
            NaiveDate::from_ymd_opt(2011, 2, 3).unwrap()
        );
    }

    #[test]
    fn long_dates_in_both_languages() {
        assert_eq!(
            parse_listing_date("donderdag 17 oktober 2019").unwrap(),
            NaiveDate::from_ymd_opt(2019, 10, 17).unwrap()
        );
        assert_eq!(
            parse_listing_date("Jeudi 1 août 2019").unwrap(),
            NaiveDate::from_ymd_opt(2019, 8, 1).unwrap()
        );
        assert_eq!(
            parse_listing_date("5 février 2020").unwrap(),
            NaiveDate::from_ymd_opt(2020, 2, 5).unwrap()
        );
    }

    #[test]
    fn bad_dates_are_errors() {
        assert!(matches!(parse_listing_date("morgen"), Err(ExtractError::Date(_))));
        assert!(parse_listing_date("31/02/2020").is_err());
        assert!(parse_listing_date("3 brumaire 2020").is_err());
    }

    #[test]
    fn listing_rows() {
        let page = r#"<html><body><table>
<tr><td>Nr</td><td>Tijd</td><td>Datum</td></tr>
<tr><td>001</td><td>PM</td><td>20/06/2019</td></tr>
<tr><td>002</td><td>Avond</td><td>donderdag 27 juni 2019</td></tr>
<tr><td>003</td><td>AM</td><td>onbekend</td></tr>
<tr><td colspan="3">Zitting 55</td></tr>
</table></body></html>"#;
        let meetings = parse_meeting_listing(55, page);
        assert_eq!(meetings.len(), 2);
        assert_eq!(meetings[0].id, 1);
        assert_eq!(meetings[0].time_of_day, TimeOfDay::Pm);
        assert_eq!(meetings[1].time_of_day, TimeOfDay::Evening);
        assert_eq!(meetings[1].date, NaiveDate::from_ymd_opt(2019, 6, 27).unwrap());
        assert_eq!(
            meetings[1].notes_url("https://www.dekamer.be"),
            "https://www.dekamer.be/doc/PCRI/html/55/ip002x.html"
        );
    }
}

//! Plenary meetings and the sessions they belong to.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::topic::MeetingTopic;

/// Base of every dekamer.be URL the scraper touches.
pub const DEFAULT_BASE_URL: &str = "https://www.dekamer.be";

/// Part of the day a meeting was held in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeOfDay {
    Am,
    Pm,
    Evening,
}

impl TimeOfDay {
    /// Parse the time-of-day column of the meeting listing.
    ///
    /// The listing prints `AM`, `PM` or `Avond`; anything unrecognised is
    /// treated as a morning meeting.
    pub fn from_listing(text: &str) -> Self {
        if text.contains("PM") {
            Self::Pm
        } else if text.contains("Avond") {
            Self::Evening
        } else {
            Self::Am
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
            Self::Evening => "EVENING",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parliamentary session (legislature) supported by the scraper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub number: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Session {
    /// Sessions 52 to 55, the ones with HTML transcripts.
    pub fn known(number: u32) -> Option<Self> {
        let (start, end) = match number {
            55 => ((2019, 6, 20), (2024, 6, 19)),
            54 => ((2014, 6, 19), (2019, 4, 25)),
            53 => ((2010, 6, 13), (2014, 4, 24)),
            52 => ((2007, 6, 10), (2010, 5, 6)),
            _ => return None,
        };
        let date = |(y, m, d): (i32, u32, u32)| NaiveDate::from_ymd_opt(y, m, d);
        Some(Self {
            number,
            start: date(start)?,
            end: date(end)?,
        })
    }

    /// Listing of all plenary meetings of the session.
    pub fn meetings_url(&self, base_url: &str) -> String {
        format!(
            "{base_url}/kvvcr/showpage.cfm?section=/cricra&language=nl&cfm=dcricra.cfm?type=plen&cricra=cri&count=all&legislat={:02}",
            self.number
        )
    }

    /// Session-relative base URI, e.g. `/sessions/55/`.
    pub fn base_uri(&self, root: &str) -> String {
        format!("{root}sessions/{}/", self.number)
    }
}

/// A row of the session's meeting listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeetingInfo {
    pub session: u32,
    pub id: u32,
    pub time_of_day: TimeOfDay,
    pub date: NaiveDate,
}

impl MeetingInfo {
    /// Transcript of the meeting (`ip012x.html` for meeting 12).
    pub fn notes_url(&self, base_url: &str) -> String {
        format!("{base_url}/doc/PCRI/html/{}/ip{:03}x.html", self.session, self.id)
    }
}

/// A plenary meeting with its agenda items keyed by item number.
#[derive(Debug, Clone, PartialEq)]
pub struct Meeting {
    pub session: u32,
    pub id: u32,
    pub time_of_day: TimeOfDay,
    pub date: NaiveDate,
    pub topics: BTreeMap<u32, MeetingTopic>,
}

impl Meeting {
    pub fn new(info: MeetingInfo) -> Self {
        Self {
            session: info.session,
            id: info.id,
            time_of_day: info.time_of_day,
            date: info.date,
            topics: BTreeMap::new(),
        }
    }

    pub fn info(&self) -> MeetingInfo {
        MeetingInfo {
            session: self.session,
            id: self.id,
            time_of_day: self.time_of_day,
            date: self.date,
        }
    }

    pub fn uri(&self) -> String {
        format!("meetings/{}.json", self.id)
    }

    /// Topic for `item`, created on first reference.
    pub fn topic_mut(&mut self, item: u32) -> &mut MeetingTopic {
        let meeting = self.id;
        self.topics
            .entry(item)
            .or_insert_with(|| MeetingTopic::new(meeting, item))
    }

    pub fn vote_count(&self) -> usize {
        self.topics.values().map(|t| t.votes.len()).sum()
    }

    /// `{id, time_of_day, date, topics: {TOPIC_TYPE: {item: topic}}}`.
    pub fn to_json(&self, base_uri: &str) -> Value {
        let mut by_type: BTreeMap<&str, Map<String, Value>> = BTreeMap::new();
        for topic in self.topics.values() {
            by_type
                .entry(topic.topic_type.as_str())
                .or_default()
                .insert(topic.item.to_string(), topic.to_json(base_uri));
        }
        json!({
            "id": self.id,
            "time_of_day": self.time_of_day.as_str(),
            "date": self.date.to_string(),
            "topics": by_type,
        })
    }
}

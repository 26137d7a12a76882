//! Member activity derived from transcripts.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::{Value, json};

use crate::language::Choice;
use crate::member::Member;

/// Something a member did (or was mentioned in) during a meeting.
#[derive(Debug, Clone, PartialEq)]
pub enum Activity {
    /// The member cast a named vote.
    Vote {
        member: Arc<Member>,
        date: NaiveDate,
        meeting: u32,
        item: u32,
        vote_number: u32,
        choice: Choice,
    },
    /// The member's name appears in an agenda item title.
    ///
    /// Substring matching on normalised names: a best-effort mention index,
    /// not an authorship claim. Short or common names give false positives.
    Topic {
        member: Arc<Member>,
        date: NaiveDate,
        meeting: u32,
        item: u32,
    },
}

impl Activity {
    pub fn member(&self) -> &Arc<Member> {
        match self {
            Self::Vote { member, .. } | Self::Topic { member, .. } => member,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Vote { date, .. } | Self::Topic { date, .. } => *date,
        }
    }

    fn topic_uri(meeting: u32, item: u32) -> String {
        format!("meetings/{meeting}/{item}.json")
    }

    pub fn to_json(&self, base_uri: &str) -> Value {
        match self {
            Self::Vote {
                meeting,
                item,
                choice,
                ..
            } => json!({
                "type": "vote",
                "topic": format!("{base_uri}{}", Self::topic_uri(*meeting, *item)),
                "choice": choice.as_str(),
            }),
            Self::Topic { meeting, item, .. } => json!({
                "type": "topic",
                "topic": format!("{base_uri}{}", Self::topic_uri(*meeting, *item)),
            }),
        }
    }
}

//! Agenda items of a meeting.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::entity::{Document, Entity, Question};
use crate::language::Language;
use crate::vote::Vote;

/// Nature of an agenda item, derived from its section and title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TopicType {
    /// No further classification could be made.
    General,
    /// Debate on current political affairs.
    CurrentAffairs,
    Budget,
    SecretVote,
    RevisionOfConstitution,
    /// Questions put by a member to the government in plenary.
    Interpellation,
    /// Public name votes, mostly on legislation.
    NameVote,
    /// Bill introduced by the government (`wetsontwerp`).
    DraftBill,
    /// Bill introduced by members (`wetsvoorstel`).
    BillProposal,
    /// Legislation that is neither clearly a draft nor a proposal.
    Legislation,
    Questions,
}

impl TopicType {
    pub const ALL: [TopicType; 11] = [
        Self::General,
        Self::CurrentAffairs,
        Self::Budget,
        Self::SecretVote,
        Self::RevisionOfConstitution,
        Self::Interpellation,
        Self::NameVote,
        Self::DraftBill,
        Self::BillProposal,
        Self::Legislation,
        Self::Questions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "GENERAL",
            Self::CurrentAffairs => "CURRENT_AFFAIRS",
            Self::Budget => "BUDGET",
            Self::SecretVote => "SECRET_VOTE",
            Self::RevisionOfConstitution => "REVISION_OF_CONSTITUTION",
            Self::Interpellation => "INTERPELLATION",
            Self::NameVote => "NAME_VOTE",
            Self::DraftBill => "DRAFT_BILL",
            Self::BillProposal => "BILL_PROPOSAL",
            Self::Legislation => "LEGISLATION",
            Self::Questions => "QUESTIONS",
        }
    }

    /// Types whose titles cite bill numbers like `(1234/1-5)`.
    pub fn cites_documents(&self) -> bool {
        matches!(
            self,
            Self::Legislation | Self::BillProposal | Self::DraftBill | Self::NameVote | Self::SecretVote
        )
    }

    pub fn cites_questions(&self) -> bool {
        matches!(self, Self::Questions)
    }
}

impl fmt::Display for TopicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pair of texts, one per language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bilingual {
    pub nl: Option<String>,
    pub fr: Option<String>,
}

impl Bilingual {
    pub fn get(&self, language: Language) -> Option<&str> {
        match language {
            Language::Nl => self.nl.as_deref(),
            Language::Fr => self.fr.as_deref(),
        }
    }

    pub fn set(&mut self, language: Language, text: impl Into<String>) {
        let text = Some(text.into());
        match language {
            Language::Nl => self.nl = text,
            Language::Fr => self.fr = text,
        }
    }

    /// `true` once both languages are set.
    pub fn is_complete(&self) -> bool {
        self.nl.is_some() && self.fr.is_some()
    }

    fn to_json(&self) -> Value {
        json!({ "NL": self.nl, "FR": self.fr })
    }
}

/// One agenda item of a meeting. Identity is `(meeting, item)`.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingTopic {
    pub meeting: u32,
    pub item: u32,
    pub title: Bilingual,
    pub section: Bilingual,
    pub topic_type: TopicType,
    pub votes: Vec<Vote>,
    pub related_documents: Vec<Arc<Document>>,
    pub related_questions: Vec<Arc<Question>>,
}

impl MeetingTopic {
    pub fn new(meeting: u32, item: u32) -> Self {
        Self {
            meeting,
            item,
            title: Bilingual::default(),
            section: Bilingual::default(),
            topic_type: TopicType::General,
            votes: Vec::new(),
            related_documents: Vec::new(),
            related_questions: Vec::new(),
        }
    }

    pub fn uri(&self) -> String {
        format!("meetings/{}/{}.json", self.meeting, self.item)
    }

    pub fn add_vote(&mut self, vote: Vote) {
        self.votes.push(vote);
    }

    pub fn to_json(&self, base_uri: &str) -> Value {
        json!({
            "id": self.item,
            "title": self.title.to_json(),
            "votes": self.votes.iter().map(|v| v.to_json(base_uri)).collect::<Vec<_>>(),
            "questions": self
                .related_questions
                .iter()
                .map(|q| format!("{base_uri}{}", q.uri()))
                .collect::<Vec<_>>(),
            "legislation": self
                .related_documents
                .iter()
                .map(|d| format!("{base_uri}{}", d.uri()))
                .collect::<Vec<_>>(),
        })
    }
}

//! The two language communities of the transcripts and the vote choices.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Language of a transcript paragraph.
///
/// Every transcript carries each agenda item twice, once per language, with
/// a fixed pair of paragraph style classes per language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "NL")]
    Nl,
    #[serde(rename = "FR")]
    Fr,
}

impl Language {
    /// Both languages, in the order the topic passes run.
    pub const ALL: [Language; 2] = [Language::Nl, Language::Fr];

    /// Style class of section-level paragraphs (`Titre1NL`, `Titre1FR`).
    pub fn section_class(self) -> &'static str {
        match self {
            Self::Nl => "Titre1NL",
            Self::Fr => "Titre1FR",
        }
    }

    /// Style class of title-level paragraphs (`Titre2NL`, `Titre2FR`).
    pub fn title_class(self) -> &'static str {
        match self {
            Self::Nl => "Titre2NL",
            Self::Fr => "Titre2FR",
        }
    }

    /// Section label used when a title has no preceding section paragraph.
    pub fn default_section(self) -> &'static str {
        match self {
            Self::Nl => "Algemeen",
            Self::Fr => "Generale",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Nl => "NL",
            Self::Fr => "FR",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A member's choice in a roll-call vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Choice {
    Yes,
    No,
    Abstention,
}

impl Choice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "YES",
            Self::No => "NO",
            Self::Abstention => "ABSTENTION",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

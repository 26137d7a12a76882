//! Recorded votes and their passage rules.
//!
//! Transcripts contain four structurally different kinds of vote. They form
//! a closed set, so they are modelled as one enum with a variant per kind;
//! the table dispatch in the extractor is exhaustive over it.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::warn;

use crate::language::Choice;
use crate::member::Member;

/// Threshold for electronic advisory votes: an absolute count, not a majority.
pub const ADVISORY_THRESHOLD: u32 = 50;

/// Minimum turnout for an electronic generic vote to pass.
pub const ELECTRONIC_QUORUM: u32 = 75;

/// Members recorded per choice in a roll-call vote.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Voters {
    pub yes: Vec<Arc<Member>>,
    pub no: Vec<Arc<Member>>,
    pub abstention: Vec<Arc<Member>>,
}

impl Voters {
    pub fn get(&self, choice: Choice) -> &[Arc<Member>] {
        match choice {
            Choice::Yes => &self.yes,
            Choice::No => &self.no,
            Choice::Abstention => &self.abstention,
        }
    }

    fn set(&mut self, choice: Choice, members: Vec<Arc<Member>>) {
        match choice {
            Choice::Yes => self.yes = members,
            Choice::No => self.no = members,
            Choice::Abstention => self.abstention = members,
        }
    }

    fn to_json(&self, base_uri: &str) -> Value {
        let uris = |members: &[Arc<Member>]| -> Vec<String> {
            members
                .iter()
                .map(|m| format!("{base_uri}{}", m.uri()))
                .collect()
        };
        json!({
            "yes": uris(&self.yes),
            "no": uris(&self.no),
            "abstention": uris(&self.abstention),
        })
    }
}

/// A roll-call vote with yes/no/abstention tallies.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericVote {
    pub vote_number: u32,
    pub yes: u32,
    pub no: u32,
    pub abstention: u32,
    pub voters: Voters,
    /// Set once a name list disagrees with its reported tally beyond tolerance.
    pub unsure: bool,
}

impl GenericVote {
    pub fn new(vote_number: u32, yes: u32, no: u32, abstention: u32) -> Self {
        Self {
            vote_number,
            yes,
            no,
            abstention,
            voters: Voters::default(),
            unsure: false,
        }
    }

    /// Passes on a plain majority over no and abstention combined.
    ///
    /// The chamber's quorum rule (art. 42.5) is not checked.
    pub fn passed(&self) -> bool {
        self.yes > self.no + self.abstention
    }

    pub fn count(&self, choice: Choice) -> u32 {
        match choice {
            Choice::Yes => self.yes,
            Choice::No => self.no,
            Choice::Abstention => self.abstention,
        }
    }

    fn count_mut(&mut self, choice: Choice) -> &mut u32 {
        match choice {
            Choice::Yes => &mut self.yes,
            Choice::No => &mut self.no,
            Choice::Abstention => &mut self.abstention,
        }
    }

    /// Attach the resolved members for one choice.
    ///
    /// The resolved list length becomes the count of record. When it differs
    /// from the reported tally by more than `tolerance`, the vote is marked
    /// unsure. Returns `true` on such a mismatch.
    pub fn set_voters(&mut self, choice: Choice, members: Vec<Arc<Member>>, tolerance: u32) -> bool {
        let reported = self.count(choice);
        let resolved = members.len() as u32;
        let mismatch = reported.abs_diff(resolved) > tolerance;
        if mismatch {
            warn!(
                vote = self.vote_number,
                %choice,
                reported,
                resolved,
                "name list does not match reported tally"
            );
            self.unsure = true;
        }
        *self.count_mut(choice) = resolved;
        self.voters.set(choice, members);
        mismatch
    }

    pub fn to_json(&self, base_uri: &str) -> Value {
        json!({
            "id": self.vote_number,
            "type": "general",
            "yes": self.yes,
            "no": self.no,
            "abstention": self.abstention,
            "passed": self.passed(),
            "voters": self.voters.to_json(base_uri),
        })
    }
}

/// A vote that needs a majority in each language group.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageGroupVote {
    /// Chamber-wide tally and name lists.
    pub total: GenericVote,
    pub nl: GenericVote,
    pub fr: GenericVote,
}

impl LanguageGroupVote {
    pub fn new(vote_number: u32, nl: GenericVote, fr: GenericVote) -> Self {
        let total = GenericVote::new(
            vote_number,
            nl.yes + fr.yes,
            nl.no + fr.no,
            nl.abstention + fr.abstention,
        );
        Self { total, nl, fr }
    }

    pub fn passed(&self) -> bool {
        self.nl.passed() && self.fr.passed()
    }

    pub fn to_json(&self, base_uri: &str) -> Value {
        json!({
            "id": self.total.vote_number,
            "type": "language_group",
            "yes": self.total.yes,
            "no": self.total.no,
            "abstention": self.total.abstention,
            "passed": self.passed(),
            "voters": self.total.voters.to_json(base_uri),
            "detail": {
                "NL": self.nl.to_json(base_uri),
                "FR": self.fr.to_json(base_uri),
            },
        })
    }
}

/// An anonymous electronic vote with yes and no counts.
#[derive(Debug, Clone, PartialEq)]
pub struct ElectronicGenericVote {
    pub vote_number: u32,
    pub yes: u32,
    pub no: u32,
    pub unsure: bool,
}

impl ElectronicGenericVote {
    pub fn new(vote_number: u32, yes: u32, no: u32) -> Self {
        Self {
            vote_number,
            yes,
            no,
            unsure: false,
        }
    }

    pub fn passed(&self) -> bool {
        self.yes > self.no && self.yes + self.no > ELECTRONIC_QUORUM
    }
}

/// An anonymous electronic vote asking whether further advice is needed.
#[derive(Debug, Clone, PartialEq)]
pub struct ElectronicAdvisoryVote {
    pub vote_number: u32,
    pub yes: u32,
    pub unsure: bool,
}

impl ElectronicAdvisoryVote {
    pub fn new(vote_number: u32, yes: u32) -> Self {
        Self {
            vote_number,
            yes,
            unsure: false,
        }
    }

    pub fn passed(&self) -> bool {
        self.yes > ADVISORY_THRESHOLD
    }
}

/// A vote attached to an agenda item.
#[derive(Debug, Clone, PartialEq)]
pub enum Vote {
    General(GenericVote),
    LanguageGroup(LanguageGroupVote),
    ElectronicGeneric(ElectronicGenericVote),
    ElectronicAdvisory(ElectronicAdvisoryVote),
}

impl Vote {
    /// Serialisation tag of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::General(_) => "general",
            Self::LanguageGroup(_) => "language_group",
            Self::ElectronicGeneric(_) => "electronic_generic",
            Self::ElectronicAdvisory(_) => "electronic_advisory",
        }
    }

    /// Number of the vote within its meeting.
    pub fn vote_number(&self) -> u32 {
        match self {
            Self::General(v) => v.vote_number,
            Self::LanguageGroup(v) => v.total.vote_number,
            Self::ElectronicGeneric(v) => v.vote_number,
            Self::ElectronicAdvisory(v) => v.vote_number,
        }
    }

    pub fn yes(&self) -> u32 {
        match self {
            Self::General(v) => v.yes,
            Self::LanguageGroup(v) => v.total.yes,
            Self::ElectronicGeneric(v) => v.yes,
            Self::ElectronicAdvisory(v) => v.yes,
        }
    }

    pub fn unsure(&self) -> bool {
        match self {
            Self::General(v) => v.unsure,
            Self::LanguageGroup(v) => v.total.unsure,
            Self::ElectronicGeneric(v) => v.unsure,
            Self::ElectronicAdvisory(v) => v.unsure,
        }
    }

    pub fn passed(&self) -> bool {
        match self {
            Self::General(v) => v.passed(),
            Self::LanguageGroup(v) => v.passed(),
            Self::ElectronicGeneric(v) => v.passed(),
            Self::ElectronicAdvisory(v) => v.passed(),
        }
    }

    /// The tally that name lists attach to, if this kind records names.
    pub fn roll_call_mut(&mut self) -> Option<&mut GenericVote> {
        match self {
            Self::General(v) => Some(v),
            Self::LanguageGroup(v) => Some(&mut v.total),
            Self::ElectronicGeneric(_) | Self::ElectronicAdvisory(_) => None,
        }
    }

    pub fn to_json(&self, base_uri: &str) -> Value {
        match self {
            Self::General(v) => v.to_json(base_uri),
            Self::LanguageGroup(v) => v.to_json(base_uri),
            Self::ElectronicGeneric(v) => json!({
                "id": v.vote_number,
                "type": self.kind(),
                "yes": v.yes,
                "no": v.no,
                "passed": v.passed(),
            }),
            Self::ElectronicAdvisory(v) => json!({
                "id": v.vote_number,
                "type": self.kind(),
                "yes": v.yes,
                "passed": v.passed(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(n: usize) -> Vec<Arc<Member>> {
        (0..n)
            .map(|i| Arc::new(Member::new(format!("m-{i}"), format!("First{i}"), format!("Last{i}"), "X")))
            .collect()
    }

    #[test]
    fn generic_passes_on_majority_over_no_and_abstention() {
        assert!(GenericVote::new(1, 88, 42, 3).passed());
        assert!(!GenericVote::new(1, 45, 42, 3).passed());
        assert!(!GenericVote::new(1, 45, 45, 0).passed());
    }

    #[test]
    fn language_group_needs_both_groups() {
        let nl = GenericVote::new(2, 50, 10, 0);
        let fr = GenericVote::new(2, 20, 30, 5);
        let vote = LanguageGroupVote::new(2, nl.clone(), fr);
        assert!(!vote.passed());
        assert_eq!(vote.total.yes, 70);
        assert_eq!(vote.total.no, 40);
        assert_eq!(vote.total.abstention, 5);
        // The chamber-wide total would pass on its own.
        assert!(vote.total.passed());

        let vote = LanguageGroupVote::new(2, nl, GenericVote::new(2, 40, 10, 1));
        assert!(vote.passed());
    }

    #[test]
    fn electronic_generic_needs_majority_and_turnout() {
        assert!(ElectronicGenericVote::new(3, 50, 30).passed());
        assert!(!ElectronicGenericVote::new(3, 40, 30).passed());
        assert!(!ElectronicGenericVote::new(3, 30, 50).passed());
    }

    #[test]
    fn electronic_advisory_uses_absolute_threshold() {
        assert!(ElectronicAdvisoryVote::new(4, 51).passed());
        assert!(!ElectronicAdvisoryVote::new(4, 50).passed());
    }

    #[test]
    fn set_voters_within_tolerance_stays_sure() {
        let mut vote = GenericVote::new(1, 10, 0, 0);
        assert!(!vote.set_voters(Choice::Yes, members(12), 2));
        assert_eq!(vote.yes, 12);
        assert!(!vote.unsure);
    }

    #[test]
    fn set_voters_beyond_tolerance_marks_unsure() {
        let mut vote = GenericVote::new(1, 10, 0, 0);
        assert!(vote.set_voters(Choice::Yes, members(13), 2));
        assert_eq!(vote.yes, 13);
        assert_eq!(vote.voters.yes.len(), 13);
        assert!(vote.unsure);
    }

    #[test]
    fn unsure_is_sticky_across_choices() {
        let mut vote = GenericVote::new(1, 0, 5, 0);
        vote.set_voters(Choice::No, members(0), 2);
        assert!(vote.unsure);
        vote.set_voters(Choice::Yes, members(0), 2);
        assert!(vote.unsure);
    }

    #[test]
    fn general_json_shape() {
        let mut vote = GenericVote::new(7, 1, 0, 0);
        vote.set_voters(Choice::Yes, members(1), 2);
        let json = Vote::General(vote).to_json("/sessions/55/");
        assert_eq!(json["type"], "general");
        assert_eq!(json["id"], 7);
        assert_eq!(json["passed"], true);
        assert_eq!(json["voters"]["yes"][0], "/sessions/55/members/m-0.json");
    }

    #[test]
    fn electronic_json_omits_names() {
        let json = Vote::ElectronicAdvisory(ElectronicAdvisoryVote::new(9, 60)).to_json("/");
        assert_eq!(json["type"], "electronic_advisory");
        assert!(json.get("voters").is_none());
        assert!(json.get("no").is_none());

        let json = Vote::ElectronicGeneric(ElectronicGenericVote::new(9, 60, 30)).to_json("/");
        assert_eq!(json["no"], 30);
        assert!(json.get("abstention").is_none());
    }

    #[test]
    fn language_group_json_has_detail() {
        let vote = LanguageGroupVote::new(5, GenericVote::new(5, 50, 1, 0), GenericVote::new(5, 30, 2, 0));
        let json = Vote::LanguageGroup(vote).to_json("/");
        assert_eq!(json["type"], "language_group");
        assert_eq!(json["yes"], 80);
        assert_eq!(json["detail"]["NL"]["yes"], 50);
        assert_eq!(json["detail"]["FR"]["no"], 2);
    }

    #[test]
    fn roll_call_only_for_named_votes() {
        let mut electronic = Vote::ElectronicAdvisory(ElectronicAdvisoryVote::new(1, 60));
        assert!(electronic.roll_call_mut().is_none());

        let mut group = Vote::LanguageGroup(LanguageGroupVote::new(
            1,
            GenericVote::new(1, 1, 0, 0),
            GenericVote::new(1, 1, 0, 0),
        ));
        assert_eq!(group.roll_call_mut().map(|v| v.yes), Some(2));
    }
}

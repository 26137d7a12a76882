//! Keyword classification of agenda items.
//!
//! Rules are evaluated in order on the Dutch title and section text; the
//! first one that fires wins.

use plenary_core::TopicType;

/// Classify an agenda item from its Dutch title and section label.
pub fn classify(title: &str, section: &str) -> TopicType {
    let title = title.to_lowercase();
    let section = section.to_lowercase();

    if section.contains("begroting") {
        return TopicType::Budget;
    }
    if section.contains("actualiteitsdebat") {
        return TopicType::CurrentAffairs;
    }
    if section.contains("naamstemming") {
        return TopicType::NameVote;
    }
    if section.contains("geheim") && section.contains("stemming") {
        return TopicType::SecretVote;
    }
    if section.contains("vragen") || title.contains("vragen") || title.contains("vraag") {
        return TopicType::Questions;
    }
    if section.contains("interpellatie") {
        return TopicType::Interpellation;
    }
    if section.contains("herziening") && section.contains("grondwet") {
        return TopicType::RevisionOfConstitution;
    }
    if section.contains("ontwerp") || section.contains("voorstel") {
        // Both branches can hold for a section listing drafts and proposals;
        // the proposal check runs first.
        if !section.contains("ontwerp") || title.contains("voorstel") {
            return TopicType::BillProposal;
        }
        if !section.contains("voorstel") || title.contains("ontwerp") {
            return TopicType::DraftBill;
        }
        return TopicType::General;
    }
    TopicType::General
}

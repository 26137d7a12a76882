//! Bill and question references embedded in agenda-item titles.

use std::sync::Arc;

use once_cell::sync::Lazy;
use plenary_core::{Document, EntityRegistry, MeetingTopic, Question};
use regex::Regex;
use tracing::debug;

/// `(1234/1-5)`: dossier number before the slash.
static BILL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.*\(([0-9]+)/.*\)").expect("valid regex"));
/// `(55001234P)` / `(55001234C)`.
static QUESTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.*\(([0-9]{8}(P|C))\)").expect("valid regex"));
/// `(nr. P1234)` in older sessions; full stops are gone after cleaning.
static LEGACY_QUESTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.*\(nr\.? (P[0-9]{4})\)").expect("valid regex"));

/// Dossier numbers cited in a title, one per line at most.
pub fn bill_numbers(title: &str) -> Vec<String> {
    title
        .lines()
        .filter_map(|line| BILL.captures(line))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Question numbers cited in a title. Legacy `P####` numbers are prefixed
/// with the session so they stay unique across sessions.
pub fn question_numbers(session: u32, title: &str) -> Vec<String> {
    title
        .lines()
        .filter_map(|line| {
            if let Some(m) = QUESTION.captures(line).and_then(|c| c.get(1)) {
                return Some(m.as_str().to_string());
            }
            LEGACY_QUESTION
                .captures(line)
                .and_then(|c| c.get(1))
                .map(|m| format!("{session}{}", m.as_str()))
        })
        .collect()
}

fn dedup(numbers: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    numbers.into_iter().filter(|n| seen.insert(n.clone())).collect()
}

/// Resolves title references through the session registries.
pub struct Linker<'a> {
    pub session: u32,
    pub documents: &'a dyn EntityRegistry<Document>,
    pub questions: &'a dyn EntityRegistry<Question>,
}

impl Linker<'_> {
    /// Replace the topic's related entities according to its current type.
    pub fn link(&self, topic: &mut MeetingTopic) {
        let title = topic.title.nl.as_deref().unwrap_or_default();
        let mut documents = Vec::new();
        let mut questions = Vec::new();

        if topic.topic_type.cites_documents() {
            documents = dedup(bill_numbers(title))
                .iter()
                .map(|n| self.documents.get_or_create(self.session, n))
                .collect::<Vec<Arc<Document>>>();
        } else if topic.topic_type.cites_questions() {
            questions = dedup(question_numbers(self.session, title))
                .iter()
                .map(|n| self.questions.get_or_create(self.session, n))
                .collect::<Vec<Arc<Question>>>();
        }

        if !documents.is_empty() || !questions.is_empty() {
            debug!(
                meeting = topic.meeting,
                item = topic.item,
                documents = documents.len(),
                questions = questions.len(),
                "linked references"
            );
        }
        topic.related_documents = documents;
        topic.related_questions = questions;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plenary_core::TopicType;
    use plenary_store::{DocumentRegistry, QuestionRegistry};

    #[test]
    fn bill_number_before_slash() {
        assert_eq!(bill_numbers("Wetsontwerp over de post (1234/1-5)"), vec!["1234"]);
        assert_eq!(
            bill_numbers("Wetsontwerp (1234/1-5)\nWetsvoorstel (987/1)"),
            vec!["1234", "987"]
        );
        assert!(bill_numbers("Wetsontwerp zonder nummer").is_empty());
    }

    #[test]
    fn question_formats() {
        assert_eq!(question_numbers(55, "Vraag (55001234P)"), vec!["55001234P"]);
        assert_eq!(question_numbers(55, "Vraag (55004321C)"), vec!["55004321C"]);
        assert_eq!(question_numbers(52, "Vraag (nr P0042)"), vec!["52P0042"]);
        assert_eq!(question_numbers(52, "Vraag (nr. P0042)"), vec!["52P0042"]);
        assert!(question_numbers(55, "Vraag (1234)").is_empty());
    }

    fn registries() -> (DocumentRegistry, QuestionRegistry) {
        (DocumentRegistry::new(), QuestionRegistry::new())
    }

    #[test]
    fn draft_bill_links_one_document() {
        let (documents, questions) = registries();
        let linker = Linker {
            session: 55,
            documents: &documents,
            questions: &questions,
        };
        let mut topic = MeetingTopic::new(1, 3);
        topic.title.set(plenary_core::Language::Nl, "Wetsontwerp over de post (1234/5)");
        topic.topic_type = TopicType::DraftBill;
        linker.link(&mut topic);
        assert_eq!(topic.related_documents.len(), 1);
        assert_eq!(topic.related_documents[0].number, "1234");
        assert!(topic.related_questions.is_empty());
    }

    #[test]
    fn repeated_numbers_link_once() {
        let (documents, questions) = registries();
        let linker = Linker {
            session: 55,
            documents: &documents,
            questions: &questions,
        };
        let mut topic = MeetingTopic::new(1, 3);
        topic
            .title
            .set(plenary_core::Language::Nl, "Wetsontwerp (1234/1)\nVerslag (1234/2)");
        topic.topic_type = TopicType::NameVote;
        linker.link(&mut topic);
        linker.link(&mut topic);
        assert_eq!(topic.related_documents.len(), 1);
        assert_eq!(documents.len(), 1);
    }

    #[test]
    fn questions_topic_links_questions() {
        let (documents, questions) = registries();
        let linker = Linker {
            session: 55,
            documents: &documents,
            questions: &questions,
        };
        let mut topic = MeetingTopic::new(1, 2);
        topic.title.set(plenary_core::Language::Nl, "Vraag over (1234/1)\n(55001234P)");
        topic.topic_type = TopicType::Questions;
        linker.link(&mut topic);
        assert!(topic.related_documents.is_empty());
        assert_eq!(topic.related_questions[0].number, "55001234P");
    }

    #[test]
    fn other_types_link_nothing() {
        let (documents, questions) = registries();
        let linker = Linker {
            session: 55,
            documents: &documents,
            questions: &questions,
        };
        let mut topic = MeetingTopic::new(1, 2);
        topic.title.set(plenary_core::Language::Nl, "Begroting (1234/1)");
        topic.topic_type = TopicType::Budget;
        linker.link(&mut topic);
        assert!(topic.related_documents.is_empty());
        assert!(documents.is_empty());
    }
}

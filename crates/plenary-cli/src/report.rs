//! Output rendering for extracted meetings.
//!
//! JSON for machines (one object per meeting, with member activity), and a
//! vertical card grouped by topic type for people.

use std::collections::BTreeMap;

use plenary_core::{Activity, MeetingTopic, TopicType, Vote};
use plenary_extract::Extraction;
use plenary_store::{DocumentRegistry, QuestionRegistry};
use serde_json::{Value, json};

const MAX_LIST_ITEMS: usize = 10;

// ── JSON ──

/// `{meeting, activities}` with every URI under `base_uri`.
pub fn extraction_json(extraction: &Extraction, base_uri: &str) -> Value {
    let activities: Vec<Value> = extraction
        .activities
        .iter()
        .map(|activity| activity_json(activity, base_uri))
        .collect();
    json!({
        "meeting": extraction.meeting.to_json(base_uri),
        "activities": activities,
    })
}

fn activity_json(activity: &Activity, base_uri: &str) -> Value {
    let mut value = activity.to_json(base_uri);
    value["member"] = json!(format!("{base_uri}{}", activity.member().uri()));
    value["date"] = json!(activity.date().to_string());
    value
}

/// Every bill and question of the session: output URIs and website pages.
pub fn entity_index(
    documents: &DocumentRegistry,
    questions: &QuestionRegistry,
    session: u32,
    base_uri: &str,
) -> Value {
    let document_sources: BTreeMap<String, String> = documents
        .snapshot(session)
        .iter()
        .map(|d| (d.number.clone(), d.source_url()))
        .collect();
    let question_sources: BTreeMap<String, String> = questions
        .snapshot(session)
        .iter()
        .map(|q| (q.number.clone(), q.source_url()))
        .collect();
    json!({
        "legislation": documents.index(session, base_uri),
        "questions": questions.index(session, base_uri),
        "sources": {
            "legislation": document_sources,
            "questions": question_sources,
        },
    })
}

// ── Card ──

pub fn print_meeting_card(extraction: &Extraction) {
    print!("{}", meeting_card(extraction));
}

pub fn meeting_card(extraction: &Extraction) -> String {
    let meeting = &extraction.meeting;
    let mut out = format!(
        "=== Meeting {} ({}, {}) ===\n",
        meeting.id, meeting.date, meeting.time_of_day
    );
    if meeting.topics.is_empty() {
        out.push_str("(no topics)\n");
        return out;
    }

    for topic_type in TopicType::ALL {
        let topics: Vec<&MeetingTopic> = meeting
            .topics
            .values()
            .filter(|t| t.topic_type == topic_type)
            .collect();
        if topics.is_empty() {
            continue;
        }
        out.push_str(&format!("\n{topic_type}\n"));
        for topic in topics {
            push_topic(&mut out, topic);
        }
    }

    let votes = extraction
        .activities
        .iter()
        .filter(|a| matches!(a, Activity::Vote { .. }))
        .count();
    out.push_str(&format!(
        "\n{} topics, {} votes, {} named votes cast, {} mentions\n",
        meeting.topics.len(),
        meeting.vote_count(),
        votes,
        extraction.activities.len() - votes
    ));
    out
}

fn push_topic(out: &mut String, topic: &MeetingTopic) {
    let title = topic
        .title
        .nl
        .as_deref()
        .or(topic.title.fr.as_deref())
        .and_then(|t| t.lines().next())
        .unwrap_or_default();
    out.push_str(&format!("  {:>3}  {}\n", topic.item, title));

    for vote in &topic.votes {
        out.push_str(&format!("       {}\n", vote_line(vote)));
    }
    if !topic.related_documents.is_empty() {
        let numbers: Vec<&str> = topic.related_documents.iter().map(|d| d.number.as_str()).collect();
        out.push_str(&format!("       legislation: {}\n", truncated(&numbers)));
    }
    if !topic.related_questions.is_empty() {
        let numbers: Vec<&str> = topic.related_questions.iter().map(|q| q.number.as_str()).collect();
        out.push_str(&format!("       questions: {}\n", truncated(&numbers)));
    }
}

fn vote_line(vote: &Vote) -> String {
    let verdict = if vote.passed() { "passed" } else { "rejected" };
    let unsure = if vote.unsure() { " (counts unsure)" } else { "" };
    let tally = match vote {
        Vote::General(v) => format!("{}/{}/{}", v.yes, v.no, v.abstention),
        Vote::LanguageGroup(v) => format!(
            "NL {}/{}/{}, FR {}/{}/{}",
            v.nl.yes, v.nl.no, v.nl.abstention, v.fr.yes, v.fr.no, v.fr.abstention
        ),
        Vote::ElectronicGeneric(v) => format!("{}/{}", v.yes, v.no),
        Vote::ElectronicAdvisory(v) => format!("{} yes", v.yes),
    };
    format!(
        "vote {} [{}] {} {}{}",
        vote.vote_number(),
        vote.kind(),
        tally,
        verdict,
        unsure
    )
}

fn truncated(items: &[&str]) -> String {
    let shown = items[..items.len().min(MAX_LIST_ITEMS)].join(", ");
    if items.len() > MAX_LIST_ITEMS {
        format!("{shown} (+{} more)", items.len() - MAX_LIST_ITEMS)
    } else {
        shown
    }
}

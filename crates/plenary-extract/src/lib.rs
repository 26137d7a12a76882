//! Extraction of agenda topics, votes and references from plenary transcripts.
//!
//! One transcript is processed in two passes: title paragraphs are segmented
//! into topics (Dutch first, then French), then vote markers are located and
//! attached to the topics they belong to. Members, bills and questions are
//! resolved through injected, shareable collaborators.

mod error;
pub use error::ExtractError;

pub mod classifier;
pub mod index;
pub mod linker;
mod locator;
pub mod names;
pub mod reconcile;
pub mod segmenter;
pub mod shape;
pub mod transcript;

use std::sync::Arc;

use plenary_core::{
    Activity, Document, EntityRegistry, ExtractConfig, Language, Meeting, MeetingInfo, MemberResolver,
    Question,
};
use tracing::{debug, info, warn};

use crate::classifier::classify;
use crate::linker::Linker;
use crate::locator::{LocatedVote, locate_votes};
use crate::reconcile::reconcile;
use crate::segmenter::{Segmenter, mentioned_members};
use crate::transcript::Transcript;

/// A meeting and the member activity found while extracting it.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub meeting: Meeting,
    pub activities: Vec<Activity>,
}

/// Extracts meetings against shared session state.
///
/// Cheap to share between workers: all state lives behind the injected
/// `Arc`s.
pub struct Extractor {
    members: Arc<dyn MemberResolver>,
    documents: Arc<dyn EntityRegistry<Document>>,
    questions: Arc<dyn EntityRegistry<Question>>,
    config: ExtractConfig,
}

impl Extractor {
    pub fn new(
        members: Arc<dyn MemberResolver>,
        documents: Arc<dyn EntityRegistry<Document>>,
        questions: Arc<dyn EntityRegistry<Question>>,
        config: ExtractConfig,
    ) -> Self {
        Self {
            members,
            documents,
            questions,
            config,
        }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// A meeting without topics, for transcripts that could not be fetched.
    pub fn empty(&self, info: MeetingInfo) -> Extraction {
        Extraction {
            meeting: Meeting::new(info),
            activities: Vec::new(),
        }
    }

    /// Extract topics and votes from one transcript.
    ///
    /// Never fails: structural problems skip the affected topic or vote and
    /// are logged.
    pub fn extract(&self, info: MeetingInfo, source: &str) -> Extraction {
        let transcript = Transcript::parse(source);
        let mut extraction = self.empty(info);

        self.segment(&transcript, &mut extraction);
        self.attach_votes(&transcript, &mut extraction);

        info!(
            session = info.session,
            meeting = info.id,
            topics = extraction.meeting.topics.len(),
            votes = extraction.meeting.vote_count(),
            activities = extraction.activities.len(),
            "extracted meeting"
        );
        extraction
    }

    fn segment(&self, transcript: &Transcript, extraction: &mut Extraction) {
        let info = extraction.meeting.info();
        let linker = Linker {
            session: info.session,
            documents: self.documents.as_ref(),
            questions: self.questions.as_ref(),
        };
        let members = self.members.members();

        for language in Language::ALL {
            for segment in Segmenter::new(transcript.title_lines(language)) {
                let topic = extraction.meeting.topic_mut(segment.item);
                topic.title.set(language, segment.title.as_str());
                topic.section.set(
                    language,
                    segment
                        .section
                        .unwrap_or_else(|| language.default_section().to_string()),
                );
                // Reclassified after every language: the Dutch pass decides,
                // the French pass only fills topics Dutch did not see.
                topic.topic_type = classify(
                    topic.title.nl.as_deref().unwrap_or_default(),
                    topic.section.nl.as_deref().unwrap_or_default(),
                );
                linker.link(topic);
                debug!(meeting = info.id, item = segment.item, %language, topic_type = %topic.topic_type, "topic");

                if language == Language::Nl {
                    for member in mentioned_members(&segment.title, &members) {
                        extraction.activities.push(Activity::Topic {
                            member,
                            date: info.date,
                            meeting: info.id,
                            item: segment.item,
                        });
                    }
                }
            }
        }

        for topic in extraction.meeting.topics.values() {
            if !topic.title.is_complete() {
                debug!(meeting = info.id, item = topic.item, "topic titled in one language only");
            }
        }
    }

    fn attach_votes(&self, transcript: &Transcript, extraction: &mut Extraction) {
        let info = extraction.meeting.info();
        for located in locate_votes(transcript.html(), self.config.table_ancestor_depth) {
            let LocatedVote {
                item,
                mut vote,
                names,
            } = match located {
                Ok(located) => located,
                Err(e) => {
                    warn!(meeting = info.id, error = %e, "skipping vote");
                    continue;
                }
            };
            let vote_number = vote.vote_number();
            let Some(topic) = extraction.meeting.topics.get_mut(&item) else {
                let e = ExtractError::MissingTopic {
                    vote: vote_number,
                    item,
                };
                warn!(meeting = info.id, error = %e, "skipping vote");
                continue;
            };

            if let Some(names) = &names {
                let cast = reconcile(
                    &mut vote,
                    names,
                    self.members.as_ref(),
                    self.config.count_tolerance,
                );
                extraction
                    .activities
                    .extend(cast.into_iter().map(|(member, choice)| Activity::Vote {
                        member,
                        date: info.date,
                        meeting: info.id,
                        item,
                        vote_number,
                        choice,
                    }));
            }
            topic.add_vote(vote);
        }
    }
}

//! Bounded, concurrent harvesting of a session's meetings.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use plenary_core::{MeetingInfo, Session};
use plenary_extract::index::parse_meeting_listing;
use plenary_extract::{Extraction, Extractor};
use tracing::{info, warn};

use crate::config::FetchConfig;
use crate::http::{DocumentSource, FetchError};
use crate::retry::{FetchOutcome, fetch_with_marker_retry};

/// Fetches transcripts and runs the extractor on a blocking worker.
pub struct Harvester {
    source: Arc<dyn DocumentSource>,
    extractor: Arc<Extractor>,
    config: FetchConfig,
}

impl Harvester {
    pub fn new(source: Arc<dyn DocumentSource>, extractor: Arc<Extractor>, config: FetchConfig) -> Self {
        Self {
            source,
            extractor,
            config,
        }
    }

    /// Meetings listed for `session`.
    pub async fn meetings(&self, session: &Session) -> Result<Vec<MeetingInfo>, FetchError> {
        let url = session.meetings_url(self.config.base_url());
        match fetch_with_marker_retry(
            self.source.as_ref(),
            &url,
            self.config.marker_retries,
            self.config.backoff(),
        )
        .await? {
            FetchOutcome::Success(body) => Ok(parse_meeting_listing(session.number, &body)),
            FetchOutcome::Exhausted { attempts } => Err(FetchError::Exhausted { url, attempts }),
        }
    }

    /// Fetch and extract one meeting.
    ///
    /// A transcript that cannot be fetched yields the meeting without topics.
    pub async fn meeting(&self, info: MeetingInfo) -> Extraction {
        let url = info.notes_url(self.config.base_url());
        let body = match fetch_with_marker_retry(
            self.source.as_ref(),
            &url,
            self.config.marker_retries,
            self.config.backoff(),
        )
        .await {
            Ok(FetchOutcome::Success(body)) => body,
            Ok(FetchOutcome::Exhausted { attempts }) => {
                warn!(meeting = info.id, url = %url, attempts, "transcript unavailable, emitting empty meeting");
                return self.extractor.empty(info);
            }
            Err(e) => {
                warn!(meeting = info.id, url = %url, error = %e, "transcript fetch failed, emitting empty meeting");
                return self.extractor.empty(info);
            }
        };

        let extractor = Arc::clone(&self.extractor);
        match tokio::task::spawn_blocking(move || extractor.extract(info, &body)).await {
            Ok(extraction) => extraction,
            Err(e) => {
                warn!(meeting = info.id, error = %e, "extraction task failed");
                self.extractor.empty(info)
            }
        }
    }

    /// Harvest `meetings` with at most `workers` in flight, in completion order.
    pub async fn harvest(&self, meetings: Vec<MeetingInfo>) -> Vec<Extraction> {
        let total = meetings.len();
        let workers = self.config.workers.max(1);
        info!(meetings = total, workers, "harvesting meetings");

        let mut done = Vec::with_capacity(total);
        let mut results = stream::iter(meetings)
            .map(|info| self.meeting(info))
            .buffer_unordered(workers);
        while let Some(extraction) = results.next().await {
            info!(
                meeting = extraction.meeting.id,
                progress = format!("{}/{}", done.len() + 1, total),
                topics = extraction.meeting.topics.len(),
                "meeting done"
            );
            done.push(extraction);
        }
        done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::ERROR_MARKER;
    use crate::retry::tests::ScriptedSource;
    use chrono::NaiveDate;
    use plenary_core::{ExtractConfig, TimeOfDay};
    use plenary_store::{DocumentRegistry, QuestionRegistry, Roster};

    const BASE: &str = "http://kamer.test";

    const TRANSCRIPT: &str = r#"<html><body>
<p class="Titre2NL">01 Regeling van de werkzaamheden</p>
<p class="Titre2FR">01 Ordre des travaux</p>
</body></html>"#;

    fn harvester(source: ScriptedSource) -> Harvester {
        let extractor = Extractor::new(
            Arc::new(Roster::new(Vec::new()).unwrap()),
            Arc::new(DocumentRegistry::new()),
            Arc::new(QuestionRegistry::new()),
            ExtractConfig::default(),
        );
        let config = FetchConfig {
            base_url: format!("{BASE}/"),
            workers: 2,
            backoff_ms: 0,
            ..FetchConfig::default()
        };
        Harvester::new(Arc::new(source), Arc::new(extractor), config)
    }

    fn info(id: u32) -> MeetingInfo {
        MeetingInfo {
            session: 55,
            id,
            time_of_day: TimeOfDay::Pm,
            date: NaiveDate::from_ymd_opt(2020, 1, 9).unwrap(),
        }
    }

    #[tokio::test]
    async fn extracts_fetched_meeting() {
        let source = ScriptedSource::default().with(&info(1).notes_url(BASE), &[TRANSCRIPT]);
        let extraction = harvester(source).meeting(info(1)).await;
        assert_eq!(extraction.meeting.topics.len(), 1);
        assert_eq!(
            extraction.meeting.topics[&1].title.fr.as_deref(),
            Some("Ordre des travaux")
        );
    }

    #[tokio::test]
    async fn persistent_error_page_yields_empty_meeting() {
        let page = format!("<html><body>{ERROR_MARKER}</body></html>");
        let source = ScriptedSource::default().with(&info(2).notes_url(BASE), &[page.as_str()]);
        let extraction = harvester(source).meeting(info(2)).await;
        assert_eq!(extraction.meeting.id, 2);
        assert!(extraction.meeting.topics.is_empty());
    }

    #[tokio::test]
    async fn harvests_every_meeting() {
        let source = ScriptedSource::default()
            .with(&info(1).notes_url(BASE), &[TRANSCRIPT])
            .with(&info(2).notes_url(BASE), &[TRANSCRIPT])
            .with(&info(3).notes_url(BASE), &[TRANSCRIPT]);
        let mut done = harvester(source).harvest(vec![info(1), info(2), info(3), info(4)]).await;
        done.sort_by_key(|e| e.meeting.id);
        let ids: Vec<u32> = done.iter().map(|e| e.meeting.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(done[2].meeting.topics.len(), 1);
        assert!(done[3].meeting.topics.is_empty());
    }

    #[tokio::test]
    async fn lists_session_meetings() {
        let session = Session::known(55).unwrap();
        let listing = r#"<table>
<tr><td>001</td><td>PM</td><td>20/06/2019</td></tr>
<tr><td>002</td><td>AM</td><td>27/06/2019</td></tr>
</table>"#;
        let source = ScriptedSource::default().with(&session.meetings_url(BASE), &[listing]);
        let meetings = harvester(source).meetings(&session).await.unwrap();
        assert_eq!(meetings.len(), 2);
        assert_eq!(meetings[1].id, 2);
    }

    #[tokio::test]
    async fn unavailable_listing_is_an_error() {
        let session = Session::known(54).unwrap();
        let page = format!("<p>{ERROR_MARKER}</p>");
        let source = ScriptedSource::default().with(&session.meetings_url(BASE), &[page.as_str()]);
        let err = harvester(source).meetings(&session).await.unwrap_err();
        assert!(matches!(err, FetchError::Exhausted { attempts: 11, .. }));
    }
}

//! Bills and parliamentary questions referenced from agenda items.
//!
//! These entities are owned by a session-wide registry, not by the topics
//! that mention them. Topics only ever hold `Arc`s handed out by
//! [`EntityRegistry::get_or_create`].

use std::sync::Arc;

/// An entity identified by its number within a session.
pub trait Entity: Send + Sync + 'static {
    /// Build a fresh entity. Only registries call this.
    fn create(session: u32, number: &str) -> Self;

    fn number(&self) -> &str;

    /// Session-relative URI of the entity's JSON record.
    fn uri(&self) -> String;
}

/// Atomic get-or-create access to entities of one kind.
///
/// Two calls with the same `(session, number)` must return the same `Arc`,
/// even when made concurrently from different workers.
pub trait EntityRegistry<E: Entity>: Send + Sync {
    fn get_or_create(&self, session: u32, number: &str) -> Arc<E>;
}

/// A legislative document (bill or bill proposal), keyed by dossier number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub session: u32,
    pub number: String,
}

impl Document {
    /// Dossier page on the parliament website.
    pub fn source_url(&self) -> String {
        format!(
            "https://www.dekamer.be/kvvcr/showpage.cfm?section=/flwb&language=nl&cfm=/site/wwwcfm/flwb/flwbn.cfm?lang=N&legislat={}&dossierID={}",
            self.session, self.number
        )
    }
}

impl Entity for Document {
    fn create(session: u32, number: &str) -> Self {
        Self {
            session,
            number: number.to_string(),
        }
    }

    fn number(&self) -> &str {
        &self.number
    }

    fn uri(&self) -> String {
        format!("legislation/{}.json", self.number)
    }
}

/// A parliamentary question, keyed by its question number.
///
/// New-style numbers look like `55001234P`; legacy `P1234` numbers are
/// namespaced by the session (`52P1234`) before they reach the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub session: u32,
    pub number: String,
}

impl Question {
    pub fn source_url(&self) -> String {
        format!(
            "https://www.dekamer.be/kvvcr/showpage.cfm?section=inqo&language=nl&cfm=inqoXml.cfm?db=INQO&legislat={}&dossierID=Q{}",
            self.session, self.number
        )
    }
}

impl Entity for Question {
    fn create(session: u32, number: &str) -> Self {
        Self {
            session,
            number: number.to_string(),
        }
    }

    fn number(&self) -> &str {
        &self.number
    }

    fn uri(&self) -> String {
        format!("questions/{}.json", self.number)
    }
}

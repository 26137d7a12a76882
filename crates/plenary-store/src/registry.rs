//! Session-wide registries of bills and questions.
//!
//! Extraction workers for different meetings run concurrently and often cite
//! the same bill. A registry guarantees one shared entity per
//! `(session, number)`: the lookup and the insert happen under one lock.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};

use plenary_core::{Document, Entity, EntityRegistry, Question};
use tracing::debug;

/// Thread-safe get-or-create store for entities of one kind.
pub struct Registry<E: Entity> {
    entries: Mutex<HashMap<(u32, String), Arc<E>>>,
}

/// Registry of legislative documents.
pub type DocumentRegistry = Registry<Document>;

/// Registry of parliamentary questions.
pub type QuestionRegistry = Registry<Question>;

impl<E: Entity> Default for Registry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Registry<E> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(u32, String), Arc<E>>> {
        // A panicking worker cannot leave the map half-updated: the insert
        // is a single call. Keep serving the other workers.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// All entities of a session, ordered by number.
    pub fn snapshot(&self, session: u32) -> Vec<Arc<E>> {
        let entries = self.lock();
        let mut out: Vec<Arc<E>> = entries
            .iter()
            .filter(|((s, _), _)| *s == session)
            .map(|(_, e)| Arc::clone(e))
            .collect();
        out.sort_by(|a, b| a.number().cmp(b.number()));
        out
    }

    /// `{number: uri}` for every entity of a session.
    pub fn index(&self, session: u32, base_uri: &str) -> BTreeMap<String, String> {
        self.snapshot(session)
            .iter()
            .map(|e| (e.number().to_string(), format!("{base_uri}{}", e.uri())))
            .collect()
    }
}

impl<E: Entity> EntityRegistry<E> for Registry<E> {
    fn get_or_create(&self, session: u32, number: &str) -> Arc<E> {
        let mut entries = self.lock();
        let entity = entries
            .entry((session, number.to_string()))
            .or_insert_with(|| {
                debug!(session, number, "registering entity");
                Arc::new(E::create(session, number))
            });
        Arc::clone(entity)
    }
}

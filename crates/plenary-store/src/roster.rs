//! Session member roster loaded from JSON.
//!
//! The roster is the canonical member list of a session:
//!
//! ```json
//! [{"id": "…", "first_name": "Björn", "last_name": "Anseeuw", "party": "N-VA"}]
//! ```
//!
//! Vote lists print `Last First`; author lines print `Last First, Party`
//! fragments. [`Roster::resolve`] accepts both and caches every answer,
//! including misses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use once_cell::sync::Lazy;
use plenary_core::text::normalize;
use plenary_core::{Member, MemberResolver};
use regex::Regex;
use tracing::{debug, info};

use crate::StoreError;

/// `Last First, Other Name Party`: the last token is the party.
static AUTHOR_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+, .+) (\S+)$").expect("valid regex"));

/// Canonical members of one session with a memoising name resolver.
pub struct Roster {
    members: Vec<Arc<Member>>,
    /// Normalised lowercase `last first` → member.
    by_listed_name: HashMap<String, Arc<Member>>,
    cache: Mutex<HashMap<String, Option<Arc<Member>>>>,
}

fn key(name: &str) -> String {
    normalize(&name.replace('-', " ")).to_lowercase()
}

impl Roster {
    pub fn new(members: Vec<Member>) -> Result<Self, StoreError> {
        let members: Vec<Arc<Member>> = members.into_iter().map(Arc::new).collect();
        let mut seen = std::collections::HashSet::new();
        let mut by_listed_name = HashMap::new();
        for member in &members {
            if !seen.insert(member.id.as_str()) {
                return Err(StoreError::Other(format!(
                    "duplicate member id in roster: {}",
                    member.id
                )));
            }
            by_listed_name
                .entry(key(&member.listed_name()))
                .or_insert_with(|| Arc::clone(member));
        }
        Ok(Self {
            members,
            by_listed_name,
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// Load a roster from a JSON array of members.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::RosterNotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        let members: Vec<Member> = serde_json::from_str(&raw)?;
        let roster = Self::new(members)?;
        info!(path = %path.display(), members = roster.len(), "loaded roster");
        Ok(roster)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn lookup(&self, raw_name: &str) -> Option<Arc<Member>> {
        if let Some(member) = self.by_listed_name.get(&key(raw_name)) {
            return Some(Arc::clone(member));
        }
        if let Some(member) = self.members.iter().find(|m| m.has_name(raw_name)) {
            return Some(Arc::clone(member));
        }

        // Author lines: "Anseeuw Björn, Loones Sander N-VA" style fragments.
        let stripped = raw_name.replace(" CD&V -", "");
        let stripped = stripped.trim_end_matches(',').trim();
        let caps = AUTHOR_SHAPE.captures(stripped)?;
        let names = caps.get(1)?.as_str();
        names
            .split(',')
            .map(str::trim)
            .find_map(|name| self.by_listed_name.get(&key(name)))
            .map(Arc::clone)
    }
}

impl MemberResolver for Roster {
    fn resolve(&self, raw_name: &str) -> Option<Arc<Member>> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(hit) = cache.get(raw_name) {
            return hit.clone();
        }
        let found = self.lookup(raw_name);
        if found.is_none() {
            debug!(name = raw_name, "name not in roster");
        }
        cache.insert(raw_name.to_string(), found.clone());
        found
    }

    fn members(&self) -> Vec<Arc<Member>> {
        self.members.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn roster() -> Roster {
        Roster::new(vec![
            Member::new("m-1", "Björn", "Anseeuw", "N-VA"),
            Member::new("m-2", "Jean-Marc", "Delizée", "PS"),
            Member::new("m-3", "Sander", "Loones", "N-VA"),
        ])
        .unwrap()
    }

    #[test]
    fn resolves_listed_name() {
        let r = roster();
        assert_eq!(r.resolve("Anseeuw Björn").unwrap().id, "m-1");
        assert_eq!(r.resolve("anseeuw bjorn").unwrap().id, "m-1");
    }

    #[test]
    fn resolves_first_last_order() {
        assert_eq!(roster().resolve("Björn Anseeuw").unwrap().id, "m-1");
    }

    #[test]
    fn resolves_hyphenated_names() {
        assert_eq!(roster().resolve("Delizée Jean Marc").unwrap().id, "m-2");
    }

    #[test]
    fn resolves_author_shape() {
        let r = roster();
        assert_eq!(r.resolve("Loones Sander, Anseeuw Björn N-VA,").unwrap().id, "m-3");
    }

    #[test]
    fn unknown_name_is_none_and_cached() {
        let r = roster();
        assert!(r.resolve("Nobody Here").is_none());
        assert!(r.resolve("Nobody Here").is_none());
        assert_eq!(r.cache.lock().unwrap().len(), 1);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = Roster::new(vec![
            Member::new("m-1", "A", "B", ""),
            Member::new("m-1", "C", "D", ""),
        ]);
        assert!(matches!(err, Err(StoreError::Other(_))));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "m-1", "first_name": "Björn", "last_name": "Anseeuw"}}]"#
        )
        .unwrap();
        let r = Roster::load(file.path()).unwrap();
        assert_eq!(r.len(), 1);
        assert_eq!(r.members()[0].party, "");
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Roster::load(&dir.path().join("roster.json"));
        assert!(matches!(err, Err(StoreError::RosterNotFound(_))));
    }

    #[test]
    fn load_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(matches!(Roster::load(file.path()), Err(StoreError::Json(_))));
    }
}

//! Members of parliament and the resolver seam used to identify them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::text::normalize;

/// A member of the House within one session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    /// Stable identifier (uuid string) used in member URIs.
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub party: String,
}

impl Member {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        party: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            party: party.into(),
        }
    }

    /// `first last`, as printed in topic titles.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// `last first`, as printed in vote name lists.
    pub fn listed_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }

    /// Lowercased, diacritic-free `first last`, used for mention matching.
    pub fn normalized_name(&self) -> String {
        normalize(&self.full_name()).to_lowercase()
    }

    /// `true` if `query` names this member in either order, ignoring case,
    /// diacritics and hyphens.
    pub fn has_name(&self, query: &str) -> bool {
        let fold = |s: &str| normalize(&s.replace('-', " ")).to_lowercase();
        let query = fold(query);
        query == fold(&self.full_name()) || query == fold(&self.listed_name())
    }

    pub fn uri(&self) -> String {
        format!("members/{}.json", self.id)
    }
}

/// Resolves raw names from transcripts to canonical members.
///
/// Implementations are shared between extraction workers and must be safe
/// to call concurrently.
pub trait MemberResolver: Send + Sync {
    /// Resolve a raw name as printed in a vote list.
    fn resolve(&self, raw_name: &str) -> Option<Arc<Member>>;

    /// Every member of the session, for mention scanning.
    fn members(&self) -> Vec<Arc<Member>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> Member {
        Member::new("m-1", "Björn", "Anseeuw", "N-VA")
    }

    #[test]
    fn names_in_both_orders() {
        let m = member();
        assert_eq!(m.full_name(), "Björn Anseeuw");
        assert_eq!(m.listed_name(), "Anseeuw Björn");
        assert_eq!(m.normalized_name(), "bjorn anseeuw");
    }

    #[test]
    fn has_name_ignores_case_and_diacritics() {
        let m = member();
        assert!(m.has_name("anseeuw bjorn"));
        assert!(m.has_name("BJÖRN ANSEEUW"));
        assert!(!m.has_name("Anseeuw Bart"));
    }

    #[test]
    fn has_name_ignores_hyphens() {
        let m = Member::new("m-2", "Jean-Marc", "Delizée", "PS");
        assert!(m.has_name("Delizée Jean Marc"));
    }

    #[test]
    fn uri_uses_id() {
        assert_eq!(member().uri(), "members/m-1.json");
    }
}

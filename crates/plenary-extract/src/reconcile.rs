//! Reconciliation of name lists with reported tallies.

use std::sync::Arc;

use plenary_core::{Choice, Member, MemberResolver, Vote};
use tracing::warn;

use crate::names::NameLists;

/// Resolve `names` and attach them to `vote`.
///
/// Unresolved names are dropped. Each choice's count becomes the resolved
/// list length; a gap above `tolerance` marks the vote unsure. Returns the
/// resolved `(member, choice)` pairs, empty for votes without name lists.
pub fn reconcile(
    vote: &mut Vote,
    names: &NameLists,
    resolver: &dyn MemberResolver,
    tolerance: u32,
) -> Vec<(Arc<Member>, Choice)> {
    let Some(tally) = vote.roll_call_mut() else {
        return Vec::new();
    };
    let vote_number = tally.vote_number;

    let mut cast = Vec::new();
    for (choice, raw) in [
        (Choice::Yes, &names.yes),
        (Choice::No, &names.no),
        (Choice::Abstention, &names.abstention),
    ] {
        let members: Vec<Arc<Member>> = raw
            .iter()
            .filter_map(|name| {
                let found = resolver.resolve(name);
                if found.is_none() {
                    warn!(vote = vote_number, %choice, name = %name, "unresolved member name");
                }
                found
            })
            .collect();
        cast.extend(members.iter().map(|m| (Arc::clone(m), choice)));
        tally.set_voters(choice, members, tolerance);
    }
    cast
}

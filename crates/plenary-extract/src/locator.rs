//! Vote markers in the transcript body and the side index.
//!
//! The body marks each vote table with `(Stemming/vote N)` or
//! `(Vote/stemming N)`. Name lists and electronic tallies live in the side
//! index (`div.Section3`), keyed by the same vote number.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use plenary_core::{Language, Vote};
use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::debug;

use crate::ExtractError;
use crate::names::{HeaderRun, NameLists, header_run, name_lists};
use crate::shape::{electronic_vote, roll_call_vote};
use crate::transcript::{
    SECTION3, agenda_item, enclosing, header_number, is, next_element, parent_element, table_cells,
    table_rows, text_nodes,
};

static BODY_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(Stemming/vote|Vote/stemming)\s+([0-9]+)").expect("valid regex"));

static INDEX_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?P<named>Vote\s*nominatif\s*-\s*Naamstemming:|Naamstemming\s*-\s*Vote\s*nominatif:)",
        r"|(?P<electronic>Comptage\s*électronique\s*[–-]\s*Elektronische telling:)",
    ))
    .expect("valid regex")
});

/// Per-vote material gathered from the side index.
#[derive(Debug, Default)]
pub(crate) struct SideIndex<'a> {
    pub named: HashMap<u32, NameLists>,
    /// First tally table of each electronic vote.
    pub electronic: HashMap<u32, ElementRef<'a>>,
    pub cancelled: HashSet<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerKind {
    Named,
    Electronic,
}

impl<'a> SideIndex<'a> {
    /// Collect markers of the side index in document order.
    pub(crate) fn build(html: &'a Html) -> Self {
        let mut index = Self::default();
        let Some(section) = html.select(&SECTION3).next() else {
            debug!("transcript has no side index");
            return index;
        };

        let mut markers: Vec<(MarkerKind, ElementRef<'a>)> = Vec::new();
        for (parent, text) in text_nodes(section) {
            let Some(caps) = INDEX_MARKER.captures(text) else {
                continue;
            };
            let kind = if caps.name("named").is_some() {
                MarkerKind::Named
            } else {
                MarkerKind::Electronic
            };
            let Some(header) = enclosing(parent, "p") else {
                continue;
            };
            // A marker split over several text nodes of one paragraph.
            if markers.last().is_some_and(|(_, last)| last.id() == header.id()) {
                continue;
            }
            markers.push((kind, header));
        }

        let (mut named_seen, mut electronic_seen) = (0u32, 0u32);
        for (i, (kind, header)) in markers.iter().enumerate() {
            let header = *header;
            // Fallback numbering counts markers of the same kind.
            let position = match kind {
                MarkerKind::Named => &mut named_seen,
                MarkerKind::Electronic => &mut electronic_seen,
            };
            let vote_number = header_number(header).unwrap_or(*position);
            *position += 1;

            match (header_run(header), kind) {
                (HeaderRun::Cancelled, _) => {
                    debug!(vote = vote_number, ?kind, "vote cancelled");
                    index.cancelled.insert(vote_number);
                }
                (HeaderRun::Missing, _) => debug!(vote = vote_number, ?kind, "vote header without table"),
                (HeaderRun::Table(table), MarkerKind::Named) => {
                    let next_marker = markers.get(i + 1).map(|(_, h)| *h);
                    index
                        .named
                        .insert(vote_number, name_lists(header, table, next_marker));
                }
                (HeaderRun::Table(table), MarkerKind::Electronic) => {
                    index.electronic.insert(vote_number, table);
                }
            }
        }

        debug!(
            named = index.named.len(),
            electronic = index.electronic.len(),
            cancelled = index.cancelled.len(),
            "side index"
        );
        index
    }
}

/// A vote found in the transcript body, ready to attach to its topic.
#[derive(Debug, Clone)]
pub(crate) struct LocatedVote {
    pub item: u32,
    pub vote: Vote,
    pub names: Option<NameLists>,
}

/// Agenda item of `anchor`, checked in both languages.
fn owning_item(anchor: ElementRef<'_>, vote: u32) -> Result<Option<u32>, ExtractError> {
    let fr = agenda_item(anchor, Language::Fr);
    let nl = agenda_item(anchor, Language::Nl);
    if fr != nl {
        return Err(ExtractError::AgendaItemMismatch { vote, fr, nl });
    }
    Ok(fr)
}

fn ancestor(el: ElementRef<'_>, levels: usize) -> Option<ElementRef<'_>> {
    (0..levels).try_fold(el, |current, _| parent_element(current))
}

/// Resolve one body marker into a vote.
///
/// `Ok(None)` means the marker is not a vote this extractor understands;
/// `Err` is a structural inconsistency worth reporting.
fn locate(
    marker_parent: ElementRef<'_>,
    vote_number: u32,
    index: &SideIndex<'_>,
    depth: usize,
) -> Result<Option<LocatedVote>, ExtractError> {
    if index.cancelled.contains(&vote_number) {
        debug!(vote = vote_number, "skipping cancelled vote");
        return Ok(None);
    }

    if let Some(table) = index.electronic.get(&vote_number) {
        let Some(anchor) = enclosing(marker_parent, "p") else {
            return Err(ExtractError::Structure {
                vote: vote_number,
                reason: "electronic vote marker outside a paragraph".to_string(),
            });
        };
        let Some(item) = owning_item(anchor, vote_number)? else {
            return Ok(None);
        };
        let yes = table_cells(*table);
        let no = next_element(*table)
            .and_then(next_element)
            .filter(|el| is(*el, "table"))
            .map(table_cells);
        let vote = electronic_vote(vote_number, &yes, no.as_deref()).ok_or_else(|| {
            ExtractError::Structure {
                vote: vote_number,
                reason: "electronic tally table without a count".to_string(),
            }
        })?;
        return Ok(Some(LocatedVote {
            item,
            vote,
            names: None,
        }));
    }

    // The marker text node is the first level.
    let Some(table) = ancestor(marker_parent, depth.saturating_sub(1)).filter(|el| is(*el, "table"))
    else {
        debug!(vote = vote_number, "vote marker not inside a vote table");
        return Ok(None);
    };
    let Some(item) = owning_item(table, vote_number)? else {
        debug!(vote = vote_number, "vote table without agenda item");
        return Ok(None);
    };
    let Some(vote) = roll_call_vote(vote_number, &table_rows(table)) else {
        return Ok(None);
    };
    Ok(Some(LocatedVote {
        item,
        vote,
        names: index.named.get(&vote_number).cloned(),
    }))
}

/// Every vote marked in the transcript body, in document order.
pub(crate) fn locate_votes(html: &Html, depth: usize) -> Vec<Result<LocatedVote, ExtractError>> {
    let index = SideIndex::build(html);
    text_nodes(html.root_element())
        .filter_map(|(parent, text)| {
            let caps = BODY_MARKER.captures(text)?;
            let vote_number = caps.get(2)?.as_str().parse::<u32>().ok()?;
            locate(parent, vote_number, &index, depth).transpose()
        })
        .collect()
}

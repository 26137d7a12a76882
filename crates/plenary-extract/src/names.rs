//! Voter name lists of roll-call votes.
//!
//! In the side index (`div.Section3`) every roll-call vote is laid out as
//!
//! ```text
//! <p>Vote nominatif - Naamstemming: 004</p>
//! <table>Oui | 080 | Ja</table>
//! <p>names, ...</p> ...
//! <table>Non | 050 | Nee</table>
//! <p>names, ...</p> ...
//! <table>Abstentions | 003 | Onthoudingen</table>   (optional)
//! <p>names, ...</p> ...
//! <p>Vote nominatif - Naamstemming: 005</p>
//! ```
//!
//! Lists run until the next table or the next vote header.

use plenary_core::text::split_names;
use scraper::ElementRef;

use crate::transcript::{cleaned, is, next_element, parent_element, previous_element, raw_text};

/// Raw candidate names per choice, not yet resolved to members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameLists {
    pub yes: Vec<String>,
    pub no: Vec<String>,
    pub abstention: Vec<String>,
}

/// What follows a vote header up to its first table.
#[derive(Debug, Clone, Copy)]
pub(crate) enum HeaderRun<'a> {
    /// The header block announces the vote was annulled.
    Cancelled,
    /// First table after the header.
    Table(ElementRef<'a>),
    /// No table follows the header.
    Missing,
}

/// Walk from the header to the first table, watching for cancellation.
///
/// `annulé` and `42.5` (the quorum article) mark a cancelled vote. Raw text
/// is checked since cleaning drops the full stop.
pub(crate) fn header_run(header: ElementRef<'_>) -> HeaderRun<'_> {
    let mut current = Some(header);
    while let Some(el) = current {
        if is(el, "table") {
            return HeaderRun::Table(el);
        }
        let text = raw_text(el).to_lowercase();
        if text.contains("annulé") || text.contains("42.5") {
            return HeaderRun::Cancelled;
        }
        current = next_element(el);
    }
    HeaderRun::Missing
}

/// Tables end a list, and so does the header of the next vote of either kind.
fn is_stop(el: ElementRef<'_>) -> bool {
    if is(el, "table") {
        return true;
    }
    let text = raw_text(el).to_lowercase();
    text.contains("naamstemming") || text.contains("elektronische telling")
}

/// Names from `start` forward up to a stop element, and that element.
fn collect_forward(start: Option<ElementRef<'_>>) -> (Vec<String>, Option<ElementRef<'_>>) {
    let mut buffer = Vec::new();
    let mut current = start;
    while let Some(el) = current {
        if is_stop(el) {
            return (split_names(&buffer.join(",")), Some(el));
        }
        let text = cleaned(el);
        if !text.is_empty() {
            buffer.push(text);
        }
        current = next_element(el);
    }
    (split_names(&buffer.join(",")), None)
}

/// Names from `start` backward down to a stop element.
fn collect_backward(start: Option<ElementRef<'_>>) -> Vec<String> {
    let mut buffer = Vec::new();
    let mut current = start;
    while let Some(el) = current {
        if is_stop(el) {
            break;
        }
        let text = cleaned(el);
        if !text.is_empty() {
            buffer.push(text);
        }
        current = previous_element(el);
    }
    buffer.reverse();
    split_names(&buffer.join(","))
}

/// Read the yes, no and abstention lists following `table`.
///
/// `next_marker` is the header of the following vote of either kind;
/// abstentions are read backwards from just before it, or from the last
/// element of the index when this is the last vote.
pub(crate) fn name_lists<'a>(
    header: ElementRef<'a>,
    table: ElementRef<'a>,
    next_marker: Option<ElementRef<'a>>,
) -> NameLists {
    let (yes, stop) = collect_forward(next_element(table));
    let (no, stop) = collect_forward(stop.and_then(next_element));

    let announces_abstentions = stop.is_some_and(|el| {
        let text = raw_text(el).to_lowercase();
        text.contains("onthoudingen") || text.contains("abstentions")
    });
    let abstention = if announces_abstentions {
        let end = match next_marker {
            Some(next) => previous_element(next),
            None => parent_element(header)
                .and_then(|parent| parent.children().filter_map(ElementRef::wrap).last()),
        };
        collect_backward(end)
    } else {
        Vec::new()
    };

    NameLists { yes, no, abstention }
}

//! Agenda-item segmentation of title paragraphs.
//!
//! A topic title can span several paragraphs; only the first carries the
//! item number. Lines are consumed from the end of the document so that
//! continuation lines are seen before the numbered line that owns them.

use std::sync::Arc;

use plenary_core::Member;
use plenary_core::text::{is_office_comment, normalize};
use tracing::debug;

use crate::transcript::TitleLine;

/// One agenda item as found in a single language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub item: u32,
    /// Title lines joined with `\n`, numbered line first.
    pub title: String,
    pub section: Option<String>,
    /// The item number was not printed and had to be made up.
    pub synthesized: bool,
}

enum State {
    /// Collecting un-numbered lines, walking upwards from `line`.
    MergingContinuation {
        buffer: Vec<String>,
        line: TitleLine,
    },
    /// The run has no numbered line; `line` is its topmost line.
    SynthesizingId { line: TitleLine },
    /// A numbered line anchors the run.
    ItemComplete {
        item: u32,
        heading: String,
        buffer: Vec<String>,
        section: Option<String>,
    },
}

enum Step {
    Emit(Segment),
    Continue(State),
    /// Lines ran out in the middle of a run.
    Exhausted,
}

/// Reverse walk over the title lines of one language.
pub struct Segmenter {
    lines: Vec<TitleLine>,
    last_item: u32,
}

impl Segmenter {
    /// `lines` in document order.
    pub fn new(lines: Vec<TitleLine>) -> Self {
        Self { lines, last_item: 1 }
    }

    fn step(&mut self, state: State) -> Step {
        match state {
            State::MergingContinuation { mut buffer, line } => {
                if let Some((item, heading)) = line.numbered() {
                    let heading = heading.to_string();
                    return Step::Continue(State::ItemComplete {
                        item,
                        heading,
                        buffer,
                        section: line.section,
                    });
                }
                if !line.text.is_empty() {
                    buffer.insert(0, line.text.clone());
                }
                if !line.continues_title {
                    return Step::Continue(State::SynthesizingId { line });
                }
                match self.lines.pop() {
                    Some(previous) => Step::Continue(State::MergingContinuation {
                        buffer,
                        line: previous,
                    }),
                    None => {
                        debug!(lines = buffer.len(), "title run without item number at document start");
                        Step::Exhausted
                    }
                }
            }
            State::SynthesizingId { line } => {
                self.last_item += 1;
                debug!(item = self.last_item, title = %line.text, "synthesized agenda item number");
                Step::Emit(Segment {
                    item: self.last_item,
                    title: line.text,
                    section: line.section,
                    synthesized: true,
                })
            }
            State::ItemComplete {
                item,
                heading,
                buffer,
                section,
            } => {
                self.last_item = item;
                let title = std::iter::once(heading)
                    .chain(buffer)
                    .collect::<Vec<_>>()
                    .join("\n")
                    .trim_end()
                    .to_string();
                Step::Emit(Segment {
                    item,
                    title,
                    section,
                    synthesized: false,
                })
            }
        }
    }
}

impl Iterator for Segmenter {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let line = loop {
            let line = self.lines.pop()?;
            if !line.text.is_empty() && !is_office_comment(&line.text) {
                break line;
            }
        };
        let mut state = State::MergingContinuation {
            buffer: Vec::new(),
            line,
        };
        loop {
            match self.step(state) {
                Step::Emit(segment) => return Some(segment),
                Step::Continue(next) => state = next,
                Step::Exhausted => return None,
            }
        }
    }
}

/// Members whose normalised full name occurs in `title`.
///
/// Plain substring matching: short or common names give false positives.
pub fn mentioned_members(title: &str, members: &[Arc<Member>]) -> Vec<Arc<Member>> {
    let haystack = normalize(title).to_lowercase();
    members
        .iter()
        .filter(|m| {
            let name = m.normalized_name();
            !name.is_empty() && haystack.contains(&name)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str, continues_title: bool) -> TitleLine {
        TitleLine {
            text: text.to_string(),
            continues_title,
            section: Some("Wetsontwerpen".to_string()),
        }
    }

    #[test]
    fn numbered_lines_become_items() {
        let segments: Vec<_> = Segmenter::new(vec![line("1 Eerste", false), line("2 Tweede", false)]).collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].item, 2);
        assert_eq!(segments[0].title, "Tweede");
        assert_eq!(segments[1].item, 1);
        assert!(!segments[1].synthesized);
    }

    #[test]
    fn continuation_lines_merge_under_numbered_line() {
        let segments: Vec<_> = Segmenter::new(vec![
            line("3 Wetsontwerp", false),
            line("(1234/1-3)", true),
            line("Verslag", true),
        ])
        .collect();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].item, 3);
        assert_eq!(segments[0].title, "Wetsontwerp\n(1234/1-3)\nVerslag");
    }

    #[test]
    fn empty_and_comment_lines_are_skipped() {
        let segments: Vec<_> = Segmenter::new(vec![
            line("4 Motie", false),
            line("", false),
            line("<![if !supportEmptyParas]>", false),
        ])
        .collect();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].item, 4);
    }

    #[test]
    fn missing_number_is_synthesized_from_counter() {
        let segments: Vec<_> = Segmenter::new(vec![
            line("7 Voorgaand punt", false),
            line("Vraag zonder nummer", false),
        ])
        .collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].item, 2);
        assert!(segments[0].synthesized);
        assert_eq!(segments[0].title, "Vraag zonder nummer");
        assert_eq!(segments[1].item, 7);
    }

    #[test]
    fn counter_follows_last_numbered_item() {
        let segments: Vec<_> = Segmenter::new(vec![
            line("Zonder nummer", false),
            line("9 Genummerd", false),
        ])
        .collect();
        assert_eq!(segments[0].item, 9);
        assert_eq!(segments[1].item, 10);
    }

    #[test]
    fn run_without_anchor_at_document_start_is_discarded() {
        let segments: Vec<_> = Segmenter::new(vec![line("los", true), line("nog los", true)]).collect();
        assert!(segments.is_empty());
    }

    #[test]
    fn item_numbers_are_unique_for_well_formed_input() {
        let lines: Vec<_> = (1..=20).map(|i| line(&format!("{i} Punt {i}"), false)).collect();
        let mut items: Vec<u32> = Segmenter::new(lines).map(|s| s.item).collect();
        items.sort_unstable();
        items.dedup();
        assert_eq!(items.len(), 20);
    }

    #[test]
    fn mentions_ignore_case_and_diacritics() {
        let members = vec![
            Arc::new(Member::new("m-1", "Björn", "Anseeuw", "N-VA")),
            Arc::new(Member::new("m-2", "Kristof", "Calvo", "Groen")),
        ];
        let found = mentioned_members("Vraag van BJORN Anseeuw aan de minister", &members);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "m-1");
    }
}

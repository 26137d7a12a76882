//! Vote table shapes.
//!
//! Tables arrive as cleaned cell texts per row, spacer rows already removed.
//!
//! | Shape           | Rows | Tallies                                       |
//! |-----------------|------|-----------------------------------------------|
//! | generic         | 5, or 6 with a blank last row | rows 1-3: yes, no, abstention |
//! | language group  | 6    | rows 2-4; column 1 is FR, column 3 is NL      |
//! | electronic      | one table per tally | yes, then no if a second table follows |

use plenary_core::text::{is_banned_or_empty, is_office_comment, parse_count};
use plenary_core::{ElectronicAdvisoryVote, ElectronicGenericVote, GenericVote, LanguageGroupVote, Vote};
use tracing::{debug, warn};

fn is_blank(row: &[String]) -> bool {
    let text = row.join(" ");
    let text = text.trim();
    text.is_empty() || is_office_comment(text)
}

/// The tally of a `label | count | label` row: its first numeric cell.
fn row_count(row: &[String]) -> Option<u32> {
    row.iter().find_map(|cell| parse_count(cell))
}

/// Parse a roll-call table, or decline when its shape is not recognised.
pub fn roll_call_vote(vote_number: u32, rows: &[Vec<String>]) -> Option<Vote> {
    match rows.len() {
        5 => generic_vote(vote_number, rows).map(Vote::General),
        6 if is_blank(&rows[5]) => generic_vote(vote_number, rows).map(Vote::General),
        6 => language_group_vote(vote_number, rows).map(Vote::LanguageGroup),
        n => {
            debug!(vote = vote_number, rows = n, "unrecognised vote table shape");
            None
        }
    }
}

/// Yes/no/abstention from rows 1 to 3.
pub fn generic_vote(vote_number: u32, rows: &[Vec<String>]) -> Option<GenericVote> {
    let mut counts = rows.iter().skip(1).take(3).map(|row| row_count(row));
    let (yes, no, abstention) = (counts.next()??, counts.next()??, counts.next()??);
    Some(GenericVote::new(vote_number, yes, no, abstention))
}

/// Per-community tallies from rows 2 to 4.
pub fn language_group_vote(vote_number: u32, rows: &[Vec<String>]) -> Option<LanguageGroupVote> {
    let cell = |row: usize, column: usize| -> Option<u32> {
        let text = rows.get(row)?.get(column)?;
        if is_banned_or_empty(text) {
            return None;
        }
        parse_count(text)
    };
    let tallies = |column: usize| -> Option<(u32, u32, u32)> {
        Some((cell(2, column)?, cell(3, column)?, cell(4, column)?))
    };

    let (Some(fr), Some(nl)) = (tallies(1), tallies(3)) else {
        warn!(vote = vote_number, "invalid language group vote table");
        return None;
    };
    Some(LanguageGroupVote::new(
        vote_number,
        GenericVote::new(vote_number, nl.0, nl.1, nl.2),
        GenericVote::new(vote_number, fr.0, fr.1, fr.2),
    ))
}

/// Electronic tally: `yes` table, and a `no` table when one follows.
pub fn electronic_vote(vote_number: u32, yes: &[String], no: Option<&[String]>) -> Option<Vote> {
    let yes = yes.iter().find_map(|cell| parse_count(cell))?;
    match no.map(|cells| cells.iter().find_map(|cell| parse_count(cell))) {
        None => Some(Vote::ElectronicAdvisory(ElectronicAdvisoryVote::new(vote_number, yes))),
        Some(Some(no)) => Some(Vote::ElectronicGeneric(ElectronicGenericVote::new(
            vote_number,
            yes,
            no,
        ))),
        Some(None) => {
            debug!(vote = vote_number, "electronic no-table without a tally");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(cells: &[&[&str]]) -> Vec<Vec<String>> {
        cells
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn five_row_table_is_generic() {
        let table = rows(&[
            &["(Stemming/vote 1)", ""],
            &["", "Ja", "88"],
            &["", "Nee", "42"],
            &["", "Onthoudingen", "3"],
            &["", "Totaal", "133"],
        ]);
        let vote = roll_call_vote(1, &table).unwrap();
        let Vote::General(generic) = &vote else {
            panic!("expected a generic vote");
        };
        assert_eq!((generic.yes, generic.no, generic.abstention), (88, 42, 3));
        assert!(vote.passed());
    }

    #[test]
    fn label_count_label_rows() {
        let table = rows(&[
            &["(Vote/stemming 4)"],
            &["Oui", "070", "Ja"],
            &["Non", "060", "Nee"],
            &["Abstentions", "012", "Onthoudingen"],
            &["Total", "142", "Totaal"],
        ]);
        let Some(Vote::General(vote)) = roll_call_vote(4, &table) else {
            panic!("expected a generic vote");
        };
        assert_eq!(vote.yes, 70);
        assert!(!vote.passed());
    }

    #[test]
    fn six_rows_with_blank_last_row_is_generic() {
        let table = rows(&[
            &["(Stemming/vote 2)"],
            &["Oui", "10", "Ja"],
            &["Non", "2", "Nee"],
            &["Abstentions", "0", "Onthoudingen"],
            &["Total", "12", "Totaal"],
            &["", ""],
        ]);
        assert!(matches!(roll_call_vote(2, &table), Some(Vote::General(_))));
    }

    #[test]
    fn six_substantive_rows_is_language_group() {
        let table = rows(&[
            &["(Stemming/vote 3)"],
            &["", "FR", "", "NL"],
            &["Oui", "40", "Ja", "50"],
            &["Non", "10", "Nee", "20"],
            &["Abstentions", "5", "Onthoudingen", "5"],
            &["Total", "55", "Totaal", "75"],
        ]);
        let Some(Vote::LanguageGroup(vote)) = roll_call_vote(3, &table) else {
            panic!("expected a language group vote");
        };
        assert_eq!(vote.fr.yes, 40);
        assert_eq!(vote.nl.no, 20);
        assert_eq!(vote.total.yes, 90);
        assert!(vote.passed());
    }

    #[test]
    fn language_group_fails_when_one_community_rejects() {
        let table = rows(&[
            &["x"],
            &["", "FR", "", "NL"],
            &["Oui", "10", "Ja", "50"],
            &["Non", "40", "Nee", "20"],
            &["Abstentions", "5", "Onthoudingen", "5"],
            &["Total", "55", "Totaal", "75"],
        ]);
        let vote = roll_call_vote(3, &table).unwrap();
        assert!(!vote.passed());
    }

    #[test]
    fn language_group_with_blank_cell_is_declined() {
        let table = rows(&[
            &["x"],
            &["", "FR", "", "NL"],
            &["Oui", "", "Ja", "50"],
            &["Non", "40", "Nee", "20"],
            &["Abstentions", "5", "Onthoudingen", "5"],
            &["Total", "55", "Totaal", "75"],
        ]);
        assert!(roll_call_vote(3, &table).is_none());
    }

    #[test]
    fn missing_count_voids_the_vote() {
        let table = rows(&[
            &["(Stemming/vote 5)"],
            &["Oui", "", "Ja"],
            &["Non", "", "Nee"],
            &["Abstentions", "", "Onthoudingen"],
            &["Total", "", "Totaal"],
        ]);
        assert!(roll_call_vote(5, &table).is_none());
    }

    #[test]
    fn other_row_counts_are_declined() {
        let table = rows(&[&["a"], &["b"], &["c"], &["d"]]);
        assert!(roll_call_vote(6, &table).is_none());
        let long = rows(&[&["a"], &["b"], &["c"], &["d"], &["e"], &["f"], &["g"]]);
        assert!(roll_call_vote(6, &long).is_none());
    }

    #[test]
    fn electronic_shapes() {
        let yes = vec!["Oui".to_string(), "080".to_string(), "Ja".to_string()];
        let no = vec!["Non".to_string(), "050".to_string(), "Nee".to_string()];

        let advisory = electronic_vote(7, &yes, None).unwrap();
        assert_eq!(advisory.kind(), "electronic_advisory");
        assert!(advisory.passed());

        let generic = electronic_vote(7, &yes, Some(no.as_slice())).unwrap();
        assert_eq!(generic.kind(), "electronic_generic");
        assert!(generic.passed());
    }
}

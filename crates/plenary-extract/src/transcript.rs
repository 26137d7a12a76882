//! DOM access for plenary transcripts.
//!
//! Transcripts are office-suite HTML exports. Structure is carried by
//! paragraph classes (`Titre1NL`, `Titre2FR`, ...) and by sibling order, not
//! by nesting, so most helpers here walk element siblings.

use once_cell::sync::Lazy;
use plenary_core::Language;
use plenary_core::text::clean_text;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

pub(crate) static P: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("valid selector"));
pub(crate) static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("valid selector"));
pub(crate) static TD: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("valid selector"));
pub(crate) static SECTION3: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.Section3").expect("valid selector"));

static TITLE_NL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p.Titre2NL").expect("valid selector"));
static TITLE_FR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p.Titre2FR").expect("valid selector"));

/// `<digits> <text>`: a numbered agenda-item title line.
static NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+) (.*)$").expect("valid regex"));

fn title_selector(language: Language) -> &'static Selector {
    match language {
        Language::Nl => &TITLE_NL,
        Language::Fr => &TITLE_FR,
    }
}

/// A title-level paragraph as the segmenter sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleLine {
    /// Cleaned paragraph text.
    pub text: String,
    /// The element right before this one is a title paragraph of the same
    /// language, so this line may continue it.
    pub continues_title: bool,
    /// Cleaned text of the nearest preceding section paragraph.
    pub section: Option<String>,
}

impl TitleLine {
    /// Split a numbered line into `(item, heading)`.
    pub fn numbered(&self) -> Option<(u32, &str)> {
        split_numbered(&self.text)
    }
}

pub(crate) fn split_numbered(text: &str) -> Option<(u32, &str)> {
    let caps = NUMBERED.captures(text)?;
    let item = caps.get(1)?.as_str().parse().ok()?;
    Some((item, caps.get(2)?.as_str()))
}

/// A parsed transcript.
///
/// Wraps the `scraper` tree, which is not `Send`: parse and extract on the
/// same thread.
pub struct Transcript {
    html: Html,
}

impl Transcript {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    pub(crate) fn html(&self) -> &Html {
        &self.html
    }

    /// Title paragraphs of one language in document order.
    pub fn title_lines(&self, language: Language) -> Vec<TitleLine> {
        let title_class = language.title_class();
        let section_class = language.section_class();
        self.html
            .select(title_selector(language))
            .map(|p| TitleLine {
                text: cleaned(p),
                continues_title: previous_element(p).is_some_and(|prev| has_class(prev, title_class)),
                section: p
                    .prev_siblings()
                    .filter_map(ElementRef::wrap)
                    .find(|e| is(*e, "p") && has_class(*e, section_class))
                    .map(cleaned),
            })
            .collect()
    }
}

// ── Element helpers ──

pub(crate) fn raw_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

pub(crate) fn cleaned(el: ElementRef<'_>) -> String {
    clean_text(&raw_text(el))
}

pub(crate) fn is(el: ElementRef<'_>, name: &str) -> bool {
    el.value().name() == name
}

pub(crate) fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

pub(crate) fn next_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

pub(crate) fn previous_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.prev_siblings().find_map(ElementRef::wrap)
}

pub(crate) fn parent_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.parent().and_then(ElementRef::wrap)
}

/// The element itself or its nearest ancestor named `name`.
pub(crate) fn enclosing<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    let mut current = Some(el);
    while let Some(e) = current {
        if is(e, name) {
            return Some(e);
        }
        current = parent_element(e);
    }
    None
}

/// Every text node under `root` with the element that contains it.
pub(crate) fn text_nodes<'a>(root: ElementRef<'a>) -> impl Iterator<Item = (ElementRef<'a>, &'a str)> {
    root.descendants().filter_map(|node| {
        let text = node.value().as_text()?;
        let parent = node.parent().and_then(ElementRef::wrap)?;
        Some((parent, &**text))
    })
}

/// Cleaned cell texts of every row of `table`, skipping spacer rows
/// (rows carrying a `height` attribute).
pub(crate) fn table_rows(table: ElementRef<'_>) -> Vec<Vec<String>> {
    table
        .select(&TR)
        .filter(|tr| tr.value().attr("height").is_none())
        .map(|tr| tr.select(&TD).map(cleaned).collect())
        .collect()
}

/// Cleaned cell texts of `table` in document order, ignoring rows.
pub(crate) fn table_cells(table: ElementRef<'_>) -> Vec<String> {
    table.select(&TD).map(cleaned).collect()
}

/// First all-digit token of the enclosing paragraph.
pub(crate) fn header_number(header: ElementRef<'_>) -> Option<u32> {
    cleaned(header)
        .split_whitespace()
        .find(|t| t.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|t| t.parse().ok())
}

/// Agenda item of the nearest preceding numbered title of `language`.
pub(crate) fn agenda_item(anchor: ElementRef<'_>, language: Language) -> Option<u32> {
    let class = language.title_class();
    anchor
        .prev_siblings()
        .filter_map(ElementRef::wrap)
        .filter(|e| is(*e, "p") && has_class(*e, class))
        .find_map(|e| split_numbered(&cleaned(e)).map(|(item, _)| item))
}

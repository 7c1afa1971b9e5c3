//! Locates the MD&A and Risk Factors sections of a filing's primary document.
//!
//! Filings are not structurally tagged, so the lookup is heuristic: the first
//! `h1`..`h6` heading whose text mentions the item number and a keyword marks
//! the start of a section, and the section runs through the heading's
//! following siblings up to the next heading of the same or a higher level.
//! Deeper subheadings inside the section are kept as text.

use std::fmt;

use scraper::{ElementRef, Html, Node};

const HEADINGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// The two sections the digest reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Item 7, Management's Discussion and Analysis.
    Mdna,
    /// Item 1A, Risk Factors.
    Risk,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Mdna, Section::Risk];

    /// Upper-cased fragments a heading must all contain.
    fn markers(self) -> [&'static str; 2] {
        match self {
            Section::Mdna => ["ITEM 7", "MANAGEMENT"],
            Section::Risk => ["ITEM 1A", "RISK"],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Mdna => "MD&A",
            Section::Risk => "Risk Factors",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Plain text of each section; empty when the section was not found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionTexts {
    pub mdna: String,
    pub risk: String,
}

impl SectionTexts {
    pub fn get(&self, section: Section) -> &str {
        match section {
            Section::Mdna => &self.mdna,
            Section::Risk => &self.risk,
        }
    }
}

/// Extracts the MD&A and Risk Factors text from filing HTML.
///
/// Malformed markup is parsed leniently; a section whose heading cannot be
/// found comes back as an empty string.
pub fn extract_section_texts(html: &str) -> SectionTexts {
    let document = Html::parse_document(html);

    let headings: Vec<(ElementRef<'_>, String)> = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| heading_level(el).is_some())
        .map(|el| {
            let text = collapse_whitespace(&el.text().collect::<Vec<_>>().join(" "));
            (el, text.to_uppercase())
        })
        .collect();

    let section_text = |section: Section| {
        let markers = section.markers();
        headings
            .iter()
            .find(|(_, text)| markers.iter().all(|m| text.contains(m)))
            .map(|(el, _)| collect_until_next_heading(*el))
            .unwrap_or_default()
    };

    let texts = SectionTexts {
        mdna: section_text(Section::Mdna),
        risk: section_text(Section::Risk),
    };
    tracing::debug!(
        "Extracted sections from {} headings: mdna={} chars, risk={} chars",
        headings.len(),
        texts.mdna.len(),
        texts.risk.len()
    );
    texts
}

/// 1 for `h1` through 6 for `h6`; `None` for anything else.
fn heading_level(el: &ElementRef<'_>) -> Option<usize> {
    let name = el.value().name();
    HEADINGS.iter().position(|h| *h == name).map(|i| i + 1)
}

fn collect_until_next_heading(start: ElementRef<'_>) -> String {
    let start_level = heading_level(&start).unwrap_or(1);
    let mut parts: Vec<String> = Vec::new();
    for sibling in start.next_siblings() {
        match sibling.value() {
            Node::Element(_) => {
                if let Some(el) = ElementRef::wrap(sibling) {
                    if heading_level(&el).is_some_and(|level| level <= start_level) {
                        break;
                    }
                    parts.push(el.text().collect::<Vec<_>>().join(" "));
                }
            }
            Node::Text(text) => parts.push(String::from(&**text)),
            _ => {}
        }
    }
    collapse_whitespace(&parts.join(" "))
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

//! Evaluation parser: splits one agent's free text into ordered sections.
//!
//! The input follows a loose template of numbered, bold headings:
//!
//! ```text
//! 1. **Experience Match**: Six years of backend work.
//! Mostly payments.
//! 2. **Fit Score**: 7/10
//! Final recommendation: **Yes**
//! ```
//!
//! Deviations never fail; text that does not fit simply yields fewer sections.

use crate::evaluation::grammar::{HEADING, RECOMMENDATION_CLAUSE};
use crate::evaluation::record::Section;

/// Parses raw evaluation text into sections in document order.
///
/// Text before the first heading is discarded. The trailing
/// "final recommendation: ..." clause is stripped from the last section,
/// since the decision banner already shows it.
pub fn parse(text: Option<&str>) -> Vec<Section> {
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        return Vec::new();
    };

    let mut sections = Vec::new();
    let mut open: Option<OpenSection> = None;

    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let mut cursor = 0;

        for caps in HEADING.captures_iter(line) {
            let (Some(marker), Some(title)) = (caps.get(0), caps.name("title")) else {
                continue;
            };

            if let Some(current) = open.as_mut() {
                current.append(&line[cursor..marker.start()]);
            }
            if let Some(done) = open.take() {
                done.flush_into(&mut sections);
            }

            open = Some(OpenSection::new(title.as_str()));
            cursor = marker.end();
        }

        if let Some(current) = open.as_mut() {
            current.append(&line[cursor..]);
        }
    }

    if let Some(done) = open.take() {
        done.flush_into(&mut sections);
    }

    if let Some(last) = sections.last_mut() {
        last.content = RECOMMENDATION_CLAUSE
            .replace(&last.content, "")
            .trim()
            .to_string();
    }

    sections
}

struct OpenSection {
    title: String,
    content: String,
}

impl OpenSection {
    fn new(raw_title: &str) -> Self {
        // `**Title:**` keeps its colon inside the emphasis
        let title = raw_title.trim().trim_end_matches(':').trim_end();
        Self {
            title: title.to_string(),
            content: String::new(),
        }
    }

    fn append(&mut self, fragment: &str) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return;
        }
        if !self.content.is_empty() {
            self.content.push(' ');
        }
        self.content.push_str(fragment);
    }

    /// Sections with a blank title are dropped along with their content.
    fn flush_into(self, sections: &mut Vec<Section>) {
        if self.title.is_empty() {
            return;
        }
        sections.push(Section {
            title: self.title,
            content: self.content,
        });
    }
}

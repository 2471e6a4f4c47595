//! Line layout for exported reports.
//!
//! The paginator turns a [`DocumentSpec`] into pages of positioned text rows. Rows are
//! addressed in character columns (`x`) and line rows (`y`); a renderer maps those onto
//! whatever units its output format uses.
//!
//! Wrapping rules:
//! - text is split on whitespace and re-joined with single spaces;
//! - a suggestion carries the bullet marker on its first line only, continuation lines
//!   are indented by the marker width so the text columns line up;
//! - a word wider than the line is cut to fit and ends with [`CONTINUATION_MARKER`];
//! - page breaks happen between whole lines, never inside a word.

use super::document::{
    DocumentSpec, LineRole, Page, PageGeometry, Placement, ReportDocument, SuggestionSection,
};
use std::borrow::Cow;
use std::mem;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const BULLET: &str = "• ";
pub const CONTINUATION_MARKER: char = '…';
pub const SCORES_HEADING: &str = "Category Scores";
pub const RECOMMENDATIONS_HEADING: &str = "Improvement Recommendations";

/// Column where score rows and suggestion bullets start.
const BODY_INDENT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error(
        "page geometry {width}x{height} with top margin {top_margin} leaves no room for text"
    )]
    InvalidGeometry {
        width: usize,
        height: usize,
        top_margin: usize,
    },
    #[error("page width {width} is too narrow for bulleted text (minimum {required})")]
    TooNarrow { width: usize, required: usize },
}

/// Narrowest page that still fits an indented bullet, one character and the marker.
pub fn minimum_width() -> usize {
    BODY_INDENT + BULLET.width() + 1 + CONTINUATION_MARKER.width().unwrap_or(1)
}

#[derive(Debug, Clone, Copy)]
pub struct ReportPaginator {
    geometry: PageGeometry,
}

impl ReportPaginator {
    pub fn new(geometry: PageGeometry) -> Result<Self, LayoutError> {
        let PageGeometry {
            width_chars,
            height_lines,
            top_margin_lines,
        } = geometry;

        if width_chars == 0 || height_lines == 0 || top_margin_lines >= height_lines {
            return Err(LayoutError::InvalidGeometry {
                width: width_chars,
                height: height_lines,
                top_margin: top_margin_lines,
            });
        }

        let required = minimum_width();
        if width_chars < required {
            return Err(LayoutError::TooNarrow {
                width: width_chars,
                required,
            });
        }

        Ok(Self { geometry })
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    pub fn paginate(&self, spec: &DocumentSpec) -> ReportDocument {
        let width = self.geometry.width_chars;
        let mut cursor = PageCursor::new(self.geometry);

        cursor.emit_wrapped(0, &spec.title, LineRole::Title);
        for line in &spec.metadata_lines {
            cursor.emit_wrapped(0, line, LineRole::Metadata);
        }

        if !spec.score_lines.is_empty() {
            cursor.gap();
            cursor.emit_wrapped(0, SCORES_HEADING, LineRole::Heading);
            for line in &spec.score_lines {
                cursor.emit_wrapped(BODY_INDENT, line, LineRole::Score);
            }
        }

        if !spec.sections.is_empty() {
            cursor.gap();
            cursor.emit_wrapped(0, RECOMMENDATIONS_HEADING, LineRole::Heading);
            for section in &spec.sections {
                cursor.gap();
                cursor.emit_wrapped(0, &section_header(section), LineRole::SectionHeader);
                for item in &section.items {
                    for (x, text, role) in bullet_lines(item, width) {
                        cursor.emit(x, text, role);
                    }
                }
            }
        }

        ReportDocument {
            geometry: self.geometry,
            pages: cursor.finish(),
        }
    }
}

/// Validates `geometry` and lays out `spec` in one call.
pub fn paginate(spec: &DocumentSpec, geometry: PageGeometry) -> Result<ReportDocument, LayoutError> {
    Ok(ReportPaginator::new(geometry)?.paginate(spec))
}

fn section_header(section: &SuggestionSection) -> String {
    if section.tier_label.trim().is_empty() {
        section.heading.clone()
    } else {
        format!("{} ({})", section.heading, section.tier_label)
    }
}

/// Wraps one suggestion into `(x, text, role)` rows: bullet on the first row, aligned
/// continuation rows after it.
pub fn bullet_lines(item: &str, width: usize) -> Vec<(usize, String, LineRole)> {
    let bullet_width = BULLET.width();
    let content_width = width.saturating_sub(BODY_INDENT + bullet_width);

    wrap_text(item, content_width)
        .into_iter()
        .enumerate()
        .map(|(index, line)| {
            if index == 0 {
                (BODY_INDENT, format!("{BULLET}{line}"), LineRole::Bullet)
            } else {
                (BODY_INDENT + bullet_width, line, LineRole::Continuation)
            }
        })
        .collect()
}

/// Greedy word wrap to `width` display columns.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if width == 0 {
        return lines;
    }

    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word = fit_word(word, width);
        let word_width = word.width();

        if current.is_empty() {
            current.push_str(&word);
            current_width = word_width;
        } else if current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(&word);
            current_width += 1 + word_width;
        } else {
            lines.push(mem::take(&mut current));
            current.push_str(&word);
            current_width = word_width;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn fit_word(word: &str, width: usize) -> Cow<'_, str> {
    if word.width() <= width {
        return Cow::Borrowed(word);
    }

    let marker_width = CONTINUATION_MARKER.width().unwrap_or(1);
    let budget = width.saturating_sub(marker_width);
    let mut truncated = String::new();
    let mut used = 0;
    for ch in word.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > budget {
            break;
        }
        truncated.push(ch);
        used += ch_width;
    }
    truncated.push(CONTINUATION_MARKER);
    Cow::Owned(truncated)
}

struct PageCursor {
    geometry: PageGeometry,
    pages: Vec<Page>,
    current: Vec<Placement>,
    row: usize,
    pending_gap: bool,
}

impl PageCursor {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            current: Vec::new(),
            row: geometry.top_margin_lines,
            pending_gap: false,
        }
    }

    /// Requests a blank row before the next line; dropped at the top of a page.
    fn gap(&mut self) {
        self.pending_gap = true;
    }

    fn emit_wrapped(&mut self, x: usize, text: &str, role: LineRole) {
        let available = self.geometry.width_chars.saturating_sub(x);
        for line in wrap_text(text, available) {
            self.emit(x, line, role);
        }
    }

    fn emit(&mut self, x: usize, text: String, role: LineRole) {
        if mem::take(&mut self.pending_gap) && self.row > self.geometry.top_margin_lines {
            self.row += 1;
        }

        if self.row >= self.geometry.height_lines {
            self.break_page();
        }

        self.current.push(Placement {
            text,
            x,
            y: self.row,
            role,
        });
        self.row += 1;
    }

    fn break_page(&mut self) {
        let number = self.pages.len() + 1;
        self.pages.push(Page {
            number,
            placements: mem::take(&mut self.current),
        });
        self.row = self.geometry.top_margin_lines;
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.break_page();
        }
        self.pages
    }
}

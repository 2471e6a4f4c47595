use super::views::EvaluationReport;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

pub const REPORT_TITLE: &str = "Educational App Quality Assessment";

/// Page size in character columns and text rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width_chars: usize,
    pub height_lines: usize,
    pub top_margin_lines: usize,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width_chars: 90,
            height_lines: 60,
            top_margin_lines: 2,
        }
    }
}

/// Unpaginated report content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSpec {
    pub title: String,
    pub metadata_lines: Vec<String>,
    pub score_lines: Vec<String>,
    pub sections: Vec<SuggestionSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionSection {
    pub heading: String,
    pub tier_label: String,
    pub items: Vec<String>,
}

impl DocumentSpec {
    /// Standard export layout: title, app metadata, one score row per category, then
    /// recommendations grouped by category.
    pub fn from_report(report: &EvaluationReport) -> Self {
        let metadata_lines = vec![
            format!("App Name: {}", report.app_name),
            format!("Date: {}", report.created_at.format("%Y-%m-%d")),
            format!("Quality Score: {}%", report.quality_score),
        ];

        let score_lines = report
            .category_scores
            .iter()
            .map(|entry| format!("{}: {}/5", entry.short_label, entry.rating))
            .collect();

        let sections = report
            .suggestions
            .iter()
            .map(|block| SuggestionSection {
                heading: block.category.name.to_string(),
                tier_label: block.tier_label.to_string(),
                items: block.items.clone(),
            })
            .collect();

        Self {
            title: REPORT_TITLE.to_string(),
            metadata_lines,
            score_lines,
            sections,
        }
    }
}

/// What a placed row represents, so renderers can pick fonts and weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineRole {
    Title,
    Metadata,
    Heading,
    Score,
    SectionHeader,
    Bullet,
    Continuation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub text: String,
    pub x: usize,
    pub y: usize,
    pub role: LineRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub number: usize,
    pub placements: Vec<Placement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl ReportDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn placements(&self) -> impl Iterator<Item = (usize, &Placement)> + '_ {
        self.pages
            .iter()
            .flat_map(|page| page.placements.iter().map(move |p| (page.number, p)))
    }

    /// Plain-text rendering: rows padded to their column, pages separated by a form feed.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        for (index, page) in self.pages.iter().enumerate() {
            if index > 0 {
                out.push('\u{c}');
                out.push('\n');
            }

            let mut row = 0;
            for placement in &page.placements {
                while row < placement.y {
                    out.push('\n');
                    row += 1;
                }
                let _ = writeln!(out, "{:indent$}{}", "", placement.text, indent = placement.x);
                row = placement.y + 1;
            }
        }

        out
    }
}

/// Download name for an exported report: whitespace runs become underscores.
pub fn export_file_name(app_name: &str, extension: &str) -> String {
    let stem = app_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{stem}_QA_Report.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_file_name_replaces_whitespace() {
        assert_eq!(
            export_file_name("Sample Educational  App", "txt"),
            "Sample_Educational_App_QA_Report.txt"
        );
    }

    #[test]
    fn render_text_pads_columns_and_rows() {
        let document = ReportDocument {
            geometry: PageGeometry::default(),
            pages: vec![
                Page {
                    number: 1,
                    placements: vec![
                        Placement {
                            text: "Title".to_string(),
                            x: 0,
                            y: 1,
                            role: LineRole::Title,
                        },
                        Placement {
                            text: "• item".to_string(),
                            x: 2,
                            y: 3,
                            role: LineRole::Bullet,
                        },
                    ],
                },
                Page {
                    number: 2,
                    placements: vec![Placement {
                        text: "next".to_string(),
                        x: 4,
                        y: 0,
                        role: LineRole::Continuation,
                    }],
                },
            ],
        };

        assert_eq!(
            document.render_text(),
            "\nTitle\n\n  • item\n\u{c}\n    next\n"
        );
        assert_eq!(document.placements().count(), 3);
    }
}

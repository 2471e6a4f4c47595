//! Layout properties of the report paginator over generated content.

use edugrade::workflows::report::{
    bullet_lines, paginate, DocumentSpec, LineRole, PageGeometry, SuggestionSection, BULLET,
};
use proptest::prelude::*;
use unicode_width::UnicodeWidthStr;

fn words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,10}", 1..30)
}

fn dewrap(lines: &[(usize, String, LineRole)]) -> String {
    lines
        .iter()
        .map(|(_, text, role)| match role {
            LineRole::Bullet => text.trim_start_matches(BULLET).to_string(),
            _ => text.clone(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn spec_with_items(items: Vec<String>) -> DocumentSpec {
    DocumentSpec {
        title: "Educational App Quality Assessment".to_string(),
        metadata_lines: vec!["App Name: Generated".to_string()],
        score_lines: vec!["Pedagogical: 3/5".to_string()],
        sections: vec![SuggestionSection {
            heading: "Engagement & Motivation".to_string(),
            tier_label: "Enhancement Opportunities".to_string(),
            items,
        }],
    }
}

proptest! {
    #[test]
    fn dewrapping_reconstructs_the_suggestion(words in words(), width in 16usize..80) {
        let original = words.join(" ");
        let lines = bullet_lines(&original, width);

        prop_assert_eq!(dewrap(&lines), original);
        prop_assert_eq!(lines.iter().filter(|(_, _, role)| *role == LineRole::Bullet).count(), 1);
    }

    #[test]
    fn placements_stay_inside_the_page(
        items in prop::collection::vec(words(), 1..8),
        width in 16usize..60,
        height in 4usize..30,
        top_margin in 0usize..3,
    ) {
        let items: Vec<String> = items.into_iter().map(|w| w.join(" ")).collect();
        let geometry = PageGeometry {
            width_chars: width,
            height_lines: height,
            top_margin_lines: top_margin,
        };

        let document = paginate(&spec_with_items(items), geometry).expect("valid geometry");

        for (index, page) in document.pages.iter().enumerate() {
            prop_assert_eq!(page.number, index + 1);
            prop_assert!(!page.placements.is_empty());
            for placement in &page.placements {
                prop_assert!(placement.y >= top_margin);
                prop_assert!(placement.y < height);
                prop_assert!(placement.x + placement.text.width() <= width);
            }
        }
    }

    #[test]
    fn one_extra_line_spills_onto_a_second_page(height in 1usize..40) {
        let spec = DocumentSpec {
            title: "Title".to_string(),
            metadata_lines: (1..=height).map(|n| format!("line {n}")).collect(),
            score_lines: Vec::new(),
            sections: Vec::new(),
        };
        let geometry = PageGeometry {
            width_chars: 40,
            height_lines: height,
            top_margin_lines: 0,
        };

        let document = paginate(&spec, geometry).expect("valid geometry");

        prop_assert_eq!(document.page_count(), 2);
        prop_assert_eq!(document.pages[1].placements.len(), 1);
        prop_assert_eq!(&document.pages[1].placements[0].text, &format!("line {height}"));
    }
}

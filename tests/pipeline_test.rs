//! End-to-end tests for the recovery pipeline.

use unsummary::{
    normalize, normalize_cornell, parse_hierarchy, rewrite_smart, split_sections, BulletItem,
    ContentBlock, SummaryFormat, SummaryPipeline, TableBlock,
};

const MESSY_SMART: &str = "\
Smart Summary: The Human Brain

1. Overview
**The brain** is the body's `control center`.

Key Concept: Boss of Your BodyThe brain coordinates everything you do.

2. Brain Structure and Functions
Part  Function  Size
Cerebrum  Thinking and memory  Largest
Cerebellum  Balance and coordination  Small

Additional Interesting Facts
The brain weighs about 1.4kg.
It uses 20% of the body's energy.";

#[test]
fn normalize_is_idempotent_on_messy_input() {
    for raw in [
        MESSY_SMART,
        "# H\n- **a**\n\n\n\n\n1.2. outline<br>tail",
        "",
        "   \n\t\n",
    ] {
        let once = normalize(raw);
        assert_eq!(normalize(&once), once);
    }
}

#[test]
fn cornell_normalize_is_idempotent() {
    let raw = "| Cue | Note one | Note two |\n|---|---|---|\nPlain line.";
    let once = normalize_cornell(raw);
    assert_eq!(normalize_cornell(&once), once);
}

#[test]
fn smart_rewrite_is_idempotent() {
    let once = rewrite_smart(MESSY_SMART);
    assert_eq!(rewrite_smart(&once), once);
}

#[test]
fn cornell_without_pipes_routes_through_general_normalizer() {
    let raw = "# Cues\n- What does the cerebellum do?\nIt coordinates movement.";
    let result = normalize_cornell(raw);
    assert!(!result.contains('|'));
    assert_eq!(result, normalize(raw));
}

#[test]
fn sections_never_empty() {
    for text in ["", "one line", "Heading Line\nbody", MESSY_SMART] {
        assert!(!split_sections(text).is_empty());
    }
}

#[test]
fn bullet_hierarchy_groups_children() {
    let items = parse_hierarchy("- Mitochondria\n  - Function: produces ATP\n- Nucleus");
    assert_eq!(
        items,
        vec![
            BulletItem {
                text: "Mitochondria".to_string(),
                children: vec!["Function: produces ATP".to_string()],
            },
            BulletItem {
                text: "Nucleus".to_string(),
                children: vec![],
            },
        ]
    );
}

#[test]
fn facts_heading_forces_list_in_markdown() {
    let md = rewrite_smart(
        "Additional Interesting Facts\nThe brain weighs 1.4kg.\nIt uses 20% of body energy.",
    );
    let lines: Vec<&str> = md.lines().collect();
    assert_eq!(lines[0], "## Additional Interesting Facts");
    assert_eq!(lines[2], "- The brain weighs 1.4kg.");
    assert_eq!(lines[3], "- It uses 20% of body energy.");
}

#[test]
fn ragged_rows_normalize_to_max_column_count() {
    let mut table = TableBlock::new(
        vec!["A".into(), "B".into()],
        vec![
            vec!["1".into(), "2".into()],
            vec!["3".into(), "4".into(), "5".into()],
            vec!["6".into(), "7".into()],
        ],
    );
    table.normalize_columns();
    assert!(table.rows.iter().all(|row| row.len() == 3));
    assert_eq!(table.rows[0][2], "—");
    assert_eq!(table.rows[2][2], "—");
}

#[test]
fn smart_html_promotes_key_rows() {
    let pipeline = SummaryPipeline::new();
    let html = pipeline.render_html(MESSY_SMART, SummaryFormat::Smart).unwrap();

    assert!(html.contains(r#"<span class="key-label">Key Concept:</span>"#));
    assert!(html.contains(r#"<span class="key-title">Boss of Your Body</span>"#));
    assert!(html.contains("The brain coordinates everything you do."));
}

#[test]
fn smart_html_contains_sections_and_table() {
    let pipeline = SummaryPipeline::new();
    let html = pipeline.render_html(MESSY_SMART, SummaryFormat::Smart).unwrap();

    assert!(html.contains("<section><h2>Overview</h2>"));
    assert!(html.contains("<table>"));
    assert!(html.contains("<th>Part</th>"));
    assert!(html.contains("<td>Cerebrum</td>"));
    // The wrapper title never renders.
    assert!(!html.contains("Smart Summary"));
}

#[test]
fn smart_html_facts_section_is_a_list() {
    let pipeline = SummaryPipeline::new();
    let html = pipeline.render_html(MESSY_SMART, SummaryFormat::Smart).unwrap();
    assert!(html.contains(r#"<ul class="facts-list">"#));
    assert!(html.contains("<li>The brain weighs about 1.4kg.</li>"));
}

#[test]
fn plain_path_sections_from_smart_document() {
    let pipeline = SummaryPipeline::new();
    let sections = pipeline.sections(MESSY_SMART, SummaryFormat::Paragraph);

    assert!(sections.len() >= 2);
    assert!(sections.iter().all(|s| !s.body.trim().is_empty()));
}

#[test]
fn pdf_blocks_preserve_document_order() {
    let pipeline = SummaryPipeline::new();
    let blocks = pipeline.pdf_blocks(MESSY_SMART, SummaryFormat::Smart);

    let table_positions: Vec<usize> = blocks
        .iter()
        .enumerate()
        .filter(|(_, b)| b.is_table())
        .map(|(i, _)| i)
        .collect();
    assert_eq!(table_positions.len(), 1);

    // Text exists on both sides of the table.
    assert!(table_positions[0] > 0);
    assert!(table_positions[0] < blocks.len() - 1);

    if let ContentBlock::Table { headers, rows } = &blocks[table_positions[0]] {
        assert_eq!(headers, &["Part", "Function", "Size"]);
        assert_eq!(rows.len(), 2);
    }
}

#[test]
fn malformed_input_never_panics() {
    let pipeline = SummaryPipeline::new();
    let nasty = [
        "|||||",
        "###### \n> > >\n**",
        "Part  Function\n\u{FFFD}\u{0}",
        "1. \n2. \n3. ",
        "<br><br><br>",
    ];
    for raw in nasty {
        for format in SummaryFormat::ALL {
            let _ = pipeline.render_html(raw, format).unwrap();
            let _ = pipeline.sections(raw, format);
            let _ = pipeline.pdf_blocks(raw, format);
        }
        let _ = pipeline.bullet_hierarchy(raw);
    }
}

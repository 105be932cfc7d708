//! Integration tests for the segmentation primitives.

use docseg::model::{BBox, Color, Page, PositionedElement, TextRun};
use docseg::segment::{
    accumulate, Classified, ColumnSplitter, FooterTrimmer, HeaderClassifier, HeaderRule,
    OpenSection, SectionAccumulator,
};
use docseg::text::{normalize, TextCleaner};
use docseg::{extract_table, TableRegion};

fn text(x0: f32, y0: f32, x1: f32, body: &str, size: f32) -> PositionedElement {
    PositionedElement::text(BBox::new(x0, y0, x1, y0 + size), body, size, Color::black())
}

fn header(h: &str) -> Classified {
    Classified {
        header: h.to_string(),
        ..Default::default()
    }
}

fn body(b: &str) -> Classified {
    Classified {
        body: b.to_string(),
        ..Default::default()
    }
}

#[test]
fn scenario_a_sections_without_headers() {
    let mut acc = SectionAccumulator::new("");
    acc.push_page(vec![body("a"), body("b")], 1);
    let sections = acc.finish(1);

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].header, "");
    assert_eq!(sections[0].body, "ab");
}

#[test]
fn scenario_b_header_transition() {
    let (mut flushed, open) = accumulate(
        vec![header("Risks"), body("r1"), header("Profile"), body("p1")],
        OpenSection::default(),
    );
    assert_eq!(flushed, vec![("Risks".to_string(), "r1".to_string())]);

    let (rest, _) = accumulate(vec![header("end")], open);
    flushed.extend(rest);
    assert_eq!(
        flushed,
        vec![
            ("Risks".to_string(), "r1".to_string()),
            ("Profile".to_string(), "p1".to_string()),
        ]
    );
}

#[test]
fn scenario_c_table_with_ragged_row() {
    let page = Page::with_elements(
        1,
        vec![
            PositionedElement::line(30.0, 500.0, 450.0, 500.0),
            text(40.0, 480.0, 120.0, "Region", 8.0),
            text(150.0, 480.0, 240.0, "2024", 8.0),
            text(280.0, 480.0, 360.0, "2025", 8.0),
            PositionedElement::line(30.0, 470.0, 450.0, 470.0),
            text(40.0, 455.0, 100.0, "Europe", 8.0),
            text(280.0, 455.0, 330.0, "1.2", 8.0),
            PositionedElement::line(30.0, 445.0, 450.0, 445.0),
            text(40.0, 430.0, 110.0, "Asia", 8.0),
            text(150.0, 430.0, 200.0, "4.5", 8.0),
            text(280.0, 430.0, 320.0, "4.1", 8.0),
            PositionedElement::line(30.0, 420.0, 450.0, 420.0),
        ],
    );
    let table = extract_table(&page, &TableRegion::new(420.0, 520.0), true).unwrap();

    assert!(table.is_rectangular());
    assert_eq!(table.column_count(), 3);
    assert_eq!(table.rows[1], vec!["Europe", "", "1.2"]);
    assert_eq!(table.rows[2], vec!["Asia", "4.5", "4.1"]);
}

#[test]
fn scenario_d_stop_string_truncation() {
    let cleaner = TextCleaner::new(&["This document is for information"]);
    let cleaned = cleaner.clean_with_stop(
        "Our view is unchanged.\nThis document is for information purposes only.",
    );
    assert_eq!(cleaned.text, "Our view is unchanged.");
    assert!(cleaned.early_stop);
}

#[test]
fn scenario_e_footer_trim() {
    let a = text(40.0, 700.0, 200.0, "Body", 9.0);
    let note = text(40.0, 650.0, 200.0, "Chart source", 6.0);
    let b = text(40.0, 600.0, 200.0, "More body", 9.0);
    let f1 = text(40.0, 40.0, 200.0, "Disclaimer", 5.0);
    let f2 = text(40.0, 30.0, 200.0, "7", 6.0);

    let trimmed = FooterTrimmer::new(6.0).trim(vec![&a, &note, &b, &f1, &f2]);
    let texts: Vec<_> = trimmed.iter().map(|e| e.text_content()).collect();
    assert_eq!(texts, vec!["Body", "Chart source", "More body"]);
}

#[test]
fn property_column_split_is_a_partition() {
    let page = Page::with_elements(
        1,
        (0..60)
            .map(|i| {
                let x0 = (i * 53 % 560) as f32;
                text(x0, 800.0 - i as f32 * 12.0, x0 + 40.0, &format!("t{i}"), 9.0)
            })
            .chain([PositionedElement::line(0.0, 10.0, 600.0, 10.0)])
            .collect(),
    );
    let splitter = ColumnSplitter::new(300.0);
    let (split, _) = splitter.split(&page, splitter.initial_state());

    let mut seen: Vec<String> = split
        .left
        .iter()
        .chain(split.right.iter())
        .map(|e| e.text_content())
        .collect();
    seen.sort();
    let mut expected: Vec<String> = page.text_elements().map(|e| e.text_content()).collect();
    expected.sort();
    assert_eq!(seen, expected);
    assert!(split.left.iter().all(|e| e.x0() < 300.0));
    assert!(split.right.iter().all(|e| e.x0() >= 300.0));
}

#[test]
fn property_footer_trim_idempotent() {
    let elements: Vec<_> = [9.0, 5.0, 9.0, 6.0, 4.0]
        .iter()
        .enumerate()
        .map(|(i, s)| text(0.0, 100.0 - i as f32, 50.0, &format!("e{i}"), *s))
        .collect();
    let refs: Vec<&PositionedElement> = elements.iter().collect();
    let trimmer = FooterTrimmer::new(6.0);

    let once = trimmer.trim(refs);
    let twice = trimmer.trim(once.clone());
    assert_eq!(once, twice);
    assert_eq!(once.len(), 3);
}

#[test]
fn property_normalization_idempotent() {
    for s in [
        "Macro-\neconomic\noutlook",
        "tab\there\u{0000}",
        "-\n-\n-\n",
        "zero\u{200B}width",
        "ünïcödé-\nwörds",
    ] {
        let once = normalize(s);
        assert_eq!(normalize(&once), once);
    }
}

#[test]
fn property_classifier_prefix() {
    let orange = Color::rgb(0.93, 0.45, 0.0);
    let classifier = HeaderClassifier::new(HeaderRule::color(vec![orange.clone()]));
    let cases = vec![
        vec![("Equities\n", orange.clone()), ("We stay over-\nweight.", Color::black())],
        vec![("No header at all", Color::black())],
        vec![("Header only\n", orange.clone())],
        vec![("Mixed ", orange.clone()), ("body ", Color::black()), ("again", orange.clone())],
    ];
    for runs in cases {
        let element = PositionedElement::text_runs(
            BBox::default(),
            runs.into_iter()
                .map(|(t, c)| TextRun::new(t, 9.0, c))
                .collect(),
        );
        let c = classifier.classify(&element);
        assert_eq!(
            format!("{}{}", c.header, c.body),
            normalize(&element.text_content())
        );
    }
}

#[test]
fn property_flush_completeness() {
    let input = vec![
        body("intro "),
        header("One"),
        body("alpha "),
        body("beta"),
        header("Two"),
        header("Three"),
        body("gamma"),
        body(""),
    ];
    let expected: usize = input.iter().map(|c| c.body.len()).sum();

    let mut acc = SectionAccumulator::new("T");
    let (first, second) = input.split_at(4);
    acc.push_page(first.to_vec(), 1);
    acc.push_page(second.to_vec(), 2);
    let sections = acc.finish(2);

    let emitted: usize = sections.iter().map(|s| s.body.len()).sum();
    assert_eq!(emitted, expected);
    assert_eq!(sections.len(), 4);
}

#[test]
fn property_table_rectangularity() {
    let mut elements = Vec::new();
    for (row, count) in [3usize, 3, 1, 2, 3, 4].iter().enumerate() {
        let y0 = 600.0 - row as f32 * 20.0;
        for col in 0..*count {
            let x0 = 50.0 + col as f32 * 90.0;
            elements.push(text(x0, y0, x0 + 60.0, &format!("r{row}c{col}"), 8.0));
        }
    }
    let page = Page::with_elements(1, elements);
    let table = extract_table(&page, &TableRegion::new(400.0, 650.0), false).unwrap();

    assert_eq!(table.column_count(), 3);
    assert!(table.is_rectangular());
    assert_eq!(table.row_count(), 6);
}

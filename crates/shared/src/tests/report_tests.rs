use super::*;
use crate::roster::{RosterEntry, StatusCategory};

fn state(entries: &[(&str, StatusCategory)]) -> RosterState {
    entries
        .iter()
        .map(|(name, status)| RosterEntry::new(*name, *status))
        .collect()
}

#[test]
fn renders_header_and_non_empty_categories() {
    let roster = state(&[
        ("CPL DARREN", StatusCategory::Present),
        ("REC NICHOLAS", StatusCategory::Off),
    ]);
    assert_eq!(
        render_report("S1 BRANCH", ParadeType::Last, &roster),
        "S1 BRANCH\n\nLAST PARADE\n\nPRESENT:\nCPL DARREN\n\nOFF:\nREC NICHOLAS\n\n"
    );
}

#[test]
fn empty_roster_renders_header_only() {
    assert_eq!(
        render_report("OCHQ", ParadeType::First, &RosterState::new()),
        "OCHQ\n\nFIRST PARADE\n\n"
    );
}

#[test]
fn empty_categories_have_no_header_line() {
    let roster = state(&[("3SG SIVA", StatusCategory::Leave)]);
    let report = render_report("SSP BRANCH", ParadeType::Last, &roster);
    for status in StatusCategory::ALL {
        let header = format!("{}:", status.label());
        let present = report.lines().any(|line| line == header);
        assert_eq!(present, status == StatusCategory::Leave, "{status}");
    }
}

#[test]
fn categories_follow_declaration_order_not_insertion_order() {
    let roster = state(&[
        ("E", StatusCategory::Dc),
        ("D", StatusCategory::Leave),
        ("C", StatusCategory::Off),
        ("B", StatusCategory::RsoMc),
        ("A", StatusCategory::Brw),
        ("Z", StatusCategory::Present),
    ]);
    assert_eq!(
        render_report("S2 BRANCH", ParadeType::First, &roster),
        "S2 BRANCH\n\nFIRST PARADE\n\n\
         PRESENT:\nZ\n\nBRW:\nA\n\nRSO/MC:\nB\n\nOFF:\nC\n\nLEAVE:\nD\n\nDC:\nE\n\n"
    );
}

#[test]
fn names_keep_insertion_order_within_a_block() {
    let roster = state(&[
        ("REC NICHOLAS", StatusCategory::Present),
        ("3SG SIVA", StatusCategory::Present),
        ("REC NICHOLAS", StatusCategory::Present),
    ]);
    assert_eq!(
        render_report("SSP BRANCH", ParadeType::Last, &roster),
        "SSP BRANCH\n\nLAST PARADE\n\nPRESENT:\nREC NICHOLAS\n3SG SIVA\nREC NICHOLAS\n\n"
    );
}

#[test]
fn identical_inputs_render_identical_output() {
    let roster = state(&[
        ("CPL DARREN", StatusCategory::RsoMc),
        ("3SG SIVA", StatusCategory::Brw),
    ]);
    let first = render_report("S3 BRANCH", ParadeType::First, &roster);
    let second = render_report("S3 BRANCH", ParadeType::First, &roster.clone());
    assert_eq!(first, second);
}

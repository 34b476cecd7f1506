use crate::roster::{ParadeType, RosterState};

/// Renders the text copied out of the tool.
///
/// Header is `"<branch>\n\n<parade label>\n\n"`, followed by one
/// `"<label>:\n<names...>\n\n"` block per non-empty category in
/// declaration order.
pub fn render_report(branch: &str, parade: ParadeType, state: &RosterState) -> String {
    let mut report = format!("{branch}\n\n{}\n\n", parade.label());

    for (status, names) in state.iter() {
        if names.is_empty() {
            continue;
        }
        report.push_str(status.label());
        report.push_str(":\n");
        report.push_str(&names.join("\n"));
        report.push_str("\n\n");
    }

    report
}

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;

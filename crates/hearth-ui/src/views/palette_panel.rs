//! Whole-palette rendering: query line, status line, results.

use crate::model::{PaletteSnapshot, PaletteStatus};

use super::results_panel::render_entries;

/// Render a snapshot as text. A closed palette renders as an empty string.
pub fn render_snapshot(snapshot: &PaletteSnapshot) -> String {
    if !snapshot.is_open() {
        return String::new();
    }

    let mut lines = vec![format!("Search: {}", snapshot.query).trim_end().to_string()];

    match snapshot.status {
        PaletteStatus::Querying => lines.push("Searching...".to_string()),
        PaletteStatus::Results if snapshot.results.is_empty() => {
            lines.push(format!("No results for \"{}\"", snapshot.query.trim()));
        }
        PaletteStatus::Empty if snapshot.results.is_empty() => {
            lines.push("Type to search contacts, companies, deals and tickets".to_string());
        }
        _ => {}
    }

    lines.extend(render_entries(&snapshot.entries, snapshot.cursor_index));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OpenStage, OpenState, PaletteModel, PalettePhase};
    use hearth_core::{QuickAction, ResultKind, SearchResult};

    fn snapshot_of(open: OpenState) -> PaletteSnapshot {
        PaletteModel {
            phase: PalettePhase::Open(open),
            generation: 1,
        }
        .snapshot()
    }

    #[test]
    fn test_closed_renders_nothing() {
        assert_eq!(render_snapshot(&PaletteSnapshot::default()), "");
    }

    #[test]
    fn test_empty_query_groups() {
        let recent = vec![SearchResult::link(
            "t-42",
            ResultKind::Ticket,
            "Broken ice machine",
            "/crm/tickets/t-42",
        )];
        let task = QuickAction::new(
            "create_task",
            "Create New Task",
            "Schedule a follow-up activity",
            "check-square",
        );
        let rows = vec![recent[0].clone(), task.to_result()];

        insta::assert_snapshot!(render_snapshot(&snapshot_of(OpenState::new(recent, rows))), @r"
        Search:
        # Recent
        > Broken ice machine [ticket]
        # Quick Actions
          Create New Task - Schedule a follow-up activity [action]
        ");
    }

    #[test]
    fn test_querying_shows_indicator() {
        let mut open = OpenState::new(Vec::new(), Vec::new());
        open.query = "acme".to_string();
        open.stage = OpenStage::Querying;

        insta::assert_snapshot!(render_snapshot(&snapshot_of(open)), @r"
        Search: acme
        Searching...
        ");
    }

    #[test]
    fn test_no_results() {
        let mut open = OpenState::new(Vec::new(), Vec::new());
        open.query = "zzz ".to_string();
        open.stage = OpenStage::Results;

        insta::assert_snapshot!(render_snapshot(&snapshot_of(open)), @r#"
        Search: zzz
        No results for "zzz"
        "#);
    }
}

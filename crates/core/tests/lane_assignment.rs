//! Integration test: load saved histories through the public entry points and
//! check the lanes, summary, and terminal rendering they produce.

use pretty_assertions::assert_eq;
use swimlane_core::model::{GraphSession, GraphView, HistoryStatus, LoadOutcome};
use swimlane_core::parse_auto;
use swimlane_core::views::glyphs::{GlyphRow, render_glyphs};
use swimlane_core::views::timeline::{TimelineStyle, render_timeline};
use swimlane_protocol::{HostMessage, RenderCommand, Viewport};

fn load(data: &[u8]) -> GraphView {
    GraphView::build(parse_auto(data).expect("fixture should parse"))
}

#[test]
fn document_fixture_lays_out_feature_branch() {
    let view = load(include_bytes!("fixtures/sample-graph.json"));

    assert_eq!(view.layout.lanes().collect::<Vec<_>>(), vec![0, 1, 0, 1, 0, 0]);
    assert_eq!(view.layout.lane_count, 2);
    assert_eq!(view.layout.final_width, 0);

    assert_eq!(view.summary.commit_count, 6);
    // main, origin/main, feature/ui, origin/feature/ui
    assert_eq!(view.summary.branch_count, 4);
    assert_eq!(view.summary.tag_count, 2);
    assert_eq!(view.summary.status, HistoryStatus::Complete);
    assert_eq!(view.summary.status.to_string(), "Complete");

    assert_eq!(view.commits[0].short_id, "9f1c2e7a");
    assert_eq!(view.commits[0].decorations.head.as_deref(), Some("main"));
}

#[test]
fn document_fixture_glyphs() {
    let view = load(include_bytes!("fixtures/sample-graph.json"));
    let rows: Vec<String> = render_glyphs(&view).iter().map(GlyphRow::text).collect();
    assert_eq!(
        rows,
        vec![
            "●", "│╲", //
            "│ ●", "│ │", //
            "● │", "│ │", //
            "│ ●", "│╱", //
            "●", "│", //
            "●", "",
        ]
    );
}

#[test]
fn raw_git_log_fixture() {
    let view = load(include_bytes!("fixtures/sample-git-log.txt"));

    assert_eq!(view.commits.len(), 4);
    assert_eq!(view.layout.lanes().collect::<Vec<_>>(), vec![0, 1, 0, 1]);
    assert_eq!(view.layout.final_width, 0);

    // "Fix typo" joins the lane already waiting for the root.
    assert_eq!(view.layout.rows[2].parent_lanes.as_slice(), &[1]);
    assert_eq!(view.layout.rows[2].occupancy, vec![false, true]);

    let head = &view.commits[0].decorations;
    assert_eq!(head.head.as_deref(), Some("main"));
    assert_eq!(head.remote_branches, vec!["origin/main"]);
    assert_eq!(view.commits[3].decorations.tags, vec!["v0.1"]);

    // HEAD's target is not counted as a branch of its own: origin/main, topic.
    assert_eq!(view.summary.branch_count, 2);
    assert_eq!(view.summary.tag_count, 2);
    assert_eq!(view.summary.status.label(), "Complete");
}

#[test]
fn timeline_covers_every_commit() {
    let view = load(include_bytes!("fixtures/sample-graph.json"));
    let style = TimelineStyle::default();
    let (width, height) = style.extent(&view);
    let commands = render_timeline(&view, &style, &Viewport::new(0.0, 0.0, width, height));

    let nodes = commands
        .iter()
        .filter(|c| matches!(c, RenderCommand::DrawNode { .. }))
        .count();
    assert_eq!(nodes, view.commits.len());

    let begins = commands
        .iter()
        .filter(|c| matches!(c, RenderCommand::BeginGroup { .. }))
        .count();
    let ends = commands
        .iter()
        .filter(|c| matches!(c, RenderCommand::EndGroup))
        .count();
    assert_eq!(begins, ends);
}

#[test]
fn host_payload_replaces_session_view() {
    let message = format!(
        r#"{{"type":"git-graph:data","payload":{}}}"#,
        std::str::from_utf8(include_bytes!("fixtures/sample-graph.json")).expect("utf-8 fixture")
    );
    let HostMessage::Data { payload } =
        serde_json::from_str::<HostMessage>(&message).expect("data message")
    else {
        panic!("expected a data message");
    };

    let mut session = GraphSession::new();
    session
        .load_bytes(b"{}")
        .expect("empty document loads");
    assert!(session.view().is_some_and(GraphView::is_empty));

    let ticket = session.begin_load();
    assert!(matches!(
        session.finish_load(ticket, Ok(payload)),
        LoadOutcome::Applied
    ));
    assert_eq!(session.view().map(|view| view.commits.len()), Some(6));

    // A broken follow-up load keeps the graph on screen.
    assert!(session.load_bytes(b"{ not json").is_err());
    assert_eq!(session.view().map(|view| view.summary.tag_count), Some(2));
}

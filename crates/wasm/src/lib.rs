use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use swimlane_core::model::{GraphSession, GraphSummary, GraphView};
use swimlane_core::views::timeline::{TimelineStyle, render_timeline};
use swimlane_protocol::{GraphDocument, HistoryLimit, HostMessage, RenderCommand, Viewport};
use wasm_bindgen::prelude::*;

static SESSION: Mutex<GraphSession> = Mutex::new(GraphSession::new());

const DATA_MESSAGE: &str = "git-graph:data";

#[derive(Serialize)]
struct RenderedGraph<'a> {
    view: &'a GraphView,
    /// Size of the whole timeline, for sizing the scroll container.
    width: f64,
    height: f64,
    commands: Vec<RenderCommand>,
}

/// Summary as displayed by the page: counts plus the status label.
#[derive(Debug, PartialEq, Serialize)]
struct SummaryLabels {
    commits: usize,
    branches: usize,
    tags: usize,
    status: &'static str,
}

impl From<GraphSummary> for SummaryLabels {
    fn from(summary: GraphSummary) -> Self {
        Self {
            commits: summary.commit_count,
            branches: summary.branch_count,
            tags: summary.tag_count,
            status: summary.status.label(),
        }
    }
}

fn session() -> Result<MutexGuard<'static, GraphSession>, JsError> {
    SESSION
        .lock()
        .map_err(|_| JsError::new("graph session lock poisoned"))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&e.to_string()))
}

fn render(view: &GraphView, viewport: &Viewport) -> Result<String, JsError> {
    let style = TimelineStyle::default();
    let (width, height) = style.extent(view);
    to_json(&RenderedGraph {
        view,
        width,
        height,
        commands: render_timeline(view, &style, viewport),
    })
}

/// The payload of a `git-graph:data` message, or `None` for any other message.
fn data_payload(message: &str) -> Result<Option<GraphDocument>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(message)?;
    if value.get("type").and_then(serde_json::Value::as_str) != Some(DATA_MESSAGE) {
        return Ok(None);
    }
    match serde_json::from_value(value)? {
        HostMessage::Data { payload } => Ok(Some(payload)),
        HostMessage::Request { .. } => Ok(None),
    }
}

/// Load a history (graph document JSON or raw `git log` output) and render
/// the rows visible in the given viewport.
///
/// A history that fails to parse leaves the previously loaded graph in place.
#[wasm_bindgen]
pub fn render_graph(data: &[u8], x: f64, y: f64, width: f64, height: f64) -> Result<String, JsError> {
    let mut session = session()?;
    let view = session
        .load_bytes(data)
        .map_err(|e| JsError::new(&e.to_string()))?;
    render(view, &Viewport::new(x, y, width, height))
}

/// Re-render the current graph for a new viewport (e.g. after scrolling).
#[wasm_bindgen]
pub fn render_view(x: f64, y: f64, width: f64, height: f64) -> Result<String, JsError> {
    let session = session()?;
    let empty = GraphView::default();
    let view = session.view().unwrap_or(&empty);
    render(view, &Viewport::new(x, y, width, height))
}

/// Apply a message posted by the host. Returns the new summary when the
/// message carried graph data; other message types are ignored.
#[wasm_bindgen]
pub fn handle_host_message(message: &str) -> Result<Option<String>, JsError> {
    let Some(document) = data_payload(message).map_err(|e| JsError::new(&e.to_string()))? else {
        return Ok(None);
    };
    let mut session = session()?;
    let ticket = session.begin_load();
    session.finish_load(ticket, Ok(document));
    let summary = session.view().map(|view| view.summary).unwrap_or_default();
    to_json(&SummaryLabels::from(summary)).map(Some)
}

/// Build the `git-graph:request` message for the value typed into the limit
/// field. Non-numeric input asks for the default history size.
#[wasm_bindgen]
pub fn history_request(limit: &str) -> Result<String, JsError> {
    to_json(&HostMessage::Request {
        limit: HistoryLimit::lenient(limit),
    })
}

/// Counts and status label for the graph currently loaded.
#[wasm_bindgen]
pub fn current_summary() -> Result<String, JsError> {
    let session = session()?;
    let summary = session.view().map(|view| view.summary).unwrap_or_default();
    to_json(&SummaryLabels::from(summary))
}

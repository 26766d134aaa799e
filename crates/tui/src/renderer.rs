use std::io::stdout;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use swimlane_core::model::{GraphSession, GraphSummary, GraphView, LoadOutcome, LoadTicket};
use swimlane_core::sources::SourceError;
use swimlane_core::views::glyphs::{GlyphRow, render_glyphs};
use swimlane_core::views::timeline::badges;
use swimlane_protocol::{GraphDocument, HistoryLimit, ThemeToken};

use crate::source::HistorySource;

const LIMIT_STEP: isize = 100;

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::LaneBlue => Color::Rgb(125, 194, 255),
        ThemeToken::LaneOrange => Color::Rgb(255, 161, 125),
        ThemeToken::LaneGreen => Color::Rgb(137, 247, 197),
        ThemeToken::LaneYellow => Color::Rgb(249, 196, 63),
        ThemeToken::LanePurple => Color::Rgb(200, 166, 255),
        ThemeToken::BadgeHead => Color::LightRed,
        ThemeToken::BadgeBranch => Color::LightBlue,
        ThemeToken::BadgeTag => Color::Yellow,
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextSecondary => Color::Gray,
        ThemeToken::TextMuted => Color::DarkGray,
        ThemeToken::Background => Color::Black,
    }
}

/// "12 commits · 3 branches · 2 tags · Complete"
pub fn summary_line(summary: &GraphSummary) -> String {
    format!(
        "{} commits · {} branches · {} tags · {}",
        summary.commit_count, summary.branch_count, summary.tag_count, summary.status
    )
}

type LoadResult = (LoadTicket, Result<GraphDocument, SourceError>);

struct App {
    source: HistorySource,
    limit: HistoryLimit,
    session: GraphSession,
    rows: Vec<GlyphRow>,
    scroll: usize,
    page: usize,
    loading: bool,
    error: Option<String>,
    tx: Sender<LoadResult>,
    rx: Receiver<LoadResult>,
}

impl App {
    fn new(source: HistorySource, limit: HistoryLimit) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            limit,
            session: GraphSession::new(),
            rows: Vec::new(),
            scroll: 0,
            page: 1,
            loading: false,
            error: None,
            tx,
            rx,
        }
    }

    /// Collect the history again on a worker thread. A refresh issued while
    /// another is in flight makes the older result stale.
    fn refresh(&mut self) {
        let ticket = self.session.begin_load();
        let source = self.source.clone();
        let limit = self.limit;
        let tx = self.tx.clone();
        self.loading = true;
        thread::spawn(move || {
            let result = source.load(limit);
            // The receiver is gone once the viewer has quit.
            let _ = tx.send((ticket, result));
        });
    }

    fn poll_loads(&mut self) {
        while let Ok((ticket, result)) = self.rx.try_recv() {
            match self.session.finish_load(ticket, result) {
                LoadOutcome::Applied => {
                    self.loading = false;
                    self.error = None;
                    self.rows = self.session.view().map(render_glyphs).unwrap_or_default();
                    self.scroll_by(0);
                }
                LoadOutcome::Stale => {}
                LoadOutcome::Failed(err) => {
                    self.loading = false;
                    self.error = Some(err.to_string());
                }
            }
        }
    }

    fn scroll_by(&mut self, delta: isize) {
        let max = self.rows.len().saturating_sub(self.page);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }

    fn change_limit(&mut self, delta: isize) {
        let limit = self.limit.step(delta);
        if limit != self.limit {
            self.limit = limit;
            self.refresh();
        }
    }

    /// Returns `false` when the viewer should exit.
    fn handle_event(&mut self, event: Event) -> bool {
        let page = isize::try_from(self.page).unwrap_or(isize::MAX);
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return false,
                KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-2),
                KeyCode::Down | KeyCode::Char('j') => self.scroll_by(2),
                KeyCode::PageUp => self.scroll_by(-page),
                KeyCode::PageDown => self.scroll_by(page),
                KeyCode::Home => self.scroll = 0,
                KeyCode::End => self.scroll_by(isize::MAX),
                KeyCode::Char('r') => self.refresh(),
                KeyCode::Char('+') | KeyCode::Char('=') => self.change_limit(LIMIT_STEP),
                KeyCode::Char('-') => self.change_limit(-LIMIT_STEP),
                _ => {}
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => self.scroll_by(2),
                MouseEventKind::ScrollUp => self.scroll_by(-2),
                _ => {}
            },
            _ => {}
        }
        true
    }

    fn draw(&mut self, frame: &mut Frame) {
        let [header_area, body_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        self.page = usize::from(body_area.height).max(1);
        self.scroll_by(0);

        let view = self.session.view();
        let summary = view
            .map(|view| summary_line(&view.summary))
            .unwrap_or_else(|| summary_line(&GraphSummary::empty()));
        let header = Paragraph::new(format!(
            " swimlane · {} · {summary} · limit {} ",
            self.source.describe(),
            self.limit
        ))
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));
        frame.render_widget(header, header_area);

        let lines: Vec<Line> = match view {
            Some(view) if !view.is_empty() => self
                .rows
                .iter()
                .skip(self.scroll)
                .take(self.page)
                .map(|row| graph_line(view, row))
                .collect(),
            Some(view) => vec![Line::from(view.placeholder().unwrap_or_default())],
            None => Vec::new(),
        };
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(Color::Black)),
            body_area,
        );

        let status = match (&self.error, self.loading) {
            (Some(err), _) => Span::styled(format!(" {err}"), Style::default().fg(Color::Red)),
            (None, true) => Span::styled(" loading…", Style::default().fg(Color::Yellow)),
            (None, false) => Span::styled(
                " ↑↓ scroll | r refresh | +/- limit | q quit",
                Style::default().fg(Color::DarkGray),
            ),
        };
        frame.render_widget(Paragraph::new(Line::from(status)), status_area);
    }
}

fn graph_line<'a>(view: &'a GraphView, row: &GlyphRow) -> Line<'a> {
    let graph_width = view.layout.lane_count * 2;
    let mut spans: Vec<Span> = row
        .cells
        .iter()
        .map(|glyph| {
            let style = glyph
                .color
                .map(|token| Style::default().fg(theme_to_color(token)))
                .unwrap_or_default();
            Span::styled(glyph.ch.to_string(), style)
        })
        .collect();

    let Some(commit) = row.commit.and_then(|index| view.commits.get(index)) else {
        return Line::from(spans);
    };

    spans.push(Span::raw(" ".repeat(graph_width.saturating_sub(row.cells.len()) + 1)));
    spans.push(Span::styled(
        commit.display_id(),
        Style::default().fg(Color::Yellow),
    ));
    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        commit.summary.as_str(),
        Style::default()
            .fg(theme_to_color(ThemeToken::TextPrimary))
            .add_modifier(Modifier::BOLD),
    ));
    for (text, token) in badges(commit) {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("[{text}]"),
            Style::default().fg(theme_to_color(token)),
        ));
    }
    if !commit.author.is_empty() {
        spans.push(Span::styled(
            format!("  {} · {}", commit.author, commit.relative_time),
            Style::default().fg(theme_to_color(ThemeToken::TextSecondary)),
        ));
    }
    Line::from(spans)
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.poll_loads();
        terminal.draw(|frame| app.draw(frame))?;

        if event::poll(Duration::from_millis(100))? && !app.handle_event(event::read()?) {
            return Ok(());
        }
    }
}

pub fn run_tui(source: HistorySource, limit: HistoryLimit) -> Result<()> {
    let mut app = App::new(source, limit);
    app.refresh();

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use swimlane_core::model::HistoryStatus;

    #[test]
    fn summary_line_reads_like_the_header() {
        let summary = GraphSummary {
            commit_count: 12,
            branch_count: 3,
            tag_count: 2,
            status: HistoryStatus::Complete,
        };
        assert_eq!(
            summary_line(&summary),
            "12 commits · 3 branches · 2 tags · Complete"
        );
        assert_eq!(
            summary_line(&GraphSummary::empty()),
            "0 commits · 0 branches · 0 tags · –"
        );
    }

    #[test]
    fn scrolling_stays_within_rows() {
        let mut app = App::new(HistorySource::File("unused.json".into()), HistoryLimit::default());
        app.rows = vec![
            GlyphRow {
                cells: Vec::new(),
                commit: None,
            };
            10
        ];
        app.page = 4;
        app.scroll_by(100);
        assert_eq!(app.scroll, 6);
        app.scroll_by(-100);
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn node_rows_carry_commit_text() {
        let view = GraphView::build(GraphDocument::new(
            vec![swimlane_protocol::CommitRecord::new("abc", Vec::<String>::new())],
            false,
        ));
        let rows = render_glyphs(&view);
        let text: String = graph_line(&view, &rows[0])
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        assert!(text.starts_with("●"));
        assert!(text.contains("abc"));
    }
}

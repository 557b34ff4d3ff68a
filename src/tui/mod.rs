//! Ratatui-based terminal dashboard.
//!
//! One tab per page. Page data is loaded on a background thread so the UI
//! keeps drawing a loading state; finished loads come back over a channel
//! and are cached per page until the user reloads.

use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Bar, BarChart, BarGroup, Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table,
        Tabs, Wrap,
    },
};
use tracing::info;

use crate::data::{PageData, PayloadSource, load_page};
use crate::domain::Page;
use crate::error::AppError;
use crate::views::{self, Accent, MetricCard, PageView, Section};

mod plotters_chart;

use plotters_chart::TrendPlottersChart;

/// Start the TUI on `page`.
pub fn run<S>(source: S, page: Page) -> Result<(), AppError>
where
    S: PayloadSource + Clone + Send + 'static,
{
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(source, page);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App<S> {
    source: S,
    page: Page,
    /// Index into the current page's sections (cards excluded).
    focus: usize,
    views: HashMap<Page, PageView>,
    pending: HashSet<Page>,
    tx: Sender<(Page, PageData)>,
    rx: Receiver<(Page, PageData)>,
    status: String,
}

impl<S> App<S>
where
    S: PayloadSource + Clone + Send + 'static,
{
    fn new(source: S, page: Page) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut app = Self {
            source,
            page,
            focus: 0,
            views: HashMap::new(),
            pending: HashSet::new(),
            tx,
            rx,
            status: String::new(),
        };
        app.request(page);
        app
    }

    /// Start a background load for `page` unless one is already running.
    fn request(&mut self, page: Page) {
        if !self.pending.insert(page) {
            return;
        }
        self.status = format!("Loading {}...", page.display_name());
        let source = self.source.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let data = load_page(&source, page);
            // The receiver is gone only when the UI has exited.
            let _ = tx.send((page, data));
        });
    }

    /// Apply finished loads. Returns true when anything changed.
    fn drain_loads(&mut self) -> bool {
        let mut changed = false;
        while let Ok((page, data)) = self.rx.try_recv() {
            self.pending.remove(&page);
            self.status = if data.is_empty() {
                format!("{}: no data (see log)", page.display_name())
            } else {
                format!("{}: loaded", page.display_name())
            };
            self.views.insert(page, views::build(page, &data));
            changed = true;
        }
        changed
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if self.drain_loads() {
                needs_redraw = true;
            }
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        info!("tui exited");
        Ok(())
    }

    /// Returns true when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => self.select(self.page.next()),
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => self.select(self.page.prev()),
            KeyCode::Char(c @ '1'..='7') => {
                let idx = c as usize - '1' as usize;
                self.select(Page::ALL[idx]);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let n = self.focusable().len();
                if n > 0 {
                    self.focus = (self.focus + 1) % n;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let n = self.focusable().len();
                if n > 0 {
                    self.focus = (self.focus + n - 1) % n;
                }
            }
            KeyCode::Char('r') => {
                self.views.remove(&self.page);
                self.request(self.page);
            }
            _ => {}
        }
        false
    }

    fn select(&mut self, page: Page) {
        if page == self.page {
            return;
        }
        self.page = page;
        self.focus = 0;
        if !self.views.contains_key(&page) {
            self.request(page);
        }
    }

    /// Sections of the current page other than the card row.
    fn focusable(&self) -> Vec<&Section> {
        self.views
            .get(&self.page)
            .map(|v| {
                v.sections
                    .iter()
                    .filter(|s| !matches!(s, Section::Cards(_)))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        self.draw_tabs(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_tabs(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let titles: Vec<Line> = Page::ALL
            .iter()
            .enumerate()
            .map(|(i, p)| Line::from(format!("{} {}", i + 1, p.display_name())))
            .collect();
        let selected = Page::ALL.iter().position(|p| *p == self.page).unwrap_or(0);
        let tabs = Tabs::new(titles)
            .select(selected)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled("Wayne Enterprises BI", Style::default().fg(Color::Cyan))),
            )
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let (title, subtitle) = self.page.heading();
        let Some(view) = self.views.get(&self.page) else {
            let msg = Paragraph::new(format!("Loading {}...", self.page.display_name()))
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().title(title).borders(Borders::ALL));
            frame.render_widget(msg, area);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(5), Constraint::Min(0)])
            .split(area);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(subtitle, Style::default().fg(Color::Gray)),
            ])),
            chunks[0],
        );

        if let Some(Section::Cards(cards)) = view.sections.iter().find(|s| matches!(s, Section::Cards(_))) {
            draw_cards(frame, chunks[1], cards);
        }

        let sections = self.focusable();
        match sections.get(self.focus) {
            Some(section) => {
                let title = format!("{} ({}/{})", section.title(), self.focus + 1, sections.len());
                draw_section(frame, chunks[2], &title, section);
            }
            None => {
                frame.render_widget(Block::default().borders(Borders::ALL), chunks[2]);
            }
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ page  1-7 jump  ↑/↓ section  r reload  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn accent_color(accent: Accent) -> Color {
    match accent {
        Accent::Wayne => Color::Rgb(0x0e, 0xa5, 0xe9),
        Accent::Green => Color::Rgb(0x10, 0xb9, 0x81),
        Accent::Blue => Color::Rgb(0x3b, 0x82, 0xf6),
        Accent::Purple => Color::Rgb(0x8b, 0x5c, 0xf6),
        Accent::Orange => Color::Rgb(0xf5, 0x9e, 0x0b),
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

fn draw_cards(frame: &mut ratatui::Frame<'_>, area: Rect, cards: &[MetricCard]) {
    if cards.is_empty() {
        return;
    }
    let constraints = vec![Constraint::Ratio(1, cards.len() as u32); cards.len()];
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (card, cell) in cards.iter().zip(cells.iter()) {
        let color = accent_color(card.accent);
        let text = Text::from(vec![
            Line::from(Span::styled(
                card.value.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(card.caption.clone(), Style::default().fg(Color::Gray))),
        ]);
        let p = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(card.title.clone()),
        );
        frame.render_widget(p, *cell);
    }
}

fn draw_section(frame: &mut ratatui::Frame<'_>, area: Rect, title: &str, section: &Section) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Clear, inner);

    match section {
        Section::Cards(cards) => draw_cards(frame, inner, cards),
        Section::Line(chart) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(legend_height(chart.lines.len()))])
                .split(inner);
            match TrendPlottersChart::new(chart) {
                Some(widget) => frame.render_widget(widget, chunks[0]),
                None => frame.render_widget(
                    Paragraph::new("No rows to plot").style(Style::default().fg(Color::Yellow)),
                    chunks[0],
                ),
            }
            frame.render_widget(legend(chart), chunks[1]);
        }
        Section::Bars(chart) => {
            let mut widget = BarChart::default().bar_width(3).bar_gap(0).group_gap(2);
            for (i, category) in chart.categories.iter().enumerate() {
                let bars: Vec<Bar> = chart
                    .series
                    .iter()
                    .map(|s| {
                        Bar::default()
                            .value(s.values.get(i).copied().unwrap_or(0))
                            .style(Style::default().fg(rgb(s.color)))
                    })
                    .collect();
                widget = widget.data(BarGroup::default().label(Line::from(category.clone())).bars(&bars));
            }
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(1)])
                .split(inner);
            frame.render_widget(widget, chunks[0]);
            let keys: Vec<Span> = chart
                .series
                .iter()
                .flat_map(|s| {
                    [
                        Span::styled("■ ", Style::default().fg(rgb(s.color))),
                        Span::raw(format!("{}  ", s.label)),
                    ]
                })
                .collect();
            frame.render_widget(Paragraph::new(Line::from(keys)), chunks[1]);
        }
        Section::Distribution(dist) => {
            let total = dist.total().max(1);
            let rows: Vec<Row> = dist
                .slices
                .iter()
                .enumerate()
                .map(|(i, (name, count))| {
                    let share = *count as f64 / total as f64;
                    let bar = "█".repeat((share * 30.0).round() as usize);
                    let color = rgb(views::PALETTE[i % views::PALETTE.len()]);
                    Row::new(vec![
                        Cell::from(name.clone()),
                        Cell::from(count.to_string()),
                        Cell::from(format!("{:.1}%", share * 100.0)),
                        Cell::from(Span::styled(bar, Style::default().fg(color))),
                    ])
                })
                .collect();
            let table = Table::new(
                rows,
                [Constraint::Length(20), Constraint::Length(8), Constraint::Length(8), Constraint::Min(10)],
            )
            .header(header_row(&["Category", "Count", "Share", ""]));
            frame.render_widget(table, inner);
        }
        Section::Table(t) => {
            let widths: Vec<Constraint> = t
                .headers
                .iter()
                .enumerate()
                .map(|(i, h)| {
                    let w = t
                        .rows
                        .iter()
                        .filter_map(|r| r.get(i))
                        .map(|c| c.chars().count())
                        .chain(std::iter::once(h.chars().count()))
                        .max()
                        .unwrap_or(4);
                    Constraint::Length(w as u16)
                })
                .collect();
            let headers: Vec<&str> = t.headers.iter().map(String::as_str).collect();
            let rows: Vec<Row> = t.rows.iter().map(|r| Row::new(r.clone())).collect();
            let table = Table::new(rows, widths).header(header_row(&headers)).column_spacing(2);
            frame.render_widget(table, inner);
        }
        Section::Narrative(n) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    n.headline.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(n.subheadline.clone(), Style::default().fg(Color::Gray))),
                Line::from(""),
            ];
            lines.extend(n.key_points.iter().map(|p| Line::from(format!("• {p}"))));
            lines.push(Line::from(""));
            lines.extend(n.metrics.iter().map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)),
                    Span::styled(value.clone(), Style::default().fg(Color::Cyan)),
                ])
            }));
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
        }
        Section::Bullets { items, .. } => {
            let list: Vec<ListItem> = items.iter().map(|i| ListItem::new(format!("• {i}"))).collect();
            frame.render_widget(List::new(list), inner);
        }
        Section::Empty { message, .. } => {
            frame.render_widget(
                Paragraph::new(message.clone()).style(Style::default().fg(Color::Yellow)),
                inner,
            );
        }
    }
}

fn header_row(headers: &[&str]) -> Row<'static> {
    Row::new(headers.iter().map(|h| h.to_string()).collect::<Vec<_>>())
        .style(Style::default().add_modifier(Modifier::BOLD))
}

fn legend_height(lines: usize) -> u16 {
    (lines.div_ceil(3) as u16).clamp(1, 4)
}

fn legend(chart: &views::LineChart) -> Paragraph<'static> {
    let spans: Vec<Span> = chart
        .lines
        .iter()
        .flat_map(|l| {
            let mark = if l.dashed { "-- " } else { "── " };
            [
                Span::styled(mark, Style::default().fg(rgb(l.color))),
                Span::raw(format!("{}   ", l.label)),
            ]
        })
        .collect();
    Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::domain::{Endpoint, OverviewPayload, Payload};
    use crate::error::FetchError;

    #[derive(Clone, Default)]
    struct Canned {
        calls: Arc<AtomicUsize>,
    }

    impl PayloadSource for Canned {
        fn fetch(&self, endpoint: Endpoint) -> Result<Payload, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match endpoint {
                Endpoint::Overview => Ok(Payload::Overview(OverviewPayload::default())),
                other => other.decode(b"{}").map_err(|source| FetchError::Decode {
                    url: other.path().to_string(),
                    source,
                }),
            }
        }
    }

    fn wait_for(app: &mut App<Canned>, page: Page) {
        for _ in 0..200 {
            app.drain_loads();
            if app.views.contains_key(&page) {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("page {page:?} never loaded");
    }

    #[test]
    fn loads_initial_page_in_background() {
        let mut app = App::new(Canned::default(), Page::Financial);
        assert!(app.pending.contains(&Page::Financial));
        wait_for(&mut app, Page::Financial);
        assert!(app.pending.is_empty());
        assert_eq!(app.status, "Financial: loaded");
        assert_eq!(app.focusable().len(), 2);
    }

    #[test]
    fn navigation_wraps_and_requests_pages() {
        let mut app = App::new(Canned::default(), Page::Overview);
        assert!(!app.handle_key(KeyCode::Left));
        assert_eq!(app.page, Page::News);
        assert!(app.pending.contains(&Page::News));

        app.handle_key(KeyCode::Char('3'));
        assert_eq!(app.page, Page::Hr);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn focus_cycles_through_sections() {
        let mut app = App::new(Canned::default(), Page::Security);
        wait_for(&mut app, Page::Security);
        app.handle_key(KeyCode::Up);
        assert_eq!(app.focus, 1);
        app.handle_key(KeyCode::Down);
        assert_eq!(app.focus, 0);
    }

    #[test]
    fn reload_refetches_current_page() {
        let source = Canned::default();
        let calls = source.calls.clone();
        let mut app = App::new(source, Page::Hr);
        wait_for(&mut app, Page::Hr);
        let before = calls.load(Ordering::SeqCst);

        app.handle_key(KeyCode::Char('r'));
        assert!(!app.views.contains_key(&Page::Hr));
        wait_for(&mut app, Page::Hr);
        assert_eq!(calls.load(Ordering::SeqCst), before + Page::Hr.endpoints().len());
    }
}

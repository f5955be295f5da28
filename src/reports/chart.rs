use std::io::{self, Stdout};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Constraint,
    style::{Color, Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition},
    Frame, Terminal,
};
use tracing::{debug, warn};

use crate::error::RoiError;
use crate::history::History;

pub const TITLE: &str = "ROI by investment";
pub const X_LABEL: &str = "Investment #";
pub const Y_LABEL: &str = "ROI (%)";
pub const SERIES_NAME: &str = "ROI";
pub const ZERO_LINE_NAME: &str = "Break-even (0%)";

/// Everything needed to plot ROI against the 1-based record index.
#[derive(Clone, Debug, PartialEq)]
pub struct RoiChart {
    points: Vec<(f64, f64)>,
    zero_line: [(f64, f64); 2],
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

impl RoiChart {
    pub fn new(history: &History) -> Option<RoiChart> {
        if history.is_empty() {
            return None;
        }

        let points: Vec<(f64, f64)> = history
            .all()
            .iter()
            .enumerate()
            .map(|(i, record)| ((i + 1) as f64, record.roi()))
            .collect();

        // a single point still gets a visible x span
        let x_max = (points.len() as f64).max(2f64);
        let x_bounds = [1f64, x_max];

        let (low, high) = points
            .iter()
            .fold((0f64, 0f64), |(low, high), &(_, roi)| (low.min(roi), high.max(roi)));
        let padding = ((high - low) * 0.1).max(1f64);
        let y_bounds = [low - padding, high + padding];

        Some(RoiChart {
            points,
            zero_line: [(x_bounds[0], 0f64), (x_bounds[1], 0f64)],
            x_bounds,
            y_bounds,
        })
    }

    pub fn points(&self) -> &[(f64, f64)] { &self.points }
    pub fn zero_line(&self) -> &[(f64, f64)] { &self.zero_line }
    pub fn x_bounds(&self) -> [f64; 2] { self.x_bounds }
    pub fn y_bounds(&self) -> [f64; 2] { self.y_bounds }
}

/// Something that can display a chart and returns once it is dismissed.
pub trait ChartSurface {
    fn show(&mut self, chart: &RoiChart) -> Result<(), RoiError>;
}

/// Full-screen terminal chart; closes on `q`, `Esc`, `Enter` or Ctrl-C.
pub struct TerminalChart;

impl TerminalChart {
    pub fn new() -> TerminalChart {
        TerminalChart
    }
}

impl ChartSurface for TerminalChart {
    fn show(&mut self, chart: &RoiChart) -> Result<(), RoiError> {
        enable_raw_mode()?;
        let _restore = TerminalGuard::new(restore_terminal);

        execute!(io::stdout(), EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        debug!(points = chart.points().len(), "showing roi chart");
        run_chart(&mut terminal, chart)?;
        Ok(())
    }
}

/// Runs `restore` on drop, so every exit from `show` after raw mode was
/// switched on puts the terminal back into line mode.
struct TerminalGuard {
    restore: fn() -> io::Result<()>,
}

impl TerminalGuard {
    fn new(restore: fn() -> io::Result<()>) -> TerminalGuard {
        TerminalGuard { restore }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = (self.restore)() {
            warn!(%err, "unable to restore terminal");
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}

fn run_chart(terminal: &mut Terminal<CrosstermBackend<Stdout>>, chart: &RoiChart) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, chart))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => break,
                // raw mode delivers ctrl-c as a key rather than a signal
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                _ => {}
            }
        }
    }
    Ok(())
}

fn draw(f: &mut Frame, chart: &RoiChart) {
    let datasets = vec![
        Dataset::default()
            .name(SERIES_NAME)
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(chart.points()),
        // unnamed, so it stays out of the legend
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .data(chart.points()),
        Dataset::default()
            .name(ZERO_LINE_NAME)
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(chart.zero_line()),
    ];

    let [x_min, x_max] = chart.x_bounds();
    let [y_min, y_max] = chart.y_bounds();

    let widget = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD)))
                .title_bottom("q / Esc / Enter to return"),
        )
        .x_axis(
            Axis::default()
                .title(X_LABEL)
                .style(Style::default().fg(Color::Gray))
                .bounds([x_min, x_max])
                .labels(axis_labels(x_min, x_max, 0)),
        )
        .y_axis(
            Axis::default()
                .title(Y_LABEL)
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(axis_labels(y_min, y_max, 1)),
        )
        .legend_position(Some(LegendPosition::TopLeft))
        .hidden_legend_constraints((Constraint::Ratio(1, 1), Constraint::Ratio(1, 1)));

    f.render_widget(widget, f.area());
}

fn axis_labels(min: f64, max: f64, precision: usize) -> Vec<String> {
    let mid = (min + max) / 2f64;
    vec![
        format!("{:.*}", precision, min),
        format!("{:.*}", precision, mid),
        format!("{:.*}", precision, max),
    ]
}

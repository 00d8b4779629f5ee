//! Ratatui-based terminal dashboard.
//!
//! The dashboard provides a settings panel for the two inputs and the active
//! preset, then renders the live prediction (verdict, marks, probability,
//! tier) alongside a marks-vs-study-hours trend chart at the current
//! attendance.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};

use crate::app::pipeline;
use crate::cli::TuiArgs;
use crate::domain::{ModelArtifacts, PredictionResult, PresetName, RawInput};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::TrendChart;

/// Trend curve resolution (samples across the hours range).
const TREND_SAMPLES: usize = 97;

/// Start the dashboard.
///
/// Artifacts are loaded before entering the alternate screen so a missing
/// bundle produces a normal error message instead of a garbled terminal.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    let model_dir = crate::app::resolve_model_dir(args.model_dir.clone());
    let artifacts = crate::io::load_artifacts(&model_dir)?;

    let mut app = App::new(artifacts, &args)?;

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

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

/// Settings fields, top to bottom.
const FIELD_HOURS: usize = 0;
const FIELD_ATTENDANCE: usize = 1;
const FIELD_PRESET: usize = 2;

struct App {
    artifacts: ModelArtifacts,
    preset: PresetName,
    hours: f64,
    attendance: f64,
    selected_field: usize,
    /// Field currently being edited via typed input, if any.
    editing: Option<usize>,
    edit_input: String,
    status: String,
    result: PredictionResult,
    trend: Vec<(f64, f64)>,
}

impl App {
    fn new(artifacts: ModelArtifacts, args: &TuiArgs) -> Result<Self, AppError> {
        let preset = args.preset.preset();
        let raw = RawInput {
            study_hours: args.hours,
            attendance_pct: args.attendance,
        };
        let result = pipeline::run_prediction(&artifacts, preset, raw)?;
        let hours = result.breakdown.clamped.study_hours;
        let attendance = result.breakdown.clamped.attendance_pct;
        let trend = pipeline::build_trend(&artifacts, preset, attendance, TREND_SAMPLES);
        let status = format!(
            "Model trained {} on n={} samples.",
            artifacts.meta.trained_at, artifacts.meta.n_samples
        );

        Ok(Self {
            artifacts,
            preset: args.preset,
            hours,
            attendance,
            selected_field: FIELD_HOURS,
            editing: None,
            edit_input: String::new(),
            status,
            result,
            trend,
        })
    }

    fn recompute(&mut self) -> Result<(), AppError> {
        let raw = RawInput {
            study_hours: self.hours,
            attendance_pct: self.attendance,
        };
        let preset = self.preset.preset();
        self.result = pipeline::run_prediction(&self.artifacts, preset, raw)?;
        // Keep the displayed inputs equal to what the pipeline used.
        self.hours = self.result.breakdown.clamped.study_hours;
        self.attendance = self.result.breakdown.clamped.attendance_pct;
        self.trend = pipeline::build_trend(&self.artifacts, preset, self.attendance, TREND_SAMPLES);
        Ok(())
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
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
                    if self.handle_key(key.code)? {
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
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        if self.editing.is_some() {
            return self.handle_value_edit(code);
        }

        match code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < FIELD_PRESET {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1)?,
            KeyCode::Right => self.adjust_field(1)?,
            KeyCode::Enter => {
                if self.selected_field != FIELD_PRESET {
                    self.editing = Some(self.selected_field);
                    self.edit_input.clear();
                    let name = field_name(self.selected_field);
                    self.status =
                        format!("Editing {name}: type a value, Enter to apply, Esc to cancel.");
                }
            }
            _ => {}
        }

        Ok(false)
    }

    fn handle_value_edit(&mut self, code: KeyCode) -> Result<bool, AppError> {
        match code {
            KeyCode::Esc => {
                self.editing = None;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => {
                let Some(field) = self.editing.take() else {
                    return Ok(false);
                };
                self.apply_value_input(field)?;
            }
            KeyCode::Backspace => {
                self.edit_input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() || c == '.' {
                    self.edit_input.push(c);
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn apply_value_input(&mut self, field: usize) -> Result<(), AppError> {
        let trimmed = self.edit_input.trim();
        let value: f64 = match trimmed.parse() {
            Ok(v) => v,
            Err(_) => {
                self.status = format!("Invalid number '{trimmed}'.");
                return Ok(());
            }
        };
        if !value.is_finite() {
            self.status = format!("Value '{trimmed}' is not finite.");
            return Ok(());
        }

        match field {
            FIELD_HOURS => self.hours = value,
            FIELD_ATTENDANCE => self.attendance = value,
            _ => {}
        }
        self.recompute()?;
        self.status = format!("{}: {:.1}", field_name(field), value);
        Ok(())
    }

    fn adjust_field(&mut self, delta: i32) -> Result<(), AppError> {
        let dir = f64::from(delta.signum());
        match self.selected_field {
            FIELD_HOURS => {
                self.hours = (self.hours + dir * 0.5).clamp(0.0, RawInput::STUDY_HOURS_MAX);
                self.recompute()?;
                self.status = format!("hours: {:.1}", self.hours);
            }
            FIELD_ATTENDANCE => {
                self.attendance =
                    (self.attendance + dir * 5.0).clamp(0.0, RawInput::ATTENDANCE_MAX);
                self.recompute()?;
                self.status = format!("attendance: {:.0}%", self.attendance);
            }
            FIELD_PRESET => {
                self.preset = if delta >= 0 {
                    self.preset.next()
                } else {
                    self.preset.prev()
                };
                self.recompute()?;
                self.status = format!("preset: {}", self.preset.display_name());
            }
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let (r, g, b) = self.result.tier.rgb();
        let tier_style = Style::default()
            .fg(Color::Rgb(r, g, b))
            .add_modifier(Modifier::BOLD);

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("gradecast", Style::default().fg(Color::Cyan)),
            Span::raw(" — student result prediction"),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "hours: {:.1}/day | attendance: {:.0}% | preset: {}",
                self.hours,
                self.attendance,
                self.preset.display_name(),
            ),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(vec![
            Span::styled(
                format!(
                    "{}  {:.1} marks  p={:.0}%  ",
                    self.result.verdict.display_name(),
                    self.result.marks,
                    self.result.pass_probability * 100.0,
                ),
                tier_style,
            ),
            Span::styled(self.result.tier.display_name(), tier_style),
        ]));
        lines.push(Line::from(Span::styled(
            self.result.advisory_text,
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(7)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(format!("Marks trend at {:.0}% attendance", self.attendance))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let widget = TrendChart {
            curve: &self.trend,
            marker: (self.hours, self.result.marks),
            marker_color: self.result.tier.rgb(),
            x_bounds: [0.0, RawInput::STUDY_HOURS_MAX],
            y_bounds: [0.0, 100.0],
            x_label: "study hours",
            y_label: "marks",
        };
        frame.render_widget(widget, inner);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let hours_label = if self.editing == Some(FIELD_HOURS) {
            format!("Hours: {}_", self.edit_input)
        } else {
            format!("Hours: {:.1}", self.hours)
        };
        let attendance_label = if self.editing == Some(FIELD_ATTENDANCE) {
            format!("Attendance: {}_", self.edit_input)
        } else {
            format!("Attendance: {:.0}%", self.attendance)
        };

        let mut items = Vec::new();
        items.push(ListItem::new(hours_label));
        items.push(ListItem::new(attendance_label));
        items.push(ListItem::new(format!(
            "Preset: {}",
            self.preset.display_name()
        )));
        if let Some(rec) = &self.result.recommendation {
            let qualifier = if rec.reaches_target { "to reach" } else { "toward" };
            items.push(ListItem::new(format!(
                "Next: add {:.1} {} {qualifier} {}",
                rec.delta,
                rec.axis.display_name(),
                rec.target_tier.display_name()
            )));
        }

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter edit value  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn field_name(field: usize) -> &'static str {
    match field {
        FIELD_HOURS => "hours",
        FIELD_ATTENDANCE => "attendance",
        _ => "preset",
    }
}

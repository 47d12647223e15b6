// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! The interactive chart editor (ratatui + crossterm). Each frame the canvas renderer draws into a
//! [`RecordingSurface`] measured in braille dots, and the recorded display list is replayed onto a
//! ratatui braille canvas. Cell labels are printed as text on top.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    buffer::Buffer,
    prelude::*,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine, Points},
        Block, Borders, Clear, Paragraph, Wrap,
    },
};

use crate::config::TikzConfig;
use crate::geom::{point, vector, Point, Vector};
use crate::gesture::{Gesture, GestureOutcome, PointerEvent, PointerEventKind};
use crate::model::{Coordinate, EditorViewState, Toggle};
use crate::ops::{default_cell_label, EditorState, Op};
use crate::render::{
    label_anchors, render_canvas, DrawOp, PointerState, RecordingSurface, RenderedFrame, Surface,
    ViewTransform,
};

mod theme;

use theme::TuiTheme;

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const TOAST_TTL: Duration = Duration::from_secs(2);
/// Braille dots per terminal column and row.
const DOTS_PER_COLUMN: u16 = 2;
const DOTS_PER_ROW: u16 = 4;
/// Discs smaller than this collapse to a single braille dot.
const MIN_DISC_RADIUS: f64 = 2.5;
const EMPTY_LABEL: &str = "•";
const SELECTION_MARKER: &str = "◇";

/// Runs the interactive editor until the user quits.
pub fn run(state: EditorState, export: TikzConfig) -> Result<(), Box<dyn Error>> {
    let theme = TuiTheme::from_env()?;
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(state, export, theme);
    tracing::info!(cells = app.state.grid().len(), arrows = app.state.arrows().len(), "tui started");

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if let Some(source) = app.take_pending_copy() {
            match copy_to_clipboard(&source) {
                Ok(via) => app.set_toast(format!("TikZ copied ({via})")),
                Err(err) => {
                    tracing::warn!(%err, "clipboard copy failed");
                    app.set_toast(format!("Copy failed: {err}"));
                }
            }
        }
    }

    tracing::info!(rev = app.state.rev(), "tui stopped");
    Ok(())
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Normal,
    Editing { at: Coordinate, buffer: String },
    Export { source: String, scroll: u16 },
}

struct App {
    state: EditorState,
    export: TikzConfig,
    theme: TuiTheme,
    gesture: Gesture,
    pointer: PointerState,
    /// Where the current primary press started, while it has not moved.
    press_origin: Option<Point>,
    selected: Coordinate,
    mode: Mode,
    show_help: bool,
    toast: Option<Toast>,
    surface: RecordingSurface,
    canvas_area: Rect,
    rendered: Option<RenderedFrame>,
    pending_copy: Option<String>,
    should_quit: bool,
}

impl App {
    fn new(state: EditorState, export: TikzConfig, theme: TuiTheme) -> Self {
        Self {
            state,
            export,
            theme,
            gesture: Gesture::Idle,
            pointer: PointerState::default(),
            press_origin: None,
            selected: Coordinate::ORIGIN,
            mode: Mode::Normal,
            show_help: false,
            toast: None,
            surface: RecordingSurface::new(0.0, 0.0),
            canvas_area: Rect::default(),
            rendered: None,
            pending_copy: None,
            should_quit: false,
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast { message: message.into(), expires_at: Instant::now() + TOAST_TTL });
    }

    fn active_toast(&self, now: Instant) -> Option<&str> {
        self.toast
            .as_ref()
            .filter(|toast| now < toast.expires_at)
            .map(|toast| toast.message.as_str())
    }

    fn take_pending_copy(&mut self) -> Option<String> {
        self.pending_copy.take()
    }

    /// Applies `op` to the current snapshot; rejected ops are reported as a toast.
    fn apply(&mut self, op: Op) -> bool {
        match self.state.apply(&op) {
            Ok(next) => {
                self.state = next;
                true
            }
            Err(err) => {
                tracing::warn!(%err, ?op, "op rejected");
                self.set_toast(err.to_string());
                false
            }
        }
    }

    fn view_transform(&self) -> Option<ViewTransform> {
        let view = self.state.view();
        ViewTransform::new(self.surface.size(), 1.0, view.pan, view.grid_size)
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            match key.code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match self.mode {
            Mode::Normal => self.handle_normal_key(key.code),
            Mode::Editing { .. } => self.handle_edit_key(key.code),
            Mode::Export { .. } => self.handle_export_key(key.code),
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) {
        let gs = self.state.view().grid_size;
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.apply(Op::StepPage(1));
            }
            KeyCode::Char('-') => {
                self.apply(Op::StepPage(-1));
            }
            KeyCode::Char('o') => {
                self.apply(Op::ToggleOrientation);
            }
            KeyCode::Char('g') => self.flip(Toggle::DotGrid),
            KeyCode::Char('a') => self.flip(Toggle::Axes),
            KeyCode::Char('d') => self.flip(Toggle::Differentials),
            KeyCode::Char('w') => self.flip(Toggle::ExtraArrows),
            KeyCode::Left | KeyCode::Char('h') => self.move_selection(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.move_selection(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(0, 1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(0, -1),
            KeyCode::Char('H') => self.pan_by(vector(gs, 0.0)),
            KeyCode::Char('L') => self.pan_by(vector(-gs, 0.0)),
            KeyCode::Char('K') => self.pan_by(vector(0.0, gs)),
            KeyCode::Char('J') => self.pan_by(vector(0.0, -gs)),
            KeyCode::Char('0') => {
                self.apply(Op::SetPan(Vector::zero()));
            }
            KeyCode::Char('e') | KeyCode::Enter => self.start_edit(),
            KeyCode::Char('x') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('u') => self.remove_last_arrow(),
            KeyCode::Char('C') => {
                if self.apply(Op::ClearArrows) {
                    self.set_toast("Arrows cleared");
                }
            }
            KeyCode::Char('X') => {
                if self.apply(Op::ClearGrid) {
                    self.set_toast("Cells cleared");
                }
            }
            KeyCode::Char('t') => self.open_export(),
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, code: KeyCode) {
        let Mode::Editing { at, buffer } = &mut self.mode else {
            return;
        };
        match code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => {
                let op = Op::SetCell { at: *at, content: std::mem::take(buffer) };
                self.mode = Mode::Normal;
                self.apply(op);
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(ch) if !ch.is_control() => buffer.push(ch),
            _ => {}
        }
    }

    fn handle_export_key(&mut self, code: KeyCode) {
        let Mode::Export { source, scroll } = &mut self.mode else {
            return;
        };
        match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('t') => {
                self.mode = Mode::Normal;
            }
            KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
            KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
            KeyCode::Home => *scroll = 0,
            KeyCode::Char('y') => self.pending_copy = Some(source.clone()),
            _ => {}
        }
    }

    fn flip(&mut self, toggle: Toggle) {
        self.apply(Op::FlipToggle(toggle));
    }

    fn move_selection(&mut self, dx: i32, dy: i32) {
        self.selected = Coordinate::new(
            self.selected.x.saturating_add(dx),
            self.selected.y.saturating_add(dy),
        );
        self.keep_selection_visible();
    }

    /// Recenters the view when the selected cell leaves the canvas.
    fn keep_selection_visible(&mut self) {
        let Some(view) = self.view_transform() else {
            return;
        };
        let center = view.cell_center(self.selected);
        let css = view.world_to_pixel(center);
        let size = self.surface.size();
        let margin = view.grid_size() / 2.0;
        let inside = css.x >= margin
            && css.y >= margin
            && css.x <= size.width - margin
            && css.y <= size.height - margin;
        if !inside {
            self.apply(Op::SetPan(vector(-center.x, center.y)));
        }
    }

    fn pan_by(&mut self, offset: Vector) {
        let pan = self.state.view().pan + offset;
        self.apply(Op::SetPan(pan));
    }

    fn start_edit(&mut self) {
        let at = self.selected;
        let buffer = match self.state.cell(at) {
            Some(label) => label.to_owned(),
            None => default_cell_label(self.state.view().page, at.x, at.y),
        };
        self.mode = Mode::Editing { at, buffer };
    }

    fn delete_selected(&mut self) {
        let at = self.selected;
        if !self.state.grid().contains(at) {
            self.set_toast(format!("No cell at {at}"));
            return;
        }
        if self.apply(Op::DeleteCell { at }) {
            self.set_toast(format!("Deleted {at}"));
        }
    }

    fn remove_last_arrow(&mut self) {
        let Some(index) = self.state.arrows().len().checked_sub(1) else {
            self.set_toast("No arrows");
            return;
        };
        let arrow = self.state.arrows()[index];
        if self.apply(Op::RemoveArrow { index }) {
            self.set_toast(format!("Removed {arrow}"));
        }
    }

    fn open_export(&mut self) {
        let options = self.export.options_for(self.state.view());
        let source = self.state.export(&options);
        tracing::info!(bytes = source.len(), page = options.page, "exported tikz");
        self.pending_copy = Some(source.clone());
        self.mode = Mode::Export { source, scroll: 0 };
    }

    /// Maps a terminal cell to the CSS pixel at its center on the canvas.
    ///
    /// Positions outside the canvas are clamped when `clamp` is set and rejected otherwise.
    fn canvas_point(&self, column: u16, row: u16, clamp: bool) -> Option<Point> {
        let area = self.canvas_area;
        if area.width == 0 || area.height == 0 {
            return None;
        }
        let inside = column >= area.x
            && column < area.right()
            && row >= area.y
            && row < area.bottom();
        if !inside && !clamp {
            return None;
        }
        let column = column.clamp(area.x, area.right() - 1) - area.x;
        let row = row.clamp(area.y, area.bottom() - 1) - area.y;
        Some(point(
            f64::from(column * DOTS_PER_COLUMN) + f64::from(DOTS_PER_COLUMN) / 2.0,
            f64::from(row * DOTS_PER_ROW) + f64::from(DOTS_PER_ROW) / 2.0,
        ))
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.show_help || self.mode != Mode::Normal {
            return;
        }
        let Some(view) = self.view_transform() else {
            return;
        };
        let modifier = mouse.modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT);

        let event = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(position) = self.canvas_point(mouse.column, mouse.row, false) else {
                    return;
                };
                self.press_origin = (!modifier).then_some(position);
                PointerEvent::down(position, modifier)
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(position) = self.canvas_point(mouse.column, mouse.row, true) else {
                    return;
                };
                if self.press_origin != Some(position) {
                    self.press_origin = None;
                }
                PointerEvent::moved(position, modifier)
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(position) = self.canvas_point(mouse.column, mouse.row, true) else {
                    return;
                };
                if self.press_origin.take() == Some(position) {
                    self.selected = view.pixel_to_cell(position);
                }
                PointerEvent::up(position, modifier)
            }
            MouseEventKind::Moved => {
                self.pointer = PointerState {
                    position: self.canvas_point(mouse.column, mouse.row, false),
                    primary_down: false,
                    modifier,
                };
                return;
            }
            _ => return,
        };

        self.pointer = PointerState {
            position: Some(event.position),
            primary_down: event.kind != PointerEventKind::Up,
            modifier,
        };

        let (next, outcome) = self.gesture.handle(&event, &view, self.state.view().pan);
        self.gesture = next;
        match outcome {
            GestureOutcome::None => {}
            GestureOutcome::Pan(pan) => {
                self.apply(Op::SetPan(pan));
            }
            GestureOutcome::Connect(arrow) => {
                if self.apply(Op::AddArrow(arrow)) {
                    self.set_toast(format!("Arrow {arrow}"));
                }
            }
            GestureOutcome::Abandoned => self.set_toast("Arrow abandoned"),
        }
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let now = Instant::now();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());
    let main_area = chunks[0];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(canvas_title(app.state.view()))
        .border_style(app.theme.panel_border_style(app.mode == Mode::Normal))
        .style(app.theme.base_style());
    let inner = block.inner(main_area);
    frame.render_widget(block, main_area);

    app.canvas_area = inner;
    app.surface.resize(
        f64::from(inner.width * DOTS_PER_COLUMN),
        f64::from(inner.height * DOTS_PER_ROW),
    );
    let scene = app.state.scene(app.pointer, app.gesture.connect_start());
    app.rendered = render_canvas(&mut app.surface, &scene);

    if let Some(rendered) = app.rendered {
        draw_canvas(frame, app, inner);
        draw_labels(frame.buffer_mut(), app, &rendered.view, inner);
    }

    frame.render_widget(Paragraph::new(footer_line(app, now)), chunks[1]);

    match &app.mode {
        Mode::Editing { at, buffer } => render_edit_prompt(frame, &app.theme, *at, buffer, main_area),
        Mode::Export { source, scroll } => {
            render_export(frame, &app.theme, source, *scroll, main_area);
        }
        Mode::Normal => {}
    }
    if app.show_help {
        render_help(frame, &app.theme, main_area);
    }
}

fn draw_canvas(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let width = f64::from(area.width * DOTS_PER_COLUMN);
    let height = f64::from(area.height * DOTS_PER_ROW);
    let ops = app.surface.ops();
    let theme = &app.theme;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(move |ctx| paint_ops(ctx, ops, theme, height));
    frame.render_widget(canvas, area);
}

/// Replays a recorded frame. Canvas y grows upwards, device y grows downwards.
fn paint_ops(ctx: &mut Context<'_>, ops: &[DrawOp], theme: &TuiTheme, height: f64) {
    for op in ops {
        match op {
            DrawOp::Clear => {}
            DrawOp::Polyline { points, color, .. } => {
                let color = theme.canvas_color(*color);
                for pair in points.windows(2) {
                    ctx.draw(&CanvasLine::new(
                        pair[0].x,
                        height - pair[0].y,
                        pair[1].x,
                        height - pair[1].y,
                        color,
                    ));
                }
            }
            DrawOp::Disc { center, radius, color } => {
                let coords = disc_dots(*center, *radius, height);
                ctx.draw(&Points { coords: &coords, color: theme.canvas_color(*color) });
            }
        }
    }
}

fn disc_dots(center: Point, radius: f64, height: f64) -> Vec<(f64, f64)> {
    if radius < MIN_DISC_RADIUS {
        return vec![(center.x, height - center.y)];
    }
    let reach = radius.ceil() as i32;
    let mut coords = Vec::new();
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let (dx, dy) = (f64::from(dx), f64::from(dy));
            if dx * dx + dy * dy <= radius * radius {
                coords.push((center.x + dx, height - (center.y + dy)));
            }
        }
    }
    coords
}

fn draw_labels(buf: &mut Buffer, app: &App, view: &ViewTransform, area: Rect) {
    let max_width = ((view.grid_size() / f64::from(DOTS_PER_COLUMN)) as usize).saturating_sub(1).max(1);
    let selected_anchor = view.world_to_pixel(view.cell_center(app.selected));
    let mut selected_drawn = false;

    for (anchor, label) in label_anchors(app.state.grid(), view) {
        let is_selected = view.pixel_to_cell(anchor) == app.selected;
        let (text, style) = match (label.is_empty(), is_selected) {
            (true, true) => (EMPTY_LABEL, app.theme.selection_style()),
            (true, false) => (EMPTY_LABEL, app.theme.label_style()),
            (false, true) => (label.as_str(), app.theme.selection_style()),
            (false, false) => (label.as_str(), app.theme.label_style()),
        };
        selected_drawn |= is_selected;
        place_label(buf, area, anchor, text, max_width, style);
    }

    if !selected_drawn {
        place_label(buf, area, selected_anchor, SELECTION_MARKER, 1, app.theme.selection_style());
    }
}

/// Prints `text` centered on `anchor` (CSS pixels), clipped to `area`.
fn place_label(buf: &mut Buffer, area: Rect, anchor: Point, text: &str, max_width: usize, style: Style) {
    let column = (anchor.x / f64::from(DOTS_PER_COLUMN)).floor();
    let row = (anchor.y / f64::from(DOTS_PER_ROW)).floor();
    if column < 0.0 || row < 0.0 || column >= f64::from(area.width) || row >= f64::from(area.height) {
        return;
    }

    let width = text.chars().count().min(max_width);
    let x = (area.x + column as u16).saturating_sub((width / 2) as u16).max(area.x);
    let y = area.y + row as u16;
    let room = usize::from(area.right() - x).min(width);
    buf.set_stringn(x, y, text, room, style);
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
}

fn copy_to_clipboard(text: &str) -> Result<&'static str, String> {
    let mut stdout = io::stdout();
    execute!(stdout, Print(osc52_sequence(text))).map_err(|err| err.to_string())?;
    Ok("osc52")
}

fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}

include!("chrome.rs");

use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEvent, MouseEventKind,
};
use drizzle_core::{PROPERTY_COLOR, PROPERTY_RAINBOW, PROPERTY_RAINBOW_SPEED, RainSettings};
use drizzle_rain::{Canvas, RainState};
use rand::rngs::StdRng;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    text::{Line, Span},
};
use serde_json::json;

mod cli;
mod logging;

use cli::Cli;

/// Fixed colors cycled with `c`.
const COLOR_PRESETS: &[&str] = &["#00FF41", "#7D34FD", "#00B4FF", "#FF2E63", "#F5F5F5"];

/// Rainbow speed change per key press, on the host 0-100 scale.
const SPEED_STEP: f64 = 10.0;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;
    let settings = cli.settings()?;
    let rng = cli.rng();

    let terminal = ratatui::init();
    install_mouse_panic_hook();
    crossterm::execute!(io::stdout(), EnableMouseCapture)?;
    let result = App::new(settings, rng).run(terminal);
    if let Err(e) = disable_mouse_capture(&mut io::stdout()) {
        tracing::warn!("failed to disable mouse capture: {e}");
    }
    ratatui::restore();
    result
}

/// Chain a panic hook that stops mouse reporting before the terminal is
/// restored by the hook `ratatui::init` installed.
fn install_mouse_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_mouse_capture(&mut io::stdout());
        hook(info);
    }));
}

fn disable_mouse_capture<W: io::Write>(out: &mut W) -> io::Result<()> {
    crossterm::execute!(out, DisableMouseCapture)
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Rain animation state.
    state: RainState,
    /// Persistent raster the rain is painted on.
    canvas: Canvas,
    /// Random source for glyphs and column restarts.
    rng: StdRng,
    /// Show the key help line.
    show_help: bool,
    /// Index into [`COLOR_PRESETS`] of the last chosen color.
    color_preset: usize,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(settings: RainSettings, rng: StdRng) -> Self {
        let canvas = Canvas::new(0, 0, u32::from(settings.cell_size));
        Self {
            running: false,
            state: RainState::new(settings, 0, 0),
            canvas,
            rng,
            show_help: true,
            color_preset: 0,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.on_resize(size.width, size.height);

        self.running = true;
        let mut next_frame = Instant::now();
        while self.running {
            let now = Instant::now();
            if now >= next_frame {
                self.state.tick(&mut self.canvas, now, &mut self.rng);
                terminal.draw(|frame| self.render(frame))?;
                next_frame = now + self.frame_interval();
            }
            self.handle_crossterm_events(next_frame.saturating_duration_since(Instant::now()))?;
        }
        tracing::info!(frames = self.state.frames(), "exiting");
        Ok(())
    }

    fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.state.settings().frame_interval_ms.max(1))
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(&self.canvas, area);

        if !self.show_help {
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Rain
            Constraint::Length(1), // Help text
        ])
        .split(area);

        let settings = self.state.settings();
        let color: Color = settings.color.into();
        let status = if settings.rainbow {
            format!("rainbow {:.0}", settings.rainbow_speed * 100.0)
        } else {
            settings.color.to_string()
        };
        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "r".bold().fg(color),
            " rainbow  ".dark_gray(),
            "c".bold().fg(color),
            " color  ".dark_gray(),
            "+/-".bold().fg(color),
            " speed  ".dark_gray(),
            "p".bold().fg(color),
            Span::raw(format!(" trail: {}  ", settings.trail_profile.name())).dark_gray(),
            "h".bold().fg(color),
            " hide  ".dark_gray(),
            Span::raw(status).dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most until the next frame is due.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(width, height) => self.on_resize(width, height),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('r')) => self.toggle_rainbow(),
            (_, KeyCode::Char('c')) => self.cycle_color(),
            (_, KeyCode::Char('+') | KeyCode::Char('=')) => self.change_speed(SPEED_STEP),
            (_, KeyCode::Char('-')) => self.change_speed(-SPEED_STEP),
            (_, KeyCode::Char('p')) => self.toggle_trail_profile(),
            (_, KeyCode::Char('h')) => self.show_help = !self.show_help,
            _ => {}
        }
    }

    /// Feed pointer movement to the trail, in canvas pixels.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            return;
        }
        let cell = self.state.grid().cell_size() as i32;
        let x = i32::from(mouse.column) * cell;
        let y = i32::from(mouse.row) * cell;
        self.state.on_pointer_move(x, y, Instant::now(), &mut self.rng);
    }

    /// Resize the canvas to the terminal and restart the columns.
    fn on_resize(&mut self, cols: u16, rows: u16) {
        self.canvas.resize(cols, rows);
        let (width, height) = self.canvas.pixel_size();
        self.state.resize(width, height, &mut self.canvas);
    }

    /// Toggle rainbow mode.
    fn toggle_rainbow(&mut self) {
        let rainbow = !self.state.settings().rainbow;
        self.state.set_property(PROPERTY_RAINBOW, &json!(rainbow));
    }

    /// Switch to the next fixed color preset.
    fn cycle_color(&mut self) {
        self.color_preset = (self.color_preset + 1) % COLOR_PRESETS.len();
        self.state
            .set_property(PROPERTY_COLOR, &json!(COLOR_PRESETS[self.color_preset]));
        self.state.set_property(PROPERTY_RAINBOW, &json!(false));
    }

    /// Step the rainbow speed, keeping it non-negative.
    fn change_speed(&mut self, delta: f64) {
        let current = self.state.settings().rainbow_speed * 100.0;
        let speed = (current + delta).round().max(0.0);
        self.state.set_property(PROPERTY_RAINBOW_SPEED, &json!(speed));
    }

    /// Switch between the ring and cardinal trail.
    fn toggle_trail_profile(&mut self) {
        let profile = self.state.settings().trail_profile.toggle();
        self.state.set_trail_profile(profile);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

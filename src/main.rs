//! A clip-review carousel for the terminal.
//!
//! Drag the strip with the mouse, scroll it with the wheel, click the
//! pagination dots, or use the arrow keys.  Press Enter to choose the
//! centered clip; its id is printed to stdout on exit.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr, Stderr};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::core::clip::sample_clips;
use crate::ui::{carousel_widget::CarouselWidget, pagination::PaginationDots, theme::Theme};

/// Prefix of the machine-readable result line.
const CHOICE_PREFIX: &str = "__CLIP__=";

/// Animation / timer frame interval (~60 fps).
const FRAME: Duration = Duration::from_millis(16);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Pick a clip from a scrollable carousel")]
struct Cli {
    /// Index of the clip selected at start.
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Card width in columns (overrides the config file).
    #[arg(long)]
    card_width: Option<u16>,

    /// Blank columns between cards (overrides the config file).
    #[arg(long)]
    gap: Option<u16>,

    /// Write the effective configuration to the config file and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut Frame, state: &AppState) {
    let layout = state.layout();

    let header = Paragraph::new(vec![
        Line::from(Span::styled("Clips ready to share", Theme::title_style())),
        Line::from(Span::styled("Choose which to post", Theme::subtitle_style())),
    ])
    .centered();
    frame.render_widget(header, layout.header_area);

    let carousel = CarouselWidget::new(&state.clips, state.surface.layout(), state.surface.opacities())
        .selected(state.selected);
    frame.render_widget(carousel, layout.carousel_area);

    frame.render_widget(
        PaginationDots {
            count: state.clips.len(),
            selected: state.selected,
        },
        layout.dots_area,
    );

    let mut status_text = state.config.status_bar_hint();
    if !state.clips.is_empty() {
        status_text.push_str(&format!(" | {}/{}", state.selected + 1, state.clips.len()));
    }
    if !state.surface.snap_enabled() {
        status_text.push_str(" | dragging");
    }
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);
}

// ───────────────────────────────────────── terminal ─────────

/// Enter the alternate screen with mouse capture.  Raw mode must already be on.
fn setup_terminal() -> Result<(Terminal<CrosstermBackend<Stderr>>, Rect)> {
    execute!(stderr(), EnterAlternateScreen, EnableMouseCapture)?;
    let terminal = Terminal::new(CrosstermBackend::new(stderr()))?;
    let size = terminal.size()?;
    Ok((terminal, Rect::new(0, 0, size.width, size.height)))
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stderr(), LeaveAlternateScreen, DisableMouseCapture)
}

/// Run `setup`; if it fails, run `restore` before handing the error back.
fn or_restore<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    setup().inspect_err(|_| restore())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only emits when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    let mut config = config::AppConfig::load();
    if let Some(width) = cli.card_width {
        config.card_width = width.clamp(12, 200);
    }
    if let Some(gap) = cli.gap {
        config.card_gap = gap.min(20);
    }

    if cli.write_config {
        let path = config.save()?;
        eprintln!("wrote {}", path.display());
        return Ok(());
    }

    let clips = sample_clips();
    let mut state = AppState::new(clips, cli.start, config);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let (mut terminal, area) = or_restore(setup_terminal, || {
        if let Err(err) = restore_terminal() {
            tracing::warn!(%err, "failed to restore terminal");
        }
    })?;
    state.mount(area);

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(Duration::from_millis(50));
    let mut frames = tokio::time::interval(FRAME);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // ── event loop ────────────────────────────────────────────
    let result: Result<()> = loop {
        if let Err(err) = terminal.draw(|frame| draw(frame, &state)) {
            break Err(err.into());
        }

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(w, h) => handler::handle_resize(&mut state, w, h),
                }
            }

            _ = frames.tick() => state.tick(),
        }

        if state.should_quit {
            break Ok(());
        }
    };

    state.unmount();

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result?;

    if let Some(clip) = state.chosen.and_then(|i| state.clips.get(i)) {
        tracing::debug!(id = %clip.id, "clip chosen");
        println!("{CHOICE_PREFIX}{}", clip.id);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn failed_setup_restores_terminal() {
        let restored = Cell::new(false);
        let result: Result<()> = or_restore(|| Err(anyhow::anyhow!("no tty")), || restored.set(true));
        assert!(result.is_err());
        assert!(restored.get());
    }

    #[test]
    fn successful_setup_leaves_terminal_alone() {
        let restored = Cell::new(false);
        let value = or_restore(|| Ok(7), || restored.set(true)).unwrap();
        assert_eq!(value, 7);
        assert!(!restored.get());
    }
}

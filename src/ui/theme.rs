//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── cards ──────────────────────────────────────────────────
    /// Card text faded by `opacity` (0.2–1.0) against a dark background.
    pub fn card_style(opacity: f64) -> Style {
        let v = Self::fade(opacity);
        Style::default().fg(Color::Rgb(v, v, v))
    }

    pub fn card_title_style(opacity: f64) -> Style {
        let v = Self::fade(opacity);
        Style::default()
            .fg(Color::Rgb(v, v / 2 + v / 3, v / 4))
            .add_modifier(Modifier::BOLD)
    }

    pub fn card_border_style(opacity: f64, selected: bool) -> Style {
        let v = Self::fade(opacity);
        if selected {
            Style::default().fg(Color::Rgb(v / 2, v, v))
        } else {
            Style::default().fg(Color::Rgb(v / 2, v / 2, v / 2))
        }
    }

    fn fade(opacity: f64) -> u8 {
        (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    // ── pagination ─────────────────────────────────────────────
    pub fn dot_style(active: bool) -> Style {
        if active {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn subtitle_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}

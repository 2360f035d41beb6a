//! User configuration — carousel tuning, keybindings, and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/clip-carousel/config.toml` (default
//! `~/.config/clip-carousel/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

use crate::core::carousel::{ControllerConfig, DRAG_THRESHOLD, LAYOUT_SETTLE_DELAY, SETTLE_DELAY};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions in the carousel view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    PrevClip,
    NextClip,
    ChooseClip,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used when writing the config file).
    pub const ALL: &[Action] = &[
        Action::PrevClip,
        Action::NextClip,
        Action::ChooseClip,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::PrevClip => "prev_clip",
            Action::NextClip => "next_clip",
            Action::ChooseClip => "choose_clip",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        match s {
            "prev_clip" => Some(Action::PrevClip),
            "next_clip" => Some(Action::NextClip),
            "choose_clip" => Some(Action::ChooseClip),
            "quit" => Some(Action::Quit),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"←"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            _ => key_name(self.code),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Left"`, `"Ctrl+c"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&key_name(self.code));
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Left"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── errors ────────────

/// Why a single config line was rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("line {line}: expected `key = value`")]
    Malformed { line: usize },
    #[error("line {line}: unknown setting `{key}`")]
    UnknownKey { line: usize, key: String },
    #[error("line {line}: invalid value `{value}` for `{key}`")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
    },
}

// ───────────────────────────────────────── config ────────────

/// Application configuration — carousel tuning and keybindings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Pointer travel (columns) before a press becomes a drag.
    pub drag_threshold: f64,
    /// Quiet period before a scroll settles on a clip.
    pub settle_delay_ms: u64,
    /// Deferred layout pass after mount / resize.
    pub layout_settle_ms: u64,
    /// Card width in columns.
    pub card_width: u16,
    /// Blank columns between cards.
    pub card_gap: u16,
    /// Columns moved per mouse-wheel notch.
    pub wheel_step: u16,
    /// Smooth-scroll damping per frame, 0.05–0.95.
    pub scroll_speed: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            drag_threshold: DRAG_THRESHOLD,
            settle_delay_ms: SETTLE_DELAY.as_millis() as u64,
            layout_settle_ms: LAYOUT_SETTLE_DELAY.as_millis() as u64,
            card_width: 34,
            card_gap: 2,
            wheel_step: 4,
            scroll_speed: 0.3,
        }
    }
}

impl AppConfig {
    /// Hard-coded default bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(PrevClip, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(NextClip, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(ChooseClip, vec![KeyBind::new(Enter, n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: browse | drag or wheel: scroll | {}: choose | {}: quit",
            self.short_binding(Action::PrevClip),
            self.short_binding(Action::NextClip),
            self.short_binding(Action::ChooseClip),
            self.short_binding(Action::Quit),
        )
    }

    /// Controller tunables derived from this config.
    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            drag_threshold: self.drag_threshold,
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            layout_settle_delay: Duration::from_millis(self.layout_settle_ms),
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse_config(&contents),
            Err(err) => {
                if path.exists() {
                    tracing::warn!("cannot read {}: {err}", path.display());
                }
                Self::default()
            }
        }
    }

    /// Persist current config to disk, returning the path written.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(path)
    }

    /// Parse a whole config file.  Bad lines are logged and skipped.
    pub fn parse_config(s: &str) -> Self {
        let mut config = Self::default();
        for (i, line) in s.lines().enumerate() {
            if let Err(err) = config.apply_line(i + 1, line) {
                tracing::warn!("config: {err}");
            }
        }
        config
    }

    /// Apply one `key = value` line.  Comments, blanks and section headers
    /// are accepted and ignored.
    fn apply_line(&mut self, line_no: usize, line: &str) -> Result<(), ConfigError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
            return Ok(());
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(ConfigError::Malformed { line: line_no });
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"');

        let invalid = || ConfigError::InvalidValue {
            line: line_no,
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "drag_threshold" => {
                let v: f64 = value.parse().map_err(|_| invalid())?;
                if !v.is_finite() {
                    return Err(invalid());
                }
                self.drag_threshold = v.clamp(1.0, 64.0);
            }
            "settle_delay_ms" => {
                let v: u64 = value.parse().map_err(|_| invalid())?;
                self.settle_delay_ms = v.clamp(20, 2000);
            }
            "layout_settle_ms" => {
                let v: u64 = value.parse().map_err(|_| invalid())?;
                self.layout_settle_ms = v.min(1000);
            }
            "card_width" => {
                let v: u16 = value.parse().map_err(|_| invalid())?;
                self.card_width = v.clamp(12, 200);
            }
            "card_gap" => {
                let v: u16 = value.parse().map_err(|_| invalid())?;
                self.card_gap = v.min(20);
            }
            "wheel_step" => {
                let v: u16 = value.parse().map_err(|_| invalid())?;
                self.wheel_step = v.clamp(1, 50);
            }
            "scroll_speed" => {
                let v: f64 = value.parse().map_err(|_| invalid())?;
                if !v.is_finite() {
                    return Err(invalid());
                }
                self.scroll_speed = v.clamp(0.05, 0.95);
            }
            _ => {
                let Some(action) = Action::from_config_key(key) else {
                    return Err(ConfigError::UnknownKey {
                        line: line_no,
                        key: key.to_string(),
                    });
                };
                let parsed: Vec<KeyBind> = value
                    .split(',')
                    .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                    .collect();
                if parsed.is_empty() {
                    return Err(invalid());
                }
                self.bindings.insert(action, parsed);
            }
        }
        Ok(())
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# clip-carousel configuration".to_string(),
            String::new(),
            "# Carousel".to_string(),
            format!("drag_threshold = {}", self.drag_threshold),
            format!("settle_delay_ms = {}", self.settle_delay_ms),
            format!("layout_settle_ms = {}", self.layout_settle_ms),
            format!("card_width = {}", self.card_width),
            format!("card_gap = {}", self.card_gap),
            format!("wheel_step = {}", self.wheel_step),
            format!("scroll_speed = {}", self.scroll_speed),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/clip-carousel/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("clip-carousel").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    #[test]
    fn default_bindings_resolve() {
        let config = AppConfig::default();
        assert_eq!(
            config.match_key(key(KeyCode::Left, KeyModifiers::NONE)),
            Some(Action::PrevClip)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char('l'), KeyModifiers::NONE)),
            Some(Action::NextClip)
        );
        assert_eq!(config.match_key(key(KeyCode::Char('x'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn parses_tuning_and_bindings() {
        let config = AppConfig::parse_config(
            "# comment\n\
             [carousel]\n\
             drag_threshold = 12\n\
             settle_delay_ms = 5\n\
             card_width = 40\n\
             prev_clip = Alt+Left, a\n",
        );
        assert_eq!(config.drag_threshold, 12.0);
        assert_eq!(config.settle_delay_ms, 20);
        assert_eq!(config.card_width, 40);
        assert_eq!(
            config.bindings[&Action::PrevClip],
            vec![
                KeyBind::new(KeyCode::Left, KeyModifiers::ALT),
                KeyBind::new(KeyCode::Char('a'), KeyModifiers::NONE),
            ]
        );
        assert_eq!(
            config.bindings[&Action::NextClip],
            AppConfig::default_bindings()[&Action::NextClip]
        );
    }

    #[test]
    fn bad_lines_are_rejected_individually() {
        let mut config = AppConfig::default();
        assert_eq!(
            config.apply_line(3, "card_width"),
            Err(ConfigError::Malformed { line: 3 })
        );
        assert_eq!(
            config.apply_line(4, "colour = red"),
            Err(ConfigError::UnknownKey {
                line: 4,
                key: "colour".into()
            })
        );
        assert!(matches!(
            config.apply_line(5, "wheel_step = lots"),
            Err(ConfigError::InvalidValue { line: 5, .. })
        ));
        assert!(config.apply_line(6, "quit = Hyper+q").is_err());
        assert_eq!(config.wheel_step, AppConfig::default().wheel_step);
    }

    #[test]
    fn serialised_config_parses_back() {
        let mut config = AppConfig::default();
        config.card_gap = 5;
        config.scroll_speed = 0.5;
        config
            .bindings
            .insert(Action::Quit, vec![KeyBind::new(KeyCode::Char('c'), KeyModifiers::CONTROL)]);

        let reparsed = AppConfig::parse_config(&config.serialise());
        assert_eq!(reparsed.card_gap, 5);
        assert_eq!(reparsed.scroll_speed, 0.5);
        assert_eq!(reparsed.bindings, config.bindings);
    }

    #[test]
    fn display_uses_arrows() {
        let bind = KeyBind::new(KeyCode::Left, KeyModifiers::CONTROL);
        assert_eq!(bind.display(), "Ctrl+←");
        assert_eq!(bind.to_config_string(), "Ctrl+Left");
    }
}

//! Input handling — maps key/mouse events to carousel events and selection
//! changes.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::config::Action;
use crate::core::carousel::CarouselEvent;
use crate::ui::{layout, pagination};

use super::state::AppState;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }
    // Only process Press events (ignore Release/Repeat on supported terminals).
    if key.kind != KeyEventKind::Press {
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::PrevClip => {
            let index = state.selected.saturating_sub(1);
            state.select(index);
        }
        Action::NextClip => {
            let index = (state.selected + 1).min(state.clips.len().saturating_sub(1));
            state.select(index);
        }
        Action::ChooseClip => {
            if state.selected_clip().is_some() {
                state.chosen = Some(state.selected);
                state.should_quit = true;
            }
        }
        Action::Quit => {
            state.should_quit = true;
        }
    }
}

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let regions = state.layout();
    let inside = layout::contains(regions.carousel_area, mouse.column, mouse.row);
    let x = f64::from(mouse.column);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if inside {
                state.pointer_down = true;
                state.send(CarouselEvent::PointerDown { x });
            } else if layout::contains(regions.dots_area, mouse.column, mouse.row) {
                if let Some(index) =
                    pagination::dot_at(regions.dots_area, state.clips.len(), mouse.column)
                {
                    state.select(index);
                }
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if !state.pointer_down {
                return;
            }
            if inside {
                state.send(CarouselEvent::PointerMove { x });
            } else {
                release(state, CarouselEvent::PointerLeave);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if state.pointer_down {
                release(state, CarouselEvent::PointerUp);
            }
        }
        // Motion without a button means the release happened somewhere we
        // never heard about.
        MouseEventKind::Moved => {
            if state.pointer_down {
                release(state, CarouselEvent::PointerLeave);
            }
        }
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight if inside => {
            state.scroll_by(f64::from(state.config.wheel_step));
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft if inside => {
            state.scroll_by(-f64::from(state.config.wheel_step));
        }
        _ => {}
    }
}

/// Process a terminal resize.
pub fn handle_resize(state: &mut AppState, width: u16, height: u16) {
    state.resize(Rect::new(0, 0, width, height));
}

fn release(state: &mut AppState, event: CarouselEvent) {
    state.pointer_down = false;
    state.send(event);
}

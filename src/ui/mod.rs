//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  No carousel decisions are made here.

pub mod carousel_widget;
pub mod layout;
pub mod pagination;
pub mod smooth_scroll;
pub mod theme;

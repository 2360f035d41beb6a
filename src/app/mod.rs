//! Application orchestration — state management, event loop plumbing, input
//! handling, and the render surface the carousel controller drives.

pub mod event;
pub mod handler;
pub mod state;
pub mod surface;

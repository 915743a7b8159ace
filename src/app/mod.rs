//! Application orchestration: page model, state, event loop plumbing and
//! input handling.

pub mod event;
pub mod handler;
pub mod page;
pub mod settings;
pub mod state;

//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer reads the surfaces the animator wrote and turns them into
//! cells on the terminal.  No animation math happens here.

pub mod card_stage;
pub mod chrome;
pub mod layout;
pub mod page_view;
pub mod popup;
pub mod smooth_scroll;
pub mod theme;

//! Core animation engine – progress mapping, depth, style, commit, scheduling.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Hosts talk
//! to it through [`stack::VisualHandle`] and plain numbers.

pub mod card;
pub mod cta;
pub mod depth;
pub mod driver;
pub mod geometry;
pub mod page_progress;
pub mod schedule;
pub mod stack;
pub mod style;

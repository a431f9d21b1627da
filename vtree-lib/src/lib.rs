//! Virtual scrolling tree engine
//!
//! Windows an arbitrarily large, lazily loaded tree into a fixed-size
//! viewport. The engine tracks which branches are expanded, works out the
//! minimal set of range queries covering the visible rows, and merges the
//! provider's answers into one ordered row sequence. Rendering and data
//! fetching are left to the caller.

pub mod config;
pub mod error;
pub mod provider;
pub mod tree;
pub mod window;

mod engine;

pub use config::EngineConfig;
pub use engine::*;
pub use window::{Page, Query, RenderedRow, Viewport};

//! Data layer: recording model and file loading.
//!
//! Architecture:
//! ```text
//!  tab-separated instrument export (.txt)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  skip header → parse rows → Recording
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │  Recording    │  Vec<Sample>, chronological
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │  EventQueue   │  rows with a non-blank comment, ascending
//!   └──────────────┘
//! ```

pub mod loader;
pub mod model;

//! Event-window analysis: outlier rejection, gap filling and baseline
//! correction, plus CSV export of the result.
//!
//! ```text
//!   Recording + anchor row
//!        │  slice [anchor - pre, anchor + post]
//!        ▼
//!   ┌──────────┐
//!   │ outliers  │  Q1/Q3 fences → NaN
//!   └──────────┘
//!        │
//!        ▼
//!   ┌─────────────┐
//!   │ interpolate  │  linear fill along the time axis
//!   └─────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ baseline  │  mean of the last seconds before the event, subtracted
//!   └──────────┘
//!        │
//!        ▼
//!     export → timestamp_<row>_<tag>.csv
//! ```

pub mod export;
pub mod interpolate;
pub mod outliers;
pub mod stats;
pub mod variant;
pub mod window;

//! Data layer: row parsing and finite-size error computation.
//!
//! Architecture:
//! ```text
//!  result-p15.dat
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  scan for `inf`, then scan data rows → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ Dataset  │  Reference + Vec<Observation>, file order
//!   └──────────┘
//!        │
//!        ▼
//!   FiniteSizeErrors  |value - reference| per observable
//! ```

pub mod error;
pub mod loader;
pub mod model;

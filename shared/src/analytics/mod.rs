//! Farmer performance analytics
//!
//! Pure functions over already-fetched record snapshots:
//! - Yearly average yield per farmer and the farmer count per year
//! - Year-over-year growth and a one-year projection
//! - Percentile-based performance tiers
//! - Decision-support recommendations
//! - Dashboard summary figures
//!
//! Nothing here performs I/O or keeps state between calls.

mod dashboard;
mod growth;
mod performance;
mod recommendations;
mod rules;
mod summary;
mod yearly;

pub use dashboard::*;
pub use growth::*;
pub use performance::*;
pub use recommendations::*;
pub use rules::*;
pub use summary::*;
pub use yearly::*;

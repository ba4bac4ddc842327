//! Domain models for the Coffee Farm Analytics Platform

mod farmer;
mod harvest;
mod snapshot;

pub use farmer::*;
pub use harvest::*;
pub use snapshot::*;

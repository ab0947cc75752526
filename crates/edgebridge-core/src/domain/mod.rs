//! Pure input-shaping logic shared by the source application.

pub mod coalescer;
pub mod tuning;

//! Console presentation: styling and report text.

pub mod report;
pub mod style;

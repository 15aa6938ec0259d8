//! CLI library components for the frailty classifier.

pub mod io;
pub mod logging;
pub mod pipeline;

//! Report rendering for each output format

pub mod json;
pub mod short;
pub mod terminal;

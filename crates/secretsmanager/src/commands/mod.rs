//! Command implementations

pub mod parse;
pub mod session_open;

//! Utility modules shared by the commands.

pub mod form;
pub mod minify;

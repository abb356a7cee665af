//! Domain utility functions

pub mod path;

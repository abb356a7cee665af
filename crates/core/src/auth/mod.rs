//! Authentication collaborators

pub mod ports;

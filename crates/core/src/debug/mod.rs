//! Transaction observers

pub mod ports;

//! Response cache collaborator

pub mod ports;

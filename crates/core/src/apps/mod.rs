//! Developer-app business rules

pub mod rules;

//! HTTP transport: request executor, payloads and digest authentication

pub mod client;
pub mod digest;
pub mod executor;
pub mod payload;
pub mod transaction;

pub use client::{HttpClient, HttpClientBuilder};
pub use executor::{RequestExecutor, RequestExecutorBuilder};
pub use payload::Payload;
pub use transaction::{RequestOptions, Transaction};

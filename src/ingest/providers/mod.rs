// src/ingest/providers/mod.rs
pub mod fixture;
pub mod http;

pub use fixture::FixtureTransport;
pub use http::HttpTransport;

//! HTTP integration tests.
//!
//! Starts an axum stub of the marketplace API and exercises `ApiClient`
//! against it.

mod support;
mod fetch;
mod moderation;
mod wallet;
mod assistant;

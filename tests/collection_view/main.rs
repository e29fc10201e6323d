//! Collection view integration tests.

mod support;
mod scenarios;

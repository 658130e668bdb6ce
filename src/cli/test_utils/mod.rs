//! Test utilities and mock client objects for CLI testing
//!
//! Provides in-memory clients that record every member invocation, so tests
//! can check which receiver a command ran against and how often.

pub mod mocks;

pub use mocks::{AccountsClient, MockClient, NetworksClient};

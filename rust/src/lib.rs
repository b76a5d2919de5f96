//! # Chatcache SDK for native hosts
//!
//! Durable persistence for the session cache outside the browser.

mod storage;

pub use storage::SledStorage;

//! Client for the omniwallet HTTP API.

pub mod client;

pub use client::{SendRequest, SendResponse, WalletClient};

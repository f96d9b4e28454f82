// src/notify/mod.rs
//! Outbound chat delivery of the digest.

pub mod slack;

pub use slack::{format_message, SlackChannel};

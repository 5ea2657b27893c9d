//! Tempo Control - the rate command channel
//!
//! This crate provides:
//! - The control payload decode (latest-state semantics)
//! - The single-client accept/read server loop
//! - A controller-side client

pub mod client;
pub mod command;
pub mod server;

pub use client::*;
pub use command::*;
pub use server::*;

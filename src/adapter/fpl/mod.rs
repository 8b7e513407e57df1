//! Public fantasy API adapter.

mod cache;
mod client;
pub mod dto;

pub use cache::TtlCache;
pub use client::FplClient;

//! Application state module

mod app_state;
mod filter;

pub use app_state::*;

#[cfg(test)]
pub(crate) use app_state::fixtures;

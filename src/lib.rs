//! Rick and Morty character sampler - tui-dispatch app
//!
//! Modules are public so the integration tests can drive them directly.

pub mod action;
pub mod api;
pub mod components;
pub mod effect;
pub mod episodes;
pub mod error;
pub mod logging;
pub mod reducer;
pub mod sampler;
pub mod state;

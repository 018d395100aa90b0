//! Configuration loading and validation.
//!
//! Config file: `courier.toml`, searched in `./` then `~/.config/courier/`.
//! Channel credentials may instead come from the environment
//! (`COURIER_CHANNEL_TOKEN` / `COURIER_CHANNEL_SECRET`, with the bare
//! `CHANNEL_ACCESS_TOKEN` / `CHANNEL_SECRET` names accepted as a fallback).

pub mod loader;
pub mod schema;

pub use {
    loader::{config_dir, discover_and_load, load_config, load_from},
    schema::CourierConfig,
};

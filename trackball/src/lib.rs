//! # RMK Trackball
//!
//! Firmware behavior of trackballs with an optical scroll wheel, built on top of a keyboard
//! firmware host:
//!
//! - [`encoder`] - photodiode sampling and wheel direction decoding
//! - [`scroll`] - rate limiting and muting of the scroll wheel
//! - [`drag_scroll`] - converting ball motion into scroll
//! - [`state`] - DPI table and drag-scroll mode, persisted through [`storage`]
//! - [`trackball`] - the device struct exposing the hooks the host calls
//!
//! The host provides the hardware through the traits in [`driver`] and an
//! [`embedded_storage::Storage`] for the config.
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod config;
pub mod drag_scroll;
pub mod driver;
pub mod encoder;
pub mod event;
pub mod hooks;
pub mod report;
pub mod scroll;
pub mod state;
pub mod storage;
pub mod trackball;

pub use config::TrackballConfig;
pub use event::{KeyEvent, KeyPos, Keycode};
pub use hooks::{DefaultHooks, TrackballHooks};
pub use report::PointerReport;
pub use trackball::Trackball;

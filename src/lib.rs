//! Doorbell controller library.
//!
//! Exposes the pure-logic modules for integration testing and the
//! adapters the host binary wires together.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod face;
pub mod mode;
pub mod storage;

pub mod adapters;
pub mod drivers;

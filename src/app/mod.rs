//! Application core: domain logic behind port traits.
//!
//! This module contains the business rules for the doorbell: button
//! handling, enrollment, the bell capture loop, classification display
//! and notification.  All interaction with hardware happens through
//! **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod commands;
pub mod doorbell;
pub mod enrollment;
pub mod events;
pub mod notify;
pub mod ports;
pub mod service;

//! Button and LED drivers over `embedded-hal` digital pins.

pub mod button;
pub mod led;

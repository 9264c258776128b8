//! Reusable drivers built on the platform abstraction

pub mod motor_driver;

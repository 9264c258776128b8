#![cfg_attr(not(test), no_std)]

//! bridge_drive - H-bridge motor drive sequencing
//!
//! This library turns signed power / brake / enable commands into shoot-through
//! safe pin sequences for discrete full bridges and integrated-logic bridge ICs.

// Platform abstraction layer (pin bus trait, errors, mocks)
pub mod platform;

// Logging macros
pub mod core;

// Bridge core
pub mod libraries;

// Runtime configuration
pub mod parameters;

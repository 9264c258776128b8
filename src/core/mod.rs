//! Core infrastructure
//!
//! Target-independent plumbing shared by the drivers, currently the logging
//! macros.

pub mod logging;

//! Parameter System
//!
//! Named runtime configuration. Each subsystem registers its parameters with
//! defaults and loads a typed view back out of the store:
//!
//! ```text
//! ParameterStore ──register_defaults──▶ MOT_* entries
//!        │
//!        └──from_store──▶ MotorParams ──into──▶ BridgeConfig
//! ```

pub mod motor;
pub mod storage;

pub use motor::MotorParams;
pub use storage::{ParamFlags, ParamValue, ParameterStore};

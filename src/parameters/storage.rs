//! In-memory parameter storage
//!
//! Named, typed parameters with registration defaults. Fixed capacity, no heap.
//!
//! # Example
//!
//! ```
//! use bridge_drive::parameters::{ParamFlags, ParamValue, ParameterStore};
//!
//! let mut store = ParameterStore::new();
//! store.register("MOT_RAMP_STEP", ParamValue::Int(10), ParamFlags::empty()).unwrap();
//! store.set("MOT_RAMP_STEP", ParamValue::Int(5)).unwrap();
//! assert_eq!(store.get("MOT_RAMP_STEP"), Some(&ParamValue::Int(5)));
//! ```

use bitflags::bitflags;
use heapless::{FnvIndexMap, String};

use crate::platform::{PlatformError, Result};

/// Maximum parameter name length
pub const PARAM_NAME_LEN: usize = 16;

/// Maximum number of parameters (power of two)
const MAX_PARAMS: usize = 32;

bitflags! {
    /// Parameter flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Parameter cannot be modified after registration
        const READ_ONLY = 0b00000001;
    }
}

/// Parameter value types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    /// Boolean parameter
    Bool(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit floating point
    Float(f32),
}

impl ParamValue {
    fn same_type(&self, other: &ParamValue) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }
}

#[derive(Debug, Clone, Copy)]
struct ParamEntry {
    value: ParamValue,
    flags: ParamFlags,
}

/// Parameter store
#[derive(Debug)]
pub struct ParameterStore {
    parameters: FnvIndexMap<String<PARAM_NAME_LEN>, ParamEntry, MAX_PARAMS>,
    dirty: bool,
}

impl ParameterStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            parameters: FnvIndexMap::new(),
            dirty: false,
        }
    }

    fn key(name: &str) -> Result<String<PARAM_NAME_LEN>> {
        let mut key = String::new();
        key.push_str(name)
            .map_err(|_| PlatformError::InvalidConfig)?;
        Ok(key)
    }

    /// Get parameter value
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        let key = Self::key(name).ok()?;
        self.parameters.get(&key).map(|entry| &entry.value)
    }

    /// Set parameter value
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InvalidConfig` if the parameter is unknown,
    /// read-only, or the value has a different type.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<()> {
        let key = Self::key(name)?;
        let entry = self
            .parameters
            .get_mut(&key)
            .ok_or(PlatformError::InvalidConfig)?;

        if entry.flags.contains(ParamFlags::READ_ONLY) || !entry.value.same_type(&value) {
            return Err(PlatformError::InvalidConfig);
        }

        entry.value = value;
        self.dirty = true;
        Ok(())
    }

    /// Register parameter with default value
    ///
    /// An already registered parameter keeps its current value.
    pub fn register(&mut self, name: &str, default_value: ParamValue, flags: ParamFlags) -> Result<()> {
        let key = Self::key(name)?;

        if self.parameters.contains_key(&key) {
            // Already exists, don't overwrite
            return Ok(());
        }

        self.parameters
            .insert(
                key,
                ParamEntry {
                    value: default_value,
                    flags,
                },
            )
            .map_err(|_| PlatformError::InvalidConfig)?;
        self.dirty = true;
        Ok(())
    }

    /// Number of registered parameters
    pub fn count(&self) -> usize {
        self.parameters.len()
    }

    /// `true` if anything was registered or changed since the last
    /// [`ParameterStore::mark_clean`]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

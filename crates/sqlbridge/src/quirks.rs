//! Driver quirk profiles.
//!
//! Real drivers deviate from the nominal wire contract in known, named
//! ways. Instead of comparing driver identities at every conversion, the
//! deviations are captured as a profile of flags resolved once when the
//! adapter is constructed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlbridge_core::error::{ConfigError, Error, Result};
use sqlbridge_core::wire::WireType;

/// The set of deviations a driver exhibits from the nominal contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuirkProfile {
    /// The driver's native Clob parameter binding is unreliable; bind
    /// character large objects as fully materialized text instead.
    #[serde(default)]
    pub clob_bind_as_text: bool,

    /// The driver is a legacy bridge: columns outside the covered tags are
    /// read through the string/bytes fallback ladder instead of the
    /// generic accessor.
    #[serde(default)]
    pub bridge_fallbacks: bool,

    /// Wire type used when retrying a rejected untyped NULL bind.
    ///
    /// The target column's true type is unknown at that point, so this is
    /// a heuristic default, not a guaranteed-correct choice.
    #[serde(default = "default_null_bind_type")]
    pub null_bind_type: WireType,
}

const fn default_null_bind_type() -> WireType {
    WireType::VarChar
}

impl Default for QuirkProfile {
    fn default() -> Self {
        Self {
            clob_bind_as_text: false,
            bridge_fallbacks: false,
            null_bind_type: default_null_bind_type(),
        }
    }
}

/// Maps driver identifiers to their quirk profiles.
///
/// Unknown identifiers resolve to the default (no quirks) profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuirkRegistry {
    profiles: HashMap<String, QuirkProfile>,
}

impl QuirkRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry of drivers with known deviations.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            "sqlite",
            QuirkProfile {
                clob_bind_as_text: true,
                ..QuirkProfile::default()
            },
        );
        registry.register(
            "odbc-bridge",
            QuirkProfile {
                bridge_fallbacks: true,
                ..QuirkProfile::default()
            },
        );
        registry
    }

    /// Load a registry from its JSON representation:
    /// `{"driver-id": {"clob_bind_as_text": true, ...}, ...}`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| {
            let message = format!("invalid quirk registry JSON: {err}");
            Error::Config(ConfigError {
                message,
                source: Some(Box::new(err)),
            })
        })
    }

    /// Add or replace the profile for a driver identifier.
    pub fn register(&mut self, driver_id: impl Into<String>, profile: QuirkProfile) {
        self.profiles.insert(driver_id.into(), profile);
    }

    /// Resolve the profile for a driver identifier.
    pub fn resolve(&self, driver_id: &str) -> QuirkProfile {
        self.profiles.get(driver_id).cloned().unwrap_or_default()
    }
}

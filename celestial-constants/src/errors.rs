//! Error types for the constants registry.
//!
//! [`ConstantsError`] covers every failure the registry can surface: unknown
//! epochs, selections made after lock-in, ambiguous cgs conversions of
//! electromagnetic constants, malformed static tables, and configuration
//! problems.
//!
//! # Error Categories
//!
//! | Variant | Raised by | Recoverable? |
//! |---------|-----------|--------------|
//! | [`UnknownEpoch`](ConstantsError::UnknownEpoch) | `select`, `with_temporary_epoch`, config | No |
//! | [`AlreadyLocked`](ConstantsError::AlreadyLocked) | `select` after first read | No |
//! | [`AmbiguousSystemConversion`](ConstantsError::AmbiguousSystemConversion) | `Constant::cgs` on EM constants | No |
//! | [`UnknownConstant`](ConstantsError::UnknownConstant) | lookups | No |
//! | [`DuplicateAbbreviation`](ConstantsError::DuplicateAbbreviation) | epoch table construction | No |
//! | [`MissingConstant`](ConstantsError::MissingConstant) | variant derivation | No |
//! | [`UnitConversion`](ConstantsError::UnitConversion) | quantity conversion | No |
//! | [`InvalidConfig`](ConstantsError::InvalidConfig) | config loading | Yes |
//!
//! Redefinitions found while binding are not errors. They are reported as
//! [`DuplicateDefinitionConflict`] diagnostics and never returned as `Err`.

use crate::constant::UnitSystem;
use crate::epoch::Domain;
use thiserror::Error;

/// Unified error type for registry operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstantsError {
    /// Epoch id (or release name) not registered in the catalog.
    #[error("Unknown {}constants version '{id}'", domain_prefix(.domain))]
    UnknownEpoch { domain: Option<Domain>, id: String },

    /// Selection attempted after the domain was consumed.
    #[error(
        "{domain} constants already locked to '{epoch}'; the version must be selected before the first read"
    )]
    AlreadyLocked { domain: Domain, epoch: String },

    /// Generic cgs access of an electromagnetic constant.
    #[error(
        "Cannot convert EM constant '{abbrev}' to cgs: esu, emu and gauss define it differently; \
         look it up with an explicit system instead"
    )]
    AmbiguousSystemConversion { abbrev: String },

    #[error("No constant '{abbrev}' bound{}", system_suffix(.system))]
    UnknownConstant {
        abbrev: String,
        system: Option<UnitSystem>,
    },

    #[error("Epoch '{epoch}' defines '{abbrev}' twice in the {system} system")]
    DuplicateAbbreviation {
        epoch: String,
        abbrev: String,
        system: UnitSystem,
    },

    #[error("Epoch '{epoch}' is missing required constant '{abbrev}'")]
    MissingConstant { epoch: String, abbrev: String },

    #[error("Cannot convert unit '{unit}' to {target}")]
    UnitConversion { unit: String, target: UnitSystem },

    #[error("Invalid constants configuration: {message}")]
    InvalidConfig { message: String },
}

fn domain_prefix(domain: &Option<Domain>) -> String {
    match domain {
        Some(domain) => format!("{} ", domain),
        None => String::new(),
    }
}

fn system_suffix(system: &Option<UnitSystem>) -> String {
    match system {
        Some(system) => format!(" in the {} system", system),
        None => String::new(),
    }
}

/// Convenience alias for `Result<T, ConstantsError>`.
pub type ConstantsResult<T> = Result<T, ConstantsError>;

impl ConstantsError {
    pub fn unknown_epoch(domain: Option<Domain>, id: impl Into<String>) -> Self {
        Self::UnknownEpoch {
            domain,
            id: id.into(),
        }
    }

    pub fn already_locked(domain: Domain, epoch: impl Into<String>) -> Self {
        Self::AlreadyLocked {
            domain,
            epoch: epoch.into(),
        }
    }

    pub fn ambiguous_system(abbrev: impl Into<String>) -> Self {
        Self::AmbiguousSystemConversion {
            abbrev: abbrev.into(),
        }
    }

    pub fn unknown_constant(abbrev: impl Into<String>, system: Option<UnitSystem>) -> Self {
        Self::UnknownConstant {
            abbrev: abbrev.into(),
            system,
        }
    }

    pub fn duplicate_abbreviation(
        epoch: impl Into<String>,
        abbrev: impl Into<String>,
        system: UnitSystem,
    ) -> Self {
        Self::DuplicateAbbreviation {
            epoch: epoch.into(),
            abbrev: abbrev.into(),
            system,
        }
    }

    pub fn missing_constant(epoch: impl Into<String>, abbrev: impl Into<String>) -> Self {
        Self::MissingConstant {
            epoch: epoch.into(),
            abbrev: abbrev.into(),
        }
    }

    pub fn unit_conversion(unit: impl Into<String>, target: UnitSystem) -> Self {
        Self::UnitConversion {
            unit: unit.into(),
            target,
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Returns `true` if fixing the input and retrying may succeed.
    ///
    /// Only [`InvalidConfig`](Self::InvalidConfig) qualifies: a corrected file
    /// or environment can be reloaded. Everything else is a programming error
    /// or a property of the static tables.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}

/// Non-fatal diagnostic emitted when binding overwrites a constant with a
/// different definition.
///
/// Produced by [`bind`](crate::namespace::bind) and logged at `WARN` unless
/// diagnostics are suppressed. Never returned as an error.
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "Constant '{name}' already has a definition ({old_reference}); redefined by {new_reference}"
)]
pub struct DuplicateDefinitionConflict {
    pub name: String,
    pub old_reference: String,
    pub new_reference: String,
}

//! Versioned registry of CODATA physical and IAU astronomical constants.
//!
//! `celestial-constants` ships several published epochs of each domain
//! (CODATA 2010/2014, IAU 2012/2015) and binds exactly one epoch per domain
//! into an active namespace. The choice is made before first use and then
//! frozen, so every value a program derives comes from one consistent set.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`constant`] | [`Constant`] records, [`UnitSystem`], SI/cgs access |
//! | [`quantity`] | Value with unit, SI to cgs conversion table |
//! | [`epoch`] | [`ConstantSet`] (one published epoch) and [`Domain`] |
//! | [`variants`] | esu/emu/gauss variants of electromagnetic constants |
//! | [`data`] | Built-in epoch tables and release bundles |
//! | [`catalog`] | [`EpochCatalog`]: epoch and release lookup |
//! | [`namespace`] | [`ActiveNamespace`] and the [`bind`] merge |
//! | [`selector`] | [`VersionSelector`]: per-domain lock-in state machine |
//! | [`registry`] | [`Registry`]: selection, lookups, scoped overrides |
//! | [`global`] | Process-wide registry and free functions |
//! | [`config`] | Default epochs from TOML and environment |
//! | [`docs`] | Documentation rows and the constants table |
//! | [`errors`] | [`ConstantsError`] and [`ConstantsResult`] |
//!
//! # Selection and Lock-in
//!
//! ```
//! use celestial_constants::{Domain, Registry, UnitSystem};
//!
//! let registry = Registry::standard()?;
//! registry.select(Domain::Physical, "codata2010")?;
//!
//! let e = registry.lookup("e")?;
//! let e_esu = registry.lookup_in("e", UnitSystem::Esu)?;
//! assert_eq!(e.reference(), "CODATA 2010");
//! assert_eq!(e_esu.unit(), "statC");
//!
//! // The physical domain is now frozen.
//! assert!(registry.select(Domain::Physical, "codata2014").is_err());
//! # Ok::<(), celestial_constants::ConstantsError>(())
//! ```
//!
//! # Scoped Overrides
//!
//! Code that needs another epoch temporarily (tests, comparisons) uses an
//! override. It never changes the recorded selection:
//!
//! ```
//! use celestial_constants::Registry;
//!
//! let registry = Registry::standard()?;
//! {
//!     let _guard = registry.with_temporary_epoch("iau2012")?;
//!     assert_eq!(registry.lookup("R_earth")?.value(), 6.378136e6);
//! }
//! assert_eq!(registry.lookup("R_earth")?.value(), 6.3781e6);
//! # Ok::<(), celestial_constants::ConstantsError>(())
//! ```
//!
//! # Design Notes
//!
//! - **Consumption locks**: any read (`lookup`, `get_active`, documentation
//!   rows) freezes the domains it touches.
//! - **Electromagnetic constants**: `cgs()` on an EM constant is an error.
//!   The esu, emu and gauss values are bound as separate records.
//! - **Redefinitions**: binding over an existing record with a different
//!   definition is logged through `tracing` at `WARN`, never an error.

pub mod catalog;
pub mod config;
pub mod constant;
pub mod data;
pub mod docs;
pub mod epoch;
pub mod errors;
pub mod global;
pub mod namespace;
pub mod quantity;
pub mod registry;
pub mod scoped;
pub mod selector;
pub mod variants;

pub use catalog::{EpochCatalog, Release};
pub use config::ConstantsConfig;
pub use constant::{Constant, ConstantKey, ConstantKind, UnitSystem};
pub use data::standard_catalog;
pub use docs::{render_table, DocRow};
pub use epoch::{ConstantSet, ConstantSetBuilder, Domain};
pub use errors::{ConstantsError, ConstantsResult, DuplicateDefinitionConflict};
pub use namespace::{bind, bind_documented, ActiveNamespace};
pub use quantity::Quantity;
pub use registry::Registry;
pub use scoped::ScopedOverride;
pub use selector::{Selection, SelectionState, VersionSelector};

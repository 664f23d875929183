//! # Boxcar Settings
//!
//! Parameterized configuration engine for the Boxcar GA.
//!
//! ## Resolution
//!
//! ```text
//! resolve(controller, name):
//!   cache hit?             -> cached value
//!   raw = store[controller][name]
//!   while raw names a setting of the same controller:
//!     raw = store[controller][raw]
//!   coerce raw with the constraint of `name`, cache, return
//! ```
//!
//! ## Components
//!
//! - [`SettingStore`]: controller -> name -> (raw value, type constraint)
//! - [`Resolver`]: alias following, type coercion, memo cache, bulk verification
//! - [`audit`]: append-only CSV trail of mutations
//! - [`defaults`]: the `boxcar`, `ga`, and `window` bundle
//!
//! The store, cache, and audit log carry no locking of their own; share a
//! resolver between threads through [`SharedResolver`].

pub mod audit;
pub mod cache;
pub mod config;
pub mod defaults;
pub mod resolver;
pub mod store;

pub use audit::{AuditSink, CsvAuditSink, MemoryAuditSink, MutationRecord, AUDIT_HEADER};
pub use cache::{CacheStats, ResolutionCache};
pub use config::{apply_overrides, load_overrides, AuditSettings, Overrides, SettingsConfig};
pub use defaults::{default_store, default_store_with_rng};
pub use resolver::{Resolver, SharedResolver};
pub use store::{AuditContext, Setting, SettingMap, SettingStore};

/// Car, floor, world, and display settings
pub const BOXCAR_CONTROLLER: &str = "boxcar";

/// Genetic algorithm settings
pub const GA_CONTROLLER: &str = "ga";

/// Window settings
pub const WINDOW_CONTROLLER: &str = "window";

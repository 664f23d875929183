//! Alias-following resolver with a memo cache
//!
//! Resolution of `(controller, name)`:
//! 1. Return the cached value if present
//! 2. Fetch the raw value and constraint from the store
//! 3. While the value is a string naming another setting of the same
//!    controller, replace it with that setting's raw value
//! 4. Check and coerce the terminal value against the constraint of the
//!    setting that was asked for (alias targets' constraints are ignored)
//! 5. Cache and return
//!
//! ## Invalidation
//!
//! A mutation drops the cache entry of the mutated setting only. Settings
//! that alias it keep their previously resolved value until the caller
//! invalidates them with [`Resolver::invalidate`] or [`Resolver::clear_cache`].

use std::sync::Arc;

use boxcar_common::{
    BoxcarError, Kind, Result, SettingsError, TypeConstraint, Value, VerificationFailure,
};
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::audit::AuditSink;
use crate::cache::{CacheStats, ResolutionCache};
use crate::store::{AuditContext, SettingStore};
use crate::{BOXCAR_CONTROLLER, GA_CONTROLLER, WINDOW_CONTROLLER};

/// Resolver shared between threads; the mutex serializes store, cache, and audit log together
pub type SharedResolver = Arc<Mutex<Resolver>>;

/// Resolves settings through alias chains and memoizes the results
#[derive(Debug)]
pub struct Resolver {
    store: SettingStore,
    cache: ResolutionCache,
    /// Alias hops followed by uncached resolutions
    traversals: u64,
}

impl Resolver {
    pub fn new(store: SettingStore) -> Self {
        Self {
            store,
            cache: ResolutionCache::new(),
            traversals: 0,
        }
    }

    /// Wrap in a mutex for use from several threads
    pub fn into_shared(self) -> SharedResolver {
        Arc::new(Mutex::new(self))
    }

    /// The underlying store
    pub fn store(&self) -> &SettingStore {
        &self.store
    }

    /// Resolve a setting to its terminal, type-checked value
    #[instrument(skip(self))]
    pub fn resolve(&mut self, controller: &str, name: &str) -> Result<Value> {
        if let Some(value) = self.cache.get(controller, name) {
            debug!("Cache hit");
            return Ok(value);
        }

        let value = self.resolve_uncached(controller, name)?;
        debug!(value = %value, "Cache miss, resolved");
        self.cache.insert(controller, name, value.clone());
        Ok(value)
    }

    fn resolve_uncached(&mut self, controller: &str, name: &str) -> Result<Value> {
        let settings = self.store.controller(controller)?;
        let setting = settings
            .get(name)
            .ok_or_else(|| SettingsError::UnknownSetting {
                controller: controller.to_string(),
                name: name.to_string(),
            })?;

        let mut value = &setting.raw;
        let mut chain = vec![name.to_string()];
        while let Value::Str(target) = value {
            let Some(next) = settings.get(target) else {
                break;
            };
            let repeated = chain.iter().any(|seen| seen == target);
            chain.push(target.clone());
            if repeated {
                return Err(SettingsError::CyclicAlias {
                    controller: controller.to_string(),
                    name: name.to_string(),
                    chain,
                }
                .into());
            }
            self.traversals += 1;
            debug!(controller, from = name, to = %target, "Following alias");
            value = &next.raw;
        }

        setting.constraint.coerce(value.clone()).map_err(|violation| {
            warn!(controller, name, value = %violation.value, "Value rejected by constraint");
            type_mismatch(controller, name, violation.value, violation.expected)
        })
    }

    /// Alias of [`Resolver::resolve`]
    pub fn get_constant(&mut self, controller: &str, name: &str) -> Result<Value> {
        self.resolve(controller, name)
    }

    pub fn boxcar_constant(&mut self, name: &str) -> Result<Value> {
        self.resolve(BOXCAR_CONTROLLER, name)
    }

    pub fn ga_constant(&mut self, name: &str) -> Result<Value> {
        self.resolve(GA_CONTROLLER, name)
    }

    pub fn window_constant(&mut self, name: &str) -> Result<Value> {
        self.resolve(WINDOW_CONTROLLER, name)
    }

    /// Resolve a numeric setting as `f64`
    pub fn resolve_f64(&mut self, controller: &str, name: &str) -> Result<f64> {
        let value = self.resolve(controller, name)?;
        value
            .as_f64()
            .ok_or_else(|| type_mismatch(controller, name, value.clone(), Kind::Float.into()))
    }

    /// Resolve an integer setting
    pub fn resolve_i64(&mut self, controller: &str, name: &str) -> Result<i64> {
        let value = self.resolve(controller, name)?;
        value
            .as_i64()
            .ok_or_else(|| type_mismatch(controller, name, value.clone(), Kind::Int.into()))
    }

    pub fn resolve_bool(&mut self, controller: &str, name: &str) -> Result<bool> {
        let value = self.resolve(controller, name)?;
        value
            .as_bool()
            .ok_or_else(|| type_mismatch(controller, name, value.clone(), Kind::Bool.into()))
    }

    pub fn resolve_string(&mut self, controller: &str, name: &str) -> Result<String> {
        let value = self.resolve(controller, name)?;
        match value {
            Value::Str(s) => Ok(s),
            other => Err(type_mismatch(controller, name, other, Kind::Str.into())),
        }
    }

    /// Resolve every setting, failing with one aggregate error listing all
    /// offending pairs
    #[instrument(skip(self))]
    pub fn verify_all(&mut self) -> Result<()> {
        let pairs: Vec<(String, String)> = self
            .store
            .iter()
            .map(|(controller, name, _)| (controller.to_string(), name.to_string()))
            .collect();

        let mut failures = Vec::new();
        for (controller, name) in &pairs {
            if let Err(err) = self.resolve(controller, name) {
                failures.push(VerificationFailure {
                    controller: controller.clone(),
                    name: name.clone(),
                    reason: err.to_string(),
                });
            }
        }

        if failures.is_empty() {
            info!(settings = pairs.len(), "All settings verified");
            Ok(())
        } else {
            warn!(failed = failures.len(), "Settings verification failed");
            Err(SettingsError::InvalidConfiguration { failures }.into())
        }
    }

    /// Overwrite a raw value without auditing; returns the previous raw value
    pub fn update(&mut self, controller: &str, name: &str, new_value: Value) -> Result<Value> {
        let old = self.store.set(controller, name, new_value, None)?;
        self.cache.invalidate(controller, name);
        Ok(old)
    }

    /// Overwrite a raw value, appending a record to `sink` first
    pub fn update_audited(
        &mut self,
        controller: &str,
        name: &str,
        new_value: Value,
        frame: i64,
        sink: &dyn AuditSink,
    ) -> Result<Value> {
        let old = self.store.set(
            controller,
            name,
            new_value,
            Some(AuditContext::new(frame, sink)),
        )?;
        self.cache.invalidate(controller, name);
        Ok(old)
    }

    /// Drop one cached value; returns whether it was cached
    pub fn invalidate(&mut self, controller: &str, name: &str) -> bool {
        self.cache.invalidate(controller, name)
    }

    /// Drop every cached value
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Number of alias hops followed so far
    pub fn traversal_count(&self) -> u64 {
        self.traversals
    }
}

fn type_mismatch(
    controller: &str,
    name: &str,
    value: Value,
    expected: TypeConstraint,
) -> BoxcarError {
    SettingsError::TypeMismatch {
        controller: controller.to_string(),
        name: name.to_string(),
        actual: value.kind().to_string(),
        value: value.to_string(),
        expected,
    }
    .into()
}

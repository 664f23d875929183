//! Setting store
//!
//! Two-level mapping: controller -> setting name -> (raw value, constraint).
//! Constraints are fixed at declaration; only raw values change at runtime.

use std::collections::BTreeMap;

use boxcar_common::{Result, SettingsError, TypeConstraint, Value};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::audit::{AuditSink, MutationRecord};

/// A declared setting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    /// Raw value; a string naming another setting of the same controller is an alias
    pub raw: Value,
    /// Declared type, checked against the end of the alias chain
    pub constraint: TypeConstraint,
}

impl Setting {
    pub fn new(raw: impl Into<Value>, constraint: TypeConstraint) -> Self {
        Self {
            raw: raw.into(),
            constraint,
        }
    }
}

/// Settings of one controller, keyed by name
pub type SettingMap = BTreeMap<String, Setting>;

/// Audit destination and frame index for one mutation
#[derive(Clone, Copy)]
pub struct AuditContext<'a> {
    /// Simulation frame at which the mutation happened (-1 when unknown)
    pub frame: i64,
    pub sink: &'a dyn AuditSink,
}

impl<'a> AuditContext<'a> {
    pub fn new(frame: i64, sink: &'a dyn AuditSink) -> Self {
        Self { frame, sink }
    }
}

/// Registry of settings grouped by controller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingStore {
    controllers: BTreeMap<String, SettingMap>,
}

impl SettingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare (or redeclare) a setting
    pub fn declare(
        &mut self,
        controller: &str,
        name: &str,
        raw: impl Into<Value>,
        constraint: TypeConstraint,
    ) -> &mut Self {
        self.controllers
            .entry(controller.to_string())
            .or_default()
            .insert(name.to_string(), Setting::new(raw, constraint));
        self
    }

    /// Builder form of [`SettingStore::declare`]
    pub fn with(
        mut self,
        controller: &str,
        name: &str,
        raw: impl Into<Value>,
        constraint: TypeConstraint,
    ) -> Self {
        self.declare(controller, name, raw, constraint);
        self
    }

    /// Settings of a controller
    pub fn controller(&self, controller: &str) -> Result<&SettingMap> {
        self.controllers
            .get(controller)
            .ok_or_else(|| SettingsError::UnknownController(controller.to_string()).into())
    }

    /// Whether `name` is a setting of `controller`
    pub fn contains(&self, controller: &str, name: &str) -> bool {
        self.controllers
            .get(controller)
            .map(|settings| settings.contains_key(name))
            .unwrap_or(false)
    }

    /// Raw value and constraint of a setting
    pub fn get_raw(&self, controller: &str, name: &str) -> Result<(&Value, &TypeConstraint)> {
        let setting = self.controller(controller)?.get(name).ok_or_else(|| {
            SettingsError::UnknownSetting {
                controller: controller.to_string(),
                name: name.to_string(),
            }
        })?;
        Ok((&setting.raw, &setting.constraint))
    }

    /// Overwrite a raw value, returning the previous one
    ///
    /// With an audit context the record is appended before the store changes;
    /// if the append fails the store is left untouched.
    pub fn set(
        &mut self,
        controller: &str,
        name: &str,
        new_value: Value,
        audit: Option<AuditContext<'_>>,
    ) -> Result<Value> {
        let settings = self
            .controllers
            .get_mut(controller)
            .ok_or_else(|| SettingsError::UnknownController(controller.to_string()))?;
        let setting = settings
            .get_mut(name)
            .ok_or_else(|| SettingsError::UnknownSetting {
                controller: controller.to_string(),
                name: name.to_string(),
            })?;

        if let Some(ctx) = audit {
            let record = MutationRecord {
                frame: ctx.frame,
                controller: controller.to_string(),
                constant: name.to_string(),
                old_value: setting.raw.clone(),
                new_value: new_value.clone(),
            };
            ctx.sink.append(&record)?;
            debug!(controller, name, frame = ctx.frame, "Audited mutation");
        }

        info!(controller, name, old = %setting.raw, new = %new_value, "Updated setting");
        Ok(std::mem::replace(&mut setting.raw, new_value))
    }

    /// Controller names in order
    pub fn controllers(&self) -> impl Iterator<Item = &str> {
        self.controllers.keys().map(String::as_str)
    }

    /// All (controller, name, setting) triples in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &Setting)> {
        self.controllers.iter().flat_map(|(controller, settings)| {
            settings
                .iter()
                .map(move |(name, setting)| (controller.as_str(), name.as_str(), setting))
        })
    }

    /// Total number of settings across controllers
    pub fn len(&self) -> usize {
        self.controllers.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

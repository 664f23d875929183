//! Runtime configuration for the settings engine

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use boxcar_common::{BoxcarError, Result, Value};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::audit::{AuditSink, CsvAuditSink};
use crate::resolver::Resolver;

/// Settings engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Mutation audit log
    pub audit: AuditSettings,
    /// Optional file of `controller -> name -> value` overrides
    pub overrides_path: Option<PathBuf>,
}

impl SettingsConfig {
    /// Load configuration from `.env` and `BOXCAR_*` environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();

        if let Ok(val) = std::env::var("BOXCAR_AUDIT_ENABLED") {
            cfg.audit.enabled = parse_flag(&val)?;
        }
        if let Ok(dir) = std::env::var("BOXCAR_AUDIT_DIR") {
            cfg.audit.dir = PathBuf::from(dir);
        }
        if let Ok(file_name) = std::env::var("BOXCAR_AUDIT_FILE") {
            cfg.audit.file_name = file_name;
        }
        if let Ok(path) = std::env::var("BOXCAR_SETTINGS_FILE") {
            cfg.overrides_path = Some(PathBuf::from(path));
        }

        Ok(cfg)
    }

    /// CSV sink for the configured audit log, if enabled
    pub fn audit_sink(&self) -> Option<CsvAuditSink> {
        self.audit
            .enabled
            .then(|| CsvAuditSink::new(&self.audit.dir, &self.audit.file_name))
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(BoxcarError::Config(format!(
            "invalid boolean for BOXCAR_AUDIT_ENABLED: {}",
            other
        ))),
    }
}

/// Audit log settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSettings {
    pub enabled: bool,
    /// Directory holding the log; must exist
    pub dir: PathBuf,
    pub file_name: String,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: PathBuf::from("."),
            file_name: "settings_updates.csv".to_string(),
        }
    }
}

/// Overrides grouped by controller
pub type Overrides = BTreeMap<String, BTreeMap<String, Value>>;

/// Read an overrides file; the format follows the extension (toml, json, yaml, ...)
///
/// Keys pass through `config`, which lowercases them.
pub fn load_overrides(path: &Path) -> Result<Overrides> {
    let raw: BTreeMap<String, BTreeMap<String, serde_json::Value>> = config::Config::builder()
        .add_source(config::File::from(path))
        .build()
        .and_then(|cfg| cfg.try_deserialize())
        .map_err(|e| BoxcarError::Config(format!("{}: {}", path.display(), e)))?;

    raw.into_iter()
        .map(|(controller, settings)| {
            let settings = settings
                .into_iter()
                .map(|(name, json)| Ok((name, Value::try_from(json)?)))
                .collect::<Result<BTreeMap<_, _>>>()?;
            Ok((controller, settings))
        })
        .collect()
}

/// Apply overrides through the write API; returns how many settings changed
pub fn apply_overrides(
    resolver: &mut Resolver,
    overrides: Overrides,
    sink: Option<&dyn AuditSink>,
) -> Result<usize> {
    let mut applied = 0;
    for (controller, settings) in overrides {
        for (name, value) in settings {
            match sink {
                Some(sink) => resolver.update_audited(&controller, &name, value, -1, sink)?,
                None => resolver.update(&controller, &name, value)?,
            };
            applied += 1;
        }
    }
    info!(applied, "Applied setting overrides");
    Ok(applied)
}

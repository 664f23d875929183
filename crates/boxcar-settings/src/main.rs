//! Boxcar settings tool
//!
//! Builds the default bundle, applies overrides from `BOXCAR_SETTINGS_FILE`,
//! verifies every setting, and logs the resolved values.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boxcar_settings::{
    apply_overrides, default_store, load_overrides, AuditSink, Resolver, SettingsConfig,
};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting Boxcar settings v{}", boxcar_common::VERSION);

    let config = SettingsConfig::load()?;
    info!("Loaded configuration: {:?}", config);

    let mut resolver = Resolver::new(default_store());

    if let Some(path) = &config.overrides_path {
        let overrides = load_overrides(path)?;
        let sink = config.audit_sink();
        apply_overrides(
            &mut resolver,
            overrides,
            sink.as_ref().map(|s| s as &dyn AuditSink),
        )?;
    }

    resolver.verify_all()?;

    let pairs: Vec<(String, String)> = resolver
        .store()
        .iter()
        .map(|(controller, name, _)| (controller.to_string(), name.to_string()))
        .collect();
    for (controller, name) in pairs {
        let value = resolver.resolve(&controller, &name)?;
        info!("{}.{} = {}", controller, name, value.to_string().trim_end());
    }

    let stats = resolver.cache_stats();
    info!(
        "Resolved {} settings (cache hits={}, misses={})",
        stats.entry_count, stats.hits, stats.misses
    );
    Ok(())
}

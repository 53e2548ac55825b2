use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use nebula_core::SceneConfig;

// Simulated camera + classifier round trip.
pub const SIM_CLASSIFIER_LATENCY_MS: u64 = 350;

/// Defaults plus optional environment overrides.
///
/// - `NEBULA_PARTICLES`: particle count
/// - `NEBULA_BODY_FRACTION`: share of particles in the planet body
/// - `NEBULA_SEED`: RNG seed for the field and phrase order
/// - `NEBULA_POLL_MS`: classifier polling interval in milliseconds
pub fn load() -> anyhow::Result<SceneConfig> {
    let mut config = SceneConfig::default();
    if let Some(n) = read_env::<usize>("NEBULA_PARTICLES")? {
        config.field.particle_count = n;
    }
    if let Some(f) = read_env::<f32>("NEBULA_BODY_FRACTION")? {
        config.field.body_fraction = f;
    }
    if let Some(seed) = read_env::<u64>("NEBULA_SEED")? {
        config.field.seed = seed;
    }
    if let Some(ms) = read_env::<u64>("NEBULA_POLL_MS")? {
        config.polling.interval = Duration::from_millis(ms);
    }
    config.validate().context("invalid scene configuration")?;
    Ok(config)
}

fn read_env<T>(name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("parsing {name}={raw:?}")),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("reading {name}")),
    }
}

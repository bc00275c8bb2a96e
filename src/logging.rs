use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Layer;

/// Install the global subscriber
///
/// The terminal belongs to the LED matrix view, so log lines go to
/// `log_file` when one is given and are dropped otherwise.
pub fn setup<Level>(verbosity: clap_verbosity_flag::Verbosity<Level>, log_file: Option<&Path>) -> Result<()>
where
    Level: clap_verbosity_flag::LogLevel,
{
    let Some(log_file) = log_file else {
        return Ok(());
    };

    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env();

    if let Some(level_filter) = verbosity
        .is_present()
        .then(|| verbosity.tracing_level_filter())
    {
        let directive = tracing_subscriber::filter::Directive::from(level_filter);
        env_filter = env_filter.add_directive(directive);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    let subscriber = tracing_subscriber::registry::Registry::default().with(
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .with_filter(env_filter),
    );

    tracing::subscriber::set_global_default(subscriber).context("Failed to install logger")?;
    Ok(())
}

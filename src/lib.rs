pub mod config;

pub use config::Config;

/// Install error reporting and the `tracing` subscriber used by every binary.
pub fn init_tracing() -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    Ok(())
}

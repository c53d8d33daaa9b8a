use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use intro_validator::channels::{CliChannel, LogOnlyOutbound, Outbound, WhatsAppClient};
use intro_validator::config::{RelayConfig, ValidatorConfig, WhatsAppConfig};
use intro_validator::relay::{self, RelayState};
use intro_validator::validation::IntroductionValidator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; keep the guard alive so buffered file logs flush.
    let _log_guard = init_tracing();

    let mode = std::env::args().nth(1).unwrap_or_else(|| "cli".to_string());

    let validator_config = ValidatorConfig::from_env()?;
    let validator = Arc::new(IntroductionValidator::from_config(&validator_config)?);

    eprintln!("🤖 Introduction Validator v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   UTC offset: {} min", validator_config.utc_offset_minutes);
    if let Some(path) = &validator_config.taxonomy_path {
        eprintln!("   Taxonomy: {}", path.display());
    }

    match mode.as_str() {
        "serve" => {
            let relay_config = RelayConfig::from_env()?;
            let outbound: Arc<dyn Outbound> = match WhatsAppConfig::from_env() {
                Some(config) => Arc::new(WhatsAppClient::new(config)?),
                None => {
                    eprintln!("   WhatsApp: not configured, replies are only logged");
                    Arc::new(LogOnlyOutbound)
                }
            };
            eprintln!("   Webhook: http://0.0.0.0:{}/webhook", relay_config.port);
            eprintln!("   Validate API: http://0.0.0.0:{}/api/validate\n", relay_config.port);

            relay::serve(RelayState::new(validator, outbound, relay_config)).await?;
        }
        "cli" => {
            CliChannel::new(validator).run().await?;
        }
        other => {
            anyhow::bail!("unknown mode {other:?}; expected \"serve\" or \"cli\"");
        }
    }

    Ok(())
}

fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    match std::env::var("INTRO_LOG_DIR") {
        Ok(dir) if !dir.trim().is_empty() => {
            let appender = tracing_appender::rolling::daily(dir, "intro-validator.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .init();
            Some(guard)
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            None
        }
    }
}

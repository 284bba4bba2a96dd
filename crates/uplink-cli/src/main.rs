use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::sync::Arc;
use tracing::{debug, error, info};
use uplink_cli::config::ServiceConfig;
use uplink_cli::pipeline::{self, RunSummary};
use uplink_cli::telemetry::{init_telemetry, TelemetryConfig};
use uplink_converter::UplinkConverter;
use uplink_payload::ChannelDecoder;

fn main() {
    let config = match ServiceConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_telemetry(&TelemetryConfig {
        log_level: config.log_level.clone(),
    }) {
        eprintln!("Failed to initialize telemetry: {}", e);
        std::process::exit(1);
    }

    info!(
        truncation_policy = ?config.truncation_policy,
        input = config.input_path.as_deref().unwrap_or("stdin"),
        "Starting uplink converter"
    );
    debug!("Configuration: {:?}", config);

    let decoder = ChannelDecoder::new();
    for spec in decoder.channels() {
        debug!(
            channel_id = spec.channel_id,
            channel_type = spec.channel_type,
            size = spec.size,
            reading = spec.reading.name(),
            "Registered sensor channel"
        );
    }

    let converter = UplinkConverter::new(Arc::new(decoder), config.truncation_policy);

    match convert_input(&config, &converter) {
        Ok(summary) => {
            info!(
                converted = summary.converted,
                failed = summary.failed,
                "Finished converting uplinks"
            );
            if summary.failed > 0 {
                std::process::exit(1);
            }
        }
        Err(e) => {
            error!("Conversion run failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn convert_input(config: &ServiceConfig, converter: &UplinkConverter) -> Result<RunSummary> {
    let writer = BufWriter::new(io::stdout().lock());

    match &config.input_path {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path))?;
            pipeline::run(BufReader::new(file), writer, converter, config.pretty)
        }
        None => pipeline::run(io::stdin().lock(), writer, converter, config.pretty),
    }
}

use std::io::Write;

use anyhow::Context;
use core::time::Duration;
use snowid::{
    GeneratorConfig, SnowflakeDatacenterId, SnowflakeGenerator, SnowflakeId, SnowflakeWorkerId,
    SystemClock,
};

use crate::config::{Action, Config, Layout};

/// Executes the configured action, writing results to `out`.
pub fn run(config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
    match &config.action {
        Action::Generate {
            datacenter_id,
            worker_id,
            count,
            generator,
        } => {
            tracing::info!(
                layout = ?config.layout,
                datacenter_id,
                worker_id,
                count,
                epoch_ms = config.epoch.as_millis() as u64,
                "generating ids"
            );
            match config.layout {
                Layout::Worker => {
                    let ids = build_generator::<SnowflakeWorkerId>(
                        *datacenter_id,
                        *worker_id,
                        config.epoch,
                        *generator,
                    )?;
                    generate(&ids, *count, out)
                }
                Layout::Datacenter => {
                    let ids = build_generator::<SnowflakeDatacenterId>(
                        *datacenter_id,
                        *worker_id,
                        config.epoch,
                        *generator,
                    )?;
                    generate(&ids, *count, out)
                }
            }
        }
        Action::Decode { ids } => match config.layout {
            Layout::Worker => decode::<SnowflakeWorkerId>(ids, config.epoch, out),
            Layout::Datacenter => decode::<SnowflakeDatacenterId>(ids, config.epoch, out),
        },
    }
}

fn generate<ID: SnowflakeId>(
    generator: &SnowflakeGenerator<ID, SystemClock>,
    count: usize,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    for _ in 0..count {
        let id = generator.next_id().context("failed to generate id")?;
        writeln!(out, "{id}")?;
    }
    out.flush()?;

    Ok(())
}

/// The application's one generator. Nothing else in the process creates
/// another.
fn build_generator<ID: SnowflakeId>(
    datacenter_id: u64,
    worker_id: u64,
    epoch: Duration,
    config: GeneratorConfig,
) -> anyhow::Result<SnowflakeGenerator<ID, SystemClock>> {
    let generator =
        SnowflakeGenerator::with_datacenter(datacenter_id, worker_id, SystemClock::with_epoch(epoch))?;
    Ok(generator.with_config(config))
}

fn decode<ID: SnowflakeId>(ids: &[u64], epoch: Duration, out: &mut impl Write) -> anyhow::Result<()> {
    for &raw in ids {
        let id = ID::from_raw(raw);
        if !id.is_valid() {
            tracing::warn!(raw, "reserved bits set");
            writeln!(out, "{raw} invalid: reserved bits set")?;
            continue;
        }

        write!(
            out,
            "{raw} timestamp={} unix_ms={}",
            id.timestamp(),
            id.unix_millis(epoch)
        )?;
        if ID::max_datacenter_id() > 0 {
            write!(out, " datacenter_id={}", id.datacenter_id())?;
        }
        writeln!(out, " worker_id={} sequence={}", id.worker_id(), id.sequence())?;
    }
    out.flush()?;

    Ok(())
}

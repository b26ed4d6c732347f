use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use core::time::Duration;
use snowid::{ClockBackwardPolicy, DEFAULT_EPOCH, DEFAULT_EXHAUSTION_RETRIES, GeneratorConfig};

/// Command-line and environment configuration for the `snowid` binary.
///
/// Values are parsed from CLI arguments or environment variables. The epoch
/// and layout must match whatever produced (or will consume) the IDs, since
/// both determine how the bits are read.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "snowid",
    version,
    about = "Generate and decode time-ordered Snowflake IDs"
)]
pub struct CliArgs {
    /// Bit layout of the IDs.
    ///
    /// `worker`: 41-bit timestamp, 10-bit worker, 12-bit sequence.
    /// `datacenter`: 41-bit timestamp, 5-bit datacenter, 5-bit worker,
    /// 12-bit sequence.
    ///
    /// Environment variable: `SNOWID_LAYOUT`
    #[arg(long, env = "SNOWID_LAYOUT", value_enum, default_value_t = Layout::Worker, global = true)]
    pub layout: Layout,

    /// Epoch the timestamps are relative to, in milliseconds since the Unix
    /// epoch. Changing it after IDs have been issued breaks their ordering
    /// against new ones.
    ///
    /// Environment variable: `SNOWID_EPOCH_MS`
    #[arg(long, env = "SNOWID_EPOCH_MS", default_value_t = DEFAULT_EPOCH.as_millis() as u64, global = true)]
    pub epoch_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Worker,
    Datacenter,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print freshly generated IDs, one per line.
    Generate(GenerateArgs),
    /// Print the fields packed into existing IDs.
    Decode(DecodeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Worker identifier. Must be unique among all generators sharing the
    /// layout, epoch, and datacenter.
    ///
    /// Environment variable: `SNOWID_WORKER_ID`
    #[arg(long, env = "SNOWID_WORKER_ID")]
    pub worker_id: u64,

    /// Datacenter identifier (`datacenter` layout only).
    ///
    /// Environment variable: `SNOWID_DATACENTER_ID`
    #[arg(long, env = "SNOWID_DATACENTER_ID")]
    pub datacenter_id: Option<u64>,

    /// Number of IDs to print.
    ///
    /// Environment variable: `SNOWID_COUNT`
    #[arg(short = 'n', long, env = "SNOWID_COUNT", default_value_t = 1)]
    pub count: usize,

    /// How many times to re-sample a clock that reads earlier than the last
    /// issued ID before failing. Zero fails immediately.
    ///
    /// Environment variable: `SNOWID_WAIT_RETRIES`
    #[arg(long, env = "SNOWID_WAIT_RETRIES", default_value_t = 0)]
    pub wait_retries: u32,

    /// Pause between clock samples while waiting, in microseconds. Zero
    /// spins.
    ///
    /// Environment variable: `SNOWID_POLL_INTERVAL_US`
    #[arg(long, env = "SNOWID_POLL_INTERVAL_US", default_value_t = 100)]
    pub poll_interval_us: u64,

    /// How many times to re-sample the clock while a millisecond's sequence
    /// is exhausted before failing.
    ///
    /// Environment variable: `SNOWID_EXHAUSTION_RETRIES`
    #[arg(long, env = "SNOWID_EXHAUSTION_RETRIES", default_value_t = DEFAULT_EXHAUSTION_RETRIES)]
    pub exhaustion_retries: u32,
}

#[derive(Args, Debug, Clone)]
pub struct DecodeArgs {
    /// IDs in decimal form.
    #[arg(required = true)]
    pub ids: Vec<String>,
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub layout: Layout,
    pub epoch: Duration,
    pub action: Action,
}

#[derive(Debug, Clone)]
pub enum Action {
    Generate {
        datacenter_id: u64,
        worker_id: u64,
        count: usize,
        generator: GeneratorConfig,
    },
    Decode {
        ids: Vec<u64>,
    },
}

impl TryFrom<CliArgs> for Config {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let layout = args.layout;
        let action = match args.command {
            Command::Generate(generate) => generate_action(layout, generate)?,
            Command::Decode(decode) => {
                let ids = decode
                    .ids
                    .iter()
                    .map(|raw| {
                        raw.trim()
                            .parse::<u64>()
                            .with_context(|| format!("`{raw}` is not a decimal ID"))
                    })
                    .collect::<anyhow::Result<Vec<_>>>()?;
                Action::Decode { ids }
            }
        };

        Ok(Self {
            layout,
            epoch: Duration::from_millis(args.epoch_ms),
            action,
        })
    }
}

fn generate_action(layout: Layout, args: GenerateArgs) -> anyhow::Result<Action> {
    if args.count == 0 {
        bail!("SNOWID_COUNT must be greater than 0");
    }

    let datacenter_id = match (layout, args.datacenter_id) {
        (Layout::Worker, Some(_)) => {
            bail!("SNOWID_DATACENTER_ID requires the `datacenter` layout")
        }
        (_, id) => id.unwrap_or(0),
    };

    let policy = match args.wait_retries {
        0 => ClockBackwardPolicy::FailFast,
        max_retries => ClockBackwardPolicy::Wait { max_retries },
    };

    Ok(Action::Generate {
        datacenter_id,
        worker_id: args.worker_id,
        count: args.count,
        generator: GeneratorConfig::default()
            .poll_interval(Duration::from_micros(args.poll_interval_us))
            .on_clock_backward(policy)
            .exhaustion_retries(args.exhaustion_retries),
    })
}

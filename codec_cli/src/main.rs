use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use types::config::{MainnetConfig, MinimalConfig, PresetName};
use types::primitives::Epoch;
use types::{Codec, ForkName, ForkSchedule, RegistryBuilder, TypeRegistry};

mod input;

#[derive(Parser)]
#[command(name = "codec-cli", version, about = "Encodes, decodes and hashes consensus records")]
struct Cli {
    /// Preset that fixes the maximum lengths of lists
    #[arg(long, global = true, default_value = "mainnet")]
    preset: PresetName,

    /// Log debug messages, unless overridden by RUST_LOG
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decodes SSZ (raw or 0x hex) and prints it as JSON
    Decode {
        #[command(flatten)]
        record: RecordArgs,
        file: PathBuf,
    },
    /// Encodes JSON and prints the SSZ as 0x hex
    Encode {
        #[command(flatten)]
        record: RecordArgs,
        file: PathBuf,
    },
    /// Prints the hash tree root of SSZ or, with --json, of JSON input
    Root {
        #[command(flatten)]
        record: RecordArgs,
        #[arg(long)]
        json: bool,
        file: PathBuf,
    },
    /// Lists the records defined at a fork
    Types {
        #[command(flatten)]
        fork: ForkArgs,
    },
}

#[derive(Args)]
struct ForkArgs {
    /// Fork whose record definitions are used
    #[arg(long, required_unless_present = "config", conflicts_with = "config")]
    fork: Option<ForkName>,

    /// Chain config to look the fork up in, together with --epoch
    #[arg(long, requires = "epoch")]
    config: Option<PathBuf>,

    /// Epoch at which the fork is looked up
    #[arg(long, requires = "config")]
    epoch: Option<Epoch>,
}

impl ForkArgs {
    fn resolve(&self) -> Result<ForkName> {
        match (self.fork, &self.config, self.epoch) {
            (Some(fork), _, _) => Ok(fork),
            (None, Some(path), Some(epoch)) => {
                let yaml = fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let schedule = ForkSchedule::from_yaml(&yaml)
                    .with_context(|| format!("invalid chain config {}", path.display()))?;
                let fork = schedule.fork_at_epoch(epoch);
                info!("epoch {} belongs to {}", epoch, fork);
                Ok(fork)
            }
            _ => bail!("either --fork or both --config and --epoch must be given"),
        }
    }
}

#[derive(Args)]
struct RecordArgs {
    #[command(flatten)]
    fork: ForkArgs,

    /// Record name, such as BeaconBlockBody
    #[arg(long = "type")]
    name: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    SimpleLogger::new().with_level(level).env().init()?;

    let output = run(cli.preset, cli.command)?;
    println!("{}", output);
    Ok(())
}

fn run(preset: PresetName, command: Command) -> Result<String> {
    match command {
        Command::Decode { record, file } => {
            let (registry, fork) = registry_for(preset, &record)?;
            let codec = registry.codec(fork, &record.name)?;
            decode(codec, input::ssz_bytes(read(&file)?)?)
        }
        Command::Encode { record, file } => {
            let (registry, fork) = registry_for(preset, &record)?;
            let codec = registry.codec(fork, &record.name)?;
            encode(codec, &input::json(&read(&file)?)?)
        }
        Command::Root { record, json, file } => {
            let (registry, fork) = registry_for(preset, &record)?;
            let codec = registry.codec(fork, &record.name)?;
            let contents = read(&file)?;
            if json {
                json_root(codec, &input::json(&contents)?)
            } else {
                ssz_root(codec, &input::ssz_bytes(contents)?)
            }
        }
        Command::Types { fork } => {
            let fork = fork.resolve()?;
            let registry = build_registry(preset, RegistryBuilder::new())?;
            Ok(registry.records(fork).collect::<Vec<_>>().join("\n"))
        }
    }
}

fn registry_for(preset: PresetName, record: &RecordArgs) -> Result<(TypeRegistry, ForkName)> {
    let fork = record.fork.resolve()?;
    let builder = RegistryBuilder::new().require(fork, record.name.as_str());
    Ok((build_registry(preset, builder)?, fork))
}

fn build_registry(preset: PresetName, builder: RegistryBuilder) -> Result<TypeRegistry> {
    let registry = match preset {
        PresetName::Mainnet => builder.build::<MainnetConfig>(),
        PresetName::Minimal => builder.build::<MinimalConfig>(),
    };
    registry.with_context(|| format!("failed to build {} records", preset))
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn decode(codec: &Codec, bytes: Vec<u8>) -> Result<String> {
    let value = codec.decode(&bytes)?;
    let json = codec.to_json(&value)?;
    Ok(serde_json::to_string_pretty(&json)?)
}

fn encode(codec: &Codec, json: &serde_json::Value) -> Result<String> {
    let value = codec.from_json(json)?;
    Ok(input::hex_string(codec.encode(&value)?))
}

fn ssz_root(codec: &Codec, bytes: &[u8]) -> Result<String> {
    let value = codec.decode(bytes)?;
    Ok(input::hex_string(codec.hash_tree_root(&value)?))
}

fn json_root(codec: &Codec, json: &serde_json::Value) -> Result<String> {
    let value = codec.from_json(json)?;
    Ok(input::hex_string(codec.hash_tree_root(&value)?))
}

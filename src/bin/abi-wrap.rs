//! Command-line front end: coerce a JSON input to an ABI type.

use std::io::{self, IsTerminal};

use clap::{Parser, Subcommand};
use serde_json::json;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use abi_wrap::{
    BigDecimal, DataType, Input, Request, Resolution, Response, WrapError, WrapOptions, wrap_with,
};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid fallback decimal `{0}`")]
    Fallback(String),

    #[error("Invalid log filter: {0}")]
    LogFilter(String),

    #[error("Cannot coerce to {0}: only bytes and fixed-point types are supported")]
    Unsupported(DataType),

    #[error(transparent)]
    Wrap(#[from] WrapError),
}

#[derive(Parser)]
#[command(name = "abi-wrap")]
#[command(about = "Coerce loosely-typed input into validated canonical ABI values")]
struct Cli {
    /// Log filter (e.g. `debug`, `abi_wrap=trace`)
    #[arg(long, global = true, default_value = "warn", env = "ABI_WRAP_LOG")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Coerce a JSON-encoded input to a type
    Wrap {
        /// Target type, e.g. `bytes32`, `bytes`, `ufixed128x18`
        data_type: DataType,

        /// Input value as JSON, e.g. '"0xab"', '[1,2]', '{"type":"bytes2","value":"0x01"}'
        input: String,

        /// Argument name used in error messages
        #[arg(short, long)]
        name: Option<String>,

        /// Accept loosely matching wrapped values
        #[arg(long)]
        loose: bool,

        /// Decimal to answer the resolver fallback with
        #[arg(long)]
        fallback: Option<String>,

        /// Report unresolved input as partially recognized
        #[arg(long)]
        partial: bool,
    },

    /// Describe a type
    Type {
        /// Type to describe, e.g. `bytes4`, `fixed8x1`
        data_type: DataType,
    },
}

fn init_logging(filter: &str) -> Result<(), AppError> {
    let filter = EnvFilter::try_new(filter).map_err(|e| AppError::LogFilter(e.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(&cli.log)?;

    let output = match cli.command {
        Commands::Wrap {
            data_type,
            input,
            name,
            loose,
            fallback,
            partial,
        } => {
            let input = Input::from_json(&serde_json::from_str(&input)?);
            let options = WrapOptions { name, loose };
            let fallback = fallback
                .map(|text| text.parse::<BigDecimal>().map_err(|_| AppError::Fallback(text)))
                .transpose()?;
            let mut resolver = |request: &Request| {
                tracing::info!(input = %request.input(), "answering resolver request");
                let resolution = match &fallback {
                    Some(value) => Resolution::resolved(value.clone()),
                    None if partial => Resolution::unrecognized().partially_recognized(),
                    None => Resolution::unrecognized(),
                };
                Response::Decimal(resolution)
            };
            match &data_type {
                DataType::Bytes(ty) => wrap_with(ty, &input, &options, &mut resolver)?.to_json(),
                DataType::Decimal(ty) => wrap_with(ty, &input, &options, &mut resolver)?.to_json(),
                other => return Err(AppError::Unsupported(other.clone())),
            }
        }
        Commands::Type { data_type } => match &data_type {
            DataType::Bytes(ty) => json!({
                "type": ty.to_string(),
                "kind": format!("{:?}", ty.kind()).to_lowercase(),
                "length": ty.length(),
            }),
            DataType::Decimal(ty) => json!({
                "type": ty.to_string(),
                "bits": ty.bits,
                "places": ty.places,
                "min": ty.min_value().to_plain_string(),
                "max": ty.max_value().to_plain_string(),
            }),
            other => json!({ "type": other.to_string() }),
        },
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

//! ConcordPay Demo CLI
//!
//! Command-line interface for signing payment requests and checking gateway
//! notifications with the ConcordPay signing core.

use anyhow::Result;
use clap::{Parser, Subcommand};
use concordpay_lib::protocol::DEFAULT_MODULE_ID;

mod commands;
mod config;
mod ui;

use commands::configure::ConfigureArgs;
use commands::sign::SchemaKind;

#[derive(Parser)]
#[command(name = "concordpay-demo")]
#[command(about = "ConcordPay Demo CLI - Sign payment requests and verify gateway notifications", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Custom storage directory (can also be set via CONCORDPAY_DEMO_DIR env var)
    #[arg(long, global = true, env = "CONCORDPAY_DEMO_DIR")]
    storage_dir: Option<String>,

    /// Payment module whose settings are used
    #[arg(long, global = true, default_value = DEFAULT_MODULE_ID)]
    module: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Store merchant id and secret key for a payment module
    Configure {
        /// Merchant account id issued by ConcordPay
        #[arg(long)]
        merchant_id: String,

        /// Merchant secret key
        #[arg(long, env = "CONCORDPAY_SECRET_KEY", hide_env_values = true)]
        secret_key: String,

        /// Checkout page language (ua, ru, en)
        #[arg(long)]
        language: Option<String>,

        /// Redirect after an approved payment
        #[arg(long)]
        approve_url: Option<String>,

        /// Redirect after a declined payment
        #[arg(long)]
        decline_url: Option<String>,

        /// Redirect after a cancelled payment
        #[arg(long)]
        cancel_url: Option<String>,

        /// Notification endpoint
        #[arg(long)]
        callback_url: Option<String>,
    },

    /// Show stored settings (the secret key is masked)
    ShowConfig,

    /// Sign a payment request JSON payload
    SignRequest {
        /// Payload file, or '-' for stdin
        input: String,
    },

    /// Verify a gateway notification JSON payload
    Verify {
        /// Payload file, or '-' for stdin
        input: String,
    },

    /// Print the string that gets signed for a payload
    Serialize {
        /// Which field schema to apply
        #[arg(long, value_enum, default_value = "request")]
        schema: SchemaKind,

        /// Payload file, or '-' for stdin
        input: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("concordpay_demo_cli=debug,concordpay_lib=debug")
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("concordpay_demo_cli=warn,concordpay_lib=warn")
            .with_writer(std::io::stderr)
            .init();
    }

    // Setup storage directory
    let storage_dir = if let Some(dir) = cli.storage_dir {
        std::path::PathBuf::from(dir)
    } else {
        dirs::data_local_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("concordpay-demo")
    };

    // Dispatch commands
    match cli.command {
        Commands::Configure {
            merchant_id,
            secret_key,
            language,
            approve_url,
            decline_url,
            cancel_url,
            callback_url,
        } => {
            let args = ConfigureArgs {
                merchant_id,
                secret_key,
                language,
                approve_url,
                decline_url,
                cancel_url,
                callback_url,
            };
            commands::configure::run(&storage_dir, &cli.module, args, cli.verbose)?;
        }
        Commands::ShowConfig => {
            commands::configure::show(&storage_dir, &cli.module, cli.verbose)?;
        }
        Commands::SignRequest { input } => {
            commands::sign::run(&storage_dir, &cli.module, &input, cli.verbose)?;
        }
        Commands::Verify { input } => {
            commands::verify::run(&storage_dir, &cli.module, &input, cli.verbose)?;
        }
        Commands::Serialize { schema, input } => {
            commands::sign::serialize_only(&input, schema)?;
        }
    }

    Ok(())
}

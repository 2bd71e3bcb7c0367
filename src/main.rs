use anyhow::Result;
use clap::{Parser, Subcommand};

use envseal::cli::{
    handle_config_command, handle_decrypt_command, handle_encrypt_command,
    handle_inspect_command, handle_keygen_command, CliContext, DecryptArgs, EncryptArgs,
    InspectArgs,
};
use envseal::config::{SealPaths, Settings};
use envseal::telemetry::init_tracing;

#[derive(Parser)]
#[command(
    name = "envseal",
    author = "Kaylee Beyene",
    version,
    about = "Passphrase-based authenticated encryption envelopes",
    long_about = "envseal seals files or stdin under a passphrase into a tamper-evident \
                  envelope (bcrypt-pbkdf, AES-256-CBC, HMAC-SHA-512) written as \
                  URL-safe Base64 text or raw bytes, and opens them again."
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file or stdin into an envelope
    #[command(alias = "seal")]
    Encrypt(EncryptArgs),

    /// Decrypt an envelope
    #[command(alias = "open")]
    Decrypt(DecryptArgs),

    /// Print a random 64-character hex passphrase
    Keygen,

    /// Show the public header fields of an envelope
    Inspect(InspectArgs),

    /// Show current configuration and paths
    Config {
        /// Write the effective settings to config.json if it does not exist
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose)?;

    // Initialize paths and settings
    let paths = SealPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let ctx = CliContext::new(paths, settings);

    match cli.command {
        Commands::Encrypt(args) => handle_encrypt_command(&ctx, args)?,
        Commands::Decrypt(args) => handle_decrypt_command(&ctx, args)?,
        Commands::Keygen => handle_keygen_command(&ctx)?,
        Commands::Inspect(args) => handle_inspect_command(&ctx, args)?,
        Commands::Config { init } => handle_config_command(&ctx, init)?,
    }

    Ok(())
}

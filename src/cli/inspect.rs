//! Inspect, keygen and config CLI commands
//!
//! None of these need a passphrase.

use std::path::PathBuf;

use clap::Args;

use super::{parse_envelope, CliContext};
use crate::audit::{AuditEntry, AuditLogger, Operation};
use crate::crypto::SecureString;
use crate::error::SealResult;
use crate::seal::generate_key;
use crate::storage::read_input;

const RECENT_AUDIT_ENTRIES: usize = 5;

/// Arguments for `envseal inspect`
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Envelope to inspect (stdin when omitted or `-`)
    pub input: Option<PathBuf>,

    /// Read a raw binary envelope instead of Base64 text
    #[arg(long)]
    pub binary: bool,
}

/// Handle `envseal inspect`: print the envelope header as pretty JSON
pub fn handle_inspect_command(ctx: &CliContext, args: InspectArgs) -> SealResult<()> {
    println!("{}", inspect_report(ctx, &args)?);
    Ok(())
}

fn inspect_report(ctx: &CliContext, args: &InspectArgs) -> SealResult<String> {
    let data = read_input(args.input.as_deref())?;
    let envelope = parse_envelope(&data, ctx.binary(args.binary))?;
    Ok(serde_json::to_string_pretty(&envelope.summary())?)
}

/// Handle `envseal keygen`: print a fresh random passphrase
pub fn handle_keygen_command(ctx: &CliContext) -> SealResult<()> {
    let entry = AuditEntry::success(Operation::Keygen, 0, 0);
    match generate_key() {
        Ok(key) => {
            let key = SecureString::new(key);
            println!("{}", key.as_str());
            ctx.finish(
                AuditEntry {
                    output_bytes: key.len(),
                    ..entry
                },
                Ok(()),
            )
        }
        Err(e) => ctx.finish(entry, Err(e)),
    }
}

/// Handle `envseal config`: show resolved paths and effective settings
///
/// With `init`, the effective settings are first written to the settings
/// file unless one already exists.
pub fn handle_config_command(ctx: &CliContext, init: bool) -> SealResult<()> {
    let settings = &ctx.settings;
    let settings_file = ctx.paths.settings_file();

    if init && !settings_file.exists() {
        settings.save(&ctx.paths)?;
        println!("Wrote {}", settings_file.display());
        println!();
    }

    println!("envseal Configuration");
    println!("=====================");
    println!("Config directory: {}", ctx.paths.base_dir().display());
    println!("Settings file:    {}", settings_file.display());
    println!("Audit log:        {}", ctx.paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Envelope format: {:?}", settings.envelope_format);
    println!("  Iterations:      {}", settings.iterations);
    println!("  Audit enabled:   {}", settings.audit_enabled);

    let recent = AuditLogger::for_paths(&ctx.paths).read_recent(RECENT_AUDIT_ENTRIES)?;
    if !recent.is_empty() {
        println!();
        println!("Recent activity:");
        for entry in &recent {
            println!("  {}", entry.format_human_readable());
        }
    }

    Ok(())
}

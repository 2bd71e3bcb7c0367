//! Encrypt and decrypt CLI commands
//!
//! Both commands read a file or stdin and write a file (atomically) or stdout.

use std::path::PathBuf;

use clap::Args;
use zeroize::Zeroize;

use super::{parse_envelope, CliContext, PassphraseSource};
use crate::audit::{AuditEntry, Operation};
use crate::crypto::Iterations;
use crate::error::SealResult;
use crate::seal::{open, Sealer};
use crate::storage::{describe, read_input, write_output};

/// Arguments for `envseal encrypt`
#[derive(Args, Debug)]
pub struct EncryptArgs {
    /// File to encrypt (stdin when omitted or `-`)
    pub input: Option<PathBuf>,

    /// Where to write the envelope (stdout when omitted or `-`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write a raw binary envelope instead of Base64 text
    #[arg(long)]
    pub binary: bool,

    /// KDF work factor, 50 to 100000 (default from config)
    #[arg(long, value_name = "N")]
    pub iterations: Option<u32>,

    /// Read the passphrase from this environment variable instead of prompting
    #[arg(long, value_name = "VAR")]
    pub passphrase_env: Option<String>,
}

/// Arguments for `envseal decrypt`
#[derive(Args, Debug)]
pub struct DecryptArgs {
    /// Envelope to decrypt (stdin when omitted or `-`)
    pub input: Option<PathBuf>,

    /// Where to write the plaintext (stdout when omitted or `-`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read a raw binary envelope instead of Base64 text
    #[arg(long)]
    pub binary: bool,

    /// Read the passphrase from this environment variable instead of prompting
    #[arg(long, value_name = "VAR")]
    pub passphrase_env: Option<String>,
}

/// Handle `envseal encrypt`
pub fn handle_encrypt_command(ctx: &CliContext, args: EncryptArgs) -> SealResult<()> {
    let entry = AuditEntry::success(Operation::Encrypt, 0, 0).with_locations(
        describe(args.input.as_deref()),
        describe(args.output.as_deref()),
    );
    let iterations = match args.iterations.map(Iterations::new).transpose() {
        Ok(requested) => requested.unwrap_or(ctx.settings.iterations),
        Err(e) => return ctx.finish(entry, Err(e)),
    };

    let mut entry = entry.with_iterations(iterations.get());
    let result = encrypt_input(ctx, &args, iterations, &mut entry);
    ctx.finish(entry, result)
}

fn encrypt_input(
    ctx: &CliContext,
    args: &EncryptArgs,
    iterations: Iterations,
    entry: &mut AuditEntry,
) -> SealResult<()> {
    let mut plaintext = read_input(args.input.as_deref())?;
    entry.input_bytes = plaintext.len();

    let sealed = PassphraseSource::from_args(args.passphrase_env.as_deref(), true)
        .obtain()
        .and_then(|passphrase| {
            Sealer::new()
                .iterations(iterations)
                .seal(&plaintext, &passphrase)
        });
    plaintext.zeroize();
    let envelope = sealed?;

    let output = if ctx.binary(args.binary) {
        envelope.to_bytes()
    } else {
        let mut text = envelope.to_base64();
        text.push('\n');
        text.into_bytes()
    };

    write_output(args.output.as_deref(), &output)?;
    entry.output_bytes = output.len();
    Ok(())
}

/// Handle `envseal decrypt`
pub fn handle_decrypt_command(ctx: &CliContext, args: DecryptArgs) -> SealResult<()> {
    let mut entry = AuditEntry::success(Operation::Decrypt, 0, 0).with_locations(
        describe(args.input.as_deref()),
        describe(args.output.as_deref()),
    );
    let result = decrypt_input(ctx, &args, &mut entry);
    ctx.finish(entry, result)
}

fn decrypt_input(ctx: &CliContext, args: &DecryptArgs, entry: &mut AuditEntry) -> SealResult<()> {
    let data = read_input(args.input.as_deref())?;
    entry.input_bytes = data.len();

    let envelope = parse_envelope(&data, ctx.binary(args.binary))?;
    entry.iterations = Some(envelope.iterations.get());

    let passphrase =
        PassphraseSource::from_args(args.passphrase_env.as_deref(), false).obtain()?;
    let mut plaintext = open(&envelope, &passphrase)?;

    let written = write_output(args.output.as_deref(), &plaintext);
    entry.output_bytes = plaintext.len();
    plaintext.zeroize();
    written
}

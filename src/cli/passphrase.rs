//! Passphrase acquisition for CLI commands
//!
//! Reads the passphrase from a named environment variable, or prompts for it
//! with hidden input.

use crate::crypto::SecureString;
use crate::error::{SealError, SealResult};

/// Where to get the passphrase from
#[derive(Debug, Clone, Copy)]
pub enum PassphraseSource<'a> {
    /// Read from this environment variable
    Env(&'a str),
    /// Prompt on the terminal; `confirm` asks twice
    Prompt { confirm: bool },
}

impl<'a> PassphraseSource<'a> {
    /// Environment variable if one was named, else an interactive prompt
    pub fn from_args(env_var: Option<&'a str>, confirm: bool) -> Self {
        match env_var {
            Some(var) => Self::Env(var),
            None => Self::Prompt { confirm },
        }
    }

    /// Obtain a non-empty passphrase
    pub fn obtain(self) -> SealResult<SecureString> {
        match self {
            Self::Env(var) => {
                let value = std::env::var(var).map_err(|_| {
                    SealError::Config(format!("Environment variable {} is not set", var))
                })?;
                non_empty(SecureString::new(value))
            }
            Self::Prompt { confirm: true } => prompt_new_passphrase(),
            Self::Prompt { confirm: false } => non_empty(prompt_passphrase("Passphrase: ")?),
        }
    }
}

fn non_empty(passphrase: SecureString) -> SealResult<SecureString> {
    if passphrase.is_empty() {
        Err(SealError::EmptyPassphrase)
    } else {
        Ok(passphrase)
    }
}

/// Prompt for a new passphrase with confirmation
fn prompt_new_passphrase() -> SealResult<SecureString> {
    loop {
        let pass1 = prompt_passphrase("New passphrase: ")?;

        if pass1.is_empty() {
            eprintln!("Passphrase must not be empty. Please try again.");
            continue;
        }

        let pass2 = prompt_passphrase("Confirm passphrase: ")?;

        if pass1 != pass2 {
            eprintln!("Passphrases do not match. Please try again.");
            continue;
        }

        return Ok(pass1);
    }
}

/// Prompt for a passphrase (hidden input)
fn prompt_passphrase(prompt: &str) -> SealResult<SecureString> {
    rpassword::prompt_password(prompt)
        .map(SecureString::from)
        .map_err(|e| SealError::Io(format!("Failed to read passphrase: {}", e)))
}

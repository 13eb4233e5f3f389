//! CLI for the Shutter threshold-encryption codec.
//!
//! This binary provides commands for:
//! - Encrypting a message to an identity under an eon public key
//! - Decrypting an envelope with a released epoch secret key
//!
//! All inputs and outputs use the `0x`-prefixed hex interchange form.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use rand::rngs::OsRng;
use serde_json::json;
use tracing::info;

use shutter_crypto::{decrypt_hex, encrypt_hex};
use shutter_types::encode_hex;

#[derive(Parser)]
#[command(name = "shutter-cli")]
#[command(about = "Identity-based threshold encryption codec")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a message to an identity
    Encrypt {
        /// Message as hex (mutually exclusive with --text)
        #[arg(long, conflicts_with = "text")]
        message: Option<String>,

        /// Message as UTF-8 text
        #[arg(long)]
        text: Option<String>,

        /// Identity preimage (hex)
        #[arg(long)]
        identity: String,

        /// Eon public key (96-byte compressed G2, hex)
        #[arg(long)]
        eon_key: String,

        /// Blinding seed (32 bytes, hex). Omit to draw a fresh one;
        /// only pass this for reproducing test vectors.
        #[arg(long)]
        sigma: Option<String>,
    },

    /// Decrypt an envelope with a released epoch secret key
    Decrypt {
        /// Ciphertext envelope (hex)
        #[arg(long)]
        envelope: String,

        /// Epoch secret key (48-byte compressed G1, hex)
        #[arg(long)]
        key: String,

        /// Also print the plaintext decoded as UTF-8
        #[arg(long)]
        utf8: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Encrypt {
            message,
            text,
            identity,
            eon_key,
            sigma,
        } => {
            let message_hex = match (message, text) {
                (Some(hex), None) => hex,
                (None, Some(text)) => encode_hex(text.as_bytes()),
                _ => return Err(anyhow!("Provide exactly one of --message or --text")),
            };

            let envelope = encrypt_hex(
                &message_hex,
                &identity,
                &eon_key,
                sigma.as_deref(),
                &mut OsRng,
            )?;
            info!(envelope_bytes = (envelope.len() - 2) / 2, "encrypted");

            println!("{}", json!({ "envelope": envelope }));
        }

        Commands::Decrypt {
            envelope,
            key,
            utf8,
        } => {
            let plaintext_hex = decrypt_hex(&envelope, &key)?;

            let mut output = json!({ "plaintext": plaintext_hex });
            if utf8 {
                let bytes = shutter_types::decode_hex(&plaintext_hex)
                    .map_err(|e| anyhow!("internal hex error: {e}"))?;
                output["text"] = json!(String::from_utf8_lossy(&bytes));
            }

            println!("{output}");
        }
    }

    Ok(())
}

//! Create an ECDSA private key or keystore, or parse one back into its address.

use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use anyhow::Context;
use clap::{Args, CommandFactory, Parser, Subcommand};
use egp::{
    create::{self, CreateArgs},
    keystore::ScryptCost,
    parse::{self, ParseArgs},
    paths,
    prompt::TtyPrompt,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "egp")]
#[command(about = "create ecdsa private key or parse it")]
#[command(version = egp::version())]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a random account.
    #[command(visible_alias = "c")]
    Create(CreateCommand),

    /// Parse a private key or keystore and print the address of its public key.
    #[command(visible_alias = "p")]
    Parse(ParseCommand),
}

#[derive(Args, Debug)]
struct CreateCommand {
    /// Print a new private key and its address.
    #[arg(long = "priv")]
    private_key: bool,

    /// Encrypt the new key into a keystore.
    #[arg(long)]
    keystore: bool,

    /// Save the private key or keystore to disk.
    #[arg(long)]
    export: bool,

    #[arg(long, value_name = "DIR", help = dir_help())]
    dir: Option<PathBuf>,

    /// Use a cheaper scrypt (N=4096, p=6) for the keystore.
    #[arg(long)]
    light_kdf: bool,
}

#[derive(Args, Debug)]
struct ParseCommand {
    /// Path of a raw private key file.
    #[arg(long = "priv", value_name = "PATH")]
    private_key: Option<PathBuf>,

    /// Path of a keystore file.
    #[arg(long, value_name = "PATH")]
    keystore: Option<PathBuf>,
}

fn dir_help() -> String {
    let default = paths::default_data_dir()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|| "none, no home directory".to_string());
    format!("Export into DIR/KeyStore and DIR/PrivateKey instead of the default [default: {default}]")
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    setup_logging();
    let cli = Cli::parse();

    let data_dir = paths::ensure_default_dirs().context("prepare default data directory")?;

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        println!("please specify one cmd at least");
        return Ok(());
    };

    let show_keystore = io::stdout().is_terminal();
    let mut stdout = io::stdout().lock();

    match command {
        Commands::Create(cmd) => {
            let args = CreateArgs {
                private_key: cmd.private_key,
                keystore: cmd.keystore,
                export: cmd.export,
                dir: cmd.dir,
                default_dir: data_dir,
                show_keystore,
                scrypt: if cmd.light_kdf {
                    ScryptCost::LIGHT
                } else {
                    ScryptCost::STANDARD
                },
            };
            create::run(&args, &mut TtyPrompt, &mut stdout)?;
        }
        Commands::Parse(cmd) => {
            let args = ParseArgs {
                private_key: cmd.private_key,
                keystore: cmd.keystore,
            };
            parse::run(&args, &mut TtyPrompt, &mut stdout)?;
        }
    }

    Ok(())
}

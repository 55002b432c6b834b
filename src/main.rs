use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use cloudbackup_prepare::{prepare_backup_file, Request};

/// Decrypts and decompresses a CloudBackup backup file.
#[derive(Parser, Debug)]
#[command(disable_version_flag = true)]
struct Options {
    /// Output version information and exit
    #[arg(short = 'v', long)]
    version: bool,

    /// CloudBackup file path
    #[arg(short = 'i', long = "backup-file")]
    backup_file: Option<PathBuf>,

    /// File to save the decrypted and decompressed backup to
    #[arg(short = 'o', long = "output-file")]
    output_file: Option<PathBuf>,

    /// Encryption key to decrypt the backup file (base64url)
    #[arg(short = 'e', long = "encryption-key", default_value = "", hide_default_value = true)]
    encryption_key: String,

    /// Agent version used to take the backup (if empty it's assumed <= 1.2.0)
    #[arg(long = "agent-version", default_value = "", hide_default_value = true)]
    agent_version: String,

    /// Decrypt the backup; only consulted for agent versions above 1.10.0
    #[arg(short = 'y', long)]
    decrypt: bool,

    /// Decompress the backup; only consulted for agent versions above 1.10.0
    #[arg(short = 'z', long)]
    decompress: bool,

    /// Only report errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,

    /// Report more details, may be repeated
    #[arg(long, action = ArgAction::Count)]
    verbose: u8,
}

impl From<Options> for Request {
    fn from(opts: Options) -> Request {
        Request {
            input: opts.backup_file.unwrap_or_default(),
            output: opts.output_file.unwrap_or_default(),
            encryption_key: opts.encryption_key,
            agent_version: opts.agent_version,
            decrypt: opts.decrypt,
            decompress: opts.decompress,
        }
    }
}

fn main() -> ExitCode {
    let opts = Options::parse();
    if opts.version {
        eprintln!("{}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let verbosity = if opts.quiet { 0 } else { 2 + usize::from(opts.verbose) };
    if let Err(err) = stderrlog::new()
        .verbosity(verbosity)
        .timestamp(stderrlog::Timestamp::Off)
        .init()
    {
        eprintln!("Failed to set up logging: {err}");
    }

    let request = Request::from(opts);
    match prepare_backup_file(&request) {
        Ok(_) => {
            log::info!("Process completed successfully");
            ExitCode::SUCCESS
        },
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

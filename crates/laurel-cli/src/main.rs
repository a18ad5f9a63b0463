use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use eyre::Result;
use laurel_cli::commands::{IssueRequest, Issuer, QrSource, read_manifest};
use laurel_cli::config::{self, LaurelConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "laurel", version, about = "Issue PDF certificates of completion.")]
struct Cli {
    /// Config file (defaults to the platform config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Issue a single certificate.
    Issue(IssueArgs),
    /// Issue every certificate listed in a JSON manifest.
    Batch {
        manifest: PathBuf,
    },
    /// Inspect or create the config file.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Args)]
struct IssueArgs {
    /// Recipient name printed on the certificate.
    #[arg(long)]
    name: String,

    /// Title of the completed task.
    #[arg(long)]
    task: String,

    /// Output PDF path.
    #[arg(long, short)]
    out: Option<PathBuf>,

    /// PNG file to use as the QR image.
    #[arg(long, conflicts_with_all = ["qr_base64", "qr_text"])]
    qr_file: Option<PathBuf>,

    /// Base64-encoded PNG to use as the QR image.
    #[arg(long, conflicts_with = "qr_text")]
    qr_base64: Option<String>,

    /// Text to encode into a new QR code.
    #[arg(long)]
    qr_text: Option<String>,
}

impl IssueArgs {
    fn into_request(self) -> IssueRequest {
        let qr = if let Some(path) = self.qr_file {
            QrSource::File(path)
        } else if let Some(encoded) = self.qr_base64 {
            QrSource::Base64(encoded)
        } else if let Some(text) = self.qr_text {
            QrSource::Text(text)
        } else {
            QrSource::Verification
        };

        IssueRequest {
            recipient_name: self.name,
            task_title: self.task,
            output: self.out,
            qr,
        }
    }
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Print the effective config.
    Show,
    /// Write a default config file if none exists.
    Init {
        #[arg(long)]
        output_dir: Option<PathBuf>,
        #[arg(long)]
        verification_base_url: Option<String>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.json);

    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };

    match cli.command {
        Command::Issue(args) => {
            let config = config::load_config(&config_path)?;
            let issued = Issuer::new(&config).issue(args.into_request())?;
            println!("{}", issued.output_path.display());
        }
        Command::Batch { manifest } => {
            let config = config::load_config(&config_path)?;
            let entries = read_manifest(&manifest)?;
            let summary = Issuer::new(&config).batch(entries);
            println!("{}", serde_json::to_string_pretty(&summary)?);
            if !summary.failures.is_empty() {
                return Err(eyre::eyre!(
                    "{} of {} certificates failed",
                    summary.failures.len(),
                    summary.failures.len() + summary.issued.len()
                ));
            }
        }
        Command::Config(ConfigCommand::Show) => {
            let config = config::load_config(&config_path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Command::Config(ConfigCommand::Init {
            output_dir,
            verification_base_url,
        }) => {
            if config_path.exists() {
                return Err(eyre::eyre!(
                    "config already exists at {}",
                    config_path.display()
                ));
            }
            let mut config = LaurelConfig::default();
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            config.verification_base_url = verification_base_url;
            config::save_config(&config_path, &config)?;
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

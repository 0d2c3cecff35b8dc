//! Petition CLI
//!
//! Renders petition templates for a client and prints template text.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use petition_engine::placeholders::{PlaceholderField, TOKEN_CLOSE, TOKEN_OPEN};
use petition_engine::{
    extract_text, DirectoryTemplateStore, DocumentGenerator, EngineConfig, TemplateStore,
};
use shared_types::{ClientRecord, TemplateRecord};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "petition")]
#[command(version, about = "Merge petition templates with client data")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a document from a template and a client record
    Render {
        /// Template file (.txt, .docx or .odt)
        #[arg(short, long)]
        template: PathBuf,

        /// Client record as JSON
        #[arg(short, long)]
        client: PathBuf,

        /// Output file (defaults to the generated file name)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Engine configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the plain text of a document package
    Extract {
        file: PathBuf,
    },

    /// Print the preview shown for a template
    Preview {
        file: PathBuf,

        /// Engine configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List every placeholder a template may use
    Keys,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Documents and text go to stdout; logs stay on stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Render {
            template,
            client,
            out,
            config,
        } => render(&template, &client, out, config.as_deref()),
        Command::Extract { file } => {
            let bytes = fs::read(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            println!("{}", extract_text(&bytes));
            Ok(())
        }
        Command::Preview { file, config } => {
            let generator = DocumentGenerator::new(load_config(config.as_deref())?);
            let (store, template) = open_template(&file)?;
            println!("{}", generator.preview_template(&template, &store)?);
            Ok(())
        }
        Command::Keys => {
            for field in PlaceholderField::ALL {
                let keys: Vec<String> = field
                    .keys()
                    .iter()
                    .map(|key| format!("{}{}{}", TOKEN_OPEN, key.to_uppercase(), TOKEN_CLOSE))
                    .collect();
                println!("{:?}: {}", field, keys.join(", "));
            }
            Ok(())
        }
    }
}

fn render(
    template_path: &Path,
    client_path: &Path,
    out: Option<PathBuf>,
    config: Option<&Path>,
) -> Result<()> {
    let generator = DocumentGenerator::new(load_config(config)?);
    let (store, template) = open_template(template_path)?;

    let client_json = fs::read_to_string(client_path)
        .with_context(|| format!("Failed to read client record: {}", client_path.display()))?;
    let client: ClientRecord =
        serde_json::from_str(&client_json).context("Failed to parse client record")?;

    let generated = generator.generate(Some(&template), Some(&client), &store)?;
    if generated.document.degraded {
        tracing::warn!("Template could not be merged in place; formatting was not kept");
    }

    let out = out.unwrap_or_else(|| PathBuf::from(&generated.file_name));
    fs::write(&out, &generated.document.bytes)
        .with_context(|| format!("Failed to write {}", out.display()))?;
    eprintln!("Wrote {}", out.display());
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_file(path),
        None => Ok(EngineConfig::default()),
    }
}

/// Serve a single template file through a store over its directory
fn open_template(path: &Path) -> Result<(DirectoryTemplateStore, TemplateRecord)> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("Invalid template path: {}", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let store = DirectoryTemplateStore::new(dir);
    let template = store
        .get_template(file_name)
        .with_context(|| format!("Not a template file: {}", path.display()))?;
    Ok((store, template))
}

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use edgar_digest::{
    DigestConfig, Edgar, Section, Summarizer, analyst, extract_section_texts, publish,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Parser)]
#[command(name = "edgar-digest", version)]
#[command(about = "Summarize the latest SEC filing of a company into a static HTML report")]
struct Cli {
    /// More logging (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render the analyst report for a ticker or CIK.
    Analyst {
        /// Ticker (e.g. AAPL) or CIK. Defaults to ANALYST_DEFAULT_TICKER or AAPL.
        ticker: Option<String>,

        /// Form types that count as the latest filing.
        #[arg(long, num_args = 1..)]
        forms: Option<Vec<String>>,

        /// Highlight sentences per section.
        #[arg(short, long)]
        k: Option<usize>,

        /// Base directory for <module>/docs/index.html.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Directory for the ticker map and downloaded filings.
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Print the top sentences of a text file (stdin if omitted).
    Summarize {
        file: Option<PathBuf>,

        #[arg(short, long, default_value_t = edgar_digest::DEFAULT_HIGHLIGHTS)]
        k: usize,
    },
    /// Print the MD&A and Risk Factors text extracted from a filing HTML file.
    Sections { file: PathBuf },
    /// Copy <root>/<module>/docs/* to <root>/docs/<module>/.
    Publish {
        module: String,

        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
    /// Inspect configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective configuration.
    Show {
        #[arg(long)]
        as_json: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[edgar-digest] ✗ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<()> {
    let mut config = DigestConfig::from_env();

    match command {
        Command::Analyst {
            ticker,
            forms,
            k,
            out,
            data_dir,
        } => {
            if let Some(forms) = forms {
                config.forms = forms;
            }
            if let Some(k) = k {
                config.highlights = k;
            }
            if let Some(out) = out {
                config.output_dir = out;
            }
            if let Some(data_dir) = data_dir {
                config.data_dir = data_dir;
            }
            let ticker = ticker.unwrap_or_else(|| config.default_ticker.clone());

            let edgar =
                Edgar::with_config(config.edgar.clone()).context("failed to create Edgar client")?;
            eprintln!("[edgar-digest] Rendering Analyst report for {} …", ticker);
            let path = analyst::run(&config, &edgar, &ticker)
                .await
                .with_context(|| format!("failed to render report for {}", ticker))?;
            eprintln!("[edgar-digest] ✓ Wrote report: {}", path.display());
        }
        Command::Summarize { file, k } => {
            let text = match file {
                Some(path) => fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    io::stdin()
                        .read_to_string(&mut buf)
                        .context("failed to read stdin")?;
                    buf
                }
            };
            for sentence in Summarizer::default().summarize(&text, k)? {
                println!("{}", sentence);
            }
        }
        Command::Sections { file } => {
            let html = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let sections = extract_section_texts(&html);
            for section in Section::ALL {
                println!("== {} ==", section);
                println!("{}\n", sections.get(section));
            }
        }
        Command::Publish { module, root } => {
            let copied = publish(&module, &root)
                .with_context(|| format!("failed to publish {}", module))?;
            eprintln!(
                "[edgar-digest] Published {} → {} ({} file(s))",
                module,
                root.join("docs").join(&module).display(),
                copied.len()
            );
        }
        Command::Config {
            action: ConfigAction::Show { as_json },
        } => {
            let entries = config.entries();
            if as_json {
                let map: serde_json::Map<String, serde_json::Value> = entries
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), serde_json::Value::String(v)))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&map)?);
            } else {
                for (key, value) in entries {
                    println!("{key} = {value}");
                }
            }
        }
    }

    Ok(())
}

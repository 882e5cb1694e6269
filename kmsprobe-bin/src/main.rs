//! Command-line interface for kmsprobe

use clap::{ArgAction, Parser, ValueEnum};
use kmsprobe::{Card, ProbeError};
use std::io::Write;
use std::process;

#[derive(Parser)]
#[command(name = "kmsprobe")]
#[command(version = kmsprobe::VERSION)]
#[command(about = "List DRM/KMS capabilities, planes, encoders, connectors and CRTCs", long_about = None)]
struct Cli {
    /// DRM device node
    #[arg(default_value = kmsprobe::DEFAULT_DEVICE)]
    device: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn try_main(cli: &Cli) -> anyhow::Result<()> {
    log::info!("probing {} ({:?} output)", cli.device, cli.format);
    let card = Card::open(&cli.device)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.format {
        OutputFormat::Text => kmsprobe::run(&card, &mut out)?,
        OutputFormat::Json => {
            let report = kmsprobe::collect(&card, card.path())?;
            report.write_json(&mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = try_main(&cli) {
        eprintln!("ERROR: {}", err);
        let code = err
            .downcast_ref::<ProbeError>()
            .map(ProbeError::exit_code)
            .unwrap_or(4);
        process::exit(code);
    }
}

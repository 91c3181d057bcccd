#![warn(clippy::uninlined_format_args)]

use std::{borrow::Cow, env, fs, io, process};

use splitbill_application::{ExpenseProcessor, SettleResponse, SettlementReport};
use splitbill_presentation::{SettlementPresenter, format_settlement_error};
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Cow<'static, str>>;

const USAGE: &str = "Usage: splitbill-interpreter <request.json> [--text]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

fn main() {
    // Logs go to stderr so stdout stays machine readable.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let (path, format) = parse_args(env::args().skip(1))?;

    let source =
        fs::read_to_string(&path).map_err(|err| format!("Failed to read '{path}': {err}"))?;

    let processor = ExpenseProcessor::default();
    let report = processor
        .parse_request(&source)
        .and_then(|request| processor.process(&request))
        .map_err(|err| format_settlement_error(&err))?;

    println!("{}", render(&report, format)?);
    Ok(())
}

fn parse_args(args: impl IntoIterator<Item = String>) -> CliResult<(String, OutputFormat)> {
    let mut path = None;
    let mut format = OutputFormat::Json;

    for arg in args {
        match arg.as_str() {
            "--text" => format = OutputFormat::Text,
            flag if flag.starts_with("--") => {
                return Err(format!("Unknown option '{flag}'\n{USAGE}").into());
            }
            _ if path.is_some() => return Err(USAGE.into()),
            _ => path = Some(arg),
        }
    }

    path.map(|path| (path, format)).ok_or(Cow::Borrowed(USAGE))
}

fn render(report: &SettlementReport, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&SettleResponse::from(report))
            .map_err(|err| Cow::Owned(format!("Failed to encode response: {err}"))),
        OutputFormat::Text => Ok(SettlementPresenter::render(report).to_text()),
    }
}

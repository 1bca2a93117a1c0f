use std::path::PathBuf;
use structopt::StructOpt;

use weblog_sentry::config::Config;
use weblog_sentry::output::{self, CsvReport, HtmlReport, JsonReport, ReportEmitter, TerminalReport};
use weblog_sentry::Analyzer;

const DEFAULT_CONFIG_PATH: &str = "weblog_sentry.toml";

/// Exit code when the analysis ran but an output could not be written
const EXIT_PARTIAL_OUTPUT: i32 = 2;

/// Web server access log analyzer
#[derive(StructOpt, Debug)]
#[structopt(name = "weblog_sentry", about = "Analyze web server access logs for traffic and failed logins")]
struct Cli {
    /// Path to configuration file (defaults are used when absent)
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Access log to analyze
    #[structopt(short, long)]
    input: Option<PathBuf>,

    /// Flag IPs with more failed logins than this
    #[structopt(short, long)]
    threshold: Option<u64>,

    /// Rows per table in the terminal summary
    #[structopt(short = "n", long)]
    top: Option<usize>,

    /// Also export the full report as JSON
    #[structopt(long)]
    json: Option<PathBuf>,

    /// Do not print the terminal summary
    #[structopt(short, long)]
    quiet: bool,

    #[structopt(subcommand)]
    command: Option<Command>,
}

#[derive(StructOpt, Debug)]
enum Command {
    /// Generate a default configuration file
    InitConfig {
        /// Output path for the configuration file [default: weblog_sentry.toml]
        #[structopt(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    // Info by default; RUST_LOG takes precedence
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::from_args();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    if let Some(Command::InitConfig { ref output }) = cli.command {
        let output = output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Config::default().to_file(&output)?;
        println!("Default configuration written to: {:?}", output);
        return Ok(0);
    }

    let config = load_config(&cli)?;

    let analyzer = Analyzer::new(&config.detection);
    let report = analyzer.analyze_file(&config.input.log_path)?;

    let mut emitters: Vec<Box<dyn ReportEmitter>> = Vec::new();
    if config.output.terminal {
        emitters.push(Box::new(TerminalReport::new(config.output.top_n)));
    }
    emitters.push(Box::new(CsvReport::new(config.output.csv_path.clone())));
    emitters.push(Box::new(HtmlReport::new(config.output.html_path.clone())));
    if let Some(ref path) = config.output.json_path {
        emitters.push(Box::new(JsonReport::new(path.clone())));
    }

    let summary = output::emit_all(&emitters, &report);

    if !summary.written.is_empty() {
        println!("\nResults saved to {}", join_paths(&summary.written));
    }

    if summary.all_succeeded() {
        Ok(0)
    } else {
        for (name, e) in &summary.failed {
            eprintln!("error: {} report not written: {}", name, e);
        }
        Ok(EXIT_PARTIAL_OUTPUT)
    }
}

/// Load the configuration file, then apply command line overrides
fn load_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match cli.config {
        Some(ref path) => Config::from_file(path)?,
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                log::info!("Loading configuration from {:?}", default_path);
                Config::from_file(&default_path)?
            } else {
                log::debug!("No configuration file found, using defaults");
                Config::default()
            }
        }
    };

    if let Some(ref input) = cli.input {
        config.input.log_path = input.clone();
    }
    if let Some(threshold) = cli.threshold {
        config.detection.failed_login_threshold = threshold;
    }
    if let Some(top) = cli.top {
        config.output.top_n = top;
    }
    if let Some(ref json) = cli.json {
        config.output.json_path = Some(json.clone());
    }
    if cli.quiet {
        config.output.terminal = false;
    }

    Ok(config)
}

/// "a", "a and b", "a, b and c"
fn join_paths(paths: &[PathBuf]) -> String {
    let names: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
    match names.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}

use catalog_query::report::{self, Output};
use catalog_query::config::separator_byte;
use catalog_query::{Config, data};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Run the catalog report over a CSV or Parquet file.
#[derive(Debug, Parser)]
#[command(name = "catalog-query", version, about)]
struct Cli {
    /// Catalog file (.csv or .parquet)
    path: PathBuf,

    /// JSON file with `load` and `queries` sections
    #[arg(long)]
    config: Option<PathBuf>,

    /// Query to run, 1-15; repeatable. Runs all when omitted.
    #[arg(short, long = "query", value_parser = clap::value_parser!(u8).range(1..=15))]
    queries: Vec<u8>,

    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Fail on invalid UTF-8 instead of skipping it
    #[arg(long)]
    strict_encoding: bool,

    /// Field separator for delimited input
    #[arg(long)]
    separator: Option<char>,

    #[arg(short, long)]
    verbose: bool,

    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        level.to_level_filter()
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if cli.strict_encoding {
        config.load.lenient_encoding = false;
    }
    if let Some(separator) = cli.separator {
        config.load.separator = separator_byte(separator)
            .ok_or_else(|| format!("separator {separator:?} is not a single ASCII character"))?;
    }

    let db = data::load(&cli.path, &config.load)?;

    let queries = if cli.queries.is_empty() {
        (1..=15).collect()
    } else {
        cli.queries
    };

    let mut json = Vec::new();
    for number in queries {
        let output = report::run_query(&db, &config.queries, number)?;
        match cli.format {
            Format::Table => print_table(number, &output)?,
            Format::Json => json.push(serde_json::json!({
                "query": number,
                "title": report::title(number),
                "rows": output.to_json()?,
            })),
        }
    }
    if cli.format == Format::Json {
        println!("{}", serde_json::to_string_pretty(&json)?);
    }
    Ok(())
}

fn print_table(number: u8, output: &Output) -> Result<(), Box<dyn std::error::Error>> {
    println!("{number}. {}", report::title(number).unwrap_or_default());
    if output.is_empty() {
        println!("(no rows)\n");
    } else {
        println!("{}\n", output.to_frame()?);
    }
    Ok(())
}

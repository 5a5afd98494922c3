use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use dropout_cli::predict::input::PredictConfig;
use dropout_cli::predict::output::format_field_table;
use dropout_cli::predict::run;

fn config_arg() -> Arg {
    Arg::new("config")
        .help("Path to the JSON configuration naming the scaler and classifier artifacts")
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("DROPOUT_LOG", "error,dropout=info"))
        .init();

    let matches = Command::new("dropout")
        .version(clap::crate_version!())
        .about("Dropout forecasts for domestic and international students")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("fields").about("List input fields with their ranges and defaults"))
        .subcommand(
            Command::new("config").about("Print a configuration template to stdout"),
        )
        .subcommand(
            Command::new("predict")
                .about("Predict the outcome of a single student")
                .arg(config_arg())
                .arg(
                    Arg::new("set")
                        .short('s')
                        .long("set")
                        .help("Override one input as Field=value (repeatable). Unset fields use their defaults.")
                        .action(ArgAction::Append)
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(
                    Arg::new("cohort")
                        .long("cohort")
                        .help("Classifier selection. 'auto' routes by Nationality.")
                        .value_parser(["auto", "domestic", "international", "compare"]),
                )
                .arg(
                    Arg::new("report_file")
                        .short('r')
                        .long("report")
                        .help("Write an HTML page with the result to this path")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("batch")
                .about("Predict every row of a CSV/TSV table")
                .arg(config_arg())
                .arg(
                    Arg::new("input_data")
                        .short('d')
                        .long("input_data")
                        .help(
                            "Path to the input table. Overrides the input_data \
                             specified in the configuration file.",
                        )
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output_file")
                        .short('o')
                        .long("output_file")
                        .help("Path to the output table (*.tsv or *.csv)")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    match matches.subcommand() {
        Some(("fields", _)) => {
            print!("{}", format_field_table());
            Ok(())
        }
        Some(("config", _)) => {
            println!("{}", serde_json::to_string_pretty(&PredictConfig::default())?);
            Ok(())
        }
        Some(("predict", sub_m)) => handle_predict(sub_m),
        Some(("batch", sub_m)) => handle_batch(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn load_config(matches: &ArgMatches) -> Result<PredictConfig> {
    let config_path: &PathBuf = matches
        .get_one("config")
        .ok_or_else(|| anyhow::anyhow!("Missing configuration path"))?;
    if !config_path.exists() {
        log::error!(
            "Config file not found: {:?}. Save the template below and point it at your artifacts.",
            config_path
        );
        println!("{}", serde_json::to_string_pretty(&PredictConfig::default())?);
        std::process::exit(1);
    }
    log::info!("[Dropout] Using config: {:?}", config_path);
    PredictConfig::from_arguments(config_path, matches)
}

fn handle_predict(matches: &ArgMatches) -> Result<()> {
    let params = load_config(matches)?;

    match run::run_predict(&params) {
        Ok(text) => {
            print!("{}", text);
            Ok(())
        }
        Err(e) => {
            log::error!("Prediction failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_batch(matches: &ArgMatches) -> Result<()> {
    let params = load_config(matches)?;

    match run::run_batch(&params) {
        Ok(summary) => {
            eprintln!(
                "[Dropout] Scored {} rows: {} predicted ({} unrecognized), {} failed. Output: {}",
                summary.total,
                summary.predicted,
                summary.unrecognized,
                summary.failed,
                params.output_file
            );
            Ok(())
        }
        Err(e) => {
            log::error!("Batch prediction failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

// src/cli.rs
use std::env;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Arg, ArgAction, Command, builder::PossibleValuesParser};

use crate::{commands, core::suite::TestSuite, infra::t};

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> String {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        if let Some(lang) = args.get(pos + 1) {
            return lang.clone();
        }
    }
    // Fallback to system language detection
    sys_locale::get_locale().unwrap_or_else(|| "en".to_string())
}

fn build_cli(locale: &str, suite: &TestSuite) -> Command {
    let model_choices = suite.model_identifiers();
    let eval_choices = suite.eval_names();

    Command::new("eval-matrix")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .subcommand_required(true)
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("benchmark")
                .about(t!("cmd_benchmark_about", locale = locale).to_string())
                .arg(
                    Arg::new("models")
                        .long("models")
                        .help(t!("arg_models", locale = locale).to_string())
                        .value_name("MODEL")
                        .num_args(1..)
                        .action(ArgAction::Append)
                        .value_parser(PossibleValuesParser::new(model_choices.clone()))
                        .default_values(model_choices.clone()),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .help(t!("arg_limit", locale = locale).to_string())
                        .value_name("N")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("0")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("verbose")
                        .long("verbose")
                        .help(t!("arg_verbose", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("randomize")
                        .long("randomize")
                        .help(t!("arg_randomize", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help(t!("arg_config", locale = locale).to_string())
                        .value_name("CONFIG")
                        .default_value("EvalMatrix.toml")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about(t!("cmd_inspect_about", locale = locale).to_string())
                .arg(
                    Arg::new("model")
                        .long("model")
                        .help(t!("arg_model", locale = locale).to_string())
                        .value_name("MODEL")
                        .required(true)
                        .value_parser(PossibleValuesParser::new(model_choices))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("eval-id")
                        .long("eval-id")
                        .help(t!("arg_eval_id", locale = locale).to_string())
                        .value_name("EVAL")
                        .required(true)
                        .value_parser(PossibleValuesParser::new(eval_choices))
                        .action(ArgAction::Set),
                ),
        )
}

/// Parses the command line and dispatches to the selected subcommand.
/// This is the embedding entry point: build a suite, then hand it here.
pub async fn run(suite: TestSuite) -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let language = pre_parse_language();
    rust_i18n::set_locale(&language);

    let matches = build_cli(&language, &suite).get_matches();

    match matches.subcommand() {
        Some(("benchmark", benchmark_matches)) => {
            let models: Vec<String> = benchmark_matches
                .get_many::<String>("models")
                .map(|values| values.cloned().collect())
                .unwrap_or_default();
            let limit = benchmark_matches
                .get_one::<usize>("limit")
                .copied()
                .unwrap_or(0);
            let verbose = benchmark_matches.get_flag("verbose");
            let randomize = benchmark_matches.get_flag("randomize");
            let config = benchmark_matches
                .get_one::<PathBuf>("config")
                .unwrap() // Has default
                .clone();

            commands::benchmark::execute(&suite, models, limit, verbose, randomize, &config)
                .await?;
        }
        Some(("inspect", inspect_matches)) => {
            let model = inspect_matches
                .get_one::<String>("model")
                .unwrap() // Required
                .clone();
            let eval_id = inspect_matches
                .get_one::<String>("eval-id")
                .unwrap() // Required
                .clone();

            commands::inspect::execute(&suite, &model, &eval_id).await?;
        }
        _ => {
            // Unreachable: a subcommand is required.
        }
    }
    Ok(())
}

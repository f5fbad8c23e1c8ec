mod commands;
mod debounce;

use std::path::Path;

use clap::{Arg, ArgAction, Command};
use flexi_logger::{
    detailed_format, Age, Cleanup, Criterion, Duplicate, FileSpec, Logger, Naming,
};
use log::error;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

fn cli() -> Command {
    Command::new("espwizard")
        .about(format!("ESPHome YAML Wizard - {}\n\n{}", VERSION, DESCRIPTION))
        .version(VERSION)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("build")
                .about("Generate a configuration from a device description file.")
                .args([
                    Arg::new("description")
                        .required(true)
                        .help("Device description YAML file."),
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .default_value("esphome.yaml")
                        .help("File the generated configuration is written to."),
                    Arg::new("stdout")
                        .long("stdout")
                        .action(ArgAction::SetTrue)
                        .help("Print the configuration instead of writing a file."),
                    Arg::new("watch")
                        .long("watch")
                        .action(ArgAction::SetTrue)
                        .help("Keep running and re-generate when the description changes."),
                ]),
        )
        .subcommand(
            Command::new("check")
                .about("Validate a device description file.")
                .arg(
                    Arg::new("description")
                        .required(true)
                        .help("Device description YAML file."),
                ),
        )
        .subcommand(
            Command::new("assist")
                .about("Generate a configuration from a natural-language request (Gemini).")
                .args([
                    Arg::new("prompt").help("What the device should do."),
                    Arg::new("context")
                        .long("context")
                        .help("Existing configuration file to take as context."),
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .default_value("esphome.yaml")
                        .help("File the generated configuration is written to."),
                    Arg::new("stdout")
                        .long("stdout")
                        .action(ArgAction::SetTrue)
                        .help("Print the configuration instead of writing a file."),
                ]),
        )
        .subcommand(
            Command::new("fix")
                .about("Repair a configuration from a validator error message (Gemini).")
                .args([
                    Arg::new("file")
                        .required(true)
                        .help("Configuration file to repair in place."),
                    Arg::new("error")
                        .short('e')
                        .long("error")
                        .help("Error message produced by the firmware validator."),
                ]),
        )
}

// The handle must stay alive for the duration of the program or file logging
// shuts down early.
fn init_logging() -> Option<flexi_logger::LoggerHandle> {
    #[cfg(not(debug_assertions))]
    let log_directory = directories::BaseDirs::new()
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| Path::new("./").to_path_buf());

    #[cfg(debug_assertions)]
    let log_directory = Path::new("./").to_path_buf();

    #[cfg(not(debug_assertions))]
    let log_level = "info";

    #[cfg(debug_assertions)]
    let log_level = "debug";

    let logger = Logger::try_with_env_or_str(log_level)
        .unwrap()
        .format_for_files(detailed_format)
        .log_to_file(FileSpec::default().directory(&log_directory))
        .append()
        .rotate(
            Criterion::AgeOrSize(Age::Day, 10 * 1024 * 1024),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(7),
        )
        .duplicate_to_stderr(Duplicate::Warn);

    match logger.start() {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    }
}

fn main() {
    let _logger = init_logging();

    let matches = cli().get_matches();

    let result = match matches.subcommand() {
        Some(("build", sub_matches)) => {
            let description = sub_matches.get_one::<String>("description").unwrap();
            let output = sub_matches.get_one::<String>("output").unwrap();
            let to_stdout = sub_matches.get_flag("stdout");
            let watch = sub_matches.get_flag("watch");
            commands::build::run(description, output, to_stdout, watch)
        }
        Some(("check", sub_matches)) => {
            let description = sub_matches.get_one::<String>("description").unwrap();
            commands::check::run(description)
        }
        Some(("assist", sub_matches)) => {
            let prompt = sub_matches.get_one::<String>("prompt");
            let context = sub_matches.get_one::<String>("context");
            let output = sub_matches.get_one::<String>("output").unwrap();
            let to_stdout = sub_matches.get_flag("stdout");
            commands::assist::run(prompt, context, output, to_stdout)
        }
        Some(("fix", sub_matches)) => {
            let file = sub_matches.get_one::<String>("file").unwrap();
            let error_message = sub_matches.get_one::<String>("error");
            commands::fix::run(file, error_message)
        }
        _ => unreachable!(),
    };

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

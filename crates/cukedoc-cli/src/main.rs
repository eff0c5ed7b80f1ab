use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use cukedoc::{CukedocError, CustomParameter, LogLevel, ReportConfig, ReportGenerator, logging};
use tracing::{error, warn};

/// Exit code for command-line usage errors.
const USAGE_EXIT: u8 = 64;

/// Flags given on the command line. Every `Some`/`true` overrides the config
/// file; everything else keeps the file's value or the default.
#[derive(Debug, Default)]
struct CliArgs {
    config_file: Option<PathBuf>,
    source_dir: Option<PathBuf>,
    destination_dir: Option<PathBuf>,
    title: Option<String>,
    log_level: Option<String>,
    custom_css: Option<PathBuf>,
    custom_parameters_file: Option<PathBuf>,
    parameters: Vec<CustomParameter>,
    color_passed: Option<String>,
    color_failed: Option<String>,
    color_skipped: Option<String>,
    fail_on_pending: bool,
    expand_hooks: bool,
    expand_step_hooks: bool,
    expand_doc_strings: bool,
    collapse_attachments: bool,
    skip: bool,
}

enum Command {
    Help,
    Generate(CliArgs),
}

fn print_help() {
    let help = "\
cukedoc - static HTML reports for Cucumber JSON results

USAGE:
    cukedoc [OPTIONS] [SOURCE_DIR DESTINATION_DIR]

OPTIONS:
    -c, --config <PATH>              TOML configuration file, applied before the flags below
    -s, --source <DIR>               Directory holding the Cucumber JSON files
    -d, --destination <DIR>          Directory the report is written to
    -t, --title <TEXT>               Page title (default: Cucumber Report)
    -l, --log-level <LEVEL>          default|compact|minimal|off (RUST_LOG overrides)
    --custom-css <PATH>              Extra stylesheet linked from every page
    --custom-parameters-file <PATH>  Properties file with key=value pairs for the start page
    -p, --param <KEY=VALUE>          Key/value pair for the start page (repeatable)
    --color-passed <HEX>             Color of passed results (default: #04B404)
    --color-failed <HEX>             Color of failed results (default: #C94A38)
    --color-skipped <HEX>            Color of skipped results (default: #F48F00)
    --fail-on-pending                Count pending and undefined steps as failures
    --expand-hooks                   Expand before/after hooks on detail pages
    --expand-step-hooks              Expand step hooks on detail pages
    --expand-doc-strings             Expand doc strings on detail pages
    --collapse-attachments           Collapse attachments on detail pages
    --skip                           Do nothing and exit successfully
    -h, --help                       Show this help
";
    println!("{help}");
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut cli = CliArgs::default();
    let mut positional = Vec::new();

    let mut index = 0;
    while index < args.len() {
        let flag = args[index].as_str();
        let mut value = || -> Result<String, String> {
            index += 1;
            args.get(index)
                .cloned()
                .ok_or_else(|| format!("{flag} requires a value"))
        };
        match flag {
            "-c" | "--config" => cli.config_file = Some(PathBuf::from(value()?)),
            "-s" | "--source" => cli.source_dir = Some(PathBuf::from(value()?)),
            "-d" | "--destination" => cli.destination_dir = Some(PathBuf::from(value()?)),
            "-t" | "--title" => cli.title = Some(value()?),
            "-l" | "--log-level" => cli.log_level = Some(value()?),
            "--custom-css" => cli.custom_css = Some(PathBuf::from(value()?)),
            "--custom-parameters-file" => {
                cli.custom_parameters_file = Some(PathBuf::from(value()?));
            }
            "-p" | "--param" => {
                let raw = value()?;
                let Some((key, val)) = raw.split_once('=') else {
                    return Err(format!("invalid --param value (expected KEY=VALUE): {raw}"));
                };
                cli.parameters.push(CustomParameter::new(key.trim(), val.trim()));
            }
            "--color-passed" => cli.color_passed = Some(value()?),
            "--color-failed" => cli.color_failed = Some(value()?),
            "--color-skipped" => cli.color_skipped = Some(value()?),
            "--fail-on-pending" => cli.fail_on_pending = true,
            "--expand-hooks" => cli.expand_hooks = true,
            "--expand-step-hooks" => cli.expand_step_hooks = true,
            "--expand-doc-strings" => cli.expand_doc_strings = true,
            "--collapse-attachments" => cli.collapse_attachments = true,
            "--skip" => cli.skip = true,
            "-h" | "--help" => return Ok(Command::Help),
            unknown if unknown.starts_with('-') => {
                return Err(format!("unknown option: {unknown}"));
            }
            path => positional.push(PathBuf::from(path)),
        }
        index += 1;
    }

    let mut positional = positional.into_iter();
    if let Some(source) = positional.next() {
        cli.source_dir.get_or_insert(source);
    }
    if let Some(destination) = positional.next() {
        cli.destination_dir.get_or_insert(destination);
    }
    if let Some(extra) = positional.next() {
        return Err(format!("unexpected argument: {}", extra.display()));
    }
    Ok(Command::Generate(cli))
}

/// Config file first, then flags on top.
fn build_config(cli: CliArgs) -> Result<ReportConfig, CukedocError> {
    let mut config = match &cli.config_file {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };
    if let Some(source) = cli.source_dir {
        config.source_dir = source;
    }
    if let Some(destination) = cli.destination_dir {
        config.destination_dir = destination;
    }
    if let Some(title) = cli.title {
        config.custom_page_title = title;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(css) = cli.custom_css {
        config.custom_css = Some(css);
    }
    if let Some(file) = cli.custom_parameters_file {
        config.custom_parameters_file = Some(file);
    }
    config.custom_parameters.extend(cli.parameters);
    if let Some(color) = cli.color_passed {
        config.status_colors.passed = color;
    }
    if let Some(color) = cli.color_failed {
        config.status_colors.failed = color;
    }
    if let Some(color) = cli.color_skipped {
        config.status_colors.skipped = color;
    }
    config.fail_scenarios_on_pending_or_undefined_steps |= cli.fail_on_pending;
    config.expand_before_after_hooks |= cli.expand_hooks;
    config.expand_step_hooks |= cli.expand_step_hooks;
    config.expand_doc_strings |= cli.expand_doc_strings;
    if cli.collapse_attachments {
        config.expand_attachments = false;
    }
    config.skip |= cli.skip;
    Ok(config)
}

fn report_failure(err: &CukedocError) -> ExitCode {
    error!(code = err.exit_code(), "{err}");
    eprintln!("error: {err}");
    if let Some(hint) = err.suggestion() {
        eprintln!("hint: {hint}");
    }
    ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
}

fn run(cli: CliArgs) -> ExitCode {
    // An explicit --log-level wins over the config file for the subscriber.
    let raw_level = cli.log_level.clone();
    let config = build_config(cli);
    let raw_level = raw_level.or_else(|| config.as_ref().ok().map(|c| c.log_level.clone()));
    let parsed = raw_level.as_deref().map(LogLevel::parse);
    let level = parsed.flatten().unwrap_or_default();
    logging::init(level);
    if let (Some(raw), Some(None)) = (raw_level.as_deref(), parsed) {
        warn!(value = raw, "unknown log level, using default");
    }

    let config = match config {
        Ok(config) => config,
        Err(err) => return report_failure(&err),
    };
    let summary = match ReportGenerator::new(config).generate() {
        Ok(summary) => summary,
        Err(err) => return report_failure(&err),
    };
    if summary.skipped {
        return ExitCode::SUCCESS;
    }
    for failure in &summary.failures {
        eprintln!("failed: {}: {}", failure.path, failure.error);
    }
    let report_path = summary.report_path.clone();
    match summary.into_result() {
        Ok(_) => {
            if level.prints_summary() {
                println!("{}", report_path.display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => report_failure(&err),
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    match parse_args(&args) {
        Ok(Command::Help) => {
            print_help();
            ExitCode::SUCCESS
        }
        Ok(Command::Generate(cli)) => run(cli),
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("run `cukedoc --help` for usage");
            ExitCode::from(USAGE_EXIT)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_owned()).collect()
    }

    fn generate(raw: &[&str]) -> CliArgs {
        match parse_args(&args(raw)) {
            Ok(Command::Generate(cli)) => cli,
            Ok(Command::Help) => panic!("expected generate, got help"),
            Err(err) => panic!("expected generate, got error: {err}"),
        }
    }

    #[test]
    fn positional_directories() {
        let cli = generate(&["json", "report"]);
        assert_eq!(cli.source_dir, Some(PathBuf::from("json")));
        assert_eq!(cli.destination_dir, Some(PathBuf::from("report")));
    }

    #[test]
    fn flags_and_params() {
        let cli = generate(&[
            "-s",
            "in",
            "--destination",
            "out",
            "-p",
            "Build_Number=42",
            "--param",
            "Team = Payments",
            "--fail-on-pending",
            "--collapse-attachments",
        ]);
        assert_eq!(cli.source_dir, Some(PathBuf::from("in")));
        assert_eq!(
            cli.parameters,
            vec![
                CustomParameter::new("Build_Number", "42"),
                CustomParameter::new("Team", "Payments"),
            ]
        );
        let config = build_config(cli).expect("config should build");
        assert!(config.fail_scenarios_on_pending_or_undefined_steps);
        assert!(!config.expand_attachments);
        assert_eq!(config.destination_dir, PathBuf::from("out"));
    }

    #[test]
    fn usage_errors() {
        assert!(matches!(parse_args(&args(&["--title"])), Err(e) if e.contains("requires a value")));
        assert!(matches!(parse_args(&args(&["--bogus"])), Err(e) if e.contains("unknown option")));
        assert!(matches!(parse_args(&args(&["-p", "novalue"])), Err(e) if e.contains("KEY=VALUE")));
        assert!(matches!(parse_args(&args(&["a", "b", "c"])), Err(e) if e.contains("unexpected")));
        assert!(matches!(parse_args(&args(&["-h"])), Ok(Command::Help)));
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cukedoc.toml");
        std::fs::write(
            &path,
            "source_dir = \"from-file\"\ndestination_dir = \"out\"\ncustom_page_title = \"File\"\nexpand_doc_strings = true\n",
        )
        .unwrap();
        let cli = generate(&["--config", path.to_str().unwrap(), "--title", "Flag", "--source", "from-flag"]);
        let config = build_config(cli).expect("config should build");
        assert_eq!(config.source_dir, PathBuf::from("from-flag"));
        assert_eq!(config.destination_dir, PathBuf::from("out"));
        assert_eq!(config.custom_page_title, "Flag");
        assert!(config.expand_doc_strings);
    }
}

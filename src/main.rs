//! Command-line driver for shape sorting
//!
//! Usage: `shapesort -f<file> -t<h|a|v> -s<b|i|s|m|q|h>`. Values attach directly to
//! their flag letter, and the letters are accepted in either case.

use std::io;
use std::process;

use clap::{Arg, ArgAction, Command};
use env_logger::Env;

use shape_sort::{
    config::{RunConfig, RunMode, DEFAULT_INPUT},
    error::{ShapeResult, ShapeSortError},
    input::normalize_path,
    run, SortAlgorithm, SortKey, SortOrder, EXIT_SUCCESS,
};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    match try_main() {
        Ok(()) => process::exit(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("shapesort: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn try_main() -> ShapeResult<()> {
    let matches = build_cli().get_matches();
    let config = parse_config_from_matches(&matches)?;

    let stdout = io::stdout();
    let summary = run(&config, io::BufWriter::new(stdout.lock()))?;
    log::info!(
        "sorted {} shapes in {} mode ({} ms)",
        summary.total,
        summary.mode,
        summary.elapsed.as_millis()
    );
    Ok(())
}

fn build_cli() -> Command {
    Command::new("shapesort")
        .version(env!("CARGO_PKG_VERSION"))
        .override_usage("shapesort [-f<FILE>] [-t<h|a|v>] [-s<b|i|s|m|q|h>] [OPTION]...")
        .about("Sort geometric solids by height, base area or volume")
        .long_about("Sort geometric solids by height, base area or volume.\n\nThe input file starts with a record count, followed by one `<ShapeKind> <height> <parameter>` record per line. Shape kinds: Cylinder, Cone, Pyramid, SquarePrism, TriangularPrism, PentagonalPrism, OctagonalPrism.")
        .disable_help_flag(true)
        .disable_version_flag(true)

        .arg(Arg::new("file")
            .short('f')
            .short_alias('F')
            .long("file")
            .help("Shape file to read")
            .long_help("Shape file to read. Surrounding quotes are stripped and backslashes become forward slashes.")
            .value_name("FILE")
            .default_value(DEFAULT_INPUT))
        .arg(Arg::new("type")
            .short('t')
            .short_alias('T')
            .long("type")
            .help("Compare by h (height), a (base area) or v (volume)")
            .value_name("KEY"))
        .arg(Arg::new("sort")
            .short('s')
            .short_alias('S')
            .long("sort")
            .help("Algorithm: b (bubble), i (insertion), s (selection), m (merge), q (quick), h (heap)")
            .value_name("ALGO"))

        .arg(Arg::new("order")
            .long("order")
            .help("Output direction: asc or desc (default desc, largest first)")
            .value_name("ORDER"))
        .arg(Arg::new("mode")
            .long("mode")
            .help("auto, full or batch (auto picks batch for files over the threshold)")
            .value_name("MODE"))
        .arg(Arg::new("chunk-size")
            .long("chunk-size")
            .help("Records per checkpoint chunk in batch mode")
            .value_name("N"))
        .arg(Arg::new("batch-threshold")
            .long("batch-threshold")
            .help("File size in bytes above which auto mode switches to batch")
            .value_name("BYTES"))

        .arg(Arg::new("help")
            .long("help")
            .help("Display this help and exit")
            .action(ArgAction::Help))
        .arg(Arg::new("version")
            .long("version")
            .help("Output version information and exit")
            .action(ArgAction::Version))
}

/// Parse configuration from command line matches
fn parse_config_from_matches(matches: &clap::ArgMatches) -> ShapeResult<RunConfig> {
    let mut config = RunConfig::new();

    if let Some(file) = matches.get_one::<String>("file") {
        config.input = normalize_path(file).into();
    }

    // Unknown key or algorithm letters fall back to the defaults with a warning
    if let Some(key) = matches.get_one::<String>("type") {
        config.key = SortKey::parse_or_default(key);
    }
    if let Some(algo) = matches.get_one::<String>("sort") {
        config.algorithm = SortAlgorithm::parse_or_default(algo);
    }

    if let Some(order) = matches.get_one::<String>("order") {
        config.order = order.parse::<SortOrder>()?;
    }
    if let Some(mode) = matches.get_one::<String>("mode") {
        config.mode = mode.parse::<RunMode>()?;
    }
    if let Some(size) = matches.get_one::<String>("chunk-size") {
        config.chunk_size = size
            .parse()
            .map_err(|_| ShapeSortError::invalid_config(&format!("invalid chunk size: {size}")))?;
    }
    if let Some(bytes) = matches.get_one::<String>("batch-threshold") {
        config.batch_threshold = bytes.parse().map_err(|_| {
            ShapeSortError::invalid_config(&format!("invalid batch threshold: {bytes}"))
        })?;
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> ShapeResult<RunConfig> {
        let matches = build_cli()
            .try_get_matches_from(args)
            .expect("Failed to parse test arguments");
        parse_config_from_matches(&matches)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["shapesort"]).expect("Failed to parse test config");
        assert_eq!(config.input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(config.key, SortKey::Volume);
        assert_eq!(config.algorithm, SortAlgorithm::Heap);
        assert_eq!(config.order, SortOrder::Descending);
        assert_eq!(config.mode, RunMode::Auto);
    }

    #[test]
    fn test_attached_values_any_case() {
        let config = parse(&["shapesort", "-Fres/shapes2.txt", "-tH", "-Sq"])
            .expect("Failed to parse test config");
        assert_eq!(config.input, PathBuf::from("res/shapes2.txt"));
        assert_eq!(config.key, SortKey::Height);
        assert_eq!(config.algorithm, SortAlgorithm::Quick);
    }

    #[test]
    fn test_quoted_windows_path() {
        let config = parse(&["shapesort", "-f\"res\\shapes3.txt\""])
            .expect("Failed to parse test config");
        assert_eq!(config.input, PathBuf::from("res/shapes3.txt"));
    }

    #[test]
    fn test_invalid_letters_fall_back() {
        let config = parse(&["shapesort", "-tz", "-sx"]).expect("Failed to parse test config");
        assert_eq!(config.key, SortKey::Volume);
        assert_eq!(config.algorithm, SortAlgorithm::Heap);
    }

    #[test]
    fn test_long_options() {
        let config = parse(&[
            "shapesort",
            "--order", "asc",
            "--mode", "batch",
            "--chunk-size", "250",
            "--batch-threshold", "4096",
        ])
        .expect("Failed to parse test config");
        assert_eq!(config.order, SortOrder::Ascending);
        assert_eq!(config.mode, RunMode::Batch);
        assert_eq!(config.chunk_size, 250);
        assert_eq!(config.batch_threshold, 4096);
    }

    #[test]
    fn test_bad_chunk_size() {
        assert!(parse(&["shapesort", "--chunk-size", "0"]).is_err());
        assert!(parse(&["shapesort", "--chunk-size", "lots"]).is_err());
        assert!(parse(&["shapesort", "--order", "sideways"]).is_err());
    }
}

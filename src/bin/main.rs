//! CLI binary for ISS Speed
//!
//! This provides the command-line interface for the iss_speed library.

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use iss_speed::{
    estimate_from_files, estimate_from_track, Capture, CaptureMode, Clock, CommandCapture,
    DryRunCapture, ElapsedTimePolicy, ExifDecoder, FileResultWriter, RunConfig, RunReport,
    SamplingLoop, SimulatedClock, SystemClock, PUBLISHED_ISS_SPEED_KMPS, REFERENCE_TRACK,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ", built ",
    env!("VERGEN_BUILD_DATE"),
    ")"
);

fn build_command() -> Command {
    Command::new("ISS Speed")
        .version(VERSION)
        .about("Estimate the ground-track speed of the ISS from geotagged photos.")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .help("Enable debug output (overrides RUST_LOG)")
                .action(ArgAction::SetTrue),
        )
        .subcommand(run_command())
        .subcommand(
            Command::new("compare")
                .about("Estimate the speed between consecutive existing photos and average it")
                .arg(
                    Arg::new("files")
                        .help("Photos in capture order (at least two)")
                        .required(true)
                        .num_args(2..)
                        .index(1),
                )
                .arg(strict_arg()),
        )
        .subcommand(
            Command::new("reference")
                .about("Check the distance model against logged ISS ground-track positions"),
        )
}

fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .help("Treat a photo older than its predecessor as an error instead of using the absolute speed")
        .action(ArgAction::SetTrue)
}

fn run_command() -> Command {
    let command = Command::new("run")
        .about("Capture photos in a loop and write the average speed to a result file")
        .arg(
            Arg::new("image-prefix")
                .long("image-prefix")
                .help("Prefix of the numbered photos: iteration i uses <PREFIX><i>.jpg [default: photos/]")
                .value_name("PREFIX"),
        )
        .arg(
            Arg::new("max-duration")
                .long("max-duration")
                .help("Stop after this many minutes [default: 1]")
                .value_name("MINUTES")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("max-iterations")
                .long("max-iterations")
                .help("Stop after this many photos [default: 3]")
                .value_name("N")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("delay")
                .long("delay")
                .help("Seconds to wait between photos [default: 5]")
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("result")
                .long("result")
                .help("File the average speed is written to [default: result.txt]")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("capture-command")
                .long("capture-command")
                .help("Program that takes a photo (default: dry run using existing photos)")
                .value_name("PROGRAM"),
        )
        .arg(
            Arg::new("capture-arg")
                .long("capture-arg")
                .help("Argument for the capture program; {path}, {lat} and {lon} are substituted (repeatable)")
                .value_name("ARG")
                .allow_hyphen_values(true)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("no-wait")
                .long("no-wait")
                .help("Simulate the delay instead of sleeping (for dry runs against existing photos)")
                .action(ArgAction::SetTrue),
        )
        .arg(strict_arg());

    #[cfg(feature = "csv")]
    let command = command.arg(
        Arg::new("samples-csv")
            .long("samples-csv")
            .help("Also write one CSV row per iteration to this file")
            .value_name("FILE"),
    );

    #[cfg(feature = "json")]
    let command = command
        .arg(
            Arg::new("config")
                .long("config")
                .help("JSON run configuration; command-line options override its values")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("summary-json")
                .long("summary-json")
                .help("Also write the full run report as JSON to this file")
                .value_name("FILE"),
        );

    command
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    // Only fails if a subscriber is already installed
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn policy(matches: &ArgMatches) -> ElapsedTimePolicy {
    if matches.get_flag("strict") {
        ElapsedTimePolicy::Strict
    } else {
        ElapsedTimePolicy::Absolute
    }
}

fn config_from_matches(matches: &ArgMatches) -> Result<RunConfig> {
    #[cfg(feature = "json")]
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => RunConfig::from_json_file(std::path::Path::new(path))?,
        None => RunConfig::default(),
    };
    #[cfg(not(feature = "json"))]
    let mut config = RunConfig::default();

    if let Some(prefix) = matches.get_one::<String>("image-prefix") {
        config.image_path_prefix = prefix.clone();
    }
    if let Some(&minutes) = matches.get_one::<f64>("max-duration") {
        config.max_duration_minutes = minutes;
    }
    if let Some(&iterations) = matches.get_one::<u32>("max-iterations") {
        config.max_iterations = iterations;
    }
    if let Some(&seconds) = matches.get_one::<f64>("delay") {
        config.delay_seconds = seconds;
    }
    if let Some(result) = matches.get_one::<String>("result") {
        config.result_path = PathBuf::from(result);
    }
    if let Some(program) = matches.get_one::<String>("capture-command") {
        let args = matches
            .get_many::<String>("capture-arg")
            .map(|args| args.cloned().collect())
            .unwrap_or_default();
        config.capture = CaptureMode::Command {
            program: program.clone(),
            args,
        };
    }
    if matches.get_flag("strict") {
        config.elapsed_policy = ElapsedTimePolicy::Strict;
    }

    config.validate()?;
    Ok(config)
}

fn run_loop<K: Clock>(config: RunConfig, capture: &mut dyn Capture, clock: K) -> Result<RunReport> {
    let mut sampling = SamplingLoop::new(config, capture, ExifDecoder::new(), clock)?;
    sampling.run(&mut FileResultWriter)
}

fn run(matches: &ArgMatches) -> Result<()> {
    let config = config_from_matches(matches)?;

    let mut capture: Box<dyn Capture> = match &config.capture {
        CaptureMode::DryRun => Box::new(DryRunCapture),
        CaptureMode::Command { program, args } => {
            Box::new(CommandCapture::new(program.clone(), args.clone()))
        }
    };

    let report = if matches.get_flag("no-wait") {
        run_loop(config, capture.as_mut(), SimulatedClock::new())?
    } else {
        run_loop(config, capture.as_mut(), SystemClock::new())?
    };

    println!(
        "Avg. travel speed across {} photos: {} km/s ({:?})",
        report.iterations_completed(),
        report.result_text,
        report.stop_reason
    );

    #[cfg(feature = "csv")]
    {
        if let Some(path) = matches.get_one::<String>("samples-csv") {
            iss_speed::export_iterations_csv(&report, std::path::Path::new(path))?;
            println!("Exported samples to: {path}");
        }
    }

    #[cfg(feature = "json")]
    {
        if let Some(path) = matches.get_one::<String>("summary-json") {
            iss_speed::export_summary_json(&report, std::path::Path::new(path))?;
            println!("Exported run summary to: {path}");
        }
    }

    Ok(())
}

fn compare(matches: &ArgMatches) -> Result<()> {
    let files: Vec<PathBuf> = matches
        .get_many::<String>("files")
        .map(|files| files.map(PathBuf::from).collect())
        .unwrap_or_default();

    let report = estimate_from_files(&files, &ExifDecoder::new(), policy(matches))?;
    for pair in &report.pairs {
        println!(
            "{} -> {}: {} km in {} s = {} km/s",
            pair.from.display(),
            pair.to.display(),
            pair.measurement.distance_km,
            pair.measurement.elapsed_s,
            pair.measurement.speed_kmps
        );
    }
    println!(
        "Avg. travel speed across {} photos: {} km/s",
        files.len(),
        report.average.to_result_string()
    );
    println!("Actual travel speed of the ISS: {PUBLISHED_ISS_SPEED_KMPS}kmps");
    Ok(())
}

fn reference() {
    for observation in &REFERENCE_TRACK {
        let m = observation.measurement();
        println!(
            "{} km in {} s = {} km/s",
            m.distance_km, m.elapsed_s, m.speed_kmps
        );
    }
    println!(
        "Avg. travel speed across {} data points: {} km/s",
        REFERENCE_TRACK.len(),
        estimate_from_track(&REFERENCE_TRACK).to_result_string()
    );
    println!("Actual travel speed of the ISS: {PUBLISHED_ISS_SPEED_KMPS}kmps");
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();
    init_logging(matches.get_flag("debug"));

    let outcome = match matches.subcommand() {
        Some(("run", sub)) => run(sub),
        Some(("compare", sub)) => compare(sub),
        Some(("reference", _)) => {
            reference();
            Ok(())
        }
        _ => {
            build_command().print_help()?;
            println!();
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e:#}");
        eprintln!("Use --debug flag for more detailed information.");
        std::process::exit(1);
    }

    Ok(())
}

//! Appliance energy CLI entry point — argument parsing and config-driven runs.

use std::path::Path;
use std::process;

use log::{error, info};

use appliance_energy::config::AnalysisConfig;
use appliance_energy::io::export::export_report_csv;
use appliance_energy::runner::{self, Outcome};

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    mode_override: Option<String>,
    day_override: Option<i64>,
    report_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("appliance-energy — appliance usage and auto-off savings calculator");
    eprintln!();
    eprintln!("Usage: appliance-energy [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load analysis from TOML config file");
    eprintln!(
        "  --preset <name>          Use a built-in preset ({})",
        AnalysisConfig::PRESETS.join(", ")
    );
    eprintln!("  --mode <mode>            Override analysis mode (usage, savings, day, month)");
    eprintln!("  --day <n>                Override the day for day mode");
    eprintln!("  --report-out <path>      Export the month report to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after the analysis");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the always_on preset is used.");
}

fn value_after(args: &[String], i: usize, flag: &str, expected: &str) -> String {
    match args.get(i) {
        Some(v) => v.clone(),
        None => {
            eprintln!("error: {flag} requires {expected}");
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        mode_override: None,
        day_override: None,
        report_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                cli.scenario_path = Some(value_after(&args, i, "--scenario", "a path argument"));
            }
            "--preset" => {
                i += 1;
                cli.preset = Some(value_after(&args, i, "--preset", "a name argument"));
            }
            "--mode" => {
                i += 1;
                cli.mode_override = Some(value_after(&args, i, "--mode", "a mode argument"));
            }
            "--day" => {
                i += 1;
                let raw = value_after(&args, i, "--day", "an integer argument");
                if let Ok(d) = raw.parse::<i64>() {
                    cli.day_override = Some(d);
                } else {
                    eprintln!("error: --day value \"{raw}\" must be an integer");
                    process::exit(1);
                }
            }
            "--report-out" => {
                i += 1;
                cli.report_out = Some(value_after(&args, i, "--report-out", "a path argument"));
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = value_after(&args, i, "--port", "a u16 argument");
                if let Ok(p) = raw.parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{raw}\" is not a valid u16");
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    if cli.scenario_path.is_some() && cli.preset.is_some() {
        eprintln!("error: --scenario and --preset are mutually exclusive; choose one source");
        process::exit(1);
    }

    cli
}

fn main() {
    let default_filter = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(default_filter)
        .format_timestamp_secs()
        .init();

    let cli = parse_args();

    // --scenario takes priority, then --preset, then the always_on default
    let (mut config, base_dir) = if let Some(ref path) = cli.scenario_path {
        let path = Path::new(path);
        info!("loading scenario {}", path.display());
        match AnalysisConfig::from_toml_file(path) {
            Ok(cfg) => (cfg, path.parent().unwrap_or(Path::new(".")).to_path_buf()),
            Err(e) => {
                error!("{e}");
                process::exit(1);
            }
        }
    } else {
        let name = cli.preset.as_deref().unwrap_or("always_on");
        info!("using preset {name}");
        match AnalysisConfig::from_preset(name) {
            Ok(cfg) => (cfg, Path::new(".").to_path_buf()),
            Err(e) => {
                error!("{e}");
                process::exit(1);
            }
        }
    };

    if let Some(mode) = cli.mode_override {
        config.analysis.mode = mode;
    }
    if let Some(day) = cli.day_override {
        config.analysis.day = Some(day);
    }

    let outcome = match runner::run(&config, &base_dir) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    println!("{outcome}");

    if let Some(ref path) = cli.report_out {
        let Outcome::Month(ref report) = outcome else {
            error!("--report-out requires mode \"month\"");
            process::exit(1);
        };
        if let Err(e) = export_report_csv(report, Path::new(path)) {
            error!("failed to write CSV: {e}");
            process::exit(1);
        }
        info!("report written to {path}");
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(appliance_energy::api::AppState { outcome });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                error!("failed to create tokio runtime: {e}");
                process::exit(1);
            }
        };
        if let Err(e) = rt.block_on(appliance_energy::api::serve(state, addr)) {
            error!("server error: {e}");
            process::exit(1);
        }
    }
}

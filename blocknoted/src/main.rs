//! # Block Note Host Daemon
//!
//! Main entry point for the block-content host.

use blocknoted::{DaemonConfig, DaemonRuntime};
use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

/// Command-line options
#[derive(Debug, Default)]
struct Options {
    config_path: Option<String>,
    script_path: Option<String>,
    log_level: Option<String>,
    max_steps: Option<usize>,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("blocknoted");

    let options = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(program);
        process::exit(1);
    });

    let mut config = match &options.config_path {
        Some(path) => DaemonConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Failed to load config: {}", e);
            process::exit(1);
        }),
        None => DaemonConfig::default(),
    };
    if options.log_level.is_some() {
        config.log_level = options.log_level.clone();
    }
    if let Some(max_steps) = options.max_steps {
        config.max_steps = max_steps;
    }

    init_logging(config.log_level.as_deref());

    let script = read_script(options.script_path.as_deref()).unwrap_or_else(|e| {
        eprintln!("Failed to read script: {}", e);
        process::exit(1);
    });

    let mut runtime = DaemonRuntime::new(&config, &script).unwrap_or_else(|e| {
        eprintln!("Failed to create runtime: {}", e);
        process::exit(1);
    });

    let stdout = io::stdout();
    if let Err(e) = runtime.run(&mut stdout.lock()) {
        eprintln!("Runtime error: {}", e);
        process::exit(1);
    }
}

/// `RUST_LOG` sets the filter unless a level was given explicitly
fn init_logging(level: Option<&str>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    let _ = builder.try_init();
}

fn read_script(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --config".to_string());
                }
                options.config_path = Some(args[i].clone());
            }
            "--script" | "-s" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --script".to_string());
                }
                options.script_path = Some(args[i].clone());
            }
            "--log-level" | "-l" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --log-level".to_string());
                }
                options.log_level = Some(args[i].clone());
            }
            "--max-steps" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --max-steps".to_string());
                }
                options.max_steps = Some(
                    args[i]
                        .parse()
                        .map_err(|_| format!("Invalid max-steps value: {}", args[i]))?,
                );
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    Ok(options)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <FILE>      JSON config file");
    eprintln!("  -s, --script <FILE>      Request script (default: stdin)");
    eprintln!("  -l, --log-level <LEVEL>  Log filter, overrides RUST_LOG");
    eprintln!("  --max-steps <N>          Maximum requests to replay (0 = unlimited)");
    eprintln!("  -h, --help               Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --script demos/shopping_list.bnreq", program);
    eprintln!("  echo 'types' | {} --log-level debug", program);
}

//! urlclean CLI
//!
//! Cleans tracking metadata out of URLs given as arguments or piped on
//! stdin, and manages the rule configuration file.

mod stream;

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use uc_config::{default_config_path, load, validate, write_default, ConfigStore};

use crate::stream::{clean_items, clean_lines, StreamOptions};

#[derive(Parser)]
#[command(name = "urlclean")]
#[command(about = "Strip tracking parameters, slugs and fragments from URLs")]
struct Cli {
    /// Verbose logging (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean URLs from arguments, or from stdin line by line
    Clean {
        /// URLs to clean; reads stdin when empty
        urls: Vec<String>,

        /// Config file (default: config.json next to the executable)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print inputs that were not cleaned as they are
        #[arg(short, long)]
        keep_unchanged: bool,

        /// Reload the config file when it changes while reading stdin
        #[arg(short, long)]
        watch: bool,
    },

    /// Validate a config file and report suspicious rules
    Check {
        /// Config file to check
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write the built-in default config
    Init {
        /// Destination file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Clean {
            urls,
            config,
            keep_unchanged,
            watch,
        } => cmd_clean(
            &urls,
            config,
            StreamOptions {
                keep_unchanged,
                watch,
            },
        ),
        Commands::Check { config } => cmd_check(config),
        Commands::Init { config, force } => cmd_init(config, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn cmd_clean(urls: &[String], config: Option<PathBuf>, options: StreamOptions) -> Result<(), String> {
    let path = config.unwrap_or_else(default_config_path);
    let store = ConfigStore::open(&path).map_err(|e| e.to_string())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let stats = if urls.is_empty() {
        clean_lines(&store, io::stdin().lock(), &mut out, options)?
    } else {
        clean_items(&store, urls.iter().map(String::as_str), &mut out, options)?
    };

    log::debug!(
        "processed {} inputs, cleaned {}, config reloads {}",
        stats.lines,
        stats.cleaned,
        stats.reloads
    );
    Ok(())
}

fn cmd_check(config: Option<PathBuf>) -> Result<(), String> {
    let path = config.unwrap_or_else(default_config_path);
    let config = load(&path).map_err(|e| e.to_string())?;

    let param_count: usize = config.tracking_params.iter().map(|g| g.params.len()).sum();
    let enabled = config.site_rules.iter().filter(|r| r.enabled).count();

    println!("Config '{}' is valid", path.display());
    println!("  Trim URL:        {}", config.trim_url);
    println!("  Param groups:    {} ({} params, {} distinct)",
        config.tracking_params.len(),
        param_count,
        config.all_tracking_params().len(),
    );
    println!("  Site rules:      {} ({} enabled, {} disabled)",
        config.site_rules.len(),
        enabled,
        config.site_rules.len() - enabled,
    );

    let warnings = validate(&config);
    if !warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &warnings {
            println!("  - {}", warning);
        }
    }

    Ok(())
}

fn cmd_init(config: Option<PathBuf>, force: bool) -> Result<(), String> {
    let path = config.unwrap_or_else(default_config_path);
    if path.exists() && !force {
        return Err(format!("'{}' already exists (use --force to overwrite)", path.display()));
    }

    write_default(&path).map_err(|e| e.to_string())?;
    println!("Wrote default config to '{}'", path.display());
    Ok(())
}

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use contract_bindgen::generate::{self, GenerateOptions, TargetReport};
use contract_bindgen::utils::logging::{self, LogLevel};
use contract_bindgen::{log_error, BindgenConfig, BindgenError, NamingRule, DEFAULT_CONFIG_FILE};
use contract_bindgen::{DEFAULT_SUFFIX, DEFAULT_TRIM};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "contract-bindgen")]
#[command(about = "Generate TypeScript ABI bindings from Foundry artifacts")]
struct Cli {
    /// Config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Resolve config paths against this directory instead of the config's
    #[arg(long, global = true)]
    root: Option<PathBuf>,
    /// Print results as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write bindings for every configured target
    Generate {
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// List the contracts each target would emit
    List,
    /// Show how contract names are rewritten
    Rename {
        #[arg(long, default_value = DEFAULT_TRIM)]
        trim: String,
        #[arg(long, default_value = DEFAULT_SUFFIX)]
        suffix: String,
        #[arg(required = true)]
        names: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::set_level(if cli.quiet {
        LogLevel::Error
    } else if cli.verbose > 0 {
        LogLevel::Debug
    } else {
        LogLevel::Info
    });

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if cli.json {
                let payload = match err.downcast_ref::<BindgenError>() {
                    Some(e) => json!({ "error": e }),
                    None => json!({ "error": { "code": "internal", "message": format!("{:#}", err) } }),
                };
                println!("{}", payload);
            }
            log_error!("cli", format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Generate { dry_run } => {
            let config = load_config(cli)?;
            let report = generate::generate(&config, GenerateOptions { dry_run: *dry_run })?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for target in &report.targets {
                    print_target(target);
                }
            }
        }
        Commands::List => {
            let config = load_config(cli)?;
            let mut listed = Vec::with_capacity(config.targets.len());
            for target in &config.targets {
                let descriptors = generate::collect(target)?;
                listed.push(TargetReport {
                    out: target.out.clone(),
                    contracts: descriptors.into_iter().map(|d| d.name).collect(),
                    written: false,
                });
            }
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&json!({ "targets": listed }))?);
            } else {
                for target in &listed {
                    print_target(target);
                }
            }
        }
        Commands::Rename { trim, suffix, names } => {
            let rule = NamingRule::new(trim.as_str(), suffix.as_str())?;
            let renamed = names
                .iter()
                .map(|name| rule.apply(name))
                .collect::<Result<Vec<_>, _>>()?;
            if cli.json {
                let pairs: Vec<_> = names
                    .iter()
                    .zip(&renamed)
                    .map(|(from, to)| json!({ "from": from, "to": to }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&pairs)?);
            } else {
                for (from, to) in names.iter().zip(&renamed) {
                    println!("{} -> {}", from, to);
                }
            }
        }
    }
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<BindgenConfig> {
    let config = BindgenConfig::load(&cli.config, cli.root.as_deref())
        .with_context(|| format!("loading {}", cli.config.display()))?;
    Ok(config)
}

fn print_target(target: &TargetReport) {
    println!("{} ({} contracts)", target.out.display(), target.contracts.len());
    for name in &target.contracts {
        println!("  {}", name);
    }
}

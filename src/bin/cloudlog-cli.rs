use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use cloudlog::config::{load_config, spawn_reloader, ConfigWatcher};
use cloudlog::routing::path::normalize;
use cloudlog::{EnvOverrides, LevelRouter, LoggerBuilder, LoggerConfig, Outcome, Severity};

#[derive(Parser)]
#[command(name = "cloudlog-cli")]
#[command(about = "Inspect and exercise cloudlog level rules", long_about = None)]
struct Cli {
    /// TOML configuration file; CONFIG_LOG_* variables are applied on top
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the level each path resolves to
    Resolve {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Print the level trie
    Tree,
    /// Validate the configuration file
    Check,
    /// Emit one record per level through the configured sink
    Demo,
    /// Follow config changes and print the level of a path after each reload
    Watch { path: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    cloudlog::observability::init_diagnostics()?;

    match cli.command {
        Commands::Resolve { paths } => {
            let rules = load(cli.config.as_deref())?.rules();
            for path in paths {
                match rules.trie.resolve(&normalize(&path)) {
                    Some(level) => println!("{path}\t{level}"),
                    None => println!("{path}\t{} (default)", rules.default),
                }
            }
        }
        Commands::Tree => {
            let rules = load(cli.config.as_deref())?.rules();
            println!("default [{}]", rules.default);
            if rules.trie.is_empty() {
                println!("(no module rules)");
            } else {
                print!("{}", rules.trie);
            }
        }
        Commands::Check => check(cli.config.as_deref())?,
        Commands::Demo => demo(&load(cli.config.as_deref())?),
        Commands::Watch { path } => {
            let file = cli.config.ok_or("watch requires --config")?;
            let config = load(Some(file.as_path()))?;
            watch(&file, config, path).await?;
        }
    }

    Ok(())
}

fn load(path: Option<&Path>) -> Result<LoggerConfig, Box<dyn std::error::Error>> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => LoggerConfig::default(),
    };
    EnvOverrides::from_env().apply(&mut config);
    tracing::debug!(
        profile = %config.profile(),
        level = %config.level(),
        modules = config.modules.len(),
        "Configuration loaded"
    );
    Ok(config)
}

fn check(path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Err("check requires --config".into());
    };
    match load_config(path) {
        Ok(config) => {
            println!(
                "{}: ok (profile {}, level {}, {} module rules)",
                path.display(),
                config.profile(),
                config.level(),
                config.modules.len()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

fn demo(config: &LoggerConfig) {
    let logger = LoggerBuilder::from_config(config).build();

    for level in Severity::ALL {
        let outcome = cloudlog::log!(
            logger,
            level,
            format!("demo record at {}", level.long_name()),
            "value" => level.value(),
            "short" => level.short_name()
        );
        if outcome == Outcome::Emergency {
            eprintln!("EMERGENCY logged; a service would terminate here");
        }
    }
}

async fn watch(file: &Path, config: LoggerConfig, path: String) -> Result<(), Box<dyn std::error::Error>> {
    let router = Arc::new(LevelRouter::new(config.rules()));
    let (watcher, updates) = ConfigWatcher::new(file);
    let _guard = watcher.run()?;
    let reloader = spawn_reloader(router.clone(), updates, EnvOverrides::from_env());

    let key = normalize(&path).into_owned();
    let mut current = router.snapshot();
    println!("{path}\t{}", current.path_threshold(&key));

    let mut ticker = tokio::time::interval(Duration::from_millis(500));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let latest = router.snapshot();
                if !Arc::ptr_eq(&latest, &current) {
                    println!("{path}\t{}", latest.path_threshold(&key));
                    current = latest;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    reloader.abort();
    Ok(())
}

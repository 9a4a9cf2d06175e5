use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use jot_config::JotConfig;

mod console;
mod universe;

#[derive(Parser)]
#[command(
    name = "jot",
    version,
    about = "Navigate the types of a JVM archive with scope paths"
)]
struct Cli {
    /// JAR file or class directory to navigate
    archive: PathBuf,
    /// Tap type to start from (any unambiguous suffix; default java.lang.Object)
    tap: Option<String>,
    /// Package restricting class names and completion (default: the tap's package)
    package: Option<String>,
    /// Extra JARs or class directories used to resolve super types
    #[arg(long = "classpath", value_name = "PATH")]
    classpath: Vec<PathBuf>,
    /// Config file (default: JOT_CONFIG_PATH, ./jot.toml or ./.jot.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    let config = load_config(cli.config.as_deref())?;
    jot_config::init_tracing(&config.logging);

    let tap = cli.tap.or(config.navigator.tap.clone());
    let package = cli.package.or(config.navigator.package.clone());
    let mut classpath = cli.classpath;
    classpath.extend(config.navigator.classpath.iter().cloned());

    let session = universe::open_session(
        &cli.archive,
        &classpath,
        tap.as_deref(),
        package.as_deref(),
        &config.hooks,
    )?;
    console::run(session)?;
    Ok(0)
}

fn load_config(explicit: Option<&std::path::Path>) -> Result<JotConfig> {
    if let Some(path) = explicit {
        return JotConfig::load_from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let (config, _path) = jot_config::load_for_dir(&cwd).context("failed to load config")?;
    Ok(config)
}

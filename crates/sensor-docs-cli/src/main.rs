use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use sensor_docs_core::config::Config;
use sensor_docs_core::sync::{DocSync, SyncOutcome};
use sensor_docs_core::Result;

mod args;
use args::{Block, Cli, Commands, ConfigAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Some(Commands::Config { action }) => handle_config(action, &cli.root, cli.config.as_deref()),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        Some(Commands::Update { dry_run }) => {
            handle_update(&cli.root, cli.config.as_deref(), dry_run, cli.quiet)
        }
        Some(Commands::Check) => handle_check(&cli.root, cli.config.as_deref(), cli.quiet),
        Some(Commands::Render { block }) => handle_render(&cli.root, cli.config.as_deref(), block),
        None => handle_update(&cli.root, cli.config.as_deref(), false, cli.quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "sensor-docs", &mut io::stdout());
}

fn load_config(root: &Path, config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from(path),
        None => Config::load(root),
    }
}

fn open(root: &Path, config_path: Option<&Path>) -> Result<DocSync> {
    let config = load_config(root, config_path)?;
    Ok(DocSync::new(root, config))
}

fn handle_update(root: &Path, config_path: Option<&Path>, dry_run: bool, quiet: bool) -> Result<()> {
    let sync = open(root, config_path)?;

    if dry_run {
        let plan = sync.plan()?;
        print!("{}", plan.updated);
        return Ok(());
    }

    let (plan, outcome) = sync.update()?;
    if quiet {
        return Ok(());
    }

    match outcome {
        SyncOutcome::Updated => println!(
            "{} {} ({} categories, {} scripts)",
            "Updated:".green(),
            plan.path.display(),
            plan.rendered.categories,
            plan.rendered.scripts
        ),
        SyncOutcome::Unchanged => {
            println!("{} {}", "Up to date:".cyan(), plan.path.display())
        }
    }

    Ok(())
}

fn handle_check(root: &Path, config_path: Option<&Path>, quiet: bool) -> Result<()> {
    let sync = open(root, config_path)?;
    let plan = sync.check()?;

    if !quiet {
        println!("{} {}", "Up to date:".green(), plan.path.display());
    }
    Ok(())
}

fn handle_render(root: &Path, config_path: Option<&Path>, block: Block) -> Result<()> {
    let rendered = open(root, config_path)?.render()?;
    match block {
        Block::List => print!("{}", rendered.sensor_list),
        Block::Tree => print!("{}", rendered.tree),
    }
    Ok(())
}

fn handle_config(action: ConfigAction, root: &Path, config_path: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::List => {
            let config = load_config(root, config_path)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            let path = config_path
                .map(Path::to_path_buf)
                .unwrap_or_else(|| Config::path(root));
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(root)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
        ConfigAction::Show => {
            let config = load_config(root, config_path)?;
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

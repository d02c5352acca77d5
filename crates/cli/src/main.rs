use aemkit_cli::cli::commands::{CliArgs, Commands, ConfigArgs, MavenArgs, ModulesArgs};
use aemkit_cli::cli::output::{OutputFormat, OutputFormatter};
use aemkit_cli::executor::{run_composed, ShellExecutor};
use aemkit_cli::{init_logging, parse_level, NAME, VERSION};
use aemkit_core::config::AemkitConfig;
use aemkit_core::fs::{FileSystem, RealFileSystem};
use aemkit_maven::{resolve_command, ComposeOptions, ProjectDiscovery};

use clap::Parser;
use std::env;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing::{debug, error, info, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Maven(maven_args) => handle_maven(maven_args).await,
        Commands::Modules(modules_args) => handle_modules(modules_args).await,
        Commands::Config(config_args) => handle_config(config_args),
    };

    process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        let level_str = env::var("AEMKIT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        parse_level(&level_str)
    };

    init_logging(level, args.log_json);
}

fn start_directory(fs: &dyn FileSystem, directory: Option<&Path>) -> Option<PathBuf> {
    match directory {
        Some(dir) => {
            if !fs.exists(dir) {
                error!("Directory does not exist: {}", dir.display());
                return None;
            }
            if !fs.is_dir(dir) {
                error!("Not a directory: {}", dir.display());
                return None;
            }
            Some(dir.to_path_buf())
        }
        None => match env::current_dir() {
            Ok(dir) => Some(dir),
            Err(e) => {
                error!("Failed to get current directory: {}", e);
                None
            }
        },
    }
}

fn load_config() -> Option<AemkitConfig> {
    let config = AemkitConfig::default();
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        eprintln!("\nPlease check your AEM_MAVEN_* environment variables.");
        return None;
    }
    Some(config)
}

async fn handle_maven(args: &MavenArgs) -> i32 {
    let Some(config) = load_config() else {
        return 1;
    };
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem::new());
    let Some(start) = start_directory(fs.as_ref(), args.directory.as_deref()) else {
        return 1;
    };

    let mut options = ComposeOptions::from_config(&config);
    options.force_goal = args.build;
    options.skip_tests |= args.skip_tests;
    options.dry_run |= args.dry_run;
    debug!("Compose options: {:?}", options);

    let discovery = ProjectDiscovery::new(fs);
    let (module, command) =
        match resolve_command(&discovery, args.module.as_deref(), &start, &options).await {
            Ok(resolved) => resolved,
            Err(e) => {
                error!("{}", e);
                return 1;
            }
        };

    info!(
        "Building '{}' in {}",
        module.identifier,
        command.working_directory.display()
    );

    let mut stdout = std::io::stdout();
    match run_composed(&command, &ShellExecutor, &mut stdout).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

async fn handle_modules(args: &ModulesArgs) -> i32 {
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem::new());
    let Some(start) = start_directory(fs.as_ref(), args.directory.as_deref()) else {
        return 1;
    };

    let discovery = ProjectDiscovery::new(fs);
    let start = discovery.anchor(&start);
    let project = match discovery.discover(&start).await {
        Ok(project) => project,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };

    let format: OutputFormat = args.format.into();
    match OutputFormatter::new(format).format_project(&project) {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            error!("Failed to format output: {}", e);
            1
        }
    }
}

fn handle_config(args: &ConfigArgs) -> i32 {
    let config = AemkitConfig::default();
    let valid = match config.validate() {
        Ok(()) => true,
        Err(e) => {
            error!("Configuration error: {}", e);
            false
        }
    };

    let format: OutputFormat = args.format.into();
    match OutputFormatter::new(format).format_config(&config) {
        Ok(output) => {
            println!("{}", output);
            if valid {
                0
            } else {
                1
            }
        }
        Err(e) => {
            error!("Failed to format config: {}", e);
            1
        }
    }
}

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Build and deploy the right module of a multi-module AEM Maven project
#[derive(Parser, Debug)]
#[command(
    name = "aemkit",
    about = "Build and deploy the right module of a multi-module AEM Maven project",
    version,
    author,
    long_about = "aemkit finds the Maven project around the current directory, works out which \
                  module you mean and which auto-install profile deploys it, then runs \
                  (or, with --dry-run, prints) the matching Maven command."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(short = 'v', long, global = true, help = "Verbose logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        visible_alias = "mvn",
        about = "Build a module with its deployment profile",
        long_about = "Resolves the target module (explicit name, 'all' for the project root, or \
                      the module containing the working directory) and runs Maven with the \
                      module's primary auto-install profile.\n\n\
                      Examples:\n  \
                      aemkit maven\n  \
                      aemkit maven ui.apps --skip-tests\n  \
                      aemkit maven all --dry-run\n  \
                      aemkit maven core --build"
    )]
    Maven(MavenArgs),

    #[command(
        about = "List the modules of the project and their profiles",
        long_about = "Discovers the Maven project around a directory and lists every module with \
                      its path and resolved deployment profiles.\n\n\
                      Examples:\n  \
                      aemkit modules\n  \
                      aemkit modules -C ../site --format json"
    )]
    Modules(ModulesArgs),

    #[command(about = "Show the effective configuration")]
    Config(ConfigArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct MavenArgs {
    #[arg(
        value_name = "MODULE",
        help = "Module identifier or directory name ('all' for the project root)"
    )]
    pub module: Option<String>,

    #[arg(short = 's', long, help = "Skip tests during the Maven build")]
    pub skip_tests: bool,

    #[arg(short = 'd', long, help = "Print the command instead of running it")]
    pub dry_run: bool,

    #[arg(
        short = 'b',
        long,
        help = "Use the plain install goal without a deployment profile"
    )]
    pub build: bool,

    #[arg(
        short = 'C',
        long = "dir",
        value_name = "PATH",
        help = "Resolve from this directory instead of the current one"
    )]
    pub directory: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ModulesArgs {
    #[arg(
        short = 'C',
        long = "dir",
        value_name = "PATH",
        help = "Resolve from this directory instead of the current one"
    )]
    pub directory: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

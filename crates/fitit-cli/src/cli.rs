use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "fitit - define molecular deformations and generate PyFitIt project scripts for FDMNES spectrum fitting.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    /// Defaults to `config.toml` in the user configuration directory, if present.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new, empty project description file.
    Init(InitArgs),
    /// Add, edit, remove or list the deformations of a project.
    Deformation(DeformationArgs),
    /// Print the generated deformation code of a project.
    Fragment(ProjectArgs),
    /// Validate a project without writing anything.
    Check(CheckArgs),
    /// Render a project and write the PyFitIt script.
    Generate(GenerateArgs),
    /// Print or export the bundled project template.
    Template(TemplateArgs),
}

/// Location of the project description file.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Path to the project description file (TOML).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub project: PathBuf,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Replace an existing project description.
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct DeformationArgs {
    #[command(subcommand)]
    pub command: DeformationCommands,
}

#[derive(Subcommand, Debug)]
pub enum DeformationCommands {
    /// Append a deformation to the end of the list.
    Add {
        #[command(flatten)]
        project: ProjectArgs,
        #[command(flatten)]
        fields: NewDeformationFields,
    },
    /// Replace fields of the deformation at INDEX; unspecified fields keep their value.
    Edit {
        #[command(flatten)]
        project: ProjectArgs,
        /// Zero-based position in the deformation list.
        #[arg(required = true)]
        index: usize,
        #[command(flatten)]
        fields: EditDeformationFields,
    },
    /// Remove the deformation at INDEX.
    Remove {
        #[command(flatten)]
        project: ProjectArgs,
        /// Zero-based position in the deformation list.
        #[arg(required = true)]
        index: usize,
    },
    /// List deformations in generation order.
    List {
        #[command(flatten)]
        project: ProjectArgs,
    },
}

/// Deformation form fields. Values are validated by the core, not by the argument parser.
#[derive(Args, Debug, Clone)]
pub struct NewDeformationFields {
    /// Unique deformation name, used as the fit parameter key.
    #[arg(short, long, required = true)]
    pub name: String,
    /// Molecule part the deformation moves.
    #[arg(long, required = true, value_name = "INT")]
    pub part: String,
    /// First axis atom (rotation pivot).
    #[arg(long = "atom-1", required = true, value_name = "INT")]
    pub atom_1: String,
    /// Second axis atom.
    #[arg(long = "atom-2", required = true, value_name = "INT")]
    pub atom_2: String,
    /// Deformation type: 'shift' or 'rotation'.
    #[arg(short, long, required = true)]
    pub kind: String,
}

#[derive(Args, Debug, Clone, Default)]
pub struct EditDeformationFields {
    #[arg(short, long)]
    pub name: Option<String>,
    #[arg(long, value_name = "INT")]
    pub part: Option<String>,
    #[arg(long = "atom-1", value_name = "INT")]
    pub atom_1: Option<String>,
    #[arg(long = "atom-2", value_name = "INT")]
    pub atom_2: Option<String>,
    #[arg(short, long)]
    pub kind: Option<String>,
}

/// Options shared by every command that renders a project.
#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Override the project template (defaults to the bundled PyFitIt template).
    #[arg(short, long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Override a project parameter by template key. Can be used multiple times.
    /// Example: -P Radius=6.0
    #[arg(short = 'P', long = "param", value_name = "KEY=VALUE", num_args(0..))]
    pub params: Vec<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S output.write-policy=overwrite
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
    #[command(flatten)]
    pub render: RenderArgs,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
    #[command(flatten)]
    pub render: RenderArgs,

    /// Replace an existing output file instead of failing.
    #[arg(long)]
    pub overwrite: bool,

    /// Write to this file instead of `<project-folder>/<project-name>.py`.
    #[arg(short, long, value_name = "PATH", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Name the output file NAME inside the project folder (e.g. 'project.py').
    #[arg(long, value_name = "NAME", conflicts_with = "output")]
    pub file_name: Option<String>,

    /// Print the rendered project instead of writing it.
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Write the template to a file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Replace an existing file.
    #[arg(long, requires = "output")]
    pub force: bool,
}

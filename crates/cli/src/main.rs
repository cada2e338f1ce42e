//! view2lua — convert editor UI entry data into Lua page templates.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use view2lua_lib::project::Project;

mod cmd;

#[derive(Parser)]
#[command(name = "view2lua")]
#[command(author, version, about = "Convert editor UI entry data into Lua page templates", long_about = None)]
struct Cli {
  /// Project root containing the editor and ui directories
  #[arg(short, long, global = true, default_value = ".")]
  project: PathBuf,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List all components and whether generated output exists
  List,

  /// Convert a single component
  Convert {
    /// Component display or directory name
    component: String,

    /// Show the generated output without writing files
    #[arg(long)]
    dry_run: bool,
  },

  /// Convert every non-internal component
  ConvertAll {
    /// Show what would be written without writing files
    #[arg(long)]
    dry_run: bool,
  },

  /// Validate generated output against existing template files
  Validate {
    /// Component to validate (validates all when omitted)
    component: Option<String>,

    /// Emit the validation report as JSON
    #[arg(long)]
    json: bool,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .without_time()
    .init();

  let cli = Cli::parse();
  let root = dunce::canonicalize(&cli.project)
    .with_context(|| format!("Failed to resolve project root: {}", cli.project.display()))?;
  let project = Project::new(root);

  match cli.command {
    Commands::List => cmd::cmd_list(&project),
    Commands::Convert { component, dry_run } => cmd::cmd_convert(&project, &component, dry_run),
    Commands::ConvertAll { dry_run } => cmd::cmd_convert_all(&project, dry_run),
    Commands::Validate { component, json } => {
      cmd::cmd_validate(&project, component.as_deref(), json)
    }
  }
}

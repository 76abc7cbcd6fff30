//! `kbt init` command - Initialize a new catalog project

use console::style;
use miette::{miette, Result};
use std::path::PathBuf;

use crate::core::project::Project;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

pub fn run(args: InitArgs) -> Result<()> {
    if !args.path.exists() {
        std::fs::create_dir_all(&args.path)
            .map_err(|e| miette!("cannot create {}: {}", args.path.display(), e))?;
    }

    let project = Project::init(&args.path).map_err(|e| miette!("{}", e))?;

    println!(
        "{} Initialized KBT project at {}",
        style("✓").green(),
        project.root().display()
    );
    println!("  catalog/engines/  - gas engine records");
    println!("  catalog/motors/   - electric motor records");
    println!("  catalog/parts/    - part records");
    println!("  builds/           - saved builds");

    Ok(())
}

//! Command implementations

use miette::{miette, Result};

use crate::compat::EngineFamily;
use crate::core::catalog::Catalog;
use crate::core::loader::load_all;
use crate::core::project::Project;
use crate::entities::build::Build as BuildRecord;
use crate::entities::selection::Selection;

/// Load the project catalog and resolve a build reference into the
/// selection/engine-family pair the core engines consume.
pub(crate) fn load_selection(reference: &str) -> Result<(BuildRecord, Selection, EngineFamily)> {
    let project = Project::discover().map_err(|e| miette!("{}", e))?;
    let catalog = Catalog::load(&project)?;
    let builds: Vec<BuildRecord> = load_all(&project.builds_dir())?;

    let build = build::find_build(&builds, reference)
        .ok_or_else(|| miette!("build not found: {}", reference))?;
    let (selection, family) = catalog.resolve(&build)?;

    Ok((build, selection, family))
}

pub mod build;
pub mod check;
pub mod completions;
pub mod engine;
pub mod gear;
pub mod import;
pub mod init;
pub mod motor;
pub mod part;
pub mod perf;
pub mod report;
pub mod validate;

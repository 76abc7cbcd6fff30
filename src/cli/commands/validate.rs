//! `kbt validate` command - Validate catalog and build files against schemas

use console::style;
use miette::{miette, Result};
use std::path::PathBuf;
use walkdir::WalkDir;

use crate::cli::GlobalOpts;
use crate::core::identity::EntityPrefix;
use crate::core::project::Project;
use crate::schema::registry::SchemaRegistry;
use crate::schema::validator::Validator;

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Paths to validate (default: entire catalog and builds)
    #[arg()]
    pub paths: Vec<PathBuf>,

    /// Show summary only, don't show individual issues
    #[arg(long)]
    pub summary: bool,
}

/// Validation statistics
#[derive(Default)]
struct ValidationStats {
    files_checked: usize,
    files_passed: usize,
    files_failed: usize,
    files_skipped: usize,
    total_issues: usize,
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let project = Project::discover().map_err(|e| miette!("{}", e))?;
    let validator = Validator::new(&SchemaRegistry);

    let files: Vec<PathBuf> = if args.paths.is_empty() {
        collect_yaml_files(&project)
    } else {
        args.paths
            .iter()
            .flat_map(|p| {
                if p.is_dir() {
                    yaml_files_under(p)
                } else {
                    vec![p.clone()]
                }
            })
            .collect()
    };

    if !global.quiet {
        println!(
            "{} Validating {} file(s)...\n",
            style("→").blue(),
            files.len()
        );
    }

    let mut stats = ValidationStats::default();

    for path in &files {
        // Record type comes from the filename or the directory layout
        let Some(prefix) = EntityPrefix::from_path(path) else {
            stats.files_skipped += 1;
            if !args.summary && global.verbose {
                println!(
                    "{} {} - unknown record type (skipped)",
                    style("?").yellow(),
                    path.display()
                );
            }
            continue;
        };

        stats.files_checked += 1;

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                stats.files_failed += 1;
                stats.total_issues += 1;
                if !args.summary {
                    println!("{} {} - {}", style("✗").red(), path.display(), e);
                }
                continue;
            }
        };

        match validator.validate(prefix, &content) {
            Ok(result) if result.valid => {
                stats.files_passed += 1;
                if !args.summary && global.verbose {
                    println!("{} {}", style("✓").green(), path.display());
                }
            }
            Ok(result) => {
                stats.files_failed += 1;
                stats.total_issues += result.issues.len();
                if !args.summary {
                    println!("{} {}", style("✗").red(), path.display());
                    for issue in &result.issues {
                        let location = if issue.path.is_empty() {
                            String::new()
                        } else {
                            format!(" at {}", issue.path)
                        };
                        println!("    {}{}", issue.message, location);
                    }
                }
            }
            Err(e) => {
                stats.files_failed += 1;
                stats.total_issues += 1;
                if !args.summary {
                    println!("{} {} - {}", style("✗").red(), path.display(), e);
                }
            }
        }
    }

    if !global.quiet {
        println!();
        println!(
            "{} checked, {} passed, {} failed, {} skipped ({} issue(s))",
            stats.files_checked,
            style(stats.files_passed).green(),
            if stats.files_failed > 0 {
                style(stats.files_failed).red()
            } else {
                style(stats.files_failed).dim()
            },
            stats.files_skipped,
            stats.total_issues
        );
    }

    if stats.files_failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn collect_yaml_files(project: &Project) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for dir in [
        project.engines_dir(),
        project.motors_dir(),
        project.parts_dir(),
        project.builds_dir(),
    ] {
        files.extend(yaml_files_under(&dir));
    }
    files
}

fn yaml_files_under(dir: &std::path::Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().map_or(false, |e| e == "yaml"))
        .collect()
}

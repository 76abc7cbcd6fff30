//! `kbt build` command - Saved build management

use console::style;
use miette::{miette, IntoDiagnostic, Result};
use std::fs;

use crate::cli::table::{CellValue, ColumnDef, TableConfig, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;
use crate::core::loader::load_all;
use crate::core::project::Project;
use crate::entities::build::Build;
use crate::entities::part::PartCategory;

#[derive(clap::Subcommand, Debug)]
pub enum BuildCommands {
    /// List saved builds
    List(ListArgs),

    /// Create a new build file
    New(NewArgs),

    /// Show a build's contents
    Show(ShowArgs),
}

/// Column definitions for build list output
const BUILD_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("title", "TITLE", 28),
    ColumnDef::new("power", "POWER SOURCE", 24),
    ColumnDef::new("parts", "PARTS", 7),
    ColumnDef::new("author", "AUTHOR", 15),
    ColumnDef::new("created", "CREATED", 12),
];

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Search in title (case-insensitive substring)
    #[arg(long)]
    pub search: Option<String>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Build title
    #[arg(long, short = 'T')]
    pub title: String,

    /// Gas engine reference (ID or slug)
    #[arg(long, conflicts_with = "motor")]
    pub engine: Option<String>,

    /// Electric motor reference (ID or slug)
    #[arg(long)]
    pub motor: Option<String>,

    /// Part references as CATEGORY=REF (repeatable),
    /// e.g. --part clutch=max-torque-clutch
    #[arg(long = "part", short = 'p', value_name = "CATEGORY=REF")]
    pub parts: Vec<String>,

    /// Author name (default: config, git user.name, or $USER)
    #[arg(long)]
    pub author: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Build ID or title
    pub reference: String,
}

pub fn run(cmd: BuildCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        BuildCommands::List(args) => run_list(args, global),
        BuildCommands::New(args) => run_new(args),
        BuildCommands::Show(args) => run_show(args, global),
    }
}

/// Find a build by ID or title (case-insensitive title match)
pub fn find_build(builds: &[Build], reference: &str) -> Option<Build> {
    builds
        .iter()
        .find(|b| b.id.to_string() == reference)
        .or_else(|| {
            builds
                .iter()
                .find(|b| b.title.eq_ignore_ascii_case(reference))
        })
        .cloned()
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = Project::discover().map_err(|e| miette!("{}", e))?;
    let mut builds: Vec<Build> = load_all(&project.builds_dir())?;

    if let Some(ref needle) = args.search {
        let needle = needle.to_lowercase();
        builds.retain(|b| b.title.to_lowercase().contains(&needle));
    }

    builds.sort_by(|a, b| a.created.cmp(&b.created));

    if args.count {
        println!("{}", builds.len());
        return Ok(());
    }

    if builds.is_empty() {
        println!("No builds found.");
        return Ok(());
    }

    if global.format.resolve() == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&builds).map_err(|e| miette!("{}", e))?
        );
        return Ok(());
    }

    let rows = builds.iter().map(|build| {
        let power = build
            .engine
            .clone()
            .or_else(|| build.motor.clone())
            .map(CellValue::Slug)
            .unwrap_or(CellValue::Empty);
        TableRow::new(build.id.to_string())
            .cell("title", CellValue::Text(build.title.clone()))
            .cell("power", power)
            .cell("parts", CellValue::Number(build.part_ref_count() as i64))
            .cell("author", CellValue::Text(build.author.clone()))
            .cell("created", CellValue::Date(build.created))
    });

    let config = if global.quiet {
        TableConfig::for_pipe()
    } else {
        TableConfig::default()
    };
    TableFormatter::new(BUILD_COLUMNS, "build")
        .with_config(config)
        .output(rows, global.format);

    Ok(())
}

fn run_new(args: NewArgs) -> Result<()> {
    let project = Project::discover().map_err(|e| miette!("{}", e))?;
    let config = Config::load();

    let author = args.author.unwrap_or_else(|| config.author());
    let mut build = Build::new(args.title, author);
    build.engine = args.engine;
    build.motor = args.motor;

    for spec in &args.parts {
        let (category_str, reference) = spec.split_once('=').ok_or_else(|| {
            miette!("invalid --part value '{}' (expected CATEGORY=REF)", spec)
        })?;
        let category: PartCategory = category_str
            .parse()
            .map_err(|e: String| miette!("{}", e))?;
        build.add_part_ref(category, reference);
    }

    let path = project.builds_dir().join(format!("{}.yaml", build.id));
    let yaml = serde_yml::to_string(&build).into_diagnostic()?;
    fs::write(&path, yaml).into_diagnostic()?;

    println!(
        "{} Created build {} ({})",
        style("✓").green(),
        style(&build.title).bold(),
        build.id
    );
    println!("  {}", path.display());

    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = Project::discover().map_err(|e| miette!("{}", e))?;
    let builds: Vec<Build> = load_all(&project.builds_dir())?;

    let build = find_build(&builds, &args.reference)
        .ok_or_else(|| miette!("build not found: {}", args.reference))?;

    if global.format.resolve() == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&build).map_err(|e| miette!("{}", e))?
        );
        return Ok(());
    }

    println!("{}", style(&build.title).cyan().bold());
    println!("  id:      {}", build.id);
    println!("  author:  {}", build.author);
    println!("  created: {}", build.created.format("%Y-%m-%d"));
    if let Some(ref engine) = build.engine {
        println!("  engine:  {}", engine);
    }
    if let Some(ref motor) = build.motor {
        println!("  motor:   {}", motor);
    }
    if !build.parts.is_empty() {
        println!("  parts:");
        for (category, references) in &build.parts {
            for reference in references {
                println!("    {}: {}", category.label(), reference);
            }
        }
    }
    if let Some(ref notes) = build.notes {
        println!("  notes:   {}", notes);
    }

    Ok(())
}

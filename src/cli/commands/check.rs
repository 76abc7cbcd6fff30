//! `kbt check` command - Run the compatibility evaluator against a build

use console::style;
use miette::Result;

use crate::cli::commands::load_selection;
use crate::cli::table::{CellValue, ColumnDef, TableConfig, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::compat::{evaluate, Severity};

/// Column definitions for finding output
const FINDING_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("severity", "SEVERITY", 10),
    ColumnDef::new("source", "SOURCE", 22),
    ColumnDef::new("target", "TARGET", 22),
    ColumnDef::new("message", "MESSAGE", 70),
];

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Build ID or title
    pub build: String,

    /// Exit successfully even when error findings exist
    #[arg(long)]
    pub no_fail: bool,
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let (build, selection, family) = load_selection(&args.build)?;
    let findings = evaluate(&selection, &family);

    if global.format.resolve() == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&findings).map_err(|e| miette::miette!("{}", e))?
        );
    } else if findings.is_empty() {
        println!(
            "{} {} - no compatibility findings",
            style("✓").green(),
            build.title
        );
    } else {
        let rows = findings.iter().enumerate().map(|(idx, finding)| {
            TableRow::new((idx + 1).to_string())
                .cell("severity", CellValue::Severity(finding.severity))
                .cell("source", CellValue::Text(finding.source.clone()))
                .cell("target", CellValue::Text(finding.target.clone()))
                .cell("message", CellValue::Text(finding.message.clone()))
        });

        TableFormatter::new(FINDING_COLUMNS, "finding")
            .with_config(TableConfig::for_pipe())
            .output(rows, global.format);

        if !global.quiet {
            let errors = findings
                .iter()
                .filter(|f| f.severity == Severity::Error)
                .count();
            let warnings = findings
                .iter()
                .filter(|f| f.severity == Severity::Warning)
                .count();
            let infos = findings.len() - errors - warnings;
            println!();
            println!(
                "{}: {} error(s), {} warning(s), {} note(s)",
                build.title,
                style(errors).red(),
                style(warnings).yellow(),
                style(infos).cyan()
            );
        }
    }

    let has_errors = findings.iter().any(|f| f.severity == Severity::Error);
    if has_errors && !args.no_fail {
        std::process::exit(1);
    }

    Ok(())
}

//! `kbt report` command - Markdown build report

use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::cli::commands::load_selection;
use crate::cli::helpers::truncate_str;
use crate::cli::GlobalOpts;
use crate::compat::evaluate;
use crate::perf::calculate;

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    /// Build ID or title
    pub build: String,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: ReportArgs, _global: &GlobalOpts) -> Result<()> {
    let (build, selection, family) = load_selection(&args.build)?;

    let findings = evaluate(&selection, &family);
    let parts: Vec<_> = selection.all_parts().cloned().collect();
    let metrics = calculate(selection.power_source.as_ref(), &parts);

    let mut output = String::new();
    output.push_str(&format!("# Build Report: {}\n\n", build.title));

    if let Some(ref description) = build.description {
        output.push_str(&format!("{}\n\n", description));
    }

    // Power source section
    output.push_str("## Power Source\n\n");
    match &selection.power_source {
        Some(power_source) => {
            output.push_str(&format!(
                "**{}** - {:.1} hp",
                power_source.name(),
                power_source.horsepower()
            ));
            if let Some(shaft) = power_source.shaft_diameter_in() {
                output.push_str(&format!(", {}\" shaft", shaft));
            }
            output.push_str("\n\n");
        }
        None => output.push_str("*No power source selected.*\n\n"),
    }

    // Parts section
    output.push_str("## Parts\n\n");
    if parts.is_empty() {
        output.push_str("*No parts selected.*\n");
    } else {
        let mut builder = Builder::default();
        builder.push_record(["Category", "Part", "Brand", "Price"]);
        for part in &parts {
            builder.push_record([
                part.category.label().to_string(),
                truncate_str(&part.name, 40),
                part.brand.clone().unwrap_or_else(|| "-".to_string()),
                part.price
                    .map(|p| format!("${:.2}", p))
                    .unwrap_or_else(|| "-".to_string()),
            ]);
        }
        output.push_str(&builder.build().with(Style::markdown()).to_string());
        output.push('\n');
    }
    output.push('\n');

    // Compatibility section
    output.push_str("## Compatibility\n\n");
    if findings.is_empty() {
        output.push_str("No findings.\n");
    } else {
        let mut builder = Builder::default();
        builder.push_record(["Severity", "Source", "Target", "Message"]);
        for finding in &findings {
            builder.push_record([
                finding.severity.to_string(),
                finding.source.clone(),
                finding.target.clone(),
                finding.message.clone(),
            ]);
        }
        output.push_str(&builder.build().with(Style::markdown()).to_string());
        output.push('\n');
    }
    output.push('\n');

    // Performance section
    output.push_str("## Estimated Performance\n\n");
    let mut builder = Builder::default();
    builder.push_record(["Metric", "Value"]);
    builder.push_record(["Horsepower".to_string(), format!("{:.1} hp", metrics.hp)]);
    builder.push_record(["Torque".to_string(), format!("{:.1} ft-lb", metrics.torque)]);
    builder.push_record([
        "Top speed".to_string(),
        format!("{:.1} mph", metrics.top_speed),
    ]);
    builder.push_record([
        "Power-to-weight".to_string(),
        format!("{:.1} hp/100lb", metrics.power_to_weight),
    ]);
    builder.push_record([
        "0-20 mph".to_string(),
        format!("{:.1} s", metrics.acceleration_0_to_20),
    ]);
    builder.push_record([
        "0-30 mph".to_string(),
        format!("{:.1} s", metrics.acceleration_0_to_30),
    ]);
    builder.push_record(["Weight".to_string(), format!("{:.1} lb", metrics.weight)]);
    builder.push_record([
        "Gear ratio".to_string(),
        format!("{:.1} : 1", metrics.gear_ratio),
    ]);
    output.push_str(&builder.build().with(Style::markdown()).to_string());
    output.push('\n');

    output.push_str(
        "\nAcceleration times are calibrated estimates, not measurements.\n",
    );
    output.push_str(&format!(
        "\n---\n\n*Generated: {}*\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    ));

    write_output(&output, args.output)
}

/// Write report output to a file or stdout
fn write_output(content: &str, path: Option<PathBuf>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(&path, content).into_diagnostic()?;
            println!("Report written to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

//! `kbt perf` command - Estimate a build's performance

use console::style;
use miette::Result;

use crate::cli::commands::load_selection;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::perf::{calculate, PerformanceMetrics};

#[derive(clap::Args, Debug)]
pub struct PerfArgs {
    /// Build ID or title
    pub build: String,
}

pub fn run(args: PerfArgs, global: &GlobalOpts) -> Result<()> {
    let (build, selection, _family) = load_selection(&args.build)?;

    let parts: Vec<_> = selection.all_parts().cloned().collect();
    let metrics = calculate(selection.power_source.as_ref(), &parts);

    if global.format.resolve() == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&metrics).map_err(|e| miette::miette!("{}", e))?
        );
        return Ok(());
    }

    println!("{}", style(&build.title).cyan().bold());
    if selection.power_source.is_none() {
        println!(
            "  {} no power source selected; showing baseline metrics",
            style("!").yellow()
        );
    }
    print_metrics(&metrics);

    if !global.quiet {
        println!();
        println!("Acceleration times are calibrated estimates, not measurements.");
    }

    Ok(())
}

fn print_metrics(metrics: &PerformanceMetrics) {
    println!("  horsepower:       {:>8.1} hp", metrics.hp);
    println!("  torque:           {:>8.1} ft-lb", metrics.torque);
    println!("  top speed:        {:>8.1} mph", metrics.top_speed);
    println!("  power-to-weight:  {:>8.1} hp/100lb", metrics.power_to_weight);
    println!("  0-20 mph:         {:>8.1} s", metrics.acceleration_0_to_20);
    println!("  0-30 mph:         {:>8.1} s", metrics.acceleration_0_to_30);
    println!("  weight:           {:>8.1} lb", metrics.weight);
    println!("  gear ratio:       {:>8.1} : 1", metrics.gear_ratio);
}

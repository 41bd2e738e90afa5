use anyhow::Context;
use colored::Colorize;
use dualpage_merge::{ElementSummary, MergeConfig, MergePipeline, MergePlan};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = build_config(&cli.overrides)?;
    match cli.command.unwrap_or(Command::Merge) {
        Command::Merge => cmd_merge(config, &cli.format, cli.print, cli.verbose),
        Command::Inspect => cmd_inspect(config, &cli.format, cli.print, cli.verbose),
    }
}

/// Config file values (or defaults) with command-line overrides applied.
pub fn build_config(paths: &ConfigArgs) -> anyhow::Result<MergeConfig> {
    let mut config = match &paths.config {
        Some(path) => MergeConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => MergeConfig::default(),
    };
    if let Some(dir) = &paths.static_dir {
        config.static_dir = dir.clone();
    }
    if let Some(file) = &paths.legacy {
        config.legacy_file = file.clone();
    }
    if let Some(file) = &paths.modern {
        config.modern_file = file.clone();
    }
    if let Some(file) = &paths.output {
        config.output_file = file.clone();
    }
    if let Some(scope) = paths.scope {
        config.scope = scope.into();
    }
    if paths.keep_inputs {
        config.keep_inputs = true;
    }
    Ok(config)
}

fn cmd_merge(
    config: MergeConfig,
    format: &OutputFormat,
    print: bool,
    verbose: bool,
) -> anyhow::Result<()> {
    if *format == OutputFormat::Text {
        println!("{}", "Merging legacy and modern html files...".green());
    }

    let report = MergePipeline::new(config).run()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            print_plan(&report.plan, verbose);
            println!("  {} {}", "output:".green(), report.output.display());
            for path in &report.removed_inputs {
                println!("  {} {}", "removed:".yellow(), path.display());
            }
            for path in &report.kept_inputs {
                println!("  {} {}", "kept:".cyan(), path.display());
            }
            if print {
                println!("{}", report.plan.document);
            }
            println!("{}", "Merge success!".green().bold());
        }
    }
    Ok(())
}

fn cmd_inspect(
    config: MergeConfig,
    format: &OutputFormat,
    print: bool,
    verbose: bool,
) -> anyhow::Result<()> {
    let plan = MergePipeline::new(config.clone()).plan()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Text => {
            println!("Plan for {}", config.output_path().display().to_string().bold());
            println!("  legacy: {}", plan.legacy.display());
            println!("  modern: {}", plan.modern.display());
            println!("  body:   bytes {}..{}", plan.region.start, plan.region.end);
            print_plan(&plan, verbose);
            if print {
                println!("{}", plan.document);
            }
            println!("{}", "Nothing written.".dimmed());
        }
    }
    Ok(())
}

fn print_plan(plan: &MergePlan, verbose: bool) {
    print_summary("content", &plan.content);
    print_summary("resources", &plan.resources);
    for location in &plan.resources.kept {
        println!("    {}", location.cyan());
    }
    if verbose {
        for timing in &plan.timings {
            println!("  {:<9} {:?}", timing.stage.to_string().dimmed(), timing.elapsed);
        }
    }
}

fn print_summary(label: &str, summary: &ElementSummary) {
    println!(
        "  {} {} kept, {} dropped",
        format!("{label}:").bold(),
        summary.kept.len(),
        summary.dropped
    );
}

mod logic;
mod util;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use logic::{
    LogicTester, Pacing, ScenarioKind, ScenarioResult, list_scenarios, resolve_seed_inputs,
};
use util::{OutputTarget, split_csv};

#[derive(Debug, Parser)]
#[command(name = "roulette-tester", version = "0.1.0")]
#[command(about = "Automated QA for Emoji Roulette - scripted sessions and fairness sweeps")]
struct Args {
    /// Scenarios to run (comma-separated, or `all`)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated, decimal or 0x hex)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of sessions per scenario and seed
    #[arg(long, default_value_t = 100)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Wait out the widget's fire delay between trigger and resolution
    #[arg(long)]
    realtime: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    let console = args.report == "console";
    if console {
        announce_banner();
    }

    let start_time = Instant::now();
    let scenarios = expand_scenarios(&args.scenarios);
    let seeds = resolve_seed_inputs(&split_csv(&args.seeds))?;
    let pacing = if args.realtime {
        Pacing::Realtime
    } else {
        Pacing::Instant
    };
    log::info!(
        "running {} scenario(s) over {} seed(s), {} iteration(s), {pacing:?} pacing",
        scenarios.len(),
        seeds.len(),
        args.iterations
    );

    let tester = LogicTester::new(args.verbose, pacing);
    let mut results = Vec::new();
    for kind in &scenarios {
        if console {
            println!("🧠 Running {}", kind.key().bright_yellow().bold());
        }
        results.extend(tester.run_scenario(*kind, &seeds, args.iterations).await);
    }

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target, "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target, "  {key:18} - {description}")?;
    }
    writeln!(output_target, "  {:18} - Every scenario above", "all")?;
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🔫 Emoji Roulette Automated Tester".bright_cyan().bold());
    println!("{}", "==================================".cyan());
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<ScenarioKind> {
    let mut kinds: Vec<ScenarioKind> = Vec::new();
    for name in split_csv(scenarios_arg) {
        let expanded = if name == "all" {
            ScenarioKind::ALL.to_vec()
        } else if let Some(kind) = ScenarioKind::from_key(&name) {
            vec![kind]
        } else {
            eprintln!("⚠️  Unknown scenario: {}", name.yellow());
            continue;
        };
        for kind in expanded {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
    }
    kinds
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, results)?,
        "markdown" => logic::reports::generate_markdown_report(&mut output_target, results)?,
        _ => logic::reports::generate_console_report(
            &mut output_target,
            results,
            start_time.elapsed(),
        )?,
    }

    output_target.flush_inner()?;
    if !output_target.is_stdout()
        && let Some(path) = &args.output
    {
        println!("📝 Report written to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_expands_without_duplicates() {
        let kinds = expand_scenarios("smoke,all,smoke");
        assert_eq!(kinds, ScenarioKind::ALL.to_vec());
    }

    #[test]
    fn unknown_scenarios_are_skipped() {
        let kinds = expand_scenarios("stale-resolution, boss ,");
        assert_eq!(kinds, vec![ScenarioKind::StaleResolution]);
    }

    #[test]
    fn args_parse_with_defaults() {
        let args = Args::parse_from(["roulette-tester"]);
        assert_eq!(args.scenarios, "smoke");
        assert_eq!(args.seeds, "1337");
        assert_eq!(args.iterations, 100);
        assert_eq!(args.report, "console");
        assert!(!args.realtime);
    }
}

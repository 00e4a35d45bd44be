use anyhow::Context;
use benchlab::LabConfig;
use benchlab::chemistry::Tools;
use benchlab::scenario::{ScenarioDefinition, ScenarioExecutor, ScenarioExecutorConfig};
use benchlab::toolbar::Toolbar;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run a RON scenario file headlessly
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Write the execution report as JSON
    #[arg(long)]
    report: Option<PathBuf>,

    /// Print the final lab snapshot as RON after a scenario
    #[arg(long)]
    snapshot: bool,

    /// Recipe table (RON) replacing the built-in one
    #[arg(long)]
    recipes: Option<PathBuf>,

    /// Seed for particle jitter (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// List toolbar sections and tools
    #[arg(long)]
    list_tools: bool,

    /// List the recipe table
    #[arg(long)]
    list_recipes: bool,

    /// Log every scenario action and debug events
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut config = LabConfig::load()?;
    if let Some(seed) = args.seed {
        config.run.seed = seed;
    }
    if let Some(recipes) = &args.recipes {
        config.run.recipes = Some(recipes.clone());
    }

    if args.list_tools {
        list_tools();
        return Ok(());
    }

    if args.list_recipes {
        list_recipes(&config)?;
        return Ok(());
    }

    let Some(path) = &args.scenario else {
        log::info!("Nothing to run. Pass --scenario <file>, --list-tools or --list-recipes");
        return Ok(());
    };

    let scenario = ScenarioDefinition::from_file(path)?;
    let mut lab = config.build_lab()?;

    let mut executor_config = ScenarioExecutorConfig::from(&config);
    executor_config.verbose = args.verbose;
    let mut executor = ScenarioExecutor::with_config(executor_config);

    log::info!("Running scenario {} (seed {})", path.display(), config.run.seed);
    let report = executor.execute_scenario(&scenario, &mut lab)?;

    if let Some(report_path) = &args.report {
        report.save_json(report_path)?;
        log::info!("Report written to {}", report_path.display());
    }

    if args.snapshot {
        let snapshot = ron::ser::to_string_pretty(&lab.snapshot(), ron::ser::PrettyConfig::default())
            .context("Failed to serialize lab snapshot")?;
        println!("{}", snapshot);
    }

    for failure in &report.verification_failures {
        log::error!("Verification failed: {}", failure.message);
    }

    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}

fn list_tools() {
    let tools = Tools::new();
    let toolbar = Toolbar::default();

    println!("Toolbar:");
    for section in toolbar.sections() {
        println!("  {}", section.name);
        for kind in section.tools {
            let def = tools.get(*kind);
            match &def.liquid {
                Some(liquid) => println!(
                    "    {:<10} {:<16} liquid {:>5.0} ({:.0}, {:.0}, {:.0})",
                    kind.id(),
                    def.name,
                    liquid.volume,
                    liquid.color.r,
                    liquid.color.g,
                    liquid.color.b
                ),
                None => println!("    {:<10} {}", kind.id(), def.name),
            }
        }
    }
}

fn list_recipes(config: &LabConfig) -> anyhow::Result<()> {
    let recipes = config.recipes()?;

    println!("Recipes:");
    for entry in recipes.iter() {
        let (a, b) = entry.reagents;
        println!(
            "  {} + {} -> {} (gas {:.1})",
            a, b, entry.recipe.name, entry.recipe.gas_rate
        );
    }
    println!("  otherwise -> {}", recipes.fallback().name);

    Ok(())
}

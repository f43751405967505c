use anyhow::Context;
use clap::{Args, ColorChoice, CommandFactory, FromArgMatches, Parser, Subcommand};
use colored::Colorize;
use hazardsense::config::EngineConfig;
use hazardsense::schema::{Detection, EvaluationReport};
use hazardsense::{ViolationEngine, conditions, summary};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "hazardsense",
    about = "Workplace hazard citation utilities",
    arg_required_else_help = true
)]
struct Cli {
    /// Disable color
    #[arg(long = "no-color", global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a detection batch against the loaded standards
    Eval(EvalArgs),
    /// List the loaded standards and their citations
    Rules(RulesArgs),
    /// Print the JSON Schema of the evaluation report
    Schema,
}

#[derive(Args, Clone)]
struct EvalArgs {
    /// JSON file holding a detection array; reads stdin when omitted
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Directory of standard documents (overrides config)
    #[arg(long, value_name = "DIR")]
    standards: Option<PathBuf>,

    /// Engine config file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output the report envelope as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Clone)]
struct RulesArgs {
    /// Directory of standard documents (overrides config)
    #[arg(long, value_name = "DIR")]
    standards: Option<PathBuf>,

    /// Engine config file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output rule entries as JSON
    #[arg(long)]
    json: bool,
}

fn load_engine(
    config_path: Option<&PathBuf>,
    standards: Option<&PathBuf>,
) -> anyhow::Result<ViolationEngine> {
    let mut config = match config_path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::load_default(),
    };
    if let Some(dir) = standards {
        config.standards_dir = dir.clone();
    }
    let engine = ViolationEngine::from_config(&config)?;
    Ok(engine)
}

fn read_detections(input: Option<&PathBuf>) -> anyhow::Result<Vec<Detection>> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read detections file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("cannot read detections from stdin")?;
            buf
        }
    };

    let mut detections: Vec<Detection> =
        serde_json::from_str(&text).context("input is not a JSON detection array")?;
    conditions::attach_conditions(&mut detections);
    Ok(detections)
}

fn run_eval(args: EvalArgs) -> anyhow::Result<()> {
    let engine = load_engine(args.config.as_ref(), args.standards.as_ref())?;
    let detections = read_detections(args.input.as_ref())?;
    let report = engine.evaluate_report(&detections);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if report.violations.is_empty() {
            println!("{}", summary::summarize(&report.violations).green());
            return Ok(());
        }
        let header = format!(
            "{} potential violation(s) from {} detection(s):",
            report.violations.len(),
            detections.len()
        );
        println!("{}", header.bold());
        println!("{}", summary::summarize(&report.violations));
    }
    Ok(())
}

fn run_rules(args: RulesArgs) -> anyhow::Result<()> {
    let engine = load_engine(args.config.as_ref(), args.standards.as_ref())?;
    let store = engine.store();

    if args.json {
        println!("{}", serde_json::to_string_pretty(store.entries())?);
        return Ok(());
    }

    for standard in store.standards() {
        println!("{}", standard.to_uppercase().bold());
        for entry in store.entries().iter().filter(|e| e.standard == standard) {
            let severity = if entry.severity.is_empty() {
                String::new()
            } else {
                format!(" [{}]", entry.severity)
            };
            println!(
                "  {} {} -> {}{}",
                entry.citation, entry.condition, entry.description, severity
            );
        }
    }
    println!("{} entries total", store.entry_count());
    Ok(())
}

fn run_schema() -> anyhow::Result<()> {
    let schema = schemars::schema_for!(EvaluationReport);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn detect_color_choice() -> ColorChoice {
    // Scan args before clap so help/errors honor `--no-color`.
    // Mirror clap's parsing by stopping at `--` which terminates flags.
    let mut args = std::env::args_os();
    // Skip binary name
    args.next();
    let mut flag = false;
    for arg in args {
        if arg == "--" {
            break;
        }
        if arg == "--no-color" {
            flag = true;
            break;
        }
    }
    if flag || std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}

fn main() {
    let color = detect_color_choice();
    if matches!(color, ColorChoice::Never) {
        colored::control::set_override(false);
    }
    let matches = Cli::command().color(color).get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let result = match cli.command {
        Some(Commands::Eval(args)) => run_eval(args),
        Some(Commands::Rules(args)) => run_rules(args),
        Some(Commands::Schema) => run_schema(),
        None => Ok(()),
    };

    if let Err(err) = result {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}

//! MediMate symptom checker demo CLI.
//!
//! Runs the analyzer and the wizard against the embedded catalog (or a
//! catalog file) without starting the HTTP server.
//!
//! Usage:
//!   cargo run -p demo -- analyze -s cough:2 -s fever:2 --duration "3 days" --age-group adult
//!   cargo run -p demo -- catalog
//!   cargo run -p demo -- scenarios
//!   cargo run -p demo -- wizard cardiac-emergency

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use medimate_catalog::Catalog;
use medimate_contracts::{
    assessment::{AssessmentInput, AssessmentResult},
    error::{TriageError, TriageResult},
    symptom::{Severity, SymptomCategory},
};
use medimate_core::{traits::AnalysisBackend, SymptomAnalyzer};
use medimate_wizard::{scenarios, Wizard, WizardStep};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Rule-based symptom checker demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "MediMate symptom checker demo",
    long_about = "Runs MediMate analyses from the command line: ad-hoc assessments,\n\
                  canned patient scenarios, and scripted wizard sessions."
)]
struct Cli {
    /// Symptom catalog TOML file. Defaults to the embedded catalog.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze one assessment given on the command line.
    Analyze {
        /// Symptom as `id` or `id:severity`; repeat for more.
        #[arg(short, long = "symptom", value_parser = parse_symptom, required = true)]
        symptoms: Vec<(String, Option<i64>)>,
        #[arg(long)]
        duration: Option<String>,
        #[arg(long)]
        age_group: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        /// Existing condition; repeat for more.
        #[arg(long = "chronic")]
        chronic_conditions: Vec<String>,
    },
    /// List the catalog's symptoms by category.
    Catalog,
    /// Run every canned scenario, or just the named one.
    Scenarios { name: Option<String> },
    /// Replay a scenario step by step through the wizard, with an
    /// unreachable remote backend to show the local fallback.
    Wizard {
        #[arg(default_value = "respiratory-infection")]
        scenario: String,
    },
}

fn parse_symptom(raw: &str) -> Result<(String, Option<i64>), String> {
    match raw.split_once(':') {
        None => Ok((raw.to_string(), None)),
        Some((id, severity)) => {
            let severity = severity
                .parse::<i64>()
                .map_err(|_| format!("severity in '{raw}' is not a number"))?;
            Ok((id.to_string(), Some(severity)))
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for the analyzer's trace.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = load_catalog(cli.catalog.as_deref()).and_then(|catalog| match cli.command {
        Command::Analyze {
            symptoms,
            duration,
            age_group,
            gender,
            chronic_conditions,
        } => {
            let mut input =
                AssessmentInput::with_symptoms(symptoms.iter().map(|(id, _)| id.clone()));
            for (id, severity) in &symptoms {
                if let Some(rank) = severity {
                    input = input.severity(id, *rank);
                }
            }
            input.duration = duration;
            input.age_group = age_group;
            input.gender = gender;
            input.chronic_conditions = chronic_conditions;
            run_analyze(catalog, &input)
        }
        Command::Catalog => {
            print_catalog(&catalog);
            Ok(())
        }
        Command::Scenarios { name } => run_scenarios(catalog, name.as_deref()),
        Command::Wizard { scenario } => run_wizard(catalog, &scenario),
    });

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

fn load_catalog(path: Option<&std::path::Path>) -> TriageResult<Arc<Catalog>> {
    let catalog = match path {
        Some(p) => Catalog::from_file(p)?,
        None => Catalog::embedded()?,
    };
    Ok(Arc::new(catalog))
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_analyze(catalog: Arc<Catalog>, input: &AssessmentInput) -> TriageResult<()> {
    if input.symptoms.is_empty() {
        return Err(TriageError::validation(
            medimate_contracts::assessment::EMPTY_SYMPTOMS_MESSAGE,
        ));
    }
    print_reported(input);
    let result = SymptomAnalyzer::new(catalog).analyze(input);
    print_result(&result);
    Ok(())
}

fn run_scenarios(catalog: Arc<Catalog>, only: Option<&str>) -> TriageResult<()> {
    let selected: Vec<_> = match only {
        Some(name) => vec![scenarios::find(name).ok_or_else(|| unknown_scenario(name))?],
        None => scenarios::all(),
    };

    for scenario in selected {
        println!("── {} ──", scenario.name);
        println!("{}", scenario.summary);
        let result = scenario.run(Arc::clone(&catalog))?;
        print_result(&result);
    }
    Ok(())
}

/// Stands in for the remote analysis service when the device is offline.
struct OfflineRemote;

impl AnalysisBackend for OfflineRemote {
    fn analyze(&self, _input: &AssessmentInput) -> TriageResult<AssessmentResult> {
        Err(TriageError::RemoteAnalysisFailed {
            reason: "no network connection".to_string(),
        })
    }

    fn name(&self) -> &str {
        "remote"
    }
}

fn run_wizard(catalog: Arc<Catalog>, name: &str) -> TriageResult<()> {
    let scenario = scenarios::find(name).ok_or_else(|| unknown_scenario(name))?;
    let local = SymptomAnalyzer::new(Arc::clone(&catalog));
    let mut wizard = Wizard::new(catalog);

    println!("Wizard session: {} ({})", scenario.name, scenario.summary);
    print_step(wizard.step());
    for command in scenario.commands {
        let before = wizard.step();
        println!("    > {:?}", command);
        let after = wizard.dispatch(command)?;
        if after != before {
            print_step(after);
        }
    }

    println!("    > submit (remote offline, falling back to local analysis)");
    let result = wizard.submit(&OfflineRemote, &local)?.clone();
    print_step(wizard.step());
    print_result(&result);
    Ok(())
}

fn unknown_scenario(name: &str) -> TriageError {
    let known: Vec<&str> = scenarios::all().iter().map(|s| s.name).collect();
    TriageError::validation(format!(
        "unknown scenario '{name}'; choose one of: {}",
        known.join(", ")
    ))
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_step(step: WizardStep) {
    println!("[{}/{}] {}", step.index() + 1, WizardStep::COUNT, step);
}

/// Selected symptoms with the severity the analyzer will use.
fn print_reported(input: &AssessmentInput) {
    println!("Reported symptoms:");
    for id in &input.symptoms {
        let severity = input
            .severities
            .get(id)
            .map(|raw| Severity::clamped(*raw))
            .unwrap_or_default();
        println!("  {:<24} {} ({})", id.as_str(), severity.value(), severity.label());
    }
}

fn print_catalog(catalog: &Catalog) {
    for category in SymptomCategory::ALL {
        let symptoms = catalog.symptoms_by_category(category);
        if symptoms.is_empty() {
            continue;
        }
        println!("{category}");
        for symptom in symptoms {
            let marker = if catalog.is_emergency_symptom(&symptom.id) { " !" } else { "" };
            println!("  {:<24} {}{}", symptom.id.as_str(), symptom.name, marker);
        }
    }
    println!();
    println!(
        "{} conditions; '!' marks symptoms that always raise an emergency alert.",
        catalog.conditions().len()
    );
}

fn print_result(result: &AssessmentResult) {
    println!();
    if let Some(alert) = &result.emergency_alert {
        let triggers: Vec<&str> = alert.triggers.iter().map(|t| t.as_str()).collect();
        println!("!! EMERGENCY: {} ({})", alert.message, alert.urgency.describe());
        println!("   {}", alert.instructions);
        println!("   triggered by: {}", triggers.join(", "));
        println!();
    }

    println!("Confidence: {}%", result.confidence);
    if result.possible_conditions.is_empty() {
        println!("No matching conditions.");
    }
    for (rank, entry) in result.possible_conditions.iter().take(5).enumerate() {
        println!(
            "  {}. {:<22} {:>3}%  {}/{} symptoms  {}",
            rank + 1,
            entry.condition,
            entry.probability,
            entry.matched_symptoms,
            entry.total_symptoms,
            entry.urgency.describe()
        );
    }

    for block in &result.recommendations {
        println!();
        println!("Advice ({}):", block.category().unwrap_or("general"));
        for item in block.items() {
            println!("  - {item}");
        }
    }
    println!();
}

#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dutyroster::{
    audit, generate_schedule,
    config::{load_input_from_file, RosterInput},
    io,
};
use std::path::Path;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planification des gardes (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Document JSON d'entrée (roster + règles)
    #[arg(long, global = true, default_value = "roster.json")]
    input: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculer le planning
    Generate {
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Importer des personnes depuis un CSV dans le document d'entrée
    ImportPeople {
        #[arg(long)]
        csv: String,
    },

    /// Revalider un planning déjà calculé (après échange manuel)
    Check {
        /// Planning JSON produit par `generate --out-json`
        #[arg(long)]
        assigned: String,
        /// Export CSV des conflits (optionnel)
        #[arg(long)]
        report: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let code = match cli.cmd {
        Commands::Generate { out_json, out_csv } => {
            let input = load_input_from_file(&cli.input)?;
            let roster = generate_schedule(&input);
            if let Some(path) = out_json {
                io::export_assigned_json(path, &roster)?;
            }
            if let Some(path) = out_csv {
                io::export_schedule_csv(path, &roster)?;
            }
            // impression compacte
            for assigned in &roster.people {
                let cells: Vec<String> = assigned
                    .schedule
                    .iter()
                    .map(|cell| {
                        cell.iter()
                            .map(|a| a.label())
                            .collect::<Vec<_>>()
                            .join("+")
                    })
                    .collect();
                println!("{} | {}", assigned.person.name(), cells.join(" "));
            }
            for line in &roster.diagnostics {
                eprintln!("warning: {line}");
            }
            // Code 2 = WARNING/INCOMPLETE
            if roster.diagnostics.is_empty() {
                0
            } else {
                2
            }
        }
        Commands::ImportPeople { csv } => {
            let people = io::import_people_csv(csv)?;
            let mut input = if Path::new(&cli.input).exists() {
                load_input_from_file(&cli.input)?
            } else {
                RosterInput::default()
            };
            input.people.extend(people);
            input
                .validate()
                .with_context(|| "imported people are inconsistent")?;
            io::save_input_json(&cli.input, &input)?;
            println!("{} people in {}", input.people.len(), cli.input);
            0
        }
        Commands::Check { assigned, report } => {
            let input = load_input_from_file(&cli.input)?;
            let roster = io::load_assigned_json(assigned)?;
            let conflicts = audit(&roster, &input);
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                if let Some(path) = report {
                    // CSV simple
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["person_id", "day", "kind"])?;
                    let mut buf = itoa::Buffer::new();
                    for c in &conflicts {
                        w.write_record([c.person.as_str(), buf.format(c.day), c.kind.as_str()])?;
                    }
                    w.flush()?;
                }
                2
            }
        }
    };

    std::process::exit(code);
}

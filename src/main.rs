use academic_records::{
    generate, import_roster, Identifiable, Overview, RecordsConfig, Registrar, RosterFiles,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Academic Records - enrollment and grade analytics
#[derive(Parser)]
#[command(name = "academic-records")]
#[command(version)]
struct Cli {
    /// JSON config file (defaults apply when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print reports as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate sample data and print the analytics overview
    Demo {
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Load a roster from CSV files and print the overview or one transcript
    Import {
        #[arg(long)]
        students: PathBuf,
        #[arg(long)]
        courses: PathBuf,
        #[arg(long)]
        teachers: Option<PathBuf>,
        #[arg(long)]
        grades: Option<PathBuf>,
        /// Print this student's transcript instead of the overview
        #[arg(long)]
        student: Option<String>,
    },
    /// Print one student's transcript from the sample data
    Report {
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long)]
        student: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RecordsConfig::from_file(path)?,
        None => RecordsConfig::default(),
    };

    // Logs go to stderr so --json output stays parseable
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut registrar = Registrar::new(config);

    match cli.command {
        Commands::Demo { seed } => {
            generate(&mut registrar, &mut StdRng::seed_from_u64(seed))?;
            print_overview(&registrar.overview(), cli.json)?;
        }
        Commands::Import {
            students,
            courses,
            teachers,
            grades,
            student,
        } => {
            let files = RosterFiles {
                students,
                courses,
                teachers,
                grades,
            };
            import_roster(&mut registrar, &files)?;
            match student {
                Some(id) => print_report(&registrar, &id, cli.json)?,
                None => print_overview(&registrar.overview(), cli.json)?,
            }
        }
        Commands::Report { seed, student } => {
            generate(&mut registrar, &mut StdRng::seed_from_u64(seed))?;
            print_report(&registrar, &student, cli.json)?;
        }
    }

    Ok(())
}

fn print_overview(overview: &Overview, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(overview).context("Failed to serialize overview")?;
        println!("{}", out);
        return Ok(());
    }

    println!("📚 Academic Records");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{}", overview.summary.summary());

    println!("\n🏆 Top students");
    for (rank, standing) in overview.top_students.iter().enumerate() {
        println!("  {:>2}. {}", rank + 1, standing.summary());
    }

    println!(
        "\n⚠️  At risk (average below {:.1}): {} students",
        overview.at_risk_threshold,
        overview.at_risk_students.len()
    );
    for standing in &overview.at_risk_students {
        println!("  - {}", standing.summary());
    }

    println!("\n📈 Most popular courses");
    for entry in &overview.popular_courses {
        println!(
            "  {} - {}: {} enrollments",
            entry.course.id(),
            entry.course.name(),
            entry.enrollment_count
        );
    }

    println!("\n🎓 Programs");
    for stats in overview.programs.values() {
        println!("  {}", stats.summary());
    }

    println!("\nOverall average: {:.2}", overview.summary.overall_average);
    Ok(())
}

fn print_report(registrar: &Registrar, student_id: &str, json: bool) -> Result<()> {
    let engine = registrar.enrollments();

    if json {
        let value = match engine.student_transcript(student_id) {
            Some(report) => serde_json::to_value(&report).context("Failed to serialize report")?,
            None => serde_json::json!({
                "student_id": student_id,
                "message": engine.student_report(student_id),
            }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", engine.student_report(student_id));
    }

    Ok(())
}

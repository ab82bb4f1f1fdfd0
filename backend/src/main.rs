//! colreorder CLI - filter and reorder spreadsheet columns, then re-export
//!
//! # Commands
//!
//! ```bash
//! colreorder convert ventas.xlsx              # Import, show, export formatted workbook
//! colreorder show ventas.xlsx                 # Import and show the normalized table
//! colreorder inspect ventas.xlsx              # Header row, kept/dropped/missing columns
//! colreorder profile > profile.json           # Built-in profile as JSON
//! ```

use clap::{Parser, Subcommand};
use colreorder::logs::{log_info, LOG_BOOK};
use colreorder::{
    default_output_path, import, import_detailed, render_table, ReportProfile, Session,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "colreorder")]
#[command(about = "Filter and reorder spreadsheet columns against a reference schema", long_about = None)]
struct Cli {
    /// Profile JSON file (default: built-in sales ledger profile)
    #[arg(short, long, global = true)]
    profile: Option<PathBuf>,

    /// Only print command output, no progress log
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a spreadsheet and export the formatted workbook
    Convert {
        /// Input spreadsheet (.xlsx, .xlsm, .xls or .csv)
        input: PathBuf,

        /// Output .xlsx file (default: "<date> <label>.xlsx" in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not print the table before exporting
        #[arg(long)]
        no_show: bool,

        /// Rows to print (default: all)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Import a spreadsheet and print the normalized table
    Show {
        /// Input spreadsheet (.xlsx, .xlsm, .xls or .csv)
        input: PathBuf,

        /// Rows to print (default: all)
        #[arg(long)]
        limit: Option<usize>,

        /// Print as JSON instead of a text grid
        #[arg(long)]
        json: bool,
    },

    /// Show header detection and column matching for a spreadsheet
    Inspect {
        /// Input spreadsheet (.xlsx, .xlsm, .xls or .csv)
        input: PathBuf,
    },

    /// Print the active profile as JSON
    Profile {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    LOG_BOOK.set_quiet(cli.quiet);

    let result = load_profile(cli.profile.as_deref()).and_then(|profile| match cli.command {
        Commands::Convert {
            input,
            output,
            no_show,
            limit,
        } => cmd_convert(profile, &input, output.as_deref(), no_show, limit),

        Commands::Show { input, limit, json } => cmd_show(&profile, &input, limit, json),

        Commands::Inspect { input } => cmd_inspect(&profile, &input),

        Commands::Profile { output } => cmd_profile(&profile, output.as_deref()),
    });

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn load_profile(path: Option<&Path>) -> Result<ReportProfile, Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            let profile = ReportProfile::from_file(p)?;
            log_info(format!("📋 Profile: {} ({})", profile.name, p.display()));
            Ok(profile)
        }
        None => Ok(ReportProfile::default()),
    }
}

fn cmd_convert(
    profile: ReportProfile,
    input: &Path,
    output: Option<&Path>,
    no_show: bool,
    limit: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = match output {
        Some(p) => p.to_path_buf(),
        None => default_output_path(
            Path::new("."),
            &profile.template,
            chrono::Local::now().date_naive(),
        ),
    };

    let mut session = Session::new(profile);
    session.import(input)?;

    if !no_show {
        if let Some(table) = session.table() {
            print!("{}", render_table(table, limit));
        }
    }

    session.export(&output)?;
    eprintln!("✨ File exported: {}", output.display());
    Ok(())
}

fn cmd_show(
    profile: &ReportProfile,
    input: &Path,
    limit: Option<usize>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = import(input, profile)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        print!("{}", render_table(&table, limit));
    }
    Ok(())
}

fn cmd_inspect(profile: &ReportProfile, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = import_detailed(input, profile)?;
    let info = &outcome.info;

    println!("Sheet: {}", info.sheet);
    println!(
        "Header row: {}{}",
        info.header_row,
        if info.sentinel_found {
            String::new()
        } else {
            format!(" ('{}' not found, fallback)", profile.sentinel)
        }
    );
    println!("Data rows: {}", info.raw_row_count);
    println!("Source columns ({}):", info.raw_columns.len());
    for (i, col) in info.raw_columns.iter().enumerate() {
        println!("  [{:2}] {:?}", i + 1, col);
    }
    println!("Kept: {}", outcome.report.kept.join(", "));
    println!("Dropped: {}", outcome.report.dropped.join(", "));
    println!("Missing: {}", outcome.report.missing.join(", "));
    Ok(())
}

fn cmd_profile(profile: &ReportProfile, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let json = profile.to_json()?;
    match output {
        Some(p) => {
            fs::write(p, &json)?;
            eprintln!("💾 Profile written to: {}", p.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

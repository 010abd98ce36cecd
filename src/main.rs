use anyhow::Result;
use std::env;

use amorto::data;
use amorto::journal::{self, MonthKey};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 3 {
        eprintln!("Usage: cargo run -- <schedule_file> <target_month>");
        eprintln!("  target month as YYYY-MM, e.g. 2024-05");
        std::process::exit(1);
    }

    let target_month = MonthKey::parse_target(&args[2])?;
    let schedule = data::load_schedule(&args[1])?;
    let entries = journal::generate(&schedule, target_month)?;

    data::print_entries(&entries);
    let output_path = data::export_csv(&entries, target_month)?;
    println!("\nSaved {} entries to '{}'", entries.len(), output_path);

    Ok(())
}

use anyhow::{Context, Result};
use std::env;
use std::path::Path;

use penalty_ledger::{Ledger, PenaltyCatalog, Standing, MAX_PENALTY_POINTS};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let command = args.get(1).map(String::as_str).unwrap_or("help");

    match command {
        "catalog" => run_catalog(),
        "report" => run_report(&args),
        "check" => run_check(&args),
        "add" => run_add(&args),
        "record" => run_record(&args),
        "remove" => run_remove(&args),
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn required<'a>(args: &'a [String], index: usize, message: &str) -> Result<&'a str> {
    args.get(index)
        .map(String::as_str)
        .with_context(|| format!("Missing argument: {}", message))
}

/// Import the ledger file if it exists, otherwise start empty.
fn load_ledger(path: &str) -> Result<Ledger> {
    let mut ledger = Ledger::with_standard_catalog();

    if Path::new(path).exists() {
        let report = ledger
            .import_from_path(path)
            .with_context(|| format!("Failed to import ledger from '{}'", path))?;
        println!("✓ Imported {}: {}", path, report.summary());
    } else {
        println!("✓ Starting a new ledger ('{}' does not exist yet)", path);
    }

    Ok(ledger)
}

fn save_ledger(ledger: &Ledger, path: &str) -> Result<()> {
    ledger
        .export_to_path(path)
        .with_context(|| format!("Failed to export ledger to '{}'", path))?;
    println!("✓ Saved {}", path);
    Ok(())
}

fn run_catalog() -> Result<()> {
    let catalog = PenaltyCatalog::standard();

    println!(
        "🏁 Penalty Catalog ({} incidents in {} categories)",
        catalog.incident_count(),
        catalog.category_count()
    );
    for category in catalog.categories() {
        println!("\n{}", category.name);
        for incident in &category.incidents {
            println!("  {} ({} penalty points)", incident.name, incident.points);
        }
    }

    Ok(())
}

fn run_report(args: &[String]) -> Result<()> {
    let path = required(args, 2, "ledger file")?;
    let ledger = load_ledger(path)?;

    println!("\n📒 Standings");
    if ledger.participants().is_empty() {
        println!("No participants on file.");
        return Ok(());
    }

    for participant in ledger.participants() {
        let marker = match participant.standing() {
            Standing::Disqualified => "  ❌ DISQUALIFIED",
            Standing::Active => "",
        };
        println!(
            "  {}: {}/{}{}",
            participant.name,
            participant.total_points(),
            MAX_PENALTY_POINTS,
            marker
        );
    }

    Ok(())
}

fn run_check(args: &[String]) -> Result<()> {
    let path = required(args, 2, "ledger file")?;
    let name = required(args, 3, "participant name")?;
    let ledger = load_ledger(path)?;

    let total = ledger.total_points(name)?;
    let standing = ledger.standing(name)?;
    println!(
        "\n{}: {}/{} ({})",
        name,
        total,
        MAX_PENALTY_POINTS,
        standing.as_str()
    );

    Ok(())
}

fn run_add(args: &[String]) -> Result<()> {
    let path = required(args, 2, "ledger file")?;
    let name = required(args, 3, "participant name")?;
    let mut ledger = load_ledger(path)?;

    if ledger.add_participant(name)? {
        println!("✓ Added {}", name);
    } else {
        println!("✓ {} is already registered", name);
    }

    save_ledger(&ledger, path)
}

fn run_record(args: &[String]) -> Result<()> {
    let path = required(args, 2, "ledger file")?;
    let name = required(args, 3, "participant name")?;
    let incident = required(args, 4, "incident name")?;
    let mut ledger = load_ledger(path)?;

    // The catalog guarantees incident names are unique, so the name alone
    // pins down the category and point value.
    let (category, points) = {
        let (category, points) = ledger.catalog().resolve(incident)?;
        (category.to_string(), points)
    };

    let total = ledger.record_incident(name, &category, incident)?;
    println!(
        "✓ The penalty '{}' ({} points, {}) has been saved for {}",
        incident, points, category, name
    );
    println!("  {}: {}/{}", name, total, MAX_PENALTY_POINTS);
    if ledger.is_disqualified(name)? {
        println!("  ❌ {} has reached the penalty limit", name);
    }

    save_ledger(&ledger, path)
}

fn run_remove(args: &[String]) -> Result<()> {
    let path = required(args, 2, "ledger file")?;
    let name = required(args, 3, "participant name")?;
    let incident = required(args, 4, "incident name")?;
    let mut ledger = load_ledger(path)?;

    let (category, points) = {
        let (category, points) = ledger.catalog().resolve(incident)?;
        (category.to_string(), points)
    };

    let total = ledger.remove_incident(name, &category, incident)?;
    println!(
        "✓ The penalty '{}' ({} points, {}) has been removed for {}",
        incident, points, category, name
    );
    println!("  {}: {}/{}", name, total, MAX_PENALTY_POINTS);

    save_ledger(&ledger, path)
}

fn print_usage() {
    println!("🏁 RC Penalty Ledger v{}", penalty_ledger::VERSION);
    println!();
    println!("Usage: penalty-ledger <command> [args]");
    println!();
    println!("Commands:");
    println!("  catalog                          Show the penalty catalog");
    println!("  report <file>                    Show standings for every participant");
    println!("  check <file> <name>              Show one participant's points and standing");
    println!("  add <file> <name>                Register a participant");
    println!("  record <file> <name> <incident>  Record a penalty (saves the file)");
    println!("  remove <file> <name> <incident>  Strike a recorded penalty (saves the file)");
}

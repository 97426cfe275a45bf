/// CLI tool for running DEP sweep studies
use dep_response::config::DEFAULT_OUTPUT_DIR;
use dep_response::study::{SweepRunner, SweepStudyConfig};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "generate" => generate_study_config(&args[2..]),
        "list" => list_cases(&args[2..]),
        "run" => run_case(&args[2..]),
        "run-all" => run_all_cases(&args[2..]),
        "scatter" => run_scatter(&args[2..]),
        _ => {
            println!("Unknown command: {}", command);
            print_usage();
        }
    }
}

fn print_usage() {
    println!("\n╔══════════════════════════════════════════════════════════╗");
    println!("║  DEP Response - Clausius-Mossotti Sweep Study Tool  ║");
    println!("╚══════════════════════════════════════════════════════════╝\n");
    println!("Usage: dep_response <command> [options]\n");
    println!("Commands:");
    println!("  generate    Generate a study configuration file");
    println!("  list        List all curve and scatter cases in a study");
    println!("  run         Evaluate a specific curve case");
    println!("  run-all     Evaluate every curve and scatter case");
    println!("  scatter     Generate scatter sets (all, or one by name)\n");
    println!("Examples:");
    println!("  dep_response generate cell_study.toml");
    println!("  dep_response list cell_study.toml");
    println!("  dep_response run cell_study.toml cell");
    println!("  dep_response run-all cell_study.toml");
    println!("  dep_response scatter cell_study.toml cell_pink\n");
}

fn output_dir(config: &SweepStudyConfig) -> String {
    format!("{}/{}", DEFAULT_OUTPUT_DIR, config.study_name.replace(' ', "_"))
}

fn load(config_file: &str) -> Option<SweepStudyConfig> {
    match SweepStudyConfig::from_file(config_file) {
        Ok(config) => Some(config),
        Err(e) => {
            println!("❌ Error loading config: {}", e);
            None
        }
    }
}

fn generate_study_config(args: &[String]) {
    if args.is_empty() {
        println!("❌ Error: Please specify output file name");
        println!("Usage: dep_response generate <output_file.toml>");
        return;
    }

    let output_file = &args[0];

    println!("\n🔧 Generating study configuration...\n");

    let config = SweepStudyConfig::generate_default_study("DEP Cell Study".to_string());

    match config.to_file(output_file) {
        Ok(_) => {
            println!("✅ Study configuration generated: {}", output_file);
            println!("📊 Curve cases: {}", config.curves.len());
            println!("📊 Scatter cases: {}\n", config.scatter.len());
        }
        Err(e) => {
            println!("❌ Error generating config: {}", e);
        }
    }
}

fn list_cases(args: &[String]) {
    if args.is_empty() {
        println!("❌ Error: Please specify study configuration file");
        println!("Usage: dep_response list <config_file.toml>");
        return;
    }

    if let Some(config) = load(&args[0]) {
        let dir = output_dir(&config);
        SweepRunner::new(config, dir).list_cases();
    }
}

fn run_case(args: &[String]) {
    if args.len() < 2 {
        println!("❌ Error: Please specify config file and curve name");
        println!("Usage: dep_response run <config_file.toml> <curve>");
        return;
    }

    let curve = &args[1];

    if let Some(config) = load(&args[0]) {
        let dir = output_dir(&config);
        let runner = SweepRunner::new(config, dir);

        match runner.run_case(curve) {
            Ok(_) => println!("\n✅ Curve '{}' completed successfully!\n", curve),
            Err(e) => println!("❌ Error running curve: {}\n", e),
        }
    }
}

fn run_all_cases(args: &[String]) {
    if args.is_empty() {
        println!("❌ Error: Please specify study configuration file");
        println!("Usage: dep_response run-all <config_file.toml>");
        return;
    }

    if let Some(config) = load(&args[0]) {
        let dir = output_dir(&config);
        let runner = SweepRunner::new(config, dir);

        if let Err(e) = runner.run_all() {
            println!("❌ Error running study: {}\n", e);
        }
    }
}

fn run_scatter(args: &[String]) {
    if args.is_empty() {
        println!("❌ Error: Please specify study configuration file");
        println!("Usage: dep_response scatter <config_file.toml> [scatter_name]");
        return;
    }

    if let Some(config) = load(&args[0]) {
        let dir = output_dir(&config);
        let runner = SweepRunner::new(config, dir);

        let outcome = match args.get(1) {
            Some(name) => runner.run_scatter(name).map(|_| 1),
            None => runner.run_all_scatter().map(|sets| sets.len()),
        };

        match outcome {
            Ok(count) => println!("\n✅ Generated {} scatter set(s)\n", count),
            Err(e) => println!("❌ Error generating scatter: {}\n", e),
        }
    }
}

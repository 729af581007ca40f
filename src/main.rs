//! Main CLI application for the fullerene labeling enumerator

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fullerene_labeling::{
    config::{CliOverrides, Settings, SolverBackend},
    enumerate_many,
    graph::{create_example_specs, BUILTIN_ISOMERS},
    labeling::{LabelingProblem, SolutionValidator},
    utils::{ColorOutput, SolutionFormatter},
};
use log::{info, LevelFilter};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "fullerene_labeling")]
#[command(about = "Enumerate magic vertex labelings of fullerene graphs")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Which graph to use and optional target overrides
#[derive(Args, Debug, Default)]
struct InstanceArgs {
    /// Built-in isomer (C24, C26)
    #[arg(short, long, conflicts_with = "spec")]
    isomer: Option<String>,

    /// Graph specification file (YAML or JSON)
    #[arg(short, long)]
    spec: Option<PathBuf>,

    /// Target sum for every pentagon
    #[arg(long)]
    pentagon_sum: Option<u64>,

    /// Target sum for every hexagon
    #[arg(long)]
    hexagon_sum: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate all labelings of one graph
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        #[command(flatten)]
        instance: InstanceArgs,

        /// Solver backend (overrides config)
        #[arg(short, long, value_enum)]
        backend: Option<SolverBackend>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not print each solution
        #[arg(short, long)]
        quiet: bool,
    },

    /// Enumerate several graphs in parallel
    Batch {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Built-in isomers, comma separated
        #[arg(long, value_delimiter = ',')]
        isomers: Vec<String>,

        /// Graph specification files
        #[arg(long, num_args = 1..)]
        specs: Vec<PathBuf>,

        /// Solver backend (overrides config)
        #[arg(short, long, value_enum)]
        backend: Option<SolverBackend>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not print each solution
        #[arg(short, long)]
        quiet: bool,
    },

    /// Create example configuration and specification files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Check a solutions CSV file against a graph
    Validate {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        #[command(flatten)]
        instance: InstanceArgs,

        /// Solutions CSV file
        #[arg(long)]
        solutions: PathBuf,
    },

    /// Show specification and encoding statistics
    Info {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        #[command(flatten)]
        instance: InstanceArgs,

        /// Solver backend (overrides config)
        #[arg(short, long, value_enum)]
        backend: Option<SolverBackend>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    configure_logging(cli.verbose);

    match cli.command {
        Commands::Solve {
            config,
            instance,
            backend,
            output,
            quiet,
        } => {
            let overrides = cli_overrides(instance, backend, output, quiet);
            solve_command(&config, &overrides, cli.verbose)
        }
        Commands::Batch {
            config,
            isomers,
            specs,
            backend,
            output,
            quiet,
        } => {
            let overrides = cli_overrides(InstanceArgs::default(), backend, output, quiet);
            batch_command(&config, &overrides, isomers, specs)
        }
        Commands::Setup { directory, force } => setup_command(&directory, force),
        Commands::Validate {
            config,
            instance,
            solutions,
        } => {
            let overrides = cli_overrides(instance, None, None, false);
            validate_command(&config, &overrides, &solutions)
        }
        Commands::Info {
            config,
            instance,
            backend,
        } => {
            let overrides = cli_overrides(instance, backend, None, false);
            info_command(&config, &overrides)
        }
    }
}

fn configure_logging(verbose: bool) {
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .filter_level(level_filter)
        .target(env_logger::Target::Stderr)
        .init();
    info!("Logging successfully configured");
}

fn cli_overrides(
    instance: InstanceArgs,
    backend: Option<SolverBackend>,
    output_dir: Option<PathBuf>,
    quiet: bool,
) -> CliOverrides {
    CliOverrides {
        isomer: instance.isomer,
        spec_file: instance.spec,
        pentagon_sum: instance.pentagon_sum,
        hexagon_sum: instance.hexagon_sum,
        backend,
        output_dir,
        quiet,
    }
}

/// Load the config file (or defaults), apply overrides and validate
fn load_settings(config_path: &Path, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        info!("Config file {} not found, using defaults", config_path.display());
        Settings::default()
    };

    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;
    Ok(settings)
}

fn solve_command(config_path: &Path, overrides: &CliOverrides, verbose: bool) -> Result<()> {
    let settings = load_settings(config_path, overrides)?;
    let problem = LabelingProblem::new(settings).context("Failed to create labeling problem")?;

    println!(
        "{}",
        ColorOutput::info(&format!(
            "🧮 Enumerating labelings of {} ({} backend)",
            problem.spec().name,
            format!("{:?}", problem.settings().solver.backend).to_lowercase()
        ))
    );

    if verbose {
        println!("{}", problem.spec().statistics());
        println!("{}", problem.model_statistics());
    }

    let summary = problem.solve().context("Failed to enumerate labelings")?;

    if summary.duplicates_skipped > 0 {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "⚠️  Skipped {} repeated labeling(s) from the backend",
                summary.duplicates_skipped
            ))
        );
    }

    if verbose {
        println!("\n{}", SolutionFormatter::format_summary(&summary));
    }

    Ok(())
}

fn batch_command(
    config_path: &Path,
    overrides: &CliOverrides,
    isomers: Vec<String>,
    specs: Vec<PathBuf>,
) -> Result<()> {
    let base = load_settings(config_path, overrides)?;

    let isomers = if isomers.is_empty() && specs.is_empty() {
        BUILTIN_ISOMERS.iter().map(|name| name.to_string()).collect()
    } else {
        isomers
    };

    let mut jobs = Vec::new();
    for isomer in isomers {
        let mut settings = base.clone();
        settings.instance.isomer = Some(isomer);
        settings.instance.spec_file = None;
        settings.output.file_name = None;
        jobs.push(settings);
    }
    for spec in specs {
        let mut settings = base.clone();
        settings.instance.isomer = None;
        settings.instance.spec_file = Some(spec);
        settings.output.file_name = None;
        jobs.push(settings);
    }

    println!(
        "{}",
        ColorOutput::info(&format!("🔄 Running {} enumerations in parallel", jobs.len()))
    );

    let start_time = Instant::now();
    let total_jobs = jobs.len();
    let mut summaries = Vec::new();
    let mut failures = 0;

    for result in enumerate_many(jobs) {
        match result {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                failures += 1;
                eprintln!("{}", ColorOutput::error(&format!("❌ {:#}", e)));
            }
        }
    }

    println!("\n{}", SolutionFormatter::format_batch_table(&summaries));
    println!("Total time: {:.3}s", start_time.elapsed().as_secs_f64());

    if failures > 0 {
        anyhow::bail!("{} of {} runs failed", failures, total_jobs);
    }
    Ok(())
}

fn setup_command(directory: &Path, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let specs_dir = directory.join("specs");
    let output_dir = directory.join("output");

    for dir in [&config_dir, &specs_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        let mut default_settings = Settings::default();
        default_settings.output.output_directory = PathBuf::from("output");
        default_settings
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_specs(&specs_dir).context("Failed to create example specifications")?;
    println!("Created example specifications in: {}", specs_dir.display());

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    let mut search_config = Settings::default();
    search_config.instance.isomer = None;
    search_config.instance.spec_file = Some(PathBuf::from("specs/square.yaml"));
    search_config.solver.backend = SolverBackend::Search;
    search_config.output.output_directory = PathBuf::from("output");
    search_config.to_file(&examples_dir.join("square_search.yaml"))?;

    let mut c26_config = Settings::default();
    c26_config.instance.isomer = Some("C26".to_string());
    c26_config.output.output_directory = PathBuf::from("output");
    c26_config.output.write_summary = true;
    c26_config.to_file(&examples_dir.join("c26.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add graph specifications to {}", specs_dir.display());
    println!("3. Run: cargo run -- solve --config config/default.yaml");

    Ok(())
}

fn validate_command(config_path: &Path, overrides: &CliOverrides, solutions: &Path) -> Result<()> {
    println!("{}", ColorOutput::info("🔍 Validating solutions..."));

    let settings = load_settings(config_path, overrides)?;
    let problem = LabelingProblem::new(settings).context("Failed to create labeling problem")?;

    let validator = SolutionValidator::new(problem.model());
    let result = validator
        .validate_file(solutions)
        .with_context(|| format!("Failed to validate {}", solutions.display()))?;

    println!("{}", result);

    if result.is_valid {
        println!("{}", ColorOutput::success("✅ Solution table is valid!"));
        Ok(())
    } else {
        println!("{}", ColorOutput::error("❌ Solution table is invalid"));
        anyhow::bail!("{} problem(s) found in {}", result.issues.len(), solutions.display())
    }
}

fn info_command(config_path: &Path, overrides: &CliOverrides) -> Result<()> {
    println!("{}", ColorOutput::info("🔬 Analyzing specification..."));

    let settings = load_settings(config_path, overrides)?;
    let problem = LabelingProblem::new(settings).context("Failed to create labeling problem")?;

    println!("{}", problem.spec().statistics());
    println!("{}", problem.model_statistics());
    println!("{}", problem.backend_statistics()?);
    println!("Output file: {}", problem.settings().output_path(problem.spec()).display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "fullerene_labeling",
            "solve",
            "--isomer",
            "C26",
            "--pentagon-sum",
            "66",
            "--backend",
            "search",
            "--quiet",
        ]);
        assert!(cli.is_ok());

        let Commands::Solve { instance, backend, quiet, .. } = cli.unwrap().command else {
            panic!("expected solve");
        };
        assert_eq!(instance.isomer.as_deref(), Some("C26"));
        assert_eq!(instance.pentagon_sum, Some(66));
        assert_eq!(backend, Some(SolverBackend::Search));
        assert!(quiet);
    }

    #[test]
    fn test_isomer_and_spec_conflict() {
        let cli = Cli::try_parse_from([
            "fullerene_labeling",
            "solve",
            "--isomer",
            "C24",
            "--spec",
            "specs/custom.yaml",
        ]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_batch_isomer_list() {
        let cli = Cli::try_parse_from(["fullerene_labeling", "batch", "--isomers", "C24,C26"]).unwrap();
        let Commands::Batch { isomers, specs, .. } = cli.command else {
            panic!("expected batch");
        };
        assert_eq!(isomers, vec!["C24".to_string(), "C26".to_string()]);
        assert!(specs.is_empty());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("config/examples/square_search.yaml").exists());
        assert!(temp_dir.path().join("specs/C24.yaml").exists());
        assert!(temp_dir.path().join("specs/square.yaml").exists());
    }

    #[test]
    fn test_solve_then_validate() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path(), false).unwrap();

        let spec = temp_dir.path().join("specs/square.yaml");
        let output = temp_dir.path().join("output");
        let solve = CliOverrides {
            spec_file: Some(spec.clone()),
            backend: Some(SolverBackend::Search),
            output_dir: Some(output.clone()),
            quiet: true,
            ..Default::default()
        };
        let missing_config = temp_dir.path().join("none.yaml");
        solve_command(&missing_config, &solve, false).unwrap();

        let table = output.join("square_solutions_10.csv");
        assert!(table.exists());

        let validate = CliOverrides {
            spec_file: Some(spec),
            ..Default::default()
        };
        assert!(validate_command(&missing_config, &validate, &table).is_ok());

        std::fs::write(&table, "Solution #,Timestamp,v1,v2,v3,v4\n1,2024-05-01 12:00:00,1,1,4,4\n").unwrap();
        assert!(validate_command(&missing_config, &validate, &table).is_err());
    }
}

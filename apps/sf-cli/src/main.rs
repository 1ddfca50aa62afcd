use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use sf_app::{parse_scenario, read_scenario_file, AppError, AppResult};
use sf_scenario::ScenarioData;
use sf_wiring::{build_scenario_wiring, flatten, partition, to_xml, ScenarioWiringSpec};

#[derive(Parser)]
#[command(name = "sf-cli")]
#[command(about = "ScenarioFlow CLI - Scenario CSV inspection and wiring generation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a scenario CSV file
    Validate {
        /// Path to the scenario CSV file
        csv_path: PathBuf,
    },
    /// List scenarios and parameters in a CSV file
    Scenarios {
        /// Path to the scenario CSV file
        csv_path: PathBuf,
    },
    /// Generate a scenario selector wiring document
    Wire {
        /// Path to the scenario CSV file
        csv_path: PathBuf,
        /// Tensor variable name referenced by the wiring
        #[arg(long, default_value = ":ScenarioTensor")]
        tensor_name: String,
        /// Total row count of the physical tensor (defaults to the
        /// scenario count, i.e. no metadata rows to skip)
        #[arg(long)]
        total_rows: Option<usize>,
        /// Output XML file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { csv_path } => cmd_validate(&csv_path),
        Commands::Scenarios { csv_path } => cmd_scenarios(&csv_path),
        Commands::Wire {
            csv_path,
            tensor_name,
            total_rows,
            output,
        } => cmd_wire(&csv_path, &tensor_name, total_rows, output.as_deref()),
    }
}

fn load_table(csv_path: &Path) -> AppResult<ScenarioData> {
    let text = read_scenario_file(csv_path)?;
    parse_scenario(&text)
}

fn cmd_validate(csv_path: &Path) -> AppResult<()> {
    println!("Validating scenario file: {}", csv_path.display());
    let data = load_table(csv_path)?;
    sf_scenario::check_shape(&data)?;

    let (dependent, static_params) = partition(&data);
    println!("✓ Scenario file is valid");
    println!("  Scenarios: {}", data.scenario_names.len());
    println!("  Parameters: {}", data.parameters.len());
    println!("  Scenario-dependent: {}", dependent.len());
    println!("  Static: {}", static_params.len());
    Ok(())
}

fn cmd_scenarios(csv_path: &Path) -> AppResult<()> {
    let data = load_table(csv_path)?;

    if data.scenario_names.is_empty() {
        println!("No scenario columns found");
    } else {
        println!("Scenarios:");
        for (idx, name) in data.scenario_names.iter().enumerate() {
            println!("  [{}] {}", idx, name);
        }
    }

    if !data.parameters.is_empty() {
        println!("Parameters:");
        for param in &data.parameters {
            let defined = param.values.iter().filter(|v| v.is_some()).count();
            println!(
                "  {} ({}) - {}/{} scenario values",
                param.name,
                param.kind.as_str(),
                defined,
                data.scenario_names.len()
            );
        }
    }
    Ok(())
}

fn cmd_wire(
    csv_path: &Path,
    tensor_name: &str,
    total_rows: Option<usize>,
    output: Option<&Path>,
) -> AppResult<()> {
    let data = load_table(csv_path)?;
    let tensor = flatten(&data)?;

    let mut spec = ScenarioWiringSpec::new(
        tensor_name,
        tensor.param_names.clone(),
        tensor.scenario_names.clone(),
    );
    if let Some(rows) = total_rows {
        spec.total_rows = rows;
    }

    let graph = build_scenario_wiring(&spec)?;
    let xml = to_xml(&graph);

    if let Some(path) = output {
        std::fs::write(path, &xml).map_err(|source| AppError::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;
        println!(
            "✓ Wrote wiring for {} parameters × {} scenarios to {}",
            spec.param_names.len(),
            spec.scenario_names.len(),
            path.display()
        );
    } else {
        print!("{}", xml);
    }

    Ok(())
}

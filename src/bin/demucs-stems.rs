use clap::{Parser, Subcommand};
use demucs_stems::{
    init_logging, read_audio, registry, set_stage_callback, AdapterConfig, JobStage,
    SeparateOptions, SeparationOutcome, Separator, WorkspaceMode,
};
use std::{path::PathBuf, process};

#[derive(Parser)]
#[command(name = "demucs-stems")]
#[command(about = "Separate a track into stems with Demucs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one separation and print the six stem slots
    Separate {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        model: Option<String>,

        /// Random shifts to average over (slower, better)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=10))]
        shifts: u32,

        /// Overlap between prediction windows
        #[arg(long, default_value_t = 0.25, value_parser = parse_overlap)]
        overlap: f64,

        /// Output root (defaults to $DEMUCS_OUTPUT_DIR or ./out)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Compute device passed to the tool (defaults to $DEMUCS_DEVICE or cuda)
        #[arg(short, long)]
        device: Option<String>,

        /// Stage every run in its own job directory
        #[arg(long)]
        per_job: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        #[arg(short, long)]
        quiet: bool,
    },

    /// List available models
    Models,
}

fn parse_overlap(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if (0.0..=1.0).contains(&v) {
        Ok(v)
    } else {
        Err(format!("overlap must be within 0.0..=1.0, got {v}"))
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Separate {
            input,
            model,
            shifts,
            overlap,
            output,
            device,
            per_job,
            json,
            quiet,
        } => {
            init_logging(if quiet { "warn" } else { "info" });
            handle_separate(SeparateArgs {
                input,
                model,
                shifts,
                overlap,
                output,
                device,
                per_job,
                json,
                quiet,
            })
        }
        Commands::Models => handle_models(),
    };

    match result {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(2),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

struct SeparateArgs {
    input: PathBuf,
    model: Option<String>,
    shifts: u32,
    overlap: f64,
    output: Option<PathBuf>,
    device: Option<String>,
    per_job: bool,
    json: bool,
    quiet: bool,
}

fn handle_separate(args: SeparateArgs) -> anyhow::Result<bool> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let mut config = AdapterConfig::from_env()?;
    if let Some(output) = args.output {
        config.output_root = output;
    }
    if let Some(device) = args.device {
        config.device = device;
    }
    if args.per_job {
        config.workspace = WorkspaceMode::PerJob;
    }

    let opts = SeparateOptions {
        model_name: args
            .model
            .unwrap_or_else(|| registry().default_model().to_string()),
        shifts: args.shifts,
        overlap: args.overlap,
    };

    if !args.quiet {
        eprintln!("Input:   {}", args.input.display());
        eprintln!("Output:  {}", config.output_root.display());
        eprintln!("Model:   {}", opts.model_name);
        eprintln!("Shifts:  {}  Overlap: {}", opts.shifts, opts.overlap);
        eprintln!("Device:  {}", config.device);
        eprintln!();
        setup_stage_callback();
    }

    let audio = read_audio(&args.input)?;
    let outcome = Separator::new(config).separate(&audio, &opts);
    let success = outcome.is_success();

    match &outcome {
        SeparationOutcome::ToolFailed { code, .. } => {
            eprintln!("Separation tool failed (exit code {code:?})");
        }
        SeparationOutcome::LaunchFailed { reason } => eprintln!("Could not start: {reason}"),
        SeparationOutcome::NoOutput { .. } => eprintln!("No output files found."),
        SeparationOutcome::Partial { missing, .. } if !args.quiet => {
            let names: Vec<&str> = missing.iter().map(|s| s.as_str()).collect();
            eprintln!("Missing stems: {}", names.join(", "));
        }
        _ => {}
    }

    let result = outcome.into_result();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for (stem, path) in result.iter() {
            let shown = path
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "-".into());
            if args.quiet {
                println!("{shown}");
            } else {
                println!("{:<7} {}", stem.as_str(), shown);
            }
        }
    }

    Ok(success)
}

fn handle_models() -> anyhow::Result<bool> {
    let reg = registry();

    eprintln!("Available Models");
    eprintln!("----------------------------------------");
    for model in &reg.models {
        let marker = if model.name == reg.default_model() {
            " (default)"
        } else {
            ""
        };
        let stems: Vec<&str> = model.stems.iter().map(|s| s.as_str()).collect();
        println!("  {}{}", model.name, marker);
        println!("      {} [{}]", model.description, stems.join(", "));
    }

    eprintln!();
    eprintln!("Use --model <name> to specify a model");

    Ok(true)
}

fn setup_stage_callback() {
    set_stage_callback(|stage| match stage {
        JobStage::Staging => eprintln!("Writing input audio"),
        JobStage::Running => eprintln!("Running separation"),
        JobStage::Collecting => eprintln!("Collecting stems"),
        JobStage::Finished { success: true } => eprintln!("Done"),
        JobStage::Finished { success: false } => eprintln!("Finished with errors"),
    });
}

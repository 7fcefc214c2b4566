use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use svconf_core::{DocumentFormat, GlobalSettings, ProgramSpec, SupervisorConfig};
use tracing::info;

#[derive(Parser)]
#[command(name = "svconf", about = "Render supervisord configuration from program descriptions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a configuration file from an input document
    Render {
        /// Input document (YAML or JSON); reads stdin when omitted or "-"
        #[arg(long, short, env = "SVCONF_INPUT")]
        input: Option<PathBuf>,
        /// Input format; guessed from the file extension when omitted
        #[arg(long)]
        format: Option<DocumentFormat>,
        /// Write the configuration here instead of stdout
        #[arg(long, short, env = "SVCONF_OUTPUT")]
        output: Option<PathBuf>,
    },
    /// Print a sample input document
    Sample {
        #[arg(long, default_value = "yaml")]
        format: DocumentFormat,
    },
}

fn main() -> miette::Result<()> {
    // Logs go to stderr so rendered output on stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            format,
            output,
        } => run_render(input.as_deref(), format, output.as_deref()),
        Commands::Sample { format } => {
            let text = sample_config().to_string_as(format)?;
            write_output(None, &text)
        }
    }
}

/// Load the input document, render it and write the result
fn run_render(
    input: Option<&Path>,
    format: Option<DocumentFormat>,
    output: Option<&Path>,
) -> miette::Result<()> {
    let input = input.filter(|path| path.as_os_str() != "-");
    let format = format.unwrap_or_else(|| {
        input
            .map(DocumentFormat::from_path)
            .unwrap_or_default()
    });

    let data = read_input(input)?;
    let config = SupervisorConfig::parse(&data, format)?;
    let text = config.render();

    write_output(output, &text)?;
    info!(
        "Rendered {} program(s) to {}",
        config.programs.len(),
        output
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "stdout".to_string())
    );

    Ok(())
}

fn read_input(input: Option<&Path>) -> miette::Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            miette::miette!("Failed to read input document '{}': {}", path.display(), e)
        }),
        None => {
            let mut data = String::new();
            std::io::stdin()
                .read_to_string(&mut data)
                .map_err(|e| miette::miette!("Failed to read input document from stdin: {}", e))?;
            Ok(data)
        }
    }
}

fn write_output(output: Option<&Path>, text: &str) -> miette::Result<()> {
    match output {
        Some(path) => std::fs::write(path, text).map_err(|e| {
            miette::miette!("Failed to write configuration to '{}': {}", path.display(), e)
        }),
        None => std::io::stdout()
            .write_all(text.as_bytes())
            .map_err(|e| miette::miette!("Failed to write to stdout: {}", e)),
    }
}

fn sample_config() -> SupervisorConfig {
    SupervisorConfig::new(GlobalSettings::new("root"))
        .with_program(
            ProgramSpec::new("web", "/srv/app/bin/web --port 8000")
                .with_directory("/srv/app")
                .with_priority(10)
                .with_log_folder("/var/log/app")
                .with_environment_vars([("APP_ENV", "production")]),
        )
        .with_program(
            ProgramSpec::new("worker", "/srv/app/bin/worker")
                .with_directory("/srv/app")
                .with_processes(4)
                .with_user("app")
                .with_log_folder("/var/log/app"),
        )
}

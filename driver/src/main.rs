use anyhow::Context;
use arithkernel::prelude::ElementKind;
use clap::Parser;
use std::path::PathBuf;
use telemetry::LogManager;
use workflow::config::{OperationKind, WorkflowConfig};
use workflow::runner::Runner;

mod generator;
mod telemetry;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Benchmark and property-check driver for the arithmetic kernel")]
struct Args {
    /// Load a workflow config from YAML (overrides the flags below)
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 8)]
    trials: usize,
    /// Vector length and square matrix order of generated operands
    #[arg(long, default_value_t = 16)]
    size: usize,
    /// Element kind of generated operands: integer or float
    #[arg(long, default_value = "float", value_parser = parse_kind)]
    kind: ElementKind,
    /// Operations to run; all of them when omitted
    #[arg(long, value_enum, value_delimiter = ',')]
    operations: Vec<OperationKind>,
    /// Run trials concurrently on a multi-threaded runtime
    #[arg(long, default_value_t = false)]
    concurrent: bool,
}

fn parse_kind(value: &str) -> Result<ElementKind, String> {
    match value.to_ascii_lowercase().as_str() {
        "integer" | "int" => Ok(ElementKind::Integer),
        "float" | "double" => Ok(ElementKind::Float),
        other => Err(format!("unknown element kind '{}'", other)),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let logger = LogManager::default();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        let mut config = WorkflowConfig::from_args(
            args.seed,
            args.trials,
            args.size,
            args.kind,
            args.operations,
        );
        config.concurrent = args.concurrent;
        config
    };
    logger.record(&format!(
        "running {} operation(s), {} trial(s) each, size {}, {} operands",
        workflow_config.operations.len(),
        workflow_config.trials,
        workflow_config.size,
        workflow_config.element_kind
    ));

    let result = Runner::new(workflow_config)
        .execute()
        .context("executing workflow")?;
    let report = serde_json::to_string_pretty(&result).context("serializing workflow report")?;
    println!("{}", report);

    let failed = result.failed_operations();
    if !failed.is_empty() {
        let names: Vec<String> = failed.iter().map(ToString::to_string).collect();
        anyhow::bail!("property checks failed for: {}", names.join(", "));
    }
    Ok(())
}

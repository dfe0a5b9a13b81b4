// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and prints results. All pipeline
// work is delegated to Layer 2 (application).
//
//   1. `run`     - train, validate, plot curves, predict
//   2. `inspect` - show a CSV file's header and first row

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, InspectArgs, RunArgs};

use crate::application::classify_use_case::ClassifyReport;
use crate::infra::metrics::render_curves;

#[derive(Parser, Debug)]
#[command(
    name = "news-classifier",
    version,
    about = "Train a bidirectional LSTM news-category classifier on CSV data, then predict test categories."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Run(args)     => run_classify(args),
            Commands::Inspect(args) => run_inspect(args),
        }
    }
}

fn run_classify(args: RunArgs) -> Result<()> {
    use crate::application::classify_use_case::ClassifyUseCase;

    tracing::info!("Starting training on '{}'", args.train_csv);

    let report = ClassifyUseCase::new(args.into()).execute()?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &ClassifyReport) {
    if let Some(last) = report.history.last() {
        println!(
            "\nFinal epoch: accuracy={:.4} val_accuracy={:.4} loss={:.4} val_loss={:.4}",
            last.train_accuracy, last.val_accuracy, last.train_loss, last.val_loss,
        );
    }
    println!();
    println!("{}", render_curves(&report.history));

    let mapping: Vec<String> = report
        .class_names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{i}={name}"))
        .collect();
    println!("Classes: {}", mapping.join(", "));

    if !report.predictions.is_empty() {
        println!("Predicted classes:\n\n {:?}", report.predictions);
    }
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    use crate::data::loader::CsvLoader;

    let preview = CsvLoader::unlabelled(&args.file).preview()?;
    println!("CSV header:\n {}", preview.header);
    match preview.first_data {
        Some(row) => println!("First data point:\n {row}"),
        None      => println!("First data point:\n (file has no data rows)"),
    }
    Ok(())
}

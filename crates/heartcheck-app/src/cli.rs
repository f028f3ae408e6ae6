use crate::evaluate::Outcome;
use anyhow::Context;
use clap::{Parser, Subcommand};
use heartcheck_classifiers::Prediction;
use heartcheck_core::FeatureInputs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "heartcheck")]
#[command(author, version, about = "Heart disease risk prediction from clinical inputs")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive form server
    Serve {
        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,

        /// Listen address
        #[arg(short, long)]
        address: Option<String>,

        /// Classifier artifact path
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long, default_value = "heartcheck.yaml")]
        config: PathBuf,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run one prediction and print the result
    Predict {
        /// Classifier artifact path
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long, default_value = "heartcheck.yaml")]
        config: PathBuf,

        /// JSON file of field name to value, applied over the form defaults
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Override one field, e.g. --set age=61 (repeatable)
        #[arg(long = "set", value_parser = parse_assignment)]
        set: Vec<(String, f64)>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the input fields with their domains and defaults
    Features,
}

fn parse_assignment(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{}'", s))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid value for '{}': {}", name, e))?;
    Ok((name.trim().to_string(), value))
}

/// Inputs for `predict`: form defaults, then the input file, then `--set`
pub fn collect_inputs(input: Option<&Path>, set: Vec<(String, f64)>) -> anyhow::Result<FeatureInputs> {
    let mut inputs = FeatureInputs::defaults();
    if let Some(path) = input {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display()))?;
        let from_file: FeatureInputs = serde_json::from_str(&content)
            .with_context(|| format!("invalid input file {}", path.display()))?;
        inputs.merge(from_file);
    }
    inputs.merge(FeatureInputs::from_raw(set)?);
    Ok(inputs)
}

/// Anything but a prediction fails the command
pub fn require_prediction(outcome: Outcome) -> anyhow::Result<Prediction> {
    match outcome {
        Outcome::Predicted(prediction) => Ok(prediction),
        Outcome::ModelUnavailable(message) => anyhow::bail!(message),
        Outcome::InvalidInput(message) => anyhow::bail!("invalid input: {}", message),
    }
}

use clap::Parser;
use heartcheck_app::catalogue::catalogue;
use heartcheck_app::cli::{collect_inputs, require_prediction, Cli, Commands};
use heartcheck_app::config::{AppConfig, ConfigOverrides};
use heartcheck_app::evaluate::evaluate;
use heartcheck_app::server::{run_server, PredictResponse};
use heartcheck_classifiers::ModelCache;
use heartcheck_core::Domain;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            address,
            model,
            config,
            verbose,
        } => {
            init_logging(verbose);

            let overrides = ConfigOverrides {
                model_path: model,
                address,
                port,
            };
            let config = AppConfig::load(&config, &overrides)?;

            println!();
            println!("  HeartCheck: heart disease risk, interactive form");
            println!("  Model:   {}", config.model_path.display());
            println!("  Open http://{} in your browser", config.socket_addr()?);
            println!();

            run_server(config).await?;
        }

        Commands::Predict {
            model,
            config,
            input,
            set,
            json,
            verbose,
        } => {
            init_logging(verbose);

            let overrides = ConfigOverrides {
                model_path: model,
                ..Default::default()
            };
            let config = AppConfig::load(&config, &overrides)?;

            let inputs = collect_inputs(input.as_deref(), set)?;

            let cache = ModelCache::global(config.model_path.clone());
            let prediction = require_prediction(evaluate(cache.get_or_load(), &inputs)?)?;
            if json {
                let response = PredictResponse::from(prediction);
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("Prediction (1 = disease): {}", prediction.label);
                if let Some(probability) = prediction.probability_display() {
                    println!("Probability: {}", probability);
                }
                println!();
                println!("Model Inputs:");
                for (feature, value) in prediction.record.iter() {
                    println!("  {:<10} {}", feature.name(), value);
                }
            }
        }

        Commands::Features => {
            for info in catalogue() {
                let domain = match info.domain {
                    Domain::Range { min, max, step } => format!("[{}, {}] step {}", min, max, step),
                    Domain::Options { values } => format!("{:?}", values),
                };
                println!(
                    "{:<10} {:<32} {:<24} default {}",
                    info.name, info.label, domain, info.default
                );
                println!("{:<10} {}", "", info.help);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "heartcheck_app=debug,heartcheck_classifiers=debug,tower_http=debug"
    } else {
        "heartcheck_app=info,heartcheck_classifiers=info,tower_http=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

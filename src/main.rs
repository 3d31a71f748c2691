use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::{debug, error};

use chefai::{
    ErrorResponse, GenerationError, GenerationResponse, GeneratorConfig, ProviderKind,
    RecipeGenerator,
};

#[derive(Parser)]
#[command(name = "chefai")]
#[command(about = "Generate recipes from the ingredients you have on hand")]
struct Args {
    /// Ingredients, as separate arguments or comma separated
    #[arg(required = true)]
    ingredients: Vec<String>,

    /// Provider to try, in order (repeatable): openrouter, groq
    #[arg(long = "provider")]
    providers: Vec<String>,

    /// Model override for every selected provider
    #[arg(long)]
    model: Option<String>,

    /// Per-provider request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn split_ingredients(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|arg| arg.split(','))
        .map(String::from)
        .collect()
}

/// Canonical provider names, rejecting unknown ones
fn provider_order(names: &[String]) -> Result<Vec<String>, GenerationError> {
    names
        .iter()
        .map(|name| name.parse::<ProviderKind>().map(|kind| kind.as_str().to_string()))
        .collect()
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> String {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
}

async fn run(args: &Args) -> Result<GenerationResponse, GenerationError> {
    let mut config = GeneratorConfig::load()?;

    if !args.providers.is_empty() {
        config.order = provider_order(&args.providers)?;
    }
    if let Some(model) = &args.model {
        let selected: Vec<ProviderKind> = config
            .order
            .iter()
            .filter_map(|name| name.parse().ok())
            .collect();
        for kind in selected {
            let mut provider_config = config.provider(kind.as_str());
            provider_config.model = Some(model.clone());
            config
                .providers
                .insert(kind.as_str().to_string(), provider_config);
        }
    }

    let mut builder = RecipeGenerator::builder().config(config);
    if let Some(seconds) = args.timeout {
        builder = builder.timeout(Duration::from_secs(seconds));
    }
    let generator = builder.build()?;
    debug!("Provider order: {:?}", generator.provider_names());

    let recipes = generator
        .generate(&split_ingredients(&args.ingredients))
        .await?;
    Ok(GenerationResponse::from(recipes))
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match run(&args).await {
        Ok(response) => {
            println!("{}", to_json(&response, args.pretty));
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error generating recipes: {}", e);
            eprintln!("{}", to_json(&ErrorResponse::from(&e), args.pretty));
            if e.status_hint() == 400 {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

//! FibreConnect CLI

use clap::{Parser, Subcommand};
use fc_core::availability::FixedSample;
use fc_core::catalog::store::products_in;
use fc_core::{
    select_packages, Backend, Category, ContractType, CoreError, CoreResult, CoverageView, Frequency,
    LandingPage, LatencyConfig, MockBackend, Package, PlanBuilder, SimulatedAvailability,
};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "fc")]
#[command(about = "FibreConnect coverage checker and catalog browser")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Answer immediately instead of simulating backend latency
    #[arg(long, global = true)]
    no_latency: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check fibre coverage for an address
    Check {
        /// Address as "street, suburb, city"
        #[arg(short, long)]
        address: String,

        /// Fixed coverage sample in [0, 1) instead of a random draw
        #[arg(long)]
        sample: Option<f64>,
    },

    /// List packages, cheapest first
    Packages {
        /// Provider ids to keep (comma-separated)
        #[arg(short, long)]
        providers: Option<String>,
    },

    /// Pick a plan from the plan builder
    Builder {
        /// Contract type (prepaid, month-to-month)
        #[arg(short, long, default_value = "prepaid")]
        contract: String,

        /// Billing frequency (daily, weekly, monthly)
        #[arg(short, long, default_value = "daily")]
        frequency: String,

        /// Plan id to select
        #[arg(long)]
        plan: Option<String>,
    },

    /// Suggest addresses for a partial query
    Suggest {
        query: String,
    },

    /// List storefront products
    Products {
        /// Category (all, generators, ups, powerbanks)
        #[arg(short, long)]
        category: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set subscriber: {}", e);
    }

    let latency = if cli.no_latency {
        LatencyConfig::none()
    } else {
        LatencyConfig::default()
    };

    let result = match cli.command {
        Commands::Check { address, sample } => cmd_check(&address, sample, latency).await,
        Commands::Packages { providers } => cmd_packages(providers, latency).await,
        Commands::Builder { contract, frequency, plan } => cmd_builder(&contract, &frequency, plan),
        Commands::Suggest { query } => cmd_suggest(&query, latency).await,
        Commands::Products { category } => cmd_products(category),
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// The decision table is defined on [0, 1) only
fn check_sample(sample: Option<f64>) -> CoreResult<Option<f64>> {
    match sample {
        Some(s) if !(0.0..1.0).contains(&s) => Err(CoreError::Validation(format!(
            "--sample must be in [0, 1), got {}",
            s
        ))),
        other => Ok(other),
    }
}

fn backend(latency: LatencyConfig, sample: Option<f64>) -> MockBackend {
    match sample {
        Some(sample) => {
            let availability =
                SimulatedAvailability::with_source(Box::new(FixedSample(sample)), latency.availability());
            MockBackend::with_availability(latency, Box::new(availability))
        }
        None => MockBackend::new(latency),
    }
}

fn print_packages(backend: &MockBackend, packages: &[&Package]) {
    for pkg in packages {
        let provider = backend
            .catalog()
            .provider(&pkg.provider_id)
            .map(|p| p.name.as_str())
            .unwrap_or(pkg.provider_id.as_str());
        println!(
            "  {:<8} {:<10} {:<12} {:>3}/{:<3} Mbps  R{}/pm",
            pkg.id, provider, pkg.name, pkg.speed_down, pkg.speed_up, pkg.price
        );
    }
}

async fn cmd_check(input: &str, sample: Option<f64>, latency: LatencyConfig) -> CoreResult<()> {
    info!("Checking coverage for: {}", input);
    let sample = check_sample(sample)?;

    let backend = Arc::new(backend(latency.clone(), sample));
    let mut page = LandingPage::new(backend.clone(), latency);
    page.load_packages().await?;
    page.check_address(input).await?;

    println!("\nCoverage Check\n{}", "=".repeat(50));
    match page.coverage() {
        CoverageView::Covered { address, result } => {
            println!("Address: {}", address);
            println!("Status: fibre available");
            if let Some(exchange) = &result.exchange {
                println!("Exchange: {}", exchange);
            }
            println!("Providers: {}", result.providers.join(", "));
            println!("\nPackages:");
            print_packages(&backend, &page.displayed_packages());
        }
        CoverageView::NotCovered { address } => {
            println!("Address: {}", address);
            println!("Status: not yet available");
        }
        CoverageView::NotChecked => println!("Status: not checked"),
    }
    Ok(())
}

async fn cmd_packages(providers: Option<String>, latency: LatencyConfig) -> CoreResult<()> {
    let backend = backend(latency, None);
    let packages = backend.packages().await?;

    let ids: Option<Vec<&str>> = providers.as_deref().map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .collect()
    });
    let selected = select_packages(&packages, ids.as_deref());

    println!("\nPackages\n{}", "=".repeat(50));
    print_packages(&backend, &selected);
    Ok(())
}

fn cmd_builder(contract: &str, frequency: &str, plan: Option<String>) -> CoreResult<()> {
    let mut builder = PlanBuilder::new();
    builder.set_contract(ContractType::from_str(contract)?);
    builder.set_frequency(Frequency::from_str(frequency)?);
    if let Some(plan) = plan.as_deref() {
        builder.select_plan(plan);
    }

    println!("\nPlan Builder\n{}", "=".repeat(50));
    println!("Contract: {}", builder.contract());
    println!("  {}", builder.contract().blurb());
    if builder.frequency_locked() {
        println!("Frequency: {} (fixed)", builder.frequency());
    } else {
        println!("Frequency: {}", builder.frequency());
    }

    println!("\nPlans:");
    let selected = builder.selected_id();
    for option in builder.available_plans() {
        let marker = if Some(option.id.as_str()) == selected { "*" } else { " " };
        println!(
            " {} {:<4} {:<22} {:<12} R{:<5} {}",
            marker, option.id, option.name, option.speed, option.price, option.duration_label
        );
    }

    if let Some(summary) = builder.summary() {
        println!(
            "\nSelected: {} ({}) R{} for {}",
            summary.name, summary.speed, summary.price, summary.duration_label
        );
    }
    Ok(())
}

async fn cmd_suggest(query: &str, latency: LatencyConfig) -> CoreResult<()> {
    let backend = backend(latency, None);
    let suggestions = backend.address_suggestions(query).await?;

    if suggestions.is_empty() {
        println!("No suggestions; type at least 3 characters.");
        return Ok(());
    }
    for suggestion in suggestions {
        println!("  {}", suggestion);
    }
    Ok(())
}

fn cmd_products(category: Option<String>) -> CoreResult<()> {
    let category = match category.as_deref() {
        Some(name) => Category::from_str(name)?,
        None => Category::All,
    };

    println!("\nStorefront\n{}", "=".repeat(50));
    for product in products_in(category) {
        println!(
            "  {:<6} {:<36} R{:<6} {:.1}*",
            product.id, product.name, product.price, product.rating
        );
    }
    Ok(())
}

//! Fiber Fit CLI - browse the millet catalog and manage the cart.
//!
//! # Usage
//!
//! ```bash
//! # List flours matching "ragi"
//! ff-cli products --category flour --search ragi
//!
//! # Add two 500g packs of ragi flour to the cart
//! ff-cli cart add ragi-flour --quantity 2 --size 500g
//!
//! # Add every purchasable ingredient of a recipe
//! ff-cli cart add-recipe ragi-porridge
//!
//! # Render a page as JSON
//! ff-cli --json page why-millets
//! ```
//!
//! Configuration is read from the environment (and `.env`); see
//! `fiber_fit_storefront::config`. The cart persists between runs in the
//! storage file.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fiber_fit_storefront::config::StorefrontConfig;
use fiber_fit_storefront::{AppError, AppState};

mod commands;
mod output;

use output::Output;

#[derive(Parser)]
#[command(name = "ff-cli")]
#[command(author, version, about = "Fiber Fit storefront CLI")]
struct Cli {
    /// Print view models as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Category tag, or "all"
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Match against name, description and health benefits
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one product
    Product { id: String },
    /// List recipes
    Recipes,
    /// Show one recipe
    Recipe { id: String },
    /// List blog posts
    Blog {
        /// Category, or "all"
        #[arg(short, long, default_value = "all")]
        category: String,
    },
    /// Show one blog post by id or slug
    Post { id: String },
    /// Render a site page (index, products, recipes, why-millets, blog, story, contact)
    Page {
        slug: String,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show where each catalog collection was loaded from
    Status {
        /// Reload the catalog before reporting
        #[arg(long)]
        retry: bool,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add a product
    Add {
        product_id: String,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Size variant, e.g. 500g
        #[arg(short, long)]
        size: Option<String>,
    },
    /// Remove a product line
    Remove {
        product_id: String,

        #[arg(short, long)]
        size: Option<String>,
    },
    /// Set a line's quantity; zero or less removes it
    Update {
        product_id: String,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,

        #[arg(short, long)]
        size: Option<String>,
    },
    /// Add one unit of every catalog product a recipe uses
    AddRecipe { recipe_id: String },
    /// Empty the cart
    Clear,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fiber_fit_storefront=info,fiber_fit_cli=info".into());

    // Logs go to stderr so `--json` output stays parseable
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            fail(&AppError::from(e));
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    let out = Output::new(cli.json);
    if let Err(e) = run(cli.command, config, &out).await {
        fail(&e);
    }
}

#[allow(clippy::print_stderr)]
fn fail(error: &AppError) -> ! {
    error.report();
    eprintln!("Error: {}", error.user_message());
    std::process::exit(1);
}

async fn run(command: Commands, config: StorefrontConfig, out: &Output) -> Result<(), AppError> {
    let mut state = AppState::init(config).await?;

    match command {
        Commands::Products { category, search } => {
            commands::catalog::products(&state, &category, search.as_deref(), out)?;
        }
        Commands::Product { id } => commands::catalog::product(&state, &id, out)?,
        Commands::Recipes => commands::catalog::recipes(&state, out)?,
        Commands::Recipe { id } => commands::catalog::recipe(&state, &id, out)?,
        Commands::Blog { category } => commands::catalog::blog(&state, &category, out)?,
        Commands::Post { id } => commands::catalog::post(&state, &id, out)?,
        Commands::Page {
            slug,
            category,
            search,
        } => commands::page::render(&state, &slug, category, search, out)?,
        Commands::Status { retry } => commands::catalog::status(&mut state, retry, out).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state, out)?,
            CartAction::Add {
                product_id,
                quantity,
                size,
            } => commands::cart::add(&mut state, &product_id, quantity, size.as_deref(), out)?,
            CartAction::Remove { product_id, size } => {
                commands::cart::remove(&mut state, &product_id, size.as_deref(), out)?;
            }
            CartAction::Update {
                product_id,
                quantity,
                size,
            } => commands::cart::update(&mut state, &product_id, quantity, size.as_deref(), out)?,
            CartAction::AddRecipe { recipe_id } => {
                commands::cart::add_recipe(&mut state, &recipe_id, out)?;
            }
            CartAction::Clear => commands::cart::clear(&mut state, out)?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cart_update_negative() {
        let cli = Cli::try_parse_from(["ff-cli", "cart", "update", "ragi-flour", "-1"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(
            cli.command,
            Commands::Cart {
                action: CartAction::Update { quantity: -1, .. }
            }
        ));
    }

    #[test]
    fn test_parse_products_defaults() {
        let cli = Cli::try_parse_from(["ff-cli", "--json", "products"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Commands::Products { ref category, search: None } if category == "all"
        ));
    }
}

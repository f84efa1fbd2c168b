//! shopdesk — catalog admin client
//!
//! Usage:
//!   shopdesk login --email a@b.com --password x   → start a session
//!   shopdesk category list --search shoe          → list categories
//!   shopdesk product create --name ... --image p  → upload a product
//!   shopdesk logout                               → drop the stored session

use clap::{Args, Parser, Subcommand};
use shopdesk::commands::{self, ProductArgs};
use shopdesk::format::FormatOptions;
use shopdesk_api::{ApiClient, FileSessionStore};
use shopdesk_core::{Registration, ShopdeskConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

#[derive(Parser)]
#[command(
    name = "shopdesk",
    about = "Catalog admin client — categories, products and sessions",
    version = env!("CARGO_PKG_VERSION"),
    long_about = "shopdesk talks to the catalog REST backend.\n\
                  The API base URL comes from --base-url, SHOPDESK_API_URL, API_URL\n\
                  or baseUrl in ~/.shopdesk/config.json, in that order."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API base URL (overrides environment and config file)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Config file (default: ~/.shopdesk/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Session file (default: ~/.shopdesk/session.json)
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    /// Write logs to a file (in addition to stderr)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the stored user
    Whoami,
    /// Fetch the logged-in user's profile from the server
    Profile,
    /// Manage categories
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Manage products
    #[command(subcommand)]
    Product(ProductCommand),
}

#[derive(Subcommand)]
enum CategoryCommand {
    /// List categories
    List {
        /// Case-insensitive name filter
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Create a category with an image
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Rename a category and optionally replace its image
    Update {
        id: String,
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Delete a category
    Delete { id: String },
}

#[derive(Subcommand)]
enum ProductCommand {
    /// List products
    List,
    /// Show one product
    Show { id: String },
    /// Create a product with an image
    Create {
        #[command(flatten)]
        fields: ProductFields,
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Replace a product's fields and optionally its image
    Update {
        id: String,
        #[command(flatten)]
        fields: ProductFields,
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Delete a product
    Delete { id: String },
}

#[derive(Args)]
struct ProductFields {
    #[arg(short, long)]
    name: String,
    #[arg(short, long, default_value = "")]
    description: String,
    #[arg(long)]
    price: f64,
    /// Category id
    #[arg(short, long)]
    category: String,
    #[arg(short, long)]
    quantity: u32,
    /// Mark as out of stock
    #[arg(long, default_value_t = false)]
    out_of_stock: bool,
}

impl From<ProductFields> for ProductArgs {
    fn from(f: ProductFields) -> Self {
        Self {
            name: f.name,
            description: f.description,
            price: f.price,
            category_id: f.category,
            quantity: f.quantity,
            in_stock: !f.out_of_stock,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.verbose, cli.log_file.as_deref());

    match run(cli).await {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<String> {
    let config = match &cli.config {
        Some(path) => ShopdeskConfig::load_strict(path)?,
        None => ShopdeskConfig::discover(),
    };
    let base_url = config.resolve_base_url(cli.base_url.as_deref());
    if base_url.is_none() {
        tracing::warn!("No API base URL configured; requests will fail");
    }
    let session_path = cli.session_file.clone().unwrap_or_else(|| config.session_path());
    let api = ApiClient::new(base_url, Arc::new(FileSessionStore::new(session_path)));
    let opts = FormatOptions { json: cli.json };

    match cli.command {
        Commands::Login { email, password } => commands::login(&api, &email, &password, &opts).await,
        Commands::Register { name, email, password } => {
            let registration = Registration {
                name,
                email,
                password,
                is_admin: None,
            };
            commands::register(&api, registration, &opts).await
        }
        Commands::Logout => commands::logout(&api),
        Commands::Whoami => commands::whoami(&api, &opts),
        Commands::Profile => commands::profile(&api, &opts).await,

        Commands::Category(CategoryCommand::List { search }) => {
            commands::list_categories(&api, search.as_deref(), &opts).await
        }
        Commands::Category(CategoryCommand::Create { name, image }) => {
            commands::create_category(&api, name, image.as_deref(), &opts).await
        }
        Commands::Category(CategoryCommand::Update { id, name, image }) => {
            commands::update_category(&api, &id, name, image.as_deref(), &opts).await
        }
        Commands::Category(CategoryCommand::Delete { id }) => {
            commands::delete_category(&api, &id, &opts).await
        }

        Commands::Product(ProductCommand::List) => commands::list_products(&api, &opts).await,
        Commands::Product(ProductCommand::Show { id }) => {
            commands::show_product(&api, &id, &opts).await
        }
        Commands::Product(ProductCommand::Create { fields, image }) => {
            commands::create_product(&api, fields.into(), image.as_deref(), &opts).await
        }
        Commands::Product(ProductCommand::Update { id, fields, image }) => {
            commands::update_product(&api, &id, fields.into(), image.as_deref(), &opts).await
        }
        Commands::Product(ProductCommand::Delete { id }) => {
            commands::delete_product(&api, &id, &opts).await
        }
    }
}

/// stderr logging, plus an optional file sink. Keep the guard alive until exit.
fn init_tracing(verbose: bool, log_file: Option<&std::path::Path>) -> Option<WorkerGuard> {
    let default_filter = if verbose {
        "shopdesk=debug,shopdesk_api=debug"
    } else {
        "shopdesk=warn,shopdesk_api=warn"
    };
    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| default_filter.into())
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
            let name = path.file_name().map(|n| n.to_os_string()).unwrap_or_else(|| "shopdesk.log".into());
            let appender = tracing_appender::rolling::never(dir.unwrap_or_else(|| std::path::Path::new(".")), name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(filter()),
        )
        .with(file_layer)
        .init();

    guard
}

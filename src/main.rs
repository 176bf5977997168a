use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use snkrs::{
    config::{ConfigError, StorefrontConfig},
    core::{
        catalogue::CatalogueStore,
        wishlist::{Toggled, WishlistStore},
    },
    persist::{PersistError, sqlite::SqliteSlotStore, wishlist::WishlistAdapter},
    product::Product,
    remote::{
        ContentApiClient,
        register::{RegisterError, RegistrationForm},
    },
    runtime::handle::{RuntimeError, StorefrontHandle, spawn_storefront},
    types::{ProductId, SortOrder},
    view::{ViewState, WishlistView},
};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("storage unavailable: {0}")]
    Storage(#[from] PersistError),
    #[error("http client build failed: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error("registration failed: {0}")]
    Register(#[from] RegisterError),
}

#[derive(Parser, Debug)]
#[command(name = "snkrs", about = "Sneaker storefront catalogue and wishlist")]
struct Cli {
    #[arg(long, env = "SNKRS_API_BASE_URL")]
    api_base_url: Option<String>,

    #[arg(long, env = "SNKRS_STORAGE_PATH")]
    storage_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the catalogue after search, brand filter, and sort.
    Catalogue(CatalogueArgs),
    /// List brands available in the catalogue.
    Brands,
    /// List wishlisted products.
    Wishlist,
    /// Add or remove a product from the wishlist.
    Toggle { id: ProductId },
    /// Create an account.
    Register(RegisterArgs),
}

#[derive(Args, Debug)]
struct CatalogueArgs {
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long, default_value = "")]
    brand: String,
    /// `asc`, `desc`, or `none`.
    #[arg(long, default_value = "none")]
    sort: SortOrder,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    confirm_password: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(url) = cli.api_base_url {
        config.api_base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(path) = cli.storage_path {
        config.storage_path = path.into();
    }

    let client = ContentApiClient::from_config(&config)?;

    match cli.command {
        Command::Register(args) => register(&client, args).await,
        Command::Catalogue(args) => {
            let handle = open_storefront(&config)?;
            if load_catalogue(&handle, &client).await? {
                handle.set_search_term(args.search).await?;
                handle.set_brand_filter(args.brand).await?;
                handle.set_sort_order(args.sort).await?;
            }
            let code = print_view(&handle, &config).await?;
            handle.shutdown().await?;
            Ok(code)
        }
        Command::Brands => {
            let handle = open_storefront(&config)?;
            let code = if load_catalogue(&handle, &client).await? {
                for brand in handle.brands().await? {
                    println!("{brand}");
                }
                ExitCode::SUCCESS
            } else {
                print_view(&handle, &config).await?
            };
            handle.shutdown().await?;
            Ok(code)
        }
        Command::Wishlist => {
            let handle = open_storefront(&config)?;
            match handle.wishlist().await? {
                WishlistView::Empty => println!("wishlist is empty"),
                WishlistView::Items(items) => {
                    println!("wishlist ({})", items.len());
                    for product in &items {
                        print_product(product, true, &config);
                    }
                }
            }
            handle.shutdown().await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Toggle { id } => {
            let handle = open_storefront(&config)?;
            // Wishlisted items stay removable when the catalogue is down.
            load_catalogue(&handle, &client).await?;
            match handle.toggle_id(id).await? {
                Toggled::Added => println!("added {id} to wishlist"),
                Toggled::Removed => println!("removed {id} from wishlist"),
            }
            handle.shutdown().await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn open_storefront(config: &StorefrontConfig) -> Result<StorefrontHandle, CliError> {
    let slots = SqliteSlotStore::open(&config.storage_path)?;
    let adapter = WishlistAdapter::with_key(slots, config.wishlist_key.clone());
    Ok(spawn_storefront(CatalogueStore::new(), WishlistStore::open(adapter)))
}

async fn register(client: &ContentApiClient, args: RegisterArgs) -> Result<ExitCode, CliError> {
    let form = RegistrationForm {
        username: args.username,
        email: args.email,
        password: args.password,
        confirm_password: args.confirm_password,
    };
    let session = client.register(&form).await?;
    println!(
        "registered {}",
        session.username.as_deref().unwrap_or(form.username.as_str())
    );
    Ok(ExitCode::SUCCESS)
}

async fn load_catalogue(
    handle: &StorefrontHandle,
    client: &ContentApiClient,
) -> Result<bool, CliError> {
    match handle.load_from(client).await {
        Ok(_) => Ok(true),
        Err(RuntimeError::Fetch(_)) => Ok(false),
        Err(err) => Err(err.into()),
    }
}

async fn print_view(handle: &StorefrontHandle, config: &StorefrontConfig) -> Result<ExitCode, CliError> {
    match handle.view().await? {
        ViewState::Loading => {
            println!("loading...");
            Ok(ExitCode::SUCCESS)
        }
        ViewState::Unavailable => {
            println!("catalogue unavailable; run the command again to retry");
            Ok(ExitCode::FAILURE)
        }
        ViewState::NoResults => {
            println!("no results");
            Ok(ExitCode::SUCCESS)
        }
        ViewState::Products(products) => {
            for product in &products {
                let wished = handle.contains(product.id).await?;
                print_product(product, wished, config);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_product(product: &Product, wished: bool, config: &StorefrontConfig) {
    let heart = if wished { "♥" } else { " " };
    let image = product
        .image_url(&config.media_base_url)
        .unwrap_or_else(|| "(no image)".to_string());
    println!(
        "{heart} {:>5}  {:<24} {:<12} {:>12}  {image}",
        product.id,
        product.name,
        product.brand,
        product.display_price()
    );
}

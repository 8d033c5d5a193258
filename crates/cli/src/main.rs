//! Boostmart CLI - storefront and admin console over a local data file.
//!
//! # Usage
//!
//! ```bash
//! # Browse and price the catalog
//! bm-cli services list --category social
//! bm-cli quote service-1 100 --device mobile --target usa
//!
//! # Customer flow
//! bm-cli account sign-in
//! bm-cli deposit create upi 50 UPI-REF-123
//! bm-cli order place service-1 100 https://instagram.com/me --device mobile
//!
//! # Admin flow
//! bm-cli admin login -u admin -p '...'
//! bm-cli admin payment-status payment-... approved
//! bm-cli admin logs
//! bm-cli admin undo log-...
//! bm-cli admin service-create service.yaml
//!
//! # Replace the catalog
//! bm-cli seed services catalog.yaml
//! ```
//!
//! # Environment Variables
//!
//! - `BOOSTMART_DATA_FILE` - data file (overridden by `--data-file`)
//! - `BOOSTMART_ADMIN_USERNAME` / `BOOSTMART_ADMIN_PASSWORD` - admin login
//! - `BOOSTMART_LOG_JSON` - emit JSON logs when set
//! - `RUST_LOG` - log filter (default `boostmart=info,bm_cli=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boostmart_admin::AdminConfig;
use boostmart_core::{
    AdminLogId, DeviceType, OrderId, OrderStatus, PaymentId, PaymentMethod, PaymentStatus,
    ServiceId,
};
use boostmart_storefront::StorefrontConfig;
use boostmart_storefront::store::FileStore;

mod commands;

#[derive(Parser)]
#[command(name = "bm-cli")]
#[command(author, version, about = "Boostmart storefront and admin console")]
struct Cli {
    /// Data file to use instead of `BOOSTMART_DATA_FILE`
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the service catalog
    Services {
        #[command(subcommand)]
        action: ServicesAction,
    },
    /// Price an order without placing it
    Quote {
        service_id: ServiceId,
        quantity: u64,
        #[arg(long, default_value = "all")]
        device: DeviceType,
        /// Geographic target (defaults to the service's first target)
        #[arg(long)]
        target: Option<String>,
    },
    /// Customer sign-in
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Place and manage orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Request and list deposits
    Deposit {
        #[command(subcommand)]
        action: DepositAction,
    },
    /// Admin console
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Seed the store from files
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum ServicesAction {
    /// List services
    List {
        #[arg(long)]
        category: Option<String>,
    },
    /// List distinct categories
    Categories,
    /// List distinct geographic targets
    Targets,
    /// Show one service
    Show { id: ServiceId },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Sign in (only `google` is supported)
    SignIn {
        #[arg(long, default_value = "google")]
        provider: String,
    },
    /// Sign out
    SignOut,
    /// Show the signed-in customer
    Show,
}

#[derive(Subcommand)]
enum OrderAction {
    /// Place an order and charge the balance
    Place {
        service_id: ServiceId,
        quantity: u64,
        /// Destination profile, post or URL
        link: String,
        #[arg(long, default_value = "all")]
        device: DeviceType,
        #[arg(long)]
        target: Option<String>,
    },
    /// List your orders
    List,
    /// Cancel a pending order
    Cancel { id: OrderId },
}

#[derive(Subcommand)]
enum DepositAction {
    /// Request a deposit for admin review
    Create {
        /// `upi` or `crypto`
        method: PaymentMethod,
        amount: Decimal,
        transaction_id: String,
        /// Reference to a proof-of-payment image
        #[arg(long)]
        screenshot: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List your deposits
    List,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Sign in as admin
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// List all orders
    Orders,
    /// Set an order's status
    OrderStatus { id: OrderId, status: OrderStatus },
    /// List all payments
    Payments,
    /// Set a payment's status (approving credits the customer)
    PaymentStatus { id: PaymentId, status: PaymentStatus },
    /// Show the action log, newest first
    Logs,
    /// Undo a logged action
    Undo { log_id: AdminLogId },
    /// List every service, including inactive ones
    Services,
    /// Add a service from a YAML file (its `id` is replaced)
    ServiceCreate { file: PathBuf },
    /// Replace a service from a YAML file, matched by `id`
    ServiceUpdate { file: PathBuf },
    /// Delete a service from the catalog
    ServiceDelete { id: ServiceId },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Replace the catalog with services from a YAML file
    Services { file: PathBuf },
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "boostmart=info,bm_cli=info".into());

    let json = std::env::var("BOOSTMART_LOG_JSON").is_ok();
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_target(false));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let data_file = cli.data_file.unwrap_or(config.data_file);
    let store = FileStore::open(&data_file).await?;

    match cli.command {
        Commands::Services { action } => match action {
            ServicesAction::List { category } => {
                commands::catalog::list(&store, category.as_deref()).await?;
            }
            ServicesAction::Categories => commands::catalog::categories(&store).await?,
            ServicesAction::Targets => commands::catalog::targets(&store).await?,
            ServicesAction::Show { id } => commands::catalog::show(&store, &id).await?,
        },
        Commands::Quote {
            service_id,
            quantity,
            device,
            target,
        } => {
            commands::catalog::quote(&store, service_id, quantity, device, target).await?;
        }
        Commands::Account { action } => match action {
            AccountAction::SignIn { provider } => {
                commands::account::sign_in(&store, &provider).await?;
            }
            AccountAction::SignOut => commands::account::sign_out(&store).await?,
            AccountAction::Show => commands::account::show(&store).await?,
        },
        Commands::Order { action } => match action {
            OrderAction::Place {
                service_id,
                quantity,
                link,
                device,
                target,
            } => {
                let request = boostmart_storefront::services::OrderRequest {
                    service_id,
                    quantity,
                    device_type: device,
                    target_option: target,
                    link,
                };
                commands::orders::place(&store, request).await?;
            }
            OrderAction::List => commands::orders::list(&store).await?,
            OrderAction::Cancel { id } => commands::orders::cancel(&store, &id).await?,
        },
        Commands::Deposit { action } => match action {
            DepositAction::Create {
                method,
                amount,
                transaction_id,
                screenshot,
                notes,
            } => {
                let request = boostmart_storefront::services::DepositRequest {
                    method,
                    amount,
                    transaction_id,
                    screenshot,
                    notes,
                };
                commands::deposits::create(&store, request).await?;
            }
            DepositAction::List => commands::deposits::list(&store).await?,
        },
        Commands::Admin { action } => {
            let admin_config = AdminConfig::from_env()?;
            run_admin(&store, &admin_config, action).await?;
        }
        Commands::Seed { target } => match target {
            SeedTarget::Services { file } => commands::seed::services(&store, &file).await?,
        },
    }
    Ok(())
}

async fn run_admin(
    store: &FileStore,
    config: &AdminConfig,
    action: AdminAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AdminAction::Login { username, password } => {
            commands::admin::login(store, config, &username, &password).await?;
        }
        AdminAction::Logout => commands::admin::logout(store, config).await?,
        AdminAction::Orders => commands::admin::orders(store, config).await?,
        AdminAction::OrderStatus { id, status } => {
            commands::admin::order_status(store, config, &id, status).await?;
        }
        AdminAction::Payments => commands::admin::payments(store, config).await?,
        AdminAction::PaymentStatus { id, status } => {
            commands::admin::payment_status(store, config, &id, status).await?;
        }
        AdminAction::Logs => commands::admin::logs(store, config).await?,
        AdminAction::Undo { log_id } => commands::admin::undo(store, config, &log_id).await?,
        AdminAction::Services => commands::admin::services(store, config).await?,
        AdminAction::ServiceCreate { file } => {
            let service = commands::seed::read_service(&file).await?;
            commands::admin::service_create(store, config, service).await?;
        }
        AdminAction::ServiceUpdate { file } => {
            let service = commands::seed::read_service(&file).await?;
            commands::admin::service_update(store, config, service).await?;
        }
        AdminAction::ServiceDelete { id } => {
            commands::admin::service_delete(store, config, &id).await?;
        }
    }
    Ok(())
}

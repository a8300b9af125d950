#![forbid(unsafe_code)]

//! `pos-console` — point-of-sale management client.
//!
//! Restores the stored session, guards the requested view, then runs one
//! management or order command against the backend and prints the result
//! as JSON.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use pos_console::api::http::HttpApi;
use pos_console::api::PosApi;
use pos_console::auth;
use pos_console::config::ClientConfig;
use pos_console::management::Management;
use pos_console::mode::StoreBackend;
use pos_console::models::catalog::{CategoryForm, ItemForm, StockForm};
use pos_console::models::order::ItemId;
use pos_console::models::session::SessionStatus;
use pos_console::orders::{parse_line, EmptyOrderPolicy, OrderComposer};
use pos_console::session::guard::{GuardDecision, Route};
use pos_console::session::SessionManager;
use pos_console::{AppError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "pos-console", about = "Point-of-sale management client", version, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Override the configured credential store backend.
    #[arg(long, value_enum)]
    store: Option<StoreBackend>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and remember the credential.
    Login {
        /// Account name.
        #[arg(long)]
        username: String,
        /// Account password.
        #[arg(long, env = "POS_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored credential.
    Logout,

    /// Show whether a session is active.
    Status,

    /// Manage categories.
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Manage items.
    Items {
        #[command(subcommand)]
        action: ItemAction,
    },

    /// Manage stock records.
    Stocks {
        #[command(subcommand)]
        action: StockAction,
    },

    /// Show the items that can be ordered.
    Catalog,

    /// List or place orders.
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Debug, Subcommand)]
enum CategoryAction {
    /// List categories.
    List,
    /// Create a category.
    Add {
        /// Category name.
        #[arg(long)]
        name: String,
    },
    /// Rename a category.
    Update {
        /// Category ID.
        id: i64,
        /// New name.
        #[arg(long)]
        name: String,
    },
    /// Delete a category.
    Delete {
        /// Category ID.
        id: i64,
    },
}

#[derive(Debug, clap::Args)]
struct ItemFields {
    /// Item name.
    #[arg(long)]
    name: String,
    /// Unit price.
    #[arg(long)]
    price: f64,
    /// Quantity.
    #[arg(long, default_value_t = 0)]
    quantity: i64,
    /// Category ID.
    #[arg(long)]
    category: i64,
}

impl From<ItemFields> for ItemForm {
    fn from(fields: ItemFields) -> Self {
        Self {
            name: fields.name,
            price: fields.price,
            quantity: fields.quantity,
            category_id: fields.category,
        }
    }
}

#[derive(Debug, Subcommand)]
enum ItemAction {
    /// List items.
    List,
    /// Create an item.
    Add {
        #[command(flatten)]
        fields: ItemFields,
    },
    /// Update an item.
    Update {
        /// Item ID.
        id: i64,
        #[command(flatten)]
        fields: ItemFields,
    },
    /// Delete an item.
    Delete {
        /// Item ID.
        id: i64,
    },
}

#[derive(Debug, clap::Args)]
struct StockFields {
    /// Item ID the stock belongs to.
    #[arg(long)]
    item: i64,
    /// Units on hand.
    #[arg(long)]
    quantity: i64,
}

impl From<StockFields> for StockForm {
    fn from(fields: StockFields) -> Self {
        Self {
            quantity: fields.quantity,
            item_id: fields.item,
        }
    }
}

#[derive(Debug, Subcommand)]
enum StockAction {
    /// List stock records.
    List,
    /// Create a stock record.
    Add {
        #[command(flatten)]
        fields: StockFields,
    },
    /// Update a stock record.
    Update {
        /// Stock record ID.
        id: i64,
        #[command(flatten)]
        fields: StockFields,
    },
    /// Delete a stock record.
    Delete {
        /// Stock record ID.
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum OrderAction {
    /// List accepted orders.
    List,
    /// Place an order.
    Place {
        /// Order line as ITEM=QUANTITY; repeat for more lines.
        #[arg(long = "line", value_parser = parse_line, required = true)]
        lines: Vec<(ItemId, i64)>,
    },
}

impl Command {
    /// View whose guard decides whether the command may run.
    fn route(&self) -> Route {
        match self {
            Self::Login { .. } | Self::Logout | Self::Status => Route::Login,
            Self::Categories { .. } => Route::Categories,
            Self::Items { .. } => Route::Items,
            Self::Stocks { .. } => Route::Stocks,
            Self::Catalog | Self::Orders { .. } => Route::Orders,
        }
    }
}

fn main() -> ExitCode {
    let args = Cli::parse();
    if let Err(err) = init_tracing(args.log_format) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    let outcome = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))
        .and_then(|runtime| runtime.block_on(run(args)));

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Result<()> {
    // ── Load configuration ──────────────────────────────
    let mut config = match &args.config {
        Some(path) => ClientConfig::load_from_path(path)?,
        None => ClientConfig::default(),
    };
    config.apply_env_overrides()?;
    if let Some(backend) = args.store {
        config.credential_store.backend = backend;
    }
    debug!(api = %config.api_base_url, "configuration loaded");

    // ── Restore session before any view is guarded ──────
    let session = Arc::new(SessionManager::new(config.credential_store()?));
    session.restore().await;

    let route = args.command.route();
    match session.guard(route) {
        GuardDecision::Render(_) => {}
        GuardDecision::Redirect(to) => {
            return Err(AppError::AuthorizationMissing(format!(
                "{route} requires a session; log in first ({to})"
            )));
        }
        GuardDecision::Placeholder => {
            return Err(AppError::AuthorizationMissing(
                "session is still being restored".into(),
            ));
        }
    }

    let api: Arc<dyn PosApi> = Arc::new(HttpApi::from_config(&config)?);

    match args.command {
        Command::Login { username, password } => {
            auth::sign_in(api.as_ref(), &session, &username, &password).await?;
            print_json(&SessionStatus::from(&session.snapshot()))
        }
        Command::Logout => {
            auth::sign_out(&session).await;
            print_json(&SessionStatus::from(&session.snapshot()))
        }
        Command::Status => {
            let snapshot = session.ready().await;
            print_json(&StatusReport {
                session: SessionStatus::from(&snapshot),
                api_base_url: config.api_base_url.clone(),
                home: session.guard(Route::Home),
            })
        }
        Command::Categories { action } => {
            let manage = Management::new(api, session);
            let listing = match action {
                CategoryAction::List => manage.categories().await?,
                CategoryAction::Add { name } => {
                    manage.save_category(None, &CategoryForm { name }).await?
                }
                CategoryAction::Update { id, name } => {
                    manage.save_category(Some(id), &CategoryForm { name }).await?
                }
                CategoryAction::Delete { id } => manage.delete_category(id).await?,
            };
            print_json(&listing)
        }
        Command::Items { action } => {
            let manage = Management::new(api, session);
            let listing = match action {
                ItemAction::List => manage.items().await?,
                ItemAction::Add { fields } => manage.save_item(None, &fields.into()).await?,
                ItemAction::Update { id, fields } => {
                    manage.save_item(Some(id), &fields.into()).await?
                }
                ItemAction::Delete { id } => manage.delete_item(id).await?,
            };
            print_json(&listing)
        }
        Command::Stocks { action } => {
            let manage = Management::new(api, session);
            let listing = match action {
                StockAction::List => manage.stocks().await?,
                StockAction::Add { fields } => manage.save_stock(None, &fields.into()).await?,
                StockAction::Update { id, fields } => {
                    manage.save_stock(Some(id), &fields.into()).await?
                }
                StockAction::Delete { id } => manage.delete_stock(id).await?,
            };
            print_json(&listing)
        }
        Command::Catalog => {
            let composer = OrderComposer::new(api, session);
            print_json(&composer.refresh_catalog().await?)
        }
        Command::Orders { action } => {
            let policy = if config.reject_empty_orders() {
                EmptyOrderPolicy::Reject
            } else {
                EmptyOrderPolicy::Forward
            };
            let composer = OrderComposer::new(api, session).with_empty_policy(policy);
            match action {
                OrderAction::List => print_json(&composer.refresh_orders().await?),
                OrderAction::Place { lines } => {
                    composer.set_quantities(lines).await;
                    let receipt = composer.submit().await?;
                    info!(lines = receipt.lines, "order placed");
                    print_json(&PlaceReport {
                        receipt,
                        orders: composer.orders().await,
                    })
                }
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct StatusReport {
    session: SessionStatus,
    api_base_url: String,
    home: GuardDecision,
}

#[derive(Debug, Serialize)]
struct PlaceReport {
    receipt: pos_console::orders::SubmitReceipt,
    orders: Vec<pos_console::models::order::Order>,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = fmt().with_env_filter(env_filter).with_writer(std::io::stderr);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}

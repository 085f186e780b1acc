//! `stokio`: command-line client for the Stokio inventory API.
//!
//! The session (bearer token + identity) is kept in a JSON file managed by
//! the same `SessionStore` the browser client uses, so `login`, `logout` and
//! forced logout on 401 behave identically.

mod error;
mod file_storage;
mod remote;


use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args, Parser, Subcommand};
use reqwest::Method;
use serde_json::{Map, Value, json};
use session::{DemoAuthenticator, GuardDecision, Role, SessionStore};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::file_storage::{FileStorage, default_session_file};
use crate::remote::{Call, Remote};

#[derive(Parser, Debug)]
#[command(name = "stokio", about = "Stokio inventory API CLI")]
struct Cli {
    #[arg(long, env = "STOKIO_API_URL", default_value = "http://localhost:8080/api")]
    base_url: String,

    /// Session file; defaults to `~/.stokio/session.json`.
    #[arg(long, env = "STOKIO_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and save the session.
    Login(LoginArgs),
    /// Forget the saved session.
    Logout,
    /// Print the signed-in identity.
    Whoami,
    /// Edit the saved identity's profile.
    Profile {
        #[arg(long)]
        name: String,
    },
    Api(ApiCommand),
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long)]
    email: String,

    #[arg(long, env = "STOKIO_PASSWORD", hide_env_values = true)]
    password: String,

    /// Accept any credentials offline with a fabricated admin identity.
    /// Takes the same `1/0`, `yes/no`, `on/off` values as the web client.
    #[arg(
        long,
        env = "STOKIO_DEMO_AUTH",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
    )]
    demo_auth: bool,
}

#[derive(Args, Debug)]
struct ApiCommand {
    #[command(subcommand)]
    command: ApiSubcommand,
}

#[derive(Subcommand, Debug)]
enum ApiSubcommand {
    #[command(subcommand)]
    Product(ProductSubcommand),
    #[command(subcommand)]
    Category(CategorySubcommand),
    #[command(subcommand)]
    Sale(SaleSubcommand),
    #[command(subcommand)]
    User(UserSubcommand),
}

#[derive(Subcommand, Debug)]
enum ProductSubcommand {
    List,
    Get {
        id: String,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: String,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum CategorySubcommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum SaleSubcommand {
    List {
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
    },
    Record {
        #[arg(long)]
        product_id: String,
        #[arg(long)]
        quantity: u32,
    },
    Analytics {
        #[arg(long)]
        period: Option<String>,
    },
    Discard {
        #[arg(long)]
        product_id: String,
        #[arg(long)]
        quantity: u32,
        #[arg(long)]
        reason: String,
    },
}

#[derive(Subcommand, Debug)]
enum UserSubcommand {
    List,
    Access {
        id: String,
        /// One of ADMIN, MANAGER, EMPLOYEE, DISABLED.
        #[arg(long, value_parser = parse_role)]
        role: Role,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let path = cli.session_file.unwrap_or_else(default_session_file);
    let mut store = SessionStore::new(FileStorage::new(path));
    let rehydration = store.initialize();
    tracing::debug!(path = %store.storage().path().display(), ?rehydration, "session file loaded");
    let remote = Remote::new(cli.base_url);

    match cli.command {
        Command::Login(args) => run_login(&remote, &mut store, args).await,
        Command::Logout => {
            store.logout();
            println!("logged out");
            Ok(())
        }
        Command::Whoami => run_whoami(&store),
        Command::Profile { name } => run_profile(&mut store, name),
        Command::Api(api) => {
            require_session(&store)?;
            let call = plan(api.command)?;
            let json = remote.send(&mut store, call).await?;
            print_json(&json)
        }
    }
}

async fn run_login(remote: &Remote, store: &mut SessionStore<FileStorage>, args: LoginArgs) -> Result<(), CliError> {
    let outcome = if args.demo_auth {
        store.login(&DemoAuthenticator, &args.email, &args.password).await
    } else {
        store.login(&remote.authenticator(), &args.email, &args.password).await
    };
    if !outcome.success {
        return Err(CliError::Login(outcome.message.unwrap_or_default()));
    }
    eprintln!("Login successful!");
    run_whoami(store)
}

fn run_whoami(store: &SessionStore<FileStorage>) -> Result<(), CliError> {
    let identity = store.identity().ok_or(CliError::NotLoggedIn)?;
    print_json(&serde_json::to_value(identity)?)
}

fn run_profile(store: &mut SessionStore<FileStorage>, name: String) -> Result<(), CliError> {
    let mut identity = store.identity().cloned().ok_or(CliError::NotLoggedIn)?;
    identity.display_name = name;
    store.update_identity(identity)?;
    run_whoami(store)
}

/// Same gate the browser route guard applies to protected views.
fn require_session(store: &SessionStore<FileStorage>) -> Result<(), CliError> {
    match store.decision() {
        GuardDecision::Render => Ok(()),
        GuardDecision::Loading | GuardDecision::Redirect { .. } => Err(CliError::NotLoggedIn),
    }
}

/// Resolve an API subcommand to the REST call it makes.
fn plan(command: ApiSubcommand) -> Result<Call, CliError> {
    let call = match command {
        ApiSubcommand::Product(product) => match product {
            ProductSubcommand::List => Call::new(Method::GET, "/products"),
            ProductSubcommand::Get { id } => Call::new(Method::GET, format!("/products/{id}")),
            ProductSubcommand::Create { data } => Call::new(Method::POST, "/products").with_body(parse_object(&data)?),
            ProductSubcommand::Update { id, data } => {
                Call::new(Method::PUT, format!("/products/{id}")).with_body(parse_object(&data)?)
            }
            ProductSubcommand::Delete { id } => Call::new(Method::DELETE, format!("/products/{id}")),
        },
        ApiSubcommand::Category(category) => match category {
            CategorySubcommand::List => Call::new(Method::GET, "/categories"),
            CategorySubcommand::Create { name, description } => {
                Call::new(Method::POST, "/categories").with_body(category_body(Some(name), description))
            }
            CategorySubcommand::Update { id, name, description } => {
                Call::new(Method::PUT, format!("/categories/{id}")).with_body(category_body(name, description))
            }
            CategorySubcommand::Delete { id } => Call::new(Method::DELETE, format!("/categories/{id}")),
        },
        ApiSubcommand::Sale(sale) => match sale {
            SaleSubcommand::List { start_date, end_date } => Call::new(Method::GET, "/sales")
                .with_param("startDate", start_date)
                .with_param("endDate", end_date),
            SaleSubcommand::Record { product_id, quantity } => Call::new(Method::POST, "/sales")
                .with_body(json!({ "productId": product_id, "quantity": quantity })),
            SaleSubcommand::Analytics { period } => {
                Call::new(Method::GET, "/sales/analytics").with_param("period", period)
            }
            SaleSubcommand::Discard {
                product_id,
                quantity,
                reason,
            } => Call::new(Method::POST, "/sales/discard")
                .with_body(json!({ "productId": product_id, "quantity": quantity, "reason": reason })),
        },
        ApiSubcommand::User(user) => match user {
            UserSubcommand::List => Call::new(Method::GET, "/users"),
            UserSubcommand::Access { id, role } => {
                Call::new(Method::PUT, format!("/users/{id}/access")).with_body(json!({ "role": role }))
            }
        },
    };
    Ok(call)
}

/// Case-insensitive role name, validated against the wire names.
fn parse_role(raw: &str) -> Result<Role, String> {
    serde_json::from_value(Value::String(raw.trim().to_ascii_uppercase()))
        .map_err(|_| format!("unknown role `{raw}`; expected ADMIN, MANAGER, EMPLOYEE or DISABLED"))
}

fn category_body(name: Option<String>, description: Option<String>) -> Value {
    let mut body = Map::new();
    if let Some(name) = name {
        body.insert("name".to_owned(), Value::String(name));
    }
    if let Some(description) = description {
        body.insert("description".to_owned(), Value::String(description));
    }
    Value::Object(body)
}

/// Parse a `--data` argument, which must be a JSON object.
fn parse_object(data: &str) -> Result<Value, CliError> {
    let value = serde_json::from_str::<Value>(data)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(CliError::InvalidArgument("--data must be a JSON object"))
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

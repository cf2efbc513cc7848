use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use routeplanner::guard::GuardDecision;
use routeplanner::net::types::{CityInput, CityRole, NewUser, RouteId};
use routeplanner::services::{ai, auth, cities, routes, users};
use routeplanner::{ApiClient, ApiConfig, ApiError, NavigationGuard, Session};
use serde::Serialize;
use tracing_subscriber::EnvFilter;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("nothing to update; pass --name, --state or --role")]
    EmptyUpdate,
}

#[derive(Parser, Debug)]
#[command(name = "routeplanner", about = "Route planner API client")]
struct Cli {
    #[arg(long, env = "ROUTEPLANNER_API_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "ROUTEPLANNER_SESSION_FILE")]
    session_file: Option<PathBuf>,

    /// Log requests to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    client: ApiClient,
    session: Session,
    guard: NavigationGuard,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the access token.
    ///
    /// Without `--email`, an existing session is reused. With it, the stored
    /// token is replaced.
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long, env = "ROUTEPLANNER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Login page path the sign-in started from, e.g. `/?redirect=%2Fhome`.
        #[arg(long, default_value = "/")]
        from: String,
    },
    /// Create an account.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ROUTEPLANNER_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Forget the stored access token.
    Logout,
    /// Show the signed-in user.
    Me,
    Cities(CityCommand),
    Routes(RouteCommand),
    /// Ask the AI assistant to plan routes.
    Chat { message: String },
    /// Show where the navigation guard sends a path.
    Nav { path: String },
}

#[derive(Args, Debug)]
struct CityCommand {
    #[command(subcommand)]
    command: CitySubcommand,
}

#[derive(Subcommand, Debug)]
enum CitySubcommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        state: String,
        #[arg(long, default_value = "intermediate")]
        role: CityRole,
    },
    Update {
        city_id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        role: Option<CityRole>,
    },
    Delete {
        city_id: i64,
    },
}

#[derive(Args, Debug)]
struct RouteCommand {
    #[command(subcommand)]
    command: RouteSubcommand,
}

#[derive(Subcommand, Debug)]
enum RouteSubcommand {
    List,
    Get {
        route_id: RouteId,
    },
    Csv {
        route_id: RouteId,
        #[arg(long, help = "Output file path, or - for stdout")]
        out: Option<PathBuf>,
    },
    Delete {
        #[arg(required = true)]
        route_ids: Vec<RouteId>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = match build_context(cli.base_url.as_deref(), cli.session_file) {
        Ok(ctx) => ctx,
        Err(e) => return report(&e),
    };

    match run(&ctx, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "routeplanner=debug,warn" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_context(base_url: Option<&str>, session_file: Option<PathBuf>) -> Result<CliContext, CliError> {
    let mut config = ApiConfig::from_env();
    if let Some(base_url) = base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(path) = session_file {
        config = config.with_session_file(path);
    }
    tracing::debug!(base_url = %config.base_url, session_file = %config.session_file.display(), "config loaded");

    Ok(CliContext {
        client: ApiClient::new(&config)?,
        session: Session::file(config.session_file),
        guard: NavigationGuard::default(),
    })
}

fn report(error: &CliError) -> ExitCode {
    eprintln!("{}", render_error(error));
    ExitCode::FAILURE
}

fn render_error(error: &CliError) -> String {
    match error {
        CliError::Api(api) => match api.status() {
            Some(status) => format!("error: {} [{} {status}]", api.message(), api.error_code()),
            None => format!("error: {} [{}]", api.message(), api.error_code()),
        },
        other => format!("error: {other}"),
    }
}

async fn run(cli: &CliContext, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { email, password, from } => {
            run_login(cli, email.as_deref(), password.as_deref(), &from).await
        }
        Command::Register { email, password, name } => {
            let user = auth::register(&cli.client, &NewUser { email, password, full_name: name }).await?;
            print_json(&user)
        }
        Command::Logout => {
            auth::logout(&cli.session)?;
            println!("signed out");
            Ok(())
        }
        Command::Me => print_json(&users::current_user(&cli.client, &cli.session).await?),
        Command::Cities(cmd) => run_cities(cli, cmd).await,
        Command::Routes(cmd) => run_routes(cli, cmd).await,
        Command::Chat { message } => print_json(&ai::chat(&cli.client, &cli.session, &message).await?),
        Command::Nav { path } => {
            println!("{}", describe_decision(&cli.guard.check(&path, &cli.session), &path));
            Ok(())
        }
    }
}

async fn run_login(cli: &CliContext, email: Option<&str>, password: Option<&str>, from: &str) -> Result<(), CliError> {
    if let Some(to) = signed_in_target(cli, email, from) {
        println!("already signed in; continue at {to} (pass --email to switch accounts)");
        return Ok(());
    }
    let token = auth::login(&cli.client, email.unwrap_or_default(), password.unwrap_or_default()).await?;
    cli.session.set_token(&token)?;
    println!("signed in; continue at {}", cli.guard.post_login_target(from));
    Ok(())
}

/// Where an already signed-in user goes instead of logging in again.
///
/// Explicit credentials always log in, so switching accounts needs no logout.
fn signed_in_target(cli: &CliContext, email: Option<&str>, from: &str) -> Option<String> {
    if email.is_some() || !cli.session.is_authenticated() {
        return None;
    }
    match cli.guard.check(from, &cli.session) {
        GuardDecision::Redirect(to) => Some(to),
        GuardDecision::Proceed => None,
    }
}

async fn run_cities(cli: &CliContext, cmd: CityCommand) -> Result<(), CliError> {
    match cmd.command {
        CitySubcommand::List => print_json(&cities::list(&cli.client, &cli.session).await?),
        CitySubcommand::Create { name, state, role } => {
            let input = CityInput { name: Some(name), state: Some(state), role: Some(role) };
            print_json(&cities::create(&cli.client, &cli.session, &input).await?)
        }
        CitySubcommand::Update { city_id, name, state, role } => {
            let input = CityInput { name, state, role };
            if input == CityInput::default() {
                return Err(CliError::EmptyUpdate);
            }
            print_json(&cities::update(&cli.client, &cli.session, city_id, &input).await?)
        }
        CitySubcommand::Delete { city_id } => {
            cities::delete(&cli.client, &cli.session, city_id).await?;
            println!("deleted city {city_id}");
            Ok(())
        }
    }
}

async fn run_routes(cli: &CliContext, cmd: RouteCommand) -> Result<(), CliError> {
    match cmd.command {
        RouteSubcommand::List => print_json(&routes::list(&cli.client, &cli.session).await?),
        RouteSubcommand::Get { route_id } => print_json(&routes::get(&cli.client, &cli.session, route_id).await?),
        RouteSubcommand::Csv { route_id, out } => {
            let export = routes::csv(&cli.client, &cli.session, route_id).await?;
            let path = csv_output_path(out, export.filename.as_deref(), route_id);
            write_output(&path, &export.bytes)
        }
        RouteSubcommand::Delete { route_ids } => {
            routes::delete_many(&cli.client, &cli.session, &route_ids).await?;
            println!("deleted {} route(s)", route_ids.len());
            Ok(())
        }
    }
}

fn describe_decision(decision: &GuardDecision, path: &str) -> String {
    match decision {
        GuardDecision::Proceed => format!("proceed {path}"),
        GuardDecision::Redirect(to) => format!("redirect {to}"),
    }
}

/// Explicit `--out` wins, then the server's filename, then `route_<id>.csv`.
fn csv_output_path(out: Option<PathBuf>, server_name: Option<&str>, route_id: RouteId) -> PathBuf {
    if let Some(out) = out {
        return out;
    }
    server_name
        .and_then(|name| Path::new(name).file_name())
        .map_or_else(|| PathBuf::from(format!("route_{route_id}.csv")), PathBuf::from)
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    if path == Path::new("-") {
        use std::io::Write;
        return std::io::stdout()
            .write_all(bytes)
            .map_err(|source| CliError::Write { path: path.to_owned(), source });
    }
    std::fs::write(path, bytes).map_err(|source| CliError::Write { path: path.to_owned(), source })?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

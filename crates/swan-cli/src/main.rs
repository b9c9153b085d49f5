use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use std::process::ExitCode;
use std::time::Duration;
use swan_cp::{CpClient, SwanConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "swan-cli")]
#[command(about = "Query the SWAN Computing Provider API")]
struct Cli {
    /// Base URL of the API. Defaults to $SWAN_API.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the hardware of every computing provider machine.
    Machines,
    /// List computing providers serving a region.
    Providers(ProvidersArgs),
    /// Show one computing provider with the HTTP status it was served with.
    Detail(DetailArgs),
}

#[derive(clap::Args, Debug)]
struct ProvidersArgs {
    #[arg(long)]
    region: String,
}

#[derive(clap::Args, Debug)]
struct DetailArgs {
    cp_id: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let result = match build_client(cli.api_url.as_deref(), cli.timeout_secs) {
        Ok(client) => match cli.command {
            Commands::Machines => machines_command(&client).await,
            Commands::Providers(args) => providers_command(&client, args).await,
            Commands::Detail(args) => detail_command(&client, args).await,
        },
        Err(error) => Err(error),
    };

    match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("swan=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_client(
    api_url: Option<&str>,
    timeout_secs: Option<u64>,
) -> Result<CpClient<swan_cp::ReqwestTransport>, String> {
    let mut config = match api_url {
        Some(url) => SwanConfig::new(url),
        None => SwanConfig::from_env(),
    }
    .map_err(|error| error.to_string())?;
    if let Some(secs) = timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    tracing::debug!(api_base_url = %config.api_base_url, "using swan api");
    CpClient::from_config(config).map_err(|error| error.to_string())
}

async fn machines_command(client: &CpClient<swan_cp::ReqwestTransport>) -> Result<ExitCode, String> {
    let machines = client
        .get_all_cp_machines()
        .await
        .map_err(|error| error.to_string())?;
    print_json(&Value::Array(machines.into_iter().map(Value::Object).collect()))?;
    Ok(ExitCode::SUCCESS)
}

async fn providers_command(
    client: &CpClient<swan_cp::ReqwestTransport>,
    args: ProvidersArgs,
) -> Result<ExitCode, String> {
    let providers = client
        .get_computing_providers_list(args.region.as_str())
        .await
        .map_err(|error| error.to_string())?;
    print_json(&Value::Array(providers.into_iter().map(Value::Object).collect()))?;
    Ok(ExitCode::SUCCESS)
}

async fn detail_command(
    client: &CpClient<swan_cp::ReqwestTransport>,
    args: DetailArgs,
) -> Result<ExitCode, String> {
    let (body, status) = client
        .get_cp_detail(&args.cp_id)
        .await
        .map_err(|error| error.to_string())?;
    print_json(&json!({ "status": status, "body": body }))?;
    Ok(exit_code_for_status(status))
}

fn print_json(value: &Value) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|error| error.to_string())?;
    println!("{text}");
    Ok(())
}

fn exit_code_for_status(status: u16) -> ExitCode {
    if (200..300).contains(&status) {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}

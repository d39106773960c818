//! Symptom Triage CLI
//!
//! # Commands
//!
//! - `api`: REST endpoint (`POST /predict`)
//! - `ui`: form UI calling the model in-process
//! - `proxy-ui`: form UI calling the REST endpoint
//! - `predict`: one prediction, printed as JSON
//!
//! Every command loads its inputs once at startup and exits with code 1
//! if they cannot be loaded.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use symptom_triage::config::{self, ReferencePaths};
use symptom_triage::context::AppContext;
use symptom_triage::prediction::SymptomSet;
use symptom_triage::reference::SymptomVocabulary;
use symptom_triage::server::{start_server, ServerHandle};
use symptom_triage::ui::PredictClient;
use symptom_triage::{api, ui};

/// Symptom-to-disease prediction service
#[derive(Parser)]
#[command(name = "symptom-triage")]
#[command(version)]
#[command(about = "Predict a disease from symptoms via REST or a form UI")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the REST API
    Api {
        #[command(flatten)]
        data: DataArgs,
        #[command(flatten)]
        listen: ListenArgs,
    },
    /// Serve the form UI backed by the in-process model
    Ui {
        #[command(flatten)]
        data: DataArgs,
        #[command(flatten)]
        listen: ListenArgs,
    },
    /// Serve the form UI backed by the REST API
    ProxyUi {
        /// Symptom list file
        #[arg(long, default_value = config::SYMPTOMS_FILE)]
        symptoms: PathBuf,
        /// Base URL of the REST API
        #[arg(long, default_value = config::DEFAULT_API_URL)]
        api_url: String,
        #[command(flatten)]
        listen: ListenArgs,
    },
    /// Run one prediction and print the result as JSON
    Predict {
        #[command(flatten)]
        data: DataArgs,
        /// Symptom names, e.g. `itching skin_rash`
        #[arg(required = true)]
        symptoms: Vec<String>,
    },
}

#[derive(Args)]
struct DataArgs {
    /// Directory holding the reference tables and the model
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,
    /// Override the symptom list file
    #[arg(long)]
    symptoms_file: Option<PathBuf>,
    /// Override the description table
    #[arg(long)]
    descriptions: Option<PathBuf>,
    /// Override the precaution table
    #[arg(long)]
    precautions: Option<PathBuf>,
    /// Override the model artifact (.json, or .onnx with the onnx-classifier feature)
    #[arg(long)]
    model: Option<PathBuf>,
}

impl DataArgs {
    fn paths(self) -> ReferencePaths {
        let defaults = ReferencePaths::in_dir(&self.data_dir);
        ReferencePaths {
            symptoms: self.symptoms_file.unwrap_or(defaults.symptoms),
            descriptions: self.descriptions.unwrap_or(defaults.descriptions),
            precautions: self.precautions.unwrap_or(defaults.precautions),
            model: self.model.unwrap_or(defaults.model),
        }
    }
}

#[derive(Args)]
struct ListenArgs {
    /// Address to bind
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    host: IpAddr,
    /// Port to bind (defaults depend on the command)
    #[arg(long)]
    port: Option<u16>,
}

impl ListenArgs {
    fn addr(&self, default_port: u16) -> SocketAddr {
        SocketAddr::new(self.host, self.port.unwrap_or(default_port))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    symptom_triage::init_tracing(cli.verbose);

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let result = match cli.command {
        Commands::Api { data, listen } => serve_api(data, listen).await,
        Commands::Ui { data, listen } => serve_ui(data, listen).await,
        Commands::ProxyUi {
            symptoms,
            api_url,
            listen,
        } => serve_proxy_ui(symptoms, api_url, listen).await,
        Commands::Predict { data, symptoms } => predict_once(data, symptoms),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            tracing::error!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn load_context(data: DataArgs) -> Result<Arc<AppContext>, String> {
    AppContext::load(&data.paths())
        .map(Arc::new)
        .map_err(|e| format!("Refusing to start: {e}"))
}

async fn serve_api(data: DataArgs, listen: ListenArgs) -> Result<(), String> {
    let app = load_context(data)?;
    let server = api::start_api_server(app, listen.addr(config::DEFAULT_API_PORT)).await?;
    run_until_ctrl_c(server).await
}

async fn serve_ui(data: DataArgs, listen: ListenArgs) -> Result<(), String> {
    let app = load_context(data)?;
    let router = ui::direct_ui_router(app);
    let server = start_server("ui", router, listen.addr(config::DEFAULT_UI_PORT)).await?;
    run_until_ctrl_c(server).await
}

async fn serve_proxy_ui(
    symptoms: PathBuf,
    api_url: String,
    listen: ListenArgs,
) -> Result<(), String> {
    let vocabulary =
        SymptomVocabulary::load(&symptoms).map_err(|e| format!("Refusing to start: {e}"))?;
    let client = PredictClient::new(&api_url);
    tracing::info!(api = client.base_url(), "Proxy UI forwarding predictions");

    let router = ui::proxy_ui_router(Arc::new(vocabulary), client);
    let server = start_server(
        "proxy-ui",
        router,
        listen.addr(config::DEFAULT_PROXY_UI_PORT),
    )
    .await?;
    run_until_ctrl_c(server).await
}

fn predict_once(data: DataArgs, symptoms: Vec<String>) -> Result<(), String> {
    let app = load_context(data)?;
    let selected: SymptomSet = symptoms.into_iter().collect();

    let result = app
        .service()
        .predict(&selected)
        .map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&result).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

async fn run_until_ctrl_c(server: ServerHandle) -> Result<(), String> {
    tracing::info!(
        server = %server.session.name,
        url = %server.session.base_url(),
        "Listening"
    );

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("Cannot listen for shutdown signal: {e}"))?;

    server.stop().await;
    Ok(())
}

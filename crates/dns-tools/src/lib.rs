// # dns-tools
//
// Thin integration layer shared by the `azure-zone-download` and
// `azure-zone-upload` binaries:
//
// 1. Parsing command-line flags (clap)
// 2. Resolving Azure credentials (environment, flags, secret prompt)
// 3. Initializing logging and the runtime
// 4. Calling the dns-tools-core pipelines and printing the report
//
// No zone logic lives here; it belongs in dns-tools-core.
//
// ## Configuration
//
// - `AZURE_SUBSCRIPTION_ID`, `AZURE_CLIENT_ID`, `AZURE_TENANT_ID`: override
//   the matching flags
// - `AZURE_CLIENT_SECRET`: prompted for when unset
// - `AZURE_AUTHORITY_HOST`, `AZURE_RESOURCE_MANAGER_URL`: endpoint overrides
// - `DNS_TOOLS_LOG_LEVEL`: trace, debug, info, warn (default) or error

pub mod usage;

use anyhow::Result;
use clap::Args;
use std::future::Future;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use dns_tools_core::{AzureCredentials, CredentialArgs, Style, ZoneTarget, csv};
use dns_tools_provider_azure::AzureDnsProvider;

/// Environment variable selecting the log level
pub const ENV_LOG_LEVEL: &str = "DNS_TOOLS_LOG_LEVEL";

/// Exit codes of the sync tools
///
/// Per-item upload errors are reported but still exit with `Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolExitCode {
    /// Run completed (possibly with warnings or per-item errors)
    Success = 0,
    /// Missing credential, unreachable zone, bad CSV, I/O or auth failure
    Failure = 1,
}

impl From<ToolExitCode> for ExitCode {
    fn from(code: ToolExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Flags shared by both sync tools
#[derive(Debug, Clone, Args)]
pub struct ZoneArgs {
    /// Azure tenant ID (AZURE_TENANT_ID takes precedence)
    #[arg(long)]
    pub tenant_id: Option<String>,

    /// Azure subscription ID (AZURE_SUBSCRIPTION_ID takes precedence)
    #[arg(long)]
    pub subscription_id: Option<String>,

    /// Resource group containing the DNS zone
    #[arg(long)]
    pub resource_group: String,

    /// Service principal client ID (AZURE_CLIENT_ID takes precedence)
    #[arg(long)]
    pub client_id: Option<String>,

    /// DNS zone name
    #[arg(long)]
    pub zone: String,

    /// CSV file to write (download) or read (upload)
    #[arg(long)]
    pub csv_file: PathBuf,
}

impl ZoneArgs {
    pub fn credential_args(&self) -> CredentialArgs {
        CredentialArgs {
            tenant_id: self.tenant_id.clone(),
            subscription_id: self.subscription_id.clone(),
            client_id: self.client_id.clone(),
        }
    }

    pub fn target(&self) -> Result<ZoneTarget> {
        Ok(ZoneTarget::new(
            self.resource_group.clone(),
            &self.zone,
            self.csv_file.clone(),
        )?)
    }
}

/// Map a `DNS_TOOLS_LOG_LEVEL` value to a tracing level
pub fn parse_log_level(value: Option<&str>) -> Level {
    match value.map(|v| v.to_lowercase()).as_deref() {
        Some("trace") => Level::TRACE,
        Some("debug") => Level::DEBUG,
        Some("info") => Level::INFO,
        Some("error") => Level::ERROR,
        _ => Level::WARN,
    }
}

/// Install the global subscriber; logs go to stderr so stdout only
/// carries the report
pub fn init_tracing() -> Result<()> {
    let level = parse_log_level(std::env::var(ENV_LOG_LEVEL).ok().as_deref());
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Read the client secret from the terminal without echo
fn prompt_secret(label: &str) -> dns_tools_core::Result<String> {
    Ok(rpassword::prompt_password(label)?)
}

fn resolve_credentials(args: &ZoneArgs) -> Result<AzureCredentials> {
    Ok(AzureCredentials::from_env(&args.credential_args(), prompt_secret)?)
}

fn stdout_style() -> Style {
    Style {
        color: std::io::stdout().is_terminal(),
    }
}

/// Print a fatal error as `Error: <message>` on stderr
pub fn print_error(error: &anyhow::Error) {
    let style = Style {
        color: std::io::stderr().is_terminal(),
    };
    eprintln!("{}", style.error_line(&error.to_string()));
}

/// Run a tool on a current-thread runtime and map the outcome to an exit code
pub fn run<F>(tool: F) -> ExitCode
where
    F: Future<Output = Result<()>>,
{
    if let Err(e) = init_tracing() {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return ToolExitCode::Failure.into();
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            print_error(&e.into());
            return ToolExitCode::Failure.into();
        }
    };

    let code = match rt.block_on(tool) {
        Ok(()) => ToolExitCode::Success,
        Err(e) => {
            print_error(&e);
            ToolExitCode::Failure
        }
    };
    code.into()
}

/// Download a zone into a CSV file
pub async fn download(args: ZoneArgs) -> Result<()> {
    let target = args.target()?;
    let credentials = resolve_credentials(&args)?;
    let provider = AzureDnsProvider::connect(&credentials).await?;

    let summary = dns_tools_core::download_zone(
        &provider,
        &target.resource_group,
        &target.zone_name,
        &target.csv_file,
    )
    .await?;

    info!(
        "Downloaded {} record set(s) from {}",
        summary.record_sets, target.zone_name
    );
    print!("{}", summary.report.render(stdout_style()));
    Ok(())
}

/// Upload the records of a CSV file into an existing zone
pub async fn upload(args: ZoneArgs) -> Result<()> {
    let target = args.target()?;
    let credentials = resolve_credentials(&args)?;

    // Parse the whole file before talking to Azure
    let records = csv::read_zone_file(&target.csv_file)?;
    info!(
        "Read {} name(s) from {}",
        records.len(),
        target.csv_file.display()
    );

    let provider = AzureDnsProvider::connect(&credentials).await?;
    let report = dns_tools_core::upload_records(
        &provider,
        &target.resource_group,
        &target.zone_name,
        records,
    )
    .await?;

    print!("{}", report.render(stdout_style()));
    Ok(())
}

// # azure-zone-upload
//
// Creates the A, AAAA and CNAME record sets listed in a CSV file in an
// existing Azure DNS zone. Record sets that already exist are skipped,
// never modified.
//
// ```bash
// export AZURE_TENANT_ID=... AZURE_SUBSCRIPTION_ID=... AZURE_CLIENT_ID=...
// azure-zone-upload --resource-group dns-rg --zone example.com --csv-file zone.csv
// ```

use clap::Parser;
use std::process::ExitCode;

use dns_tools::ZoneArgs;

/// Tool to upload DNS records to Azure DNS zones.
#[derive(Debug, Parser)]
#[command(name = "azure-zone-upload", version)]
struct Cli {
    #[command(flatten)]
    zone: ZoneArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    dns_tools::run(dns_tools::upload(cli.zone))
}

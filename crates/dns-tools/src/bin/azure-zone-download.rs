// # azure-zone-download
//
// Writes every A, AAAA, CNAME, NS and SOA record of an Azure DNS zone to a
// `name;ttl;type;data` CSV file. Other record types are reported as
// warnings and left out of the file.
//
// ```bash
// export AZURE_TENANT_ID=... AZURE_SUBSCRIPTION_ID=... AZURE_CLIENT_ID=...
// azure-zone-download --resource-group dns-rg --zone example.com --csv-file zone.csv
// ```

use clap::Parser;
use std::process::ExitCode;

use dns_tools::ZoneArgs;

/// Tool to download DNS zones from Azure.
#[derive(Debug, Parser)]
#[command(name = "azure-zone-download", version)]
struct Cli {
    #[command(flatten)]
    zone: ZoneArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    dns_tools::run(dns_tools::download(cli.zone))
}

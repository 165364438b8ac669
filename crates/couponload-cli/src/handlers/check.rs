//! Handler for `couponload check`.

use crate::commands::CheckArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use console::style;
use couponload::{Timeouts, UserClient};

/// Execute `couponload check`.
pub async fn execute_check(cli: &CliConfig, args: &CheckArgs) -> CliResult<()> {
    let timeouts = Timeouts::new(args.connect_timeout, args.network_timeout);
    timeouts.validate()?;
    let client = UserClient::new(&args.host, &timeouts)?;

    match client.health_check().await {
        Ok(status) => {
            if !cli.verbosity.is_quiet() {
                println!(
                    "{} {}/hello responded {}",
                    style("✓").green(),
                    client.base_url(),
                    status
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {e}", style("✗").red());
            Err(CliError::unreachable(client.base_url()))
        }
    }
}

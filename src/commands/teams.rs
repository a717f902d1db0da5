use tracing::{debug, info};

use crate::client::ReportClient;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::output;
use crate::responses::decode_teams;

/// Fetch the teams, decode them and write the report file.
/// Returns the number of records written.
pub async fn report(client: &ReportClient, config: &ReportConfig) -> Result<usize> {
    info!(url = %config.url_team, "fetching teams");
    let body = client
        .fetch(&config.url_team, &config.user, &config.password)
        .await?;

    let teams = decode_teams(&body, config.strict_decode)?;
    debug!(teams = teams.len(), "decoded teams");

    let written = output::write_report(
        Some(teams.as_slice()),
        &config.output_file,
        &config.separator,
        &config.line_end,
    )?;
    info!(
        path = %config.output_file.display(),
        records = written,
        "team report written"
    );

    Ok(written)
}

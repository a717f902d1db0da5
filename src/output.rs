use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{ReportError, Result};
use crate::types::Team;

/// Write one `name<separator><volunteer count><line_end>` record per team.
///
/// `None` means there is nothing to report and no file is touched; an empty
/// slice still creates (or truncates) the file. Returns the number of
/// records written.
pub fn write_report(
    teams: Option<&[Team]>,
    path: &Path,
    separator: &str,
    line_end: &str,
) -> Result<usize> {
    let Some(teams) = teams else {
        return Ok(0);
    };

    let file_error = |source| ReportError::File {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(file_error)?;
    let mut writer = BufWriter::new(file);

    for team in teams {
        write_record(&mut writer, team, separator, line_end).map_err(file_error)?;
    }

    writer.flush().map_err(file_error)?;

    Ok(teams.len())
}

fn write_record<W: Write>(
    writer: &mut W,
    team: &Team,
    separator: &str,
    line_end: &str,
) -> std::io::Result<()> {
    write!(
        writer,
        "{}{separator}{}{line_end}",
        team.name,
        team.volunteer_count()
    )
}

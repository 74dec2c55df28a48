use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::debug;

use crate::error::H2hError;
use crate::models::TeamStats;
use crate::normalize::normalize_name;

pub const FIELD_DELIMITER: u8 = b';';

/// Loads the first data row of a team CSV as numeric columns.
///
/// `team_name` is the name the caller asked for; it becomes the stats' display
/// name and the source of `team_id`.
pub fn load_team_stats(path: &Path, team_name: &str) -> Result<TeamStats, H2hError> {
    let file = File::open(path).map_err(|e| H2hError::io(path, e))?;
    let row = read_first_row(file).map_err(|source| csv_error(path, source))?;
    let Some(raw_columns) = row else {
        return Err(H2hError::EmptyData {
            team: team_name.to_string(),
            path: path.to_path_buf(),
        });
    };
    debug!(
        path = %path.display(),
        columns = raw_columns.len(),
        "loaded team stats"
    );
    Ok(TeamStats::unscored(
        normalize_name(team_name),
        team_name.to_string(),
        raw_columns,
    ))
}

/// Numeric cells of the first data row keyed by header, or `None` when the
/// input has no data rows.
pub fn read_first_row<R: Read>(rdr: R) -> Result<Option<BTreeMap<String, f64>>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let headers = unique_headers(reader.headers()?);
    let mut record = StringRecord::new();
    if !reader.read_record(&mut record)? {
        return Ok(None);
    }

    let mut out = BTreeMap::new();
    for (name, cell) in headers.into_iter().zip(record.iter()) {
        if let Some(value) = parse_numeric(cell) {
            out.insert(name, value);
        }
    }
    Ok(Some(out))
}

fn parse_numeric(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

// Repeated names get `.1`, `.2`, ... and blank names become `Unnamed: <idx>`.
fn unique_headers(headers: &StringRecord) -> Vec<String> {
    let mut used = HashSet::with_capacity(headers.len());
    let mut out = Vec::with_capacity(headers.len());
    for (idx, raw) in headers.iter().enumerate() {
        let base = if raw.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            raw.to_string()
        };
        let mut name = base.clone();
        let mut n = 1;
        while used.contains(&name) {
            name = format!("{base}.{n}");
            n += 1;
        }
        used.insert(name.clone());
        out.push(name);
    }
    out
}

fn csv_error(path: &Path, source: csv::Error) -> H2hError {
    H2hError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

//! Roster import: player names from an uploaded CSV file.

use crate::models::TournamentError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Names from the first column of each row. Empty rows and blank names are skipped.
pub fn parse_roster_csv(contents: &[u8]) -> Result<Vec<String>, TournamentError> {
    let contents = contents.strip_prefix(UTF8_BOM).unwrap_or(contents);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(contents);

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| TournamentError::InvalidInput(format!("Invalid CSV: {}", e)))?;
        if let Some(name) = record.get(0).map(str::trim).filter(|n| !n.is_empty()) {
            names.push(name.to_string());
        }
    }

    if names.is_empty() {
        return Err(TournamentError::InvalidInput(
            "CSV file is empty or contains no valid names.".into(),
        ));
    }
    Ok(names)
}

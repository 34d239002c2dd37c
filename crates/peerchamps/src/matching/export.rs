use std::io::Write;

use serde::Serialize;

use super::OpportunityMatches;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write match export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush match export: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct MatchRow<'a> {
    opportunity_id: &'a str,
    rank: usize,
    advocate_id: &'a str,
    advocate_name: &'a str,
    score: String,
    confidence: &'static str,
    remaining_calls: u32,
    reasons: String,
}

/// Writes one CSV row per ranked match, opportunities in the order given.
pub fn write_matches_csv<W: Write>(
    writer: W,
    results: &[OpportunityMatches],
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for entry in results {
        for (index, result) in entry.response.matches.iter().enumerate() {
            let advocate = result.advocate();
            csv.serialize(MatchRow {
                opportunity_id: &entry.opportunity_id.0,
                rank: index + 1,
                advocate_id: &advocate.id.0,
                advocate_name: &advocate.name,
                score: format!("{:.1}", result.score()),
                confidence: result.confidence().label(),
                remaining_calls: advocate.remaining_capacity(),
                reasons: result.reasons().join("; "),
            })?;
        }
    }
    csv.flush()?;
    Ok(())
}

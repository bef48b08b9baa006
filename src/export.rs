//! CSV serialization of the anomaly list

use csv::Writer;

use crate::error::{AnomalyError, Result};
use crate::models::DailyCount;

/// Render the ordered anomaly list as a two-column table with a header
/// row and no index column. Dates are formatted `YYYY-MM-DD`.
pub fn to_csv(anomalies: &[DailyCount]) -> Result<String> {
    let mut wtr = Writer::from_writer(vec![]);

    wtr.write_record(["date", "count"])?;
    for d in anomalies {
        wtr.write_record([d.date.to_string(), d.count.to_string()])?;
    }

    let data = wtr
        .into_inner()
        .map_err(|e| AnomalyError::Export(format!("CSV writer error: {e}")))?;
    String::from_utf8(data).map_err(|e| AnomalyError::Export(format!("UTF-8 conversion error: {e}")))
}

/// Write the rendered table to `path` in a single operation, replacing
/// any previous artifact. Nothing is written if rendering fails.
pub fn write_csv(path: &str, anomalies: &[DailyCount]) -> Result<()> {
    let rendered = to_csv(anomalies)?;
    std::fs::write(path, rendered)?;
    Ok(())
}

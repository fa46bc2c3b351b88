use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::allocation::summary::AllocationSummary;
use crate::error::Result;

/// Writes one `;`-separated line per sheet, with a header line.
pub fn write_summary_csv<W: Write>(writer: W, summary: &AllocationSummary) -> Result<()> {
    let mut csv_wtr = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);

    for sheet in &summary.sheets {
        csv_wtr.serialize(sheet)?;
    }
    csv_wtr.flush()?;

    Ok(())
}

pub fn write_summary_file(path: &Path, summary: &AllocationSummary) -> Result<()> {
    let file = File::create(path)?;
    write_summary_csv(file, summary)?;
    log::info!("Summary written to '{}'.", path.display());
    Ok(())
}

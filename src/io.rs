// 📄 CSV Round-Trip - Export and import of the ledger file
// Fixed 3-column format; the catalog, not the file, is the authority
// on point values.

use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::PenaltyError;
use crate::ledger::Ledger;

/// Second field of a per-participant summary row. Rows carrying this label
/// are written on export and ignored on import.
pub const TOTAL_POINTS_LABEL: &str = "Total Penalty Points";

/// Sentinel participant used by presentation layers; never exported.
pub const RESERVED_NAME: &str = "player";

// ============================================================================
// IMPORT REPORT
// ============================================================================

/// Counters describing what one import pass did.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub rows_read: usize,
    pub records_added: usize,
    pub participants_added: usize,
    pub totals_skipped: usize,
    pub point_mismatches: usize,
}

impl ImportReport {
    pub fn summary(&self) -> String {
        format!(
            "{} rows: {} incidents added, {} participants registered, {} summary rows skipped, {} point mismatches",
            self.rows_read,
            self.records_added,
            self.participants_added,
            self.totals_skipped,
            self.point_mismatches
        )
    }
}

// ============================================================================
// CSV EXPORT / IMPORT
// ============================================================================

impl Ledger {
    /// Write the ledger as CSV: a fixed header, then for each participant
    /// (in registration order) one row per incident record followed by a
    /// summary row with their total. Participants with no records still get
    /// their summary row. The reserved name is omitted entirely.
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<(), PenaltyError> {
        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

        wtr.write_record(["Name", "Incident", "Penalty Points"])?;

        for participant in self.participants() {
            if participant.name == RESERVED_NAME {
                continue;
            }

            for record in &participant.records {
                let points = record.points.to_string();
                wtr.write_record([
                    participant.name.as_str(),
                    record.incident.as_str(),
                    points.as_str(),
                ])?;
            }

            let total = participant.total_points().to_string();
            wtr.write_record([participant.name.as_str(), TOTAL_POINTS_LABEL, total.as_str()])?;
        }

        wtr.flush()?;
        Ok(())
    }

    pub fn export_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), PenaltyError> {
        let file = File::create(path)?;
        self.export_csv(file)
    }

    /// Rebuild ledger state from CSV produced by `export_csv` (or compatible
    /// by hand). The first line is always discarded as the header. Every row
    /// registers its participant if unseen; summary rows contribute nothing
    /// beyond that, never replayed as records. Incident rows are re-scored
    /// from the catalog; the points column is informational and only feeds
    /// the mismatch counter when it disagrees.
    ///
    /// Rows must have exactly 3 fields. A malformed row or an incident the
    /// catalog cannot resolve aborts the import; rows applied before the
    /// failure stay applied.
    pub fn import_csv<R: Read>(&mut self, reader: R) -> Result<ImportReport, PenaltyError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut report = ImportReport::default();

        for result in rdr.records() {
            let record = result?;
            report.rows_read += 1;

            if record.len() != 3 {
                return Err(PenaltyError::MalformedRow {
                    line: record.position().map(|p| p.line()).unwrap_or(0),
                    fields: record.len(),
                });
            }

            let name = &record[0];
            let incident = &record[1];
            let listed_points = &record[2];

            if self.add_participant(name)? {
                report.participants_added += 1;
            }

            // A zero-incident participant's only exported row is their
            // summary row, so registration happens before this check.
            if incident == TOTAL_POINTS_LABEL {
                report.totals_skipped += 1;
                continue;
            }

            let (category, points) = {
                let (category, points) = self.catalog().resolve(incident)?;
                (category.to_string(), points)
            };

            match listed_points.trim().parse::<u32>() {
                Ok(listed) if listed == points => {}
                _ => report.point_mismatches += 1,
            }

            self.record_incident(name, &category, incident)?;
            report.records_added += 1;
        }

        Ok(report)
    }

    pub fn import_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportReport, PenaltyError> {
        let file = File::open(path)?;
        self.import_csv(file)
    }
}

// ============================================================================
// TESTS
// ============================================================================

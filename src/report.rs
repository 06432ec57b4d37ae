use crate::config::DatasetConfig;
use crate::models::LogoMap;
use crate::processor::{PatchOutcome, PatchReport};
use std::io::{self, Write};

/// Console report of a sync run. Writes to stdout in `main`, to a buffer in
/// tests.
pub struct SyncReporter<W: Write> {
    out: W,
    datasets_seen: usize,
}

impl<W: Write> SyncReporter<W> {
    pub fn new(out: W) -> Self {
        SyncReporter {
            out,
            datasets_seen: 0,
        }
    }

    pub fn dataset_started(&mut self, dataset: &DatasetConfig) -> io::Result<()> {
        if self.datasets_seen > 0 {
            writeln!(self.out)?;
        }
        self.datasets_seen += 1;
        writeln!(self.out, "Updating {}...", dataset.name)
    }

    pub fn record_notices(
        &mut self,
        dataset: &DatasetConfig,
        report: &PatchReport,
    ) -> io::Result<()> {
        for (company_id, outcome) in &report.changes {
            match outcome {
                PatchOutcome::Updated => writeln!(self.out, "  ID {}: Updated", company_id)?,
                PatchOutcome::Skipped if dataset.report_skipped => {
                    writeln!(self.out, "  ID {}: SKIPPED (empty in CSV)", company_id)?
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn dataset_finished(
        &mut self,
        dataset: &DatasetConfig,
        report: &PatchReport,
    ) -> io::Result<()> {
        writeln!(
            self.out,
            "✓ Updated {} entries in {}",
            report.updated_count(),
            dataset.name
        )?;
        if dataset.report_skipped {
            writeln!(
                self.out,
                "✓ Skipped {} entries with empty logo_url",
                report.skipped_count()
            )?;
        }
        Ok(())
    }

    pub fn summary(&mut self, logos: &LogoMap) -> io::Result<()> {
        writeln!(self.out, "\n=== Update Summary ===")?;
        writeln!(self.out, "Total entries in CSV: {}", logos.len())?;
        writeln!(self.out, "Entries with valid logo URLs: {}", logos.valid_count())?;
        writeln!(self.out, "Entries with empty logo URLs: {}", logos.empty_count())?;
        writeln!(self.out, "Update complete!")?;
        self.out.flush()
    }

    #[allow(dead_code)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

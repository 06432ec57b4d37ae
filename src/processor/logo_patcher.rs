use crate::models::{CompanyRecord, LogoMap};
use tracing::debug;

/// What happened to one record during a patch pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// No id, or an id the CSV does not mention.
    NotListed,
    /// The CSV lists the id with an empty URL.
    Skipped,
    /// The CSV URL already matches the record.
    Unchanged,
    Updated,
}

/// Updated and skipped records of one pass, in record order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PatchReport {
    pub changes: Vec<(i64, PatchOutcome)>,
}

impl PatchReport {
    pub fn updated_count(&self) -> usize {
        self.count(PatchOutcome::Updated)
    }

    pub fn skipped_count(&self) -> usize {
        self.count(PatchOutcome::Skipped)
    }

    fn count(&self, outcome: PatchOutcome) -> usize {
        self.changes.iter().filter(|(_, o)| *o == outcome).count()
    }
}

pub struct LogoPatcher;

impl LogoPatcher {
    pub fn new() -> Self {
        LogoPatcher
    }

    pub fn patch_record(&self, record: &mut CompanyRecord, logos: &LogoMap) -> PatchOutcome {
        let Some(company_id) = record.company_id() else {
            return PatchOutcome::NotListed;
        };

        match logos.get(company_id) {
            None => PatchOutcome::NotListed,
            Some(None) => PatchOutcome::Skipped,
            Some(Some(new_logo)) if record.logo_url() == Some(new_logo) => PatchOutcome::Unchanged,
            Some(Some(new_logo)) => {
                debug!(
                    "company_id {}: {:?} -> {}",
                    company_id,
                    record.logo_url(),
                    new_logo
                );
                record.set_logo_url(new_logo);
                PatchOutcome::Updated
            }
        }
    }

    /// Patches every record in place and collects the ids that were updated
    /// or skipped.
    pub fn patch_records(&self, records: &mut [CompanyRecord], logos: &LogoMap) -> PatchReport {
        let mut report = PatchReport::default();

        for record in records.iter_mut() {
            let outcome = self.patch_record(record, logos);
            if let (PatchOutcome::Updated | PatchOutcome::Skipped, Some(company_id)) =
                (outcome, record.company_id())
            {
                report.changes.push((company_id, outcome));
            }
        }

        report
    }
}

use derive_more::Display;

use crate::error::Error;

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Participant is not in the active state
    #[display(fmt = "inactive")]
    Inactive,
    /// Participant has no microphone track to mute
    #[display(fmt = "no microphone")]
    NoMicrophone,
}

/// Per-participant outcome of a bulk command.
///
/// Bulk commands are best effort: a failure for one participant does not stop the others and is
/// only reported here.
#[derive(Default, Debug)]
pub struct BulkReport {
    updated: Vec<String>,
    skipped: Vec<(String, SkipReason)>,
    failed: Vec<(String, Error)>,
}

impl BulkReport {
    pub fn updated(&self) -> &[String] {
        &self.updated
    }

    pub fn skipped(&self) -> &[(String, SkipReason)] {
        &self.skipped
    }

    pub fn failed(&self) -> &[(String, Error)] {
        &self.failed
    }

    /// True when no participant failed
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of participants the command was attempted on
    pub fn attempted(&self) -> usize {
        self.updated.len() + self.failed.len()
    }

    pub fn is_updated(&self, identity: &str) -> bool {
        self.updated.iter().any(|id| id == identity)
    }

    pub fn is_failed(&self, identity: &str) -> bool {
        self.failed.iter().any(|(id, _)| id == identity)
    }

    pub fn skip_reason(&self, identity: &str) -> Option<SkipReason> {
        self.skipped
            .iter()
            .find(|(id, _)| id == identity)
            .map(|(_, reason)| *reason)
    }
}

impl BulkReport {
    pub(crate) fn skip(&mut self, identity: impl Into<String>, reason: SkipReason) {
        self.skipped.push((identity.into(), reason));
    }

    pub(crate) fn record(&mut self, identity: String, result: Result<(), Error>) {
        match result {
            Ok(()) => self.updated.push(identity),
            Err(e) => {
                tracing::warn!(%identity, error = %e, "bulk update failed for participant");
                self.failed.push((identity, e))
            }
        }
    }
}

/// Result of a lock or mute command
#[derive(Debug)]
pub enum Outcome {
    /// The single target was updated
    Applied,
    /// A bulk command ran, see the report for each participant
    Bulk(BulkReport),
}

impl Outcome {
    pub fn report(&self) -> Option<&BulkReport> {
        match self {
            Outcome::Bulk(report) => Some(report),
            Outcome::Applied => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn counts() {
        let mut report = BulkReport::default();
        report.record("bob".into(), Ok(()));
        report.record("carol".into(), Err(Error::Timeout));
        report.skip("dave", SkipReason::Inactive);

        assert_eq!(report.attempted(), 2);
        assert!(!report.is_complete());
        assert!(report.is_updated("bob"));
        assert!(report.is_failed("carol"));
        assert_eq!(report.skip_reason("dave"), Some(SkipReason::Inactive));
        assert_eq!(report.skip_reason("bob"), None);
    }
}

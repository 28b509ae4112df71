//! Sequential upload queue.
//!
//! Files are sent one at a time into a single folder. Progress reported by
//! the transport is clamped to 0..=100 and only ever moves forward.

use tracing::{debug, warn};

use crate::error::ServiceError;
use crate::path::VirtualPath;
use crate::service::{FileService, UploadPayload};

/// Progress of one queued file, tagged with its queue index by [`upload_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    Started { name: String, size: u64 },
    Progress { percent: u8 },
    Finished,
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded,
    Failed(ServiceError),
}

/// Per-file results in queue order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    pub outcomes: Vec<(String, UploadOutcome)>,
}

impl UploadReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| *outcome == UploadOutcome::Uploaded)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Forward-only percentage.
#[derive(Debug, Default)]
struct ProgressTracker {
    last: Option<u8>,
}

impl ProgressTracker {
    /// Returns the value to report, or `None` if it would not move forward.
    fn advance(&mut self, percent: u8) -> Option<u8> {
        let percent = percent.min(100);
        match self.last {
            Some(last) if percent <= last => None,
            _ => {
                self.last = Some(percent);
                Some(percent)
            }
        }
    }

    fn is_complete(&self) -> bool {
        self.last == Some(100)
    }
}

/// Upload `files` into `dir` one after another.
///
/// A failed file does not stop the queue. `on_event` receives the queue index
/// of the file each event belongs to.
pub async fn upload_all<S>(
    service: &S,
    dir: &VirtualPath,
    files: &[S::Payload],
    mut on_event: impl FnMut(usize, UploadEvent),
) -> UploadReport
where
    S: FileService + ?Sized,
{
    let mut report = UploadReport::default();

    for (index, file) in files.iter().enumerate() {
        let name = file.file_name();
        on_event(
            index,
            UploadEvent::Started {
                name: name.clone(),
                size: file.byte_len(),
            },
        );

        let mut tracker = ProgressTracker::default();
        let result = {
            let mut on_progress = |percent: u8| {
                if let Some(percent) = tracker.advance(percent) {
                    on_event(index, UploadEvent::Progress { percent });
                }
            };
            service.upload(dir, file, &mut on_progress).await
        };

        match result {
            Ok(()) => {
                if !tracker.is_complete() {
                    on_event(index, UploadEvent::Progress { percent: 100 });
                }
                on_event(index, UploadEvent::Finished);
                debug!(dir = %dir, name, "uploaded");
                report.outcomes.push((name, UploadOutcome::Uploaded));
            }
            Err(err) => {
                warn!(dir = %dir, name, error = %err, "upload failed");
                on_event(
                    index,
                    UploadEvent::Failed {
                        message: err.message.clone(),
                    },
                );
                report.outcomes.push((name, UploadOutcome::Failed(err)));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockCall, MockFile, MockFileService};

    #[test]
    fn test_progress_tracker_clamps_and_never_regresses() {
        let mut tracker = ProgressTracker::default();
        assert_eq!(tracker.advance(0), Some(0));
        assert_eq!(tracker.advance(40), Some(40));
        assert_eq!(tracker.advance(30), None);
        assert_eq!(tracker.advance(40), None);
        assert_eq!(tracker.advance(250), Some(100));
        assert!(tracker.is_complete());
        assert_eq!(tracker.advance(100), None);
    }

    #[tokio::test]
    async fn test_queue_is_sequential_and_continues_after_failure() {
        let service = MockFileService::new();
        let dir = VirtualPath::parse("/docs");
        service.add_folder(&dir);
        service.fail_upload("bad.bin");

        let files = vec![
            MockFile::new("a.txt", 10),
            MockFile::new("bad.bin", 20),
            MockFile::new("c.txt", 30),
        ];
        let mut events = Vec::new();
        let report = upload_all(&service, &dir, &files, |i, e| events.push((i, e))).await;

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert!(matches!(report.outcomes[1].1, UploadOutcome::Failed(_)));

        let uploads: Vec<_> = service
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                MockCall::Upload { name, .. } => Some(name),
                _ => None,
            })
            .collect();
        assert_eq!(uploads, vec!["a.txt", "bad.bin", "c.txt"]);

        // every event of file 0 precedes every event of file 1
        let last_of_first = events.iter().rposition(|(i, _)| *i == 0).unwrap();
        let first_of_second = events.iter().position(|(i, _)| *i == 1).unwrap();
        assert!(last_of_first < first_of_second);

        assert!(events.contains(&(
            1,
            UploadEvent::Failed {
                message: "upload rejected: bad.bin".to_string()
            }
        )));
        assert_eq!(events.last(), Some(&(2, UploadEvent::Finished)));
    }

    #[tokio::test]
    async fn test_progress_is_monotonic_per_file() {
        let service = MockFileService::new();
        let dir = VirtualPath::root();
        let files = vec![MockFile::new("a.txt", 10)];

        let mut percents = Vec::new();
        upload_all(&service, &dir, &files, |_, e| {
            if let UploadEvent::Progress { percent } = e {
                percents.push(percent);
            }
        })
        .await;

        assert!(percents.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(percents.last(), Some(&100));
    }
}

//! View model for the processing screen.

use brainrot_models::{ProcessingStage, StageState};

use crate::poller::PollState;
use crate::screen::Screen;

const TITLE: &str = "Processing Your Materials";
const STARTING_LABEL: &str = "Starting processing...";
const DONE_LABEL: &str = "Done";
const STALLED_MESSAGE: &str = "Processing is taking longer than expected. Please try again.";

/// Everything the processing screen renders for one poll state.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingView {
    pub title: &'static str,
    /// Progress bar value, 0-100
    pub progress: u8,
    /// Phase label under the bar
    pub status: String,
    pub stages: Vec<(ProcessingStage, StageState)>,
    /// Error text; set only for failed or stalled polling
    pub error: Option<String>,
    /// Where the "try again" button leads
    pub retry: Option<Screen>,
    /// Screen to move to without user action
    pub redirect: Option<Screen>,
}

impl ProcessingView {
    pub fn from_state(state: &PollState) -> Self {
        let (progress, status) = match state {
            PollState::Polling {
                progress, status, ..
            } => (*progress, status.clone()),
            PollState::Complete { status, .. } if status.is_empty() => (100, DONE_LABEL.to_string()),
            PollState::Complete { status, .. } => (100, status.clone()),
            _ => (0, String::new()),
        };
        let status = if status.is_empty() {
            STARTING_LABEL.to_string()
        } else {
            status
        };

        let error = match state {
            PollState::Failed { message } => Some(message.clone()),
            PollState::Stalled { .. } => Some(STALLED_MESSAGE.to_string()),
            _ => None,
        };

        let stages = ProcessingStage::checklist(progress, &status);

        Self {
            title: TITLE,
            progress,
            status,
            stages,
            error,
            retry: state.retry_target(),
            redirect: state.next_screen(),
        }
    }

    /// `"{p}% complete"` under the progress bar.
    pub fn percent_label(&self) -> String {
        format!("{}% complete", self.progress)
    }

    /// One checklist line per stage, e.g. `[x] Extracting key concepts`.
    pub fn checklist_lines(&self) -> Vec<String> {
        self.stages
            .iter()
            .map(|(stage, state)| match state {
                StageState::Done => format!("[x] {}", stage.label()),
                StageState::Pending => format!("[ ] {}", stage.label()),
                StageState::Active(inner) => match &inner.detail {
                    Some(detail) => {
                        format!("[~] {} ({:.0}%, {})", stage.label(), inner.percent, detail)
                    }
                    None => format!("[~] {} ({:.0}%)", stage.label(), inner.percent),
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poller::POLL_FAILED_MESSAGE;
    use crate::testing::videos;

    #[test]
    fn test_polling_view() {
        let view = ProcessingView::from_state(&PollState::Polling {
            attempt: 4,
            progress: 60,
            status: "Creating video 2/5: Photosynthesis".to_string(),
        });

        assert_eq!(view.title, "Processing Your Materials");
        assert_eq!(view.percent_label(), "60% complete");
        assert_eq!(view.error, None);
        assert_eq!(view.redirect, None);

        let lines = view.checklist_lines();
        assert_eq!(lines[3], "[x] Creating audio narration");
        assert_eq!(
            lines[4],
            "[~] Building videos with background visuals (22%, Video 2/5 - Photosynthesis)"
        );
        assert_eq!(lines[5], "[ ] Finalizing your videos");
    }

    #[test]
    fn test_initial_view_has_starting_label() {
        let view = ProcessingView::from_state(&PollState::Polling {
            attempt: 0,
            progress: 0,
            status: String::new(),
        });
        assert_eq!(view.status, "Starting processing...");
        assert!(view.stages.iter().all(|(_, s)| *s == StageState::Pending));
    }

    #[test]
    fn test_failed_view_offers_retry() {
        let view = ProcessingView::from_state(&PollState::Failed {
            message: POLL_FAILED_MESSAGE.to_string(),
        });
        assert_eq!(view.error.as_deref(), Some(POLL_FAILED_MESSAGE));
        assert_eq!(view.retry, Some(Screen::UploadMaterials));
        assert_eq!(view.redirect, None);
    }

    #[test]
    fn test_stalled_view_offers_retry() {
        let view = ProcessingView::from_state(&PollState::Stalled { attempts: 400 });
        assert!(view.error.is_some());
        assert_eq!(view.retry, Some(Screen::UploadMaterials));
    }

    #[test]
    fn test_complete_view_redirects() {
        let view = ProcessingView::from_state(&PollState::Complete {
            videos: videos(&["a"]),
            status: "Processing complete".to_string(),
        });
        assert_eq!(view.progress, 100);
        assert_eq!(view.status, "Processing complete");
        assert_eq!(view.redirect, Some(Screen::Results));
        assert!(view.stages.iter().all(|(_, s)| *s == StageState::Done));
    }

    #[test]
    fn test_complete_without_label_reads_done() {
        let view = ProcessingView::from_state(&PollState::Complete {
            videos: Vec::new(),
            status: String::new(),
        });
        assert_eq!(view.status, "Done");
    }

    #[test]
    fn test_idle_redirects_to_upload() {
        let view = ProcessingView::from_state(&PollState::Idle);
        assert_eq!(view.redirect, Some(Screen::UploadMaterials));
    }
}

//! Unattended sequential generation across a roster.
//!
//! Strictly sequential: the next request never starts before the current
//! one (including its internal retries) has resolved, and the scheduler
//! waits out a pacing delay between items to stay under the provider's
//! requests-per-minute ceiling. Per-item failures are logged and
//! skipped; nothing aborts the batch.

use std::time::Duration;

use tokio::time::Instant;

use crate::config::AppSettings;
use crate::error::GenerationError;
use crate::history::HistoryRecorder;
use crate::model::{HistoryRecord, Student};
use crate::orchestrator;

/// Pacing between batch items. Gemini's free tier allows roughly 15
/// requests per minute; 4s plus execution time keeps us under it.
pub const DEFAULT_PACING: Duration = Duration::from_millis(4000);

/// Progress counter reported after every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    pub current: usize,
    pub total: usize,
}

/// Aggregate result of one batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchOutcome {
    pub generated: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Sequential batch driver owning the pacing policy.
pub struct BatchScheduler {
    pacing: Duration,
}

impl Default for BatchScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchScheduler {
    pub fn new() -> Self {
        Self::with_pacing(DEFAULT_PACING)
    }

    /// Overrides the pacing delay (tests, self-hosted backends).
    pub fn with_pacing(pacing: Duration) -> Self {
        Self { pacing }
    }

    /// Generates comments for every student that lacks one.
    ///
    /// Successful comments are stamped onto the student and handed to
    /// the recorder; failures are logged and counted. The progress
    /// callback fires after every item, including skips.
    pub async fn run(
        &self,
        settings: &AppSettings,
        students: &mut [Student],
        recorder: &mut dyn HistoryRecorder,
        on_progress: &mut dyn FnMut(BatchProgress),
    ) -> BatchOutcome {
        let style = settings.style_label();
        let word_count = settings.target_word_count;
        self.run_with(students, &style, word_count, recorder, on_progress, async |student| {
            orchestrator::generate(
                settings,
                &student.name,
                &student.traits,
                &style,
                word_count,
                student.note.as_deref(),
            )
            .await
        })
        .await
    }

    /// Batch loop with an injectable generation step.
    ///
    /// The scheduler tracks the next eligible send time and suspends
    /// until it arrives; the final item sets no further deadline.
    pub async fn run_with<G>(
        &self,
        students: &mut [Student],
        style: &str,
        word_count: u32,
        recorder: &mut dyn HistoryRecorder,
        on_progress: &mut dyn FnMut(BatchProgress),
        mut generate: G,
    ) -> BatchOutcome
    where
        G: AsyncFnMut(&Student) -> Result<String, GenerationError>,
    {
        let targets: Vec<usize> = students
            .iter()
            .enumerate()
            .filter(|(_, s)| s.generated_comment.is_none())
            .map(|(idx, _)| idx)
            .collect();
        let total = targets.len();
        let mut outcome = BatchOutcome::default();
        if total == 0 {
            return outcome;
        }

        tracing::info!("batch generation started for {} students", total);
        let mut next_eligible = Instant::now();

        for (done, idx) in targets.into_iter().enumerate() {
            tokio::time::sleep_until(next_eligible).await;

            let student = &students[idx];
            if student.traits.is_empty() {
                tracing::debug!("skipping {}: no traits selected", student.name);
                outcome.skipped += 1;
            } else {
                match generate(student).await {
                    Ok(comment) => {
                        let record =
                            HistoryRecord::for_student(student, comment.clone(), style, word_count);
                        if let Err(e) = recorder.record(record) {
                            tracing::warn!("failed to persist history record: {}", e);
                        }
                        let student = &mut students[idx];
                        student.generated_comment = Some(comment);
                        student.last_generated_at = Some(chrono::Utc::now());
                        outcome.generated += 1;
                    }
                    Err(err) => {
                        tracing::error!(
                            "generation failed for {}: {} ({})",
                            students[idx].name,
                            err.message,
                            err.detail
                        );
                        outcome.failed += 1;
                    }
                }
            }

            on_progress(BatchProgress {
                current: done + 1,
                total,
            });
            next_eligible = Instant::now() + self.pacing;
        }

        tracing::info!(
            "batch finished: {} generated, {} failed, {} skipped",
            outcome.generated,
            outcome.failed,
            outcome.skipped
        );
        outcome
    }
}

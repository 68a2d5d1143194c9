//! Deferred assistant replies.
//!
//! The assistant answers after a fixed "thinking" delay. A single worker
//! task owns the queue, so replies come out in submission order even when
//! prompts are submitted faster than the delay. Each submission returns a
//! [`PendingReply`] that can cancel its reply before it is delivered.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::classifier::{Classifier, GeneratedArtifact};

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

/// An assistant reply that has come due
#[derive(Debug, Clone)]
pub struct Reply {
    pub id: u64,
    pub prompt: String,
    pub artifact: GeneratedArtifact,
}

/// Handle to a reply that may not have fired yet
#[derive(Debug, Clone)]
pub struct PendingReply {
    pub id: u64,
    cancelled: Arc<AtomicBool>,
}

impl PendingReply {
    /// Suppress the reply if it has not been delivered yet
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

struct Job {
    id: u64,
    prompt: String,
    due: Instant,
    cancelled: Arc<AtomicBool>,
}

pub struct ReplyScheduler {
    jobs: mpsc::UnboundedSender<Job>,
    worker: JoinHandle<()>,
    delay: Duration,
    next_id: u64,
}

impl ReplyScheduler {
    /// Spawn the worker on the current tokio runtime. Replies arrive on the
    /// returned receiver.
    pub fn spawn(delay: Duration, classifier: Classifier) -> (Self, mpsc::UnboundedReceiver<Reply>) {
        let (job_tx, mut job_rx) = mpsc::unbounded_channel::<Job>();
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();

        let worker = tokio::spawn(async move {
            while let Some(job) = job_rx.recv().await {
                tokio::time::sleep_until(job.due).await;

                if job.cancelled.load(Ordering::SeqCst) {
                    tracing::debug!(id = job.id, "reply cancelled");
                    continue;
                }

                let artifact = classifier.classify(&job.prompt);
                let reply = Reply {
                    id: job.id,
                    prompt: job.prompt,
                    artifact,
                };
                if reply_tx.send(reply).is_err() {
                    break;
                }
            }
            tracing::debug!("reply worker stopped");
        });

        let scheduler = Self {
            jobs: job_tx,
            worker,
            delay,
            next_id: 0,
        };
        (scheduler, reply_rx)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Queue a reply for `prompt`, due `delay` from now
    pub fn submit(&mut self, prompt: impl Into<String>) -> PendingReply {
        self.next_id += 1;
        let cancelled = Arc::new(AtomicBool::new(false));
        let job = Job {
            id: self.next_id,
            prompt: prompt.into(),
            due: Instant::now() + self.delay,
            cancelled: Arc::clone(&cancelled),
        };

        if self.jobs.send(job).is_err() {
            tracing::warn!(id = self.next_id, "reply worker is gone, prompt dropped");
        }

        PendingReply {
            id: self.next_id,
            cancelled,
        }
    }

    /// Stop the worker; replies not yet delivered are dropped
    pub fn shutdown(&self) {
        self.worker.abort();
    }
}

impl Drop for ReplyScheduler {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateId;

    #[tokio::test(start_paused = true)]
    async fn test_reply_waits_for_delay() {
        let (mut scheduler, mut replies) = ReplyScheduler::spawn(Duration::from_millis(1000), Classifier::default());
        let start = Instant::now();
        let pending = scheduler.submit("a card");

        let reply = replies.recv().await.unwrap();
        assert_eq!(reply.id, pending.id);
        assert_eq!(reply.artifact.template, TemplateId::Card);
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_submit_keeps_order() {
        let (mut scheduler, mut replies) = ReplyScheduler::spawn(Duration::from_millis(1000), Classifier::default());
        let first = scheduler.submit("website");
        tokio::time::advance(Duration::from_millis(10)).await;
        let second = scheduler.submit("button");

        let a = replies.recv().await.unwrap();
        let b = replies.recv().await.unwrap();
        assert_eq!((a.id, b.id), (first.id, second.id));
        assert_eq!(a.prompt, "website");
        assert_eq!(b.prompt, "button");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_reply_is_skipped() {
        let (mut scheduler, mut replies) = ReplyScheduler::spawn(Duration::from_millis(500), Classifier::default());
        let first = scheduler.submit("one");
        let second = scheduler.submit("two");
        first.cancel();
        assert!(first.is_cancelled());

        let reply = replies.recv().await.unwrap();
        assert_eq!(reply.id, second.id);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_closes_channel() {
        let (mut scheduler, mut replies) = ReplyScheduler::spawn(Duration::from_millis(500), Classifier::default());
        scheduler.submit("one");
        scheduler.shutdown();
        assert!(replies.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_zero_delay() {
        let (mut scheduler, mut replies) = ReplyScheduler::spawn(Duration::ZERO, Classifier::default());
        scheduler.submit("plain text");
        let reply = replies.recv().await.unwrap();
        assert_eq!(reply.artifact.template, TemplateId::Default);
    }
}

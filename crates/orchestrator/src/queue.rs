//! Background publish queue.
//!
//! Jobs are handed to a single worker task and run strictly one after
//! another, each job's targets in order. Submitting returns a
//! [`JobHandle`] that resolves with the receipts once the job is done.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio_util::task::TaskTracker;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::OrchestratorError;
use crate::orchestrator::{Orchestrator, PublishTarget};
use crate::receipt::PublishReceipt;

/// Default number of jobs that can wait for the worker.
pub const DEFAULT_CAPACITY: usize = 64;

/// One piece of content to publish to several platforms.
#[derive(Debug, Clone)]
pub struct PublishJob {
    pub id: Uuid,
    pub targets: Vec<PublishTarget>,
}

impl PublishJob {
    pub fn new(targets: Vec<PublishTarget>) -> Self {
        Self {
            id: Uuid::new_v4(),
            targets,
        }
    }
}

/// Resolves with a job's receipts.
#[derive(Debug)]
pub struct JobHandle {
    id: Uuid,
    rx: oneshot::Receiver<Vec<PublishReceipt>>,
}

impl JobHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Wait for the job to finish.
    pub async fn wait(self) -> Result<Vec<PublishReceipt>, OrchestratorError> {
        self.rx.await.map_err(|_| OrchestratorError::QueueClosed)
    }
}

struct Queued {
    job: PublishJob,
    reply: oneshot::Sender<Vec<PublishReceipt>>,
}

/// Runs publish jobs on a background worker.
pub struct PublishQueue {
    tx: mpsc::Sender<Queued>,
    tracker: TaskTracker,
}

impl PublishQueue {
    /// Spawn the worker on the current runtime.
    pub fn start(orchestrator: Arc<Orchestrator>, capacity: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<Queued>(capacity.max(1));
        let tracker = TaskTracker::new();

        tracker.spawn(async move {
            while let Some(Queued { job, reply }) = rx.recv().await {
                info!(job_id = %job.id, targets = job.targets.len(), "running publish job");
                let receipts = orchestrator.publish_all(&job.targets).await;
                let succeeded = receipts.iter().filter(|r| r.is_success()).count();
                info!(job_id = %job.id, succeeded, total = receipts.len(), "publish job finished");
                if reply.send(receipts).is_err() {
                    debug!(job_id = %job.id, "job handle dropped; receipts discarded");
                }
            }
            debug!("publish queue worker stopped");
        });
        tracker.close();

        Self { tx, tracker }
    }

    /// Enqueue a job, waiting for room if the queue is full.
    pub async fn submit(&self, job: PublishJob) -> Result<JobHandle, OrchestratorError> {
        let id = job.id;
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Queued { job, reply })
            .await
            .map_err(|_| OrchestratorError::QueueClosed)?;
        debug!(job_id = %id, "publish job queued");
        Ok(JobHandle { id, rx })
    }

    /// Stop accepting jobs and wait for every queued job to finish.
    pub async fn shutdown(self) {
        drop(self.tx);
        self.tracker.wait().await;
        info!("publish queue drained");
    }
}

#[cfg(test)]
mod tests {
    use crier_core::{MediaRequirement, Platform};
    use crier_media::MediaStager;

    use super::*;
    use crate::builder::OrchestratorBuilder;
    use crate::testing::{RecordingHost, StubPublisher};

    fn orchestrator(publisher: Arc<StubPublisher>) -> Arc<Orchestrator> {
        Arc::new(
            OrchestratorBuilder::new()
                .publisher(publisher)
                .stager(MediaStager::new(
                    Arc::new(RecordingHost::default()),
                    std::env::temp_dir(),
                ))
                .build()
                .unwrap(),
        )
    }

    fn job(caption: &str) -> PublishJob {
        PublishJob::new(vec![PublishTarget::new(
            Platform::Facebook,
            caption,
            Some("https://cdn.test/a.png".into()),
        )])
    }

    #[tokio::test]
    async fn job_resolves_with_receipts() {
        let facebook = Arc::new(StubPublisher::ok(
            Platform::Facebook,
            MediaRequirement::PublicUrl,
        ));
        let queue = PublishQueue::start(orchestrator(facebook), DEFAULT_CAPACITY);

        let handle = queue.submit(job("uno")).await.unwrap();
        let receipts = handle.wait().await.unwrap();

        assert_eq!(receipts.len(), 1);
        assert_eq!(receipts[0].post_id(), Some("facebook-post"));
        queue.shutdown().await;
    }

    #[tokio::test]
    async fn jobs_run_in_submission_order() {
        let facebook = Arc::new(StubPublisher::ok(
            Platform::Facebook,
            MediaRequirement::PublicUrl,
        ));
        let queue = PublishQueue::start(orchestrator(facebook.clone()), 4);

        let first = queue.submit(job("uno")).await.unwrap();
        let second = queue.submit(job("dos")).await.unwrap();
        assert_ne!(first.id(), second.id());
        second.wait().await.unwrap();
        first.wait().await.unwrap();

        let captions: Vec<_> = facebook.calls().into_iter().map(|c| c.caption).collect();
        assert_eq!(captions, vec!["uno", "dos"]);
        queue.shutdown().await;
    }

    #[tokio::test]
    async fn shutdown_drains_queued_jobs() {
        let facebook = Arc::new(StubPublisher::ok(
            Platform::Facebook,
            MediaRequirement::PublicUrl,
        ));
        let queue = PublishQueue::start(orchestrator(facebook.clone()), 8);

        let handles = vec![
            queue.submit(job("a")).await.unwrap(),
            queue.submit(job("b")).await.unwrap(),
            queue.submit(job("c")).await.unwrap(),
        ];
        queue.shutdown().await;

        assert_eq!(facebook.calls().len(), 3);
        for handle in handles {
            assert!(handle.wait().await.unwrap()[0].is_success());
        }
    }
}

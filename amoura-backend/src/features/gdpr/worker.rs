// amoura-backend/src/features/gdpr/worker.rs
//
// Background processing for export and deletion requests. The persisted
// request rows are the durable queue; the channel is only a wake-up signal.
// On startup the worker re-scans unfinished rows, so a crash between
// scheduling and completion cannot strand a job.

use crate::db::DbPool;
use crate::error::AppResult;
use crate::features::gdpr::services::{deletion::DeletionService, export::ExportService};
use crate::repository::{
    deletion_request_repository::DeletionRequestRepository,
    export_request_repository::ExportRequestRepository,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

/// How often completed artifacts are checked against their expiry window.
const PURGE_INTERVAL_SECS: u64 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GdprJob {
    ExportData(Uuid),
    DeleteAccount(Uuid),
}

/// Handle used by services to wake the worker after persisting a request.
#[derive(Clone)]
pub struct JobSender {
    tx: mpsc::UnboundedSender<GdprJob>,
}

impl JobSender {
    pub fn enqueue(&self, job: GdprJob) {
        // The row is already persisted; a closed channel only delays the job
        // until the next startup re-scan.
        if self.tx.send(job).is_err() {
            warn!(?job, "GDPR worker channel closed, job deferred to restart recovery");
        }
    }
}

pub fn job_channel() -> (JobSender, mpsc::UnboundedReceiver<GdprJob>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (JobSender { tx }, rx)
}

pub struct GdprWorker {
    rx: mpsc::UnboundedReceiver<GdprJob>,
    jobs: JobSender,
    export_repo: ExportRequestRepository,
    deletion_repo: DeletionRequestRepository,
    export_service: Arc<ExportService>,
    deletion_service: Arc<DeletionService>,
}

impl GdprWorker {
    pub fn new(
        db: DbPool,
        rx: mpsc::UnboundedReceiver<GdprJob>,
        jobs: JobSender,
        export_service: Arc<ExportService>,
        deletion_service: Arc<DeletionService>,
    ) -> Self {
        Self {
            rx,
            jobs,
            export_repo: ExportRequestRepository::new(db.clone()),
            deletion_repo: DeletionRequestRepository::new(db),
            export_service,
            deletion_service,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(mut self) {
        match self.recover().await {
            Ok((requeued, failed)) => {
                info!(requeued, failed, "GDPR worker recovery scan finished")
            }
            Err(e) => error!(error = %e, "GDPR worker recovery scan failed"),
        }

        let mut purge_tick = tokio::time::interval(Duration::from_secs(PURGE_INTERVAL_SECS));
        loop {
            tokio::select! {
                job = self.rx.recv() => {
                    let Some(job) = job else { break };
                    self.process(job).await;
                }
                _ = purge_tick.tick() => {
                    if let Err(e) = self.export_service.purge_expired().await {
                        error!(error = %e, "Failed to purge expired export artifacts");
                    }
                }
            }
        }
        info!("GDPR worker stopped");
    }

    async fn process(&self, job: GdprJob) {
        let result = match job {
            GdprJob::ExportData(id) => self.export_service.process_export_request(id).await,
            GdprJob::DeleteAccount(id) => self.deletion_service.process_deletion_request(id).await,
        };
        if let Err(e) = result {
            error!(?job, error = %e, "GDPR job failed");
        }
    }

    /// Re-enqueue `pending` rows and terminate rows stranded in
    /// `processing` by a crash. The interrupted jobs end as `failed`
    /// (forward-only transition); deletion is transactional, so an
    /// interruption means nothing was applied and the user may re-request.
    pub async fn recover(&self) -> AppResult<(usize, usize)> {
        let mut requeued = 0;
        let mut failed = 0;

        for request in self.export_repo.find_unfinished().await? {
            match request.get_status() {
                Ok(status) if !status.is_terminal() => {
                    if self
                        .export_repo
                        .mark_processing_interrupted(request.id)
                        .await?
                    {
                        failed += 1;
                    } else {
                        self.jobs.enqueue(GdprJob::ExportData(request.id));
                        requeued += 1;
                    }
                }
                _ => {}
            }
        }

        for request in self.deletion_repo.find_unfinished().await? {
            match request.get_status() {
                Ok(status) if !status.is_terminal() => {
                    if self
                        .deletion_repo
                        .mark_processing_interrupted(request.id)
                        .await?
                    {
                        failed += 1;
                    } else {
                        self.jobs.enqueue(GdprJob::DeleteAccount(request.id));
                        requeued += 1;
                    }
                }
                _ => {}
            }
        }

        Ok((requeued, failed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::export_request_model::{self, ExportFormat, ExportStatus};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::path::PathBuf;

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    fn idle_services(jobs: JobSender) -> (Arc<ExportService>, Arc<DeletionService>) {
        let export_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let deletion_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        (
            Arc::new(ExportService::new(
                export_db,
                jobs.clone(),
                PathBuf::from("/tmp/amoura-exports"),
                "http://localhost:3000/exports".to_string(),
            )),
            Arc::new(DeletionService::new(
                deletion_db,
                jobs,
                PathBuf::from("/tmp/amoura-exports"),
            )),
        )
    }

    #[tokio::test]
    async fn test_recover_requeues_pending_and_fails_interrupted() {
        let pending = export_request_model::Model::new(Uuid::new_v4(), ExportFormat::Json);
        let mut interrupted = export_request_model::Model::new(Uuid::new_v4(), ExportFormat::Json);
        interrupted.status = ExportStatus::Processing.into();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![pending.clone(), interrupted.clone()]])
            // pending row: the conditional failed-update misses, so it is
            // re-enqueued; processing row: the update lands, so it ends
            // failed.
            .append_exec_results([exec(0), exec(1)])
            .append_query_results([Vec::<crate::domain::deletion_request_model::Model>::new()])
            .into_connection();

        let (jobs, mut rx) = job_channel();
        let (export_service, deletion_service) = idle_services(jobs.clone());
        let worker = GdprWorker::new(
            Arc::new(db),
            rx_placeholder(),
            jobs,
            export_service,
            deletion_service,
        );

        let (requeued, failed) = worker.recover().await.unwrap();

        assert_eq!(requeued, 1);
        assert_eq!(failed, 1);
        assert_eq!(rx.try_recv().unwrap(), GdprJob::ExportData(pending.id));
        assert!(rx.try_recv().is_err());
    }

    fn rx_placeholder() -> mpsc::UnboundedReceiver<GdprJob> {
        mpsc::unbounded_channel().1
    }
}

use std::thread;

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use super::state::MainState;
use crate::services::now_playing::NowPlayingError;

type Job = Box<dyn FnOnce(&mut MainState) + Send>;

/// Handle to the coordinator's UI-affinity thread.
///
/// The thread owns [`MainState`] and runs jobs one at a time in the order
/// they were posted, which is what serializes coordinator operations. It
/// stops once every handle is dropped.
#[derive(Clone)]
pub(crate) struct MainContext {
    jobs: mpsc::UnboundedSender<Job>,
}

impl MainContext {
    pub(crate) fn spawn(state: MainState) -> Result<Self, NowPlayingError> {
        let (jobs, mut job_rx) = mpsc::unbounded_channel::<Job>();

        thread::Builder::new()
            .name(String::from("nowplaying-main"))
            .spawn(move || {
                let mut state = state;
                while let Some(job) = job_rx.blocking_recv() {
                    job(&mut state);
                }
                debug!("Main context stopped");
            })
            .map_err(|e| {
                debug!(error = %e, "Could not spawn main context thread");
                NowPlayingError::MainContextUnavailable
            })?;

        Ok(Self { jobs })
    }

    /// Queue `job` without waiting for it.
    pub(crate) fn post(
        &self,
        job: impl FnOnce(&mut MainState) + Send + 'static,
    ) -> Result<(), NowPlayingError> {
        self.jobs
            .send(Box::new(job))
            .map_err(|_| NowPlayingError::MainContextUnavailable)
    }

    /// Run `job` on the main context and wait for its result.
    pub(crate) async fn run<R>(
        &self,
        job: impl FnOnce(&mut MainState) -> R + Send + 'static,
    ) -> Result<R, NowPlayingError>
    where
        R: Send + 'static,
    {
        let (result_tx, result_rx) = oneshot::channel();

        self.post(move |state| {
            let _ = result_tx.send(job(state));
        })?;

        result_rx
            .await
            .map_err(|_| NowPlayingError::MainContextUnavailable)
    }
}

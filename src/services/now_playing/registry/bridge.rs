use std::{
    sync::mpsc::{self as std_mpsc, RecvTimeoutError},
    thread,
    time::Duration,
};

use futures::{FutureExt, future::BoxFuture};
use tokio::{runtime, sync::mpsc};
use tracing::{debug, warn};

use super::HandlerResult;
use crate::services::now_playing::{NowPlayingError, types::CommandStatus};

/// Extra wait past the handler timeout for the worker to report back
const REPLY_GRACE: Duration = Duration::from_millis(100);

type Job = BoxFuture<'static, ()>;

/// Runs asynchronous handlers for synchronous hardware callbacks.
///
/// Handler futures run on a dedicated `nowplaying-handlers` thread with its
/// own runtime, while the callback thread blocks until the handler settles
/// or the timeout elapses. Callbacks may therefore arrive on any thread,
/// including the only worker of a current-thread runtime. The worker stops
/// once every clone of the bridge is dropped.
#[derive(Clone, Debug)]
pub struct HandlerBridge {
    jobs: mpsc::UnboundedSender<Job>,
    timeout: Duration,
}

impl HandlerBridge {
    /// Start the handler worker.
    ///
    /// # Errors
    /// Returns `RuntimeUnavailable` if the worker runtime or thread can't start
    pub fn spawn(timeout: Duration) -> Result<Self, NowPlayingError> {
        let runtime = runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                warn!(error = %e, "Could not build handler runtime");
                NowPlayingError::RuntimeUnavailable
            })?;
        let (jobs, mut job_rx) = mpsc::unbounded_channel::<Job>();

        thread::Builder::new()
            .name(String::from("nowplaying-handlers"))
            .spawn(move || {
                runtime.block_on(async move {
                    while let Some(job) = job_rx.recv().await {
                        tokio::spawn(job);
                    }
                });
                debug!("Handler bridge stopped");
            })
            .map_err(|e| {
                warn!(error = %e, "Could not spawn handler thread");
                NowPlayingError::RuntimeUnavailable
            })?;

        Ok(Self { jobs, timeout })
    }

    /// Maximum time a callback waits for its handler
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `future` on the handler worker and block until it settles.
    ///
    /// Handler errors, panics and timeouts answer `CommandFailed`.
    pub fn block_on(&self, future: BoxFuture<'static, HandlerResult>) -> CommandStatus {
        let (tx, rx) = std_mpsc::sync_channel(1);
        let timeout = self.timeout;

        let job = async move {
            let status = match tokio::time::timeout(timeout, future).await {
                Ok(Ok(status)) => status,
                Ok(Err(e)) => {
                    warn!(error = %e, "Asynchronous command handler failed");
                    CommandStatus::CommandFailed
                }
                Err(_) => {
                    warn!(?timeout, "Asynchronous command handler timed out");
                    CommandStatus::CommandFailed
                }
            };
            let _ = tx.send(status);
        };

        if self.jobs.send(job.boxed()).is_err() {
            warn!("Handler bridge is not running");
            return CommandStatus::CommandFailed;
        }

        match rx.recv_timeout(timeout + REPLY_GRACE) {
            Ok(status) => status,
            Err(RecvTimeoutError::Disconnected) => {
                warn!("Asynchronous command handler ended without a status");
                CommandStatus::CommandFailed
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!(?timeout, "Gave up waiting for the handler worker");
                CommandStatus::CommandFailed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use std::{future::Future, time::Instant};

    use super::*;
    use crate::services::now_playing::HandlerError;

    fn handler(
        future: impl Future<Output = HandlerResult> + Send + 'static,
    ) -> BoxFuture<'static, HandlerResult> {
        future.boxed()
    }

    #[tokio::test]
    async fn runs_from_a_current_thread_runtime_worker() {
        let bridge = HandlerBridge::spawn(Duration::from_millis(500)).unwrap();
        let started = Instant::now();

        let status = bridge.block_on(handler(
            async {
                tokio::time::sleep(Duration::from_millis(5)).await;
                Ok(CommandStatus::Success)
            },
        ));

        assert_eq!(status, CommandStatus::Success);
        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn runs_without_any_ambient_runtime() {
        let bridge = HandlerBridge::spawn(Duration::from_secs(1)).unwrap();

        let status = bridge.block_on(handler(async { Ok(CommandStatus::NoSuchContent) }));

        assert_eq!(status, CommandStatus::NoSuchContent);
    }

    #[test]
    fn handler_timeout_is_reported_by_the_worker() {
        let bridge = HandlerBridge::spawn(Duration::from_millis(30)).unwrap();
        let started = Instant::now();

        let status = bridge.block_on(handler(
            async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(CommandStatus::Success)
            },
        ));

        assert_eq!(status, CommandStatus::CommandFailed);
        assert!(started.elapsed() < Duration::from_millis(30) + REPLY_GRACE);
    }

    #[test]
    fn panicking_handler_answers_command_failed() {
        let bridge = HandlerBridge::spawn(Duration::from_secs(5)).unwrap();
        let started = Instant::now();

        let status = bridge.block_on(handler(
            async move {
                if started.elapsed() < Duration::from_secs(60) {
                    panic!("handler bug");
                }
                Err(HandlerError::from("unreachable"))
            },
        ));

        assert_eq!(status, CommandStatus::CommandFailed);
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}

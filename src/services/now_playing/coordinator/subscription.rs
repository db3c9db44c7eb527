use std::{
    fmt,
    pin::Pin,
    task::{Context, Poll},
};

use futures::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::debug;

use super::{main_context::MainContext, state::MainState};
use crate::services::now_playing::{
    NowPlayingError,
    types::{InterruptionEvent, RemoteCommandEvent},
};

/// Live stream of remote command events.
///
/// Not restartable: once it ends or is dropped, the registrations backing it
/// are gone and a new subscription is needed.
pub type RemoteCommandEvents = EventSubscription<RemoteCommandEvent>;

/// Live stream of audio-session interruptions
pub type InterruptionEvents = EventSubscription<InterruptionEvent>;

type Teardown = Box<dyn FnOnce(&mut MainState) + Send>;

/// A single-consumer event stream tied to platform registrations.
///
/// Dropping it queues the teardown on the coordinator's main context ahead
/// of any later operation. [`close`](Self::close) does the same and waits
/// for it to finish.
pub struct EventSubscription<T> {
    events: UnboundedReceiverStream<T>,
    main: MainContext,
    teardown: Option<Teardown>,
}

impl<T> EventSubscription<T> {
    pub(crate) fn new(
        receiver: mpsc::UnboundedReceiver<T>,
        main: MainContext,
        teardown: impl FnOnce(&mut MainState) + Send + 'static,
    ) -> Self {
        Self {
            events: UnboundedReceiverStream::new(receiver),
            main,
            teardown: Some(Box::new(teardown)),
        }
    }

    /// End the subscription, returning once its registrations are removed.
    ///
    /// # Errors
    /// Returns `MainContextUnavailable` if the coordinator's main context is gone
    pub async fn close(mut self) -> Result<(), NowPlayingError> {
        match self.teardown.take() {
            Some(teardown) => self.main.run(teardown).await,
            None => Ok(()),
        }
    }
}

impl<T> Stream for EventSubscription<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        Pin::new(&mut self.events).poll_next(cx)
    }
}

impl<T> Drop for EventSubscription<T> {
    fn drop(&mut self) {
        let Some(teardown) = self.teardown.take() else {
            return;
        };

        if self.main.post(teardown).is_err() {
            debug!("Main context gone, subscription teardown skipped");
        }
    }
}

impl<T> fmt::Debug for EventSubscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSubscription")
            .field("open", &self.teardown.is_some())
            .finish()
    }
}

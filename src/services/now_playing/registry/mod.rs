//! Command registry: handler maps, platform mapping and handler dispatch.

mod bridge;
mod dispatch;
mod mapping;

use std::{collections::HashMap, collections::HashSet, fmt, future::Future, sync::Arc};

use futures::{FutureExt, future::BoxFuture};

pub use bridge::HandlerBridge;
pub use dispatch::dispatch;
pub use mapping::{disable_command, invalidate_all_commands, one_per_slot, to_platform_command};

use super::{HandlerError, types::{CommandStatus, RemoteCommand}};

/// Outcome of an asynchronous handler
pub type HandlerResult = Result<CommandStatus, HandlerError>;

type SyncFn<T> = Arc<dyn Fn(T) -> CommandStatus + Send + Sync>;
type AsyncFn<T> = Arc<dyn Fn(T) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// Handler for a remote command, by payload shape.
///
/// Asynchronous handlers run on the bridge's worker thread while the
/// hardware callback blocks waiting for them. They must not wait on the
/// coordinator: when the callback itself runs inside a coordinator job,
/// such a call can only complete after the handler times out.
#[derive(Clone)]
pub enum Handler {
    /// No payload
    Action(SyncFn<()>),
    /// Feedback payload (`is_negative`)
    BoolAction(SyncFn<bool>),
    /// Repeat or shuffle type code
    IntAction(SyncFn<i64>),
    /// Playback rate or rating
    FloatAction(SyncFn<f32>),
    /// Seek position or skip interval, in seconds
    TimeIntervalAction(SyncFn<f64>),
    /// Asynchronous, no payload
    AsyncAction(AsyncFn<()>),
    /// Asynchronous, feedback payload
    AsyncBoolAction(AsyncFn<bool>),
    /// Asynchronous, repeat or shuffle type code
    AsyncIntAction(AsyncFn<i64>),
    /// Asynchronous, playback rate or rating
    AsyncFloatAction(AsyncFn<f32>),
    /// Asynchronous, seek position or skip interval
    AsyncTimeIntervalAction(AsyncFn<f64>),
}

fn boxed_async<T, F, Fut>(f: F) -> AsyncFn<T>
where
    T: 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(move |value| f(value).boxed())
}

impl Handler {
    /// Synchronous handler without payload
    pub fn action(f: impl Fn() -> CommandStatus + Send + Sync + 'static) -> Self {
        Self::Action(Arc::new(move |()| f()))
    }

    /// Synchronous feedback handler
    pub fn bool_action(f: impl Fn(bool) -> CommandStatus + Send + Sync + 'static) -> Self {
        Self::BoolAction(Arc::new(f))
    }

    /// Synchronous repeat/shuffle handler
    pub fn int_action(f: impl Fn(i64) -> CommandStatus + Send + Sync + 'static) -> Self {
        Self::IntAction(Arc::new(f))
    }

    /// Synchronous rate/rating handler
    pub fn float_action(f: impl Fn(f32) -> CommandStatus + Send + Sync + 'static) -> Self {
        Self::FloatAction(Arc::new(f))
    }

    /// Synchronous position/interval handler
    pub fn time_interval_action(f: impl Fn(f64) -> CommandStatus + Send + Sync + 'static) -> Self {
        Self::TimeIntervalAction(Arc::new(f))
    }

    /// Asynchronous handler without payload
    pub fn async_action<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self::AsyncAction(boxed_async(move |()| f()))
    }

    /// Asynchronous feedback handler
    pub fn async_bool_action<F, Fut>(f: F) -> Self
    where
        F: Fn(bool) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self::AsyncBoolAction(boxed_async(f))
    }

    /// Asynchronous repeat/shuffle handler
    pub fn async_int_action<F, Fut>(f: F) -> Self
    where
        F: Fn(i64) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self::AsyncIntAction(boxed_async(f))
    }

    /// Asynchronous rate/rating handler
    pub fn async_float_action<F, Fut>(f: F) -> Self
    where
        F: Fn(f32) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self::AsyncFloatAction(boxed_async(f))
    }

    /// Asynchronous position/interval handler
    pub fn async_time_interval_action<F, Fut>(f: F) -> Self
    where
        F: Fn(f64) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self::AsyncTimeIntervalAction(boxed_async(f))
    }

    fn no_such_content() -> Self {
        Self::action(|| CommandStatus::NoSuchContent)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = match self {
            Self::Action(_) => "Action",
            Self::BoolAction(_) => "BoolAction",
            Self::IntAction(_) => "IntAction",
            Self::FloatAction(_) => "FloatAction",
            Self::TimeIntervalAction(_) => "TimeIntervalAction",
            Self::AsyncAction(_) => "AsyncAction",
            Self::AsyncBoolAction(_) => "AsyncBoolAction",
            Self::AsyncIntAction(_) => "AsyncIntAction",
            Self::AsyncFloatAction(_) => "AsyncFloatAction",
            Self::AsyncTimeIntervalAction(_) => "AsyncTimeIntervalAction",
        };
        f.write_str(shape)
    }
}

/// Immutable map from remote command to handler.
///
/// The enabled commands are exactly the keys present. Building is
/// accretive: [`with_handler`](Self::with_handler) returns a new map and
/// leaves the receiver untouched.
#[derive(Debug, Clone, Default)]
pub struct RemoteCommandHandlers {
    handlers: Arc<HashMap<RemoteCommand, Handler>>,
}

impl RemoteCommandHandlers {
    /// Empty handler set, enabling nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands with a registered handler
    pub fn enabled_commands(&self) -> HashSet<RemoteCommand> {
        self.handlers.keys().cloned().collect()
    }

    /// Registered handler, or one answering `NoSuchContent`
    pub fn handler(&self, command: &RemoteCommand) -> Handler {
        self.handlers
            .get(command)
            .cloned()
            .unwrap_or_else(Handler::no_such_content)
    }

    /// A copy of this map with `handler` registered for `command`
    #[must_use]
    pub fn with_handler(&self, command: RemoteCommand, handler: Handler) -> Self {
        let mut handlers = HashMap::clone(&self.handlers);
        handlers.insert(command, handler);
        Self {
            handlers: Arc::new(handlers),
        }
    }

    /// Whether no command is enabled
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl FromIterator<(RemoteCommand, Handler)> for RemoteCommandHandlers {
    fn from_iter<I: IntoIterator<Item = (RemoteCommand, Handler)>>(iter: I) -> Self {
        Self {
            handlers: Arc::new(iter.into_iter().collect()),
        }
    }
}

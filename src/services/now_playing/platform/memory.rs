use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use tracing::trace;

use super::{
    AudioSession, CommandTarget, InterruptionObserver, NowPlayingInfoCenter, ObserverToken,
    RemoteCommandCenter, TargetId,
};
use crate::services::now_playing::{
    SessionError,
    types::{
        CategoryOptions, CommandConfiguration, CommandStatus, InterruptionNotification,
        NowPlayingInfo, PlatformCommand, RawCommandEvent, SessionCategory, SessionMode,
    },
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-process platform used by tests, previews and the debug tool.
///
/// Records every call and lets callers inject hardware events,
/// interruption notifications and activation failures.
#[derive(Clone, Default)]
pub struct MemoryPlatform {
    /// Now-playing info center
    pub info_center: Arc<MemoryInfoCenter>,
    /// Remote command center
    pub command_center: Arc<MemoryCommandCenter>,
    /// Audio session
    pub audio_session: Arc<MemoryAudioSession>,
}

impl MemoryPlatform {
    /// Create an empty platform
    pub fn new() -> Self {
        Self::default()
    }
}

/// Records the published now-playing dictionary
#[derive(Default)]
pub struct MemoryInfoCenter {
    current: Mutex<Option<NowPlayingInfo>>,
    publish_count: AtomicU64,
}

impl MemoryInfoCenter {
    /// Currently published dictionary
    pub fn now_playing_info(&self) -> Option<NowPlayingInfo> {
        lock(&self.current).clone()
    }

    /// Number of times the dictionary was set or cleared
    pub fn publish_count(&self) -> u64 {
        self.publish_count.load(Ordering::SeqCst)
    }
}

impl NowPlayingInfoCenter for MemoryInfoCenter {
    fn set_now_playing_info(&self, info: Option<NowPlayingInfo>) {
        *lock(&self.current) = info;
        self.publish_count.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct CommandSlot {
    enabled: bool,
    configuration: Vec<CommandConfiguration>,
    targets: BTreeMap<u64, CommandTarget>,
}

#[derive(Default)]
struct CommandCenterState {
    slots: HashMap<PlatformCommand, CommandSlot>,
    receiving: bool,
}

/// Records command slot state and dispatches injected hardware events
#[derive(Default)]
pub struct MemoryCommandCenter {
    state: Mutex<CommandCenterState>,
    next_target: AtomicU64,
}

impl MemoryCommandCenter {
    /// Deliver a hardware event to every target on its slot.
    ///
    /// Returns the status of the last target, or `None` when the slot is
    /// disabled or has no target. Targets run on the calling thread, so
    /// callers should invoke this from a thread that may block.
    pub fn dispatch(&self, event: RawCommandEvent) -> Option<CommandStatus> {
        let targets: Vec<CommandTarget> = {
            let state = lock(&self.state);
            match state.slots.get(&event.command) {
                Some(slot) if slot.enabled => slot.targets.values().cloned().collect(),
                _ => return None,
            }
        };

        trace!(command = ?event.command, targets = targets.len(), "Dispatching hardware event");
        targets.iter().map(|target| target(&event)).last()
    }

    /// Whether a slot is enabled
    pub fn is_enabled(&self, command: PlatformCommand) -> bool {
        lock(&self.state)
            .slots
            .get(&command)
            .is_some_and(|slot| slot.enabled)
    }

    /// All enabled slots
    pub fn enabled_commands(&self) -> BTreeSet<PlatformCommand> {
        lock(&self.state)
            .slots
            .iter()
            .filter(|(_, slot)| slot.enabled)
            .map(|(command, _)| *command)
            .collect()
    }

    /// Number of targets registered on a slot
    pub fn target_count(&self, command: PlatformCommand) -> usize {
        lock(&self.state)
            .slots
            .get(&command)
            .map_or(0, |slot| slot.targets.len())
    }

    /// Most recent configuration pushed to a slot
    pub fn configuration(&self, command: PlatformCommand) -> Option<CommandConfiguration> {
        lock(&self.state)
            .slots
            .get(&command)
            .and_then(|slot| slot.configuration.last().cloned())
    }

    /// Whether hardware remote-control events are being received
    pub fn is_receiving_remote_control_events(&self) -> bool {
        lock(&self.state).receiving
    }
}

impl RemoteCommandCenter for MemoryCommandCenter {
    fn set_enabled(&self, command: PlatformCommand, enabled: bool) {
        lock(&self.state).slots.entry(command).or_default().enabled = enabled;
    }

    fn configure(&self, command: PlatformCommand, configuration: CommandConfiguration) {
        lock(&self.state)
            .slots
            .entry(command)
            .or_default()
            .configuration
            .push(configuration);
    }

    fn add_target(&self, command: PlatformCommand, target: CommandTarget) -> TargetId {
        let id = self.next_target.fetch_add(1, Ordering::SeqCst);
        lock(&self.state)
            .slots
            .entry(command)
            .or_default()
            .targets
            .insert(id, target);
        TargetId(id)
    }

    fn remove_target(&self, command: PlatformCommand, target: TargetId) {
        let removed = lock(&self.state)
            .slots
            .get_mut(&command)
            .and_then(|slot| slot.targets.remove(&target.0));
        drop(removed);
    }

    fn remove_all_targets(&self, command: PlatformCommand) {
        let removed = lock(&self.state)
            .slots
            .get_mut(&command)
            .map(|slot| std::mem::take(&mut slot.targets));
        drop(removed);
    }

    fn begin_receiving_remote_control_events(&self) {
        lock(&self.state).receiving = true;
    }

    fn end_receiving_remote_control_events(&self) {
        lock(&self.state).receiving = false;
    }
}

#[derive(Default)]
struct SessionState {
    category: Option<(SessionCategory, SessionMode, CategoryOptions)>,
    active: bool,
    reject_category: bool,
    fail_activation: bool,
    fail_deactivation: bool,
    observers: BTreeMap<u64, InterruptionObserver>,
}

/// Records session configuration and posts injected interruptions
#[derive(Default)]
pub struct MemoryAudioSession {
    state: Mutex<SessionState>,
    next_observer: AtomicU64,
}

impl MemoryAudioSession {
    /// Current category, mode and options, if set
    pub fn category(&self) -> Option<(SessionCategory, SessionMode, CategoryOptions)> {
        lock(&self.state).category
    }

    /// Whether the session is active
    pub fn is_active(&self) -> bool {
        lock(&self.state).active
    }

    /// Make subsequent category changes fail
    pub fn set_reject_category(&self, reject: bool) {
        lock(&self.state).reject_category = reject;
    }

    /// Make subsequent activations fail
    pub fn set_fail_activation(&self, fail: bool) {
        lock(&self.state).fail_activation = fail;
    }

    /// Make subsequent deactivations fail
    pub fn set_fail_deactivation(&self, fail: bool) {
        lock(&self.state).fail_deactivation = fail;
    }

    /// Number of registered interruption observers
    pub fn observer_count(&self) -> usize {
        lock(&self.state).observers.len()
    }

    /// Post an interruption notification to every observer
    pub fn post_interruption(&self, notification: InterruptionNotification) {
        let observers: Vec<InterruptionObserver> =
            lock(&self.state).observers.values().cloned().collect();

        for observer in observers {
            observer(&notification);
        }
    }
}

impl AudioSession for MemoryAudioSession {
    fn set_category(
        &self,
        category: SessionCategory,
        mode: SessionMode,
        options: CategoryOptions,
    ) -> Result<(), SessionError> {
        let mut state = lock(&self.state);
        if state.reject_category {
            return Err(SessionError::CategoryRejected(format!(
                "{category:?}/{mode:?} not allowed"
            )));
        }
        state.category = Some((category, mode, options));
        Ok(())
    }

    fn set_active(&self, active: bool) -> Result<(), SessionError> {
        let mut state = lock(&self.state);
        match (active, state.fail_activation, state.fail_deactivation) {
            (true, true, _) => Err(SessionError::ActivationFailed(
                "session activation refused".to_string(),
            )),
            (false, _, true) => Err(SessionError::DeactivationFailed(
                "session is busy".to_string(),
            )),
            _ => {
                state.active = active;
                Ok(())
            }
        }
    }

    fn add_interruption_observer(&self, observer: InterruptionObserver) -> ObserverToken {
        let id = self.next_observer.fetch_add(1, Ordering::SeqCst);
        lock(&self.state).observers.insert(id, observer);
        ObserverToken(id)
    }

    fn remove_interruption_observer(&self, token: ObserverToken) {
        let removed = lock(&self.state).observers.remove(&token.0);
        drop(removed);
    }
}

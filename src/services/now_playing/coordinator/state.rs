use std::{collections::HashMap, sync::Arc};

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, trace};

use super::CoordinatorState;
use crate::services::now_playing::{
    NowPlayingError,
    metadata::NowPlayingMetadata,
    platform::{CommandTarget, InterruptionObserver, ObserverToken, Platform, TargetId},
    registry::{
        HandlerBridge, RemoteCommandHandlers, disable_command, dispatch, invalidate_all_commands,
        one_per_slot, to_platform_command,
    },
    session::SessionGateway,
    types::{
        CategoryOptions, CommandStatus, DynamicNowPlayingInfo, InterruptionEvent,
        InterruptionNotification, PlatformCommand, RawCommandEvent, RemoteCommand,
        RemoteCommandEvent, SessionCategory, SessionMode, StaticNowPlayingInfo,
    },
};

pub(crate) type SubscriptionId = u64;

/// Who registered the targets currently on a command slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandOwner {
    Handlers,
    Subscription(SubscriptionId),
}

/// Everything the coordinator mutates. Lives on the main context thread.
pub(crate) struct MainState {
    platform: Platform,
    metadata: NowPlayingMetadata,
    session: SessionGateway,
    bridge: HandlerBridge,
    owners: HashMap<PlatformCommand, CommandOwner>,
    subscriptions: HashMap<SubscriptionId, Vec<(PlatformCommand, TargetId)>>,
    configured: Option<RemoteCommandHandlers>,
    next_subscription: SubscriptionId,
    lifecycle: watch::Sender<CoordinatorState>,
}

impl MainState {
    pub(crate) fn new(
        platform: Platform,
        bridge: HandlerBridge,
        lifecycle: watch::Sender<CoordinatorState>,
    ) -> Self {
        let session = SessionGateway::new(platform.audio_session.clone());

        Self {
            platform,
            metadata: NowPlayingMetadata::default(),
            session,
            bridge,
            owners: HashMap::new(),
            subscriptions: HashMap::new(),
            configured: None,
            next_subscription: 1,
            lifecycle,
        }
    }

    pub(crate) fn initialize_audio_session(
        &mut self,
        category: SessionCategory,
        mode: SessionMode,
        options: CategoryOptions,
    ) -> Result<(), NowPlayingError> {
        let result = self.session.initialize(category, mode, options);
        self.refresh_lifecycle();
        result
    }

    pub(crate) fn setup_remote_commands(&mut self, handlers: RemoteCommandHandlers) {
        let center = Arc::clone(&self.platform.command_center);

        invalidate_all_commands(center.as_ref());
        self.owners.clear();

        let enabled = handlers.enabled_commands();
        let claimed = one_per_slot(&enabled);
        for command in &claimed {
            let slot = to_platform_command(command, center.as_ref());
            center.set_enabled(slot, true);

            let target_handlers = handlers.clone();
            let target_command = RemoteCommand::clone(command);
            let bridge = self.bridge.clone();
            let target: CommandTarget = Arc::new(move |raw: &RawCommandEvent| {
                let handler = target_handlers.handler(&target_command);
                dispatch(&handler, raw, &bridge)
            });
            center.add_target(slot, target);

            self.owners.insert(slot, CommandOwner::Handlers);
        }

        if claimed.is_empty() {
            center.end_receiving_remote_control_events();
        } else {
            center.begin_receiving_remote_control_events();
        }

        info!(commands = claimed.len(), "Remote command handlers configured");
        self.configured = Some(handlers);
        self.refresh_lifecycle();
    }

    pub(crate) fn configured_commands(&self) -> Vec<RemoteCommand> {
        self.configured
            .as_ref()
            .map(|handlers| handlers.enabled_commands().into_iter().collect())
            .unwrap_or_default()
    }

    pub(crate) fn subscribe_commands(
        &mut self,
        commands: &[RemoteCommand],
        events: mpsc::UnboundedSender<RemoteCommandEvent>,
    ) -> SubscriptionId {
        let center = Arc::clone(&self.platform.command_center);
        let id = self.next_subscription;
        self.next_subscription += 1;

        let claimed = one_per_slot(commands);
        for command in &claimed {
            disable_command(center.as_ref(), command.platform_command());
        }

        let mut registrations = Vec::with_capacity(claimed.len());
        for command in claimed {
            let slot = to_platform_command(command, center.as_ref());
            center.set_enabled(slot, true);

            let target_command = command.clone();
            let sender = events.clone();
            let target: CommandTarget = Arc::new(move |raw: &RawCommandEvent| {
                let Some(event) = RemoteCommandEvent::project(&target_command, raw) else {
                    trace!(command = ?raw.command, "Hardware event has no matching payload");
                    return CommandStatus::NoSuchContent;
                };

                match sender.send(event) {
                    Ok(()) => CommandStatus::Success,
                    Err(_) => CommandStatus::CommandFailed,
                }
            });

            registrations.push((slot, center.add_target(slot, target)));
            self.owners.insert(slot, CommandOwner::Subscription(id));
        }

        if !registrations.is_empty() {
            center.begin_receiving_remote_control_events();
        }

        debug!(subscription = id, commands = registrations.len(), "Command subscription started");
        self.subscriptions.insert(id, registrations);
        self.refresh_lifecycle();
        id
    }

    /// Disable and unregister what subscription `id` registered, skipping
    /// slots another configurer has taken over since.
    pub(crate) fn end_command_subscription(&mut self, id: SubscriptionId) {
        let Some(registrations) = self.subscriptions.remove(&id) else {
            return;
        };

        let center = &self.platform.command_center;
        let owner = CommandOwner::Subscription(id);
        let mut released = 0;

        for (slot, target) in registrations {
            if self.owners.get(&slot) != Some(&owner) {
                continue;
            }
            center.set_enabled(slot, false);
            center.remove_target(slot, target);
            released += 1;
        }
        self.owners.retain(|_, slot_owner| *slot_owner != owner);

        debug!(subscription = id, released, "Command subscription ended");
        self.refresh_lifecycle();
    }

    pub(crate) fn subscribe_interruptions(
        &mut self,
        events: mpsc::UnboundedSender<InterruptionEvent>,
    ) -> ObserverToken {
        let observer: InterruptionObserver =
            Arc::new(move |notification: &InterruptionNotification| {
            match InterruptionEvent::from_notification(notification) {
                Some(event) => {
                    let _ = events.send(event);
                }
                None => debug!(?notification, "Dropping unrecognized interruption notification"),
            }
        });

        let token = self.session.observe_interruptions(observer);
        self.refresh_lifecycle();
        token
    }

    pub(crate) fn end_interruption_subscription(&mut self, token: ObserverToken) {
        if self.session.stop_observing(token) {
            self.refresh_lifecycle();
        }
    }

    pub(crate) fn update_static_info(
        &mut self,
        info: &StaticNowPlayingInfo,
    ) -> Result<(), NowPlayingError> {
        self.metadata.apply_static(info)?;
        self.publish()
    }

    pub(crate) fn update_dynamic_info(
        &mut self,
        info: &DynamicNowPlayingInfo,
    ) -> Result<(), NowPlayingError> {
        self.metadata.apply_dynamic(info)?;
        self.publish()
    }

    fn publish(&self) -> Result<(), NowPlayingError> {
        self.session.ensure_active()?;
        self.platform
            .info_center
            .set_now_playing_info(Some(self.metadata.to_published_form()));
        Ok(())
    }

    pub(crate) fn reset(&mut self) {
        let center = &self.platform.command_center;

        self.metadata.reset();
        self.platform.info_center.set_now_playing_info(None);

        invalidate_all_commands(center.as_ref());
        center.end_receiving_remote_control_events();
        self.owners.clear();
        self.subscriptions.clear();
        self.configured = None;

        self.session.deactivate();
        self.session.clear_observer();

        info!("Now-playing state reset");
        self.refresh_lifecycle();
    }

    fn refresh_lifecycle(&self) {
        let state = if self.session.is_initialized()
            || self.session.is_observing()
            || !self.owners.is_empty()
        {
            CoordinatorState::Configured
        } else {
            CoordinatorState::Idle
        };

        self.lifecycle.send_if_modified(|current| {
            if *current == state {
                return false;
            }
            let previous = *current;
            debug!(?previous, ?state, "Coordinator state changed");
            *current = state;
            true
        });
    }
}

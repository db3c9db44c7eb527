use super::{Handler, HandlerBridge};
use crate::services::now_playing::types::{CommandPayload, CommandStatus, RawCommandEvent};

fn bool_payload(payload: CommandPayload) -> Option<bool> {
    match payload {
        CommandPayload::Feedback { is_negative } => Some(is_negative),
        _ => None,
    }
}

fn int_payload(payload: CommandPayload) -> Option<i64> {
    match payload {
        CommandPayload::RepeatMode(value) | CommandPayload::ShuffleMode(value) => Some(value),
        _ => None,
    }
}

fn float_payload(payload: CommandPayload) -> Option<f32> {
    match payload {
        CommandPayload::PlaybackRate(value) | CommandPayload::Rating(value) => Some(value),
        _ => None,
    }
}

fn time_interval_payload(payload: CommandPayload) -> Option<f64> {
    match payload {
        CommandPayload::PlaybackPosition(value) | CommandPayload::SkipInterval(value) => {
            Some(value)
        }
        _ => None,
    }
}

/// Invoke `handler` with the payload of `raw`.
///
/// Answers `NoSuchContent` when the payload shape doesn't match what the
/// handler expects. Plain actions accept any payload.
pub fn dispatch(handler: &Handler, raw: &RawCommandEvent, bridge: &HandlerBridge) -> CommandStatus {
    let payload = raw.payload;

    let status = match handler {
        Handler::Action(action) => Some(action(())),
        Handler::BoolAction(action) => bool_payload(payload).map(|v| action(v)),
        Handler::IntAction(action) => int_payload(payload).map(|v| action(v)),
        Handler::FloatAction(action) => float_payload(payload).map(|v| action(v)),
        Handler::TimeIntervalAction(action) => time_interval_payload(payload).map(|v| action(v)),
        Handler::AsyncAction(action) => Some(bridge.block_on(action(()))),
        Handler::AsyncBoolAction(action) => {
            bool_payload(payload).map(|v| bridge.block_on(action(v)))
        }
        Handler::AsyncIntAction(action) => int_payload(payload).map(|v| bridge.block_on(action(v))),
        Handler::AsyncFloatAction(action) => {
            float_payload(payload).map(|v| bridge.block_on(action(v)))
        }
        Handler::AsyncTimeIntervalAction(action) => {
            time_interval_payload(payload).map(|v| bridge.block_on(action(v)))
        }
    };

    status.unwrap_or(CommandStatus::NoSuchContent)
}

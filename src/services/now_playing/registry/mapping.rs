use tracing::trace;

use crate::services::now_playing::{
    platform::RemoteCommandCenter,
    types::{PlatformCommand, RemoteCommand},
};

/// Resolve the platform slot for `command`, pushing its configuration.
///
/// Used both when enabling a command and when tearing it down, so the
/// slot always carries the configuration of the last command mapped to it.
pub fn to_platform_command(
    command: &RemoteCommand,
    center: &dyn RemoteCommandCenter,
) -> PlatformCommand {
    let platform_command = command.platform_command();

    if let Some(configuration) = command.configuration() {
        trace!(?platform_command, ?configuration, "Configuring command slot");
        center.configure(platform_command, configuration);
    }

    platform_command
}

/// Collapse commands sharing a platform slot, keeping the last of each.
///
/// Slots keep the order in which they were first named.
pub fn one_per_slot<'a>(
    commands: impl IntoIterator<Item = &'a RemoteCommand>,
) -> Vec<&'a RemoteCommand> {
    let mut claimed: Vec<&RemoteCommand> = Vec::new();
    for command in commands {
        let slot = command.platform_command();
        match claimed.iter_mut().find(|c| c.platform_command() == slot) {
            Some(existing) => *existing = command,
            None => claimed.push(command),
        }
    }
    claimed
}

/// Disable a slot and drop every target registered on it
pub fn disable_command(center: &dyn RemoteCommandCenter, command: PlatformCommand) {
    center.set_enabled(command, false);
    center.remove_all_targets(command);
}

/// Disable every slot and drop every target on the command center
pub fn invalidate_all_commands(center: &dyn RemoteCommandCenter) {
    for command in PlatformCommand::ALL {
        center.set_enabled(command, false);
    }

    for command in PlatformCommand::ALL {
        center.remove_all_targets(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::now_playing::{
        platform::MemoryCommandCenter,
        types::CommandConfiguration,
    };

    #[test]
    fn language_option_maps_to_enable_or_disable_slot() {
        let center = MemoryCommandCenter::default();

        assert_eq!(
            to_platform_command(&RemoteCommand::ChangeLanguageOption { is_enabled: true }, &center),
            PlatformCommand::EnableLanguageOption
        );
        assert_eq!(
            to_platform_command(
                &RemoteCommand::ChangeLanguageOption { is_enabled: false },
                &center
            ),
            PlatformCommand::DisableLanguageOption
        );
    }

    #[test]
    fn mapping_pushes_configuration() {
        let center = MemoryCommandCenter::default();

        to_platform_command(
            &RemoteCommand::ChangePlaybackRate {
                rates: vec![1.0, 1.5],
            },
            &center,
        );
        to_platform_command(&RemoteCommand::Rating { min: 1.0, max: 5.0 }, &center);
        to_platform_command(
            &RemoteCommand::Like {
                is_active: true,
                title: "Love it".to_string(),
            },
            &center,
        );

        assert_eq!(
            center.configuration(PlatformCommand::ChangePlaybackRate),
            Some(CommandConfiguration::SupportedPlaybackRates(vec![1.0, 1.5]))
        );
        assert_eq!(
            center.configuration(PlatformCommand::Rating),
            Some(CommandConfiguration::RatingRange { min: 1.0, max: 5.0 })
        );
        assert_eq!(
            center.configuration(PlatformCommand::Like),
            Some(CommandConfiguration::Feedback {
                is_active: true,
                localized_title: "Love it".to_string(),
            })
        );
    }

    #[test]
    fn plain_commands_push_no_configuration() {
        let center = MemoryCommandCenter::default();

        let slot = to_platform_command(&RemoteCommand::NextTrack, &center);

        assert_eq!(slot, PlatformCommand::NextTrack);
        assert_eq!(center.configuration(slot), None);
    }

    #[test]
    fn invalidate_disables_every_slot() {
        let center = MemoryCommandCenter::default();
        for command in PlatformCommand::ALL {
            center.set_enabled(command, true);
        }

        invalidate_all_commands(&center);

        assert!(center.enabled_commands().is_empty());
    }

    #[test]
    fn commands_sharing_a_slot_keep_the_last() {
        let like = |title: &str| RemoteCommand::Like {
            is_active: true,
            title: title.to_string(),
        };
        let commands = [
            like("first"),
            RemoteCommand::Play,
            like("second"),
            RemoteCommand::Play,
            RemoteCommand::ChangeLanguageOption { is_enabled: true },
            RemoteCommand::ChangeLanguageOption { is_enabled: false },
        ];

        let claimed = one_per_slot(&commands);

        assert_eq!(
            claimed,
            vec![
                &like("second"),
                &RemoteCommand::Play,
                &RemoteCommand::ChangeLanguageOption { is_enabled: true },
                &RemoteCommand::ChangeLanguageOption { is_enabled: false },
            ]
        );
    }
}

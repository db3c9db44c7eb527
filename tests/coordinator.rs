//! Integration tests for the now-playing coordinator against the in-memory platform.

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::collections::BTreeSet;

use futures::StreamExt;
use image::{DynamicImage, Rgb, RgbImage};
use nowplaying::services::now_playing::{
    Artwork, CategoryOptions, Coordinator, CoordinatorState,
    DynamicNowPlayingInfo, MemoryPlatform, NowPlayingError, Platform, PlatformCommand,
    RawCommandEvent, RemoteCommand, SessionCategory, SessionError, SessionMode, StaticNowPlayingInfo,
};

fn setup() -> (MemoryPlatform, Coordinator) {
    let platform = MemoryPlatform::new();
    let coordinator = Coordinator::new(Platform::from(&platform)).unwrap();
    (platform, coordinator)
}

fn artwork(shade: u8) -> Artwork {
    Artwork::new(DynamicImage::ImageRgb8(RgbImage::from_pixel(
        32,
        24,
        Rgb([shade, 40, 200]),
    )))
}

mod metadata_updates {
    use super::*;

    #[tokio::test]
    async fn static_info_is_published_with_defaults_filled() {
        let (platform, coordinator) = setup();

        coordinator
            .update_static_info(StaticNowPlayingInfo::new("Freddie Freeloader", 589.0))
            .await
            .unwrap();

        let info = platform.info_center.now_playing_info().unwrap();
        assert_eq!(info.title, "Freddie Freeloader");
        assert_eq!(info.artist, "Unknown");
        assert_eq!(info.album_title, "");
        assert_eq!(info.playback_duration, 589.0);
        assert!(info.artwork.is_none());
        assert!(platform.audio_session.is_active());
    }

    #[tokio::test]
    async fn negative_duration_is_rejected_without_publishing() {
        let (platform, coordinator) = setup();
        coordinator
            .update_static_info(StaticNowPlayingInfo::new("First", 10.0))
            .await
            .unwrap();
        let before = platform.info_center.now_playing_info();
        let publishes = platform.info_center.publish_count();

        let result = coordinator
            .update_static_info(StaticNowPlayingInfo::new("Second", -1.0))
            .await;

        assert_eq!(result, Err(NowPlayingError::InvalidDuration));
        assert_eq!(platform.info_center.now_playing_info(), before);
        assert_eq!(platform.info_center.publish_count(), publishes);
    }

    #[tokio::test]
    async fn negative_playback_state_is_rejected() {
        let (platform, coordinator) = setup();

        let elapsed = coordinator
            .update_dynamic_info(DynamicNowPlayingInfo::new(-0.5, 1.0))
            .await;
        let rate = coordinator
            .update_dynamic_info(DynamicNowPlayingInfo::new(3.0, -1.0))
            .await;

        assert_eq!(elapsed, Err(NowPlayingError::InvalidPlaybackState));
        assert_eq!(rate, Err(NowPlayingError::InvalidPlaybackState));
        assert_eq!(platform.info_center.publish_count(), 0);
    }

    #[tokio::test]
    async fn dynamic_info_keeps_static_fields() {
        let (platform, coordinator) = setup();
        coordinator
            .update_static_info(StaticNowPlayingInfo::new("Blue in Green", 337.0).with_artist("Bill Evans"))
            .await
            .unwrap();

        coordinator
            .update_dynamic_info(DynamicNowPlayingInfo::new(42.0, 1.0))
            .await
            .unwrap();

        let info = platform.info_center.now_playing_info().unwrap();
        assert_eq!(info.title, "Blue in Green");
        assert_eq!(info.artist, "Bill Evans");
        assert_eq!(info.elapsed_playback_time, 42.0);
        assert_eq!(info.playback_rate, 1.0);
    }

    #[tokio::test]
    async fn changed_artwork_is_published() {
        let (platform, coordinator) = setup();
        coordinator
            .update_static_info(StaticNowPlayingInfo::new("A", 1.0).with_artwork(artwork(10)))
            .await
            .unwrap();

        coordinator
            .update_static_info(StaticNowPlayingInfo::new("B", 1.0).with_artwork(artwork(250)))
            .await
            .unwrap();

        let info = platform.info_center.now_playing_info().unwrap();
        assert_eq!(info.artwork, Some(artwork(250)));
        assert_eq!(info.artwork_bounds.map(|b| (b.width, b.height)), Some((32, 24)));
    }

    #[tokio::test]
    async fn activation_failure_surfaces_as_session_inactive() {
        let (platform, coordinator) = setup();
        platform.audio_session.set_fail_activation(true);

        let result = coordinator
            .update_static_info(StaticNowPlayingInfo::new("Muted", 5.0))
            .await;

        assert_eq!(result, Err(NowPlayingError::AudioSessionInactive));
        assert!(platform.info_center.now_playing_info().is_none());
    }
}

mod session {
    use super::*;

    #[tokio::test]
    async fn initialize_configures_and_activates() {
        let (platform, coordinator) = setup();

        coordinator
            .initialize_audio_session(
                SessionCategory::Playback,
                SessionMode::MoviePlayback,
                CategoryOptions::ALLOW_BLUETOOTH_A2DP | CategoryOptions::ALLOW_AIR_PLAY,
            )
            .await
            .unwrap();

        assert!(platform.audio_session.is_active());
        assert_eq!(
            platform.audio_session.category(),
            Some((
                SessionCategory::Playback,
                SessionMode::MoviePlayback,
                CategoryOptions::ALLOW_BLUETOOTH_A2DP | CategoryOptions::ALLOW_AIR_PLAY
            ))
        );
        assert_eq!(coordinator.state(), CoordinatorState::Configured);
    }

    #[tokio::test]
    async fn rejected_category_is_returned_as_is() {
        let (platform, coordinator) = setup();
        platform.audio_session.set_reject_category(true);

        let result = coordinator
            .initialize_audio_session(
                SessionCategory::Record,
                SessionMode::Default,
                CategoryOptions::empty(),
            )
            .await;

        assert!(matches!(
            result,
            Err(NowPlayingError::Session(SessionError::CategoryRejected(_)))
        ));
        assert!(!platform.audio_session.is_active());
        assert_eq!(coordinator.state(), CoordinatorState::Idle);
    }
}

mod lifecycle {
    use super::*;

    #[test]
    fn construction_needs_no_ambient_runtime() {
        let platform = MemoryPlatform::new();

        let coordinator = Coordinator::new(Platform::from(&platform)).unwrap();

        assert_eq!(coordinator.state(), CoordinatorState::Idle);
    }

    #[tokio::test]
    async fn state_changes_are_observable() {
        let (_platform, coordinator) = setup();
        let mut states = Box::pin(coordinator.state_monitored());

        assert_eq!(states.next().await, Some(CoordinatorState::Idle));

        coordinator
            .initialize_audio_session(
                SessionCategory::Playback,
                SessionMode::Default,
                CategoryOptions::empty(),
            )
            .await
            .unwrap();
        assert_eq!(states.next().await, Some(CoordinatorState::Configured));

        coordinator.reset().await.unwrap();
        assert_eq!(states.next().await, Some(CoordinatorState::Idle));
    }

    #[tokio::test]
    async fn reset_returns_everything_to_idle() {
        let (platform, coordinator) = setup();
        coordinator
            .initialize_audio_session(
                SessionCategory::Playback,
                SessionMode::Default,
                CategoryOptions::empty(),
            )
            .await
            .unwrap();
        coordinator
            .update_static_info(StaticNowPlayingInfo::new("Flamenco Sketches", 566.0).with_artwork(artwork(1)))
            .await
            .unwrap();
        let _events = coordinator.interruption_events().await.unwrap();
        let _commands = coordinator
            .remote_command_events([RemoteCommand::Play])
            .await
            .unwrap();

        coordinator.reset().await.unwrap();

        assert!(platform.info_center.now_playing_info().is_none());
        assert!(platform.command_center.enabled_commands().is_empty());
        assert_eq!(platform.command_center.target_count(PlatformCommand::Play), 0);
        assert!(!platform.command_center.is_receiving_remote_control_events());
        assert!(!platform.audio_session.is_active());
        assert_eq!(platform.audio_session.observer_count(), 0);
        assert_eq!(coordinator.state(), CoordinatorState::Idle);
    }

    #[tokio::test]
    async fn reset_is_idempotent_and_ignores_deactivation_failure() {
        let (platform, coordinator) = setup();
        platform.audio_session.set_fail_deactivation(true);

        coordinator.reset().await.unwrap();
        coordinator.reset().await.unwrap();

        assert_eq!(coordinator.state(), CoordinatorState::Idle);
        assert_eq!(platform.command_center.enabled_commands(), BTreeSet::new());
    }

    #[tokio::test]
    async fn published_form_after_reset_has_documented_defaults() {
        let (platform, coordinator) = setup();
        coordinator
            .update_static_info(StaticNowPlayingInfo::new("Before", 100.0).with_artwork(artwork(9)))
            .await
            .unwrap();
        coordinator.reset().await.unwrap();

        coordinator
            .update_dynamic_info(DynamicNowPlayingInfo::new(0.0, 0.0))
            .await
            .unwrap();

        let info = platform.info_center.now_playing_info().unwrap();
        assert_eq!(info.title, "Unknown");
        assert_eq!(info.artist, "Unknown");
        assert_eq!(info.album_title, "");
        assert_eq!(info.playback_duration, 0.0);
        assert_eq!(info.elapsed_playback_time, 0.0);
        assert_eq!(info.playback_rate, 0.0);
        assert!(info.artwork.is_none());
        assert!(info.artwork_bounds.is_none());
    }

    #[tokio::test]
    async fn clones_share_one_main_context() {
        let (platform, coordinator) = setup();
        let other = coordinator.clone();

        let (a, b) = tokio::join!(
            coordinator.update_static_info(StaticNowPlayingInfo::new("One", 1.0)),
            other.update_dynamic_info(DynamicNowPlayingInfo::new(0.5, 1.0)),
        );

        a.unwrap();
        b.unwrap();
        assert_eq!(platform.info_center.publish_count(), 2);
        assert_eq!(other.state(), coordinator.state());
    }

    #[tokio::test]
    async fn raw_dispatch_to_disabled_slot_is_ignored() {
        let (platform, _coordinator) = setup();

        let status = platform
            .command_center
            .dispatch(RawCommandEvent::plain(PlatformCommand::Play));

        assert_eq!(status, None);
    }

    #[tokio::test]
    async fn operations_complete_in_submission_order() {
        let (platform, coordinator) = setup();

        for i in 0..20 {
            coordinator
                .update_dynamic_info(DynamicNowPlayingInfo::new(f64::from(i), 1.0))
                .await
                .unwrap();
        }

        let info = platform.info_center.now_playing_info().unwrap();
        assert_eq!(info.elapsed_playback_time, 19.0);
    }
}

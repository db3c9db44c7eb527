//! Exercise the now-playing coordinator against the in-memory platform.
use std::{error::Error, path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};
use futures::StreamExt;
use image::{DynamicImage, Rgb, RgbImage};
use nowplaying::{
    config::NowPlayingConfig,
    services::now_playing::{
        Artwork, CommandPayload, CommandStatus, Coordinator, DynamicNowPlayingInfo, Handler,
        InterruptionNotification, InterruptionOptions, MemoryPlatform, Platform, PlatformCommand,
        RawCommandEvent, RemoteCommand, RemoteCommandHandlers, StaticNowPlayingInfo,
    },
    tracing_config,
};
use serde::Serialize;
use serde_json::json;
use tracing::info;

const EVENT_WAIT: Duration = Duration::from_secs(1);

#[derive(Parser)]
#[command(name = "nowplaying-debug")]
#[command(about = "Drive the now-playing coordinator against an in-memory platform")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish a track, inject hardware events and interruptions, print the outcome
    Simulate {
        /// Configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Also write logs to daily-rotated files in this directory
        #[arg(long)]
        log_dir: Option<PathBuf>,
    },
    /// Print the configuration JSON schema
    Schema,
}

#[derive(Serialize)]
struct Dispatched {
    command: PlatformCommand,
    status: Option<CommandStatus>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { config, log_dir } => {
            let config = match config {
                Some(path) => NowPlayingConfig::load(&path)?,
                None => NowPlayingConfig::default(),
            };

            let _guard = match log_dir {
                Some(dir) => Some(tracing_config::init_with_file(config.general.log_level, &dir)?),
                None => {
                    tracing_config::init(config.general.log_level)?;
                    None
                }
            };

            let report = simulate(&config).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Schema => {
            let schema = NowPlayingConfig::json_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}

fn handlers(config: &NowPlayingConfig) -> RemoteCommandHandlers {
    RemoteCommandHandlers::new()
        .with_handler(
            RemoteCommand::Play,
            Handler::action(|| {
                info!("Play pressed");
                CommandStatus::Success
            }),
        )
        .with_handler(
            RemoteCommand::Pause,
            Handler::action(|| CommandStatus::NoActionableNowPlayingItem),
        )
        .with_handler(
            RemoteCommand::SkipForward {
                intervals: config.commands.skip_intervals.clone(),
            },
            Handler::async_time_interval_action(|interval| async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                info!(interval, "Skipped forward");
                Ok(CommandStatus::Success)
            }),
        )
        .with_handler(
            RemoteCommand::ChangePlaybackRate {
                rates: config.commands.playback_rates.clone(),
            },
            Handler::float_action(|rate| {
                info!(rate, "Rate changed");
                CommandStatus::Success
            }),
        )
}

fn sample_artwork() -> Artwork {
    let image = RgbImage::from_fn(64, 64, |x, y| Rgb([(x * 4) as u8, (y * 4) as u8, 128]));
    Artwork::new(DynamicImage::ImageRgb8(image))
}

async fn dispatch_all(
    platform: &MemoryPlatform,
    events: Vec<RawCommandEvent>,
) -> Result<Vec<Dispatched>, Box<dyn Error>> {
    let center = platform.command_center.clone();

    let dispatched: Vec<Dispatched> = tokio::task::spawn_blocking(move || {
        events
            .into_iter()
            .map(|event| Dispatched {
                command: event.command,
                status: center.dispatch(event),
            })
            .collect()
    })
    .await?;

    Ok(dispatched)
}

async fn simulate(config: &NowPlayingConfig) -> Result<serde_json::Value, Box<dyn Error>> {
    let platform = MemoryPlatform::new();
    let coordinator =
        Coordinator::with_handler_timeout(Platform::from(&platform), config.bridge.handler_timeout())?;

    coordinator
        .initialize_audio_session(
            config.session.category,
            config.session.mode,
            config.session.category_options(),
        )
        .await?;
    coordinator.setup_remote_commands(handlers(config)).await?;

    coordinator
        .update_static_info(
            StaticNowPlayingInfo::new("So What", 562.0)
                .with_artist("Miles Davis")
                .with_album("Kind of Blue")
                .with_artwork(sample_artwork()),
        )
        .await?;
    coordinator
        .update_dynamic_info(DynamicNowPlayingInfo::new(12.5, 1.0))
        .await?;

    let handled = dispatch_all(
        &platform,
        vec![
            RawCommandEvent::plain(PlatformCommand::Play),
            RawCommandEvent::plain(PlatformCommand::Pause),
            RawCommandEvent::new(PlatformCommand::SkipForward, CommandPayload::SkipInterval(15.0)),
            RawCommandEvent::new(
                PlatformCommand::ChangePlaybackRate,
                CommandPayload::PlaybackRate(1.5),
            ),
            RawCommandEvent::new(PlatformCommand::Rating, CommandPayload::Rating(4.0)),
        ],
    )
    .await?;

    let mut interruptions = coordinator.interruption_events().await?;
    platform
        .audio_session
        .post_interruption(InterruptionNotification::began());
    platform
        .audio_session
        .post_interruption(InterruptionNotification::default());
    platform
        .audio_session
        .post_interruption(InterruptionNotification::ended(InterruptionOptions::SHOULD_RESUME));

    let mut interruption_log = Vec::new();
    while let Ok(Some(event)) = tokio::time::timeout(EVENT_WAIT, interruptions.next()).await {
        interruption_log.push(event);
        if interruption_log.len() == 2 {
            break;
        }
    }
    interruptions.close().await?;

    let mut command_events = coordinator
        .remote_command_events([RemoteCommand::NextTrack, RemoteCommand::ChangePlaybackPosition])
        .await?;
    let streamed = dispatch_all(
        &platform,
        vec![
            RawCommandEvent::plain(PlatformCommand::NextTrack),
            RawCommandEvent::new(
                PlatformCommand::ChangePlaybackPosition,
                CommandPayload::PlaybackPosition(90.0),
            ),
        ],
    )
    .await?;

    let mut command_log = Vec::new();
    while let Ok(Some(event)) = tokio::time::timeout(EVENT_WAIT, command_events.next()).await {
        command_log.push(event);
        if command_log.len() == streamed.len() {
            break;
        }
    }
    command_events.close().await?;

    let published = platform.info_center.now_playing_info();
    let enabled_after_close = platform.command_center.enabled_commands();

    coordinator.reset().await?;

    Ok(json!({
        "published": published,
        "handled": handled,
        "interruptions": interruption_log,
        "streamed": streamed,
        "command_events": command_log,
        "enabled_after_close": enabled_after_close,
        "enabled_after_reset": platform.command_center.enabled_commands(),
        "session_active_after_reset": platform.audio_session.is_active(),
    }))
}

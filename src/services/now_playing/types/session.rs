use bitflags::bitflags;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Audio session category, describing how the app's audio mixes with others
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionCategory {
    /// Mixable, silenced by the ring switch
    Ambient,
    /// Non-mixable, silenced by the ring switch
    SoloAmbient,
    /// Primary playback, keeps playing in the background
    #[default]
    Playback,
    /// Recording only
    Record,
    /// Simultaneous recording and playback
    PlayAndRecord,
    /// Multiple input and output routes
    MultiRoute,
}

/// Audio session mode, specialising a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    /// No specialisation
    #[default]
    Default,
    /// Two-way voice communication
    VoiceChat,
    /// Game voice chat
    GameChat,
    /// Video capture
    VideoRecording,
    /// Minimal signal processing
    Measurement,
    /// Film or show playback
    MoviePlayback,
    /// Two-way video communication
    VideoChat,
    /// Podcasts and audiobooks
    SpokenAudio,
    /// Short spoken prompts
    VoicePrompt,
}

bitflags! {
    /// Category options controlling mixing and routing
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CategoryOptions: u32 {
        /// Mix with audio from other apps
        const MIX_WITH_OTHERS = 0x1;
        /// Lower other apps' volume while playing
        const DUCK_OTHERS = 0x2;
        /// Allow hands-free Bluetooth input
        const ALLOW_BLUETOOTH = 0x4;
        /// Route to the speaker instead of the receiver
        const DEFAULT_TO_SPEAKER = 0x8;
        /// Interrupt spoken-audio apps and mix with the rest
        const INTERRUPT_SPOKEN_AUDIO_AND_MIX_WITH_OTHERS = 0x11;
        /// Allow A2DP Bluetooth output
        const ALLOW_BLUETOOTH_A2DP = 0x20;
        /// Allow AirPlay output
        const ALLOW_AIR_PLAY = 0x40;
        /// Keep running when the microphone is muted
        const OVERRIDE_MUTED_MICROPHONE_INTERRUPTION = 0x80;
    }
}

/// Named category option, as written in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CategoryOption {
    /// See [`CategoryOptions::MIX_WITH_OTHERS`]
    MixWithOthers,
    /// See [`CategoryOptions::DUCK_OTHERS`]
    DuckOthers,
    /// See [`CategoryOptions::ALLOW_BLUETOOTH`]
    AllowBluetooth,
    /// See [`CategoryOptions::DEFAULT_TO_SPEAKER`]
    DefaultToSpeaker,
    /// See [`CategoryOptions::INTERRUPT_SPOKEN_AUDIO_AND_MIX_WITH_OTHERS`]
    InterruptSpokenAudioAndMixWithOthers,
    /// See [`CategoryOptions::ALLOW_BLUETOOTH_A2DP`]
    AllowBluetoothA2dp,
    /// See [`CategoryOptions::ALLOW_AIR_PLAY`]
    AllowAirPlay,
    /// See [`CategoryOptions::OVERRIDE_MUTED_MICROPHONE_INTERRUPTION`]
    OverrideMutedMicrophoneInterruption,
}

impl From<CategoryOption> for CategoryOptions {
    fn from(option: CategoryOption) -> Self {
        match option {
            CategoryOption::MixWithOthers => Self::MIX_WITH_OTHERS,
            CategoryOption::DuckOthers => Self::DUCK_OTHERS,
            CategoryOption::AllowBluetooth => Self::ALLOW_BLUETOOTH,
            CategoryOption::DefaultToSpeaker => Self::DEFAULT_TO_SPEAKER,
            CategoryOption::InterruptSpokenAudioAndMixWithOthers => {
                Self::INTERRUPT_SPOKEN_AUDIO_AND_MIX_WITH_OTHERS
            }
            CategoryOption::AllowBluetoothA2dp => Self::ALLOW_BLUETOOTH_A2DP,
            CategoryOption::AllowAirPlay => Self::ALLOW_AIR_PLAY,
            CategoryOption::OverrideMutedMicrophoneInterruption => {
                Self::OVERRIDE_MUTED_MICROPHONE_INTERRUPTION
            }
        }
    }
}

impl FromIterator<CategoryOption> for CategoryOptions {
    fn from_iter<I: IntoIterator<Item = CategoryOption>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |options, option| options | option.into())
    }
}

/// Now-playing and remote-control integration
pub mod now_playing;

pub use now_playing::{
    Coordinator, LiveNowPlayingService, NoopNowPlayingService, NowPlayingError,
    NowPlayingService,
};

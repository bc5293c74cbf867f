//! Short-form video player.
//!
//! [`ShortFormPlayer`] is a plain state machine. Inputs (buttons, keys,
//! touches, media events) go in; [`MediaCommand`]s for the media element and
//! [`AutoAdvance`] timer requests come out. The front end owns the timer and
//! calls [`ShortFormPlayer::auto_advance`] with the token when it fires.

mod keys;
mod swipe;

pub use keys::{KeyBindings, PlayerAction};
pub use swipe::{SwipeDirection, SwipeTracker};

use std::time::Duration;

use tracing::{debug, warn};

use brainrot_client::BackendApi;
use brainrot_models::{format_duration, format_timestamp, MediaOrigin, Video};

use crate::error::{FlowError, FlowResult};
use crate::gallery::load_videos;
use crate::screen::{parse_index, Screen};
use crate::store::SessionStore;

const LOAD_FAILED_MESSAGE: &str = "Failed to load videos. Please try again.";
const NO_VIDEOS_MESSAGE: &str = "No videos available.";

/// Player behaviour settings.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Horizontal displacement a swipe must exceed
    pub swipe_threshold_px: f64,
    /// Pause between the end of one video and the start of the next
    pub auto_advance_delay: Duration,
    pub key_bindings: KeyBindings,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: 50.0,
            auto_advance_delay: Duration::from_millis(1500),
            key_bindings: KeyBindings::default(),
        }
    }
}

/// Instruction for the media element.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCommand {
    /// Load a new source from position 0
    Load { url: String, autoplay: bool },
    Play,
    Pause,
    Seek { position_secs: f64 },
}

/// Request to call [`ShortFormPlayer::auto_advance`] after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoAdvance {
    pub token: u64,
    pub delay: Duration,
}

/// Player over a non-empty, ordered list of videos.
#[derive(Debug, Clone)]
pub struct ShortFormPlayer {
    videos: Vec<Video>,
    index: usize,
    origin: MediaOrigin,
    keys: KeyBindings,
    auto_advance_delay: Duration,
    swipe: SwipeTracker,
    is_playing: bool,
    position: f64,
    media_duration: Option<f64>,
    /// Bumped on every navigation; stale auto-advance tokens are ignored
    nav_token: u64,
}

impl ShortFormPlayer {
    /// Open the player. The initial index is clamped into range.
    pub fn new(
        videos: Vec<Video>,
        initial_index: usize,
        origin: MediaOrigin,
        config: &PlayerConfig,
    ) -> FlowResult<Self> {
        if videos.is_empty() {
            return Err(FlowError::NoVideos);
        }
        config.key_bindings.validate()?;

        let index = initial_index.min(videos.len() - 1);
        if index != initial_index {
            debug!(requested = initial_index, index, "Clamped player index");
        }

        Ok(Self {
            videos,
            index,
            origin,
            keys: config.key_bindings.clone(),
            auto_advance_delay: config.auto_advance_delay,
            swipe: SwipeTracker::new(config.swipe_threshold_px),
            is_playing: false,
            position: 0.0,
            media_duration: None,
            nav_token: 0,
        })
    }

    /// Command that loads the initial video. Playback waits for the user.
    pub fn initial_command(&self) -> MediaCommand {
        MediaCommand::Load {
            url: self.media_url(),
            autoplay: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn current_video(&self) -> &Video {
        &self.videos[self.index]
    }

    /// Absolute URL of the current video.
    pub fn media_url(&self) -> String {
        self.origin.resolve(&self.current_video().url)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn position_secs(&self) -> f64 {
        self.position
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn can_go_previous(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.index + 1 < self.videos.len()
    }

    /// Move to the next video; `None` on the last one.
    pub fn next_video(&mut self) -> Option<MediaCommand> {
        self.can_go_next().then(|| self.go_to(self.index + 1))
    }

    /// Move to the previous video; `None` on the first one.
    pub fn prev_video(&mut self) -> Option<MediaCommand> {
        self.can_go_previous().then(|| self.go_to(self.index - 1))
    }

    fn go_to(&mut self, index: usize) -> MediaCommand {
        self.index = index;
        self.position = 0.0;
        self.media_duration = None;
        self.nav_token += 1;
        MediaCommand::Load {
            url: self.media_url(),
            autoplay: self.is_playing,
        }
    }

    // =========================================================================
    // Transport
    // =========================================================================

    pub fn toggle_play(&mut self) -> MediaCommand {
        self.is_playing = !self.is_playing;
        if self.is_playing {
            MediaCommand::Play
        } else {
            MediaCommand::Pause
        }
    }

    /// Media element reported a new position.
    pub fn time_update(&mut self, position_secs: f64, duration_secs: f64) {
        if position_secs.is_finite() {
            self.position = position_secs.max(0.0);
        }
        if duration_secs.is_finite() && duration_secs > 0.0 {
            self.media_duration = Some(duration_secs);
        }
    }

    /// Duration used for seeking and labels: reported by the media element
    /// when known, otherwise the declared one.
    pub fn duration_secs(&self) -> f64 {
        self.media_duration
            .unwrap_or_else(|| f64::from(self.current_video().duration))
    }

    /// Progress bar fill, 0-100.
    pub fn progress_percent(&self) -> f64 {
        let duration = self.duration_secs();
        if duration <= 0.0 {
            return 0.0;
        }
        (self.position / duration * 100.0).clamp(0.0, 100.0)
    }

    /// Seek to the position matching a click on the progress track.
    pub fn seek(&mut self, click_x: f64, track_width: f64) -> Option<MediaCommand> {
        if !(track_width.is_finite() && track_width > 0.0) || !click_x.is_finite() {
            return None;
        }
        let fraction = (click_x / track_width).clamp(0.0, 1.0);
        let position_secs = fraction * self.duration_secs();
        self.position = position_secs;
        Some(MediaCommand::Seek { position_secs })
    }

    /// The current video finished. Returns a timer request unless it was the
    /// last one.
    pub fn playback_ended(&mut self) -> Option<AutoAdvance> {
        self.is_playing = false;
        self.can_go_next().then_some(AutoAdvance {
            token: self.nav_token,
            delay: self.auto_advance_delay,
        })
    }

    /// Timer from [`playback_ended`](Self::playback_ended) fired.
    ///
    /// Ignored when the user navigated in the meantime.
    pub fn auto_advance(&mut self, token: u64) -> Option<MediaCommand> {
        if token != self.nav_token || !self.can_go_next() {
            debug!(token, current = self.nav_token, "Ignoring stale auto-advance");
            return None;
        }
        self.is_playing = true;
        Some(self.go_to(self.index + 1))
    }

    // =========================================================================
    // Input
    // =========================================================================

    pub fn touch_start(&mut self, x: f64) {
        self.swipe.touch_start(x);
    }

    pub fn touch_move(&mut self, x: f64) -> Option<SwipeDirection> {
        self.swipe.touch_move(x)
    }

    /// Apply at most one navigation for the finished gesture.
    pub fn touch_end(&mut self) -> Option<MediaCommand> {
        match self.swipe.touch_end()? {
            SwipeDirection::Forward => self.next_video(),
            SwipeDirection::Backward => self.prev_video(),
        }
    }

    pub fn apply(&mut self, action: PlayerAction) -> Option<MediaCommand> {
        match action {
            PlayerAction::Previous => self.prev_video(),
            PlayerAction::Next => self.next_video(),
            PlayerAction::TogglePlay => Some(self.toggle_play()),
        }
    }

    pub fn key_bindings(&self) -> &KeyBindings {
        &self.keys
    }

    pub fn handle_key(&mut self, key: &str) -> Option<MediaCommand> {
        let action = self.keys.action_for(key)?;
        self.apply(action)
    }

    // =========================================================================
    // View helpers
    // =========================================================================

    /// `"i / N"`, 1-based.
    pub fn counter_label(&self) -> String {
        format!("{} / {}", self.index + 1, self.videos.len())
    }

    pub fn show_swipe_hint(&self) -> bool {
        self.videos.len() > 1
    }

    /// Overlay text while a swipe past the threshold is pending.
    pub fn swipe_overlay(&self) -> Option<&'static str> {
        self.swipe.pending().map(|d| d.hint())
    }

    pub fn elapsed_label(&self) -> String {
        format_timestamp(self.position)
    }

    pub fn duration_label(&self) -> String {
        match self.media_duration {
            Some(secs) => format_timestamp(secs),
            None => format_duration(self.current_video().duration),
        }
    }

    pub fn back_link(&self) -> Screen {
        Screen::Results
    }
}

/// The player screen after loading.
#[derive(Debug, Clone)]
pub enum PlayerPage {
    Ready(ShortFormPlayer),
    Empty { message: &'static str },
    Error { message: &'static str, back: Screen },
}

impl PlayerPage {
    /// Load the videos and open the player at the `index` query value.
    pub async fn open(
        api: &dyn BackendApi,
        store: &SessionStore,
        index_param: Option<&str>,
        config: &PlayerConfig,
    ) -> Self {
        let index = index_param.map(parse_index).unwrap_or(0);

        let videos = match load_videos(api, store).await {
            Ok(videos) => videos,
            Err(e) => {
                warn!("Failed to load videos for player: {}", e);
                return PlayerPage::Error {
                    message: LOAD_FAILED_MESSAGE,
                    back: Screen::Results,
                };
            }
        };

        match ShortFormPlayer::new(videos, index, api.media_origin(), config) {
            Ok(player) => PlayerPage::Ready(player),
            Err(FlowError::NoVideos) => PlayerPage::Empty {
                message: NO_VIDEOS_MESSAGE,
            },
            Err(e) => {
                warn!("Cannot open player: {}", e);
                PlayerPage::Error {
                    message: LOAD_FAILED_MESSAGE,
                    back: Screen::Results,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{videos, ScriptedBackend};

    fn player(n: usize, index: usize) -> ShortFormPlayer {
        let ids: Vec<String> = (0..n).map(|i| format!("v{i}")).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        ShortFormPlayer::new(
            videos(&refs),
            index,
            MediaOrigin::default(),
            &PlayerConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_navigation_clamps_without_wraparound() {
        let mut p = player(3, 0);
        assert!(p.prev_video().is_none());
        assert_eq!(p.index(), 0);

        p.next_video();
        p.next_video();
        assert_eq!(p.index(), 2);
        assert!(p.next_video().is_none());
        assert_eq!(p.counter_label(), "3 / 3");
        assert!(!p.can_go_next());
        assert!(p.can_go_previous());
    }

    #[test]
    fn test_navigation_resets_position_and_keeps_play_state() {
        let mut p = player(2, 0);
        p.toggle_play();
        p.time_update(12.5, 60.0);

        let cmd = p.next_video().unwrap();

        assert_eq!(
            cmd,
            MediaCommand::Load {
                url: "http://localhost:8000/videos/v1.mp4".to_string(),
                autoplay: true
            }
        );
        assert_eq!(p.position_secs(), 0.0);
        assert_eq!(p.elapsed_label(), "0:00");
    }

    #[test]
    fn test_initial_index_is_clamped() {
        assert_eq!(player(3, 99).index(), 2);
        assert_eq!(player(1, 5).counter_label(), "1 / 1");
    }

    #[test]
    fn test_empty_list_is_rejected() {
        let err = ShortFormPlayer::new(vec![], 0, MediaOrigin::default(), &PlayerConfig::default())
            .unwrap_err();
        assert!(matches!(err, FlowError::NoVideos));
    }

    #[test]
    fn test_toggle_play() {
        let mut p = player(1, 0);
        assert_eq!(p.initial_command(), MediaCommand::Load {
            url: "http://localhost:8000/videos/v0.mp4".to_string(),
            autoplay: false,
        });
        assert_eq!(p.toggle_play(), MediaCommand::Play);
        assert!(p.is_playing());
        assert_eq!(p.toggle_play(), MediaCommand::Pause);
        assert!(!p.is_playing());
    }

    #[test]
    fn test_seek_maps_click_to_time() {
        let mut p = player(1, 0);
        p.time_update(0.0, 80.0);

        assert_eq!(p.seek(50.0, 200.0), Some(MediaCommand::Seek { position_secs: 20.0 }));
        assert_eq!(p.progress_percent(), 25.0);
        assert_eq!(p.seek(500.0, 200.0), Some(MediaCommand::Seek { position_secs: 80.0 }));
        assert_eq!(p.seek(-5.0, 200.0), Some(MediaCommand::Seek { position_secs: 0.0 }));
        assert_eq!(p.seek(10.0, 0.0), None);
    }

    #[test]
    fn test_seek_uses_declared_duration_before_metadata() {
        let mut p = player(1, 0);
        assert_eq!(p.duration_label(), "1:00");
        assert_eq!(p.seek(100.0, 200.0), Some(MediaCommand::Seek { position_secs: 30.0 }));
        assert_eq!(p.elapsed_label(), "0:30");
    }

    #[test]
    fn test_auto_advance_after_end() {
        let mut p = player(3, 0);
        p.toggle_play();

        let timer = p.playback_ended().unwrap();
        assert!(!p.is_playing());
        assert_eq!(timer.delay, Duration::from_millis(1500));

        let cmd = p.auto_advance(timer.token).unwrap();
        assert_eq!(p.index(), 1);
        assert!(p.is_playing());
        assert!(matches!(cmd, MediaCommand::Load { autoplay: true, .. }));
    }

    #[test]
    fn test_auto_advance_is_cancelled_by_navigation() {
        let mut p = player(3, 0);
        let timer = p.playback_ended().unwrap();
        p.next_video();

        assert!(p.auto_advance(timer.token).is_none());
        assert_eq!(p.index(), 1);
    }

    #[test]
    fn test_last_video_end_does_not_advance() {
        let mut p = player(2, 1);
        assert!(p.playback_ended().is_none());
        assert_eq!(p.index(), 1);
    }

    #[test]
    fn test_swipe_navigates_once() {
        let mut p = player(3, 1);
        p.touch_start(300.0);
        p.touch_move(240.0);
        assert_eq!(p.swipe_overlay(), Some("Next Video"));
        p.touch_move(100.0);
        assert!(p.touch_end().is_some());
        assert_eq!(p.index(), 2);
        assert_eq!(p.swipe_overlay(), None);

        p.touch_start(100.0);
        p.touch_move(140.0);
        assert!(p.touch_end().is_none());
        assert_eq!(p.index(), 2);

        p.touch_start(100.0);
        p.touch_move(200.0);
        p.touch_end();
        assert_eq!(p.index(), 1);
    }

    #[test]
    fn test_keyboard() {
        let mut p = player(3, 1);
        p.handle_key("j");
        assert_eq!(p.index(), 2);
        p.handle_key("k");
        p.handle_key("ArrowUp");
        assert_eq!(p.index(), 0);
        p.handle_key("ArrowDown");
        assert_eq!(p.index(), 1);

        assert_eq!(p.handle_key(" "), Some(MediaCommand::Play));
        assert_eq!(p.handle_key("Escape"), None);
    }

    #[test]
    fn test_swipe_hint_needs_two_videos() {
        assert!(!player(1, 0).show_swipe_hint());
        assert!(player(2, 0).show_swipe_hint());
    }

    #[tokio::test]
    async fn test_open_uses_session_videos() {
        let api = ScriptedBackend::new();
        let store = SessionStore::new();
        let flow = store.begin_flow().await;
        store.store_videos(flow, videos(&["a", "b", "c"])).await;

        let page = PlayerPage::open(&api, &store, Some("1"), &PlayerConfig::default()).await;

        match page {
            PlayerPage::Ready(p) => {
                assert_eq!(p.index(), 1);
                assert_eq!(p.counter_label(), "2 / 3");
            }
            other => panic!("unexpected page: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_open_with_invalid_index_starts_at_zero() {
        let api = ScriptedBackend::new().with_videos(videos(&["a", "b"]));
        let store = SessionStore::new();

        let page = PlayerPage::open(&api, &store, Some("abc"), &PlayerConfig::default()).await;
        assert!(matches!(page, PlayerPage::Ready(ref p) if p.index() == 0));
    }

    #[tokio::test]
    async fn test_open_with_oversized_index_starts_at_last() {
        let api = ScriptedBackend::new().with_videos(videos(&["a", "b", "c"]));
        let store = SessionStore::new();

        let page = PlayerPage::open(
            &api,
            &store,
            Some("340282366920938463463374607431768211456"),
            &PlayerConfig::default(),
        )
        .await;
        assert!(matches!(page, PlayerPage::Ready(ref p) if p.index() == 2));
    }

    #[tokio::test]
    async fn test_open_without_videos_is_empty() {
        let api = ScriptedBackend::new().with_videos(vec![]);
        let store = SessionStore::new();

        let page = PlayerPage::open(&api, &store, None, &PlayerConfig::default()).await;
        assert!(matches!(page, PlayerPage::Empty { message: "No videos available." }));
    }

    #[tokio::test]
    async fn test_open_fetch_failure_is_error_page() {
        let api = ScriptedBackend::new().with_list_failure();
        let store = SessionStore::new();

        let page = PlayerPage::open(&api, &store, Some("0"), &PlayerConfig::default()).await;
        assert!(matches!(
            page,
            PlayerPage::Error { message: "Failed to load videos. Please try again.", back: Screen::Results }
        ));
    }
}

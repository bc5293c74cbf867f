//! Results gallery.

use tracing::{debug, info, warn};

use brainrot_client::BackendApi;
use brainrot_models::{MediaOrigin, Video, VideoId};

use crate::error::FlowResult;
use crate::screen::Screen;
use crate::store::SessionStore;

/// Videos for the results screen.
///
/// The session's result set wins; without one the backend's list is fetched
/// and cached in the session. An empty list is not cached, so the next load
/// asks the backend again.
pub async fn load_videos(api: &dyn BackendApi, store: &SessionStore) -> FlowResult<Vec<Video>> {
    if let Some(videos) = store.generated_videos().await {
        return Ok(videos);
    }

    info!("No videos in session, fetching from backend");
    let videos = api.list_videos().await?;
    if videos.is_empty() {
        debug!("Backend has no videos yet");
    } else {
        store.cache_videos(videos.clone()).await;
    }
    Ok(videos)
}

/// One card in the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoCard {
    /// Position in the result list
    pub index: usize,
    pub id: VideoId,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub duration_label: String,
    /// Absolute URL of the media file
    pub media_url: String,
    pub open_player: Screen,
}

impl VideoCard {
    fn new(index: usize, video: &Video, origin: &MediaOrigin) -> Self {
        Self {
            index,
            id: video.id.clone(),
            title: video.title.clone(),
            description: video.description_text().to_string(),
            thumbnail_url: video.thumbnail.clone(),
            duration_label: video.duration_label(),
            media_url: origin.resolve(&video.url),
            open_player: Screen::Player { index },
        }
    }
}

/// Results screen content.
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryView {
    Empty {
        title: &'static str,
        message: &'static str,
        call_to_action: Screen,
    },
    Grid { cards: Vec<VideoCard> },
}

impl GalleryView {
    /// Cards in input order; no paging, sorting or filtering.
    pub fn build(videos: &[Video], origin: &MediaOrigin) -> Self {
        if videos.is_empty() {
            return GalleryView::Empty {
                title: "No Videos Found",
                message: "Upload your learning materials to generate videos.",
                call_to_action: Screen::upload_entry(),
            };
        }

        GalleryView::Grid {
            cards: videos
                .iter()
                .enumerate()
                .map(|(index, video)| VideoCard::new(index, video, origin))
                .collect(),
        }
    }

    pub fn cards(&self) -> &[VideoCard] {
        match self {
            GalleryView::Grid { cards } => cards,
            GalleryView::Empty { .. } => &[],
        }
    }
}

/// The results screen after loading.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsPage {
    pub view: GalleryView,
}

impl ResultsPage {
    pub const HEADING: &'static str = "Your Generated Videos";

    /// Load and build the gallery. A failed fetch shows the empty state.
    pub async fn load(api: &dyn BackendApi, store: &SessionStore) -> Self {
        let videos = match load_videos(api, store).await {
            Ok(videos) => videos,
            Err(e) => {
                warn!("Failed to load videos: {}", e);
                Vec::new()
            }
        };

        Self {
            view: GalleryView::build(&videos, &api.media_origin()),
        }
    }

    /// Link to the "make more" upload flow.
    pub fn create_more(&self) -> Screen {
        Screen::upload_entry()
    }
}

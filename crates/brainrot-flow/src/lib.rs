//! Client-side flow for turning learning materials into short videos.
//!
//! This crate provides:
//! - A typed session store handing state between screens
//! - Screen routing and the backend-status banner
//! - Upload coordination and local validation
//! - A cancellable processing poller with an injectable clock
//! - The results gallery view model
//! - The short-form player state machine (navigation, swipe, keyboard,
//!   transport, auto-advance)
//!
//! Nothing here renders; screens are plain values and media-element actions
//! are returned as [`MediaCommand`]s for the front end to apply.

pub mod backend_status;
pub mod clock;
pub mod config;
pub mod error;
pub mod gallery;
pub mod logging;
pub mod player;
pub mod poller;
pub mod processing_view;
pub mod screen;
pub mod selection;
pub mod store;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

pub use backend_status::BackendStatus;
pub use clock::{Clock, TokioClock};
pub use config::FlowConfig;
pub use error::{FlowError, FlowResult};
pub use gallery::{load_videos, GalleryView, ResultsPage, VideoCard};
pub use logging::FlowLogger;
pub use player::{
    AutoAdvance, KeyBindings, MediaCommand, PlayerAction, PlayerConfig, PlayerPage,
    ShortFormPlayer, SwipeDirection, SwipeTracker,
};
pub use poller::{PollState, PollerConfig, PollerHandle, ProcessingPoller};
pub use processing_view::ProcessingView;
pub use screen::Screen;
pub use selection::{AddReport, FileSelection, Rejection, SelectionPolicy};
pub use store::{FlowId, FlowSession, SessionStore};
pub use upload::{FlowEntry, UploadCoordinator};

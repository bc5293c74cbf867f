//! Screens of the client and their routes.

use std::fmt;

/// One screen of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Home,
    UploadAssignment,
    UploadMaterials,
    Processing,
    Results,
    /// Short-form player opened at `index`
    Player { index: usize },
}

impl Screen {
    /// Where a new upload flow starts (and where failures send the user).
    pub fn upload_entry() -> Self {
        Screen::UploadMaterials
    }

    /// Route path including the query string.
    pub fn route(&self) -> String {
        match self {
            Screen::Home => "/".to_string(),
            Screen::UploadAssignment => "/upload-assignment".to_string(),
            Screen::UploadMaterials => "/upload-materials".to_string(),
            Screen::Processing => "/processing".to_string(),
            Screen::Results => "/results".to_string(),
            Screen::Player { index } => format!("/video-player?index={}", index),
        }
    }

    /// Parse a route back into a screen. Unknown paths yield `None`.
    pub fn parse(route: &str) -> Option<Self> {
        let (path, query) = match route.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (route, None),
        };

        let screen = match path.trim_end_matches('/') {
            "" => Screen::Home,
            "/upload-assignment" => Screen::UploadAssignment,
            "/upload-materials" => Screen::UploadMaterials,
            "/processing" => Screen::Processing,
            "/results" => Screen::Results,
            "/video-player" => Screen::Player {
                index: query.and_then(index_param).map(parse_index).unwrap_or(0),
            },
            _ => return None,
        };
        Some(screen)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.route())
    }
}

fn index_param(query: &str) -> Option<&str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "index")
        .map(|(_, value)| value)
}

/// Read the leading decimal digits of a player index; no digits means 0.
///
/// Values too large for `usize` saturate so the player clamps them to the
/// last video.
pub fn parse_index(raw: &str) -> usize {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(usize::MAX)
}

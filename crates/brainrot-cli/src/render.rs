//! Plain-text rendering of the flow's view models.

use brainrot_flow::{
    GalleryView, KeyBindings, MediaCommand, PlayerAction, ProcessingView, Rejection,
    SelectionPolicy, ShortFormPlayer,
};

pub fn processing_line(view: &ProcessingView) -> String {
    format!("[{:>3}%] {}", view.progress, view.status)
}

pub fn processing_report(view: &ProcessingView) -> String {
    let mut out = vec![view.title.to_string(), view.percent_label()];
    out.extend(view.checklist_lines());
    if let Some(error) = &view.error {
        out.push(format!("Error: {}", error));
    }
    out.join("\n")
}

pub fn gallery(view: &GalleryView) -> String {
    match view {
        GalleryView::Empty {
            title,
            message,
            call_to_action,
        } => format!("{}\n{}\nStart here: {}", title, message, call_to_action),
        GalleryView::Grid { cards } => cards
            .iter()
            .map(|card| {
                let mut line = format!(
                    "{:>2}. {} ({})\n    {}",
                    card.index + 1,
                    card.title,
                    card.duration_label,
                    card.media_url
                );
                if !card.description.is_empty() {
                    line.push_str(&format!("\n    {}", card.description));
                }
                line.push_str(&format!("\n    open: {}", card.open_player));
                line
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn rejections(rejected: &[Rejection]) -> Vec<String> {
    rejected.iter().map(|r| format!("Skipped {}", r.message())).collect()
}

/// Picker caption listing what the selection accepts.
pub fn selection_hint(policy: &SelectionPolicy) -> String {
    format!(
        "{}: {} (up to {} file(s))",
        policy.label,
        policy.accepted_label(),
        policy.max_files
    )
}

/// One-line key help built from the active bindings.
pub fn key_help(keys: &KeyBindings) -> String {
    [
        (PlayerAction::Previous, "previous"),
        (PlayerAction::Next, "next"),
        (PlayerAction::TogglePlay, "play/pause"),
    ]
    .iter()
    .filter_map(|(action, name)| {
        let bound: Vec<&str> = keys
            .keys_for(*action)
            .into_iter()
            .map(|k| if k == " " { "space" } else { k })
            .collect();
        (!bound.is_empty()).then(|| format!("{} {}", bound.join("/"), name))
    })
    .collect::<Vec<_>>()
    .join(", ")
}

pub fn player_status(player: &ShortFormPlayer) -> String {
    let state = if player.is_playing() { "playing" } else { "paused" };
    let mut line = format!(
        "[{}] {}  {} / {}  {}",
        player.counter_label(),
        player.current_video().title,
        player.elapsed_label(),
        player.duration_label(),
        state
    );
    if let Some(hint) = player.swipe_overlay() {
        line.push_str(&format!("  ({})", hint));
    }
    line
}

pub fn media_command(command: &MediaCommand) -> String {
    match command {
        MediaCommand::Load { url, autoplay: true } => format!("load {} (autoplay)", url),
        MediaCommand::Load { url, autoplay: false } => format!("load {}", url),
        MediaCommand::Play => "play".to_string(),
        MediaCommand::Pause => "pause".to_string(),
        MediaCommand::Seek { position_secs } => format!("seek {:.1}s", position_secs),
    }
}

//! Subcommand implementations.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;
use tracing::info;

use brainrot_client::{ApiClient, BackendApi};
use brainrot_flow::{
    AutoAdvance, BackendStatus, FlowEntry, MediaCommand, PlayerPage, ProcessingPoller,
    ProcessingView, ResultsPage, SessionStore, ShortFormPlayer, UploadCoordinator,
};

use crate::config::AppConfig;
use crate::files::read_materials;
use crate::render;

/// Shared state for one invocation.
pub struct App {
    pub config: AppConfig,
    pub api: Arc<dyn BackendApi>,
    pub store: SessionStore,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let api = ApiClient::new(config.client.clone())?;
        Ok(Self {
            config,
            api: Arc::new(api),
            store: SessionStore::new(),
        })
    }

    pub async fn health(&self) -> Result<ExitCode> {
        match BackendStatus::check(self.api.as_ref()).await {
            BackendStatus::Healthy => {
                println!("healthy");
                Ok(ExitCode::SUCCESS)
            }
            status => {
                println!("unavailable");
                if let Some(banner) = status.banner() {
                    eprintln!("{}", banner);
                }
                Ok(ExitCode::FAILURE)
            }
        }
    }

    pub async fn cleanup(&self) -> Result<ExitCode> {
        match self.api.cleanup().await {
            Ok(()) => println!("Cleanup completed"),
            Err(e) => println!("Cleanup failed: {}", e),
        }
        Ok(ExitCode::SUCCESS)
    }

    pub async fn generate(&self, assignments: &[PathBuf], materials: &[PathBuf]) -> Result<ExitCode> {
        let api = self.api.as_ref();
        let mut upload = UploadCoordinator::new(self.config.flow.materials_required);
        upload.prepare(api, &self.store, FlowEntry::Fresh).await;
        if let Some(banner) = upload.backend_status().banner() {
            bail!(banner);
        }

        if !assignments.is_empty() {
            let report = upload.add_assignment(read_materials(assignments).await?);
            if !report.rejected.is_empty() {
                eprintln!("{}", render::selection_hint(upload.assignment().policy()));
            }
            render::rejections(&report.rejected)
                .iter()
                .for_each(|line| eprintln!("{}", line));
            upload
                .submit_assignment(&self.store)
                .await
                .map_err(|e| anyhow!(e.user_message()))?;
        }

        let report = upload.add_materials(read_materials(materials).await?);
        if !report.rejected.is_empty() {
            eprintln!("{}", render::selection_hint(upload.materials().policy()));
        }
        render::rejections(&report.rejected)
            .iter()
            .for_each(|line| eprintln!("{}", line));
        for line in upload.materials().summary_lines() {
            println!("+ {}", line);
        }

        println!("{}", upload.submit_label());
        upload
            .submit(api, &self.store)
            .await
            .map_err(|e| anyhow!(e.user_message()))?;

        let handle = ProcessingPoller::new(
            Arc::clone(&self.api),
            self.store.clone(),
            self.config.flow.poller.clone(),
        )
        .start()
        .await;

        let mut updates = handle.subscribe();
        loop {
            let state = updates.borrow_and_update().clone();
            if state.is_terminal() {
                break;
            }
            println!("{}", render::processing_line(&ProcessingView::from_state(&state)));
            if updates.changed().await.is_err() {
                break;
            }
        }

        let view = ProcessingView::from_state(&handle.wait().await);
        println!("{}", render::processing_report(&view));
        if let Some(error) = view.error {
            bail!(error);
        }

        self.videos().await
    }

    pub async fn videos(&self) -> Result<ExitCode> {
        let page = ResultsPage::load(self.api.as_ref(), &self.store).await;
        println!("{}", ResultsPage::HEADING);
        println!("{}", render::gallery(&page.view));
        Ok(ExitCode::SUCCESS)
    }

    pub async fn play(&self, index: Option<&str>) -> Result<ExitCode> {
        let page = PlayerPage::open(
            self.api.as_ref(),
            &self.store,
            index,
            &self.config.flow.player,
        )
        .await;

        let mut player = match page {
            PlayerPage::Ready(player) => player,
            PlayerPage::Empty { message } => {
                println!("{}", message);
                return Ok(ExitCode::SUCCESS);
            }
            PlayerPage::Error { message, back } => {
                println!("{} (back to {})", message, back);
                return Ok(ExitCode::FAILURE);
            }
        };

        println!(
            "{}; seek <percent>, end, swipe <dx>, q to quit",
            render::key_help(player.key_bindings())
        );
        if player.show_swipe_hint() {
            println!("Swipe left or right to change videos");
        }
        println!("{}", render::media_command(&player.initial_command()));
        println!("{}", render::player_status(&player));

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut timer: Option<(AutoAdvance, Instant)> = None;

        loop {
            let deadline = timer.map(|(_, at)| at);
            tokio::select! {
                _ = sleep_until(deadline), if deadline.is_some() => {
                    if let Some((advance, _)) = timer.take() {
                        if let Some(cmd) = player.auto_advance(advance.token) {
                            println!("{}", render::media_command(&cmd));
                        }
                    }
                }
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    match apply_input(&mut player, line.trim()) {
                        Input::Quit => break,
                        Input::Command(Some(cmd)) => println!("{}", render::media_command(&cmd)),
                        Input::Command(None) => {}
                        Input::Ended(advance) => {
                            timer = advance.map(|a| (a, Instant::now() + a.delay));
                        }
                        Input::Unknown => eprintln!("Unknown input: {}", line.trim()),
                    }
                }
            }
            println!("{}", render::player_status(&player));
        }

        info!(index = player.index(), "Player closed");
        Ok(ExitCode::SUCCESS)
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

/// Effect of one line typed into the player.
#[derive(Debug, PartialEq)]
pub enum Input {
    Quit,
    Command(Option<MediaCommand>),
    Ended(Option<AutoAdvance>),
    Unknown,
}

pub fn apply_input(player: &mut ShortFormPlayer, line: &str) -> Input {
    let (word, arg) = match line.split_once(' ') {
        Some((word, arg)) => (word, Some(arg.trim())),
        None => (line, None),
    };

    match (word, arg) {
        ("q", None) | ("quit", None) => Input::Quit,
        ("" | "space", None) => Input::Command(player.handle_key(" ")),
        ("end", None) => Input::Ended(player.playback_ended()),
        ("seek", Some(percent)) => match percent.trim_end_matches('%').parse::<f64>() {
            Ok(percent) => Input::Command(player.seek(percent, 100.0)),
            Err(_) => Input::Unknown,
        },
        ("swipe", Some(dx)) => match dx.parse::<f64>() {
            Ok(dx) => {
                player.touch_start(0.0);
                player.touch_move(dx);
                Input::Command(player.touch_end())
            }
            Err(_) => Input::Unknown,
        },
        (key, None) if player.key_bindings().action_for(key).is_some() => {
            Input::Command(player.handle_key(key))
        }
        _ => Input::Unknown,
    }
}

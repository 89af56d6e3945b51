//! Application core - owns session state and coordinates the AI actor

mod actions;
mod event_loop;
pub mod render_thread;
pub mod state;

use anyhow::Result;
use ratatui::layout::Rect;

use render_thread::RenderThread;

use crate::ai::{
    AiActorHandle, AiCommand, BedrockClient, Dispatcher, OpenRouterClient, Provider, catalog,
    spawn_ai_actor,
};
use crate::config::Config;
use crate::credentials::CredentialStore;
use crate::input::KeyBindings;
use state::AppState;

/// Build the dispatcher over both provider clients.
///
/// Missing credentials are only logged here; the affected client reports
/// them when a request is routed to it.
pub fn build_dispatcher(
    config: &Config,
    credentials: &CredentialStore,
) -> Dispatcher<BedrockClient, OpenRouterClient> {
    let aws = credentials.aws_credentials();
    if aws.is_none() {
        tracing::warn!("{} credentials not configured", Provider::Bedrock);
    }
    let api_key = credentials.openrouter_api_key();
    if api_key.is_none() {
        tracing::warn!("{} credentials not configured", Provider::OpenRouter);
    }

    let bedrock = BedrockClient::new(
        aws,
        config.bedrock.resolve_region(),
        config.bedrock.endpoint.clone(),
    );
    tracing::info!(region = bedrock.region(), "Bedrock region");

    let openrouter = OpenRouterClient::new(api_key, config.openrouter.base_url.clone())
        .with_attribution(
            config.openrouter.referer.clone(),
            config.openrouter.app_title.clone(),
        );

    Dispatcher::new(bedrock, openrouter)
}

pub struct App {
    pub(crate) config: Config,
    pub(crate) state: AppState,
    pub(crate) bindings: KeyBindings,
    pub(crate) ai_actor: AiActorHandle,
    /// Id of the generation the UI is waiting for
    pub(crate) pending_request: Option<u64>,
    pub(crate) next_request_id: u64,
    /// Text waiting to be written to the terminal clipboard
    pub(crate) clipboard_outbox: Option<String>,
    /// Dirty flag: when true, UI needs re-render. Skips renders when nothing changed.
    pub(crate) dirty: bool,
    /// Last known terminal size, for scroll limits
    pub(crate) terminal_area: Rect,
}

impl App {
    pub fn new(config: Config, credentials: &CredentialStore) -> Self {
        let ai_actor = spawn_ai_actor(build_dispatcher(&config, credentials));
        Self::with_actor(config, ai_actor)
    }

    fn with_actor(config: Config, ai_actor: AiActorHandle) -> Self {
        // Config::validate guarantees both labels resolve
        let model_index = catalog::model_index(&config.ui.default_model).unwrap_or(0);
        let style_index = catalog::style_index(&config.ui.default_style).unwrap_or(0);

        Self {
            config,
            state: AppState::new(model_index, style_index),
            bindings: KeyBindings::new(),
            ai_actor,
            pending_request: None,
            next_request_id: 1,
            clipboard_outbox: None,
            dirty: true, // Start dirty for initial render
            terminal_area: Rect::default(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let (width, height) = crossterm::terminal::size()?;
        self.terminal_area = Rect::new(0, 0, width, height);

        // Spawn background render thread (owns terminal setup/teardown)
        let render_thread = RenderThread::spawn()?;

        self.state
            .set_status("Paste an email, pick a model and style, then Ctrl+G");

        let result = self.event_loop(&render_thread).await;

        // Shutdown render thread (handles terminal cleanup)
        render_thread.shutdown();

        let _ = self.ai_actor.cmd_tx.send(AiCommand::Shutdown).await;

        result
    }

    /// App wired to an actor over test doubles that always reply "fake reply"
    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        use crate::ai::FakeGenerator;

        let dispatcher = Dispatcher::new(
            FakeGenerator::replying(Ok("fake reply".to_string())),
            FakeGenerator::replying(Ok("fake reply".to_string())),
        );
        let mut app = Self::with_actor(Config::default(), spawn_ai_actor(dispatcher));
        app.terminal_area = Rect::new(0, 0, 120, 40);
        app
    }
}

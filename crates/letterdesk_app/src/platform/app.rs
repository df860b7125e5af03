use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use desk_logging::{desk_debug, desk_info, desk_warn};
use letterdesk_core::{update, AppState, Flow, FlowView, Msg};
use letterdesk_engine::{EngineHandle, GeneratorSettings, ReqwestGenerator};

use super::clipboard::SystemClipboard;
use super::effects::{EffectOutcome, EffectRunner, Endpoints};
use super::guard::HostGuard;
use super::routes::build_router;
use crate::config::Config;

pub async fn run_app(config: Config) -> Result<()> {
    desk_logging::initialize(config.log_destination, config.log_level);
    desk_info!("Starting letterdesk v{}", env!("CARGO_PKG_VERSION"));

    let generator = ReqwestGenerator::new(GeneratorSettings {
        connect_timeout: None,
        request_timeout: config.request_timeout,
    })
    .context("failed to build HTTP client")?;
    let engine = EngineHandle::new(Arc::new(generator)).context("failed to start engine")?;

    let runner = EffectRunner::new(
        Arc::new(engine),
        Endpoints {
            cover_letter: config.cover_letter_webhook.clone(),
            proposal: config.proposal_webhook.clone(),
        },
        Arc::new(
            SystemClipboard::spawn().context("failed to start clipboard thread")?,
        ),
    );
    let app = App::start(runner);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    desk_info!("Listening on http://{}", config.bind);
    if !config.bind.ip().is_loopback() {
        desk_warn!(
            "Bound to non-loopback {}; copy-text writes to this machine's clipboard, not the browser's",
            config.bind
        );
    }

    axum::serve(listener, build_router(app, HostGuard::for_bind(config.bind))).await?;
    Ok(())
}

/// Owns the core state; every browser request and engine event goes through
/// [`App::dispatch`].
pub struct App {
    state: Mutex<AppState>,
    effects: EffectRunner,
}

impl App {
    /// Wraps the runner and starts forwarding engine events.
    pub fn start(effects: EffectRunner) -> Arc<Self> {
        let app = Arc::new(Self {
            state: Mutex::new(AppState::new()),
            effects,
        });
        app.effects.spawn_event_loop(Arc::downgrade(&app));
        app
    }

    /// Applies `msg`, runs the resulting effects and returns the URL the
    /// browser should be sent to, if any effect asked for one.
    pub fn dispatch(&self, msg: Msg) -> Option<String> {
        desk_debug!("dispatch {:?}", MsgLabel(&msg));
        let effects = {
            let mut guard = self.lock_state();
            let state = std::mem::take(&mut *guard);
            let (state, effects) = update(state, msg);
            *guard = state;
            effects
        };

        let mut navigate = None;
        for effect in effects {
            match self.effects.run(effect) {
                EffectOutcome::Done => {}
                EffectOutcome::Followup(next) => {
                    if let Some(url) = self.dispatch(next) {
                        navigate = Some(url);
                    }
                }
                EffectOutcome::Navigate(url) => navigate = Some(url),
            }
        }
        navigate
    }

    pub fn view(&self, flow: Flow) -> FlowView {
        self.lock_state().view(flow)
    }

    fn lock_state(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Debug label that keeps form contents out of the log.
struct MsgLabel<'a>(&'a Msg);

impl std::fmt::Debug for MsgLabel<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Msg::FieldEdited { flow, field, value } => {
                write!(f, "FieldEdited({flow:?}, {field:?}, {} chars)", value.len())
            }
            Msg::GenerationFinished { job_id, result } => {
                write!(f, "GenerationFinished({job_id}, ok={})", result.is_ok())
            }
            other => write!(f, "{other:?}"),
        }
    }
}

use std::sync::{Arc, Weak};
use std::thread;
use std::time::Duration;

use desk_logging::{desk_debug, desk_info, desk_warn};
use letterdesk_core::{CleanedRecord, Effect, Flow, GenerationResult, JobId, Msg};
use letterdesk_engine::{document_text, EngineEvent, EngineHandle, GenerationError};
use url::Url;

use super::app::App;
use super::clipboard::ClipboardSink;

/// What the caller has to do after an effect ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectOutcome {
    Done,
    /// Feed this message back into the update loop.
    Followup(Msg),
    /// Send the browser to this URL.
    Navigate(String),
}

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub cover_letter: Url,
    pub proposal: Url,
}

impl Endpoints {
    fn for_flow(&self, flow: Flow) -> &Url {
        match flow {
            Flow::CoverLetter => &self.cover_letter,
            Flow::Proposal => &self.proposal,
        }
    }
}

pub struct EffectRunner {
    engine: Arc<EngineHandle>,
    endpoints: Endpoints,
    clipboard: Arc<dyn ClipboardSink>,
}

impl EffectRunner {
    pub fn new(
        engine: Arc<EngineHandle>,
        endpoints: Endpoints,
        clipboard: Arc<dyn ClipboardSink>,
    ) -> Self {
        Self {
            engine,
            endpoints,
            clipboard,
        }
    }

    pub fn run(&self, effect: Effect) -> EffectOutcome {
        match effect {
            Effect::SubmitGeneration {
                job_id,
                flow,
                payload,
            } => self.submit(job_id, flow, &payload),
            Effect::OpenInNewContext { url } => {
                desk_info!("Opening download url_len={}", url.len());
                EffectOutcome::Navigate(url)
            }
            Effect::CopyPreviewText { flow, html } => {
                let text = document_text(&html);
                desk_debug!("Copying {} chars of {:?} text", text.chars().count(), flow);
                let result = self.clipboard.set_text(text).map_err(|err| {
                    desk_warn!("Copy failed: {}", err);
                    err.to_string()
                });
                EffectOutcome::Followup(Msg::CopyFinished { flow, result })
            }
        }
    }

    fn submit(&self, job_id: JobId, flow: Flow, payload: &CleanedRecord) -> EffectOutcome {
        match serde_json::to_value(payload) {
            Ok(body) => {
                let endpoint = self.endpoints.for_flow(flow);
                desk_info!("SubmitGeneration job_id={} flow={:?}", job_id, flow);
                self.engine.submit(job_id, endpoint.as_str(), body);
                EffectOutcome::Done
            }
            Err(err) => EffectOutcome::Followup(Msg::GenerationFinished {
                job_id,
                result: Err(GenerationError::InvalidPayload(err.to_string()).to_string()),
            }),
        }
    }

    /// Forwards engine completions into the update loop until the app is gone.
    pub fn spawn_event_loop(&self, app: Weak<App>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.recv_timeout(Duration::from_millis(250)) else {
                if app.strong_count() == 0 {
                    break;
                }
                continue;
            };
            let Some(strong) = app.upgrade() else {
                break;
            };
            strong.dispatch(engine_event_to_msg(event));
        });
    }
}

fn engine_event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::GenerationCompleted { job_id, result } => {
            let result = result
                .and_then(|doc| {
                    GenerationResult::new(doc.preview_html, doc.download_url)
                        .ok_or(GenerationError::InvalidResultShape)
                })
                .map_err(|err| err.to_string());
            Msg::GenerationFinished { job_id, result }
        }
    }
}

#[cfg(test)]
mod tests {
    use letterdesk_core::{GenerationResult, Msg};
    use letterdesk_engine::{EngineEvent, GeneratedDocument, GenerationError};
    use pretty_assertions::assert_eq;

    use super::engine_event_to_msg;

    #[test]
    fn completion_maps_to_result() {
        let msg = engine_event_to_msg(EngineEvent::GenerationCompleted {
            job_id: 3,
            result: Ok(GeneratedDocument {
                preview_html: "<p>x</p>".to_string(),
                download_url: "https://cdn/x.docx".to_string(),
            }),
        });
        assert_eq!(
            msg,
            Msg::GenerationFinished {
                job_id: 3,
                result: Ok(GenerationResult::new("<p>x</p>", "https://cdn/x.docx").unwrap()),
            }
        );
    }

    #[test]
    fn failure_maps_to_user_message() {
        let msg = engine_event_to_msg(EngineEvent::GenerationCompleted {
            job_id: 4,
            result: Err(GenerationError::MalformedResponse {
                raw: "<html>gateway</html>".to_string(),
            }),
        });
        assert_eq!(
            msg,
            Msg::GenerationFinished {
                job_id: 4,
                result: Err("Server returned invalid JSON".to_string()),
            }
        );
    }
}

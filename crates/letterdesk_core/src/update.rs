use crate::{AppState, Effect, Flow, FormRecord, Msg, Notification, Phase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FieldEdited { flow, field, value } => {
            let page = state.flow_mut(flow);
            let form = std::mem::replace(&mut page.form, FormRecord::empty(flow));
            page.form = form.with_field(field, value);
            Vec::new()
        }
        Msg::SubmitClicked(flow) => {
            // The disabled button gates on loading too, but a submit that gets
            // through while loading still goes out; the last response wins.
            if !state.flow(flow).form.is_submittable() {
                return (state, Vec::new());
            }
            let payload = state.flow(flow).form.cleaned();
            let job_id = state.begin_job(flow);
            state.flow_mut(flow).phase = Phase::Loading;
            vec![Effect::SubmitGeneration {
                job_id,
                flow,
                payload,
            }]
        }
        Msg::GenerationFinished { job_id, result } => {
            let Some(job) = state.finish_job(job_id) else {
                return (state, Vec::new());
            };
            if state.flow(job.flow).mount != job.mount {
                // The page that issued the request was torn down.
                return (state, Vec::new());
            }
            let page = state.flow_mut(job.flow);
            match result {
                Ok(document) => {
                    page.phase = Phase::Ready(document);
                    page.notifications.push(generated_notice(job.flow));
                }
                Err(message) => {
                    page.phase = Phase::Idle;
                    page.notifications
                        .push(Notification::error("Generation failed", message));
                }
            }
            Vec::new()
        }
        Msg::DownloadClicked(flow) => match state.flow(flow).phase.result() {
            Some(result) => vec![Effect::OpenInNewContext {
                url: result.download_url().to_string(),
            }],
            None => Vec::new(),
        },
        Msg::CopyTextClicked(flow) => match state.flow(flow).phase.result() {
            Some(result) => vec![Effect::CopyPreviewText {
                flow,
                html: result.preview_html().to_string(),
            }],
            None => Vec::new(),
        },
        Msg::CopyFinished { flow, result } => {
            let notice = match result {
                Ok(()) => Notification::success(
                    "Copied!",
                    format!("{} text copied to clipboard.", document_label(flow)),
                ),
                Err(_) => Notification::error(
                    "Failed to copy",
                    "Please try selecting and copying manually.",
                ),
            };
            state.flow_mut(flow).notifications.push(notice);
            Vec::new()
        }
        Msg::NotificationsShown { flow, count } => {
            let notifications = &mut state.flow_mut(flow).notifications;
            let shown = count.min(notifications.len());
            notifications.drain(..shown);
            Vec::new()
        }
        Msg::Navigated(flow) => {
            for other in Flow::ALL.into_iter().filter(|other| *other != flow) {
                state.remount(other);
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn document_label(flow: Flow) -> &'static str {
    match flow {
        Flow::CoverLetter => "Cover letter",
        Flow::Proposal => "Proposal",
    }
}

fn generated_notice(flow: Flow) -> Notification {
    let label = document_label(flow);
    Notification::success(
        format!("{label} generated!"),
        format!(
            "Your {} is ready to preview and download.",
            label.to_lowercase()
        ),
    )
}

use std::collections::BTreeMap;

use crate::view_model::{preview_view, FlowView};
use crate::{Flow, FormRecord};

pub type JobId = u64;

/// Document returned by the generation service. Both parts are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    preview_html: String,
    download_url: String,
}

impl GenerationResult {
    /// Returns `None` when either part is empty.
    pub fn new(preview_html: impl Into<String>, download_url: impl Into<String>) -> Option<Self> {
        let preview_html = preview_html.into();
        let download_url = download_url.into();
        if preview_html.is_empty() || download_url.is_empty() {
            return None;
        }
        Some(Self {
            preview_html,
            download_url,
        })
    }

    pub fn preview_html(&self) -> &str {
        &self.preview_html
    }

    pub fn download_url(&self) -> &str {
        &self.download_url
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready(GenerationResult),
}

impl Phase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Loading)
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        match self {
            Phase::Ready(result) => Some(result),
            Phase::Idle | Phase::Loading => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// User-visible toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Error,
        }
    }
}

/// State of one mounted flow page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowState {
    pub(crate) form: FormRecord,
    pub(crate) phase: Phase,
    pub(crate) notifications: Vec<Notification>,
    /// Bumped every time the page is torn down.
    pub(crate) mount: u64,
}

impl FlowState {
    pub(crate) fn mounted(flow: Flow, mount: u64) -> Self {
        Self {
            form: FormRecord::empty(flow),
            phase: Phase::Idle,
            notifications: Vec::new(),
            mount,
        }
    }

    pub fn form(&self) -> &FormRecord {
        &self.form
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingJob {
    pub flow: Flow,
    pub mount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    cover_letter: FlowState,
    proposal: FlowState,
    next_job_id: JobId,
    pending: BTreeMap<JobId, PendingJob>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            cover_letter: FlowState::mounted(Flow::CoverLetter, 0),
            proposal: FlowState::mounted(Flow::Proposal, 0),
            next_job_id: 1,
            pending: BTreeMap::new(),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flow(&self, flow: Flow) -> &FlowState {
        match flow {
            Flow::CoverLetter => &self.cover_letter,
            Flow::Proposal => &self.proposal,
        }
    }

    pub(crate) fn flow_mut(&mut self, flow: Flow) -> &mut FlowState {
        match flow {
            Flow::CoverLetter => &mut self.cover_letter,
            Flow::Proposal => &mut self.proposal,
        }
    }

    pub fn view(&self, flow: Flow) -> FlowView {
        let state = self.flow(flow);
        FlowView {
            flow,
            form: state.form.clone(),
            submit_enabled: state.form.is_submittable() && !state.phase.is_loading(),
            preview: preview_view(state.phase.is_loading(), state.phase.result()),
            notifications: state.notifications.clone(),
        }
    }

    /// Number of submissions whose completion has not arrived yet.
    pub fn pending_jobs(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn begin_job(&mut self, flow: Flow) -> JobId {
        let job_id = self.next_job_id;
        self.next_job_id += 1;
        let mount = self.flow(flow).mount;
        self.pending.insert(job_id, PendingJob { flow, mount });
        job_id
    }

    pub(crate) fn finish_job(&mut self, job_id: JobId) -> Option<PendingJob> {
        self.pending.remove(&job_id)
    }

    /// Tears down and remounts `flow` with fresh local state.
    pub(crate) fn remount(&mut self, flow: Flow) {
        let mount = self.flow(flow).mount + 1;
        *self.flow_mut(flow) = FlowState::mounted(flow, mount);
    }
}

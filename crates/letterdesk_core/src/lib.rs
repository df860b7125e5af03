//! Letterdesk core: pure form state, submission state machine and view models.
mod effect;
mod form;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use form::{
    CleanedRecord, CoverLetterForm, CoverLetterRequest, Field, Flow, FormRecord, ProposalForm,
    ProposalRequest, REFERENCE_SLOTS,
};
pub use msg::Msg;
pub use state::{AppState, FlowState, GenerationResult, JobId, Notification, Phase, Severity};
pub use update::update;
pub use view_model::{preview_view, FlowView, PreviewView};

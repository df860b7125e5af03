use crate::{Field, Flow, GenerationResult, JobId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited one input of a form.
    FieldEdited {
        flow: Flow,
        field: Field,
        value: String,
    },
    /// User pressed the generate button.
    SubmitClicked(Flow),
    /// Engine completion for a submission. `Err` carries the user-facing message.
    GenerationFinished {
        job_id: JobId,
        result: Result<GenerationResult, String>,
    },
    /// User clicked the download action of the result view.
    DownloadClicked(Flow),
    /// User clicked the copy-text action of the result view.
    CopyTextClicked(Flow),
    /// Platform finished writing to the clipboard.
    CopyFinished {
        flow: Flow,
        result: Result<(), String>,
    },
    /// The oldest `count` notifications of a flow were displayed. Later ones
    /// stay queued for the next render.
    NotificationsShown { flow: Flow, count: usize },
    /// User navigated to a flow page; every other flow is torn down.
    Navigated(Flow),
}

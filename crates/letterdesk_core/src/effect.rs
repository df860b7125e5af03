use crate::{CleanedRecord, Flow, JobId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the payload to the flow's webhook exactly once.
    SubmitGeneration {
        job_id: JobId,
        flow: Flow,
        payload: CleanedRecord,
    },
    /// Open the URL verbatim in a new browsing context.
    OpenInNewContext { url: String },
    /// Extract the document's plain text and write it to the clipboard.
    CopyPreviewText { flow: Flow, html: String },
}

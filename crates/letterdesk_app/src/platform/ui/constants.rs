use letterdesk_core::Flow;

pub const FORM_ID: &str = "generator-form";
pub const SUBMIT_BUTTON_ID: &str = "submit-button";
pub const PREVIEW_FRAME_ID: &str = "preview-frame";
/// Seconds between page reloads while a submission is outstanding.
pub const LOADING_REFRESH_SECS: u32 = 1;

pub fn page_path(flow: Flow) -> String {
    format!("/{}", flow.slug())
}

pub fn action_path(flow: Flow, action: &str) -> String {
    format!("/{}/{action}", flow.slug())
}

pub fn page_title(flow: Flow) -> &'static str {
    match flow {
        Flow::CoverLetter => "Cover Letter Generator",
        Flow::Proposal => "Proposal Generator",
    }
}

pub fn nav_label(flow: Flow) -> &'static str {
    match flow {
        Flow::CoverLetter => "Cover Letter",
        Flow::Proposal => "Proposal",
    }
}

use crate::{Flow, FormRecord, GenerationResult, Notification};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewView {
    Loading,
    Empty,
    Document {
        preview_html: String,
        download_url: String,
    },
}

/// Preview state in strict priority order: loading, empty, document.
pub fn preview_view(is_loading: bool, result: Option<&GenerationResult>) -> PreviewView {
    if is_loading {
        return PreviewView::Loading;
    }
    match result {
        None => PreviewView::Empty,
        Some(result) => PreviewView::Document {
            preview_html: result.preview_html().to_string(),
            download_url: result.download_url().to_string(),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowView {
    pub flow: Flow,
    pub form: FormRecord,
    pub submit_enabled: bool,
    pub preview: PreviewView,
    pub notifications: Vec<Notification>,
}

impl FlowView {
    pub fn is_loading(&self) -> bool {
        self.preview == PreviewView::Loading
    }
}

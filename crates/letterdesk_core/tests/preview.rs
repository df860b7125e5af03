use letterdesk_core::{preview_view, GenerationResult, PreviewView};

#[test]
fn loading_takes_priority_over_result() {
    let result = GenerationResult::new("<p>x</p>", "https://cdn/x.docx").unwrap();
    assert_eq!(preview_view(true, Some(&result)), PreviewView::Loading);
    assert_eq!(preview_view(true, None), PreviewView::Loading);
}

#[test]
fn empty_without_result() {
    assert_eq!(preview_view(false, None), PreviewView::Empty);
}

#[test]
fn same_inputs_same_view() {
    let result = GenerationResult::new("<p>x</p>", "https://cdn/x.docx").unwrap();
    let first = preview_view(false, Some(&result));
    let second = preview_view(false, Some(&result));
    assert_eq!(first, second);
    assert!(matches!(first, PreviewView::Document { .. }));
}

#[test]
fn result_requires_both_parts() {
    assert!(GenerationResult::new("", "https://cdn/x.docx").is_none());
    assert!(GenerationResult::new("<p>x</p>", "").is_none());
}

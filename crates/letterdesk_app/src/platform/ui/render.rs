use letterdesk_core::{Field, Flow, FlowView, FormRecord, Notification, PreviewView, Severity};

use super::constants::*;
use super::layout;

/// Renders the whole page for one flow. Pure function of the view.
pub fn render_page(view: &FlowView) -> String {
    let content = format!(
        r#"<main aria-label="{title}">
<section class="card" aria-labelledby="form-heading">
<h2 id="form-heading">{form_heading}</h2>
{form}
</section>
<section class="card" aria-labelledby="preview-heading" aria-live="polite">
<h2 id="preview-heading">Preview</h2>
{preview}
</section>
</main>
{toasts}"#,
        title = page_title(view.flow),
        form_heading = form_heading(view.flow),
        form = render_form(view),
        preview = render_preview(view.flow, &view.preview),
        toasts = render_notifications(&view.notifications),
    );
    layout::page(view.flow, &content, view.is_loading())
}

fn form_heading(flow: Flow) -> &'static str {
    match flow {
        Flow::CoverLetter => "Create Your Cover Letter",
        Flow::Proposal => "Create Your Proposal",
    }
}

fn render_form(view: &FlowView) -> String {
    let fields = match &view.form {
        FormRecord::CoverLetter(form) => {
            let mut out = String::new();
            out.push_str(&textarea(
                view,
                Field::JobDescription,
                "Job Description",
                "Paste the job description or job URL here...",
                true,
                None,
            ));
            out.push_str(&input(
                view,
                Field::ApplicantName,
                "Your Name",
                "John Doe",
                "text",
                true,
                None,
            ));
            out.push_str(&input(
                view,
                Field::Position,
                "Position",
                "Software Engineer",
                "text",
                true,
                None,
            ));
            out.push_str(&input(
                view,
                Field::CompanyName,
                "Company Name",
                "Acme Corporation",
                "text",
                true,
                None,
            ));
            out.push_str(r#"<label>Reference Links <span class="hint">(optional)</span></label>"#);
            for (index, reference) in form.references.iter().enumerate() {
                out.push_str(&format!(
                    r#"<input type="url" name="{name}" value="{value}" placeholder="https://linkedin.com/in/yourprofile" aria-label="Reference link {number}"{attrs}>"#,
                    name = escape_html(&Field::Reference(index).key()),
                    value = escape_html(reference),
                    number = index + 1,
                    attrs = field_attrs(false, view.is_loading()),
                ));
            }
            out
        }
        FormRecord::Proposal(_) => {
            let mut out = String::new();
            out.push_str(&input(
                view,
                Field::FirstName,
                "First Name",
                "John",
                "text",
                true,
                None,
            ));
            out.push_str(&input(
                view,
                Field::LastName,
                "Last Name",
                "Doe",
                "text",
                true,
                None,
            ));
            out.push_str(&input(
                view,
                Field::Email,
                "Email",
                "john.doe@example.com",
                "email",
                true,
                None,
            ));
            out.push_str(&input(
                view,
                Field::CompanyName,
                "Company Name",
                "Acme Corporation",
                "text",
                true,
                None,
            ));
            out.push_str(&input(
                view,
                Field::CallLink,
                "Call Audio Link",
                "https://example.com/call-recording.mp3",
                "url",
                false,
                Some("Link to call recording or meeting notes"),
            ));
            out.push_str(&textarea(
                view,
                Field::JobDescription,
                "Job Description / Requirements",
                "Paste the job description, project requirements, or client needs here...",
                false,
                Some("Provide either a call link or job description (or both)"),
            ));
            out
        }
    };

    let loading = view.is_loading();
    format!(
        r#"<form id="{FORM_ID}" method="post" action="{action}" data-edit-url="{edit}">
{fields}
<button type="submit" id="{SUBMIT_BUTTON_ID}"{disabled} aria-busy="{loading}">{label}</button>
</form>"#,
        action = escape_html(&action_path(view.flow, "submit")),
        edit = escape_html(&action_path(view.flow, "edit")),
        disabled = if view.submit_enabled { "" } else { " disabled" },
        label = submit_label(view.flow, loading),
    )
}

fn submit_label(flow: Flow, loading: bool) -> &'static str {
    match (flow, loading) {
        (Flow::CoverLetter, false) => "Create Cover Letter",
        (Flow::CoverLetter, true) => "Generating...",
        (Flow::Proposal, false) => "Generate Proposal",
        (Flow::Proposal, true) => "Generating Proposal...",
    }
}

fn label(field: Field, text: &str, required: bool) -> String {
    let marker = if required {
        r#" <span class="required">*</span>"#
    } else {
        ""
    };
    format!(
        r#"<label for="{id}">{text}{marker}</label>"#,
        id = escape_html(&field.key())
    )
}

fn hint(text: Option<&str>) -> String {
    text.map(|text| format!(r#"<p class="hint">{}</p>"#, escape_html(text)))
        .unwrap_or_default()
}

/// Inputs are read-only while a request is loading, so the loading
/// refresh cannot drop a keystroke.
fn field_attrs(required: bool, readonly: bool) -> String {
    let mut attrs = String::new();
    if required {
        attrs.push_str(r#" required aria-required="true""#);
    }
    if readonly {
        attrs.push_str(" readonly");
    }
    attrs
}

fn input(
    view: &FlowView,
    field: Field,
    text: &str,
    placeholder: &str,
    kind: &str,
    required: bool,
    help: Option<&str>,
) -> String {
    let key = escape_html(&field.key());
    format!(
        r#"{label}<input id="{key}" name="{key}" type="{kind}" value="{value}" placeholder="{placeholder}"{attrs}>{hint}"#,
        label = label(field, text, required),
        value = escape_html(view.form.value(field).unwrap_or_default()),
        placeholder = escape_html(placeholder),
        attrs = field_attrs(required, view.is_loading()),
        hint = hint(help),
    )
}

fn textarea(
    view: &FlowView,
    field: Field,
    text: &str,
    placeholder: &str,
    required: bool,
    help: Option<&str>,
) -> String {
    let key = escape_html(&field.key());
    format!(
        r#"{label}<textarea id="{key}" name="{key}" placeholder="{placeholder}"{attrs}>{value}</textarea>{hint}"#,
        label = label(field, text, required),
        value = escape_html(view.form.value(field).unwrap_or_default()),
        placeholder = escape_html(placeholder),
        attrs = field_attrs(required, view.is_loading()),
        hint = hint(help),
    )
}

/// Preview area in priority order: loading, empty, document.
pub fn render_preview(flow: Flow, preview: &PreviewView) -> String {
    let noun = match flow {
        Flow::CoverLetter => "cover letter",
        Flow::Proposal => "proposal",
    };
    match preview {
        PreviewView::Loading => format!(
            r#"<div class="preview-state" data-state="loading"><div class="spinner"></div><p aria-live="polite">Generating your {noun}...</p></div>"#
        ),
        PreviewView::Empty => format!(
            r#"<div class="preview-state" data-state="empty"><p>Fill out the form and click "{button}" to create your document</p></div>"#,
            button = submit_label(flow, false),
        ),
        PreviewView::Document { preview_html, .. } => format!(
            r#"<div data-state="ready">
<div class="actions">
<a class="button" href="{download}" target="_blank" rel="noopener noreferrer">Download DOCX</a>
<form method="post" action="{copy}"><button type="submit" class="outline">Copy Text</button></form>
</div>
<iframe id="{PREVIEW_FRAME_ID}" title="{title} Preview" sandbox="" referrerpolicy="no-referrer" srcdoc="{srcdoc}"></iframe>
</div>"#,
            download = escape_html(&action_path(flow, "download")),
            copy = escape_html(&action_path(flow, "copy")),
            title = nav_label(flow),
            srcdoc = escape_html(preview_html),
        ),
    }
}

fn render_notifications(notifications: &[Notification]) -> String {
    if notifications.is_empty() {
        return String::new();
    }
    let items: String = notifications
        .iter()
        .map(|notice| {
            let (class, role) = match notice.severity {
                Severity::Success => ("toast", "status"),
                Severity::Error => ("toast error", "alert"),
            };
            format!(
                r#"<div class="{class}" role="{role}"><strong>{}</strong><span>{}</span></div>"#,
                escape_html(&notice.title),
                escape_html(&notice.description),
            )
        })
        .collect();
    format!(r#"<div class="toasts">{items}</div>"#)
}

/// Escapes text for element content and double- or single-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use letterdesk_core::{
        update, AppState, Field, Flow, GenerationResult, Msg, Notification, PreviewView,
    };

    use super::{escape_html, render_page, render_preview};

    fn ready_view() -> letterdesk_core::FlowView {
        let state = AppState::new();
        let state = [
            (Field::JobDescription, "Rust role"),
            (Field::ApplicantName, "Ada"),
            (Field::Position, "Engineer"),
            (Field::CompanyName, "Acme"),
        ]
        .into_iter()
        .fold(state, |state, (field, value)| {
            update(
                state,
                Msg::FieldEdited {
                    flow: Flow::CoverLetter,
                    field,
                    value: value.to_string(),
                },
            )
            .0
        });
        let (state, _) = update(state, Msg::SubmitClicked(Flow::CoverLetter));
        let (state, _) = update(
            state,
            Msg::GenerationFinished {
                job_id: 1,
                result: Ok(GenerationResult::new(
                    r#"<html><body><p>ok</p><script>alert("x")</script></body></html>"#,
                    "https://cdn/x.docx",
                )
                .unwrap()),
            },
        );
        state.view(Flow::CoverLetter)
    }

    #[test]
    fn escapes_markup_and_quotes() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn document_is_rendered_in_sandboxed_frame_only() {
        let page = render_page(&ready_view());
        assert!(page.contains(r#"sandbox="""#));
        assert!(page.contains(
            "srcdoc=\"&lt;html&gt;&lt;body&gt;&lt;p&gt;ok&lt;/p&gt;&lt;script&gt;alert(&quot;x&quot;)"
        ));
        // The untrusted markup never appears unescaped in the host page.
        assert!(!page.contains(r#"<script>alert("x")</script>"#));
        assert!(!page.contains("allow-scripts"));
        assert!(!page.contains("allow-same-origin"));
    }

    #[test]
    fn download_link_opens_new_context() {
        let page = render_page(&ready_view());
        assert!(page.contains(
            r#"href="/cover-letter/download" target="_blank" rel="noopener noreferrer""#
        ));
        assert!(page.contains(r#"action="/cover-letter/copy""#));
    }

    #[test]
    fn loading_preview_shows_progress_only() {
        let preview = render_preview(Flow::Proposal, &PreviewView::Loading);
        assert!(preview.contains(r#"data-state="loading""#));
        assert!(preview.contains("Generating your proposal..."));
        assert!(!preview.contains("iframe"));
    }

    #[test]
    fn empty_form_has_disabled_submit_and_placeholder() {
        let view = AppState::new().view(Flow::CoverLetter);
        let page = render_page(&view);
        assert!(page.contains(r#"id="submit-button" disabled"#));
        assert!(page.contains(r#"data-state="empty""#));
        assert!(!page.contains(r#"http-equiv="refresh""#));
        assert!(page.contains(r#"aria-label="Reference link 2""#));
    }

    #[test]
    fn inputs_are_read_only_while_loading() {
        let (state, _) = update(
            AppState::new(),
            Msg::FieldEdited {
                flow: Flow::Proposal,
                field: Field::FirstName,
                value: "Ada".to_string(),
            },
        );
        let idle = render_page(&state.view(Flow::Proposal));
        assert!(!idle.contains(" readonly"));

        let state = [
            (Field::LastName, "Lovelace"),
            (Field::Email, "ada@example.com"),
            (Field::CompanyName, "Acme"),
            (Field::CallLink, "https://calls/1.mp3"),
        ]
        .into_iter()
        .fold(state, |state, (field, value)| {
            update(
                state,
                Msg::FieldEdited {
                    flow: Flow::Proposal,
                    field,
                    value: value.to_string(),
                },
            )
            .0
        });
        let (state, _) = update(state, Msg::SubmitClicked(Flow::Proposal));
        let loading = render_page(&state.view(Flow::Proposal));
        assert!(loading.contains(r#"value="Ada" placeholder="John" required aria-required="true" readonly>"#));
        assert!(loading.contains(r#"name="jobDescription" placeholder="#));
        assert_eq!(
            loading.matches(" readonly").count(),
            6,
            "every proposal input and the textarea are read-only"
        );
    }

    #[test]
    fn rendering_is_idempotent() {
        let view = ready_view();
        assert_eq!(render_page(&view), render_page(&view));
    }

    #[test]
    fn form_values_are_escaped() {
        let (state, _) = update(
            AppState::new(),
            Msg::FieldEdited {
                flow: Flow::Proposal,
                field: Field::CompanyName,
                value: r#"Acme "><script>"#.to_string(),
            },
        );
        let page = render_page(&state.view(Flow::Proposal));
        assert!(page.contains(r#"value="Acme &quot;&gt;&lt;script&gt;""#));
    }

    #[test]
    fn notifications_render_as_toasts() {
        let mut view = AppState::new().view(Flow::Proposal);
        view.notifications = vec![Notification::error(
            "Generation failed",
            "Request failed with status 500",
        )];
        let page = render_page(&view);
        assert!(page.contains(r#"<div class="toast error" role="alert"><strong>Generation failed</strong><span>Request failed with status 500</span></div>"#));
    }
}

use letterdesk_core::Flow;

use super::constants::{
    nav_label, page_path, page_title, FORM_ID, LOADING_REFRESH_SECS, SUBMIT_BUTTON_ID,
};
use super::render::escape_html;

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: #f7f7f9; color: #1d1d22; }
header { border-bottom: 1px solid #e2e2e8; background: #fff; padding: 1rem 1.5rem; display: flex; gap: 2rem; align-items: center; }
header h1 { font-size: 1.25rem; margin: 0; }
header p { margin: 0; color: #6b6b76; font-size: .875rem; }
nav a { margin-right: 1rem; color: #4a4ad0; text-decoration: none; }
nav a[aria-current="page"] { font-weight: 600; text-decoration: underline; }
main { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; padding: 2rem 1.5rem; max-width: 80rem; margin: 0 auto; }
section.card { background: #fff; border: 1px solid #e2e2e8; border-radius: 1rem; padding: 1.5rem; }
label { display: block; font-weight: 500; margin: 1rem 0 .25rem; }
input, textarea { width: 100%; box-sizing: border-box; padding: .5rem; border: 1px solid #d0d0da; border-radius: .5rem; font: inherit; }
textarea { min-height: 140px; resize: none; }
.required { color: #c62828; }
.hint { color: #6b6b76; font-size: .75rem; }
button, a.button { display: inline-block; padding: .75rem 1rem; border-radius: .5rem; border: 0; background: #4a4ad0; color: #fff; font: inherit; cursor: pointer; text-decoration: none; }
button[disabled] { opacity: .5; cursor: not-allowed; }
button.outline { background: #fff; color: #4a4ad0; border: 1px solid #4a4ad0; }
#submit-button { width: 100%; margin-top: 1.5rem; }
.preview-state { min-height: 400px; display: flex; flex-direction: column; align-items: center; justify-content: center; color: #6b6b76; text-align: center; }
.spinner { width: 4rem; height: 4rem; border-radius: 50%; border: 4px solid #e2e2e8; border-top-color: #4a4ad0; animation: spin 1s linear infinite; }
@keyframes spin { to { transform: rotate(360deg); } }
.actions { display: flex; gap: .5rem; margin-bottom: 1rem; }
.actions form { flex: 1; margin: 0; }
.actions > * { flex: 1; text-align: center; }
.actions button { width: 100%; }
iframe { width: 100%; min-height: 600px; border: 1px solid #e2e2e8; border-radius: .5rem; background: #fff; }
.toasts { position: fixed; right: 1rem; bottom: 1rem; display: flex; flex-direction: column; gap: .5rem; }
.toast { background: #fff; border: 1px solid #e2e2e8; border-radius: .5rem; padding: .75rem 1rem; max-width: 22rem; box-shadow: 0 4px 12px rgba(0,0,0,.08); }
.toast.error { border-color: #c62828; }
.toast strong { display: block; }
footer { text-align: center; color: #6b6b76; font-size: .875rem; padding-bottom: 2rem; }
@media (max-width: 900px) { main { grid-template-columns: 1fr; } }
"#;

/// Keeps the submit button in sync with the core validation while typing.
const EDIT_SYNC_SCRIPT: &str = r#"
(() => {
  const form = document.getElementById("__FORM_ID__");
  const submit = document.getElementById("__SUBMIT_ID__");
  if (!form || !submit) return;
  form.addEventListener("input", async (event) => {
    const target = event.target;
    if (!target.name) return;
    const body = new URLSearchParams({ field: target.name, value: target.value });
    try {
      const response = await fetch(form.dataset.editUrl, { method: "POST", body });
      if (response.ok) {
        const state = await response.json();
        submit.disabled = !state.submitEnabled;
      }
    } catch (err) {
      console.error("edit sync failed", err);
    }
  });
})();
"#;

/// Wraps page content in the document shell shared by both flows.
pub fn page(flow: Flow, content: &str, refresh: bool) -> String {
    let title = page_title(flow);
    let refresh_meta = if refresh {
        format!(r#"<meta http-equiv="refresh" content="{LOADING_REFRESH_SECS}">"#)
    } else {
        String::new()
    };
    let script = EDIT_SYNC_SCRIPT
        .replace("__FORM_ID__", FORM_ID)
        .replace("__SUBMIT_ID__", SUBMIT_BUTTON_ID);

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="referrer" content="no-referrer">
{refresh_meta}
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<header>
<div>
<h1>{title}</h1>
<p>AI-powered professional documents</p>
</div>
{nav}
</header>
{content}
<footer>
<p>Webhook URLs are read from <code>LETTERDESK_COVER_LETTER_WEBHOOK</code> and <code>LETTERDESK_PROPOSAL_WEBHOOK</code>.</p>
</footer>
<script>{script}</script>
</body>
</html>
"#,
        nav = nav(flow),
    )
}

fn nav(current: Flow) -> String {
    let links: String = Flow::ALL
        .into_iter()
        .map(|flow| {
            let current_attr = if flow == current {
                r#" aria-current="page""#
            } else {
                ""
            };
            format!(
                r#"<a href="{}"{current_attr}>{}</a>"#,
                escape_html(&page_path(flow)),
                nav_label(flow)
            )
        })
        .collect();
    format!(r#"<nav aria-label="Generators">{links}</nav>"#)
}

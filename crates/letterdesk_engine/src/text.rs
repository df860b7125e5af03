use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// Plain text of a document's body, close to what a browser's `innerText`
/// gives: blocks start on new lines, paragraphs and headings are separated
/// by a blank line, whitespace runs collapse and non-rendered elements are
/// skipped.
pub fn document_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let body_sel = Selector::parse("body").ok();
    let mut ctx = TextContext::default();

    let body = body_sel
        .as_ref()
        .and_then(|sel| document.select(sel).next());
    match body {
        Some(body) => visit_children(body, &mut ctx),
        None => visit_children(document.root_element(), &mut ctx),
    }

    ctx.builder.trim().to_string()
}

fn visit_node(node: NodeRef<'_, Node>, ctx: &mut TextContext) {
    match node.value() {
        Node::Text(text) => ctx.append_text(text),
        Node::Element(_) => {
            if let Some(element) = ElementRef::wrap(node) {
                visit_element(element, ctx);
            }
        }
        _ => {}
    }
}

fn visit_element(element: ElementRef, ctx: &mut TextContext) {
    let tag = element.value().name().to_ascii_lowercase();
    match tag.as_str() {
        "br" => ctx.force_newline(),
        "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "blockquote" | "pre" => {
            ctx.ensure_blank_line();
            visit_children(element, ctx);
            ctx.ensure_blank_line();
        }
        "div" | "section" | "article" | "header" | "footer" | "main" | "nav" | "address"
        | "li" | "ul" | "ol" | "table" | "tr" | "hr" | "figure" | "figcaption" | "dl" | "dt"
        | "dd" => {
            ctx.ensure_newline();
            visit_children(element, ctx);
            ctx.ensure_newline();
        }
        "td" | "th" => {
            visit_children(element, ctx);
            ctx.push_cell_separator();
        }
        "head" | "title" | "script" | "style" | "noscript" | "template" | "iframe" => {}
        _ => visit_children(element, ctx),
    }
}

fn visit_children(element: ElementRef, ctx: &mut TextContext) {
    for child in element.children() {
        visit_node(child, ctx);
    }
}

#[derive(Default)]
struct TextContext {
    builder: String,
}

impl TextContext {
    fn append_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch.is_whitespace() {
                if matches!(
                    self.builder.chars().last(),
                    None | Some(' ') | Some('\n') | Some('\t')
                ) {
                    continue;
                }
                self.builder.push(' ');
            } else {
                self.builder.push(ch);
            }
        }
    }

    fn push_cell_separator(&mut self) {
        self.trim_trailing_space();
        self.builder.push('\t');
    }

    fn force_newline(&mut self) {
        self.trim_trailing_space();
        self.builder.push('\n');
    }

    fn ensure_newline(&mut self) {
        self.trim_trailing_space();
        if self.builder.is_empty() || self.builder.ends_with('\n') {
            return;
        }
        self.builder.push('\n');
    }

    fn ensure_blank_line(&mut self) {
        self.trim_trailing_space();
        if self.builder.is_empty() || self.builder.ends_with("\n\n") {
            return;
        }
        if !self.builder.ends_with('\n') {
            self.builder.push('\n');
        }
        self.builder.push('\n');
    }

    fn trim_trailing_space(&mut self) {
        while self.builder.ends_with(' ') || self.builder.ends_with('\t') {
            self.builder.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::document_text;

    #[test]
    fn letter_paragraphs_are_separated() {
        let html = "<html><head><title>Letter</title><style>p{}</style></head><body>\
            <h1>Dear Hiring Manager</h1>\
            <p>I am  writing\n to apply.</p>\
            <p>Regards,<br>Ada</p>\
            <script>alert(1)</script></body></html>";
        assert_eq!(
            document_text(html),
            "Dear Hiring Manager\n\nI am writing to apply.\n\nRegards,\nAda"
        );
    }

    #[test]
    fn list_items_each_get_a_line() {
        let html = "<ul><li>Rust</li><li> Go </li></ul><div>Done</div>";
        assert_eq!(document_text(html), "Rust\nGo\nDone");
    }

    #[test]
    fn inline_markup_keeps_word_spacing() {
        let html = "<p>Hello <strong>big</strong> <em>world</em>!</p>";
        assert_eq!(document_text(html), "Hello big world!");
    }

    #[test]
    fn empty_document_gives_empty_text() {
        assert_eq!(document_text(""), "");
    }
}

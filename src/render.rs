use pulldown_cmark::{html, Options, Parser};

/// Markdown to HTML, pure and total.
pub trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> String;
}

#[derive(Clone, Copy, Debug)]
pub struct CmarkRenderer {
    options: Options,
}

impl Default for CmarkRenderer {
    fn default() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_FOOTNOTES);
        Self::with_options(options)
    }
}

impl CmarkRenderer {
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }
}

impl MarkdownRenderer for CmarkRenderer {
    fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings_and_emphasis() {
        let renderer = CmarkRenderer::default();
        assert_eq!(renderer.render("# Title"), "<h1>Title</h1>\n");
        assert_eq!(
            renderer.render("some **bold** text"),
            "<p>some <strong>bold</strong> text</p>\n"
        );
    }

    #[test]
    fn empty_input_renders_empty_html() {
        assert_eq!(CmarkRenderer::default().render(""), "");
    }

    #[test]
    fn enables_strikethrough_by_default() {
        let html = CmarkRenderer::default().render("~~gone~~");
        assert!(html.contains("<del>gone</del>"));

        let plain = CmarkRenderer::with_options(Options::empty()).render("~~gone~~");
        assert!(!plain.contains("<del>"));
    }
}

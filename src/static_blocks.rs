use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlInputElement, HtmlTextAreaElement, Node};

use crate::render::MarkdownRenderer;

pub trait StaticBlock {
    fn source_markdown(&self) -> String;
    /// Replaces the block's content with `html` and makes it visible.
    fn show_html(&self, html: &str);
}

/// Renders every block from its own source. Returns how many were rendered.
pub fn render_static_blocks<B: StaticBlock>(blocks: &[B], renderer: &dyn MarkdownRenderer) -> usize {
    for block in blocks {
        let html = renderer.render(&block.source_markdown());
        block.show_html(&html);
    }
    blocks.len()
}

/// A container tagged with the markdown class; its first child holds the raw
/// source.
pub struct MarkdownContainer(HtmlElement);

impl MarkdownContainer {
    /// Snapshot of the matching elements, taken before any of them is rewritten.
    pub fn collect(document: &Document, class_name: &str) -> Vec<Self> {
        let live = document.get_elements_by_class_name(class_name);
        (0..live.length())
            .filter_map(|idx| live.item(idx))
            .filter_map(|element| element.dyn_into::<HtmlElement>().ok())
            .map(Self)
            .collect()
    }
}

fn node_source(node: Node) -> String {
    let node = match node.dyn_into::<HtmlTextAreaElement>() {
        Ok(area) => return area.value(),
        Err(node) => node,
    };
    match node.dyn_into::<HtmlInputElement>() {
        Ok(input) => input.value(),
        Err(node) => node.text_content().unwrap_or_default(),
    }
}

impl StaticBlock for MarkdownContainer {
    fn source_markdown(&self) -> String {
        self.0.first_child().map(node_source).unwrap_or_default()
    }

    fn show_html(&self, html: &str) {
        self.0.set_inner_html(html);
        let _ = self.0.style().set_property("display", "block");
    }
}

pub fn render_document_blocks(
    document: &Document,
    class_name: &str,
    renderer: &dyn MarkdownRenderer,
) -> usize {
    let blocks = MarkdownContainer::collect(document, class_name);
    render_static_blocks(&blocks, renderer)
}

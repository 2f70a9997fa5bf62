//! A scrollable markdown view feeding the decoration pass.
//!
//! [`MarkdownView`] owns the source text, its syntax tree and a
//! [`Viewport`]. Every mutation reports a [`ViewUpdate`] so callers can
//! hand it straight to [`ListMarkerPlugin::update`].
//!
//! [`ListMarkerPlugin::update`]: crate::decoration::ListMarkerPlugin::update

mod viewport;

use std::ops::Range;

use crate::decoration::{DecorationSet, MarkdownTree, View, ViewUpdate};

pub use viewport::Viewport;

#[derive(Debug, Clone)]
pub struct MarkdownView {
    source: String,
    tree: MarkdownTree,
    line_starts: Vec<usize>,
    viewport: Viewport,
}

impl MarkdownView {
    /// Create a view `height` lines tall, scrolled to the top.
    pub fn new(source: impl Into<String>, height: u16) -> Self {
        let source = source.into();
        let line_starts = line_starts(&source);
        Self {
            tree: MarkdownTree::parse(&source),
            viewport: Viewport::new(height, line_starts.len()),
            line_starts,
            source,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub const fn tree(&self) -> &MarkdownTree {
        &self.tree
    }

    /// Replace the document text, reparsing it.
    pub fn set_source(&mut self, source: impl Into<String>) -> ViewUpdate {
        let source = source.into();
        if source == self.source {
            return ViewUpdate::NONE;
        }
        let before = self.viewport.visible_range();
        self.line_starts = line_starts(&source);
        self.tree = MarkdownTree::parse(&source);
        self.source = source;
        self.viewport.set_total_lines(self.line_starts.len());
        ViewUpdate {
            doc_changed: true,
            viewport_changed: self.viewport.visible_range() != before,
        }
    }

    pub fn scroll_down(&mut self, n: usize) -> ViewUpdate {
        self.move_viewport(|vp| vp.scroll_down(n))
    }

    pub fn scroll_up(&mut self, n: usize) -> ViewUpdate {
        self.move_viewport(|vp| vp.scroll_up(n))
    }

    pub fn go_to_line(&mut self, line: usize) -> ViewUpdate {
        self.move_viewport(|vp| vp.go_to_line(line))
    }

    pub fn resize(&mut self, height: u16) -> ViewUpdate {
        self.move_viewport(|vp| vp.resize(height))
    }

    /// Byte range covered by the visible lines, excluding the final newline.
    pub fn visible_text_range(&self) -> Range<usize> {
        let lines = self.viewport.visible_range();
        if lines.is_empty() {
            return 0..0;
        }
        let start = self.line_starts[lines.start];
        let end = self
            .line_starts
            .get(lines.end)
            .map_or(self.source.len(), |next| next - 1);
        start..end
    }

    /// Visible lines as rendered with `decorations` applied.
    pub fn render_visible(&self, decorations: &DecorationSet) -> Vec<String> {
        let rendered = decorations.apply(&self.source);
        let lines = self.viewport.visible_range();
        rendered
            .split('\n')
            .skip(lines.start)
            .take(lines.len())
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect()
    }

    fn move_viewport(&mut self, change: impl FnOnce(&mut Viewport)) -> ViewUpdate {
        let before = self.viewport.visible_range();
        change(&mut self.viewport);
        ViewUpdate {
            doc_changed: false,
            viewport_changed: self.viewport.visible_range() != before,
        }
    }
}

impl View for MarkdownView {
    type Tree = MarkdownTree;

    fn visible_ranges(&self) -> Vec<Range<usize>> {
        if self.viewport.visible_range().is_empty() {
            return Vec::new();
        }
        vec![self.visible_text_range()]
    }

    fn syntax_tree(&self) -> &MarkdownTree {
        &self.tree
    }
}

/// Byte offset of the start of every line; a trailing newline opens an
/// empty last line.
fn line_starts(source: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(source.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

//! List-marker decorations.
//!
//! Every list item in the visible part of the document gets its marker
//! (the bullet, or the delimiter after an ordered number) replaced by
//! [`LIST_GLYPH`] in the rendered view. The document text is never
//! changed; a [`DecorationSet`] only describes what to draw.

mod tree;

use std::collections::BTreeSet;
use std::ops::Range;

use serde::Serialize;
use tracing::debug;

pub use tree::{MarkdownTree, SyntaxNode, SyntaxTree};

/// Glyph drawn in place of a list marker.
pub const LIST_GLYPH: &str = "👉";

/// Distance from the start of a list node back to its marker.
const MARKER_OFFSET: usize = 2;

/// One replaced span, in byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Replacement {
    pub from: usize,
    pub to: usize,
}

/// Sorted, de-duplicated replacements for one render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecorationSet {
    replacements: Vec<Replacement>,
}

impl DecorationSet {
    pub const fn empty() -> Self {
        Self {
            replacements: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Replacement> {
        self.replacements.iter()
    }

    pub fn as_slice(&self) -> &[Replacement] {
        &self.replacements
    }

    /// Render `source` with every replacement drawn as [`LIST_GLYPH`].
    ///
    /// Spans that do not land on character boundaries are left alone.
    pub fn apply(&self, source: &str) -> String {
        let mut out = String::with_capacity(source.len() + self.len() * LIST_GLYPH.len());
        let mut last = 0;
        for r in &self.replacements {
            if r.from < last || !source.is_char_boundary(r.from) || !source.is_char_boundary(r.to)
            {
                continue;
            }
            out.push_str(&source[last..r.from]);
            out.push_str(LIST_GLYPH);
            last = r.to;
        }
        out.push_str(&source[last..]);
        out
    }
}

/// Build list-marker replacements for the visible ranges of a tree.
///
/// Every node whose type name starts with `list` and that overlaps a
/// visible range contributes one replacement. Nodes too close to the
/// document start to have a marker are skipped.
pub fn build_decorations<T>(tree: &T, visible_ranges: &[Range<usize>]) -> DecorationSet
where
    T: SyntaxTree + ?Sized,
{
    let mut markers = BTreeSet::new();
    for range in visible_ranges {
        tree.iterate(range.start, range.end, &mut |node| {
            if !node.name.starts_with("list") {
                return;
            }
            if let Some(from) = node.from.checked_sub(MARKER_OFFSET) {
                markers.insert(Replacement { from, to: from + 1 });
            }
        });
    }
    debug!(
        count = markers.len(),
        ranges = visible_ranges.len(),
        "built list decorations"
    );
    DecorationSet {
        replacements: markers.into_iter().collect(),
    }
}

/// What a view exposes to the decoration pass.
pub trait View {
    type Tree: SyntaxTree + ?Sized;

    /// Byte ranges currently on screen.
    fn visible_ranges(&self) -> Vec<Range<usize>>;

    fn syntax_tree(&self) -> &Self::Tree;
}

/// What changed in a view since the last render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewUpdate {
    pub doc_changed: bool,
    pub viewport_changed: bool,
}

impl ViewUpdate {
    pub const NONE: Self = Self {
        doc_changed: false,
        viewport_changed: false,
    };

    /// Whether decorations need rebuilding.
    pub const fn is_relevant(&self) -> bool {
        self.doc_changed || self.viewport_changed
    }
}

/// Keeps list decorations in sync with a view.
///
/// Decorations are rebuilt from scratch on every relevant update.
#[derive(Debug, Clone, Default)]
pub struct ListMarkerPlugin {
    decorations: DecorationSet,
}

impl ListMarkerPlugin {
    pub fn new<V: View + ?Sized>(view: &V) -> Self {
        Self {
            decorations: Self::build(view),
        }
    }

    /// React to a view update. Returns `true` if decorations were rebuilt.
    pub fn update<V: View + ?Sized>(&mut self, view: &V, update: ViewUpdate) -> bool {
        if !update.is_relevant() {
            return false;
        }
        self.decorations = Self::build(view);
        true
    }

    pub const fn decorations(&self) -> &DecorationSet {
        &self.decorations
    }

    fn build<V: View + ?Sized>(view: &V) -> DecorationSet {
        build_decorations(view.syntax_tree(), &view.visible_ranges())
    }
}

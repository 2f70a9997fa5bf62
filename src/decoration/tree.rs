//! Syntax trees the decoration pass can walk.

use comrak::nodes::{AstNode, LineColumn, ListType, NodeValue};
use comrak::{Arena, Options, parse_document};

/// A node as seen by tree iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    /// Node type name, e.g. `paragraph` or `list-1`.
    pub name: String,
    /// Byte offset where the node starts.
    pub from: usize,
    /// Byte offset just past the node.
    pub to: usize,
}

impl SyntaxNode {
    pub fn new(name: impl Into<String>, from: usize, to: usize) -> Self {
        Self {
            name: name.into(),
            from,
            to,
        }
    }

    /// Whether the node touches `[from, to]`.
    pub const fn overlaps(&self, from: usize, to: usize) -> bool {
        self.from <= to && self.to >= from
    }
}

/// Pre-order iteration over the nodes touching a range.
pub trait SyntaxTree {
    /// Call `enter` for every node overlapping `[from, to]`, parents first.
    fn iterate(&self, from: usize, to: usize, enter: &mut dyn FnMut(&SyntaxNode));
}

/// A flat, pre-ordered node list is itself a tree.
impl SyntaxTree for [SyntaxNode] {
    fn iterate(&self, from: usize, to: usize, enter: &mut dyn FnMut(&SyntaxNode)) {
        for node in self.iter().filter(|node| node.overlaps(from, to)) {
            enter(node);
        }
    }
}

impl SyntaxTree for Vec<SyntaxNode> {
    fn iterate(&self, from: usize, to: usize, enter: &mut dyn FnMut(&SyntaxNode)) {
        self.as_slice().iterate(from, to, enter);
    }
}

/// Markdown syntax tree built with comrak.
///
/// List items are named `list-<depth>` and start two bytes past their
/// marker character (the bullet, or the delimiter after an ordered item's
/// number), so the marker always sits two bytes before them however the
/// content is spaced. Offsets are byte offsets into the parsed source.
///
/// # Example
///
/// ```
/// use aiditor::decoration::MarkdownTree;
///
/// let tree = MarkdownTree::parse("- one\n- two");
/// let items: Vec<_> = tree.nodes().iter().filter(|n| n.name == "list-1").collect();
/// assert_eq!(items.len(), 2);
/// assert_eq!(items[0].from, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownTree {
    nodes: Vec<SyntaxNode>,
}

impl MarkdownTree {
    pub fn parse(source: &str) -> Self {
        let arena = Arena::new();
        let options = create_options();
        let root = parse_document(&arena, source, &options);

        let offsets = LineOffsets::new(source);
        let mut nodes = Vec::new();
        collect_nodes(root, source, &offsets, 0, &mut nodes);
        Self { nodes }
    }

    /// All nodes in pre-order.
    pub fn nodes(&self) -> &[SyntaxNode] {
        &self.nodes
    }
}

impl SyntaxTree for MarkdownTree {
    fn iterate(&self, from: usize, to: usize, enter: &mut dyn FnMut(&SyntaxNode)) {
        self.nodes.iterate(from, to, enter);
    }
}

fn create_options() -> Options {
    let mut options = Options::default();

    // GFM extensions; task lists stay off so `[ ]` remains item text and the
    // bullet keeps its place two bytes before the content.
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.footnotes = true;

    options
}

/// Maps comrak's 1-based line/column positions to byte offsets.
struct LineOffsets {
    starts: Vec<usize>,
    len: usize,
}

impl LineOffsets {
    fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            starts,
            len: source.len(),
        }
    }

    fn offset(&self, pos: LineColumn) -> usize {
        if pos.line == 0 {
            return 0;
        }
        let line_start = self.starts.get(pos.line - 1).copied().unwrap_or(self.len);
        (line_start + pos.column.saturating_sub(1)).min(self.len)
    }

    /// Offset just past an inclusive end position.
    fn end_offset(&self, pos: LineColumn) -> usize {
        (self.offset(pos) + 1).min(self.len)
    }
}

fn collect_nodes<'a>(
    node: &'a AstNode<'a>,
    source: &str,
    offsets: &LineOffsets,
    list_depth: usize,
    out: &mut Vec<SyntaxNode>,
) {
    let (name, from, to, child_depth) = {
        let data = node.data.borrow();
        let from = offsets.offset(data.sourcepos.start);
        let to = offsets.end_offset(data.sourcepos.end).max(from);
        match &data.value {
            NodeValue::List(list) => {
                let name = match list.list_type {
                    ListType::Bullet => "bullet-list",
                    ListType::Ordered => "ordered-list",
                };
                (name.to_string(), from, to, list_depth + 1)
            }
            NodeValue::Item(list) => {
                let start = (marker_offset(source, from, list.list_type) + 2).min(offsets.len);
                (format!("list-{list_depth}"), start, to.max(start), list_depth)
            }
            value => (node_name(value), from, to, list_depth),
        }
    };

    out.push(SyntaxNode::new(name, from, to));
    for child in node.children() {
        collect_nodes(child, source, offsets, child_depth, out);
    }
}

/// Byte offset of the marker character of an item starting at `item_start`:
/// the bullet itself, or the `.`/`)` after an ordered item's number.
fn marker_offset(source: &str, item_start: usize, list_type: ListType) -> usize {
    match list_type {
        ListType::Bullet => item_start,
        ListType::Ordered => {
            let digits = source
                .as_bytes()
                .get(item_start..)
                .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count());
            item_start + digits
        }
    }
}

fn node_name(value: &NodeValue) -> String {
    let name = match value {
        NodeValue::Document => "document",
        NodeValue::Heading(heading) => return format!("heading-{}", heading.level),
        NodeValue::Paragraph => "paragraph",
        NodeValue::BlockQuote => "blockquote",
        NodeValue::CodeBlock(_) => "code-block",
        NodeValue::ThematicBreak => "hr",
        NodeValue::Table(_) => "table",
        NodeValue::Text(_) => "text",
        NodeValue::Code(_) => "inline-code",
        NodeValue::Emph => "emphasis",
        NodeValue::Strong => "strong",
        NodeValue::Strikethrough => "strikethrough",
        NodeValue::Link(_) => "link",
        NodeValue::Image(_) => "image",
        NodeValue::SoftBreak | NodeValue::LineBreak => "break",
        _ => "node",
    };
    name.to_string()
}

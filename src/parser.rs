//! Tree-text parsing functionality.
//! Reconstructs a hierarchy from text whose nesting is expressed through
//! leading whitespace and tree-drawing glyphs, one entry per line.
//! The parser is a pure function of its input and never touches the
//! filesystem.

use crate::structure::{HierarchyNode, Structure};
use log::debug;

/// Characters that decorate the left edge of a tree line.
/// Their stripped count, divided by 4, is the nesting depth.
const DECORATION: [char; 6] = ['│', '├', '└', '─', '|', ' '];

/// Number of indentation columns per nesting level.
const INDENT_WIDTH: usize = 4;

struct Frame {
    name: String,
    depth: isize,
}

/// Transient stack of currently open containers.
///
/// The bottom is a synthetic root at depth -1, represented implicitly by
/// an empty frame list. The stack lives for one parse call only.
struct ParseStack {
    frames: Vec<Frame>,
}

impl ParseStack {
    fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Depth of the most recently opened container.
    fn top_depth(&self) -> isize {
        self.frames.last().map_or(-1, |frame| frame.depth)
    }

    /// Pops until the top is strictly shallower than `depth`.
    ///
    /// Entries at equal depth are siblings, so they are popped too and
    /// re-resolved against the next shallower ancestor.
    fn pop_to_parent_of(&mut self, depth: isize) {
        while self.top_depth() >= depth {
            self.frames.pop();
        }
    }

    fn push(&mut self, name: &str, depth: isize) {
        self.frames.push(Frame { name: name.to_string(), depth });
    }

    /// Names of the open containers, outermost first.
    fn path(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().map(|frame| frame.name.as_str())
    }
}

/// Classifies a cleaned line as a container.
///
/// A line is a container if it ends with a path separator or contains no
/// dot. An extensionless filename is indistinguishable from a folder and
/// is classified as a container; this ambiguity is accepted rather than
/// guessed around.
fn is_container(cleaned: &str) -> bool {
    cleaned.ends_with('/') || !cleaned.contains('.')
}

/// Walks from the root down the stack's open containers and returns the
/// children mapping new entries should be inserted into.
fn open_container<'a>(root: &'a mut Structure, stack: &ParseStack) -> &'a mut Structure {
    let mut current = root;
    for name in stack.path() {
        let node = current
            .entry(name.to_string())
            .or_insert_with(|| HierarchyNode::Container(Structure::new()));
        if !node.is_container() {
            // A file declared earlier under this name is upgraded, since
            // something was nested beneath it.
            *node = HierarchyNode::Container(Structure::new());
        }
        current = match node {
            HierarchyNode::Container(children) => children,
            // The leaf case is rewritten to a container above.
            HierarchyNode::Leaf => unreachable!(),
        };
    }
    current
}

/// Parses tree-style text into an ordered hierarchy.
///
/// Lines are stripped of leading decoration characters and whitespace;
/// the count of stripped characters divided by 4 is the nesting depth.
/// Inputs that deviate from 4-column indentation produce depths that may
/// not match the author's intent; they are accepted as-is.
///
/// Malformed or empty input yields an empty mapping rather than an
/// error; callers should treat an empty result as "nothing parsed".
pub fn parse_tree_structure(text: &str) -> Structure {
    let mut root = Structure::new();
    let mut stack = ParseStack::new();

    for line in text.lines() {
        let cleaned = line.trim_start_matches(&DECORATION[..]).trim();
        if cleaned.is_empty() {
            continue;
        }

        let stripped = line.chars().count() - cleaned.chars().count();
        let depth = (stripped / INDENT_WIDTH) as isize;
        debug!("Cleaned line: '{}', depth: {}", cleaned, depth);

        stack.pop_to_parent_of(depth);

        if is_container(cleaned) {
            let name = cleaned.trim_end_matches('/');
            if name.is_empty() {
                continue;
            }
            let parent = open_container(&mut root, &stack);
            let node = parent
                .entry(name.to_string())
                .or_insert_with(|| HierarchyNode::Container(Structure::new()));
            if !node.is_container() {
                *node = HierarchyNode::Container(Structure::new());
            }
            stack.push(name, depth);
        } else {
            let parent = open_container(&mut root, &stack);
            parent.insert(cleaned.to_string(), HierarchyNode::Leaf);
        }
    }

    root
}

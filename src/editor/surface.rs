// file: src/editor/surface.rs
// description: editable surface holding the live markup tree and current selection
// reference: contentEditable editing surface

use crate::editor::commands::{FormatCommand, Selection, apply_command};
use crate::editor::metrics::{TextMetrics, count_metrics};
use crate::models::MarkupTree;
use crate::parser::{MarkupParser, MarkupSerializer};

#[derive(Debug, Clone, Default)]
pub struct Surface {
    tree: MarkupTree,
    selection: Option<Selection>,
}

impl Surface {
    pub fn new(tree: MarkupTree) -> Self {
        Self {
            tree,
            selection: None,
        }
    }

    pub fn from_markup(markup: &str) -> Self {
        Self::new(MarkupParser::new().parse(markup))
    }

    pub fn tree(&self) -> &MarkupTree {
        &self.tree
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn select(&mut self, selection: Selection) {
        self.selection = Some(selection);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Replaces the tree with the edited one; returns whether anything changed.
    pub fn apply(&mut self, command: FormatCommand) -> bool {
        let edited = apply_command(&self.tree, command, self.selection.as_ref());
        let changed = edited != self.tree;
        self.tree = edited;
        changed
    }

    pub fn markup(&self) -> String {
        MarkupSerializer::new().serialize(&self.tree)
    }

    pub fn metrics(&self) -> TextMetrics {
        count_metrics(&self.markup())
    }
}

// Tue Feb 03 2026 - Alex

use crate::walker::{ContributionNode, ContributionTree, RootKind};
use std::io::{self, Write};

const INDENT: &str = "    ";

/// Renders a contribution tree as an indented, size-ranked text report.
#[derive(Debug, Clone, Copy)]
pub struct ReportWriter {
    min_child_size: usize,
}

impl ReportWriter {
    pub fn new(min_child_size: usize) -> Self {
        Self { min_child_size }
    }

    pub fn header(tree: &ContributionTree) -> String {
        match tree.kind() {
            RootKind::Statics => format!("{} : {} bytes", tree.type_name(), tree.size()),
            RootKind::Instance => format!("{} ({}) : {} bytes", tree.identifier(), tree.type_name(), tree.size()),
        }
    }

    pub fn render(&self, tree: &ContributionTree) -> String {
        let mut out = Self::header(tree);
        out.push('\n');
        self.render_children(tree.root(), 1, &mut out);
        out
    }

    pub fn write_to<W: Write>(&self, tree: &ContributionTree, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.render(tree).as_bytes())
    }

    // Children are ranked before the cut-off, so the first one under the
    // threshold ends its whole sibling list.
    fn render_children(&self, node: &ContributionNode, depth: usize, out: &mut String) {
        for child in node.sorted_children() {
            if child.size() < self.min_child_size {
                break;
            }
            out.push_str(&INDENT.repeat(depth));
            out.push_str(&child.to_string());
            out.push('\n');
            self.render_children(child, depth + 1, out);
        }
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new(1)
    }
}

pub fn render(tree: &ContributionTree, min_child_size: usize) -> String {
    ReportWriter::new(min_child_size).render(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, size: usize) -> ContributionNode {
        ContributionNode::new(name, "Leaf").with_size(size)
    }

    #[test]
    fn test_sort_before_truncate() {
        let root = ContributionNode::new("Owner", "Owner")
            .with_child(leaf("a", 50))
            .with_child(leaf("b", 40))
            .with_child(leaf("c", 5))
            .with_child(leaf("d", 60));
        let tree = ContributionTree::new(RootKind::Statics, root);

        let text = render(&tree, 10);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Owner : 155 bytes",
                "    d (Leaf) : 60",
                "    a (Leaf) : 50",
                "    b (Leaf) : 40",
            ]
        );
    }

    #[test]
    fn test_nested_indent_and_array_length() {
        let mut items = ContributionNode::new("items", "Item[]").with_size(32);
        items.set_array_length(2);
        let items = items.with_child(leaf("0", 24)).with_child(leaf("1", 16));
        let root = ContributionNode::new("Player7", "Game.Player").with_size(24).with_child(items);
        let tree = ContributionTree::new(RootKind::Instance, root);

        let text = ReportWriter::default().render(&tree);
        assert_eq!(
            text,
            "Player7 (Game.Player) : 96 bytes\n\
             \x20   items (Item[]:2) : 72\n\
             \x20       0 (Leaf) : 24\n\
             \x20       1 (Leaf) : 16\n"
        );
    }

    #[test]
    fn test_truncation_applies_per_level() {
        let inner = ContributionNode::new("inner", "Inner")
            .with_child(leaf("small", 2))
            .with_child(leaf("big", 20));
        let root = ContributionNode::new("Owner", "Owner").with_child(inner).with_child(leaf("tiny", 1));
        let tree = ContributionTree::new(RootKind::Statics, root);

        let text = render(&tree, 10);
        assert!(text.contains("        big (Leaf) : 20"));
        assert!(!text.contains("small"));
        assert!(!text.contains("tiny"));
    }

    #[test]
    fn test_write_to() {
        let tree = ContributionTree::new(RootKind::Statics, leaf("Cache", 8));
        let mut buffer = Vec::new();
        ReportWriter::default().write_to(&tree, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "Leaf : 8 bytes\n");
    }
}

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use crate::grid::CellDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Generic,
    Widget,
    Header,
    Months,
    Month,
    MonthHeader,
    LabelRow,
    DayGrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Container(ContainerKind),
    MonthTitle,
    DayLabel { weekday: u32 },
    Padding,
    DateCell { date: CellDate },
    YearMarker { year: i32 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presentation {
    pub color: Option<String>,
    pub selected: bool,
    pub marks: BTreeSet<String>,
}

impl Presentation {
    pub fn mark(&mut self, tag: &str) {
        self.marks.insert(tag.to_string());
    }

    pub fn has_mark(&self, tag: &str) -> bool {
        self.marks.contains(tag)
    }
}

#[derive(Debug, Clone)]
pub struct ViewNode {
    id: NodeId,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pub role: Role,
    pub text: String,
    pub presentation: Presentation,
}

impl ViewNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewTree {
    nodes: BTreeMap<NodeId, ViewNode>,
    registry: BTreeMap<String, NodeId>,
    next: u64,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, parent: Option<NodeId>, role: Role) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        self.nodes.insert(
            id,
            ViewNode {
                id,
                parent,
                children: Vec::new(),
                role,
                text: String::new(),
                presentation: Presentation::default(),
            },
        );
        if let Some(parent) = parent
            && let Some(entry) = self.nodes.get_mut(&parent)
        {
            entry.children.push(id);
        }
        id
    }

    pub fn get(&self, node: NodeId) -> Option<&ViewNode> {
        self.nodes.get(&node)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut ViewNode> {
        self.nodes.get_mut(&node)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(ViewNode::parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(&node)
            .map(ViewNode::children)
            .unwrap_or_default()
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(entry) = self.nodes.get_mut(&node) {
            entry.text = text.to_string();
        }
    }

    pub fn text(&self, node: NodeId) -> &str {
        self.nodes.get(&node).map(|entry| entry.text.as_str()).unwrap_or("")
    }

    pub fn set_element_id(&mut self, node: NodeId, element_id: &str) {
        if self.nodes.contains_key(&node) {
            self.registry.insert(element_id.to_string(), node);
        }
    }

    pub fn by_element_id(&self, element_id: &str) -> Option<NodeId> {
        self.registry.get(element_id).copied()
    }

    pub fn is_within(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![node];
        while let Some(next) = stack.pop() {
            if let Some(entry) = self.nodes.get(&next) {
                if next != node {
                    found.push(next);
                }
                for child in entry.children.iter().rev() {
                    stack.push(*child);
                }
            }
        }
        found
    }

    pub fn remove_children(&mut self, node: NodeId) {
        let children = match self.nodes.get_mut(&node) {
            Some(entry) => std::mem::take(&mut entry.children),
            None => return,
        };
        for child in children {
            self.remove_nodes_from(child);
        }
        self.prune_registry();
    }

    pub fn remove_subtree(&mut self, node: NodeId) {
        if let Some(parent) = self.parent(node)
            && let Some(entry) = self.nodes.get_mut(&parent)
        {
            entry.children.retain(|child| *child != node);
        }
        self.remove_nodes_from(node);
        self.prune_registry();
    }

    fn remove_nodes_from(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(next) = stack.pop() {
            if let Some(removed) = self.nodes.remove(&next) {
                stack.extend(removed.children);
            }
        }
    }

    fn prune_registry(&mut self) {
        let nodes = &self.nodes;
        self.registry.retain(|_, target| nodes.contains_key(target));
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

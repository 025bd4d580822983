#![forbid(unsafe_code)]

//! In-memory [`PanelHost`]: an explicit ordered sequence of nodes.
//!
//! [`PanelList`] is the non-visual container. Its child sequence is the source
//! of truth for order, and layout is derived from it on demand: in-flow
//! children stack top to bottom from the container origin (minus scroll),
//! while a child carrying a [`DragOverlay`] is out of flow and reports the
//! overlay box instead.
//!
//! Child elements (drag triggers inside a panel) report their parent's box.
//!
//! The list also counts structural mutations ([`PanelList::revision`]) and
//! overlay writes so callers can assert that a stable drag stops touching the
//! container, and it can inject a one-shot failure into any operation to
//! exercise rollback paths.

use std::cell::Cell;
use std::fmt;

use crate::error::HostError;
use crate::geometry::{Extent, Size};
use crate::host::{DragOverlay, PanelHost};

/// Handle to a node owned by a [`PanelList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Raw arena index.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Handle for arena slot `index`; `None` once indices outgrow `u32`.
    fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Self)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Host operation selector for failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOp {
    Extent,
    CreateShadow,
    InsertBefore,
    InsertAfter,
    Append,
    Remove,
    AddClass,
    RemoveClass,
    SetOverlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parent {
    Container,
    Node(NodeId),
    Detached,
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    classes: Vec<String>,
    size: Size,
    parent: Parent,
    overlay: Option<DragOverlay>,
    removed: bool,
}

impl Element {
    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|candidate| candidate == class)
    }
}

/// Ordered in-memory container.
#[derive(Debug, Clone, Default)]
pub struct PanelList {
    elements: Vec<Element>,
    children: Vec<NodeId>,
    top: f64,
    left: f64,
    scroll_top: f64,
    revision: u64,
    overlay_writes: u64,
    fail_next: Cell<Option<HostOp>>,
}

impl PanelList {
    /// Empty container with its origin at `(0, 0)`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty container with its content origin at `(left, top)`.
    #[must_use]
    pub fn with_origin(top: f64, left: f64) -> Self {
        Self {
            top,
            left,
            ..Self::default()
        }
    }

    /// Append a new container child.
    ///
    /// # Panics
    ///
    /// Panics if the list already holds `u32::MAX + 1` nodes.
    pub fn push(&mut self, tag: &str, classes: &[&str], size: Size) -> NodeId {
        let id = self
            .alloc(tag, classes, size, Parent::Container)
            .unwrap_or_else(|error| panic!("{error}"));
        self.children.push(id);
        id
    }

    /// Add a nested element (for example a drag handle) under `parent`.
    ///
    /// # Panics
    ///
    /// Panics if the list already holds `u32::MAX + 1` nodes.
    pub fn push_child(&mut self, parent: NodeId, tag: &str, classes: &[&str]) -> NodeId {
        self.alloc(tag, classes, Size::default(), Parent::Node(parent))
            .unwrap_or_else(|error| panic!("{error}"))
    }

    fn alloc(
        &mut self,
        tag: &str,
        classes: &[&str],
        size: Size,
        parent: Parent,
    ) -> Result<NodeId, HostError> {
        let id = NodeId::from_index(self.elements.len())
            .ok_or_else(|| HostError::Rejected("node arena is full".to_owned()))?;
        self.elements.push(Element {
            tag: tag.to_owned(),
            classes: classes.iter().map(|class| (*class).to_owned()).collect(),
            size,
            parent,
            overlay: None,
            removed: false,
        });
        Ok(id)
    }

    /// Container children in order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Number of live container children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Structural mutation counter (inserts, moves, removals).
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of overlay writes.
    #[must_use]
    pub const fn overlay_writes(&self) -> u64 {
        self.overlay_writes
    }

    /// Scroll the container content.
    pub fn set_scroll_top(&mut self, scroll_top: f64) {
        self.scroll_top = scroll_top.max(0.0);
    }

    #[must_use]
    pub const fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Tag of `node`.
    #[must_use]
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|element| element.tag.as_str())
    }

    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|element| element.has_class(class))
    }

    /// Inline overlay currently applied to `node`.
    #[must_use]
    pub fn overlay(&self, node: NodeId) -> Option<DragOverlay> {
        self.element(node).and_then(|element| element.overlay)
    }

    /// Whether `node` has been removed from the container.
    #[must_use]
    pub fn is_removed(&self, node: NodeId) -> bool {
        self.element(node).is_none_or(|element| element.removed)
    }

    /// Look up a live node by its raw index, as sent by a remote host.
    #[must_use]
    pub fn node(&self, raw: u32) -> Option<NodeId> {
        let id = NodeId(raw);
        (!self.is_removed(id)).then_some(id)
    }

    /// In-flow container child under vertical coordinate `y`.
    #[must_use]
    pub fn node_at(&self, y: f64) -> Option<NodeId> {
        self.layout()
            .into_iter()
            .find(|(_, extent, in_flow)| *in_flow && extent.contains_y(y))
            .map(|(id, _, _)| id)
    }

    /// Make the next call to `op` fail with [`HostError::Rejected`].
    pub fn fail_next(&self, op: HostOp) {
        self.fail_next.set(Some(op));
    }

    fn check_fault(&self, op: HostOp) -> Result<(), HostError> {
        if self.fail_next.get() == Some(op) {
            self.fail_next.set(None);
            return Err(HostError::Rejected(format!("injected {op:?} failure")));
        }
        Ok(())
    }

    fn element(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(node.0 as usize)
    }

    fn live_mut(&mut self, node: NodeId) -> Result<&mut Element, HostError> {
        match self.elements.get_mut(node.0 as usize) {
            Some(element) if !element.removed => Ok(element),
            _ => Err(HostError::UnknownNode(node.to_string())),
        }
    }

    fn layout(&self) -> Vec<(NodeId, Extent, bool)> {
        let mut cursor = self.top - self.scroll_top;
        self.children
            .iter()
            .filter_map(|&id| {
                let element = self.element(id)?;
                Some(match element.overlay {
                    Some(overlay) => {
                        let left = overlay.left.unwrap_or(self.left);
                        let extent = Extent::new(
                            overlay.top,
                            left,
                            overlay.size.width,
                            overlay.size.height,
                        );
                        (id, extent, false)
                    }
                    None => {
                        let extent = Extent::new(
                            cursor,
                            self.left,
                            element.size.width,
                            element.size.height,
                        );
                        cursor += element.size.height;
                        (id, extent, true)
                    }
                })
            })
            .collect()
    }

    fn detach(&mut self, node: NodeId) {
        self.children.retain(|&child| child != node);
    }

    fn child_index(&self, node: NodeId) -> Result<usize, HostError> {
        self.children
            .iter()
            .position(|&child| child == node)
            .ok_or_else(|| HostError::Detached(node.to_string()))
    }

    fn place(&mut self, node: NodeId, reference: NodeId, after: bool) -> Result<(), HostError> {
        self.live_mut(node)?;
        self.child_index(reference)?;
        if node == reference {
            return Err(HostError::Rejected(format!(
                "cannot insert {node} relative to itself"
            )));
        }
        self.detach(node);
        let index = self.child_index(reference)? + usize::from(after);
        self.children.insert(index, node);
        self.live_mut(node)?.parent = Parent::Container;
        self.revision += 1;
        Ok(())
    }
}

impl PanelHost for PanelList {
    type Node = NodeId;

    fn select(&self, class: &str) -> Vec<NodeId> {
        let mut matches = Vec::new();
        for &child in &self.children {
            let Some(element) = self.element(child) else {
                continue;
            };
            if element.has_class(class) {
                matches.push(child);
            }
            matches.extend(
                self.elements
                    .iter()
                    .enumerate()
                    .filter(|(_, nested)| {
                        !nested.removed
                            && nested.parent == Parent::Node(child)
                            && nested.has_class(class)
                    })
                    .filter_map(|(index, _)| NodeId::from_index(index)),
            );
        }
        matches
    }

    fn extent(&self, node: &NodeId) -> Result<Extent, HostError> {
        self.check_fault(HostOp::Extent)?;
        let element = self
            .element(*node)
            .filter(|element| !element.removed)
            .ok_or_else(|| HostError::UnknownNode(node.to_string()))?;
        let owner = match element.parent {
            Parent::Container => *node,
            Parent::Node(parent) => parent,
            Parent::Detached => return Err(HostError::Detached(node.to_string())),
        };
        self.layout()
            .into_iter()
            .find(|(id, _, _)| *id == owner)
            .map(|(_, extent, _)| extent)
            .ok_or_else(|| HostError::ExtentUnavailable(node.to_string()))
    }

    fn create_shadow(
        &mut self,
        template: &NodeId,
        classes: &[&str],
        size: Size,
    ) -> Result<NodeId, HostError> {
        self.check_fault(HostOp::CreateShadow)?;
        let tag = self.live_mut(*template)?.tag.clone();
        self.alloc(&tag, classes, size, Parent::Detached)
    }

    fn insert_before(&mut self, node: &NodeId, reference: &NodeId) -> Result<(), HostError> {
        self.check_fault(HostOp::InsertBefore)?;
        self.place(*node, *reference, false)
    }

    fn insert_after(&mut self, node: &NodeId, reference: &NodeId) -> Result<(), HostError> {
        self.check_fault(HostOp::InsertAfter)?;
        self.place(*node, *reference, true)
    }

    fn append(&mut self, node: &NodeId) -> Result<(), HostError> {
        self.check_fault(HostOp::Append)?;
        self.live_mut(*node)?.parent = Parent::Container;
        self.detach(*node);
        self.children.push(*node);
        self.revision += 1;
        Ok(())
    }

    fn remove(&mut self, node: &NodeId) -> Result<(), HostError> {
        self.check_fault(HostOp::Remove)?;
        let element = self.live_mut(*node)?;
        element.removed = true;
        element.parent = Parent::Detached;
        self.detach(*node);
        self.revision += 1;
        Ok(())
    }

    fn add_class(&mut self, node: &NodeId, class: &str) -> Result<(), HostError> {
        self.check_fault(HostOp::AddClass)?;
        let element = self.live_mut(*node)?;
        if !element.has_class(class) {
            element.classes.push(class.to_owned());
        }
        Ok(())
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) -> Result<(), HostError> {
        self.check_fault(HostOp::RemoveClass)?;
        self.live_mut(*node)?
            .classes
            .retain(|candidate| candidate != class);
        Ok(())
    }

    fn set_overlay(
        &mut self,
        node: &NodeId,
        overlay: Option<DragOverlay>,
    ) -> Result<(), HostError> {
        self.check_fault(HostOp::SetOverlay)?;
        self.live_mut(*node)?.overlay = overlay;
        self.overlay_writes += 1;
        Ok(())
    }
}

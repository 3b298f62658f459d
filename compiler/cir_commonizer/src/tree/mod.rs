//! The merged-by-signature declaration tree.
//!
//! [`MergedTree`] is an arena of [`CirNode`]s. Each node holds one optional
//! declaration per target, matched by [`NodeKey`], and a once-computed
//! common declaration. The driver fills the common cells top-down and never
//! descends below a node without one, so pruned subtrees stay uncomputed.
//!
//! After a run the arena is handed out read-only as a [`CommonizedTree`].

mod build;
mod driver;
mod key;

use std::cell::OnceCell;
use std::fmt;

use cir_ir::Declaration;

pub use key::{ArgumentSignature, NodeKey, ParameterSignatures, TypeSignature};
pub(crate) use driver::TreeCommonizer;

use crate::members::ValueParameterNamesPatch;
use crate::CommonizerError;

/// Index into a [`MergedTree`].
///
/// Only trees hand ids out; an id is meaningful for the tree it came from.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "node counts are bounded by declaration counts, far below u32::MAX"
    )]
    pub(crate) const fn from_index(index: usize) -> Self {
        NodeId(index as u32)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// One node of the merged tree.
#[derive(Debug)]
pub struct CirNode {
    key: NodeKey,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// One slot per target, in target order.
    targets: Vec<Option<Declaration>>,
    common: OnceCell<Option<Declaration>>,
    patched: bool,
}

impl CirNode {
    fn new(key: NodeKey, parent: Option<NodeId>, target_count: usize) -> Self {
        Self {
            key,
            parent,
            children: Vec::new(),
            targets: vec![None; target_count],
            common: OnceCell::new(),
            patched: false,
        }
    }

    #[inline]
    pub fn key(&self) -> &NodeKey {
        &self.key
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Per-target declarations, after any parameter-name patch.
    #[inline]
    pub fn targets(&self) -> &[Option<Declaration>] {
        &self.targets
    }

    /// The common declaration; `None` if there is none or the node was
    /// pruned with its parent.
    pub fn common(&self) -> Option<&Declaration> {
        self.common.get().and_then(Option::as_ref)
    }

    /// Whether the common declaration has been computed.
    pub fn is_computed(&self) -> bool {
        self.common.get().is_some()
    }

    pub fn is_patched(&self) -> bool {
        self.patched
    }

    /// Rename parameters of the targets named by `patch`.
    fn apply_patch(
        &mut self,
        id: NodeId,
        patch: &ValueParameterNamesPatch,
    ) -> Result<(), CommonizerError> {
        if self.patched {
            return Err(CommonizerError::PatchAlreadyApplied { node: id.raw() });
        }
        for &target in &patch.targets {
            match self.targets.get_mut(target) {
                Some(Some(Declaration::Function(function))) => patch.apply_to(function),
                Some(Some(Declaration::Constructor(constructor))) => patch.apply_to(constructor),
                _ => {}
            }
        }
        self.patched = true;
        Ok(())
    }
}

/// Arena of merged nodes.
#[derive(Debug)]
pub struct MergedTree {
    nodes: Vec<CirNode>,
    roots: Vec<NodeId>,
    target_count: usize,
    patched_nodes: usize,
}

impl MergedTree {
    /// # Panics
    ///
    /// If `id` was not handed out by this tree. See [`MergedTree::get`].
    #[inline]
    pub fn node(&self, id: NodeId) -> &CirNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&CirNode> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    /// Child of `parent` (a root if `None`) with the given key.
    pub fn find(&self, parent: Option<NodeId>, key: &NodeKey) -> Option<NodeId> {
        let siblings = match parent {
            Some(parent) => self.node(parent).children(),
            None => self.roots(),
        };
        siblings.iter().copied().find(|&id| self.node(id).key() == key)
    }

    /// Resolve a path of keys from the roots.
    pub fn find_path(&self, path: &[NodeKey]) -> Option<NodeId> {
        path.iter()
            .try_fold(None, |parent, key| self.find(parent, key).map(Some))
            .flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &CirNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId::from_index(index), node))
    }
}

/// Result of a commonization run: the merged tree with every reachable
/// common declaration computed and every parameter-name patch applied.
#[derive(Debug)]
pub struct CommonizedTree {
    tree: MergedTree,
}

impl CommonizedTree {
    pub(crate) fn new(tree: MergedTree) -> Self {
        Self { tree }
    }

    #[inline]
    pub fn roots(&self) -> &[NodeId] {
        self.tree.roots()
    }

    /// # Panics
    ///
    /// If `id` was not handed out by this tree, as for every accessor taking
    /// a [`NodeId`]. See [`CommonizedTree::get`].
    #[inline]
    pub fn node(&self, id: NodeId) -> &CirNode {
        self.tree.node(id)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&CirNode> {
        self.tree.get(id)
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.tree.node(id).children()
    }

    /// The common declaration of `id`; `None` means it stays
    /// platform-specific.
    #[inline]
    pub fn common(&self, id: NodeId) -> Option<&Declaration> {
        self.tree.node(id).common()
    }

    /// Declarations of `id` per target, after patching.
    #[inline]
    pub fn target_declarations(&self, id: NodeId) -> &[Option<Declaration>] {
        self.tree.node(id).targets()
    }

    pub fn find(&self, parent: Option<NodeId>, key: &NodeKey) -> Option<NodeId> {
        self.tree.find(parent, key)
    }

    pub fn find_path(&self, path: &[NodeKey]) -> Option<NodeId> {
        self.tree.find_path(path)
    }

    /// Number of nodes whose per-target parameter names were rewritten.
    pub fn patched_count(&self) -> usize {
        self.tree.patched_nodes
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &CirNode)> {
        self.tree.iter()
    }

    pub fn into_inner(self) -> MergedTree {
        self.tree
    }
}

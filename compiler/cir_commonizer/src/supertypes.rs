//! Supertype-set commonization.
//!
//! Each target's class contributes the tree of its transitive supertypes,
//! resolved through that target's classifiers. Nodes are grouped by
//! classifier id across all trees; a group must have an unconsumed node in
//! every tree. Accepting a group consumes its classifier and every classifier
//! below it, wherever they occur in any tree, so an ancestor already implied by an accepted supertype
//! is never offered again.
//!
//! Nodes are visited shallowest classifier first, where a classifier's depth
//! is the deepest level it occurs at in its tree. A classifier that is also
//! inherited through another supertype therefore comes after that supertype
//! and gets consumed by it.
//!
//! Single inheritance: at most one non-interface group is accepted, the
//! first one found. A classifier whose kind is unknown counts as a class.

use cir_ir::{Class, ClassType, EntityId, Type};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::types::TypeCommonizer;
use crate::CommonizerContext;

struct SupertypeNode {
    ty: ClassType,
    children: Vec<usize>,
}

/// Transitive supertypes of one target's class. Nodes are stored in
/// preorder.
struct SupertypeTree {
    nodes: Vec<SupertypeNode>,
    /// Visiting order: by classifier depth, then preorder.
    order: Vec<usize>,
    consumed: Vec<bool>,
}

impl SupertypeTree {
    fn build(ctx: &CommonizerContext<'_>, target: usize, supertypes: &[ClassType]) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            order: Vec::new(),
            consumed: Vec::new(),
        };
        let mut depths = FxHashMap::default();
        let mut path = Vec::new();
        for supertype in supertypes {
            tree.add(ctx, target, supertype, 0, &mut path, &mut depths);
        }

        let mut order: Vec<usize> = (0..tree.nodes.len()).collect();
        order.sort_by_key(|&node| depths.get(&tree.nodes[node].ty.class_id).copied().unwrap_or(0));
        tree.order = order;
        tree.consumed = vec![false; tree.nodes.len()];
        tree
    }

    /// Returns `None` for a classifier already on the path: inheritance
    /// cycles in malformed input end the branch.
    fn add(
        &mut self,
        ctx: &CommonizerContext<'_>,
        target: usize,
        ty: &ClassType,
        depth: usize,
        path: &mut Vec<EntityId>,
        depths: &mut FxHashMap<EntityId, usize>,
    ) -> Option<usize> {
        if path.contains(&ty.class_id) {
            return None;
        }
        let index = self.nodes.len();
        self.nodes.push(SupertypeNode {
            ty: ty.clone(),
            children: Vec::new(),
        });
        let deepest = depths.entry(ty.class_id.clone()).or_insert(depth);
        *deepest = (*deepest).max(depth);

        if let Some(class) = ctx.class(target, &ty.class_id) {
            path.push(ty.class_id.clone());
            let children = class
                .supertypes
                .iter()
                .filter_map(|supertype| self.add(ctx, target, supertype, depth + 1, path, depths))
                .collect();
            path.pop();
            self.nodes[index].children = children;
        }
        Some(index)
    }

    fn first_unconsumed(&self, id: &EntityId) -> Option<usize> {
        self.order
            .iter()
            .copied()
            .find(|&node| !self.consumed[node] && &self.nodes[node].ty.class_id == id)
    }

    /// Consume `id` and every classifier below it, wherever they occur.
    fn consume(&mut self, id: &EntityId) {
        let mut pending = vec![id.clone()];
        let mut done = FxHashSet::default();
        while let Some(id) = pending.pop() {
            if !done.insert(id.clone()) {
                continue;
            }
            for node in 0..self.nodes.len() {
                if self.nodes[node].ty.class_id == id {
                    self.consumed[node] = true;
                    pending.extend(
                        self.nodes[node]
                            .children
                            .iter()
                            .map(|&child| self.nodes[child].ty.class_id.clone()),
                    );
                }
            }
        }
    }
}

/// Commonize the direct supertypes of one class per target.
pub fn commonize_supertypes(ctx: &CommonizerContext<'_>, classes: &[&Class]) -> Vec<ClassType> {
    let mut trees: Vec<SupertypeTree> = classes
        .iter()
        .enumerate()
        .map(|(target, class)| SupertypeTree::build(ctx, target, &class.supertypes))
        .collect();
    let types = TypeCommonizer::new(ctx);
    let mut supertypes = Vec::new();
    let mut class_accepted = false;

    for tree_index in 0..trees.len() {
        for position in 0..trees[tree_index].order.len() {
            let node = trees[tree_index].order[position];
            if trees[tree_index].consumed[node] {
                continue;
            }
            let id = trees[tree_index].nodes[node].ty.class_id.clone();
            let Some(group) = trees
                .iter()
                .map(|tree| tree.first_unconsumed(&id))
                .collect::<Option<Vec<_>>>()
            else {
                continue;
            };

            let is_class = !ctx.class_kind(&id).is_some_and(|kind| kind.is_interface());
            if is_class && class_accepted {
                continue;
            }

            let group_types: Vec<Type> = trees
                .iter()
                .zip(&group)
                .map(|(tree, &member)| Type::from(tree.nodes[member].ty.clone()))
                .collect();
            let group_types: Vec<&Type> = group_types.iter().collect();
            let Some(Type::Classifier(common)) = types.commonize(&group_types).map(|common| common.ty)
            else {
                continue;
            };

            class_accepted |= is_class;
            for tree in &mut trees {
                tree.consume(&id);
            }
            supertypes.push(common.expanded());
        }
    }
    supertypes
}

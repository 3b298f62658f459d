//! Top-down commonization of a merged tree.

use cir_ir::{Class, Constructor, Declaration, Function, Property, TypeAlias};
use tracing::debug;

use super::{CirNode, MergedTree, NodeId};
use crate::members::{
    commonize_class, commonize_constructor, commonize_function, commonize_property,
    commonize_type_alias, Patched,
};
use crate::{CommonizeResult, CommonizerContext, CommonizerError};

/// Walks a [`MergedTree`], computing each reachable node's common
/// declaration once and applying its parameter-name patch once.
pub(crate) struct TreeCommonizer<'c> {
    ctx: &'c CommonizerContext<'c>,
}

impl<'c> TreeCommonizer<'c> {
    pub fn new(ctx: &'c CommonizerContext<'c>) -> Self {
        Self { ctx }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(nodes = tree.len()))]
    pub fn run(&self, tree: &mut MergedTree) -> Result<(), CommonizerError> {
        let mut pending: Vec<NodeId> = tree.roots().iter().rev().copied().collect();
        while let Some(id) = pending.pop() {
            if self.compute(tree, id)? {
                pending.extend(tree.node(id).children().iter().rev());
            } else if !tree.node(id).children().is_empty() {
                debug!(
                    node = id.raw(),
                    key = ?tree.node(id).key(),
                    "no common declaration; subtree pruned"
                );
            }
        }
        debug!(patched = tree.patched_nodes, "tree commonized");
        Ok(())
    }

    /// Compute the common declaration of `id` on first use. Returns whether
    /// one exists.
    pub fn compute(&self, tree: &mut MergedTree, id: NodeId) -> Result<bool, CommonizerError> {
        let node = &mut tree.nodes[id.index()];
        if let Some(common) = node.common.get() {
            return Ok(common.is_some());
        }

        let (common, names_patch) = match commonize_node(self.ctx, node)? {
            Some(patched) => (Some(patched.declaration), patched.names_patch),
            None => (None, None),
        };
        let present = common.is_some();
        node.common.get_or_init(|| common);

        if let Some(patch) = names_patch {
            node.apply_patch(id, &patch)?;
            tree.patched_nodes += 1;
            debug!(
                node = id.raw(),
                targets = ?patch.targets,
                "value parameter names patched"
            );
        }
        Ok(present)
    }
}

/// Merge the per-target declarations of one node.
fn commonize_node(
    ctx: &CommonizerContext<'_>,
    node: &CirNode,
) -> CommonizeResult<Patched<Declaration>> {
    let Some(declarations) = node
        .targets
        .iter()
        .map(Option::as_ref)
        .collect::<Option<Vec<&Declaration>>>()
    else {
        return Ok(None);
    };
    let Some(&first) = declarations.first() else {
        return Ok(None);
    };

    match first {
        // Keys already pin module and package names.
        Declaration::Module(_) | Declaration::Package(_) => {
            Ok(Some(Patched::unpatched(first.clone())))
        }
        Declaration::Class(_) => {
            let Some(classes) = of_kind(&declarations, as_class) else {
                return Ok(None);
            };
            Ok(commonize_class(ctx, &classes)?.map(|class| Patched::unpatched(Declaration::Class(class))))
        }
        Declaration::TypeAlias(_) => {
            let Some(aliases) = of_kind(&declarations, as_type_alias) else {
                return Ok(None);
            };
            Ok(commonize_type_alias(ctx, &aliases)?
                .map(|alias| Patched::unpatched(Declaration::TypeAlias(alias))))
        }
        Declaration::Property(_) => {
            let Some(properties) = of_kind(&declarations, as_property) else {
                return Ok(None);
            };
            Ok(commonize_property(ctx, &properties)?
                .map(|property| Patched::unpatched(Declaration::Property(property))))
        }
        Declaration::Function(_) => {
            let Some(functions) = of_kind(&declarations, as_function) else {
                return Ok(None);
            };
            Ok(commonize_function(ctx, &functions)?
                .map(|patched| patched.map(Declaration::Function)))
        }
        Declaration::Constructor(_) => {
            let Some(constructors) = of_kind(&declarations, as_constructor) else {
                return Ok(None);
            };
            Ok(commonize_constructor(ctx, &constructors)?
                .map(|patched| patched.map(Declaration::Constructor)))
        }
    }
}

fn of_kind<'d, T>(
    declarations: &[&'d Declaration],
    project: fn(&'d Declaration) -> Option<&'d T>,
) -> Option<Vec<&'d T>> {
    declarations.iter().map(|&declaration| project(declaration)).collect()
}

fn as_class(declaration: &Declaration) -> Option<&Class> {
    match declaration {
        Declaration::Class(class) => Some(class),
        _ => None,
    }
}

fn as_type_alias(declaration: &Declaration) -> Option<&TypeAlias> {
    match declaration {
        Declaration::TypeAlias(alias) => Some(alias),
        _ => None,
    }
}

fn as_property(declaration: &Declaration) -> Option<&Property> {
    match declaration {
        Declaration::Property(property) => Some(property),
        _ => None,
    }
}

fn as_function(declaration: &Declaration) -> Option<&Function> {
    match declaration {
        Declaration::Function(function) => Some(function),
        _ => None,
    }
}

fn as_constructor(declaration: &Declaration) -> Option<&Constructor> {
    match declaration {
        Declaration::Constructor(constructor) => Some(constructor),
        _ => None,
    }
}

//! Merged tree construction.

use cir_ir::{ClassTree, Declaration, TargetTree};
use rustc_hash::FxHashMap;
use tracing::debug;

use super::{CirNode, MergedTree, NodeId, NodeKey};

impl MergedTree {
    /// Merge the per-target trees by signature.
    ///
    /// Children keep the order in which they are first seen, targets in
    /// order. A key declared twice by one target keeps the first
    /// declaration.
    #[tracing::instrument(level = "debug", skip_all, fields(targets = trees.len()))]
    pub fn build(trees: &[&TargetTree]) -> Self {
        let mut builder = TreeBuilder {
            tree: MergedTree {
                nodes: Vec::new(),
                roots: Vec::new(),
                target_count: trees.len(),
                patched_nodes: 0,
            },
            index: FxHashMap::default(),
        };

        for (target, tree) in trees.iter().enumerate() {
            for module in &tree.modules {
                let module_id =
                    builder.insert(None, target, Declaration::Module(module.module.clone()));
                for package in &module.packages {
                    let package_id = builder.insert(
                        Some(module_id),
                        target,
                        Declaration::Package(package.package.clone()),
                    );
                    for class in &package.classes {
                        builder.insert_class(package_id, target, class);
                    }
                    for alias in &package.type_aliases {
                        builder.insert(Some(package_id), target, Declaration::TypeAlias(alias.clone()));
                    }
                    for function in &package.functions {
                        builder.insert(Some(package_id), target, Declaration::Function(function.clone()));
                    }
                    for property in &package.properties {
                        builder.insert(Some(package_id), target, Declaration::Property(property.clone()));
                    }
                }
            }
        }

        debug!(nodes = builder.tree.nodes.len(), "merged tree built");
        builder.tree
    }
}

struct TreeBuilder {
    tree: MergedTree,
    index: FxHashMap<(Option<NodeId>, NodeKey), NodeId>,
}

impl TreeBuilder {
    fn insert(&mut self, parent: Option<NodeId>, target: usize, declaration: Declaration) -> NodeId {
        let key = NodeKey::of(&declaration);
        let id = match self.index.get(&(parent, key.clone())) {
            Some(&id) => id,
            None => {
                let id = NodeId::from_index(self.tree.nodes.len());
                self.tree
                    .nodes
                    .push(CirNode::new(key.clone(), parent, self.tree.target_count));
                match parent {
                    Some(parent) => self.tree.nodes[parent.index()].children.push(id),
                    None => self.tree.roots.push(id),
                }
                self.index.insert((parent, key), id);
                id
            }
        };

        let slot = &mut self.tree.nodes[id.index()].targets[target];
        if slot.is_none() {
            *slot = Some(declaration);
        }
        id
    }

    fn insert_class(&mut self, parent: NodeId, target: usize, class: &ClassTree) {
        let id = self.insert(Some(parent), target, Declaration::Class(class.class.clone()));
        for constructor in &class.constructors {
            self.insert(Some(id), target, Declaration::Constructor(constructor.clone()));
        }
        for function in &class.functions {
            self.insert(Some(id), target, Declaration::Function(function.clone()));
        }
        for property in &class.properties {
            self.insert(Some(id), target, Declaration::Property(property.clone()));
        }
        for nested in &class.classes {
            self.insert_class(id, target, nested);
        }
    }
}

//! Public entry point.

use cir_ir::{ClassifierResolver, StringInterner, Target, TargetTree};
use tracing::debug;

use crate::tree::{CommonizedTree, MergedTree, TreeCommonizer};
use crate::{CommonizerContext, CommonizerError, CommonizerSettings};

/// One target's contribution to a run.
pub struct TargetInput<'a> {
    pub target: Target,
    pub tree: &'a TargetTree,
    /// Classifiers the target's declarations reference but do not declare.
    pub dependencies: &'a dyn ClassifierResolver,
}

/// Everything a commonization run reads.
pub struct CommonizerInput<'a> {
    /// In target order; the order is kept by every per-target list of the
    /// output.
    pub targets: Vec<TargetInput<'a>>,
    /// Already-commonized dependencies shared by all targets.
    pub common_dependencies: &'a dyn ClassifierResolver,
    pub settings: CommonizerSettings,
}

/// Commonize the targets' declaration trees.
///
/// Declarations without a common projection are simply absent from the
/// result. `Err` means a contract violation and invalidates the whole run.
#[tracing::instrument(level = "debug", skip_all, fields(targets = input.targets.len()))]
pub fn commonize<'a>(
    input: CommonizerInput<'a>,
    interner: &'a StringInterner,
) -> Result<CommonizedTree, CommonizerError> {
    let mut targets = Vec::with_capacity(input.targets.len());
    let mut trees = Vec::with_capacity(input.targets.len());
    let mut dependencies = Vec::with_capacity(input.targets.len());
    for target in input.targets {
        targets.push(target.target);
        trees.push(target.tree);
        dependencies.push(target.dependencies);
    }

    let ctx = CommonizerContext::new(
        targets,
        &trees,
        dependencies,
        input.common_dependencies,
        input.settings,
        interner,
    )?;
    let mut tree = MergedTree::build(&trees);
    TreeCommonizer::new(&ctx).run(&mut tree)?;

    let tree = CommonizedTree::new(tree);
    debug!(
        nodes = tree.len(),
        patched = tree.patched_count(),
        "commonization finished"
    );
    Ok(tree)
}

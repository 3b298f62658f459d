//! Value parameter lists and parameter-name reconciliation.
//!
//! Parameters are commonized position by position. Names are reconciled
//! separately: each target reports either literal names or the synthesized
//! placeholders (`arg0`, `arg1`, ..., `variadicArguments` for a vararg).
//!
//! | targets report                  | result                                  |
//! |---------------------------------|-----------------------------------------|
//! | one identical literal name set  | those names                             |
//! | synthesized names everywhere    | synthesized names                       |
//! | anything else                   | synthesized names, unstable, plus patch |
//!
//! The patch renames the per-target declarations whose names differ from the
//! synthesized ones. It is refused, failing the merge, when any of those
//! declarations carries the native-callable marker: their parameter names
//! are part of a foreign ABI.

use cir_ir::{HasValueParameters, Name, Type, ValueParameter};
use tracing::debug;

use crate::annotations::{has_native_callable, UnsafeNumberTag};
use crate::core::{commonize_all, Accumulator, Commonizer, ListCommonizer, Prefix, StandardCommonizer};
use crate::types::{CommonType, TypeCommonizer};
use crate::{CommonizeResult, CommonizerContext, CommonizerError};

type ParameterTypeCommonizer<'c> = StandardCommonizer<Prefix<TypeCommonizer<'c>, Type, CommonType>>;

/// Deferred rename of per-target value parameters.
///
/// Produced alongside a merged function or constructor and applied exactly
/// once by the tree driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueParameterNamesPatch {
    /// New name of each parameter, by position.
    pub names: Vec<Name>,
    /// Targets whose declaration must be renamed.
    pub targets: Vec<usize>,
}

impl ValueParameterNamesPatch {
    /// Rename the parameters of one target's declaration.
    pub fn apply_to(&self, declaration: &mut impl HasValueParameters) {
        for (parameter, name) in declaration.value_parameters_mut().iter_mut().zip(&self.names) {
            parameter.name = *name;
        }
    }
}

/// Merged value parameters of a function or constructor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommonValueParameters {
    pub parameters: Vec<ValueParameter>,
    pub has_stable_names: bool,
    pub names_patch: Option<ValueParameterNamesPatch>,
}

/// Commonize the value parameters of one declaration per target.
pub fn commonize_value_parameters<D: HasValueParameters>(
    ctx: &CommonizerContext<'_>,
    owners: &[&D],
    tag: &mut UnsafeNumberTag,
) -> CommonizeResult<CommonValueParameters> {
    let types = TypeCommonizer::new(ctx);
    let mut list =
        ListCommonizer::new(|| StandardCommonizer::new(ValueParameterAccumulator::new(types)));
    let merged: Option<Vec<(ValueParameter, UnsafeNumberTag)>> =
        commonize_all(&mut list, owners.iter().map(|owner| owner.value_parameters()))?;
    let Some(merged) = merged else {
        return Ok(None);
    };

    let mut parameters = Vec::with_capacity(merged.len());
    for (parameter, parameter_tag) in merged {
        tag.merge(&parameter_tag);
        parameters.push(parameter);
    }
    let synthesized = synthesized_names(ctx, &parameters);

    let mut names = ValueParameterNames::new(&synthesized);
    for owner in owners {
        let target_names: Vec<Name> = owner.value_parameters().iter().map(|p| p.name).collect();
        names.push(&target_names, owner.has_stable_parameter_names())?;
    }

    let (final_names, has_stable_names, names_patch) = match names.finish()? {
        NamesOutcome::Keep { names, stable } => (names, stable, None),
        NamesOutcome::Fallback => {
            let targets: Vec<usize> = owners
                .iter()
                .enumerate()
                .filter(|(_, owner)| {
                    !owner
                        .value_parameters()
                        .iter()
                        .map(|p| p.name)
                        .eq(synthesized.iter().copied())
                })
                .map(|(target, _)| target)
                .collect();
            if targets
                .iter()
                .any(|&target| has_native_callable(owners[target].owner_annotations()))
            {
                debug!("parameter names differ on a native-callable declaration; not commonized");
                return Ok(None);
            }
            let patch = ValueParameterNamesPatch {
                names: synthesized.clone(),
                targets,
            };
            (synthesized, false, Some(patch))
        }
    };

    for (parameter, name) in parameters.iter_mut().zip(final_names) {
        parameter.name = name;
    }
    Ok(Some(CommonValueParameters {
        parameters,
        has_stable_names,
        names_patch,
    }))
}

/// `arg<index>` per parameter, `variadicArguments` for a vararg.
fn synthesized_names(ctx: &CommonizerContext<'_>, parameters: &[ValueParameter]) -> Vec<Name> {
    parameters
        .iter()
        .enumerate()
        .map(|(index, parameter)| {
            if parameter.is_vararg() {
                Name::VARIADIC_ARGUMENTS
            } else {
                ctx.interner().intern(&format!("arg{index}"))
            }
        })
        .collect()
}

// ============================================================================
// Per-position parameter commonization
// ============================================================================

struct ValueParameterAccumulator<'c> {
    types: TypeCommonizer<'c>,
    first: Option<ValueParameter>,
    return_type: ParameterTypeCommonizer<'c>,
    vararg_element_type: Option<ParameterTypeCommonizer<'c>>,
}

impl<'c> ValueParameterAccumulator<'c> {
    fn new(types: TypeCommonizer<'c>) -> Self {
        Self {
            types,
            first: None,
            return_type: StandardCommonizer::new(Prefix::new(types)),
            vararg_element_type: None,
        }
    }

    fn combine_types(&mut self, parameter: &ValueParameter) -> bool {
        if !self.return_type.commonize_with(&parameter.return_type) {
            return false;
        }
        match (&mut self.vararg_element_type, &parameter.vararg_element_type) {
            (None, None) => true,
            (Some(commonizer), Some(element)) => commonizer.commonize_with(element),
            _ => false,
        }
    }
}

impl Accumulator<ValueParameter> for ValueParameterAccumulator<'_> {
    type Output = (ValueParameter, UnsafeNumberTag);

    const NAME: &'static str = "value parameter";

    fn initialize(&mut self, first: &ValueParameter) -> bool {
        if first.is_vararg() {
            self.vararg_element_type = Some(StandardCommonizer::new(Prefix::new(self.types)));
        }
        self.first = Some(first.clone());
        self.combine_types(first)
    }

    fn combine(&mut self, next: &ValueParameter) -> bool {
        let Some(first) = &self.first else {
            return false;
        };
        if first.declares_default_value != next.declares_default_value
            || first.is_crossinline != next.is_crossinline
            || first.is_noinline != next.is_noinline
        {
            return false;
        }
        self.combine_types(next)
    }

    fn output(&self) -> Option<Self::Output> {
        let first = self.first.as_ref()?;
        let mut tag = UnsafeNumberTag::default();

        let return_type = self.return_type.result().ok()?;
        tag.merge(&return_type.unsafe_numbers);
        let vararg_element_type = match &self.vararg_element_type {
            Some(commonizer) => {
                let element = commonizer.result().ok()?;
                tag.merge(&element.unsafe_numbers);
                Some(element.ty)
            }
            None => None,
        };

        let parameter = ValueParameter {
            annotations: Vec::new(),
            name: first.name,
            return_type: return_type.ty,
            vararg_element_type,
            declares_default_value: first.declares_default_value,
            is_crossinline: first.is_crossinline,
            is_noinline: first.is_noinline,
        };
        Some((parameter, tag))
    }
}

// ============================================================================
// Name reconciliation
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
enum NamesState {
    Empty,
    Synthesized { stable: bool },
    Literal { names: Vec<Name>, stable: bool },
    Conflict,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum NamesOutcome {
    Keep { names: Vec<Name>, stable: bool },
    Fallback,
}

/// Name state machine over the targets, in target order.
struct ValueParameterNames<'s> {
    synthesized: &'s [Name],
    state: NamesState,
}

impl<'s> ValueParameterNames<'s> {
    fn new(synthesized: &'s [Name]) -> Self {
        Self {
            synthesized,
            state: NamesState::Empty,
        }
    }

    fn push(&mut self, names: &[Name], stable: bool) -> Result<(), CommonizerError> {
        if names.len() != self.synthesized.len() {
            return Err(CommonizerError::IllegalState {
                commonizer: "value parameter names",
                reason: "parameter count differs from the merged parameter list",
            });
        }
        let is_synthesized = names == self.synthesized;

        let state = std::mem::replace(&mut self.state, NamesState::Conflict);
        self.state = match state {
            NamesState::Empty if is_synthesized => NamesState::Synthesized { stable },
            NamesState::Empty => NamesState::Literal {
                names: names.to_vec(),
                stable,
            },
            NamesState::Synthesized { stable: so_far } if is_synthesized => {
                NamesState::Synthesized {
                    stable: so_far && stable,
                }
            }
            NamesState::Literal {
                names: so_far,
                stable: stable_so_far,
            } if !is_synthesized && so_far == names => NamesState::Literal {
                names: so_far,
                stable: stable_so_far && stable,
            },
            NamesState::Synthesized { .. } | NamesState::Literal { .. } | NamesState::Conflict => {
                NamesState::Conflict
            }
        };
        Ok(())
    }

    fn finish(self) -> Result<NamesOutcome, CommonizerError> {
        match self.state {
            NamesState::Empty => Err(CommonizerError::IllegalState {
                commonizer: "value parameter names",
                reason: "result read before any value",
            }),
            NamesState::Synthesized { stable } => Ok(NamesOutcome::Keep {
                names: self.synthesized.to_vec(),
                stable,
            }),
            NamesState::Literal { names, stable } => Ok(NamesOutcome::Keep { names, stable }),
            NamesState::Conflict => Ok(NamesOutcome::Fallback),
        }
    }
}

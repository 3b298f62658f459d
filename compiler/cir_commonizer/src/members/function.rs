//! Function commonization.

use cir_ir::{Function, FunctionModifiers};

use super::callable::commonize_callable;
use super::value_params::commonize_value_parameters;
use super::Patched;
use crate::{CommonizeResult, CommonizerContext};

/// Commonize one function per target.
pub fn commonize_function(
    ctx: &CommonizerContext<'_>,
    functions: &[&Function],
) -> CommonizeResult<Patched<Function>> {
    let Some(mut base) = commonize_callable(ctx, functions, false)? else {
        return Ok(None);
    };
    let Some(modifiers) = commonize_modifiers(functions) else {
        return Ok(None);
    };
    let Some(parameters) = commonize_value_parameters(ctx, functions, &mut base.unsafe_numbers)?
    else {
        return Ok(None);
    };

    let function = Function {
        annotations: base.finish_annotations(ctx),
        name: base.name,
        type_parameters: base.type_parameters,
        visibility: base.visibility,
        modality: base.modality,
        containing_class: base.containing_class,
        value_parameters: parameters.parameters,
        has_stable_parameter_names: parameters.has_stable_names,
        extension_receiver: base.extension_receiver,
        return_type: base.return_type,
        kind: base.kind,
        modifiers,
    };
    Ok(Some(Patched {
        declaration: function,
        names_patch: parameters.names_patch,
    }))
}

/// `suspend` must agree; the other modifiers hold only if they hold on
/// every target.
fn commonize_modifiers(functions: &[&Function]) -> Option<FunctionModifiers> {
    let suspend = functions.first()?.modifiers.contains(FunctionModifiers::SUSPEND);
    if functions
        .iter()
        .any(|function| function.modifiers.contains(FunctionModifiers::SUSPEND) != suspend)
    {
        return None;
    }
    Some(
        functions
            .iter()
            .fold(FunctionModifiers::all(), |merged, function| merged & function.modifiers),
    )
}

use super::types::DispatchError;
use crate::extraction::types::{ArgValue, RawArguments};
use crate::registry::{Arguments, FunctionSpec, ParamType};

/// Coerce one extracted value into `expected`, failing fast on anything not explicitly allowed.
pub fn coerce_value(value: &ArgValue, expected: ParamType) -> Result<ArgValue, String> {
    match (expected, value) {
        (_, ArgValue::Missing) => Err("missing value".to_string()),
        (ParamType::Number, _) => as_number(value).map(ArgValue::Number),
        (ParamType::Integer, _) => {
            let number = as_number(value)?;
            if number.fract() != 0.0 {
                return Err(format!("expected integer, got {number}"));
            }
            Ok(ArgValue::Number(number))
        }
        (ParamType::String, ArgValue::Text(s)) => Ok(ArgValue::Text(s.clone())),
        (ParamType::String, ArgValue::Number(n)) => Ok(ArgValue::Text(n.to_string())),
        (ParamType::String, other) => Err(format!("expected string, got {}", other.kind())),
    }
}

fn as_number(value: &ArgValue) -> Result<f64, String> {
    match value {
        ArgValue::Number(n) => Ok(*n),
        ArgValue::Text(s) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(format!("expected number, got string {s:?}")),
        },
        other => Err(format!("expected number, got {}", other.kind())),
    }
}

/// Check every declared parameter of `spec` against `raw`. Undeclared keys are dropped.
pub fn validate_arguments(
    spec: &FunctionSpec,
    raw: &RawArguments,
) -> Result<Arguments, DispatchError> {
    let mut arguments = Arguments::new();
    for param in &spec.parameters {
        let value = raw.get(&param.name).unwrap_or(&ArgValue::Missing);
        let coerced =
            coerce_value(value, param.r#type).map_err(|reason| DispatchError::ArgumentType {
                function: spec.name.clone(),
                parameter: param.name.clone(),
                reason,
            })?;
        arguments.insert(param.name.clone(), coerced);
    }
    Ok(arguments)
}

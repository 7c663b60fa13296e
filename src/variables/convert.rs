//! Conversion of rendered values to their declared types.
//!
//! Rendering always produces text for string inputs, so a `port` declared as
//! `int` with default `"{{ base_port }}"` arrives here as `"8080"` and leaves as
//! `8080`. Values that already have the right shape pass through unchanged.

use serde_json::{Number, Value};

use super::{Variable, VariableType, parse_yaml_string};
use crate::core::{PlateError, Result};

/// Coerces a rendered value to a variable's declared type.
pub trait TypeConverter {
    /// Convert `value` to the type declared by `variable`.
    ///
    /// # Errors
    ///
    /// Returns [`PlateError::InvalidVariableValue`] if the value cannot be
    /// represented as the declared type.
    fn convert(&self, value: Value, variable: &Variable) -> Result<Value>;
}

/// Default converter. Strings destined for `list` and `map` are parsed as YAML.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlTypeConverter;

impl TypeConverter for YamlTypeConverter {
    fn convert(&self, value: Value, variable: &Variable) -> Result<Value> {
        // No value is fine for any type but `enum`, which must be one of its options
        if value.is_null() && variable.var_type != VariableType::Enum {
            return Ok(value);
        }

        let converted = match variable.var_type {
            VariableType::String => to_string(&value),
            VariableType::Int => to_int(&value),
            VariableType::Float => to_float(&value),
            VariableType::Bool => to_bool(&value),
            VariableType::List => to_shape(&value, Value::is_array),
            VariableType::Map => to_shape(&value, Value::is_object),
            VariableType::Enum => to_enum(&value, &variable.options),
        };

        converted.ok_or_else(|| invalid_value(variable, &value))
    }
}

fn to_string(value: &Value) -> Option<Value> {
    match value {
        Value::String(_) => Some(value.clone()),
        Value::Number(n) => Some(Value::String(n.to_string())),
        Value::Bool(b) => Some(Value::String(b.to_string())),
        _ => None,
    }
}

fn to_int(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(value.clone()),
        Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
        _ => None,
    }
}

fn to_float(value: &Value) -> Option<Value> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    Number::from_f64(parsed).map(Value::Number)
}

fn to_bool(value: &Value) -> Option<Value> {
    match value {
        Value::Bool(_) => Some(value.clone()),
        Value::String(s) => match s.trim() {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(Value::Bool(true)),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(Value::Bool(false)),
            _ => None,
        },
        _ => None,
    }
}

/// Accept `value` if it already has the wanted shape, otherwise parse a string
/// as YAML and accept the result if that has it.
fn to_shape(value: &Value, is_shape: fn(&Value) -> bool) -> Option<Value> {
    if is_shape(value) {
        return Some(value.clone());
    }
    match value {
        Value::String(s) => parse_yaml_string(s).ok().filter(is_shape),
        _ => None,
    }
}

fn to_enum(value: &Value, options: &[String]) -> Option<Value> {
    match value {
        Value::String(s) if options.iter().any(|o| o == s) => Some(value.clone()),
        _ => None,
    }
}

fn invalid_value(variable: &Variable, value: &Value) -> PlateError {
    let expected = match variable.var_type {
        VariableType::Enum => format!("enum (one of: {})", variable.options.join(", ")),
        other => other.to_string(),
    };
    let value = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    PlateError::InvalidVariableValue {
        variable: variable.full_name().to_string(),
        expected,
        value,
    }
}

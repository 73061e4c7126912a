//! Text form of deploy arguments.
//!
//! Follows the protobuf JSON mapping with original field names, e.g.
//! `[{"name": "amount", "value": {"big_int": {"value": "10", "bit_width": 512}}}]`,
//! except that byte payloads are written and read as base-16 rather than
//! base-64. The conversion is local to this module.

use serde_json::{json, Map, Value as Json};

use crate::abi::DEFAULT_BIG_INT_WIDTH;
use crate::error::{ValidationError, ValidationResult};
use crate::proto::consensus::arg_value::Value;
use crate::proto::state::BigInt;
use crate::proto::{Arg, ArgValue};

/// Render arguments as a JSON array.
pub fn args_to_json(args: &[Arg]) -> String {
    Json::Array(args.iter().map(arg_to_json).collect()).to_string()
}

/// Parse a JSON array of arguments.
pub fn args_from_json(text: &str) -> ValidationResult<Vec<Arg>> {
    let parsed: Json = serde_json::from_str(text).map_err(|e| invalid(e.to_string()))?;
    let items = parsed
        .as_array()
        .ok_or_else(|| invalid("expected a JSON array of arguments"))?;
    items.iter().map(arg_from_json).collect()
}

fn invalid(reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidArgsJson(reason.into())
}

fn arg_to_json(arg: &Arg) -> Json {
    let mut object = Map::new();
    object.insert("name".into(), Json::String(arg.name.clone()));
    if let Some(value) = &arg.value {
        object.insert("value".into(), value_to_json(value));
    }
    Json::Object(object)
}

fn value_to_json(value: &ArgValue) -> Json {
    match &value.value {
        None => json!({}),
        Some(Value::OptionalValue(inner)) => json!({ "optional_value": value_to_json(inner) }),
        Some(Value::BytesValue(bytes)) => json!({ "bytes_value": hex::encode(bytes) }),
        Some(Value::IntValue(n)) => json!({ "int_value": n }),
        Some(Value::StringValue(s)) => json!({ "string_value": s }),
        // 64-bit integers are strings in the protobuf JSON mapping.
        Some(Value::LongValue(n)) => json!({ "long_value": n.to_string() }),
        Some(Value::BigInt(big)) => json!({
            "big_int": { "value": big.value, "bit_width": big.bit_width }
        }),
    }
}

fn arg_from_json(item: &Json) -> ValidationResult<Arg> {
    let object = item
        .as_object()
        .ok_or_else(|| invalid("each argument must be a JSON object"))?;
    if let Some(key) = object.keys().find(|k| *k != "name" && *k != "value") {
        return Err(invalid(format!("unknown argument field '{}'", key)));
    }
    let name = match object.get("name") {
        None => String::new(),
        Some(Json::String(name)) => name.clone(),
        Some(_) => return Err(invalid("argument name must be a string")),
    };
    let value = object.get("value").map(value_from_json).transpose()?;
    Ok(Arg { name, value })
}

fn value_from_json(item: &Json) -> ValidationResult<ArgValue> {
    let object = item
        .as_object()
        .ok_or_else(|| invalid("argument value must be a JSON object"))?;
    let mut entries = object.iter();
    let (tag, payload) = match (entries.next(), entries.next()) {
        (None, _) => return Ok(ArgValue { value: None }),
        (Some(entry), None) => entry,
        (Some(_), Some(_)) => {
            return Err(invalid("argument value must set exactly one field"));
        }
    };

    let value = match tag.as_str() {
        "optional_value" => Value::OptionalValue(Box::new(value_from_json(payload)?)),
        "bytes_value" => {
            let text = payload
                .as_str()
                .ok_or_else(|| invalid("bytes_value must be a hex string"))?;
            Value::BytesValue(hex::decode(text).map_err(|e| invalid(format!("bytes_value: {}", e)))?)
        }
        "int_value" => {
            let n = integer(payload, "int_value")?;
            Value::IntValue(i32::try_from(n).map_err(|_| invalid("int_value out of range"))?)
        }
        "long_value" => Value::LongValue(integer(payload, "long_value")?),
        "string_value" => Value::StringValue(
            payload
                .as_str()
                .ok_or_else(|| invalid("string_value must be a string"))?
                .to_string(),
        ),
        "big_int" => Value::BigInt(big_int_from_json(payload)?),
        other => return Err(invalid(format!("unknown value type '{}'", other))),
    };
    Ok(ArgValue { value: Some(value) })
}

fn big_int_from_json(payload: &Json) -> ValidationResult<BigInt> {
    let object = payload
        .as_object()
        .ok_or_else(|| invalid("big_int must be an object"))?;
    let value = match object.get("value") {
        Some(Json::String(s)) => s.clone(),
        Some(Json::Number(n)) => n.to_string(),
        _ => return Err(invalid("big_int.value must be a decimal string")),
    };
    if !is_decimal(&value) {
        return Err(invalid(format!("big_int.value '{}' is not a decimal number", value)));
    }
    let bit_width = match object.get("bit_width") {
        None => DEFAULT_BIG_INT_WIDTH,
        Some(width) => u32::try_from(integer(width, "big_int.bit_width")?)
            .map_err(|_| invalid("big_int.bit_width out of range"))?,
    };
    Ok(BigInt { value, bit_width })
}

/// Optional `-` followed by at least one ASCII digit.
fn is_decimal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Integers may be JSON numbers or decimal strings.
fn integer(payload: &Json, field: &str) -> ValidationResult<i64> {
    match payload {
        Json::Number(n) => n
            .as_i64()
            .ok_or_else(|| invalid(format!("{} must be an integer", field))),
        Json::String(s) => s
            .parse::<i64>()
            .map_err(|_| invalid(format!("{} must be an integer", field))),
        _ => Err(invalid(format!("{} must be an integer", field))),
    }
}

//! Data validation against a schema root type, and JSON re-encoding.
//!
//! Validation walks the data document structurally: named type references
//! recurse into their definitions, field multiplicity decides between a
//! single value and an array, and the first violation is reported with a
//! `root.field[index]` style path.

use super::schema::{BaseType, Field, Schema, TypeDef};
use crate::error::BackendError;
use serde::Serialize;
use serde_json::Value;

/// Validate JSON data text against one root type of the schema.
pub fn validate(schema: &Schema, root: &str, text: &str) -> Result<(), BackendError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| BackendError::DataInvalid(format!("not valid JSON: {}", e)))?;
    let tdef = schema
        .get(root)
        .ok_or_else(|| BackendError::SchemaInvalid(format!("root type '{}' is not defined", root)))?;
    validate_type(schema, tdef, &value, root)
}

/// Minify a JSON document.
pub fn to_concise(text: &str) -> Result<String, BackendError> {
    let value = parse_data(text)?;
    serde_json::to_string(&value).map_err(|e| BackendError::ConversionFailed(e.to_string()))
}

/// Pretty-print a JSON document with 4-space indentation.
pub fn to_verbose(text: &str) -> Result<String, BackendError> {
    let value = parse_data(text)?;
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| BackendError::ConversionFailed(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| BackendError::ConversionFailed(e.to_string()))
}

fn parse_data(text: &str) -> Result<Value, BackendError> {
    serde_json::from_str(text).map_err(|e| BackendError::DataInvalid(format!("not valid JSON: {}", e)))
}

fn fail(path: &str, msg: impl AsRef<str>) -> BackendError {
    BackendError::DataInvalid(format!("{}: {}", path, msg.as_ref()))
}

fn member(path: &str, name: &str) -> String {
    format!("{}.{}", path, name)
}

fn element(path: &str, index: usize) -> String {
    format!("{}[{}]", path, index)
}

fn validate_type(schema: &Schema, tdef: &TypeDef, value: &Value, path: &str) -> Result<(), BackendError> {
    match tdef.base {
        BaseType::Binary | BaseType::Boolean | BaseType::Integer | BaseType::Number | BaseType::String => {
            validate_primitive(tdef, value, path)
        }
        BaseType::Enumerated => validate_enumerated(tdef, value, path),
        BaseType::Choice => validate_choice(schema, tdef, value, path),
        BaseType::Array => validate_array(schema, tdef, value, path),
        BaseType::ArrayOf => validate_array_of(schema, tdef, value, path),
        BaseType::Map | BaseType::Record => validate_record(schema, tdef, value, path),
        BaseType::MapOf => validate_map_of(schema, tdef, value, path),
    }
}

fn validate_primitive(tdef: &TypeDef, value: &Value, path: &str) -> Result<(), BackendError> {
    match tdef.base {
        BaseType::Boolean => {
            if !value.is_boolean() {
                return Err(fail(path, format!("expected a boolean for '{}'", tdef.name)));
            }
        }
        BaseType::Integer => {
            let n = value
                .as_i64()
                .ok_or_else(|| fail(path, format!("expected an integer for '{}'", tdef.name)))?;
            if let Some(minv) = tdef.minv() {
                if n < minv {
                    return Err(fail(path, format!("{} is below the minimum of {}", n, minv)));
                }
            }
            if let Some(maxv) = tdef.maxv() {
                if maxv > 0 && n > maxv {
                    return Err(fail(path, format!("{} is above the maximum of {}", n, maxv)));
                }
            }
        }
        BaseType::Number => {
            if !value.is_number() {
                return Err(fail(path, format!("expected a number for '{}'", tdef.name)));
            }
        }
        BaseType::String | BaseType::Binary => {
            let s = value
                .as_str()
                .ok_or_else(|| fail(path, format!("expected a string for '{}'", tdef.name)))?;
            let len = s.chars().count() as i64;
            if let Some(minv) = tdef.minv() {
                if len < minv {
                    return Err(fail(
                        path,
                        format!("length {} is below the minimum of {}", len, minv),
                    ));
                }
            }
            if let Some(maxv) = tdef.maxv() {
                if maxv > 0 && len > maxv {
                    return Err(fail(
                        path,
                        format!("length {} is above the maximum of {}", len, maxv),
                    ));
                }
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_enumerated(tdef: &TypeDef, value: &Value, path: &str) -> Result<(), BackendError> {
    let matches = tdef.fields.iter().any(|f| match f {
        Field::Item { id, value: item, .. } => match value {
            Value::String(s) => s == item,
            Value::Number(n) => n.as_i64() == Some(*id),
            _ => false,
        },
        Field::Full { .. } => false,
    });
    if matches {
        Ok(())
    } else {
        Err(fail(
            path,
            format!("'{}' is not one of the values of '{}'", render(value), tdef.name),
        ))
    }
}

fn validate_choice(schema: &Schema, tdef: &TypeDef, value: &Value, path: &str) -> Result<(), BackendError> {
    let obj = value
        .as_object()
        .ok_or_else(|| fail(path, format!("expected an object for Choice '{}'", tdef.name)))?;
    if obj.len() != 1 {
        return Err(fail(
            path,
            format!(
                "Choice '{}' requires exactly one member, found {}",
                tdef.name,
                obj.len()
            ),
        ));
    }
    for (key, inner) in obj {
        let field = tdef.fields.iter().find(
            |f| matches!(f, Field::Full { name, .. } if name == key),
        );
        match field {
            Some(field) => validate_field_value(schema, field, inner, &member(path, key))?,
            None => return Err(fail(path, format!("unexpected choice member '{}'", key))),
        }
    }
    Ok(())
}

fn validate_record(schema: &Schema, tdef: &TypeDef, value: &Value, path: &str) -> Result<(), BackendError> {
    let obj = value
        .as_object()
        .ok_or_else(|| fail(path, format!("expected an object for '{}'", tdef.name)))?;

    for field in &tdef.fields {
        let name = match field {
            Field::Full { name, .. } => name,
            Field::Item { .. } => continue,
        };
        match obj.get(name) {
            Some(inner) => validate_field_value(schema, field, inner, &member(path, name))?,
            None if field.is_optional() => {}
            None => {
                return Err(fail(path, format!("missing required field '{}'", name)));
            }
        }
    }

    for key in obj.keys() {
        let known = tdef
            .fields
            .iter()
            .any(|f| matches!(f, Field::Full { name, .. } if name == key));
        if !known {
            return Err(fail(path, format!("unexpected field '{}'", key)));
        }
    }
    Ok(())
}

fn validate_map_of(schema: &Schema, tdef: &TypeDef, value: &Value, path: &str) -> Result<(), BackendError> {
    let obj = value
        .as_object()
        .ok_or_else(|| fail(path, format!("expected an object for '{}'", tdef.name)))?;

    let entries = obj.len() as i64;
    if let Some(minv) = tdef.minv() {
        if entries < minv {
            return Err(fail(path, format!("{} entries is below the minimum of {}", entries, minv)));
        }
    }
    if let Some(maxv) = tdef.maxv() {
        if maxv > 0 && entries > maxv {
            return Err(fail(path, format!("{} entries is above the maximum of {}", entries, maxv)));
        }
    }

    let ktype = tdef.ktype().unwrap_or("String");
    let vtype = tdef.vtype().unwrap_or("String");
    for (key, inner) in obj {
        validate_key(schema, ktype, key, path)?;
        validate_ref(schema, vtype, inner, &member(path, key))?;
    }
    Ok(())
}

fn validate_key(schema: &Schema, ktype: &str, key: &str, path: &str) -> Result<(), BackendError> {
    match BaseType::from_name(ktype) {
        Some(BaseType::Integer) => {
            if key.parse::<i64>().is_err() {
                return Err(fail(path, format!("key '{}' is not an integer", key)));
            }
        }
        Some(_) => {}
        None => {
            // Defined key types: enumerated keys must be member values.
            if let Some(ktdef) = schema.get(ktype) {
                if ktdef.base == BaseType::Enumerated {
                    validate_enumerated(ktdef, &Value::String(key.to_string()), path)?;
                }
            }
        }
    }
    Ok(())
}

fn validate_array(schema: &Schema, tdef: &TypeDef, value: &Value, path: &str) -> Result<(), BackendError> {
    let items = value
        .as_array()
        .ok_or_else(|| fail(path, format!("expected an array for '{}'", tdef.name)))?;
    if items.len() > tdef.fields.len() {
        return Err(fail(
            path,
            format!(
                "expected at most {} elements, found {}",
                tdef.fields.len(),
                items.len()
            ),
        ));
    }
    for (idx, field) in tdef.fields.iter().enumerate() {
        match items.get(idx) {
            Some(inner) if !inner.is_null() => {
                validate_field_value(schema, field, inner, &element(path, idx))?
            }
            _ if field.is_optional() => {}
            _ => {
                return Err(fail(path, format!("missing required element {}", idx)));
            }
        }
    }
    Ok(())
}

fn validate_array_of(schema: &Schema, tdef: &TypeDef, value: &Value, path: &str) -> Result<(), BackendError> {
    let items = value
        .as_array()
        .ok_or_else(|| fail(path, format!("expected an array for '{}'", tdef.name)))?;

    let len = items.len() as i64;
    if let Some(minv) = tdef.minv() {
        if len < minv {
            return Err(fail(path, format!("{} elements is below the minimum of {}", len, minv)));
        }
    }
    if let Some(maxv) = tdef.maxv() {
        if maxv > 0 && len > maxv {
            return Err(fail(path, format!("{} elements is above the maximum of {}", len, maxv)));
        }
    }
    if tdef.options.iter().any(|o| o == "q") {
        for i in 0..items.len() {
            for j in (i + 1)..items.len() {
                if items[i] == items[j] {
                    return Err(fail(path, format!("duplicate element at index {}", j)));
                }
            }
        }
    }

    let vtype = tdef.vtype().unwrap_or("String");
    for (idx, inner) in items.iter().enumerate() {
        validate_ref(schema, vtype, inner, &element(path, idx))?;
    }
    Ok(())
}

fn validate_field_value(schema: &Schema, field: &Field, value: &Value, path: &str) -> Result<(), BackendError> {
    let (ftype, max_occurs, min_occurs) = match field {
        Field::Full { ftype, .. } => (ftype.as_str(), field.max_occurs(), field.min_occurs()),
        Field::Item { .. } => return Ok(()),
    };

    // Fields with cardinality other than exactly-one are arrays of ftype.
    if max_occurs != 1 {
        let items = value
            .as_array()
            .ok_or_else(|| fail(path, "expected an array for a repeated field"))?;
        let len = items.len() as i64;
        if len < min_occurs {
            return Err(fail(
                path,
                format!("{} elements is below the minimum of {}", len, min_occurs),
            ));
        }
        if max_occurs > 1 && len > max_occurs {
            return Err(fail(
                path,
                format!("{} elements is above the maximum of {}", len, max_occurs),
            ));
        }
        for (idx, inner) in items.iter().enumerate() {
            validate_ref(schema, ftype, inner, &element(path, idx))?;
        }
        return Ok(());
    }

    validate_ref(schema, ftype, value, path)
}

fn validate_ref(schema: &Schema, ftype: &str, value: &Value, path: &str) -> Result<(), BackendError> {
    if let Some(tdef) = schema.get(ftype) {
        return validate_type(schema, tdef, value, path);
    }

    match BaseType::from_name(ftype) {
        Some(base) if base.is_primitive() => {
            let bare = TypeDef {
                name: ftype.to_string(),
                base,
                options: Vec::new(),
                description: String::new(),
                fields: Vec::new(),
            };
            validate_primitive(&bare, value, path)
        }
        Some(BaseType::Enumerated) => {
            if value.is_string() {
                Ok(())
            } else {
                Err(fail(path, format!("expected a string for '{}'", ftype)))
            }
        }
        Some(BaseType::Array) | Some(BaseType::ArrayOf) => {
            if value.is_array() {
                Ok(())
            } else {
                Err(fail(path, format!("expected an array for '{}'", ftype)))
            }
        }
        Some(_) => {
            if value.is_object() {
                Ok(())
            } else {
                Err(fail(path, format!("expected an object for '{}'", ftype)))
            }
        }
        None => Err(fail(path, format!("unknown type '{}'", ftype))),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

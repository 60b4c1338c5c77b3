//! Reverse translation: JSON Schema and JIDL text back into JADN schema
//! text.
//!
//! JSON Schema input reads `definitions` (or the newer `$defs`), mapping
//! each entry back to a JADN type. Objects with `properties` always come
//! back as Records; the forward direction folds Map into the same shape,
//! so that distinction is not recoverable. JIDL input accepts the compact
//! layout `convert::to_jidl` emits.

use super::schema::{BaseType, Field, Schema, SchemaInfo, TypeDef};
use crate::error::BackendError;
use serde_json::{Map, Value};
use std::collections::HashSet;

fn translation(msg: impl Into<String>) -> BackendError {
    BackendError::TranslationFailed(msg.into())
}

/// Translate a JSON Schema document into JADN schema text.
pub fn from_json_schema(text: &str) -> Result<String, BackendError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| translation(format!("not valid JSON: {}", e)))?;
    let root = value
        .as_object()
        .ok_or_else(|| translation("JSON Schema document must be a JSON object"))?;

    let defs = root
        .get("definitions")
        .or_else(|| root.get("$defs"))
        .and_then(Value::as_object)
        .ok_or_else(|| translation("JSON Schema document has no definitions"))?;

    let mut roots = Vec::new();
    if let Some(target) = root.get("$ref").and_then(Value::as_str) {
        if let Some(name) = target.rsplit('/').next() {
            roots.push(name.to_string());
        }
    }

    let info = SchemaInfo {
        package: root.get("$id").and_then(Value::as_str).map(str::to_string),
        title: root.get("title").and_then(Value::as_str).map(str::to_string),
        version: None,
        description: root
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        roots,
    };

    let mut types = Vec::with_capacity(defs.len());
    for (name, def) in defs {
        types.push(def_to_type(name, def)?);
    }

    Schema { info, types }.to_text()
}

fn def_to_type(name: &str, def: &Value) -> Result<TypeDef, BackendError> {
    let obj = def
        .as_object()
        .ok_or_else(|| translation(format!("definition '{}' must be a JSON object", name)))?;
    let description = description_of(obj);

    if let Some(values) = obj.get("enum").and_then(Value::as_array) {
        let fields = values
            .iter()
            .enumerate()
            .map(|(i, v)| Field::Item {
                id: i as i64 + 1,
                value: match v.as_str() {
                    Some(s) => s.to_string(),
                    None => v.to_string(),
                },
                description: String::new(),
            })
            .collect();
        return Ok(TypeDef {
            name: name.to_string(),
            base: BaseType::Enumerated,
            options: Vec::new(),
            description,
            fields,
        });
    }

    if let Some(alternatives) = obj.get("oneOf").and_then(Value::as_array) {
        let mut fields = Vec::new();
        for (i, alternative) in alternatives.iter().enumerate() {
            let props = alternative
                .get("properties")
                .and_then(Value::as_object)
                .ok_or_else(|| {
                    translation(format!(
                        "definition '{}' has a oneOf alternative without properties",
                        name
                    ))
                })?;
            let (pname, pdef) = props.iter().next().ok_or_else(|| {
                translation(format!(
                    "definition '{}' has an empty oneOf alternative",
                    name
                ))
            })?;
            fields.push(field_from_property(i as i64 + 1, pname, pdef, true));
        }
        return Ok(TypeDef {
            name: name.to_string(),
            base: BaseType::Choice,
            options: Vec::new(),
            description,
            fields,
        });
    }

    match obj.get("type").and_then(Value::as_str) {
        Some("object") => Ok(object_to_type(name, obj, description)),
        Some("array") => Ok(array_to_type(name, obj, description)),
        Some("string") => {
            if obj.get("contentEncoding").and_then(Value::as_str) == Some("base64") {
                return Ok(TypeDef {
                    name: name.to_string(),
                    base: BaseType::Binary,
                    options: Vec::new(),
                    description,
                    fields: Vec::new(),
                });
            }
            let mut options = Vec::new();
            if let Some(pattern) = obj.get("pattern").and_then(Value::as_str) {
                options.push(format!("%{}", pattern));
            }
            if let Some(min) = obj.get("minLength").and_then(Value::as_i64) {
                options.push(format!("{{{}", min));
            }
            if let Some(max) = obj.get("maxLength").and_then(Value::as_i64) {
                options.push(format!("}}{}", max));
            }
            Ok(TypeDef {
                name: name.to_string(),
                base: BaseType::String,
                options,
                description,
                fields: Vec::new(),
            })
        }
        Some("integer") => {
            let mut options = Vec::new();
            if let Some(min) = obj.get("minimum").and_then(Value::as_i64) {
                options.push(format!("{{{}", min));
            }
            if let Some(max) = obj.get("maximum").and_then(Value::as_i64) {
                options.push(format!("}}{}", max));
            }
            Ok(TypeDef {
                name: name.to_string(),
                base: BaseType::Integer,
                options,
                description,
                fields: Vec::new(),
            })
        }
        Some("number") => Ok(TypeDef {
            name: name.to_string(),
            base: BaseType::Number,
            options: Vec::new(),
            description,
            fields: Vec::new(),
        }),
        Some("boolean") => Ok(TypeDef {
            name: name.to_string(),
            base: BaseType::Boolean,
            options: Vec::new(),
            description,
            fields: Vec::new(),
        }),
        // Bare $ref definitions and anything unrecognized degrade to String.
        _ => Ok(TypeDef {
            name: name.to_string(),
            base: BaseType::String,
            options: Vec::new(),
            description,
            fields: Vec::new(),
        }),
    }
}

fn object_to_type(name: &str, obj: &Map<String, Value>, description: String) -> TypeDef {
    if let Some(props) = obj.get("properties").and_then(Value::as_object) {
        let required: HashSet<&str> = obj
            .get("required")
            .and_then(Value::as_array)
            .map(|a| a.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        let fields = props
            .iter()
            .enumerate()
            .map(|(i, (pname, pdef))| {
                field_from_property(i as i64 + 1, pname, pdef, required.contains(pname.as_str()))
            })
            .collect();
        return TypeDef {
            name: name.to_string(),
            base: BaseType::Record,
            options: Vec::new(),
            description,
            fields,
        };
    }

    let vtype = obj
        .get("additionalProperties")
        .filter(|v| !v.is_boolean())
        .map(type_name_of)
        .unwrap_or_else(|| "String".to_string());
    TypeDef {
        name: name.to_string(),
        base: BaseType::MapOf,
        options: vec!["+String".to_string(), format!("*{}", vtype)],
        description,
        fields: Vec::new(),
    }
}

fn array_to_type(name: &str, obj: &Map<String, Value>, description: String) -> TypeDef {
    if let Some(prefix) = obj.get("prefixItems").and_then(Value::as_array) {
        let fields = prefix
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let pname = item
                    .get("title")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("f{}", i + 1));
                field_from_property(i as i64 + 1, &pname, item, true)
            })
            .collect();
        return TypeDef {
            name: name.to_string(),
            base: BaseType::Array,
            options: Vec::new(),
            description,
            fields,
        };
    }

    let vtype = obj
        .get("items")
        .map(type_name_of)
        .unwrap_or_else(|| "String".to_string());
    let mut options = vec![format!("*{}", vtype)];
    if let Some(min) = obj.get("minItems").and_then(Value::as_i64) {
        options.push(format!("{{{}", min));
    }
    if let Some(max) = obj.get("maxItems").and_then(Value::as_i64) {
        options.push(format!("}}{}", max));
    }
    TypeDef {
        name: name.to_string(),
        base: BaseType::ArrayOf,
        options,
        description,
        fields: Vec::new(),
    }
}

fn field_from_property(id: i64, name: &str, pdef: &Value, required: bool) -> Field {
    // Array-valued properties without positional items come back as
    // repeated fields rather than ArrayOf references.
    let repeated = pdef.get("type").and_then(Value::as_str) == Some("array")
        && pdef.get("prefixItems").is_none();
    let ftype_src = if repeated {
        pdef.get("items").unwrap_or(pdef)
    } else {
        pdef
    };

    let mut options = Vec::new();
    if !required {
        options.push("[0".to_string());
    }
    if repeated {
        options.push("]0".to_string());
    }

    Field::Full {
        id,
        name: name.to_string(),
        ftype: type_name_of(ftype_src),
        options,
        description: pdef
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
    }
}

fn type_name_of(pdef: &Value) -> String {
    if let Some(target) = pdef.get("$ref").and_then(Value::as_str) {
        if let Some(name) = target.rsplit('/').next() {
            return name.to_string();
        }
    }
    match pdef.get("type").and_then(Value::as_str) {
        Some("string") => {
            if pdef.get("contentEncoding").and_then(Value::as_str) == Some("base64") {
                "Binary".to_string()
            } else {
                "String".to_string()
            }
        }
        Some("integer") => "Integer".to_string(),
        Some("number") => "Number".to_string(),
        Some("boolean") => "Boolean".to_string(),
        _ => "String".to_string(),
    }
}

fn description_of(obj: &Map<String, Value>) -> String {
    obj.get("description")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

/// Translate compact JIDL text into JADN schema text.
pub fn from_jidl(text: &str) -> Result<String, BackendError> {
    let mut info = SchemaInfo::default();
    let mut types: Vec<TypeDef> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let lineno = idx + 1;
        let (line, comment) = split_comment(raw);
        if line.trim().is_empty() {
            continue;
        }

        let indented = line.starts_with(' ') || line.starts_with('\t');
        let trimmed = line.trim();

        if indented {
            let tdef = types.last_mut().ok_or_else(|| {
                translation(format!("line {}: field outside of a type definition", lineno))
            })?;
            let field = parse_field_line(trimmed, comment, tdef.base, lineno)?;
            tdef.fields.push(field);
            continue;
        }

        if let Some((key, value)) = header_entry(trimmed) {
            match key {
                "package" => info.package = Some(value.to_string()),
                "version" => info.version = Some(value.to_string()),
                "title" => info.title = Some(value.to_string()),
                "description" => info.description = Some(value.to_string()),
                "roots" | "exports" => {
                    info.roots = value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                _ => {}
            }
            continue;
        }

        types.push(parse_type_decl(trimmed, comment, lineno)?);
    }

    if types.is_empty() {
        return Err(translation("no type definitions found"));
    }
    Schema { info, types }.to_text()
}

const HEADER_KEYS: [&str; 6] = [
    "package",
    "version",
    "title",
    "description",
    "roots",
    "exports",
];

fn header_entry(trimmed: &str) -> Option<(&str, &str)> {
    let (key, value) = trimmed.split_once(':')?;
    let key = key.trim();
    if HEADER_KEYS.contains(&key) {
        Some((key, value.trim()))
    } else {
        None
    }
}

fn split_comment(line: &str) -> (&str, &str) {
    match line.find(" // ") {
        Some(idx) => (&line[..idx], line[idx + 4..].trim()),
        None => (line, ""),
    }
}

fn parse_type_decl(trimmed: &str, comment: &str, lineno: usize) -> Result<TypeDef, BackendError> {
    let (name, rhs) = trimmed.split_once('=').ok_or_else(|| {
        translation(format!(
            "line {}: expected a header entry or type definition",
            lineno
        ))
    })?;
    let name = name.trim().to_string();
    let rhs = rhs.trim();

    let (base_name, args) = match rhs.split_once('(') {
        Some((b, rest)) => {
            let inner = rest
                .strip_suffix(')')
                .ok_or_else(|| translation(format!("line {}: unclosed type arguments", lineno)))?;
            (b.trim(), Some(inner))
        }
        None => (rhs, None),
    };
    let base = BaseType::from_name(base_name)
        .ok_or_else(|| translation(format!("line {}: unknown base type '{}'", lineno, base_name)))?;

    let mut options = Vec::new();
    match (base, args) {
        (BaseType::ArrayOf, Some(inner)) => options.push(format!("*{}", inner.trim())),
        (BaseType::MapOf, Some(inner)) => {
            let (ktype, vtype) = inner.split_once(',').ok_or_else(|| {
                translation(format!("line {}: MapOf takes two type arguments", lineno))
            })?;
            options.push(format!("+{}", ktype.trim()));
            options.push(format!("*{}", vtype.trim()));
        }
        (_, Some(_)) => {
            return Err(translation(format!(
                "line {}: {} takes no type arguments",
                lineno, base_name
            )))
        }
        _ => {}
    }

    Ok(TypeDef {
        name,
        base,
        options,
        description: comment.to_string(),
        fields: Vec::new(),
    })
}

fn parse_field_line(
    trimmed: &str,
    comment: &str,
    base: BaseType,
    lineno: usize,
) -> Result<Field, BackendError> {
    let (id_token, rest) = trimmed
        .split_once(char::is_whitespace)
        .ok_or_else(|| translation(format!("line {}: expected a field id and name", lineno)))?;
    let id: i64 = id_token.parse().map_err(|_| {
        translation(format!(
            "line {}: field id '{}' is not a number",
            lineno, id_token
        ))
    })?;
    let rest = rest.trim();

    if base == BaseType::Enumerated {
        return Ok(Field::Item {
            id,
            value: rest.to_string(),
            description: comment.to_string(),
        });
    }

    let mut tokens = rest.split_whitespace();
    let name = tokens
        .next()
        .ok_or_else(|| translation(format!("line {}: missing field name", lineno)))?;
    let ftype = tokens.next().ok_or_else(|| {
        translation(format!("line {}: field '{}' is missing a type", lineno, name))
    })?;

    let mut options = Vec::new();
    if let Some(token) = tokens.next() {
        let (minc, maxc) = parse_multiplicity(token).ok_or_else(|| {
            translation(format!("line {}: unexpected token '{}'", lineno, token))
        })?;
        if minc != 1 {
            options.push(format!("[{}", minc));
        }
        if maxc != 1 {
            options.push(format!("]{}", maxc));
        }
    }
    if let Some(extra) = tokens.next() {
        return Err(translation(format!(
            "line {}: unexpected token '{}'",
            lineno, extra
        )));
    }

    Ok(Field::Full {
        id,
        name: name.to_string(),
        ftype: ftype.to_string(),
        options,
        description: comment.to_string(),
    })
}

/// `[a..b]` with `*` for an unbounded upper bound, which maps to maxc 0.
fn parse_multiplicity(token: &str) -> Option<(i64, i64)> {
    let inner = token.strip_prefix('[')?.strip_suffix(']')?;
    let (lo, hi) = inner.split_once("..")?;
    let minc: i64 = lo.trim().parse().ok()?;
    let maxc: i64 = if hi.trim() == "*" {
        0
    } else {
        hi.trim().parse().ok()?
    };
    Some((minc, maxc))
}

//! JADN schema model: parsing from schema text and meta-validation.
//!
//! A schema is a package `info` block plus an ordered list of type
//! definitions, each the JADN 5-tuple `[name, base, options, description,
//! fields]`. Enumerated types carry 3-tuple items; every other compound
//! type carries 5-tuple fields.

use crate::error::BackendError;
use serde_json::{json, Map, Value};
use std::collections::HashSet;

/// JADN type and field option tags.
pub mod opts {
    pub const VTYPE: char = '*';
    pub const KTYPE: char = '+';
    pub const PATTERN: char = '%';
    pub const MINV: char = '{';
    pub const MAXV: char = '}';
    pub const FORMAT: char = '/';
    pub const UNIQUE: char = 'q';
    pub const MINC: char = '[';
    pub const MAXC: char = ']';
}

/// Parsed JADN schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub info: SchemaInfo,
    pub types: Vec<TypeDef>,
}

/// Package metadata. `roots` holds `info.exports` when present, falling
/// back to `info.roots`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaInfo {
    pub package: Option<String>,
    pub title: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub roots: Vec<String>,
}

/// One JADN type definition.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    pub name: String,
    pub base: BaseType,
    pub options: Vec<String>,
    pub description: String,
    pub fields: Vec<Field>,
}

/// JADN base types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    Binary,
    Boolean,
    Integer,
    Number,
    String,
    Enumerated,
    Choice,
    Array,
    ArrayOf,
    Map,
    MapOf,
    Record,
}

impl BaseType {
    pub fn from_name(name: &str) -> Option<BaseType> {
        match name {
            "Binary" => Some(BaseType::Binary),
            "Boolean" => Some(BaseType::Boolean),
            "Integer" => Some(BaseType::Integer),
            "Number" => Some(BaseType::Number),
            "String" => Some(BaseType::String),
            "Enumerated" => Some(BaseType::Enumerated),
            "Choice" => Some(BaseType::Choice),
            "Array" => Some(BaseType::Array),
            "ArrayOf" => Some(BaseType::ArrayOf),
            "Map" => Some(BaseType::Map),
            "MapOf" => Some(BaseType::MapOf),
            "Record" => Some(BaseType::Record),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BaseType::Binary => "Binary",
            BaseType::Boolean => "Boolean",
            BaseType::Integer => "Integer",
            BaseType::Number => "Number",
            BaseType::String => "String",
            BaseType::Enumerated => "Enumerated",
            BaseType::Choice => "Choice",
            BaseType::Array => "Array",
            BaseType::ArrayOf => "ArrayOf",
            BaseType::Map => "Map",
            BaseType::MapOf => "MapOf",
            BaseType::Record => "Record",
        }
    }

    /// Primitive bases carry no fields.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            BaseType::Binary
                | BaseType::Boolean
                | BaseType::Integer
                | BaseType::Number
                | BaseType::String
        )
    }
}

/// Fields come in two shapes: enumerated items and full fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Item {
        id: i64,
        value: String,
        description: String,
    },
    Full {
        id: i64,
        name: String,
        ftype: String,
        options: Vec<String>,
        description: String,
    },
}

impl Field {
    pub fn id(&self) -> i64 {
        match self {
            Field::Item { id, .. } | Field::Full { id, .. } => *id,
        }
    }

    /// Minimum cardinality: `[n` option, default 1. Zero marks the field
    /// optional.
    pub fn min_occurs(&self) -> i64 {
        match self {
            Field::Item { .. } => 1,
            Field::Full { options, .. } => option_value(options, opts::MINC)
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        }
    }

    /// Maximum cardinality: `]n` option, default 1. Zero means unbounded.
    pub fn max_occurs(&self) -> i64 {
        match self {
            Field::Item { .. } => 1,
            Field::Full { options, .. } => option_value(options, opts::MAXC)
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        }
    }

    pub fn is_optional(&self) -> bool {
        self.min_occurs() == 0
    }
}

/// Value of the first option carrying `tag`, without the tag character.
pub fn option_value(options: &[String], tag: char) -> Option<&str> {
    options
        .iter()
        .find(|o| o.starts_with(tag))
        .map(|o| &o[tag.len_utf8()..])
}

impl TypeDef {
    pub fn vtype(&self) -> Option<&str> {
        option_value(&self.options, opts::VTYPE)
    }

    pub fn ktype(&self) -> Option<&str> {
        option_value(&self.options, opts::KTYPE)
    }

    pub fn pattern(&self) -> Option<&str> {
        option_value(&self.options, opts::PATTERN)
    }

    pub fn minv(&self) -> Option<i64> {
        option_value(&self.options, opts::MINV).and_then(|v| v.parse().ok())
    }

    pub fn maxv(&self) -> Option<i64> {
        option_value(&self.options, opts::MAXV).and_then(|v| v.parse().ok())
    }
}

fn invalid(msg: impl Into<String>) -> BackendError {
    BackendError::SchemaInvalid(msg.into())
}

impl Schema {
    /// Parse JADN schema text.
    pub fn parse(text: &str) -> Result<Schema, BackendError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| invalid(format!("not valid JSON: {}", e)))?;
        let root = value
            .as_object()
            .ok_or_else(|| invalid("schema document must be a JSON object"))?;

        let info = match root.get("info") {
            Some(raw) => parse_info(raw)?,
            None => SchemaInfo::default(),
        };

        let raw_types = root
            .get("types")
            .ok_or_else(|| invalid("schema document is missing the 'types' array"))?
            .as_array()
            .ok_or_else(|| invalid("'types' must be an array"))?;

        let mut types = Vec::with_capacity(raw_types.len());
        for raw in raw_types {
            types.push(parse_type(raw)?);
        }

        Ok(Schema { info, types })
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn type_names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.name.as_str()).collect()
    }

    /// Declared root types, already normalized from exports/roots.
    pub fn roots(&self) -> &[String] {
        &self.info.roots
    }

    /// Schema as a JADN JSON value (canonical 5-tuples).
    pub fn to_value(&self) -> Value {
        let mut info = Map::new();
        if let Some(package) = &self.info.package {
            info.insert("package".to_string(), json!(package));
        }
        if let Some(version) = &self.info.version {
            info.insert("version".to_string(), json!(version));
        }
        if let Some(title) = &self.info.title {
            info.insert("title".to_string(), json!(title));
        }
        if let Some(description) = &self.info.description {
            info.insert("description".to_string(), json!(description));
        }
        if !self.info.roots.is_empty() {
            info.insert("roots".to_string(), json!(self.info.roots));
        }

        let types: Vec<Value> = self.types.iter().map(type_to_value).collect();

        let mut root = Map::new();
        if !info.is_empty() {
            root.insert("info".to_string(), Value::Object(info));
        }
        root.insert("types".to_string(), json!(types));
        Value::Object(root)
    }

    /// Pretty-printed JADN schema text.
    pub fn to_text(&self) -> Result<String, BackendError> {
        serde_json::to_string_pretty(&self.to_value())
            .map_err(|e| BackendError::ConversionFailed(e.to_string()))
    }
}

fn type_to_value(tdef: &TypeDef) -> Value {
    let fields: Vec<Value> = tdef
        .fields
        .iter()
        .map(|f| match f {
            Field::Item {
                id,
                value,
                description,
            } => json!([id, value, description]),
            Field::Full {
                id,
                name,
                ftype,
                options,
                description,
            } => json!([id, name, ftype, options, description]),
        })
        .collect();
    json!([
        tdef.name,
        tdef.base.as_str(),
        tdef.options,
        tdef.description,
        fields
    ])
}

fn parse_info(raw: &Value) -> Result<SchemaInfo, BackendError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| invalid("'info' must be a JSON object"))?;

    let string_of = |key: &str| -> Option<String> {
        obj.get(key).and_then(Value::as_str).map(str::to_string)
    };
    let names_of = |key: &str| -> Vec<String> {
        obj.get(key)
            .and_then(Value::as_array)
            .map(|a| {
                a.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    };

    // Exports take precedence over roots, matching how older JADN packages
    // declared their top-level types.
    let exports = names_of("exports");
    let roots = if exports.is_empty() {
        names_of("roots")
    } else {
        exports
    };

    Ok(SchemaInfo {
        package: string_of("package"),
        title: string_of("title"),
        version: string_of("version"),
        description: string_of("description"),
        roots,
    })
}

fn parse_type(raw: &Value) -> Result<TypeDef, BackendError> {
    let tuple = raw
        .as_array()
        .ok_or_else(|| invalid("each type definition must be an array"))?;
    if tuple.len() < 2 || tuple.len() > 5 {
        return Err(invalid(format!(
            "type definition has {} elements, expected 2 to 5",
            tuple.len()
        )));
    }

    let name = tuple[0]
        .as_str()
        .ok_or_else(|| invalid("type name must be a string"))?
        .to_string();
    let base_name = tuple[1]
        .as_str()
        .ok_or_else(|| invalid(format!("base type of '{}' must be a string", name)))?;
    let base = BaseType::from_name(base_name)
        .ok_or_else(|| invalid(format!("type '{}' has unknown base type '{}'", name, base_name)))?;

    let options = match tuple.get(2) {
        Some(raw_opts) => parse_options(&name, raw_opts)?,
        None => Vec::new(),
    };
    let description = match tuple.get(3) {
        Some(desc) => desc
            .as_str()
            .ok_or_else(|| invalid(format!("description of '{}' must be a string", name)))?
            .to_string(),
        None => String::new(),
    };
    let fields = match tuple.get(4) {
        Some(raw_fields) => parse_fields(&name, base, raw_fields)?,
        None => Vec::new(),
    };

    Ok(TypeDef {
        name,
        base,
        options,
        description,
        fields,
    })
}

fn parse_options(type_name: &str, raw: &Value) -> Result<Vec<String>, BackendError> {
    let array = raw
        .as_array()
        .ok_or_else(|| invalid(format!("options of '{}' must be an array", type_name)))?;
    let mut options = Vec::with_capacity(array.len());
    for opt in array {
        let opt = opt
            .as_str()
            .ok_or_else(|| invalid(format!("options of '{}' must be strings", type_name)))?;
        options.push(opt.to_string());
    }
    Ok(options)
}

fn parse_fields(type_name: &str, base: BaseType, raw: &Value) -> Result<Vec<Field>, BackendError> {
    let array = raw
        .as_array()
        .ok_or_else(|| invalid(format!("fields of '{}' must be an array", type_name)))?;

    let mut fields = Vec::with_capacity(array.len());
    for raw_field in array {
        let tuple = raw_field
            .as_array()
            .ok_or_else(|| invalid(format!("each field of '{}' must be an array", type_name)))?;
        let id = tuple
            .first()
            .and_then(Value::as_i64)
            .ok_or_else(|| invalid(format!("field id in '{}' must be an integer", type_name)))?;

        if base == BaseType::Enumerated {
            if tuple.len() < 2 || tuple.len() > 3 {
                return Err(invalid(format!(
                    "enumerated item in '{}' must be [id, value, description]",
                    type_name
                )));
            }
            let value = tuple[1]
                .as_str()
                .ok_or_else(|| invalid(format!("item value in '{}' must be a string", type_name)))?
                .to_string();
            let description = tuple
                .get(2)
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string();
            fields.push(Field::Item {
                id,
                value,
                description,
            });
        } else {
            if tuple.len() < 4 || tuple.len() > 5 {
                return Err(invalid(format!(
                    "field in '{}' must be [id, name, type, options, description]",
                    type_name
                )));
            }
            let fname = tuple[1]
                .as_str()
                .ok_or_else(|| invalid(format!("field name in '{}' must be a string", type_name)))?
                .to_string();
            let ftype = tuple[2]
                .as_str()
                .ok_or_else(|| {
                    invalid(format!(
                        "type of field '{}' in '{}' must be a string",
                        fname, type_name
                    ))
                })?
                .to_string();
            let options = parse_options(type_name, &tuple[3])?;
            let description = tuple
                .get(4)
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string();
            fields.push(Field::Full {
                id,
                name: fname,
                ftype,
                options,
                description,
            });
        }
    }
    Ok(fields)
}

/// Meta-validate a parsed schema. Returns the first rule violation.
pub fn check(schema: &Schema) -> Result<(), BackendError> {
    let mut names: HashSet<&str> = HashSet::new();
    for tdef in &schema.types {
        if !is_valid_type_name(&tdef.name) {
            return Err(invalid(format!("invalid type name '{}'", tdef.name)));
        }
        if !names.insert(tdef.name.as_str()) {
            return Err(invalid(format!("duplicate type name '{}'", tdef.name)));
        }
    }

    for tdef in &schema.types {
        check_type(schema, tdef)?;
    }

    for root in schema.roots() {
        if schema.get(root).is_none() {
            return Err(invalid(format!("root type '{}' is not defined", root)));
        }
    }

    Ok(())
}

fn check_type(schema: &Schema, tdef: &TypeDef) -> Result<(), BackendError> {
    check_bounds_options(&tdef.name, &tdef.options)?;

    if (tdef.base.is_primitive() || matches!(tdef.base, BaseType::ArrayOf | BaseType::MapOf))
        && !tdef.fields.is_empty()
    {
        return Err(invalid(format!(
            "type '{}' is {} and cannot define fields",
            tdef.name,
            tdef.base.as_str()
        )));
    }

    match tdef.base {
        BaseType::ArrayOf => {
            let vtype = tdef.vtype().ok_or_else(|| {
                invalid(format!("ArrayOf type '{}' is missing a vtype option", tdef.name))
            })?;
            check_type_ref(schema, &tdef.name, vtype)?;
        }
        BaseType::MapOf => {
            let ktype = tdef.ktype().ok_or_else(|| {
                invalid(format!("MapOf type '{}' is missing a ktype option", tdef.name))
            })?;
            let vtype = tdef.vtype().ok_or_else(|| {
                invalid(format!("MapOf type '{}' is missing a vtype option", tdef.name))
            })?;
            check_type_ref(schema, &tdef.name, ktype)?;
            check_type_ref(schema, &tdef.name, vtype)?;
        }
        _ => {}
    }

    let mut ids: HashSet<i64> = HashSet::new();
    let mut field_names: HashSet<&str> = HashSet::new();
    for field in &tdef.fields {
        if !ids.insert(field.id()) {
            return Err(invalid(format!(
                "duplicate field id {} in type '{}'",
                field.id(),
                tdef.name
            )));
        }
        match field {
            Field::Item { .. } => {
                // Item shape is only legal under Enumerated; the parser
                // already pairs shapes with bases.
            }
            Field::Full {
                name,
                ftype,
                options,
                ..
            } => {
                if !is_valid_field_name(name) {
                    return Err(invalid(format!(
                        "invalid field name '{}' in type '{}'",
                        name, tdef.name
                    )));
                }
                if !field_names.insert(name.as_str()) {
                    return Err(invalid(format!(
                        "duplicate field name '{}' in type '{}'",
                        name, tdef.name
                    )));
                }
                check_bounds_options(&tdef.name, options)?;
                check_type_ref(schema, &tdef.name, ftype)?;
            }
        }
    }

    Ok(())
}

fn check_type_ref(schema: &Schema, owner: &str, ftype: &str) -> Result<(), BackendError> {
    if BaseType::from_name(ftype).is_some() || schema.get(ftype).is_some() {
        return Ok(());
    }
    Err(invalid(format!(
        "type '{}' references undefined type '{}'",
        owner, ftype
    )))
}

fn check_bounds_options(owner: &str, options: &[String]) -> Result<(), BackendError> {
    for option in options {
        let Some(tag) = option.chars().next() else {
            return Err(invalid(format!("empty option in '{}'", owner)));
        };
        if matches!(tag, opts::MINV | opts::MAXV | opts::MINC | opts::MAXC)
            && option[tag.len_utf8()..].parse::<i64>().is_err()
        {
            return Err(invalid(format!(
                "option '{}' in '{}' must carry an integer",
                option, owner
            )));
        }
    }
    Ok(())
}

fn is_valid_type_name(name: &str) -> bool {
    if name.is_empty() || name.len() > 64 {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn is_valid_field_name(name: &str) -> bool {
    if name.is_empty() || name.len() > 64 {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Music-library schema shared across the engine's unit tests.
#[cfg(test)]
pub(crate) fn sample_schema_text() -> &'static str {
    r##"{
  "info": {
    "package": "http://fake-audio.org/music-lib",
    "version": "1.0",
    "title": "Music Library",
    "exports": ["Library"]
  },
  "types": [
    ["Library", "Record", [], "My music collection", [
      [1, "name", "String", [], "Collection name"],
      [2, "albums", "Album", ["[0", "]0"], "Albums in the collection"]
    ]],
    ["Album", "Record", [], "One release", [
      [1, "artist", "Artist", [], "Performer"],
      [2, "title", "String", [], "Album title"],
      [3, "genre", "Genre", [], "Primary genre"],
      [4, "barcode", "Barcode", ["[0"], "UPC-A barcode"],
      [5, "tracks", "Track", ["[0", "]0"], "Track list"]
    ]],
    ["Artist", "Record", [], "", [
      [1, "name", "String", [], "Artist name"]
    ]],
    ["Track", "Record", [], "", [
      [1, "number", "Integer", [], "Track number"],
      [2, "title", "String", [], "Track title"]
    ]],
    ["Genre", "Enumerated", [], "Primary genre", [
      [1, "rock", ""],
      [2, "jazz", ""],
      [3, "classical", ""]
    ]],
    ["Barcode", "String", ["%^\\d{12}$"], "UPC-A barcode", []]
  ]
}"##
}

#[cfg(test)]
pub(crate) fn sample_schema() -> Schema {
    Schema::parse(sample_schema_text()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sample_schema() {
        let schema = sample_schema();
        assert_eq!(schema.info.package.as_deref(), Some("http://fake-audio.org/music-lib"));
        assert_eq!(schema.roots(), ["Library".to_string()]);
        assert_eq!(
            schema.type_names(),
            vec!["Library", "Album", "Artist", "Track", "Genre", "Barcode"]
        );

        let library = schema.get("Library").unwrap();
        assert_eq!(library.base, BaseType::Record);
        assert_eq!(library.fields.len(), 2);
        assert!(!library.fields[0].is_optional());
        assert!(library.fields[1].is_optional());
        assert_eq!(library.fields[1].max_occurs(), 0);

        let barcode = schema.get("Barcode").unwrap();
        assert_eq!(barcode.pattern(), Some("^\\d{12}$"));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = Schema::parse("{ not json").unwrap_err();
        assert!(matches!(err, BackendError::SchemaInvalid(_)));
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn test_parse_requires_types_array() {
        let err = Schema::parse(r#"{"info": {}}"#).unwrap_err();
        assert!(err.to_string().contains("missing the 'types' array"));
    }

    #[test]
    fn test_parse_rejects_unknown_base_type() {
        let err = Schema::parse(r#"{"types": [["Thing", "Struct", [], "", []]]}"#).unwrap_err();
        assert!(err.to_string().contains("unknown base type 'Struct'"));
    }

    #[test]
    fn test_roots_fall_back_when_exports_absent() {
        let schema = Schema::parse(
            r#"{"info": {"roots": ["Thing"]}, "types": [["Thing", "Record", [], "", []]]}"#,
        )
        .unwrap();
        assert_eq!(schema.roots(), ["Thing".to_string()]);
    }

    #[test]
    fn test_check_accepts_sample_schema() {
        check(&sample_schema()).unwrap();
    }

    #[test]
    fn test_check_rejects_duplicate_type_names() {
        let schema = Schema::parse(
            r#"{"types": [
                ["Thing", "Record", [], "", []],
                ["Thing", "String", [], "", []]
            ]}"#,
        )
        .unwrap();
        let err = check(&schema).unwrap_err();
        assert!(err.to_string().contains("duplicate type name 'Thing'"));
    }

    #[test]
    fn test_check_rejects_lowercase_type_name() {
        let schema =
            Schema::parse(r#"{"types": [["thing", "Record", [], "", []]]}"#).unwrap();
        let err = check(&schema).unwrap_err();
        assert!(err.to_string().contains("invalid type name 'thing'"));
    }

    #[test]
    fn test_check_rejects_undefined_field_reference() {
        let schema = Schema::parse(
            r#"{"types": [["Thing", "Record", [], "", [
                [1, "part", "Widget", [], ""]
            ]]]}"#,
        )
        .unwrap();
        let err = check(&schema).unwrap_err();
        assert!(err.to_string().contains("undefined type 'Widget'"));
    }

    #[test]
    fn test_check_rejects_fields_on_primitives() {
        let schema = Schema::parse(
            r#"{"types": [["Name", "String", [], "", [
                [1, "oops", "String", [], ""]
            ]]]}"#,
        )
        .unwrap();
        let err = check(&schema).unwrap_err();
        assert!(err.to_string().contains("cannot define fields"));
    }

    #[test]
    fn test_check_requires_arrayof_vtype() {
        let schema =
            Schema::parse(r#"{"types": [["Names", "ArrayOf", [], "", []]]}"#).unwrap();
        let err = check(&schema).unwrap_err();
        assert!(err.to_string().contains("missing a vtype option"));
    }

    #[test]
    fn test_check_rejects_undefined_root() {
        let schema = Schema::parse(
            r#"{"info": {"roots": ["Ghost"]}, "types": [["Thing", "Record", [], "", []]]}"#,
        )
        .unwrap();
        let err = check(&schema).unwrap_err();
        assert!(err.to_string().contains("root type 'Ghost' is not defined"));
    }

    #[test]
    fn test_check_rejects_duplicate_field_ids() {
        let schema = Schema::parse(
            r#"{"types": [["Thing", "Record", [], "", [
                [1, "a", "String", [], ""],
                [1, "b", "String", [], ""]
            ]]]}"#,
        )
        .unwrap();
        let err = check(&schema).unwrap_err();
        assert!(err.to_string().contains("duplicate field id 1"));
    }

    #[test]
    fn test_check_rejects_non_numeric_bounds() {
        let schema = Schema::parse(
            r#"{"types": [["Code", "String", ["{abc"], "", []]]}"#,
        )
        .unwrap();
        let err = check(&schema).unwrap_err();
        assert!(err.to_string().contains("must carry an integer"));
    }

    #[test]
    fn test_to_text_round_trips_through_parse() {
        let schema = sample_schema();
        let text = schema.to_text().unwrap();
        let reparsed = Schema::parse(&text).unwrap();
        assert_eq!(schema.type_names(), reparsed.type_names());
        assert_eq!(schema.roots(), reparsed.roots());
        assert_eq!(schema, reparsed);
    }

    #[test]
    fn test_option_accessors() {
        let schema = Schema::parse(
            r#"{"types": [
                ["Tags", "ArrayOf", ["*String", "{1", "}10"], "", []],
                ["Index", "MapOf", ["+String", "*Integer"], "", []]
            ]}"#,
        )
        .unwrap();
        let tags = schema.get("Tags").unwrap();
        assert_eq!(tags.vtype(), Some("String"));
        assert_eq!(tags.minv(), Some(1));
        assert_eq!(tags.maxv(), Some(10));

        let index = schema.get("Index").unwrap();
        assert_eq!(index.ktype(), Some("String"));
        assert_eq!(index.vtype(), Some("Integer"));
    }
}

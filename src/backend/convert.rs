//! Forward schema conversion: JIDL, JSON Schema, XSD, Markdown, HTML,
//! GraphViz, and PlantUML renderings of a parsed schema.
//!
//! JSON Schema output keys every definition by its JADN type name, which is
//! what makes the reverse translation preserve the declared name set. The
//! JIDL form is a compact text layout that `translate::from_jidl` parses
//! back; scalar constraint options are not rendered there.

use super::schema::{BaseType, Field, Schema, TypeDef};
use super::DetailLevel;
use crate::error::BackendError;
use serde_json::{json, Map, Value};

/// Render the compact JIDL text form.
pub fn to_jidl(schema: &Schema) -> String {
    let mut out = String::new();
    if let Some(package) = &schema.info.package {
        out.push_str(&format!("package: {}\n", package));
    }
    if let Some(version) = &schema.info.version {
        out.push_str(&format!("version: {}\n", version));
    }
    if let Some(title) = &schema.info.title {
        out.push_str(&format!("title: {}\n", title));
    }
    if !schema.info.roots.is_empty() {
        out.push_str(&format!("roots: {}\n", schema.info.roots.join(", ")));
    }

    for tdef in &schema.types {
        out.push('\n');
        out.push_str(&with_comment(type_decl(tdef), &tdef.description));
        out.push('\n');
        for field in &tdef.fields {
            let line = match field {
                Field::Item {
                    id,
                    value,
                    description,
                } => with_comment(format!("  {:>3} {}", id, value), description),
                Field::Full {
                    id,
                    name,
                    ftype,
                    description,
                    ..
                } => {
                    let mut lhs = format!("  {:>3} {:<16} {}", id, name, ftype);
                    if let Some(mult) = multiplicity_suffix(field) {
                        lhs.push(' ');
                        lhs.push_str(&mult);
                    }
                    with_comment(lhs, description)
                }
            };
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

fn type_decl(tdef: &TypeDef) -> String {
    match tdef.base {
        BaseType::ArrayOf => format!(
            "{} = ArrayOf({})",
            tdef.name,
            tdef.vtype().unwrap_or("String")
        ),
        BaseType::MapOf => format!(
            "{} = MapOf({}, {})",
            tdef.name,
            tdef.ktype().unwrap_or("String"),
            tdef.vtype().unwrap_or("String")
        ),
        _ => format!("{} = {}", tdef.name, tdef.base.as_str()),
    }
}

fn with_comment(line: String, comment: &str) -> String {
    if comment.is_empty() {
        line
    } else {
        format!("{:<44} // {}", line, comment)
    }
}

fn multiplicity_suffix(field: &Field) -> Option<String> {
    let (minc, maxc) = (field.min_occurs(), field.max_occurs());
    if minc == 1 && maxc == 1 {
        return None;
    }
    let upper = if maxc == 0 {
        "*".to_string()
    } else {
        maxc.to_string()
    };
    Some(format!("[{}..{}]", minc, upper))
}

/// Human label for a base, with ArrayOf/MapOf arguments spelled out.
pub(super) fn base_label(tdef: &TypeDef) -> String {
    match tdef.base {
        BaseType::ArrayOf => format!("ArrayOf({})", tdef.vtype().unwrap_or("String")),
        BaseType::MapOf => format!(
            "MapOf({}, {})",
            tdef.ktype().unwrap_or("String"),
            tdef.vtype().unwrap_or("String")
        ),
        other => other.as_str().to_string(),
    }
}

/// Render a JSON Schema document with one definition per JADN type.
pub fn to_json_schema(schema: &Schema) -> Result<String, BackendError> {
    let mut defs = Map::new();
    for tdef in &schema.types {
        defs.insert(tdef.name.clone(), type_to_json_schema(schema, tdef));
    }

    let mut root = Map::new();
    root.insert(
        "$schema".to_string(),
        json!("https://json-schema.org/draft/2020-12/schema"),
    );
    if let Some(package) = &schema.info.package {
        root.insert("$id".to_string(), json!(package));
    }
    if let Some(title) = &schema.info.title {
        root.insert("title".to_string(), json!(title));
    }
    if let Some(first_root) = schema.roots().first() {
        root.insert("$ref".to_string(), json!(format!("#/definitions/{}", first_root)));
    }
    root.insert("definitions".to_string(), Value::Object(defs));

    serde_json::to_string_pretty(&Value::Object(root))
        .map_err(|e| BackendError::ConversionFailed(e.to_string()))
}

fn type_to_json_schema(schema: &Schema, tdef: &TypeDef) -> Value {
    let mut out = match tdef.base {
        BaseType::String => {
            let mut map = Map::new();
            map.insert("type".to_string(), json!("string"));
            if let Some(pattern) = tdef.pattern() {
                map.insert("pattern".to_string(), json!(pattern));
            }
            if let Some(minv) = tdef.minv() {
                map.insert("minLength".to_string(), json!(minv));
            }
            if let Some(maxv) = tdef.maxv() {
                if maxv > 0 {
                    map.insert("maxLength".to_string(), json!(maxv));
                }
            }
            Value::Object(map)
        }
        BaseType::Binary => json!({"type": "string", "contentEncoding": "base64"}),
        BaseType::Integer => {
            let mut map = Map::new();
            map.insert("type".to_string(), json!("integer"));
            if let Some(minv) = tdef.minv() {
                map.insert("minimum".to_string(), json!(minv));
            }
            if let Some(maxv) = tdef.maxv() {
                map.insert("maximum".to_string(), json!(maxv));
            }
            Value::Object(map)
        }
        BaseType::Number => json!({"type": "number"}),
        BaseType::Boolean => json!({"type": "boolean"}),
        BaseType::Enumerated => {
            let values: Vec<&str> = tdef
                .fields
                .iter()
                .filter_map(|f| match f {
                    Field::Item { value, .. } => Some(value.as_str()),
                    Field::Full { .. } => None,
                })
                .collect();
            json!({"type": "string", "enum": values})
        }
        BaseType::ArrayOf => {
            let mut map = Map::new();
            map.insert("type".to_string(), json!("array"));
            map.insert(
                "items".to_string(),
                ref_or_primitive(schema, tdef.vtype().unwrap_or("String")),
            );
            if let Some(minv) = tdef.minv() {
                map.insert("minItems".to_string(), json!(minv));
            }
            if let Some(maxv) = tdef.maxv() {
                if maxv > 0 {
                    map.insert("maxItems".to_string(), json!(maxv));
                }
            }
            Value::Object(map)
        }
        BaseType::Array => {
            let prefix: Vec<Value> = tdef
                .fields
                .iter()
                .map(|f| {
                    let mut item = field_to_json_schema(schema, f);
                    if let (Value::Object(map), Field::Full { name, .. }) = (&mut item, f) {
                        map.insert("title".to_string(), json!(name));
                    }
                    item
                })
                .collect();
            json!({"type": "array", "prefixItems": prefix})
        }
        BaseType::Record | BaseType::Map => {
            let mut properties = Map::new();
            let mut required = Vec::new();
            for field in &tdef.fields {
                if let Field::Full { name, .. } = field {
                    properties.insert(name.clone(), field_to_json_schema(schema, field));
                    if !field.is_optional() {
                        required.push(json!(name));
                    }
                }
            }
            let mut map = Map::new();
            map.insert("type".to_string(), json!("object"));
            map.insert("properties".to_string(), Value::Object(properties));
            if !required.is_empty() {
                map.insert("required".to_string(), Value::Array(required));
            }
            map.insert("additionalProperties".to_string(), json!(false));
            Value::Object(map)
        }
        BaseType::MapOf => {
            let mut map = Map::new();
            map.insert("type".to_string(), json!("object"));
            map.insert(
                "additionalProperties".to_string(),
                ref_or_primitive(schema, tdef.vtype().unwrap_or("String")),
            );
            if let Some(minv) = tdef.minv() {
                map.insert("minProperties".to_string(), json!(minv));
            }
            if let Some(maxv) = tdef.maxv() {
                if maxv > 0 {
                    map.insert("maxProperties".to_string(), json!(maxv));
                }
            }
            Value::Object(map)
        }
        BaseType::Choice => {
            let alternatives: Vec<Value> = tdef
                .fields
                .iter()
                .filter_map(|f| match f {
                    Field::Full { name, .. } => {
                        let mut properties = Map::new();
                        properties.insert(name.clone(), field_to_json_schema(schema, f));
                        let mut alt = Map::new();
                        alt.insert("type".to_string(), json!("object"));
                        alt.insert("properties".to_string(), Value::Object(properties));
                        alt.insert("required".to_string(), json!([name]));
                        alt.insert("additionalProperties".to_string(), json!(false));
                        Some(Value::Object(alt))
                    }
                    Field::Item { .. } => None,
                })
                .collect();
            json!({"oneOf": alternatives})
        }
    };

    if !tdef.description.is_empty() {
        if let Value::Object(ref mut map) = out {
            map.insert("description".to_string(), json!(tdef.description));
        }
    }
    out
}

fn field_to_json_schema(schema: &Schema, field: &Field) -> Value {
    let (ftype, description) = match field {
        Field::Full {
            ftype, description, ..
        } => (ftype.as_str(), description.as_str()),
        Field::Item { .. } => return json!({}),
    };

    let mut out = ref_or_primitive(schema, ftype);
    if field.max_occurs() != 1 {
        out = json!({"type": "array", "items": out});
    }
    if !description.is_empty() {
        if let Value::Object(ref mut map) = out {
            map.insert("description".to_string(), json!(description));
        }
    }
    out
}

fn ref_or_primitive(schema: &Schema, tname: &str) -> Value {
    match BaseType::from_name(tname) {
        Some(BaseType::String) => json!({"type": "string"}),
        Some(BaseType::Integer) => json!({"type": "integer"}),
        Some(BaseType::Number) => json!({"type": "number"}),
        Some(BaseType::Boolean) => json!({"type": "boolean"}),
        Some(BaseType::Binary) => json!({"type": "string", "contentEncoding": "base64"}),
        _ if schema.get(tname).is_some() => {
            json!({"$ref": format!("#/definitions/{}", tname)})
        }
        _ => json!({"type": "string"}),
    }
}

/// Render a Markdown description of the schema.
pub fn to_markdown(schema: &Schema) -> String {
    let mut out = String::new();
    let title = schema
        .info
        .title
        .clone()
        .or_else(|| schema.info.package.clone())
        .unwrap_or_else(|| "Schema".to_string());
    out.push_str(&format!("# {}\n\n", title));
    if let Some(package) = &schema.info.package {
        out.push_str(&format!("**Package:** {}\n\n", package));
    }
    if let Some(version) = &schema.info.version {
        out.push_str(&format!("**Version:** {}\n\n", version));
    }
    if let Some(description) = &schema.info.description {
        out.push_str(&format!("{}\n\n", description));
    }

    for tdef in &schema.types {
        out.push_str(&format!("## {} ({})\n\n", tdef.name, base_label(tdef)));
        if !tdef.description.is_empty() {
            out.push_str(&format!("{}\n\n", tdef.description));
        }
        if let Some(pattern) = tdef.pattern() {
            out.push_str(&format!("Pattern: `{}`\n\n", pattern));
        }

        if tdef.base == BaseType::Enumerated {
            out.push_str("| ID | Item | Description |\n|---:|------|-------------|\n");
            for field in &tdef.fields {
                if let Field::Item {
                    id,
                    value,
                    description,
                } = field
                {
                    out.push_str(&format!("| {} | {} | {} |\n", id, value, description));
                }
            }
            out.push('\n');
        } else if !tdef.fields.is_empty() {
            out.push_str("| ID | Name | Type | # | Description |\n|---:|------|------|---|-------------|\n");
            for field in &tdef.fields {
                if let Field::Full {
                    id,
                    name,
                    ftype,
                    description,
                    ..
                } = field
                {
                    out.push_str(&format!(
                        "| {} | {} | {} | {} | {} |\n",
                        id,
                        name,
                        ftype,
                        multiplicity_label(field),
                        description
                    ));
                }
            }
            out.push('\n');
        }
    }
    out
}

fn multiplicity_label(field: &Field) -> String {
    multiplicity_suffix(field)
        .map(|s| s.trim_matches(|c| c == '[' || c == ']').to_string())
        .unwrap_or_else(|| "1".to_string())
}

/// Render a standalone HTML page describing the schema.
pub fn to_html(schema: &Schema) -> String {
    let title = schema
        .info
        .title
        .clone()
        .or_else(|| schema.info.package.clone())
        .unwrap_or_else(|| "Schema".to_string());

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_markup(&title)));
    out.push_str(
        "<style>\nbody { font-family: sans-serif; margin: 2em; }\n\
         table { border-collapse: collapse; margin: 1em 0; }\n\
         th, td { border: 1px solid #ccc; padding: 4px 8px; text-align: left; }\n\
         th { background: #eee; }\n\
         .meta { color: #555; }\n</style>\n</head>\n<body>\n",
    );
    out.push_str(&format!("<h1>{}</h1>\n", escape_markup(&title)));
    if let Some(package) = &schema.info.package {
        out.push_str(&format!(
            "<p class=\"meta\">Package: {}</p>\n",
            escape_markup(package)
        ));
    }
    if let Some(version) = &schema.info.version {
        out.push_str(&format!(
            "<p class=\"meta\">Version: {}</p>\n",
            escape_markup(version)
        ));
    }

    for tdef in &schema.types {
        out.push_str(&format!(
            "<h2>{} <small>({})</small></h2>\n",
            escape_markup(&tdef.name),
            escape_markup(&base_label(tdef))
        ));
        if !tdef.description.is_empty() {
            out.push_str(&format!("<p>{}</p>\n", escape_markup(&tdef.description)));
        }

        if tdef.base == BaseType::Enumerated {
            out.push_str("<table>\n<tr><th>ID</th><th>Item</th><th>Description</th></tr>\n");
            for field in &tdef.fields {
                if let Field::Item {
                    id,
                    value,
                    description,
                } = field
                {
                    out.push_str(&format!(
                        "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                        id,
                        escape_markup(value),
                        escape_markup(description)
                    ));
                }
            }
            out.push_str("</table>\n");
        } else if !tdef.fields.is_empty() {
            out.push_str(
                "<table>\n<tr><th>ID</th><th>Name</th><th>Type</th><th>#</th><th>Description</th></tr>\n",
            );
            for field in &tdef.fields {
                if let Field::Full {
                    id,
                    name,
                    ftype,
                    description,
                    ..
                } = field
                {
                    out.push_str(&format!(
                        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                        id,
                        escape_markup(name),
                        escape_markup(ftype),
                        multiplicity_label(field),
                        escape_markup(description)
                    ));
                }
            }
            out.push_str("</table>\n");
        }
    }

    out.push_str("</body>\n</html>\n");
    out
}

/// Render a GraphViz digraph of the schema's type structure.
pub fn to_graphviz(schema: &Schema, detail: DetailLevel) -> String {
    let mut out = format!("digraph {} {{\n", package_slug(schema));
    out.push_str("  graph [fontname=\"Arial\"];\n");
    out.push_str("  node [fontname=\"Arial\", shape=record];\n");
    out.push_str("  edge [fontname=\"Arial\"];\n\n");

    for tdef in &schema.types {
        let header = format!("{} : {}", tdef.name, base_label(tdef));
        let label = match detail {
            DetailLevel::Conceptual => format!("{{{}}}", header),
            DetailLevel::Logical | DetailLevel::Information => {
                let mut members = String::new();
                for field in &tdef.fields {
                    match field {
                        Field::Item { value, .. } => {
                            members.push_str(value);
                            members.push_str("\\l");
                        }
                        Field::Full { name, ftype, .. } => {
                            if detail == DetailLevel::Logical {
                                members.push_str(name);
                            } else {
                                members.push_str(&format!("{} : {}", name, ftype));
                            }
                            members.push_str("\\l");
                        }
                    }
                }
                if members.is_empty() {
                    format!("{{{}}}", header)
                } else {
                    format!("{{{}|{}}}", header, members)
                }
            }
        };
        out.push_str(&format!("  \"{}\" [label=\"{}\"];\n", tdef.name, label));
    }

    let edges = reference_edges(schema);
    if !edges.is_empty() {
        out.push('\n');
        for (from, to) in edges {
            out.push_str(&format!("  \"{}\" -> \"{}\";\n", from, to));
        }
    }
    out.push_str("}\n");
    out
}

/// Render a PlantUML class diagram of the schema's type structure.
pub fn to_plantuml(schema: &Schema, detail: DetailLevel) -> String {
    let mut out = String::from("@startuml\n");
    if let Some(title) = &schema.info.title {
        out.push_str(&format!("title {}\n", title));
    }
    out.push('\n');

    for tdef in &schema.types {
        let keyword = if tdef.base == BaseType::Enumerated {
            "enum"
        } else {
            "class"
        };
        let stereotype = if tdef.base == BaseType::Enumerated {
            String::new()
        } else {
            format!(" <<{}>>", base_label(tdef))
        };

        if detail == DetailLevel::Conceptual || tdef.fields.is_empty() {
            out.push_str(&format!("{} {}{}\n", keyword, tdef.name, stereotype));
            continue;
        }

        out.push_str(&format!("{} {}{} {{\n", keyword, tdef.name, stereotype));
        for field in &tdef.fields {
            match field {
                Field::Item { value, .. } => out.push_str(&format!("  {}\n", value)),
                Field::Full { name, ftype, .. } => {
                    if detail == DetailLevel::Logical {
                        out.push_str(&format!("  {}\n", name));
                    } else {
                        let mult = multiplicity_suffix(field)
                            .map(|m| format!(" {}", m))
                            .unwrap_or_default();
                        out.push_str(&format!("  {} : {}{}\n", name, ftype, mult));
                    }
                }
            }
        }
        out.push_str("}\n");
    }

    let edges = reference_edges(schema);
    if !edges.is_empty() {
        out.push('\n');
        for (from, to) in edges {
            out.push_str(&format!("{} --> {}\n", from, to));
        }
    }
    out.push_str("@enduml\n");
    out
}

/// Render an XSD document.
pub fn to_xsd(schema: &Schema) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<xs:schema xmlns:xs=\"http://www.w3.org/2001/XMLSchema\"");
    if let Some(package) = &schema.info.package {
        out.push_str(&format!(" targetNamespace=\"{}\"", escape_markup(package)));
    }
    out.push_str(" elementFormDefault=\"qualified\">\n");

    for tdef in &schema.types {
        xsd_type(&mut out, tdef);
    }
    for root in schema.roots() {
        out.push_str(&format!(
            "  <xs:element name=\"{}\" type=\"{}\"/>\n",
            root, root
        ));
    }

    out.push_str("</xs:schema>\n");
    out
}

fn xsd_type(out: &mut String, tdef: &TypeDef) {
    match tdef.base {
        BaseType::Enumerated => {
            out.push_str(&format!("  <xs:simpleType name=\"{}\">\n", tdef.name));
            out.push_str("    <xs:restriction base=\"xs:string\">\n");
            for field in &tdef.fields {
                if let Field::Item { value, .. } = field {
                    out.push_str(&format!(
                        "      <xs:enumeration value=\"{}\"/>\n",
                        escape_markup(value)
                    ));
                }
            }
            out.push_str("    </xs:restriction>\n  </xs:simpleType>\n");
        }
        base if base.is_primitive() => {
            out.push_str(&format!("  <xs:simpleType name=\"{}\">\n", tdef.name));
            out.push_str(&format!(
                "    <xs:restriction base=\"{}\">\n",
                xsd_ref(tdef.base.as_str())
            ));
            if let Some(pattern) = tdef.pattern() {
                out.push_str(&format!(
                    "      <xs:pattern value=\"{}\"/>\n",
                    escape_markup(pattern)
                ));
            }
            out.push_str("    </xs:restriction>\n  </xs:simpleType>\n");
        }
        BaseType::ArrayOf => {
            out.push_str(&format!("  <xs:complexType name=\"{}\">\n", tdef.name));
            out.push_str("    <xs:sequence>\n");
            out.push_str(&format!(
                "      <xs:element name=\"item\" type=\"{}\" minOccurs=\"0\" maxOccurs=\"unbounded\"/>\n",
                xsd_ref(tdef.vtype().unwrap_or("String"))
            ));
            out.push_str("    </xs:sequence>\n  </xs:complexType>\n");
        }
        BaseType::MapOf => {
            out.push_str(&format!("  <xs:complexType name=\"{}\">\n", tdef.name));
            out.push_str("    <xs:sequence>\n");
            out.push_str(
                "      <xs:any processContents=\"lax\" minOccurs=\"0\" maxOccurs=\"unbounded\"/>\n",
            );
            out.push_str("    </xs:sequence>\n  </xs:complexType>\n");
        }
        BaseType::Choice => {
            out.push_str(&format!("  <xs:complexType name=\"{}\">\n", tdef.name));
            out.push_str("    <xs:choice>\n");
            xsd_fields(out, tdef);
            out.push_str("    </xs:choice>\n  </xs:complexType>\n");
        }
        _ => {
            out.push_str(&format!("  <xs:complexType name=\"{}\">\n", tdef.name));
            out.push_str("    <xs:sequence>\n");
            xsd_fields(out, tdef);
            out.push_str("    </xs:sequence>\n  </xs:complexType>\n");
        }
    }
}

fn xsd_fields(out: &mut String, tdef: &TypeDef) {
    for field in &tdef.fields {
        if let Field::Full { name, ftype, .. } = field {
            let mut attrs = String::new();
            if field.min_occurs() == 0 {
                attrs.push_str(" minOccurs=\"0\"");
            }
            let maxc = field.max_occurs();
            if maxc == 0 {
                attrs.push_str(" maxOccurs=\"unbounded\"");
            } else if maxc > 1 {
                attrs.push_str(&format!(" maxOccurs=\"{}\"", maxc));
            }
            out.push_str(&format!(
                "      <xs:element name=\"{}\" type=\"{}\"{}/>\n",
                name,
                xsd_ref(ftype),
                attrs
            ));
        }
    }
}

fn xsd_ref(tname: &str) -> String {
    match BaseType::from_name(tname) {
        Some(BaseType::String) => "xs:string".to_string(),
        Some(BaseType::Integer) => "xs:integer".to_string(),
        Some(BaseType::Number) => "xs:decimal".to_string(),
        Some(BaseType::Boolean) => "xs:boolean".to_string(),
        Some(BaseType::Binary) => "xs:base64Binary".to_string(),
        _ => tname.to_string(),
    }
}

/// Directed edges between defined types, deduplicated, in declaration
/// order.
fn reference_edges(schema: &Schema) -> Vec<(String, String)> {
    let mut edges: Vec<(String, String)> = Vec::new();
    let mut push = |from: &str, to: &str| {
        let edge = (from.to_string(), to.to_string());
        if !edges.contains(&edge) {
            edges.push(edge);
        }
    };

    for tdef in &schema.types {
        for field in &tdef.fields {
            if let Field::Full { ftype, .. } = field {
                if schema.get(ftype).is_some() {
                    push(&tdef.name, ftype);
                }
            }
        }
        for target in [tdef.ktype(), tdef.vtype()].into_iter().flatten() {
            if schema.get(target).is_some() {
                push(&tdef.name, target);
            }
        }
    }
    edges
}

fn package_slug(schema: &Schema) -> String {
    let package = schema.info.package.as_deref().unwrap_or("schema");
    let last = package
        .rsplit(['/', ':'])
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("schema");
    let slug: String = last
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if slug.chars().next().map_or(true, |c| c.is_ascii_digit()) {
        format!("_{}", slug)
    } else {
        slug
    }
}

fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

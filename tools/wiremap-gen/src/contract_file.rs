// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Contract file loading
//
// Parses the YAML contract definition into a wiremap ContractSet plus the
// root references handed to MessageMapper::initialize.

use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use wiremap::contract::{
    Annotation, AnnotationValue, ClassBuilder, ContractSet, EnumDef, EnumVariant,
    InterfaceBuilder, SimpleKind, TypeRef,
};

/// Enum definition entry.
#[derive(Debug, Clone, Deserialize)]
pub struct EnumEntry {
    pub name: String,
    #[serde(default)]
    pub variants: Vec<VariantEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariantEntry {
    pub name: String,
    pub value: i64,
}

/// Annotation entry on a property.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotationEntry {
    pub name: String,
    #[serde(default)]
    pub values: BTreeMap<String, serde_yaml::Value>,
}

/// Property entry on an interface or class.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub annotations: Vec<AnnotationEntry>,
    #[serde(default)]
    pub default: Option<String>,
}

/// Public field entry on a class.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// Interface contract entry.
#[derive(Debug, Clone, Deserialize)]
pub struct InterfaceEntry {
    pub name: String,
    #[serde(default)]
    pub generic_params: Vec<String>,
    #[serde(default)]
    pub extends: Vec<String>,
    #[serde(default)]
    pub methods: Vec<String>,
    #[serde(default)]
    pub properties: Vec<PropertyEntry>,
    #[serde(default)]
    pub internal: bool,
}

/// Class contract entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassEntry {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<PropertyEntry>,
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
    #[serde(default = "default_true")]
    pub default_ctor: bool,
    #[serde(default)]
    pub sealed: bool,
    #[serde(rename = "abstract", default)]
    pub is_abstract: bool,
}

fn default_true() -> bool {
    true
}

/// Complete contract file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractFile {
    pub namespace: String,
    #[serde(default)]
    pub enums: Vec<EnumEntry>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceEntry>,
    #[serde(default)]
    pub classes: Vec<ClassEntry>,
    #[serde(default)]
    pub roots: Vec<String>,
}

/// Contract file resolved into the descriptor model.
pub struct LoadedContracts {
    pub set: ContractSet,
    pub roots: Vec<TypeRef>,
    pub enums: Vec<Arc<EnumDef>>,
}

/// Load and resolve a contract file.
pub fn load(path: &Path) -> Result<LoadedContracts> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read contract file {}", path.display()))?;
    let file: ContractFile =
        serde_yaml::from_str(&content).context("Failed to parse contract file")?;
    resolve(&file)
}

/// Resolve a parsed contract file into a ContractSet plus roots.
pub fn resolve(file: &ContractFile) -> Result<LoadedContracts> {
    let ident = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("identifier pattern");
    let ns = file.namespace.as_str();

    let mut enums: HashMap<String, Arc<EnumDef>> = HashMap::new();
    let mut enum_list = Vec::new();
    for entry in &file.enums {
        if !ident.is_match(&entry.name) {
            bail!("invalid enum name '{}'", entry.name);
        }
        let def = Arc::new(
            EnumDef::new(file.namespace.clone(), entry.name.clone()).with_variants(
                entry
                    .variants
                    .iter()
                    .map(|v| EnumVariant::new(v.name.clone(), v.value))
                    .collect(),
            ),
        );
        enums.insert(def.full_name(), def.clone());
        enum_list.push(def);
    }

    let mut set = ContractSet::new();

    for entry in &file.interfaces {
        if !ident.is_match(&entry.name) {
            bail!("invalid interface name '{}'", entry.name);
        }
        let mut builder = InterfaceBuilder::new(file.namespace.clone(), entry.name.clone());
        if entry.internal {
            builder = builder.crate_visible();
        }
        for param in &entry.generic_params {
            builder = builder.generic_param(param.clone());
        }
        for ext in &entry.extends {
            let ty = parse_type_expr(ext, ns, &enums, &entry.generic_params)
                .with_context(|| format!("interface {}: extends {ext}", entry.name))?;
            builder = builder.extends_ref(ty);
        }
        for method in &entry.methods {
            builder = builder.method(method.clone());
        }
        for prop in &entry.properties {
            let ty = parse_type_expr(&prop.ty, ns, &enums, &entry.generic_params)
                .with_context(|| format!("interface {}: property {}", entry.name, prop.name))?;
            let annotations = prop
                .annotations
                .iter()
                .map(convert_annotation)
                .collect::<Result<Vec<_>>>()?;
            let mut def = wiremap::contract::PropertyDef::new(prop.name.clone(), ty)
                .with_annotations(annotations);
            if let Some(literal) = &prop.default {
                def = def.with_default(literal.clone());
            }
            builder = builder.property_def(def);
        }
        set.add(builder.build());
    }

    for entry in &file.classes {
        if !ident.is_match(&entry.name) {
            bail!("invalid class name '{}'", entry.name);
        }
        let mut builder = ClassBuilder::new(file.namespace.clone(), entry.name.clone());
        if !entry.default_ctor {
            builder = builder.no_default_ctor();
        }
        if entry.sealed {
            builder = builder.sealed();
        }
        if entry.is_abstract {
            builder = builder.abstract_class();
        }
        for prop in &entry.properties {
            let ty = parse_type_expr(&prop.ty, ns, &enums, &[])
                .with_context(|| format!("class {}: property {}", entry.name, prop.name))?;
            builder = match &prop.default {
                Some(literal) => builder.property_with_default(prop.name.clone(), ty, literal.clone()),
                None => builder.property(prop.name.clone(), ty),
            };
        }
        for field in &entry.fields {
            let ty = parse_type_expr(&field.ty, ns, &enums, &[])
                .with_context(|| format!("class {}: field {}", entry.name, field.name))?;
            builder = builder.field(field.name.clone(), ty);
        }
        set.add(builder.build());
    }

    let roots = file
        .roots
        .iter()
        .map(|r| parse_type_expr(r, ns, &enums, &[]).with_context(|| format!("root {r}")))
        .collect::<Result<Vec<_>>>()?;

    Ok(LoadedContracts {
        set,
        roots,
        enums: enum_list,
    })
}

fn convert_annotation(entry: &AnnotationEntry) -> Result<Annotation> {
    let mut ann = Annotation::new(entry.name.clone());
    for (key, value) in &entry.values {
        let converted = match value {
            serde_yaml::Value::Bool(b) => AnnotationValue::Bool(*b),
            serde_yaml::Value::Number(n) => {
                let Some(i) = n.as_i64() else {
                    bail!("annotation {}: parameter {key} must be an integer", entry.name);
                };
                AnnotationValue::Int(i)
            }
            serde_yaml::Value::String(s) => AnnotationValue::Text(s.clone()),
            other => bail!(
                "annotation {}: unsupported parameter value {:?}",
                entry.name,
                other
            ),
        };
        ann = ann.with(key.clone(), converted);
    }
    Ok(ann)
}

/// Parse a type expression.
///
/// Grammar: simple kind names (`bool`, `u32`, `string`, `uuid`, ...),
/// `seq<T>`, `map<K, V>`, `pair<K, V>`, contract or enum names (bare names
/// are qualified with `namespace`), bound generics `IHolder<T>`, and bare
/// generic parameter names from `params`.
pub fn parse_type_expr(
    expr: &str,
    namespace: &str,
    enums: &HashMap<String, Arc<EnumDef>>,
    params: &[String],
) -> Result<TypeRef> {
    let mut parser = ExprParser {
        chars: expr.char_indices().peekable(),
        src: expr,
        namespace,
    };
    let ty = parser.parse(enums, params)?;
    parser.skip_ws();
    if parser.chars.peek().is_some() {
        bail!("trailing input in type expression '{expr}'");
    }
    Ok(ty)
}

struct ExprParser<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    src: &'a str,
    namespace: &'a str,
}

impl ExprParser<'_> {
    fn skip_ws(&mut self) {
        while matches!(self.chars.peek(), Some((_, c)) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn parse_name(&mut self) -> Result<String> {
        self.skip_ws();
        let mut name = String::new();
        while let Some((_, c)) = self.chars.peek() {
            if c.is_alphanumeric() || *c == '_' || *c == '.' {
                name.push(*c);
                self.chars.next();
            } else {
                break;
            }
        }
        if name.is_empty() {
            bail!("expected a type name in '{}'", self.src);
        }
        Ok(name)
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        self.skip_ws();
        match self.chars.next() {
            Some((_, c)) if c == expected => Ok(()),
            _ => bail!("expected '{expected}' in '{}'", self.src),
        }
    }

    fn parse(
        &mut self,
        enums: &HashMap<String, Arc<EnumDef>>,
        params: &[String],
    ) -> Result<TypeRef> {
        let name = self.parse_name()?;

        // Builtin heads and parameters are always written without dots.
        if !name.contains('.') {
            if let Some(simple) = simple_kind(&name) {
                return Ok(TypeRef::Simple(simple));
            }
            match name.as_str() {
                "seq" => {
                    self.expect('<')?;
                    let elem = self.parse(enums, params)?;
                    self.expect('>')?;
                    return Ok(TypeRef::sequence(elem));
                }
                "map" | "pair" => {
                    let head = name.clone();
                    self.expect('<')?;
                    let key = self.parse(enums, params)?;
                    self.expect(',')?;
                    let value = self.parse(enums, params)?;
                    self.expect('>')?;
                    return Ok(if head == "map" {
                        TypeRef::map(key, value)
                    } else {
                        TypeRef::pair(key, value)
                    });
                }
                _ => {}
            }
            if params.iter().any(|p| p == &name) {
                return Ok(TypeRef::Param(name));
            }
        }

        let qualified = if name.contains('.') || self.namespace.is_empty() {
            name
        } else {
            format!("{}.{}", self.namespace, name)
        };

        if let Some(def) = enums.get(&qualified) {
            return Ok(TypeRef::Simple(SimpleKind::Enum(def.clone())));
        }

        self.skip_ws();
        if matches!(self.chars.peek(), Some((_, '<'))) {
            self.chars.next();
            let mut args = vec![self.parse(enums, params)?];
            loop {
                self.skip_ws();
                match self.chars.peek() {
                    Some((_, ',')) => {
                        self.chars.next();
                        args.push(self.parse(enums, params)?);
                    }
                    Some((_, '>')) => {
                        self.chars.next();
                        break;
                    }
                    _ => bail!("expected ',' or '>' in '{}'", self.src),
                }
            }
            return Ok(TypeRef::instance(qualified, args));
        }

        Ok(TypeRef::named(qualified))
    }
}

fn simple_kind(name: &str) -> Option<SimpleKind> {
    match name {
        "bool" => Some(SimpleKind::Bool),
        "u8" => Some(SimpleKind::U8),
        "u16" => Some(SimpleKind::U16),
        "u32" => Some(SimpleKind::U32),
        "u64" => Some(SimpleKind::U64),
        "i8" => Some(SimpleKind::I8),
        "i16" => Some(SimpleKind::I16),
        "i32" => Some(SimpleKind::I32),
        "i64" => Some(SimpleKind::I64),
        "f32" => Some(SimpleKind::F32),
        "f64" => Some(SimpleKind::F64),
        "decimal" => Some(SimpleKind::Decimal),
        "string" => Some(SimpleKind::String),
        "uuid" => Some(SimpleKind::Uuid),
        "timestamp" => Some(SimpleKind::Timestamp),
        "duration" => Some(SimpleKind::Duration),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_enums() -> HashMap<String, Arc<EnumDef>> {
        HashMap::new()
    }

    #[test]
    fn test_parse_simple_kinds() {
        assert_eq!(
            parse_type_expr("uuid", "", &no_enums(), &[]).unwrap(),
            TypeRef::Simple(SimpleKind::Uuid)
        );
        assert_eq!(
            parse_type_expr("decimal", "", &no_enums(), &[]).unwrap(),
            TypeRef::Simple(SimpleKind::Decimal)
        );
    }

    #[test]
    fn test_parse_collections() {
        assert_eq!(
            parse_type_expr("seq<shop.ILine>", "", &no_enums(), &[]).unwrap(),
            TypeRef::sequence(TypeRef::named("shop.ILine"))
        );
        assert_eq!(
            parse_type_expr("map<string, shop.ILine>", "", &no_enums(), &[]).unwrap(),
            TypeRef::map(TypeRef::Simple(SimpleKind::String), TypeRef::named("shop.ILine"))
        );
        assert_eq!(
            parse_type_expr("pair<string, u32>", "", &no_enums(), &[]).unwrap(),
            TypeRef::pair(TypeRef::Simple(SimpleKind::String), TypeRef::Simple(SimpleKind::U32))
        );
    }

    #[test]
    fn test_parse_qualifies_bare_names() {
        assert_eq!(
            parse_type_expr("ILine", "shop.orders", &no_enums(), &[]).unwrap(),
            TypeRef::named("shop.orders.ILine")
        );
    }

    #[test]
    fn test_parse_bound_generic_and_param() {
        let params = vec!["T".to_string()];
        assert_eq!(
            parse_type_expr("T", "shop", &no_enums(), &params).unwrap(),
            TypeRef::Param("T".into())
        );
        assert_eq!(
            parse_type_expr("shop.IHolder<seq<T>>", "shop", &no_enums(), &params).unwrap(),
            TypeRef::instance(
                "shop.IHolder",
                vec![TypeRef::sequence(TypeRef::Param("T".into()))]
            )
        );
    }

    #[test]
    fn test_parse_rejects_trailing_garbage() {
        assert!(parse_type_expr("uuid>", "", &no_enums(), &[]).is_err());
        assert!(parse_type_expr("seq<", "", &no_enums(), &[]).is_err());
    }

    #[test]
    fn test_resolve_minimal_file() {
        let yaml = r#"
namespace: shop.orders
enums:
  - name: Status
    variants:
      - { name: Placed, value: 0 }
      - { name: Shipped, value: 1 }
interfaces:
  - name: IOrder
    properties:
      - { name: id, type: uuid }
      - { name: status, type: Status }
      - { name: lines, type: seq<shop.orders.IOrderLine> }
  - name: IOrderLine
    properties:
      - { name: sku, type: string }
roots:
  - IOrder
"#;
        let file: ContractFile = serde_yaml::from_str(yaml).expect("parse yaml");
        let loaded = resolve(&file).expect("resolve");
        assert_eq!(loaded.set.len(), 2);
        assert_eq!(loaded.roots, vec![TypeRef::named("shop.orders.IOrder")]);
        let order = loaded.set.get("shop.orders.IOrder").expect("IOrder");
        assert!(matches!(
            order.property("status").map(|p| &p.ty),
            Some(TypeRef::Simple(SimpleKind::Enum(_)))
        ));
    }
}

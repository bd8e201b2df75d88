//! Declaration-centric documentation model.
//!
//! Maps are ordered by key so JSON output is stable; declaration order lives
//! in the accompanying name lists.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whole package: the union of its files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Per-file views keyed by path
    #[serde(skip)]
    pub files: BTreeMap<String, File>,
    pub interfaces: BTreeMap<String, Object>,
    pub functions: BTreeMap<String, Func>,
    pub types: BTreeMap<String, Object>,
    #[serde(rename = "filenames")]
    pub file_names: Vec<String>,
    /// Every declared name, in first-seen order
    pub names: Vec<String>,
}

/// One source file's declarations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub interfaces: BTreeMap<String, Object>,
    pub functions: BTreeMap<String, Func>,
    pub types: BTreeMap<String, Object>,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Struct,
    Interface,
}

/// Struct, interface or other named type, top-level or nested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Object {
    /// Dotted path for nested literals, e.g. `Outer.Inner`
    pub name: String,
    /// `None` for definitions without a struct/interface body
    #[serde(skip)]
    pub kind: Option<ObjectKind>,
    /// Name of the enclosing Object, for nested literals
    #[serde(skip)]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, Field>,
    #[serde(
        rename = "fieldnames",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub field_names: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub methods: BTreeMap<String, Func>,
    #[serde(
        rename = "methodnames",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub method_names: Vec<String>,
    pub doc: String,
    pub comment: String,
}

/// Struct field, interface member, parameter or result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Declared name; empty for unnamed parameters and anonymous literals
    pub name: String,
    pub embedded: bool,
    /// Inline struct/interface literal this field declares
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anonymous: Option<Box<Object>>,
    pub doc: String,
    pub comment: String,
}

/// Function or method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Func {
    pub name: String,
    /// Receiver type name without pointer marker; empty for functions
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub recv: String,
    pub params: BTreeMap<String, Field>,
    #[serde(rename = "paramnames")]
    pub param_names: Vec<String>,
    pub returns: BTreeMap<String, Field>,
    #[serde(rename = "returnnames")]
    pub return_names: Vec<String>,
    pub doc: String,
}

impl Package {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `file` under `path` and union its declarations into the
    /// package. Later files overwrite earlier entries with the same name.
    pub fn add_file(&mut self, path: impl Into<String>, file: File) {
        let path = path.into();
        for name in &file.names {
            if !self.names.contains(name) {
                self.names.push(name.clone());
            }
        }
        self.interfaces.extend(
            file.interfaces
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        self.functions
            .extend(file.functions.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.types
            .extend(file.types.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.file_names.push(path.clone());
        self.files.insert(path, file);
    }

    /// Struct or interface Object by (dotted) name.
    pub fn object(&self, name: &str) -> Option<&Object> {
        self.types.get(name).or_else(|| self.interfaces.get(name))
    }

    /// Enclosing Object of a nested literal.
    pub fn parent_of(&self, object: &Object) -> Option<&Object> {
        object.parent.as_deref().and_then(|name| self.object(name))
    }

    pub fn file(&self, path: &str) -> Option<&File> {
        self.files.get(path)
    }

    /// True when `name` is a key of exactly one declaration map.
    pub fn resolves(&self, name: &str) -> bool {
        let hits = [
            self.types.contains_key(name),
            self.interfaces.contains_key(name),
            self.functions.contains_key(name),
        ];
        hits.iter().filter(|hit| **hit).count() == 1
    }
}

impl File {
    pub fn new() -> Self {
        Self::default()
    }

    /// Struct or interface Object by (dotted) name.
    pub fn object(&self, name: &str) -> Option<&Object> {
        self.types.get(name).or_else(|| self.interfaces.get(name))
    }

    /// Enclosing Object of a nested literal.
    pub fn parent_of(&self, object: &Object) -> Option<&Object> {
        object.parent.as_deref().and_then(|name| self.object(name))
    }

    /// True when `name` is a key of exactly one declaration map.
    pub fn resolves(&self, name: &str) -> bool {
        let hits = [
            self.types.contains_key(name),
            self.interfaces.contains_key(name),
            self.functions.contains_key(name),
        ];
        hits.iter().filter(|hit| **hit).count() == 1
    }
}

impl Object {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Insert a member, keeping `field_names` free of duplicates.
    pub fn push_field(&mut self, id: String, field: Field) {
        if self.fields.insert(id.clone(), field).is_none() {
            self.field_names.push(id);
        }
    }

    /// Insert a merged method under its bare name.
    pub fn push_method(&mut self, method: Func) {
        let name = method.name.clone();
        if self.methods.insert(name.clone(), method).is_none() {
            self.method_names.push(name);
        }
    }
}

impl Func {
    pub fn is_method(&self) -> bool {
        !self.recv.is_empty()
    }
}

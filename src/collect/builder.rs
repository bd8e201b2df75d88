//! Package assembly: union of files, method merge, visibility filter.

use std::collections::BTreeMap;

use super::render::base_name;
use super::{Field, File, Func, Object, Package};
use crate::config::CollectConfig;

/// Builds the final [`Package`] from collected files.
///
/// `build` runs the method merge before the visibility filter, on the
/// package and on each per-file view.
#[derive(Debug, Clone)]
pub struct PackageBuilder {
    package: Package,
    merge_methods: bool,
    include_unexported: bool,
    dot: String,
    sharp: String,
}

impl PackageBuilder {
    pub fn new(config: &CollectConfig) -> Self {
        Self::with_package(Package::new(), config)
    }

    /// Continue from a package already holding collected files.
    pub fn with_package(package: Package, config: &CollectConfig) -> Self {
        Self {
            package,
            merge_methods: config.merge_methods,
            include_unexported: config.include_unexported,
            dot: config.nested_separator.clone(),
            sharp: config.receiver_separator.clone(),
        }
    }

    pub fn add_file(&mut self, file: File, path: impl Into<String>) -> &mut Self {
        self.package.add_file(path, file);
        self
    }

    pub fn build(self) -> Package {
        let mut package = self.package;
        let mut views = Views {
            interfaces: &mut package.interfaces,
            functions: &mut package.functions,
            types: &mut package.types,
            names: &mut package.names,
        };
        if self.merge_methods {
            merge_methods(&mut views, &self.sharp);
        }
        if !self.include_unexported {
            filter_exported(&mut views, &self.dot, &self.sharp);
        }

        for file in package.files.values_mut() {
            let mut views = Views {
                interfaces: &mut file.interfaces,
                functions: &mut file.functions,
                types: &mut file.types,
                names: &mut file.names,
            };
            if self.merge_methods {
                merge_methods(&mut views, &self.sharp);
            }
            if !self.include_unexported {
                filter_exported(&mut views, &self.dot, &self.sharp);
            }
        }
        package
    }
}

/// The declaration maps shared by [`Package`] and [`File`].
struct Views<'a> {
    interfaces: &'a mut BTreeMap<String, Object>,
    functions: &'a mut BTreeMap<String, Func>,
    types: &'a mut BTreeMap<String, Object>,
    names: &'a mut Vec<String>,
}

/// Move every `Recv#Name` function into the Object named `Recv`.
///
/// Methods whose receiver was never collected as a type stay in `functions`
/// and keep their `Recv#Name` entry in `names`, so every name still resolves.
fn merge_methods(views: &mut Views<'_>, sharp: &str) {
    let mut names = Vec::with_capacity(views.names.len());
    for name in views.names.drain(..) {
        if !name.contains(sharp) || !views.functions.contains_key(&name) {
            names.push(name);
            continue;
        }
        let receiver = views.functions[&name].recv.trim_start_matches('*').to_string();
        match views.types.get_mut(&receiver) {
            Some(object) => {
                if let Some(method) = views.functions.remove(&name) {
                    object.push_method(method);
                }
            }
            None => {
                tracing::debug!("no type {receiver} for method {name}, keeping it as a function");
                names.push(name);
            }
        }
    }
    *views.names = names;
}

/// Go's export rule: the first character is an upper-case letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Drop every unexported name, entry, member and merged method.
fn filter_exported(views: &mut Views<'_>, dot: &str, sharp: &str) {
    views.types.retain(|name, _| nested_visible(name, dot));
    views.interfaces.retain(|name, _| nested_visible(name, dot));
    views.functions.retain(|name, _| match name.split_once(sharp) {
        Some((recv, method)) => is_exported(recv) && is_exported(method),
        None => is_exported(name),
    });

    for object in views.types.values_mut().chain(views.interfaces.values_mut()) {
        filter_object(object);
    }

    let (types, interfaces, functions) = (&*views.types, &*views.interfaces, &*views.functions);
    views.names.retain(|name| {
        types.contains_key(name) || interfaces.contains_key(name) || functions.contains_key(name)
    });
}

fn nested_visible(name: &str, dot: &str) -> bool {
    name.split(dot).all(segment_visible)
}

/// A dotted segment is visible when exported or a synthetic `anon#<i>` id.
fn segment_visible(segment: &str) -> bool {
    segment.starts_with("anon#") || is_exported(segment)
}

fn member_visible(id: &str, field: &Field) -> bool {
    if !field.embedded {
        return is_exported(id);
    }
    // embedded members are judged by the type they embed
    field.name.is_empty() || is_exported(base_name(&field.name))
}

fn filter_object(object: &mut Object) {
    object.fields.retain(|id, field| member_visible(id, field));
    let fields = &object.fields;
    object.field_names.retain(|id| fields.contains_key(id));

    object.methods.retain(|name, _| is_exported(name));
    let methods = &object.methods;
    object.method_names.retain(|name| methods.contains_key(name));

    for field in object.fields.values_mut() {
        if let Some(nested) = field.anonymous.as_deref_mut() {
            filter_object(nested);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(name: &str, fields: &[(&str, bool)]) -> Object {
        let mut object = Object::new(name);
        for (id, embedded) in fields {
            object.push_field(
                id.to_string(),
                Field {
                    name: if id.starts_with("anon#") {
                        String::new()
                    } else {
                        id.to_string()
                    },
                    embedded: *embedded,
                    ..Field::default()
                },
            );
        }
        object
    }

    fn method(recv: &str, name: &str) -> Func {
        Func {
            name: name.to_string(),
            recv: recv.to_string(),
            ..Func::default()
        }
    }

    fn file_with(types: Vec<Object>, funcs: Vec<(&str, Func)>) -> File {
        let mut file = File::new();
        for object in types {
            file.names.push(object.name.clone());
            file.types.insert(object.name.clone(), object);
        }
        for (id, func) in funcs {
            file.names.push(id.to_string());
            file.functions.insert(id.to_string(), func);
        }
        file
    }

    fn build(file: File, config: CollectConfig) -> Package {
        let mut builder = PackageBuilder::new(&config);
        builder.add_file(file, "x.go");
        builder.build()
    }

    #[test]
    fn test_methods_move_into_receiver_object() {
        let file = file_with(
            vec![object("Ob", &[])],
            vec![
                ("Ob#Name", method("Ob", "Name")),
                ("Ob#MarshalJSON", method("Ob", "MarshalJSON")),
            ],
        );
        let package = build(file, CollectConfig::default());

        assert_eq!(package.names, vec!["Ob"]);
        assert!(package.functions.is_empty());
        assert_eq!(package.types["Ob"].method_names, vec!["Name", "MarshalJSON"]);
        // the per-file view is merged the same way
        assert_eq!(package.files["x.go"].types["Ob"].methods.len(), 2);
    }

    #[test]
    fn test_orphaned_method_stays_a_function() {
        let file = file_with(Vec::new(), vec![("Missing#Do", method("Missing", "Do"))]);
        let package = build(file, CollectConfig::default());

        assert_eq!(package.names, vec!["Missing#Do"]);
        assert!(package.functions.contains_key("Missing#Do"));
    }

    #[test]
    fn test_merge_disabled_keeps_keys() {
        let file = file_with(vec![object("Ob", &[])], vec![("Ob#Name", method("Ob", "Name"))]);
        let config = CollectConfig {
            merge_methods: false,
            ..CollectConfig::default()
        };
        let package = build(file, config);

        assert!(package.functions.contains_key("Ob#Name"));
        assert!(package.types["Ob"].methods.is_empty());
    }

    #[test]
    fn test_visibility_filter_applies_transitively() {
        let mut outer = object("S", &[("Exported", false), ("hidden", false)]);
        let mut nested = object("S.Exported", &[("X", false), ("y", false)]);
        nested.parent = Some("S".to_string());
        if let Some(field) = outer.fields.get_mut("Exported") {
            field.anonymous = Some(Box::new(nested.clone()));
        }
        let hidden_nested = object("S.hidden", &[("Z", false)]);
        let file = file_with(
            vec![
                outer,
                nested,
                hidden_nested,
                object("lower", &[]),
                object("Emb", &[("*io.Reader", true), ("*base", true), ("anon#2", true)]),
            ],
            vec![
                ("F", Func { name: "F".into(), ..Func::default() }),
                ("f", Func { name: "f".into(), ..Func::default() }),
                ("lower#Do", method("lower", "Do")),
            ],
        );
        let package = build(file, CollectConfig::default());

        assert_eq!(package.names, vec!["S", "S.Exported", "Emb", "F"]);
        assert_eq!(package.types["S"].field_names, vec!["Exported"]);
        assert_eq!(package.types["S.Exported"].field_names, vec!["X"]);
        let owned = package.types["S"].fields["Exported"].anonymous.as_deref().unwrap();
        assert_eq!(owned.field_names, vec!["X"]);
        assert_eq!(package.types["Emb"].field_names, vec!["*io.Reader", "anon#2"]);
        assert!(!package.functions.contains_key("lower#Do"));

        let file = &package.files["x.go"];
        assert_eq!(file.names, package.names);
    }

    #[test]
    fn test_include_unexported_keeps_everything() {
        let file = file_with(vec![object("lower", &[("x", false)])], Vec::new());
        let config = CollectConfig {
            include_unexported: true,
            ..CollectConfig::default()
        };
        let package = build(file, config);

        assert_eq!(package.names, vec!["lower"]);
        assert_eq!(package.types["lower"].field_names, vec!["x"]);
    }

    #[test]
    fn test_is_exported() {
        assert!(is_exported("Foo"));
        assert!(is_exported("Ünicode"));
        assert!(!is_exported("foo"));
        assert!(!is_exported("_Foo"));
        assert!(!is_exported(""));
    }
}

//! Display names for type expressions.

use crate::syntax::Expr;

/// Render a type expression as the name used for embedded members and
/// receivers.
///
/// Named references render as written (`Foo`, `pkg.Foo`, `*Foo`), generic
/// instantiations as their base type, and inline struct/interface literals
/// as the empty string. Anything else has no display name.
pub fn type_string(typ: &Expr) -> Option<String> {
    match typ {
        Expr::Ident(ident) => Some(ident.name.clone()),
        Expr::Selector { x, sel, .. } => Some(format!("{}.{}", type_string(x)?, sel.name)),
        Expr::Star { x, .. } => Some(format!("*{}", type_string(x)?)),
        Expr::Index { x, .. } | Expr::Paren { x, .. } => type_string(x),
        Expr::Struct(_) | Expr::Interface(_) => Some(String::new()),
        _ => None,
    }
}

/// Receiver type name with one pointer marker removed.
pub(crate) fn receiver_name(typ: &Expr) -> Option<String> {
    match typ {
        Expr::Star { x, .. } => type_string(x),
        Expr::Paren { x, .. } => receiver_name(x),
        other => type_string(other),
    }
}

/// Last dotted segment with pointer markers stripped: `*pkg.Foo` -> `Foo`.
pub(crate) fn base_name(name: &str) -> &str {
    let name = name.trim_start_matches('*');
    name.rsplit('.').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Ident;
    use crate::types::Span;

    fn ident(name: &str) -> Expr {
        Expr::ident(name, Span::default())
    }

    fn star(x: Expr) -> Expr {
        Expr::Star {
            span: Span::default(),
            x: Box::new(x),
        }
    }

    #[test]
    fn test_named_references() {
        let selector = Expr::Selector {
            span: Span::default(),
            x: Box::new(ident("io")),
            sel: Ident::new("Reader", Span::default()),
        };
        assert_eq!(type_string(&ident("Foo")).as_deref(), Some("Foo"));
        assert_eq!(type_string(&selector).as_deref(), Some("io.Reader"));
        assert_eq!(type_string(&star(selector)).as_deref(), Some("*io.Reader"));
    }

    #[test]
    fn test_unrenderable_shapes() {
        let map = Expr::Map {
            span: Span::default(),
            key: Box::new(ident("string")),
            value: Box::new(ident("int")),
        };
        let union = Expr::Union {
            span: Span::default(),
            terms: vec![ident("int"), ident("string")],
        };
        assert_eq!(type_string(&map), None);
        assert_eq!(type_string(&union), None);
    }

    #[test]
    fn test_receiver_strips_one_pointer_and_type_arguments() {
        let generic = Expr::Index {
            span: Span::default(),
            x: Box::new(ident("List")),
            args: vec![ident("T")],
        };
        assert_eq!(receiver_name(&star(generic)).as_deref(), Some("List"));
        assert_eq!(receiver_name(&ident("Ob")).as_deref(), Some("Ob"));
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("*pkg.Foo"), "Foo");
        assert_eq!(base_name("bar"), "bar");
        assert_eq!(base_name(""), "");
    }
}

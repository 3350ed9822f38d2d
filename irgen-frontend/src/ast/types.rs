//! Type expressions
//!
//! `Display` renders a type the way gofmt prints it on a single line, which
//! is how the emitter writes field and parameter types back out.

use super::{InterfaceElement, ParamGroup};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeExpr {
    /// `T`, `pkg.T`, `T[A, B]`
    Named {
        package: Option<String>,
        name: String,
        args: Vec<TypeExpr>,
    },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    /// Length kept as source text
    Array { len: String, elem: Box<TypeExpr> },
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    Chan { dir: ChanDir, elem: Box<TypeExpr> },
    Func {
        params: Vec<ParamGroup>,
        results: Vec<ParamGroup>,
    },
    /// `...T`, last parameter only
    Variadic(Box<TypeExpr>),
    Interface(Vec<InterfaceElement>),
    Struct(Vec<StructField>),
    /// `A | B` inside an interface
    Union(Vec<TypeExpr>),
    /// `~T`
    Approx(Box<TypeExpr>),
}

/// Field of an inline struct type; embedded fields have no names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructField {
    pub names: Vec<String>,
    pub ty: TypeExpr,
    /// Tag as written, quotes included
    pub tag: Option<String>,
}

impl TypeExpr {
    pub fn ident(name: &str) -> Self {
        TypeExpr::Named {
            package: None,
            name: name.to_string(),
            args: Vec::new(),
        }
    }

    pub fn qualified(package: &str, name: &str) -> Self {
        TypeExpr::Named {
            package: Some(package.to_string()),
            name: name.to_string(),
            args: Vec::new(),
        }
    }

    /// The name, if this is a bare unqualified identifier
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            TypeExpr::Named {
                package: None,
                name,
                args,
            } if args.is_empty() => Some(name.as_str()),
            _ => None,
        }
    }

    /// Collect every package qualifier mentioned in this type, in order
    pub fn collect_qualifiers(&self, out: &mut Vec<String>) {
        match self {
            TypeExpr::Named { package, args, .. } => {
                if let Some(package) = package {
                    if !out.contains(package) {
                        out.push(package.clone());
                    }
                }
                for arg in args {
                    arg.collect_qualifiers(out);
                }
            }
            TypeExpr::Pointer(elem)
            | TypeExpr::Slice(elem)
            | TypeExpr::Variadic(elem)
            | TypeExpr::Approx(elem)
            | TypeExpr::Array { elem, .. }
            | TypeExpr::Chan { elem, .. } => elem.collect_qualifiers(out),
            TypeExpr::Map { key, value } => {
                key.collect_qualifiers(out);
                value.collect_qualifiers(out);
            }
            TypeExpr::Func { params, results } => {
                for group in params.iter().chain(results) {
                    group.ty.collect_qualifiers(out);
                }
            }
            TypeExpr::Interface(elements) => {
                for element in elements {
                    match element {
                        InterfaceElement::Method(method) => {
                            for group in method.params.iter().chain(&method.results) {
                                group.ty.collect_qualifiers(out);
                            }
                        }
                        InterfaceElement::Embedded(ty) => ty.collect_qualifiers(out),
                    }
                }
            }
            TypeExpr::Struct(fields) => {
                for field in fields {
                    field.ty.collect_qualifiers(out);
                }
            }
            TypeExpr::Union(terms) => {
                for term in terms {
                    term.collect_qualifiers(out);
                }
            }
        }
    }
}

/// Write `(params) results` as gofmt does
pub fn write_signature(
    f: &mut fmt::Formatter<'_>,
    params: &[ParamGroup],
    results: &[ParamGroup],
) -> fmt::Result {
    write!(f, "({})", join(params, ", "))?;
    match results {
        [] => Ok(()),
        [single] if single.names.is_empty() => write!(f, " {}", single.ty),
        _ => write!(f, " ({})", join(results, ", ")),
    }
}

fn join<T: fmt::Display>(items: &[T], separator: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named {
                package,
                name,
                args,
            } => {
                if let Some(package) = package {
                    write!(f, "{package}.")?;
                }
                write!(f, "{name}")?;
                if !args.is_empty() {
                    write!(f, "[{}]", join(args, ", "))?;
                }
                Ok(())
            }
            TypeExpr::Pointer(elem) => write!(f, "*{elem}"),
            TypeExpr::Slice(elem) => write!(f, "[]{elem}"),
            TypeExpr::Array { len, elem } => write!(f, "[{len}]{elem}"),
            TypeExpr::Map { key, value } => write!(f, "map[{key}]{value}"),
            TypeExpr::Chan { dir, elem } => match dir {
                // `chan <-chan T` would read as `chan<- (chan T)`
                ChanDir::Both if matches!(**elem, TypeExpr::Chan { dir: ChanDir::Recv, .. }) => {
                    write!(f, "chan ({elem})")
                }
                ChanDir::Both => write!(f, "chan {elem}"),
                ChanDir::Send => write!(f, "chan<- {elem}"),
                ChanDir::Recv => write!(f, "<-chan {elem}"),
            },
            TypeExpr::Func { params, results } => {
                write!(f, "func")?;
                write_signature(f, params, results)
            }
            TypeExpr::Variadic(elem) => write!(f, "...{elem}"),
            TypeExpr::Interface(elements) if elements.is_empty() => write!(f, "interface{{}}"),
            TypeExpr::Interface(elements) => write!(f, "interface{{ {} }}", join(elements, "; ")),
            TypeExpr::Struct(fields) if fields.is_empty() => write!(f, "struct{{}}"),
            TypeExpr::Struct(fields) => write!(f, "struct{{ {} }}", join(fields, "; ")),
            TypeExpr::Union(terms) => write!(f, "{}", join(terms, " | ")),
            TypeExpr::Approx(elem) => write!(f, "~{elem}"),
        }
    }
}

impl fmt::Display for StructField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.names.is_empty() {
            write!(f, "{} ", self.names.join(", "))?;
        }
        write!(f, "{}", self.ty)?;
        if let Some(tag) = &self.tag {
            write!(f, " {tag}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_composite_types() {
        let ty = TypeExpr::Map {
            key: Box::new(TypeExpr::ident("string")),
            value: Box::new(TypeExpr::Slice(Box::new(TypeExpr::Pointer(Box::new(
                TypeExpr::qualified("time", "Time"),
            ))))),
        };
        assert_eq!(ty.to_string(), "map[string][]*time.Time");
    }

    #[test]
    fn test_render_channels() {
        let elem = Box::new(TypeExpr::ident("int"));
        let recv = TypeExpr::Chan { dir: ChanDir::Recv, elem: elem.clone() };
        let send = TypeExpr::Chan { dir: ChanDir::Send, elem: elem.clone() };
        let both = TypeExpr::Chan { dir: ChanDir::Both, elem };
        assert_eq!(recv.to_string(), "<-chan int");
        assert_eq!(send.to_string(), "chan<- int");
        assert_eq!(both.to_string(), "chan int");
    }

    #[test]
    fn test_render_channel_of_receive_channel() {
        let recv = TypeExpr::Chan { dir: ChanDir::Recv, elem: Box::new(TypeExpr::ident("int")) };
        let both = TypeExpr::Chan { dir: ChanDir::Both, elem: Box::new(recv.clone()) };
        let send = TypeExpr::Chan { dir: ChanDir::Send, elem: Box::new(recv.clone()) };
        let nested = TypeExpr::Chan { dir: ChanDir::Recv, elem: Box::new(recv) };
        assert_eq!(both.to_string(), "chan (<-chan int)");
        assert_eq!(send.to_string(), "chan<- <-chan int");
        assert_eq!(nested.to_string(), "<-chan <-chan int");
    }

    #[test]
    fn test_render_func_results() {
        let single = TypeExpr::Func {
            params: vec![ParamGroup::unnamed(TypeExpr::ident("int"))],
            results: vec![ParamGroup::unnamed(TypeExpr::ident("error"))],
        };
        assert_eq!(single.to_string(), "func(int) error");

        let named = TypeExpr::Func {
            params: vec![],
            results: vec![ParamGroup::named(&["n", "m"], TypeExpr::ident("int"))],
        };
        assert_eq!(named.to_string(), "func() (n, m int)");
    }

    #[test]
    fn test_render_empty_inline_types() {
        assert_eq!(TypeExpr::Interface(vec![]).to_string(), "interface{}");
        assert_eq!(TypeExpr::Struct(vec![]).to_string(), "struct{}");
    }

    #[test]
    fn test_render_inline_struct() {
        let ty = TypeExpr::Struct(vec![
            StructField {
                names: vec!["X".to_string(), "Y".to_string()],
                ty: TypeExpr::ident("int"),
                tag: Some("`json:\"xy\"`".to_string()),
            },
            StructField {
                names: vec![],
                ty: TypeExpr::ident("Base"),
                tag: None,
            },
        ]);
        assert_eq!(ty.to_string(), "struct{ X, Y int `json:\"xy\"`; Base }");
    }

    #[test]
    fn test_collect_qualifiers_dedups_in_order() {
        let ty = TypeExpr::Func {
            params: vec![ParamGroup::unnamed(TypeExpr::qualified("io", "Reader"))],
            results: vec![
                ParamGroup::unnamed(TypeExpr::qualified("time", "Duration")),
                ParamGroup::unnamed(TypeExpr::qualified("io", "Writer")),
            ],
        };
        let mut qualifiers = Vec::new();
        ty.collect_qualifiers(&mut qualifiers);
        assert_eq!(qualifiers, vec!["io".to_string(), "time".to_string()]);
    }

    #[test]
    fn test_as_ident() {
        assert_eq!(TypeExpr::ident("ExprConsumer").as_ident(), Some("ExprConsumer"));
        assert_eq!(TypeExpr::qualified("pkg", "ExprConsumer").as_ident(), None);
        assert_eq!(TypeExpr::Pointer(Box::new(TypeExpr::ident("C"))).as_ident(), None);
    }
}

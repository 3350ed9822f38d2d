//! Declaration AST for the Go subset irgen reads
//!
//! Only what can hold a composite/consumer pair is modelled in detail:
//! interface types and the type expressions their methods mention. Every
//! other type declaration is kept as an opaque `TypeKind::Other`.

pub mod types;

pub use types::{write_signature, ChanDir, StructField, TypeExpr};

use irgen_common::{SourceLocation, SourceSpan};
use serde::{Deserialize, Serialize};
use std::fmt;

/// All files of one package in one directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceUnit {
    pub package: String,
    pub files: Vec<SourceFile>,
}

impl SourceUnit {
    /// Type declarations of every file, in file order
    pub fn type_declarations(&self) -> impl Iterator<Item = &TypeDeclaration> {
        self.files.iter().flat_map(|file| file.declarations.iter())
    }

    /// Imports of every file, in file order
    pub fn imports(&self) -> impl Iterator<Item = &ImportSpec> {
        self.files.iter().flat_map(|file| file.imports.iter())
    }
}

/// One parsed `.go` file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    pub package: String,
    pub imports: Vec<ImportSpec>,
    pub declarations: Vec<TypeDeclaration>,
}

/// `import name "path"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSpec {
    /// Explicit package name, `.` or `_`
    pub name: Option<String>,
    pub path: String,
    pub span: SourceSpan,
}

impl ImportSpec {
    /// The identifier this import binds in the importing file, if any
    pub fn binding(&self) -> Option<&str> {
        match self.name.as_deref() {
            Some(".") | Some("_") => None,
            Some(name) => Some(name),
            None => Some(assumed_package_name(&self.path)),
        }
    }
}

/// Package name goimports assumes for an unaliased import: the last path
/// element, skipping a `/vN` major version, with a `go-` prefix and
/// anything after the first non-identifier character removed
fn assumed_package_name(path: &str) -> &str {
    let mut elements = path.rsplit('/');
    let mut base = elements.next().unwrap_or(path);
    if is_major_version(base) {
        if let Some(parent) = elements.next() {
            base = parent;
        }
    }
    let base = base.strip_prefix("go-").unwrap_or(base);
    match base.find(|ch: char| !(ch.is_alphanumeric() || ch == '_')) {
        Some(end) => &base[..end],
        None => base,
    }
}

fn is_major_version(element: &str) -> bool {
    element
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|ch| ch.is_ascii_digit()))
}

impl fmt::Display for ImportSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name} ")?;
        }
        write!(f, "\"{}\"", self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,
    pub kind: TypeKind,
    pub span: SourceSpan,
}

impl TypeDeclaration {
    pub fn location(&self) -> &SourceLocation {
        &self.span.start
    }

    pub fn interface_elements(&self) -> Option<&[InterfaceElement]> {
        match &self.kind {
            TypeKind::Interface(elements) => Some(elements),
            TypeKind::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeKind {
    Interface(Vec<InterfaceElement>),
    /// Anything else; holds a short description such as `struct` or `alias`
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InterfaceElement {
    Method(MethodSignature),
    /// Embedded interface or type-set term
    Embedded(TypeExpr),
}

impl fmt::Display for InterfaceElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceElement::Method(method) => write!(f, "{method}"),
            InterfaceElement::Embedded(ty) => write!(f, "{ty}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: String,
    pub params: Vec<ParamGroup>,
    pub results: Vec<ParamGroup>,
    pub span: SourceSpan,
}

impl MethodSignature {
    pub fn location(&self) -> &SourceLocation {
        &self.span.start
    }

    /// Number of parameters, counted the way Go counts fields
    pub fn param_count(&self) -> usize {
        field_count(&self.params)
    }

    pub fn result_count(&self) -> usize {
        field_count(&self.results)
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        types::write_signature(f, &self.params, &self.results)
    }
}

/// Names sharing one type: `Left, Right Expr`. No names means unnamed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamGroup {
    pub names: Vec<String>,
    pub ty: TypeExpr,
}

impl ParamGroup {
    pub fn named(names: &[&str], ty: TypeExpr) -> Self {
        Self {
            names: names.iter().map(|name| name.to_string()).collect(),
            ty,
        }
    }

    pub fn unnamed(ty: TypeExpr) -> Self {
        Self { names: Vec::new(), ty }
    }
}

impl fmt::Display for ParamGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.names.is_empty() {
            write!(f, "{}", self.ty)
        } else {
            write!(f, "{} {}", self.names.join(", "), self.ty)
        }
    }
}

/// A group counts once when unnamed, once per name otherwise
pub fn field_count(groups: &[ParamGroup]) -> usize {
    groups.iter().map(|group| group.names.len().max(1)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import(name: Option<&str>, path: &str) -> ImportSpec {
        ImportSpec {
            name: name.map(str::to_string),
            path: path.to_string(),
            span: SourceSpan::dummy(),
        }
    }

    #[test]
    fn test_import_binding() {
        assert_eq!(import(None, "time").binding(), Some("time"));
        assert_eq!(import(None, "github.com/pkg/errors").binding(), Some("errors"));
        assert_eq!(import(Some("pe"), "github.com/pkg/errors").binding(), Some("pe"));
        assert_eq!(import(Some("_"), "embed").binding(), None);
        assert_eq!(import(Some("."), "math").binding(), None);
    }

    #[test]
    fn test_import_binding_versioned_paths() {
        assert_eq!(import(None, "github.com/x/y/v2").binding(), Some("y"));
        assert_eq!(import(None, "gopkg.in/yaml.v3").binding(), Some("yaml"));
        assert_eq!(import(None, "github.com/mattn/go-sqlite3").binding(), Some("sqlite3"));
        assert_eq!(import(None, "github.com/vmihailenco/msgpack/v5").binding(), Some("msgpack"));
        assert_eq!(import(None, "v2").binding(), Some("v2"));
        assert_eq!(import(None, "example.com/vtable").binding(), Some("vtable"));
    }

    #[test]
    fn test_field_count() {
        let groups = vec![
            ParamGroup::named(&["Left", "Right"], TypeExpr::ident("Expr")),
            ParamGroup::unnamed(TypeExpr::ident("int")),
        ];
        assert_eq!(field_count(&groups), 3);
        assert_eq!(field_count(&[]), 0);
    }

    #[test]
    fn test_method_display() {
        let method = MethodSignature {
            name: "Add".to_string(),
            params: vec![ParamGroup::named(&["Left", "Right"], TypeExpr::ident("Expr"))],
            results: vec![],
            span: SourceSpan::dummy(),
        };
        assert_eq!(method.to_string(), "Add(Left, Right Expr)");
    }
}

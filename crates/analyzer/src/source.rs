use crate::error::{AnalyzerError, Result};
use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

/// Kind of a class-like Java declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
}

impl TypeKind {
    fn from_node_kind(kind: &str) -> Option<Self> {
        match kind {
            "class_declaration" => Some(Self::Class),
            "interface_declaration" => Some(Self::Interface),
            "enum_declaration" => Some(Self::Enum),
            "record_declaration" => Some(Self::Record),
            _ => None,
        }
    }
}

/// Reusable tree-sitter parser configured for Java
pub struct JavaParser {
    parser: Parser,
}

impl JavaParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        let language: tree_sitter::Language = tree_sitter_java::LANGUAGE.into();
        parser.set_language(&language)?;
        Ok(Self { parser })
    }

    /// Parse source text. Syntax errors are recovered by tree-sitter and the
    /// partial tree is still returned.
    pub fn parse(&mut self, text: impl Into<String>) -> Result<JavaSource> {
        let text = text.into();
        let tree = self
            .parser
            .parse(&text, None)
            .ok_or_else(|| AnalyzerError::ParseError("Java source".to_string()))?;
        Ok(JavaSource { text, tree })
    }

    pub fn parse_file(&mut self, path: &Path) -> Result<JavaSource> {
        let text = std::fs::read_to_string(path)?;
        let source = self
            .parse(text)
            .map_err(|_| AnalyzerError::ParseError(path.display().to_string()))?;
        if source.has_syntax_errors() {
            log::debug!("Recovered from syntax errors in {}", path.display());
        }
        Ok(source)
    }
}

/// A parsed Java compilation unit
pub struct JavaSource {
    text: String,
    tree: Tree,
}

impl JavaSource {
    /// Parse with a throwaway parser; prefer [`JavaParser`] when parsing many files.
    pub fn parse(text: impl Into<String>) -> Result<Self> {
        JavaParser::new()?.parse(text)
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn has_syntax_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Declared package, e.g. `com.example.service`
    #[must_use]
    pub fn package_name(&self) -> Option<&str> {
        let root = self.tree.root_node();
        let mut cursor = root.walk();
        let package = root
            .named_children(&mut cursor)
            .find(|child| child.kind() == "package_declaration")?;

        let mut cursor = package.walk();
        let name = package
            .named_children(&mut cursor)
            .find(|child| matches!(child.kind(), "scoped_identifier" | "identifier"))?;
        Some(node_text(name, &self.text))
    }

    /// Every class-like declaration, nested ones included, in document order
    #[must_use]
    pub fn type_declarations(&self) -> Vec<TypeDecl<'_>> {
        let mut out = Vec::new();
        collect_type_declarations(self.tree.root_node(), &self.text, &mut out);
        out
    }

    /// First declaration with the given simple name, at any depth
    #[must_use]
    pub fn find_type(&self, name: &str) -> Option<TypeDecl<'_>> {
        self.type_declarations()
            .into_iter()
            .find(|decl| decl.name() == name)
    }

    /// Every method declaration in the file with its nearest enclosing type
    #[must_use]
    pub fn method_declarations(&self) -> Vec<MethodDecl<'_>> {
        let mut out = Vec::new();
        collect_methods(self.tree.root_node(), &self.text, &mut out);
        out
    }
}

fn collect_type_declarations<'a>(node: Node<'a>, source: &'a str, out: &mut Vec<TypeDecl<'a>>) {
    if let Some(kind) = TypeKind::from_node_kind(node.kind()) {
        out.push(TypeDecl { node, source, kind });
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_type_declarations(child, source, out);
    }
}

fn collect_methods<'a>(node: Node<'a>, source: &'a str, out: &mut Vec<MethodDecl<'a>>) {
    if node.kind() == "method_declaration" {
        out.push(MethodDecl { node, source });
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_methods(child, source, out);
    }
}

/// A class, interface, enum or record declaration
#[derive(Clone, Copy)]
pub struct TypeDecl<'a> {
    node: Node<'a>,
    source: &'a str,
    kind: TypeKind,
}

impl<'a> TypeDecl<'a> {
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.node
            .child_by_field_name("name")
            .map_or("", |name| node_text(name, self.source))
    }

    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }

    /// 1-based line of the declaration, modifiers and annotations included
    #[must_use]
    pub fn start_line(&self) -> usize {
        self.node.start_position().row + 1
    }

    /// Body of the attached `/** ... */` comment, if any
    #[must_use]
    pub fn doc_comment(&self) -> Option<&'a str> {
        doc_comment(self.node, self.source)
    }

    /// Direct members of the body. Enum members after the constant list are
    /// included; nested declarations are returned as members, not expanded.
    #[must_use]
    pub(crate) fn members(&self) -> Vec<Node<'a>> {
        let Some(body) = self.node.child_by_field_name("body") else {
            return Vec::new();
        };

        let mut members = Vec::new();
        let mut cursor = body.walk();
        for child in body.named_children(&mut cursor) {
            if child.kind() == "enum_body_declarations" {
                let mut inner = child.walk();
                members.extend(child.named_children(&mut inner));
            } else {
                members.push(child);
            }
        }
        members
    }

    /// Record header components (`record Point(Foo a, Bar b)`)
    #[must_use]
    pub(crate) fn record_components(&self) -> Vec<Node<'a>> {
        if self.kind != TypeKind::Record {
            return Vec::new();
        }
        let Some(params) = self.node.child_by_field_name("parameters") else {
            return Vec::new();
        };
        let mut cursor = params.walk();
        params
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "formal_parameter")
            .collect()
    }

    pub(crate) fn source(&self) -> &'a str {
        self.source
    }
}

/// A method declaration
#[derive(Clone, Copy)]
pub struct MethodDecl<'a> {
    node: Node<'a>,
    source: &'a str,
}

impl<'a> MethodDecl<'a> {
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.node
            .child_by_field_name("name")
            .map_or("", |name| node_text(name, self.source))
    }

    #[must_use]
    pub fn start_line(&self) -> usize {
        self.node.start_position().row + 1
    }

    #[must_use]
    pub fn doc_comment(&self) -> Option<&'a str> {
        doc_comment(self.node, self.source)
    }

    /// Simple name of the nearest enclosing class-like declaration
    #[must_use]
    pub fn enclosing_type(&self) -> Option<&'a str> {
        let mut current = self.node.parent();
        while let Some(node) = current {
            if TypeKind::from_node_kind(node.kind()).is_some() {
                return node
                    .child_by_field_name("name")
                    .map(|name| node_text(name, self.source));
            }
            current = node.parent();
        }
        None
    }
}

pub(crate) fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

fn doc_comment<'a>(node: Node<'_>, source: &'a str) -> Option<&'a str> {
    let comment = node.prev_named_sibling()?;
    if comment.kind() != "block_comment" {
        return None;
    }
    let text = node_text(comment, source);
    let inner = text.strip_prefix("/**")?;
    Some(inner.strip_suffix("*/").unwrap_or(inner))
}

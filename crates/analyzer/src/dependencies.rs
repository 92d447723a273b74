use crate::class_index::ProjectClassIndex;
use crate::source::{node_text, TypeDecl};
use std::collections::BTreeSet;
use tree_sitter::Node;

/// Simple names of the project types one class references
pub type UsedTypes = BTreeSet<String>;

/// Collect simple names of project classes used by `decl`.
///
/// Looks at field types, constructor parameters, method parameters and return
/// types, walking into generic arguments and qualifying scopes. Every member
/// declaration is visited, so annotated or injected fields are caught too.
/// The class's own name and names outside `project_classes` are never returned.
#[must_use]
pub fn find_used_project_types(decl: &TypeDecl<'_>, project_classes: &ProjectClassIndex) -> UsedTypes {
    let mut collector = TypeCollector {
        source: decl.source(),
        this_class: decl.name(),
        project_classes,
        used: UsedTypes::new(),
    };

    for component in decl.record_components() {
        collector.collect_field_type(component);
    }

    for member in decl.members() {
        match member.kind() {
            "field_declaration" | "constant_declaration" => collector.collect_field_type(member),
            "constructor_declaration" => collector.collect_parameters(member),
            "method_declaration" => {
                collector.collect_parameters(member);
                collector.collect_field_type(member);
            }
            _ => {}
        }
    }

    collector.used
}

struct TypeCollector<'a> {
    source: &'a str,
    this_class: &'a str,
    project_classes: &'a ProjectClassIndex,
    used: UsedTypes,
}

impl TypeCollector<'_> {
    /// The `type` field: declared type of a field/parameter, return type of a method
    fn collect_field_type(&mut self, node: Node<'_>) {
        if let Some(ty) = node.child_by_field_name("type") {
            self.collect_type(ty);
        }
    }

    fn collect_parameters(&mut self, node: Node<'_>) {
        let Some(params) = node.child_by_field_name("parameters") else {
            return;
        };

        let mut cursor = params.walk();
        for param in params.named_children(&mut cursor) {
            match param.kind() {
                "formal_parameter" => self.collect_field_type(param),
                // `Foo... items` has no `type` field
                "spread_parameter" => {
                    let mut inner = param.walk();
                    for child in param.named_children(&mut inner) {
                        if !matches!(child.kind(), "modifiers" | "variable_declarator") {
                            self.collect_type(child);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn collect_type(&mut self, node: Node<'_>) {
        match node.kind() {
            "type_identifier" => self.record(node),
            // Outer.Inner: the last identifier is the type, the rest is its scope
            "scoped_type_identifier" => {
                let parts = type_children(node);
                if let Some((name, scope)) = parts.split_last() {
                    self.collect_type(*name);
                    for part in scope {
                        self.collect_type(*part);
                    }
                }
            }
            "generic_type" => {
                for child in type_children(node) {
                    if child.kind() == "type_arguments" {
                        for arg in type_children(child) {
                            self.collect_type(arg);
                        }
                    } else {
                        self.collect_type(child);
                    }
                }
            }
            "array_type" => {
                if let Some(element) = node.child_by_field_name("element") {
                    self.collect_type(element);
                }
            }
            "annotated_type" | "wildcard" => {
                for child in type_children(node) {
                    self.collect_type(child);
                }
            }
            _ => {}
        }
    }

    fn record(&mut self, node: Node<'_>) {
        let name = node_text(node, self.source);
        if name != self.this_class && self.project_classes.contains(name) {
            self.used.insert(name.to_string());
        }
    }
}

/// Named children minus annotations, which may name types without using them
fn type_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !matches!(child.kind(), "annotation" | "marker_annotation"))
        .collect()
}

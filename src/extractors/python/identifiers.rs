/// Free-name collection for dependency tracking
/// Resolves function, lambda, class and comprehension scopes so only names looked
/// up outside the walked node are reported
use super::helpers::is_field;
use super::imports::import_bindings;
use crate::extractors::base::SourceModule;
use crate::language::{get_import_node_kinds, PYTHON};
use std::collections::BTreeSet;
use tree_sitter::Node;

const COMPREHENSION_KINDS: &[&str] = &[
    "list_comprehension",
    "set_comprehension",
    "dictionary_comprehension",
    "generator_expression",
];

/// Collect the free names read anywhere under `node`
///
/// Names bound inside a function, lambda or comprehension (parameters, assignment,
/// loop, `with`/`except` targets, local imports, nested definitions) are resolved
/// there and not reported, unless declared `global` or `nonlocal`. Attribute members
/// (`obj.attr` yields only `obj`) and keyword argument keywords are never names.
pub fn collect_references(module: &SourceModule, node: &Node) -> BTreeSet<String> {
    let walker = ReferenceWalker::new(module);
    let mut names = ScopeNames::default();
    walker.walk(*node, &mut names);
    names.into_all()
}

/// Collect the identifiers a binding target binds
///
/// Example: `a, (b, *c)` collects `a`, `b` and `c`. Attribute and subscript
/// targets mutate an object and bind nothing.
pub fn collect_targets<E: Extend<String>>(module: &SourceModule, node: &Node, targets: &mut E) {
    match node.kind() {
        "identifier" => targets.extend(Some(module.get_node_text(node))),
        "attribute" | "subscript" => {}
        _ => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                collect_targets(module, &child, targets);
            }
        }
    }
}

/// Names read in one scope
#[derive(Debug, Default)]
struct ScopeNames {
    /// Identifiers read by the scope's own code
    direct: BTreeSet<String>,
    /// Free names of scopes nested inside it
    nested: BTreeSet<String>,
}

impl ScopeNames {
    fn into_all(self) -> BTreeSet<String> {
        let mut all = self.direct;
        all.extend(self.nested);
        all
    }
}

/// Names a scope body binds locally, and names it declares global/nonlocal
#[derive(Debug, Default)]
struct LocalBindings {
    bound: BTreeSet<String>,
    declared: BTreeSet<String>,
}

impl LocalBindings {
    fn locals(mut self) -> BTreeSet<String> {
        for name in &self.declared {
            self.bound.remove(name);
        }
        self.bound
    }
}

struct ReferenceWalker<'a> {
    module: &'a SourceModule,
    import_kinds: Vec<&'static str>,
}

impl<'a> ReferenceWalker<'a> {
    fn new(module: &'a SourceModule) -> Self {
        Self {
            module,
            import_kinds: get_import_node_kinds(PYTHON),
        }
    }

    fn walk(&self, node: Node, names: &mut ScopeNames) {
        let kind = node.kind();
        if self.import_kinds.contains(&kind) {
            return;
        }

        match kind {
            "identifier" => {
                if is_reference_position(&node) {
                    names.direct.insert(self.module.get_node_text(&node));
                }
            }
            "function_definition" => self.function_scope(node, names),
            "lambda" => self.lambda_scope(node, names),
            "class_definition" => self.class_scope(node, names),
            _ if COMPREHENSION_KINDS.contains(&kind) => self.comprehension_scope(node, names),
            _ => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    self.walk(child, names);
                }
            }
        }
    }

    /// Defaults, annotations and the return type are read by the enclosing scope
    fn function_scope(&self, node: Node, outer: &mut ScopeNames) {
        let mut locals = BTreeSet::new();
        if let Some(parameters) = node.child_by_field_name("parameters") {
            self.parameters(parameters, &mut locals, outer);
        }
        if let Some(return_type) = node.child_by_field_name("return_type") {
            self.walk(return_type, outer);
        }

        let mut inner = ScopeNames::default();
        if let Some(body) = node.child_by_field_name("body") {
            self.walk(body, &mut inner);
            locals.extend(self.bindings(body).locals());
        }

        outer
            .nested
            .extend(inner.into_all().into_iter().filter(|name| !locals.contains(name)));
    }

    fn lambda_scope(&self, node: Node, outer: &mut ScopeNames) {
        let mut locals = BTreeSet::new();
        if let Some(parameters) = node.child_by_field_name("parameters") {
            self.parameters(parameters, &mut locals, outer);
        }

        let mut inner = ScopeNames::default();
        if let Some(body) = node.child_by_field_name("body") {
            self.walk(body, &mut inner);
        }

        outer
            .nested
            .extend(inner.into_all().into_iter().filter(|name| !locals.contains(name)));
    }

    /// Class-level bindings are invisible to methods: only the class's own reads
    /// resolve against them
    fn class_scope(&self, node: Node, outer: &mut ScopeNames) {
        if let Some(superclasses) = node.child_by_field_name("superclasses") {
            self.walk(superclasses, outer);
        }

        let body = match node.child_by_field_name("body") {
            Some(body) => body,
            None => return,
        };
        let mut inner = ScopeNames::default();
        self.walk(body, &mut inner);
        let locals = self.bindings(body).locals();

        outer
            .nested
            .extend(inner.direct.into_iter().filter(|name| !locals.contains(name)));
        outer.nested.extend(inner.nested);
    }

    /// The first iterable is evaluated in the enclosing scope
    fn comprehension_scope(&self, node: Node, outer: &mut ScopeNames) {
        let mut locals: BTreeSet<String> = BTreeSet::new();
        let mut inner = ScopeNames::default();
        let mut first_clause = true;

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() != "for_in_clause" {
                self.walk(child, &mut inner);
                continue;
            }

            if let Some(left) = child.child_by_field_name("left") {
                collect_targets(self.module, &left, &mut locals);
            }
            let mut clause_cursor = child.walk();
            for iterable in child.children_by_field_name("right", &mut clause_cursor) {
                if first_clause {
                    self.walk(iterable, outer);
                } else {
                    self.walk(iterable, &mut inner);
                }
            }
            first_clause = false;
        }

        outer
            .nested
            .extend(inner.into_all().into_iter().filter(|name| !locals.contains(name)));
    }

    /// Bind parameter names; defaults and annotations go to the enclosing scope
    fn parameters(&self, parameters: Node, locals: &mut BTreeSet<String>, outer: &mut ScopeNames) {
        let mut cursor = parameters.walk();
        for parameter in parameters.named_children(&mut cursor) {
            match parameter.kind() {
                "identifier" | "list_splat_pattern" | "dictionary_splat_pattern" | "tuple_pattern" => {
                    collect_targets(self.module, &parameter, locals);
                }
                "typed_parameter" => {
                    let mut inner_cursor = parameter.walk();
                    for child in parameter.named_children(&mut inner_cursor) {
                        if is_field(&parameter, "type", &child) {
                            self.walk(child, outer);
                        } else {
                            collect_targets(self.module, &child, locals);
                        }
                    }
                }
                "default_parameter" | "typed_default_parameter" => {
                    if let Some(name) = parameter.child_by_field_name("name") {
                        collect_targets(self.module, &name, locals);
                    }
                    for field in ["type", "value"] {
                        if let Some(child) = parameter.child_by_field_name(field) {
                            self.walk(child, outer);
                        }
                    }
                }
                // `*` and `/` separators
                _ => {}
            }
        }
    }

    fn bindings(&self, body: Node) -> LocalBindings {
        let mut bindings = LocalBindings::default();
        let mut cursor = body.walk();
        for child in body.named_children(&mut cursor) {
            self.collect_bindings(child, &mut bindings);
        }
        bindings
    }

    /// Names bound by statements of one scope, without entering nested scopes
    fn collect_bindings(&self, node: Node, bindings: &mut LocalBindings) {
        let kind = node.kind();
        match kind {
            "function_definition" | "class_definition" => {
                if let Some(name) = node.child_by_field_name("name") {
                    bindings.bound.insert(self.module.get_node_text(&name));
                }
                return;
            }
            "lambda" => return,
            _ if COMPREHENSION_KINDS.contains(&kind) => return,
            "import_statement" | "import_from_statement" => {
                bindings.bound.extend(
                    import_bindings(self.module, &node)
                        .into_iter()
                        .map(|binding| binding.bound_name),
                );
                return;
            }
            "future_import_statement" => return,
            "global_statement" | "nonlocal_statement" => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    if child.kind() == "identifier" {
                        bindings.declared.insert(self.module.get_node_text(&child));
                    }
                }
                return;
            }
            "assignment" | "augmented_assignment" | "for_statement" => {
                if let Some(left) = node.child_by_field_name("left") {
                    collect_targets(self.module, &left, &mut bindings.bound);
                }
            }
            "named_expression" => {
                if let Some(name) = node.child_by_field_name("name") {
                    collect_targets(self.module, &name, &mut bindings.bound);
                }
            }
            // `with x as y`, `except E as e`
            "as_pattern" | "except_clause" | "except_group_clause" => {
                if let Some(alias) = alias_after_as(&node) {
                    collect_targets(self.module, &alias, &mut bindings.bound);
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.collect_bindings(child, bindings);
        }
    }
}

/// First named node following the `as` keyword
fn alias_after_as<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let mut seen_as = false;
    for child in node.children(&mut cursor) {
        if seen_as && child.is_named() {
            return Some(child);
        }
        if child.kind() == "as" {
            seen_as = true;
        }
    }
    None
}

/// Decide whether an identifier reads a name rather than naming a member
fn is_reference_position(node: &Node) -> bool {
    let parent = match node.parent() {
        Some(parent) => parent,
        None => return true,
    };

    match parent.kind() {
        // obj.attr: only `obj` is a name lookup
        "attribute" => !is_field(&parent, "attribute", node),
        // f(key=value): `key` is not a lookup
        "keyword_argument" => !is_field(&parent, "name", node),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn references_of_first_statement(code: &str) -> Vec<String> {
        let module = SourceModule::parse(code).unwrap();
        let statement = module.statements()[0];
        collect_references(&module, &statement).into_iter().collect()
    }

    #[test]
    fn test_parameters_are_local() {
        let refs = references_of_first_statement("def f(x):\n    return g(x) + K\n");
        assert_eq!(refs, vec!["K", "g"]);
    }

    #[test]
    fn test_defaults_and_annotations_are_read_outside() {
        let refs = references_of_first_statement(
            "def f(a, b: Model, c=DEFAULT, *args, d: int = 1, **kw) -> Result:\n    return a, b, c, args, d, kw\n",
        );
        assert_eq!(refs, vec!["DEFAULT", "Model", "Result", "int"]);
    }

    #[test]
    fn test_attribute_members_and_keywords_are_excluded() {
        let refs =
            references_of_first_statement("def f():\n    return requests.get(url=BASE, timeout=5)\n");
        assert_eq!(refs, vec!["BASE", "requests"]);
    }

    #[test]
    fn test_nested_scopes_and_fstrings() {
        let refs = references_of_first_statement(
            "def f(item_id):\n    def inner():\n        return helper(item_id)\n    return f\"{PREFIX}/{inner()}\"\n",
        );
        assert_eq!(refs, vec!["PREFIX", "helper"]);
    }

    #[test]
    fn test_local_assignment_shadows_module_name() {
        let refs = references_of_first_statement(
            "def f():\n    data = 1\n    data += other\n    return data\n",
        );
        assert_eq!(refs, vec!["other"]);
    }

    #[test]
    fn test_local_imports_bind_locally() {
        let refs = references_of_first_statement("def f():\n    import json\n    return json.dumps(1)\n");
        assert!(refs.is_empty());
    }

    #[test]
    fn test_loop_with_and_except_targets_are_local() {
        let code = r#"def f(paths):
    for path in paths:
        with open(path) as handle:
            try:
                total = parse(handle)
            except ParseError as err:
                log(err)
    return total
"#;
        assert_eq!(
            references_of_first_statement(code),
            vec!["ParseError", "log", "open", "parse"]
        );
    }

    #[test]
    fn test_comprehension_targets_are_local() {
        let refs = references_of_first_statement(
            "def f():\n    return {row.id: cell for row in ROWS if keep(row) for cell in row}\n",
        );
        assert_eq!(refs, vec!["ROWS", "keep"]);
    }

    #[test]
    fn test_global_declaration_keeps_name_free() {
        let refs = references_of_first_statement("def bump():\n    global COUNTER\n    COUNTER += 1\n");
        assert_eq!(refs, vec!["COUNTER"]);
    }

    #[test]
    fn test_nonlocal_resolves_in_enclosing_function() {
        let code = "def counter():\n    count = 0\n    def bump():\n        nonlocal count\n        count += STEP\n    return bump\n";
        assert_eq!(references_of_first_statement(code), vec!["STEP"]);
    }

    #[test]
    fn test_class_attributes_are_not_visible_in_methods() {
        let code = "class Config:\n    name = DEFAULT\n    label = name\n    def describe(self):\n        return name\n";
        assert_eq!(references_of_first_statement(code), vec!["DEFAULT", "name"]);
    }

    #[test]
    fn test_lambda_parameters_are_excluded() {
        let refs = references_of_first_statement("key = lambda item, *rest: item.value + FALLBACK\n");
        assert_eq!(refs, vec!["FALLBACK", "key"]);
    }

    #[test]
    fn test_collect_targets_skips_attributes() {
        let module = SourceModule::parse("a, (b, *c), obj.x, d[0] = value\n").unwrap();
        let statement = module.statements()[0];
        let assignment = statement.named_child(0).unwrap();
        let left = assignment.child_by_field_name("left").unwrap();
        let mut targets = Vec::new();
        collect_targets(&module, &left, &mut targets);
        assert_eq!(targets, vec!["a", "b", "c"]);
    }
}

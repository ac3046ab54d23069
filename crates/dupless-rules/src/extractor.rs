//! Candidate name extraction from Rust syntax trees.
//!
//! A single `syn` visitor walks the file and classifies the nodes that
//! declare names into a closed set of [`NameNode`] kinds. Each kind has one
//! extraction rule producing zero or more [`Candidate`]s.
//!
//! | Node                                                  | Category   |
//! |-------------------------------------------------------|------------|
//! | the file's own module name                            | `Package`  |
//! | `mod name { ... }`                                    | `Package`  |
//! | `fn` items, impl/trait methods, foreign fns           | `Function` |
//! | `let`, `if let` and `while let` patterns, `static`s  | `Variable` |
//! | assignment and compound assignment targets            | `Variable` |

use dupless_core::Category;
use proc_macro2::Span;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::visit::{self, Visit};
use syn::{
    BinOp, Expr, ExprAssign, ExprBinary, ExprLet, ForeignItemFn, ForeignItemStatic, Ident,
    ImplItemFn, ItemFn, ItemMod, ItemStatic, Local, Pat, TraitItemFn,
};

/// Text used for `_` bindings and assignment targets.
const UNDERSCORE: &str = "_";

/// A name taken from the tree, ready to be matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Which pattern set applies.
    pub category: Category,
    /// The identifier as written, without any `r#` prefix.
    pub ident: String,
    /// The lowercased identifier that patterns are tested against.
    pub name: String,
    /// Line of the identifier (1-indexed).
    pub line: usize,
    /// Column of the identifier (1-indexed).
    pub column: usize,
    /// Length of the identifier in the source, in bytes.
    pub length: usize,
}

impl Candidate {
    fn new(category: Category, ident: String, line: usize, column: usize, length: usize) -> Self {
        let name = ident.to_lowercase();
        Self {
            category,
            ident,
            name,
            line,
            column,
            length,
        }
    }

    fn from_ident(category: Category, ident: &Ident) -> Self {
        let written = ident.to_string();
        let start = ident.span().start();
        Self::new(
            category,
            ident.unraw().to_string(),
            start.line,
            start.column + 1,
            written.len(),
        )
    }

    fn underscore(span: Span) -> Self {
        let start = span.start();
        Self::new(
            Category::Variable,
            UNDERSCORE.to_string(),
            start.line,
            start.column + 1,
            UNDERSCORE.len(),
        )
    }
}

/// The name-declaring node kinds the extractor recognises.
#[derive(Debug, Clone, Copy)]
pub enum NameNode<'ast> {
    /// The module a whole file declares, by its path.
    File(&'ast str),
    /// Any named function or method signature.
    Function(&'ast Ident),
    /// An inline module with a body.
    Module(&'ast ItemMod),
    /// The pattern of a `let` statement, or of an `if let`/`while let`
    /// condition.
    Let(&'ast Pat),
    /// A `static` item.
    Static(&'ast Ident),
    /// The left-hand side of an assignment.
    Assign(&'ast Expr),
}

/// Produces the candidates a single node declares.
pub fn extract(node: NameNode<'_>, emit: &mut impl FnMut(Candidate)) {
    match node {
        NameNode::File(module_name) => emit(Candidate::new(
            Category::Package,
            module_name.to_string(),
            1,
            1,
            0,
        )),
        NameNode::Function(ident) => emit(Candidate::from_ident(Category::Function, ident)),
        NameNode::Module(item) => {
            // `mod foo;` is checked when its own file is analyzed.
            if item.content.is_some() {
                emit(Candidate::from_ident(Category::Package, &item.ident));
            }
        }
        NameNode::Let(pat) => pattern_bindings(pat, emit),
        NameNode::Static(ident) => emit(Candidate::from_ident(Category::Variable, ident)),
        NameNode::Assign(lhs) => assignment_targets(lhs, emit),
    }
}

/// Every name a pattern binds, including `_`.
fn pattern_bindings(pat: &Pat, emit: &mut impl FnMut(Candidate)) {
    match pat {
        Pat::Ident(p) => {
            emit(Candidate::from_ident(Category::Variable, &p.ident));
            if let Some((_, sub)) = &p.subpat {
                pattern_bindings(sub, emit);
            }
        }
        Pat::Wild(w) => emit(Candidate::underscore(w.underscore_token.span())),
        Pat::Or(p) => p.cases.iter().for_each(|case| pattern_bindings(case, emit)),
        Pat::Paren(p) => pattern_bindings(&p.pat, emit),
        Pat::Reference(p) => pattern_bindings(&p.pat, emit),
        Pat::Type(p) => pattern_bindings(&p.pat, emit),
        Pat::Slice(p) => p.elems.iter().for_each(|elem| pattern_bindings(elem, emit)),
        Pat::Tuple(p) => p.elems.iter().for_each(|elem| pattern_bindings(elem, emit)),
        Pat::TupleStruct(p) => p.elems.iter().for_each(|elem| pattern_bindings(elem, emit)),
        Pat::Struct(p) => p
            .fields
            .iter()
            .for_each(|field| pattern_bindings(&field.pat, emit)),
        _ => {}
    }
}

/// Plain identifiers assigned to, including inside destructuring tuples,
/// arrays, tuple structs and structs.
fn assignment_targets(lhs: &Expr, emit: &mut impl FnMut(Candidate)) {
    match lhs {
        Expr::Path(p) if p.qself.is_none() => {
            if let Some(ident) = p.path.get_ident() {
                emit(Candidate::from_ident(Category::Variable, ident));
            }
        }
        Expr::Infer(i) => emit(Candidate::underscore(i.underscore_token.span())),
        Expr::Paren(p) => assignment_targets(&p.expr, emit),
        Expr::Tuple(t) => t.elems.iter().for_each(|e| assignment_targets(e, emit)),
        Expr::Array(a) => a.elems.iter().for_each(|e| assignment_targets(e, emit)),
        Expr::Call(c) => c.args.iter().for_each(|e| assignment_targets(e, emit)),
        Expr::Struct(s) => s
            .fields
            .iter()
            .for_each(|field| assignment_targets(&field.expr, emit)),
        _ => {}
    }
}

fn is_compound_assign(op: &BinOp) -> bool {
    matches!(
        op,
        BinOp::AddAssign(_)
            | BinOp::SubAssign(_)
            | BinOp::MulAssign(_)
            | BinOp::DivAssign(_)
            | BinOp::RemAssign(_)
            | BinOp::BitXorAssign(_)
            | BinOp::BitAndAssign(_)
            | BinOp::BitOrAssign(_)
            | BinOp::ShlAssign(_)
            | BinOp::ShrAssign(_)
    )
}

/// Walks a file once, handing each candidate to a callback as it is found.
pub struct NameExtractor<F> {
    on_candidate: F,
}

impl<F: FnMut(Candidate)> NameExtractor<F> {
    /// Creates an extractor that calls `on_candidate` for every name.
    pub fn new(on_candidate: F) -> Self {
        Self { on_candidate }
    }

    /// Extracts every candidate from one file, in traversal order.
    ///
    /// The file's own module name (if any) comes first.
    pub fn extract_file(&mut self, module_name: Option<&str>, file: &syn::File) {
        if let Some(module_name) = module_name {
            self.emit(NameNode::File(module_name));
        }
        self.visit_file(file);
    }

    fn emit(&mut self, node: NameNode<'_>) {
        extract(node, &mut self.on_candidate);
    }
}

impl<'ast, F: FnMut(Candidate)> Visit<'ast> for NameExtractor<F> {
    fn visit_item_fn(&mut self, node: &'ast ItemFn) {
        self.emit(NameNode::Function(&node.sig.ident));
        visit::visit_item_fn(self, node);
    }

    fn visit_impl_item_fn(&mut self, node: &'ast ImplItemFn) {
        self.emit(NameNode::Function(&node.sig.ident));
        visit::visit_impl_item_fn(self, node);
    }

    fn visit_trait_item_fn(&mut self, node: &'ast TraitItemFn) {
        self.emit(NameNode::Function(&node.sig.ident));
        visit::visit_trait_item_fn(self, node);
    }

    fn visit_foreign_item_fn(&mut self, node: &'ast ForeignItemFn) {
        self.emit(NameNode::Function(&node.sig.ident));
        visit::visit_foreign_item_fn(self, node);
    }

    fn visit_item_mod(&mut self, node: &'ast ItemMod) {
        self.emit(NameNode::Module(node));
        visit::visit_item_mod(self, node);
    }

    fn visit_local(&mut self, node: &'ast Local) {
        self.emit(NameNode::Let(&node.pat));
        visit::visit_local(self, node);
    }

    fn visit_expr_let(&mut self, node: &'ast ExprLet) {
        self.emit(NameNode::Let(&node.pat));
        visit::visit_expr_let(self, node);
    }

    fn visit_item_static(&mut self, node: &'ast ItemStatic) {
        self.emit(NameNode::Static(&node.ident));
        visit::visit_item_static(self, node);
    }

    fn visit_foreign_item_static(&mut self, node: &'ast ForeignItemStatic) {
        self.emit(NameNode::Static(&node.ident));
        visit::visit_foreign_item_static(self, node);
    }

    fn visit_expr_assign(&mut self, node: &'ast ExprAssign) {
        self.emit(NameNode::Assign(&node.left));
        visit::visit_expr_assign(self, node);
    }

    fn visit_expr_binary(&mut self, node: &'ast ExprBinary) {
        if is_compound_assign(&node.op) {
            self.emit(NameNode::Assign(&node.left));
        }
        visit::visit_expr_binary(self, node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(module_name: Option<&str>, code: &str) -> Vec<Candidate> {
        let ast = syn::parse_file(code).expect("Failed to parse");
        let mut found = Vec::new();
        NameExtractor::new(|c| found.push(c)).extract_file(module_name, &ast);
        found
    }

    fn names(module_name: Option<&str>, code: &str) -> Vec<(Category, String)> {
        candidates(module_name, code)
            .into_iter()
            .map(|c| (c.category, c.name))
            .collect()
    }

    fn of(category: Category, found: &[(Category, String)]) -> Vec<String> {
        found
            .iter()
            .filter(|(c, _)| *c == category)
            .map(|(_, n)| n.clone())
            .collect()
    }

    #[test]
    fn test_functions_at_any_depth() {
        let found = names(
            None,
            r#"
fn Outer() {
    fn inner_helper() {}
}

struct S;
impl S {
    pub fn Method(&self) {}
}

trait T {
    fn required(&self);
    fn provided(&self) {}
}

extern "C" {
    fn ffi_call();
}
"#,
        );
        assert_eq!(
            of(Category::Function, &found),
            ["outer", "inner_helper", "method", "required", "provided", "ffi_call"]
        );
    }

    #[test]
    fn test_closures_are_not_functions() {
        let found = names(None, "fn f() { let g = |x: u8| x; }");
        assert_eq!(of(Category::Function, &found), ["f"]);
        assert_eq!(of(Category::Variable, &found), ["g"]);
    }

    #[test]
    fn test_file_module_comes_first() {
        let found = names(Some("Utils"), "fn a() {}");
        assert_eq!(found[0], (Category::Package, "utils".to_string()));
        let first = &candidates(Some("utils"), "fn a() {}")[0];
        assert_eq!((first.line, first.column, first.length), (1, 1, 0));
    }

    #[test]
    fn test_inline_modules_only() {
        let found = names(
            None,
            r#"
mod declared_elsewhere;
mod Helpers {
    mod base {}
}
"#,
        );
        assert_eq!(of(Category::Package, &found), ["helpers", "base"]);
    }

    #[test]
    fn test_let_bindings_cover_all_pattern_shapes() {
        let found = names(
            None,
            r#"
fn f() {
    let plain = 1;
    let (TupleA, b): (u8, u8) = (1, 2);
    let Point { x, y: renamed } = p;
    let Some(inner) = opt else { return };
    let [first, .., last] = arr;
    let whole @ 1..=9 = n;
    let &deref = r;
    let _ = ignored();
    static COUNTER: u32 = 0;
}
"#,
        );
        assert_eq!(
            of(Category::Variable, &found),
            [
                "plain", "tuplea", "b", "x", "renamed", "inner", "first", "last", "whole",
                "deref", "_", "counter"
            ]
        );
    }

    #[test]
    fn test_assignment_targets() {
        let found = names(
            None,
            r#"
fn f() {
    XyzVar = 1;
    (a, (b, _)) = (1, (2, 3));
    total += 1;
    s.field = 2;
    v[0] = 3;
    _ = side_effect();
    let unchanged = a + b;
}
"#,
        );
        assert_eq!(
            of(Category::Variable, &found),
            ["xyzvar", "a", "b", "_", "total", "_", "unchanged"]
        );
    }

    #[test]
    fn test_conditional_let_bindings() {
        let found = names(
            None,
            r#"
fn f(o: Option<u8>) {
    if let Some(XyzVal) = o {}
    while let Some(xyz_w) = o {}
    let xyz_l = 1;
    match o {
        Some(arm) if let_free(arm) => {}
        _ => {}
    }
}
"#,
        );
        assert_eq!(
            of(Category::Variable, &found),
            ["xyzval", "xyz_w", "xyz_l"]
        );
    }

    #[test]
    fn test_struct_destructuring_assignment() {
        let found = names(
            None,
            r#"
fn f() {
    P { a: xyz_a, b } = p;
    T(first, (second, _)) = t;
    Wrapper(w.inner) = t;
}
"#,
        );
        assert_eq!(
            of(Category::Variable, &found),
            ["xyz_a", "b", "first", "second", "_"]
        );
    }

    #[test]
    fn test_raw_identifiers_are_unraw() {
        let found = candidates(None, "fn r#match() {}");
        assert_eq!(found[0].ident, "match");
        assert_eq!(found[0].length, "r#match".len());
    }

    #[test]
    fn test_positions_point_at_identifier() {
        let found = candidates(None, "fn f() {\n    let xyz_var = 1;\n}\n");
        let var = found
            .iter()
            .find(|c| c.category == Category::Variable)
            .expect("variable candidate");
        assert_eq!((var.line, var.column, var.length), (2, 9, 7));
        assert_eq!(var.ident, "xyz_var");
    }

    #[test]
    fn test_original_case_is_kept() {
        let found = candidates(None, "fn DupaFn() {}");
        assert_eq!(found[0].ident, "DupaFn");
        assert_eq!(found[0].name, "dupafn");
    }
}

//! The alias-divergence pass.
//!
//! One preorder traversal of the syntax tree, visiting four node kinds:
//! function declarations (reset all state), `let` bindings and plain `=`
//! assignments (record alias edges or capacity tags), and method calls
//! (check growth operations). The pass is function-local by construction:
//! nothing survives a `fn` boundary.
//!
//! The analysis is a best-effort heuristic. Anything it does not recognize
//! (tuple patterns, field accesses, non-identifier sources, non-literal
//! sizes) is silently skipped; false negatives are always preferred over
//! false positives.

use ra_ap_syntax::ast::{self, HasArgList, HasGenericArgs, HasName};
use ra_ap_syntax::{AstNode, Edition, SourceFile, SyntaxNode};

use super::capacity::{classify, size_arg_from_literal, CapacityState, CtorShape, SizeArg};
use super::context::FnContext;
use super::oracle::GrowableOracle;
use crate::output::Diagnostic;

/// Vector methods that grow the value by pushing elements onto the end.
const GROWTH_METHODS: &[&str] = &["push", "extend", "extend_from_slice", "append"];

/// Run the pass over a source string and collect all findings.
pub fn check_source(source: &str, oracle: &dyn GrowableOracle) -> Vec<Diagnostic> {
    let parse = SourceFile::parse(source, Edition::Edition2021);
    let mut out = Vec::new();
    check_file(&parse.tree(), oracle, &mut |d| out.push(d));
    out
}

/// Run the pass over a parsed file, streaming findings to `report` in
/// traversal order. This is the only entry point the driver needs; the pass
/// itself cannot fail.
pub fn check_file(
    file: &SourceFile,
    oracle: &dyn GrowableOracle,
    report: &mut dyn FnMut(Diagnostic),
) {
    let mut pass = Pass {
        oracle,
        ctx: FnContext::new(),
        report,
    };
    for node in file.syntax().descendants() {
        pass.visit(&node);
    }
}

struct Pass<'a> {
    oracle: &'a dyn GrowableOracle,
    ctx: FnContext,
    report: &'a mut dyn FnMut(Diagnostic),
}

impl Pass<'_> {
    fn visit(&mut self, node: &SyntaxNode) {
        if ast::Fn::cast(node.clone()).is_some() {
            // Function boundary: discard everything.
            self.ctx = FnContext::new();
        } else if let Some(let_stmt) = ast::LetStmt::cast(node.clone()) {
            self.visit_let(&let_stmt);
        } else if let Some(bin) = ast::BinExpr::cast(node.clone()) {
            self.visit_assign(&bin);
        } else if let Some(call) = ast::MethodCallExpr::cast(node.clone()) {
            self.visit_growth_call(&call);
        }
    }

    fn visit_let(&mut self, let_stmt: &ast::LetStmt) {
        // Single-name bindings only; tuple and struct patterns carry no state.
        let pat = match let_stmt.pat() {
            Some(ast::Pat::IdentPat(p)) => p,
            _ => return,
        };
        let name = match pat.name() {
            Some(n) => n.text().to_string(),
            None => return,
        };
        let annotation = let_stmt.ty().map(|t| t.syntax().text().to_string());

        match let_stmt.initializer() {
            Some(init) => self.visit_definition(&name, &init, annotation.as_deref()),
            None => {
                // `let v: Vec<T>;` has no backing store behind its default value.
                if let Some(ty) = &annotation {
                    if self.oracle.is_type_growable(ty) == Some(true) {
                        self.ctx.record_capacity(&name, CapacityState::Unknown);
                    }
                }
            }
        }
    }

    fn visit_assign(&mut self, bin: &ast::BinExpr) {
        // Plain `=` only; compound assignments are not defining writes.
        if bin.op_kind() != Some(ast::BinaryOp::Assignment { op: None }) {
            return;
        }
        let lhs = match bin.lhs().as_ref().and_then(simple_ident) {
            Some(name) => name,
            None => return,
        };
        if let Some(rhs) = bin.rhs() {
            self.visit_definition(&lhs, &rhs, None);
        }
    }

    /// Route the defining expression of `lhs`: a bare identifier becomes an
    /// alias edge, a recognized constructor becomes a capacity tag, anything
    /// else records nothing.
    fn visit_definition(&mut self, lhs: &str, expr: &ast::Expr, annotation: Option<&str>) {
        let offset = expr.syntax().text_range().start();

        if let Some(rhs_name) = simple_ident(expr) {
            if rhs_name == lhs {
                return;
            }
            let growable = self
                .oracle
                .is_growable_at(offset)
                .or_else(|| annotation.and_then(|t| self.oracle.is_type_growable(t)))
                // No type information at all: trust the source name if this
                // function already tracks it, stay silent otherwise.
                .unwrap_or_else(|| self.ctx.knows(&rhs_name));
            if growable {
                self.ctx.record_alias(lhs, &rhs_name);
            }
            return;
        }

        if let Some(shape) = ctor_shape(expr) {
            // Recognized shapes are Vec-producing by name. A position query
            // here would land on the `Vec` path segment or the `vec` macro
            // name and answer for the item definition, not the expression,
            // so the oracle is not consulted for them.
            if let Some(state) = classify(shape) {
                self.ctx.record_capacity(lhs, state);
            }
        }
    }

    fn visit_growth_call(&mut self, call: &ast::MethodCallExpr) {
        let method = match call.name_ref() {
            Some(n) => n.text().to_string(),
            None => return,
        };
        if !GROWTH_METHODS.contains(&method.as_str()) {
            return;
        }
        let target = match call.receiver().as_ref().and_then(simple_ident) {
            Some(name) => name,
            None => return,
        };

        let root = self.ctx.resolve_root(&target);
        if root == target {
            // A variable growing through its own name is always safe.
            return;
        }
        if self.ctx.capacity_of(root) != Some(CapacityState::Unknown) {
            // Root has confirmed headroom, or was never classified.
            return;
        }
        let root = root.to_string();
        (self.report)(Diagnostic::divergence(
            call.syntax().text_range(),
            &target,
            &root,
        ));
    }
}

/// Extract the name from an expression that is a lone, unqualified
/// identifier.
fn simple_ident(expr: &ast::Expr) -> Option<String> {
    let path_expr = match expr {
        ast::Expr::PathExpr(p) => p,
        _ => return None,
    };
    let path = path_expr.path()?;
    if path.qualifier().is_some() {
        return None;
    }
    let segment = path.segment()?;
    if segment.generic_arg_list().is_some() {
        return None;
    }
    Some(segment.name_ref()?.text().to_string())
}

/// Reduce a vector-constructing expression to its structured shape.
///
/// Recognized by name, as the front-end contract requires: `Vec::new`,
/// `Vec::with_capacity` (with any qualification ending in `Vec`), and the
/// `vec![]` / `vec![elem; len]` macro forms.
fn ctor_shape(expr: &ast::Expr) -> Option<CtorShape> {
    match expr {
        ast::Expr::CallExpr(call) => {
            let method = vec_assoc_fn(call)?;
            match method.as_str() {
                "new" => Some(CtorShape::Empty),
                "with_capacity" => {
                    let arg = call.arg_list()?.args().next();
                    Some(CtorShape::Reserved {
                        cap: size_arg(arg.as_ref()),
                    })
                }
                _ => None,
            }
        }
        ast::Expr::MacroExpr(macro_expr) => {
            let mc = macro_expr.macro_call()?;
            let path = mc.path()?;
            if path.qualifier().is_some()
                || path.segment()?.name_ref()?.text().to_string() != "vec"
            {
                return None;
            }
            let tt = mc.token_tree()?;
            let text = tt.syntax().text().to_string();
            // Strip the delimiters.
            let inner = text
                .get(1..text.len().saturating_sub(1))
                .unwrap_or("")
                .trim()
                .to_string();
            if inner.is_empty() {
                return Some(CtorShape::Empty);
            }
            if let Some((_, len)) = inner.rsplit_once(';') {
                return Some(CtorShape::Repeat {
                    len: size_arg_from_literal(len.trim()),
                });
            }
            // Nonempty element list: capacity equals length, but the
            // reference records nothing for this form.
            None
        }
        _ => None,
    }
}

/// `Vec::new`, `std::vec::Vec::new`, `Vec::<T>::with_capacity`, ... →
/// the associated-function name. Anything not rooted at a `Vec` segment is
/// rejected.
fn vec_assoc_fn(call: &ast::CallExpr) -> Option<String> {
    let callee = call.expr()?;
    let path_expr = match callee {
        ast::Expr::PathExpr(p) => p,
        _ => return None,
    };
    let path = path_expr.path()?;
    let method = path.segment()?.name_ref()?.text().to_string();
    let qualifier = path.qualifier()?;
    let ty = qualifier.segment()?.name_ref()?.text().to_string();
    if ty == "Vec" {
        Some(method)
    } else {
        None
    }
}

fn size_arg(arg: Option<&ast::Expr>) -> SizeArg {
    match arg {
        Some(ast::Expr::Literal(lit)) => {
            size_arg_from_literal(&lit.syntax().text().to_string())
        }
        _ => SizeArg::Dynamic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::oracle::HeuristicOracle;

    fn check(source: &str) -> Vec<Diagnostic> {
        check_source(source, &HeuristicOracle)
    }

    fn pairs(diags: &[Diagnostic]) -> Vec<(String, String)> {
        diags
            .iter()
            .map(|d| (d.alias.clone(), d.root.clone()))
            .collect()
    }

    #[test]
    fn test_self_append_never_flags() {
        let diags = check(
            r#"
fn f() {
    let mut a: Vec<i32> = vec![];
    a.push(1);
    a.push(2);
}
"#,
        );
        assert!(diags.is_empty(), "got: {:?}", diags);
    }

    #[test]
    fn test_unknown_capacity_alias_flags_once() {
        let diags = check(
            r#"
fn f() {
    let mut a: Vec<i32> = vec![];
    let mut b = a;
    b.push(1);
    a.push(2);
}
"#,
        );
        assert_eq!(pairs(&diags), vec![("b".to_string(), "a".to_string())]);
    }

    #[test]
    fn test_vec_new_is_unknown_capacity() {
        let diags = check(
            r#"
fn f() {
    let mut a = Vec::new();
    let mut b = a;
    b.push(1);
}
"#,
        );
        assert_eq!(pairs(&diags), vec![("b".to_string(), "a".to_string())]);
    }

    /// Answers `false` at one pinned offset and `true` everywhere else,
    /// the way a hover on a constructor's leading path segment describes
    /// the `Vec` item rather than the expression.
    struct PinnedOracle {
        deny_at: ra_ap_syntax::TextSize,
    }

    impl GrowableOracle for PinnedOracle {
        fn is_growable_at(&self, offset: ra_ap_syntax::TextSize) -> Option<bool> {
            Some(offset != self.deny_at)
        }
        fn is_type_growable(&self, _type_name: &str) -> Option<bool> {
            None
        }
    }

    #[test]
    fn test_constructor_shape_beats_misplaced_type_answer() {
        let source = r#"
fn f() {
    let mut a = Vec::new();
    let mut b = a;
    b.push(1);
}
"#;
        let deny_at =
            ra_ap_syntax::TextSize::from(source.find("Vec::new").unwrap() as u32);
        let diags = check_source(source, &PinnedOracle { deny_at });
        assert_eq!(pairs(&diags), vec![("b".to_string(), "a".to_string())]);
    }

    #[test]
    fn test_turbofish_source_records_no_alias() {
        let diags = check(
            r#"
fn f() {
    let mut a: Vec<i32> = vec![];
    let mut b = a::<i32>;
    b.push(1);
}
"#,
        );
        assert!(diags.is_empty(), "got: {:?}", diags);
    }

    #[test]
    fn test_uninitialized_decl_is_unknown_capacity() {
        let diags = check(
            r#"
fn f() {
    let mut a: Vec<i32>;
    let mut b = a;
    b.push(1);
}
"#,
        );
        assert_eq!(pairs(&diags), vec![("b".to_string(), "a".to_string())]);
    }

    #[test]
    fn test_known_capacity_alias_never_flags() {
        let diags = check(
            r#"
fn f() {
    let mut a = Vec::with_capacity(100);
    let mut b = a;
    a.push(1);
    b.push(2);
}
"#,
        );
        assert!(diags.is_empty(), "got: {:?}", diags);
    }

    #[test]
    fn test_repeat_macro_nonzero_length_is_safe() {
        let diags = check(
            r#"
fn f() {
    let mut a = vec![0; 8];
    let mut b: Vec<i32> = a;
    b.push(1);
}
"#,
        );
        assert!(diags.is_empty(), "got: {:?}", diags);
    }

    #[test]
    fn test_repeat_macro_zero_length_flags() {
        let diags = check(
            r#"
fn f() {
    let mut a = vec![0; 0];
    let mut b = a;
    b.push(1);
}
"#,
        );
        assert_eq!(pairs(&diags), vec![("b".to_string(), "a".to_string())]);
    }

    #[test]
    fn test_with_capacity_zero_flags() {
        let diags = check(
            r#"
fn f() {
    let mut a = Vec::with_capacity(0);
    let mut b = a;
    b.push(1);
}
"#,
        );
        assert_eq!(pairs(&diags), vec![("b".to_string(), "a".to_string())]);
    }

    #[test]
    fn test_dynamic_capacity_stays_silent() {
        // Non-literal size: unclassified, and unclassified roots never flag.
        let diags = check(
            r#"
fn f(n: usize) {
    let mut a = Vec::with_capacity(n);
    let mut b: Vec<i32> = a;
    b.push(1);
}
"#,
        );
        assert!(diags.is_empty(), "got: {:?}", diags);
    }

    #[test]
    fn test_chain_resolves_to_true_root() {
        let diags = check(
            r#"
fn f() {
    let mut a: Vec<i32> = vec![];
    let mut b = a;
    let mut c = b;
    a.push(1);
    c.push(2);
}
"#,
        );
        assert_eq!(pairs(&diags), vec![("c".to_string(), "a".to_string())]);
    }

    #[test]
    fn test_two_aliases_each_flag() {
        let diags = check(
            r#"
fn f() {
    let mut a: Vec<i32> = vec![];
    let mut b = a;
    let mut c = a;
    b.push(1);
    c.push(2);
}
"#,
        );
        assert_eq!(
            pairs(&diags),
            vec![
                ("b".to_string(), "a".to_string()),
                ("c".to_string(), "a".to_string())
            ]
        );
    }

    #[test]
    fn test_reassignment_does_not_flag_root_append() {
        let diags = check(
            r#"
fn f() {
    let mut a: Vec<i32> = vec![];
    let mut b = a;
    b.push(1);
    a.push(2);
    a = vec![42];
    a.push(99);
}
"#,
        );
        assert_eq!(pairs(&diags), vec![("b".to_string(), "a".to_string())]);
    }

    #[test]
    fn test_shadowing_overwrites_name_state() {
        // Name-keyed model: the later `a` wins for everyone.
        let diags = check(
            r#"
fn f() {
    let mut a: Vec<i32> = vec![];
    let mut b = a;
    let a = Vec::with_capacity(8);
    b.push(1);
}
"#,
        );
        assert!(diags.is_empty(), "got: {:?}", diags);
    }

    #[test]
    fn test_scope_isolation() {
        let diags = check(
            r#"
fn hazardous() {
    let mut a: Vec<i32> = vec![];
    let mut b = a;
    b.push(1);
}

fn safe() {
    let mut a = Vec::with_capacity(10);
    let mut b = a;
    b.push(1);
}
"#,
        );
        assert_eq!(pairs(&diags), vec![("b".to_string(), "a".to_string())]);
    }

    #[test]
    fn test_no_state_leaks_between_functions() {
        let diags = check(
            r#"
fn one() {
    let mut a: Vec<i32> = vec![];
    a.push(1);
}

fn two() {
    let mut b = a;
    b.push(1);
}
"#,
        );
        assert!(diags.is_empty(), "got: {:?}", diags);
    }

    #[test]
    fn test_extend_and_append_are_growth_operations() {
        let diags = check(
            r#"
fn f() {
    let mut a: Vec<i32> = vec![];
    let mut b = a;
    b.extend([1, 2]);
    b.extend_from_slice(&[3]);
    b.append(&mut vec![4]);
}
"#,
        );
        assert_eq!(diags.len(), 3);
        assert!(diags.iter().all(|d| d.alias == "b" && d.root == "a"));
    }

    #[test]
    fn test_non_growth_methods_are_ignored() {
        let diags = check(
            r#"
fn f() {
    let mut a: Vec<i32> = vec![];
    let mut b = a;
    b.len();
    b.clear();
    b.pop();
}
"#,
        );
        assert!(diags.is_empty(), "got: {:?}", diags);
    }

    #[test]
    fn test_non_vector_types_are_ignored() {
        let diags = check(
            r#"
fn f() {
    let mut s = String::new();
    let mut t = s;
    t.push('x');
}
"#,
        );
        assert!(diags.is_empty(), "got: {:?}", diags);
    }

    #[test]
    fn test_tuple_bindings_record_nothing() {
        let diags = check(
            r#"
fn f() {
    let (mut a, mut b) = (vec![], vec![]);
    let mut c: Vec<i32> = a;
    c.push(1);
}
"#,
        );
        assert!(diags.is_empty(), "got: {:?}", diags);
    }

    #[test]
    fn test_nonempty_literal_is_unclassified() {
        let diags = check(
            r#"
fn f() {
    let mut a = vec![1, 2, 3];
    let mut b: Vec<i32> = a;
    b.push(4);
}
"#,
        );
        assert!(diags.is_empty(), "got: {:?}", diags);
    }

    #[test]
    fn test_diagnostic_message_template() {
        let diags = check(
            r#"
fn f() {
    let mut a: Vec<i32> = vec![];
    let mut b = a;
    b.push(1);
}
"#,
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags[0].message,
            "append to alias `b` of unknown-capacity vector `a` may cause memory divergence"
        );
    }

    #[test]
    fn test_idempotence() {
        let source = r#"
fn f() {
    let mut a: Vec<i32> = vec![];
    let mut b = a;
    let mut c = b;
    b.push(1);
    c.push(2);
    a.push(3);
}
"#;
        let first = check(source);
        let second = check(source);
        assert_eq!(first, second);
        assert_eq!(
            pairs(&first),
            vec![
                ("b".to_string(), "a".to_string()),
                ("c".to_string(), "a".to_string())
            ]
        );
    }
}

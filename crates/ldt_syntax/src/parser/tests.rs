#[cfg(test)]
/// Parser unit tests.
///
/// These tests cover grammar acceptance for every expression and statement form, the
/// parser's error recovery behavior (bounded cascades, synthetic closing), and the
/// traversal-order contract of the visitor protocol.
mod tests {
    use super::*;
    use crate::diagnostics::{CollectingReporter, DiscardReporter};

    fn parse_str(source: &str) -> Module {
        let mut reporter = DiscardReporter;
        parse("test.lua", source, &mut reporter)
    }

    fn parse_collecting(source: &str) -> (Module, Vec<Problem>) {
        let mut reporter = CollectingReporter::new();
        let module = parse("test.lua", source, &mut reporter);
        (module, reporter.problems)
    }

    fn first_stmt(module: &Module) -> &Statement {
        &module.chunk.statements[0].node
    }

    /// The single value assigned by an `x = expr` statement.
    fn assigned_value(module: &Module) -> &Spanned<Expr> {
        match first_stmt(module) {
            Statement::Assign(assign) => &assign.values[0],
            other => panic!("expected assignment, got {:?}", other.kind()),
        }
    }

    /// Records identifier spellings in traversal order.
    #[derive(Default)]
    struct IdentifierOrder {
        names: Vec<String>,
    }

    impl Visitor for IdentifierOrder {
        fn visit_expr(&mut self, expr: &Spanned<Expr>) -> bool {
            if let Expr::Identifier(name) = &expr.node {
                self.names.push(name.clone());
            }
            true
        }
    }

    // ========================================================================
    // Empty input and trivial modules
    // ========================================================================

    #[test]
    fn test_empty_source_yields_empty_module_and_no_problems() {
        // Canonical convention: empty input parses to an empty module, silently.
        let (module, problems) = parse_collecting("");
        assert!(module.is_empty());
        assert!(problems.is_empty());
    }

    #[test]
    fn test_stray_semicolons_yield_empty_module() {
        let (module, problems) = parse_collecting(";;;");
        assert!(module.is_empty());
        assert!(problems.is_empty());
    }

    #[test]
    fn test_comments_are_invisible_to_the_grammar() {
        let (module, problems) = parse_collecting("x = 1 -- trailing\n-- full line\ny = 2");
        assert!(problems.is_empty());
        assert_eq!(module.chunk.statements.len(), 2);
    }

    // ========================================================================
    // Expression corpus
    // ========================================================================

    #[test]
    fn test_boolean_literals() {
        let module = parse_str("bool = false");
        assert!(!module.is_empty());
        assert_eq!(assigned_value(&module).node, Expr::False);

        let module = parse_str("bool = true");
        assert_eq!(assigned_value(&module).node, Expr::True);
    }

    #[test]
    fn test_nil_literal() {
        let module = parse_str("null = nil");
        assert_eq!(assigned_value(&module).node, Expr::Nil);
    }

    #[test]
    fn test_number_literal() {
        let module = parse_str("number = 6");
        assert_eq!(assigned_value(&module).node, Expr::Number(6.0));
    }

    #[test]
    fn test_string_literals_short_and_long() {
        let (module, problems) = parse_collecting("string, another = 'string', [[anotherOne]]");
        assert!(problems.is_empty());
        match first_stmt(&module) {
            Statement::Assign(assign) => {
                assert_eq!(assign.targets.len(), 2);
                assert_eq!(assign.values.len(), 2);
                assert_eq!(assign.values[0].node, Expr::Str("string".to_string()));
                assert_eq!(assign.values[1].node, Expr::Str("anotherOne".to_string()));
            }
            other => panic!("expected assignment, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_parenthesized_expression() {
        let module = parse_str("paren = (1 + 2) * 5");
        match &assigned_value(&module).node {
            Expr::Binary(left, BinaryOp::Mul, _) => {
                assert_eq!(left.node.kind(), ExprKind::Paren);
            }
            other => panic!("expected multiplication, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_calls() {
        let (module, problems) = parse_collecting("method = function () end method()");
        assert!(problems.is_empty());
        assert_eq!(module.chunk.statements.len(), 2);
        assert_eq!(module.chunk.statements[1].node.kind(), StatementKind::Expression);

        let (module, problems) = parse_collecting("withParam = function (foo, bar) end withParam(nil, nil)");
        assert!(problems.is_empty());
        assert_eq!(module.chunk.statements.len(), 2);
    }

    #[test]
    fn test_string_and_table_call_sugar() {
        let (module, problems) = parse_collecting("require 'mod' setup { a = 1 }");
        assert!(problems.is_empty());
        assert_eq!(module.chunk.statements.len(), 2);
        for stmt in &module.chunk.statements {
            match &stmt.node {
                Statement::Expression(expr) => assert_eq!(expr.node.kind(), ExprKind::Call),
                other => panic!("expected call statement, got {:?}", other.kind()),
            }
        }
    }

    #[test]
    fn test_vararg_parameter() {
        let (module, problems) = parse_collecting("method = function (...) end method()");
        assert!(problems.is_empty());
        match &assigned_value(&module).node {
            Expr::Function(body) => {
                assert!(body.is_vararg);
                assert!(body.params.is_empty());
            }
            other => panic!("expected function literal, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_function_literal_with_body() {
        let module = parse_str("method = function (var) return var + 1 end");
        match &assigned_value(&module).node {
            Expr::Function(body) => {
                assert_eq!(body.params.len(), 1);
                assert_eq!(body.body.statements.len(), 1);
                assert_eq!(body.body.statements[0].node.kind(), StatementKind::Return);
            }
            other => panic!("expected function literal, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_indexing() {
        let (module, problems) = parse_collecting("tab = {} tab[2] = 2");
        assert!(problems.is_empty());
        match &module.chunk.statements[1].node {
            Statement::Assign(assign) => {
                assert_eq!(assign.targets[0].node.kind(), ExprKind::Index);
            }
            other => panic!("expected assignment, got {:?}", other.kind()),
        }

        // Dotted access lowers to indexing with a string key.
        let (module, problems) = parse_collecting("mod = {} mod.field = 2");
        assert!(problems.is_empty());
        match &module.chunk.statements[1].node {
            Statement::Assign(assign) => match &assign.targets[0].node {
                Expr::Index(_, key) => assert_eq!(key.node, Expr::Str("field".to_string())),
                other => panic!("expected index, got {:?}", other.kind()),
            },
            other => panic!("expected assignment, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_invocation() {
        let (module, problems) = parse_collecting("mod:method()");
        assert!(problems.is_empty());
        match first_stmt(&module) {
            Statement::Expression(expr) => assert_eq!(expr.node.kind(), ExprKind::Invoke),
            other => panic!("expected expression statement, got {:?}", other.kind()),
        }

        let (module, problems) = parse_collecting("mod:table(arg)");
        assert!(problems.is_empty());
        assert!(!module.is_empty());
    }

    #[test]
    fn test_postfix_chaining() {
        // `y(ii):w(ty).y` is a chain of call/invoke/index applied successively to `y`.
        let module = parse_str("chain = y(ii):w(ty).y");
        match &assigned_value(&module).node {
            Expr::Index(object, key) => {
                assert_eq!(key.node, Expr::Str("y".to_string()));
                match &object.node {
                    Expr::Invoke(receiver, method, args) => {
                        assert_eq!(method.node, "w");
                        assert_eq!(args.len(), 1);
                        assert_eq!(receiver.node.kind(), ExprKind::Call);
                    }
                    other => panic!("expected invoke, got {:?}", other.kind()),
                }
            }
            other => panic!("expected index at the top of the chain, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_length_operator() {
        let module = parse_str("var = #tbl");
        match &assigned_value(&module).node {
            Expr::Unary(UnaryOp::Len, operand) => {
                assert_eq!(operand.node.kind(), ExprKind::Identifier);
            }
            other => panic!("expected length operator, got {:?}", other.kind()),
        }

        let (module, problems) = parse_collecting("var = #{}");
        assert!(problems.is_empty());
        assert!(!module.is_empty());
    }

    #[test]
    fn test_table_constructor() {
        let module = parse_str("t = {1, '2'}");
        match &assigned_value(&module).node {
            Expr::Table(fields) => {
                assert_eq!(fields.len(), 2);
                assert!(matches!(fields[0].node, TableField::Item(_)));
                assert!(matches!(fields[1].node, TableField::Item(_)));
            }
            other => panic!("expected table, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_table_pairs() {
        let module = parse_str("dic = {[1] = 'one', two = 2}");
        match &assigned_value(&module).node {
            Expr::Table(fields) => {
                assert_eq!(fields.len(), 2);
                assert!(matches!(fields[0].node, TableField::Keyed(..)));
                match &fields[1].node {
                    TableField::Named(name, _) => assert_eq!(name.node, "two"),
                    other => panic!("expected named pair, got {:?}", other),
                }
            }
            other => panic!("expected table, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_table_trailing_separators() {
        let (_, problems) = parse_collecting("t = {1, 2,}");
        assert!(problems.is_empty());
        let (_, problems) = parse_collecting("t = {1; '2'; }");
        assert!(problems.is_empty());
    }

    #[test]
    fn test_vararg_expression() {
        let (module, problems) = parse_collecting("f = function (...) return ... end");
        assert!(problems.is_empty());
        assert!(!module.is_empty());
    }

    // ========================================================================
    // Precedence and associativity
    // ========================================================================

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let module = parse_str("x = 1 + 2 * 3");
        match &assigned_value(&module).node {
            Expr::Binary(left, BinaryOp::Add, right) => {
                assert_eq!(left.node, Expr::Number(1.0));
                assert!(matches!(&right.node, Expr::Binary(_, BinaryOp::Mul, _)));
            }
            other => panic!("expected addition at the root, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_power_is_right_associative() {
        let module = parse_str("x = 2 ^ 3 ^ 2");
        match &assigned_value(&module).node {
            Expr::Binary(left, BinaryOp::Pow, right) => {
                assert_eq!(left.node, Expr::Number(2.0));
                assert!(matches!(&right.node, Expr::Binary(_, BinaryOp::Pow, _)));
            }
            other => panic!("expected power at the root, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_concat_is_right_associative() {
        let module = parse_str("x = a .. b .. c");
        match &assigned_value(&module).node {
            Expr::Binary(_, BinaryOp::Concat, right) => {
                assert!(matches!(&right.node, Expr::Binary(_, BinaryOp::Concat, _)));
            }
            other => panic!("expected concat at the root, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_unary_minus_binds_looser_than_power() {
        // -2 ^ 2 is -(2 ^ 2)
        let module = parse_str("x = -2 ^ 2");
        match &assigned_value(&module).node {
            Expr::Unary(UnaryOp::Neg, operand) => {
                assert!(matches!(&operand.node, Expr::Binary(_, BinaryOp::Pow, _)));
            }
            other => panic!("expected negation at the root, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_unary_binds_tighter_than_multiplication() {
        // -a * b is (-a) * b
        let module = parse_str("x = -a * b");
        match &assigned_value(&module).node {
            Expr::Binary(left, BinaryOp::Mul, _) => {
                assert!(matches!(&left.node, Expr::Unary(UnaryOp::Neg, _)));
            }
            other => panic!("expected multiplication at the root, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let module = parse_str("x = a or b and c");
        match &assigned_value(&module).node {
            Expr::Binary(_, BinaryOp::Or, right) => {
                assert!(matches!(&right.node, Expr::Binary(_, BinaryOp::And, _)));
            }
            other => panic!("expected 'or' at the root, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_comparison_below_concat() {
        // a .. b == c .. d compares the two concatenations.
        let module = parse_str("x = a .. b == c .. d");
        match &assigned_value(&module).node {
            Expr::Binary(left, BinaryOp::Eq, right) => {
                assert!(matches!(&left.node, Expr::Binary(_, BinaryOp::Concat, _)));
                assert!(matches!(&right.node, Expr::Binary(_, BinaryOp::Concat, _)));
            }
            other => panic!("expected comparison at the root, got {:?}", other.kind()),
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    #[test]
    fn test_local_declaration() {
        let module = parse_str("local a, b = 1, 2");
        match first_stmt(&module) {
            Statement::Local(local) => {
                assert_eq!(local.names.len(), 2);
                assert_eq!(local.values.len(), 2);
            }
            other => panic!("expected local, got {:?}", other.kind()),
        }

        let module = parse_str("local silent");
        match first_stmt(&module) {
            Statement::Local(local) => assert!(local.values.is_empty()),
            other => panic!("expected local, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_while_loop() {
        let (module, problems) = parse_collecting("while x > 0 do x = x - 1 end");
        assert!(problems.is_empty());
        match first_stmt(&module) {
            Statement::While(stmt) => {
                assert_eq!(stmt.body.statements.len(), 1);
                assert_eq!(stmt.condition.node.kind(), ExprKind::Binary);
            }
            other => panic!("expected while, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_repeat_loop() {
        let module = parse_str("repeat step() until done");
        match first_stmt(&module) {
            Statement::Repeat(stmt) => {
                assert_eq!(stmt.body.statements.len(), 1);
                assert_eq!(stmt.condition.node.kind(), ExprKind::Identifier);
            }
            other => panic!("expected repeat, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_if_elseif_else() {
        let (module, problems) =
            parse_collecting("if a then f() elseif b then g() elseif c then h() else i() end");
        assert!(problems.is_empty());
        match first_stmt(&module) {
            Statement::If(stmt) => {
                assert_eq!(stmt.then_body.statements.len(), 1);
                assert_eq!(stmt.elseif_branches.len(), 2);
                assert!(stmt.else_body.is_some());
            }
            other => panic!("expected if, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_numeric_for() {
        let module = parse_str("for i = 1, 10, 2 do f(i) end");
        match first_stmt(&module) {
            Statement::NumericFor(stmt) => {
                assert_eq!(stmt.var.node, "i");
                assert!(stmt.step.is_some());
                assert_eq!(stmt.body.statements.len(), 1);
            }
            other => panic!("expected numeric for, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_for_in_structure() {
        let (module, problems) = parse_collecting("for k, v in pairs(t) do body() end");
        assert!(problems.is_empty());
        match first_stmt(&module) {
            Statement::ForIn(stmt) => {
                // Both sub-lists are chunks of expression statements.
                assert_eq!(stmt.identifiers.statements.len(), 2);
                assert_eq!(stmt.expressions.statements.len(), 1);
                assert_eq!(stmt.body.statements.len(), 1);
                match &stmt.identifiers.statements[0].node {
                    Statement::Expression(expr) => {
                        assert_eq!(expr.node, Expr::Identifier("k".to_string()));
                    }
                    other => panic!("expected expression element, got {:?}", other.kind()),
                }
                match &stmt.expressions.statements[0].node {
                    Statement::Expression(expr) => assert_eq!(expr.node.kind(), ExprKind::Call),
                    other => panic!("expected expression element, got {:?}", other.kind()),
                }
            }
            other => panic!("expected for-in, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_function_declaration_name_path() {
        let module = parse_str("function a.b:c(x) return x end");
        match first_stmt(&module) {
            Statement::Function(stmt) => {
                assert_eq!(stmt.name.path.len(), 2);
                assert_eq!(stmt.name.path[0].node, "a");
                assert_eq!(stmt.name.path[1].node, "b");
                assert_eq!(stmt.name.method.as_ref().map(|m| m.node.as_str()), Some("c"));
            }
            other => panic!("expected function declaration, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_local_function() {
        let module = parse_str("local function helper() return 1 end");
        match first_stmt(&module) {
            Statement::LocalFunction(stmt) => assert_eq!(stmt.name.node, "helper"),
            other => panic!("expected local function, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_return_and_break() {
        let module = parse_str("f = function () return 1, 2 end");
        match &assigned_value(&module).node {
            Expr::Function(body) => match &body.body.statements[0].node {
                Statement::Return(ret) => assert_eq!(ret.values.len(), 2),
                other => panic!("expected return, got {:?}", other.kind()),
            },
            other => panic!("expected function literal, got {:?}", other.kind()),
        }

        let (module, problems) = parse_collecting("while true do break end");
        assert!(problems.is_empty());
        match first_stmt(&module) {
            Statement::While(stmt) => {
                assert_eq!(stmt.body.statements[0].node.kind(), StatementKind::Break);
            }
            other => panic!("expected while, got {:?}", other.kind()),
        }
    }

    // ========================================================================
    // Error recovery
    // ========================================================================

    #[test]
    fn test_malformed_statement_then_valid_sibling() {
        let (module, problems) = parse_collecting("x = = 1\ny = 2");
        assert_eq!(problems.len(), 1, "exactly one problem per malformed region");
        assert_eq!(module.chunk.statements.len(), 1);
        assert_eq!(first_stmt(&module).kind(), StatementKind::Assign);
    }

    #[test]
    fn test_recovery_inside_block() {
        let (module, problems) = parse_collecting("while ok do local = 5 print('ok') end");
        assert_eq!(problems.len(), 1);
        match first_stmt(&module) {
            Statement::While(stmt) => {
                // The valid call survives as a sibling inside the loop body.
                assert_eq!(stmt.body.statements.len(), 1);
                assert_eq!(stmt.body.statements[0].node.kind(), StatementKind::Expression);
            }
            other => panic!("expected while, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_missing_end_reports_once_and_closes_synthetically() {
        let (module, problems) = parse_collecting("while true do x()");
        assert_eq!(problems.len(), 1);
        assert!(problems[0].message.contains("Missing 'end'"));
        match first_stmt(&module) {
            Statement::While(stmt) => assert_eq!(stmt.body.statements.len(), 1),
            other => panic!("expected while, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_missing_until_closes_synthetically() {
        let (module, problems) = parse_collecting("repeat x()");
        assert_eq!(problems.len(), 1);
        assert!(problems[0].message.contains("Missing 'until'"));
        assert_eq!(first_stmt(&module).kind(), StatementKind::Repeat);
    }

    #[test]
    fn test_nested_constructs_all_closed_at_eof() {
        let (module, problems) = parse_collecting("function outer() if x then while y do f()");
        // One problem per unclosed construct, innermost first.
        assert_eq!(problems.len(), 3);
        assert!(problems.iter().all(|p| p.message.contains("before end of file")));
        assert_eq!(first_stmt(&module).kind(), StatementKind::Function);
    }

    #[test]
    fn test_non_call_expression_statement_is_reported_but_kept() {
        let (module, problems) = parse_collecting("tab.field");
        assert_eq!(problems.len(), 1);
        assert!(problems[0].message.contains("only calls can stand alone"));
        assert_eq!(module.chunk.statements.len(), 1);
        assert_eq!(first_stmt(&module).kind(), StatementKind::Expression);
    }

    #[test]
    fn test_stray_end_reports_one_problem() {
        let (module, problems) = parse_collecting("end x = 1");
        assert_eq!(problems.len(), 1);
        assert!(problems[0].message.contains("Unexpected 'end'"));
        assert_eq!(module.chunk.statements.len(), 1);
    }

    // ========================================================================
    // Result guarantees
    // ========================================================================

    #[test]
    fn test_statement_ranges_are_monotone_and_disjoint() {
        let module = parse_str("a = 1\nb = 2\nc = 3");
        let spans: Vec<Span> = module.chunk.statements.iter().map(|s| s.span).collect();
        assert_eq!(spans.len(), 3);
        for pair in spans.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
        for span in spans {
            assert!(module.span.contains(span));
        }
    }

    #[test]
    fn test_parse_is_deterministic() {
        let source = "local t = {}\nfor k, v in pairs(t) do t[k] = v + 1 end\nreturn t";
        let first = parse_str(source);
        let second = parse_str(source);
        assert_eq!(first, second);
    }

    #[test]
    fn test_kind_tags_are_stable() {
        assert_eq!(StatementKind::While as u32, 4);
        assert_eq!(StatementKind::ForIn as u32, 8);
        assert_eq!(StatementKind::Expression as u32, 13);
        assert_eq!(ExprKind::Invoke as u32, 14);

        let module = parse_str("while true do end");
        assert_eq!(first_stmt(&module).kind(), StatementKind::While);
    }

    #[test]
    fn test_chunk_accessor_is_uniform() {
        for source in [
            "do f() end",
            "while c do f() end",
            "repeat f() until c",
            "if c then f() end",
            "for i = 1, 2 do f() end",
            "for k in c do f() end",
            "function g() f() end",
        ] {
            let module = parse_str(source);
            let chunk = first_stmt(&module).chunk().expect(source);
            assert_eq!(chunk.statements.len(), 1, "{source}");
        }
        assert!(parse_str("break").chunk.statements[0].node.chunk().is_none());
    }

    // ========================================================================
    // Traversal order
    // ========================================================================

    #[test]
    fn test_invoke_visits_receiver_before_arguments() {
        let module = parse_str("obj:method(x)");
        let mut order = IdentifierOrder::default();
        walk_module(&mut order, &module);
        assert_eq!(order.names, vec!["obj", "x"]);
    }

    #[test]
    fn test_for_in_traversal_visits_body_then_identifiers_then_expressions() {
        let module = parse_str("for k, v in pairs(t) do body() end");
        let mut order = IdentifierOrder::default();
        walk_module(&mut order, &module);
        assert_eq!(order.names, vec!["body", "k", "v", "pairs", "t"]);
    }

    #[test]
    fn test_while_traversal_visits_body_before_condition() {
        let module = parse_str("while cond do body() end");
        let mut order = IdentifierOrder::default();
        walk_module(&mut order, &module);
        assert_eq!(order.names, vec!["body", "cond"]);
    }

    #[test]
    fn test_visitor_can_prune_subtrees() {
        struct PruneAll {
            expr_visits: usize,
            statement_exits: usize,
        }
        impl Visitor for PruneAll {
            fn visit_statement(&mut self, _stmt: &Spanned<Statement>) -> bool {
                false
            }
            fn endvisit_statement(&mut self, _stmt: &Spanned<Statement>) {
                self.statement_exits += 1;
            }
            fn visit_expr(&mut self, _expr: &Spanned<Expr>) -> bool {
                self.expr_visits += 1;
                true
            }
        }

        let module = parse_str("x = 1 + 2\ny = f(3)");
        let mut visitor = PruneAll {
            expr_visits: 0,
            statement_exits: 0,
        };
        walk_module(&mut visitor, &module);
        // Entry returned false, so no descent and no exit callbacks.
        assert_eq!(visitor.expr_visits, 0);
        assert_eq!(visitor.statement_exits, 0);
    }
}

//! Abstract Syntax Tree definitions for Lua
//!
//! This module defines all AST node types produced by the parser, the stable kind tags
//! consumed by downstream tooling, and the visitor protocol used to traverse a tree.
//!
//! The tree is a strict ownership tree: a [`Module`] owns every descendant node, nodes
//! carry no parent back-pointers, and nothing is mutated after a parse call returns.
//! A visitor that needs parent context tracks it itself during traversal.

use std::fmt;

/// Source location span (byte offsets, end-exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Return `true` if `other` lies entirely within this span.
    pub fn contains(self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// A node with source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Identifier spelling.
pub type Name = String;

// ============================================================================
// Module and chunks
// ============================================================================

/// Root of every parse: the whole source file.
///
/// A parse call always yields a `Module`, even for zero-length or fully invalid input;
/// "nothing was parsed" is signalled by [`Module::is_empty`], never by an absent result.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    /// File name label, carried for diagnostics only; the parser never touches disk.
    pub name: String,
    /// The top-level statement sequence.
    pub chunk: Chunk,
    pub span: Span,
}

impl Module {
    /// Return `true` if zero top-level statements were produced, either because the
    /// input was empty or because nothing parsed before recovery gave up.
    ///
    /// Downstream consumers branch on this as a first-class signal, not an error case.
    pub fn is_empty(&self) -> bool {
        self.chunk.statements.is_empty()
    }
}

/// A block of statements.
///
/// Every compound construct embeds one: loop bodies, function bodies, and conditional
/// branches are all "a chunk plus extra fields" rather than independent trees.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub span: Span,
    pub statements: Vec<Spanned<Statement>>,
}

impl Chunk {
    pub fn new(span: Span, statements: Vec<Spanned<Statement>>) -> Self {
        Self { span, statements }
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `a, b.c = e1, e2`
    Assign(AssignStmt),
    /// `local a, b = e1, e2`
    Local(LocalStmt),
    /// `do ... end`
    Do(Chunk),
    /// `while cond do ... end`
    While(WhileStmt),
    /// `repeat ... until cond`
    Repeat(RepeatStmt),
    /// `if cond then ... [elseif ...] [else ...] end`
    If(IfStmt),
    /// `for i = start, limit[, step] do ... end`
    NumericFor(NumericForStmt),
    /// `for k, v in e1, e2 do ... end`
    ForIn(ForInStmt),
    /// `function a.b:c(...) ... end`
    Function(FunctionStmt),
    /// `local function f(...) ... end`
    LocalFunction(LocalFunctionStmt),
    /// `return [e1, e2]`
    Return(ReturnStmt),
    /// `break`
    Break,
    /// An expression in statement position: function/method calls standing alone, and
    /// the element form used inside [`ForInStmt`] sub-chunks so those lists stay
    /// traversable as blocks.
    Expression(Spanned<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    /// Left-hand sides; identifiers or index expressions.
    pub targets: Vec<Spanned<Expr>>,
    pub values: Vec<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalStmt {
    pub names: Vec<Spanned<Name>>,
    /// Empty for a bare `local a, b` declaration.
    pub values: Vec<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Spanned<Expr>,
    pub body: Chunk,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepeatStmt {
    pub body: Chunk,
    pub condition: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Spanned<Expr>,
    pub then_body: Chunk,
    pub elseif_branches: Vec<(Spanned<Expr>, Chunk)>,
    pub else_body: Option<Chunk>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumericForStmt {
    pub var: Spanned<Name>,
    pub start: Spanned<Expr>,
    pub limit: Spanned<Expr>,
    pub step: Option<Spanned<Expr>>,
    pub body: Chunk,
}

/// Generic `for ... in ...` loop.
///
/// The node's own statement sequence is the loop body, while the loop-variable list and
/// the iterator-expression list are held as two named sub-chunks of
/// [`Statement::Expression`] elements. Both sub-lists reuse the chunk machinery rather
/// than a dedicated list type, so each one supports traversal on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ForInStmt {
    pub identifiers: Chunk,
    pub expressions: Chunk,
    pub body: Chunk,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionStmt {
    pub name: FunctionName,
    pub body: FunctionBody,
}

/// Target of a `function` declaration: `a`, `a.b.c`, or `a.b:m`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionName {
    pub path: Vec<Spanned<Name>>,
    /// Final `:method` segment, which gives the function an implicit `self` receiver.
    pub method: Option<Spanned<Name>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalFunctionStmt {
    pub name: Spanned<Name>,
    pub body: FunctionBody,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub values: Vec<Spanned<Expr>>,
}

/// Parameter list and body shared by function declarations and function literals.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionBody {
    pub params: Vec<Spanned<Name>>,
    /// `true` when the parameter list ends with the vararg marker `...`.
    pub is_vararg: bool,
    pub body: Chunk,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `nil`
    Nil,
    /// `true`
    True,
    /// `false`
    False,
    /// Numeric literal; Lua 5.1 numbers are doubles.
    Number(f64),
    /// String literal, escapes resolved.
    Str(String),
    /// The vararg expression `...`
    Dots,
    /// Identifier reference.
    Identifier(Name),
    /// Binary operation: `a + b`
    Binary(Box<Spanned<Expr>>, BinaryOp, Box<Spanned<Expr>>),
    /// Unary operation: `-x`, `not x`, `#t`
    Unary(UnaryOp, Box<Spanned<Expr>>),
    /// Function literal: `function (a, b) ... end`
    Function(FunctionBody),
    /// Table constructor: `{1, 'two', [k] = v, name = w}`
    Table(Vec<Spanned<TableField>>),
    /// Indexing: `a[b]`, and `a.b` with the key lowered to a string literal.
    Index(Box<Spanned<Expr>>, Box<Spanned<Expr>>),
    /// Call: `f(args)`, `f 'arg'`, `f {fields}`
    Call(Box<Spanned<Expr>>, Vec<Spanned<Expr>>),
    /// Method invocation: `obj:m(args)`, a call tagged with its implicit receiver.
    Invoke(Box<Spanned<Expr>>, Spanned<Name>, Vec<Spanned<Expr>>),
    /// Parenthesized expression; kept explicit because parentheses truncate
    /// multiple-value expressions in Lua.
    Paren(Box<Spanned<Expr>>),
}

/// One entry of a table constructor.
#[derive(Debug, Clone, PartialEq)]
pub enum TableField {
    /// `value` — positional, assigned the next array index.
    Item(Spanned<Expr>),
    /// `[key] = value`
    Keyed(Spanned<Expr>, Spanned<Expr>),
    /// `name = value`
    Named(Spanned<Name>, Spanned<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Concat,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Sub => write!(f, "-"),
            BinaryOp::Mul => write!(f, "*"),
            BinaryOp::Div => write!(f, "/"),
            BinaryOp::Mod => write!(f, "%"),
            BinaryOp::Pow => write!(f, "^"),
            BinaryOp::Concat => write!(f, ".."),
            BinaryOp::Eq => write!(f, "=="),
            BinaryOp::NotEq => write!(f, "~="),
            BinaryOp::Lt => write!(f, "<"),
            BinaryOp::LtEq => write!(f, "<="),
            BinaryOp::Gt => write!(f, ">"),
            BinaryOp::GtEq => write!(f, ">="),
            BinaryOp::And => write!(f, "and"),
            BinaryOp::Or => write!(f, "or"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
    Len,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Not => write!(f, "not"),
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Len => write!(f, "#"),
        }
    }
}

// ============================================================================
// Kind tags
// ============================================================================

/// Grammatical category of a statement, for switch-style dispatch by external tooling.
///
/// Tag values are part of the external API: new variants get new values at the end,
/// existing values never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum StatementKind {
    Assign = 1,
    Local = 2,
    Do = 3,
    While = 4,
    Repeat = 5,
    If = 6,
    NumericFor = 7,
    ForIn = 8,
    Function = 9,
    LocalFunction = 10,
    Return = 11,
    Break = 12,
    Expression = 13,
}

/// Grammatical category of an expression. Same stability rules as [`StatementKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ExprKind {
    Nil = 1,
    True = 2,
    False = 3,
    Number = 4,
    Str = 5,
    Dots = 6,
    Identifier = 7,
    Binary = 8,
    Unary = 9,
    Function = 10,
    Table = 11,
    Index = 12,
    Call = 13,
    Invoke = 14,
    Paren = 15,
}

impl Statement {
    pub fn kind(&self) -> StatementKind {
        match self {
            Statement::Assign(_) => StatementKind::Assign,
            Statement::Local(_) => StatementKind::Local,
            Statement::Do(_) => StatementKind::Do,
            Statement::While(_) => StatementKind::While,
            Statement::Repeat(_) => StatementKind::Repeat,
            Statement::If(_) => StatementKind::If,
            Statement::NumericFor(_) => StatementKind::NumericFor,
            Statement::ForIn(_) => StatementKind::ForIn,
            Statement::Function(_) => StatementKind::Function,
            Statement::LocalFunction(_) => StatementKind::LocalFunction,
            Statement::Return(_) => StatementKind::Return,
            Statement::Break => StatementKind::Break,
            Statement::Expression(_) => StatementKind::Expression,
        }
    }

    /// The embedded statement sequence, for statements that carry a block.
    ///
    /// Every block-bearing statement exposes its body through this one accessor,
    /// regardless of variant; `if` returns its `then` branch.
    pub fn chunk(&self) -> Option<&Chunk> {
        match self {
            Statement::Do(chunk) => Some(chunk),
            Statement::While(stmt) => Some(&stmt.body),
            Statement::Repeat(stmt) => Some(&stmt.body),
            Statement::If(stmt) => Some(&stmt.then_body),
            Statement::NumericFor(stmt) => Some(&stmt.body),
            Statement::ForIn(stmt) => Some(&stmt.body),
            Statement::Function(stmt) => Some(&stmt.body.body),
            Statement::LocalFunction(stmt) => Some(&stmt.body.body),
            _ => None,
        }
    }
}

impl Expr {
    pub fn kind(&self) -> ExprKind {
        match self {
            Expr::Nil => ExprKind::Nil,
            Expr::True => ExprKind::True,
            Expr::False => ExprKind::False,
            Expr::Number(_) => ExprKind::Number,
            Expr::Str(_) => ExprKind::Str,
            Expr::Dots => ExprKind::Dots,
            Expr::Identifier(_) => ExprKind::Identifier,
            Expr::Binary(..) => ExprKind::Binary,
            Expr::Unary(..) => ExprKind::Unary,
            Expr::Function(_) => ExprKind::Function,
            Expr::Table(_) => ExprKind::Table,
            Expr::Index(..) => ExprKind::Index,
            Expr::Call(..) => ExprKind::Call,
            Expr::Invoke(..) => ExprKind::Invoke,
            Expr::Paren(_) => ExprKind::Paren,
        }
    }
}

// ============================================================================
// Visitor protocol for AST traversal
// ============================================================================

/// Entry/exit visitor over a syntax tree.
///
/// Each `visit_*` is called on entry and returns whether to descend into the node's
/// children; the matching `endvisit_*` fires on exit only when entry returned `true`.
/// All methods default to continue/no-op, so consumers implement just the hooks they
/// care about and dispatch on [`Statement::kind`] / [`Expr::kind`].
///
/// Traversal order is part of the contract (outliners and assist engines rely on it)
/// and is owned by the `walk_*` functions, which compound statements delegate to:
/// block-bearing statements traverse their embedded chunk's statements first, then
/// their extra children in declaration order.
pub trait Visitor {
    fn visit_module(&mut self, _module: &Module) -> bool {
        true
    }
    fn endvisit_module(&mut self, _module: &Module) {}

    fn visit_chunk(&mut self, _chunk: &Chunk) -> bool {
        true
    }
    fn endvisit_chunk(&mut self, _chunk: &Chunk) {}

    fn visit_statement(&mut self, _stmt: &Spanned<Statement>) -> bool {
        true
    }
    fn endvisit_statement(&mut self, _stmt: &Spanned<Statement>) {}

    fn visit_expr(&mut self, _expr: &Spanned<Expr>) -> bool {
        true
    }
    fn endvisit_expr(&mut self, _expr: &Spanned<Expr>) {}
}

/// Traverse a module: every top-level statement in source order.
pub fn walk_module<V: Visitor + ?Sized>(visitor: &mut V, module: &Module) {
    if !visitor.visit_module(module) {
        return;
    }
    for stmt in &module.chunk.statements {
        walk_statement(visitor, stmt);
    }
    visitor.endvisit_module(module);
}

/// Traverse a chunk node (used for the sub-chunks of `for ... in` and `if` branches;
/// the body of a block-bearing statement is traversed directly by [`walk_statement`]).
pub fn walk_chunk<V: Visitor + ?Sized>(visitor: &mut V, chunk: &Chunk) {
    if !visitor.visit_chunk(chunk) {
        return;
    }
    for stmt in &chunk.statements {
        walk_statement(visitor, stmt);
    }
    visitor.endvisit_chunk(chunk);
}

pub fn walk_statement<V: Visitor + ?Sized>(visitor: &mut V, stmt: &Spanned<Statement>) {
    if !visitor.visit_statement(stmt) {
        return;
    }
    match &stmt.node {
        Statement::Assign(assign) => {
            for target in &assign.targets {
                walk_expr(visitor, target);
            }
            for value in &assign.values {
                walk_expr(visitor, value);
            }
        }
        Statement::Local(local) => {
            for value in &local.values {
                walk_expr(visitor, value);
            }
        }
        Statement::Do(chunk) => {
            for inner in &chunk.statements {
                walk_statement(visitor, inner);
            }
        }
        Statement::While(stmt) => {
            for inner in &stmt.body.statements {
                walk_statement(visitor, inner);
            }
            walk_expr(visitor, &stmt.condition);
        }
        Statement::Repeat(stmt) => {
            for inner in &stmt.body.statements {
                walk_statement(visitor, inner);
            }
            walk_expr(visitor, &stmt.condition);
        }
        Statement::If(stmt) => {
            walk_expr(visitor, &stmt.condition);
            walk_chunk(visitor, &stmt.then_body);
            for (condition, body) in &stmt.elseif_branches {
                walk_expr(visitor, condition);
                walk_chunk(visitor, body);
            }
            if let Some(else_body) = &stmt.else_body {
                walk_chunk(visitor, else_body);
            }
        }
        Statement::NumericFor(stmt) => {
            for inner in &stmt.body.statements {
                walk_statement(visitor, inner);
            }
            walk_expr(visitor, &stmt.start);
            walk_expr(visitor, &stmt.limit);
            if let Some(step) = &stmt.step {
                walk_expr(visitor, step);
            }
        }
        Statement::ForIn(stmt) => {
            // Body first, then the named sub-chunks in declaration order.
            for inner in &stmt.body.statements {
                walk_statement(visitor, inner);
            }
            walk_chunk(visitor, &stmt.identifiers);
            walk_chunk(visitor, &stmt.expressions);
        }
        Statement::Function(stmt) => {
            for inner in &stmt.body.body.statements {
                walk_statement(visitor, inner);
            }
        }
        Statement::LocalFunction(stmt) => {
            for inner in &stmt.body.body.statements {
                walk_statement(visitor, inner);
            }
        }
        Statement::Return(ret) => {
            for value in &ret.values {
                walk_expr(visitor, value);
            }
        }
        Statement::Break => {}
        Statement::Expression(expr) => walk_expr(visitor, expr),
    }
    visitor.endvisit_statement(stmt);
}

pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: &Spanned<Expr>) {
    if !visitor.visit_expr(expr) {
        return;
    }
    match &expr.node {
        Expr::Nil
        | Expr::True
        | Expr::False
        | Expr::Number(_)
        | Expr::Str(_)
        | Expr::Dots
        | Expr::Identifier(_) => {}
        Expr::Binary(left, _, right) => {
            walk_expr(visitor, left);
            walk_expr(visitor, right);
        }
        Expr::Unary(_, operand) => walk_expr(visitor, operand),
        Expr::Function(body) => {
            for inner in &body.body.statements {
                walk_statement(visitor, inner);
            }
        }
        Expr::Table(fields) => {
            for field in fields {
                match &field.node {
                    TableField::Item(value) => walk_expr(visitor, value),
                    TableField::Keyed(key, value) => {
                        walk_expr(visitor, key);
                        walk_expr(visitor, value);
                    }
                    TableField::Named(_, value) => walk_expr(visitor, value),
                }
            }
        }
        Expr::Index(object, key) => {
            walk_expr(visitor, object);
            walk_expr(visitor, key);
        }
        Expr::Call(callee, args) => {
            walk_expr(visitor, callee);
            for arg in args {
                walk_expr(visitor, arg);
            }
        }
        Expr::Invoke(receiver, _, args) => {
            // Receiver before arguments; indexers depend on this order.
            walk_expr(visitor, receiver);
            for arg in args {
                walk_expr(visitor, arg);
            }
        }
        Expr::Paren(inner) => walk_expr(visitor, inner),
    }
    visitor.endvisit_expr(expr);
}

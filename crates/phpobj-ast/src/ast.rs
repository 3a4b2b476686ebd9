use serde::Serialize;

use crate::Span;

/// The root node of a parsed source file.
#[derive(Debug, Clone, Serialize)]
pub struct Program {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

// =============================================================================
// Statements
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
#[allow(clippy::large_enum_variant)]
pub enum StmtKind {
    /// Expression statement (e.g. `foo();`)
    Expression(Expr),

    /// Echo statement: `echo expr1, expr2;`
    Echo(Vec<Expr>),

    /// Return statement: `return expr;`
    Return(Option<Expr>),

    /// Throw statement: `throw expr;`
    Throw(Expr),

    /// Block statement: `{ stmts }`
    Block(Vec<Stmt>),

    /// If statement. `elseif` chains nest in the else branch.
    If(IfStmt),

    /// While loop
    While(WhileStmt),

    /// Try/catch/finally
    TryCatch(TryCatchStmt),

    /// Function declaration
    Function(FunctionStmt),

    /// Class declaration
    Class(ClassDecl),

    /// Interface declaration
    Interface(InterfaceDecl),

    /// Empty statement `;`
    Nop,

    /// Text outside of `<?php ... ?>`
    InlineHtml(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TryCatchStmt {
    pub body: Vec<Stmt>,
    pub catches: Vec<CatchClause>,
    pub finally: Option<Vec<Stmt>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatchClause {
    pub types: Vec<String>,
    pub var: Option<String>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

// =============================================================================
// Functions
// =============================================================================

/// A function signature without a body.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub params: Vec<Param>,
    pub by_ref: bool,
    pub return_type: Option<String>,
    pub span: Span,
}

/// A function signature together with its statement body.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionStmt {
    pub definition: FunctionDefinition,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Param {
    /// Parameter name including the `$` sigil.
    pub name: String,
    pub type_hint: Option<String>,
    pub by_ref: bool,
    pub variadic: bool,
    pub default: Option<Expr>,
    pub span: Span,
}

// =============================================================================
// OOP Declarations
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassModifiers {
    pub is_abstract: bool,
    pub is_final: bool,
}

/// A class declaration. Each member sequence keeps declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct ClassDecl {
    pub name: String,
    pub modifiers: ClassModifiers,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub methods: Vec<Method>,
    pub properties: Vec<Property>,
    pub constants: Vec<Constant>,
}

/// An interface declaration. Interface methods are always [`MethodFunction::Signature`].
#[derive(Debug, Clone, Serialize)]
pub struct InterfaceDecl {
    pub name: String,
    pub inherits: Vec<String>,
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Method {
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_final: bool,
    pub function: MethodFunction,
    pub span: Span,
}

/// A method owns either a bare signature (abstract and interface methods)
/// or a full function with body, never both.
#[derive(Debug, Clone, Serialize)]
pub enum MethodFunction {
    Signature(FunctionDefinition),
    Body(FunctionStmt),
}

impl Method {
    pub fn definition(&self) -> &FunctionDefinition {
        match &self.function {
            MethodFunction::Signature(def) => def,
            MethodFunction::Body(func) => &func.definition,
        }
    }

    pub fn name(&self) -> &str {
        &self.definition().name
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self.function, MethodFunction::Signature(_))
    }

    pub fn body(&self) -> Option<&[Stmt]> {
        match &self.function {
            MethodFunction::Signature(_) => None,
            MethodFunction::Body(func) => Some(&func.body),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Property {
    pub visibility: Visibility,
    pub is_static: bool,
    /// Property name including the `$` sigil.
    pub name: String,
    pub initialization: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct Constant {
    pub variable: Variable,
    pub value: Option<Expr>,
    pub span: Span,
}

/// A named variable. The name is stored without the `$` sigil.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub name: String,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

// =============================================================================
// Expressions
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub enum ExprKind {
    /// Integer literal
    Int(i64),

    /// Float literal
    Float(f64),

    /// String literal, quotes removed
    String(String),

    /// Boolean literal
    Bool(bool),

    /// Null literal
    Null,

    /// Variable: `$name`
    Variable(Variable),

    /// Variable variable: `$$name` or `${expr}`
    VariableVariable(Box<Expr>),

    /// Bare name, e.g. a class name or a function name in a call
    Identifier(String),

    /// Array literal: `[1, 2]`, `['a' => 1]`, `array(1, 2)`
    Array(Vec<ArrayElement>),

    /// Assignment: `$x = expr` or `$x += expr`
    Assign(AssignExpr),

    /// Binary operation: `expr op expr`
    Binary(BinaryExpr),

    /// Unary prefix: `-expr`, `!expr`, `++$x`
    UnaryPrefix(UnaryPrefixExpr),

    /// Unary postfix: `$x++`, `$x--`
    UnaryPostfix(UnaryPostfixExpr),

    /// Parenthesized expression: `(expr)`
    Parenthesized(Box<Expr>),

    /// Clone: `clone $obj`
    Clone(Box<Expr>),

    /// Function call: `name(args)`
    FunctionCall(FunctionCallExpr),

    /// Instantiation: `new Class(args)`
    New(NewExpr),

    /// Property access: `$obj->prop`
    PropertyAccess(PropertyAccessExpr),

    /// Method call: `$obj->method(args)`
    MethodCall(MethodCallExpr),

    /// Class constant access: `Class::CONST`
    ClassConstAccess(StaticAccessExpr),

    /// Static method call: `Class::method(args)`
    StaticMethodCall(StaticMethodCallExpr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignOp {
    Assign,
    Plus,
    Minus,
    Mul,
    Div,
    Concat,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignExpr {
    pub target: Box<Expr>,
    pub op: AssignOp,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Concat,
    Equal,
    NotEqual,
    Identical,
    NotIdentical,
    Less,
    Greater,
    LessOrEqual,
    GreaterOrEqual,
    BooleanAnd,
    BooleanOr,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    LogicalAnd,
    LogicalOr,
    LogicalXor,
    Coalesce,
    Instanceof,
}

#[derive(Debug, Clone, Serialize)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub op: BinaryOp,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryPrefixOp {
    Negate,
    Plus,
    BooleanNot,
    BitwiseNot,
    PreIncrement,
    PreDecrement,
    ErrorSuppress,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnaryPrefixExpr {
    pub op: UnaryPrefixOp,
    pub operand: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryPostfixOp {
    PostIncrement,
    PostDecrement,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnaryPostfixExpr {
    pub operand: Box<Expr>,
    pub op: UnaryPostfixOp,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArrayElement {
    pub key: Option<Expr>,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionCallExpr {
    pub name: Box<Expr>,
    pub args: Vec<Expr>,
}

// --- OOP Expression sub-types ---

#[derive(Debug, Clone, Serialize)]
pub struct NewExpr {
    pub class: Box<Expr>,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyAccessExpr {
    pub receiver: Box<Expr>,
    pub name: Box<Expr>,
}

/// `receiver->name(args)`: the callee name and arguments live in `call`.
#[derive(Debug, Clone, Serialize)]
pub struct MethodCallExpr {
    pub receiver: Box<Expr>,
    pub call: FunctionCallExpr,
}

#[derive(Debug, Clone, Serialize)]
pub struct StaticAccessExpr {
    pub class: Box<Expr>,
    pub member: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StaticMethodCallExpr {
    pub class: Box<Expr>,
    pub method: String,
    pub args: Vec<Expr>,
}

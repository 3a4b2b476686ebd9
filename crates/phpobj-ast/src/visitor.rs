use crate::ast::*;

/// Visitor trait for syntax tree traversal. All methods have default
/// implementations that recursively walk child nodes, so implementors only
/// need to override the node types they care about.
pub trait Visitor {
    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_param(&mut self, param: &Param) {
        walk_param(self, param);
    }

    fn visit_method(&mut self, method: &Method) {
        walk_method(self, method);
    }

    fn visit_property(&mut self, property: &Property) {
        walk_property(self, property);
    }

    fn visit_constant(&mut self, constant: &Constant) {
        walk_constant(self, constant);
    }
}

pub fn walk_program<V: Visitor + ?Sized>(visitor: &mut V, program: &Program) {
    for stmt in &program.stmts {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_stmt<V: Visitor + ?Sized>(visitor: &mut V, stmt: &Stmt) {
    match &stmt.kind {
        StmtKind::Expression(expr) | StmtKind::Throw(expr) => {
            visitor.visit_expr(expr);
        }
        StmtKind::Echo(exprs) => {
            for expr in exprs {
                visitor.visit_expr(expr);
            }
        }
        StmtKind::Return(expr) => {
            if let Some(expr) = expr {
                visitor.visit_expr(expr);
            }
        }
        StmtKind::Block(stmts) => {
            for stmt in stmts {
                visitor.visit_stmt(stmt);
            }
        }
        StmtKind::If(if_stmt) => {
            visitor.visit_expr(&if_stmt.condition);
            visitor.visit_stmt(&if_stmt.then_branch);
            if let Some(else_branch) = &if_stmt.else_branch {
                visitor.visit_stmt(else_branch);
            }
        }
        StmtKind::While(while_stmt) => {
            visitor.visit_expr(&while_stmt.condition);
            visitor.visit_stmt(&while_stmt.body);
        }
        StmtKind::TryCatch(tc) => {
            for stmt in &tc.body {
                visitor.visit_stmt(stmt);
            }
            for catch in &tc.catches {
                for stmt in &catch.body {
                    visitor.visit_stmt(stmt);
                }
            }
            if let Some(finally) = &tc.finally {
                for stmt in finally {
                    visitor.visit_stmt(stmt);
                }
            }
        }
        StmtKind::Function(func) => {
            for param in &func.definition.params {
                visitor.visit_param(param);
            }
            for stmt in &func.body {
                visitor.visit_stmt(stmt);
            }
        }
        StmtKind::Class(class) => {
            for constant in &class.constants {
                visitor.visit_constant(constant);
            }
            for property in &class.properties {
                visitor.visit_property(property);
            }
            for method in &class.methods {
                visitor.visit_method(method);
            }
        }
        StmtKind::Interface(iface) => {
            for method in &iface.methods {
                visitor.visit_method(method);
            }
        }
        StmtKind::Nop | StmtKind::InlineHtml(_) => {}
    }
}

pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expr) {
    match &expr.kind {
        ExprKind::Assign(assign) => {
            visitor.visit_expr(&assign.target);
            visitor.visit_expr(&assign.value);
        }
        ExprKind::Binary(binary) => {
            visitor.visit_expr(&binary.left);
            visitor.visit_expr(&binary.right);
        }
        ExprKind::UnaryPrefix(unary) => {
            visitor.visit_expr(&unary.operand);
        }
        ExprKind::UnaryPostfix(unary) => {
            visitor.visit_expr(&unary.operand);
        }
        ExprKind::Parenthesized(inner) | ExprKind::Clone(inner) | ExprKind::VariableVariable(inner) => {
            visitor.visit_expr(inner);
        }
        ExprKind::Array(elements) => {
            for elem in elements {
                if let Some(key) = &elem.key {
                    visitor.visit_expr(key);
                }
                visitor.visit_expr(&elem.value);
            }
        }
        ExprKind::FunctionCall(call) => {
            visitor.visit_expr(&call.name);
            for arg in &call.args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::New(new_expr) => {
            visitor.visit_expr(&new_expr.class);
            for arg in &new_expr.args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::PropertyAccess(access) => {
            visitor.visit_expr(&access.receiver);
            visitor.visit_expr(&access.name);
        }
        ExprKind::MethodCall(call) => {
            visitor.visit_expr(&call.receiver);
            visitor.visit_expr(&call.call.name);
            for arg in &call.call.args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::ClassConstAccess(access) => {
            visitor.visit_expr(&access.class);
        }
        ExprKind::StaticMethodCall(call) => {
            visitor.visit_expr(&call.class);
            for arg in &call.args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::Int(_)
        | ExprKind::Float(_)
        | ExprKind::String(_)
        | ExprKind::Bool(_)
        | ExprKind::Null
        | ExprKind::Variable(_)
        | ExprKind::Identifier(_) => {}
    }
}

pub fn walk_param<V: Visitor + ?Sized>(visitor: &mut V, param: &Param) {
    if let Some(default) = &param.default {
        visitor.visit_expr(default);
    }
}

pub fn walk_method<V: Visitor + ?Sized>(visitor: &mut V, method: &Method) {
    for param in &method.definition().params {
        visitor.visit_param(param);
    }
    if let Some(body) = method.body() {
        for stmt in body {
            visitor.visit_stmt(stmt);
        }
    }
}

pub fn walk_property<V: Visitor + ?Sized>(visitor: &mut V, property: &Property) {
    if let Some(init) = &property.initialization {
        visitor.visit_expr(init);
    }
}

pub fn walk_constant<V: Visitor + ?Sized>(visitor: &mut V, constant: &Constant) {
    if let Some(value) = &constant.value {
        visitor.visit_expr(value);
    }
}

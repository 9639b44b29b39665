//! Renders a program tree back as source text.
//!
//! The plain output parses back to the same tree (implicit conversions are
//! not printed). With annotations on, every expression is followed by its
//! type as `/* type */` and implicit conversions show up as `rvalue(...)`.

use crate::types::{
    interner::TypeInterner,
    types::{Type, TypeId},
};

use super::{
    ast::{Decl, FnDecl, FnDef, Module},
    expressions::{Expr, ExprKind},
    statements::{BlockStmt, Stmt},
};

const INDENT: &str = "    ";

pub struct TreePrinter<'t> {
    types: &'t TypeInterner,
    annotate: bool,
    out: String,
    depth: usize,
}

impl<'t> TreePrinter<'t> {
    pub fn new(types: &'t TypeInterner) -> Self {
        TreePrinter {
            types,
            annotate: false,
            out: String::new(),
            depth: 0,
        }
    }

    pub fn annotated(types: &'t TypeInterner) -> Self {
        TreePrinter {
            annotate: true,
            ..TreePrinter::new(types)
        }
    }

    /// Prints a file-level module: its imports and declarations, unwrapped.
    pub fn print_program(mut self, module: &Module) -> String {
        self.module_body(module);
        self.out
    }

    pub fn print_expr(mut self, expr: &Expr) -> String {
        self.expr(expr);
        self.out
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn module_body(&mut self, module: &Module) {
        for import in &module.imports {
            self.line(&format!("import {};", import.name));
        }

        for decl in &module.declarations {
            self.decl(decl);
        }
    }

    fn decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Function(decl) => self.fn_decl(decl),
            Decl::Definition(def) => self.fn_def(def),
            Decl::Module(module) => {
                self.line(&format!("mod {} {{", module.name));
                self.depth += 1;
                self.module_body(module);
                self.depth -= 1;
                self.line("}");
            }
        }
    }

    fn signature(&self, name: &str, ty: TypeId, params: &[String]) -> String {
        let (return_type, param_types) = match self.types.get(ty) {
            Type::Function {
                return_type,
                params,
            } => (*return_type, params.clone()),
            _ => (self.types.void(), vec![]),
        };

        let params: Vec<String> = params
            .iter()
            .zip(param_types.iter())
            .map(|(name, ty)| format!("{}: {}", name, self.types.display(*ty)))
            .collect();

        let mut signature = format!("func {}({})", name, params.join(", "));
        if return_type != self.types.void() {
            signature.push_str(&format!(" -> {}", self.types.display(return_type)));
        }
        signature
    }

    fn fn_decl(&mut self, decl: &FnDecl) {
        let signature = self.signature(&decl.name, decl.ty, &decl.params);
        if decl.is_extern {
            self.line(&format!("extern {};", signature));
        } else {
            self.line(&format!("{};", signature));
        }
    }

    fn fn_def(&mut self, def: &FnDef) {
        let signature = self.signature(&def.name, def.ty, &def.params);
        self.line(&format!("{} {{", signature));
        self.block_body(&def.body);
        self.line("}");
    }

    fn block_body(&mut self, block: &BlockStmt) {
        self.depth += 1;
        for stmt in block.iter() {
            self.stmt(stmt);
        }
        self.depth -= 1;
    }

    fn render(&self, expr: &Expr) -> String {
        let mut printer = TreePrinter {
            types: self.types,
            annotate: self.annotate,
            out: String::new(),
            depth: 0,
        };
        printer.expr(expr);
        printer.out
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(block) => {
                self.line("{");
                self.block_body(block);
                self.line("}");
            }
            Stmt::Let(stmt) => {
                let mut text = format!("let {}", stmt.name);
                if let Some(ty) = stmt.declared_type {
                    text.push_str(&format!(": {}", self.types.display(ty)));
                }
                if let Some(init) = &stmt.initializer {
                    text.push_str(&format!(" = {}", self.render(init)));
                }
                text.push(';');
                self.line(&text);
            }
            Stmt::Expression(stmt) => match &stmt.expression {
                Some(expr) => {
                    let text = format!("{};", self.render(expr));
                    self.line(&text);
                }
                None => self.line(";"),
            },
            Stmt::If(stmt) => {
                for (index, (condition, body)) in stmt.branches.iter().enumerate() {
                    let keyword = if index == 0 { "if" } else { "} else if" };
                    let text = format!("{} {} {{", keyword, self.render(condition));
                    self.line(&text);
                    self.block_body(body);
                }
                if let Some(else_body) = &stmt.else_body {
                    self.line("} else {");
                    self.block_body(else_body);
                }
                self.line("}");
            }
            Stmt::While(stmt) => {
                let text = format!("while {} {{", self.render(&stmt.condition));
                self.line(&text);
                self.block_body(&stmt.body);
                self.line("}");
            }
            Stmt::Return(stmt) => match &stmt.value {
                Some(value) => {
                    let text = format!("return {};", self.render(value));
                    self.line(&text);
                }
                None => self.line("return;"),
            },
        }
    }

    /// Prints an operand, wrapping it when it would otherwise bind differently.
    fn operand(&mut self, expr: &Expr, wrap_unary: bool) {
        let needs_parens = match &expr.strip_implicit().kind {
            ExprKind::Binary { .. } | ExprKind::Cast { .. } => true,
            ExprKind::Unary { .. } => wrap_unary,
            _ => false,
        };

        if needs_parens {
            self.out.push('(');
            self.expr(expr);
            self.out.push(')');
        } else {
            self.expr(expr);
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Binary { op, lhs, rhs } => {
                self.operand(lhs, false);
                self.out.push_str(&format!(" {} ", op.symbol()));
                self.operand(rhs, false);
            }
            ExprKind::Unary { op, operand } => {
                self.out.push_str(op.symbol());
                self.operand(operand, true);
            }
            ExprKind::Subscript { base, index } => {
                self.operand(base, true);
                self.out.push('[');
                self.expr(index);
                self.out.push(']');
            }
            ExprKind::Call { callee, arguments } => {
                self.expr(callee);
                self.out.push('(');
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        self.out.push_str(", ");
                    }
                    self.expr(argument);
                }
                self.out.push(')');
            }
            ExprKind::Cast { expr: inner, target } => {
                self.operand(inner, false);
                self.out
                    .push_str(&format!(" as {}", self.types.display(*target)));
            }
            ExprKind::LValueToRValue(inner) => {
                if self.annotate {
                    self.out.push_str("rvalue(");
                    self.expr(inner);
                    self.out.push(')');
                } else {
                    self.expr(inner);
                }
                // the inner expression already carries its own annotation
                return;
            }
            ExprKind::Identifier(identifier) => {
                self.out.push_str(&identifier.qualified_name());
            }
            ExprKind::IntLiteral(value) => self.out.push_str(&value.to_string()),
            ExprKind::DoubleLiteral(value) => self.out.push_str(&format!("{:?}", value)),
            ExprKind::CharLiteral(value) => {
                self.out.push('\'');
                self.out.push_str(&escape(*value, '\''));
                self.out.push('\'');
            }
            ExprKind::StringLiteral(value) => {
                self.out.push('"');
                for ch in value.chars() {
                    self.out.push_str(&escape(ch, '"'));
                }
                self.out.push('"');
            }
            ExprKind::BoolLiteral(value) => self.out.push_str(&value.to_string()),
        }

        if self.annotate {
            match expr.ty {
                Some(ty) => self
                    .out
                    .push_str(&format!(" /* {} */", self.types.display(ty))),
                None => self.out.push_str(" /* ? */"),
            }
        }
    }
}

fn escape(ch: char, quote: char) -> String {
    match ch {
        '\u{07}' => String::from("\\a"),
        '\u{08}' => String::from("\\b"),
        '\t' => String::from("\\t"),
        '\n' => String::from("\\n"),
        '\u{0b}' => String::from("\\v"),
        '\u{0c}' => String::from("\\f"),
        '\r' => String::from("\\r"),
        '\\' => String::from("\\\\"),
        '\0' => String::from("\\0"),
        c if c == quote => format!("\\{}", c),
        c if (c as u32) < 0x20 => format!("\\x{:02x}", c as u32),
        c => c.to_string(),
    }
}

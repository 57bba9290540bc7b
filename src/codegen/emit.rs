use crate::ast::{BinaryOp, Decl, Expr, FunctionDecl, Literal, Program, Stmt};

use super::context::Context;
use super::error::CodegenError;
use super::types::{assign_helper_for, c_return_type_for, c_type_for};

pub(super) fn emit_program<'a>(ctx: &mut Context<'a>, program: &'a Program) -> Result<(), CodegenError> {
    collect_metadata(ctx, program);
    emit_file_header(ctx);
    emit_includes(ctx);
    ctx.writer.blank_line();
    emit_struct_forward_decls(ctx);
    ctx.writer.blank_line();
    emit_structs(ctx);
    ctx.writer.blank_line();
    emit_struct_assign_helpers(ctx);
    ctx.writer.blank_line();
    emit_function_prototypes(ctx);
    ctx.writer.blank_line();
    emit_function_definitions(ctx)?;
    ctx.writer.blank_line();
    emit_entrypoint(ctx)?;
    Ok(())
}

fn collect_metadata<'a>(ctx: &mut Context<'a>, program: &'a Program) {
    for decl in &program.declarations {
        match decl {
            Decl::Struct(s) => ctx.register_struct(s),
            Decl::Function(f) => ctx.register_function(f),
        }
    }
}

fn emit_file_header(ctx: &mut Context) {
    ctx.writer.line("/* Auto-generated C output from lazylang */");
}

fn emit_includes(ctx: &mut Context) {
    ctx.writer.line("#include <stdint.h>");
    ctx.writer.line("#include <stdbool.h>");
    ctx.writer.line("#include <stddef.h>");
    ctx.writer.line("#include <stdio.h>");
    ctx.writer.line("#include <stdlib.h>");
    ctx.writer.line("#include <string.h>");
    ctx.writer.line("#if defined(__GNUC__) || defined(__clang__)");
    ctx.writer.line("#define LZ_UNUSED __attribute__((unused))");
    ctx.writer.line("#else");
    ctx.writer.line("#define LZ_UNUSED");
    ctx.writer.line("#endif");
    ctx.writer.line("#define LZ_RUNTIME_DEFINE_STRUCTS");
    ctx.writer.line("#include \"src/runtime/runtime.h\"");
}

fn emit_struct_forward_decls(ctx: &mut Context) {
    let names: Vec<String> = ctx.structs.iter().map(|info| info.decl.name.clone()).collect();
    for name in names {
        ctx.writer.line(format!("typedef struct {name} {name};"));
    }
}

fn emit_structs(ctx: &mut Context) {
    for i in 0..ctx.structs.len() {
        let decl = ctx.structs[i].decl;
        ctx.writer.line(format!("struct {} {{", decl.name));
        ctx.writer.push();
        for field in &decl.fields {
            let c_type = c_type_for(ctx, &field.type_name);
            ctx.writer.line(format!("{c_type} {};", field.name));
        }
        ctx.writer.pop();
        ctx.writer.line("};");
        ctx.writer.blank_line();
    }
}

fn emit_struct_assign_helpers(ctx: &mut Context) {
    for i in 0..ctx.structs.len() {
        let name = ctx.structs[i].decl.name.clone();
        let helper = ctx.structs[i].assign_helper.clone();
        ctx.writer.line(format!("static void LZ_UNUSED {helper}({name} *dst, {name} value) {{"));
        ctx.writer.push();
        ctx.writer.line("*dst = value;");
        ctx.writer.pop();
        ctx.writer.line("}");
        ctx.writer.blank_line();
    }
}

fn emit_function_signature(ctx: &mut Context, index: usize, prototype: bool) {
    let decl = ctx.functions[index].decl;
    let c_name = ctx.functions[index].c_name.clone();
    let ret_type = c_return_type_for(ctx, &decl.return_type);
    ctx.writer.begin_line();
    ctx.writer.printf(format!("static {ret_type} {c_name}("));
    if decl.params.is_empty() {
        ctx.writer.printf("void");
    } else {
        for (i, param) in decl.params.iter().enumerate() {
            let param_type = c_type_for(ctx, &param.type_name);
            ctx.writer.printf(format!("{param_type} {}", param.name));
            if i + 1 < decl.params.len() {
                ctx.writer.printf(", ");
            }
        }
    }
    ctx.writer.printf(")");
    if prototype {
        ctx.writer.printf(";");
    }
    ctx.writer.end_line();
}

fn emit_function_prototypes(ctx: &mut Context) {
    for i in 0..ctx.functions.len() {
        emit_function_signature(ctx, i, true);
    }
}

fn emit_function_body(ctx: &mut Context, fn_decl: &FunctionDecl) -> Result<(), CodegenError> {
    ctx.writer.line("{");
    ctx.writer.push();
    ctx.push_scope();
    for param in &fn_decl.params {
        ctx.add_var(&param.name, &param.type_name, false);
    }

    let ret_type = c_return_type_for(ctx, &fn_decl.return_type);
    let returns_value = ret_type != "void";
    let stmt_count = fn_decl.body.statements.len();
    let last_is_return = matches!(fn_decl.body.statements.last(), Some(Stmt::Return { .. }));
    let needs_tail_return = returns_value && (stmt_count == 0 || !last_is_return);

    let mut tail_var = None;
    let mut tail_helper = None;
    if needs_tail_return {
        let ret_storage_type = c_type_for(ctx, &fn_decl.return_type);
        let var = "__lz_ret".to_string();
        ctx.writer.line(format!("{ret_storage_type} {var} = {{0}};"));
        tail_helper = Some(assign_helper_for(ctx, &fn_decl.return_type));
        tail_var = Some(var);
    }

    for (i, stmt) in fn_decl.body.statements.iter().enumerate() {
        let is_last = i + 1 == stmt_count;
        let slot = if needs_tail_return && is_last {
            tail_var.as_deref().zip(tail_helper.as_deref())
        } else {
            None
        };
        emit_statement(ctx, stmt, slot)?;
    }

    if let Some(var) = &tail_var {
        ctx.writer.line(format!("return {var};"));
    }

    ctx.pop_scope();
    ctx.writer.pop();
    ctx.writer.line("}");
    Ok(())
}

fn emit_function_definitions(ctx: &mut Context) -> Result<(), CodegenError> {
    for i in 0..ctx.functions.len() {
        emit_function_signature(ctx, i, false);
        let decl = ctx.functions[i].decl;
        emit_function_body(ctx, decl)?;
        ctx.writer.blank_line();
    }
    Ok(())
}

fn emit_entrypoint(ctx: &mut Context) -> Result<(), CodegenError> {
    ctx.writer.line("int main(void) {");
    ctx.writer.push();
    match ctx.find_function("main") {
        Some(info) => {
            let c_name = info.c_name.clone();
            let has_params = !info.decl.params.is_empty();
            if has_params {
                ctx.writer.line("/* TODO: pass CLI arguments to main */");
            }
            ctx.writer.line(format!("{c_name}();"));
            ctx.writer.line("return 0;");
        }
        None => {
            ctx.writer.line("fprintf(stderr, \"no entry point defined\\n\");");
            ctx.writer.line("return 1;");
        }
    }
    ctx.writer.pop();
    ctx.writer.line("}");
    Ok(())
}

/// A tail slot (`var`, `assign_helper`) routed into the last statement of a
/// function body so its result becomes the implicit return value.
type TailSlot<'s> = (&'s str, &'s str);

fn emit_block(ctx: &mut Context, block: &crate::ast::Block, slot: Option<TailSlot>) -> Result<(), CodegenError> {
    ctx.writer.line("{");
    ctx.writer.push();
    ctx.push_scope();
    let count = block.statements.len();
    for (i, stmt) in block.statements.iter().enumerate() {
        let is_last = i + 1 == count;
        emit_statement(ctx, stmt, if is_last { slot } else { None })?;
    }
    ctx.pop_scope();
    ctx.writer.pop();
    ctx.writer.line("}");
    Ok(())
}

fn emit_statement(ctx: &mut Context, stmt: &Stmt, slot: Option<TailSlot>) -> Result<(), CodegenError> {
    match stmt {
        Stmt::VarDecl { is_mutable, name, type_name, initializer, .. } => {
            emit_var_decl(ctx, *is_mutable, name, type_name, initializer)
        }
        Stmt::Assign { target, value, span } => emit_assignment(ctx, target, value, *span),
        Stmt::If { condition, then_block, else_block, .. } => {
            emit_if(ctx, condition, then_block, else_block.as_ref(), slot)
        }
        Stmt::Return { value, .. } => emit_return(ctx, value.as_ref()),
        Stmt::ExprStmt { expr, .. } => emit_expr_stmt(ctx, expr, slot),
        Stmt::For { span, .. } => Err(CodegenError::new(*span, "for-in loops are not supported yet")),
    }
}

fn emit_var_decl(
    ctx: &mut Context,
    is_mutable: bool,
    name: &str,
    type_name: &str,
    initializer: &Expr,
) -> Result<(), CodegenError> {
    let c_type = c_type_for(ctx, type_name);
    ctx.writer.line(format!("{c_type} {name} = {{0}};"));
    ctx.add_var(name, type_name, is_mutable);
    emit_assignment_call(ctx, name, type_name, initializer)
}

fn emit_assignment(
    ctx: &mut Context,
    target: &str,
    value: &Expr,
    span: crate::token::Span,
) -> Result<(), CodegenError> {
    let type_name = match ctx.lookup_var(target) {
        Some(binding) => binding.type_name.clone(),
        None => return Err(CodegenError::new(span, "assignment to unknown symbol")),
    };
    emit_assignment_call(ctx, target, &type_name, value)
}

fn emit_if(
    ctx: &mut Context,
    condition: &Expr,
    then_block: &crate::ast::Block,
    else_block: Option<&crate::ast::Block>,
    slot: Option<TailSlot>,
) -> Result<(), CodegenError> {
    ctx.writer.begin_line();
    ctx.writer.printf("if (");
    emit_expression(ctx, condition)?;
    ctx.writer.printf(") ");
    ctx.writer.end_line();
    emit_block(ctx, then_block, slot)?;
    if let Some(else_block) = else_block {
        ctx.writer.line("else");
        emit_block(ctx, else_block, slot)?;
    }
    Ok(())
}

fn emit_return(ctx: &mut Context, value: Option<&Expr>) -> Result<(), CodegenError> {
    ctx.writer.begin_line();
    ctx.writer.printf("return");
    if let Some(value) = value {
        ctx.writer.printf(" ");
        emit_expression(ctx, value)?;
    }
    ctx.writer.printf(";");
    ctx.writer.end_line();
    Ok(())
}

fn emit_expr_stmt(ctx: &mut Context, expr: &Expr, slot: Option<TailSlot>) -> Result<(), CodegenError> {
    ctx.writer.begin_line();
    match slot {
        Some((tail_var, tail_helper)) => {
            ctx.writer.printf(format!("{tail_helper}(&{tail_var}, "));
            emit_expression(ctx, expr)?;
            ctx.writer.printf(");");
        }
        None => {
            emit_expression(ctx, expr)?;
            ctx.writer.printf(";");
        }
    }
    ctx.writer.end_line();
    Ok(())
}

fn emit_expression(ctx: &mut Context, expr: &Expr) -> Result<(), CodegenError> {
    match expr {
        Expr::Literal { value, .. } => {
            emit_literal(ctx, value);
            Ok(())
        }
        Expr::Identifier { name, .. } => {
            emit_identifier(ctx, name);
            Ok(())
        }
        Expr::Call { callee, args, .. } => emit_call(ctx, callee, args),
        Expr::Binary { op, left, right, .. } => emit_binary(ctx, *op, left, right),
    }
}

fn emit_literal(ctx: &mut Context, literal: &Literal) {
    match literal {
        Literal::Int(text) | Literal::Float(text) => ctx.writer.printf(text),
        Literal::Bool(value) => ctx.writer.printf(if *value { "true" } else { "false" }),
        Literal::Str(text) => emit_string_literal(ctx, text),
        Literal::Null => ctx.writer.printf("NULL"),
    }
}

fn emit_identifier(ctx: &mut Context, name: &str) {
    if name == "log" {
        ctx.writer.printf("lz_runtime_log");
        return;
    }
    if ctx.lookup_var(name).is_some() {
        ctx.writer.printf(name);
        return;
    }
    if let Some(info) = ctx.find_function(name) {
        ctx.writer.printf(info.c_name.clone());
        return;
    }
    ctx.writer.printf(name);
}

fn emit_call(ctx: &mut Context, callee: &Expr, args: &[Expr]) -> Result<(), CodegenError> {
    emit_expression(ctx, callee)?;
    ctx.writer.printf("(");
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            ctx.writer.printf(", ");
        }
        emit_expression(ctx, arg)?;
    }
    ctx.writer.printf(")");
    Ok(())
}

fn binary_op_text(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Eq => "==",
        BinaryOp::NotEq => "!=",
        BinaryOp::Lt => "<",
        BinaryOp::Lte => "<=",
        BinaryOp::Gt => ">",
        BinaryOp::Gte => ">=",
    }
}

fn emit_binary(ctx: &mut Context, op: BinaryOp, left: &Expr, right: &Expr) -> Result<(), CodegenError> {
    ctx.writer.printf("(");
    emit_expression(ctx, left)?;
    ctx.writer.printf(format!(" {} ", binary_op_text(op)));
    emit_expression(ctx, right)?;
    ctx.writer.printf(")");
    Ok(())
}

/// Escapes a string literal's text the way the runtime's C compiler would
/// need it: the usual backslash escapes, plus `\xNN` for anything outside
/// printable ASCII so the generated source stays a single physical line.
fn emit_string_literal(ctx: &mut Context, text: &str) {
    ctx.writer.printf("lz_string_from_literal(\"");
    for ch in text.chars() {
        match ch {
            '\\' => ctx.writer.printf("\\\\"),
            '"' => ctx.writer.printf("\\\""),
            '\n' => ctx.writer.printf("\\n"),
            '\r' => ctx.writer.printf("\\r"),
            '\t' => ctx.writer.printf("\\t"),
            c if c.is_ascii_graphic() || c == ' ' => ctx.writer.printf(c.to_string()),
            c => ctx.writer.printf(format!("\\x{:02X}", c as u32)),
        }
    }
    ctx.writer.printf("\")");
}

fn emit_assignment_call(
    ctx: &mut Context,
    target_name: &str,
    type_name: &str,
    value: &Expr,
) -> Result<(), CodegenError> {
    let helper = assign_helper_for(ctx, type_name);
    ctx.writer.begin_line();
    ctx.writer.printf(format!("{helper}(&{target_name}, "));
    emit_expression(ctx, value)?;
    ctx.writer.printf(");");
    ctx.writer.end_line();
    Ok(())
}

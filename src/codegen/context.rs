use std::collections::HashMap;

use crate::ast::{FunctionDecl, StructDecl};

use super::writer::CodeWriter;

/// A registered struct, keyed by source name, plus the assignment-helper
/// name the pre-pass mints for it (`lz_assign_struct_<name>`).
pub(super) struct StructInfo<'a> {
    pub decl: &'a StructDecl,
    pub assign_helper: String,
}

/// A registered function, keyed by source name, plus its mangled C name
/// (`lz_fn_<name>`).
pub(super) struct FunctionInfo<'a> {
    pub decl: &'a FunctionDecl,
    pub c_name: String,
}

pub(super) struct VarBinding {
    pub type_name: String,
    #[allow(dead_code)]
    pub is_mutable: bool,
}

/// Everything the emission pass threads through the tree: the output
/// buffer, the struct/function tables built by the pre-pass, and a scope
/// stack mirroring the one the semantic analyzer walked. Unlike the
/// analyzer's `SymbolTable`, this one tracks a variable's type name too --
/// codegen needs it to pick an assignment helper at every mutation site.
pub(super) struct Context<'a> {
    pub writer: CodeWriter,
    pub structs: Vec<StructInfo<'a>>,
    struct_index: HashMap<String, usize>,
    pub functions: Vec<FunctionInfo<'a>>,
    function_index: HashMap<String, usize>,
    scopes: Vec<HashMap<String, VarBinding>>,
}

impl<'a> Context<'a> {
    pub fn new() -> Self {
        Context {
            writer: CodeWriter::new(),
            structs: Vec::new(),
            struct_index: HashMap::new(),
            functions: Vec::new(),
            function_index: HashMap::new(),
            scopes: Vec::new(),
        }
    }

    pub fn register_struct(&mut self, decl: &'a StructDecl) {
        let assign_helper = format!("lz_assign_struct_{}", decl.name);
        self.struct_index.insert(decl.name.clone(), self.structs.len());
        self.structs.push(StructInfo { decl, assign_helper });
    }

    pub fn register_function(&mut self, decl: &'a FunctionDecl) {
        let c_name = format!("lz_fn_{}", decl.name);
        self.function_index.insert(decl.name.clone(), self.functions.len());
        self.functions.push(FunctionInfo { decl, c_name });
    }

    pub fn find_struct(&self, name: &str) -> Option<&StructInfo<'a>> {
        self.struct_index.get(name).map(|&i| &self.structs[i])
    }

    pub fn find_function(&self, name: &str) -> Option<&FunctionInfo<'a>> {
        self.function_index.get(name).map(|&i| &self.functions[i])
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    pub fn add_var(&mut self, name: &str, type_name: &str, is_mutable: bool) {
        if self.scopes.is_empty() {
            self.push_scope();
        }
        self.scopes
            .last_mut()
            .expect("just ensured a scope exists")
            .insert(name.to_string(), VarBinding { type_name: type_name.to_string(), is_mutable });
    }

    pub fn lookup_var(&self, name: &str) -> Option<&VarBinding> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_scope_shadows_outer() {
        let mut ctx = Context::new();
        ctx.push_scope();
        ctx.add_var("x", "int", false);
        ctx.push_scope();
        ctx.add_var("x", "string", true);
        assert_eq!(ctx.lookup_var("x").unwrap().type_name, "string");
        ctx.pop_scope();
        assert_eq!(ctx.lookup_var("x").unwrap().type_name, "int");
    }

    #[test]
    fn struct_and_function_lookup_by_name() {
        let decl = StructDecl {
            is_public: false,
            name: "Point".to_string(),
            fields: Vec::new(),
            span: crate::token::Span::new(1, 1),
        };
        let mut ctx = Context::new();
        ctx.register_struct(&decl);
        assert_eq!(ctx.find_struct("Point").unwrap().assign_helper, "lz_assign_struct_Point");
        assert!(ctx.find_struct("Missing").is_none());
    }
}

#[derive(Debug, Clone)]
pub struct VarSymbol {
    pub name: String,
    pub is_mutable: bool,
    pub type_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FunctionSymbol {
    pub name: String,
    pub return_type: String,
}

#[derive(Default)]
struct Scope {
    vars: Vec<VarSymbol>,
}

/// Function table plus a scope stack, mirroring the reference analyzer's
/// `SemaContext`. Functions are registered up front in a separate sweep so
/// forward references between them resolve; variables come and go with
/// block scopes during the main check pass.
#[derive(Default)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    functions: Vec<FunctionSymbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut table = SymbolTable::default();
        table.add_function("log", "null");
        table
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Returns `false` if `name` is already declared in the innermost scope.
    pub fn add_var(&mut self, name: &str, is_mutable: bool, type_name: Option<&str>) -> bool {
        if self.scopes.is_empty() {
            self.push_scope();
        }
        let scope = self.scopes.last_mut().expect("just ensured a scope exists");
        if scope.vars.iter().any(|v| v.name == name) {
            return false;
        }
        scope.vars.push(VarSymbol {
            name: name.to_string(),
            is_mutable,
            type_name: type_name.map(str::to_string),
        });
        true
    }

    pub fn lookup_var(&self, name: &str) -> Option<&VarSymbol> {
        self.scopes.iter().rev().find_map(|scope| scope.vars.iter().find(|v| v.name == name))
    }

    /// Returns `false` if `name` is already a declared function (builtins
    /// included).
    pub fn add_function(&mut self, name: &str, return_type: &str) -> bool {
        if self.functions.iter().any(|f| f.name == name) {
            return false;
        }
        self.functions
            .push(FunctionSymbol { name: name.to_string(), return_type: return_type.to_string() });
        true
    }

    pub fn lookup_function(&self, name: &str) -> Option<&FunctionSymbol> {
        self.functions.iter().find(|f| f.name == name)
    }
}

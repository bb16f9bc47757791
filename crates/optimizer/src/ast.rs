use crate::ir::{Cmp, Operand, Place};

/// Синтаксическое дерево как написано в исходнике, с номерами строк
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceProgram {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Decl(DeclStmt),
    For(ForStmt),
    Assign(AssignStmt),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclStmt {
    pub name: String,
    pub size: Option<i64>,
    pub line: usize,
}

/// Заголовок хранит все три имени: проверка, что они совпадают, - в lowering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForStmt {
    pub var: String,
    pub start: i64,
    pub cond_var: String,
    pub cmp: Cmp,
    pub end: i64,
    pub step_var: String,
    pub step: i64,
    pub body: Vec<Statement>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignStmt {
    pub target: Place,
    pub lhs: Operand,
    pub rhs: Option<Operand>,
    pub line: usize,
}

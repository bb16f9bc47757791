use std::collections::HashSet;

use crate::ast::{AssignStmt, DeclStmt, ForStmt, SourceProgram, Statement};
use crate::errors::{OptimizerError, OptimizerResult};
use crate::ir::{Decl, Index, Instr, Loop, Operand, Place, Program, Stmt};

/// Перевести синтаксическое дерево в IR
///
/// Объявления собираются в начало программы. Отвергаются: вложенные
/// циклы, объявления внутри цикла, запись в счётчик цикла, счётчик как
/// значение и индексы по переменной вне её цикла.
pub fn lower(source: &SourceProgram) -> OptimizerResult<Program> {
    let mut program = Program::default();
    let mut declared = HashSet::new();

    for statement in &source.statements {
        match statement {
            Statement::Decl(decl) => {
                if !declared.insert(decl.name.clone()) {
                    return Err(OptimizerError::unsupported(
                        decl.line,
                        format!("duplicate declaration of `{}`", decl.name),
                    ));
                }
                program.decls.push(lower_decl(decl)?);
            }
            Statement::Assign(assign) => {
                program.body.push(Stmt::Instr(lower_assign(assign, None)?));
            }
            Statement::For(for_stmt) => {
                program.body.push(Stmt::Loop(lower_loop(for_stmt)?));
            }
        }
    }

    Ok(program)
}

fn lower_decl(decl: &DeclStmt) -> OptimizerResult<Decl> {
    let size = decl
        .size
        .map(|n| {
            usize::try_from(n).map_err(|_| {
                OptimizerError::unsupported(decl.line, format!("array `{}` is too large", decl.name))
            })
        })
        .transpose()?;
    Ok(Decl {
        name: decl.name.clone(),
        size,
    })
}

fn lower_loop(for_stmt: &ForStmt) -> OptimizerResult<Loop> {
    let line = for_stmt.line;
    let var = &for_stmt.var;

    for other in [&for_stmt.cond_var, &for_stmt.step_var] {
        if other != var {
            return Err(OptimizerError::unsupported(
                line,
                format!("loop header mixes `{}` and `{}`", var, other),
            ));
        }
    }
    if for_stmt.step < 1 {
        return Err(OptimizerError::unsupported(line, "loop step must be positive"));
    }

    let mut body = Vec::with_capacity(for_stmt.body.len());
    for statement in &for_stmt.body {
        match statement {
            Statement::Assign(assign) => body.push(lower_assign(assign, Some(var))?),
            Statement::For(inner) => {
                return Err(OptimizerError::unsupported(inner.line, "nested loops"));
            }
            Statement::Decl(decl) => {
                return Err(OptimizerError::unsupported(decl.line, "declaration inside a loop"));
            }
        }
    }

    Ok(Loop {
        var: var.clone(),
        start: for_stmt.start,
        end: for_stmt.end,
        cmp: for_stmt.cmp,
        step: for_stmt.step,
        body,
    })
}

fn lower_assign(assign: &AssignStmt, loop_var: Option<&String>) -> OptimizerResult<Instr> {
    let line = assign.line;
    let dst = check_place(&assign.target, loop_var, line)?;
    if matches!(&dst, Place::Scalar(name) if Some(name) == loop_var) {
        return Err(OptimizerError::unsupported(line, "assignment to the loop variable"));
    }

    let lhs = check_operand(&assign.lhs, loop_var, line)?;
    Ok(match &assign.rhs {
        Some(rhs) => Instr::Add {
            dst,
            lhs,
            rhs: check_operand(rhs, loop_var, line)?,
        },
        None => Instr::Copy { dst, src: lhs },
    })
}

fn check_operand(operand: &Operand, loop_var: Option<&String>, line: usize) -> OptimizerResult<Operand> {
    match operand {
        Operand::Place(Place::Scalar(name)) if Some(name) == loop_var => Err(
            OptimizerError::unsupported(line, "loop variable used as a value"),
        ),
        Operand::Place(place) => check_place(place, loop_var, line).map(Operand::Place),
        Operand::Const(n) => Ok(Operand::Const(*n)),
    }
}

fn check_place(place: &Place, loop_var: Option<&String>, line: usize) -> OptimizerResult<Place> {
    if let Place::Element {
        index: Index::Var { name, .. },
        ..
    } = place
    {
        if Some(name) != loop_var {
            return Err(OptimizerError::unsupported(
                line,
                format!("index `{}` is not an enclosing loop variable", name),
            ));
        }
    }
    Ok(place.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn lower_src(src: &str) -> OptimizerResult<Program> {
        lower(&parse(src)?)
    }

    #[test]
    fn test_lower_demo_loop() {
        let program = lower_src(
            "int a[4]; int b[4]; int c[4];
             for (int i = 0; i < 4; i++) { a[i] = b[i] + c[i]; x = b[0] + c[0]; }",
        )
        .unwrap();

        assert_eq!(program.decls.len(), 3);
        let l = program.loops().next().unwrap();
        assert_eq!(l.trip_count(), 4);
        assert_eq!(l.body[1].to_string(), "x = b[0] + c[0];");
    }

    #[test]
    fn test_declarations_hoisted_to_front() {
        let program = lower_src("x = 1; int y;").unwrap();
        assert_eq!(program.decls[0].name, "y");
        assert_eq!(program.body.len(), 1);
    }

    #[test]
    fn test_rejections() {
        let cases = [
            ("for (int i = 0; i < 4; i++) { for (int j = 0; j < 4; j++) { a[j] = 1; } }", "nested"),
            ("for (int i = 0; i < 4; i++) { int t; }", "declaration"),
            ("for (int i = 0; i < 4; i++) { i = 1; }", "assignment to the loop"),
            ("for (int i = 0; i < 4; i++) { a[i] = i; }", "as a value"),
            ("for (int i = 0; j < 4; i++) { a[i] = 1; }", "mixes"),
            ("for (int i = 0; i < 4; i += 0) { a[i] = 1; }", "positive"),
            ("a[k] = 1;", "not an enclosing"),
            ("int a[2]; int a[3];", "duplicate"),
        ];

        for (src, needle) in cases {
            let err = lower_src(src).unwrap_err();
            assert!(
                err.to_string().contains(needle),
                "{:?} should mention {:?}, got {}",
                src,
                needle,
                err
            );
        }
    }
}

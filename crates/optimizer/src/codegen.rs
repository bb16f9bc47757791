use std::fmt::Write;

use crate::ir::{Loop, Program, Stmt};

const INDENT: &str = "  ";

/// Вывести IR обратно в исходный язык
///
/// Объявления идут первыми, затем инструкции и циклы в порядке программы.
/// Результат снова разбирается парсером.
pub fn emit(program: &Program) -> String {
    let mut lines: Vec<String> = Vec::new();

    for decl in &program.decls {
        lines.push(match decl.size {
            Some(size) => format!("int {}[{}];", decl.name, size),
            None => format!("int {};", decl.name),
        });
    }

    for stmt in &program.body {
        match stmt {
            Stmt::Instr(instr) => lines.push(instr.to_string()),
            Stmt::Loop(l) => {
                lines.push(header(l));
                lines.extend(l.body.iter().map(|instr| format!("{}{}", INDENT, instr)));
                lines.push("}".to_string());
            }
        }
    }

    lines.join("\n")
}

fn header(l: &Loop) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "for (int {var} = {start}; {var} {cmp} {end}; ",
        var = l.var,
        start = l.start,
        cmp = l.cmp,
        end = l.end
    );
    let _ = if l.step == 1 {
        write!(out, "{}++) {{", l.var)
    } else {
        write!(out, "{} += {}) {{", l.var, l.step)
    };
    out
}

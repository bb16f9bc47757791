use tracing::debug;

use crate::ir::{Instr, Loop, Program, Stmt};

/// Loop-invariant code motion
///
/// Инструкция выносится прямо перед циклом, если:
/// - не упоминает счётчик цикла;
/// - её место назначения не читает и не пишет никакая другая инструкция цикла;
/// - ни один её источник не перезаписывается в цикле (включая её саму);
/// - цикл выполняется хотя бы раз.
///
/// Возвращает число вынесенных инструкций.
pub fn hoist_invariants(program: &mut Program) -> usize {
    let mut hoisted_total = 0;
    let mut body = Vec::with_capacity(program.body.len());

    for stmt in program.body.drain(..) {
        match stmt {
            Stmt::Loop(mut l) => {
                let hoisted = split_invariants(&mut l);
                if !hoisted.is_empty() {
                    debug!(var = %l.var, count = hoisted.len(), "Hoisted loop invariants");
                }
                hoisted_total += hoisted.len();
                body.extend(hoisted.into_iter().map(Stmt::Instr));
                body.push(Stmt::Loop(l));
            }
            other => body.push(other),
        }
    }

    program.body = body;
    hoisted_total
}

fn split_invariants(l: &mut Loop) -> Vec<Instr> {
    if l.trip_count() == 0 {
        return Vec::new();
    }

    let invariant: Vec<bool> = (0..l.body.len()).map(|i| is_invariant(l, i)).collect();
    let mut hoisted = Vec::new();
    let mut kept = Vec::with_capacity(l.body.len());
    for (instr, inv) in l.body.drain(..).zip(invariant) {
        if inv {
            hoisted.push(instr);
        } else {
            kept.push(instr);
        }
    }
    l.body = kept;
    hoisted
}

fn is_invariant(l: &Loop, idx: usize) -> bool {
    let instr = &l.body[idx];
    if instr.mentions_var(&l.var) {
        return false;
    }
    if instr.sources().any(|src| instr.writes(src)) {
        return false;
    }

    l.body.iter().enumerate().filter(|&(j, _)| j != idx).all(|(_, other)| {
        !other.touches(instr.dst()) && !instr.sources().any(|src| other.writes(src))
    })
}

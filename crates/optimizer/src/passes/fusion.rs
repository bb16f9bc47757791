use tracing::debug;

use crate::ir::{Index, Instr, Loop, Place, Program, Stmt};

/// Слияние соседних циклов с одинаковым заголовком
///
/// Цепочки сливаются целиком: `L1 L2 L3` → `L1+L2+L3`, если каждое
/// слияние допустимо. Возвращает число поглощённых циклов.
pub fn fuse_loops(program: &mut Program) -> usize {
    let mut fused = 0;
    let mut body: Vec<Stmt> = Vec::with_capacity(program.body.len());

    for stmt in program.body.drain(..) {
        if let (Some(Stmt::Loop(prev)), Stmt::Loop(next)) = (body.last_mut(), &stmt) {
            if prev.same_header(next) && can_fuse(prev, next) {
                debug!(var = %prev.var, start = prev.start, end = prev.end, "Fused adjacent loops");
                prev.body.extend(next.body.iter().cloned());
                fused += 1;
                continue;
            }
        }
        body.push(stmt);
    }

    program.body = body;
    fused
}

/// Слияние сохраняет семантику, если каждая ячейка, которую один цикл
/// пишет, а другой трогает, адресуется в обоих циклах только как
/// `var + k` с одним и тем же `k`: тогда итерация `n` слитого цикла
/// работает с теми же ячейками, что итерации `n` исходных циклов.
fn can_fuse(first: &Loop, second: &Loop) -> bool {
    let conflicts = |writer: &Loop, other: &Loop| {
        writer.body.iter().map(Instr::dst).any(|written| {
            other
                .body
                .iter()
                .flat_map(|instr| instr.accesses())
                .any(|(place, _)| conflicting(written, place, &first.var))
        })
    };

    !conflicts(first, second) && !conflicts(second, first)
}

fn conflicting(written: &Place, accessed: &Place, var: &str) -> bool {
    match (written, accessed) {
        (Place::Scalar(a), Place::Scalar(b)) => a == b,
        (
            Place::Element { array: a, index: wi },
            Place::Element { array: b, index: ai },
        ) if a == b => !same_iteration(wi, ai, var),
        _ => false,
    }
}

fn same_iteration(a: &Index, b: &Index, var: &str) -> bool {
    match (a, b) {
        (
            Index::Var { name: na, offset: oa },
            Index::Var { name: nb, offset: ob },
        ) => na == var && nb == var && oa == ob,
        _ => false,
    }
}

use tracing::debug;

use crate::ir::{Cmp, Loop, Program, Stmt};

/// Развернуть циклы с шагом 1 в `factor` раз
///
/// Тело повторяется `factor` раз со смещениями `+0..+factor-1` (копия за
/// копией, порядок итераций сохраняется), шаг становится `factor`.
/// Если число итераций не кратно `factor`, цикл покрывает наибольшее
/// кратное, а оставшиеся итерации выписываются после него прямыми
/// инструкциями с константными индексами.
///
/// Циклы короче `factor` итераций и циклы с шагом не 1 не трогаются.
/// Возвращает число развёрнутых циклов.
pub fn unroll_loops(program: &mut Program, factor: usize) -> usize {
    if factor < 2 {
        return 0;
    }

    let mut unrolled = 0;
    let mut body = Vec::with_capacity(program.body.len());

    for stmt in program.body.drain(..) {
        match stmt {
            Stmt::Loop(l) => match unroll(&l, factor) {
                Some(stmts) => {
                    unrolled += 1;
                    body.extend(stmts);
                }
                None => body.push(Stmt::Loop(l)),
            },
            other => body.push(other),
        }
    }

    program.body = body;
    unrolled
}

fn unroll(l: &Loop, factor: usize) -> Option<Vec<Stmt>> {
    if l.step != 1 {
        debug!(var = %l.var, step = l.step, "Skipping unroll: non-unit step");
        return None;
    }

    let trips = l.trip_count();
    let k = factor as u64;
    if trips < k {
        debug!(var = %l.var, trips, factor, "Skipping unroll: too few iterations");
        return None;
    }

    let main_trips = trips - trips % k;
    let factor_i64 = i64::try_from(factor).ok()?;
    let main_end = l.start.checked_add(i64::try_from(main_trips).ok()?)?;

    let copies: Option<Vec<_>> = (0..factor_i64)
        .flat_map(|j| l.body.iter().map(move |instr| instr.shift_var(&l.var, j)))
        .collect();
    let Some(copies) = copies else {
        debug!(var = %l.var, "Skipping unroll: index offset overflows");
        return None;
    };

    let mut main = Loop {
        body: copies,
        step: factor_i64,
        ..l.clone()
    };

    if main_trips == trips {
        return Some(vec![Stmt::Loop(main)]);
    }

    let epilogue: Option<Vec<_>> = (main_end..l.exclusive_end())
        .flat_map(|value| l.body.iter().map(move |instr| instr.bind_var(&l.var, value)))
        .map(|instr| instr.map(Stmt::Instr))
        .collect();
    let Some(epilogue) = epilogue else {
        debug!(var = %l.var, "Skipping unroll: epilogue index overflows");
        return None;
    };

    // Заголовок сужается до кратного числа итераций
    main.end = main_end;
    main.cmp = Cmp::Lt;
    debug!(var = %l.var, remainder = trips - main_trips, "Unrolled loop with epilogue");

    let mut stmts = vec![Stmt::Loop(main)];
    stmts.extend(epilogue);
    Some(stmts)
}

use crate::arrays::ArraySet;

/// Неоптимизированная версия
///
/// Первый проход: `a[i] = b[i] + c[i]` и пересчёт `x = b[0] + c[0]`
/// на каждой итерации. Второй проход: `a[i] = a[i] + 1`.
#[allow(clippy::needless_range_loop, clippy::assign_op_pattern)]
pub fn run(set: &mut ArraySet) {
    let ArraySet { a, b, c, x } = set;
    let n = a.len();

    for i in 0..n {
        a[i] = b[i] + c[i];
        *x = b[0] + c[0]; // цель для LICM
    }

    for i in 0..n {
        a[i] = a[i] + 1;
    }
}

use crate::arrays::ArraySet;

/// Оптимизированная версия: LICM + fusion + unrolling на 2
///
/// Для нечётной длины последний индекс `n - 1` обрабатывается отдельно
/// тем же слитым телом после развёрнутого цикла.
#[allow(clippy::assign_op_pattern)]
pub fn run(set: &mut ArraySet) {
    let ArraySet { a, b, c, x } = set;
    let n = a.len();

    // LICM result
    if let (Some(&b0), Some(&c0)) = (b.first(), c.first()) {
        *x = b0 + c0;
    }

    let paired = n - n % 2;
    let mut i = 0;
    while i < paired {
        // Unrolled + Fused
        a[i] = b[i] + c[i];
        a[i] = a[i] + 1;

        a[i + 1] = b[i + 1] + c[i + 1];
        a[i + 1] = a[i + 1] + 1;

        i += 2;
    }

    if paired < n {
        let last = n - 1;
        a[last] = b[last] + c[last];
        a[last] = a[last] + 1;
    }
}

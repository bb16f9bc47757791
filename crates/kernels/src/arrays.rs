use common::config_base::MAX_ARRAY_LEN;
use common::{BenchConfig, BenchError, BenchResult};

/// Три массива одной длины и скаляр-инвариант `x`
///
/// Длины `a`, `b`, `c` всегда совпадают: поля не выдаются наружу
/// как `&mut Vec`, только через ядра этого крейта.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArraySet {
    pub(crate) a: Vec<i32>,
    pub(crate) b: Vec<i32>,
    pub(crate) c: Vec<i32>,
    pub(crate) x: i32,
}

impl ArraySet {
    /// `b[i] = i`, `c[i] = len - i`, `a[i] = 0`
    pub fn new(len: usize) -> BenchResult<Self> {
        if len > MAX_ARRAY_LEN {
            return Err(BenchError::LengthOutOfRange {
                len,
                max: MAX_ARRAY_LEN,
            });
        }

        // len <= i32::MAX - 1, приведения ниже без потерь
        let n = len as i32;
        let b: Vec<i32> = (0..n).collect();
        let c: Vec<i32> = (0..n).map(|i| n - i).collect();

        Ok(Self {
            a: vec![0; len],
            b,
            c,
            x: 0,
        })
    }

    pub fn from_config(config: &BenchConfig) -> BenchResult<Self> {
        config.validate()?;
        Self::new(config.len)
    }

    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    pub fn a(&self) -> &[i32] {
        &self.a
    }

    pub fn b(&self) -> &[i32] {
        &self.b
    }

    pub fn c(&self) -> &[i32] {
        &self.c
    }

    /// Последнее значение `x = b[0] + c[0]`, записанное ядром
    pub fn invariant(&self) -> i32 {
        self.x
    }

    /// Обнулить `a` и `x` перед следующим прогоном; `b`, `c` не трогаются
    pub fn reset(&mut self) {
        self.a.fill(0);
        self.x = 0;
    }

    /// Первый индекс, где нарушено `a[i] == b[i] + c[i] + 1`
    pub fn first_mismatch(&self) -> Option<usize> {
        self.a
            .iter()
            .zip(self.b.iter().zip(&self.c))
            .position(|(&a, (&b, &c))| a != b + c + 1)
    }
}

//! Интерпретатор IR для проверки, что проходы не меняют результат

use std::collections::BTreeMap;

use thiserror::Error;

use crate::ir::{Index, Instr, Loop, Operand, Place, Program, Stmt};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("Unknown array: {0}")]
    UnknownArray(String),

    #[error("Index out of bounds: {array}[{index}] (len {len})")]
    OutOfBounds { array: String, index: i64, len: usize },

    #[error("Unbound index variable: {0}")]
    UnboundVar(String),

    #[error("Integer overflow")]
    Overflow,
}

/// Память программы: массивы из объявлений (нули) и скаляры
///
/// Необъявленный скаляр читается как 0 и создаётся при записи.
/// Массив обязан быть объявлен.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Machine {
    arrays: BTreeMap<String, Vec<i64>>,
    scalars: BTreeMap<String, i64>,
}

impl Machine {
    pub fn new(program: &Program) -> Self {
        let mut machine = Self::default();
        for decl in &program.decls {
            match decl.size {
                Some(size) => {
                    machine.arrays.insert(decl.name.clone(), vec![0; size]);
                }
                None => {
                    machine.scalars.insert(decl.name.clone(), 0);
                }
            }
        }
        machine
    }

    /// Заполнить объявленный массив значениями `f(index)`
    pub fn fill_with(&mut self, array: &str, f: impl Fn(usize) -> i64) -> Result<(), EvalError> {
        let cells = self
            .arrays
            .get_mut(array)
            .ok_or_else(|| EvalError::UnknownArray(array.to_string()))?;
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = f(i);
        }
        Ok(())
    }

    pub fn array(&self, name: &str) -> Option<&[i64]> {
        self.arrays.get(name).map(Vec::as_slice)
    }

    pub fn scalar(&self, name: &str) -> Option<i64> {
        self.scalars.get(name).copied()
    }

    pub fn run(&mut self, program: &Program) -> Result<(), EvalError> {
        for stmt in &program.body {
            match stmt {
                Stmt::Instr(instr) => self.exec(instr, None)?,
                Stmt::Loop(l) => self.run_loop(l)?,
            }
        }
        Ok(())
    }

    fn run_loop(&mut self, l: &Loop) -> Result<(), EvalError> {
        let mut value = l.start;
        while value < l.exclusive_end() {
            for instr in &l.body {
                self.exec(instr, Some((l.var.as_str(), value)))?;
            }
            value = value.checked_add(l.step).ok_or(EvalError::Overflow)?;
        }
        Ok(())
    }

    fn exec(&mut self, instr: &Instr, env: Option<(&str, i64)>) -> Result<(), EvalError> {
        let value = match instr {
            Instr::Copy { src, .. } => self.read(src, env)?,
            Instr::Add { lhs, rhs, .. } => self
                .read(lhs, env)?
                .checked_add(self.read(rhs, env)?)
                .ok_or(EvalError::Overflow)?,
        };
        self.write(instr.dst(), env, value)
    }

    fn read(&self, operand: &Operand, env: Option<(&str, i64)>) -> Result<i64, EvalError> {
        match operand {
            Operand::Const(n) => Ok(*n),
            Operand::Place(Place::Scalar(name)) => Ok(self.scalar(name).unwrap_or(0)),
            Operand::Place(Place::Element { array, index }) => {
                let (cells, i) = self.locate(array, index, env)?;
                Ok(cells[i])
            }
        }
    }

    fn write(&mut self, place: &Place, env: Option<(&str, i64)>, value: i64) -> Result<(), EvalError> {
        match place {
            Place::Scalar(name) => {
                self.scalars.insert(name.clone(), value);
            }
            Place::Element { array, index } => {
                let i = self.locate(array, index, env)?.1;
                if let Some(cells) = self.arrays.get_mut(array) {
                    cells[i] = value;
                }
            }
        }
        Ok(())
    }

    fn locate(
        &self,
        array: &str,
        index: &Index,
        env: Option<(&str, i64)>,
    ) -> Result<(&[i64], usize), EvalError> {
        let cells = self
            .arrays
            .get(array)
            .ok_or_else(|| EvalError::UnknownArray(array.to_string()))?;

        let raw = match index {
            Index::Const(n) => *n,
            Index::Var { name, offset } => match env {
                Some((var, value)) if var == name.as_str() => {
                    value.checked_add(*offset).ok_or(EvalError::Overflow)?
                }
                _ => return Err(EvalError::UnboundVar(name.clone())),
            },
        };

        match usize::try_from(raw) {
            Ok(i) if i < cells.len() => Ok((cells, i)),
            _ => Err(EvalError::OutOfBounds {
                array: array.to_string(),
                index: raw,
                len: cells.len(),
            }),
        }
    }
}

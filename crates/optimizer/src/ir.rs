//! Типизированное промежуточное представление
//!
//! Программа - плоский список инструкций и циклов верхнего уровня.
//! Циклы не вложены, тело цикла - только инструкции.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cmp {
    Lt,
    Le,
}

impl fmt::Display for Cmp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cmp::Lt => f.write_str("<"),
            Cmp::Le => f.write_str("<="),
        }
    }
}

/// Индекс элемента массива: константа или `var + offset`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Index {
    Const(i64),
    Var { name: String, offset: i64 },
}

impl Index {
    pub fn var(name: impl Into<String>) -> Self {
        Index::Var {
            name: name.into(),
            offset: 0,
        }
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Index::Const(n) => write!(f, "{}", n),
            Index::Var { name, offset: 0 } => f.write_str(name),
            Index::Var { name, offset } if *offset > 0 => write!(f, "{}+{}", name, offset),
            Index::Var { name, offset } => write!(f, "{}{}", name, offset),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Place {
    Scalar(String),
    Element { array: String, index: Index },
}

impl Place {
    pub fn element(array: impl Into<String>, index: Index) -> Self {
        Place::Element {
            array: array.into(),
            index,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Place::Scalar(name) => name,
            Place::Element { array, .. } => array,
        }
    }

    pub fn mentions_var(&self, var: &str) -> bool {
        matches!(self, Place::Element { index: Index::Var { name, .. }, .. } if name == var)
    }

    /// Консервативная проверка: могут ли два места указывать на одну ячейку
    ///
    /// Разные элементы одного массива различаются только для двух
    /// константных индексов.
    pub fn may_alias(&self, other: &Place) -> bool {
        match (self, other) {
            (Place::Scalar(a), Place::Scalar(b)) => a == b,
            (
                Place::Element { array: a, index: ia },
                Place::Element { array: b, index: ib },
            ) => {
                a == b
                    && match (ia, ib) {
                        (Index::Const(x), Index::Const(y)) => x == y,
                        _ => true,
                    }
            }
            _ => false,
        }
    }

    fn map_index(&self, f: &impl Fn(&Index) -> Option<Index>) -> Option<Place> {
        match self {
            Place::Scalar(name) => Some(Place::Scalar(name.clone())),
            Place::Element { array, index } => Some(Place::Element {
                array: array.clone(),
                index: f(index)?,
            }),
        }
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Place::Scalar(name) => f.write_str(name),
            Place::Element { array, index } => write!(f, "{}[{}]", array, index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    Place(Place),
    Const(i64),
}

impl Operand {
    pub fn place(&self) -> Option<&Place> {
        match self {
            Operand::Place(p) => Some(p),
            Operand::Const(_) => None,
        }
    }

    fn map_index(&self, f: &impl Fn(&Index) -> Option<Index>) -> Option<Operand> {
        match self {
            Operand::Place(p) => p.map_index(f).map(Operand::Place),
            Operand::Const(n) => Some(Operand::Const(*n)),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Place(p) => write!(f, "{}", p),
            Operand::Const(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Instr {
    Copy { dst: Place, src: Operand },
    Add { dst: Place, lhs: Operand, rhs: Operand },
}

impl Instr {
    pub fn dst(&self) -> &Place {
        match self {
            Instr::Copy { dst, .. } | Instr::Add { dst, .. } => dst,
        }
    }

    /// Места, которые инструкция читает
    pub fn sources(&self) -> impl Iterator<Item = &Place> + '_ {
        let (first, second) = match self {
            Instr::Copy { src, .. } => (src, None),
            Instr::Add { lhs, rhs, .. } => (lhs, Some(rhs)),
        };
        std::iter::once(first).chain(second).filter_map(Operand::place)
    }

    /// Все места, к которым обращается инструкция: сначала чтения, потом запись
    pub fn accesses(&self) -> impl Iterator<Item = (&Place, bool)> + '_ {
        self.sources()
            .map(|p| (p, false))
            .chain(std::iter::once((self.dst(), true)))
    }

    pub fn mentions_var(&self, var: &str) -> bool {
        self.accesses().any(|(p, _)| p.mentions_var(var))
    }

    /// Читает или пишет ли инструкция ячейку, пересекающуюся с `place`
    pub fn touches(&self, place: &Place) -> bool {
        self.accesses().any(|(p, _)| p.may_alias(place))
    }

    /// Пишет ли инструкция ячейку, пересекающуюся с `place`
    pub fn writes(&self, place: &Place) -> bool {
        self.dst().may_alias(place)
    }

    /// Переписать все индексы; `None`, если `f` отказал хотя бы на одном
    pub fn map_index(&self, f: impl Fn(&Index) -> Option<Index>) -> Option<Instr> {
        Some(match self {
            Instr::Copy { dst, src } => Instr::Copy {
                dst: dst.map_index(&f)?,
                src: src.map_index(&f)?,
            },
            Instr::Add { dst, lhs, rhs } => Instr::Add {
                dst: dst.map_index(&f)?,
                lhs: lhs.map_index(&f)?,
                rhs: rhs.map_index(&f)?,
            },
        })
    }

    /// `var + k` → `var + k + shift`; `None` при переполнении смещения
    pub fn shift_var(&self, var: &str, shift: i64) -> Option<Instr> {
        self.map_index(|index| match index {
            Index::Var { name, offset } if name == var => Some(Index::Var {
                name: name.clone(),
                offset: offset.checked_add(shift)?,
            }),
            other => Some(other.clone()),
        })
    }

    /// `var + k` → константа `value + k`; `None` при переполнении
    pub fn bind_var(&self, var: &str, value: i64) -> Option<Instr> {
        self.map_index(|index| match index {
            Index::Var { name, offset } if name == var => {
                Some(Index::Const(value.checked_add(*offset)?))
            }
            other => Some(other.clone()),
        })
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Copy { dst, src } => write!(f, "{} = {};", dst, src),
            Instr::Add { dst, lhs, rhs } => write!(f, "{} = {} + {};", dst, lhs, rhs),
        }
    }
}

/// Цикл со счётчиком `var` от `start` с шагом `step` пока `var cmp end`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loop {
    pub var: String,
    pub start: i64,
    pub end: i64,
    pub cmp: Cmp,
    pub step: i64,
    pub body: Vec<Instr>,
}

impl Loop {
    /// Первое значение счётчика, на котором условие ложно (для шага 1)
    pub fn exclusive_end(&self) -> i64 {
        match self.cmp {
            Cmp::Lt => self.end,
            Cmp::Le => self.end.saturating_add(1),
        }
    }

    pub fn trip_count(&self) -> u64 {
        let span = self.exclusive_end().saturating_sub(self.start);
        if span <= 0 || self.step <= 0 {
            return 0;
        }
        // ceil(span / step)
        ((span - 1) / self.step + 1) as u64
    }

    /// Одинаковые заголовки: одинаковое пространство итераций
    pub fn same_header(&self, other: &Loop) -> bool {
        self.var == other.var
            && self.start == other.start
            && self.end == other.end
            && self.cmp == other.cmp
            && self.step == other.step
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Instr(Instr),
    Loop(Loop),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decl {
    pub name: String,
    /// `None` для скаляра
    pub size: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub decls: Vec<Decl>,
    pub body: Vec<Stmt>,
}

impl Program {
    pub fn loops(&self) -> impl Iterator<Item = &Loop> + '_ {
        self.body.iter().filter_map(|stmt| match stmt {
            Stmt::Loop(l) => Some(l),
            Stmt::Instr(_) => None,
        })
    }
}

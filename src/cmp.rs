//! Module define the ordering contract consumed by [RbTree].
//!
//! A tree never compares values by itself, every ordering decision is
//! delegated to the [Comparator] fixed at construction time. Comparison
//! is fallible, so that a comparator over dynamically typed values can
//! refuse a pair it does not understand; the error is handed back to
//! the caller of the tree operation untouched.
//!
//! [RbTree]: crate::RbTree

use std::{cmp::Ordering, fmt};

use crate::{Error, Result};

/// Three-way ordering over values of type `T`.
///
/// Implementations must describe a total order, and must be consistent
/// for the lifetime of the tree they are installed in.
pub trait Comparator<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Result<Ordering>;
}

impl<T, F> Comparator<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Result<Ordering> {
        Ok(self(a, b))
    }
}

/// Comparator for any type implementing [Ord], including integers and
/// strings.
#[derive(Clone, Copy, Debug, Default)]
pub struct Natural;

impl<T> Comparator<T> for Natural
where
    T: Ord + ?Sized,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Result<Ordering> {
        Ok(a.cmp(b))
    }
}

/// Adapt a C style comparator returning negative, zero or positive.
///
/// ```
/// use rbtree::{RbTree, ThreeWay};
///
/// let mut index = RbTree::new(ThreeWay(|a: &i32, b: &i32| a - b));
/// index.insert(3).unwrap();
/// index.insert(1).unwrap();
/// assert_eq!(index.first(), Some(&1));
/// ```
#[derive(Clone, Copy)]
pub struct ThreeWay<F>(pub F);

impl<T, F> Comparator<T> for ThreeWay<F>
where
    T: ?Sized,
    F: Fn(&T, &T) -> i32,
{
    fn compare(&self, a: &T, b: &T) -> Result<Ordering> {
        Ok((self.0)(a, b).cmp(&0))
    }
}

/// Dynamically typed value, for trees whose payload type is decided at
/// runtime. Pair it with [IntCmp] or [StrCmp].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Str(String),
}

impl Value {
    fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Str(_) => "string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Int(val) => write!(f, "{}", val),
            Value::Str(val) => write!(f, "{}", val),
        }
    }
}

impl From<i64> for Value {
    fn from(val: i64) -> Value {
        Value::Int(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Value {
        Value::Str(val.to_string())
    }
}

impl From<String> for Value {
    fn from(val: String) -> Value {
        Value::Str(val)
    }
}

/// Integer comparator over [Value], fails with `TypeMismatch` for
/// anything but [Value::Int].
#[derive(Clone, Copy, Debug, Default)]
pub struct IntCmp;

impl Comparator<Value> for IntCmp {
    fn compare(&self, a: &Value, b: &Value) -> Result<Ordering> {
        match (a, b) {
            (Value::Int(x), Value::Int(y)) => Ok(x.cmp(y)),
            (a, b) => err_at!(
                TypeMismatch, msg: "IntCmp on {}:{} and {}:{}", a, a.kind(), b, b.kind()
            ),
        }
    }
}

/// String comparator over [Value], fails with `TypeMismatch` for
/// anything but [Value::Str].
#[derive(Clone, Copy, Debug, Default)]
pub struct StrCmp;

impl Comparator<Value> for StrCmp {
    fn compare(&self, a: &Value, b: &Value) -> Result<Ordering> {
        match (a, b) {
            (Value::Str(x), Value::Str(y)) => Ok(x.cmp(y)),
            (a, b) => err_at!(
                TypeMismatch, msg: "StrCmp on {}:{} and {}:{}", a, a.kind(), b, b.kind()
            ),
        }
    }
}

#[cfg(test)]
#[path = "cmp_test.rs"]
mod cmp_test;

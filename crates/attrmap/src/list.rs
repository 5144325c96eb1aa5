use crate::error::{AttrError, AttrResult};
use crate::shared::{addr, shared, Shared};
use crate::Value;
use std::rc::Rc;

/// Plain mutable sequence.
///
/// Cloning a `List` clones the handle, not the elements: both clones see the
/// same storage. Use [`List::copy`] for a shallow copy.
#[derive(Clone, Default)]
pub struct List(Shared<Vec<Value>>);

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(values: Vec<impl Into<Value>>) -> Self {
        List(shared(values.into_iter().map(|v| v.into()).collect()))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    pub fn at(&self, index: usize) -> AttrResult<Value> {
        let values = self.0.borrow();
        values.get(index).cloned().ok_or(AttrError::IndexOutOfRange {
            index,
            len: values.len(),
        })
    }

    pub fn set(&self, index: usize, value: impl Into<Value>) -> AttrResult<()> {
        let mut values = self.0.borrow_mut();
        let len = values.len();
        match values.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(AttrError::IndexOutOfRange { index, len }),
        }
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.0.borrow_mut().push(value.into());
    }

    pub fn pop(&self) -> Option<Value> {
        self.0.borrow_mut().pop()
    }

    pub fn extend(&self, values: impl IntoIterator<Item = impl Into<Value>>) {
        let values: Vec<Value> = values.into_iter().map(|v| v.into()).collect();
        self.0.borrow_mut().extend(values);
    }

    /// Snapshot of the elements; the returned values are handles into the
    /// same nested containers.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    pub fn copy(&self) -> List {
        List(shared(self.to_vec()))
    }

    pub fn ptr_eq(&self, other: &List) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        addr(&self.0)
    }

    // ========== Chainable Builder Methods ==========

    pub fn with(self, value: impl Into<Value>) -> Self {
        self.push(value);
        self
    }
}

impl<T: Into<Value>> FromIterator<T> for List {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        List(shared(iter.into_iter().map(|v| v.into()).collect()))
    }
}

/// Plain immutable sequence.
#[derive(Clone)]
pub struct Tuple(Rc<[Value]>);

impl Tuple {
    pub fn new(values: Vec<Value>) -> Self {
        Tuple(values.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn at(&self, index: usize) -> AttrResult<Value> {
        self.0.get(index).cloned().ok_or(AttrError::IndexOutOfRange {
            index,
            len: self.0.len(),
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn ptr_eq(&self, other: &Tuple) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        addr(&self.0)
    }
}

impl<T: Into<Value>> FromIterator<T> for Tuple {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Tuple(iter.into_iter().map(|v| v.into()).collect())
    }
}

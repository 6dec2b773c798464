//! Value-level list utilities.
//!
//! Small, allocation-light helpers over slices and strings: `head`, `tail`,
//! `last`, `prepend`, `drop_front`, `reverse`, `concat`, `append`, `join`,
//! `split`, a recursive `flat` over [`Nested`] lists, and `equal`. Borrowing helpers
//! return subslices; building helpers return a fresh `Vec`.

use std::fmt::Display;

/// First element, or `None` for an empty list.
pub fn head<T>(list: &[T]) -> Option<&T> {
    list.first()
}

/// Last element, or `None` for an empty list.
pub fn last<T>(list: &[T]) -> Option<&T> {
    list.last()
}

/// Everything after the first element. Empty for lists of length 0 or 1.
pub fn tail<T>(list: &[T]) -> &[T] {
    list.split_first().map(|(_, rest)| rest).unwrap_or(&[])
}

pub fn length<T>(list: &[T]) -> usize {
    list.len()
}

/// True when the list has at least one element.
pub fn has_tail<T>(list: &[T]) -> bool {
    length(list) != 0
}

pub fn prepend<T: Clone>(list: &[T], item: T) -> Vec<T> {
    let mut out = Vec::with_capacity(list.len() + 1);
    out.push(item);
    out.extend_from_slice(list);
    out
}

/// Remove the first `n` elements. Dropping more than the length yields an empty slice.
pub fn drop_front<T>(list: &[T], n: usize) -> &[T] {
    list.get(n..).unwrap_or(&[])
}

pub fn reverse<T: Clone>(list: &[T]) -> Vec<T> {
    list.iter().rev().cloned().collect()
}

pub fn concat<T: Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    out.extend_from_slice(a);
    out.extend_from_slice(b);
    out
}

pub fn append<T: Clone>(list: &[T], item: T) -> Vec<T> {
    concat(list, std::slice::from_ref(&item))
}

/// Render every element and join with `separator`.
pub fn join<T: Display>(list: &[T], separator: &str) -> String {
    list.iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Split `s` on `separator`. An empty separator splits into characters; an
/// empty input yields an empty list.
pub fn split(s: &str, separator: &str) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }
    if separator.is_empty() {
        return s.chars().map(String::from).collect();
    }
    s.split(separator).map(String::from).collect()
}

/// An arbitrarily nested list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nested<T> {
    Item(T),
    List(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    pub fn depth(&self) -> usize {
        match self {
            Nested::Item(_) => 0,
            Nested::List(items) => 1 + items.iter().map(Nested::depth).max().unwrap_or(0),
        }
    }
}

impl<T> From<T> for Nested<T> {
    fn from(value: T) -> Self {
        Nested::Item(value)
    }
}

/// Flatten every level of nesting, preserving left-to-right order.
pub fn flat<T: Clone>(list: &[Nested<T>]) -> Vec<T> {
    let mut out = Vec::new();
    flat_into(list, &mut out);
    out
}

fn flat_into<T: Clone>(list: &[Nested<T>], out: &mut Vec<T>) {
    for item in list {
        match item {
            Nested::Item(v) => out.push(v.clone()),
            Nested::List(inner) => flat_into(inner, out),
        }
    }
}

/// Flatten exactly one level.
pub fn flat_once<T: Clone>(lists: &[Vec<T>]) -> Vec<T> {
    lists.iter().flatten().cloned().collect()
}

/// Mutual equality: `a == b` and `b == a`. Agrees with `==` for symmetric
/// `PartialEq` impls; for mixed types it rejects a one-sided comparison.
pub fn equal<A, B>(a: &A, b: &B) -> bool
where
    A: PartialEq<B> + ?Sized,
    B: PartialEq<A> + ?Sized,
{
    a == b && b == a
}

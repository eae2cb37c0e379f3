//! Capabilities a value needs to take part in a diff.
//!
//! A diff matches values across two snapshots by their *diff identity* and
//! then asks whether each matched pair still shows the same content. Both
//! questions are answered by the value itself through [`Diffable`]; there
//! is no side table keyed by object address and no runtime type checks.

use std::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A value that can be matched across two snapshots of an ordered collection.
///
/// Identities are expected to be unique within one collection. When they are
/// not, the first occurrence wins the match and later occurrences are
/// reported as inserts or deletes.
pub trait Diffable {
    /// The identity type. Stable across reorders and content changes.
    type Id: Hash + Eq;

    /// The identity used to recognise this value in the other snapshot.
    fn diff_id(&self) -> &Self::Id;

    /// Whether `other`, already matched by identity, shows the same content.
    ///
    /// Returning `false` reports the pair as an update.
    fn content_eq(&self, other: &Self) -> bool;
}

/// A diffable value that also owns an ordered run of diffable items.
///
/// Section identity and section content equality are evaluated
/// independently of the items the section contains.
pub trait DiffableSection: Diffable {
    /// The contained item type.
    type Item: Diffable;

    /// The section's items, in display order.
    fn items(&self) -> &[Self::Item];
}

impl<T: Diffable + ?Sized> Diffable for &T {
    type Id = T::Id;

    fn diff_id(&self) -> &Self::Id {
        (**self).diff_id()
    }

    fn content_eq(&self, other: &Self) -> bool {
        (**self).content_eq(*other)
    }
}

impl<T: Diffable + ?Sized> Diffable for Rc<T> {
    type Id = T::Id;

    fn diff_id(&self) -> &Self::Id {
        (**self).diff_id()
    }

    fn content_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other) || (**self).content_eq(other)
    }
}

impl<T: Diffable + ?Sized> Diffable for Arc<T> {
    type Id = T::Id;

    fn diff_id(&self) -> &Self::Id {
        (**self).diff_id()
    }

    fn content_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other) || (**self).content_eq(other)
    }
}

/// An identity paired with a value; content equality is `V: PartialEq`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keyed<K, V> {
    /// The diff identity.
    pub id: K,
    /// The displayed content.
    pub value: V,
}

impl<K, V> Keyed<K, V> {
    /// Pair `id` with `value`.
    pub fn new(id: K, value: V) -> Self {
        Self { id, value }
    }
}

impl<K: Hash + Eq, V: PartialEq> Diffable for Keyed<K, V> {
    type Id = K;

    fn diff_id(&self) -> &K {
        &self.id
    }

    fn content_eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// A section with an identity, header content, and ordered items.
///
/// Two sections are content-equal when their headers are equal; the items
/// are diffed separately.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section<K, T, H = ()> {
    /// The section's diff identity.
    pub id: K,
    /// Section chrome (title, footer, ...). Compared for section updates.
    pub header: H,
    /// The section's rows.
    pub items: Vec<T>,
}

impl<K, T> Section<K, T> {
    /// A section without header content.
    pub fn new(id: K, items: Vec<T>) -> Self {
        Self {
            id,
            header: (),
            items,
        }
    }
}

impl<K, T, H> Section<K, T, H> {
    /// A section with header content.
    pub fn with_header(id: K, header: H, items: Vec<T>) -> Self {
        Self { id, header, items }
    }
}

impl<K: Hash + Eq, T, H: PartialEq> Diffable for Section<K, T, H> {
    type Id = K;

    fn diff_id(&self) -> &K {
        &self.id
    }

    fn content_eq(&self, other: &Self) -> bool {
        self.header == other.header
    }
}

impl<K: Hash + Eq, T: Diffable, H: PartialEq> DiffableSection for Section<K, T, H> {
    type Item = T;

    fn items(&self) -> &[T] {
        &self.items
    }
}

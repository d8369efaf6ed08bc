//! Columns and search fields shared by configuration list views.
//!
//! Views that relabel a shared column get their own copy; the shared
//! definitions are built fresh on every call.

use crate::i18n::Translate;
use crate::search::{ListColumn, ListField};

#[must_use]
pub fn id_column<T: Translate + ?Sized>(t: &T) -> ListColumn {
    ListColumn::new("id", t.text("Name"))
}

#[must_use]
pub fn desc_column<T: Translate + ?Sized>(t: &T) -> ListColumn {
    ListColumn::new("desc", t.text("Description"))
}

#[must_use]
pub fn id_field<T: Translate + ?Sized>(t: &T) -> ListField {
    ListField::substring("id", t.text("Name"))
}

#[must_use]
pub fn desc_field<T: Translate + ?Sized>(t: &T) -> ListField {
    ListField::substring("desc", t.text("Description"))
}

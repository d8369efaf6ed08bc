//! Form and list views of the configuration pages.
//!
//! Views are built per call from a [`ViewContext`] and a translator; nothing
//! here is cached.
//!
//! [`ViewContext`]: crate::form::ViewContext

pub mod fingerbank;
pub mod security_events;

//! Carried context.
//!
//! A [`Scope`] is an explicit handle the caller threads through nested calls
//! of one logical operation (a request, a job). Each [`Scope::attach`]
//! returns a new handle whose text is the previous text followed by the new
//! fragments, comma-separated. Writers read it with
//! [`Writer::from_scope`](crate::Writer::from_scope) and append it to every
//! later record as a trailing field.

use serde::Serialize;

use crate::error::BoxlogResult;
use crate::field::Field;

/// What [`Scope::read`] returns for a scope with no context.
pub const NOT_FOUND: &str = "\"value\":\"not found\"";

const SEPARATOR: &str = ", ";

/// Accumulated context for one logical execution scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    text: String,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new scope carrying the prior text followed by `fragments`.
    ///
    /// With no fragments the result equals `self`.
    pub fn attach<I>(&self, fragments: I) -> Scope
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut text = self.text.clone();
        for fragment in fragments {
            if !text.is_empty() {
                text.push_str(SEPARATOR);
            }
            text.push_str(fragment.as_ref());
        }
        Scope { text }
    }

    /// Attach a structured fragment, rendered the same way as a record field.
    pub fn attach_value<T: Serialize + ?Sized>(&self, value: &T) -> BoxlogResult<Scope> {
        let text = Field::value(value)?.to_text()?;
        Ok(self.attach([text]))
    }

    /// The carried text, or [`NOT_FOUND`] when nothing was attached.
    pub fn read(&self) -> String {
        if self.text.is_empty() {
            NOT_FOUND.to_string()
        } else {
            self.text.clone()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

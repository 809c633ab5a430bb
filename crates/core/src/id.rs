//! Identifier generation and validation.
//!
//! Every stored object gets a fresh random UUID v4. Client-supplied strings
//! must pass [`validate`] (or [`parse`]) before they are used as a store key.

use imgstore_shared::ObjectId;

use crate::object::ObjectError;

/// Generates a fresh identifier.
///
/// Randomness comes from the operating system's CSPRNG; exhaustion of that
/// source aborts the process.
#[must_use]
pub fn generate() -> ObjectId {
    ObjectId::new()
}

/// Returns true iff `s` is a UUID in the hyphenated `8-4-4-4-12` form.
#[must_use]
pub fn validate(s: &str) -> bool {
    ObjectId::parse(s).is_ok()
}

/// Parses a client-supplied identifier.
///
/// # Errors
///
/// Returns [`ObjectError::Malformed`] if `s` fails [`validate`].
pub fn parse(s: &str) -> Result<ObjectId, ObjectError> {
    ObjectId::parse(s).map_err(|_| ObjectError::malformed(s))
}

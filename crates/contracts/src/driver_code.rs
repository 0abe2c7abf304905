//! DriverCode - normalized, cheap-to-clone driver identifier.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Three-letter style driver abbreviation (`VER`, `HAM`).
///
/// Codes are trimmed and upper-cased on construction, so `"ver"`, `" VER "`
/// and `"VER"` name the same driver in every session lookup and map key.
/// Cloning shares one `Arc<str>`.
///
/// ```
/// use contracts::DriverCode;
///
/// let code = DriverCode::new(" lec");
/// assert_eq!(code.as_str(), "LEC");
/// assert_eq!(code, DriverCode::from("LEC"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DriverCode(Arc<str>);

impl DriverCode {
    pub fn new(code: &str) -> Self {
        let code = code.trim();
        if code.bytes().any(|b| b.is_ascii_lowercase()) {
            Self(Arc::from(code.to_ascii_uppercase()))
        } else {
            Self(Arc::from(code))
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the code is non-empty and ASCII alphanumeric.
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty() && self.0.bytes().all(|b| b.is_ascii_alphanumeric())
    }
}

impl Deref for DriverCode {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

// Stored form is normalized, so `HashMap<DriverCode, _>::get("VER")` works;
// lookups by raw &str must already be upper case.
impl Borrow<str> for DriverCode {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DriverCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for DriverCode {
    fn from(code: String) -> Self {
        Self::new(&code)
    }
}

impl fmt::Display for DriverCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for DriverCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DriverCode({:?})", self.0)
    }
}

impl PartialEq<str> for DriverCode {
    fn eq(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl PartialEq<&str> for DriverCode {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for DriverCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DriverCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

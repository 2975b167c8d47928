use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Opaque reference to a blob held by the blob collaborator.
///
/// Folio never inspects blob content. The reference is resolved into a
/// retrievable URL outside the engine.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobRef(String);

impl BlobRef {
    pub fn new(reference: impl Into<String>) -> Result<Self, TypeError> {
        let reference = reference.into();
        if reference.is_empty() {
            return Err(TypeError::EmptyBlobRef);
        }
        Ok(Self(reference))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for BlobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlobRef({})", self.0)
    }
}

impl fmt::Display for BlobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

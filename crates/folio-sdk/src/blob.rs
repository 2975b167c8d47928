//! Turning blob references into fetchable URLs.

use folio_types::BlobRef;

use crate::error::{SdkError, SdkResult};

/// Resolves an opaque [`BlobRef`] to a location a client can download from.
pub trait BlobResolver: Send + Sync {
    fn url(&self, blob: &BlobRef) -> SdkResult<String>;
}

/// Resolver that appends the blob reference to a fixed base URL.
///
/// References that are already absolute `http(s)` URLs are returned as is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlTemplateResolver {
    base: String,
}

impl UrlTemplateResolver {
    pub fn new(base: impl Into<String>) -> SdkResult<Self> {
        let base = base.into();
        let base = base.trim_end_matches('/');
        if base.is_empty() {
            return Err(SdkError::Config("blob base URL is empty".into()));
        }
        Ok(Self {
            base: base.to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }
}

impl BlobResolver for UrlTemplateResolver {
    fn url(&self, blob: &BlobRef) -> SdkResult<String> {
        let reference = blob.as_str();
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Ok(reference.to_string());
        }
        Ok(format!("{}/{}", self.base, reference.trim_start_matches('/')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(s: &str) -> BlobRef {
        BlobRef::new(s).unwrap()
    }

    #[test]
    fn joins_base_and_reference() {
        let r = UrlTemplateResolver::new("https://cdn.example.com/files/").unwrap();
        assert_eq!(r.base(), "https://cdn.example.com/files");
        assert_eq!(
            r.url(&blob("abc123")).unwrap(),
            "https://cdn.example.com/files/abc123"
        );
        assert_eq!(
            r.url(&blob("/nested/id")).unwrap(),
            "https://cdn.example.com/files/nested/id"
        );
    }

    #[test]
    fn absolute_references_pass_through() {
        let r = UrlTemplateResolver::new("https://cdn.example.com").unwrap();
        let url = "https://other.example.org/x.pdf";
        assert_eq!(r.url(&blob(url)).unwrap(), url);
    }

    #[test]
    fn empty_base_is_rejected() {
        assert!(matches!(
            UrlTemplateResolver::new("/"),
            Err(SdkError::Config(_))
        ));
    }
}

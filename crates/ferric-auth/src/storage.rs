//! Upload storage abstraction.

/// Resolves stored upload paths to servable URLs.
pub trait Storage: Send + Sync {
    /// Returns the public URL for a stored path.
    fn url(&self, path: &str) -> String;
}

/// Storage serving uploads from a URL prefix on the local disk.
#[derive(Debug, Clone)]
pub struct DiskStorage {
    prefix: String,
}

impl DiskStorage {
    /// Creates a storage rooted at a URL prefix (e.g. `/uploads`).
    pub fn new(prefix: impl Into<String>) -> Self {
        let mut prefix = prefix.into();
        while prefix.ends_with('/') {
            prefix.pop();
        }
        Self { prefix }
    }
}

impl Storage for DiskStorage {
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.prefix, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_storage_joins_paths() {
        let storage = DiskStorage::new("/uploads/");
        assert_eq!(storage.url("a/b.png"), "/uploads/a/b.png");
        assert_eq!(storage.url("/a/b.png"), "/uploads/a/b.png");
    }
}

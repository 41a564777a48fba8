//! File attachments
//!
//! An attachment is either a filesystem path or a host-specific reference
//! (for example a media library id) that the host turns into a path.

use std::path::{Path, PathBuf};

/// Reference to a file to attach
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentRef {
    /// A file on disk
    Path(PathBuf),
    /// An id understood by the host's [`AttachmentResolver`]
    Host(String),
}

impl From<PathBuf> for AttachmentRef {
    fn from(path: PathBuf) -> Self {
        AttachmentRef::Path(path)
    }
}

impl From<&Path> for AttachmentRef {
    fn from(path: &Path) -> Self {
        AttachmentRef::Path(path.to_path_buf())
    }
}

impl From<&str> for AttachmentRef {
    fn from(path: &str) -> Self {
        AttachmentRef::Path(PathBuf::from(path))
    }
}

/// Host collaborator turning attachment references into file paths
pub trait AttachmentResolver {
    /// Filesystem path for `id`, `None` if the host does not know it
    fn resolve(&self, id: &str) -> Option<PathBuf>;
}

impl<F> AttachmentResolver for F
where
    F: Fn(&str) -> Option<PathBuf>,
{
    fn resolve(&self, id: &str) -> Option<PathBuf> {
        self(id)
    }
}

/// Resolve `attachment` to an existing file path
pub(crate) fn resolve_attachment(
    attachment: &AttachmentRef,
    resolver: Option<&(dyn AttachmentResolver + Send + Sync)>,
) -> Option<PathBuf> {
    match attachment {
        AttachmentRef::Path(path) => path.is_file().then(|| path.clone()),
        AttachmentRef::Host(id) => {
            let path = resolver?.resolve(id)?;
            // An empty path means the host knows the id but has no file
            (!path.as_os_str().is_empty()).then_some(path)
        }
    }
}

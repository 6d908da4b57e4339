use std::fmt;

use tracing::info;

use crate::kv_store::KvStore;


/// Paths containing any of these anywhere are off limits, "src/node_modules/x.js" included.
pub const IGNORED_PATTERNS: &[&str] = &[
    "node_modules",
    "vendor",
    ".git",
    ".vscode",
    ".idea",
    "dist",
    "build",
    "coverage",
];

#[derive(Debug, Clone, PartialEq)]
pub enum FileToolError {
    AccessDenied(String),
    WriteDenied(String),
    NotFound(String),
    Store(String),
}

impl fmt::Display for FileToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileToolError::AccessDenied(path) => write!(f, "Access Denied: Reading '{}' is restricted (performance safety).", path),
            FileToolError::WriteDenied(path) => write!(f, "Write Denied: Writing to '{}' is restricted.", path),
            FileToolError::NotFound(path) => write!(f, "File not found: {}", path),
            FileToolError::Store(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FileToolError {}

pub fn is_ignored(path: &str) -> bool {
    IGNORED_PATTERNS.iter().any(|pattern| path.contains(pattern))
}

pub async fn list_files(files: &dyn KvStore) -> Result<Vec<String>, FileToolError> {
    let names = files.list(None).await.map_err(FileToolError::Store)?;
    Ok(names.into_iter().filter(|name| !is_ignored(name)).collect())
}

pub async fn read_file(files: &dyn KvStore, path: &str) -> Result<String, FileToolError> {
    if is_ignored(path) {
        return Err(FileToolError::AccessDenied(path.to_string()));
    }
    match files.get(path).await.map_err(FileToolError::Store)? {
        Some(content) => Ok(content),
        None => Err(FileToolError::NotFound(path.to_string())),
    }
}

pub async fn write_file(files: &dyn KvStore, path: &str, content: &str) -> Result<String, FileToolError> {
    if is_ignored(path) {
        return Err(FileToolError::WriteDenied(path.to_string()));
    }
    files.put(path, content).await.map_err(FileToolError::Store)?;
    info!("files: wrote {} bytes to {}", content.len(), path);
    Ok(format!("Successfully wrote to {}", path))
}

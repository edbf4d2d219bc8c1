/// Artifact-store errors for batch-partitioned warehouse files.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("artifact `{artifact}` missing for batch {batch}")]
    ArtifactMissing { artifact: String, batch: String },

    #[error("corrupt record in {path} at line {line}: {reason}")]
    CorruptRecord {
        path: String,
        line: usize,
        reason: String,
    },
}

pub const DEFAULT_DOCUMENT_BUCKET: &str = "f13tech-hrms-documents";

/// Where uploaded documents live and how they are addressed publicly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentBucket {
    pub bucket: String,
    pub public_host: String,
}

impl DocumentBucket {
    /// Bucket addressed through its virtual-hosted S3 endpoint.
    pub fn new(bucket: impl Into<String>) -> Self {
        let bucket = bucket.into();
        let public_host = format!("{bucket}.s3.amazonaws.com");
        Self {
            bucket,
            public_host,
        }
    }

    pub fn with_public_host(mut self, public_host: impl Into<String>) -> Self {
        self.public_host = public_host.into();
        self
    }

    /// Build the object reference for a new upload. No bytes are transferred.
    ///
    /// `unique` keeps repeated uploads of the same file name from colliding.
    pub fn reference(&self, owner: &str, unique: &str, file_name: &str) -> BlobReference {
        let key = format!("{owner}/{unique}-{file_name}");
        let url = format!("https://{}/{}", self.public_host, key);
        BlobReference {
            bucket: self.bucket.clone(),
            key,
            url,
        }
    }
}

impl Default for DocumentBucket {
    fn default() -> Self {
        Self::new(DEFAULT_DOCUMENT_BUCKET)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobReference {
    pub bucket: String,
    pub key: String,
    pub url: String,
}

use std::fmt;

pub const ACCEPTED_EXTENSION: &str = ".wav";

/// Client-supplied file name, reduced to its final path component and checked
/// against the accepted extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFileName(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadFileNameError {
    #[error("no file name supplied")]
    Missing,
    #[error("only WAV files are supported, got: {0}")]
    UnsupportedExtension(String),
}

impl UploadFileName {
    pub fn parse(raw: &str) -> Result<Self, UploadFileNameError> {
        let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);

        if base.trim().is_empty() {
            return Err(UploadFileNameError::Missing);
        }

        if !base.ends_with(ACCEPTED_EXTENSION) {
            return Err(UploadFileNameError::UnsupportedExtension(raw.to_string()));
        }

        Ok(Self(base.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UploadFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//! Cheap checks run before an input is decoded.

use std::io::Read;
use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::PipelineError;

/// Leading-byte signatures of the formats the decoder accepts.
const SIGNATURES: &[(&str, &[u8])] = &[
    ("jpeg", &[0xFF, 0xD8, 0xFF]),
    ("png", &[0x89, b'P', b'N', b'G']),
    ("gif", b"GIF8"),
    ("bmp", b"BM"),
    ("tiff", &[b'I', b'I', 0x2A, 0x00]),
    ("tiff", &[b'M', b'M', 0x00, 0x2A]),
];

/// Rejects inputs that cannot possibly decode before any pixels are read.
pub struct Validator {
    limits: LimitsConfig,
}

impl Validator {
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Reject missing, oversized, or non-image inputs.
    pub fn validate(&self, path: &Path) -> Result<(), PipelineError> {
        if !path.is_file() {
            return Err(PipelineError::FileNotFound(path.to_path_buf()));
        }

        let size = std::fs::metadata(path)
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot read metadata: {}", e),
            })?
            .len();

        let max_bytes = self.limits.max_file_size_mb * 1024 * 1024;
        if size > max_bytes {
            return Err(PipelineError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb: size / (1024 * 1024),
                max_mb: self.limits.max_file_size_mb,
            });
        }

        let header = read_header(path)?;
        match sniff_format(&header) {
            Some(format) => {
                tracing::trace!("{:?} looks like {}", path, format);
                Ok(())
            }
            None if header.len() < 4 => Err(PipelineError::Decode {
                path: path.to_path_buf(),
                message: "File too small to be a valid image".to_string(),
            }),
            None => Err(PipelineError::Decode {
                path: path.to_path_buf(),
                message: "Unrecognized image format (invalid magic bytes)".to_string(),
            }),
        }
    }
}

/// Name the image format the header bytes belong to, if any.
pub fn sniff_format(header: &[u8]) -> Option<&'static str> {
    if header.len() < 4 {
        return None;
    }

    // RIFF container: only WEBP inside counts, but a truncated header gets the benefit of the doubt.
    if header.starts_with(b"RIFF") {
        return match header.get(8..12) {
            Some(kind) if kind != b"WEBP" => None,
            _ => Some("webp"),
        };
    }

    SIGNATURES
        .iter()
        .find(|(_, magic)| header.starts_with(magic))
        .map(|(name, _)| *name)
}

/// Up to the first 12 bytes of the file.
fn read_header(path: &Path) -> Result<Vec<u8>, PipelineError> {
    let file = std::fs::File::open(path).map_err(|e| PipelineError::Decode {
        path: path.to_path_buf(),
        message: format!("Cannot open file: {}", e),
    })?;

    let mut header = Vec::with_capacity(12);
    file.take(12)
        .read_to_end(&mut header)
        .map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot read file header: {}", e),
        })?;
    Ok(header)
}

//! Storage buckets and object naming for uploaded files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::UnknownVariant;

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Request body limit for the server. Upload bytes travel as a JSON number
/// array, at most four characters per byte (`255,`), plus room for the
/// bucket and file name.
pub const MAX_UPLOAD_BODY_BYTES: usize = MAX_UPLOAD_BYTES * 4 + 64 * 1024;

/// Longest sanitized file name kept in an object name.
const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBucket {
    ProductMedia,
    Documentation,
    Marketing,
    Training,
}

impl StorageBucket {
    pub const ALL: [StorageBucket; 4] = [
        StorageBucket::ProductMedia,
        StorageBucket::Documentation,
        StorageBucket::Marketing,
        StorageBucket::Training,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StorageBucket::ProductMedia => "product-media",
            StorageBucket::Documentation => "documentation",
            StorageBucket::Marketing => "marketing",
            StorageBucket::Training => "training",
        }
    }
}

impl fmt::Display for StorageBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageBucket {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StorageBucket::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                column: "bucket",
                value: s.to_string(),
            })
    }
}

/// Reduce a client-supplied file name to `[A-Za-z0-9._-]`, without leading dots.
pub fn sanitize_file_name(name: &str) -> String {
    // Browsers may send a full path on some platforms
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    let mut out: String = if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    };
    if out.len() > MAX_NAME_LEN {
        // Keep the extension when truncating
        let ext = out.rsplit_once('.').map(|(_, e)| e.to_string()).filter(|e| e.len() <= 10);
        out.truncate(MAX_NAME_LEN);
        if let Some(ext) = ext {
            if !out.ends_with(&ext) {
                out.truncate(MAX_NAME_LEN - ext.len() - 1);
                out.push('.');
                out.push_str(&ext);
            }
        }
    }
    out
}

/// Object name for an upload: a unique prefix plus the sanitized file name.
pub fn object_name(unique: &str, file_name: &str) -> String {
    format!("{unique}-{}", sanitize_file_name(file_name))
}

/// Public URL of a stored object.
pub fn public_url(base: &str, bucket: StorageBucket, object: &str) -> String {
    format!("{}/{}/{}", base.trim_end_matches('/'), bucket.as_str(), object)
}

/// Best-effort MIME type from the file extension.
pub fn content_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, e)| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "zip" => "application/zip",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_paths_and_specials() {
        assert_eq!(sanitize_file_name("C:\\Users\\me\\Price List (2024).pdf"), "Price_List__2024_.pdf");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name("..."), "file");
        assert_eq!(sanitize_file_name("catálogo.pdf"), "cat_logo.pdf");
    }

    #[test]
    fn test_sanitize_truncates_but_keeps_extension() {
        let long = format!("{}.pdf", "a".repeat(300));
        let out = sanitize_file_name(&long);
        assert_eq!(out.len(), MAX_NAME_LEN);
        assert!(out.ends_with(".pdf"));
    }

    #[test]
    fn test_object_name_and_public_url() {
        let object = object_name("5f2c", "brochure v2.pdf");
        assert_eq!(object, "5f2c-brochure_v2.pdf");
        assert_eq!(
            public_url("http://localhost:8080/storage/", StorageBucket::ProductMedia, &object),
            "http://localhost:8080/storage/product-media/5f2c-brochure_v2.pdf"
        );
    }

    #[test]
    fn test_bucket_parse() {
        assert_eq!("marketing".parse::<StorageBucket>(), Ok(StorageBucket::Marketing));
        assert!("../secrets".parse::<StorageBucket>().is_err());
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type("Guide.PDF"), "application/pdf");
        assert_eq!(content_type("noext"), "application/octet-stream");
    }

    #[test]
    fn test_body_limit_fits_largest_upload() {
        #[derive(Serialize)]
        struct Upload<'a> {
            bucket: StorageBucket,
            file_name: &'a str,
            bytes: &'a [u8],
        }

        let bytes = vec![255u8; 64 * 1024];
        let name = "x".repeat(1024);
        let body = serde_json::to_vec(&Upload {
            bucket: StorageBucket::Documentation,
            file_name: &name,
            bytes: &bytes,
        })
        .unwrap();

        // The per-byte cost scales linearly up to the full upload size.
        let overhead = body.len() - bytes.len() * 4;
        assert!(overhead < 64 * 1024, "{overhead}");
    }
}

//! Object keys for uploaded product images
//!
//! ```text
//! {bucket}/
//! └── products/
//!     └── {unix_millis}-{stem}.{ext}
//! ```

use chrono::Utc;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

const MAX_STEM_LEN: usize = 30;
const FALLBACK_STEM: &str = "image";

/// Last stamp handed out by `for_upload`
static LAST_STAMP: AtomicI64 = AtomicI64::new(0);

/// Represents the key of an image object in the bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Key for a freshly uploaded file, stamped with the current time
    ///
    /// Stamps are strictly increasing within the process: an upload landing in
    /// the same millisecond as the previous one takes the next millisecond, so
    /// two same-named files never share a key.
    pub fn for_upload(prefix: &str, original_name: &str) -> Self {
        Self::with_timestamp(prefix, original_name, next_stamp(Utc::now().timestamp_millis()))
    }

    /// Build `{prefix}/{millis}-{stem}.{ext}` from the client-supplied filename
    ///
    /// The stem keeps `[A-Za-z0-9_-]` (spaces become `-`) and is cut to 30
    /// characters. The last extension is kept, lowercased.
    pub fn with_timestamp(prefix: &str, original_name: &str, millis: i64) -> Self {
        // Browsers on Windows may send a full path
        let base = original_name
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or(original_name);

        let (stem, ext) = match base.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
            _ => (base, None),
        };

        let mut stem: String = stem
            .chars()
            .map(|c| if c == ' ' { '-' } else { c })
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .take(MAX_STEM_LEN)
            .collect();
        if stem.is_empty() {
            stem = FALLBACK_STEM.to_string();
        }

        let ext = ext
            .map(|e| {
                e.chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .collect::<String>()
                    .to_ascii_lowercase()
            })
            .filter(|e| !e.is_empty());

        let prefix = prefix.trim_matches('/');
        let key = match ext {
            Some(ext) => format!("{}/{}-{}.{}", prefix, millis, stem, ext),
            None => format!("{}/{}-{}", prefix, millis, stem),
        };
        ObjectKey(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase extension of the key, if any
    pub fn extension(&self) -> Option<&str> {
        let file = self.0.rsplit('/').next()?;
        file.rsplit_once('.').map(|(_, ext)| ext)
    }
}

fn next_stamp(now: i64) -> i64 {
    let previous = LAST_STAMP
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(now.max(last + 1)))
        .unwrap_or_else(|last| last);
    now.max(previous + 1)
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Guess a content type from a file extension
pub fn content_type_for(ext: Option<&str>) -> &'static str {
    match ext.map(|e| e.to_ascii_lowercase()).as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

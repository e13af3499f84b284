/* src/path.rs */

use std::path::{Path, PathBuf};

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::error::Error;

/// Characters escaped in a single path segment used inside an `href`.
///
/// Covers whitespace and quotes (attribute context) plus everything that
/// would change how the URL is split (`?`, `#`, `%`, `/`).
const SEGMENT: &AsciiSet = &CONTROLS
	.add(b' ')
	.add(b'"')
	.add(b'#')
	.add(b'%')
	.add(b'&')
	.add(b'\'')
	.add(b'/')
	.add(b'<')
	.add(b'>')
	.add(b'?')
	.add(b'`');

/// Normalizes an already-decoded request path.
///
/// Empty and `.` segments are dropped and `..` pops the previous segment,
/// never climbing above `/`. The result always starts with `/` and never
/// ends with one, except for the root itself.
///
/// ```
/// assert_eq!(autoindex::path::clean("/a//b/./c/../"), "/a/b");
/// assert_eq!(autoindex::path::clean("/../.."), "/");
/// ```
#[must_use]
pub fn clean(request_path: &str) -> String {
	let segments = segments(request_path);
	if segments.is_empty() {
		return "/".to_owned();
	}
	let mut cleaned = String::with_capacity(request_path.len());
	for segment in segments {
		cleaned.push('/');
		cleaned.push_str(segment);
	}
	cleaned
}

/// Splits a request path into its normalized segments.
///
/// Same rules as [`clean`]: `..` is clamped at the root.
#[must_use]
pub fn segments(request_path: &str) -> Vec<&str> {
	let mut out = Vec::new();
	for segment in request_path.split('/') {
		match segment {
			"" | "." => {}
			".." => {
				out.pop();
			}
			other => out.push(other),
		}
	}
	out
}

/// Maps a decoded request path onto the filesystem below `root`.
///
/// The path is normalized in memory first, so `..` can never escape the
/// root boundary. Symlinks are left to the host filesystem. The target is
/// not required to exist; the caller decides what a missing path means.
///
/// ```
/// let root = std::env::temp_dir();
/// let resolved = autoindex::path::resolve(&root, "/../docs").unwrap();
/// assert!(resolved.ends_with("docs"));
/// ```
pub fn resolve(root: &Path, request_path: &str) -> Result<PathBuf, Error> {
	let root = root.canonicalize().map_err(|source| Error::InvalidRoot {
		path: root.to_path_buf(),
		source,
	})?;

	if request_path.contains('\0') {
		return Err(Error::NullByte);
	}

	let mut resolved = root;
	for segment in segments(request_path) {
		resolved.push(segment);
	}
	Ok(resolved)
}

/// Percent-encodes a single path segment for use in a link.
///
/// ```
/// assert_eq!(autoindex::path::encode_segment("it's here"), "it%27s%20here");
/// ```
#[must_use]
pub fn encode_segment(segment: &str) -> String {
	utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Percent-encodes every segment of a cleaned path, keeping the separators.
#[must_use]
pub fn encode_path(path: &str) -> String {
	path.split('/')
		.map(encode_segment)
		.collect::<Vec<_>>()
		.join("/")
}

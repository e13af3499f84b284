/* src/error.rs */

use std::path::PathBuf;

use thiserror::Error;

/// All errors that autoindex can produce.
///
/// Only failures that make the whole listing impossible surface here.
/// Per-entry stat failures, bad sort parameters and broken embed templates
/// degrade to a partial or default rendering instead.
#[derive(Debug, Error)]
pub enum Error {
	/// The served root is invalid or does not exist.
	#[error("invalid root path '{path}': {source}")]
	InvalidRoot {
		/// The path that failed to canonicalize.
		path: PathBuf,
		/// The underlying I/O error.
		source: std::io::Error,
	},

	/// The request path contains a null byte.
	#[error("null byte in request path")]
	NullByte,

	/// The resolved path exists but is not a directory.
	#[error("not a directory: '{path}'")]
	NotADirectory {
		/// The resolved filesystem path.
		path: PathBuf,
	},

	/// The directory could not be opened for enumeration.
	#[error("cannot read directory '{path}': {source}")]
	ReadDir {
		/// The directory that failed to open.
		path: PathBuf,
		/// The underlying I/O error.
		source: std::io::Error,
	},

	/// A built-in template failed to register.
	#[error("template error: {0}")]
	Template(#[from] Box<handlebars::TemplateError>),

	/// The built-in layout failed to render.
	#[error("render error: {0}")]
	Render(#[from] Box<handlebars::RenderError>),
}

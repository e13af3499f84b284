/* src/options.rs */

use serde::{Deserialize, Serialize};

/// Default strftime pattern for the "Last modified" column.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default maximum length of a displayed file name.
pub const DEFAULT_TRUNCATE_LENGTH: usize = 40;

/// Caller-supplied configuration for a directory listing.
///
/// Every field is optional from the caller's point of view: build it with
/// struct-update syntax over [`Options::default`], or deserialize it from a
/// config file where missing keys take their defaults.
///
/// ```
/// let options = autoindex::Options {
///     stylesheet: Some("/stylesheets/styles.css".to_owned()),
///     ..autoindex::Options::default()
/// };
/// assert!(options.smart_sort);
/// assert_eq!(options.filename_truncate_length, 40);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
	/// Include entries whose name starts with `.`.
	pub should_list_invisibles: bool,
	/// When false, file extensions are stripped from displayed names.
	/// Links always keep the full name.
	pub should_show_file_exts: bool,
	/// Ignore a leading "the " when sorting by name.
	pub smart_sort: bool,
	/// strftime pattern for the modified-time column.
	pub last_modified_format: String,
	/// Maximum rendered characters of a name, ellipsis included.
	pub filename_truncate_length: usize,
	/// Stylesheet href added to the page head.
	pub stylesheet: Option<String>,
	/// Favicon href added to the page head.
	pub favicon: Option<String>,
	/// Trusted HTML appended below the table, inserted unescaped.
	pub readme: Option<String>,
	/// Path of a custom page template inside the served root.
	pub embed_in: Option<String>,
}

impl Default for Options {
	fn default() -> Self {
		Self {
			should_list_invisibles: false,
			should_show_file_exts: true,
			smart_sort: true,
			last_modified_format: DEFAULT_TIME_FORMAT.to_owned(),
			filename_truncate_length: DEFAULT_TRUNCATE_LENGTH,
			stylesheet: None,
			favicon: None,
			readme: None,
			embed_in: None,
		}
	}
}

impl Options {
	/// Stylesheet href with a single leading `/`, if one is configured.
	#[must_use]
	pub fn stylesheet_href(&self) -> Option<String> {
		non_empty(self.stylesheet.as_deref()).map(rooted)
	}

	/// Favicon href with a single leading `/`, if one is configured.
	#[must_use]
	pub fn favicon_href(&self) -> Option<String> {
		non_empty(self.favicon.as_deref()).map(rooted)
	}

	/// Readme fragment, if one is configured.
	#[must_use]
	pub fn readme_html(&self) -> Option<&str> {
		non_empty(self.readme.as_deref())
	}

	/// Custom template path, if one is configured.
	#[must_use]
	pub fn embed_template(&self) -> Option<&str> {
		non_empty(self.embed_in.as_deref())
	}
}

fn non_empty(value: Option<&str>) -> Option<&str> {
	value.filter(|v| !v.trim().is_empty())
}

fn rooted(href: &str) -> String {
	format!("/{}", href.trim_start_matches('/'))
}

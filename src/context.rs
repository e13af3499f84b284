/* src/context.rs */

use crate::options::Options;
use crate::path;
use crate::sort::{Direction, SortField, SortState};

/// Everything one request needs to render its listing.
///
/// Built once per request by [`PageContext::resolve`] and passed by
/// reference through every rendering step. Nothing in it is shared
/// between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
	/// Effective configuration.
	pub options: Options,
	/// Cleaned, decoded request path. Always starts with `/`.
	pub current_page: String,
	/// Resolved sort, defaults applied.
	pub sort: SortState,
	/// Whether the request itself carried both `sortby` and `direction`.
	/// Only then are sort parameters carried over into navigation links.
	pub sort_requested: bool,
}

impl PageContext {
	/// Resolves the context from a raw query string (without the `?`).
	///
	/// ```
	/// use autoindex::{Options, PageContext};
	/// use autoindex::sort::{Direction, SortField};
	///
	/// let ctx = PageContext::resolve(Options::default(), "/docs/", "sortby=size&direction=bogus");
	/// assert_eq!(ctx.current_page, "/docs");
	/// assert_eq!(ctx.sort.field, SortField::Size);
	/// assert_eq!(ctx.sort.direction, Direction::Ascending);
	/// ```
	#[must_use]
	pub fn resolve(options: Options, request_path: &str, query: &str) -> Self {
		Self::from_params(options, request_path, parse_query(query))
	}

	/// Resolves the context from already-decoded query parameters.
	///
	/// `sortby` and `direction` fall back to their defaults independently
	/// when missing or unrecognized. Later duplicates win.
	#[must_use]
	pub fn from_params<I, K, V>(options: Options, request_path: &str, params: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let mut sort = SortState::default();
		let (mut has_field, mut has_direction) = (false, false);
		for (key, value) in params {
			match key.as_ref() {
				"sortby" => {
					has_field = true;
					sort.field = SortField::parse(value.as_ref()).unwrap_or_default();
				}
				"direction" => {
					has_direction = true;
					sort.direction = Direction::parse(value.as_ref()).unwrap_or_default();
				}
				_ => {}
			}
		}

		let sort_requested = has_field && has_direction;
		log::debug!(
			"resolved sort {}/{} for '{request_path}'",
			sort.field.as_str(),
			sort.direction.as_str()
		);

		Self {
			options,
			current_page: path::clean(request_path),
			sort,
			sort_requested,
		}
	}

	/// Whether the request targets the served root.
	#[must_use]
	pub fn is_root(&self) -> bool {
		self.current_page == "/"
	}

	/// Query string carried over into navigation links.
	///
	/// Empty unless the request asked for a sort explicitly.
	#[must_use]
	pub fn carried_query(&self) -> String {
		if self.sort_requested {
			self.sort.query()
		} else {
			String::new()
		}
	}
}

/// Splits an `application/x-www-form-urlencoded` query into decoded pairs.
///
/// `+` decodes to a space. Invalid UTF-8 after decoding is replaced lossily.
#[must_use]
pub fn parse_query(query: &str) -> Vec<(String, String)> {
	form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
		.map(|(key, value)| (key.into_owned(), value.into_owned()))
		.collect()
}

/* src/page.rs */

use std::fmt;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::context::PageContext;
use crate::path;
use crate::sort::{Direction, SortField, SortState};

/// Human-readable description of a sort, as shown in the page title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortDescription {
	/// What is sorted, e.g. "by size".
	pub item: &'static str,
	/// How it is ordered, e.g. "smallest to largest". Empty for the
	/// default alphabetical order.
	pub direction: &'static str,
}

impl SortDescription {
	/// Looks up the fixed description of a sort.
	///
	/// ```
	/// use autoindex::page::SortDescription;
	/// use autoindex::sort::{Direction, SortField, SortState};
	///
	/// let state = SortState { field: SortField::Size, direction: Direction::Ascending };
	/// assert_eq!(SortDescription::of(state).to_string(), "by size, smallest to largest");
	/// ```
	#[must_use]
	pub const fn of(state: SortState) -> Self {
		let (item, direction) = match (state.field, state.direction) {
			(SortField::File, Direction::Ascending) => ("alphabetically", ""),
			(SortField::File, Direction::Descending) => ("alphabetically", "reversed"),
			(SortField::Mtime, Direction::Ascending) => {
				("by modification date", "oldest to newest")
			}
			(SortField::Mtime, Direction::Descending) => {
				("by modification date", "newest to oldest")
			}
			(SortField::Size, Direction::Ascending) => ("by size", "smallest to largest"),
			(SortField::Size, Direction::Descending) => ("by size", "largest to smallest"),
		};
		Self { item, direction }
	}
}

impl fmt::Display for SortDescription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.direction.is_empty() {
			f.write_str(self.item)
		} else {
			write!(f, "{}, {}", self.item, self.direction)
		}
	}
}

/// Hrefs of the three sortable column headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLinks {
	/// "File" column.
	pub file: String,
	/// "Last modified" column.
	pub mtime: String,
	/// "Size" column.
	pub size: String,
}

impl HeaderLinks {
	/// Clicking the active column flips its direction; any other column
	/// starts ascending.
	#[must_use]
	pub fn for_state(state: SortState) -> Self {
		let link = |field: SortField| {
			let direction = if state.field == field {
				state.direction.reversed()
			} else {
				Direction::Ascending
			};
			SortState { field, direction }.query()
		};
		Self {
			file: link(SortField::File),
			mtime: link(SortField::Mtime),
			size: link(SortField::Size),
		}
	}
}

/// Builds the breadcrumb shown as the page heading.
///
/// The root reads `Index of /` in plain text when it is the current page,
/// and is a link otherwise. Every intermediate segment links to its
/// prefix; the last segment is plain text. Links carry the requested sort.
#[must_use]
pub fn nav_bar(ctx: &PageContext) -> String {
	let params = ctx.carried_query();
	let segments = path::segments(&ctx.current_page);

	let mut html = if segments.is_empty() {
		"Index of /".to_owned()
	} else {
		format!("Index of {}", anchor(&format!("/{params}"), "/"))
	};

	let mut prefix = String::new();
	for (i, segment) in segments.iter().enumerate() {
		html.push_str(if i == 0 { " " } else { " / " });
		prefix.push('/');
		prefix.push_str(&path::encode_segment(segment));
		if i + 1 == segments.len() {
			html.push_str(&encode_text(segment));
		} else {
			html.push_str(&anchor(&format!("{prefix}{params}"), segment));
		}
	}
	html
}

fn anchor(href: &str, text: &str) -> String {
	format!(
		"<a href=\"{}\">{}</a>",
		encode_double_quoted_attribute(href),
		encode_text(text)
	)
}

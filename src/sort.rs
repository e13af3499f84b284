/* src/sort.rs */

use std::cmp::Ordering;

use crate::resource::Resource;

/// Column a listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortField {
	/// Entry name.
	#[default]
	File,
	/// Modification time.
	Mtime,
	/// Size in bytes. Directories count as 0.
	Size,
}

impl SortField {
	/// All fields, in column order.
	pub const ALL: [Self; 3] = [Self::File, Self::Mtime, Self::Size];

	/// Parses a `sortby` query value. Unknown values yield `None`.
	///
	/// ```
	/// use autoindex::sort::SortField;
	/// assert_eq!(SortField::parse("mtime"), Some(SortField::Mtime));
	/// assert_eq!(SortField::parse("owner"), None);
	/// ```
	#[must_use]
	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"file" => Some(Self::File),
			"mtime" => Some(Self::Mtime),
			"size" => Some(Self::Size),
			_ => None,
		}
	}

	/// The `sortby` query value for this field.
	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::File => "file",
			Self::Mtime => "mtime",
			Self::Size => "size",
		}
	}
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
	/// Smallest, oldest or alphabetically first entries on top.
	#[default]
	Ascending,
	/// Exact reverse of [`Direction::Ascending`].
	Descending,
}

impl Direction {
	/// Parses a `direction` query value. Unknown values yield `None`.
	#[must_use]
	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"ascending" => Some(Self::Ascending),
			"descending" => Some(Self::Descending),
			_ => None,
		}
	}

	/// The `direction` query value.
	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Ascending => "ascending",
			Self::Descending => "descending",
		}
	}

	/// The other direction.
	#[must_use]
	pub const fn reversed(self) -> Self {
		match self {
			Self::Ascending => Self::Descending,
			Self::Descending => Self::Ascending,
		}
	}
}

/// Active sort: a field plus a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SortState {
	/// Column being sorted.
	pub field: SortField,
	/// Order of the column.
	pub direction: Direction,
}

impl SortState {
	/// Query string (with leading `?`) requesting this state.
	///
	/// ```
	/// use autoindex::sort::{Direction, SortField, SortState};
	/// let state = SortState { field: SortField::Size, direction: Direction::Descending };
	/// assert_eq!(state.query(), "?sortby=size&direction=descending");
	/// ```
	#[must_use]
	pub fn query(self) -> String {
		format!(
			"?sortby={}&direction={}",
			self.field.as_str(),
			self.direction.as_str()
		)
	}
}

type Comparator = fn(&Resource, &Resource) -> Ordering;

fn comparator(field: SortField, smart: bool) -> Comparator {
	match (field, smart) {
		(SortField::File, true) => |a, b| a.sort_key.cmp(&b.sort_key),
		(SortField::File, false) => |a, b| a.file_name.cmp(&b.file_name),
		(SortField::Mtime, _) => |a, b| a.modified.cmp(&b.modified),
		(SortField::Size, _) => |a, b| a.size.cmp(&b.size),
	}
}

/// Orders resources in place.
///
/// The ascending order is a stable sort, so ties keep enumeration order.
/// Descending reverses that result rather than comparing the other way,
/// which also reverses the order of ties. `smart` only affects
/// [`SortField::File`].
pub fn sort(resources: &mut [Resource], state: SortState, smart: bool) {
	resources.sort_by(comparator(state.field, smart));
	if state.direction == Direction::Descending {
		resources.reverse();
	}
}

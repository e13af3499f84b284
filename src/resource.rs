/* src/resource.rs */

use std::ffi::OsStr;
use std::fmt::Write as _;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use std::{fs, io};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use humansize::{BINARY, format_size as humanize};
use percent_encoding::percent_decode_str;

use crate::context::PageContext;
use crate::error::Error;
use crate::options::DEFAULT_TIME_FORMAT;
use crate::path;

const ELLIPSIS: &str = "...";

/// A single directory entry, with everything the listing displays about it.
///
/// Built once per entry per request, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
	/// Decoded entry name.
	pub file_name: String,
	/// Name used by smart sort: `file_name` without a leading "the ".
	pub sort_key: String,
	/// Last modification time.
	pub modified: SystemTime,
	/// Size in bytes, always 0 for directories.
	pub size: u64,
	/// Whether this entry is a directory.
	pub is_dir: bool,
	/// Name as shown in the table, extension optionally stripped, truncated.
	pub display_name: String,
	/// Percent-encoded href of the entry.
	pub link: String,
	/// `modified` rendered with the configured pattern.
	pub modified_display: String,
	/// Human-readable size, `-` for directories.
	pub size_display: String,
}

impl Resource {
	/// Builds a resource from an entry name and its stat data.
	///
	/// `raw_name` is the name as found on disk. It is percent-decoded for
	/// display and sorting, while the link is built from the raw name so it
	/// still reaches the entry.
	#[must_use]
	pub fn new(
		raw_name: &str,
		is_dir: bool,
		size: u64,
		modified: SystemTime,
		ctx: &PageContext,
	) -> Self {
		let options = &ctx.options;
		let file_name = decode_name(raw_name);

		let shown = if is_dir || options.should_show_file_exts {
			file_name.as_str()
		} else {
			strip_extension(&file_name)
		};

		let size = if is_dir { 0 } else { size };
		let size_display = if is_dir {
			"-".to_owned()
		} else {
			format_size(size)
		};

		Self {
			sort_key: sort_key(&file_name).to_owned(),
			display_name: truncate(shown, options.filename_truncate_length),
			link: link(raw_name, is_dir, ctx),
			modified_display: format_time(modified, &options.last_modified_format),
			file_name,
			modified,
			size,
			is_dir,
			size_display,
		}
	}

	/// Stats `dir/name` and builds the resource for it.
	///
	/// Symlinks are followed, as the host filesystem does for any stat.
	pub fn read(dir: &Path, name: &OsStr, ctx: &PageContext) -> io::Result<Self> {
		let metadata = fs::metadata(dir.join(name))?;
		let modified = metadata.modified()?;
		Ok(Self::new(
			&name.to_string_lossy(),
			metadata.is_dir(),
			metadata.len(),
			modified,
			ctx,
		))
	}

	/// CSS class of the name cell.
	#[must_use]
	pub const fn class(&self) -> &'static str {
		if self.is_dir { "dir" } else { "file" }
	}

	#[cfg(test)]
	pub(crate) fn fixture(name: &str, is_dir: bool, size: u64, modified: SystemTime) -> Self {
		let ctx = PageContext::resolve(crate::Options::default(), "/", "");
		Self::new(name, is_dir, size, modified, &ctx)
	}
}

/// Reads the visible entries of `dir` in enumeration order.
///
/// When invisibles are listed, `.` and `..` lead the enumeration the way a
/// classic directory read yields them. Dotfiles are dropped otherwise.
///
/// Entries that vanish or cannot be stat'ed between the directory read and
/// the stat call are skipped with a warning; only failing to open `dir`
/// itself is an error.
pub fn read_dir(dir: &Path, ctx: &PageContext) -> Result<Vec<Resource>, Error> {
	let entries = fs::read_dir(dir).map_err(|source| Error::ReadDir {
		path: dir.to_path_buf(),
		source,
	})?;

	let list_invisibles = ctx.options.should_list_invisibles;
	let mut names = Vec::new();
	if list_invisibles {
		names.push(OsStr::new(".").to_os_string());
		names.push(OsStr::new("..").to_os_string());
	}
	for entry in entries {
		match entry {
			Ok(entry) if list_invisibles || !is_invisible(&entry.file_name()) => {
				names.push(entry.file_name());
			}
			Ok(_) => {}
			Err(e) => log::warn!("skipping unreadable entry in {}: {e}", dir.display()),
		}
	}

	let mut resources = Vec::with_capacity(names.len());
	for name in names {
		match Resource::read(dir, &name, ctx) {
			Ok(resource) => resources.push(resource),
			Err(e) => log::warn!("skipping {}: {e}", dir.join(&name).display()),
		}
	}

	log::debug!("read {} entries from {}", resources.len(), dir.display());
	Ok(resources)
}

/// Whether an on-disk name is a dotfile. The raw name is checked, so an
/// encoded `%2E` prefix does not hide an entry.
#[must_use]
pub fn is_invisible(name: &OsStr) -> bool {
	name.as_encoded_bytes().first() == Some(&b'.')
}

fn decode_name(raw: &str) -> String {
	match percent_decode_str(raw).decode_utf8() {
		Ok(decoded) if !decoded.is_empty() => decoded.into_owned(),
		_ => raw.to_owned(),
	}
}

fn link(raw_name: &str, is_dir: bool, ctx: &PageContext) -> String {
	let mut link = if ctx.is_root() {
		path::encode_segment(raw_name)
	} else {
		format!(
			"{}/{}",
			path::encode_path(&ctx.current_page),
			path::encode_segment(raw_name)
		)
	};
	if is_dir {
		link.push_str(&ctx.carried_query());
	}
	link
}

/// Strips a leading case-insensitive "the " from a name.
///
/// ```
/// assert_eq!(autoindex::resource::sort_key("The Beatles"), "Beatles");
/// assert_eq!(autoindex::resource::sort_key("theory.txt"), "theory.txt");
/// ```
#[must_use]
pub fn sort_key(name: &str) -> &str {
	match name.get(..4) {
		Some(prefix) if prefix.eq_ignore_ascii_case("the ") => &name[4..],
		_ => name,
	}
}

/// Removes the final extension, as reported by the path API, once.
///
/// Names without an extension (including dotfiles such as `.bashrc`) come
/// back unchanged.
#[must_use]
pub fn strip_extension(name: &str) -> &str {
	Path::new(name)
		.extension()
		.and_then(OsStr::to_str)
		.and_then(|ext| name.strip_suffix(ext))
		.and_then(|rest| rest.strip_suffix('.'))
		.unwrap_or(name)
}

/// Truncates `name` to at most `limit` characters, ellipsis included.
///
/// ```
/// assert_eq!(autoindex::resource::truncate("abcdefghij", 8), "abcde...");
/// assert_eq!(autoindex::resource::truncate("short", 8), "short");
/// ```
#[must_use]
pub fn truncate(name: &str, limit: usize) -> String {
	if name.chars().count() <= limit {
		return name.to_owned();
	}
	let keep = limit.saturating_sub(ELLIPSIS.len());
	let mut out: String = name.chars().take(keep).collect();
	out.extend(ELLIPSIS.chars().take(limit - keep));
	out
}

/// Formats a byte count with binary (IEC) units.
///
/// ```
/// assert_eq!(autoindex::resource::format_size(512), "512 B");
/// assert_eq!(autoindex::resource::format_size(1536), "1.50 KiB");
/// ```
#[must_use]
pub fn format_size(bytes: u64) -> String {
	humanize(bytes, BINARY)
}

/// Formats a timestamp in local time with a strftime pattern.
///
/// An unparseable pattern falls back to the default `%Y-%m-%d %H:%M:%S`.
/// Timestamps outside the representable calendar range render as `-`.
#[must_use]
pub fn format_time(modified: SystemTime, pattern: &str) -> String {
	let Some(utc) = to_datetime(modified) else {
		log::warn!("modification time {modified:?} out of range");
		return "-".to_owned();
	};
	let local = utc.with_timezone(&Local);

	let mut items = StrftimeItems::new(pattern);
	if items.clone().any(|item| matches!(item, Item::Error)) {
		log::warn!("invalid time format '{pattern}', using default");
		items = StrftimeItems::new(DEFAULT_TIME_FORMAT);
	}

	let mut out = String::new();
	if write!(out, "{}", local.format_with_items(items)).is_err() {
		out.clear();
		out.push('-');
	}
	out
}

fn to_datetime(time: SystemTime) -> Option<DateTime<Utc>> {
	match time.duration_since(UNIX_EPOCH) {
		Ok(after) => {
			let secs = i64::try_from(after.as_secs()).ok()?;
			DateTime::from_timestamp(secs, after.subsec_nanos())
		}
		Err(e) => {
			let before = e.duration();
			let secs = i64::try_from(before.as_secs()).ok()?;
			match before.subsec_nanos() {
				0 => DateTime::from_timestamp(-secs, 0),
				nanos => DateTime::from_timestamp(-secs - 1, 1_000_000_000 - nanos),
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use std::time::{Duration, UNIX_EPOCH};

	use super::*;
	use crate::Options;

	fn ctx_with(options: Options, path: &str, query: &str) -> PageContext {
		PageContext::resolve(options, path, query)
	}

	fn root_ctx() -> PageContext {
		ctx_with(Options::default(), "/", "")
	}

	fn epoch() -> SystemTime {
		UNIX_EPOCH + Duration::from_secs(1_000_000)
	}

	#[test]
	fn file_fields() {
		let r = Resource::new("notes.txt", false, 2560, epoch(), &root_ctx());
		assert_eq!(r.file_name, "notes.txt");
		assert_eq!(r.display_name, "notes.txt");
		assert_eq!(r.link, "notes.txt");
		assert_eq!(r.size, 2560);
		assert_eq!(r.size_display, "2.50 KiB");
		assert_eq!(r.class(), "file");
	}

	#[test]
	fn directory_size_is_zero() {
		let r = Resource::new("docs", true, 4096, epoch(), &root_ctx());
		assert_eq!(r.size, 0);
		assert_eq!(r.size_display, "-");
		assert_eq!(r.class(), "dir");
	}

	#[test]
	fn name_is_decoded() {
		let r = Resource::new("my%20file.txt", false, 1, epoch(), &root_ctx());
		assert_eq!(r.file_name, "my file.txt");
		assert_eq!(r.display_name, "my file.txt");
		assert_eq!(r.link, "my%2520file.txt");
	}

	#[test]
	fn invalid_encoding_keeps_raw_name() {
		let r = Resource::new("bad%C3%28", false, 1, epoch(), &root_ctx());
		assert_eq!(r.file_name, "bad%C3%28");
	}

	#[test]
	fn hidden_extension_only_affects_display() {
		let options = Options {
			should_show_file_exts: false,
			..Options::default()
		};
		let ctx = ctx_with(options, "/", "");
		let r = Resource::new("test.txt", false, 4, epoch(), &ctx);
		assert_eq!(r.display_name, "test");
		assert_eq!(r.link, "test.txt");
		assert_eq!(r.file_name, "test.txt");
	}

	#[test]
	fn hidden_extension_keeps_directory_names() {
		let options = Options {
			should_show_file_exts: false,
			..Options::default()
		};
		let ctx = ctx_with(options, "/", "");
		let r = Resource::new("v1.2", true, 0, epoch(), &ctx);
		assert_eq!(r.display_name, "v1.2");
	}

	#[test]
	fn strip_extension_cases() {
		assert_eq!(strip_extension("test.txt"), "test");
		assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
		assert_eq!(strip_extension(".bashrc"), ".bashrc");
		assert_eq!(strip_extension("README"), "README");
		assert_eq!(strip_extension("txt.txt"), "txt");
	}

	#[test]
	fn truncation_counts_ellipsis() {
		let long = "a".repeat(60);
		let truncated = truncate(&long, 40);
		assert_eq!(truncated.chars().count(), 40);
		assert!(truncated.ends_with("..."));
		assert_eq!(&truncated[..37], &long[..37]);
	}

	#[test]
	fn truncation_exact_limit_untouched() {
		let name = "b".repeat(40);
		assert_eq!(truncate(&name, 40), name);
	}

	#[test]
	fn truncation_counts_characters_not_bytes() {
		let truncated = truncate("ééééééééé", 5);
		assert_eq!(truncated, "éé...");
	}

	#[test]
	fn truncation_tiny_limits() {
		assert_eq!(truncate("abcdef", 2), "..");
		assert_eq!(truncate("abcdef", 0), "");
		assert_eq!(truncate("abcdef", 3), "...");
	}

	#[test]
	fn truncation_applies_after_extension_strip() {
		let options = Options {
			should_show_file_exts: false,
			filename_truncate_length: 10,
			..Options::default()
		};
		let ctx = ctx_with(options, "/", "");
		let r = Resource::new("abcdefghij.txt", false, 1, epoch(), &ctx);
		assert_eq!(r.display_name, "abcdefghij");
	}

	#[test]
	fn link_outside_root_is_absolute_and_encoded() {
		let ctx = ctx_with(Options::default(), "/level3/level 4", "");
		let r = Resource::new("it's.txt", false, 1, epoch(), &ctx);
		assert_eq!(r.link, "/level3/level%204/it%27s.txt");
	}

	#[test]
	fn directory_link_carries_sort() {
		let ctx = ctx_with(
			Options::default(),
			"/docs",
			"sortby=size&direction=descending",
		);
		let d = Resource::new("sub", true, 0, epoch(), &ctx);
		assert_eq!(d.link, "/docs/sub?sortby=size&direction=descending");

		let f = Resource::new("a.txt", false, 1, epoch(), &ctx);
		assert_eq!(f.link, "/docs/a.txt");
	}

	#[test]
	fn directory_link_without_explicit_sort() {
		let d = Resource::new("sub", true, 0, epoch(), &root_ctx());
		assert_eq!(d.link, "sub");
	}

	#[test]
	fn smart_sort_key() {
		assert_eq!(sort_key("the end"), "end");
		assert_eq!(sort_key("THE END"), "END");
		assert_eq!(sort_key("the"), "the");
		assert_eq!(sort_key("thé x"), "thé x");
	}

	#[test]
	fn size_units() {
		assert_eq!(format_size(0), "0 B");
		assert_eq!(format_size(1023), "1023 B");
		assert_eq!(format_size(1536), "1.50 KiB");
		assert_eq!(format_size(5 * 1024 * 1024 / 2), "2.50 MiB");
		assert!(format_size(3 * 1024 * 1024 * 1024).ends_with(" GiB"));
		assert!(format_size(u64::MAX).ends_with(" EiB"));
	}

	#[test]
	fn time_pattern_applied() {
		let formatted = format_time(epoch(), "%Y");
		assert_eq!(formatted.len(), 4);
		assert!(formatted.starts_with("19"));
	}

	#[test]
	fn invalid_time_pattern_falls_back() {
		let fallback = format_time(epoch(), DEFAULT_TIME_FORMAT);
		assert_eq!(format_time(epoch(), "%Q %"), fallback);
	}

	#[test]
	fn out_of_range_time_renders_placeholder() {
		let far = UNIX_EPOCH + Duration::from_secs(1 << 50);
		assert_eq!(format_time(far, DEFAULT_TIME_FORMAT), "-");
		let r = Resource::new("future.txt", false, 1, far, &root_ctx());
		assert_eq!(r.modified_display, "-");
	}

	#[test]
	fn pre_epoch_time_formats() {
		let before = UNIX_EPOCH - Duration::from_millis(1_500);
		assert!(format_time(before, "%Y").starts_with("19"));
	}

	#[test]
	fn invisible_detection_uses_raw_name() {
		assert!(is_invisible(OsStr::new(".git")));
		assert!(is_invisible(OsStr::new("..")));
		assert!(!is_invisible(OsStr::new("git")));
		assert!(!is_invisible(OsStr::new("%2Esecret")));
	}

	#[test]
	fn read_dir_lists_encoded_dot_names() {
		let dir = fixture_dir();
		std::fs::write(dir.path().join("%2Esecret"), b"x").unwrap();
		let resources = read_dir(dir.path(), &root_ctx()).unwrap();
		assert_eq!(sorted_names(&resources), [".secret", "sub", "visible.txt"]);
		let encoded = resources.iter().find(|r| r.file_name == ".secret").unwrap();
		assert_eq!(encoded.link, "%252Esecret");
	}

	#[test]
	fn read_dir_survives_far_future_mtime() {
		let dir = fixture_dir();
		let path = dir.path().join("visible.txt");
		let far = UNIX_EPOCH + Duration::from_secs(1 << 50);
		let stored = std::fs::File::options()
			.write(true)
			.open(&path)
			.unwrap()
			.set_modified(far);
		let resources = read_dir(dir.path(), &root_ctx()).unwrap();
		let file = resources
			.iter()
			.find(|r| r.file_name == "visible.txt")
			.unwrap();
		if stored.is_ok() && std::fs::metadata(&path).unwrap().modified().unwrap() == far {
			assert_eq!(file.modified_display, "-");
		}
	}

	fn fixture_dir() -> tempfile::TempDir {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("visible.txt"), b"1234").unwrap();
		std::fs::write(dir.path().join(".hidden"), b"x").unwrap();
		std::fs::create_dir(dir.path().join("sub")).unwrap();
		dir
	}

	fn sorted_names(resources: &[Resource]) -> Vec<String> {
		let mut names: Vec<_> = resources.iter().map(|r| r.file_name.clone()).collect();
		names.sort();
		names
	}

	#[test]
	fn read_dir_hides_dotfiles() {
		let dir = fixture_dir();
		let resources = read_dir(dir.path(), &root_ctx()).unwrap();
		assert_eq!(sorted_names(&resources), ["sub", "visible.txt"]);
	}

	#[test]
	fn read_dir_lists_invisibles_with_dot_entries() {
		let dir = fixture_dir();
		let options = Options {
			should_list_invisibles: true,
			..Options::default()
		};
		let resources = read_dir(dir.path(), &ctx_with(options, "/", "")).unwrap();
		assert_eq!(resources[0].file_name, ".");
		assert_eq!(resources[1].file_name, "..");
		assert_eq!(
			sorted_names(&resources),
			[".", "..", ".hidden", "sub", "visible.txt"]
		);
	}

	#[test]
	fn read_dir_stats_entries() {
		let dir = fixture_dir();
		let resources = read_dir(dir.path(), &root_ctx()).unwrap();
		let file = resources
			.iter()
			.find(|r| r.file_name == "visible.txt")
			.unwrap();
		assert_eq!(file.size, 4);
		assert_eq!(file.size_display, "4 B");
		let sub = resources.iter().find(|r| r.file_name == "sub").unwrap();
		assert!(sub.is_dir);
		assert_eq!(sub.size, 0);
	}

	#[cfg(unix)]
	#[test]
	fn read_dir_skips_broken_symlinks() {
		let dir = fixture_dir();
		std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("dangling"))
			.unwrap();
		let resources = read_dir(dir.path(), &root_ctx()).unwrap();
		assert_eq!(sorted_names(&resources), ["sub", "visible.txt"]);
	}

	#[test]
	fn read_dir_missing_directory_errors() {
		let dir = fixture_dir();
		let result = read_dir(&dir.path().join("missing"), &root_ctx());
		assert!(matches!(result, Err(Error::ReadDir { .. })));
	}
}

/* src/listing.rs */

use std::path::Path;

use crate::context::PageContext;
use crate::error::Error;
use crate::options::Options;
use crate::render;
use crate::resource;
use crate::sort;

/// Renders the directory index for `request_path` below `root`.
///
/// `request_path` is the decoded path of the request and `query` its raw
/// query string. The host is expected to have checked that the path exists
/// and is a directory; anything else is reported as an error.
///
/// ```
/// let root = tempfile::tempdir().unwrap();
/// std::fs::write(root.path().join("readme.txt"), b"hello").unwrap();
///
/// let html = autoindex::list(root.path(), "/", "", &autoindex::Options::default()).unwrap();
/// assert!(html.contains("readme.txt"));
/// ```
pub fn list(
	root: &Path,
	request_path: &str,
	query: &str,
	options: &Options,
) -> Result<String, Error> {
	let ctx = PageContext::resolve(options.clone(), request_path, query);
	list_with_context(root, &ctx)
}

/// Renders the directory index for an already resolved context.
pub fn list_with_context(root: &Path, ctx: &PageContext) -> Result<String, Error> {
	let dir = crate::path::resolve(root, &ctx.current_page)?;
	if !dir.is_dir() {
		return Err(Error::NotADirectory { path: dir });
	}

	let mut resources = resource::read_dir(&dir, ctx)?;
	sort::sort(&mut resources, ctx.sort, ctx.options.smart_sort);

	let template = render::load_template(root, ctx);
	render::render_page(ctx, &resources, template.as_deref())
}

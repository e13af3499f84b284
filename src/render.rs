/* src/render.rs */

use std::fs;
use std::path::Path;

use handlebars::Handlebars;
use html_escape::encode_double_quoted_attribute;
use serde::Serialize;

use crate::context::PageContext;
use crate::error::Error;
use crate::page::{self, HeaderLinks, SortDescription};
use crate::path;
use crate::resource::Resource;

const LAYOUT: &str = "layout";
const ROWS: &str = "rows";

/// Data every page template receives.
///
/// Plain values are escaped by `{{...}}`. `nav_bar`, `files_html` and
/// `readme` are HTML and must be emitted with `{{{...}}}`.
#[derive(Debug, Serialize)]
struct PageData<'a> {
	current_page: &'a str,
	sort_item_display: &'static str,
	sort_direction_display: &'static str,
	sort_description: String,
	stylesheet: Option<String>,
	favicon: Option<String>,
	nav_bar: String,
	file_sort_link: String,
	mtime_sort_link: String,
	size_sort_link: String,
	rows: Vec<Row<'a>>,
	files_html: String,
	readme: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Row<'a> {
	class: &'static str,
	link: &'a str,
	name: &'a str,
	modified: &'a str,
	size: &'a str,
}

impl<'a> Row<'a> {
	fn new(resource: &'a Resource) -> Self {
		Self {
			class: resource.class(),
			link: &resource.link,
			name: &resource.display_name,
			modified: &resource.modified_display,
			size: &resource.size_display,
		}
	}
}

fn registry() -> Result<Handlebars<'static>, Error> {
	let mut handlebars = Handlebars::new();
	// Values land in text and double-quoted attributes only.
	handlebars.register_escape_fn(|s| encode_double_quoted_attribute(s).into_owned());
	handlebars
		.register_template_string(LAYOUT, include_str!("templates/layout.hbs"))
		.map_err(Box::new)?;
	handlebars
		.register_template_string(ROWS, include_str!("templates/rows.hbs"))
		.map_err(Box::new)?;
	Ok(handlebars)
}

/// Renders the page for already filtered and sorted resources.
///
/// With `template` set, it is used as the page skeleton and receives the
/// same data as the built-in layout. A template that fails to render falls
/// back to the built-in layout.
pub fn render_page(
	ctx: &PageContext,
	resources: &[Resource],
	template: Option<&str>,
) -> Result<String, Error> {
	let handlebars = registry()?;
	let description = SortDescription::of(ctx.sort);
	let links = HeaderLinks::for_state(ctx.sort);

	let mut data = PageData {
		current_page: &ctx.current_page,
		sort_item_display: description.item,
		sort_direction_display: description.direction,
		sort_description: description.to_string(),
		stylesheet: ctx.options.stylesheet_href(),
		favicon: ctx.options.favicon_href(),
		nav_bar: page::nav_bar(ctx),
		file_sort_link: links.file,
		mtime_sort_link: links.mtime,
		size_sort_link: links.size,
		rows: resources.iter().map(Row::new).collect(),
		files_html: String::new(),
		readme: ctx.options.readme_html(),
	};
	data.files_html = handlebars.render(ROWS, &data).map_err(Box::new)?;

	if let Some(source) = template {
		match handlebars.render_template(source, &data) {
			Ok(html) => return Ok(html),
			Err(e) => log::warn!("embed template failed, using built-in layout: {e}"),
		}
	}
	handlebars
		.render(LAYOUT, &data)
		.map_err(|e| Box::new(e).into())
}

/// Loads the configured embed template from inside the served root.
///
/// Returns `None` when none is configured or it cannot be read; the
/// caller then renders the built-in layout.
#[must_use]
pub fn load_template(root: &Path, ctx: &PageContext) -> Option<String> {
	let embed = ctx.options.embed_template()?;
	let resolved = match path::resolve(root, embed) {
		Ok(resolved) => resolved,
		Err(e) => {
			log::debug!("embed template '{embed}' not resolvable: {e}");
			return None;
		}
	};
	match fs::read_to_string(&resolved) {
		Ok(source) => Some(source),
		Err(e) => {
			log::debug!("embed template {} unavailable: {e}", resolved.display());
			None
		}
	}
}

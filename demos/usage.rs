/* demos/usage.rs */

use autoindex::sort::{Direction, SortField, SortState};
use autoindex::{Options, PageContext, list_with_context, path};

fn main() {
	let root = std::env::current_dir().expect("failed to get current directory");
	let request_path = std::env::args().nth(1).unwrap_or_else(|| "/".to_owned());

	match path::resolve(&root, &request_path) {
		Ok(fs_path) if fs_path.is_dir() => println!("Listing: {}", fs_path.display()),
		Ok(fs_path) => {
			println!("Not a directory: {}", fs_path.display());
			return;
		}
		Err(e) => {
			println!("Resolve error: {e}");
			return;
		}
	}

	let options = Options {
		stylesheet: Some("/stylesheets/styles.css".to_owned()),
		readme: Some("<p>Served by autoindex</p>".to_owned()),
		..Options::default()
	};
	let sort = SortState {
		field: SortField::Size,
		direction: Direction::Descending,
	};
	let ctx = PageContext::resolve(options, &request_path, sort.query().as_str());

	match list_with_context(&root, &ctx) {
		Ok(html) => println!("{html}"),
		Err(e) => println!("Listing error: {e}"),
	}
}

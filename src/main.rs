//! CSR entry point; mounts the app onto the document body.

use wordweb::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App);
}

//! Page templates.

mod base;

pub use base::{render_page, PageContext};

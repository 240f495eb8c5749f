//! # ferric-admin
//!
//! Admin panel glue on top of [`ferric_forms`] and [`ferric_auth`]:
//! the AdminLTE page layout, the startup-declared asset registry,
//! dashboard widgets, and the post/redirect/get response helpers.
//!
//! ## Quick Start
//!
//! ```rust
//! use ferric_admin::{render_page, AssetRegistry, PageContext, Response};
//! use ferric_forms::Form;
//!
//! let mut form = Form::new();
//! form.action("/admin/users").csrf_token("tok");
//! form.text("name").rules("required");
//! form.date("joined_at");
//!
//! // Assets for exactly the field kinds on the page.
//! let registry = AssetRegistry::with_defaults();
//! let assets = registry.assets_for(form.fields().iter().map(|f| f.kind()));
//!
//! let page = render_page(&PageContext {
//!     page_title: "Create user".to_string(),
//!     content: form.render(),
//!     assets,
//!     scripts: form.scripts(),
//!     ..PageContext::default()
//! });
//! let response = Response::html(page);
//! # let _ = response;
//! ```

mod assets;
mod error;
mod response;
mod templates;
mod widgets;

pub use assets::{AssetBundle, AssetRegistry};
pub use error::{AdminError, Result};
pub use response::{take_form_state, Response};
pub use templates::{render_page, PageContext};
pub use widgets::{Callout, CalloutStyle, InfoBox};

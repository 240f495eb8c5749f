//! Static asset registry.
//!
//! Field kinds need front-end assets (date pickers, select2, file
//! inputs). Instead of fields injecting `<link>`/`<script>` tags into
//! the page themselves, the application declares at startup which
//! assets each kind needs; the layout asks the registry for the merged
//! bundle of the kinds actually present on the page.

use std::collections::BTreeMap;

/// CSS and JS asset paths for one field kind or for a whole page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetBundle {
    /// Stylesheet hrefs.
    pub css: Vec<String>,
    /// Script srcs.
    pub js: Vec<String>,
}

impl AssetBundle {
    /// Creates an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stylesheet.
    #[must_use]
    pub fn css(mut self, href: impl Into<String>) -> Self {
        self.css.push(href.into());
        self
    }

    /// Adds a script.
    #[must_use]
    pub fn js(mut self, src: impl Into<String>) -> Self {
        self.js.push(src.into());
        self
    }

    /// Merges another bundle in, skipping paths already present.
    pub fn merge(&mut self, other: &AssetBundle) {
        for href in &other.css {
            if !self.css.contains(href) {
                self.css.push(href.clone());
            }
        }
        for src in &other.js {
            if !self.js.contains(src) {
                self.js.push(src.clone());
            }
        }
    }

    /// Renders the `<link>` tags.
    pub fn render_css(&self) -> String {
        self.css
            .iter()
            .map(|href| format!(r#"<link rel="stylesheet" href="{href}">"#))
            .collect()
    }

    /// Renders the `<script src>` tags.
    pub fn render_js(&self) -> String {
        self.js
            .iter()
            .map(|src| format!(r#"<script src="{src}"></script>"#))
            .collect()
    }
}

/// Registry mapping field kinds to the assets they need.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    base: AssetBundle,
    kinds: BTreeMap<String, AssetBundle>,
}

impl AssetRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the stock AdminLTE base assets and the
    /// per-kind picker bundles.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.base = AssetBundle::new()
            .css("/static/admin/css/bootstrap.min.css")
            .css("/static/admin/css/font-awesome.min.css")
            .css("/static/admin/css/AdminLTE.min.css")
            .css("/static/admin/css/skin-blue.min.css")
            .js("/static/admin/js/jquery.min.js")
            .js("/static/admin/js/bootstrap.min.js")
            .js("/static/admin/js/app.min.js")
            .js("/static/admin/js/jquery.pjax.js");

        let picker = AssetBundle::new()
            .css("/static/admin/css/bootstrap-datetimepicker.min.css")
            .js("/static/admin/js/moment.min.js")
            .js("/static/admin/js/bootstrap-datetimepicker.min.js");
        for kind in ["date", "datetime", "time", "date_range"] {
            registry.register(kind, picker.clone());
        }

        registry.register(
            "select",
            AssetBundle::new()
                .css("/static/admin/css/select2.min.css")
                .js("/static/admin/js/select2.full.min.js"),
        );
        let fileinput = AssetBundle::new()
            .css("/static/admin/css/fileinput.min.css")
            .js("/static/admin/js/fileinput.min.js");
        registry.register("file", fileinput.clone());
        registry.register("image", fileinput);
        registry.register(
            "switch",
            AssetBundle::new()
                .css("/static/admin/css/bootstrap-switch.min.css")
                .js("/static/admin/js/bootstrap-switch.min.js"),
        );
        registry.register(
            "map",
            AssetBundle::new().js("/static/admin/js/field-map.js"),
        );

        registry
    }

    /// Registers (or replaces) the bundle for a field kind.
    pub fn register(&mut self, kind: impl Into<String>, bundle: AssetBundle) -> &mut Self {
        self.kinds.insert(kind.into(), bundle);
        self
    }

    /// Sets the base bundle every page gets.
    pub fn set_base(&mut self, bundle: AssetBundle) -> &mut Self {
        self.base = bundle;
        self
    }

    /// Returns the bundle registered for a kind, if any.
    pub fn bundle_for(&self, kind: &str) -> Option<&AssetBundle> {
        self.kinds.get(kind)
    }

    /// Computes the merged bundle for a page containing the given
    /// field kinds: the base assets first, then each kind's assets in
    /// first-seen order, deduplicated.
    pub fn assets_for<'a>(&self, kinds: impl IntoIterator<Item = &'a str>) -> AssetBundle {
        let mut bundle = self.base.clone();
        for kind in kinds {
            if let Some(extra) = self.kinds.get(kind) {
                bundle.merge(extra);
            }
        }
        bundle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assets_for_merges_and_deduplicates() {
        let registry = AssetRegistry::with_defaults();

        // date and datetime share the picker bundle; it appears once.
        let bundle = registry.assets_for(["date", "datetime", "select"]);
        let picker_count = bundle
            .js
            .iter()
            .filter(|src| src.contains("datetimepicker"))
            .count();
        assert_eq!(picker_count, 1);
        assert!(bundle.css.iter().any(|href| href.contains("select2")));
    }

    #[test]
    fn test_base_assets_always_present() {
        let registry = AssetRegistry::with_defaults();
        let bundle = registry.assets_for([]);
        assert!(bundle.css.iter().any(|href| href.contains("AdminLTE")));
        assert!(bundle.js.iter().any(|src| src.contains("jquery.min")));
    }

    #[test]
    fn test_unregistered_kind_adds_nothing() {
        let registry = AssetRegistry::with_defaults();
        assert_eq!(registry.assets_for(["text"]), registry.assets_for([]));
    }

    #[test]
    fn test_register_custom_kind() {
        let mut registry = AssetRegistry::new();
        registry.register("editor", AssetBundle::new().js("/static/editor.js"));

        let bundle = registry.assets_for(["editor"]);
        assert_eq!(bundle.js, vec!["/static/editor.js".to_string()]);
    }

    #[test]
    fn test_render_tags() {
        let bundle = AssetBundle::new().css("/a.css").js("/b.js");
        assert_eq!(
            bundle.render_css(),
            r#"<link rel="stylesheet" href="/a.css">"#
        );
        assert_eq!(bundle.render_js(), r#"<script src="/b.js"></script>"#);
    }
}

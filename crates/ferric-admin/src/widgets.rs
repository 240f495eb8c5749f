//! Dashboard widgets.

use ferric_forms::widgets::html_escape;

/// An AdminLTE small-box: a headline figure, a label, an icon, and a
/// footer link.
#[derive(Debug, Clone)]
pub struct InfoBox {
    name: String,
    info: String,
    icon: String,
    color: String,
    link: String,
    more: String,
    classes: Vec<String>,
}

impl InfoBox {
    /// Creates an info box.
    ///
    /// `name` is the label, `info` the headline figure, `icon` a
    /// font-awesome class (e.g. `"fa-users"`), `color` an AdminLTE
    /// background (e.g. `"aqua"`), and `link` the footer target.
    pub fn new(
        name: impl Into<String>,
        info: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            info: info.into(),
            icon: icon.into(),
            color: color.into(),
            link: link.into(),
            more: "More info".to_string(),
            classes: Vec::new(),
        }
    }

    /// Overrides the footer link text.
    pub fn more(&mut self, text: impl Into<String>) -> &mut Self {
        self.more = text.into();
        self
    }

    /// Adds an extra CSS class to the box.
    pub fn class(&mut self, class: impl Into<String>) -> &mut Self {
        self.classes.push(class.into());
        self
    }

    /// Renders the small-box markup.
    pub fn render(&self) -> String {
        let mut classes = format!("small-box bg-{}", self.color);
        for extra in &self.classes {
            classes.push(' ');
            classes.push_str(extra);
        }
        format!(
            r#"<div class="{classes}">
  <div class="inner">
    <h3>{info}</h3>
    <p>{name}</p>
  </div>
  <div class="icon"><i class="fa {icon}"></i></div>
  <a href="{link}" class="small-box-footer">{more} <i class="fa fa-arrow-circle-right"></i></a>
</div>"#,
            info = html_escape(&self.info),
            name = html_escape(&self.name),
            icon = self.icon,
            link = self.link,
            more = html_escape(&self.more),
        )
    }
}

/// Visual style of a [`Callout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalloutStyle {
    /// Blue informational callout.
    Info,
    /// Green success callout.
    Success,
    /// Yellow warning callout.
    Warning,
    /// Red danger callout.
    Danger,
}

impl CalloutStyle {
    fn class(self) -> &'static str {
        match self {
            Self::Info => "callout-info",
            Self::Success => "callout-success",
            Self::Warning => "callout-warning",
            Self::Danger => "callout-danger",
        }
    }
}

/// An AdminLTE callout: a titled, colored notice block.
#[derive(Debug, Clone)]
pub struct Callout {
    title: String,
    content: String,
    style: CalloutStyle,
}

impl Callout {
    /// Creates a callout.
    pub fn new(title: impl Into<String>, content: impl Into<String>, style: CalloutStyle) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            style,
        }
    }

    /// Renders the callout markup.
    pub fn render(&self) -> String {
        format!(
            r#"<div class="callout {class}">
  <h4>{title}</h4>
  <p>{content}</p>
</div>"#,
            class = self.style.class(),
            title = html_escape(&self.title),
            content = html_escape(&self.content),
        )
    }
}

//! Base AdminLTE page layout.

use ironhtml::html;
use ironhtml::typed::{Document, Element};
use ironhtml_elements::{
    Body, Div, Head, Html, Li, Link, Meta, Nav, Ol, Script, Section, Title, Ul, H1,
};

use crate::assets::AssetBundle;

/// Context for rendering an admin page.
#[derive(Debug, Clone)]
pub struct PageContext {
    /// Site title shown in the browser tab.
    pub site_title: String,
    /// Header shown in the top bar.
    pub site_header: String,
    /// Current administrator name and avatar URL, when logged in.
    pub user: Option<(String, String)>,
    /// Sidebar entries (label, url) for the admin sections.
    pub sections: Vec<(String, String)>,
    /// Flash messages (level, text) shown above the content.
    pub messages: Vec<(String, String)>,
    /// Breadcrumbs (label, url); the last entry is the current page.
    pub breadcrumbs: Vec<(String, Option<String>)>,
    /// Page title.
    pub page_title: String,
    /// Main content HTML.
    pub content: String,
    /// Merged page assets.
    pub assets: AssetBundle,
    /// Inline footer scripts (field picker initializers and the like).
    pub scripts: Vec<String>,
}

impl Default for PageContext {
    fn default() -> Self {
        Self {
            site_title: "Ferric Admin".to_string(),
            site_header: "Administration".to_string(),
            user: None,
            sections: Vec::new(),
            messages: Vec::new(),
            breadcrumbs: vec![("Home".to_string(), Some("/admin".to_string()))],
            page_title: "Dashboard".to_string(),
            content: String::new(),
            assets: AssetBundle::new(),
            scripts: Vec::new(),
        }
    }
}

/// Renders the full AdminLTE page.
pub fn render_page(ctx: &PageContext) -> String {
    let title_str = format!("{} | {}", ctx.page_title, ctx.site_title);
    let inline_js = if ctx.scripts.is_empty() {
        String::new()
    } else {
        format!("$(function(){{{}}});", ctx.scripts.join(""))
    };

    Document::new()
        .doctype()
        .root::<Html, _>(|html_el| {
            html_el
                .attr("lang", "en")
                .child::<Head, _>(|head| {
                    let mut head = head
                        .child::<Meta, _>(|m| m.attr("charset", "UTF-8"))
                        .child::<Meta, _>(|m| {
                            m.attr("name", "viewport")
                                .attr("content", "width=device-width, initial-scale=1.0")
                        })
                        .child::<Title, _>(|t| t.text(&title_str));
                    for href in &ctx.assets.css {
                        head = head.child::<Link, _>(|l| {
                            l.attr("rel", "stylesheet").attr("href", href.clone())
                        });
                    }
                    head
                })
                .child::<Body, _>(|body| {
                    let mut body = body
                        .class("skin-blue sidebar-mini")
                        .child::<Div, _>(|wrapper| {
                            wrapper
                                .class("wrapper")
                                .child::<Nav, _>(|nav| render_topbar(nav, ctx))
                                .child::<Nav, _>(|nav| render_sidebar(nav, &ctx.sections))
                                .child::<Div, _>(|main| {
                                    main.class("content-wrapper")
                                        .attr("id", "pjax-container")
                                        .child::<Section, _>(|s| {
                                            s.class("content-header")
                                                .child::<H1, _>(|h| h.text(&ctx.page_title))
                                                .child::<Nav, _>(|n| {
                                                    render_breadcrumbs(n, &ctx.breadcrumbs)
                                                })
                                        })
                                        .child::<Section, _>(|s| {
                                            let s = s.class("content");
                                            let s = render_messages_into(s, &ctx.messages);
                                            s.child::<Div, _>(|d| d.raw(&ctx.content))
                                        })
                                })
                        });
                    for src in &ctx.assets.js {
                        body = body.child::<Script, _>(|s| s.attr("src", src.clone()));
                    }
                    if inline_js.is_empty() {
                        body
                    } else {
                        body.child::<Script, _>(|s| s.raw(&inline_js))
                    }
                })
        })
        .build()
}

fn render_topbar(nav: Element<Nav>, ctx: &PageContext) -> Element<Nav> {
    let header = &ctx.site_header;
    let brand = html! {
        a.class("logo").href("/admin") { #header }
    };

    nav.class("main-header navbar navbar-static-top")
        .child::<Div, _>(|d| d.raw(brand.render()))
        .child::<Div, _>(|d| render_user_menu(d.class("navbar-custom-menu"), &ctx.user))
}

fn render_sidebar(nav: Element<Nav>, sections: &[(String, String)]) -> Element<Nav> {
    nav.class("main-sidebar").child::<Section, _>(|s| {
        s.class("sidebar").child::<Ul, _>(|ul| {
            let ul = ul
                .class("sidebar-menu")
                .child::<Li, _>(|li| li.class("header").text("MENU"))
                .child::<Li, _>(|li| {
                    let link = html! {
                        a.href("/admin") {
                            i.class("fa fa-dashboard")
                            span { "Dashboard" }
                        }
                    };
                    li.raw(link.render())
                });
            ul.children(sections.iter(), |item, li: Element<Li>| {
                let (name, url) = item;
                let link = html! {
                    a.href(#url) {
                        i.class("fa fa-list")
                        span { #name }
                    }
                };
                li.raw(link.render())
            })
        })
    })
}

fn render_messages_into(
    wrapper: Element<Section>,
    messages: &[(String, String)],
) -> Element<Section> {
    let mut w = wrapper;
    for (level, text) in messages {
        let alert_class = match level.as_str() {
            "success" => "alert-success",
            "error" => "alert-danger",
            "warning" => "alert-warning",
            _ => "alert-info",
        };
        let class = format!("alert {alert_class} alert-dismissible");
        let dismiss = html! {
            button.type_("button").class("close").data_dismiss("alert") { "×" }
        };
        w = w.child::<Div, _>(|d| {
            d.class(&class)
                .attr("role", "alert")
                .raw(dismiss.render())
                .text(text.as_str())
        });
    }
    w
}

fn render_user_menu(wrapper: Element<Div>, user: &Option<(String, String)>) -> Element<Div> {
    match user {
        Some((name, avatar)) => wrapper.child::<Ul, _>(|ul| {
            ul.class("nav navbar-nav").child::<Li, _>(|li| {
                let toggle = html! {
                    a.class("dropdown-toggle").href("#").data_toggle("dropdown") {
                        img.class("user-image").src(#avatar).alt(#name)
                        span.class("hidden-xs") { #name }
                    }
                };
                li.class("dropdown user user-menu")
                    .raw(toggle.render())
                    .child::<Ul, _>(|menu| {
                        menu.class("dropdown-menu")
                            .child::<Li, _>(|item| {
                                let link = html! {
                                    a.href("/admin/auth/setting") { "Settings" }
                                };
                                item.raw(link.render())
                            })
                            .child::<Li, _>(|item| {
                                let link = html! {
                                    a.href("/admin/auth/logout") { "Sign out" }
                                };
                                item.raw(link.render())
                            })
                    })
            })
        }),
        None => {
            let login = html! {
                a.class("btn btn-link").href("/admin/auth/login") { "Sign in" }
            };
            wrapper.raw(login.render())
        }
    }
}

fn render_breadcrumbs(nav: Element<Nav>, breadcrumbs: &[(String, Option<String>)]) -> Element<Nav> {
    let last_idx = breadcrumbs.len().saturating_sub(1);
    nav.child::<Ol, _>(|ol| {
        let mut ol = ol.class("breadcrumb");
        for (i, (label, url)) in breadcrumbs.iter().enumerate() {
            let is_last = i == last_idx;
            ol = ol.child::<Li, _>(|li| {
                if is_last {
                    li.class("active").text(label.as_str())
                } else if let Some(u) = url {
                    let link = html! {
                        a.href(#u) { #label }
                    };
                    li.raw(link.render())
                } else {
                    li.text(label.as_str())
                }
            });
        }
        ol
    })
}

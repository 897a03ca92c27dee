//! Minimal HTML rendering for generated pages.
//!
//! Markup is deliberately plain: pages exist so routes, tabs and lists can
//! be browsed and checked, not to reproduce any theme.

use crate::core::{Entity, RoutePath};
use crate::entity::{EntityKind, EntityProfile};
use crate::route::{NavOutcome, TabRoutes};
use crate::utils::html::escape;
use serde_json::Value;

/// One tab of a tab strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub label: String,
    pub target: TabTarget,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabTarget {
    Link(RoutePath),
    /// Selecting the tab keeps the page and shows this notice.
    Notice(String),
    Disabled,
}

impl From<NavOutcome> for TabTarget {
    fn from(outcome: NavOutcome) -> Self {
        match outcome {
            NavOutcome::Navigate(route) => Self::Link(route),
            NavOutcome::Stay { notice } => Self::Notice(notice),
            NavOutcome::Ignored => Self::Disabled,
        }
    }
}

/// `href` value for a route.
pub fn href(route: &RoutePath) -> String {
    escape(&route.to_encoded()).into_owned()
}

/// Full HTML document with the site navigation.
pub fn document(site_title: &str, title: &str, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{} | {}</title>\n", escape(title), escape(site_title)));
    html.push_str("</head>\n<body>\n<header>\n");
    html.push_str(&format!("<a href=\"/\">{}</a>\n", escape(site_title)));
    html.push_str("<nav>\n<ul>\n");
    for kind in EntityKind::ROUTED {
        let spec = kind.spec();
        let route = RoutePath::from_segments([spec.endpoint]);
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            href(&route),
            escape(spec.label)
        ));
    }
    html.push_str("</ul>\n</nav>\n</header>\n<main>\n");
    html.push_str(body);
    html.push_str("\n</main>\n</body>\n</html>\n");
    html
}

/// Page that forwards to another route.
pub fn redirect(site_title: &str, target: &RoutePath) -> String {
    let target = href(target);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<meta http-equiv=\"refresh\" content=\"0; url={target}\">\n\
         <link rel=\"canonical\" href=\"{target}\">\n</head>\n<body>\n\
         <p><a href=\"{target}\">Continue</a></p>\n</body>\n</html>\n",
        escape(site_title)
    )
}

/// Tab strip.
pub fn tabs(class: &str, tabs: &[Tab]) -> String {
    if tabs.is_empty() {
        return String::new();
    }
    let mut html = format!("<ul class=\"tabs {class}\">\n");
    for tab in tabs {
        let current = if tab.active { " aria-current=\"page\"" } else { "" };
        let label = escape(&tab.label);
        let item = match &tab.target {
            TabTarget::Link(route) => {
                format!("<li><a href=\"{}\"{current}>{label}</a></li>\n", href(route))
            }
            TabTarget::Notice(notice) => format!(
                "<li><span class=\"empty\" title=\"{}\"{current}>{label}</span></li>\n",
                escape(notice)
            ),
            TabTarget::Disabled => format!("<li><span{current}>{label}</span></li>\n"),
        };
        html.push_str(&item);
    }
    html.push_str("</ul>\n");
    html
}

/// Linked names with their summary field.
pub fn entity_list(profile: &EntityProfile, entities: &[Entity]) -> String {
    if entities.is_empty() {
        return "<p class=\"notice\">No entries.</p>\n".to_string();
    }
    let mut html = String::from("<ul class=\"entities\">\n");
    for entity in entities {
        let route = profile.entity_route(entity);
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a>",
            href(&route),
            escape(entity.name())
        ));
        if let Some(summary) = profile.spec.summary.and_then(|key| entity.text(key)) {
            html.push_str(&format!(" <span class=\"summary\">{}</span>", escape(summary)));
        }
        html.push_str("</li>\n");
    }
    html.push_str("</ul>\n");
    html
}

/// Every field except `name`, in upstream order.
pub fn fields(entity: &Entity) -> String {
    let mut html = String::from("<dl class=\"fields\">\n");
    for (key, value) in entity.fields() {
        if key == "name" {
            continue;
        }
        html.push_str(&format!(
            "<dt>{}</dt><dd>{}</dd>\n",
            escape(&label(key)),
            value_html(value)
        ));
    }
    html.push_str("</dl>\n");
    html
}

/// Render a JSON value as nested markup.
pub fn value_html(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => (if *b { "Yes" } else { "No" }).to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => escape(s).into_owned(),
        Value::Array(items) => {
            let mut html = String::from("<ul>");
            for item in items {
                html.push_str(&format!("<li>{}</li>", value_html(item)));
            }
            html.push_str("</ul>");
            html
        }
        Value::Object(map) => {
            let mut html = String::from("<dl>");
            for (key, item) in map {
                html.push_str(&format!(
                    "<dt>{}</dt><dd>{}</dd>",
                    escape(&label(key)),
                    value_html(item)
                ));
            }
            html.push_str("</dl>");
            html
        }
    }
}

/// `hit_points` / `hitPoints` -> `Hit points`
fn label(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        match c {
            '_' | '-' => out.push(' '),
            c if c.is_uppercase() && i > 0 => {
                out.push(' ');
                out.extend(c.to_lowercase());
            }
            c if i == 0 => out.extend(c.to_uppercase()),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity;
    use serde_json::json;

    #[test]
    fn test_label() {
        assert_eq!(label("hit_points"), "Hit points");
        assert_eq!(label("hitPoints"), "Hit points");
        assert_eq!(label("tier"), "Tier");
    }

    #[test]
    fn test_value_html_nested_and_escaped() {
        let value = json!({ "features": [{ "name": "Spit <Acid>" }], "ranged": true });
        let html = value_html(&value);
        assert!(html.contains("<li><dl><dt>Name</dt><dd>Spit &lt;Acid&gt;</dd></dl></li>"));
        assert!(html.contains("<dt>Ranged</dt><dd>Yes</dd>"));
    }

    #[test]
    fn test_fields_skip_name() {
        let html = fields(&entity("Bear", Some(1)));
        assert!(!html.contains("Bear"));
        assert!(html.contains("<dt>Tier</dt><dd>1</dd>"));
    }

    #[test]
    fn test_tabs_render_targets() {
        let html = tabs(
            "tiers",
            &[
                Tab {
                    label: "Tier 1".into(),
                    target: TabTarget::Link(RoutePath::from_segments(["adversaries", "1", "Acid Burrower"])),
                    active: true,
                },
                Tab {
                    label: "Tier 4".into(),
                    target: TabTarget::Notice("No entries in 4.".into()),
                    active: false,
                },
            ],
        );
        assert!(html.contains("href=\"/adversaries/1/Acid%20Burrower\" aria-current=\"page\""));
        assert!(html.contains("title=\"No entries in 4.\""));
        assert!(tabs("tiers", &[]).is_empty());
    }

    #[test]
    fn test_entity_list_links_and_summary() {
        let profile = EntityProfile::new(EntityKind::Classes);
        let bard = crate::core::EntityRecord::from_item(json!({ "name": "Bard", "description": "Songs & stories" }))
            .validate(false)
            .unwrap();
        let html = entity_list(&profile, &[bard]);
        assert!(html.contains("<a href=\"/classes/Bard\">Bard</a>"));
        assert!(html.contains("Songs &amp; stories"));
        assert!(entity_list(&profile, &[]).contains("No entries."));
    }

    #[test]
    fn test_redirect_and_document() {
        let target = RoutePath::from_segments(["campaign-frames", "The%20Witherwild"]);
        let html = redirect("Dex", &target);
        assert!(html.contains("url=/campaign-frames/The%20Witherwild"));

        let html = document("Dex", "Weapons", "<p>body</p>");
        assert!(html.contains("<title>Weapons | Dex</title>"));
        assert!(html.contains("<a href=\"/weapons\">"));
        assert!(html.contains("<p>body</p>"));
    }
}

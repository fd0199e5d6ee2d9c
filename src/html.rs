use crate::card::{CardViewModel, SecondaryValue};
use crate::measure::{ELLIPSIS, TextMetrics};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write;

/// Presentation switches owned by the caller, not by the card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    pub is_header: bool,
    pub background_color: Option<String>,
    /// Icon value (or card type) to image URL.
    pub icon_options: HashMap<String, String>,
    pub show_more_description: bool,
}

pub struct HtmlRenderer {
    metrics: TextMetrics,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            metrics: TextMetrics::default(),
        }
    }
}

impl HtmlRenderer {
    pub fn new(metrics: TextMetrics) -> Self {
        Self { metrics }
    }

    pub fn render(&self, card: &CardViewModel, options: &RenderOptions) -> String {
        if options.is_header {
            self.render_header(card, options)
        } else {
            self.render_card(card, options)
        }
    }

    fn render_card(&self, card: &CardViewModel, options: &RenderOptions) -> String {
        let mut html = String::new();

        writeln!(
            &mut html,
            r#"<div class="SRC-portalCard"{}>"#,
            style_attr(options.background_color.as_deref(), false)
        )
        .unwrap();

        writeln!(&mut html, r#"<div class="SRC-cardThumbnail">"#).unwrap();
        self.render_icon(&mut html, card, options);
        writeln!(&mut html, "</div>").unwrap();

        writeln!(&mut html, r#"<div class="SRC-cardContent">"#).unwrap();
        writeln!(&mut html, r#"<div class="SRC-type">{}</div>"#, escape_html(&card.card_type)).unwrap();

        let title = escape_html(&card.title.as_text());
        if card.link.is_empty() {
            writeln!(
                &mut html,
                r#"<div class="SRC-title"><h3 class="SRC-boldText SRC-blackText">{}</h3></div>"#,
                title
            )
            .unwrap();
        } else {
            writeln!(
                &mut html,
                r#"<div class="SRC-title"><h3 class="SRC-boldText SRC-blackText"><a class="SRC-primary-text-color" target="{}" href="{}">{}</a></h3></div>"#,
                card.link.target.as_attr(),
                escape_html(&card.link.display_url),
                title
            )
            .unwrap();
        }

        if let Some(sub) = present(&card.sub_title) {
            writeln!(&mut html, r#"<div class="SRC-author">{}</div>"#, escape_html(&sub)).unwrap();
        }
        if let Some(desc) = present(&card.description) {
            self.render_description(&mut html, &desc, options.show_more_description);
        }
        writeln!(&mut html, "</div>").unwrap();

        if card.has_secondary_labels {
            render_footer(&mut html, card);
        }

        writeln!(&mut html, "</div>").unwrap();
        html
    }

    fn render_header(&self, card: &CardViewModel, options: &RenderOptions) -> String {
        let mut html = String::new();

        writeln!(
            &mut html,
            r#"<section class="SRC-cardHeader"{}>"#,
            style_attr(options.background_color.as_deref(), true)
        )
        .unwrap();

        writeln!(&mut html, r#"<div class="SRC-cardThumbnail">"#).unwrap();
        self.render_icon(&mut html, card, options);
        writeln!(&mut html, "</div>").unwrap();

        writeln!(&mut html, r#"<div class="SRC-cardContent">"#).unwrap();
        writeln!(&mut html, r#"<div class="SRC-type">{}</div>"#, escape_html(&card.card_type)).unwrap();
        writeln!(
            &mut html,
            r#"<h3 class="SRC-title SRC-boldText">{}</h3>"#,
            escape_html(&card.title.as_text())
        )
        .unwrap();
        if let Some(sub) = present(&card.sub_title) {
            writeln!(&mut html, r#"<div class="SRC-author">{}</div>"#, escape_html(&sub)).unwrap();
        }
        if let Some(desc) = present(&card.description) {
            self.render_description(&mut html, &desc, options.show_more_description);
        }
        writeln!(&mut html, "</div>").unwrap();

        if card.has_secondary_labels {
            render_footer(&mut html, card);
        }

        writeln!(&mut html, "</section>").unwrap();
        html
    }

    fn render_icon(&self, html: &mut String, card: &CardViewModel, options: &RenderOptions) {
        let src = card
            .icon_value
            .as_ref()
            .and_then(|v| options.icon_options.get(&v.as_text()))
            .or_else(|| options.icon_options.get(&card.card_type));

        if let Some(src) = src {
            writeln!(
                html,
                r#"<img class="SRC-icon" src="{}" alt="{}" />"#,
                escape_html(src),
                escape_html(&card.card_type)
            )
            .unwrap();
        }
    }

    fn render_description(&self, html: &mut String, text: &str, expanded: bool) {
        let summary = self.metrics.summarize(text);

        if !summary.truncated {
            writeln!(html, r#"<span class="SRC-font-size-base">{}</span>"#, escape_html(text)).unwrap();
        } else if expanded {
            writeln!(
                html,
                r#"<span class="SRC-font-size-base">{} <a class="SRC-showMore">Show Less</a></span>"#,
                escape_html(text)
            )
            .unwrap();
        } else {
            writeln!(
                html,
                r#"<span class="SRC-font-size-base">{}{} <a class="SRC-showMore">Show More</a></span>"#,
                escape_html(summary.text),
                ELLIPSIS
            )
            .unwrap();
        }
    }
}

fn render_footer(html: &mut String, card: &CardViewModel) {
    writeln!(html, r#"<div class="SRC-cardFooter">"#).unwrap();
    for SecondaryValue { label, value } in card.visible_secondary_values() {
        let value = value.as_ref().map(Value::as_text).unwrap_or_default();
        writeln!(
            html,
            r#"<div class="SRC-cardMetadataRow"><span class="SRC-row-label">{}</span><span class="SRC-row-data">{}</span></div>"#,
            escape_html(label),
            escape_html(&value)
        )
        .unwrap();
    }
    let hidden = card.hidden_secondary_count();
    if hidden > 0 {
        writeln!(html, r#"<div class="SRC-cardFooter-more">+{} more</div>"#, hidden).unwrap();
    }
    writeln!(html, "</div>").unwrap();
}

/// Text of an optional field, if it has any.
fn present(value: &Option<Value>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_blank()).map(Value::as_text)
}

fn style_attr(background: Option<&str>, flush: bool) -> String {
    let mut rules = Vec::new();
    if let Some(bg) = background {
        rules.push(format!("background: {bg}"));
    }
    if flush {
        rules.push("margin-top: 0px".to_string());
        rules.push("margin-bottom: 0px".to_string());
    }
    if rules.is_empty() {
        String::new()
    } else {
        format!(r#" style="{}""#, escape_html(&rules.join("; ")))
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{ProjectOptions, project};
    use crate::card_schema::{CardSchema, KeyToAlias};
    use crate::value::{Row, Schema};

    fn card(description: &str, limit: Option<usize>) -> CardViewModel {
        let schema = Schema::from_headers(&["name", "id", "about", "grant", "tumor", "kind"]);
        let row = Row::new(vec![
            Value::from("Atlas <v2>"),
            Value::from("10.1038/nphys1170"),
            Value::from(description),
            Value::from("CA-1"),
            Value::from("liver"),
            Value::from("dataset"),
        ]);
        let cs = CardSchema {
            link: Some("id".into()),
            description: Some("about".into()),
            icon: Some("kind".into()),
            ..CardSchema::new("Dataset", "name")
        }
        .with_secondary_labels([KeyToAlias::with_alias("grant", "Grant"), KeyToAlias::new("tumor")]);
        let options = ProjectOptions {
            secondary_label_limit: limit,
            ..ProjectOptions::default()
        };
        project(&row, &schema, &cs, &options).unwrap()
    }

    #[test]
    fn test_render_basic() {
        let html = HtmlRenderer::default().render(&card("About it", None), &RenderOptions::default());

        assert!(html.starts_with(r#"<div class="SRC-portalCard">"#));
        assert!(html.contains(r#"<div class="SRC-type">Dataset</div>"#));
        assert!(html.contains(r#"target="_blank" href="https://dx.doi.org/10.1038/nphys1170""#));
        assert!(html.contains("Atlas &lt;v2&gt;"));
        assert!(html.contains(r#"<span class="SRC-row-label">Grant</span>"#));
        assert!(html.contains(r#"<span class="SRC-row-label">tumor</span>"#));
        assert!(!html.contains("SRC-author"));
        assert!(!html.contains("<img"));
        assert!(html.trim_end().ends_with("</div>"));
    }

    #[test]
    fn test_render_no_link() {
        let schema = Schema::from_headers(&["name"]);
        let row = Row::new(vec![Value::from("Plain")]);
        let card = project(&row, &schema, &CardSchema::new("T", "name"), &ProjectOptions::default()).unwrap();
        let html = HtmlRenderer::default().render(&card, &RenderOptions::default());

        assert!(html.contains(r#"<h3 class="SRC-boldText SRC-blackText">Plain</h3>"#));
        assert!(!html.contains("<a "));
        assert!(!html.contains("SRC-cardFooter"));
    }

    #[test]
    fn test_render_limit() {
        let html = HtmlRenderer::default().render(&card("x", Some(1)), &RenderOptions::default());
        assert!(html.contains("Grant"));
        assert!(!html.contains(r#"<span class="SRC-row-data">liver</span>"#));
        assert!(html.contains("+1 more"));
    }

    #[test]
    fn test_render_icon() {
        let mut options = RenderOptions::default();
        options.icon_options.insert("Dataset".into(), "type.svg".into());
        let html = HtmlRenderer::default().render(&card("x", None), &options);
        assert!(html.contains(r#"src="type.svg""#));

        options.icon_options.insert("dataset".into(), "value.svg".into());
        let html = HtmlRenderer::default().render(&card("x", None), &options);
        assert!(html.contains(r#"src="value.svg""#));
    }

    #[test]
    fn test_render_header() {
        let options = RenderOptions {
            is_header: true,
            background_color: Some("#5bb0b5".into()),
            ..RenderOptions::default()
        };
        let html = HtmlRenderer::default().render(&card("x", None), &options);
        assert!(html.starts_with(
            r#"<section class="SRC-cardHeader" style="background: #5bb0b5; margin-top: 0px; margin-bottom: 0px">"#
        ));
        assert!(html.contains(r#"<h3 class="SRC-title SRC-boldText">Atlas &lt;v2&gt;</h3>"#));
        assert!(html.trim_end().ends_with("</section>"));
    }

    #[test]
    fn test_render_show_more() {
        let renderer = HtmlRenderer::new(TextMetrics {
            summary_columns: 10,
            word_break_window: 10,
        });
        let card = card("first second third fourth", None);

        let collapsed = renderer.render(&card, &RenderOptions::default());
        assert!(collapsed.contains("first…"));
        assert!(collapsed.contains("Show More"));

        let options = RenderOptions {
            show_more_description: true,
            ..RenderOptions::default()
        };
        let expanded = renderer.render(&card, &options);
        assert!(expanded.contains("first second third fourth"));
        assert!(expanded.contains("Show Less"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }
}

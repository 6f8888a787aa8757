use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

use crate::app::ports::{ExtractedFields, FieldExtractor};

static H1_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static CLASSED_DIV_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("div[class]").unwrap());
static MAILTO_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href^='mailto:']").unwrap());
static PROFILE_LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href*='/profile/']").unwrap());
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());

static EMAIL_IN_TEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());

const NAME_HEADING_HINTS: &[&str] = &["profile", "name", "title"];

/// `scraper`-backed extractor for profile and listing pages
#[derive(Debug, Default, Clone)]
pub struct HtmlFieldExtractor;

impl HtmlFieldExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_name(&self, document: &Html) -> Option<String> {
        let headings: Vec<ElementRef> = document.select(&H1_SELECTOR).collect();

        let hinted = headings.iter().find(|h| {
            h.value()
                .attr("class")
                .map(|class| {
                    let class = class.to_lowercase();
                    NAME_HEADING_HINTS.iter().any(|hint| class.contains(hint))
                })
                .unwrap_or(false)
        });

        let element = hinted.or_else(|| headings.first()).copied().or_else(|| {
            document.select(&CLASSED_DIV_SELECTOR).find(|div| {
                div.value()
                    .attr("class")
                    .is_some_and(|class| class.to_lowercase().contains("name"))
            })
        })?;

        let text = collapse_whitespace(element.text());
        (!text.is_empty()).then_some(text)
    }

    fn extract_email(&self, document: &Html) -> Option<String> {
        for link in document.select(&MAILTO_SELECTOR) {
            if let Some(address) = link
                .value()
                .attr("href")
                .and_then(|href| href.strip_prefix("mailto:"))
                .and_then(|rest| rest.split('?').next())
                .map(str::trim)
                .filter(|address| !address.is_empty())
            {
                return Some(address.to_string());
            }
        }

        let text = match document.select(&BODY_SELECTOR).next() {
            Some(body) => collapse_whitespace(body.text()),
            None => collapse_whitespace(document.root_element().text()),
        };
        EMAIL_IN_TEXT_RE
            .find(&text)
            .map(|m| m.as_str().to_string())
    }
}

impl FieldExtractor for HtmlFieldExtractor {
    fn extract_fields(&self, html: &str) -> ExtractedFields {
        let document = Html::parse_document(html);
        ExtractedFields {
            name: self.extract_name(&document),
            email: self.extract_email(&document),
        }
    }

    fn extract_profile_links(&self, html: &str, base_url: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let base = base_url.trim_end_matches('/');
        let mut seen = HashSet::new();
        let mut links = Vec::new();

        for element in document.select(&PROFILE_LINK_SELECTOR) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let href = href.trim();
            let absolute = if href.starts_with("http") {
                href.to_string()
            } else if href.starts_with('/') {
                format!("{base}{href}")
            } else {
                format!("{base}/{href}")
            };
            if seen.insert(absolute.clone()) {
                links.push(absolute);
            }
        }

        links
    }
}

fn collapse_whitespace<'a>(fragments: impl Iterator<Item = &'a str>) -> String {
    let mut buffer = String::new();
    for word in fragments.flat_map(str::split_whitespace) {
        if !buffer.is_empty() {
            buffer.push(' ');
        }
        buffer.push_str(word);
    }
    buffer
}

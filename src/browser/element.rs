//! Owned DOM element snapshots
//!
//! A handle captures one element's tag, attributes, inner markup and text at query time, so
//! it can be held across `.await` points and probed after the page has moved on.

use crate::{BrowserError, BrowserResult};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A snapshot of a single DOM element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    tag: String,
    attributes: Vec<(String, String)>,
    inner_html: String,
    text: String,
    base_url: Option<Url>,
}

impl ElementHandle {
    /// Captures an element from a parsed document
    ///
    /// # Arguments
    ///
    /// * `element` - The element to snapshot
    /// * `base_url` - URL of the page the element came from, used to resolve `href`
    pub fn from_element(element: ElementRef<'_>, base_url: Option<&Url>) -> Self {
        let value = element.value();
        Self {
            tag: value.name().to_string(),
            attributes: value
                .attrs()
                .map(|(name, val)| (name.to_string(), val.to_string()))
                .collect(),
            inner_html: element.inner_html(),
            text: element.text().collect(),
            base_url: base_url.cloned(),
        }
    }

    pub fn tag_name(&self) -> &str {
        &self.tag
    }

    /// Returns the raw value of an attribute
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr, _)| attr.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Visible text of the element, trimmed at both ends
    ///
    /// Inner spacing is kept as written.
    pub fn inner_text(&self) -> String {
        self.text.trim().to_string()
    }

    /// The `href` attribute resolved against the page URL
    ///
    /// Returns `None` when the attribute is missing or blank. If the value cannot be
    /// resolved it is returned as written.
    pub fn href(&self) -> Option<String> {
        let href = self.attribute("href")?.trim();
        if href.is_empty() {
            return None;
        }

        match &self.base_url {
            Some(base) => Some(
                base.join(href)
                    .map(|url| url.to_string())
                    .unwrap_or_else(|_| href.to_string()),
            ),
            None => Some(href.to_string()),
        }
    }

    /// Returns the first descendant matching `selector`
    pub fn query_selector(&self, selector: &str) -> BrowserResult<Option<ElementHandle>> {
        let selector = parse_selector(selector)?;
        let fragment = Html::parse_fragment(&self.inner_html);
        let found = fragment
            .select(&selector)
            .next()
            .map(|element| ElementHandle::from_element(element, self.base_url.as_ref()));
        Ok(found)
    }

    /// Returns every descendant matching `selector`, in document order
    pub fn query_selector_all(&self, selector: &str) -> BrowserResult<Vec<ElementHandle>> {
        let selector = parse_selector(selector)?;
        let fragment = Html::parse_fragment(&self.inner_html);
        Ok(fragment
            .select(&selector)
            .map(|element| ElementHandle::from_element(element, self.base_url.as_ref()))
            .collect())
    }
}

/// Parses a CSS selector, mapping failures to [`BrowserError::InvalidSelector`]
pub fn parse_selector(selector: &str) -> BrowserResult<Selector> {
    Selector::parse(selector).map_err(|_| BrowserError::InvalidSelector(selector.to_string()))
}

/// Snapshots every element of `document` matching `selector`
pub fn select_all(
    document: &Html,
    selector: &str,
    base_url: Option<&Url>,
) -> BrowserResult<Vec<ElementHandle>> {
    let selector = parse_selector(selector)?;
    Ok(document
        .select(&selector)
        .map(|element| ElementHandle::from_element(element, base_url))
        .collect())
}

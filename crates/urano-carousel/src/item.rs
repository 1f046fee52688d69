//! Card records, link targets and outbound navigation.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::{ItemError, LinkError};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageRef {
    pub src: String,
    pub alt: String,
}

impl ImageRef {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }
}

/// Where a card leads.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinkTarget {
    /// Path or in-page anchor on the same site.
    Route(String),
    /// Mail address without the `mailto:` prefix.
    Mailto(String),
    /// Absolute http(s) URL, opened in a new tab.
    External(String),
    /// Placeholder for a page that is not live yet.
    ComingSoon,
}

impl LinkTarget {
    pub const COMING_SOON: &'static str = "coming-soon";

    pub fn parse(href: &str) -> Result<Self, LinkError> {
        let href = href.trim();
        if href.is_empty() {
            return Err(LinkError::Empty);
        }
        if href == Self::COMING_SOON || href == "#" {
            return Ok(LinkTarget::ComingSoon);
        }
        if let Some(rest) = href.strip_prefix("//") {
            return Ok(LinkTarget::External(format!("https://{rest}")));
        }
        if href.starts_with('/') || href.starts_with('#') {
            return Ok(LinkTarget::Route(href.to_string()));
        }

        let lower = href.to_ascii_lowercase();
        if lower.starts_with("mailto:") {
            let address = href["mailto:".len()..].trim();
            if address.is_empty() {
                return Err(LinkError::MissingAddress);
            }
            return Ok(LinkTarget::Mailto(address.to_string()));
        }
        if lower.starts_with("https://") || lower.starts_with("http://") {
            return Ok(LinkTarget::External(href.to_string()));
        }
        Err(LinkError::Unsupported(href.to_string()))
    }

    pub fn is_coming_soon(&self) -> bool {
        matches!(self, LinkTarget::ComingSoon)
    }

    pub fn navigation_request(&self) -> NavigationRequest {
        match self {
            LinkTarget::Route(path) => NavigationRequest::Route(path.clone()),
            LinkTarget::Mailto(address) => NavigationRequest::Mail(address.clone()),
            LinkTarget::External(url) => NavigationRequest::OpenExternal(url.clone()),
            LinkTarget::ComingSoon => NavigationRequest::ComingSoon,
        }
    }
}

impl FromStr for LinkTarget {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkTarget::Route(path) => f.write_str(path),
            LinkTarget::Mailto(address) => write!(f, "mailto:{address}"),
            LinkTarget::External(url) => f.write_str(url),
            LinkTarget::ComingSoon => f.write_str(Self::COMING_SOON),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationRequest {
    Route(String),
    OpenExternal(String),
    Mail(String),
    /// Show the "coming soon" notice instead of navigating.
    ComingSoon,
}

/// Receives navigation requests from card clicks.
pub trait Navigator {
    fn navigate(&mut self, request: &NavigationRequest);
}

impl<F> Navigator for F
where
    F: FnMut(&NavigationRequest),
{
    fn navigate(&mut self, request: &NavigationRequest) {
        self(request)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarouselItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: Option<ImageRef>,
    pub link: Option<LinkTarget>,
}

impl CarouselItem {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            image: None,
            link: None,
        }
    }

    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_link(mut self, link: LinkTarget) -> Self {
        self.link = Some(link);
        self
    }

    pub fn with_href(self, href: &str) -> Result<Self, LinkError> {
        Ok(self.with_link(LinkTarget::parse(href)?))
    }
}

/// Ordered, id-unique card list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CarouselItems {
    items: IndexMap<String, CarouselItem>,
}

impl CarouselItems {
    pub fn new(items: Vec<CarouselItem>) -> Result<Self, ItemError> {
        let mut map = IndexMap::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            if item.id.trim().is_empty() {
                return Err(ItemError::EmptyId { index });
            }
            if map.contains_key(&item.id) {
                return Err(ItemError::DuplicateId(item.id));
            }
            map.insert(item.id.clone(), item);
        }
        Ok(Self { items: map })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CarouselItem> {
        self.items.get(id)
    }

    pub fn get_index(&self, index: usize) -> Option<&CarouselItem> {
        self.items.get_index(index).map(|(_, item)| item)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.items.get_index_of(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CarouselItem> {
        self.items.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_link_kind() {
        assert_eq!(
            LinkTarget::parse("/launch"),
            Ok(LinkTarget::Route("/launch".into()))
        );
        assert_eq!(
            LinkTarget::parse("/#faq"),
            Ok(LinkTarget::Route("/#faq".into()))
        );
        assert_eq!(
            LinkTarget::parse("MailTo:hello@urano.example"),
            Ok(LinkTarget::Mailto("hello@urano.example".into()))
        );
        assert_eq!(
            LinkTarget::parse(" https://docs.urano.example/x "),
            Ok(LinkTarget::External("https://docs.urano.example/x".into()))
        );
        assert_eq!(
            LinkTarget::parse("//cdn.example/a"),
            Ok(LinkTarget::External("https://cdn.example/a".into()))
        );
        assert_eq!(LinkTarget::parse("coming-soon"), Ok(LinkTarget::ComingSoon));
        assert_eq!(LinkTarget::parse("#"), Ok(LinkTarget::ComingSoon));
    }

    #[test]
    fn rejects_bad_links() {
        assert_eq!(LinkTarget::parse("  "), Err(LinkError::Empty));
        assert_eq!(LinkTarget::parse("mailto:"), Err(LinkError::MissingAddress));
        assert_eq!(
            LinkTarget::parse("javascript:alert(1)"),
            Err(LinkError::Unsupported("javascript:alert(1)".into()))
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for href in ["/about", "mailto:a@b.c", "https://x.y", "coming-soon"] {
            let target: LinkTarget = href.parse().unwrap();
            assert_eq!(target.to_string(), href);
        }
    }

    #[test]
    fn link_targets_map_to_requests() {
        assert_eq!(
            LinkTarget::External("https://x.y".into()).navigation_request(),
            NavigationRequest::OpenExternal("https://x.y".into())
        );
        assert_eq!(
            LinkTarget::ComingSoon.navigation_request(),
            NavigationRequest::ComingSoon
        );
    }

    #[test]
    fn items_keep_order_and_reject_duplicates() {
        let items = CarouselItems::new(vec![
            CarouselItem::new("b", "B", ""),
            CarouselItem::new("a", "A", ""),
        ])
        .unwrap();
        assert_eq!(items.index_of("a"), Some(1));
        assert_eq!(items.get_index(0).map(|item| item.id.as_str()), Some("b"));

        let duplicate = CarouselItems::new(vec![
            CarouselItem::new("a", "A", ""),
            CarouselItem::new("a", "again", ""),
        ]);
        assert_eq!(duplicate, Err(ItemError::DuplicateId("a".into())));

        let empty = CarouselItems::new(vec![
            CarouselItem::new("a", "A", ""),
            CarouselItem::new(" ", "blank", ""),
        ]);
        assert_eq!(empty, Err(ItemError::EmptyId { index: 1 }));
    }

    #[test]
    fn closures_are_navigators() {
        let mut seen = Vec::new();
        {
            let mut navigator = |request: &NavigationRequest| seen.push(request.clone());
            navigator.navigate(&NavigationRequest::Route("/team".into()));
        }
        assert_eq!(seen, vec![NavigationRequest::Route("/team".into())]);
    }
}

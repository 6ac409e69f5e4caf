use crate::types::ContentItem;

/// Requested viewer locations: one string or a list of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locations(Vec<String>);

impl Locations {
    pub fn as_slice(&self) -> &[String] { &self.0 }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    fn normalized(&self) -> Vec<String> {
        self.0.iter().map(|l| normalize(l)).collect()
    }
}

impl From<&str> for Locations {
    fn from(s: &str) -> Self { Self(vec![s.to_string()]) }
}

impl From<String> for Locations {
    fn from(s: String) -> Self { Self(vec![s]) }
}

impl From<Vec<String>> for Locations {
    fn from(v: Vec<String>) -> Self { Self(v) }
}

impl From<&[String]> for Locations {
    fn from(v: &[String]) -> Self { Self(v.to_vec()) }
}

impl From<&[&str]> for Locations {
    fn from(v: &[&str]) -> Self { Self(v.iter().map(|s| s.to_string()).collect()) }
}

impl<const N: usize> From<[&str; N]> for Locations {
    fn from(v: [&str; N]) -> Self { Self(v.iter().map(|s| s.to_string()).collect()) }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Location component of a `"<namespace>:<location>"` tag, trimmed and case-folded.
/// Tags without a `:` have no location.
pub fn tag_location(tag: &str) -> Option<String> {
    tag.split_once(':').map(|(_, loc)| normalize(loc))
}

/// Keep the items tagged with at least one of the requested locations.
pub fn filter_by_location(items: &[ContentItem], locations: impl Into<Locations>) -> Vec<ContentItem> {
    let wanted = locations.into().normalized();
    items
        .iter()
        .filter(|item| matches_any(item, &wanted))
        .cloned()
        .collect()
}

fn matches_any(item: &ContentItem, wanted: &[String]) -> bool {
    item.location_tag
        .iter()
        .filter_map(|t| tag_location(t))
        .any(|loc| wanted.iter().any(|w| *w == loc))
}

//! `Link` header parsing.
//!
//! The coordinator treats the header as an opaque string; this is for
//! callers that want to walk pages. Expected shape:
//!
//! ```text
//! <https://host/api/0/organizations/acme/events/?cursor=0:0:1>; rel="previous"; results="false"; cursor="0:0:1",
//! <https://host/api/0/organizations/acme/events/?cursor=0:50:0>; rel="next"; results="true"; cursor="0:50:0"
//! ```

use crate::view::Location;

/// One `<url>; attr="value"` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub href: String,
    pub cursor: Option<String>,
    /// False when the server says the page is empty. Links without a
    /// `results` attribute are assumed to have results.
    pub has_results: bool,
}

/// Previous/next links of a paginated response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    pub previous: Option<PageLink>,
    pub next: Option<PageLink>,
}

impl PageLinks {
    pub fn parse(header: &str) -> Self {
        let mut links = PageLinks::default();
        let mut rest = header;

        while let Some(open) = rest.find('<') {
            let Some(close) = rest[open..].find('>').map(|idx| open + idx) else {
                break;
            };
            let href = rest[open + 1..close].trim().to_string();
            let tail = &rest[close + 1..];
            let attrs_end = tail.find('<').unwrap_or(tail.len());
            let attrs = &tail[..attrs_end];
            rest = &tail[attrs_end..];

            let mut rel = None;
            let mut cursor = None;
            let mut has_results = true;
            for attr in attrs.split(';') {
                let Some((key, value)) = attr.split_once('=') else {
                    continue;
                };
                let value = value.trim().trim_end_matches(',').trim().trim_matches('"');
                match key.trim() {
                    "rel" => rel = Some(value.to_string()),
                    "cursor" => cursor = Some(value.to_string()),
                    "results" => has_results = value == "true",
                    _ => {}
                }
            }

            let cursor = cursor.or_else(|| cursor_from_href(&href));
            let link = PageLink {
                href,
                cursor,
                has_results,
            };
            match rel.as_deref() {
                Some("next") => links.next = Some(link),
                Some("previous") | Some("prev") => links.previous = Some(link),
                _ => {}
            }
        }

        links
    }

    /// Cursor of the next page, when there is one with results.
    pub fn next_cursor(&self) -> Option<&str> {
        self.next
            .as_ref()
            .filter(|link| link.has_results)
            .and_then(|link| link.cursor.as_deref())
    }
}

fn cursor_from_href(href: &str) -> Option<String> {
    Location::parse(href).query.get("cursor").map(str::to_string)
}

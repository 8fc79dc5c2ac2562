use keypage_core::link::PageLinks;
use serde::{Deserialize, Serialize};

///
/// CursorLinkedResponse
///
/// List response body: optional `previous`/`next` links followed by the page
/// content. Absent links are omitted rather than serialized as null.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CursorLinkedResponse<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    pub content: Vec<T>,
}

impl<T> CursorLinkedResponse<T> {
    #[must_use]
    pub fn new(links: PageLinks, content: Vec<T>) -> Self {
        Self {
            previous: links.previous.map(String::from),
            next: links.next.map(String::from),
            content,
        }
    }

    /// Convert each row, keeping the links (entity to view, for example).
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> CursorLinkedResponse<U> {
        CursorLinkedResponse {
            previous: self.previous,
            next: self.next,
            content: self.content.into_iter().map(f).collect(),
        }
    }

    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use url::Url;

    fn links(previous: Option<&str>, next: Option<&str>) -> PageLinks {
        let parse = |raw: &str| Url::parse(raw).expect("test url should parse");

        PageLinks {
            previous: previous.map(parse),
            next: next.map(parse),
        }
    }

    #[test]
    fn serializes_links_before_content() {
        let response = CursorLinkedResponse::new(
            links(Some("http://x/cats?before=AA"), Some("http://x/cats?after=AA")),
            vec![1, 2],
        );

        let body = serde_json::to_string(&response).expect("response should serialize");
        let expected = concat!(
            r#"{"previous":"http://x/cats?before=AA","#,
            r#""next":"http://x/cats?after=AA","content":[1,2]}"#,
        );
        assert_eq!(body, expected);
    }

    #[test]
    fn omits_absent_links() {
        let response = CursorLinkedResponse::new(links(None, None), vec!["tom"]);

        let body = serde_json::to_value(&response).expect("response should serialize");
        assert_eq!(body, json!({ "content": ["tom"] }));
    }

    #[test]
    fn deserializes_without_links() {
        let response: CursorLinkedResponse<u8> =
            serde_json::from_str(r#"{"content":[7]}"#).expect("body should deserialize");

        assert_eq!(response.previous, None);
        assert_eq!(response.next, None);
        assert_eq!(response.into_content(), vec![7]);
    }

    #[test]
    fn map_keeps_links() {
        let response =
            CursorLinkedResponse::new(links(None, Some("http://x/cats?after=AA")), vec![1, 2])
                .map(|n| n * 10);

        assert_eq!(response.next.as_deref(), Some("http://x/cats?after=AA"));
        assert_eq!(response.content, vec![10, 20]);
    }
}

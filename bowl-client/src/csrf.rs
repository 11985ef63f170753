//! CSRF credential
//!
//! Server-rendered pages carry the token and the header it must be sent
//! in as two meta tags:
//!
//! ```html
//! <meta name="_csrf" content="c0ffee"/>
//! <meta name="_csrf_header" content="X-CSRF-TOKEN"/>
//! ```

use scraper::{Html, Selector};

/// Token plus the header name to replay it in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken {
    header_name: String,
    token: String,
}

impl CsrfToken {
    pub fn new(header_name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            header_name: header_name.into(),
            token: token.into(),
        }
    }

    /// Read the `_csrf` / `_csrf_header` meta tags from a page.
    ///
    /// Returns `None` unless both tags are present and non-empty.
    pub fn from_html(html: &str) -> Option<Self> {
        let document = Html::parse_document(html);
        let token = meta_content(&document, "_csrf")?;
        let header_name = meta_content(&document, "_csrf_header")?;
        Some(Self::new(header_name, token))
    }

    pub fn header_name(&self) -> &str {
        &self.header_name
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

fn meta_content(document: &Html, name: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[name="{name}"]"#)).ok()?;
    document
        .select(&selector)
        .filter_map(|meta| meta.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_html() {
        let html = r#"<html><head>
            <meta charset="utf-8">
            <meta name="_csrf" content="3f2a-99"/>
            <meta name="_csrf_header" content="X-CSRF-TOKEN"/>
        </head></html>"#;
        let csrf = CsrfToken::from_html(html).unwrap();
        assert_eq!(csrf.token(), "3f2a-99");
        assert_eq!(csrf.header_name(), "X-CSRF-TOKEN");
    }

    #[test]
    fn test_attribute_order_and_quotes() {
        let html = "<meta content='tok' name='_csrf'><meta content=X-XSRF name=_csrf_header>";
        let csrf = CsrfToken::from_html(html).unwrap();
        assert_eq!(csrf.token(), "tok");
        assert_eq!(csrf.header_name(), "X-XSRF");
    }

    #[test]
    fn test_missing_header_tag() {
        assert!(CsrfToken::from_html(r#"<meta name="_csrf" content="abc">"#).is_none());
        assert!(CsrfToken::from_html("<p>no meta</p>").is_none());
    }

    #[test]
    fn test_uppercase_markup() {
        let html = r#"<HEAD><META NAME="_csrf" CONTENT="abc"/><META NAME="_csrf_header" CONTENT="X-CSRF-TOKEN"/></HEAD>"#;
        let csrf = CsrfToken::from_html(html).unwrap();
        assert_eq!(csrf.token(), "abc");
        assert_eq!(csrf.header_name(), "X-CSRF-TOKEN");
    }

    #[test]
    fn test_entities_decoded() {
        let html = r#"<meta name="_csrf" content="a&#45;b&amp;c"><meta name="_csrf_header" content="X-CSRF-TOKEN">"#;
        assert_eq!(CsrfToken::from_html(html).unwrap().token(), "a-b&c");
    }

    #[test]
    fn test_commented_tag_ignored() {
        let html = r#"<head>
            <!-- <meta name="_csrf" content="stale"/> -->
            <meta name="_csrf" content="live"/>
            <meta name="_csrf_header" content="X-CSRF-TOKEN"/>
        </head>"#;
        assert_eq!(CsrfToken::from_html(html).unwrap().token(), "live");
    }
}

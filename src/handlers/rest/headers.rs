use axum::http::{HeaderMap, HeaderName, HeaderValue, header};

use crate::models::Page;

pub const ALERT_HEADER: HeaderName = HeaderName::from_static("x-notemaker-alert");
pub const PARAMS_HEADER: HeaderName = HeaderName::from_static("x-notemaker-params");
pub const ERROR_HEADER: HeaderName = HeaderName::from_static("x-notemaker-error");
pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

pub const ENTITY_NAME: &str = "note";
const APP_NAME: &str = "notemakerApp";

/// Alert key/param pair announcing a successful mutation.
pub fn entity_alert(action: &str, id: i64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&format!("{APP_NAME}.{ENTITY_NAME}.{action}")) {
        headers.insert(ALERT_HEADER, value);
    }
    headers.insert(PARAMS_HEADER, HeaderValue::from(id));
    headers
}

pub fn failure_alert(error_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&format!("error.{error_key}")) {
        headers.insert(ERROR_HEADER, value);
    }
    headers.insert(PARAMS_HEADER, HeaderValue::from_static(ENTITY_NAME));
    headers
}

/// `X-Total-Count` plus an RFC 5988 `Link` header with next/prev/last/first pages.
pub fn pagination<T>(page: &Page<T>, base_url: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from(page.total_elements));

    let link = |number: u64, rel: &str| {
        format!(
            "<{base_url}?page={number}&size={}>; rel=\"{rel}\"",
            page.size
        )
    };

    let number = u64::from(page.number);
    let mut links = Vec::with_capacity(4);
    if page.has_next() {
        links.push(link(number + 1, "next"));
    }
    if page.has_previous() {
        links.push(link(number - 1, "prev"));
    }
    links.push(link(page.total_pages().saturating_sub(1), "last"));
    links.push(link(0, "first"));

    if let Ok(value) = HeaderValue::from_str(&links.join(",")) {
        headers.insert(header::LINK, value);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PageRequest, Sort};

    #[test]
    fn entity_alert_names_action_and_id() {
        let headers = entity_alert("created", 7);
        assert_eq!(headers[&ALERT_HEADER], "notemakerApp.note.created");
        assert_eq!(headers[&PARAMS_HEADER], "7");
    }

    #[test]
    fn failure_alert_carries_error_key() {
        let headers = failure_alert("idexists");
        assert_eq!(headers[&ERROR_HEADER], "error.idexists");
    }

    #[test]
    fn middle_page_links_both_ways() {
        let request = PageRequest::new(1, 2, Sort::default());
        let page = Page::new(vec![3, 4], &request, 5);
        let headers = pagination(&page, "/api/notes");

        assert_eq!(headers[&TOTAL_COUNT_HEADER], "5");
        assert_eq!(
            headers[header::LINK],
            "</api/notes?page=2&size=2>; rel=\"next\",\
             </api/notes?page=0&size=2>; rel=\"prev\",\
             </api/notes?page=2&size=2>; rel=\"last\",\
             </api/notes?page=0&size=2>; rel=\"first\""
        );
    }

    #[test]
    fn empty_collection_links_only_first_and_last() {
        let page: Page<i32> = Page::new(Vec::new(), &PageRequest::default(), 0);
        let headers = pagination(&page, "/api/notes");
        let link = headers[header::LINK].to_str().unwrap();
        assert!(!link.contains("next"));
        assert!(!link.contains("prev"));
        assert!(link.contains("page=0&size=20>; rel=\"last\""));
    }
}

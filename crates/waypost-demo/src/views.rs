//! Demo pages
//!
//! Each view renders a plain-text page from the route that loaded it.

use serde_json::Value;
use std::fmt;
use waypost_core::{Loaded, NavigationDetail, Params};

/// Top-level pages of the demo app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Name,
    Wild,
    Regex,
    Lucky,
    Nested,
    NotFound,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Name => "Name",
            View::Wild => "Wild",
            View::Regex => "Regex",
            View::Lucky => "Lucky",
            View::Nested => "Nested",
            View::NotFound => "NotFound",
        }
    }

    /// Render a loaded route
    ///
    /// `Nested` only renders its frame here; the app fills in the nested
    /// router's page.
    pub fn render(&self, loaded: &Loaded<View>) -> String {
        let detail = &loaded.detail;
        let mut out = match self {
            View::Home => "Home!\nWelcome to the waypost demo.".to_string(),
            View::Name => render_name(&detail.params),
            View::Wild => format!(
                "Wildcard\nMatched: {}",
                detail.params.get("wild").unwrap_or(detail.location.as_str())
            ),
            View::Regex => render_regex(&detail.params),
            View::Lucky => "You're in!\nThe lucky route let you through.".to_string(),
            View::Nested => "Nested router".to_string(),
            View::NotFound => format!("Oops!\nNo page at {}", detail.location),
        };
        if let Some(data) = &detail.user_data {
            out.push_str(&format!("\nRoute data: {data}"));
        }
        out
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn render_name(params: &Params) -> String {
    let first = params.get("first").unwrap_or("stranger");
    match params.get("last") {
        Some(last) => format!("Hi there!\nYour name is: {first} {last}"),
        None => format!("Hi there!\nYour name is: {first}"),
    }
}

fn render_regex(params: &Params) -> String {
    let groups: Vec<&str> = (1..params.len())
        .map(|i| params.group(i).unwrap_or("-"))
        .collect();
    format!("Regex route\nGroups: [{}]", groups.join(", "))
}

/// Page shown when a guard blocks navigation
pub fn render_conditions_failed(detail: &NavigationDetail) -> String {
    let data = detail
        .user_data
        .as_ref()
        .map(Value::to_string)
        .unwrap_or_else(|| "null".to_string());
    format!(
        "Conditions failed\nRoute {} refused {} (data: {data})",
        detail.route, detail.location
    )
}

/// Pages of the router nested under `/nested`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NestedView {
    Home,
    Item,
    NotFound,
}

impl NestedView {
    pub fn render(&self, loaded: &Loaded<NestedView>) -> String {
        let detail = &loaded.detail;
        match self {
            NestedView::Home => "Nested home\nPick an item below /nested.".to_string(),
            NestedView::Item => format!(
                "Nested item\nYou picked: {}",
                detail.params.get("item").unwrap_or("")
            ),
            NestedView::NotFound => format!("Nested: nothing at {}", detail.location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use waypost_core::{Pattern, RouteTable};

    fn loaded(view: View, pattern: &str, path: &str, data: Option<Value>) -> Loaded<View> {
        let table = RouteTable::new().route(Pattern::parse(pattern), ()).unwrap();
        let params = table.find(path).unwrap().params;
        Loaded {
            handler: view,
            props: None,
            detail: NavigationDetail {
                route: pattern.to_string(),
                location: path.to_string(),
                querystring: String::new(),
                user_data: data,
                params,
            },
        }
    }

    #[test]
    fn test_name_view() {
        let l = loaded(View::Name, "/hello/:first/:last?", "/hello/Jane", None);
        assert_eq!(View::Name.render(&l), "Hi there!\nYour name is: Jane");

        let l = loaded(View::Name, "/hello/:first/:last?", "/hello/Jane/Doe", None);
        assert_eq!(View::Name.render(&l), "Hi there!\nYour name is: Jane Doe");
    }

    #[test]
    fn test_wild_view_with_data() {
        let l = loaded(
            View::Wild,
            "/wild/data",
            "/wild/data",
            Some(json!({"hello": "world"})),
        );
        let page = View::Wild.render(&l);
        assert!(page.contains("Matched: /wild/data"));
        assert!(page.ends_with(r#"Route data: {"hello":"world"}"#));
    }

    #[test]
    fn test_regex_view() {
        let table = RouteTable::new()
            .route(Pattern::regex(r"(?i)^/regex/(.*)?").unwrap(), ())
            .unwrap();
        let params = table.find("/regex/abc").unwrap().params;
        assert_eq!(render_regex(&params), "Regex route\nGroups: [abc]");
    }

    #[test]
    fn test_conditions_failed_page() {
        let l = loaded(View::Lucky, "/lucky", "/lucky", Some(json!({"foo": "bar"})));
        let page = render_conditions_failed(&l.detail);
        assert_eq!(
            page,
            "Conditions failed\nRoute /lucky refused /lucky (data: {\"foo\":\"bar\"})"
        );
    }
}

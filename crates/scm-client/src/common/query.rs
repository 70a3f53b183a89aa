//! Pagination for list endpoints
//!
//! SCM list endpoints page with `limit`/`offset`. The paginator keeps asking
//! for the next page until one comes back shorter than the requested limit.
//! A total that is an exact multiple of the limit therefore costs one extra
//! round trip for the final empty page.

use serde_json::Value;
use tracing::debug;

use crate::common::scope::Scope;
use crate::error::{ConfigIssue, ScmError};
use crate::transport::HttpTransport;

/// Page size used when a service is not configured otherwise
pub const DEFAULT_MAX_LIMIT: u32 = 2500;

/// Largest page size the API accepts
pub const ABSOLUTE_MAX_LIMIT: u32 = 5000;

/// A validated page size in `1..=ABSOLUTE_MAX_LIMIT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxLimit(u32);

impl MaxLimit {
    pub fn new(value: i64) -> Result<Self, ScmError> {
        if value < 1 {
            return Err(ScmError::invalid_configuration(
                "max_limit",
                ConfigIssue::BelowMinimum,
                format!("{value} must be greater than 0"),
            ));
        }
        if value > i64::from(ABSOLUTE_MAX_LIMIT) {
            return Err(ScmError::invalid_configuration(
                "max_limit",
                ConfigIssue::AboveMaximum,
                format!("{value} exceeds the maximum allowed limit of {ABSOLUTE_MAX_LIMIT}"),
            ));
        }
        u32::try_from(value).map(Self).map_err(|_| {
            ScmError::invalid_configuration(
                "max_limit",
                ConfigIssue::InvalidType,
                value.to_string(),
            )
        })
    }

    /// Parse a textual setting, e.g. from an environment variable
    pub fn parse(raw: &str) -> Result<Self, ScmError> {
        let value: i64 = raw.trim().parse().map_err(|_| {
            ScmError::invalid_configuration(
                "max_limit",
                ConfigIssue::InvalidType,
                format!("'{raw}' is not an integer"),
            )
        })?;
        Self::new(value)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for MaxLimit {
    fn default() -> Self {
        Self(DEFAULT_MAX_LIMIT)
    }
}

/// How list items without an `id` are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingIdPolicy {
    /// Decode every item as-is; the model decides whether `id` is required
    #[default]
    Decode,
    /// Items without `id` are server-supplied predefined entries; keep them
    AllowPredefined,
    /// Items without `id` make the whole response malformed
    Reject,
}

/// One bounded page request; the offset advances by `limit` per page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u32,
    pub offset: u64,
}

impl PageRequest {
    fn params(&self, scope: &Scope) -> Vec<(&'static str, String)> {
        vec![
            scope.query_param(),
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ]
    }

    fn advance(&mut self) {
        self.offset += u64::from(self.limit);
    }
}

/// Drives repeated list requests against one endpoint
pub struct Paginator<'a> {
    transport: &'a dyn HttpTransport,
    endpoint: &'a str,
    resource: &'a str,
    limit: MaxLimit,
    missing_id: MissingIdPolicy,
}

impl<'a> Paginator<'a> {
    pub fn new(transport: &'a dyn HttpTransport, endpoint: &'a str, limit: MaxLimit) -> Self {
        Self {
            transport,
            endpoint,
            resource: "object",
            limit,
            missing_id: MissingIdPolicy::Decode,
        }
    }

    /// Resource name used in log lines
    #[must_use]
    pub fn resource(mut self, resource: &'a str) -> Self {
        self.resource = resource;
        self
    }

    #[must_use]
    pub fn missing_id_policy(mut self, policy: MissingIdPolicy) -> Self {
        self.missing_id = policy;
        self
    }

    /// Fetch every page for `scope`, decoding items in arrival order
    pub async fn paginate<T, F>(&self, scope: &Scope, mut decode: F) -> Result<Vec<T>, ScmError>
    where
        F: FnMut(Value) -> Result<T, ScmError>,
    {
        let mut page = PageRequest {
            limit: self.limit.get(),
            offset: 0,
        };
        let mut all_results = Vec::new();

        loop {
            debug!(
                "Fetching {} page: {} {} limit={} offset={}",
                self.resource, self.endpoint, scope, page.limit, page.offset
            );

            let response = self
                .transport
                .get(self.endpoint, &page.params(scope))
                .await?;
            let items = page_items(response)?;
            let received = items.len();

            for item in items {
                all_results.push(self.decode_item(item, &mut decode)?);
            }

            if received < page.limit as usize {
                break;
            }
            page.advance();
        }

        debug!(
            "Fetched {} {} object(s) from {}",
            all_results.len(),
            self.resource,
            self.endpoint
        );
        Ok(all_results)
    }

    fn decode_item<T, F>(&self, item: Value, decode: &mut F) -> Result<T, ScmError>
    where
        F: FnMut(Value) -> Result<T, ScmError>,
    {
        if item.get("id").is_none() {
            match self.missing_id {
                MissingIdPolicy::Reject => {
                    return Err(ScmError::MalformedResponse(format!(
                        "{} list item is missing the 'id' field",
                        self.resource
                    )));
                }
                MissingIdPolicy::AllowPredefined => {
                    let name = item
                        .get("name")
                        .and_then(serde_json::Value::as_str)
                        .unwrap_or("<unnamed>");
                    debug!("Keeping predefined {} without id: {}", self.resource, name);
                }
                MissingIdPolicy::Decode => {}
            }
        }
        decode(item)
    }
}

/// Pull the `data` array out of one list page
fn page_items(response: Value) -> Result<Vec<Value>, ScmError> {
    let Value::Object(mut map) = response else {
        return Err(ScmError::MalformedResponse(
            "list response is not a JSON object".to_string(),
        ));
    };
    match map.remove("data") {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(ScmError::MalformedResponse(
            "list response 'data' field is not a list".to_string(),
        )),
        None => Err(ScmError::MalformedResponse(
            "list response is missing the 'data' field".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockTransport, RequestMethod};
    use serde_json::json;

    fn items(start: usize, count: usize) -> Vec<Value> {
        (start..start + count)
            .map(|i| {
                json!({"id": format!("id-{i}"), "name": format!("obj-{i}"), "folder": "Texas"})
            })
            .collect()
    }

    fn names(values: &[Value]) -> Vec<String> {
        values
            .iter()
            .map(|v| v["name"].as_str().unwrap().to_string())
            .collect()
    }

    fn folder() -> Scope {
        Scope::Folder("Texas".to_string())
    }

    fn limit(value: i64) -> MaxLimit {
        MaxLimit::new(value).unwrap()
    }

    fn offsets(mock: &MockTransport) -> Vec<String> {
        mock.requests()
            .iter()
            .filter(|r| r.method == RequestMethod::Get)
            .map(|r| r.param("offset").unwrap_or_default().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_pages_until_short_page() {
        let mock = MockTransport::new();
        mock.push_page(items(0, 2));
        mock.push_page(items(2, 2));
        mock.push_page(items(4, 1));

        let result = Paginator::new(&mock, "/config/objects/v1/addresses", limit(2))
            .paginate(&folder(), Ok)
            .await
            .unwrap();

        assert_eq!(
            names(&result),
            vec!["obj-0", "obj-1", "obj-2", "obj-3", "obj-4"]
        );
        assert_eq!(offsets(&mock), vec!["0", "2", "4"]);

        let first = &mock.requests()[0];
        assert_eq!(first.path, "/config/objects/v1/addresses");
        assert_eq!(first.param("folder"), Some("Texas"));
        assert_eq!(first.param("limit"), Some("2"));
    }

    #[tokio::test]
    async fn test_exact_multiple_needs_empty_page() {
        let mock = MockTransport::new();
        mock.push_page(items(0, 3));
        mock.push_page(vec![]);

        let result = Paginator::new(&mock, "/x", limit(3))
            .paginate(&folder(), Ok)
            .await
            .unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(offsets(&mock), vec!["0", "3"]);
    }

    #[tokio::test]
    async fn test_single_short_page() {
        let mock = MockTransport::new();
        mock.push_page(items(0, 4));

        let result = Paginator::new(&mock, "/x", limit(5))
            .paginate(&folder(), Ok)
            .await
            .unwrap();

        assert_eq!(result.len(), 4);
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_page_size_is_the_validated_limit() {
        let mock = MockTransport::new();
        mock.push_page(vec![]);

        Paginator::new(&mock, "/x", MaxLimit::new(5000).unwrap())
            .paginate(&folder(), Ok)
            .await
            .unwrap();
        assert_eq!(mock.requests()[0].param("limit"), Some("5000"));

        // Out-of-range sizes never reach a paginator
        assert!(MaxLimit::new(5001).is_err());
        assert!(MaxLimit::new(0).is_err());
    }

    #[tokio::test]
    async fn test_malformed_pages() {
        for response in [
            json!(["not", "a", "map"]),
            json!({"total": 0}),
            json!({"data": "nope"}),
        ] {
            let mock = MockTransport::new();
            mock.push_response(response);
            let err = Paginator::new(&mock, "/x", limit(10))
                .paginate(&folder(), Ok)
                .await
                .unwrap_err();
            assert!(matches!(err, ScmError::MalformedResponse(_)), "got {err:?}");
        }
    }

    #[tokio::test]
    async fn test_malformed_second_page_discards_everything() {
        let mock = MockTransport::new();
        mock.push_page(items(0, 2));
        mock.push_response(json!({"unexpected": true}));

        let result = Paginator::new(&mock, "/x", limit(2))
            .paginate(&folder(), Ok)
            .await;
        assert!(matches!(result, Err(ScmError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_missing_id_policies() {
        let page = vec![
            json!({"id": "a", "name": "one"}),
            json!({"name": "predefined-app"}),
        ];

        let mock = MockTransport::new();
        mock.push_page(page.clone());
        let err = Paginator::new(&mock, "/x", limit(10))
            .missing_id_policy(MissingIdPolicy::Reject)
            .paginate(&folder(), Ok)
            .await
            .unwrap_err();
        assert!(matches!(err, ScmError::MalformedResponse(_)));

        for policy in [MissingIdPolicy::AllowPredefined, MissingIdPolicy::Decode] {
            let mock = MockTransport::new();
            mock.push_page(page.clone());
            let result = Paginator::new(&mock, "/x", limit(10))
                .missing_id_policy(policy)
                .paginate(&folder(), Ok)
                .await
                .unwrap();
            assert_eq!(result.len(), 2);
        }
    }

    #[tokio::test]
    async fn test_predefined_items_without_name_are_kept() {
        let mock = MockTransport::new();
        mock.push_page(vec![json!({"category": "networking"}), json!({"name": "dns"})]);

        let result = Paginator::new(&mock, "/x", limit(10))
            .resource("application")
            .missing_id_policy(MissingIdPolicy::AllowPredefined)
            .paginate(&folder(), Ok)
            .await
            .unwrap();

        assert_eq!(result[0]["category"], "networking");
        assert_eq!(result[1]["name"], "dns");
    }

    #[tokio::test]
    async fn test_decode_failure_propagates() {
        let mock = MockTransport::new();
        mock.push_page(items(0, 1));

        let err = Paginator::new(&mock, "/x", limit(10))
            .paginate(&folder(), |v| {
                serde_json::from_value::<u32>(v).map_err(ScmError::from)
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ScmError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_transport_error_is_not_retried() {
        let mock = MockTransport::new();
        mock.push_error(ScmError::NotFound("boom".to_string()));

        let err = Paginator::new(&mock, "/x", limit(10))
            .paginate(&folder(), Ok)
            .await
            .unwrap_err();
        assert!(matches!(err, ScmError::NotFound(_)));
        assert_eq!(mock.requests().len(), 1);
    }

    #[test]
    fn test_max_limit_bounds() {
        assert_eq!(MaxLimit::new(1).unwrap().get(), 1);
        assert_eq!(MaxLimit::new(5000).unwrap().get(), 5000);
        assert_eq!(MaxLimit::default().get(), DEFAULT_MAX_LIMIT);

        let issue = |r: Result<MaxLimit, ScmError>| match r {
            Err(ScmError::InvalidConfiguration { issue, .. }) => issue,
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        };
        assert_eq!(issue(MaxLimit::new(0)), ConfigIssue::BelowMinimum);
        assert_eq!(issue(MaxLimit::new(-1)), ConfigIssue::BelowMinimum);
        assert_eq!(issue(MaxLimit::new(5001)), ConfigIssue::AboveMaximum);
        assert_eq!(issue(MaxLimit::parse("abc")), ConfigIssue::InvalidType);
        assert_eq!(MaxLimit::parse(" 250 ").unwrap().get(), 250);
    }
}

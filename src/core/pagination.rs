//! Page-by-page accumulation of search results
//!
//! The server answers its search endpoints one page at a time and reports the
//! size of the whole result set in every page. [`PaginatedFetch`] walks the
//! pages from 1 upwards until `page * page_size` reaches that total, optionally
//! clamped to a hard cap.

use crate::api::client::RemoteResource;
use crate::error::{ApiError, AppError, ConfigError};
use crate::utils::error_helpers::{convert_body_error, protocol_error};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Items accumulated across every page of one logical query.
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    /// `total` as reported by the last page, before any cap.
    pub reported_total: u64,
    pub pages: u32,
    /// The reported total exceeded the cap; `items` is incomplete.
    pub overflow: bool,
}

pub struct PaginatedFetch<'a> {
    client: &'a dyn RemoteResource,
    page_size: u32,
    cap: Option<u64>,
    label: &'static str,
}

impl<'a> PaginatedFetch<'a> {
    pub fn new(client: &'a dyn RemoteResource, page_size: u32, label: &'static str) -> Self {
        Self {
            client,
            page_size,
            cap: None,
            label,
        }
    }

    pub fn with_cap(mut self, cap: u64) -> Self {
        self.cap = Some(cap);
        self
    }

    /// Fetch every page and concatenate what `decode_page` extracts from each.
    ///
    /// `url_for_page` receives `(page, page_size)`, pages starting at 1.
    /// `decode_page` sees one page body at a time, so anything it joins stays
    /// scoped to that page. The first failing page aborts the whole fetch.
    pub async fn run<T, U, D>(
        &self,
        mut url_for_page: U,
        mut decode_page: D,
    ) -> Result<Paged<T>, AppError>
    where
        U: FnMut(u32, u32) -> Result<String, AppError>,
        D: FnMut(&str, Value) -> Result<Vec<T>, ApiError>,
    {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "requests.page_size".to_string(),
                value: "0".to_string(),
                reason: "page size must be greater than 0".to_string(),
            }
            .into());
        }

        let page_size = u64::from(self.page_size);
        let mut items = Vec::new();
        let mut page: u32 = 1;
        let mut overflow = false;

        let reported_total = loop {
            let url = url_for_page(page, self.page_size)?;
            let body = self.client.get_json(&url).await?;
            let reported = read_total(&body, &url)?;

            let page_items = decode_page(&url, body)?;
            log::debug!(
                "{}: page {} returned {} item(s), total {}",
                self.label,
                page,
                page_items.len(),
                reported
            );
            items.extend(page_items);

            let mut total = reported;
            if let Some(cap) = self.cap
                && total > cap
            {
                total = cap;
                overflow = true;
            }

            if u64::from(page) * page_size >= total {
                break reported;
            }
            page = next_page(page, reported, &url)?;
        };

        if overflow && let Some(cap) = self.cap {
            items.truncate(usize::try_from(cap).unwrap_or(usize::MAX));
            log::warn!(
                "{}: the server holds {} results but only the first {} can be retrieved; the report is incomplete",
                self.label,
                reported_total,
                cap
            );
        }

        Ok(Paged {
            items,
            reported_total,
            pages: page,
            overflow,
        })
    }
}

fn next_page(page: u32, reported_total: u64, url: &str) -> Result<u32, ApiError> {
    page.checked_add(1).ok_or_else(|| {
        protocol_error(
            url,
            format!(
                "total of {} needs more pages than can be requested",
                reported_total
            ),
        )
    })
}

/// Read the result-set size from a page body.
///
/// Older servers put it at the top level, newer ones under `paging`.
pub fn read_total(body: &Value, url: &str) -> Result<u64, ApiError> {
    body.get("total")
        .and_then(Value::as_u64)
        .or_else(|| body.pointer("/paging/total").and_then(Value::as_u64))
        .ok_or_else(|| protocol_error(url, "response has no `total` count"))
}

/// Decode the array stored under `field`, which must be present.
pub fn take_array<T: DeserializeOwned>(
    body: &mut Value,
    field: &str,
    url: &str,
) -> Result<Vec<T>, ApiError> {
    match body.get_mut(field).map(Value::take) {
        Some(value @ Value::Array(_)) => {
            serde_json::from_value(value).map_err(|e| convert_body_error(e, url))
        }
        Some(_) => Err(protocol_error(url, format!("`{}` is not an array", field))),
        None => Err(protocol_error(url, format!("response has no `{}` array", field))),
    }
}

/// Decode the array stored under `field`, treating absence as empty.
pub fn take_optional_array<T: DeserializeOwned>(
    body: &mut Value,
    field: &str,
    url: &str,
) -> Result<Vec<T>, ApiError> {
    if matches!(body.get(field), None | Some(Value::Null)) {
        return Ok(Vec::new());
    }
    take_array(body, field, url)
}

use serde::{Deserialize, Serialize};

/// Pagination parameters for a single page-aware statement.
///
/// Travels through the statement's bound parameters. When `need_count` is
/// set, the interceptor fills `total_count` in place before the windowed
/// query runs; the request is then handed to [`PageResult::from_request`].
///
/// A request is owned by one statement execution and must not be shared
/// across concurrent executions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// 1-based page index.
    pub page_num: u32,
    /// Rows per page.
    pub page_size: u32,
    /// Defaults to `true` when absent from deserialized input, so a request
    /// without the flag is counted. Callers that only want the probe row
    /// must send `needCount: false` explicitly.
    #[serde(default = "default_need_count")]
    pub need_count: bool,
    /// Written by the count step; `None` until then.
    #[serde(default)]
    pub total_count: Option<u64>,
}

fn default_need_count() -> bool {
    true
}

impl PageRequest {
    /// A request for `page_num` that also counts the total number of rows.
    pub fn new(page_num: u32, page_size: u32) -> Self {
        Self {
            page_num,
            page_size,
            need_count: true,
            total_count: None,
        }
    }

    /// A request that skips the count query and probes one extra row instead.
    pub fn without_count(page_num: u32, page_size: u32) -> Self {
        Self::new(page_num, page_size).with_count(false)
    }

    pub fn with_count(mut self, need_count: bool) -> Self {
        self.need_count = need_count;
        self
    }

    /// `page_num >= 1 && page_size >= 1`.
    pub fn is_valid(&self) -> bool {
        self.page_num >= 1 && self.page_size >= 1
    }
}

/// A page of rows together with its pagination metadata.
///
/// `total_count` and `total_page_num` are only computed when the request
/// asked for a count; otherwise both are 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub total_count: u64,
    pub cur_page_num: u32,
    pub total_page_num: u32,
    pub first: bool,
    pub last: bool,
    pub list: Vec<T>,
}

impl<T> PageResult<T> {
    /// Assemble a page from the (intercepted) request and the raw rows the
    /// windowed query returned.
    ///
    /// Without a count, the rows may hold one over-fetched probe row. It is
    /// dropped, and `last` is set when it was present.
    pub fn from_request(request: &PageRequest, mut rows: Vec<T>) -> Self {
        let cur_page_num = request.page_num;
        let first = cur_page_num == 1;

        if request.need_count {
            let total_count = request.total_count.unwrap_or(0);
            let total_page_num = total_page_num(total_count, request.page_size);
            return Self {
                total_count,
                cur_page_num,
                total_page_num,
                first,
                last: cur_page_num >= total_page_num,
                list: rows,
            };
        }

        let page_size = request.page_size as usize;
        let probed = rows.len() > page_size;
        if probed {
            rows.truncate(page_size);
        }
        Self {
            total_count: 0,
            cur_page_num,
            total_page_num: 0,
            first,
            last: probed,
            list: rows,
        }
    }

    /// Convert the rows, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            total_count: self.total_count,
            cur_page_num: self.cur_page_num,
            total_page_num: self.total_page_num,
            first: self.first,
            last: self.last,
            list: self.list.into_iter().map(f).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

/// Number of pages for `total_count` rows.
///
/// A partial trailing page is only counted when more than one row is left
/// over, so a remainder of exactly 1 does not add a page.
fn total_page_num(total_count: u64, page_size: u32) -> u32 {
    if total_count == 0 || page_size == 0 {
        return 1;
    }
    let page_size = u64::from(page_size);
    let mut pages = total_count / page_size;
    if total_count % page_size > 1 {
        pages += 1;
    }
    u32::try_from(pages).unwrap_or(u32::MAX)
}

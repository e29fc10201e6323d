//! Page slicer and page cursor.

use std::num::NonZeroUsize;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const MAX_CURSOR_TOKEN_LEN: usize = 128;

/// Current page position of a view. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCursor {
    current_page: usize,
    page_size: NonZeroUsize,
}

impl PageCursor {
    /// Build a cursor. A zero page size is rejected; page 0 is read as page 1.
    pub fn new(current_page: usize, page_size: usize) -> Result<Self, ValidationError> {
        let page_size = NonZeroUsize::new(page_size)
            .ok_or_else(|| ValidationError::new("pageSize", "must be greater than zero"))?;
        Ok(Self {
            current_page: current_page.max(1),
            page_size,
        })
    }

    /// First page with the given size.
    pub fn first(page_size: NonZeroUsize) -> Self {
        Self {
            current_page: 1,
            page_size,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Move to `page`; page 0 is read as page 1. Not clamped from above
    /// until the next derivation knows the filtered count.
    pub fn go_to(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.page_size = page_size;
        self.current_page = 1;
    }

    /// Clamp the current page into `[1, total_pages(len)]`.
    pub fn clamp_to(&mut self, len: usize) {
        let last = total_pages(len, self.page_size());
        self.current_page = self.current_page.clamp(1, last);
    }

    /// Encode the cursor as an opaque, URL-safe token.
    pub fn to_token(&self) -> String {
        let payload = format!("{}:{}", self.current_page, self.page_size);
        URL_SAFE_NO_PAD.encode(payload.as_bytes())
    }

    /// Decode a token produced by `to_token`.
    pub fn from_token(token: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::new("cursor", "malformed page cursor");
        if token.is_empty() || token.len() > MAX_CURSOR_TOKEN_LEN {
            return Err(invalid());
        }
        let bytes = URL_SAFE_NO_PAD.decode(token).map_err(|_| invalid())?;
        let payload = String::from_utf8(bytes).map_err(|_| invalid())?;
        let (page, size) = payload.split_once(':').ok_or_else(invalid)?;
        let page = page.parse::<usize>().map_err(|_| invalid())?;
        let size = size.parse::<usize>().map_err(|_| invalid())?;
        if page == 0 {
            return Err(invalid());
        }
        Self::new(page, size)
    }
}

/// Number of pages needed for `len` records; never less than 1.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

/// The records visible on the cursor's page.
///
/// A start offset past the end yields an empty slice rather than an error.
pub fn slice_page<'a, T>(records: &'a [T], cursor: &PageCursor) -> &'a [T] {
    let start = (cursor.current_page() - 1).saturating_mul(cursor.page_size());
    if start >= records.len() {
        return &[];
    }
    let end = start.saturating_add(cursor.page_size()).min(records.len());
    &records[start..end]
}

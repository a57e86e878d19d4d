//! Query-string parameters shared by listing endpoints.

use serde::Deserialize;

use crate::domain::foundation::ValidationError;
use crate::domain::read_model::PageRequest;

/// `?page=&limit=` as sent by the client.
///
/// Kept as text so a non-numeric value is reported as a 400 with the
/// offending field instead of axum's generic query rejection.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageParams {
    pub fn request(&self) -> Result<PageRequest, ValidationError> {
        PageRequest::parse(self.page.as_deref(), self.limit.as_deref())
    }
}

//! Contact query ("Contact us") model and DTOs.

use alumni_core::error::CoreError;
use alumni_core::inquiry::validate_inquiry;
use alumni_core::registration::normalize_email;
use alumni_core::submission::normalize_identity;
use alumni_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `contact_queries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Inquiry {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub is_resolved: bool,
    pub resolved_by: Option<DbId>,
    pub resolved_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /queries`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInquiry {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl CreateInquiry {
    /// Return a trimmed, lower-cased-email copy, rejecting invalid input.
    pub fn normalized(&self) -> Result<Self, CoreError> {
        let inquiry = Self {
            name: normalize_identity(&self.name),
            email: normalize_email(&self.email),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        };
        validate_inquiry(&inquiry.name, &inquiry.email, &inquiry.subject, &inquiry.message)?;
        Ok(inquiry)
    }
}

/// Query parameters for listing contact queries.
#[derive(Debug, Deserialize)]
pub struct InquiryListParams {
    pub resolved: Option<bool>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

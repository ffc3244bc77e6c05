//! Error types for the management API client.
//!
//! # Design
//! Errors fall into two groups. Local validation errors (missing version,
//! missing identifiers, draft links) are raised while a request is being
//! built, so no network call ever happens for them. Network errors
//! (`NotFound`, `Http`, `Transport`) carry the method and URL of the request
//! that failed. Malformed responses surface as `Deserialization` instead of
//! a partially populated value.

use std::fmt;

use thiserror::Error;

use crate::http::{HttpMethod, HttpRequest};

/// Message of the error raised when a link points at an entry without an id.
pub const DRAFT_LINK_MESSAGE: &str = "Entry contains link to draft resource (has no ID).";

/// Result type for client operations.
pub type CmaResult<T> = Result<T, CmaError>;

/// Method and URL of the request an error belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub method: HttpMethod,
    pub url: String,
}

impl fmt::Display for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

impl From<&HttpRequest> for RequestContext {
    fn from(request: &HttpRequest) -> Self {
        Self {
            method: request.method,
            url: request.url.clone(),
        }
    }
}

/// Errors returned by request builders, parsers and calls.
#[derive(Debug, Error)]
pub enum CmaError {
    /// An operation that needs `sys.version` was given a resource without one.
    #[error("cannot {operation}: resource has no sys.version")]
    MissingVersion { operation: &'static str },

    #[error("cannot {operation}: resource has no space id")]
    MissingSpaceId { operation: &'static str },

    #[error("cannot {operation}: resource has no id")]
    MissingId { operation: &'static str },

    #[error("missing required attribute: {0}")]
    MissingAttribute(&'static str),

    /// A field value links to an entry that has not been assigned an id.
    #[error("Entry contains link to draft resource (has no ID).")]
    DraftLink,

    #[error("content type already has a field with id {0:?}")]
    DuplicateField(String),

    /// The server returned 404.
    #[error("resource not found{}", describe(.context))]
    NotFound { context: Option<RequestContext> },

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}{}: {body}", describe(.context))]
    Http {
        status: u16,
        body: String,
        context: Option<RequestContext>,
    },

    /// The request never produced a response.
    #[error("transport failure for {context}: {message}")]
    Transport {
        context: RequestContext,
        message: String,
    },

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The background worker pool is no longer accepting work.
    #[error("callback dispatch failed: {0}")]
    Dispatch(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

fn describe(context: &Option<RequestContext>) -> String {
    context
        .as_ref()
        .map(|ctx| format!(" ({ctx})"))
        .unwrap_or_default()
}

impl CmaError {
    pub fn transport(request: &HttpRequest, message: impl Into<String>) -> Self {
        CmaError::Transport {
            context: request.into(),
            message: message.into(),
        }
    }

    /// True for errors raised before any network attempt.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            CmaError::MissingVersion { .. }
                | CmaError::MissingSpaceId { .. }
                | CmaError::MissingId { .. }
                | CmaError::MissingAttribute(_)
                | CmaError::DraftLink
                | CmaError::DuplicateField(_)
                | CmaError::Serialization(_)
                | CmaError::Config(_)
        )
    }

    /// HTTP status of a server-side failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            CmaError::NotFound { .. } => Some(404),
            CmaError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Attach the request a status error belongs to. Other variants pass
    /// through unchanged.
    pub(crate) fn with_context(self, request: &HttpRequest) -> Self {
        match self {
            CmaError::NotFound { context: None } => CmaError::NotFound {
                context: Some(request.into()),
            },
            CmaError::Http {
                status,
                body,
                context: None,
            } => CmaError::Http {
                status,
                body,
                context: Some(request.into()),
            },
            other => other,
        }
    }
}

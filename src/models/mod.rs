//! Shared API model types

use serde::{Deserialize, Serialize};

/// Standard API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Pagination parameters
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationParams {
    /// Resolve skip/limit with the defaults the API documents (0 / 100)
    pub fn resolve(&self) -> (i64, i64) {
        let skip = self.skip.unwrap_or(0).max(0);
        let limit = self.limit.unwrap_or(100).clamp(1, 500);
        (skip, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let params = PaginationParams {
            skip: None,
            limit: None,
        };
        assert_eq!(params.resolve(), (0, 100));
    }

    #[test]
    fn test_pagination_clamps() {
        let params = PaginationParams {
            skip: Some(-5),
            limit: Some(10_000),
        };
        assert_eq!(params.resolve(), (0, 500));
    }
}

// src/api/parser.rs
//! Response parsing.
//!
//! Success bodies are decoded with serde (blocks through notion-client's
//! types); error bodies are decoded as Notion error objects, falling back to
//! the bare HTTP status.

use super::client::ApiResponse;
use super::responses::{NotionError, PaginatedResponse, QueryResult, RetrieveBlockChildrenResponse};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionClientError, NotionErrorCode};
use crate::model::Block;
use reqwest::StatusCode;

/// Parse any Notion API response, routing error statuses to the error decoder.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success_body(&result.data, &result.url)
    } else {
        parse_error_body(&result.data, result.status, &result.url)
    }
}

fn parse_success_body<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        NotionClientError::Deserialization {
            source: e,
            body: preview(body),
        }
        .into()
    })
}

fn parse_error_body<T>(body: &str, status: StatusCode, url: &str) -> Result<T, AppError> {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        log::debug!(
            "Notion error from {}: {} (request {:?})",
            url,
            notion_error.code,
            notion_error.request_id
        );
        return Err(AppError::NotionService {
            code: NotionErrorCode::from_api_response(&notion_error.code),
            message: notion_error.message,
            status,
        });
    }

    Err(AppError::NotionService {
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}", status, url),
        status,
    })
}

/// Truncates a body for error messages without splitting a UTF-8 character.
fn preview(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// Parse one page of database query results.
pub fn parse_query_response(result: ApiResponse<String>) -> Result<QueryResult, AppError> {
    parse_api_response(result)
}

/// Parse one page of block children into the domain block model.
pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, AppError> {
    let response: RetrieveBlockChildrenResponse = parse_api_response(result)?;
    response.try_map(super::notion_client_adapter::convert_block)
}

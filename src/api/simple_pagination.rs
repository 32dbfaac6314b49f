// src/api/simple_pagination.rs
//! Cursor pagination over list endpoints.

use super::responses::PaginatedResponse;
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;

/// Fetches pages until the cursor runs out, concatenating results in order.
pub async fn fetch_all_pages_simple<T, F, Fut>(mut fetch_fn: F) -> Result<Vec<T>, AppError>
where
    F: FnMut(u32, Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut all_items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;

    loop {
        let response = fetch_fn(NOTION_API_PAGE_SIZE, cursor).await?;

        let has_more = response.has_more;
        cursor = response.next_cursor;
        all_items.extend(response.results);
        pages_fetched += 1;

        if !has_more || cursor.is_none() {
            break;
        }
    }

    if pages_fetched > 1 {
        log::debug!("Fetched {} pages ({} items)", pages_fetched, all_items.len());
    }

    Ok(all_items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn page(items: Vec<u32>, next: Option<&str>) -> PaginatedResponse<u32> {
        PaginatedResponse {
            object: "list".to_string(),
            results: items,
            next_cursor: next.map(str::to_string),
            has_more: next.is_some(),
        }
    }

    #[tokio::test]
    async fn follows_cursor_to_the_end() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();

        let items = fetch_all_pages_simple(move |page_size, cursor: Option<String>| {
            recorder.lock().unwrap().push((page_size, cursor.clone()));
            async move {
                Ok(match cursor.as_deref() {
                    None => page(vec![1, 2], Some("c1")),
                    Some("c1") => page(vec![3], Some("c2")),
                    _ => page(vec![4], None),
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2, 3, 4]);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|(size, _)| *size == 100));
        assert_eq!(seen[2].1.as_deref(), Some("c2"));
    }

    #[tokio::test]
    async fn single_page_without_cursor_is_one_request() {
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();

        let items = fetch_all_pages_simple(move |_, _| {
            *counter.lock().unwrap() += 1;
            async { Ok(page(vec![5, 6], None)) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![5, 6]);
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn errors_stop_the_loop() {
        let result: Result<Vec<u32>, AppError> = fetch_all_pages_simple(|_, cursor| async move {
            match cursor {
                None => Ok(page(vec![1], Some("c1"))),
                Some(_) => Err(AppError::MalformedResponse("truncated".to_string())),
            }
        })
        .await;

        assert!(matches!(result, Err(AppError::MalformedResponse(_))));
    }
}

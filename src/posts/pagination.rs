// src/posts/pagination.rs
//! Page arithmetic over an in-memory post list.

use crate::types::ValidationError;

/// A validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: usize,
    page_size: usize,
}

impl PageRequest {
    /// Both values must be at least 1.
    pub fn new(page_number: usize, page_size: usize) -> Result<Self, ValidationError> {
        if page_number == 0 {
            return Err(ValidationError::OutOfBounds {
                name: "page_number",
                value: page_number,
                min: 1,
            });
        }
        Ok(Self {
            page_number,
            page_size: checked_page_size(page_size)?,
        })
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Items `[(n-1)*size, n*size)`, clamped to `items`. Pages past the end are empty.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page_number - 1)
            .saturating_mul(self.page_size)
            .min(items.len());
        let end = self
            .page_number
            .saturating_mul(self.page_size)
            .min(items.len());
        &items[start..end]
    }
}

pub fn checked_page_size(page_size: usize) -> Result<usize, ValidationError> {
    if page_size == 0 {
        return Err(ValidationError::OutOfBounds {
            name: "page_size",
            value: page_size,
            min: 1,
        });
    }
    Ok(page_size)
}

/// Number of pages needed for `len` items; 0 for an empty list.
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len / page_size + usize::from(len % page_size > 0)
}

/// The first `count` items, or all of them when there are fewer.
pub fn top<T>(items: &[T], count: usize) -> &[T] {
    &items[..count.min(items.len())]
}

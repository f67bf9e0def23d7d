//! Page window over an ordered sequence.
//!
//! # Invariants
//! - `index` is 0-based; `number()` is the 1-based value shown to callers.
//! - `size` is never zero, so `total_pages()` is always defined.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validated 1-indexed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: u32,
    size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequestError {
    ZeroPageNumber,
    ZeroPageSize,
}

impl Display for PageRequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroPageNumber => write!(f, "page number starts at 1"),
            Self::ZeroPageSize => write!(f, "page size must be at least 1"),
        }
    }
}

impl Error for PageRequestError {}

impl PageRequest {
    pub fn new(number: u32, size: u32) -> Result<Self, PageRequestError> {
        if number == 0 {
            return Err(PageRequestError::ZeroPageNumber);
        }
        if size == 0 {
            return Err(PageRequestError::ZeroPageSize);
        }
        Ok(Self { number, size })
    }

    /// 1-based page number.
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// 0-based page index.
    pub fn index(&self) -> u32 {
        self.number - 1
    }

    /// Position of the first item of this page in the full sequence.
    pub fn offset(&self) -> usize {
        self.index() as usize * self.size as usize
    }
}

/// One page of items plus the metadata needed to render paging links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    items: Vec<T>,
    index: u32,
    size: u32,
    total_elements: usize,
}

impl<T> Page<T> {
    pub(crate) fn new(items: Vec<T>, request: PageRequest, total_elements: usize) -> Self {
        Self {
            items,
            index: request.index(),
            size: request.size(),
            total_elements,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn number(&self) -> u32 {
        self.index + 1
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn total_elements(&self) -> usize {
        self.total_elements
    }

    /// `ceil(total_elements / size)`; zero for an empty sequence.
    pub fn total_pages(&self) -> u32 {
        let size = self.size as usize;
        let pages = self.total_elements.div_ceil(size);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.number() < self.total_pages()
    }

    /// Page numbers for paging links, `1..=total_pages`.
    pub fn page_numbers(&self) -> Vec<u32> {
        (1..=self.total_pages()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Page, PageRequest, PageRequestError};

    #[test]
    fn request_rejects_zero_number_and_size() {
        assert_eq!(PageRequest::new(0, 10), Err(PageRequestError::ZeroPageNumber));
        assert_eq!(PageRequest::new(1, 0), Err(PageRequestError::ZeroPageSize));
    }

    #[test]
    fn request_offset_is_zero_based() {
        let request = PageRequest::new(3, 10).expect("valid request");
        assert_eq!(request.index(), 2);
        assert_eq!(request.offset(), 20);
    }

    #[test]
    fn total_pages_rounds_up() {
        let request = PageRequest::new(1, 10).expect("valid request");
        let page: Page<u8> = Page::new(Vec::new(), request, 28);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.page_numbers(), vec![1, 2, 3]);
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn empty_sequence_has_no_pages() {
        let request = PageRequest::new(1, 10).expect("valid request");
        let page: Page<u8> = Page::new(Vec::new(), request, 0);
        assert_eq!(page.total_pages(), 0);
        assert!(page.page_numbers().is_empty());
        assert!(!page.has_next());
    }
}

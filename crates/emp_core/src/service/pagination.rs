//! In-memory pagination over an already fetched sequence.
//!
//! Pagination never reaches the database: callers fetch the full ordered
//! list first, filter it if needed, then slice it here.

use crate::model::page::{Page, PageRequest};

/// Cuts the window for `request` out of `all`.
///
/// An offset at or past the end yields an empty page; the total element
/// count is preserved either way.
pub fn paginate<T>(all: Vec<T>, request: PageRequest) -> Page<T> {
    let total = all.len();
    let offset = request.offset();

    if offset >= total {
        return Page::new(Vec::new(), request, total);
    }

    let items = all
        .into_iter()
        .skip(offset)
        .take(request.size() as usize)
        .collect();
    Page::new(items, request, total)
}

#[cfg(test)]
mod tests {
    use super::paginate;
    use crate::model::page::PageRequest;

    fn request(number: u32, size: u32) -> PageRequest {
        PageRequest::new(number, size).expect("valid page request")
    }

    #[test]
    fn twenty_five_items_in_pages_of_ten() {
        let all: Vec<u32> = (0..25).collect();

        let first = paginate(all.clone(), request(1, 10));
        assert_eq!(first.items(), (0..10).collect::<Vec<_>>().as_slice());
        assert_eq!(first.total_pages(), 3);

        let third = paginate(all.clone(), request(3, 10));
        assert_eq!(third.items(), &[20, 21, 22, 23, 24]);
        assert_eq!(third.number(), 3);
        assert_eq!(third.index(), 2);

        let fourth = paginate(all, request(4, 10));
        assert!(fourth.is_empty());
        assert_eq!(fourth.total_elements(), 25);
        assert_eq!(fourth.total_pages(), 3);
    }

    #[test]
    fn pages_concatenate_back_to_the_full_sequence() {
        for len in [1_u32, 7, 10, 11, 33] {
            for size in [1_u32, 3, 10, 50] {
                let all: Vec<u32> = (0..len).collect();
                let total_pages = paginate(all.clone(), request(1, size)).total_pages();

                let rebuilt: Vec<u32> = (1..=total_pages)
                    .flat_map(|number| paginate(all.clone(), request(number, size)).into_items())
                    .collect();
                assert_eq!(rebuilt, all, "len={len} size={size}");
            }
        }
    }

    #[test]
    fn offset_equal_to_length_is_empty() {
        let page = paginate(vec!['a', 'b'], request(2, 2));
        assert!(page.is_empty());
        assert_eq!(page.total_elements(), 2);
        assert_eq!(page.total_pages(), 1);
    }

    #[test]
    fn empty_sequence_yields_empty_first_page() {
        let page = paginate(Vec::<u8>::new(), request(1, 10));
        assert!(page.is_empty());
        assert_eq!(page.total_pages(), 0);
    }
}

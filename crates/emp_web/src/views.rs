//! JSON view models returned by the employee routes.

use emp_core::{Employee, EmployeeSearch, Page};
use serde::Serialize;

const NOT_FOUND_MESSAGE: &str = "No employees matched the given name";

/// Paging metadata; `number` is 1-based.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub number: u32,
    pub size: u32,
    pub total_elements: usize,
    pub total_pages: u32,
    pub has_previous: bool,
    pub has_next: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    pub employees: Vec<Employee>,
    pub page: PageMeta,
    /// Targets for paging links, `1..=totalPages`.
    pub page_numbers: Vec<u32>,
}

impl From<Page<Employee>> for ListView {
    fn from(page: Page<Employee>) -> Self {
        let meta = PageMeta {
            number: page.number(),
            size: page.size(),
            total_elements: page.total_elements(),
            total_pages: page.total_pages(),
            has_previous: page.has_previous(),
            has_next: page.has_next(),
        };
        let page_numbers = page.page_numbers();

        Self {
            employees: page.into_items(),
            page: meta,
            page_numbers,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchView {
    pub employees: Vec<Employee>,
    /// Set when the name matched nobody; `employees` is then the full list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_found_message: Option<&'static str>,
}

impl From<EmployeeSearch> for SearchView {
    fn from(search: EmployeeSearch) -> Self {
        let not_found_message = search.is_not_found().then_some(NOT_FOUND_MESSAGE);
        Self {
            employees: search.into_employees(),
            not_found_message,
        }
    }
}

//! Core domain logic for the employee records application.
//! This crate is the single source of truth for business rules; the web
//! crate only binds requests and renders results.

pub mod db;
pub mod form;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use form::employee_form::{
    parse_employee_id, InsertEmployeeForm, SearchByNameForm, UpdateEmployeeForm, UploadedImage,
};
pub use form::{FieldError, FormErrors};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::{Employee, EmployeeId, EmployeeValidationError, NewEmployee};
pub use model::image::{
    decode_data_uri, encode_data_uri, DataUriError, ImageExtension, ImageExtensionError,
};
pub use model::page::{Page, PageRequest, PageRequestError};
pub use repo::employee_repo::{
    EmployeeRepository, NameMatch, RepoError, RepoResult, SqliteEmployeeRepository,
};
pub use service::employee_service::{
    EmployeeSearch, EmployeeService, EmployeeServiceError, ServiceResult,
};
pub use service::pagination::paginate;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

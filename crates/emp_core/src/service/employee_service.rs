//! Employee use-case service.
//!
//! # Responsibility
//! - Provide list/detail/search/update/create entry points for the boundary.
//! - Apply the search fallback rule and photo encoding policy.
//!
//! # Invariants
//! - Listing always fetches the whole ordered table before paginating.
//! - A search with no matches still returns the full list, flagged as
//!   not found.
//! - Updates touch `dependents_count` only.

use crate::form::employee_form::InsertEmployeeForm;
use crate::form::FormErrors;
use crate::model::employee::{Employee, EmployeeId, NewEmployee};
use crate::model::image::{encode_data_uri, ImageExtension};
use crate::model::page::{Page, PageRequest};
use crate::repo::employee_repo::{EmployeeRepository, NameMatch, RepoError, RepoResult};
use crate::service::pagination::paginate;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for employee use-cases.
#[derive(Debug)]
pub enum EmployeeServiceError {
    /// Detail lookup for an id that does not exist.
    EmployeeNotFound(EmployeeId),
    /// Form values that could not be converted into a record.
    InvalidForm(FormErrors),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for EmployeeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmployeeNotFound(id) => write!(f, "employee not found: {id}"),
            Self::InvalidForm(errors) => write!(f, "{errors}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EmployeeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidForm(errors) => Some(errors),
            Self::Repo(err) => Some(err),
            Self::EmployeeNotFound(_) => None,
        }
    }
}

impl From<RepoError> for EmployeeServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::EmployeeNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<FormErrors> for EmployeeServiceError {
    fn from(value: FormErrors) -> Self {
        Self::InvalidForm(value)
    }
}

pub type ServiceResult<T> = Result<T, EmployeeServiceError>;

/// Result of a name search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeSearch {
    /// No fragment was given; this is the plain full list.
    All(Vec<Employee>),
    /// Employees whose name contains the fragment.
    Matches(Vec<Employee>),
    /// Nothing matched; `fallback` is the full list shown instead.
    NoMatches { fallback: Vec<Employee> },
}

impl EmployeeSearch {
    /// Employees to display for this search.
    pub fn employees(&self) -> &[Employee] {
        match self {
            Self::All(employees) | Self::Matches(employees) => employees,
            Self::NoMatches { fallback } => fallback,
        }
    }

    pub fn into_employees(self) -> Vec<Employee> {
        match self {
            Self::All(employees) | Self::Matches(employees) => employees,
            Self::NoMatches { fallback } => fallback,
        }
    }

    /// `true` when a fragment was given and nothing matched it.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NoMatches { .. })
    }
}

/// Employee service facade over repository implementations.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// All employees, most recently hired first.
    pub fn list_all(&self) -> RepoResult<Vec<Employee>> {
        self.repo.find_all()
    }

    /// One page of the full list. The whole table is read, then sliced.
    pub fn list_page(&self, request: PageRequest) -> RepoResult<Page<Employee>> {
        Ok(paginate(self.list_all()?, request))
    }

    pub fn get_detail(&self, id: EmployeeId) -> ServiceResult<Employee> {
        Ok(self.repo.find_by_id(id)?)
    }

    /// Searches by case-sensitive name substring.
    ///
    /// `None` and `Some("")` behave exactly like [`Self::list_all`].
    pub fn search(&self, fragment: Option<&str>) -> RepoResult<EmployeeSearch> {
        let fragment = match fragment {
            Some(value) if !value.is_empty() => value,
            _ => return Ok(EmployeeSearch::All(self.list_all()?)),
        };

        match self.repo.find_by_name_substring(fragment)? {
            NameMatch::Found(employees) => {
                info!(
                    "event=employee_search module=service status=ok matches={}",
                    employees.len()
                );
                Ok(EmployeeSearch::Matches(employees))
            }
            NameMatch::NoMatches => {
                info!("event=employee_search module=service status=no_matches fallback=all");
                Ok(EmployeeSearch::NoMatches {
                    fallback: self.list_all()?,
                })
            }
        }
    }

    /// Sets the dependents count of `id`.
    ///
    /// Returns `false` without failing when no employee has that id.
    pub fn update_dependents(&self, id: EmployeeId, count: u32) -> RepoResult<bool> {
        let changed = self.repo.update_dependents_count(id, count)?;
        if changed == 0 {
            warn!(
                "event=employee_update_dependents module=service status=noop id={} reason=not_found",
                id
            );
            return Ok(false);
        }

        info!(
            "event=employee_update_dependents module=service status=ok id={} dependents_count={}",
            id, count
        );
        Ok(true)
    }

    /// Registers a new employee from a boundary-validated form.
    ///
    /// The photo is stored as a Base64 data URI whose MIME type follows
    /// `extension`.
    ///
    /// # Errors
    /// - `InvalidForm` when hire date, salary or dependents count do not parse.
    /// - `Repo` when the insert fails.
    pub fn create_employee(
        &self,
        form: &InsertEmployeeForm,
        extension: ImageExtension,
    ) -> ServiceResult<EmployeeId> {
        let mut errors = FormErrors::new();
        let hire_date = errors.collect(form.parsed_hire_date());
        let salary = errors.collect(form.parsed_salary());
        let dependents_count = errors.collect(form.parsed_dependents_count());

        let (Some(hire_date), Some(salary), Some(dependents_count)) =
            (hire_date, salary, dependents_count)
        else {
            return Err(EmployeeServiceError::InvalidForm(errors));
        };

        let image_bytes = form
            .image
            .as_ref()
            .map(|image| image.bytes.as_slice())
            .unwrap_or_default();

        let employee = NewEmployee {
            name: form.name.clone(),
            image: encode_data_uri(extension, image_bytes),
            gender: form.gender.clone(),
            hire_date,
            mail_address: form.mail_address.clone(),
            zip_code: form.zip_code.clone(),
            address: form.address.clone(),
            telephone: form.telephone.clone(),
            salary,
            characteristics: form.characteristics.clone(),
            dependents_count,
        };

        let id = self.repo.insert(&employee)?;
        info!(
            "event=employee_create module=service status=ok id={} image_type={} image_bytes={}",
            id,
            extension.mime_type(),
            image_bytes.len()
        );
        Ok(id)
    }
}

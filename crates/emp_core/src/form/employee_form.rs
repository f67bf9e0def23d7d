//! Employee forms: create, update-dependents, and name search.
//!
//! Field names in errors match the submitted parameter names.

use crate::form::{FieldError, FormErrors};
use crate::model::employee::EmployeeId;
use crate::model::image::ImageExtension;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static MAIL_ADDRESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*$")
        .expect("valid mail address regex")
});

const HIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Uploaded photo as received from a multipart request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedImage {
    /// Client-side filename; `None` when the part carried none.
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

/// Raw fields of the "register employee" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertEmployeeForm {
    pub name: String,
    pub image: Option<UploadedImage>,
    pub gender: String,
    /// `YYYY-MM-DD`.
    pub hire_date: String,
    pub mail_address: String,
    pub zip_code: String,
    pub address: String,
    pub telephone: String,
    pub salary: String,
    pub characteristics: String,
    pub dependents_count: String,
}

impl InsertEmployeeForm {
    /// Validates every field and returns the declared photo extension.
    ///
    /// # Errors
    /// - `name`: blank.
    /// - `mailAddress`: blank or malformed.
    /// - `hireDate`: not a `YYYY-MM-DD` date.
    /// - `salary` / `dependentsCount`: not a non-negative integer.
    /// - `image`: missing, or filename suffix is not exactly `jpg`/`png`.
    pub fn validate(&self) -> Result<ImageExtension, FormErrors> {
        let mut errors = FormErrors::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "name is required"));
        }
        errors.collect(validate_mail_address(&self.mail_address));
        errors.collect(self.parsed_hire_date());
        errors.collect(self.parsed_salary());
        errors.collect(self.parsed_dependents_count());
        let extension = errors.collect(self.image_extension());

        errors.into_result()?;
        extension.ok_or_else(|| FieldError::new("image", "image is required").into())
    }

    /// Declared photo extension, taken from the filename's final suffix.
    pub fn image_extension(&self) -> Result<ImageExtension, FieldError> {
        let image = self
            .image
            .as_ref()
            .ok_or_else(|| FieldError::new("image", "image is required"))?;
        ImageExtension::from_filename(image.filename.as_deref())
            .map_err(|_| FieldError::new("image", "only .jpg or .png images are supported"))
    }

    pub fn parsed_hire_date(&self) -> Result<NaiveDate, FieldError> {
        NaiveDate::parse_from_str(self.hire_date.trim(), HIRE_DATE_FORMAT)
            .map_err(|_| FieldError::new("hireDate", "hire date must be YYYY-MM-DD"))
    }

    pub fn parsed_salary(&self) -> Result<i64, FieldError> {
        parse_non_negative(&self.salary, "salary").map(i64::from)
    }

    pub fn parsed_dependents_count(&self) -> Result<u32, FieldError> {
        parse_non_negative(&self.dependents_count, "dependentsCount")
    }
}

/// Raw fields of the "update dependents" form on the detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateEmployeeForm {
    pub id: String,
    pub dependents_count: String,
}

impl UpdateEmployeeForm {
    /// Returns `(id, dependents_count)` when both fields are valid.
    pub fn validate(&self) -> Result<(EmployeeId, u32), FormErrors> {
        let mut errors = FormErrors::new();
        let id = errors.collect(parse_employee_id(&self.id));
        let count = errors.collect(parse_non_negative(&self.dependents_count, "dependentsCount"));
        errors.into_result()?;

        match (id, count) {
            (Some(id), Some(count)) => Ok((id, count)),
            _ => Err(FieldError::new("dependentsCount", "dependents count is required").into()),
        }
    }
}

/// Name search box; `None` when the parameter was not sent at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchByNameForm {
    pub name: Option<String>,
}

impl SearchByNameForm {
    pub fn fragment(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Parses an employee id submitted as text.
pub fn parse_employee_id(value: &str) -> Result<EmployeeId, FieldError> {
    value
        .trim()
        .parse::<EmployeeId>()
        .map_err(|_| FieldError::new("id", format!("`{value}` is not a valid employee id")))
}

fn validate_mail_address(value: &str) -> Result<(), FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new("mailAddress", "mail address is required"));
    }
    if !MAIL_ADDRESS_RE.is_match(trimmed) {
        return Err(FieldError::new(
            "mailAddress",
            "mail address is not well-formed",
        ));
    }
    Ok(())
}

fn parse_non_negative(value: &str, field: &'static str) -> Result<u32, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(field, format!("{field} is required")));
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| FieldError::new(field, format!("{field} must be a non-negative integer")))
}

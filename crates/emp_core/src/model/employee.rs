//! Employee domain model.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes.
//! - `name` is never blank.
//! - `salary` is never negative.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-generated primary key of an employee row.
pub type EmployeeId = i64;

/// One hired person as persisted in the `employees` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    /// Photo as a `data:` URI, or a bare filename for legacy rows.
    pub image: String,
    pub gender: String,
    pub hire_date: NaiveDate,
    pub mail_address: String,
    pub zip_code: String,
    pub address: String,
    pub telephone: String,
    pub salary: i64,
    pub characteristics: String,
    /// The only field that may change after creation.
    pub dependents_count: u32,
}

/// Insert payload for a new employee; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub name: String,
    pub image: String,
    pub gender: String,
    pub hire_date: NaiveDate,
    pub mail_address: String,
    pub zip_code: String,
    pub address: String,
    pub telephone: String,
    pub salary: i64,
    pub characteristics: String,
    pub dependents_count: u32,
}

/// Record-level validation failures checked before any write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeValidationError {
    BlankName,
    NegativeSalary(i64),
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "employee name must not be blank"),
            Self::NegativeSalary(value) => {
                write!(f, "employee salary must not be negative, got {value}")
            }
        }
    }
}

impl Error for EmployeeValidationError {}

impl NewEmployee {
    /// Checks record invariants that hold regardless of the input channel.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        if self.name.trim().is_empty() {
            return Err(EmployeeValidationError::BlankName);
        }
        if self.salary < 0 {
            return Err(EmployeeValidationError::NegativeSalary(self.salary));
        }
        Ok(())
    }

    /// Attaches the store-generated id, producing the persisted shape.
    pub fn into_employee(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            name: self.name,
            image: self.image,
            gender: self.gender,
            hire_date: self.hire_date,
            mail_address: self.mail_address,
            zip_code: self.zip_code,
            address: self.address,
            telephone: self.telephone,
            salary: self.salary,
            characteristics: self.characteristics,
            dependents_count: self.dependents_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EmployeeValidationError, NewEmployee};
    use chrono::NaiveDate;

    fn sample() -> NewEmployee {
        NewEmployee {
            name: "Hanako Yamada".to_string(),
            image: String::new(),
            gender: "female".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2019, 4, 1).expect("valid date"),
            mail_address: "hanako@example.com".to_string(),
            zip_code: "100-0001".to_string(),
            address: "Chiyoda, Tokyo".to_string(),
            telephone: "03-0000-0000".to_string(),
            salary: 320_000,
            characteristics: String::new(),
            dependents_count: 1,
        }
    }

    #[test]
    fn validate_accepts_complete_record() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_name_and_negative_salary() {
        let mut blank = sample();
        blank.name = "   ".to_string();
        assert_eq!(blank.validate(), Err(EmployeeValidationError::BlankName));

        let mut negative = sample();
        negative.salary = -1;
        assert_eq!(
            negative.validate(),
            Err(EmployeeValidationError::NegativeSalary(-1))
        );
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let employee = sample().into_employee(3);
        let json = serde_json::to_value(&employee).expect("employee should serialize");
        assert_eq!(json["id"], 3);
        assert_eq!(json["hireDate"], "2019-04-01");
        assert_eq!(json["dependentsCount"], 1);
        assert_eq!(json["mailAddress"], "hanako@example.com");
    }
}

//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the read/insert/update APIs over the `employees` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Every list query is ordered by `hire_date DESC, id ASC`.
//! - Name search distinguishes "no matches" from an empty table scan.
//! - Ids come from the table's AUTOINCREMENT key, never from `MAX(id) + 1`.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::employee::{Employee, EmployeeId, EmployeeValidationError, NewEmployee};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    id,
    name,
    image,
    gender,
    hire_date,
    mail_address,
    zip_code,
    address,
    telephone,
    salary,
    characteristics,
    dependents_count
FROM employees";

const EMPLOYEE_ORDER_SQL: &str = "ORDER BY hire_date DESC, id ASC";

const HIRE_DATE_FORMAT: &str = "%Y-%m-%d";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for employee persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EmployeeValidationError),
    Db(DbError),
    NotFound(EmployeeId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted employee data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<EmployeeValidationError> for RepoError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Outcome of a name substring search.
///
/// `NoMatches` is deliberately distinct from `Found(vec![])`: callers fall
/// back to the full list when nothing matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatch {
    /// At least one employee matched, in list order.
    Found(Vec<Employee>),
    NoMatches,
}

/// Repository interface for employee records.
pub trait EmployeeRepository {
    /// All employees, hire date descending. Empty table yields an empty vec.
    fn find_all(&self) -> RepoResult<Vec<Employee>>;
    /// One employee by id, or `RepoError::NotFound`.
    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Employee>;
    /// Employees whose name contains `fragment` (case-sensitive).
    fn find_by_name_substring(&self, fragment: &str) -> RepoResult<NameMatch>;
    /// Appends one employee and returns the store-generated id.
    fn insert(&self, employee: &NewEmployee) -> RepoResult<EmployeeId>;
    /// Sets `dependents_count` for `id`; returns the number of rows changed.
    fn update_dependents_count(&self, id: EmployeeId, count: u32) -> RepoResult<usize>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_employees(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut employees = Vec::new();

        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Employee>> {
        self.query_employees(
            &format!("{EMPLOYEE_SELECT_SQL} {EMPLOYEE_ORDER_SQL};"),
            params![],
        )
    }

    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Employee> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;

        match rows.next()? {
            Some(row) => parse_employee_row(row),
            None => Err(RepoError::NotFound(id)),
        }
    }

    fn find_by_name_substring(&self, fragment: &str) -> RepoResult<NameMatch> {
        // instr() is case-sensitive, unlike LIKE for ASCII.
        let employees = self.query_employees(
            &format!("{EMPLOYEE_SELECT_SQL} WHERE instr(name, ?1) > 0 {EMPLOYEE_ORDER_SQL};"),
            [fragment],
        )?;

        if employees.is_empty() {
            return Ok(NameMatch::NoMatches);
        }
        Ok(NameMatch::Found(employees))
    }

    fn insert(&self, employee: &NewEmployee) -> RepoResult<EmployeeId> {
        employee.validate()?;

        self.conn.execute(
            "INSERT INTO employees (
                name,
                image,
                gender,
                hire_date,
                mail_address,
                zip_code,
                address,
                telephone,
                salary,
                characteristics,
                dependents_count
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
            params![
                employee.name.as_str(),
                employee.image.as_str(),
                employee.gender.as_str(),
                hire_date_to_db(employee.hire_date),
                employee.mail_address.as_str(),
                employee.zip_code.as_str(),
                employee.address.as_str(),
                employee.telephone.as_str(),
                employee.salary,
                employee.characteristics.as_str(),
                employee.dependents_count,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_dependents_count(&self, id: EmployeeId, count: u32) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "UPDATE employees SET dependents_count = ?1 WHERE id = ?2;",
            params![count, id],
        )?;
        Ok(changed)
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let id: EmployeeId = row.get("id")?;

    let hire_date_text: String = row.get("hire_date")?;
    let hire_date = parse_hire_date(&hire_date_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid hire date `{hire_date_text}` in employees.hire_date (id={id})"
        ))
    })?;

    let dependents_raw: i64 = row.get("dependents_count")?;
    let dependents_count = u32::try_from(dependents_raw).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid dependents count `{dependents_raw}` in employees.dependents_count (id={id})"
        ))
    })?;

    Ok(Employee {
        id,
        name: row.get("name")?,
        image: row.get("image")?,
        gender: row.get("gender")?,
        hire_date,
        mail_address: row.get("mail_address")?,
        zip_code: row.get("zip_code")?,
        address: row.get("address")?,
        telephone: row.get("telephone")?,
        salary: row.get("salary")?,
        characteristics: row.get("characteristics")?,
        dependents_count,
    })
}

fn hire_date_to_db(date: NaiveDate) -> String {
    date.format(HIRE_DATE_FORMAT).to_string()
}

fn parse_hire_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, HIRE_DATE_FORMAT).ok()
}

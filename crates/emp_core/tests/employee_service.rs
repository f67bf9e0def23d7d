use chrono::NaiveDate;
use emp_core::db::open_db_in_memory;
use emp_core::{
    decode_data_uri, EmployeeRepository, EmployeeSearch, EmployeeService, EmployeeServiceError,
    ImageExtension, InsertEmployeeForm, NewEmployee, PageRequest, SqliteEmployeeRepository,
    UploadedImage,
};
use rusqlite::Connection;

fn seed(conn: &Connection, names: &[&str]) {
    let repo = SqliteEmployeeRepository::new(conn);
    for (offset, name) in names.iter().enumerate() {
        let day = u32::try_from(offset % 28).unwrap() + 1;
        repo.insert(&NewEmployee {
            name: name.to_string(),
            image: String::new(),
            gender: "male".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2000 + i32::try_from(offset).unwrap(), 1, day)
                .unwrap(),
            mail_address: "staff@example.com".to_string(),
            zip_code: String::new(),
            address: String::new(),
            telephone: String::new(),
            salary: 250_000,
            characteristics: String::new(),
            dependents_count: 0,
        })
        .unwrap();
    }
}

fn insert_form(filename: &str, bytes: &[u8]) -> InsertEmployeeForm {
    InsertEmployeeForm {
        name: "Jiro Tanaka".to_string(),
        image: Some(UploadedImage {
            filename: Some(filename.to_string()),
            bytes: bytes.to_vec(),
        }),
        gender: "male".to_string(),
        hire_date: "2021-04-01".to_string(),
        mail_address: "jiro@example.com".to_string(),
        zip_code: "530-0001".to_string(),
        address: "Kita, Osaka".to_string(),
        telephone: "06-0000-0000".to_string(),
        salary: "310000".to_string(),
        characteristics: "careful".to_string(),
        dependents_count: "2".to_string(),
    }
}

#[test]
fn list_all_delegates_to_store_order() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &["Old", "New"]);
    let service = EmployeeService::new(SqliteEmployeeRepository::new(&conn));

    let names: Vec<String> = service
        .list_all()
        .unwrap()
        .into_iter()
        .map(|employee| employee.name)
        .collect();
    assert_eq!(names, vec!["New", "Old"]);
}

#[test]
fn list_page_slices_the_full_list() {
    let conn = open_db_in_memory().unwrap();
    let names: Vec<String> = (0..25).map(|i| format!("Employee {i:02}")).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    seed(&conn, &name_refs);
    let service = EmployeeService::new(SqliteEmployeeRepository::new(&conn));
    let all = service.list_all().unwrap();

    let first = service.list_page(PageRequest::new(1, 10).unwrap()).unwrap();
    assert_eq!(first.items(), &all[0..10]);

    let third = service.list_page(PageRequest::new(3, 10).unwrap()).unwrap();
    assert_eq!(third.items(), &all[20..25]);

    let fourth = service.list_page(PageRequest::new(4, 10).unwrap()).unwrap();
    assert!(fourth.is_empty());
    assert_eq!(fourth.total_pages(), 3);
    assert_eq!(fourth.total_elements(), 25);
}

#[test]
fn get_detail_missing_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::new(&conn));

    let err = service.get_detail(99).unwrap_err();
    assert!(matches!(err, EmployeeServiceError::EmployeeNotFound(99)));
}

#[test]
fn search_without_fragment_equals_list_all() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &["Alice Smith", "Bob"]);
    let service = EmployeeService::new(SqliteEmployeeRepository::new(&conn));
    let all = service.list_all().unwrap();

    let absent = service.search(None).unwrap();
    let empty = service.search(Some("")).unwrap();

    assert_eq!(absent, EmployeeSearch::All(all.clone()));
    assert_eq!(empty, EmployeeSearch::All(all));
    assert!(!absent.is_not_found());
}

#[test]
fn search_with_no_matches_falls_back_to_full_list() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &["Alice Smith", "Bob"]);
    let service = EmployeeService::new(SqliteEmployeeRepository::new(&conn));

    let result = service.search(Some("ali")).unwrap();

    assert!(result.is_not_found());
    assert_eq!(result.employees(), service.list_all().unwrap().as_slice());
    assert_eq!(result.employees().len(), 2);
}

#[test]
fn search_with_matches_returns_only_matches() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &["Alice Smith", "Bob"]);
    let service = EmployeeService::new(SqliteEmployeeRepository::new(&conn));

    let result = service.search(Some("Bo")).unwrap();

    assert!(!result.is_not_found());
    let names: Vec<&str> = result.employees().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Bob"]);
}

#[test]
fn update_dependents_for_missing_id_completes_without_error() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &["Alice Smith"]);
    let service = EmployeeService::new(SqliteEmployeeRepository::new(&conn));

    assert!(!service.update_dependents(7, 3).unwrap());
    assert_eq!(service.list_all().unwrap()[0].dependents_count, 0);
}

#[test]
fn update_dependents_changes_existing_employee() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &["Alice Smith"]);
    let service = EmployeeService::new(SqliteEmployeeRepository::new(&conn));
    let id = service.list_all().unwrap()[0].id;

    assert!(service.update_dependents(id, 3).unwrap());
    assert_eq!(service.get_detail(id).unwrap().dependents_count, 3);
}

#[test]
fn create_employee_with_jpg_stores_decodable_jpeg_data_uri() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::new(&conn));
    let photo = [0xFF_u8, 0xD8, 0xFF, 0xDB, 0x00, 0x43, 0x00];

    let id = service
        .create_employee(&insert_form("jiro.jpg", &photo), ImageExtension::Jpg)
        .unwrap();

    let stored = service.get_detail(id).unwrap();
    assert!(stored.image.starts_with("data:image/jpeg;base64,"));
    let (mime, bytes) = decode_data_uri(&stored.image).unwrap();
    assert_eq!(mime, "image/jpeg");
    assert_eq!(bytes, photo);
}

#[test]
fn create_employee_with_png_stores_decodable_png_data_uri() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::new(&conn));
    let photo = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";

    let id = service
        .create_employee(&insert_form("jiro.png", photo), ImageExtension::Png)
        .unwrap();

    let (mime, bytes) = decode_data_uri(&service.get_detail(id).unwrap().image).unwrap();
    assert_eq!(mime, "image/png");
    assert_eq!(bytes, photo);
}

#[test]
fn create_employee_copies_and_parses_form_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::new(&conn));

    let id = service
        .create_employee(&insert_form("jiro.png", &[1, 2, 3]), ImageExtension::Png)
        .unwrap();
    let stored = service.get_detail(id).unwrap();

    assert_eq!(stored.name, "Jiro Tanaka");
    assert_eq!(stored.hire_date, NaiveDate::from_ymd_opt(2021, 4, 1).unwrap());
    assert_eq!(stored.salary, 310_000);
    assert_eq!(stored.dependents_count, 2);
    assert_eq!(stored.address, "Kita, Osaka");
    assert_eq!(stored.mail_address, "jiro@example.com");
    assert_eq!(stored.characteristics, "careful");
}

#[test]
fn create_employee_rejects_unparseable_numbers() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);
    let service = EmployeeService::new(SqliteEmployeeRepository::new(&conn));

    let mut form = insert_form("jiro.png", &[1]);
    form.salary = "a lot".to_string();
    form.hire_date = "yesterday".to_string();

    let err = service
        .create_employee(&form, ImageExtension::Png)
        .unwrap_err();
    match err {
        EmployeeServiceError::InvalidForm(errors) => {
            assert!(errors.has_field("salary"));
            assert!(errors.has_field("hireDate"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(repo.find_all().unwrap().is_empty());
}

#[test]
fn consecutive_creates_get_unique_ids() {
    let conn = open_db_in_memory().unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::new(&conn));

    let first = service
        .create_employee(&insert_form("a.png", &[1]), ImageExtension::Png)
        .unwrap();
    let second = service
        .create_employee(&insert_form("b.jpg", &[2]), ImageExtension::Jpg)
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(service.list_all().unwrap().len(), 2);
}

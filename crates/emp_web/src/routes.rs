//! Employee routes: list, detail, update, search and register.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    response::Redirect,
    routing::{get, post},
    Form, Json, Router,
};
use emp_core::{
    parse_employee_id, Employee, InsertEmployeeForm, PageRequest, SearchByNameForm,
    UpdateEmployeeForm, UploadedImage,
};
use log::debug;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views::{ListView, SearchView};

const LIST_PATH: &str = "/employee/showList";

pub fn router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route(LIST_PATH, get(show_list))
        .route("/employee/showDetail", get(show_detail))
        .route("/employee/update", post(update))
        .route("/employee/search", get(search))
        .route("/employee/toInsert", post(insert))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    page: Option<u32>,
}

/// Full list, one page at a time. `page` defaults to 1.
pub async fn show_list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ListView>> {
    let number = params.page.unwrap_or(1);
    let request = PageRequest::new(number, state.page_size)
        .map_err(|err| AppError::bad_request(err.to_string()))?;

    let page = state
        .with_service(move |service| service.list_page(request))
        .await?;
    debug!(
        "event=employee_list module=web status=ok page={} items={}",
        page.number(),
        page.items().len()
    );
    Ok(Json(page.into()))
}

#[derive(Debug, Deserialize)]
pub struct DetailParams {
    id: Option<String>,
}

pub async fn show_detail(
    State(state): State<AppState>,
    Query(params): Query<DetailParams>,
) -> AppResult<Json<Employee>> {
    let raw_id = params
        .id
        .ok_or_else(|| AppError::bad_request("query parameter `id` is required"))?;
    let id = parse_employee_id(&raw_id)?;

    let employee = state
        .with_service(move |service| service.get_detail(id))
        .await?;
    Ok(Json(employee))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateParams {
    id: String,
    dependents_count: String,
}

/// Updates the dependents count, then redirects to the list.
pub async fn update(
    State(state): State<AppState>,
    Form(params): Form<UpdateParams>,
) -> AppResult<Redirect> {
    let form = UpdateEmployeeForm {
        id: params.id,
        dependents_count: params.dependents_count,
    };
    let (id, count) = form.validate()?;

    state
        .with_service(move |service| service.update_dependents(id, count))
        .await?;
    Ok(Redirect::to(LIST_PATH))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    name: Option<String>,
}

/// Name search; no match falls back to the full list with a notice.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchView>> {
    let form = SearchByNameForm { name: params.name };

    let result = state
        .with_service(move |service| service.search(form.fragment()))
        .await?;
    Ok(Json(result.into()))
}

/// Registers an employee from a multipart form, then redirects to the list.
pub async fn insert(State(state): State<AppState>, multipart: Multipart) -> AppResult<Redirect> {
    let form = read_insert_form(multipart).await?;
    let extension = form.validate()?;

    let id = state
        .with_service(move |service| service.create_employee(&form, extension))
        .await?;
    debug!("event=employee_insert module=web status=ok id={id}");
    Ok(Redirect::to(LIST_PATH))
}

async fn read_insert_form(mut multipart: Multipart) -> AppResult<InsertEmployeeForm> {
    let mut form = InsertEmployeeForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "image" {
            let filename = field.file_name().map(str::to_string);
            let bytes = field.bytes().await?.to_vec();
            form.image = Some(UploadedImage { filename, bytes });
            continue;
        }

        let value = field.text().await?;
        match name.as_str() {
            "name" => form.name = value,
            "gender" => form.gender = value,
            "hireDate" => form.hire_date = value,
            "mailAddress" => form.mail_address = value,
            "zipCode" => form.zip_code = value,
            "address" => form.address = value,
            "telephone" => form.telephone = value,
            "salary" => form.salary = value,
            "characteristics" => form.characteristics = value,
            "dependentsCount" => form.dependents_count = value,
            other => debug!("event=employee_insert module=web status=skip field={other}"),
        }
    }

    Ok(form)
}

use actix_web::{web, HttpRequest, HttpResponse};
use actix_web::error::{JsonPayloadError, PathError};
use std::collections::BTreeMap;
use log::info;
use crate::errors::AppError;
use crate::models::employee::EmployeeRequest;
use crate::services::employee::EmployeeService;
use crate::utils::validation::validate_payload;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(map_json_error))
        .app_data(web::PathConfig::default().error_handler(map_path_error))
        .service(
            web::resource("/api/employees")
                .route(web::post().to(create_employee))
                .route(web::get().to(get_employees)),
        )
        .service(
            web::resource("/api/employees/{id}")
                .route(web::get().to(get_employee))
                .route(web::put().to(update_employee))
                .route(web::delete().to(delete_employee)),
        );
}

fn map_json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let mut errors = BTreeMap::new();
    errors.insert("body".to_string(), err.to_string());
    AppError::ValidationFailed(errors).into()
}

fn map_path_error(_err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let mut errors = BTreeMap::new();
    errors.insert("id".to_string(), "must be a numeric identifier".to_string());
    AppError::ValidationFailed(errors).into()
}

pub async fn create_employee(
    service: web::Data<EmployeeService>,
    payload: web::Json<EmployeeRequest>,
) -> Result<HttpResponse, AppError> {
    info!("Received request to create employee with email: {}", payload.email);
    validate_payload(&*payload)?;

    let created = service.create(&payload).await?;
    Ok(HttpResponse::Created().json(created))
}

pub async fn get_employee(
    service: web::Data<EmployeeService>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    info!("Received request to get employee with ID: {}", id);

    let employee = service.get_by_id(id).await?;
    Ok(HttpResponse::Ok().json(employee))
}

pub async fn get_employees(
    service: web::Data<EmployeeService>,
) -> Result<HttpResponse, AppError> {
    info!("Received request to get all employees");

    let employees = service.get_all().await?;
    Ok(HttpResponse::Ok().json(employees))
}

pub async fn update_employee(
    service: web::Data<EmployeeService>,
    id: web::Path<i64>,
    payload: web::Json<EmployeeRequest>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    info!("Received request to update employee with ID: {}", id);
    validate_payload(&*payload)?;

    let updated = service.update(id, &payload).await?;
    Ok(HttpResponse::Ok().json(updated))
}

pub async fn delete_employee(
    service: web::Data<EmployeeService>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    info!("Received request to delete employee with ID: {}", id);

    service.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

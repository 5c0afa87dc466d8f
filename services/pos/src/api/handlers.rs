//! HTTP 处理器

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, HeaderValue, StatusCode, header},
};
use campus_errors::AppError;
use serde::Deserialize;

use crate::application::PosService;
use crate::domain::{CampusType, Pos, PosId};
use crate::error::{ServiceError, ServiceResult};

use super::dto::PosDto;

type Created = (StatusCode, HeaderMap, Json<PosDto>);

#[derive(Debug, Deserialize)]
pub struct NameFilter {
    pub name: String,
}

/// 请求体、路径和查询参数解析失败统一返回 400
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ServiceResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ServiceError::Validation(rejection.body_text()))
}

fn path_param<T>(param: Result<Path<T>, PathRejection>) -> ServiceResult<T> {
    param
        .map(|Path(value)| value)
        .map_err(|rejection| ServiceError::Validation(rejection.body_text()))
}

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> ServiceResult<T> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| ServiceError::Validation(rejection.body_text()))
}

fn created(pos: Pos) -> ServiceResult<Created> {
    let mut headers = HeaderMap::new();
    if let Some(id) = pos.id {
        let location = HeaderValue::from_str(&format!("/api/pos/{}", id))
            .map_err(|e| AppError::internal(format!("Invalid Location header: {}", e)))?;
        headers.insert(header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(PosDto::from(pos))))
}

pub async fn list_pos(State(service): State<Arc<PosService>>) -> ServiceResult<Json<Vec<PosDto>>> {
    let all = service.get_all().await?;
    Ok(Json(all.into_iter().map(PosDto::from).collect()))
}

pub async fn get_pos(
    State(service): State<Arc<PosService>>,
    id: Result<Path<PosId>, PathRejection>,
) -> ServiceResult<Json<PosDto>> {
    let id = path_param(id)?;
    Ok(Json(service.get_by_id(id).await?.into()))
}

pub async fn filter_pos(
    State(service): State<Arc<PosService>>,
    filter: Result<Query<NameFilter>, QueryRejection>,
) -> ServiceResult<Json<PosDto>> {
    let filter = query_params(filter)?;
    Ok(Json(service.get_by_name(&filter.name).await?.into()))
}

pub async fn create_pos(
    State(service): State<Arc<PosService>>,
    payload: Result<Json<PosDto>, JsonRejection>,
) -> ServiceResult<Created> {
    let dto = json_body(payload)?;
    if dto.id.is_some() {
        return Err(ServiceError::Validation(
            "POS ID must not be set when creating a new POS".to_string(),
        ));
    }
    dto.validate()?;

    created(service.upsert(dto.into_domain()).await?)
}

pub async fn update_pos(
    State(service): State<Arc<PosService>>,
    id: Result<Path<PosId>, PathRejection>,
    payload: Result<Json<PosDto>, JsonRejection>,
) -> ServiceResult<Json<PosDto>> {
    let id = path_param(id)?;
    let dto = json_body(payload)?;
    if dto.id != Some(id) {
        return Err(ServiceError::Validation(format!(
            "POS ID in path ({}) and body do not match",
            id
        )));
    }
    dto.validate()?;

    Ok(Json(service.upsert(dto.into_domain()).await?.into()))
}

pub async fn import_from_osm(
    State(service): State<Arc<PosService>>,
    node_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CampusType>, JsonRejection>,
) -> ServiceResult<Created> {
    let node_id = path_param(node_id)?;
    let campus = json_body(payload)?;
    created(service.import_from_osm_node(node_id, campus).await?)
}

pub async fn clear_pos(State(service): State<Arc<PosService>>) -> ServiceResult<StatusCode> {
    service.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}

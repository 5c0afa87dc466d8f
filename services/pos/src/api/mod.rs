//! REST API 层

mod dto;
mod handlers;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::application::PosService;

pub use dto::PosDto;

/// 构建 POS 路由
///
/// `enable_admin_routes` 为 true 时额外挂载 `DELETE /api/admin/pos`
pub fn router(service: Arc<PosService>, enable_admin_routes: bool) -> Router {
    let mut routes = Router::new()
        .route("/api/pos", get(handlers::list_pos).post(handlers::create_pos))
        .route("/api/pos/filter", get(handlers::filter_pos))
        .route(
            "/api/pos/{id}",
            get(handlers::get_pos).put(handlers::update_pos),
        )
        .route(
            "/api/pos/import/osm/{node_id}",
            post(handlers::import_from_osm),
        );

    if enable_admin_routes {
        routes = routes.route("/api/admin/pos", delete(handlers::clear_pos));
    }

    routes.with_state(service)
}

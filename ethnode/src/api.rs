use crate::{
    error::ServiceError,
    models::jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcSuccess},
    service::NodeService,
};
use actix_web::{post, web, HttpRequest, HttpResponse};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

/// JSON-RPC endpoint exposing the normalized node interface
///
/// Accepts the `node_*` methods regardless of which client runs behind the
/// service.
#[post("/api/v1/node")]
async fn node_jsonrpc(
    req: HttpRequest,
    service: web::Data<Arc<NodeService>>,
    request: web::Json<JsonRpcRequest<Value>>,
) -> HttpResponse {
    debug!(
        "Received JSON-RPC request {} from {}",
        request.method,
        req.peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    );

    // Validate JSON-RPC version
    if request.jsonrpc != "2.0" {
        return HttpResponse::BadRequest().json(JsonRpcError::invalid_params(
            request.id.clone(),
            "Invalid JSON-RPC version. Expected 2.0".to_string(),
        ));
    }

    // Positional params only; omitted or null means none
    let params = match &request.params {
        Value::Null => Vec::new(),
        Value::Array(params) => params.clone(),
        _ => {
            return HttpResponse::BadRequest().json(JsonRpcError::invalid_params(
                request.id.clone(),
                "params must be an array".to_string(),
            ));
        }
    };

    // Dispatch to the node service
    match service.call(&request.method, &params).await {
        Ok(result) => HttpResponse::Ok().json(JsonRpcSuccess::new(request.id.clone(), result)),
        // Caller mistakes map to invalid params, node failures to internal errors
        Err(ServiceError::InvalidRequest(message)) => {
            HttpResponse::BadRequest().json(JsonRpcError::invalid_params(request.id.clone(), message))
        }
        Err(e) => {
            error!("{} failed: {:?}", request.method, e);
            HttpResponse::InternalServerError().json(JsonRpcError::internal_error(
                request.id.clone(),
                e.to_string(),
            ))
        }
    }
}

/// Service health check endpoint that verifies the node is answering
#[post("/api/v1/health")]
async fn health_check(
    service: web::Data<Arc<NodeService>>,
) -> Result<HttpResponse, ServiceError> {
    info!("Health check requested");

    // A block number fetch proves the node is still answering
    match service.health().await {
        Ok(report) => Ok(HttpResponse::Ok().json(report)),
        Err(e) => {
            error!("Health check failed: {:?}", e);
            Err(e.into())
        }
    }
}

/// Configure the API routes for the service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(node_jsonrpc).service(health_check);
}

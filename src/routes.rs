use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use include_dir::{include_dir, Dir};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::{Any, CorsLayer}, trace::TraceLayer};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::{
    error::AppError,
    generator::ContentGenerator,
    models::{GenerationRequest, GenerationResult},
};

static ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/static");

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<ContentGenerator>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any)
                )
        )
        .with_state(state)
}

pub async fn index() -> Response {
    match ASSETS.get_file("index.html").and_then(|f| f.contents_utf8()) {
        Some(html) => Html(html).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Generation form fields, from either a urlencoded or a multipart body.
pub struct GenerateForm(pub GenerationRequest);

#[async_trait]
impl<S> FromRequest<S> for GenerateForm
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req.headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.to_ascii_lowercase().starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(body) = Form::<GenerationRequest>::from_request(req, state).await
                .map_err(IntoResponse::into_response)?;
            return Ok(Self(body));
        }

        let mut multipart = Multipart::from_request(req, state).await
            .map_err(IntoResponse::into_response)?;
        let (mut product_name, mut context) = (None, None);
        while let Some(field) = multipart.next_field().await.map_err(IntoResponse::into_response)? {
            // First occurrence wins when a field is repeated.
            let slot = match field.name() {
                Some("product_name") if product_name.is_none() => &mut product_name,
                Some("context") if context.is_none() => &mut context,
                _ => continue,
            };
            *slot = Some(field.text().await.map_err(IntoResponse::into_response)?);
        }

        let product_name = product_name.ok_or_else(|| {
            (StatusCode::BAD_REQUEST, "Missing form field `product_name`").into_response()
        })?;
        Ok(Self(GenerationRequest { product_name, context }))
    }
}

pub async fn generate(
    State(state): State<AppState>,
    GenerateForm(body): GenerateForm,
) -> Result<Json<GenerationResult>, AppError> {
    let span = info_span!("generate", request_id = %Uuid::new_v4());
    async move {
        info!("📝 Content requested for product: {}", body.product_name);
        let result = state.generator.generate(&body).await?;
        Ok(Json(result))
    }
    .instrument(span)
    .await
}

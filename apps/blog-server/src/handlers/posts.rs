//! Post pages.

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse, web};

use blog_core::RequestMethod;
use blog_core::domain::{PostForm, PostId};
use blog_core::ports::View;
use blog_shared::ErrorResponse;

use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Form extraction outcome; a GET carries no body, so a failure is not always an error.
type FormBody = Result<web::Form<PostForm>, actix_web::Error>;

/// GET /
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let view = state.posts.list().await?;
    respond(&state, view)
}

/// GET /{id}/
pub async fn detail(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let view = state.posts.detail(path.into_inner()).await?;
    respond(&state, view)
}

/// GET|POST /create/
pub async fn create(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    form: FormBody,
) -> AppResult<HttpResponse> {
    let method = request_method(&req);
    let form = read_form(method, form)?;
    let view = state
        .posts
        .create(method, identity.principal(), form)
        .await?;
    respond(&state, view)
}

/// GET|POST /{id}/edit/
pub async fn edit(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<PostId>,
    form: FormBody,
) -> AppResult<HttpResponse> {
    let method = request_method(&req);
    let form = read_form(method, form)?;
    let view = state.posts.edit(path.into_inner(), method, form).await?;
    respond(&state, view)
}

/// POST /{id}/delete/
///
/// A GET is accepted but never deletes anything.
pub async fn delete(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let view = state
        .posts
        .delete(path.into_inner(), request_method(&req))
        .await?;

    match view {
        View::Unhandled => Ok(HttpResponse::MethodNotAllowed()
            .insert_header((header::ALLOW, "POST"))
            .json(
                ErrorResponse::method_not_allowed("Posts are only deleted with POST")
                    .with_instance(req.path()),
            )),
        view => respond(&state, view),
    }
}

fn request_method(req: &HttpRequest) -> RequestMethod {
    RequestMethod::from_verb(req.method().as_str())
}

/// Safe requests never read the body. A mutating request with a body that
/// does not decode fails with the extractor's own cause.
fn read_form(method: RequestMethod, form: FormBody) -> AppResult<PostForm> {
    match (method, form) {
        (_, Ok(form)) => Ok(form.into_inner()),
        (RequestMethod::Safe, Err(_)) => Ok(PostForm::default()),
        (RequestMethod::Mutating, Err(err)) => {
            tracing::debug!(error = %err, "Rejecting undecodable form");
            Err(AppError::from_payload(err))
        }
    }
}

/// Turn a handler outcome into an HTTP response.
fn respond(state: &AppState, view: View) -> AppResult<HttpResponse> {
    match view {
        View::Render { template, context } => {
            let body = state.renderer.render(template, &context)?;
            Ok(HttpResponse::Ok()
                .content_type(ContentType::html())
                .body(body))
        }
        View::Redirect(route) => Ok(HttpResponse::Found()
            .insert_header((header::LOCATION, route.path()))
            .finish()),
        View::Unhandled => Ok(HttpResponse::MethodNotAllowed().finish()),
    }
}

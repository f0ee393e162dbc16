use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::web::Json;
use actix_web::HttpResponse;
use serde::Serialize;

/// Uniform JSON envelope returned by every route handler.
#[derive(Serialize)]
pub(crate) struct JsonResponse<T> {
    pub(crate) status: String,
    pub(crate) message: String,
    pub(crate) code: u32,
    pub(crate) id: Option<String>,
    pub(crate) item: Option<T>,
    pub(crate) list: Option<Vec<T>>,
}

pub(crate) struct JsonResponseBuilder<T> {
    id: Option<String>,
    item: Option<T>,
    list: Option<Vec<T>>,
}

impl<T> Default for JsonResponseBuilder<T> {
    fn default() -> Self {
        Self {
            id: None,
            item: None,
            list: None,
        }
    }
}

impl<T: Serialize> JsonResponse<T> {
    pub(crate) fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder::default()
    }
}

impl<T: Serialize> JsonResponseBuilder<T> {
    pub(crate) fn set_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub(crate) fn set_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    pub(crate) fn set_list(mut self, list: Vec<T>) -> Self {
        self.list = Some(list);
        self
    }

    fn payload(self, code: StatusCode, message: String) -> JsonResponse<T> {
        JsonResponse {
            status: if code.is_success() { "OK" } else { "Error" }.to_string(),
            message,
            code: code.as_u16() as u32,
            id: self.id,
            item: self.item,
            list: self.list,
        }
    }

    pub(crate) fn ok(self, message: impl ToString) -> Json<JsonResponse<T>> {
        Json(self.payload(StatusCode::OK, message.to_string()))
    }

    pub(crate) fn created(self, message: impl ToString) -> HttpResponse {
        HttpResponse::Created().json(self.payload(StatusCode::CREATED, message.to_string()))
    }

    fn error(self, code: StatusCode, message: String) -> actix_web::Error {
        let response =
            HttpResponse::build(code).json(self.payload(code, message.clone()));
        InternalError::from_response(message, response).into()
    }

    pub(crate) fn bad_request(self, message: impl ToString) -> actix_web::Error {
        self.error(StatusCode::BAD_REQUEST, message.to_string())
    }

    pub(crate) fn form_error(self, message: impl ToString) -> actix_web::Error {
        self.error(StatusCode::BAD_REQUEST, message.to_string())
    }

    pub(crate) fn not_found(self, message: impl ToString) -> actix_web::Error {
        self.error(StatusCode::NOT_FOUND, message.to_string())
    }

    pub(crate) fn conflict(self, message: impl ToString) -> actix_web::Error {
        self.error(StatusCode::CONFLICT, message.to_string())
    }

    /// The underlying cause is logged, never echoed back to the caller.
    pub(crate) fn internal_server_error(self, cause: impl ToString) -> actix_web::Error {
        tracing::error!("Internal error: {}", cause.to_string());
        self.error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error".to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: actix_web::Error) -> StatusCode {
        err.as_response_error().error_response().status()
    }

    #[test]
    fn error_builders_map_to_their_status_codes() {
        assert_eq!(
            status_of(JsonResponse::<()>::build().bad_request("bad")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(JsonResponse::<()>::build().not_found("missing")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(JsonResponse::<()>::build().conflict("raced")),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn internal_error_hides_the_cause() {
        let err = JsonResponse::<()>::build().internal_server_error("connection refused");
        assert_eq!(err.to_string(), "Internal Server Error");
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

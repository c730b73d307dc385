//! Named constructors for the common response shapes.
//!
//! Success constructors return an [`ApiResponse`] ready for further fluent
//! configuration. Error constructors return the [`Failure`] for the caller to
//! propagate; they never build a response themselves.

use crate::failure::Failure;
use crate::response::{ApiResponse, Content};

/// Facade over the response and failure constructors.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseFactory;

impl ResponseFactory {
    /// 200 without content. Default message "Successful".
    pub fn successful(&self, message: Option<&str>) -> ApiResponse {
        ApiResponse::new(Content::Null, 200).with_message(message.unwrap_or("Successful"))
    }

    /// 201. Default message "Created".
    pub fn created(&self, content: impl Into<Content>, message: Option<&str>) -> ApiResponse {
        ApiResponse::new(content, 201).with_message(message.unwrap_or("Created"))
    }

    /// 202. Default message "Accepted".
    pub fn accepted(&self, content: impl Into<Content>, message: Option<&str>) -> ApiResponse {
        ApiResponse::new(content, 202).with_message(message.unwrap_or("Accepted"))
    }

    /// 204 without content. The message comes from the registry unless given.
    pub fn no_content(&self, message: Option<&str>) -> ApiResponse {
        ApiResponse::new(Content::Null, 204).with_message(message.unwrap_or_default())
    }

    /// A list response: in standard format the data lands under `data.list`.
    pub fn collection(&self, collection: impl Into<Content>) -> ApiResponse {
        ApiResponse::new(collection, 200).with_list()
    }

    pub fn item(&self, item: impl Into<Content>) -> ApiResponse {
        ApiResponse::new(item, 200)
    }

    /// Wrap a plain value. Same as [`ResponseFactory::item`].
    pub fn array(&self, value: impl Into<Content>) -> ApiResponse {
        self.item(value)
    }

    #[track_caller]
    pub fn client_error(&self, message: &str, status_code: u32) -> Failure {
        Failure::client_error(message, status_code)
    }

    #[track_caller]
    pub fn server_error(&self, message: &str, status_code: u32) -> Failure {
        Failure::server_error(message, status_code)
    }

    #[track_caller]
    pub fn error_bad_request(&self, message: Option<&str>) -> Failure {
        self.client_error(message.unwrap_or("Bad Request"), 400)
    }

    #[track_caller]
    pub fn error_unauthorized(&self, message: Option<&str>) -> Failure {
        self.client_error(message.unwrap_or("Unauthorized"), 401)
    }

    #[track_caller]
    pub fn error_forbidden(&self, message: Option<&str>) -> Failure {
        self.client_error(message.unwrap_or("Forbidden"), 403)
    }

    #[track_caller]
    pub fn error_not_found(&self, message: Option<&str>) -> Failure {
        self.client_error(message.unwrap_or("Not Found"), 404)
    }

    #[track_caller]
    pub fn error_method_not_allowed(&self, message: Option<&str>) -> Failure {
        self.client_error(message.unwrap_or("Method Not Allowed"), 405)
    }

    #[track_caller]
    pub fn error_unprocessable_entity(&self, message: Option<&str>) -> Failure {
        self.client_error(message.unwrap_or("Unprocessable Entity"), 422)
    }

    #[track_caller]
    pub fn error_internal(&self, message: Option<&str>) -> Failure {
        self.server_error(message.unwrap_or("Internal Error"), 500)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::config::EnvelopeConfig;
    use crate::failure::FailureKind;
    use crate::pagination::Page;

    fn body(response: ApiResponse) -> serde_json::Value {
        let text = response.into_body(&EnvelopeConfig::new()).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn success_defaults() {
        let factory = ResponseFactory;

        assert_eq!(
            body(factory.successful(None)),
            json!({"code": 200, "message": "Successful"})
        );
        assert_eq!(
            body(factory.created(json!({"id": 1}), None)),
            json!({"code": 201, "message": "Created", "data": {"id": 1}})
        );
        assert_eq!(
            body(factory.accepted(Content::Null, Some("Queued"))),
            json!({"code": 202, "message": "Queued"})
        );
        assert_eq!(
            body(factory.no_content(None)),
            json!({"code": 204, "message": "No Content"})
        );
    }

    #[test]
    fn collection_sets_list_flag() {
        let response = ResponseFactory.collection(json!([1, 2, 3])).std();
        assert_eq!(body(response)["data"], json!({"list": [1, 2, 3]}));
    }

    #[test]
    fn paginated_collection() {
        let page = Page::new(vec![json!({"id": 1})], 1, 10, 1);
        let response = body(ResponseFactory.collection(page));
        assert_eq!(response["data"], json!([{"id": 1}]));
        assert_eq!(response["meta"]["pagination"]["total"], 1);
    }

    #[test]
    fn item_and_array_are_equivalent() {
        let value = json!({"name": "x"});
        assert_eq!(
            body(ResponseFactory.item(value.clone())),
            body(ResponseFactory.array(value))
        );
    }

    #[test]
    fn named_errors_have_fixed_codes() {
        let factory = ResponseFactory;
        let cases = [
            (factory.error_bad_request(None), 400, "Bad Request"),
            (factory.error_unauthorized(None), 401, "Unauthorized"),
            (factory.error_forbidden(None), 403, "Forbidden"),
            (factory.error_not_found(None), 404, "Not Found"),
            (factory.error_method_not_allowed(None), 405, "Method Not Allowed"),
            (
                factory.error_unprocessable_entity(None),
                422,
                "Unprocessable Entity",
            ),
        ];
        for (failure, expected_code, expected_message) in cases {
            assert_matches!(
                failure.kind(),
                FailureKind::ClientError { code, message }
                    if *code == expected_code && message == expected_message
            );
        }

        assert_matches!(
            factory.error_internal(None).kind(),
            FailureKind::ServerError { code: 500, message } if message == "Internal Error"
        );
    }

    #[test]
    fn custom_error_message() {
        assert_matches!(
            ResponseFactory.error_not_found(Some("No such user")).kind(),
            FailureKind::ClientError { code: 404, message } if message == "No such user"
        );
    }

    #[test]
    fn error_location_is_the_call_site() {
        let line = line!() + 1;
        let failure = ResponseFactory.error_forbidden(None);
        assert_eq!(failure.line(), line);
    }
}

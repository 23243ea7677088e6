//! Email/password payload shared by the signup and login forms

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::error::ApiError;

/// Credentials submitted to `POST /signup` and `POST /login`
///
/// Both fields are optional at the parsing stage so that a missing field
/// becomes a validation failure instead of a body rejection. Accepted as
/// either JSON or an urlencoded form body.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct Credentials {
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
}

impl Credentials {
    /// Return both fields, or `MissingFields` if either is absent or empty
    ///
    /// An email made only of whitespace counts as empty, since it normalizes
    /// to nothing.
    pub fn into_parts(self) -> Result<(String, String), ApiError> {
        self.validate().map_err(|_| ApiError::MissingFields)?;

        match (self.email, self.password) {
            (Some(email), Some(password)) if !email.trim().is_empty() => Ok((email, password)),
            _ => Err(ApiError::MissingFields),
        }
    }
}

#[async_trait]
impl<S> FromRequest<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_ascii_lowercase());

        match content_type {
            Some(ct) if ct.starts_with("application/json") => {
                let Json(credentials) = Json::<Credentials>::from_request(req, state)
                    .await
                    .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
                Ok(credentials)
            }
            Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => {
                let Form(credentials) = Form::<Credentials>::from_request(req, state)
                    .await
                    .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
                Ok(credentials)
            }
            None => Ok(Credentials::default()),
            Some(other) => Err(ApiError::BadRequest(format!(
                "Unsupported content type: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = axum::http::Request::builder()
            .method("POST")
            .uri("/login");
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_parses_json_body() {
        let req = request(
            Some("application/json"),
            r#"{"email":"a@x.com","password":"pw"}"#,
        );
        let creds = Credentials::from_request(req, &()).await.unwrap();
        assert_eq!(
            creds.into_parts().unwrap(),
            ("a@x.com".to_string(), "pw".to_string())
        );
    }

    #[tokio::test]
    async fn test_parses_form_body() {
        let req = request(
            Some("application/x-www-form-urlencoded"),
            "email=a%40x.com&password=pw",
        );
        let creds = Credentials::from_request(req, &()).await.unwrap();
        assert_eq!(creds.email.as_deref(), Some("a@x.com"));
        assert_eq!(creds.password.as_deref(), Some("pw"));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_empty() {
        let req = request(None, "");
        let creds = Credentials::from_request(req, &()).await.unwrap();
        assert!(matches!(creds.into_parts(), Err(ApiError::MissingFields)));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let req = request(Some("application/json"), "{not json");
        let err = Credentials::from_request(req, &()).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_empty_or_missing_fields_rejected() {
        let missing_password = Credentials {
            email: Some("a@x.com".to_string()),
            password: None,
        };
        assert!(matches!(
            missing_password.into_parts(),
            Err(ApiError::MissingFields)
        ));

        let empty_email = Credentials {
            email: Some(String::new()),
            password: Some("pw".to_string()),
        };
        assert!(matches!(
            empty_email.into_parts(),
            Err(ApiError::MissingFields)
        ));

        let blank_email = Credentials {
            email: Some(" \t ".to_string()),
            password: Some("pw".to_string()),
        };
        assert!(matches!(
            blank_email.into_parts(),
            Err(ApiError::MissingFields)
        ));
    }
}

use reqwest::{multipart::Form, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use timemesh_api_structs::ErrorBody;

pub(crate) struct BaseClient {
    address: String,
    token: Option<String>,
    client: Client,
}

#[derive(Debug)]
pub enum APIError {
    Network,
    MalformedResponse,
    Unauthorized,
    NotFound(ErrorBody),
    UnexpectedStatusCode { status: StatusCode, body: ErrorBody },
}

impl APIError {
    /// The human readable reason the backend gave, if any
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::NotFound(body) | Self::UnexpectedStatusCode { body, .. } => body.text(),
            _ => None,
        }
    }
}

impl Display for APIError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network => write!(f, "Unable to reach the TimeMesh backend"),
            Self::MalformedResponse => write!(f, "The TimeMesh backend sent a malformed response"),
            Self::Unauthorized => write!(f, "The session token was rejected"),
            Self::NotFound(body) => write!(f, "Not found: {}", body.text().unwrap_or("-")),
            Self::UnexpectedStatusCode { status, body } => write!(
                f,
                "Unexpected status code {}: {}",
                status,
                body.text().unwrap_or("-")
            ),
        }
    }
}

impl std::error::Error for APIError {}

pub type APIResponse<T> = Result<T, APIError>;

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            address: address.trim_end_matches('/').to_string(),
            token: None,
            client: Client::new(),
        }
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    fn get_client(&self, method: Method, path: String) -> RequestBuilder {
        let url = format!("{}/{}", self.address, path);
        let builder = self.client.request(method, &url);

        if let Some(token) = &self.token {
            builder.header("Authorization", format!("Token {}", token))
        } else {
            builder
        }
    }

    async fn check_status_code(
        &self,
        res: Response,
        expected_status_code: StatusCode,
    ) -> APIResponse<Response> {
        let status = res.status();
        if status == expected_status_code {
            return Ok(res);
        }
        // Error bodies are best effort, the backend does not always send json
        let body = res.json::<ErrorBody>().await.unwrap_or_default();
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => APIError::Unauthorized,
            StatusCode::NOT_FOUND => APIError::NotFound(body),
            status => APIError::UnexpectedStatusCode { status, body },
        })
    }

    async fn get_json_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Response,
    ) -> APIResponse<T> {
        res.json::<T>()
            .await
            .map_err(|_| APIError::MalformedResponse)
    }

    async fn handle_api_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Response,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.check_status_code(res, expected_status_code).await?;
        self.get_json_response(res).await
    }

    async fn send(&self, builder: RequestBuilder) -> APIResponse<Response> {
        builder.send().await.map_err(|_| APIError::Network)
    }

    pub async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.send(self.get_client(Method::GET, path)).await?;
        self.handle_api_response(res, expected_status_code).await
    }

    /// The backend answers deletes with either `200` or `204`, the body is
    /// ignored.
    pub async fn delete(&self, path: String) -> APIResponse<()> {
        let res = self.send(self.get_client(Method::DELETE, path)).await?;
        let expected_status_code = match res.status() {
            StatusCode::OK => StatusCode::OK,
            _ => StatusCode::NO_CONTENT,
        };
        self.check_status_code(res, expected_status_code).await?;
        Ok(())
    }

    pub async fn put<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .send(self.get_client(Method::PUT, path).json(&body))
            .await?;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn post<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .send(self.get_client(Method::POST, path).json(&body))
            .await?;
        self.handle_api_response(res, expected_status_code).await
    }

    /// Posts a json body and returns the raw response bytes
    pub async fn post_for_bytes<S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<Vec<u8>> {
        let res = self
            .send(self.get_client(Method::POST, path).json(&body))
            .await?;
        let res = self.check_status_code(res, expected_status_code).await?;
        res.bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|_| APIError::Network)
    }

    /// Posts a multipart form, any successful status is accepted and the
    /// body is ignored
    pub async fn post_multipart(&self, form: Form, path: String) -> APIResponse<()> {
        let res = self
            .send(self.get_client(Method::POST, path).multipart(form))
            .await?;
        let expected_status_code = if res.status().is_success() {
            res.status()
        } else {
            StatusCode::OK
        };
        self.check_status_code(res, expected_status_code).await?;
        Ok(())
    }
}

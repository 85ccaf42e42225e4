use crate::models::menu::MenuItem;
use crate::models::user::UserSummary;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected response ({status}): {body}")]
    UnexpectedResponse { status: u16, body: String },
}

/// Every operation returns a tagged outcome: a success variant carrying its
/// payload and one variant per failure kind. There is no shared "maybe it
/// worked" shape a caller could misread as data.
#[derive(Debug)]
pub enum RegisterOutcome {
    Registered { message: String },
    AlreadyRegistered { message: String },
    Rejected { message: String },
    ServerError { message: String },
}

#[derive(Debug)]
pub enum SendOtpOutcome {
    Sent { message: String },
    UnknownEmail { message: String },
    ServerError { message: String },
}

#[derive(Debug)]
pub enum VerifyOtpOutcome {
    Verified { token: String, user: UserSummary },
    NoCode { message: String },
    WrongCode { message: String },
    UnknownUser { message: String },
    ServerError { message: String },
}

#[derive(Debug)]
pub enum LoginOutcome {
    Known { name: String, message: String },
    UnknownEmail { message: String },
    ServerError { message: String },
}

#[derive(Debug)]
pub enum MenuOutcome {
    Items(Vec<MenuItem>),
    ServerError { message: String },
}

#[derive(Debug)]
pub enum PaymentOutcome {
    Paid { order_id: String, message: String },
    Unauthorized { message: String },
    ServerError { message: String },
}

#[derive(Deserialize)]
struct MessageBody {
    message: Option<String>,
}

#[derive(Deserialize)]
struct VerifyBody {
    token: String,
    user: UserSummary,
}

#[derive(Deserialize)]
struct LoginBody {
    message: String,
    name: String,
}

#[derive(Deserialize)]
struct PaymentBody {
    #[serde(rename = "orderId")]
    order_id: String,
    message: String,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<RegisterOutcome, ApiError> {
        let response = self
            .http
            .post(self.url("/api/auth/register"))
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => Ok(RegisterOutcome::Registered {
                message: message_of(response).await,
            }),
            StatusCode::BAD_REQUEST => {
                let message = message_of(response).await;
                if message == "User already exists" {
                    Ok(RegisterOutcome::AlreadyRegistered { message })
                } else {
                    Ok(RegisterOutcome::Rejected { message })
                }
            }
            _ => Ok(RegisterOutcome::ServerError {
                message: message_of(response).await,
            }),
        }
    }

    pub async fn send_otp(&self, email: &str) -> Result<SendOtpOutcome, ApiError> {
        let response = self
            .http
            .post(self.url("/api/auth/send-otp"))
            .json(&json!({ "email": email }))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(SendOtpOutcome::Sent {
                message: message_of(response).await,
            }),
            StatusCode::NOT_FOUND => Ok(SendOtpOutcome::UnknownEmail {
                message: message_of(response).await,
            }),
            _ => Ok(SendOtpOutcome::ServerError {
                message: message_of(response).await,
            }),
        }
    }

    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<VerifyOtpOutcome, ApiError> {
        let response = self
            .http
            .post(self.url("/api/auth/verify-otp"))
            .json(&json!({ "email": email, "otp": otp }))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body = decode::<VerifyBody>(response).await?;
                Ok(VerifyOtpOutcome::Verified {
                    token: body.token,
                    user: body.user,
                })
            }
            StatusCode::BAD_REQUEST => {
                let message = message_of(response).await;
                if message == "Invalid OTP" {
                    Ok(VerifyOtpOutcome::WrongCode { message })
                } else {
                    Ok(VerifyOtpOutcome::NoCode { message })
                }
            }
            StatusCode::NOT_FOUND => Ok(VerifyOtpOutcome::UnknownUser {
                message: message_of(response).await,
            }),
            _ => Ok(VerifyOtpOutcome::ServerError {
                message: message_of(response).await,
            }),
        }
    }

    pub async fn login(&self, email: &str) -> Result<LoginOutcome, ApiError> {
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&json!({ "email": email }))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body = decode::<LoginBody>(response).await?;
                Ok(LoginOutcome::Known {
                    name: body.name,
                    message: body.message,
                })
            }
            StatusCode::NOT_FOUND => Ok(LoginOutcome::UnknownEmail {
                message: message_of(response).await,
            }),
            _ => Ok(LoginOutcome::ServerError {
                message: message_of(response).await,
            }),
        }
    }

    pub async fn fetch_menu(
        &self,
        is_veg: Option<bool>,
        search: Option<&str>,
    ) -> Result<MenuOutcome, ApiError> {
        let mut request = self.http.get(self.url("/api/menu"));
        if let Some(is_veg) = is_veg {
            request = request.query(&[("isVeg", if is_veg { "true" } else { "false" })]);
        }
        if let Some(search) = search {
            request = request.query(&[("search", search)]);
        }

        let response = request.send().await?;

        match response.status() {
            StatusCode::OK => {
                let items = decode::<Vec<MenuItem>>(response).await?;
                Ok(MenuOutcome::Items(items))
            }
            _ => Ok(MenuOutcome::ServerError {
                message: message_of(response).await,
            }),
        }
    }

    pub async fn process_payment(
        &self,
        token: &str,
        amount: i64,
        items: &serde_json::Value,
    ) -> Result<PaymentOutcome, ApiError> {
        let response = self
            .http
            .post(self.url("/api/payment/process"))
            .bearer_auth(token)
            .json(&json!({ "amount": amount, "items": items }))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body = decode::<PaymentBody>(response).await?;
                Ok(PaymentOutcome::Paid {
                    order_id: body.order_id,
                    message: body.message,
                })
            }
            StatusCode::UNAUTHORIZED => Ok(PaymentOutcome::Unauthorized {
                message: message_of(response).await,
            }),
            _ => Ok(PaymentOutcome::ServerError {
                message: message_of(response).await,
            }),
        }
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|_| ApiError::UnexpectedResponse {
        status: status.as_u16(),
        body,
    })
}

async fn message_of(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<MessageBody>().await {
        Ok(body) => body
            .message
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string()),
        Err(_) => status.canonical_reason().unwrap_or("unknown").to_string(),
    }
}

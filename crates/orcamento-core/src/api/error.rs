//! Errors raised while talking to the REST API.

use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request never got a response (DNS, connection, CORS, aborted fetch)
    #[error("Falha de conexão: {0}")]
    Transport(String),

    /// Server answered with a non-2xx status
    #[error("Erro {status}: {message}")]
    Status { status: u16, message: String },

    /// 2xx without the body the call needs
    #[error("Resposta vazia do servidor")]
    EmptyBody,

    /// Body present but not in the expected shape
    #[error("Resposta inválida: {0}")]
    Decode(String),

    /// Login attempted with a missing field
    #[error("{0}")]
    Invalid(String),
}

impl ApiError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// HTTP status when the server answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 401/403: the session token is missing or no longer accepted
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status_code(), Some(401 | 403))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_helpers() {
        let err = ApiError::status(401, "token expirado");
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Erro 401: token expirado");
        assert_eq!(ApiError::EmptyBody.status_code(), None);
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let err: ApiError = serde_json::from_str::<u32>("\"x\"").unwrap_err().into();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}

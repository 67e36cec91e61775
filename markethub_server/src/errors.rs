use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use markethub_engine::{
    AuditApiError,
    CartApiError,
    CatalogApiError,
    FaqApiError,
    IdentityApiError,
    NotificationApiError,
    OrderApiError,
    ReviewApiError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Payload deserialization error")]
    CouldNotDeserializePayload,
    #[error("{0}")]
    InvalidInput(String),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("Insufficient Permissions. {0}")]
    Forbidden(String),
    #[error("{0}")]
    Conflict(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("Authentication Error. {0}")]
    AuthenticationError(#[from] AuthError),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::CouldNotDeserializePayload => StatusCode::BAD_REQUEST,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::AuthenticationError(e) => match e {
                AuthError::MissingToken => StatusCode::UNAUTHORIZED,
                AuthError::ValidationError(_) => StatusCode::UNAUTHORIZED,
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::AccountNotVerified => StatusCode::FORBIDDEN,
                AuthError::InsufficientPermissions(_) => StatusCode::FORBIDDEN,
                AuthError::HashingError(_) => StatusCode::INTERNAL_SERVER_ERROR,
                AuthError::CouldNotSerializeToken(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("No token provided.")]
    MissingToken,
    #[error("Bearer token is invalid. {0}")]
    ValidationError(String),
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error("Please verify your email before logging in.")]
    AccountNotVerified,
    #[error("Insufficient Permissions. {0}")]
    InsufficientPermissions(String),
    #[error("Could not hash the credential. {0}")]
    HashingError(String),
    #[error("Could not serialize access token. {0}")]
    CouldNotSerializeToken(String),
}

impl From<IdentityApiError> for ServerError {
    fn from(e: IdentityApiError) -> Self {
        match e {
            IdentityApiError::EmailInUse(_) => Self::Conflict(e.to_string()),
            IdentityApiError::UserNotFound(_) | IdentityApiError::EmailNotFound(_) => {
                Self::NoRecordFound(e.to_string())
            },
            IdentityApiError::NotAVendor(_) | IdentityApiError::AlreadyVerified(_) => {
                Self::InvalidInput(e.to_string())
            },
            IdentityApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<CatalogApiError> for ServerError {
    fn from(e: CatalogApiError) -> Self {
        match e {
            CatalogApiError::ProductNotFound(_) => Self::NoRecordFound(e.to_string()),
            CatalogApiError::NotYourProduct => Self::Forbidden(e.to_string()),
            CatalogApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<CartApiError> for ServerError {
    fn from(e: CartApiError) -> Self {
        match e {
            CartApiError::InvalidQuantity(_) => Self::InvalidInput(e.to_string()),
            CartApiError::CartNotFound | CartApiError::ProductNotInCart(_) | CartApiError::ProductNotFound(_) => {
                Self::NoRecordFound(e.to_string())
            },
            CartApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<OrderApiError> for ServerError {
    fn from(e: OrderApiError) -> Self {
        match e {
            OrderApiError::EmptyOrder => Self::InvalidInput(e.to_string()),
            // The order exists but cannot move from where it is. 400, not 404.
            OrderApiError::NotCancellable(_) => Self::InvalidInput(e.to_string()),
            OrderApiError::ProductNotFound(_) | OrderApiError::OrderNotFound(_) => Self::NoRecordFound(e.to_string()),
            OrderApiError::NotYourOrder | OrderApiError::RoleNotAllowed(_) => Self::Forbidden(e.to_string()),
            OrderApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<NotificationApiError> for ServerError {
    fn from(e: NotificationApiError) -> Self {
        match e {
            NotificationApiError::NotificationNotFound(_) => Self::NoRecordFound(e.to_string()),
            NotificationApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<ReviewApiError> for ServerError {
    fn from(e: ReviewApiError) -> Self {
        match e {
            ReviewApiError::ReviewNotFound(_) => Self::NoRecordFound(e.to_string()),
            ReviewApiError::NotYourReview => Self::Forbidden(e.to_string()),
            ReviewApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<FaqApiError> for ServerError {
    fn from(e: FaqApiError) -> Self {
        match e {
            FaqApiError::FaqNotFound(_) => Self::NoRecordFound(e.to_string()),
            FaqApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<AuditApiError> for ServerError {
    fn from(e: AuditApiError) -> Self {
        match e {
            AuditApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

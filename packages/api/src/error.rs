use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::services::errors::{
    auth_service_errors::AuthServiceError, chat_service_errors::ChatServiceError,
    game_service_errors::GameServiceError, membership_service_errors::MembershipServiceError,
    notification_service_errors::NotificationServiceError,
    profile_service_errors::ProfileServiceError,
};

#[derive(Debug)]
pub enum ApiError {
    AuthService(AuthServiceError),
    ProfileService(ProfileServiceError),
    GameService(GameServiceError),
    MembershipService(MembershipServiceError),
    NotificationService(NotificationServiceError),
    ChatService(ChatServiceError),
    Unauthorized,
}

impl From<AuthServiceError> for ApiError {
    fn from(error: AuthServiceError) -> Self {
        ApiError::AuthService(error)
    }
}

impl From<ProfileServiceError> for ApiError {
    fn from(error: ProfileServiceError) -> Self {
        ApiError::ProfileService(error)
    }
}

impl From<GameServiceError> for ApiError {
    fn from(error: GameServiceError) -> Self {
        ApiError::GameService(error)
    }
}

impl From<MembershipServiceError> for ApiError {
    fn from(error: MembershipServiceError) -> Self {
        ApiError::MembershipService(error)
    }
}

impl From<NotificationServiceError> for ApiError {
    fn from(error: NotificationServiceError) -> Self {
        ApiError::NotificationService(error)
    }
}

impl From<ChatServiceError> for ApiError {
    fn from(error: ChatServiceError) -> Self {
        ApiError::ChatService(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            // Any defect in the presented credentials reads as unauthorized.
            ApiError::AuthService(
                AuthServiceError::InvalidToken
                | AuthServiceError::ExpiredToken
                | AuthServiceError::ValidationError(_),
            ) => StatusCode::UNAUTHORIZED,

            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,

            ApiError::ProfileService(ProfileServiceError::ProfileNotFound) => StatusCode::NOT_FOUND,
            ApiError::ProfileService(ProfileServiceError::ValidationError(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ProfileService(ProfileServiceError::RepositoryError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            ApiError::GameService(GameServiceError::GameNotFound) => StatusCode::NOT_FOUND,
            ApiError::GameService(GameServiceError::Unauthorized) => StatusCode::FORBIDDEN,
            ApiError::GameService(
                GameServiceError::ValidationError(_) | GameServiceError::InvalidSchedule(_),
            ) => StatusCode::BAD_REQUEST,
            ApiError::GameService(GameServiceError::Conflict) => StatusCode::CONFLICT,
            ApiError::GameService(GameServiceError::RepositoryError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            ApiError::MembershipService(
                MembershipServiceError::GameNotFound
                | MembershipServiceError::RequestNotFound
                | MembershipServiceError::ParticipantNotFound,
            ) => StatusCode::NOT_FOUND,
            ApiError::MembershipService(MembershipServiceError::Unauthorized) => {
                StatusCode::FORBIDDEN
            }
            ApiError::MembershipService(
                MembershipServiceError::AlreadyMember
                | MembershipServiceError::CapacityExceeded
                | MembershipServiceError::Conflict,
            ) => StatusCode::CONFLICT,
            ApiError::MembershipService(
                MembershipServiceError::GameCompleted | MembershipServiceError::OrganizerImmovable,
            ) => StatusCode::BAD_REQUEST,
            ApiError::MembershipService(MembershipServiceError::RepositoryError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            ApiError::NotificationService(NotificationServiceError::NotificationNotFound) => {
                StatusCode::NOT_FOUND
            }
            ApiError::NotificationService(NotificationServiceError::Unauthorized) => {
                StatusCode::FORBIDDEN
            }
            ApiError::NotificationService(NotificationServiceError::RepositoryError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            ApiError::ChatService(ChatServiceError::ValidationError(_)) => StatusCode::BAD_REQUEST,
            ApiError::ChatService(ChatServiceError::RepositoryError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        status.into_response()
    }
}

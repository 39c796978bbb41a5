use lambda_http::{run, tracing, Error};
use std::env::set_var;
use std::sync::Arc;

use api::{app, state::AppState};
use shared::geocoding::HttpGeocoder;
use shared::repositories::game_repository::DynamoDbGameRepository;
use shared::repositories::message_repository::DynamoDbMessageRepository;
use shared::repositories::notification_repository::DynamoDbNotificationRepository;
use shared::repositories::user_repository::DynamoDbUserRepository;
use shared::services::auth_service::AuthService;
use shared::services::chat_service::ChatService;
use shared::services::game_service::GameService;
use shared::services::membership_service::MembershipService;
use shared::services::notification_service::NotificationService;
use shared::services::profile_service::ProfileService;

#[tokio::main]
async fn main() -> Result<(), Error> {
    set_var("AWS_LAMBDA_HTTP_IGNORE_STAGE_IN_PATH", "true");

    // required to enable CloudWatch error logging by the runtime
    tracing::init_default_subscriber();

    // Set up services
    let config = aws_config::load_from_env().await;
    let client = aws_sdk_dynamodb::Client::new(&config);

    let game_repository = Arc::new(DynamoDbGameRepository::new(client.clone()));
    let user_repository = Arc::new(DynamoDbUserRepository::new(client.clone()));
    let notification_repository = Arc::new(DynamoDbNotificationRepository::new(client.clone()));
    let message_repository = Arc::new(DynamoDbMessageRepository::new(client.clone()));

    let auth_service = Arc::new(AuthService::new());
    let notification_service = Arc::new(NotificationService::new(notification_repository));
    let profile_service = Arc::new(ProfileService::new(user_repository.clone()));
    let game_service = Arc::new(GameService::new(
        game_repository.clone(),
        notification_service.clone(),
        Arc::new(HttpGeocoder::new()),
    ));
    let membership_service = Arc::new(MembershipService::new(
        game_repository,
        user_repository,
        notification_service.clone(),
    ));
    let chat_service = Arc::new(ChatService::new(message_repository));

    let app_state = AppState {
        auth_service,
        profile_service,
        game_service,
        membership_service,
        notification_service,
        chat_service,
    };

    run(app(app_state)).await
}

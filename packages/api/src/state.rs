use std::sync::Arc;

use shared::services::auth_service::AuthService;
use shared::services::chat_service::ChatService;
use shared::services::game_service::GameService;
use shared::services::membership_service::MembershipService;
use shared::services::notification_service::NotificationService;
use shared::services::profile_service::ProfileService;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub profile_service: Arc<ProfileService>,
    pub game_service: Arc<GameService>,
    pub membership_service: Arc<MembershipService>,
    pub notification_service: Arc<NotificationService>,
    pub chat_service: Arc<ChatService>,
}

// Application state for HTTP handlers
use crate::application::chat_service::ChatService;
use crate::application::degree_day_service::DegreeDayService;

#[derive(Clone)]
pub struct AppState {
    pub degree_day_service: DegreeDayService,
    pub chat_service: ChatService,
}

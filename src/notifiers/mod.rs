mod telegram;

use crate::core::errors::DeliveryError;
use async_trait::async_trait;

pub use telegram::TelegramNotifier;

#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &'static str;
    async fn notify(&self, message: &str) -> Result<(), DeliveryError>;
}

//! Services module
//!
//! Outbound messaging, image hosting and bulk notifications

pub mod gateway;
pub mod image;
pub mod notification;

// Re-export commonly used services
pub use gateway::{InlineButton, Markup, MessagingGateway, PhotoSource, TelegramGateway};
pub use image::{ImageDelivery, ImageHosting, TelegramImageHost};
pub use notification::{BulkReport, NotificationService};

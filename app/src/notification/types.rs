//! Presentation payload handed to the surface.

use std::time::Duration;

use banner_core::{BannerPosition, NotificationRequest};

/// Everything a presentation surface needs to draw one banner. The
/// scheduler never looks inside the hint fields.
#[derive(Debug, Clone)]
pub struct PresentationSpec {
    pub title: String,
    pub message: String,
    pub position: BannerPosition,
    pub use_primary_screen: bool,
    pub ttl: Duration,
    pub image: Option<String>,
    pub color: Option<String>,
    pub scale_percent: u32,
    pub sound: Option<String>,
}

/// How presentation payloads are derived from requests. Injected into the
/// scheduler so it stays free of rendering concerns.
pub type SpecFn = fn(&NotificationRequest) -> PresentationSpec;

/// Default spec builder: a direct projection of the request.
pub fn presentation_spec(request: &NotificationRequest) -> PresentationSpec {
    PresentationSpec {
        title: request.title.clone(),
        message: request.message.clone(),
        position: request.position,
        use_primary_screen: request.use_primary_screen,
        ttl: Duration::from_secs(request.ttl_seconds),
        image: request.hints.image.clone(),
        color: request.hints.color.clone(),
        scale_percent: request.hints.scale_percent,
        sound: request.hints.sound.clone(),
    }
}

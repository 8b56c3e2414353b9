//! Public page with the booking form.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::filters;
use crate::middleware::OptionalAdmin;

/// An outbound link to a streaming platform.
#[derive(Debug, Clone, Copy)]
pub struct PlatformLink {
    pub name: &'static str,
    pub url: &'static str,
}

/// Streaming platforms listed in the music section.
pub const PLATFORM_LINKS: &[PlatformLink] = &[
    PlatformLink {
        name: "Spotify",
        url: "https://open.spotify.com/artist/0xyaYBhWaHUExO14cfrdqL",
    },
    PlatformLink {
        name: "Apple Music",
        url: "https://music.apple.com/us/artist/zikopoly/1733674076",
    },
    PlatformLink {
        name: "YouTube",
        url: "https://youtube.com/@zikofranco6572",
    },
    PlatformLink {
        name: "SoundCloud",
        url: "https://on.soundcloud.com/JtML242w1RrNaqUWBO",
    },
];

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub links: &'static [PlatformLink],
    pub admin_logged_in: bool,
}

/// Display the home page.
///
/// The booking form posts JSON to `/api/booking` from `static/js/booking.js`.
#[instrument(skip_all)]
pub async fn home(OptionalAdmin(admin): OptionalAdmin) -> impl IntoResponse {
    HomeTemplate {
        links: PLATFORM_LINKS,
        admin_logged_in: admin.is_some(),
    }
}

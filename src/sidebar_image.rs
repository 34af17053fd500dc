use serde::Serialize;
use std::time::Duration;

pub const SIDEBAR_IMAGE_URL: &str =
    "https://3.bp.blogspot.com/_UaJWUMI3LDg/TOS0kZnRCCI/AAAAAAAAAB4/nodyhhiM1PY/s1600/CIMG0443.JPG";
pub const SIDEBAR_IMAGE_CAPTION: &str = "Bike Sharing Dataset";

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "lowercase")]
pub enum ImageStatus {
    /// No probe was made (`--offline`).
    Unchecked,
    Available,
    Unavailable(String),
}

impl ImageStatus {
    pub fn describe(&self) -> String {
        match self {
            ImageStatus::Unchecked => "not checked".to_string(),
            ImageStatus::Available => "available".to_string(),
            ImageStatus::Unavailable(reason) => format!("unavailable: {}", reason),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SidebarImage {
    pub url: String,
    pub caption: String,
    pub status: ImageStatus,
}

impl SidebarImage {
    pub fn unchecked() -> Self {
        Self {
            url: SIDEBAR_IMAGE_URL.to_string(),
            caption: SIDEBAR_IMAGE_CAPTION.to_string(),
            status: ImageStatus::Unchecked,
        }
    }

    /// Check the decorative image with a HEAD request. Never fails: an unreachable
    /// image only changes the status shown next to the caption.
    pub async fn probe() -> Self {
        let status = probe_url(SIDEBAR_IMAGE_URL).await;
        if let ImageStatus::Unavailable(reason) = &status {
            tracing::warn!(url = SIDEBAR_IMAGE_URL, %reason, "Sidebar image is unavailable");
        }
        Self {
            status,
            ..Self::unchecked()
        }
    }
}

pub async fn probe_url(url: &str) -> ImageStatus {
    let client = match reqwest::Client::builder().timeout(PROBE_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => return ImageStatus::Unavailable(e.to_string()),
    };

    match client.head(url).send().await {
        Ok(response) if response.status().is_success() => ImageStatus::Available,
        Ok(response) => ImageStatus::Unavailable(format!("HTTP {}", response.status())),
        Err(e) if e.is_timeout() => ImageStatus::Unavailable("timed out".to_string()),
        Err(e) => ImageStatus::Unavailable(e.to_string()),
    }
}

/// Name of the `<meta>` tag in the host page that carries the deployment-time
/// base address of the game server.
pub const STATUS_BASE_ADDRESS_KEY: &str = "ss14:status-base-address";

const DEFAULT_STATUS_BASE_ADDRESS: &str = "http://localhost:1212/";

#[derive(Clone, Debug, PartialEq)]
pub struct StatusConfig {
    pub status_base_address: String,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            status_base_address: DEFAULT_STATUS_BASE_ADDRESS.to_string(),
        }
    }
}

impl StatusConfig {
    /// Builds a config from a raw configuration value. A missing or blank
    /// value falls back to the default; the address is normalized to always
    /// end with a trailing slash.
    pub fn from_value(value: Option<&str>) -> Self {
        let raw = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_STATUS_BASE_ADDRESS);

        let mut status_base_address = raw.to_string();
        if !status_base_address.ends_with('/') {
            status_base_address.push('/');
        }

        Self { status_base_address }
    }

    /// Reads the base address from the host page's meta tags.
    #[cfg(target_arch = "wasm32")]
    pub fn from_document(document: &web_sys::Document) -> Self {
        use log::warn;

        let selector = format!("meta[name=\"{}\"]", STATUS_BASE_ADDRESS_KEY);
        let value = match document.query_selector(&selector) {
            Ok(meta) => meta.and_then(|m| m.get_attribute("content")),
            Err(_) => {
                warn!("Failed to query {} meta tag", STATUS_BASE_ADDRESS_KEY);
                None
            }
        };
        Self::from_value(value.as_deref())
    }

    /// URL of the status endpoint, relative path `status` against the base.
    pub fn status_url(&self) -> String {
        format!("{}status", self.status_base_address)
    }
}

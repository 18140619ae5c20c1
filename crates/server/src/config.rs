use serde::Deserialize;

/// Top-level configuration for the beamdrop server, loaded from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct BeamdropConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Upload spool configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Token signing configuration.
    #[serde(default)]
    pub token: TokenConfig,
}

/// HTTP server bind configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to. Defaults to all interfaces so scanned links work
    /// from other devices on the LAN.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Absolute base URL for download links (e.g. `http://share.lan:3002`).
    ///
    /// If not set, links are built from the first routable LAN address at
    /// upload time.
    pub external_url: Option<String>,
    /// Maximum accepted upload body size in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            external_url: None,
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

fn default_port() -> u16 {
    3002
}

fn default_max_upload_bytes() -> usize {
    256 * 1024 * 1024
}

/// Upload spool configuration.
#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// Directory uploaded blobs are spooled under.
    #[serde(default = "default_spool_dir")]
    pub spool_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            spool_dir: default_spool_dir(),
        }
    }
}

fn default_spool_dir() -> String {
    "spool".to_owned()
}

/// Token signing configuration.
///
/// The signing secret is injected, never compiled in: the
/// `BEAMDROP_TOKEN_SECRET` environment variable wins, then the config value.
/// With neither present a random per-process secret is generated, which means
/// outstanding links die with the process.
#[derive(Debug, Default, Deserialize)]
pub struct TokenConfig {
    /// Signing secret, used when `BEAMDROP_TOKEN_SECRET` is unset.
    pub secret: Option<String>,
    /// Verification-only secret accepted alongside the current one.
    ///
    /// To rotate: move the old secret here, put the new one in `secret`, and
    /// restart. Links signed before the rotation keep working until they
    /// expire.
    pub previous_secret: Option<String>,
}

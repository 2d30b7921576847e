use serde::{Deserialize, Serialize};

/// 16 MiB
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 16 * 1024 * 1024;

/// `modules.api_ingress` section of the application config.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ApiIngressConfig {
    /// Attach a permissive CORS layer.
    pub cors_enabled: bool,
    /// Largest accepted request body.
    pub body_limit_bytes: usize,
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self {
            cors_enabled: false,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// CUIT the service authenticates to the registry as (cuitRepresentada).
    pub cuit: u64,
    /// PEM certificate enrolled with the registry.
    pub cert: String,
    /// Private key for the enrolled certificate.
    pub key: String,
    /// Afip SDK bridge access token.
    pub access_token: String,
    /// True targets the production registry, false the testing one.
    pub production: bool,
    pub sdk_base_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            cuit: std::env::var("AFIP_CUIT")
                .or_else(|_| std::env::var("cuit"))
                .map_err(|_| anyhow::anyhow!("AFIP_CUIT or cuit environment variable required"))
                .and_then(|cuit| {
                    if cuit.trim().is_empty() {
                        anyhow::bail!("AFIP_CUIT cannot be empty");
                    }
                    cuit.trim()
                        .parse::<u64>()
                        .map_err(|_| anyhow::anyhow!("AFIP_CUIT must be an 11-digit number"))
                })?,
            cert: std::env::var("AFIP_CERT")
                .or_else(|_| std::env::var("cert"))
                .map_err(|_| anyhow::anyhow!("AFIP_CERT or cert environment variable required"))
                .and_then(|cert| {
                    if cert.trim().is_empty() {
                        anyhow::bail!("AFIP_CERT cannot be empty");
                    }
                    Ok(cert)
                })?,
            key: std::env::var("AFIP_KEY")
                .or_else(|_| std::env::var("key"))
                .map_err(|_| anyhow::anyhow!("AFIP_KEY or key environment variable required"))
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("AFIP_KEY cannot be empty");
                    }
                    Ok(key)
                })?,
            access_token: std::env::var("AFIP_ACCESS_TOKEN")
                .or_else(|_| std::env::var("access_token"))
                .map_err(|_| {
                    anyhow::anyhow!("AFIP_ACCESS_TOKEN or access_token environment variable required")
                })
                .and_then(|token| {
                    if token.trim().is_empty() {
                        anyhow::bail!("AFIP_ACCESS_TOKEN cannot be empty");
                    }
                    Ok(token)
                })?,
            production: std::env::var("AFIP_PRODUCTION")
                .or_else(|_| std::env::var("production"))
                .map(|raw| matches!(raw.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
                .unwrap_or(true),
            sdk_base_url: std::env::var("AFIP_SDK_URL")
                .ok()
                .filter(|url| !url.trim().is_empty())
                .map(|url| {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("AFIP_SDK_URL must start with http:// or https://");
                    }
                    Ok(url.trim_end_matches('/').to_string())
                })
                .transpose()?
                .unwrap_or_else(|| "https://app.afipsdk.com".to_string()),
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("AFIP SDK URL: {}", config.sdk_base_url);
        tracing::debug!("AFIP environment: {}", config.environment());
        tracing::debug!("Represented CUIT: {}", config.cuit);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    /// Environment name the bridge expects in request bodies.
    pub fn environment(&self) -> &'static str {
        if self.production {
            "prod"
        } else {
            "dev"
        }
    }
}

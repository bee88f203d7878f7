use reqwest::{Client, Proxy};

use crate::error::{AiError, Result};

const DISABLE_SYSTEM_PROXY_ENV: &str = "CHATRELAY_DISABLE_SYSTEM_PROXY";

/// Build the shared HTTP client, routing through `proxy` when one is configured.
pub(crate) fn build_http_client(proxy: Option<&str>) -> Result<Client> {
    let mut builder = Client::builder();

    if let Some(url) = proxy.map(str::trim).filter(|url| !url.is_empty()) {
        let proxy = Proxy::all(url)
            .map_err(|e| AiError::Config(format!("invalid proxy url '{url}': {e}")))?;
        builder = builder.proxy(proxy);
    } else if should_disable_system_proxy() {
        builder = builder.no_proxy();
    }

    Ok(builder.build()?)
}

fn should_disable_system_proxy() -> bool {
    if std::env::var_os(DISABLE_SYSTEM_PROXY_ENV).is_some() {
        return true;
    }

    cfg!(test)
}

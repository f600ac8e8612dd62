use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

const DEFAULT_FIRMS_API_URL: &str = "https://www.adgm.com/api/fsf/GetFirms?sc_itemid=fcea6284-884f-40f5-a6ba-f2179587e043&sc_mode=normal&companyStatus=&regulatedActivity=&query=&orderByField=name_srt&orderDesc=false";
const DEFAULT_FIRMS_REFERER: &str = "https://www.adgm.com/public-registers/fsra";
const DEFAULT_PRACTITIONERS_API_URL: &str = "https://www.adgm.com/api/RegisterOfInsolvencyPractitioners/GetInsolvencyPractitioners?sc_itemid=0a357a20-c08e-4db6-a2ab-e72afd4b9d86&sc_mode=normal&query=&orderByField=custom_sort_title_s&orderDesc=false";
const DEFAULT_PRACTITIONERS_REFERER: &str = "https://www.adgm.com/operating-in-adgm/insolvency-practitioners/register-of-insolvency-practitioners";
const DEFAULT_BASE_ORIGIN: &str = "https://www.adgm.com";
const DEFAULT_SESSION_COOKIE: &str = "ASP.NET_SessionId=3epzzifawutuj1vd1qxc1upr; SC_ANALYTICS_GLOBAL_COOKIE=e3e8a900f47d49efa098a5b3d735a98e|False; adgm#sc_mode=normal";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/129.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if an env-var override has an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if an env-var override has an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing logic, decoupled from the actual environment so it
/// can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
/// Every variable has a default, so an empty environment yields the live-portal
/// configuration.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let firms_api_url = or_default("ADGMREG_FIRMS_API_URL", DEFAULT_FIRMS_API_URL);
    let firms_referer = or_default("ADGMREG_FIRMS_REFERER", DEFAULT_FIRMS_REFERER);
    let practitioners_api_url = or_default(
        "ADGMREG_PRACTITIONERS_API_URL",
        DEFAULT_PRACTITIONERS_API_URL,
    );
    let practitioners_referer = or_default(
        "ADGMREG_PRACTITIONERS_REFERER",
        DEFAULT_PRACTITIONERS_REFERER,
    );
    let base_origin = or_default("ADGMREG_BASE_ORIGIN", DEFAULT_BASE_ORIGIN);
    let session_cookie = or_default("ADGMREG_SESSION_COOKIE", DEFAULT_SESSION_COOKIE);

    let page_size = parse_usize("ADGMREG_PAGE_SIZE", "10")?;
    let detail_concurrency = parse_usize("ADGMREG_DETAIL_CONCURRENCY", "5")?;
    let request_timeout_secs = parse_u64("ADGMREG_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("ADGMREG_USER_AGENT", DEFAULT_USER_AGENT);
    let output_root = PathBuf::from(or_default("ADGMREG_OUTPUT_ROOT", "."));

    Ok(AppConfig {
        firms_api_url,
        firms_referer,
        practitioners_api_url,
        practitioners_referer,
        base_origin,
        session_cookie,
        page_size,
        detail_concurrency,
        request_timeout_secs,
        user_agent,
        output_root,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

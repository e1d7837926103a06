pub const APP_NAME: &str = "SNLH Logistics Desk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_TAG: Option<&str> = option_env!("GIT_TAG");

pub fn version_label() -> String {
    if let Some(tag) = GIT_TAG {
        tag.to_string()
    } else {
        format!("v{}", APP_VERSION)
    }
}

/// User agent for outbound HTTP requests.
pub fn user_agent() -> String {
    format!("logistics-desk/{}", version_label().trim_start_matches('v'))
}

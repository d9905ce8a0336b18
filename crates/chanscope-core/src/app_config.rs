use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub neynar_api_key: String,
    pub neynar_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub page_size: u32,
    pub max_requests: u32,
    pub inter_request_delay_ms: u64,
    pub output_dir: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("neynar_api_key", &"[redacted]")
            .field("neynar_base_url", &self.neynar_base_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("page_size", &self.page_size)
            .field("max_requests", &self.max_requests)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

use envconfig::Envconfig;

#[derive(Envconfig, Debug, Clone)]
pub struct Config {
    #[envconfig(from = "DASHBOARD_BASE_URL", default = "http://localhost:8080")]
    pub base_url: String,
    #[envconfig(from = "DASHBOARD_REQUEST_TIMEOUT_SECS", default = "10")]
    pub request_timeout_secs: u64,
}

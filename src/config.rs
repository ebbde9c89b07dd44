use clap::Parser;

// CLI argument structure, every flag also falls back to the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "humanivio-api")]
#[command(about = "Rewrites text to read as human-written, with a per-IP daily quota")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    // Credential for the completion API
    #[arg(long, env = "OPENAI_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    // Max humanize requests per client per window
    #[arg(long, env = "DAILY_LIMIT", default_value_t = 1000)]
    pub daily_limit: u32,

    // Quota window in seconds
    #[arg(long, env = "QUOTA_WINDOW_SECS", default_value_t = 86_400)]
    pub quota_window: u64,

    // Base URL of the completion API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub upstream_url: String,

    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-3.5-turbo")]
    pub model: String,

    // Upstream call timeout in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 60)]
    pub upstream_timeout: u64,

    // How often expired quota records are evicted
    #[arg(long, env = "QUOTA_SWEEP_SECS", default_value_t = 3600)]
    pub sweep_interval: u64,
}

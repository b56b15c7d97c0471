pub mod domain;
pub mod picks;

pub mod config {
    #[derive(Debug, Clone)]
    pub struct Settings {
        pub sentry_dsn: Option<String>,
        pub port: Option<u16>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
                port: std::env::var("PORT").ok().and_then(|v| v.parse().ok()),
            })
        }
    }
}

use std::path::PathBuf;
use std::time::Duration;

/// Contact address used when `SEC_CONTACT_EMAIL` is not set.
pub const DEFAULT_CONTACT_EMAIL: &str = "change-me@example.com";

/// Ticker used when neither the command line nor `ANALYST_DEFAULT_TICKER` names one.
pub const DEFAULT_TICKER: &str = "AAPL";

/// Number of highlight sentences per section.
pub const DEFAULT_HIGHLIGHTS: usize = 3;

/// Configuration for the EDGAR HTTP client
#[derive(Debug, Clone)]
pub struct EdgarConfig {
    /// User agent string for HTTP requests
    pub user_agent: String,
    /// Rate limit in requests per second
    pub rate_limit: u32,
    /// HTTP request timeout
    pub timeout: Duration,
    /// Base URLs for the EDGAR services we talk to
    pub base_urls: EdgarUrls,
}

/// Base URLs for different EDGAR services
#[derive(Debug, Clone)]
pub struct EdgarUrls {
    /// Base URL for EDGAR archives (filing documents and index pages)
    pub archives: String,
    /// Base URL for EDGAR data (submissions JSON)
    pub data: String,
    /// Base URL for EDGAR files (ticker mapping)
    pub files: String,
}

impl Default for EdgarUrls {
    fn default() -> Self {
        Self {
            archives: "https://www.sec.gov/Archives/edgar".to_string(),
            data: "https://data.sec.gov".to_string(),
            files: "https://www.sec.gov/files".to_string(),
        }
    }
}

impl Default for EdgarConfig {
    fn default() -> Self {
        Self {
            user_agent: user_agent_for(DEFAULT_CONTACT_EMAIL),
            rate_limit: 10,
            timeout: Duration::from_secs(30),
            base_urls: EdgarUrls::default(),
        }
    }
}

impl EdgarConfig {
    /// Creates a new EdgarConfig with custom settings
    ///
    /// ```rust
    /// use edgar_digest::{Edgar, EdgarConfig};
    /// use std::time::Duration;
    ///
    /// let config = EdgarConfig::new("research_tool/1.0 (me@example.com)", 5, Duration::from_secs(60), None);
    /// let edgar = Edgar::with_config(config)?;
    /// # Ok::<(), edgar_digest::DigestError>(())
    /// ```
    pub fn new(
        user_agent: impl Into<String>,
        rate_limit: u32,
        timeout: Duration,
        base_urls: Option<EdgarUrls>,
    ) -> Self {
        Self {
            user_agent: user_agent.into(),
            rate_limit,
            timeout,
            base_urls: base_urls.unwrap_or_default(),
        }
    }
}

/// SEC fair-access policy asks for a contact address in the User-Agent.
pub fn user_agent_for(contact_email: &str) -> String {
    format!(
        "edgar-digest/{} (+{})",
        env!("CARGO_PKG_VERSION"),
        contact_email
    )
}

/// Everything one run of the analyst pipeline needs.
///
/// Built once at the entry point and passed down explicitly; nothing below
/// the binary reads the process environment.
#[derive(Debug, Clone)]
pub struct DigestConfig {
    pub contact_email: String,
    pub default_ticker: String,
    /// Form types accepted as "latest filing", in no particular order.
    pub forms: Vec<String>,
    /// Highlight sentences per section (`k`).
    pub highlights: usize,
    /// Root of the flat-file caches (ticker map, downloaded documents).
    pub data_dir: PathBuf,
    /// Reports are written to `<output_dir>/<module>/docs/index.html`.
    pub output_dir: PathBuf,
    pub nav_modules: Vec<String>,
    pub edgar: EdgarConfig,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            contact_email: DEFAULT_CONTACT_EMAIL.to_string(),
            default_ticker: DEFAULT_TICKER.to_string(),
            forms: vec!["10-Q".to_string(), "10-K".to_string()],
            highlights: DEFAULT_HIGHLIGHTS,
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("."),
            nav_modules: vec!["analyst".to_string(), "trader".to_string()],
            edgar: EdgarConfig::default(),
        }
    }
}

impl DigestConfig {
    /// Loads `.env` (if present) and reads `SEC_CONTACT_EMAIL` and
    /// `ANALYST_DEFAULT_TICKER` from the process environment.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenv::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();
        if let Some(email) = var("SEC_CONTACT_EMAIL") {
            config = config.with_contact_email(email);
        }
        if let Some(ticker) = var("ANALYST_DEFAULT_TICKER") {
            config.default_ticker = ticker;
        }
        config
    }

    /// Sets the contact address and rebuilds the User-Agent from it.
    pub fn with_contact_email(mut self, email: impl Into<String>) -> Self {
        self.contact_email = email.into();
        self.edgar.user_agent = user_agent_for(&self.contact_email);
        self
    }

    /// Where the ticker→CIK map is cached.
    pub fn ticker_cache_path(&self) -> PathBuf {
        self.data_dir.join("company_tickers.json")
    }

    /// Where downloaded primary documents are cached.
    pub fn filings_dir(&self) -> PathBuf {
        self.data_dir.join("filings")
    }

    /// Flat key/value view used by `config show`.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("SEC_CONTACT_EMAIL", self.contact_email.clone()),
            ("ANALYST_DEFAULT_TICKER", self.default_ticker.clone()),
            ("user_agent", self.edgar.user_agent.clone()),
            ("forms", self.forms.join(",")),
            ("highlights", self.highlights.to_string()),
            ("data_dir", self.data_dir.display().to_string()),
            ("output_dir", self.output_dir.display().to_string()),
            ("rate_limit", self.edgar.rate_limit.to_string()),
            ("timeout_secs", self.edgar.timeout.as_secs().to_string()),
        ]
    }
}

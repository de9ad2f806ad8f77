use crate::error::CoreError;

/// Default upper bound on the number of records accepted per submission.
pub const DEFAULT_MAX_PER_REQUEST: usize = 1000;

/// Default number of in-flight store transactions per import job.
pub const DEFAULT_WRITE_CONCURRENCY: usize = 1;

/// Import pipeline configuration.
///
/// Built once at start-up and handed to every component that needs it, so
/// no component reads the environment on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// S3 bucket holding request and response objects. `None` selects the
    /// in-memory blob store.
    pub bucket_name: Option<String>,
    /// PostgreSQL connection string. `None` selects the in-memory record
    /// store.
    pub database_url: Option<String>,
    /// Largest accepted submission, in records.
    pub max_per_request: usize,
    /// Store transactions allowed in flight per job (1 = sequential).
    pub write_concurrency: usize,
    /// Verbose per-item logging in import jobs.
    pub debug: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            bucket_name: None,
            database_url: None,
            max_per_request: DEFAULT_MAX_PER_REQUEST,
            write_concurrency: DEFAULT_WRITE_CONCURRENCY,
            debug: false,
        }
    }
}

impl ImportConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var             | Default     |
    /// |---------------------|-------------|
    /// | `BUCKET_NAME`       | (in-memory) |
    /// | `DATABASE_URL`      | (in-memory) |
    /// | `MAX_PER_REQ`       | `1000`      |
    /// | `WRITE_CONCURRENCY` | `1`         |
    /// | `DEBUG`             | `0`         |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let max_per_request =
            parse_positive(&lookup, "MAX_PER_REQ", DEFAULT_MAX_PER_REQUEST)?;
        let write_concurrency =
            parse_positive(&lookup, "WRITE_CONCURRENCY", DEFAULT_WRITE_CONCURRENCY)?;

        Ok(Self {
            bucket_name: non_empty("BUCKET_NAME"),
            database_url: non_empty("DATABASE_URL"),
            max_per_request,
            write_concurrency,
            debug: lookup("DEBUG").as_deref() == Some("1"),
        })
    }
}

fn parse_positive<F>(lookup: &F, name: &str, default: usize) -> Result<usize, CoreError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(CoreError::Config(format!("{name} must be greater than zero"))),
        Ok(value) => Ok(value),
        Err(_) => Err(CoreError::Config(format!(
            "{name} must be a positive integer, got '{raw}'"
        ))),
    }
}

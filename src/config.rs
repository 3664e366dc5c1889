use std::time::Duration;

/// Constants shared by the benchmark suites.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    pub collision_seed: u32,
    pub collision_set_size: usize,
    /// (label, draws per slot of key range)
    pub collision_rates: Vec<(&'static str, f64)>,
    pub similarity_seed: u32,
    pub similarity_trials: usize,
    pub similarity_set_size: usize,
    pub similarity_key_length: usize,
    pub presence_seed: u32,
    pub presence_population: usize,
    pub presence_queries: usize,
    pub memory_seed: u32,
    pub memory_key_length: usize,
    pub memory_default_count: usize,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            collision_seed: 43,
            collision_set_size: 1000,
            collision_rates: vec![("Huge", 0.5), ("High", 1.0), ("Fare", 3.0), ("Rare", 10.0)],
            similarity_seed: 42,
            similarity_trials: 10,
            similarity_set_size: 100,
            similarity_key_length: 3,
            presence_seed: 42,
            presence_population: 10_000,
            presence_queries: 1000,
            memory_seed: 42,
            memory_key_length: 12,
            memory_default_count: 100_000,
        }
    }
}

impl SuiteConfig {
    /// Size of the key range for a collision rate, truncated like an integer cast.
    pub fn key_range(&self, rate: f64) -> usize {
        (self.collision_set_size as f64 * rate) as usize
    }
}

/// Sampling budget for the harness.
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessConfig {
    pub min_samples: usize,
    pub max_samples: usize,
    pub min_sample_time: Duration,
    pub max_time: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            min_samples: 5,
            max_samples: 100,
            min_sample_time: Duration::from_millis(10),
            max_time: Duration::from_secs(1),
        }
    }
}

impl HarnessConfig {
    /// Defaults overridden by `SETBENCH_MIN_SAMPLES`, `SETBENCH_MAX_SAMPLES`,
    /// `SETBENCH_MIN_SAMPLE_TIME_MS` and `SETBENCH_MAX_TIME_MS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let read = |name: &str| lookup(name).and_then(|v| v.trim().parse::<u64>().ok());
        let mut config = Self::default();
        if let Some(n) = read("SETBENCH_MIN_SAMPLES") {
            config.min_samples = (n as usize).max(1);
        }
        if let Some(n) = read("SETBENCH_MAX_SAMPLES") {
            config.max_samples = n as usize;
        }
        if let Some(ms) = read("SETBENCH_MIN_SAMPLE_TIME_MS") {
            config.min_sample_time = Duration::from_millis(ms);
        }
        if let Some(ms) = read("SETBENCH_MAX_TIME_MS") {
            config.max_time = Duration::from_millis(ms);
        }
        config.max_samples = config.max_samples.max(config.min_samples);
        config
    }

    /// A tiny budget for tests.
    pub fn quick() -> Self {
        Self {
            min_samples: 2,
            max_samples: 3,
            min_sample_time: Duration::from_micros(50),
            max_time: Duration::from_millis(1),
        }
    }
}

/// Parses a key count the way `parseInt` does: optional sign and leading
/// digits, anything after is ignored. A negative count clamps to 0. Falls
/// back to `default` when no digits follow the sign.
pub fn parse_count(arg: Option<&str>, default: usize) -> usize {
    let Some(raw) = arg else {
        return default;
    };
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = unsigned.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return default;
    }
    if negative {
        return 0;
    }
    // out-of-range counts saturate instead of falling back
    digits.parse().unwrap_or(usize::MAX)
}

use rand::seq::SliceRandom;

pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Edg/121.0.0.0 Safari/537.36",
];

/// Browser-like User-Agent strings, one picked at random per request.
#[derive(Debug, Clone)]
pub struct UserAgentPool {
    agents: Vec<String>,
}

impl Default for UserAgentPool {
    fn default() -> Self {
        Self::new(DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect())
    }
}

impl UserAgentPool {
    /// An empty list falls back to the built-in pool.
    pub fn new(agents: Vec<String>) -> Self {
        if agents.is_empty() {
            return Self::default();
        }
        Self { agents }
    }

    pub fn pick(&self) -> &str {
        self.agents
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or(DEFAULT_USER_AGENTS[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_from_pool() {
        let pool = UserAgentPool::default();
        for _ in 0..20 {
            assert!(DEFAULT_USER_AGENTS.contains(&pool.pick()));
        }
    }

    #[test]
    fn test_empty_list_uses_defaults() {
        let pool = UserAgentPool::new(Vec::new());
        assert!(DEFAULT_USER_AGENTS.contains(&pool.pick()));
    }

    #[test]
    fn test_custom_pool() {
        let pool = UserAgentPool::new(vec!["feedpack-test/1.0".into()]);
        assert_eq!(pool.pick(), "feedpack-test/1.0");
    }
}

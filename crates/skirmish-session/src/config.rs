//! Session configuration.

use std::time::Duration;

/// Configuration for a play session's reconnect behavior.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Pause before each rejoin attempt after the game actor dies.
    pub reconnect_delay: Duration,

    /// How many rejoin attempts to make before terminating the session.
    pub reconnect_attempts: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reconnect_delay: Duration::from_millis(100),
            reconnect_attempts: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.reconnect_delay, Duration::from_millis(100));
        assert_eq!(config.reconnect_attempts, 3);
    }
}

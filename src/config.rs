use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::rename::DEFAULT_MAX_COLLISION_SUFFIX;

/// Environment variable names for defaults
pub const ENV_DESTINATION: &str = "RENOMBRATOR_DESTINATION";
pub const ENV_MAX_COLLISION_SUFFIX: &str = "RENOMBRATOR_MAX_COLLISION_SUFFIX";

/// Defaults taken from the environment, overridden by CLI flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvSettings {
    pub destination: Option<PathBuf>,
    pub max_collision_suffix: usize,
}

impl Default for EnvSettings {
    fn default() -> Self {
        Self {
            destination: None,
            max_collision_suffix: DEFAULT_MAX_COLLISION_SUFFIX,
        }
    }
}

/// Load defaults from environment variables
///
/// - `RENOMBRATOR_DESTINATION`: destination folder when `--dest` is absent
/// - `RENOMBRATOR_MAX_COLLISION_SUFFIX`: bound on `_<n>` retries per file
///
/// These can be set in a `.env` file in the working directory.
pub fn settings_from_env() -> EnvSettings {
    let destination = env::var_os(ENV_DESTINATION)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);

    let max_collision_suffix = match env::var(ENV_MAX_COLLISION_SUFFIX) {
        Ok(raw) => match raw.parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => {
                warn!(value = %raw, "Ignoring invalid {}", ENV_MAX_COLLISION_SUFFIX);
                DEFAULT_MAX_COLLISION_SUFFIX
            }
        },
        Err(_) => DEFAULT_MAX_COLLISION_SUFFIX,
    };

    EnvSettings {
        destination,
        max_collision_suffix,
    }
}

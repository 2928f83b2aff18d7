use std::env;

/// Everything the worker needs to know about itself. Built once at
/// startup and handed to the worker instead of living in module level
/// constants. Bumping `version` changes the cache name so the next
/// activation prunes the previous bucket.
#[derive(Clone, Debug)]
pub struct WorkerConfig {
    pub version: String,
    pub cache_prefix: String,
    pub precache_urls: Vec<String>,
    pub default_title: String,
    pub default_body: String,
    pub default_icon: String,
    pub default_badge: String,
    pub default_tag: String,
    pub root_url: String,
    pub vibration_supported: bool,
    pub vibrate_pattern: Vec<u32>,
    pub sync_tag: String,
    pub assets_path: String,
    // When set, precaching fetches each URL from this origin instead of
    // storing placeholder responses
    pub origin: Option<String>,
}

impl WorkerConfig {
    pub fn cache_name(&self) -> String {
        format!("{}{}", self.cache_prefix, self.version)
    }

    /// True for buckets created by any version of this worker.
    pub fn owns_cache(&self, name: &str) -> bool {
        name.starts_with(&self.cache_prefix)
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        let version = env::var("PUSH_WORKER_VERSION").unwrap_or("v1".to_string());
        let cache_prefix =
            env::var("PUSH_WORKER_CACHE_PREFIX").unwrap_or("push-notifications-".to_string());
        let precache_urls = env::var("PUSH_WORKER_PRECACHE")
            .map(|v| parse_url_list(&v))
            .unwrap_or_else(|_| {
                vec![
                    "/".to_string(),
                    "/index.html".to_string(),
                    "/icon.png".to_string(),
                ]
            });
        let vibration_supported = env::var("PUSH_WORKER_VIBRATE")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);
        let assets_path = env::var("PUSH_WORKER_ASSETS_PATH").unwrap_or("./public".to_string());
        let origin = env::var("PUSH_WORKER_ORIGIN").ok().filter(|o| !o.is_empty());

        Self {
            version,
            cache_prefix,
            precache_urls,
            default_title: "New Notification".to_string(),
            default_body: "No content provided.".to_string(),
            default_icon: "/icon.png".to_string(),
            default_badge: "/badge.png".to_string(),
            default_tag: "default-tag".to_string(),
            root_url: "/".to_string(),
            vibration_supported,
            vibrate_pattern: vec![100, 50, 100],
            sync_tag: "sync-notifications".to_string(),
            assets_path,
            origin,
        }
    }
}

fn parse_url_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_builds_the_cache_name_from_prefix_and_version() {
        let config = WorkerConfig {
            version: "v7".to_string(),
            ..WorkerConfig::default()
        };
        assert_eq!(config.cache_name(), format!("{}v7", config.cache_prefix));
    }

    #[test]
    fn it_only_owns_caches_with_its_prefix() {
        let config = WorkerConfig {
            cache_prefix: "push-notifications-".to_string(),
            ..WorkerConfig::default()
        };
        assert!(config.owns_cache("push-notifications-v0"));
        assert!(!config.owns_cache("other-app-v1"));
        assert!(!config.owns_cache("push-notification"));
    }

    #[test]
    fn it_parses_precache_lists() {
        assert_eq!(
            parse_url_list(" /, /index.html ,,/icon.png"),
            vec!["/", "/index.html", "/icon.png"]
        );
    }

    #[test]
    fn it_parses_flags() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("False"));
        assert!(!parse_flag("off"));
    }
}

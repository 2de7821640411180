//! Server configuration.

use std::net::SocketAddr;
use std::str::FromStr;

use routesim_render::{RenderConfig, Theme};

/// Configuration for the visualizer binary.
#[derive(Debug, Clone, PartialEq)]
pub struct VisConfig {
    /// Address the HTTP server binds to
    pub addr: SocketAddr,
    /// Start with the sample topology instead of an empty one
    pub load_sample: bool,
    /// Document and animation settings, including the theme
    pub render: RenderConfig,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            load_sample: false,
            render: RenderConfig::default(),
        }
    }
}

impl VisConfig {
    /// Create config from environment variables with sensible defaults.
    ///
    /// - `ROUTESIM_ADDR`: bind address (default `0.0.0.0:3000`)
    /// - `ROUTESIM_DARK_MODE`: `true`/`1` for the dark theme
    /// - `ROUTESIM_SAMPLE`: `true`/`1` to preload the sample topology
    /// - `ROUTESIM_FRAME_MS`: animation frame delay in milliseconds
    /// - `ROUTESIM_SEED`: layout seed
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable source.
    ///
    /// Values that fail to parse are logged and replaced by the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = RenderConfig::default();

        let addr = parse_or(&lookup, "ROUTESIM_ADDR", || Self::default().addr);
        let dark_mode = flag(&lookup, "ROUTESIM_DARK_MODE");
        let load_sample = flag(&lookup, "ROUTESIM_SAMPLE");
        let frame_delay_ms = parse_or(&lookup, "ROUTESIM_FRAME_MS", || defaults.frame_delay_ms);
        let seed = parse_or(&lookup, "ROUTESIM_SEED", || defaults.seed);

        Self {
            addr,
            load_sample,
            render: RenderConfig {
                seed,
                frame_delay_ms,
                theme: if dark_mode { Theme::Dark } else { Theme::Light },
                ..defaults
            },
        }
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: impl FnOnce() -> T,
) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "ignoring unparsable setting");
            default()
        }),
        None => default(),
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> bool {
    match lookup(key).as_deref().map(str::trim) {
        None | Some("") => false,
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1" || v.eq_ignore_ascii_case("yes") => true,
        Some(v) if v.eq_ignore_ascii_case("false") || v == "0" || v.eq_ignore_ascii_case("no") => false,
        Some(v) => {
            tracing::warn!(key, value = v, "ignoring unparsable flag");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = VisConfig::from_lookup(lookup(&[]));
        assert_eq!(config, VisConfig::default());
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.render.theme, Theme::Light);
    }

    #[test]
    fn reads_every_setting() {
        let config = VisConfig::from_lookup(lookup(&[
            ("ROUTESIM_ADDR", "127.0.0.1:8080"),
            ("ROUTESIM_DARK_MODE", "true"),
            ("ROUTESIM_SAMPLE", "1"),
            ("ROUTESIM_FRAME_MS", "250"),
            ("ROUTESIM_SEED", "7"),
        ]));
        assert_eq!(config.addr, "127.0.0.1:8080".parse().unwrap());
        assert!(config.load_sample);
        assert_eq!(config.render.theme, Theme::Dark);
        assert_eq!(config.render.frame_delay_ms, 250);
        assert_eq!(config.render.seed, 7);
    }

    #[test]
    fn bad_values_fall_back() {
        let config = VisConfig::from_lookup(lookup(&[
            ("ROUTESIM_ADDR", "not an address"),
            ("ROUTESIM_FRAME_MS", "-5"),
            ("ROUTESIM_DARK_MODE", "maybe"),
        ]));
        assert_eq!(config.addr, VisConfig::default().addr);
        assert_eq!(config.render.frame_delay_ms, 800);
        assert_eq!(config.render.theme, Theme::Light);
    }
}

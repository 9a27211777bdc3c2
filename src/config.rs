use std::path::PathBuf;
use std::str::FromStr;

/// Dashboard settings. Defaults match the published dashboard; each field
/// can be overridden from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasConfig {
    /// Countries listed by the nearest-neighbour view (`ATLAS_NEIGHBORS`).
    pub neighbor_count: usize,
    /// Length of the top/bottom rankings (`ATLAS_RANK_SIZE`).
    pub rank_size: usize,
    /// Default directory for exports (`ATLAS_EXPORT_DIR`).
    pub export_dir: PathBuf,
    /// Initial window size in points.
    pub window_size: [f32; 2],
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            neighbor_count: 5,
            rank_size: 5,
            export_dir: PathBuf::from("."),
            window_size: [1200.0, 800.0],
        }
    }
}

impl AtlasConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparsable values are logged and
    /// the default is kept.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            neighbor_count: parse_or(&lookup, "ATLAS_NEIGHBORS", defaults.neighbor_count),
            rank_size: parse_or(&lookup, "ATLAS_RANK_SIZE", defaults.rank_size),
            export_dir: lookup("ATLAS_EXPORT_DIR")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.export_dir),
            window_size: defaults.window_size,
        }
    }
}

fn parse_or<T: FromStr + Copy>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring {key}={raw:?}: not a valid value");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let cfg = AtlasConfig::from_lookup(|_| None);
        assert_eq!(cfg, AtlasConfig::default());
        assert_eq!(cfg.neighbor_count, 5);
    }

    #[test]
    fn test_overrides() {
        let cfg = AtlasConfig::from_lookup(|key| match key {
            "ATLAS_NEIGHBORS" => Some("8".into()),
            "ATLAS_RANK_SIZE" => Some(" 10 ".into()),
            "ATLAS_EXPORT_DIR" => Some("/tmp/out".into()),
            _ => None,
        });
        assert_eq!(cfg.neighbor_count, 8);
        assert_eq!(cfg.rank_size, 10);
        assert_eq!(cfg.export_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_bad_value_keeps_default() {
        let cfg =
            AtlasConfig::from_lookup(|key| (key == "ATLAS_NEIGHBORS").then(|| "many".to_string()));
        assert_eq!(cfg.neighbor_count, 5);
    }
}

//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level examiner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExaminerConfig {
    /// Wall-clock length of one tick in milliseconds.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
    /// Directory searched for exam catalogs.
    #[serde(default = "default_catalog_dir")]
    pub catalog_dir: PathBuf,
    /// Directory that saved reports are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Exam taken when no catalog is named on the command line.
    #[serde(default)]
    pub default_exam: Option<String>,
}

fn default_tick_millis() -> u64 {
    1000
}
fn default_catalog_dir() -> PathBuf {
    PathBuf::from("./exams")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./exam-results")
}

impl Default for ExaminerConfig {
    fn default() -> Self {
        Self {
            tick_millis: default_tick_millis(),
            catalog_dir: default_catalog_dir(),
            output_dir: default_output_dir(),
            default_exam: None,
        }
    }
}

impl ExaminerConfig {
    /// The catalog to use: the explicit argument, else `default_exam`.
    pub fn resolve_exam(&self, catalog: Option<String>) -> Result<String> {
        catalog.or_else(|| self.default_exam.clone()).context(
            "no exam given. Pass --catalog or set default_exam in examiner.toml",
        )
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `examiner.toml` in the current directory
/// 2. `~/.config/examiner/config.toml`
///
/// Environment variable override: `EXAMINER_CATALOG_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<ExaminerConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("examiner.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<ExaminerConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => ExaminerConfig::default(),
    };

    if let Ok(dir) = std::env::var("EXAMINER_CATALOG_DIR") {
        config.catalog_dir = PathBuf::from(dir);
    }

    config.catalog_dir = resolve_path(&config.catalog_dir);
    config.output_dir = resolve_path(&config.output_dir);

    anyhow::ensure!(config.tick_millis >= 1, "tick_millis must be at least 1");

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("examiner"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_EXAMINER_TEST_VAR", "decks");
        assert_eq!(resolve_env_vars("${_EXAMINER_TEST_VAR}"), "decks");
        assert_eq!(
            resolve_env_vars("/srv/${_EXAMINER_TEST_VAR}/hsk"),
            "/srv/decks/hsk"
        );
        std::env::remove_var("_EXAMINER_TEST_VAR");
    }

    #[test]
    fn unterminated_reference_is_left_alone() {
        assert_eq!(resolve_env_vars("${OPEN"), "${OPEN");
        assert_eq!(resolve_env_vars("a/${OPEN"), "a/${OPEN");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        std::env::set_var("_EXAMINER_SELF_REF", "${_EXAMINER_SELF_REF}");
        assert_eq!(
            resolve_env_vars("${_EXAMINER_SELF_REF}/exams"),
            "${_EXAMINER_SELF_REF}/exams"
        );
        std::env::remove_var("_EXAMINER_SELF_REF");
    }

    #[test]
    fn self_referencing_catalog_dir_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("examiner.toml");
        std::fs::write(&path, "catalog_dir = \"${_EXAMINER_LOOP_DIR}\"\n").unwrap();
        std::env::set_var("_EXAMINER_LOOP_DIR", "${_EXAMINER_LOOP_DIR}");
        let config = load_config_from(Some(&path));
        std::env::remove_var("_EXAMINER_LOOP_DIR");
        assert_eq!(
            config.unwrap().catalog_dir,
            PathBuf::from("${_EXAMINER_LOOP_DIR}")
        );
    }

    #[test]
    fn default_config() {
        let config = ExaminerConfig::default();
        assert_eq!(config.tick_millis, 1000);
        assert_eq!(config.catalog_dir, PathBuf::from("./exams"));
        assert!(config.default_exam.is_none());
    }

    #[test]
    fn parse_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("examiner.toml");
        std::fs::write(
            &path,
            r#"
tick_millis = 250
output_dir = "results"
default_exam = "hsk2"
"#,
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.tick_millis, 250);
        assert_eq!(config.output_dir, PathBuf::from("results"));
        assert_eq!(config.resolve_exam(None).unwrap(), "hsk2");
        assert_eq!(config.resolve_exam(Some("hsk1".into())).unwrap(), "hsk1");
    }

    #[test]
    fn zero_tick_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("examiner.toml");
        std::fs::write(&path, "tick_millis = 0\n").unwrap();
        assert!(load_config_from(Some(&path)).is_err());
    }

    #[test]
    fn missing_explicit_config_fails() {
        assert!(load_config_from(Some(Path::new("/no/such/examiner.toml"))).is_err());
    }

    #[test]
    fn no_exam_configured() {
        let err = ExaminerConfig::default().resolve_exam(None).unwrap_err();
        assert!(err.to_string().contains("no exam given"));
    }
}

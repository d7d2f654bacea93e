use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConfigFile {
    pub endpoint: Option<String>,
    pub timeout: Option<usize>,
    pub proxy: Option<String>,
    pub page_size: Option<usize>,
    pub output: Option<String>,
    pub output_format: Option<String>,
    pub no_color: Option<bool>,
    pub interactive: Option<bool>,
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
        .or_else(|| {
            let drive = env::var_os("HOMEDRIVE")?;
            let path = env::var_os("HOMEPATH")?;
            Some(PathBuf::from(drive).join(path))
        })
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(home_dir()?.join(".countrydex").join("config.yml"))
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

pub fn expand_tilde_string(path: &str) -> String {
    expand_tilde(path).to_string_lossy().to_string()
}

pub fn parse_config(contents: &str) -> Result<ConfigFile, String> {
    // an empty or comment-only file deserializes to unit, not a mapping
    if contents
        .lines()
        .all(|l| l.trim().is_empty() || l.trim_start().starts_with('#'))
    {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str::<ConfigFile>(contents).map_err(|e| e.to_string())
}

pub fn load_config(path: &Path, allow_missing: bool) -> Result<ConfigFile, String> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if !allow_missing {
                return Err(format!("config file not found '{}'", path.display()));
            }
            String::new()
        }
        Err(e) => return Err(format!("failed to read config '{}': {e}", path.display())),
    };
    parse_config(&contents)
        .map_err(|e| format!("failed to parse config '{}': {e}", path.display()))
}

fn default_config_yaml() -> String {
    r#"# Countrydex config
#
# Location (default):
#   ~/.countrydex/config.yml

# Source
# endpoint: https://restcountries.com/v3.1/all?fields=name,flags,capital,population,region,area

# HTTP
timeout: 10
# proxy: http://127.0.0.1:8080

# View
page_size: 9
interactive: false

# Output (optional)
# output: ./page.html
# output_format: html

# Output styling
no_color: false
"#
    .to_string()
}

pub fn ensure_default_config_file(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    let parent = path
        .parent()
        .ok_or_else(|| format!("invalid config path '{}'", path.display()))?;
    std::fs::create_dir_all(parent).map_err(|e| {
        format!(
            "failed to create config directory '{}': {e}",
            parent.display()
        )
    })?;
    std::fs::write(path, default_config_yaml())
        .map_err(|e| format!("failed to write config file '{}': {e}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_keys() {
        let cfg = parse_config("timeout: 5\npage_size: 12\nno_color: true\n").unwrap();
        assert_eq!(cfg.timeout, Some(5));
        assert_eq!(cfg.page_size, Some(12));
        assert_eq!(cfg.no_color, Some(true));
        assert_eq!(cfg.endpoint, None);
    }

    #[test]
    fn comment_only_file_is_default() {
        assert_eq!(parse_config("# nothing\n\n").unwrap(), ConfigFile::default());
    }

    #[test]
    fn default_template_parses() {
        let cfg = parse_config(&default_config_yaml()).unwrap();
        assert_eq!(cfg.page_size, Some(9));
        assert_eq!(cfg.interactive, Some(false));
    }

    #[test]
    fn missing_file_respects_allow_missing() {
        let path = std::env::temp_dir().join("countrydex-missing-config-test.yml");
        assert_eq!(load_config(&path, true).unwrap(), ConfigFile::default());
        assert!(load_config(&path, false).is_err());
    }

    #[test]
    fn unreadable_or_invalid_config_is_an_error() {
        let dir = std::env::temp_dir().join(format!("countrydex-bad-cfg-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        assert!(load_config(&dir, true).is_err());

        let path = dir.join("config.yml");
        std::fs::write(&path, "page_size: [nine]\n").unwrap();
        let err = load_config(&path, true).unwrap_err();
        assert!(err.starts_with("failed to parse config"));

        std::fs::write(&path, "").unwrap();
        assert_eq!(load_config(&path, false).unwrap(), ConfigFile::default());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn ensure_default_writes_template_once() {
        let dir = std::env::temp_dir().join(format!("countrydex-cfg-{}", std::process::id()));
        let path = dir.join("config.yml");
        let _ = std::fs::remove_dir_all(&dir);
        ensure_default_config_file(&path).unwrap();
        std::fs::write(&path, "timeout: 3\n").unwrap();
        ensure_default_config_file(&path).unwrap();
        assert_eq!(load_config(&path, false).unwrap().timeout, Some(3));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = home_dir() {
            assert_eq!(expand_tilde("~/x.yml"), home.join("x.yml"));
        }
        assert_eq!(expand_tilde("/etc/x.yml"), PathBuf::from("/etc/x.yml"));
    }
}

use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::io::Write;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_vivace_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("VIVACE_CONFIG_PATH", "/tmp/vivace-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/vivace-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home/vivace/config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/just-home");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/just-home/.config/vivace/config.toml")
    );
}

#[test]
fn defaults_are_valid_and_sane() {
    let s = Settings::default();
    assert!(s.validate().is_ok());
    assert_eq!(s.api.default_query, "top hits");
    assert_eq!(s.audio.initial_volume, 50);
    assert_eq!(s.controls.scrub_seconds, 5);
    assert!(!s.api.base_url.is_empty());
    assert!(!s.api.api_key.is_empty());
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.audio.initial_volume = 130;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.api.timeout_secs = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.volume_step = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.api.base_url = "  ".to_string();
    assert!(s.validate().is_err());
}

#[test]
fn load_reads_the_config_file_pointed_at_by_env() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        "[audio]\ninitial_volume = 25\n\n[api]\ndefault_query = \"lo-fi beats\"\n"
    )
    .unwrap();

    let _g1 = EnvGuard::set("VIVACE_CONFIG_PATH", path.to_str().unwrap());
    let _g2 = EnvGuard::remove("VIVACE__AUDIO__INITIAL_VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.initial_volume, 25);
    assert_eq!(s.api.default_query, "lo-fi beats");
    // Untouched sections keep their defaults.
    assert_eq!(s.controls.scrub_seconds, 5);
}

#[test]
fn env_overrides_win_over_the_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "[audio]\ninitial_volume = 25\n").unwrap();

    let _g1 = EnvGuard::set("VIVACE_CONFIG_PATH", path.to_str().unwrap());
    let _g2 = EnvGuard::set("VIVACE__AUDIO__INITIAL_VOLUME", "75");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.initial_volume, 75);
}

use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Prontuario";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "prontuario=debug,prontuario_lib=debug,info"
    } else {
        "prontuario=info,prontuario_lib=info,warn"
    }
}

/// Get the application data directory
/// ~/Prontuario/ on all platforms (user-visible)
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_NAME))
}

/// Get the default directory for exported documents
pub fn exports_dir() -> Option<PathBuf> {
    app_data_dir().map(|dir| dir.join("exports"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir().unwrap();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Prontuario"));
    }

    #[test]
    fn exports_dir_under_app_data() {
        let exports = exports_dir().unwrap();
        assert!(exports.starts_with(app_data_dir().unwrap()));
        assert!(exports.ends_with("exports"));
    }

    #[test]
    fn log_filter_names_this_crate() {
        assert!(default_log_filter().contains("prontuario_lib"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}

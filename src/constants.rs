//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL of the expenses backend
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Key under which the session token is stored
pub const TOKEN_KEY: &str = "token";

/// Directory (under the home directory) holding config and session files
pub const CONFIG_DIR_NAME: &str = ".expense-tui";

/// Session store file name
pub const SESSION_FILE: &str = "session.yaml";

/// Config file name
pub const CONFIG_FILE: &str = "config.yaml";

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "expense-tui.log";

/// Default currency symbol shown before amounts
pub const DEFAULT_CURRENCY: &str = "N";

/// Alert shown when the draft is incomplete
pub const MISSING_FIELDS_ALERT: &str = "Enter title and amount";

/// Application name
pub const APP_NAME: &str = "Expense Tracker";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

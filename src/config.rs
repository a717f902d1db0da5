use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{ReportError, Result};

pub const TIME_OUT: &str = "TimeOut";
pub const REPORTER_USER: &str = "ReporterUser";
pub const REPORTER_PASSWORD: &str = "ReporterPassword";
pub const URL_TEAM: &str = "UrlTeam";
pub const SEPARATOR: &str = "Separator";
pub const LINE_END: &str = "LineEnd";
pub const OUTPUT_FILE: &str = "OutputFile";
pub const ERROR_FILE: &str = "ErrorFile";
pub const ERROR_CREATING_REQUEST: &str = "ErrorCreatingRequest";
pub const ERROR_REQUEST: &str = "ErrorRequest";
pub const STRICT_DECODE: &str = "StrictDecode";
pub const LOG_LEVEL: &str = "LogLevel";

const DEFAULT_TIMEOUT_SECS: i64 = 180;
const DEFAULT_SEPARATOR: &str = ",";
const DEFAULT_LINE_END: &str = "\n";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Raw key/value settings loaded from the config file.
#[derive(Debug, Default)]
pub struct Settings {
    values: Map<String, Value>,
}

impl Settings {
    /// Load settings from `path`. `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ReportError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            Self::from_json(&contents)
        } else {
            Self::from_toml(&contents)
        };

        parsed.map_err(|message| ReportError::ConfigParse {
            path: path.to_path_buf(),
            message,
        })
    }

    fn from_json(contents: &str) -> std::result::Result<Self, String> {
        match serde_json::from_str::<Value>(contents).map_err(|e| e.to_string())? {
            Value::Object(values) => Ok(Self { values }),
            other => Err(format!("expected an object at the top level, found {other}")),
        }
    }

    fn from_toml(contents: &str) -> std::result::Result<Self, String> {
        let values: Map<String, Value> = toml::from_str(contents).map_err(|e| e.to_string())?;
        Ok(Self { values })
    }

    /// Look up a key. Dotted keys walk into nested tables.
    fn lookup(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split('.');
        let mut current = self.values.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    pub fn get_string(&self, key: &str) -> String {
        self.get_string_default(key, "")
    }

    pub fn get_string_default(&self, key: &str, default: &str) -> String {
        match self.lookup(key) {
            Some(Value::String(s)) => s.clone(),
            _ => default.to_string(),
        }
    }

    /// `get_int_default` with 0 as the default.
    #[allow(dead_code)]
    pub fn get_int(&self, key: &str) -> i64 {
        self.get_int_default(key, 0)
    }

    /// Integers are taken as-is; strings are accepted when they parse as one.
    pub fn get_int_default(&self, key: &str, default: i64) -> i64 {
        match self.lookup(key) {
            Some(Value::Number(n)) => n.as_i64().unwrap_or(default),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    pub fn get_bool_default(&self, key: &str, default: bool) -> bool {
        match self.lookup(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }
}

/// Everything the report pipeline needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub timeout_secs: i64,
    pub user: String,
    pub password: String,
    pub url_team: String,
    pub separator: String,
    pub line_end: String,
    pub output_file: PathBuf,
    pub error_file: String,
    pub error_creating_request: String,
    pub error_request: String,
    pub strict_decode: bool,
    pub log_level: String,
}

impl ReportConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            timeout_secs: settings.get_int_default(TIME_OUT, DEFAULT_TIMEOUT_SECS),
            user: settings.get_string(REPORTER_USER),
            password: settings.get_string(REPORTER_PASSWORD),
            url_team: settings.get_string(URL_TEAM),
            separator: settings.get_string_default(SEPARATOR, DEFAULT_SEPARATOR),
            line_end: settings.get_string_default(LINE_END, DEFAULT_LINE_END),
            output_file: PathBuf::from(settings.get_string(OUTPUT_FILE)),
            error_file: settings.get_string(ERROR_FILE),
            error_creating_request: settings.get_string(ERROR_CREATING_REQUEST),
            error_request: settings.get_string(ERROR_REQUEST),
            strict_decode: settings.get_bool_default(STRICT_DECODE, false),
            log_level: settings.get_string_default(LOG_LEVEL, DEFAULT_LOG_LEVEL),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        Settings::load(path).map(|settings| Self::from_settings(&settings))
    }
}

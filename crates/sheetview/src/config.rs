use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use sheetview_core::{Capabilities, ColorSupport, LayoutConfig};

use crate::error::AppError;

/// Viewer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Workbook to open when none is given on the command line
    pub file: Option<PathBuf>,
    /// Column sizing
    pub layout: LayoutConfig,
    /// Resolved color support of the output terminal
    pub colors: ColorSupport,
    /// Enable `hjkl`, `g` and `G`
    pub vim_keys: bool,
    /// Log destination; logging is off without one
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the value of a
    /// variable if it is set
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = LayoutConfig::default();
        let layout = LayoutConfig {
            min_column_width: parse_or(&lookup, "SHEETVIEW_MIN_COL_WIDTH", defaults.min_column_width)?,
            max_column_width: parse_or(&lookup, "SHEETVIEW_MAX_COL_WIDTH", defaults.max_column_width)?,
            sample_rows: parse_or(&lookup, "SHEETVIEW_SAMPLE_ROWS", defaults.sample_rows)?,
        };
        if layout.min_column_width > layout.max_column_width {
            return Err(AppError::ColumnWidthBounds {
                min: layout.min_column_width,
                max: layout.max_column_width,
            });
        }

        let colors = match lookup("SHEETVIEW_COLOR").as_deref().map(str::trim) {
            None | Some("") | Some("auto") => detect_colors(&lookup),
            Some("none") => ColorSupport::None,
            Some("16") => ColorSupport::Basic,
            Some("truecolor") => ColorSupport::TrueColor,
            Some(other) => {
                return Err(AppError::InvalidConfig {
                    key: "SHEETVIEW_COLOR",
                    value: other.to_string(),
                })
            }
        };

        let vim_keys = match lookup("SHEETVIEW_VIM_KEYS") {
            None => true,
            Some(value) => parse_bool(&value).ok_or(AppError::InvalidConfig {
                key: "SHEETVIEW_VIM_KEYS",
                value,
            })?,
        };

        let path = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);

        Ok(Self {
            file: path("SHEETVIEW_FILE"),
            layout,
            colors,
            vim_keys,
            log_file: path("SHEETVIEW_LOG"),
        })
    }

    pub fn capabilities(&self) -> Capabilities {
        match self.colors {
            ColorSupport::None => Capabilities::MONOCHROME,
            colors => Capabilities::default().with_colors(colors),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: None,
            layout: LayoutConfig::default(),
            colors: ColorSupport::Basic,
            vim_keys: true,
            log_file: None,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidConfig { key, value }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn detect_colors<F>(lookup: &F) -> ColorSupport
where
    F: Fn(&str) -> Option<String>,
{
    if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return ColorSupport::None;
    }
    match lookup("COLORTERM").as_deref() {
        Some("truecolor") | Some("24bit") => ColorSupport::TrueColor,
        _ => ColorSupport::Basic,
    }
}

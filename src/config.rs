use xdg::BaseDirectories;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use ratatui::style::Color;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    /// Pick a start/end range instead of a single date
    pub range: bool,
    pub theme: ThemeConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ThemeConfig {
    /// Range endpoints and the single selected date
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    /// Days strictly inside a range or preview
    #[serde(deserialize_with = "deserialize_color")]
    pub range_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub today_fg: Color,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            range: false,
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            selection_fg: Color::Rgb(255, 165, 0), // Orange
            range_bg: Color::DarkGray,
            today_fg: Color::Cyan,
        }
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", s)))
}

/// Parse a color name, `#rgb`, `#rrggbb` or `r,g,b` string
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    if let Some(hex) = s.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
        return match hex.len() {
            6 => Some(Color::Rgb(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            3 => {
                let doubled: Vec<u8> = hex
                    .chars()
                    .map(|c| channel(&c.to_string().repeat(2)))
                    .collect::<Option<_>>()?;
                Some(Color::Rgb(doubled[0], doubled[1], doubled[2]))
            }
            _ => None,
        };
    }

    if s.contains(',') {
        let parts: Vec<u8> = s
            .split(',')
            .map(|part| part.trim().parse::<u8>().ok())
            .collect::<Option<_>>()?;
        return match parts.as_slice() {
            [r, g, b] => Some(Color::Rgb(*r, *g, *b)),
            _ => None,
        };
    }

    match s.as_str() {
        "orange" => Some(Color::Rgb(255, 165, 0)),
        "grey" => Some(Color::Gray),
        "darkgrey" => Some(Color::DarkGray),
        // ratatui knows the remaining ANSI names
        name => name.parse::<Color>().ok(),
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

/// Parse config file contents, falling back to defaults on malformed input
pub fn parse(content: &str) -> Config {
    match toml::from_str(content) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring malformed config: {}", e);
            Config::default()
        }
    }
}

pub fn read() -> Config {
    let config_path = match get_config_path() {
        Some(path) => path,
        None => return Config::default(),
    };

    if !config_path.exists() {
        return Config::default();
    }

    match fs::read_to_string(&config_path) {
        Ok(content) => parse(&content),
        Err(_) => Config::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_named() {
        assert_eq!(parse_color("red"), Some(Color::Red));
        assert_eq!(parse_color("Blue"), Some(Color::Blue));
        assert_eq!(parse_color("ORANGE"), Some(Color::Rgb(255, 165, 0)));
        assert_eq!(parse_color("darkgrey"), Some(Color::DarkGray));
    }

    #[test]
    fn test_parse_color_hex() {
        assert_eq!(parse_color("#FF6600"), Some(Color::Rgb(255, 102, 0)));
        assert_eq!(parse_color("#f60"), Some(Color::Rgb(255, 102, 0)));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#GGGGGG"), None);
    }

    #[test]
    fn test_parse_color_rgb_tuple() {
        assert_eq!(parse_color("255, 165, 0"), Some(Color::Rgb(255, 165, 0)));
        assert_eq!(parse_color("256,0,0"), None);
        assert_eq!(parse_color("1,2"), None);
    }

    #[test]
    fn test_parse_color_invalid() {
        assert_eq!(parse_color("not-a-color"), None);
        assert_eq!(parse_color(""), None);
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_file, "/dev/null");
        assert!(!config.range);
        assert_eq!(config.theme.selection_fg, Color::Rgb(255, 165, 0));
    }

    #[test]
    fn test_parse_partial_config() {
        let config = parse(
            r##"
            range = true

            [theme]
            range_bg = "#303030"
            "##,
        );
        assert!(config.range);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.theme.range_bg, Color::Rgb(48, 48, 48));
        assert_eq!(config.theme.today_fg, Color::Cyan);
    }

    #[test]
    fn test_parse_malformed_config_uses_defaults() {
        assert_eq!(parse("range = \"yes please\""), Config::default());
        assert_eq!(parse("[theme]\nselection_fg = \"nope\""), Config::default());
    }
}

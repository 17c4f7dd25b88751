//! Settings - Presentation Preferences

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Desktop,
    Mobile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Normal,
    Large,
}

impl FontSize {
    pub const ALL: [FontSize; 3] = [FontSize::Small, FontSize::Normal, FontSize::Large];

    pub fn as_str(&self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Normal => "normal",
            FontSize::Large => "large",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Roboto,
    Roman,
    Comic,
    Opensans,
}

impl FontStyle {
    pub const ALL: [FontStyle; 4] = [
        FontStyle::Roboto,
        FontStyle::Roman,
        FontStyle::Comic,
        FontStyle::Opensans,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FontStyle::Roboto => "roboto",
            FontStyle::Roman => "roman",
            FontStyle::Comic => "comic",
            FontStyle::Opensans => "opensans",
        }
    }
}

/// Persisted presentation settings; keys missing from a stored document keep their defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub theme: Theme,
    pub layout: Layout,
    pub font_size: FontSize,
    pub font_style: FontStyle,
}

/// Partial update; `None` keeps the current value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub theme: Option<Theme>,
    pub layout: Option<Layout>,
    pub font_size: Option<FontSize>,
    pub font_style: Option<FontStyle>,
}

impl AppSettings {
    /// Apply a partial update
    pub fn merged(self, patch: SettingsPatch) -> Self {
        Self {
            theme: patch.theme.unwrap_or(self.theme),
            layout: patch.layout.unwrap_or(self.layout),
            font_size: patch.font_size.unwrap_or(self.font_size),
            font_style: patch.font_style.unwrap_or(self.font_style),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_launch() {
        let s = AppSettings::default();
        assert_eq!(s.theme, Theme::Light);
        assert_eq!(s.layout, Layout::Desktop);
        assert_eq!(s.font_size, FontSize::Normal);
        assert_eq!(s.font_style, FontStyle::Roboto);
    }

    #[test]
    fn merge_only_touches_given_fields() {
        let patch = SettingsPatch {
            theme: Some(Theme::Dark),
            font_style: Some(FontStyle::Comic),
            ..Default::default()
        };
        let s = AppSettings::default().merged(patch);
        assert_eq!(s.theme, Theme::Dark);
        assert_eq!(s.font_style, FontStyle::Comic);
        assert_eq!(s.font_size, FontSize::Normal);
    }

    #[test]
    fn json_shape() {
        let s = AppSettings {
            theme: Theme::Dark,
            layout: Layout::Mobile,
            font_size: FontSize::Large,
            font_style: FontStyle::Opensans,
        };
        let json = serde_json::to_string(&s).expect("encode");
        assert_eq!(
            json,
            r#"{"theme":"dark","layout":"mobile","fontSize":"large","fontStyle":"opensans"}"#
        );
    }
}

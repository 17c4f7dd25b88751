//! Settings Service
//!
//! Owns the presentation settings. Every change goes through [`SettingsService::set`],
//! which persists the whole document and then runs the applier once.
//!
//! ```text
//! set(patch)
//!     │ merge
//!     ▼
//! KeyValueStore::save_key("terra_watchers_settings")
//!     │
//!     ▼
//! SettingsApplier::apply   (theme / font classes)
//! ```

use std::collections::BTreeSet;

use parking_lot::RwLock;

use crate::constants::SETTINGS_STORAGE_KEY;
use crate::domain::settings::{AppSettings, FontSize, FontStyle, SettingsPatch, Theme};
use crate::error::Result;
use crate::eventing::app_event::{AppEvent, EventSender, emit};
use crate::utils::config_store::KeyValueStore;

/// Presentation side-effect of a settings change
pub trait SettingsApplier: Send + Sync {
    fn apply(&self, settings: &AppSettings);
}

// ==================== Document classes ====================

/// Class set of the document root
///
/// Holds `dark` only for the dark theme, exactly one `font-size-*` class and
/// exactly one `font-*` class. Classes set by others are left alone.
#[derive(Debug, Default)]
pub struct DocumentClasses {
    classes: RwLock<BTreeSet<String>>,
}

impl DocumentClasses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, class: impl Into<String>) {
        self.classes.write().insert(class.into());
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.read().contains(class)
    }

    pub fn classes(&self) -> Vec<String> {
        self.classes.read().iter().cloned().collect()
    }
}

fn font_size_class(size: FontSize) -> String {
    format!("font-size-{}", size.as_str())
}

fn font_style_class(style: FontStyle) -> String {
    format!("font-{}", style.as_str())
}

impl SettingsApplier for DocumentClasses {
    fn apply(&self, settings: &AppSettings) {
        let mut classes = self.classes.write();

        if settings.theme == Theme::Dark {
            classes.insert("dark".to_string());
        } else {
            classes.remove("dark");
        }

        for size in FontSize::ALL {
            classes.remove(&font_size_class(size));
        }
        classes.insert(font_size_class(settings.font_size));

        for style in FontStyle::ALL {
            classes.remove(&font_style_class(style));
        }
        classes.insert(font_style_class(settings.font_style));
    }
}

// ==================== Service ====================

pub struct SettingsService<S, P> {
    store: S,
    applier: P,
    current: RwLock<AppSettings>,
    events: Option<EventSender>,
}

impl<S: KeyValueStore, P: SettingsApplier> SettingsService<S, P> {
    /// Read persisted settings and apply them once
    ///
    /// A missing key yields defaults; an unreadable or corrupt document
    /// yields defaults and a warning.
    pub fn load(store: S, applier: P) -> Self {
        let settings = match store.load_key(SETTINGS_STORAGE_KEY) {
            Ok(None) => AppSettings::default(),
            Ok(Some(text)) => match serde_json::from_str::<AppSettings>(&text) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Stored settings are corrupt, using defaults: {}", e);
                    AppSettings::default()
                }
            },
            Err(e) => {
                tracing::warn!("Could not read stored settings, using defaults: {}", e);
                AppSettings::default()
            }
        };

        tracing::debug!("Loaded settings: {:?}", settings);
        applier.apply(&settings);

        Self {
            store,
            applier,
            current: RwLock::new(settings),
            events: None,
        }
    }

    pub fn with_events(mut self, tx: EventSender) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn get(&self) -> AppSettings {
        *self.current.read()
    }

    /// Merge, persist, then apply
    ///
    /// When persisting fails nothing changes and the error is returned.
    pub fn set(&self, patch: SettingsPatch) -> Result<AppSettings> {
        let mut current = self.current.write();
        let next = current.merged(patch);

        let text = serde_json::to_string(&next)?;
        self.store.save_key(SETTINGS_STORAGE_KEY, &text)?;

        *current = next;
        drop(current);

        self.applier.apply(&next);
        emit(self.events.as_ref(), AppEvent::SettingsChanged { settings: next });
        tracing::info!("Settings updated: {:?}", next);
        Ok(next)
    }

    pub fn applier(&self) -> &P {
        &self.applier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::Layout;
    use crate::error::Error;
    use crate::utils::config_store::{ConfigStore, MemoryStore};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct CountingApplier {
        applied: Mutex<Vec<AppSettings>>,
    }

    impl SettingsApplier for CountingApplier {
        fn apply(&self, settings: &AppSettings) {
            self.applied.lock().push(*settings);
        }
    }

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn load_key(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn save_key(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Io {
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    fn dark() -> SettingsPatch {
        SettingsPatch {
            theme: Some(Theme::Dark),
            ..Default::default()
        }
    }

    #[test]
    fn missing_key_loads_defaults_and_applies_once() {
        let service = SettingsService::load(MemoryStore::new(), CountingApplier::default());
        assert_eq!(service.get(), AppSettings::default());
        assert_eq!(service.applier().applied.lock().len(), 1);
    }

    #[test]
    fn corrupt_document_falls_back_to_defaults() {
        let store = MemoryStore::new();
        store.save_key(SETTINGS_STORAGE_KEY, "{not json").expect("seed");

        let service = SettingsService::load(store, CountingApplier::default());
        assert_eq!(service.get(), AppSettings::default());
    }

    #[test]
    fn partial_document_keeps_stored_fields() {
        let store = MemoryStore::new();
        store
            .save_key(SETTINGS_STORAGE_KEY, r#"{"theme":"dark"}"#)
            .expect("seed");

        let service = SettingsService::load(store, DocumentClasses::new());
        let settings = service.get();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.layout, Layout::Desktop);
        assert_eq!(settings.font_size, FontSize::Normal);
        assert!(service.applier().contains("dark"));
    }

    #[test]
    fn set_persists_then_applies_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (tx, rx) = crossbeam_channel::unbounded();
        let service = SettingsService::load(ConfigStore::in_dir(dir.path()), CountingApplier::default())
            .with_events(tx);

        let updated = service
            .set(SettingsPatch {
                layout: Some(Layout::Mobile),
                font_size: Some(FontSize::Large),
                ..Default::default()
            })
            .expect("set");
        assert_eq!(updated.layout, Layout::Mobile);
        assert_eq!(updated.theme, Theme::Light);
        assert_eq!(service.applier().applied.lock().len(), 2);
        assert!(matches!(rx.try_recv(), Ok(AppEvent::SettingsChanged { .. })));

        // A fresh service over the same directory sees the saved document
        let reloaded = SettingsService::load(ConfigStore::in_dir(dir.path()), CountingApplier::default());
        assert_eq!(reloaded.get(), updated);
    }

    #[test]
    fn failed_persist_changes_nothing() {
        let service = SettingsService::load(ReadOnlyStore, CountingApplier::default());

        assert!(service.set(dark()).is_err());
        assert_eq!(service.get().theme, Theme::Light);
        assert_eq!(service.applier().applied.lock().len(), 1);
    }

    #[test]
    fn document_classes_track_theme_and_fonts() {
        let classes = DocumentClasses::new();
        classes.insert("app-root");
        let service = SettingsService::load(MemoryStore::new(), classes);

        let applied = service.applier();
        assert!(!applied.contains("dark"));
        assert!(applied.contains("font-size-normal"));
        assert!(applied.contains("font-roboto"));

        service.set(dark()).expect("dark");
        service
            .set(SettingsPatch {
                font_size: Some(FontSize::Small),
                font_style: Some(FontStyle::Comic),
                ..Default::default()
            })
            .expect("fonts");

        assert_eq!(
            applied.classes(),
            vec!["app-root", "dark", "font-comic", "font-size-small"]
        );

        service
            .set(SettingsPatch {
                theme: Some(Theme::Light),
                ..Default::default()
            })
            .expect("light");
        assert!(!applied.contains("dark"));
        assert!(applied.contains("font-size-small"));
    }
}

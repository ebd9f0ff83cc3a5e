/// INI-file settings store.
///
/// Layout on disk:
///
/// ```text
/// [Paths]
/// downloads=/home/user/Downloads
/// extra directories=/srv/inbox\n/mnt/scans
/// ```
///
/// Control characters inside values (the default newline separator
/// included) are escaped on write and unescaped on read, so a multi-entry
/// list stays on one line. The file is decoded and encoded with the
/// configured text encoding; `rust-ini` only ever sees UTF-8.
use super::{SettingsKey, SettingsStore, SECTION};
use crate::error::SettingsError;
use encoding_rs::Encoding;
use ini::Ini;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct IniSettings {
    path: PathBuf,
    encoding: &'static Encoding,
}

impl IniSettings {
    /// Bind to the settings file at `path`, using the encoding named by
    /// `encoding_label` (any WHATWG label, e.g. `UTF-8`, `windows-1251`).
    ///
    /// The file is not touched until the first read or write.
    pub fn new(path: impl Into<PathBuf>, encoding_label: &str) -> Result<Self, SettingsError> {
        let encoding = Encoding::for_label(encoding_label.trim().as_bytes())
            .ok_or_else(|| SettingsError::UnknownEncoding(encoding_label.to_string()))?;
        Ok(Self {
            path: path.into(),
            encoding,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    fn load(&self) -> Result<Ini, SettingsError> {
        let bytes = fs::read(&self.path).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;
        let (text, _, had_errors) = self.encoding.decode(&bytes);
        if had_errors {
            return Err(SettingsError::Decode {
                path: self.path.clone(),
                encoding: self.encoding.name().to_string(),
            });
        }
        Ini::load_from_str(&text).map_err(|source| SettingsError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn store(&self, conf: &Ini) -> Result<(), SettingsError> {
        let mut utf8 = Vec::new();
        conf.write_to(&mut utf8).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;
        let text = String::from_utf8_lossy(&utf8);
        let (bytes, _, unmappable) = self.encoding.encode(&text);
        if unmappable {
            return Err(SettingsError::Encode {
                path: self.path.clone(),
                encoding: self.encoding.name().to_string(),
            });
        }
        fs::write(&self.path, &bytes).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl SettingsStore for IniSettings {
    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn initialise(&mut self, downloads: &str, extra_directories: &str) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut conf = Ini::new();
        conf.with_section(Some(SECTION))
            .set(SettingsKey::Downloads.as_str(), downloads)
            .set(SettingsKey::ExtraDirectories.as_str(), extra_directories);
        self.store(&conf)?;

        info!("Created settings file {}", self.path.display());
        Ok(())
    }

    fn get(&self, key: SettingsKey) -> Result<String, SettingsError> {
        let conf = self.load()?;
        let section = conf
            .section(Some(SECTION))
            .ok_or_else(|| SettingsError::MissingSection {
                path: self.path.clone(),
                section: SECTION.to_string(),
            })?;
        section
            .get(key.as_str())
            .map(str::to_string)
            .ok_or_else(|| SettingsError::MissingKey {
                path: self.path.clone(),
                key: key.as_str().to_string(),
            })
    }

    fn set(&mut self, key: SettingsKey, value: &str) -> Result<(), SettingsError> {
        let mut conf = self.load()?;
        conf.with_section(Some(SECTION)).set(key.as_str(), value);
        self.store(&conf)?;
        debug!("Saved `{}` to {}", key.as_str(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> IniSettings {
        IniSettings::new(dir.path().join("settings.ini"), "UTF-8").unwrap()
    }

    #[test]
    fn initialise_writes_both_keys() {
        let tmp = TempDir::new().unwrap();
        let mut store = store_in(&tmp);
        assert!(!store.exists());

        store.initialise("/home/u/Downloads", "").unwrap();

        assert!(store.exists());
        assert_eq!(store.get(SettingsKey::Downloads).unwrap(), "/home/u/Downloads");
        assert_eq!(store.get(SettingsKey::ExtraDirectories).unwrap(), "");
    }

    #[test]
    fn initialise_creates_missing_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let mut store = IniSettings::new(tmp.path().join("a/b/settings.ini"), "utf-8").unwrap();
        store.initialise("", "").unwrap();
        assert!(store.exists());
    }

    /// Newline-joined lists and Windows-style backslashes must survive a
    /// write/read cycle.
    #[test]
    fn multi_line_values_round_trip() {
        let tmp = TempDir::new().unwrap();
        let mut store = store_in(&tmp);
        store.initialise("C:\\Users\\u\\Downloads", "").unwrap();

        let list = "/srv/inbox\n/mnt/scans\nD:\\Data";
        store.set(SettingsKey::ExtraDirectories, list).unwrap();

        assert_eq!(store.get(SettingsKey::ExtraDirectories).unwrap(), list);
        assert_eq!(
            store.get(SettingsKey::Downloads).unwrap(),
            "C:\\Users\\u\\Downloads"
        );
    }

    /// Rewriting one key must keep unrelated keys and sections.
    #[test]
    fn set_preserves_other_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.ini");
        fs::write(
            &path,
            "[Paths]\ndownloads=/dl\nextra directories=\ncomment=keep me\n\n[Other]\nx=1\n",
        )
        .unwrap();

        let mut store = IniSettings::new(&path, "UTF-8").unwrap();
        store.set(SettingsKey::ExtraDirectories, "/tmp").unwrap();

        let conf = Ini::load_from_file(&path).unwrap();
        let paths = conf.section(Some(SECTION)).unwrap();
        assert_eq!(paths.get("downloads"), Some("/dl"));
        assert_eq!(paths.get("extra directories"), Some("/tmp"));
        assert_eq!(paths.get("comment"), Some("keep me"));
        assert_eq!(conf.section(Some("Other")).unwrap().get("x"), Some("1"));
    }

    #[test]
    fn missing_section_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.ini");
        fs::write(&path, "[Elsewhere]\ndownloads=/dl\n").unwrap();

        let store = IniSettings::new(&path, "UTF-8").unwrap();
        let err = store.get(SettingsKey::Downloads).unwrap_err();
        assert!(matches!(err, SettingsError::MissingSection { .. }));
    }

    #[test]
    fn missing_key_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.ini");
        fs::write(&path, "[Paths]\ndownloads=/dl\n").unwrap();

        let store = IniSettings::new(&path, "UTF-8").unwrap();
        let err = store.get(SettingsKey::ExtraDirectories).unwrap_err();
        assert!(matches!(err, SettingsError::MissingKey { ref key, .. } if key == "extra directories"));
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        let err = IniSettings::new("settings.ini", "no-such-charset").unwrap_err();
        assert!(matches!(err, SettingsError::UnknownEncoding(_)));
    }

    /// A single-byte Cyrillic code page stores a localized folder name
    /// byte-for-byte in that encoding and reads it back.
    #[test]
    fn legacy_encoding_round_trip() {
        let tmp = TempDir::new().unwrap();
        let mut store = IniSettings::new(tmp.path().join("s.ini"), "windows-1251").unwrap();
        store.initialise("/home/u/Загрузки", "").unwrap();

        let raw = fs::read(store.path()).unwrap();
        assert!(std::str::from_utf8(&raw).is_err(), "file must not be UTF-8");
        assert_eq!(store.get(SettingsKey::Downloads).unwrap(), "/home/u/Загрузки");
    }
}

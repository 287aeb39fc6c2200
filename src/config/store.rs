use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use toml::{Table, Value};
use tracing::{debug, error, info, warn};

use crate::config::paths::{self, CONFIG_FILE_NAME, PROJECT_DIR_NAME};

const NO_CONFIG_PLACEHOLDER: &str = "# No configuration is currently loaded.\n";

fn default_template() -> String {
    format!(
        r#"[application]
name = "{name}"
authors = ["{authors}"]

[totp]
secret = ""
account_name = ""

[notifications]
enabled = false
uri = ""
username = ""
password = ""
"#,
        name = env!("CARGO_PKG_NAME"),
        authors = env!("CARGO_PKG_AUTHORS"),
    )
}

/// Coercion from a TOML node to the caller's type, used by [`ConfigStore::get`].
///
/// A node that exists but holds a different type coerces to `None`, which the
/// store maps to the caller-supplied default.
pub trait FromConfigValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromConfigValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromConfigValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromConfigValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_integer()
    }
}

impl FromConfigValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_float()
    }
}

impl FromConfigValue for Vec<String> {
    fn from_value(value: &Value) -> Option<Self> {
        value
            .as_array()?
            .iter()
            .map(|item| item.as_str().map(str::to_owned))
            .collect()
    }
}

#[derive(Default)]
struct StoreState {
    document: Option<Table>,
    defaults: Option<Table>,
    config_path: Option<PathBuf>,
}

/// Thread-safe hierarchical configuration store backed by a TOML file.
///
/// Every operation serializes on one exclusive lock; load/save/restore report
/// failure through their boolean return and a logged diagnostic, never a
/// panic. Dotted paths address nested tables, e.g. `notifications.uri`.
pub struct ConfigStore {
    search_dirs: Vec<PathBuf>,
    state: Mutex<StoreState>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::with_search_dirs(paths::candidate_dirs())
    }

    /// Build a store over an explicit candidate-directory list (test seam).
    pub fn with_search_dirs(search_dirs: Vec<PathBuf>) -> Self {
        let defaults = match toml::from_str::<Table>(&default_template()) {
            Ok(table) => Some(table),
            Err(err) => {
                error!(error = %err, "Failed to parse default configuration template");
                None
            }
        };

        Self {
            search_dirs,
            state: Mutex::new(StoreState {
                document: None,
                defaults,
                config_path: None,
            }),
        }
    }

    /// One-time initialization: load from disk, or materialize and persist
    /// the default document when no candidate directory yields a file.
    pub fn initialize(&self) {
        if !self.load() {
            self.create_default_settings();
        }
    }

    fn create_default_settings(&self) {
        if !self.restore_defaults() {
            error!("Unable to load default settings");
            return;
        }

        if !self.save() {
            error!("Unable to create default settings file");
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("Configuration store lock poisoned; continuing");
            poisoned.into_inner()
        })
    }

    /// Search the candidate directories for `authcode.toml` (directly or in
    /// an `authcode/` subdirectory) and replace the active document with the
    /// first parseable file. Returns false, mutating nothing, on exhaustion.
    pub fn load(&self) -> bool {
        debug!("Loading settings");
        let mut state = self.lock();

        for dir in &self.search_dirs {
            debug!(dir = %dir.display(), "Trying folder");

            if !dir.is_dir() {
                continue;
            }

            for candidate in [
                dir.join(CONFIG_FILE_NAME),
                dir.join(PROJECT_DIR_NAME).join(CONFIG_FILE_NAME),
            ] {
                if load_file(&mut state, &candidate) {
                    info!(path = %candidate.display(), "Settings loaded");
                    return true;
                }
            }
        }

        warn!("Unable to load settings file");
        false
    }

    /// Load from an explicit file path.
    pub fn load_from(&self, path: &Path) -> bool {
        let mut state = self.lock();
        if load_file(&mut state, path) {
            info!(path = %path.display(), "Settings loaded");
            return true;
        }
        false
    }

    /// Write the active document to the previously resolved path, or create
    /// `<dir>/authcode/authcode.toml` under the first writable candidate.
    pub fn save(&self) -> bool {
        debug!("Saving settings");
        let mut state = self.lock();

        if state.document.is_none() && !restore_defaults_locked(&mut state) {
            error!("Cannot save settings without a default configuration");
            return false;
        }

        if let Some(path) = state.config_path.clone() {
            if !path.is_dir() && write_document(&state, &path) {
                info!(path = %path.display(), "Settings saved");
                return true;
            }
        }

        for dir in &self.search_dirs {
            debug!(dir = %dir.display(), "Trying folder");

            if !dir.is_dir() {
                continue;
            }

            let target = dir.join(PROJECT_DIR_NAME).join(CONFIG_FILE_NAME);
            if write_document(&state, &target) {
                info!(path = %target.display(), "Settings saved");
                state.config_path = Some(target);
                return true;
            }
        }

        error!("Unable to save settings file");
        false
    }

    /// Replace the active document with a copy of the default template.
    /// Fails only when the template itself never parsed.
    pub fn restore_defaults(&self) -> bool {
        let mut state = self.lock();
        restore_defaults_locked(&mut state)
    }

    /// Walk `path` (split on `.`) through the active document and coerce the
    /// terminal node. Returns `default` when the document is absent, any
    /// segment is missing, an intermediate is not a table, or the node has
    /// the wrong type. Never mutates.
    pub fn get<T: FromConfigValue>(&self, path: &str, default: T) -> T {
        let state = self.lock();
        let Some(document) = &state.document else {
            return default;
        };

        let mut segments = path.split('.');
        let Some(first) = segments.next() else {
            return default;
        };

        let mut current = match document.get(first) {
            Some(value) => value,
            None => return default,
        };

        for key in segments {
            let Some(table) = current.as_table() else {
                return default;
            };
            match table.get(key) {
                Some(value) => current = value,
                None => return default,
            }
        }

        T::from_value(current).unwrap_or(default)
    }

    /// Insert or overwrite the value at `path`, creating intermediate tables
    /// as needed. Fails when no document is active, the path is empty, or an
    /// intermediate segment holds a non-table value. Intermediate tables
    /// created before a conflicting segment stay in place.
    pub fn set(&self, path: &str, value: impl Into<Value>) -> bool {
        let mut state = self.lock();
        let Some(document) = state.document.as_mut() else {
            error!("Settings are not loaded, cannot set value");
            return false;
        };

        if path.is_empty() {
            warn!("Invalid key path provided");
            return false;
        }

        let keys: Vec<&str> = path.split('.').collect();
        let mut current = document;

        for key in &keys[..keys.len() - 1] {
            let entry = current
                .entry(key.to_string())
                .or_insert_with(|| Value::Table(Table::new()));

            match entry.as_table_mut() {
                Some(table) => current = table,
                None => {
                    error!(key = %key, "Cannot set value, path conflict at non-table key");
                    return false;
                }
            }
        }

        current.insert(keys[keys.len() - 1].to_string(), value.into());
        true
    }

    /// Render the active document, or a placeholder comment when none is.
    pub fn dump(&self) -> String {
        let state = self.lock();
        match &state.document {
            Some(document) => render(document),
            None => NO_CONFIG_PLACEHOLDER.to_string(),
        }
    }

    pub fn dump_to(&self, sink: &mut dyn io::Write) -> io::Result<()> {
        sink.write_all(self.dump().as_bytes())
    }

    /// Resolved file path, empty until a load or save succeeds.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.lock().config_path.clone()
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

fn restore_defaults_locked(state: &mut StoreState) -> bool {
    match &state.defaults {
        Some(defaults) => {
            state.document = Some(defaults.clone());
            true
        }
        None => false,
    }
}

fn load_file(state: &mut StoreState, path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            error!(path = %path.display(), error = %err, "Failed to read settings file");
            return false;
        }
    };

    match toml::from_str::<Table>(&contents) {
        Ok(document) => {
            state.document = Some(document);
            state.config_path = Some(path.to_path_buf());
            true
        }
        Err(err) => {
            error!(path = %path.display(), error = %err, "Failed to parse settings file");
            false
        }
    }
}

fn write_document(state: &StoreState, path: &Path) -> bool {
    let Some(document) = &state.document else {
        return false;
    };

    if path.as_os_str().is_empty() || path.is_dir() {
        return false;
    }

    if let Some(parent) = path.parent() {
        if let Err(err) = fs::create_dir_all(parent) {
            error!(dir = %parent.display(), error = %err, "Failed to create config directory");
            return false;
        }
    }

    if let Err(err) = fs::write(path, render(document)) {
        error!(path = %path.display(), error = %err, "Failed to write settings file");
        return false;
    }

    true
}

fn render(document: &Table) -> String {
    toml::to_string_pretty(document).unwrap_or_else(|err| {
        error!(error = %err, "Failed to render configuration document");
        String::new()
    })
}

use chrono::{Local, NaiveDateTime};
use pulse_config::replace_file;
use pulse_domain::{Category, PaymentMethod, RecurringTransaction, Transaction};
use std::{
    fs,
    path::{Path, PathBuf},
};
use uuid::Uuid;

use super::{BudgetStore, MemoryStore, StoreSnapshot, CURRENT_SCHEMA_VERSION};
use crate::{
    errors::{BudgetError, Result},
    period::DateWindow,
};

const BACKUP_EXTENSION: &str = "json";
const BACKUP_PREFIX: &str = "budget";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const DEFAULT_RETENTION: usize = 5;

/// File-backed store. Every mutation is flushed to disk before returning; a
/// mutation whose write fails is rolled back in memory as well.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
    inner: MemoryStore,
}

impl JsonStore {
    /// Opens the store at `path`, starting empty when the file does not exist.
    pub fn open(path: impl Into<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let path = path.into();
        let backups_dir = path
            .parent()
            .map(|parent| parent.join("backups"))
            .unwrap_or_else(|| PathBuf::from("backups"));
        let inner = if path.exists() {
            MemoryStore::from_snapshot(load_snapshot(&path)?)
        } else {
            MemoryStore::new()
        };
        tracing::debug!(path = %path.display(), "opened json store");
        Ok(Self {
            path,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
            inner,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.inner
    }

    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.inner.snapshot())?;
        replace_file(&self.path, &json)?;
        Ok(())
    }

    /// Writes a timestamped copy of the current contents and prunes old ones.
    pub fn backup(&self, note: Option<&str>) -> Result<PathBuf> {
        fs::create_dir_all(&self.backups_dir)?;
        let timestamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut file_stem = format!("{BACKUP_PREFIX}_{timestamp}");
        if let Some(label) = sanitize_backup_note(note) {
            file_stem.push('_');
            file_stem.push_str(&label);
        }
        let mut path = self
            .backups_dir
            .join(format!("{file_stem}.{BACKUP_EXTENSION}"));
        let mut counter = 1;
        while path.exists() {
            path = self
                .backups_dir
                .join(format!("{file_stem}-{counter}.{BACKUP_EXTENSION}"));
            counter += 1;
        }
        let json = serde_json::to_string_pretty(&self.inner.snapshot())?;
        replace_file(&path, &json)?;
        self.prune_backups()?;
        tracing::info!(backup = %path.display(), "created store backup");
        Ok(path)
    }

    /// Backup file names, newest first.
    pub fn list_backups(&self) -> Result<Vec<String>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(name.to_string());
            }
        }
        entries.sort_by(|a, b| {
            parse_backup_timestamp(b)
                .cmp(&parse_backup_timestamp(a))
                .then_with(|| b.cmp(a))
        });
        Ok(entries)
    }

    /// Replaces the current contents with a backup and persists them.
    pub fn restore(&mut self, backup_name: &str) -> Result<()> {
        let backup_path = self.backups_dir.join(backup_name);
        if !backup_path.exists() {
            return Err(BudgetError::StorageError(format!(
                "backup `{backup_name}` not found"
            )));
        }
        let restored = MemoryStore::from_snapshot(load_snapshot(&backup_path)?);
        self.apply(|inner| {
            *inner = restored;
            Ok(())
        })?;
        tracing::info!(backup = backup_name, "restored store backup");
        Ok(())
    }

    fn prune_backups(&self) -> Result<()> {
        let backups = self.list_backups()?;
        for name in backups.iter().skip(self.retention) {
            let _ = fs::remove_file(self.backups_dir.join(name));
        }
        Ok(())
    }

    /// Runs `change` against the in-memory store and saves. When either step
    /// fails the in-memory store is put back as it was.
    fn apply<T>(&mut self, change: impl FnOnce(&mut MemoryStore) -> Result<T>) -> Result<T> {
        let before = self.inner.clone();
        let outcome = change(&mut self.inner).and_then(|value| {
            self.save()?;
            Ok(value)
        });
        if let Err(err) = &outcome {
            tracing::warn!(path = %self.path.display(), error = %err, "rolled back store change");
            self.inner = before;
        }
        outcome
    }
}

impl BudgetStore for JsonStore {
    fn transaction(&self, id: Uuid) -> Option<Transaction> {
        self.inner.transaction(id)
    }

    fn transactions_between(&self, window: DateWindow) -> Vec<Transaction> {
        self.inner.transactions_between(window)
    }

    fn transactions_for_category(&self, category_id: Uuid) -> Vec<Transaction> {
        self.inner.transactions_for_category(category_id)
    }

    fn all_transactions(&self) -> Vec<Transaction> {
        self.inner.all_transactions()
    }

    fn insert_transaction(&mut self, transaction: Transaction) -> Result<()> {
        self.apply(|inner| inner.insert_transaction(transaction))
    }

    fn update_transaction(&mut self, transaction: Transaction) -> Result<()> {
        self.apply(|inner| inner.update_transaction(transaction))
    }

    fn delete_transaction(&mut self, id: Uuid) -> Result<Transaction> {
        self.apply(|inner| inner.delete_transaction(id))
    }

    fn category(&self, id: Uuid) -> Option<Category> {
        self.inner.category(id)
    }

    fn categories(&self) -> Vec<Category> {
        self.inner.categories()
    }

    fn upsert_category(&mut self, category: Category) -> Result<()> {
        self.apply(|inner| inner.upsert_category(category))
    }

    fn delete_category(&mut self, id: Uuid) -> Result<Category> {
        self.apply(|inner| inner.delete_category(id))
    }

    fn upsert_categories(&mut self, categories: Vec<Category>) -> Result<()> {
        self.apply(|inner| inner.upsert_categories(categories))
    }

    fn payment_method(&self, id: Uuid) -> Option<PaymentMethod> {
        self.inner.payment_method(id)
    }

    fn payment_methods(&self) -> Vec<PaymentMethod> {
        self.inner.payment_methods()
    }

    fn upsert_payment_method(&mut self, method: PaymentMethod) -> Result<()> {
        self.apply(|inner| inner.upsert_payment_method(method))
    }

    fn delete_payment_method(&mut self, id: Uuid) -> Result<PaymentMethod> {
        self.apply(|inner| inner.delete_payment_method(id))
    }

    fn upsert_payment_methods(&mut self, methods: Vec<PaymentMethod>) -> Result<()> {
        self.apply(|inner| inner.upsert_payment_methods(methods))
    }

    fn recurring_transactions(&self) -> Vec<RecurringTransaction> {
        self.inner.recurring_transactions()
    }

    fn upsert_recurring(&mut self, recurring: RecurringTransaction) -> Result<()> {
        self.apply(|inner| inner.upsert_recurring(recurring))
    }

    fn delete_recurring(&mut self, id: Uuid) -> Result<RecurringTransaction> {
        self.apply(|inner| inner.delete_recurring(id))
    }
}

fn load_snapshot(path: &Path) -> Result<StoreSnapshot> {
    let data = fs::read_to_string(path)?;
    let snapshot: StoreSnapshot = serde_json::from_str(&data)?;
    if snapshot.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(BudgetError::StorageError(format!(
            "`{}` was written by a newer schema version ({})",
            path.display(),
            snapshot.schema_version
        )));
    }
    Ok(snapshot)
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if (ch.is_whitespace() || matches!(ch, '-' | '.' | '_'))
            && !sanitized.is_empty()
            && !last_dash
        {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_backup_timestamp(name: &str) -> Option<NaiveDateTime> {
    let mut parts = name.trim_end_matches(".json").split('_');
    if parts.next()? != BACKUP_PREFIX {
        return None;
    }
    let date_part = parts.next()?;
    let time_part: String = parts.next()?.chars().take(6).collect();
    NaiveDateTime::parse_from_str(&format!("{date_part}{time_part}"), "%Y%m%d%H%M%S").ok()
}

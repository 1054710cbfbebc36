#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use budget_pulse::storage::{BudgetStore, JsonStore};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use pulse_domain::{Category, Transaction};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory that outlives the calling test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// A JSON store in an isolated directory.
pub fn setup_store() -> JsonStore {
    let path = temp_home().join("data").join("budget.json");
    JsonStore::open(path, Some(3)).expect("open json store")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn expense(store: &mut impl BudgetStore, category: &Category, amount: i64, on: NaiveDate) {
    let txn = Transaction::expense(category.id, amount, on).expect("valid expense");
    store.insert_transaction(txn).expect("insert expense");
}

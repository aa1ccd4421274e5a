// ============================================
// src/storage.rs
// キー・バリュー形式の保存領域 (ブラウザの localStorage 相当)
// ============================================

use bincode::config::standard;
use bincode::{Decode, Encode};
use directories::ProjectDirs;
use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::AppError;

pub(crate) const STORE_FILE_BIN: &str = "store.bin";
const STORE_FILE_JSON: &str = "store.json"; // デバッグ用

/// 文字列キーの保存領域
pub trait Store {
    fn get(&self, key: &str) -> Option<String>;

    /// 値を書き込む。書き込みが終わるまで戻らない
    fn set(&mut self, key: &str, value: String) -> Result<(), AppError>;

    /// 複数のキーをまとめて書き込む
    fn set_all(&mut self, pairs: Vec<(&str, String)>) -> Result<(), AppError> {
        for (key, value) in pairs {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// JSON 配列を `Vec<T>` として読む。未保存なら空配列
pub fn read_list<T, S>(store: &S, key: &str) -> Result<Vec<T>, AppError>
where
    T: DeserializeOwned,
    S: Store + ?Sized,
{
    match store.get(key) {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

/// JSON 配列の末尾に1件追加する。
/// 既存の値が `Vec<T>` として読めなければ空配列からやり直す
pub fn append<T, S>(store: &mut S, key: &str, item: T) -> Result<(), AppError>
where
    T: Serialize + DeserializeOwned,
    S: Store + ?Sized,
{
    let mut list: Vec<T> = match read_list(&*store, key) {
        Ok(list) => list,
        Err(err) => {
            warn!("{key}: {err}; resetting to an empty list");
            Vec::new()
        }
    };
    list.push(item);
    store.set(key, serde_json::to_string(&list)?)
}

/// メモリ上だけの保存領域 (テストや --memory 用)
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), AppError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// bincode用の内部表現
#[derive(Encode, Decode)]
struct StoreBin {
    entries: Vec<(String, String)>,
}

/// ファイルに書き出す保存領域
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    // MARK:保存先ディレクトリのデフォルト
    pub fn default_dir() -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("jp", "jobwiz", "JOB_WIZ") {
            return proj_dirs.data_dir().to_path_buf();
        }
        // 取得できなかったらカレントディレクトリに（フォールバック）
        PathBuf::from(".")
    }

    /// ディレクトリを用意して既存データを読み込む
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        let entries = Self::load_entries(&dir);
        debug!("opened store at {} ({} keys)", dir.display(), entries.len());
        Ok(Self { dir, entries })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// MARK:ファイルから読み込む (バイナリ優先、JSONフォールバック)
    fn load_entries(dir: &Path) -> BTreeMap<String, String> {
        // 1. バイナリファイル
        let bin_path = dir.join(STORE_FILE_BIN);
        if bin_path.exists() {
            if let Ok(mut file) = File::open(&bin_path) {
                let mut buffer = Vec::new();
                if file.read_to_end(&mut buffer).is_ok() {
                    match bincode::decode_from_slice::<StoreBin, _>(&buffer, standard()) {
                        Ok((bin, _)) => return bin.entries.into_iter().collect(),
                        Err(err) => warn!("{}: {err}", bin_path.display()),
                    }
                }
            }
        }

        // 2. JSONファイル
        let json_path = dir.join(STORE_FILE_JSON);
        if json_path.exists() {
            if let Ok(file) = File::open(&json_path) {
                match serde_json::from_reader(BufReader::new(file)) {
                    Ok(entries) => return entries,
                    Err(err) => warn!("{}: {err}", json_path.display()),
                }
            }
        }

        // どちらも失敗した場合は空
        BTreeMap::new()
    }

    /// MARK:ファイルに書き出す (バイナリ + JSON)
    fn flush(&self) -> Result<(), AppError> {
        let bin = StoreBin {
            entries: self
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        };
        let encoded = bincode::encode_to_vec(&bin, standard())?;
        let mut writer = BufWriter::new(File::create(self.dir.join(STORE_FILE_BIN))?);
        writer.write_all(&encoded)?;
        writer.flush()?;

        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(self.dir.join(STORE_FILE_JSON), json)?;
        Ok(())
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), AppError> {
        self.set_all(vec![(key, value)])
    }

    /// 書き出しに失敗したら、メモリ上の値も元に戻す
    fn set_all(&mut self, pairs: Vec<(&str, String)>) -> Result<(), AppError> {
        let previous: Vec<(String, Option<String>)> = pairs
            .into_iter()
            .map(|(key, value)| (key.to_string(), self.entries.insert(key.to_string(), value)))
            .collect();

        if let Err(err) = self.flush() {
            for (key, old) in previous.into_iter().rev() {
                match old {
                    Some(old) => self.entries.insert(key, old),
                    None => self.entries.remove(&key),
                };
            }
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn append_builds_a_json_array() {
        let mut store = MemoryStore::new();
        append(&mut store, "log", json!({"n": 1})).unwrap();
        append(&mut store, "log", json!({"n": 2})).unwrap();
        assert_eq!(store.get("log").unwrap(), r#"[{"n":1},{"n":2}]"#);
    }

    #[test]
    fn append_recovers_from_garbage() {
        let mut store = MemoryStore::new();
        store.set("log", "{not json".to_string()).unwrap();
        assert!(matches!(read_list::<Value, _>(&store, "log"), Err(AppError::FatalParse(_))));

        append(&mut store, "log", json!(1)).unwrap();
        assert_eq!(read_list::<Value, _>(&store, "log").unwrap(), vec![json!(1)]);
    }

    #[test]
    fn append_resets_when_one_element_has_the_wrong_shape() {
        let mut store = MemoryStore::new();
        store.set("nums", "[1, 2, \"three\"]".to_string()).unwrap();
        assert!(read_list::<u32, _>(&store, "nums").is_err());

        append(&mut store, "nums", 4u32).unwrap();
        assert_eq!(read_list::<u32, _>(&store, "nums").unwrap(), vec![4]);
    }

    #[test]
    fn failed_write_leaves_previous_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        store.set("appliedCount", "1".to_string()).unwrap();

        // store.bin をディレクトリにして書き出しを失敗させる
        let bin = dir.path().join(STORE_FILE_BIN);
        fs::remove_file(&bin).unwrap();
        fs::create_dir(&bin).unwrap();

        assert!(store.set("appliedCount", "2".to_string()).is_err());
        assert_eq!(store.get("appliedCount").as_deref(), Some("1"));

        let result = store.set_all(vec![
            ("appliedCount", "3".to_string()),
            ("interviewCount", "1".to_string()),
        ]);
        assert!(matches!(result, Err(AppError::Io(_))));
        assert_eq!(store.get("appliedCount").as_deref(), Some("1"));
        assert!(store.get("interviewCount").is_none());

        // ディスク上の JSON も古い値のまま
        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("appliedCount").as_deref(), Some("1"));
    }

    #[test]
    fn set_all_writes_every_pair() {
        let mut store = MemoryStore::new();
        store
            .set_all(vec![("a", "1".to_string()), ("b", "2".to_string())])
            .unwrap();
        assert_eq!(store.get("a").as_deref(), Some("1"));
        assert_eq!(store.get("b").as_deref(), Some("2"));
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = FileStore::open(dir.path()).unwrap();
            store.set("appliedCount", "4".to_string()).unwrap();
        }
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("appliedCount").as_deref(), Some("4"));
    }

    #[test]
    fn file_store_falls_back_to_json_mirror() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = FileStore::open(dir.path()).unwrap();
            store.set("interviewCount", "2".to_string()).unwrap();
        }
        fs::write(dir.path().join(STORE_FILE_BIN), b"\xff\xff\xff").unwrap();

        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("interviewCount").as_deref(), Some("2"));
    }

    #[test]
    fn file_store_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        let store = FileStore::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.dir(), nested.as_path());
        assert!(store.get("anything").is_none());
    }
}

// ============================================
// src/tracker.rs
// 応募数・面接数の記録と、面接練習の履歴
// ============================================

use chrono::{DateTime, Utc};
use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::interview::Culture;
use crate::storage::{self, Store};

pub const APPLIED_KEY: &str = "appliedCount";
pub const INTERVIEW_KEY: &str = "interviewCount";
pub const SESSIONS_KEY: &str = "practiceSessions";

/// 面接の連絡が来る確率のデフォルト
pub const DEFAULT_INTERVIEW_PROBABILITY: f64 = 0.2;

/// 保存済みの整数を読む。無い・壊れているなら 0
pub fn read_count<S: Store + ?Sized>(store: &S, key: &str) -> u32 {
    store.get(key).and_then(|raw| leading_count(&raw)).unwrap_or(0)
}

/// 先頭の数字だけを読む ("12abc" は 12、"3.9" は 3)。負数は読めない
fn leading_count(raw: &str) -> Option<u32> {
    let s = raw.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

/// 応募1回分の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Application {
    pub applied: u32,
    pub interviewed: u32,
    pub got_interview: bool,
}

/// 応募を記録する。`job_id` は検証しない
pub fn apply_to_job<S, R>(
    store: &mut S,
    rng: &mut R,
    job_id: &str,
    interview_probability: f64,
) -> Result<Application, AppError>
where
    S: Store + ?Sized,
    R: Rng + ?Sized,
{
    let applied = read_count(store, APPLIED_KEY).saturating_add(1);
    let mut interviewed = read_count(store, INTERVIEW_KEY);

    // 面接の連絡は応募とは独立に抽選
    let got_interview = rng.random_bool(interview_probability.clamp(0.0, 1.0));
    if got_interview {
        interviewed = interviewed.saturating_add(1);
    }

    // 2つのカウンタは片方だけ書かれることがないようまとめて書く
    store.set_all(vec![
        (APPLIED_KEY, applied.to_string()),
        (INTERVIEW_KEY, interviewed.to_string()),
    ])?;

    info!("applied to job {job_id:?}: applied={applied} interviewed={interviewed} interview={got_interview}");
    Ok(Application {
        applied,
        interviewed,
        got_interview,
    })
}

/// 統計欄の3つの数値
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub applied: u32,
    pub interviewed: u32,
    /// パーセント (0〜100 に丸めた値)
    pub response_rate: u32,
}

impl Stats {
    pub fn new(applied: u32, interviewed: u32) -> Self {
        Self {
            applied,
            interviewed,
            response_rate: response_rate(applied, interviewed),
        }
    }

    /// 読むだけで何も書き換えない
    pub fn load<S: Store + ?Sized>(store: &S) -> Self {
        Self::new(read_count(store, APPLIED_KEY), read_count(store, INTERVIEW_KEY))
    }
}

/// 応募0件のときは 0
pub fn response_rate(applied: u32, interviewed: u32) -> u32 {
    if applied == 0 {
        return 0;
    }
    (100.0 * f64::from(interviewed) / f64::from(applied)).round() as u32
}

/// 録音1回分の練習記録
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeSession {
    pub date: DateTime<Utc>,
    pub culture: Culture,
    pub duration: u32,
    pub question: String,
}

pub fn save_session<S: Store + ?Sized>(
    store: &mut S,
    session: &PracticeSession,
) -> Result<(), AppError> {
    info!(
        "practice session saved: culture={} duration={}s",
        session.culture.code(),
        session.duration
    );
    storage::append(store, SESSIONS_KEY, session.clone())
}

/// 練習履歴を読む。1件でも壊れていたら全体を空として扱う
pub fn load_sessions<S: Store + ?Sized>(store: &S) -> Vec<PracticeSession> {
    match storage::read_list(store, SESSIONS_KEY) {
        Ok(sessions) => sessions,
        Err(err) => {
            warn!("{SESSIONS_KEY}: {err}; treating as empty");
            Vec::new()
        }
    }
}

// ============================================
// src/interview.rs
// 面接練習: 質問バンクと録音タイマー
// ============================================

use std::str::FromStr;
use std::time::{Duration, Instant};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

const TICK: Duration = Duration::from_secs(1);

/// 面接スタイル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Culture {
    #[default]
    Jp,
    Us,
    Tech,
}

impl Culture {
    pub const ALL: &'static [Culture] = &[Culture::Jp, Culture::Us, Culture::Tech];

    pub fn code(self) -> &'static str {
        match self {
            Culture::Jp => "jp",
            Culture::Us => "us",
            Culture::Tech => "tech",
        }
    }

    /// セレクトボックスの次の値 (末尾の次は先頭)
    pub fn next(self) -> Self {
        let idx = Culture::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Culture::ALL[(idx + 1) % Culture::ALL.len()]
    }

    pub fn questions(self) -> &'static [&'static str] {
        match self {
            Culture::Jp => &[
                "自己紹介をお願いします。",
                "当社を志望する理由は何ですか？",
                "これまでの仕事で困難だったことは？",
                "チームワークについてどう考えますか？",
            ],
            Culture::Us => &[
                "Tell me about yourself.",
                "Why do you want to work here?",
                "What's your greatest weakness?",
                "Where do you see yourself in 5 years?",
            ],
            Culture::Tech => &[
                "Explain how closures work in JavaScript.",
                "What's the difference between let, const, and var?",
                "How does the event loop work?",
                "Explain REST API principles.",
            ],
        }
    }

    /// 面接の心得 (文化ごとに1つ)
    pub fn note(self) -> &'static str {
        match self {
            Culture::Jp => "Important: Be humble, emphasize teamwork, avoid direct confrontation.",
            Culture::Us => "Important: Be confident, highlight individual achievements, ask questions.",
            Culture::Tech => {
                "Important: Explain clearly, show problem-solving process, admit what you don't know."
            }
        }
    }

    /// 質問をランダムに1つ選び、そのインデックスを返す
    pub fn pick_question<R: Rng + ?Sized>(self, rng: &mut R) -> usize {
        rng.random_range(0..self.questions().len())
    }
}

impl FromStr for Culture {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Culture::ALL
            .iter()
            .copied()
            .find(|c| c.code() == s)
            .ok_or_else(|| AppError::invalid_key("culture", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordingState {
    Idle,
    Recording {
        elapsed: u32,
        /// 次に1秒加算する時刻
        next_tick: Instant,
    },
}

/// 録音ボタンのタイマー (Idle / Recording の2状態)
#[derive(Debug, Clone)]
pub struct Recorder {
    state: RecordingState,
    /// 停止後もタイマー表示は最後の値のまま残る
    shown_secs: u32,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            state: RecordingState::Idle,
            shown_secs: 0,
        }
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.state, RecordingState::Recording { .. })
    }

    /// 録音中の経過秒数 (Idle なら 0)
    pub fn elapsed(&self) -> u32 {
        match self.state {
            RecordingState::Recording { elapsed, .. } => elapsed,
            RecordingState::Idle => 0,
        }
    }

    /// Idle → Recording。すでに録音中なら何もしない
    pub fn start(&mut self, now: Instant) {
        if self.is_recording() {
            return;
        }
        self.state = RecordingState::Recording {
            elapsed: 0,
            next_tick: now + TICK,
        };
        self.shown_secs = 0;
    }

    /// 1秒ごとのカウント。表示が変わったら true
    pub fn tick(&mut self, now: Instant) -> bool {
        let RecordingState::Recording { elapsed, next_tick } = &mut self.state else {
            return false;
        };
        let mut changed = false;
        while now >= *next_tick {
            *elapsed += 1;
            *next_tick += TICK;
            changed = true;
        }
        self.shown_secs = *elapsed;
        changed
    }

    /// Recording → Idle。録音していた秒数を返す
    pub fn stop(&mut self) -> Option<u32> {
        match self.state {
            RecordingState::Recording { elapsed, .. } => {
                self.state = RecordingState::Idle;
                self.shown_secs = elapsed;
                Some(elapsed)
            }
            RecordingState::Idle => None,
        }
    }

    /// "mm:ss" 表示
    pub fn clock(&self) -> String {
        format_clock(self.shown_secs)
    }
}

pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

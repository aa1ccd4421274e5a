// ============================================
// src/lib.rs
// JOB WiZ: 求人検索・応募記録・面接練習・履歴書テンプレート
// ============================================

pub mod app;
pub mod config;
pub mod error;
pub mod interview;
pub mod jobs;
pub mod lang;
pub mod resume;
pub mod storage;
pub mod tracker;
pub mod ui;
pub mod view;

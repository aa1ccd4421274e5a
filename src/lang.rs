// ============================================
// src/lang.rs
// 表示言語 (英語 / 日本語) と文言テーブル
// ============================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::AppError;
use crate::interview::Culture;
use crate::jobs::{Country, JobType};
use crate::resume::Template;

/// 現在の表示言語
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Ja,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::En, Lang::Ja];

    /// `html lang` 相当のコード
    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ja => "ja",
        }
    }

    pub fn strings(self) -> &'static dyn Language {
        match self {
            Lang::En => &English,
            Lang::Ja => &Japanese,
        }
    }

    /// 英語・日本語のペアから現在の言語の方を選ぶ
    pub fn pick<'a>(self, en: &'a str, ja: &'a str) -> &'a str {
        match self {
            Lang::En => en,
            Lang::Ja => ja,
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Lang::En),
            "ja" => Ok(Lang::Ja),
            other => Err(AppError::invalid_key("language", other)),
        }
    }
}

/// 画面上の固定文言
pub trait Language {
    fn app_title(&self) -> &'static str;
    fn search_title(&self) -> &'static str;
    fn search_placeholder(&self) -> &'static str;
    fn search_button(&self) -> &'static str;
    fn country_label(&self) -> &'static str;
    fn all_countries(&self) -> &'static str;
    fn country_name(&self, country: Country) -> &'static str;
    fn job_type_label(&self) -> &'static str;
    fn all_job_types(&self) -> &'static str;
    fn job_type_name(&self, job_type: JobType) -> &'static str;
    fn listings_title(&self) -> &'static str;
    fn no_jobs(&self) -> &'static str;
    fn apply_button(&self) -> &'static str;
    fn applied_notice(&self, applied: u32) -> String;
    fn stats_title(&self) -> &'static str;
    fn applied_label(&self) -> &'static str;
    fn interviews_label(&self) -> &'static str;
    fn response_rate_label(&self) -> &'static str;
    fn practice_title(&self) -> &'static str;
    fn culture_label(&self) -> &'static str;
    fn culture_name(&self, culture: Culture) -> &'static str;
    fn new_question_button(&self) -> &'static str;
    fn record_button(&self) -> &'static str;
    fn stop_button(&self) -> &'static str;
    fn resume_title(&self) -> &'static str;
    fn template_name(&self, template: Template) -> &'static str;
    fn resume_hint(&self) -> &'static str;
    fn preview_heading(&self) -> &'static str;
    fn download_button(&self) -> &'static str;
    fn dismiss_hint(&self) -> &'static str;
    fn help_line(&self) -> &'static str;
    /// 通知欄に出すエラー文 (詳細はログへ)
    fn error_notice(&self, err: &AppError) -> String;
}

pub struct English;
impl Language for English {
    fn app_title(&self) -> &'static str { "JOB WiZ - Job Search & Interview Prep" }
    fn search_title(&self) -> &'static str { "Find Your Job" }
    fn search_placeholder(&self) -> &'static str { "Search jobs (e.g. JavaScript, Osaka)" }
    fn search_button(&self) -> &'static str { "Search" }
    fn country_label(&self) -> &'static str { "Country" }
    fn all_countries(&self) -> &'static str { "All Countries" }
    fn country_name(&self, country: Country) -> &'static str {
        match country {
            Country::Jp => "Japan",
            Country::Us => "United States",
        }
    }
    fn job_type_label(&self) -> &'static str { "Job Type" }
    fn all_job_types(&self) -> &'static str { "All Types" }
    fn job_type_name(&self, job_type: JobType) -> &'static str {
        match job_type {
            JobType::Frontend => "Frontend",
            JobType::Fullstack => "Full Stack",
            JobType::Backend => "Backend",
        }
    }
    fn listings_title(&self) -> &'static str { "Job Listings" }
    fn no_jobs(&self) -> &'static str { "No jobs found" }
    fn apply_button(&self) -> &'static str { "Apply Now" }
    fn applied_notice(&self, applied: u32) -> String {
        format!("Application submitted! You've applied to {} jobs.", applied)
    }
    fn stats_title(&self) -> &'static str { "Your Progress" }
    fn applied_label(&self) -> &'static str { "Applied" }
    fn interviews_label(&self) -> &'static str { "Interviews" }
    fn response_rate_label(&self) -> &'static str { "Response Rate" }
    fn practice_title(&self) -> &'static str { "Interview Practice" }
    fn culture_label(&self) -> &'static str { "Interview Style" }
    fn culture_name(&self, culture: Culture) -> &'static str {
        match culture {
            Culture::Jp => "Japanese",
            Culture::Us => "American",
            Culture::Tech => "Technical",
        }
    }
    fn new_question_button(&self) -> &'static str { "New Question" }
    fn record_button(&self) -> &'static str { "● Record" }
    fn stop_button(&self) -> &'static str { "■ Stop" }
    fn resume_title(&self) -> &'static str { "Resume Templates" }
    fn template_name(&self, template: Template) -> &'static str {
        match template {
            Template::Jp => "Japanese Format",
            Template::Us => "US Format",
            Template::Bilingual => "Bilingual",
        }
    }
    fn resume_hint(&self) -> &'static str { "Choose a template to preview it." }
    fn preview_heading(&self) -> &'static str { "Template Preview" }
    fn download_button(&self) -> &'static str { "Download Template" }
    fn dismiss_hint(&self) -> &'static str { "Press any key to close" }
    fn help_line(&self) -> &'static str {
        "[e/j] lang  [c/t] filters  [/] search  [↑↓ a] apply  [u] style  [n] question  [r] record  [1-3] resume  [q] quit"
    }
    fn error_notice(&self, err: &AppError) -> String {
        match err {
            AppError::InvalidKey { kind, key } => format!("Unknown {kind}: {key}"),
            AppError::InvalidTemplate(key) => format!("Unknown template: {key}"),
            AppError::FatalParse(_) => "Saved data could not be read.".to_string(),
            AppError::Io(_) | AppError::Encode(_) => {
                "Could not save your data. Please try again.".to_string()
            }
        }
    }
}

pub struct Japanese;
impl Language for Japanese {
    fn app_title(&self) -> &'static str { "JOB WiZ - 求人検索と面接対策" }
    fn search_title(&self) -> &'static str { "仕事を探す" }
    fn search_placeholder(&self) -> &'static str { "求人を検索（例：JavaScript、大阪）" }
    fn search_button(&self) -> &'static str { "検索" }
    fn country_label(&self) -> &'static str { "国" }
    fn all_countries(&self) -> &'static str { "すべての国" }
    fn country_name(&self, country: Country) -> &'static str {
        match country {
            Country::Jp => "日本",
            Country::Us => "アメリカ",
        }
    }
    fn job_type_label(&self) -> &'static str { "職種" }
    fn all_job_types(&self) -> &'static str { "すべての職種" }
    fn job_type_name(&self, job_type: JobType) -> &'static str {
        match job_type {
            JobType::Frontend => "フロントエンド",
            JobType::Fullstack => "フルスタック",
            JobType::Backend => "バックエンド",
        }
    }
    fn listings_title(&self) -> &'static str { "求人一覧" }
    fn no_jobs(&self) -> &'static str { "該当する求人がありません" }
    fn apply_button(&self) -> &'static str { "応募する" }
    fn applied_notice(&self, applied: u32) -> String {
        format!("応募しました！現在{}件の応募があります。", applied)
    }
    fn stats_title(&self) -> &'static str { "あなたの進捗" }
    fn applied_label(&self) -> &'static str { "応募数" }
    fn interviews_label(&self) -> &'static str { "面接数" }
    fn response_rate_label(&self) -> &'static str { "返答率" }
    fn practice_title(&self) -> &'static str { "面接練習" }
    fn culture_label(&self) -> &'static str { "面接スタイル" }
    fn culture_name(&self, culture: Culture) -> &'static str {
        match culture {
            Culture::Jp => "日本式",
            Culture::Us => "アメリカ式",
            Culture::Tech => "技術面接",
        }
    }
    fn new_question_button(&self) -> &'static str { "新しい質問" }
    fn record_button(&self) -> &'static str { "● 録音" }
    fn stop_button(&self) -> &'static str { "■ 停止" }
    fn resume_title(&self) -> &'static str { "履歴書テンプレート" }
    fn template_name(&self, template: Template) -> &'static str {
        match template {
            Template::Jp => "日本式",
            Template::Us => "アメリカ式",
            Template::Bilingual => "バイリンガル",
        }
    }
    fn resume_hint(&self) -> &'static str { "テンプレートを選んでプレビューします。" }
    fn preview_heading(&self) -> &'static str { "テンプレートプレビュー" }
    fn download_button(&self) -> &'static str { "テンプレートをダウンロード" }
    fn dismiss_hint(&self) -> &'static str { "任意のキーで閉じる" }
    fn help_line(&self) -> &'static str {
        "[e/j] 言語  [c/t] 絞り込み  [/] 検索  [↑↓ a] 応募  [u] スタイル  [n] 質問  [r] 録音  [1-3] 履歴書  [q] 終了"
    }
    fn error_notice(&self, err: &AppError) -> String {
        match err {
            AppError::InvalidKey { key, .. } => format!("不明な値です: {key}"),
            AppError::InvalidTemplate(key) => format!("不明なテンプレートです: {key}"),
            AppError::FatalParse(_) => "保存データを読み込めませんでした。".to_string(),
            AppError::Io(_) | AppError::Encode(_) => {
                "データを保存できませんでした。もう一度お試しください。".to_string()
            }
        }
    }
}

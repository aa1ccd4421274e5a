// ============================================
// src/view.rs
// 状態 → 表示用モデル (描画処理から切り離す)
// ============================================

use crate::app::App;
use crate::jobs::{Filter, JobPosting};
use crate::lang::{Lang, Language};
use crate::resume::Template;

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    /// `html lang` 相当
    pub lang_code: &'static str,
    pub active_lang: Lang,
    pub title: &'static str,
    pub help: &'static str,
    pub search: SearchView,
    pub listings: ListingView,
    pub stats: StatsView,
    pub practice: PracticeView,
    pub resume: ResumeView,
    pub notice: Option<NoticeView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchView {
    pub title: &'static str,
    pub text: String,
    pub placeholder: &'static str,
    pub focused: bool,
    pub button: &'static str,
    pub country_label: &'static str,
    pub country_value: &'static str,
    pub job_type_label: &'static str,
    pub job_type_value: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobCard {
    pub id: u32,
    pub title: &'static str,
    pub company: &'static str,
    pub location: &'static str,
    pub country_code: String,
    pub description: &'static str,
    pub apply_label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListingBody {
    /// 該当なしメッセージ
    Empty(&'static str),
    Cards(Vec<JobCard>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingView {
    pub title: &'static str,
    pub body: ListingBody,
    pub selected: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatsView {
    pub title: &'static str,
    pub applied: (&'static str, String),
    pub interviews: (&'static str, String),
    pub response_rate: (&'static str, String),
    /// ゲージ用 (0.0〜1.0)
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PracticeView {
    pub title: &'static str,
    pub culture_label: &'static str,
    pub culture_name: &'static str,
    pub question: &'static str,
    pub note: &'static str,
    pub clock: String,
    pub recording: bool,
    pub record_label: &'static str,
    pub new_question_label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResumePreview {
    pub heading: &'static str,
    pub body: &'static str,
    pub download_label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResumeView {
    pub title: &'static str,
    /// (キー, テンプレート名, 選択中か)
    pub options: Vec<(char, &'static str, bool)>,
    pub hint: &'static str,
    pub preview: Option<ResumePreview>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoticeView {
    pub message: String,
    pub hint: &'static str,
}

impl PageView {
    pub fn build(app: &App) -> Self {
        let lang = app.lang;
        let t = lang.strings();
        Self {
            lang_code: lang.code(),
            active_lang: lang,
            title: t.app_title(),
            help: t.help_line(),
            search: search_view(app, t),
            listings: listing_view(app.listings(), app.selected_job, lang),
            stats: stats_view(app, t),
            practice: practice_view(app, t),
            resume: resume_view(app.resume, lang),
            notice: app.notice.as_ref().map(|message| NoticeView {
                message: message.clone(),
                hint: t.dismiss_hint(),
            }),
        }
    }
}

fn search_view(app: &App, t: &dyn Language) -> SearchView {
    SearchView {
        title: t.search_title(),
        text: app.search_text.clone(),
        placeholder: t.search_placeholder(),
        focused: app.search_focused,
        button: t.search_button(),
        country_label: t.country_label(),
        country_value: match app.country_filter {
            Filter::All => t.all_countries(),
            Filter::Only(c) => t.country_name(c),
        },
        job_type_label: t.job_type_label(),
        job_type_value: match app.type_filter {
            Filter::All => t.all_job_types(),
            Filter::Only(ty) => t.job_type_name(ty),
        },
    }
}

pub fn listing_view(jobs: &[JobPosting], selected: usize, lang: Lang) -> ListingView {
    let t = lang.strings();
    let body = if jobs.is_empty() {
        ListingBody::Empty(t.no_jobs())
    } else {
        ListingBody::Cards(
            jobs.iter()
                .map(|job| JobCard {
                    id: job.id,
                    title: job.title(lang),
                    company: job.company,
                    location: job.location(lang),
                    country_code: job.country.code().to_uppercase(),
                    description: job.description(lang),
                    apply_label: t.apply_button(),
                })
                .collect(),
        )
    };
    ListingView {
        title: t.listings_title(),
        body,
        selected,
    }
}

fn stats_view(app: &App, t: &dyn Language) -> StatsView {
    let stats = app.stats;
    StatsView {
        title: t.stats_title(),
        applied: (t.applied_label(), stats.applied.to_string()),
        interviews: (t.interviews_label(), stats.interviewed.to_string()),
        response_rate: (t.response_rate_label(), format!("{}%", stats.response_rate)),
        ratio: (f64::from(stats.response_rate) / 100.0).clamp(0.0, 1.0),
    }
}

fn practice_view(app: &App, t: &dyn Language) -> PracticeView {
    let recording = app.recorder.is_recording();
    PracticeView {
        title: t.practice_title(),
        culture_label: t.culture_label(),
        culture_name: t.culture_name(app.culture),
        question: app.current_question(),
        note: app.culture.note(),
        clock: app.recorder.clock(),
        recording,
        record_label: if recording { t.stop_button() } else { t.record_button() },
        new_question_label: t.new_question_button(),
    }
}

pub fn resume_view(selected: Option<Template>, lang: Lang) -> ResumeView {
    let t = lang.strings();
    ResumeView {
        title: t.resume_title(),
        options: Template::ALL
            .iter()
            .zip(['1', '2', '3'])
            .map(|(&template, key)| (key, t.template_name(template), selected == Some(template)))
            .collect(),
        hint: t.resume_hint(),
        preview: selected.map(|template| ResumePreview {
            heading: t.preview_heading(),
            body: template.preview(lang),
            download_label: t.download_button(),
        }),
    }
}

// ============================================
// src/app.rs
// アプリ全体の状態とキー操作
// ============================================

use std::time::Instant;

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::{debug, error, info};
use rand::rngs::StdRng;

use crate::error::AppError;
use crate::interview::{Culture, Recorder};
use crate::jobs::{Country, Filter, JobPosting, JobType, SAMPLE_JOBS, filter_jobs};
use crate::lang::Lang;
use crate::resume::Template;
use crate::storage::Store;
use crate::tracker::{self, Application, PracticeSession, Stats};

/// 画面全体の状態を持つコントローラ
pub struct App {
    pub lang: Lang,

    // 求人検索
    pub country_filter: Filter<Country>,
    pub type_filter: Filter<JobType>,
    /// 検索欄の文字列 (絞り込みには使わない)
    pub search_text: String,
    pub search_focused: bool,
    /// 最後に絞り込んだ結果
    listings: Vec<JobPosting>,
    pub selected_job: usize,

    /// 統計欄に表示中の値
    pub stats: Stats,

    // 面接練習
    pub culture: Culture,
    pub question_index: usize,
    pub recorder: Recorder,

    pub resume: Option<Template>,

    /// 閉じるまで他の操作を受け付けない通知
    pub notice: Option<String>,
    pub should_quit: bool,

    jobs: &'static [JobPosting],
    interview_probability: f64,
    store: Box<dyn Store>,
    rng: StdRng,
}

impl App {
    pub fn new(store: Box<dyn Store>, rng: StdRng, lang: Lang, interview_probability: f64) -> Self {
        let mut app = Self {
            lang,
            country_filter: Filter::All,
            type_filter: Filter::All,
            search_text: String::new(),
            search_focused: false,
            listings: Vec::new(),
            selected_job: 0,
            stats: Stats::default(),
            culture: Culture::default(),
            question_index: 0,
            recorder: Recorder::new(),
            resume: None,
            notice: None,
            should_quit: false,
            jobs: SAMPLE_JOBS,
            interview_probability,
            store,
            rng,
        };
        app.load_job_listings();
        app.update_stats();
        app.new_question(); // 最初の質問を表示
        app
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    // --------------------------------------------------
    // 言語
    // --------------------------------------------------

    /// 言語を切り替えて一覧を描き直す (同じ言語なら結果は変わらない)
    pub fn set_language(&mut self, lang: Lang) {
        if self.lang != lang {
            info!("language switched: {} -> {}", self.lang, lang);
        }
        self.lang = lang;
        self.load_job_listings();
    }

    pub fn set_language_by_key(&mut self, key: &str) -> Result<(), AppError> {
        self.set_language(key.parse()?);
        Ok(())
    }

    // --------------------------------------------------
    // 求人一覧
    // --------------------------------------------------

    pub fn listings(&self) -> &[JobPosting] {
        &self.listings
    }

    pub fn selected_listing(&self) -> Option<&JobPosting> {
        self.listings.get(self.selected_job)
    }

    /// 現在のフィルタで一覧を作り直す
    pub fn load_job_listings(&mut self) {
        self.listings = filter_jobs(self.jobs, self.country_filter, self.type_filter)
            .into_iter()
            .copied()
            .collect();
        if self.selected_job >= self.listings.len() {
            self.selected_job = self.listings.len().saturating_sub(1);
        }
        debug!(
            "listings: country={:?} type={:?} -> {} jobs",
            self.country_filter,
            self.type_filter,
            self.listings.len()
        );
    }

    pub fn set_filters(&mut self, country: Filter<Country>, job_type: Filter<JobType>) {
        self.country_filter = country;
        self.type_filter = job_type;
        self.load_job_listings();
    }

    /// セレクトボックスの値 ("all", "jp", "frontend" など) で絞り込む
    pub fn set_filters_by_key(&mut self, country: &str, job_type: &str) -> Result<(), AppError> {
        let country = country.parse()?;
        let job_type = job_type.parse()?;
        self.set_filters(country, job_type);
        Ok(())
    }

    pub fn cycle_country_filter(&mut self) {
        self.set_filters(self.country_filter.cycle(Country::ALL), self.type_filter);
    }

    pub fn cycle_type_filter(&mut self) {
        self.set_filters(self.country_filter, self.type_filter.cycle(JobType::ALL));
    }

    /// 検索ボタン / 検索欄で Enter。入力文字列は見ずに一覧を作り直すだけ
    pub fn search(&mut self) {
        debug!("search requested ({:?} is not used for filtering)", self.search_text);
        self.load_job_listings();
    }

    pub fn select_next_job(&mut self) {
        if self.selected_job + 1 < self.listings.len() {
            self.selected_job += 1;
        }
    }

    pub fn select_prev_job(&mut self) {
        self.selected_job = self.selected_job.saturating_sub(1);
    }

    // --------------------------------------------------
    // 応募と統計
    // --------------------------------------------------

    /// 応募を記録して確認メッセージを出す
    pub fn apply_to_job(&mut self, job_id: &str) -> Result<Application, AppError> {
        let result = tracker::apply_to_job(
            self.store.as_mut(),
            &mut self.rng,
            job_id,
            self.interview_probability,
        )?;
        self.update_stats();
        self.notice = Some(self.lang.strings().applied_notice(result.applied));
        Ok(result)
    }

    pub fn apply_selected(&mut self) -> Result<Option<Application>, AppError> {
        let Some(job) = self.selected_listing() else {
            return Ok(None);
        };
        let id = job.id.to_string();
        self.apply_to_job(&id).map(Some)
    }

    pub fn update_stats(&mut self) {
        self.stats = Stats::load(self.store.as_ref());
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // --------------------------------------------------
    // 面接練習
    // --------------------------------------------------

    pub fn current_question(&self) -> &'static str {
        self.culture.questions()[self.question_index]
    }

    pub fn new_question(&mut self) {
        self.question_index = self.culture.pick_question(&mut self.rng);
    }

    /// 文化を変えると質問も引き直す。録音は止めない
    pub fn set_culture(&mut self, culture: Culture) {
        self.culture = culture;
        self.new_question();
    }

    pub fn set_culture_by_key(&mut self, key: &str) -> Result<(), AppError> {
        self.set_culture(key.parse()?);
        Ok(())
    }

    pub fn cycle_culture(&mut self) {
        self.set_culture(self.culture.next());
    }

    /// 録音開始 / 停止。停止時は保存した記録を返す
    pub fn toggle_recording(&mut self, now: Instant) -> Result<Option<PracticeSession>, AppError> {
        if !self.recorder.is_recording() {
            self.recorder.start(now);
            info!("recording started ({})", self.culture.code());
            return Ok(None);
        }

        self.recorder.tick(now);
        let Some(duration) = self.recorder.stop() else {
            return Ok(None);
        };
        let session = PracticeSession {
            date: Utc::now(),
            culture: self.culture,
            duration,
            question: self.current_question().to_string(),
        };
        tracker::save_session(self.store.as_mut(), &session)?;
        Ok(Some(session))
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.recorder.tick(now);
    }

    // --------------------------------------------------
    // 履歴書
    // --------------------------------------------------

    pub fn preview_resume(&mut self, template: Template) {
        self.resume = Some(template);
    }

    pub fn preview_resume_by_key(&mut self, key: &str) -> Result<(), AppError> {
        self.preview_resume(key.parse()?);
        Ok(())
    }

    // --------------------------------------------------
    // キー入力
    // --------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if let Err(err) = self.dispatch_key(key, now) {
            error!("{err}");
            self.notice = Some(self.lang.strings().error_notice(&err));
        }
    }

    fn dispatch_key(&mut self, key: KeyEvent, now: Instant) -> Result<(), AppError> {
        // 通知が出ている間はどのキーでも閉じるだけ
        if self.notice.is_some() {
            self.dismiss_notice();
            return Ok(());
        }

        if self.search_focused {
            match key.code {
                KeyCode::Esc => self.search_focused = false,
                KeyCode::Enter => self.search(),
                KeyCode::Backspace => {
                    self.search_text.pop();
                }
                KeyCode::Char(c) => self.search_text.push(c),
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('e') => self.set_language(Lang::En),
            KeyCode::Char('j') => self.set_language(Lang::Ja),
            KeyCode::Char('c') => self.cycle_country_filter(),
            KeyCode::Char('t') => self.cycle_type_filter(),
            KeyCode::Char('/') => self.search_focused = true,
            KeyCode::Char('s') => self.search(),
            KeyCode::Up => self.select_prev_job(),
            KeyCode::Down => self.select_next_job(),
            KeyCode::Enter | KeyCode::Char('a') => {
                self.apply_selected()?;
            }
            KeyCode::Char('u') => self.cycle_culture(),
            KeyCode::Char('n') => self.new_question(),
            KeyCode::Char('r') => {
                self.toggle_recording(now)?;
            }
            KeyCode::Char('1') => self.preview_resume(Template::Jp),
            KeyCode::Char('2') => self.preview_resume(Template::Us),
            KeyCode::Char('3') => self.preview_resume(Template::Bilingual),
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore, STORE_FILE_BIN};
    use crate::tracker::{APPLIED_KEY, load_sessions, read_count};
    use crossterm::event::KeyModifiers;
    use rand::SeedableRng;
    use std::time::Duration;

    fn app() -> App {
        App::new(
            Box::new(MemoryStore::new()),
            StdRng::seed_from_u64(2024),
            Lang::En,
            0.2,
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), Instant::now());
    }

    fn listing_ids(app: &App) -> Vec<u32> {
        app.listings().iter().map(|j| j.id).collect()
    }

    #[test]
    fn starts_idle_with_a_question() {
        let app = app();
        assert_eq!(app.lang, Lang::En);
        assert!(!app.recorder.is_recording());
        assert!(Culture::Jp.questions().contains(&app.current_question()));
        assert_eq!(listing_ids(&app), vec![1, 2, 3]);
        assert_eq!(app.stats, Stats::default());
    }

    #[test]
    fn filters_by_select_keys() {
        let mut app = app();
        app.set_filters_by_key("jp", "frontend").unwrap();
        assert_eq!(listing_ids(&app), vec![2]);
        app.set_filters_by_key("us", "all").unwrap();
        assert!(app.listings().is_empty());
        assert!(app.set_filters_by_key("jp", "designer").is_err());
        assert!(app.listings().is_empty());
    }

    #[test]
    fn search_text_does_not_filter() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        for c in "Osaka zzz".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.search_text, "Osaka zzz");
        assert_eq!(listing_ids(&app), vec![1, 2, 3]);

        // 検索欄にいる間は 'q' も文字として入る
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        assert!(!app.search_focused);
    }

    #[test]
    fn apply_bumps_counter_and_blocks_until_dismissed() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.stats.applied, 1);
        assert_eq!(
            app.notice.as_deref(),
            Some("Application submitted! You've applied to 1 jobs.")
        );

        // 通知中のキーは閉じるだけ
        press(&mut app, KeyCode::Char('a'));
        assert!(app.notice.is_none());
        assert_eq!(app.stats.applied, 1);
    }

    #[test]
    fn apply_is_monotonic_in_either_language() {
        let mut app = app();
        for i in 0..6 {
            app.set_language(if i % 2 == 0 { Lang::En } else { Lang::Ja });
            app.apply_to_job("not-a-listed-id").unwrap();
        }
        assert_eq!(read_count(app.store(), APPLIED_KEY), 6);
        assert_eq!(app.stats.applied, 6);
        assert_eq!(app.notice.as_deref(), Some("応募しました！現在6件の応募があります。"));
    }

    #[test]
    fn recording_saves_one_session() {
        let mut app = app();
        app.set_culture(Culture::Tech);
        let t0 = Instant::now();
        assert!(app.toggle_recording(t0).unwrap().is_none());
        assert!(app.recorder.is_recording());

        app.on_tick(t0 + Duration::from_secs(1));
        app.on_tick(t0 + Duration::from_secs(2));
        let question = app.current_question();
        let session = app
            .toggle_recording(t0 + Duration::from_millis(3200))
            .unwrap()
            .unwrap();
        assert_eq!(session.duration, 3);
        assert_eq!(session.culture, Culture::Tech);
        assert_eq!(session.question, question);
        assert!(!app.recorder.is_recording());
        assert_eq!(load_sessions(app.store()), vec![session]);
    }

    #[test]
    fn second_recording_keeps_the_first() {
        let mut app = app();
        let t0 = Instant::now();
        app.toggle_recording(t0).unwrap();
        let first = app.toggle_recording(t0 + Duration::from_secs(2)).unwrap().unwrap();
        app.toggle_recording(t0 + Duration::from_secs(10)).unwrap();
        let second = app.toggle_recording(t0 + Duration::from_secs(15)).unwrap().unwrap();
        assert_eq!(second.duration, 5);
        assert_eq!(load_sessions(app.store()), vec![first, second]);
    }

    #[test]
    fn changing_culture_keeps_recording() {
        let mut app = app();
        let t0 = Instant::now();
        app.toggle_recording(t0).unwrap();
        app.cycle_culture();
        assert_eq!(app.culture, Culture::Us);
        assert!(app.recorder.is_recording());
        assert!(Culture::Us.questions().contains(&app.current_question()));

        let session = app.toggle_recording(t0 + Duration::from_secs(4)).unwrap().unwrap();
        assert_eq!(session.culture, Culture::Us);
    }

    #[test]
    fn same_seed_same_questions() {
        let mut a = app();
        let mut b = app();
        for _ in 0..10 {
            a.new_question();
            b.new_question();
            assert_eq!(a.current_question(), b.current_question());
        }
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut app = app();
        assert!(matches!(
            app.set_culture_by_key("sales"),
            Err(AppError::InvalidKey { kind: "culture", .. })
        ));
        assert!(matches!(
            app.preview_resume_by_key("cv"),
            Err(AppError::InvalidTemplate(_))
        ));
        assert!(app.set_language_by_key("de").is_err());
        assert_eq!(app.lang, Lang::En);
        assert!(app.resume.is_none());
    }

    #[test]
    fn resume_preview_has_no_side_effects() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.resume, Some(Template::Bilingual));
        assert_eq!(app.stats, Stats::default());
        assert!(app.store().get(tracker::SESSIONS_KEY).is_none());
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    /// store.bin の位置にディレクトリがあって書き込めない保存領域
    fn unwritable_app(dir: &std::path::Path, lang: Lang) -> App {
        let store = FileStore::open(dir).unwrap();
        std::fs::create_dir(dir.join(STORE_FILE_BIN)).unwrap();
        App::new(Box::new(store), StdRng::seed_from_u64(2024), lang, 1.0)
    }

    #[test]
    fn failed_apply_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = unwritable_app(dir.path(), Lang::En);

        assert!(app.apply_to_job("1").is_err());
        assert_eq!(app.stats, Stats::default());
        assert!(app.store().get(APPLIED_KEY).is_none());
        assert!(app.store().get(tracker::INTERVIEW_KEY).is_none());
        assert!(app.notice.is_none());
    }

    #[test]
    fn write_errors_show_in_the_current_language() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = unwritable_app(dir.path(), Lang::Ja);

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(
            app.notice.as_deref(),
            Some("データを保存できませんでした。もう一度お試しください。")
        );
        assert_eq!(app.stats.applied, 0);

        press(&mut app, KeyCode::Char('x'));
        assert!(app.notice.is_none());
        app.set_language(Lang::En);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(
            app.notice.as_deref(),
            Some("Could not save your data. Please try again.")
        );
    }
}

/*
 * src/jobs.rs
 * 求人データと絞り込みロジック
 */

use std::str::FromStr;

use crate::error::AppError;
use crate::lang::Lang;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Country {
    Jp,
    Us,
}

impl Country {
    pub const ALL: &'static [Country] = &[Country::Jp, Country::Us];

    pub fn code(self) -> &'static str {
        match self {
            Country::Jp => "jp",
            Country::Us => "us",
        }
    }
}

impl FromStr for Country {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Country::ALL
            .iter()
            .copied()
            .find(|c| c.code() == s)
            .ok_or_else(|| AppError::invalid_key("country", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobType {
    Frontend,
    Fullstack,
    Backend,
}

impl JobType {
    pub const ALL: &'static [JobType] = &[JobType::Frontend, JobType::Fullstack, JobType::Backend];

    pub fn code(self) -> &'static str {
        match self {
            JobType::Frontend => "frontend",
            JobType::Fullstack => "fullstack",
            JobType::Backend => "backend",
        }
    }
}

impl FromStr for JobType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobType::ALL
            .iter()
            .copied()
            .find(|t| t.code() == s)
            .ok_or_else(|| AppError::invalid_key("job type", s))
    }
}

/// セレクトボックスの値 ("all" または特定の値)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T: Copy + PartialEq> Filter<T> {
    /// "all" なら常に一致、それ以外は完全一致のみ
    pub fn matches(&self, value: T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => *wanted == value,
        }
    }

    /// All → 選択肢の先頭 → ... → 末尾 → All の順に巡回する
    pub fn cycle(self, options: &[T]) -> Self {
        match self {
            Filter::All => options.first().map_or(Filter::All, |&first| Filter::Only(first)),
            Filter::Only(current) => {
                let pos = options.iter().position(|o| *o == current);
                match pos.and_then(|i| options.get(i + 1)) {
                    Some(&next) => Filter::Only(next),
                    None => Filter::All,
                }
            }
        }
    }
}

impl<T: FromStr<Err = AppError>> FromStr for Filter<T> {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(Filter::All)
        } else {
            s.parse().map(Filter::Only)
        }
    }
}

/// 求人1件 (実行中に増減しない)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct JobPosting {
    pub id: u32,
    pub title: &'static str,
    pub title_ja: &'static str,
    pub company: &'static str,
    pub location: &'static str,
    pub location_ja: &'static str,
    pub job_type: JobType,
    pub country: Country,
    pub description: &'static str,
    pub description_ja: &'static str,
}

impl JobPosting {
    pub fn title(&self, lang: Lang) -> &'static str {
        lang.pick(self.title, self.title_ja)
    }

    pub fn location(&self, lang: Lang) -> &'static str {
        lang.pick(self.location, self.location_ja)
    }

    pub fn description(&self, lang: Lang) -> &'static str {
        lang.pick(self.description, self.description_ja)
    }
}

/// サンプル求人
pub const SAMPLE_JOBS: &[JobPosting] = &[
    JobPosting {
        id: 1,
        title: "Frontend Developer",
        title_ja: "フロントエンド開発者",
        company: "Rakuten Osaka",
        location: "Osaka, Japan",
        location_ja: "大阪府",
        job_type: JobType::Fullstack,
        country: Country::Jp,
        description: "Join our e-commerce team building next-gen web applications.",
        description_ja: "次世代Webアプリケーションを構築するECチームに参加。",
    },
    JobPosting {
        id: 2,
        title: "Junior JavaScript Developer",
        title_ja: "ジュニアJavaScript開発者",
        company: "Tech Startup Osaka",
        location: "Osaka, Japan",
        location_ja: "大阪府",
        job_type: JobType::Frontend,
        country: Country::Jp,
        description: "Looking for motivated junior developers to grow with our team.",
        description_ja: "チームと共に成長できるやる気のあるジュニア開発者を募集。",
    },
    JobPosting {
        id: 3,
        title: "Bilingual Web Developer",
        title_ja: "バイリンガルWeb開発者",
        company: "Global IT Osaka",
        location: "Osaka, Japan",
        location_ja: "大阪府",
        job_type: JobType::Fullstack,
        country: Country::Jp,
        description: "Work with international clients on web projects. Japanese/English required.",
        description_ja: "国際的なクライアントとWebプロジェクトを遂行。日英バイリンガル必須。",
    },
];

/// 国と職種の両方に一致する求人だけを返す (順序は元のまま)
pub fn filter_jobs<'a>(
    jobs: &'a [JobPosting],
    country: Filter<Country>,
    job_type: Filter<JobType>,
) -> Vec<&'a JobPosting> {
    jobs.iter()
        .filter(|job| country.matches(job.country) && job_type.matches(job.job_type))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(jobs: &[&JobPosting]) -> Vec<u32> {
        jobs.iter().map(|j| j.id).collect()
    }

    #[test]
    fn japan_with_all_types_returns_every_sample() {
        let found = filter_jobs(SAMPLE_JOBS, Filter::Only(Country::Jp), Filter::All);
        assert_eq!(ids(&found), vec![1, 2, 3]);
    }

    #[test]
    fn both_predicates_are_anded() {
        let found = filter_jobs(
            SAMPLE_JOBS,
            Filter::Only(Country::Jp),
            Filter::Only(JobType::Frontend),
        );
        assert_eq!(ids(&found), vec![2]);
    }

    #[test]
    fn us_has_no_sample_jobs() {
        assert!(filter_jobs(SAMPLE_JOBS, Filter::Only(Country::Us), Filter::All).is_empty());
    }

    #[test]
    fn filter_keys_parse_from_select_values() {
        assert_eq!("all".parse::<Filter<Country>>().unwrap(), Filter::All);
        assert_eq!(
            "fullstack".parse::<Filter<JobType>>().unwrap(),
            Filter::Only(JobType::Fullstack)
        );
        assert!(matches!(
            "mars".parse::<Filter<Country>>(),
            Err(AppError::InvalidKey { kind: "country", .. })
        ));
    }

    #[test]
    fn cycle_wraps_back_to_all() {
        let mut f: Filter<Country> = Filter::All;
        let mut seen = Vec::new();
        for _ in 0..3 {
            f = f.cycle(Country::ALL);
            seen.push(f);
        }
        assert_eq!(
            seen,
            vec![Filter::Only(Country::Jp), Filter::Only(Country::Us), Filter::All]
        );
    }

    #[test]
    fn localized_fields_follow_language() {
        let job = &SAMPLE_JOBS[0];
        assert_eq!(job.title(Lang::En), "Frontend Developer");
        assert_eq!(job.title(Lang::Ja), "フロントエンド開発者");
        assert_eq!(job.location(Lang::Ja), "大阪府");
    }
}

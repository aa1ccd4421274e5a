/*
 * src/resume.rs
 * 履歴書テンプレートの見本テキスト
 */

use std::str::FromStr;

use crate::error::AppError;
use crate::lang::Lang;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Jp,
    Us,
    Bilingual,
}

impl Template {
    pub const ALL: &'static [Template] = &[Template::Jp, Template::Us, Template::Bilingual];

    pub fn code(self) -> &'static str {
        match self {
            Template::Jp => "jp",
            Template::Us => "us",
            Template::Bilingual => "bilingual",
        }
    }

    /// テンプレート本文 (固定文字列の参照のみ、副作用なし)
    pub fn preview(self, lang: Lang) -> &'static str {
        match (self, lang) {
            (Template::Jp, Lang::En) => {
                "Japanese Resume Format\n\n\
                 • Personal Information at top\n\
                 • Work experience in chronological order\n\
                 • Education details\n\
                 • Skills and qualifications\n\
                 • Photo on right side\n\
                 • Humble language style"
            }
            (Template::Jp, Lang::Ja) => {
                "日本式履歴書\n\n\
                 • 個人情報を上部に\n\
                 • 職歴を時系列で\n\
                 • 学歴詳細\n\
                 • スキルと資格\n\
                 • 写真を右側に\n\
                 • 謙虚な表現スタイル"
            }
            (Template::Us, Lang::En) => {
                "US Resume Format\n\n\
                 • Contact information\n\
                 • Professional summary\n\
                 • Work experience with achievements\n\
                 • Education\n\
                 • Skills (technical & soft)\n\
                 • No photo or age\n\
                 • Action-oriented language"
            }
            (Template::Us, Lang::Ja) => {
                "アメリカ式履歴書\n\n\
                 • 連絡先情報\n\
                 • プロフェッショナルサマリー\n\
                 • 実績のある職務経験\n\
                 • 教育\n\
                 • スキル（技術・ソフト）\n\
                 • 写真・年齢なし\n\
                 • 行動志向の表現"
            }
            (Template::Bilingual, Lang::En) => {
                "Bilingual Resume Format\n\n\
                 • Both Japanese and English sections\n\
                 • Cultural adaptation notes\n\
                 • Translation of key terms\n\
                 • Format acceptable in both cultures\n\
                 • Highlights bilingual advantage"
            }
            (Template::Bilingual, Lang::Ja) => {
                "バイリンガル履歴書\n\n\
                 • 日英両方のセクション\n\
                 • 文化的適応の注記\n\
                 • 重要な用語の翻訳\n\
                 • 両文化で受け入れ可能な形式\n\
                 • バイリンガル強みの強調"
            }
        }
    }
}

impl FromStr for Template {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::ALL
            .iter()
            .copied()
            .find(|t| t.code() == s)
            .ok_or_else(|| AppError::InvalidTemplate(s.to_string()))
    }
}

/// キー文字列からプレビュー本文を引く
pub fn preview_by_key(key: &str, lang: Lang) -> Result<&'static str, AppError> {
    Ok(key.parse::<Template>()?.preview(lang))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_is_a_stable_lookup() {
        for &template in Template::ALL {
            for lang in Lang::ALL {
                assert_eq!(template.preview(lang), template.preview(lang));
            }
        }
        assert!(Template::Us.preview(Lang::En).starts_with("US Resume Format\n\n• Contact"));
        assert!(Template::Bilingual.preview(Lang::Ja).starts_with("バイリンガル履歴書"));
    }

    #[test]
    fn unknown_template_key_is_rejected() {
        assert_eq!(preview_by_key("jp", Lang::Ja).unwrap(), Template::Jp.preview(Lang::Ja));
        assert!(matches!(
            preview_by_key("eu", Lang::En),
            Err(AppError::InvalidTemplate(key)) if key == "eu"
        ));
    }
}

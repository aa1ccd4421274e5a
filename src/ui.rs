// ============================================
// src/ui.rs
// UI描画 (PageView を ratatui で表示するだけ)
// ============================================

use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
};

use crate::lang::Lang;
use crate::view::{ListingBody, ListingView, PageView, PracticeView, ResumeView, SearchView, StatsView};

pub fn ui(f: &mut Frame, view: &PageView) {
    let size = f.area();
    // 枠線を描画
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} [{}]", view.title, view.lang_code));
    let inner_area = block.inner(size);
    f.render_widget(block, size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // [0] 言語ボタン
            Constraint::Length(4),  // [1] 検索と絞り込み
            Constraint::Min(8),     // [2] 求人一覧 + 右カラム
            Constraint::Length(11), // [3] 履歴書テンプレート
            Constraint::Length(1),  // [4] 操作説明
        ])
        .split(inner_area);

    render_lang_bar(f, chunks[0], view.active_lang);
    render_search(f, chunks[1], &view.search);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);
    render_listings(f, middle[0], &view.listings);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(6)])
        .split(middle[1]);
    render_stats(f, right[0], &view.stats);
    render_practice(f, right[1], &view.practice);

    render_resume(f, chunks[3], &view.resume);

    f.render_widget(
        Paragraph::new(view.help).style(Style::default().fg(Color::DarkGray)),
        chunks[4],
    );

    // 通知は最前面に
    if let Some(notice) = &view.notice {
        let area = centered(size, 60, 5);
        f.render_widget(Clear, area);
        f.render_widget(
            Paragraph::new(vec![
                Line::from(notice.message.as_str()).bold(),
                Line::from(""),
                Line::from(notice.hint).style(Style::default().fg(Color::Gray)),
            ])
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true })
            .centered(),
            area,
        );
    }
}

fn render_lang_bar(f: &mut Frame, area: Rect, active: Lang) {
    let spans: Vec<Span> = Lang::ALL
        .iter()
        .map(|&lang| {
            let label = match lang {
                Lang::En => " EN ",
                Lang::Ja => " 日本語 ",
            };
            // アクティブなボタンだけ反転
            if lang == active {
                Span::styled(label, Style::default().fg(Color::Black).bg(Color::White))
            } else {
                Span::styled(label, Style::default().fg(Color::Gray))
            }
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(spans)).right_aligned(), area);
}

fn render_search(f: &mut Frame, area: Rect, search: &SearchView) {
    let input = if search.text.is_empty() {
        Span::styled(search.placeholder, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(search.text.as_str())
    };
    let input_style = if search.focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let lines = vec![
        Line::from(vec![
            input,
            Span::raw("  "),
            Span::styled(format!("[{}]", search.button), Style::default().fg(Color::Cyan)),
        ])
        .style(input_style),
        Line::from(vec![
            Span::raw(format!("{}: ", search.country_label)),
            Span::styled(search.country_value, Style::default().fg(Color::Green)),
            Span::raw("   "),
            Span::raw(format!("{}: ", search.job_type_label)),
            Span::styled(search.job_type_value, Style::default().fg(Color::Green)),
        ]),
    ];
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(search.title)),
        area,
    );
}

fn render_listings(f: &mut Frame, area: Rect, listings: &ListingView) {
    let block = Block::default().borders(Borders::ALL).title(listings.title);
    let lines: Vec<Line> = match &listings.body {
        ListingBody::Empty(message) => {
            vec![Line::from(*message).style(Style::default().fg(Color::Gray)).centered()]
        }
        ListingBody::Cards(cards) => {
            let mut lines = Vec::new();
            for (i, card) in cards.iter().enumerate() {
                let selected = i == listings.selected;
                let marker = if selected { "▶ " } else { "  " };
                lines.push(Line::from(vec![
                    Span::raw(marker),
                    Span::styled(card.title, Style::default().fg(Color::White).bold()),
                ]));
                lines.push(Line::from(format!("  {}", card.company)).style(Style::default().fg(Color::Cyan)));
                lines.push(
                    Line::from(format!("  {} · {}", card.location, card.country_code))
                        .style(Style::default().fg(Color::Gray)),
                );
                lines.push(Line::from(format!("  {}", card.description)));
                let apply_style = if selected {
                    Style::default().fg(Color::Black).bg(Color::Green)
                } else {
                    Style::default().fg(Color::Green)
                };
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(format!("[{}]", card.apply_label), apply_style),
                ]));
                lines.push(Line::from(""));
            }
            lines
        }
    };
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_stats(f: &mut Frame, area: Rect, stats: &StatsView) {
    let block = Block::default().borders(Borders::ALL).title(stats.title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(format!("{}: ", stats.applied.0)),
            Span::styled(stats.applied.1.as_str(), Style::default().fg(Color::Yellow)),
            Span::raw("   "),
            Span::raw(format!("{}: ", stats.interviews.0)),
            Span::styled(stats.interviews.1.as_str(), Style::default().fg(Color::Yellow)),
        ])),
        rows[0],
    );

    let label = format!("{} {}", stats.response_rate.0, stats.response_rate.1);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::NONE))
        .gauge_style(Style::default().fg(Color::Magenta).bg(Color::Black))
        .ratio(stats.ratio)
        .label(label);
    f.render_widget(gauge, rows[1]);
}

fn render_practice(f: &mut Frame, area: Rect, practice: &PracticeView) {
    let clock_style = if practice.recording {
        Style::default().fg(Color::Red).bold()
    } else {
        Style::default().fg(Color::White)
    };
    let record_style = if practice.recording {
        Style::default().fg(Color::White).bg(Color::Red)
    } else {
        Style::default().fg(Color::Red)
    };
    let lines = vec![
        Line::from(vec![
            Span::raw(format!("{}: ", practice.culture_label)),
            Span::styled(practice.culture_name, Style::default().fg(Color::Green)),
        ]),
        Line::from(""),
        Line::from(practice.question).style(Style::default().fg(Color::White).bold()),
        Line::from(practice.note).style(Style::default().fg(Color::Yellow)),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("[{}]", practice.record_label), record_style),
            Span::raw("  "),
            Span::styled(practice.clock.as_str(), clock_style),
            Span::raw("  "),
            Span::styled(format!("[{}]", practice.new_question_label), Style::default().fg(Color::Cyan)),
        ]),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(practice.title))
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_resume(f: &mut Frame, area: Rect, resume: &ResumeView) {
    let block = Block::default().borders(Borders::ALL).title(resume.title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(10)])
        .split(inner);

    let options: Vec<Line> = resume
        .options
        .iter()
        .map(|&(key, name, selected)| {
            let style = if selected {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!("[{}] {}", key, name), style))
        })
        .collect();
    f.render_widget(Paragraph::new(options), cols[0]);

    let preview: Vec<Line> = match &resume.preview {
        Some(p) => {
            let mut lines = vec![Line::from(p.heading).bold()];
            lines.extend(p.body.lines().map(Line::from));
            lines.push(Line::from(Span::styled(
                format!("[{}]", p.download_label),
                Style::default().fg(Color::DarkGray),
            )));
            lines
        }
        None => vec![Line::from(resume.hint).style(Style::default().fg(Color::Gray))],
    };
    f.render_widget(Paragraph::new(preview), cols[1]);
}

/// 画面中央に幅 `percent_x`%、高さ `height` 行の矩形
fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(height), Constraint::Fill(1)])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::storage::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::backend::TestBackend;

    fn rendered(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();
        let view = PageView::build(app);
        terminal.draw(|f| ui(f, &view)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn draws_without_a_real_terminal() {
        let mut app = App::new(Box::new(MemoryStore::new()), StdRng::seed_from_u64(3), Lang::En, 0.2);
        let screen = rendered(&app);
        assert!(screen.contains("Job Listings"));
        assert!(screen.contains("Apply Now"));

        app.apply_to_job("1").unwrap();
        let screen = rendered(&app);
        assert!(screen.contains("Application submitted!"));
    }
}

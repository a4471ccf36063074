//! Plain-text presentation of a page for terminals.

use tabled::Table;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};

use crate::dashboard::{DashboardPage, ErrorView, TableSort};

fn table_from_rows(rows: Vec<Vec<String>>, right_aligned: &[usize]) -> String {
    let mut table = Table::from_iter(rows);
    table.with(Style::modern());
    for &column in right_aligned {
        table.with(Modify::new(Columns::single(column)).with(Alignment::right()));
    }
    table.to_string()
}

#[must_use]
pub fn render_cards(page: &DashboardPage) -> String {
    let titles: Vec<String> = page.cards.iter().map(|card| card.title.clone()).collect();
    let values: Vec<String> = page.cards.iter().map(|card| card.value.clone()).collect();
    let deviations: Vec<String> = page
        .cards
        .iter()
        .map(|card| {
            card.deviation
                .as_ref()
                .map(|badge| format!("{} {}", badge.direction.arrow(), badge.text))
                .unwrap_or_default()
        })
        .collect();

    let mut rows = vec![titles, values];
    if deviations.iter().any(|text| !text.is_empty()) {
        rows.push(deviations);
    }
    table_from_rows(rows, &[])
}

#[must_use]
pub fn render_best_times(page: &DashboardPage) -> String {
    let texts = page.locale.texts();
    let mut rows = vec![vec![
        texts.column_time.to_owned(),
        texts.column_price.to_owned(),
    ]];
    rows.extend(
        page.best_times
            .iter()
            .map(|entry| vec![entry.time_label.clone(), entry.price_text.clone()]),
    );
    table_from_rows(rows, &[1])
}

#[must_use]
pub fn render_price_table(page: &DashboardPage, sort: TableSort) -> String {
    let texts = page.locale.texts();
    let mut rows = vec![vec![
        texts.column_time.to_owned(),
        texts.column_price.to_owned(),
        texts.column_status.to_owned(),
    ]];
    rows.extend(page.table_sorted(sort).into_iter().map(|row| {
        vec![row.time_label, row.price_text, row.status_label]
    }));
    table_from_rows(rows, &[1])
}

/// Whole page: header, cards, guidance, best times, table, footer.
#[must_use]
pub fn render_page(page: &DashboardPage, sort: TableSort) -> String {
    let texts = page.locale.texts();
    let mut sections = vec![
        page.title.clone(),
        format!("{}\n", page.subtitle),
        render_cards(page),
    ];
    if let Some(guidance) = &page.guidance {
        sections.push(guidance.text.clone());
    }
    sections.push(format!("\n{}", texts.best_times_heading));
    sections.push(render_best_times(page));
    sections.push(format!("\n{}", texts.table_heading));
    sections.push(render_price_table(page, sort));
    sections.push(format!("\n{}", page.footer.source));
    sections.push(page.footer.updated.clone());
    sections.join("\n")
}

#[must_use]
pub fn render_error(view: &ErrorView) -> String {
    format!(
        "{}\n{}\n{}\n[{}]",
        view.title, view.message, view.hint, view.retry_label
    )
}

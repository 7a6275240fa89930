//! HTML extraction for screener.in pages. Values stay as the page's
//! strings; the statement normalizer owns numeric interpretation.

use analysis_core::{AnalysisError, RawRow, RawStatement, ValuationRatios};
use scraper::{ElementRef, Html, Selector};

/// Candidate selectors for the quarterly results table, most specific
/// first.
const TABLE_SELECTORS: &[&str] = &["section#quarters table", "table.data-table", "table"];

const MAX_CONCALL_LINKS: usize = 3;

fn selector(css: &str) -> Result<Selector, AnalysisError> {
    Selector::parse(css).map_err(|e| AnalysisError::Parse(e.to_string()))
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Extract the quarterly results table: header cells become period
/// labels (first header cell is the line-item column), each body row
/// becomes a labeled value row. Short rows are padded with empty cells
/// so every row spans all periods.
pub fn quarters_table(html: &str) -> Result<RawStatement, AnalysisError> {
    let document = Html::parse_document(html);

    let mut table = None;
    for css in TABLE_SELECTORS {
        let sel = selector(css)?;
        if let Some(found) = document.select(&sel).next() {
            table = Some(found);
            break;
        }
    }
    let table = table.ok_or_else(|| AnalysisError::Parse("no results table found".into()))?;

    let header_sel = selector("thead th")?;
    let periods: Vec<String> = table.select(&header_sel).skip(1).map(text_of).collect();
    if periods.is_empty() {
        return Err(AnalysisError::Parse("results table has no period columns".into()));
    }

    let row_sel = selector("tbody tr")?;
    let cell_sel = selector("td")?;
    let mut rows = Vec::new();
    for tr in table.select(&row_sel) {
        let mut cells = tr.select(&cell_sel);
        let Some(label_cell) = cells.next() else { continue };
        let label = text_of(label_cell);
        if label.is_empty() {
            continue;
        }
        let mut values: Vec<String> = cells.map(text_of).collect();
        values.resize(periods.len(), String::new());
        rows.push(RawRow { label, values });
    }

    Ok(RawStatement { periods, rows })
}

/// The "about" paragraph of the company page, if present.
pub fn about(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let sel = Selector::parse("p.about").ok()?;
    let text = document.select(&sel).next().map(text_of)?;
    if text.is_empty() { None } else { Some(text) }
}

/// Up to 3 concall links, made absolute against the client's base URL.
pub fn concall_links(html: &str, base_url: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(sel) = Selector::parse("a[href]") else {
        return Vec::new();
    };
    document
        .select(&sel)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.contains("concall"))
        .take(MAX_CONCALL_LINKS)
        .map(|href| {
            if href.starts_with("http") {
                href.to_string()
            } else {
                format!("{}{}", base_url, href)
            }
        })
        .collect()
}

fn parse_number(text: &str) -> Option<f64> {
    text.replace(',', "").trim().parse().ok()
}

/// Valuation ratios from the top-ratios list. Each list item carries a
/// name span and a number span; missing or malformed entries stay
/// `None`.
pub fn valuation_ratios(html: &str) -> ValuationRatios {
    let document = Html::parse_document(html);
    let mut ratios = ValuationRatios::default();

    let (Ok(item_sel), Ok(name_sel), Ok(number_sel)) = (
        Selector::parse("li.flex.flex-space-between"),
        Selector::parse(".name"),
        Selector::parse(".number"),
    ) else {
        return ratios;
    };

    for item in document.select(&item_sel) {
        let Some(name) = item.select(&name_sel).next().map(text_of) else { continue };
        let value = item.select(&number_sel).next().and_then(|n| parse_number(&text_of(n)));

        if name.contains("P/E") && ratios.pe.is_none() {
            ratios.pe = value;
        } else if name.contains("EV/EBITDA") {
            ratios.ev_ebitda = value;
        } else if name.contains("EV/Sales") {
            ratios.ev_sales = value;
        } else if name.contains("PEG") {
            ratios.peg = value;
        }
    }

    ratios
}

//! Report sections and PDF assembly.

use chrono::{DateTime, Utc};
use lopdf::content::Content;
use lopdf::{Document, Object, Stream, dictionary};

use eqv_model::{DatasetDetail, ParameterSlot, SummaryView};

use crate::error::{ReportError, Result};
use crate::layout::{Font, PAGE_HEIGHT, PAGE_WIDTH, Page, PageWriter, clip};
use crate::options::ReportOptions;

/// File name offered for a dataset's report.
pub fn report_file_name(dataset_name: &str) -> String {
    let stem: String = dataset_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{stem}_complete_report.pdf")
}

/// Renders the full analysis report of a stored dataset as PDF bytes.
pub fn render_report(
    detail: &DatasetDetail,
    summary: &SummaryView,
    options: &ReportOptions,
) -> Result<Vec<u8>> {
    let pages = layout_report(detail, summary, options, Utc::now());
    let page_count = pages.len();
    let bytes = build_document(pages)?;

    tracing::info!(
        dataset = detail.info.id,
        pages = page_count,
        bytes = bytes.len(),
        "Rendered report"
    );
    Ok(bytes)
}

/// Lays out every section; footers are added during assembly.
pub(crate) fn layout_report(
    detail: &DatasetDetail,
    summary: &SummaryView,
    options: &ReportOptions,
    generated_at: DateTime<Utc>,
) -> Vec<Page> {
    let mut writer = PageWriter::new();

    cover(&mut writer, detail, options, generated_at);
    writer.new_page();
    overview(&mut writer, summary);
    categories(&mut writer, summary);
    writer.new_page();
    trends(&mut writer, detail, summary, options.trend_rows);
    writer.new_page();
    statistics(&mut writer, summary);
    equipment_table(&mut writer, detail, summary, options.table_rows);

    writer.finish()
}

fn cover(
    writer: &mut PageWriter,
    detail: &DatasetDetail,
    options: &ReportOptions,
    generated_at: DateTime<Utc>,
) {
    let info = &detail.info;
    writer.spacer(120);
    writer.title(&options.title);
    writer.spacer(20);
    writer.paragraph(&format!("Dataset:        {}", info.name));
    writer.paragraph(&format!("Uploaded by:    {}", info.owner));
    writer.paragraph(&format!(
        "Uploaded at:    {}",
        info.uploaded_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    writer.paragraph(&format!("Total records:  {}", info.total_count));
    writer.paragraph(&format!(
        "Generated at:   {}",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
}

fn overview(writer: &mut PageWriter, summary: &SummaryView) {
    writer.heading("Dataset Overview");
    writer.paragraph(&format!("Total equipment: {}", summary.total_count));
    writer.paragraph(&format!("Categories: {}", summary.category_counts.len()));
    writer.spacer(6);

    let rows: Vec<Vec<String>> = ParameterSlot::ALL
        .into_iter()
        .map(|slot| {
            vec![
                slot.placeholder().to_string(),
                summary.column_mapping.label(slot).to_string(),
                format!("{:.2}", summary.averages[slot]),
            ]
        })
        .collect();
    writer.table(&["Slot", "Parameter", "Average"], &[12, 28, 14], &rows);
}

fn categories(writer: &mut PageWriter, summary: &SummaryView) {
    writer.heading("Category Distribution");

    let rows: Vec<Vec<String>> = summary
        .category_counts
        .iter()
        .map(|(category, count)| {
            let share = summary
                .category_percentages
                .get(category)
                .copied()
                .unwrap_or(0.0);
            vec![category.clone(), count.to_string(), format!("{share:.2}%")]
        })
        .collect();
    writer.table(&["Category", "Count", "Share"], &[28, 8, 10], &rows);

    writer.spacer(8);
    let max = summary.category_counts.values().copied().max().unwrap_or(0) as f64;
    for (category, count) in &summary.category_counts {
        writer.bar(category, *count as f64, max, &count.to_string());
    }
}

fn trends(writer: &mut PageWriter, detail: &DatasetDetail, summary: &SummaryView, limit: usize) {
    let shown = &detail.records[..detail.records.len().min(limit)];

    writer.heading("Parameter Trends");
    writer.paragraph(&format!(
        "First {} of {} records.",
        shown.len(),
        detail.records.len()
    ));

    for slot in ParameterSlot::ALL {
        writer.subheading(summary.column_mapping.label(slot));
        let max = shown
            .iter()
            .map(|r| r.value(slot))
            .fold(0.0_f64, f64::max);
        for record in shown {
            let value = record.value(slot);
            writer.bar(&record.name, value, max, &format!("{value:.2}"));
        }
    }
}

fn statistics(writer: &mut PageWriter, summary: &SummaryView) {
    writer.heading("Statistical Analysis");
    let rows: Vec<Vec<String>> = ParameterSlot::ALL
        .into_iter()
        .map(|slot| {
            let range = &summary.ranges[slot];
            vec![
                summary.column_mapping.label(slot).to_string(),
                format!("{:.2}", summary.averages[slot]),
                format!("{:.2}", range.min),
                format!("{:.2}", range.max),
                format!("{:.2}", range.std),
                format!("{:.2}", range.variance),
                format!("{:.2}", range.cv),
            ]
        })
        .collect();
    writer.table(
        &["Parameter", "Mean", "Min", "Max", "Std", "Var", "CV %"],
        &[18, 9, 9, 9, 9, 9, 8],
        &rows,
    );

    writer.heading("Quartile Analysis");
    let rows: Vec<Vec<String>> = ParameterSlot::ALL
        .into_iter()
        .map(|slot| {
            let label = summary.column_mapping.label(slot).to_string();
            match &summary.quartiles[slot] {
                Some(q) => vec![
                    label,
                    format!("{:.2}", q.q1),
                    format!("{:.2}", q.median),
                    format!("{:.2}", q.q3),
                    format!("{:.2}", q.iqr),
                ],
                None => vec![label, "-".into(), "-".into(), "-".into(), "-".into()],
            }
        })
        .collect();
    writer.table(
        &["Parameter", "Q1", "Median", "Q3", "IQR"],
        &[18, 10, 10, 10, 10],
        &rows,
    );
}

fn equipment_table(
    writer: &mut PageWriter,
    detail: &DatasetDetail,
    summary: &SummaryView,
    limit: usize,
) {
    let shown = &detail.records[..detail.records.len().min(limit)];

    writer.heading("Equipment Details");
    writer.paragraph(&format!(
        "Showing {} of {} records.",
        shown.len(),
        detail.records.len()
    ));
    writer.spacer(4);

    let labels = summary.column_mapping.labels();
    let header = [
        "Name",
        "Type",
        labels[ParameterSlot::Slot1],
        labels[ParameterSlot::Slot2],
        labels[ParameterSlot::Slot3],
    ];
    let rows: Vec<Vec<String>> = shown
        .iter()
        .map(|record| {
            let mut row = vec![record.name.clone(), record.category.clone()];
            row.extend(record.values.iter().map(|(_, v)| format!("{v:.2}")));
            row
        })
        .collect();
    let header: Vec<String> = header.iter().map(|h| clip(h, 12)).collect();
    let header: Vec<&str> = header.iter().map(String::as_str).collect();
    writer.table(&header, &[20, 14, 12, 12, 12], &rows);
}

/// Builds the PDF document: one content stream per page, shared fonts,
/// and a "Page i of n" footer on every page.
fn build_document(pages: Vec<Page>) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for font in Font::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
        });
        fonts.set(font.key(), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let count = pages.len();
    let mut kids: Vec<Object> = Vec::with_capacity(count);
    for (index, mut page) in pages.into_iter().enumerate() {
        page.add_footer(index + 1, count);
        let content = Content {
            operations: page.operations,
        };
        let encoded = content.encode().map_err(|e| ReportError::Encode {
            page: index + 1,
            message: e.to_string(),
        })?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(PAGE_WIDTH),
            Object::Integer(PAGE_HEIGHT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(|e| ReportError::Write {
        message: e.to_string(),
    })?;
    Ok(bytes)
}

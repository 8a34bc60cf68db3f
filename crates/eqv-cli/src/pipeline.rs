//! Upload, summary and report workflows shared by the CLI commands.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info_span;

use eqv_analysis::{ProcessedUpload, build_summary_view, category_distribution, process_table};
use eqv_ingest::{IngestOptions, read_upload};
use eqv_model::{DatasetDetail, DatasetInfo, SummaryView, UploadOutcome};
use eqv_report::{ReportOptions, render_report, report_file_name};
use eqv_store::{NewDataset, Store};

/// Message returned for a stored upload.
pub const UPLOAD_MESSAGE: &str = "Dataset uploaded successfully";

/// Ingests, analyses and stores a CSV file for `owner`.
///
/// Nothing is stored when any stage fails.
pub fn upload_file(
    store: &Store,
    owner: &str,
    path: &Path,
    options: &IngestOptions,
) -> Result<UploadOutcome> {
    let upload_span = info_span!("upload", owner = %owner, file = %path.display());
    let _upload_guard = upload_span.enter();

    let upload = info_span!("ingest")
        .in_scope(|| read_upload(path, options))
        .with_context(|| format!("read {}", path.display()))?;

    let mut processed = info_span!("classify", rows = upload.table.row_count())
        .in_scope(|| process_table(&upload.table))
        .with_context(|| format!("analyse {}", upload.file_name))?;

    let dataset = NewDataset::new(
        upload.file_name,
        upload.source_hash,
        processed.column_summary.clone(),
        processed.averages,
        std::mem::take(&mut processed.rows),
    );
    let info = info_span!("persist")
        .in_scope(|| store.create_dataset(owner, dataset))
        .context("store dataset")?;

    Ok(upload_outcome(info, &processed))
}

/// Builds the upload response for a stored dataset.
pub fn upload_outcome(dataset: DatasetInfo, processed: &ProcessedUpload) -> UploadOutcome {
    UploadOutcome {
        message: UPLOAD_MESSAGE.to_string(),
        dataset,
        column_summary: processed.column_summary.clone(),
        column_mapping: processed.mapping.clone(),
        averages: processed.column_averages(),
        ranges: processed.column_ranges(),
    }
}

/// A dataset with its records and category distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetView {
    #[serde(flatten)]
    pub detail: DatasetDetail,
    pub category_distribution: BTreeMap<String, usize>,
}

pub fn dataset_view(store: &Store, owner: &str, id: u64) -> Result<DatasetView> {
    let detail = store.get_dataset(owner, id)?;
    let category_distribution = category_distribution(&detail.records);
    Ok(DatasetView {
        detail,
        category_distribution,
    })
}

pub fn dataset_summary(store: &Store, owner: &str, id: u64) -> Result<SummaryView> {
    let detail = store.get_dataset(owner, id)?;
    Ok(build_summary_view(&detail))
}

/// Renders the PDF report of a dataset and writes it to `output`, or to
/// the default report file name in the current directory.
///
/// Returns the written path.
pub fn write_report(
    store: &Store,
    owner: &str,
    id: u64,
    options: &ReportOptions,
    output: Option<&Path>,
) -> Result<PathBuf> {
    let detail = store.get_dataset(owner, id)?;
    let summary = build_summary_view(&detail);
    let bytes = info_span!("report", dataset = id)
        .in_scope(|| render_report(&detail, &summary, options))
        .context("render report")?;

    let path = output.map_or_else(|| PathBuf::from(report_file_name(&detail.info.name)), Path::to_path_buf);
    std::fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

//! Extraction, reconstruction, boilerplate removal and rendering.
//!
//! Page extraction is independent per page and fans out over rayon; results
//! are collected in page order before the document-wide boilerplate pass.

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::{Segment, SegmentedDocument, SegmentedPage};
use crate::parser::{
    BoilerplateFilter, ErrorMode, PageTextReconstructor, PdfTextSource, ReflowOptions,
    TextRunSource,
};
use crate::render::{PageRenderer, ReflowOutput};

struct ExtractedPage {
    number: u32,
    segments: Vec<Segment>,
    failed: bool,
}

/// Extract, reconstruct and filter every selected page.
pub fn segment_document<S>(source: &S, options: &ReflowOptions) -> Result<SegmentedDocument>
where
    S: TextRunSource + Sync,
{
    options.validate()?;

    let indices: Vec<usize> = (0..source.page_count())
        .filter(|index| options.pages.includes(*index as u32 + 1))
        .collect();
    log::debug!(
        "Segmenting {} of {} pages ({})",
        indices.len(),
        source.page_count(),
        if options.parallel { "parallel" } else { "sequential" }
    );

    let reconstructor = PageTextReconstructor::from_options(options);
    let extract = |index: usize| extract_page(source, &reconstructor, index, options.error_mode);

    let extracted: Vec<ExtractedPage> = if options.parallel {
        indices.par_iter().map(|&index| extract(index)).collect::<Result<_>>()?
    } else {
        indices.iter().map(|&index| extract(index)).collect::<Result<_>>()?
    };

    let failed_pages: Vec<u32> = extracted
        .iter()
        .filter(|page| page.failed)
        .map(|page| page.number)
        .collect();
    let numbers: Vec<u32> = extracted.iter().map(|page| page.number).collect();
    let mut segments: Vec<Vec<Segment>> =
        extracted.into_iter().map(|page| page.segments).collect();
    let segment_count: usize = segments.iter().map(Vec::len).sum();

    let report = BoilerplateFilter::from_options(options).filter(&mut segments);

    Ok(SegmentedDocument {
        pages: numbers
            .into_iter()
            .zip(segments)
            .map(|(number, segments)| SegmentedPage::new(number, segments))
            .collect(),
        boilerplate_keys: report.keys,
        segment_count,
        segments_removed: report.removed,
        failed_pages,
    })
}

fn extract_page<S: TextRunSource>(
    source: &S,
    reconstructor: &PageTextReconstructor,
    index: usize,
    error_mode: ErrorMode,
) -> Result<ExtractedPage> {
    let number = index as u32 + 1;
    match source.text_runs(index) {
        Ok(runs) => Ok(ExtractedPage {
            number,
            segments: reconstructor.reconstruct(&runs),
            failed: false,
        }),
        Err(e) if error_mode == ErrorMode::Strict => Err(match e {
            Error::PageExtraction { .. } => e,
            other => Error::PageExtraction {
                page: number,
                reason: other.to_string(),
            },
        }),
        Err(e) => {
            log::warn!("Failed to extract text from page {}: {}", number, e);
            Ok(ExtractedPage {
                number,
                segments: reconstructor.reconstruct(&[]),
                failed: true,
            })
        }
    }
}

/// Segment and render a document.
pub fn reflow<S>(source: &S, options: &ReflowOptions) -> Result<ReflowOutput>
where
    S: TextRunSource + Sync,
{
    let doc = segment_document(source, options)?;
    let output = PageRenderer::from_options(options).render_document(&doc);
    log::debug!("Reflow finished: {}", output.stats);
    Ok(output)
}

/// Reflow a loaded PDF, attaching its metadata to the output.
pub fn reflow_pdf(source: &PdfTextSource, options: &ReflowOptions) -> Result<ReflowOutput> {
    let mut output = reflow(source, options)?;
    output.metadata = Some(source.metadata());
    Ok(output)
}

use std::path::PathBuf;

use anyhow::Context;
use fnol_config::Config;
use fnol_core::{ClaimPipeline, ClaimReport};
use fnol_document::DocumentDecoder;
use rayon::prelude::*;
use tracing::info;

use super::print_json;

/// Input parameters for the Process command strategy.
#[derive(Debug, Clone)]
pub struct ProcessInput {
    /// Documents to process, reported in this order
    pub files: Vec<PathBuf>,
    /// Force single-line JSON regardless of config
    pub compact: bool,
}

/// Strategy for turning FNOL documents into claim reports.
///
/// Documents are decoded one after another, then extraction and routing run
/// across all of them on the rayon pool. One file prints a single report;
/// several print a JSON array in argument order.
#[derive(Debug, Clone, Copy)]
pub struct ProcessStrategy;

impl super::CommandStrategy for ProcessStrategy {
    type Input = ProcessInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let library = config
            .extraction
            .library()
            .context("Invalid extraction pattern in config")?;
        let pipeline = ClaimPipeline::new(library);
        let decoder = DocumentDecoder::new(config.document.pdftotext.clone());

        let mut documents = Vec::with_capacity(input.files.len());
        for path in input.files {
            let text = decoder
                .decode(&path)
                .await
                .with_context(|| format!("Failed to decode {}", path.display()))?;
            documents.push((path, text));
        }

        info!("Processing {} document(s)", documents.len());

        let reports = tokio::task::spawn_blocking(move || process_all(&pipeline, &documents))
            .await
            .context("Processing task panicked")??;

        let pretty = config.output.pretty && !input.compact;
        match reports.as_slice() {
            [report] => print_json(report, pretty),
            _ => print_json(&reports, pretty),
        }
    }
}

fn process_all(
    pipeline: &ClaimPipeline,
    documents: &[(PathBuf, String)],
) -> anyhow::Result<Vec<ClaimReport>> {
    documents
        .par_iter()
        .map(|(path, text)| {
            pipeline
                .process(text)
                .with_context(|| format!("Failed to process {}", path.display()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fnol_core::{ExtractionError, Route};

    const CLAIM: &str = "Policy Number: P-1\nPolicyholder Name: Jane Doe\n\
        Incident Date: 03/04/2024\nLocation: Main St\nDescription: Rear-ended\n\
        Claimant Name: Jane Doe\nContact Details: 555-0100\nAsset Type: Vehicle\n\
        Estimated Damage: $1,200.00\nClaim Type: Collision\n";

    fn doc(name: &str, text: &str) -> (PathBuf, String) {
        (PathBuf::from(name), text.to_string())
    }

    #[test]
    fn test_reports_keep_argument_order() -> anyhow::Result<()> {
        let documents = vec![
            doc("a.txt", CLAIM),
            doc("b.txt", "Policy Number: P-2\n"),
            doc("c.txt", &CLAIM.replace("Collision", "Injury")),
        ];
        let reports = process_all(&ClaimPipeline::default(), &documents)?;
        let routes: Vec<_> = reports.iter().map(|r| r.recommended_route).collect();
        assert_eq!(
            routes,
            vec![Route::FastTrack, Route::ManualReview, Route::SpecialistQueue]
        );
        Ok(())
    }

    #[test]
    fn test_failure_names_the_file() {
        let documents = vec![
            doc("good.txt", CLAIM),
            doc("bad.txt", &CLAIM.replace("$1,200.00", "$,,")),
        ];
        let err = process_all(&ClaimPipeline::default(), &documents).err();
        let message = err.as_ref().map(|e| format!("{e:#}")).unwrap_or_default();
        assert!(message.contains("bad.txt"), "{message}");
        assert!(
            err.is_some_and(|e| e.downcast_ref::<ExtractionError>().is_some()),
            "extraction error should stay reachable"
        );
    }
}

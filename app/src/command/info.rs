use fnol_config::Config;
use fnol_core::{FAST_TRACK_THRESHOLD, MANDATORY_FIELDS, PatternKey};
use fnol_penalties::FraudPenaltyTable;
use tracing::info;

/// Strategy for displaying the effective configuration.
///
/// Prints the config file location, the document decoder, the penalty table
/// source, pattern overrides, and the fixed routing parameters.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Config::config_path()?;
        let config = Config::load_or_default()?;

        println!("=== fnol Configuration ===\n");

        println!("Config File:");
        if config_path.exists() {
            println!("  Path: {}", config_path.display());
        } else {
            println!("  Path: {} (not found, using defaults)", config_path.display());
        }
        println!();

        println!("Documents:");
        println!("  pdftotext: {}", config.document.pdftotext);
        println!();

        println!("Fraud Penalties:");
        match config.penalties.path.as_deref() {
            Some(path) => println!("  Source: {}", path.display()),
            None => println!("  Source: bundled"),
        }
        let table = FraudPenaltyTable::load(config.penalties.path.as_deref());
        println!("  States: {}", table.len());
        println!();

        println!("Extraction:");
        if config.extraction.patterns.is_empty() {
            println!("  Pattern Overrides: (none)");
        } else {
            let keys: Vec<_> = config
                .extraction
                .patterns
                .iter()
                .map(|def| def.key.as_str())
                .collect();
            println!("  Pattern Overrides: {}", keys.join(", "));
        }
        info!("Compiling extraction patterns");
        match config.extraction.library() {
            Ok(library) => {
                println!("  Status: {} patterns compiled", PatternKey::COUNT);
                println!(
                    "  Fraud Keywords: {}",
                    library.get(PatternKey::FraudKeywords).as_str()
                );
            }
            Err(e) => println!("  Status: invalid ({e})"),
        }
        println!();

        println!("Routing:");
        println!("  Fast-track Threshold: ${FAST_TRACK_THRESHOLD}");
        let mandatory: Vec<_> = MANDATORY_FIELDS.iter().map(|f| f.name.as_str()).collect();
        println!("  Mandatory Fields: {}", mandatory.join(", "));
        println!();

        println!("Output:");
        println!("  Pretty: {}", config.output.pretty);

        Ok(())
    }
}

use fnol_config::Config;
use fnol_core::PatternKey;
use tracing::info;

/// Strategy for the liveness check.
///
/// Loads the effective config and compiles its extraction patterns, which is
/// all the startup work claim processing needs.
#[derive(Debug, Clone, Copy)]
pub struct HealthStrategy;

impl super::CommandStrategy for HealthStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let library = config.extraction.library()?;
        info!(
            "{} extraction patterns compiled",
            compiled_pattern_count(&library)
        );
        println!("Insurance Claims Processing Agent is running");
        Ok(())
    }
}

/// Number of patterns a compiled library answers for.
fn compiled_pattern_count(library: &fnol_core::PatternLibrary) -> usize {
    PatternKey::ALL
        .iter()
        .filter(|key| !library.get(**key).as_str().is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fnol_core::PatternLibrary;

    #[test]
    fn test_builtin_library_answers_for_every_key() {
        assert_eq!(
            compiled_pattern_count(PatternLibrary::builtin()),
            PatternKey::COUNT
        );
    }
}

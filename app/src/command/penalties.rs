use fnol_config::Config;
use fnol_penalties::FraudPenaltyTable;
use thiserror::Error;

use super::print_json;

/// Lookup of a state code absent from the penalty table.
#[derive(Debug, Error)]
#[error("No fraud penalty data for state: {0}")]
pub struct PenaltyNotFound(pub String);

/// Input parameters for the Penalties command strategy.
#[derive(Debug, Clone, Default)]
pub struct PenaltiesInput {
    /// Two-letter state code; all states when absent
    pub state: Option<String>,
    /// Print only whether the state has a criminal penalty
    pub criminal: bool,
    /// Print only whether the state has a civil penalty
    pub civil: bool,
}

/// Strategy for querying the state fraud-penalty table.
#[derive(Debug, Clone, Copy)]
pub struct PenaltiesStrategy;

impl super::CommandStrategy for PenaltiesStrategy {
    type Input = PenaltiesInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let table = FraudPenaltyTable::load(config.penalties.path.as_deref());
        let pretty = config.output.pretty;

        let Some(state) = input.state else {
            return print_json(&table.all(), pretty);
        };

        if input.criminal {
            println!("{}", table.has_criminal_penalty(&state));
            return Ok(());
        }
        if input.civil {
            println!("{}", table.has_civil_penalty(&state));
            return Ok(());
        }

        let penalty = table
            .get(&state)
            .ok_or_else(|| PenaltyNotFound(state.clone()))?;
        print_json(penalty, pretty)
    }
}

//! The `confivue simulate` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use confivue_core::selector::SeededRandom;
use confivue_core::traits::RandomSource;
use confivue_core::{
    load_catalog, AgeBand, AssessmentEngine, EngineConfig, InMemorySessionStore, Mode, Response,
};

pub async fn execute(
    catalog_path: PathBuf,
    age_band: AgeBand,
    mode: Mode,
    seed: Option<u64>,
    category: u8,
    answers: Option<String>,
    json: bool,
) -> Result<()> {
    let answers = match &answers {
        Some(list) => parse_answers(list)?,
        None => vec![category],
    };

    let catalog = load_catalog(&catalog_path)?;
    tracing::info!(
        catalog = %catalog_path.display(),
        items = catalog.len(),
        %age_band,
        "simulating assessment"
    );
    let rng: Arc<dyn RandomSource> = match seed {
        Some(seed) => Arc::new(SeededRandom::from_seed(seed)),
        None => Arc::new(SeededRandom::from_entropy()),
    };
    let engine = AssessmentEngine::new(
        Arc::new(catalog),
        Arc::new(InMemorySessionStore::new()),
        rng,
        EngineConfig::default(),
    );

    let id = engine.create_assessment("simulated", age_band, mode).await;

    let mut table = Table::new();
    table.set_header(vec!["#", "Item", "Domain", "Category", "Theta", "SEM"]);

    let mut step = 0usize;
    loop {
        let next = engine.next_item(&id).await?;
        if next.is_exhausted() {
            break;
        }
        let answer = answers
            .get(step)
            .or(answers.last())
            .copied()
            .unwrap_or(category);
        let outcome = engine
            .submit_response(
                &id,
                Response {
                    item_id: next.item_id.clone(),
                    category: answer,
                    rt_ms: None,
                },
            )
            .await
            .with_context(|| format!("response to {} rejected", next.item_id))?;
        step += 1;

        table.add_row(vec![
            Cell::new(outcome.asked_count),
            Cell::new(&next.item_id),
            Cell::new(&next.domain),
            Cell::new(answer),
            Cell::new(format!("{:.3}", outcome.theta)),
            Cell::new(format!("{:.2}", outcome.sem)),
        ]);

        if outcome.completed {
            break;
        }
    }

    let report = engine.report(&id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{table}");
        println!(
            "Score: {} ({}), sem {:.2}, {} item(s) presented",
            report.scaled_score,
            report.band,
            report.sem,
            report.asked.len()
        );
    }

    Ok(())
}

fn parse_answers(list: &str) -> Result<Vec<u8>> {
    let answers = list
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<u8>()
                .map_err(|_| anyhow::anyhow!("invalid category: '{}'", s.trim()))
        })
        .collect::<Result<Vec<_>>>()?;
    anyhow::ensure!(!answers.is_empty(), "answers must have at least one value");
    Ok(answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_answer_list() {
        assert_eq!(parse_answers("0, 4,2").unwrap(), vec![0, 4, 2]);
        assert!(parse_answers("1,x").is_err());
        assert!(parse_answers("-1").is_err());
    }
}

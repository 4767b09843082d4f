use std::time::Duration;

use tokio::sync::mpsc;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info, instrument};

use crate::config::SearchConfig;
use crate::engine::debounce::Debouncer;
use crate::errors::AppResult;
use crate::tables::{Searchable, TextQuery};

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<R> {
    /// The settled query was too short; any shown results should be cleared.
    Cleared,
    Matches { query: String, rows: Vec<R> },
}

/// Debounced search over an in-memory row set.
pub struct SearchSession<R> {
    rows: Vec<R>,
    quiet_period: Duration,
    min_query_len: usize,
}

impl<R> SearchSession<R>
where
    R: Searchable + Clone,
{
    pub fn new(rows: Vec<R>, cfg: &SearchConfig) -> Self {
        Self {
            rows,
            quiet_period: cfg.quiet_period(),
            min_query_len: cfg.min_query_len,
        }
    }

    pub fn resolve(&self, raw: &str) -> SearchOutcome<R> {
        let query = TextQuery::new(raw);
        if !query.is_actionable(self.min_query_len) {
            return SearchOutcome::Cleared;
        }
        let rows = query.filter(&self.rows).into_iter().cloned().collect();
        SearchOutcome::Matches {
            query: query.as_str().to_string(),
            rows,
        }
    }

    /// Feeds every input through a debouncer and hands each settled result to `emit`.
    ///
    /// Returns once `inputs` is exhausted and the last pending query has settled.
    #[instrument(skip_all, fields(rows = self.rows.len()))]
    pub async fn run<S, F>(self, inputs: S, mut emit: F) -> AppResult<usize>
    where
        S: Stream<Item = String>,
        F: FnMut(SearchOutcome<R>),
    {
        let (tx, mut settled_rx) = mpsc::unbounded_channel::<String>();
        let mut debouncer = Some(Debouncer::new(self.quiet_period, move |query: String| {
            let _ = tx.send(query);
        })?);
        info!(quiet_period = ?self.quiet_period, "search session started");

        tokio::pin!(inputs);
        let mut resolved = 0usize;
        loop {
            tokio::select! {
                input = inputs.next(), if debouncer.is_some() => match input {
                    Some(raw) => {
                        if let Some(debouncer) = debouncer.as_ref() {
                            debouncer.call(raw);
                        }
                    }
                    None => {
                        debug!("input closed, waiting for last query to settle");
                        // A scheduled call outlives the debouncer; the channel
                        // closes once it has fired.
                        debouncer = None;
                    }
                },
                settled = settled_rx.recv() => match settled {
                    Some(raw) => {
                        let outcome = self.resolve(&raw);
                        if let SearchOutcome::Matches { query, rows } = &outcome {
                            debug!(query = %query, hits = rows.len(), "query settled");
                        }
                        emit(outcome);
                        resolved += 1;
                    }
                    None => break,
                },
            }
        }

        info!(resolved, "search session finished");
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::HoldingRow;

    fn rows() -> Vec<HoldingRow> {
        ["AAPL:Apple Inc.", "AMZN:Amazon.com", "MSFT:Microsoft"]
            .iter()
            .map(|entry| {
                let (symbol, name) = entry.split_once(':').unwrap();
                HoldingRow {
                    symbol: symbol.into(),
                    name: name.into(),
                    market_value: None,
                    change_percent: None,
                }
            })
            .collect()
    }

    #[test]
    fn resolve_clears_short_queries() {
        let session = SearchSession::new(rows(), &SearchConfig::default());
        assert_eq!(session.resolve(" a "), SearchOutcome::Cleared);
    }

    #[test]
    fn resolve_matches_symbol_or_name() {
        let session = SearchSession::new(rows(), &SearchConfig::default());
        match session.resolve("AM") {
            SearchOutcome::Matches { query, rows } => {
                assert_eq!(query, "am");
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].symbol, "AMZN");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn burst_settles_on_last_input() {
        let session = SearchSession::new(rows(), &SearchConfig::default());
        let inputs = tokio_stream::iter(["m", "mi", "mic"].map(String::from));
        let mut outcomes = Vec::new();

        let resolved = session.run(inputs, |o| outcomes.push(o)).await.unwrap();

        assert_eq!(resolved, 1);
        match &outcomes[0] {
            SearchOutcome::Matches { query, rows } => {
                assert_eq!(query, "mic");
                assert_eq!(rows[0].symbol, "MSFT");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn empty_input_resolves_nothing() {
        let session = SearchSession::new(rows(), &SearchConfig::default());
        let resolved = session
            .run(tokio_stream::empty::<String>(), |_| {})
            .await
            .unwrap();
        assert_eq!(resolved, 0);
    }
}

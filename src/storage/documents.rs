use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info};

use crate::errors::AppResult;

pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> AppResult<T> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let payload = serde_json::from_slice(&bytes)?;
    info!(file = %path.display(), bytes = bytes.len(), "document loaded");
    Ok(payload)
}

pub fn write_json<T: Serialize, W: Write>(mut out: W, payload: &T) -> AppResult<()> {
    serde_json::to_writer_pretty(&mut out, payload)?;
    writeln!(out)?;
    out.flush()?;
    debug!("document written");
    Ok(())
}

pub fn print_json<T: Serialize>(payload: &T) -> AppResult<()> {
    write_json(io::stdout().lock(), payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::marketdata::HistoricalSeries;

    #[test]
    fn reads_series_document() {
        let path = std::env::temp_dir().join(format!("tickerdesk-doc-{}.json", std::process::id()));
        fs::write(&path, r#"{"dates":["d1"],"prices":[1.5],"volumes":[10]}"#).unwrap();
        let series: HistoricalSeries = read_json(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(series.prices, vec![Some(1.5)]);
    }

    #[test]
    fn missing_document_is_io_error() {
        let result: AppResult<HistoricalSeries> = read_json("no/such/file.json");
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn writes_pretty_json_with_newline() {
        let mut buf = Vec::new();
        write_json(&mut buf, &serde_json::json!({"a": [1, null]})).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("null"));
    }
}

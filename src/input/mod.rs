use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("candidate pool {0} is empty")]
    EmptyPool(String),
}

/// Loads the candidate pool: a `.json` file holding an array of strings, or
/// any other extension read as non-empty lines. The pool is immutable after
/// this call; components only ever index into it.
pub fn load_pool(path: &Path) -> Result<Vec<String>, InputError> {
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let pool = if is_json {
        parse_json_pool(path)?
    } else {
        parse_line_pool(path)?
    };
    if pool.is_empty() {
        return Err(InputError::EmptyPool(path.display().to_string()));
    }
    tracing::info!(
        entries = pool.len(),
        path = %path.display(),
        "loaded candidate pool"
    );
    Ok(pool)
}

fn parse_json_pool(path: &Path) -> Result<Vec<String>, InputError> {
    let mut raw = String::new();
    File::open(path)?.read_to_string(&mut raw)?;
    serde_json::from_str(&raw).map_err(|e| InputError::Parse(format!("{}: {e}", path.display())))
}

fn parse_line_pool(path: &Path) -> Result<Vec<String>, InputError> {
    let reader = BufReader::new(File::open(path)?);
    let mut pool = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            continue;
        }
        pool.push(trimmed.to_string());
    }
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn scratch_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("memsieve-{}-{name}", std::process::id()));
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_json_pool() {
        let path = scratch_file("pool.json", r#"["alpha", "beta", "gamma"]"#);
        let pool = load_pool(&path).unwrap();
        assert_eq!(pool, vec!["alpha", "beta", "gamma"]);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_line_pool_skips_blank_lines() {
        let path = scratch_file("pool.txt", "one\n\ntwo\nthree\n");
        let pool = load_pool(&path).unwrap();
        assert_eq!(pool, vec!["one", "two", "three"]);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_empty_pool_is_an_error() {
        let path = scratch_file("empty.txt", "\n\n");
        let err = load_pool(&path).unwrap_err();
        assert!(matches!(err, InputError::EmptyPool(_)));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let path = scratch_file("bad.json", r#"{"not": "an array"}"#);
        let err = load_pool(&path).unwrap_err();
        assert!(matches!(err, InputError::Parse(_)));
        std::fs::remove_file(path).unwrap();
    }
}

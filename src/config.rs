/// Parameters of one extraction run. Built in `main` from CLI flags and
/// passed by reference into the pipeline; nothing here is ambient state.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Total number of texts to generate across all batches.
    pub n_samples: usize,
    /// Texts generated per inference round-trip. The only backpressure knob.
    pub batch_size: usize,
    pub max_new_tokens: usize,
    pub top_k: usize,
    pub top_p: f64,
    /// Texts at or below this many characters are skipped before scoring.
    pub min_text_chars: usize,
    /// Size of the prompt subset drawn from the candidate pool.
    pub prompt_draws: usize,
    /// Scale constant of the index transform; must be >= the pool length.
    pub pool_scale: usize,
    pub seed: u64,
    /// Entries written per ranked report file.
    pub report_top: usize,
    /// Entries echoed to stdout per formula.
    pub print_top: usize,
}

impl ExtractionConfig {
    pub fn default_v1() -> Self {
        Self {
            n_samples: 1000,
            batch_size: 10,
            max_new_tokens: 256,
            top_k: 40,
            top_p: 1.0,
            min_text_chars: 2,
            prompt_draws: 100,
            pool_scale: 1000,
            seed: 0,
            report_top: 1000,
            print_top: 10,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.n_samples == 0 {
            return Err("--samples must be at least 1".to_string());
        }
        if self.batch_size == 0 {
            return Err("--batch-size must be at least 1".to_string());
        }
        if self.prompt_draws == 0 {
            return Err("--draws must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Where the search collaborator talks to. The API key is resolved from the
/// environment at the CLI boundary and carried here explicitly.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub endpoint: String,
    pub api_key: String,
    pub engine_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_matches_reference_run() {
        let cfg = ExtractionConfig::default_v1();
        assert_eq!(cfg.n_samples, 1000);
        assert_eq!(cfg.batch_size, 10);
        assert_eq!(cfg.max_new_tokens, 256);
        assert_eq!(cfg.top_k, 40);
        assert_eq!(cfg.min_text_chars, 2);
        assert_eq!(cfg.pool_scale, 1000);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_batch() {
        let mut cfg = ExtractionConfig::default_v1();
        cfg.batch_size = 0;
        assert!(cfg.validate().is_err());
    }
}

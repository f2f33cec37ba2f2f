use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::SampleMode;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub input: Option<InputConfig>,
    pub output: Option<OutputConfig>,
    pub sampling: Option<SamplingConfig>,
    pub concurrency: Option<ConcurrencyConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub input_dir: Option<String>,
    pub glob: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub out_dir: Option<String>,
    pub out_csv: Option<String>,
    pub out_jsonl: Option<String>,
    pub save_text: Option<bool>,
    pub viz: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SamplingConfig {
    pub max_samples: Option<usize>,
    pub sample_mode: Option<SampleMode>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConcurrencyConfig {
    pub num_workers: Option<usize>,
    pub min_text_len: Option<usize>,
}

/// Platform config directory path: `<config_dir>/readmine/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("readmine").join("config.toml"))
}

/// Load config by cascading CWD `.readmine.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(&PathBuf::from(".readmine.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &PathBuf) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        input: Some(InputConfig {
            input_dir: overlay
                .input
                .as_ref()
                .and_then(|i| i.input_dir.clone())
                .or_else(|| base.input.as_ref().and_then(|i| i.input_dir.clone())),
            glob: overlay
                .input
                .as_ref()
                .and_then(|i| i.glob.clone())
                .or_else(|| base.input.as_ref().and_then(|i| i.glob.clone())),
        }),
        output: Some(OutputConfig {
            out_dir: overlay
                .output
                .as_ref()
                .and_then(|o| o.out_dir.clone())
                .or_else(|| base.output.as_ref().and_then(|o| o.out_dir.clone())),
            out_csv: overlay
                .output
                .as_ref()
                .and_then(|o| o.out_csv.clone())
                .or_else(|| base.output.as_ref().and_then(|o| o.out_csv.clone())),
            out_jsonl: overlay
                .output
                .as_ref()
                .and_then(|o| o.out_jsonl.clone())
                .or_else(|| base.output.as_ref().and_then(|o| o.out_jsonl.clone())),
            save_text: overlay
                .output
                .as_ref()
                .and_then(|o| o.save_text)
                .or_else(|| base.output.as_ref().and_then(|o| o.save_text)),
            viz: overlay
                .output
                .as_ref()
                .and_then(|o| o.viz)
                .or_else(|| base.output.as_ref().and_then(|o| o.viz)),
        }),
        sampling: Some(SamplingConfig {
            max_samples: overlay
                .sampling
                .as_ref()
                .and_then(|s| s.max_samples)
                .or_else(|| base.sampling.as_ref().and_then(|s| s.max_samples)),
            sample_mode: overlay
                .sampling
                .as_ref()
                .and_then(|s| s.sample_mode)
                .or_else(|| base.sampling.as_ref().and_then(|s| s.sample_mode)),
            seed: overlay
                .sampling
                .as_ref()
                .and_then(|s| s.seed)
                .or_else(|| base.sampling.as_ref().and_then(|s| s.seed)),
        }),
        concurrency: Some(ConcurrencyConfig {
            num_workers: overlay
                .concurrency
                .as_ref()
                .and_then(|c| c.num_workers)
                .or_else(|| base.concurrency.as_ref().and_then(|c| c.num_workers)),
            min_text_len: overlay
                .concurrency
                .as_ref()
                .and_then(|c| c.min_text_len)
                .or_else(|| base.concurrency.as_ref().and_then(|c| c.min_text_len)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_dir_round_trip_toml() {
        let config = ConfigFile {
            input: Some(InputConfig {
                input_dir: Some("/data/readmes".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: ConfigFile = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.input.unwrap().input_dir.unwrap(), "/data/readmes");
    }

    #[test]
    fn absent_fields_deserialize_as_none() {
        let toml_str = "[sampling]\nmax_samples = 50\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        let sampling = parsed.sampling.unwrap();
        assert_eq!(sampling.max_samples, Some(50));
        assert!(sampling.seed.is_none());
        assert!(parsed.output.is_none());
    }

    #[test]
    fn sample_mode_parses_lowercase_names() {
        let toml_str = "[sampling]\nsample_mode = \"first\"\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        assert_eq!(
            parsed.sampling.unwrap().sample_mode,
            Some(SampleMode::First)
        );
    }

    #[test]
    fn merge_overlay_wins() {
        let base = ConfigFile {
            input: Some(InputConfig {
                glob: Some("*.pdf".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let overlay = ConfigFile {
            input: Some(InputConfig {
                glob: Some("*_README.pdf".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, overlay);
        assert_eq!(merged.input.unwrap().glob.unwrap(), "*_README.pdf");
    }

    #[test]
    fn merge_base_preserved_when_overlay_absent() {
        let base = ConfigFile {
            concurrency: Some(ConcurrencyConfig {
                num_workers: Some(8),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, ConfigFile::default());
        assert_eq!(merged.concurrency.unwrap().num_workers, Some(8));
    }
}

pub mod batch;
pub mod config;
pub mod extract;
pub mod scan;

use resumescan_core::KeywordSet;
use resumescan_core::models::config::AtsConfig;

/// Keyword policy for this run: `--keywords` if given, else the configured one.
pub fn resolve_keywords(cli_keywords: Option<&str>, config: &AtsConfig) -> anyhow::Result<KeywordSet> {
    let keywords = match cli_keywords {
        Some(list) => KeywordSet::parse_list(list),
        None => config.scoring.keywords.clone(),
    };

    if keywords.is_empty() {
        anyhow::bail!(
            "keyword set is empty; pass --keywords or set scoring.keywords in the config file"
        );
    }

    Ok(keywords)
}

use anyhow::{Context, Result, bail};

fn parse_seed(token: &str) -> Result<u64> {
    let trimmed = token.trim();
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        u64::from_str_radix(&hex.replace('_', ""), 16)
            .with_context(|| format!("invalid hex seed `{trimmed}`"))
    } else {
        trimmed
            .replace('_', "")
            .parse::<u64>()
            .with_context(|| format!("invalid seed `{trimmed}`"))
    }
}

/// Resolve CLI seed tokens into unique seeds, keeping first-seen order.
///
/// Accepts decimal integers and `0x`-prefixed hex; `_` separators are ignored.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seeds: Vec<u64> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let seed = parse_seed(token)?;
        if !seeds.contains(&seed) {
            seeds.push(seed);
        }
    }
    if seeds.is_empty() {
        bail!("at least one seed is required");
    }
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn parses_decimal_and_hex_and_dedupes() {
        let seeds = resolve_seed_inputs(&tokens(&["1337", "0x539", "0xFF", "1_000"])).unwrap();
        assert_eq!(seeds, vec![1337, 255, 1000]);
    }

    #[test]
    fn rejects_garbage_and_empty_input() {
        assert!(resolve_seed_inputs(&tokens(&["ORANGE"])).is_err());
        assert!(resolve_seed_inputs(&[]).is_err());
    }
}

/// Heuristic personalization score in `[0.7, 1.0]`. Base 0.5, plus up to 0.3
/// for name length (0.05 per character), plus a fixed 0.2 for the sign.
pub fn personalization_score(name: &str) -> f64 {
    let name_component = (name.chars().count() as f64 / 20.0).min(0.3);
    (0.5 + name_component + 0.2).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_characters_reach_the_name_cap() {
        let score = personalization_score("Ritika");
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_name_gets_base_score() {
        assert!((personalization_score("") - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_name_component_is_capped() {
        assert!((personalization_score("Al") - 0.8).abs() < 1e-9);
        assert!((personalization_score(&"x".repeat(200)) - 1.0).abs() < 1e-9);
    }
}

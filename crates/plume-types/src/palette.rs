/// Fallback chart colour for validators without a dedicated one.
pub const DEFAULT_VALIDATOR_COLOR: &str = "#607D8B";

const VALIDATOR_COLORS: [(&str, &str); 10] = [
    ("Plume Foundation", "#1976D2"),
    ("Hello Moon", "#FFB300"),
    ("DSRV", "#43A047"),
    ("SBI_DeFimans", "#D32F2F"),
    ("Bioeconomy", "#7B1FA2"),
    ("Korea Web3 Embassy", "#00838F"),
    ("PNP MAX", "#FBC02D"),
    ("CoinSummer labs", "#C2185B"),
    ("Republic", "#388E3C"),
    ("Nano Labs", "#F57C00"),
];

pub fn validator_color(validator: &str) -> &'static str {
    VALIDATOR_COLORS
        .iter()
        .find(|(name, _)| *name == validator)
        .map_or(DEFAULT_VALIDATOR_COLOR, |&(_, color)| color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_color() {
        assert_eq!(validator_color("DSRV"), "#43A047");
        assert_eq!(validator_color("dsrv"), DEFAULT_VALIDATOR_COLOR);
        assert_eq!(validator_color("Unknown"), DEFAULT_VALIDATOR_COLOR);
    }
}

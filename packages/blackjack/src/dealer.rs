use crate::{calculate_hand_value, is_soft_hand, Card, GameRules};

/// The dealer draws below 17 and stands on 17 or more. A soft 17 is hit only
/// when the table rules ask for it.
pub fn dealer_should_hit(cards: &[Card], rules: &GameRules) -> bool {
    let value = calculate_hand_value(cards);
    if value < 17 {
        return true;
    }
    value == 17 && rules.dealer_hits_soft_17 && is_soft_hand(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(ranks: &[u8]) -> Vec<Card> {
        ranks.iter().map(|&r| Card::new(r).unwrap()).collect()
    }

    #[test]
    fn test_hits_below_17() {
        let rules = GameRules::default();
        assert!(dealer_should_hit(&cards(&[10]), &rules));
        assert!(dealer_should_hit(&cards(&[10, 6]), &rules));
        assert!(dealer_should_hit(&cards(&[1, 5]), &rules)); // soft 16
    }

    #[test]
    fn test_stands_on_any_17_by_default() {
        let rules = GameRules::default();
        assert!(!dealer_should_hit(&cards(&[10, 7]), &rules));
        assert!(!dealer_should_hit(&cards(&[1, 6]), &rules));
        assert!(!dealer_should_hit(&cards(&[10, 6, 10]), &rules)); // busted
    }

    #[test]
    fn test_hits_soft_17_when_configured() {
        let rules = GameRules {
            dealer_hits_soft_17: true,
            ..GameRules::default()
        };
        assert!(dealer_should_hit(&cards(&[1, 6]), &rules));
        assert!(!dealer_should_hit(&cards(&[10, 7]), &rules));
        assert!(!dealer_should_hit(&cards(&[1, 6, 10]), &rules)); // hard 17
        assert!(!dealer_should_hit(&cards(&[1, 7]), &rules)); // soft 18
    }
}

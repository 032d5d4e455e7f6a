use crate::cards::Card;

/// Tableau stacking: anything goes onto an empty column; otherwise the moving
/// card must be the opposite colour and exactly one rank lower.
#[inline]
pub fn can_stack(moving: Card, onto: Option<Card>) -> bool {
    match onto {
        None => true,
        Some(top) => moving.color() != top.color() && moving.rank() + 1 == top.rank(),
    }
}

/// A card can go home when its suit pile currently tops out one rank below it.
#[inline]
pub const fn can_go_home(card_rank: u8, home_rank: u8) -> bool {
    card_rank == home_rank + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn stacking_needs_alternating_colour_and_descending_rank() {
        assert!(can_stack(c("3h"), Some(c("4s"))));
        assert!(can_stack(c("3c"), Some(c("4d"))));
        assert!(!can_stack(c("3c"), Some(c("4s"))), "same colour");
        assert!(!can_stack(c("3h"), Some(c("5s"))), "rank gap");
        assert!(!can_stack(c("5h"), Some(c("4s"))), "ascending");
        assert!(can_stack(c("Kd"), None));
    }

    #[test]
    fn home_needs_next_rank() {
        assert!(can_go_home(1, 0));
        assert!(can_go_home(13, 12));
        assert!(!can_go_home(2, 0));
        assert!(!can_go_home(5, 5));
    }
}

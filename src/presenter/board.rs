// src/presenter/board.rs
use crate::types::Prediction;

use super::card::DiagnosisCard;

/// Ordered set of displayed cards.
///
/// `show` reconciles by [`super::CardKey`]: a card whose disease/index pair
/// survives is updated in place (its reveal restarts only if the identity
/// changed); every other card is dropped, which cancels its pending reveal.
#[derive(Debug, Default)]
pub struct ResultBoard {
    cards: Vec<DiagnosisCard>,
}

impl ResultBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, predictions: &[Prediction]) {
        let mut previous: Vec<Option<DiagnosisCard>> =
            std::mem::take(&mut self.cards).into_iter().map(Some).collect();

        let mut next = Vec::with_capacity(predictions.len());
        for (index, prediction) in predictions.iter().enumerate() {
            let reused = previous.iter_mut().find_map(|slot| {
                let hit = slot
                    .as_ref()
                    .is_some_and(|c| c.index() == index && c.disease() == prediction.disease);
                if hit {
                    slot.take()
                } else {
                    None
                }
            });

            let card = match reused {
                Some(mut card) => {
                    card.update(prediction, index);
                    card
                }
                None => DiagnosisCard::mount(prediction, index),
            };
            next.push(card);
        }

        let dropped = previous.iter().filter(|slot| slot.is_some()).count();
        if dropped > 0 {
            tracing::debug!(target: "reveal", dropped, "cards removed from board");
        }
        self.cards = next;
    }

    /// Drop every card; pending reveals are cancelled.
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Remove one card by position. Later cards keep their index until the
    /// next `show`.
    pub fn remove(&mut self, index: usize) -> Option<DiagnosisCard> {
        let pos = self.cards.iter().position(|c| c.index() == index)?;
        Some(self.cards.remove(pos))
    }

    pub fn cards(&self) -> &[DiagnosisCard] {
        &self.cards
    }

    pub fn cards_mut(&mut self) -> &mut [DiagnosisCard] {
        &mut self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Wait until every card has revealed its meter.
    pub async fn settle(&mut self) {
        for card in self.cards.iter_mut() {
            card.revealed().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn pred(disease: &str, confidence: f64) -> Prediction {
        Prediction {
            disease: disease.into(),
            confidence,
            description: format!("{disease} symptoms: cough"),
            precautions: Vec::new(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn reveals_are_staggered_by_index() {
        let mut board = ResultBoard::new();
        board.show(&[pred("A", 0.9), pred("B", 0.6), pred("C", 0.3)]);
        let start = tokio::time::Instant::now();

        let cards = board.cards_mut();
        assert_eq!(cards[2].revealed().await, Some(30));
        assert_eq!(start.elapsed(), Duration::from_millis(310));
        assert!(cards[0].is_revealed());
        assert!(cards[1].is_revealed());
    }

    #[tokio::test(start_paused = true)]
    async fn same_key_keeps_revealed_card() {
        let mut board = ResultBoard::new();
        board.show(&[pred("A", 0.9)]);
        board.settle().await;

        board.show(&[pred("A", 0.9), pred("B", 0.6)]);
        assert_eq!(board.cards()[0].meter(), 90);
        assert_eq!(board.cards()[1].meter(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn reordered_cards_are_remounted() {
        let mut board = ResultBoard::new();
        board.show(&[pred("A", 0.9), pred("B", 0.6)]);
        board.settle().await;

        board.show(&[pred("B", 0.6), pred("A", 0.9)]);
        assert!(board.cards().iter().all(|c| c.meter() == 0));
    }

    #[tokio::test(start_paused = true)]
    async fn removed_card_never_reveals() {
        let mut board = ResultBoard::new();
        board.show(&[pred("A", 0.9), pred("B", 0.6)]);
        let probe = board.cards()[1].reveal().observe();

        let removed = board.remove(1).expect("card B");
        drop(removed);
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(*probe.borrow(), None);
        assert_eq!(board.len(), 1);
        assert_eq!(board.cards()[0].meter(), 90);
    }
}

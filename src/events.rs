use std::sync::mpsc;

use crate::game::{Position, Token};

/// Notifications the game raises for a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A column was selected and is about to be played.
    ColumnChosen(usize),
    /// A token landed on the board.
    MoveApplied { position: Position, token: Token },
    /// An interactive participant is hovering a column. Purely advisory.
    HighlightRequested(usize),
    /// The game ended. `winner` is `None` on a draw; `winning_cells` is
    /// empty on a draw or a forfeit.
    GameOver {
        winner: Option<String>,
        winning_cells: Vec<Position>,
    },
    /// The board was cleared and a new game started.
    Restarted,
}

/// Input fed to [`Game::run`](crate::game::Game::run) by the outside world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// An interactive participant picked a column. `None` means the
    /// selection missed the board.
    ColumnSelected(Option<usize>),
    /// An interactive participant is hovering a column.
    Hover(usize),
    /// Start a new game.
    Reset,
}

/// Fan-out of game events to any number of channel subscribers.
///
/// Subscribers whose receiver was dropped are removed on the next publish.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<mpsc::Sender<GameEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber and return its receiving end.
    pub fn subscribe(&mut self) -> mpsc::Receiver<GameEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn publish(&mut self, event: GameEvent) {
        log::trace!("publishing {:?}", event);
        self.subscribers.retain(|tx| {
            let alive = tx.send(event.clone()).is_ok();
            if !alive {
                log::debug!("dropping disconnected event subscriber");
            }
            alive
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_reaches_every_subscriber() {
        let mut bus = EventBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();

        bus.publish(GameEvent::ColumnChosen(2));

        assert_eq!(a.try_recv().unwrap(), GameEvent::ColumnChosen(2));
        assert_eq!(b.try_recv().unwrap(), GameEvent::ColumnChosen(2));
    }

    #[test]
    fn test_publish_without_subscribers() {
        let mut bus = EventBus::new();
        bus.publish(GameEvent::Restarted);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_disconnected_subscriber_is_dropped() {
        let mut bus = EventBus::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(GameEvent::HighlightRequested(1));
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(kept.try_recv().unwrap(), GameEvent::HighlightRequested(1));
    }

    #[test]
    fn test_events_keep_order() {
        let mut bus = EventBus::new();
        let rx = bus.subscribe();
        bus.publish(GameEvent::ColumnChosen(0));
        bus.publish(GameEvent::MoveApplied {
            position: (0, 0),
            token: Token::Red,
        });
        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            received,
            vec![
                GameEvent::ColumnChosen(0),
                GameEvent::MoveApplied {
                    position: (0, 0),
                    token: Token::Red
                },
            ]
        );
    }
}

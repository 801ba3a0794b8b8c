use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

use crate::error::Result;

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// A key press event.
    Key(KeyEvent),
    /// A mouse click, drag or wheel event.
    Mouse(MouseEvent),
    /// A periodic tick for rendering.
    Tick,
    /// Terminal resize event.
    Resize,
}

/// Async event handler that polls crossterm events and forwards them via a channel.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new EventHandler with the given tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            loop {
                let next = if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(CrosstermEvent::Key(key)) => Some(Event::Key(key)),
                        Ok(CrosstermEvent::Mouse(mouse)) => Some(Event::Mouse(mouse)),
                        Ok(CrosstermEvent::Resize(_, _)) => Some(Event::Resize),
                        _ => None,
                    }
                } else {
                    Some(Event::Tick)
                };

                if let Some(event) = next {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
            }
        });

        Self { rx }
    }

    /// Receive the next event (blocks until available).
    pub async fn next(&mut self) -> Result<Event> {
        self.rx
            .recv()
            .await
            .ok_or_else(|| crate::error::AppError::Terminal("Event channel closed".into()))
    }
}

//! Synthesis of capture events for whole transactions.

use crate::sans::{Event, Level, Span};

/// Build the events of a single chip-select window exchanging `pairs`.
///
/// Each `(host, device)` pair occupies one sample, so pair `i` spans
/// `[i, i + 1)`. The window is preceded by an initial released level and
/// closed by a release at the end of the last pair.
pub fn events(pairs: &[(u8, u8)]) -> impl Iterator<Item = Event> + '_ {
    let end = pairs.len() as u64;

    let open = [
        Event::ChipSelect {
            span: Span::new(0, 0),
            previous: None,
            new: Some(Level::Released),
        },
        Event::ChipSelect {
            span: Span::new(0, 0),
            previous: Some(Level::Released),
            new: Some(Level::Asserted),
        },
    ];

    let close = Event::ChipSelect {
        span: Span::new(end, end),
        previous: Some(Level::Asserted),
        new: Some(Level::Released),
    };

    open.into_iter()
        .chain(pairs.iter().enumerate().map(|(i, (host, device))| {
            let i = i as u64;
            Event::Data {
                span: Span::new(i, i + 1),
                host: Some(*host),
                device: Some(*device),
            }
        }))
        .chain(core::iter::once(close))
}

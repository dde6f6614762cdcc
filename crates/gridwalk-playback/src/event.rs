//! Playback events and the [`Observer`] that receives them.

use gridwalk_core::{Board, Coord};

/// One discrete, timed unit of replay output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Flag a cell as visited.
    Visit(Coord),
    /// Flag every listed cell as on the path. Start and goal are never
    /// listed; the list is empty when they are adjacent or equal.
    Path(Vec<Coord>),
    /// The search exhausted its frontier without reaching the goal.
    Unreachable,
}

/// Receiver of [`PlaybackEvent`]s, typically the presentation layer.
pub trait Observer {
    fn on_event(&mut self, event: PlaybackEvent);
}

impl Observer for Vec<PlaybackEvent> {
    fn on_event(&mut self, event: PlaybackEvent) {
        self.push(event);
    }
}

/// Applies events as cell flags. The board itself refuses to flag markers
/// and walls.
impl Observer for Board {
    fn on_event(&mut self, event: PlaybackEvent) {
        match event {
            PlaybackEvent::Visit(p) => {
                self.mark_visited(p);
            }
            PlaybackEvent::Path(cells) => {
                self.mark_path(&cells);
            }
            PlaybackEvent::Unreachable => {}
        }
    }
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn on_event(&mut self, event: PlaybackEvent) {
        (**self).on_event(event);
    }
}

/// Observer returned by [`observer_fn`].
pub struct FnObserver<F>(F);

/// Wrap a closure as an [`Observer`].
pub fn observer_fn<F: FnMut(PlaybackEvent)>(f: F) -> FnObserver<F> {
    FnObserver(f)
}

impl<F: FnMut(PlaybackEvent)> Observer for FnObserver<F> {
    fn on_event(&mut self, event: PlaybackEvent) {
        (self.0)(event);
    }
}

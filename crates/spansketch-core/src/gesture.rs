//! Gesture recognition: raw pointer input in, tap/double-tap/pan out.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Raw pointer input in widget-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    /// Pointer left the widget or the window lost focus.
    Cancel,
}

/// A recognized gesture in widget-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Press and release without moving past the pan slop.
    ///
    /// Reported on release at the press position, not on press, so a press
    /// that turns into a pan never also reports a tap.
    Tap { position: Point },
    /// Second press close to the previous tap; reported on press.
    DoubleTap { position: Point },
    PanStart { position: Point },
    PanUpdate { position: Point },
    PanEnd,
}

/// Recognizer tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Minimum time between two pan updates, in milliseconds.
    pub drag_interval_ms: u64,
    /// Distance a press must travel before it becomes a pan.
    pub pan_slop: f64,
    /// Maximum time between two taps of a double-tap, in milliseconds.
    pub double_tap_time_ms: u64,
    /// Maximum distance between two taps of a double-tap.
    pub double_tap_distance: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_interval_ms: 20,
            pan_slop: 4.0,
            double_tap_time_ms: 300,
            double_tap_distance: 8.0,
        }
    }
}

impl GestureConfig {
    pub fn drag_interval(&self) -> Duration {
        Duration::from_millis(self.drag_interval_ms)
    }

    pub fn double_tap_time(&self) -> Duration {
        Duration::from_millis(self.double_tap_time_ms)
    }
}

#[derive(Debug, Clone, Copy)]
struct Press {
    position: Point,
    /// The press completed a double-tap; its release is not a tap.
    double_tap: bool,
}

#[derive(Debug, Clone, Copy)]
struct Pan {
    last_update: Instant,
    /// Latest position swallowed by the drag interval throttle.
    pending: Option<Point>,
}

/// Turns a pointer event stream into gestures.
///
/// Timestamps are passed in by the caller so the recognizer stays
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct GestureRecognizer {
    config: GestureConfig,
    press: Option<Press>,
    pan: Option<Pan>,
    last_tap: Option<(Point, Instant)>,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Whether a pan is in progress.
    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    /// Whether the pointer is currently pressed.
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Drop all in-flight state.
    pub fn reset(&mut self) {
        self.press = None;
        self.pan = None;
        self.last_tap = None;
    }

    /// Feed one pointer event and collect the gestures it completes.
    pub fn handle(&mut self, event: PointerEvent, now: Instant) -> Vec<GestureEvent> {
        let mut out = Vec::new();
        match event {
            PointerEvent::Down { position } => {
                let double_tap = self.is_double_tap(position, now);
                if double_tap {
                    self.last_tap = None;
                    out.push(GestureEvent::DoubleTap { position });
                }
                self.press = Some(Press {
                    position,
                    double_tap,
                });
                self.pan = None;
            }
            PointerEvent::Move { position } => {
                let Some(press) = self.press else {
                    return out;
                };
                match &mut self.pan {
                    Some(pan) => {
                        if now.duration_since(pan.last_update) >= self.config.drag_interval() {
                            pan.last_update = now;
                            pan.pending = None;
                            out.push(GestureEvent::PanUpdate { position });
                        } else {
                            pan.pending = Some(position);
                        }
                    }
                    None => {
                        if press.position.distance(position) > self.config.pan_slop {
                            self.pan = Some(Pan {
                                last_update: now,
                                pending: None,
                            });
                            self.last_tap = None;
                            out.push(GestureEvent::PanStart {
                                position: press.position,
                            });
                            out.push(GestureEvent::PanUpdate { position });
                        }
                    }
                }
            }
            PointerEvent::Up { position } => {
                let press = self.press.take();
                if let Some(pan) = self.pan.take() {
                    if let Some(pending) = pan.pending {
                        out.push(GestureEvent::PanUpdate { position: pending });
                    }
                    out.push(GestureEvent::PanEnd);
                } else if let Some(press) = press {
                    if !press.double_tap {
                        out.push(GestureEvent::Tap {
                            position: press.position,
                        });
                        self.last_tap = Some((press.position, now));
                    }
                } else {
                    log::trace!("Pointer up at {:?} without a press", position);
                }
            }
            PointerEvent::Cancel => {
                if self.pan.take().is_some() {
                    out.push(GestureEvent::PanEnd);
                }
                self.press = None;
            }
        }
        out
    }

    fn is_double_tap(&self, position: Point, now: Instant) -> bool {
        match self.last_tap {
            Some((last_pos, last_time)) => {
                now.duration_since(last_time) <= self.config.double_tap_time()
                    && last_pos.distance(position) <= self.config.double_tap_distance
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(start: Instant, millis: u64) -> Instant {
        start + Duration::from_millis(millis)
    }

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
        }
    }

    fn mv(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(x, y),
        }
    }

    #[test]
    fn test_tap() {
        let t0 = Instant::now();
        let mut g = GestureRecognizer::default();
        assert!(g.handle(down(10.0, 10.0), t0).is_empty());
        assert!(g.is_pressed());
        let events = g.handle(up(11.0, 10.0), ms(t0, 50));
        assert_eq!(
            events,
            vec![GestureEvent::Tap {
                position: Point::new(10.0, 10.0)
            }]
        );
        assert!(!g.is_pressed());
    }

    #[test]
    fn test_small_jitter_is_still_a_tap() {
        let t0 = Instant::now();
        let mut g = GestureRecognizer::default();
        g.handle(down(10.0, 10.0), t0);
        assert!(g.handle(mv(12.0, 11.0), ms(t0, 10)).is_empty());
        assert!(!g.is_panning());
        let events = g.handle(up(12.0, 11.0), ms(t0, 20));
        assert!(matches!(events.as_slice(), [GestureEvent::Tap { .. }]));
    }

    #[test]
    fn test_double_tap() {
        let t0 = Instant::now();
        let mut g = GestureRecognizer::default();
        g.handle(down(100.0, 100.0), t0);
        g.handle(up(100.0, 100.0), ms(t0, 40));

        let events = g.handle(down(102.0, 101.0), ms(t0, 150));
        assert_eq!(
            events,
            vec![GestureEvent::DoubleTap {
                position: Point::new(102.0, 101.0)
            }]
        );
        // Release of the second press is not another tap.
        assert!(g.handle(up(102.0, 101.0), ms(t0, 190)).is_empty());

        // A third press starts over.
        assert!(g.handle(down(102.0, 101.0), ms(t0, 250)).is_empty());
    }

    #[test]
    fn test_double_tap_too_slow_or_far() {
        let t0 = Instant::now();
        let mut g = GestureRecognizer::default();
        g.handle(down(100.0, 100.0), t0);
        g.handle(up(100.0, 100.0), ms(t0, 10));
        assert!(g.handle(down(100.0, 100.0), ms(t0, 1000)).is_empty());
        g.handle(up(100.0, 100.0), ms(t0, 1010));
        assert!(g.handle(down(200.0, 200.0), ms(t0, 1100)).is_empty());
    }

    #[test]
    fn test_pan_sequence() {
        let t0 = Instant::now();
        let mut g = GestureRecognizer::default();
        g.handle(down(100.0, 100.0), t0);

        let events = g.handle(mv(120.0, 100.0), ms(t0, 5));
        assert_eq!(
            events,
            vec![
                GestureEvent::PanStart {
                    position: Point::new(100.0, 100.0)
                },
                GestureEvent::PanUpdate {
                    position: Point::new(120.0, 100.0)
                },
            ]
        );
        assert!(g.is_panning());

        let events = g.handle(mv(150.0, 100.0), ms(t0, 30));
        assert_eq!(
            events,
            vec![GestureEvent::PanUpdate {
                position: Point::new(150.0, 100.0)
            }]
        );

        let events = g.handle(up(150.0, 100.0), ms(t0, 40));
        assert_eq!(events, vec![GestureEvent::PanEnd]);
        assert!(!g.is_panning());
    }

    #[test]
    fn test_pan_updates_are_throttled() {
        let t0 = Instant::now();
        let mut g = GestureRecognizer::default();
        g.handle(down(0.0, 0.0), t0);
        g.handle(mv(10.0, 0.0), t0);

        // Within the 20ms drag interval: swallowed.
        assert!(g.handle(mv(11.0, 0.0), ms(t0, 5)).is_empty());
        assert!(g.handle(mv(12.0, 0.0), ms(t0, 10)).is_empty());

        // Release flushes the last swallowed position before ending.
        let events = g.handle(up(12.0, 0.0), ms(t0, 12));
        assert_eq!(
            events,
            vec![
                GestureEvent::PanUpdate {
                    position: Point::new(12.0, 0.0)
                },
                GestureEvent::PanEnd,
            ]
        );
    }

    #[test]
    fn test_pan_never_becomes_tap() {
        let t0 = Instant::now();
        let mut g = GestureRecognizer::default();
        g.handle(down(0.0, 0.0), t0);
        g.handle(mv(50.0, 0.0), ms(t0, 5));
        let events = g.handle(up(50.0, 0.0), ms(t0, 30));
        assert!(!events.iter().any(|e| matches!(e, GestureEvent::Tap { .. })));
    }

    #[test]
    fn test_cancel_ends_pan() {
        let t0 = Instant::now();
        let mut g = GestureRecognizer::default();
        g.handle(down(0.0, 0.0), t0);
        g.handle(mv(50.0, 0.0), ms(t0, 5));
        assert_eq!(g.handle(PointerEvent::Cancel, ms(t0, 6)), vec![GestureEvent::PanEnd]);
        assert!(!g.is_pressed());
        assert!(g.handle(up(50.0, 0.0), ms(t0, 7)).is_empty());
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut g = GestureRecognizer::default();
        assert!(g.handle(mv(50.0, 50.0), Instant::now()).is_empty());
    }
}

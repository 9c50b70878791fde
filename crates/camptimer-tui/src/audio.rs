//! Synthesized alert tones.
//!
//! Playback runs on a detached thread; a missing or busy audio device is
//! silently ignored so alerting can never block or corrupt engine state.

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, Sink};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneKind {
    Warning,
    Spawn,
}

impl ToneKind {
    /// Pitch (Hz) and duration (ms) distinguishing the two alerts.
    fn params(self) -> (f32, u64) {
        match self {
            ToneKind::Warning => (660.0, 200),
            ToneKind::Spawn => (880.0, 450),
        }
    }
}

pub fn play_tone(kind: ToneKind) {
    std::thread::spawn(move || {
        let Ok((_stream, stream_handle)) = OutputStream::try_default() else {
            return;
        };
        let Ok(sink) = Sink::try_new(&stream_handle) else {
            return;
        };

        let (freq, millis) = kind.params();
        let source = SineWave::new(freq)
            .take_duration(Duration::from_millis(millis))
            .amplify(0.25);
        sink.append(source);

        // The spawn alert gets a second beep so it stands out.
        if kind == ToneKind::Spawn {
            let echo = SineWave::new(freq)
                .take_duration(Duration::from_millis(millis))
                .amplify(0.25)
                .delay(Duration::from_millis(120));
            sink.append(echo);
        }

        sink.sleep_until_end();
    });
}

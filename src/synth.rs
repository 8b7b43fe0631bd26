//! The boundary to the external synthesizer.

use crate::note::Note;

/// A sound source accepting MIDI-numbered notes.
///
/// Both calls are fire-and-forget. Implementations never report failures back to the widget.
pub trait Synthesizer {
    /// Whether the synthesizer can accept notes. Presses arriving before are dropped, not queued.
    fn is_ready(&self) -> bool {
        true
    }

    fn play_note(&mut self, note: Note);

    fn release_note(&mut self, note: Note);
}

impl<S: Synthesizer + ?Sized> Synthesizer for Box<S> {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn play_note(&mut self, note: Note) {
        (**self).play_note(note)
    }

    fn release_note(&mut self, note: Note) {
        (**self).release_note(note)
    }
}

/// A synthesizer that only logs. Used by hosts without audio output.
#[derive(Clone, Debug, Default)]
pub struct LoggingSynthesizer;

impl Synthesizer for LoggingSynthesizer {
    fn play_note(&mut self, note: Note) {
        log::info!("Play {note:+} (MIDI {})", note.midi_number());
    }

    fn release_note(&mut self, note: Note) {
        log::info!("Release {note:+} (MIDI {})", note.midi_number());
    }
}

/// Keeps track of the single note sounding at a time.
#[derive(Clone, Debug, Default)]
pub struct NoteSound {
    current: Option<Note>,
}

impl NoteSound {
    pub fn current(&self) -> Option<Note> {
        self.current
    }

    /// Starts `note`, releasing the previous note first so that at most one note sounds.
    pub fn press(&mut self, synth: &mut impl Synthesizer, note: Note) {
        if !synth.is_ready() {
            log::debug!("Synthesizer not ready. Dropping {note}");
            return;
        }
        if let Some(previous) = self.current.take() {
            synth.release_note(previous);
        }
        synth.play_note(note);
        self.current = Some(note);
    }

    pub fn release(&mut self, synth: &mut impl Synthesizer) {
        match self.current.take() {
            Some(note) => synth.release_note(note),
            None => log::trace!("Release without a sounding note"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        ready: bool,
        events: Vec<(bool, i32)>,
    }

    impl Synthesizer for Recorder {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn play_note(&mut self, note: Note) {
            self.events.push((true, note.midi_number()));
        }

        fn release_note(&mut self, note: Note) {
            self.events.push((false, note.midi_number()));
        }
    }

    #[test]
    fn presses_before_ready_are_dropped() {
        let mut synth = Recorder::default();
        let mut sound = NoteSound::default();

        sound.press(&mut synth, Note::from_midi_number(60));
        sound.release(&mut synth);
        assert!(synth.events.is_empty());
        assert_eq!(sound.current(), None);

        synth.ready = true;
        sound.press(&mut synth, Note::from_midi_number(62));
        sound.release(&mut synth);
        assert_eq!(synth.events, [(true, 62), (false, 62)]);
    }

    #[test]
    fn only_one_note_sounds() {
        let mut synth = Recorder {
            ready: true,
            ..Default::default()
        };
        let mut sound = NoteSound::default();

        sound.press(&mut synth, Note::from_midi_number(60));
        sound.press(&mut synth, Note::from_midi_number(64));
        assert_eq!(sound.current(), Some(Note::from_midi_number(64)));
        assert_eq!(synth.events, [(true, 60), (false, 60), (true, 64)]);
    }
}

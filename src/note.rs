//! Natural note letters, accidentals, modes and MIDI-numbered notes.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::math;
use crate::scale::ScaleError;

/// MIDI numbers of the natural notes C4 to C5, the last entry being the octave above the first.
pub const BASE_PITCHES: [i32; 8] = [60, 62, 64, 65, 67, 69, 71, 72];

/// One of the seven natural note names.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
pub enum NoteLetter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteLetter {
    pub const ALL: [NoteLetter; 7] = [
        NoteLetter::C,
        NoteLetter::D,
        NoteLetter::E,
        NoteLetter::F,
        NoteLetter::G,
        NoteLetter::A,
        NoteLetter::B,
    ];

    /// Looks up a letter by its position in the C-based list of natural notes.
    ///
    /// Only 0 to 6 are valid. Anything else is a programming error on the caller's side and is reported instead of clamped.
    ///
    /// # Examples
    ///
    /// ```
    /// # use scale_wheel::note::NoteLetter;
    /// # use scale_wheel::scale::ScaleError;
    /// assert_eq!(NoteLetter::from_index(1), Ok(NoteLetter::D));
    /// assert_eq!(NoteLetter::from_index(7), Err(ScaleError::TonicOutOfRange(7)));
    /// ```
    pub fn from_index(index: usize) -> Result<NoteLetter, ScaleError> {
        NoteLetter::ALL
            .get(index)
            .copied()
            .ok_or(ScaleError::TonicOutOfRange(index))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Moves `num_steps` natural notes up (or down, if negative), wrapping around the octave.
    ///
    /// ```
    /// # use scale_wheel::note::NoteLetter;
    /// assert_eq!(NoteLetter::A.plus_steps(3), NoteLetter::D);
    /// assert_eq!(NoteLetter::D.plus_steps(-2), NoteLetter::B);
    /// ```
    pub fn plus_steps(self, num_steps: i32) -> NoteLetter {
        let (_, index) = math::div_mod_i32(self.index() as i32 + num_steps, 7);
        NoteLetter::ALL[index as usize]
    }

    /// Number of natural-note steps needed to go up from `self` to `other`, between 0 and 6.
    pub fn num_steps_before(self, other: NoteLetter) -> usize {
        let (_, steps) = math::div_mod_i32(other.index() as i32 - self.index() as i32, 7);
        steps as usize
    }

    /// The MIDI number of this letter in the octave starting at middle C.
    pub fn base_pitch(self) -> Note {
        Note::from_midi_number(BASE_PITCHES[self.index()])
    }

    pub fn name(self) -> &'static str {
        match self {
            NoteLetter::C => "C",
            NoteLetter::D => "D",
            NoteLetter::E => "E",
            NoteLetter::F => "F",
            NoteLetter::G => "G",
            NoteLetter::A => "A",
            NoteLetter::B => "B",
        }
    }
}

impl Display for NoteLetter {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for NoteLetter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NoteLetter::ALL
            .iter()
            .find(|letter| letter.name().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("Invalid note letter: '{s}'. Must be one of C, D, E, F, G, A, B"))
    }
}

/// A sign raising or lowering a natural note by one semitone.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum Accidental {
    Sharp,
    Flat,
}

impl Accidental {
    pub fn symbol(self) -> char {
        match self {
            Accidental::Sharp => '\u{266F}',
            Accidental::Flat => '\u{266D}',
        }
    }
}

/// Selects the interval pattern of a diatonic scale.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum Mode {
    #[default]
    Major,
    Minor,
}

/// Semitone offsets from the tonic of the eight major scale degrees.
pub const MAJOR: [i32; 8] = [0, 2, 4, 5, 7, 9, 11, 12];

/// Semitone offsets from the tonic of the eight natural minor scale degrees.
pub const MINOR: [i32; 8] = [0, 2, 3, 5, 7, 8, 10, 12];

impl Mode {
    pub fn pattern(self) -> &'static [i32; 8] {
        match self {
            Mode::Major => &MAJOR,
            Mode::Minor => &MINOR,
        }
    }

    pub fn is_major(self) -> bool {
        self == Mode::Major
    }

    pub fn toggled(self) -> Mode {
        match self {
            Mode::Major => Mode::Minor,
            Mode::Minor => Mode::Major,
        }
    }

    /// Caption of the mode toggle button.
    pub fn caption(self) -> &'static str {
        match self {
            Mode::Major => "Major Scales",
            Mode::Minor => "minor scales",
        }
    }
}

/// A note identified by its MIDI number, 60 being middle C.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct Note {
    midi_number: i32,
}

impl Note {
    pub fn from_midi_number(midi_number: i32) -> Self {
        Self { midi_number }
    }

    pub fn midi_number(self) -> i32 {
        self.midi_number
    }

    pub fn plus_semitones(self, num_semitones: i32) -> Note {
        Note::from_midi_number(self.midi_number + num_semitones)
    }
}

impl Display for Note {
    /// ```
    /// # use scale_wheel::note::Note;
    /// assert_eq!(Note::from_midi_number(60).to_string(), "C 4");
    /// assert_eq!(Note::from_midi_number(61).to_string(), "C#/Db 4");
    /// assert_eq!(Note::from_midi_number(72).to_string(), "C 5");
    ///
    /// // Format flags
    /// assert_eq!(format!("{:+}", Note::from_midi_number(70)), "A# 4");
    /// assert_eq!(format!("{:-}", Note::from_midi_number(70)), "Bb 4");
    /// ```
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let (octave, semitone) = math::div_mod_i32(self.midi_number, 12);

        let (natural, raised) = match semitone {
            0 => ("C", None),
            1 => ("C", Some("D")),
            2 => ("D", None),
            3 => ("D", Some("E")),
            4 => ("E", None),
            5 => ("F", None),
            6 => ("F", Some("G")),
            7 => ("G", None),
            8 => ("G", Some("A")),
            9 => ("A", None),
            10 => ("A", Some("B")),
            11 => ("B", None),
            other => unreachable!("value was {}", other),
        };

        let note_name = match raised {
            None => natural.to_owned(),
            Some(upper) => match (f.sign_plus(), f.sign_minus()) {
                (true, false) => format!("{natural}#"),
                (false, true) => format!("{upper}b"),
                _ => format!("{natural}#/{upper}b"),
            },
        };

        f.pad(&format!("{} {}", note_name, octave - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_pitches_span_one_octave() {
        assert_eq!(BASE_PITCHES[7], BASE_PITCHES[0] + 12);
        assert!(BASE_PITCHES.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(NoteLetter::C.base_pitch(), Note::from_midi_number(60));
    }

    #[test]
    fn patterns_are_well_formed() {
        for pattern in [MAJOR, MINOR] {
            assert_eq!(pattern.len(), 8);
            assert_eq!(pattern[0], 0);
            assert_eq!(pattern[7], 12);
            assert!(pattern.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn letter_steps_wrap_around() {
        for letter in NoteLetter::ALL {
            assert_eq!(letter.plus_steps(7), letter);
            assert_eq!(letter.plus_steps(-7), letter);
            for other in NoteLetter::ALL {
                let steps = letter.num_steps_before(other);
                assert!(steps < 7);
                assert_eq!(letter.plus_steps(steps as i32), other);
            }
        }
    }

    #[test]
    fn parse_letters() {
        assert_eq!("f".parse::<NoteLetter>(), Ok(NoteLetter::F));
        assert_eq!(" B ".parse::<NoteLetter>(), Ok(NoteLetter::B));
        assert!("H".parse::<NoteLetter>().is_err());
    }

    #[test]
    fn toggle_mode() {
        assert_eq!(Mode::Major.toggled(), Mode::Minor);
        assert_eq!(Mode::Minor.toggled().caption(), "Major Scales");
    }
}

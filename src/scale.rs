//! Derive the eight degrees of a diatonic scale from a tonic and a mode.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::key_signature::ACCIDENTALS;
use crate::note::{Accidental, Mode, Note, NoteLetter};

/// Number of degrees of a scale including the octave above the tonic.
pub const NUM_DEGREES: usize = 8;

/// Number of steps between adjacent degrees.
pub const NUM_STEPS: usize = NUM_DEGREES - 1;

/// Error reported when the scale model is called with arguments outside of its domain.
///
/// Out-of-range indices are reported instead of being clamped.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ScaleError {
    /// The tonic index is not in the range 0..=6.
    ///
    /// # Examples
    ///
    /// ```
    /// # use scale_wheel::note::Mode;
    /// # use scale_wheel::scale::{Scale, ScaleError};
    /// assert_eq!(
    ///     Scale::from_tonic_index(9, Mode::Major).unwrap_err(),
    ///     ScaleError::TonicOutOfRange(9)
    /// );
    /// ```
    TonicOutOfRange(usize),

    /// The step index is not in the range 0..=6, i.e. there is no degree above it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use scale_wheel::note::Mode;
    /// # use scale_wheel::scale::{self, ScaleError};
    /// assert_eq!(
    ///     scale::step_kind(7, Mode::Minor).unwrap_err(),
    ///     ScaleError::StepOutOfRange(7)
    /// );
    /// ```
    StepOutOfRange(usize),
}

impl Display for ScaleError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ScaleError::TonicOutOfRange(index) => {
                write!(f, "Tonic index {index} is out of range 0..=6")
            }
            ScaleError::StepOutOfRange(index) => {
                write!(f, "Step index {index} is out of range 0..={}", NUM_STEPS - 1)
            }
        }
    }
}

impl Error for ScaleError {}

/// Where a degree sits within the scale.
///
/// The first and the last degree share the same letter, so the position is needed to tell them apart.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum DegreePosition {
    First,
    Interior,
    Last,
}

impl DegreePosition {
    pub fn of_index(index: usize) -> DegreePosition {
        match index {
            0 => DegreePosition::First,
            NUM_STEPS => DegreePosition::Last,
            _ => DegreePosition::Interior,
        }
    }
}

/// One of the eight notes of a constructed scale.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct ScaleDegree {
    pub index: usize,
    pub letter: NoteLetter,
    pub note: Note,
    pub accidental: Option<Accidental>,
}

impl ScaleDegree {
    pub fn position(&self) -> DegreePosition {
        DegreePosition::of_index(self.index)
    }

    /// Number of natural-note steps from middle C, which is what places the degree on the staff.
    pub fn staff_step(&self, tonic: NoteLetter) -> usize {
        tonic.index() + self.index
    }

    /// Letter name followed by its accidental symbol, e.g. `F♯`.
    pub fn spelling(&self) -> String {
        match self.accidental {
            Some(accidental) => format!("{}{}", self.letter, accidental.symbol()),
            None => self.letter.to_string(),
        }
    }
}

/// Computes the eight degrees of the scale on `tonic`.
///
/// # Examples
///
/// ```
/// # use scale_wheel::note::{Accidental, Mode, NoteLetter};
/// # use scale_wheel::scale;
/// let degrees = scale::derive_scale(NoteLetter::D, Mode::Major);
///
/// let pitches: Vec<_> = degrees.iter().map(|degree| degree.note.midi_number()).collect();
/// assert_eq!(pitches, [62, 64, 66, 67, 69, 71, 73, 74]);
///
/// assert_eq!(degrees[2].letter, NoteLetter::F);
/// assert_eq!(degrees[2].accidental, Some(Accidental::Sharp));
/// assert_eq!(degrees[7].letter, NoteLetter::D);
/// ```
pub fn derive_scale(tonic: NoteLetter, mode: Mode) -> [ScaleDegree; NUM_DEGREES] {
    let base_pitch = tonic.base_pitch();
    let pattern = mode.pattern();

    std::array::from_fn(|index| {
        let letter = tonic.plus_steps(index as i32);
        ScaleDegree {
            index,
            letter,
            note: base_pitch.plus_semitones(pattern[index]),
            accidental: ACCIDENTALS.lookup(letter, tonic, mode),
        }
    })
}

/// Size of the interval between two adjacent degrees.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum StepKind {
    Whole,
    Half,
}

impl StepKind {
    pub fn name(self) -> &'static str {
        match self {
            StepKind::Whole => "whole",
            StepKind::Half => "half",
        }
    }
}

/// Classifies the interval between degree `index` and degree `index + 1`.
///
/// The classification is read off the semitone gaps of the mode's pattern.
///
/// ```
/// # use scale_wheel::note::Mode;
/// # use scale_wheel::scale::{self, StepKind};
/// assert_eq!(scale::step_kind(2, Mode::Major), Ok(StepKind::Half));
/// assert_eq!(scale::step_kind(2, Mode::Minor), Ok(StepKind::Whole));
/// ```
pub fn step_kind(index: usize, mode: Mode) -> Result<StepKind, ScaleError> {
    if index >= NUM_STEPS {
        return Err(ScaleError::StepOutOfRange(index));
    }
    Ok(classify_step(mode, index))
}

fn classify_step(mode: Mode, index: usize) -> StepKind {
    let pattern = mode.pattern();
    match pattern[index + 1] - pattern[index] {
        1 => StepKind::Half,
        _ => StepKind::Whole,
    }
}

/// A derived scale together with the inputs it was derived from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Scale {
    tonic: NoteLetter,
    mode: Mode,
    degrees: [ScaleDegree; NUM_DEGREES],
}

impl Scale {
    pub fn new(tonic: NoteLetter, mode: Mode) -> Self {
        Self {
            tonic,
            mode,
            degrees: derive_scale(tonic, mode),
        }
    }

    pub fn from_tonic_index(tonic: usize, mode: Mode) -> Result<Self, ScaleError> {
        NoteLetter::from_index(tonic).map(|tonic| Scale::new(tonic, mode))
    }

    pub fn tonic(&self) -> NoteLetter {
        self.tonic
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn degrees(&self) -> &[ScaleDegree; NUM_DEGREES] {
        &self.degrees
    }

    pub fn steps(&self) -> impl Iterator<Item = StepKind> {
        let mode = self.mode;
        (0..NUM_STEPS).map(move |index| classify_step(mode, index))
    }

    /// Finds the degree spelled with `letter`.
    ///
    /// The tonic letter occurs twice, so `position` decides between the first and the last degree.
    /// Any other position selects the lower occurrence.
    ///
    /// ```
    /// # use scale_wheel::note::{Mode, NoteLetter};
    /// # use scale_wheel::scale::{DegreePosition, Scale};
    /// let scale = Scale::new(NoteLetter::A, Mode::Minor);
    ///
    /// let tonic = scale.degree_of(NoteLetter::A, DegreePosition::First);
    /// let octave = scale.degree_of(NoteLetter::A, DegreePosition::Last);
    /// let fifth = scale.degree_of(NoteLetter::E, DegreePosition::Interior);
    ///
    /// assert_eq!(tonic.note.midi_number(), 69);
    /// assert_eq!(octave.note.midi_number(), 81);
    /// assert_eq!(fifth.note.midi_number(), 76);
    /// ```
    pub fn degree_of(&self, letter: NoteLetter, position: DegreePosition) -> &ScaleDegree {
        let index = match position {
            DegreePosition::Last if letter == self.tonic => NUM_STEPS,
            _ => self.tonic.num_steps_before(letter),
        };
        &self.degrees[index]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn all_scales() -> impl Iterator<Item = Scale> {
        [Mode::Major, Mode::Minor]
            .into_iter()
            .flat_map(|mode| NoteLetter::ALL.into_iter().map(move |tonic| Scale::new(tonic, mode)))
    }

    fn spellings(scale: &Scale) -> Vec<String> {
        scale.degrees().iter().map(ScaleDegree::spelling).collect()
    }

    #[test]
    fn octave_closes_every_scale() {
        for scale in all_scales() {
            let degrees = scale.degrees();
            assert_eq!(degrees.len(), NUM_DEGREES);
            assert_eq!(degrees[7].letter, degrees[0].letter);
            assert_eq!(degrees[7].note, degrees[0].note.plus_semitones(12));
            assert_eq!(degrees[0].position(), DegreePosition::First);
            assert_eq!(degrees[7].position(), DegreePosition::Last);
            assert!(degrees[1..7]
                .iter()
                .all(|degree| degree.position() == DegreePosition::Interior));
        }
    }

    #[test]
    fn derivation_is_pure() {
        for scale in all_scales() {
            assert_eq!(
                derive_scale(scale.tonic(), scale.mode()),
                derive_scale(scale.tonic(), scale.mode())
            );
        }
    }

    #[test]
    fn c_major() {
        let scale = Scale::new(NoteLetter::C, Mode::Major);

        let pitches: Vec<_> = scale.degrees().iter().map(|d| d.note.midi_number()).collect();
        assert_eq!(pitches, [60, 62, 64, 65, 67, 69, 71, 72]);
        assert_eq!(spellings(&scale), ["C", "D", "E", "F", "G", "A", "B", "C"]);
    }

    #[test]
    fn b_major() {
        let scale = Scale::from_tonic_index(6, Mode::Major).unwrap();

        assert_eq!(
            spellings(&scale),
            ["B", "C♯", "D♯", "E", "F♯", "G♯", "A♯", "B"]
        );
        let pitches: Vec<_> = scale.degrees().iter().map(|d| d.note.midi_number()).collect();
        assert_eq!(pitches, [71, 73, 75, 76, 78, 80, 82, 83]);
    }

    #[test]
    fn f_minor_and_major() {
        assert_eq!(
            spellings(&Scale::new(NoteLetter::F, Mode::Minor)),
            ["F", "G", "A♭", "B♭", "C", "D♭", "E♭", "F"]
        );
        assert_eq!(
            spellings(&Scale::new(NoteLetter::F, Mode::Major)),
            ["F", "G", "A", "B♭", "C", "D", "E", "F"]
        );
    }

    #[test]
    fn spelled_pitch_matches_sounding_pitch() {
        for scale in all_scales() {
            for degree in scale.degrees() {
                let natural = degree.letter.base_pitch().midi_number();
                let altered = match degree.accidental {
                    Some(Accidental::Sharp) => natural + 1,
                    Some(Accidental::Flat) => natural - 1,
                    None => natural,
                };
                let (_, expected) = crate::math::div_mod_i32(altered, 12);
                let (_, actual) = crate::math::div_mod_i32(degree.note.midi_number(), 12);
                assert_eq!(actual, expected, "{:?} in {:?}", degree, scale.mode());
            }
        }
    }

    #[test]
    fn step_kinds() {
        for index in 0..NUM_STEPS {
            let major_is_half = step_kind(index, Mode::Major).unwrap() == StepKind::Half;
            let minor_is_half = step_kind(index, Mode::Minor).unwrap() == StepKind::Half;
            assert_eq!(major_is_half, index == 2 || index == 6);
            assert_eq!(minor_is_half, index == 1 || index == 4);
        }
        assert_eq!(step_kind(7, Mode::Major), Err(ScaleError::StepOutOfRange(7)));
    }

    #[test]
    fn steps_agree_with_step_kind() {
        for scale in all_scales() {
            let steps: Vec<_> = scale.steps().collect();
            assert_eq!(steps.len(), NUM_STEPS);
            for (index, step) in steps.into_iter().enumerate() {
                assert_eq!(Ok(step), step_kind(index, scale.mode()));
            }
        }

        let a_minor: Vec<_> = Scale::new(NoteLetter::A, Mode::Minor).steps().collect();
        assert_eq!(
            a_minor,
            [
                StepKind::Whole,
                StepKind::Half,
                StepKind::Whole,
                StepKind::Whole,
                StepKind::Half,
                StepKind::Whole,
                StepKind::Whole
            ]
        );
    }

    #[test]
    fn reject_invalid_tonic() {
        assert_eq!(
            Scale::from_tonic_index(7, Mode::Minor),
            Err(ScaleError::TonicOutOfRange(7))
        );
        assert_eq!(
            ScaleError::TonicOutOfRange(7).to_string(),
            "Tonic index 7 is out of range 0..=6"
        );
    }
}

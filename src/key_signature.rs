//! Key signatures of the diatonic scales built on the seven natural tonics.
//!
//! The [`AccidentalTable`] is the single place deciding whether a scale degree is written with a sharp or a flat.

use crate::note::{Accidental, Mode, NoteLetter};

/// Order in which sharps are added to a key signature.
pub const ORDER_OF_SHARPS: [NoteLetter; 7] = [
    NoteLetter::F,
    NoteLetter::C,
    NoteLetter::G,
    NoteLetter::D,
    NoteLetter::A,
    NoteLetter::E,
    NoteLetter::B,
];

/// Order in which flats are added to a key signature.
pub const ORDER_OF_FLATS: [NoteLetter; 7] = [
    NoteLetter::B,
    NoteLetter::E,
    NoteLetter::A,
    NoteLetter::D,
    NoteLetter::G,
    NoteLetter::C,
    NoteLetter::F,
];

/// Number of sharps (positive) or flats (negative) of the major scales on C, D, E, F, G, A, B.
const MAJOR_SIGNATURES: [i8; 7] = [0, 2, 4, -1, 1, 3, 5];

/// Number of sharps (positive) or flats (negative) of the natural minor scales on C, D, E, F, G, A, B.
const MINOR_SIGNATURES: [i8; 7] = [-3, -1, 1, -4, -2, 0, 2];

/// A conventional key signature, i.e. a count of sharps or flats.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct KeySignature {
    num_sharps: i8,
}

impl KeySignature {
    /// The key signature of the scale on `tonic` in the given `mode`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use scale_wheel::key_signature::KeySignature;
    /// # use scale_wheel::note::{Mode, NoteLetter};
    /// assert_eq!(KeySignature::of(NoteLetter::D, Mode::Major).num_sharps(), 2);
    /// assert_eq!(KeySignature::of(NoteLetter::F, Mode::Minor).num_flats(), 4);
    /// assert_eq!(KeySignature::of(NoteLetter::A, Mode::Minor).num_sharps(), 0);
    /// ```
    pub const fn of(tonic: NoteLetter, mode: Mode) -> KeySignature {
        let num_sharps = match mode {
            Mode::Major => MAJOR_SIGNATURES[tonic as usize],
            Mode::Minor => MINOR_SIGNATURES[tonic as usize],
        };
        KeySignature { num_sharps }
    }

    pub fn num_sharps(self) -> usize {
        self.num_sharps.max(0) as usize
    }

    pub fn num_flats(self) -> usize {
        (-self.num_sharps).max(0) as usize
    }

    const fn accidental_of(self, letter: NoteLetter) -> Option<Accidental> {
        let (order, count, accidental) = if self.num_sharps >= 0 {
            (ORDER_OF_SHARPS, self.num_sharps, Accidental::Sharp)
        } else {
            (ORDER_OF_FLATS, -self.num_sharps, Accidental::Flat)
        };

        let mut position = 0;
        while position < count as usize {
            if order[position] as usize == letter as usize {
                return Some(accidental);
            }
            position += 1;
        }
        None
    }
}

/// Static mapping `(letter, tonic, mode) -> accidental`.
///
/// The table is built once at compile time from the key signatures of the 14 supported scales.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccidentalTable {
    entries: [[[Option<Accidental>; 7]; 7]; 2],
}

/// The table used by [`crate::scale::derive_scale`].
pub static ACCIDENTALS: AccidentalTable = AccidentalTable::build();

impl AccidentalTable {
    const fn build() -> AccidentalTable {
        let mut entries = [[[None; 7]; 7]; 2];
        let modes = [Mode::Major, Mode::Minor];

        let mut mode_index = 0;
        while mode_index < 2 {
            let mut tonic_index = 0;
            while tonic_index < 7 {
                let signature = KeySignature::of(NoteLetter::ALL[tonic_index], modes[mode_index]);
                let mut letter_index = 0;
                while letter_index < 7 {
                    entries[mode_index][tonic_index][letter_index] =
                        signature.accidental_of(NoteLetter::ALL[letter_index]);
                    letter_index += 1;
                }
                tonic_index += 1;
            }
            mode_index += 1;
        }

        AccidentalTable { entries }
    }

    /// Looks up the accidental written for `letter` in the scale on `tonic`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use scale_wheel::key_signature::ACCIDENTALS;
    /// # use scale_wheel::note::{Accidental, Mode, NoteLetter};
    /// assert_eq!(ACCIDENTALS.lookup(NoteLetter::F, NoteLetter::D, Mode::Major), Some(Accidental::Sharp));
    /// assert_eq!(ACCIDENTALS.lookup(NoteLetter::B, NoteLetter::F, Mode::Minor), Some(Accidental::Flat));
    /// assert_eq!(ACCIDENTALS.lookup(NoteLetter::E, NoteLetter::C, Mode::Major), None);
    /// ```
    pub fn lookup(&self, letter: NoteLetter, tonic: NoteLetter, mode: Mode) -> Option<Accidental> {
        let mode_index = match mode {
            Mode::Major => 0,
            Mode::Minor => 1,
        };
        self.entries[mode_index][tonic.index()][letter.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn altered(tonic: NoteLetter, mode: Mode, accidental: Accidental) -> Vec<NoteLetter> {
        NoteLetter::ALL
            .into_iter()
            .filter(|&letter| ACCIDENTALS.lookup(letter, tonic, mode) == Some(accidental))
            .collect()
    }

    #[test]
    fn major_key_signatures() {
        use NoteLetter::*;

        let sharps = |tonic| altered(tonic, Mode::Major, Accidental::Sharp);
        let flats = |tonic| altered(tonic, Mode::Major, Accidental::Flat);

        assert!(sharps(C).is_empty());
        assert!(flats(C).is_empty());
        assert_eq!(sharps(D), [C, F]);
        assert_eq!(sharps(E), [C, D, F, G]);
        assert_eq!(flats(F), [B]);
        assert!(sharps(F).is_empty());
        assert_eq!(sharps(G), [F]);
        assert_eq!(sharps(A), [C, F, G]);
        assert_eq!(sharps(B), [C, D, F, G, A]);
        assert!(flats(B).is_empty());
    }

    #[test]
    fn minor_key_signatures() {
        use NoteLetter::*;

        let sharps = |tonic| altered(tonic, Mode::Minor, Accidental::Sharp);
        let flats = |tonic| altered(tonic, Mode::Minor, Accidental::Flat);

        assert_eq!(flats(C), [E, A, B]);
        assert_eq!(flats(D), [B]);
        assert_eq!(sharps(E), [F]);
        assert_eq!(flats(F), [D, E, A, B]);
        assert_eq!(flats(G), [E, B]);
        assert!(sharps(A).is_empty());
        assert!(flats(A).is_empty());
        assert_eq!(sharps(B), [C, F]);
    }

    #[test]
    fn signatures_never_mix_sharps_and_flats() {
        for mode in [Mode::Major, Mode::Minor] {
            for tonic in NoteLetter::ALL {
                let num_sharps = altered(tonic, mode, Accidental::Sharp).len();
                let num_flats = altered(tonic, mode, Accidental::Flat).len();
                assert!(num_sharps == 0 || num_flats == 0);

                let signature = KeySignature::of(tonic, mode);
                assert_eq!(signature.num_sharps(), num_sharps);
                assert_eq!(signature.num_flats(), num_flats);
            }
        }
    }

    #[test]
    fn tonic_is_never_altered() {
        for mode in [Mode::Major, Mode::Minor] {
            for tonic in NoteLetter::ALL {
                assert_eq!(ACCIDENTALS.lookup(tonic, tonic, mode), None);
            }
        }
    }
}

use serde::{Deserialize, Serialize};
use scale_wheel::{
    note::{Accidental, Mode, NoteLetter},
    scale::{DegreePosition, Scale, StepKind},
};

#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum ScaleWheelDto {
    Scale(ScaleDto),
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ScaleDto {
    pub tonic: NoteLetter,
    pub mode: Mode,
    pub degrees: Vec<DegreeDto>,
    pub steps: Vec<StepKind>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DegreeDto {
    pub letter: NoteLetter,
    pub accidental: Option<Accidental>,
    pub spelling: String,
    pub midi_number: i32,
    pub position: DegreePosition,
}

impl ScaleDto {
    pub fn from_scale(scale: &Scale) -> Self {
        Self {
            tonic: scale.tonic(),
            mode: scale.mode(),
            degrees: scale
                .degrees()
                .iter()
                .map(|degree| DegreeDto {
                    letter: degree.letter,
                    accidental: degree.accidental,
                    spelling: degree.spelling(),
                    midi_number: degree.note.midi_number(),
                    position: degree.position(),
                })
                .collect(),
            steps: scale.steps().collect(),
        }
    }
}

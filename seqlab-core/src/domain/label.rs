//! Three-class direction label.

use serde::{Deserialize, Serialize};

/// Direction of the forward return over the prediction horizon.
///
/// Serialized as the integer class `-1`, `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Label {
    Down,
    Neutral,
    Up,
}

impl Label {
    pub fn as_i8(self) -> i8 {
        match self {
            Label::Down => -1,
            Label::Neutral => 0,
            Label::Up => 1,
        }
    }

    /// Classify a forward return against a symmetric threshold.
    ///
    /// Strict inequalities: a return exactly at `±threshold` is `Neutral`.
    /// A NaN return compares false on both sides and is `Neutral`.
    pub fn classify(future_return: f64, threshold: f64) -> Self {
        if future_return > threshold {
            Label::Up
        } else if future_return < -threshold {
            Label::Down
        } else {
            Label::Neutral
        }
    }
}

impl From<Label> for i8 {
    fn from(label: Label) -> i8 {
        label.as_i8()
    }
}

impl TryFrom<i8> for Label {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Label::Down),
            0 => Ok(Label::Neutral),
            1 => Ok(Label::Up),
            other => Err(format!("invalid label class {other}, expected -1, 0 or 1")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_strict_boundaries() {
        assert_eq!(Label::classify(0.02, 0.02), Label::Neutral);
        assert_eq!(Label::classify(-0.02, 0.02), Label::Neutral);
        assert_eq!(Label::classify(0.0200001, 0.02), Label::Up);
        assert_eq!(Label::classify(-0.0200001, 0.02), Label::Down);
        assert_eq!(Label::classify(0.0, 0.02), Label::Neutral);
    }

    #[test]
    fn classify_nan_is_neutral() {
        assert_eq!(Label::classify(f64::NAN, 0.02), Label::Neutral);
    }

    #[test]
    fn label_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Label::Down).unwrap(), "-1");
        assert_eq!(serde_json::to_string(&Label::Up).unwrap(), "1");
        let back: Label = serde_json::from_str("0").unwrap();
        assert_eq!(back, Label::Neutral);
        assert!(serde_json::from_str::<Label>("2").is_err());
    }
}

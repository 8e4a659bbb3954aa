use crate::dsp::{sine_fold, triangle_fold};

/// How the summed voices are brought back into range. Average keeps the
/// composite inside unit range; the fold modes deliberately let a hot
/// sum wrap back on itself and grow harmonics instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FoldMode {
    #[default]
    Average,
    SineFold,
    TriangleFold,
}

impl FoldMode {
    pub fn label(self) -> &'static str {
        match self {
            FoldMode::Average => "none",
            FoldMode::SineFold => "sine",
            FoldMode::TriangleFold => "triangle",
        }
    }
}

/// Sum the per-voice stereo frames, fold each channel, apply master
/// gain. The fold modes operate on the raw sum; only Average divides by
/// the voice count.
pub fn mix(outputs: &[(f32, f32)], fold: FoldMode, gain: f32) -> (f32, f32) {
    let mut left = 0.0f32;
    let mut right = 0.0f32;
    for &(l, r) in outputs {
        left += l;
        right += r;
    }
    let (left, right) = match fold {
        FoldMode::Average => {
            let n = outputs.len() as f32;
            (left / n, right / n)
        }
        FoldMode::SineFold => (sine_fold(left), sine_fold(right)),
        FoldMode::TriangleFold => (triangle_fold(left), triangle_fold(right)),
    };
    (left * gain, right * gain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_of_unit_inputs() {
        let outputs = [(1.0f32, 1.0f32); 5];
        let (l, r) = mix(&outputs, FoldMode::Average, 1.0);
        assert!((l - 1.0).abs() < 1e-6);
        assert!((r - 1.0).abs() < 1e-6);
    }

    #[test]
    fn sine_fold_applies_to_raw_sum() {
        let outputs = [(0.7f32, -0.4f32); 5];
        let (l, r) = mix(&outputs, FoldMode::SineFold, 1.0);
        assert!((l - (3.5f32).sin()).abs() < 1e-5);
        assert!((r - (-2.0f32).sin()).abs() < 1e-5);
    }

    #[test]
    fn gain_scales_both_channels() {
        let outputs = [(1.0f32, 0.5f32); 5];
        let (l, r) = mix(&outputs, FoldMode::Average, 0.25);
        assert!((l - 0.25).abs() < 1e-6);
        assert!((r - 0.125).abs() < 1e-6);
    }

    #[test]
    fn labels_match_display_contract() {
        assert_eq!(FoldMode::Average.label(), "none");
        assert_eq!(FoldMode::SineFold.label(), "sine");
        assert_eq!(FoldMode::TriangleFold.label(), "triangle");
    }
}

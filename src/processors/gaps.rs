//! Placeholder insertion for characters the detector missed.
//!
//! A missed character leaves a visibly wider horizontal gap between its
//! neighbors than the spacing between adjacent detected characters. The
//! reconstructor's only metric is that ratio: each consecutive center-to-
//! center gap divided by the smallest gap in the sequence. A ratio of at
//! least 2 marks room for one missing character, at least 3 for two.
//!
//! Reconstruction is total: every input produces a sequence of exactly
//! [`PLATE_LENGTH`] slots. Inputs no insertion rule can repair collapse to
//! the uniform all-placeholder sequence, with the typed reason carried in the
//! report instead of an error path.

use itertools::Itertools;
use tracing::{debug, warn};

use crate::core::ReconstructionError;
use crate::domain::{
    CharacterLabel, Detection, PLATE_LENGTH, ReconstructedSequence, SequenceSlot,
};

/// Gap ratio that admits one missing character.
const RATIO_ONE_MISSING: f32 = 2.0;
/// Gap ratio that admits two missing characters.
const RATIO_TWO_MISSING: f32 = 3.0;

/// What the reconstructor did to one sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GapReport {
    /// True when the gap evidence was contradictory (a big and a medium gap
    /// at once) and the conservative compromise was applied.
    pub ambiguous_geometry: bool,
    /// Why reconstruction fell back to the all-placeholder sequence, if it
    /// did.
    pub fallback: Option<ReconstructionError>,
}

/// Which end of the sequence receives an edge placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeSide {
    Front,
    Back,
}

/// Placeholder insertions expressed against the input positions.
///
/// The plan is applied by assembling a fresh slot sequence from spans of the
/// input plus placeholder slots, so insertion indices never shift under each
/// other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct InsertionPlan {
    /// Placeholders added before the first detection.
    prepend: usize,
    /// Placeholders added after the last detection.
    append: usize,
    /// Gap indices receiving a placeholder; index `i` places one between
    /// detections `i` and `i + 1`. An index listed twice places two.
    after_gap: Vec<usize>,
    /// Contradictory gap evidence, resolved conservatively.
    ambiguous: bool,
}

/// Inserts placeholder slots so a deduplicated sequence reaches exactly
/// [`PLATE_LENGTH`] entries, positioned by the gap-ratio evidence.
#[derive(Debug, Clone, Copy, Default)]
pub struct GapReconstructor;

impl GapReconstructor {
    /// Creates a new gap reconstructor.
    pub fn new() -> Self {
        Self
    }

    /// Reconstructs one deduplicated, center-ordered sequence.
    ///
    /// The output always has exactly [`PLATE_LENGTH`] slots, and real
    /// detections keep their relative order on every path.
    pub fn reconstruct(&self, detections: &[Detection]) -> (ReconstructedSequence, GapReport) {
        match self.plan(detections) {
            Ok(plan) => {
                let report = GapReport {
                    ambiguous_geometry: plan.ambiguous,
                    fallback: None,
                };
                (apply_plan(&plan, detections), report)
            }
            Err(reason) => {
                warn!(%reason, count = detections.len(), "reconstruction fell back to all placeholders");
                let report = GapReport {
                    ambiguous_geometry: false,
                    fallback: Some(reason),
                };
                (ReconstructedSequence::all_placeholders(), report)
            }
        }
    }

    /// Decides where placeholders belong, without building the sequence yet.
    fn plan(&self, detections: &[Detection]) -> Result<InsertionPlan, ReconstructionError> {
        match detections.len() {
            PLATE_LENGTH => Ok(InsertionPlan::default()),
            7 => self.plan_one_missing(detections),
            6 => self.plan_two_missing(detections),
            n if n < 6 => Err(ReconstructionError::InsufficientDetections { count: n }),
            n => Err(ReconstructionError::SurplusDetections { count: n }),
        }
    }

    /// Exactly one character is missing: it sits inside the first wide gap,
    /// or at an edge when no gap is wide.
    fn plan_one_missing(
        &self,
        detections: &[Detection],
    ) -> Result<InsertionPlan, ReconstructionError> {
        let ratios = gap_ratios(detections)?;
        let mut plan = InsertionPlan::default();

        if let Some(gap) = ratios.iter().position(|&r| r >= RATIO_ONE_MISSING) {
            debug!(gap, "one wide gap, inserting a single placeholder");
            plan.after_gap.push(gap);
        } else {
            let labels: Vec<CharacterLabel> = detections.iter().map(|d| d.label).collect();
            match edge_heuristic(&labels) {
                EdgeSide::Front => plan.prepend = 1,
                EdgeSide::Back => plan.append = 1,
            }
        }
        Ok(plan)
    }

    /// Exactly two characters are missing: classify gaps into big (room for
    /// two) and medium (room for one each) and dispatch on the combination.
    fn plan_two_missing(
        &self,
        detections: &[Detection],
    ) -> Result<InsertionPlan, ReconstructionError> {
        let ratios = gap_ratios(detections)?;
        let big: Vec<usize> = ratios
            .iter()
            .positions(|&r| r >= RATIO_TWO_MISSING)
            .collect();
        let medium: Vec<usize> = ratios
            .iter()
            .positions(|&r| (RATIO_ONE_MISSING..RATIO_TWO_MISSING).contains(&r))
            .collect();

        let mut plan = InsertionPlan::default();
        if let Some(&wide) = big.first() {
            if medium.is_empty() {
                // One gap wide enough for both missing characters.
                debug!(gap = wide, "one big gap, inserting two placeholders");
                plan.after_gap.push(wide);
                plan.after_gap.push(wide);
            } else {
                // Contradictory width evidence: one placeholder after each
                // flagged gap, without doubling the big one.
                debug!(
                    big = wide,
                    medium = medium[0],
                    "mixed gap evidence, applying the conservative compromise"
                );
                plan.after_gap.push(wide);
                plan.after_gap.push(medium[0]);
                plan.ambiguous = true;
            }
            return Ok(plan);
        }

        match medium.as_slice() {
            [] => {
                // Both missing characters sit at the edges.
                let labels: Vec<CharacterLabel> = detections.iter().map(|d| d.label).collect();
                match labels.as_slice() {
                    [CharacterLabel::Letter(_), ..] => plan.prepend = 2,
                    [CharacterLabel::Digit(_), CharacterLabel::Letter(_), ..] => {
                        plan.prepend = 1;
                        plan.append = 1;
                    }
                    _ => plan.append = 2,
                }
            }
            [only] => {
                // One internal blank; the other missing character is at an
                // edge, decided from the head with the placeholder applied.
                plan.after_gap.push(*only);
                match edge_heuristic(&head_with_insert(detections, *only)) {
                    EdgeSide::Front => plan.prepend = 1,
                    EdgeSide::Back => plan.append = 1,
                }
            }
            [first, second] => {
                plan.after_gap.push(*first);
                plan.after_gap.push(*second);
            }
            _ => {
                return Err(ReconstructionError::UnresolvedGapPattern {
                    medium: medium.len(),
                });
            }
        }
        Ok(plan)
    }
}

/// Consecutive center-to-center gaps divided by the smallest gap.
///
/// Needs at least two detections; a zero minimum gap (possible only with a
/// zero duplicate tolerance) makes every ratio unbounded, so both degenerate
/// cases are reported as such.
fn gap_ratios(detections: &[Detection]) -> Result<Vec<f32>, ReconstructionError> {
    let gaps: Vec<i32> = detections
        .iter()
        .tuple_windows()
        .map(|(a, b)| b.center_x - a.center_x)
        .collect();
    let min_gap = gaps
        .iter()
        .copied()
        .min()
        .filter(|&g| g > 0)
        .ok_or(ReconstructionError::DegenerateGeometry)?;
    Ok(gaps.iter().map(|&g| g as f32 / min_gap as f32).collect())
}

/// Decides which edge a placeholder belongs to from the head of the label
/// sequence.
///
/// A plate starts with two digits followed by the letter; a head that reads
/// digit-then-letter is therefore missing its leading digit, as is a lone
/// digit sandwiching a freshly placed placeholder against another digit.
/// Every other head shape points at the tail.
fn edge_heuristic(head: &[CharacterLabel]) -> EdgeSide {
    match head {
        [
            CharacterLabel::Digit(_),
            CharacterLabel::Placeholder,
            CharacterLabel::Digit(_),
            ..,
        ] => EdgeSide::Front,
        [CharacterLabel::Digit(_), CharacterLabel::Letter(_), ..] => EdgeSide::Front,
        _ => EdgeSide::Back,
    }
}

/// The first three labels as they would read after inserting a placeholder
/// behind gap `gap`.
fn head_with_insert(detections: &[Detection], gap: usize) -> Vec<CharacterLabel> {
    debug_assert!(detections.len() >= 3);
    let label = |i: usize| detections[i].label;
    match gap {
        0 => vec![label(0), CharacterLabel::Placeholder, label(1)],
        1 => vec![label(0), label(1), CharacterLabel::Placeholder],
        _ => vec![label(0), label(1), label(2)],
    }
}

/// Assembles the output sequence from the input detections and the plan,
/// then trims any excess placeholders left-most first.
fn apply_plan(plan: &InsertionPlan, detections: &[Detection]) -> ReconstructedSequence {
    let mut slots =
        Vec::with_capacity(detections.len() + plan.prepend + plan.append + plan.after_gap.len());
    for _ in 0..plan.prepend {
        slots.push(SequenceSlot::placeholder());
    }
    for (index, detection) in detections.iter().enumerate() {
        slots.push(SequenceSlot::from(detection));
        let inserts = plan.after_gap.iter().filter(|&&gap| gap == index).count();
        for _ in 0..inserts {
            slots.push(SequenceSlot::placeholder());
        }
    }
    for _ in 0..plan.append {
        slots.push(SequenceSlot::placeholder());
    }

    let mut sequence = ReconstructedSequence::new(slots);
    sequence.trim_to_plate_length();
    sequence
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit(center_x: i32, value: u8) -> Detection {
        Detection {
            center_x,
            edge_sum: center_x * 2,
            confidence: 0.9,
            label: CharacterLabel::Digit(value),
        }
    }

    fn letter(center_x: i32, value: char) -> Detection {
        Detection {
            center_x,
            edge_sum: center_x * 2,
            confidence: 0.9,
            label: CharacterLabel::Letter(value),
        }
    }

    /// Builds detections at the given centers, labelled with digits 0..n.
    fn digits_at(centers: &[i32]) -> Vec<Detection> {
        centers
            .iter()
            .enumerate()
            .map(|(i, &c)| digit(c, (i % 10) as u8))
            .collect()
    }

    fn labels(sequence: &ReconstructedSequence) -> Vec<CharacterLabel> {
        sequence.slots().iter().map(|s| s.label).collect()
    }

    fn placeholder_positions(sequence: &ReconstructedSequence) -> Vec<usize> {
        sequence
            .slots()
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_placeholder())
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_eight_detections_pass_through() {
        let detections = digits_at(&[0, 10, 20, 30, 40, 50, 60, 70]);
        let (sequence, report) = GapReconstructor::new().reconstruct(&detections);
        assert_eq!(sequence.len(), PLATE_LENGTH);
        assert_eq!(sequence.placeholder_count(), 0);
        assert_eq!(report, GapReport::default());
    }

    #[test]
    fn test_seven_with_wide_gap_fills_the_gap() {
        // Gaps [10, 10, 25, 10, 10, 10]: the wide gap has ratio 2.5.
        let detections = digits_at(&[0, 10, 20, 45, 55, 65, 75]);
        let (sequence, report) = GapReconstructor::new().reconstruct(&detections);
        assert_eq!(sequence.len(), PLATE_LENGTH);
        assert_eq!(placeholder_positions(&sequence), vec![3]);
        assert!(report.fallback.is_none());
    }

    #[test]
    fn test_seven_without_wide_gap_prepends_for_digit_letter_head() {
        let mut detections = digits_at(&[0, 10, 20, 30, 40, 50, 60]);
        detections[1] = letter(10, 'B');
        let (sequence, _) = GapReconstructor::new().reconstruct(&detections);
        assert_eq!(placeholder_positions(&sequence), vec![0]);
    }

    #[test]
    fn test_seven_without_wide_gap_appends_otherwise() {
        let detections = digits_at(&[0, 10, 20, 30, 40, 50, 60]);
        let (sequence, _) = GapReconstructor::new().reconstruct(&detections);
        assert_eq!(placeholder_positions(&sequence), vec![7]);
    }

    #[test]
    fn test_six_with_big_gap_fills_it_twice() {
        // Gaps [10, 10, 35, 10, 10]: one gap of ratio 3.5.
        let detections = digits_at(&[0, 10, 20, 55, 65, 75]);
        let (sequence, report) = GapReconstructor::new().reconstruct(&detections);
        assert_eq!(sequence.len(), PLATE_LENGTH);
        assert_eq!(placeholder_positions(&sequence), vec![3, 4]);
        assert!(!report.ambiguous_geometry);
    }

    #[test]
    fn test_six_with_two_medium_gaps_fills_both() {
        // Gaps [10, 25, 10, 25, 10]: two medium ratios of 2.5.
        let detections = digits_at(&[0, 10, 35, 45, 70, 80]);
        let (sequence, _) = GapReconstructor::new().reconstruct(&detections);
        assert_eq!(placeholder_positions(&sequence), vec![2, 5]);
    }

    #[test]
    fn test_six_with_one_medium_gap_at_head_prepends() {
        // Gap 0 is medium; after the insert the head reads digit,
        // placeholder, digit, so the remaining blank is the leading digit.
        let detections = digits_at(&[0, 25, 35, 45, 55, 65]);
        let (sequence, _) = GapReconstructor::new().reconstruct(&detections);
        assert_eq!(sequence.len(), PLATE_LENGTH);
        assert_eq!(placeholder_positions(&sequence), vec![0, 2]);
    }

    #[test]
    fn test_six_with_one_medium_gap_appends_for_digit_head() {
        // The medium gap sits past the head, which stays all digits, so the
        // second blank goes to the tail.
        let detections = digits_at(&[0, 10, 20, 45, 55, 65]);
        let (sequence, _) = GapReconstructor::new().reconstruct(&detections);
        assert_eq!(placeholder_positions(&sequence), vec![3, 7]);
    }

    #[test]
    fn test_six_with_no_gaps_letter_first_prepends_two() {
        let mut detections = digits_at(&[0, 10, 20, 30, 40, 50]);
        detections[0] = letter(0, 'B');
        let (sequence, _) = GapReconstructor::new().reconstruct(&detections);
        assert_eq!(placeholder_positions(&sequence), vec![0, 1]);
    }

    #[test]
    fn test_six_with_no_gaps_digit_letter_head_splits_edges() {
        let mut detections = digits_at(&[0, 10, 20, 30, 40, 50]);
        detections[1] = letter(10, 'B');
        let (sequence, _) = GapReconstructor::new().reconstruct(&detections);
        assert_eq!(placeholder_positions(&sequence), vec![0, 7]);
    }

    #[test]
    fn test_six_with_no_gaps_digit_head_appends_two() {
        let detections = digits_at(&[0, 10, 20, 30, 40, 50]);
        let (sequence, _) = GapReconstructor::new().reconstruct(&detections);
        assert_eq!(placeholder_positions(&sequence), vec![6, 7]);
    }

    #[test]
    fn test_six_with_mixed_gaps_flags_ambiguity() {
        // Gaps [10, 35, 25, 10, 10]: one big, one medium.
        let detections = digits_at(&[0, 10, 45, 70, 80, 90]);
        let (sequence, report) = GapReconstructor::new().reconstruct(&detections);
        assert_eq!(sequence.len(), PLATE_LENGTH);
        assert_eq!(placeholder_positions(&sequence), vec![2, 4]);
        assert!(report.ambiguous_geometry);
    }

    #[test]
    fn test_six_with_mixed_gaps_medium_before_big() {
        // Gaps [25, 35, 10, 10, 10]: the medium gap precedes the big one;
        // both placeholders still land behind their own gaps.
        let detections = digits_at(&[0, 25, 60, 70, 80, 90]);
        let (sequence, report) = GapReconstructor::new().reconstruct(&detections);
        assert_eq!(placeholder_positions(&sequence), vec![1, 3]);
        assert!(report.ambiguous_geometry);
    }

    #[test]
    fn test_six_with_three_medium_gaps_falls_back() {
        // Gaps [25, 25, 25, 10, 10]: three medium gaps match no rule.
        let detections = digits_at(&[0, 25, 50, 75, 85, 95]);
        let (sequence, report) = GapReconstructor::new().reconstruct(&detections);
        assert_eq!(sequence.placeholder_count(), PLATE_LENGTH);
        assert_eq!(
            report.fallback,
            Some(ReconstructionError::UnresolvedGapPattern { medium: 3 })
        );
    }

    #[test]
    fn test_too_few_detections_fall_back() {
        // Three detections cannot place anything; uniform fallback.
        let detections = digits_at(&[0, 10, 20]);
        let (sequence, report) = GapReconstructor::new().reconstruct(&detections);
        assert_eq!(sequence.len(), PLATE_LENGTH);
        assert_eq!(sequence.placeholder_count(), PLATE_LENGTH);
        assert_eq!(
            report.fallback,
            Some(ReconstructionError::InsufficientDetections { count: 3 })
        );
    }

    #[test]
    fn test_empty_input_falls_back() {
        let (sequence, report) = GapReconstructor::new().reconstruct(&[]);
        assert_eq!(sequence.placeholder_count(), PLATE_LENGTH);
        assert_eq!(
            report.fallback,
            Some(ReconstructionError::InsufficientDetections { count: 0 })
        );
    }

    #[test]
    fn test_surplus_detections_fall_back() {
        let detections = digits_at(&[0, 10, 20, 30, 40, 50, 60, 70, 80]);
        let (sequence, report) = GapReconstructor::new().reconstruct(&detections);
        assert_eq!(sequence.placeholder_count(), PLATE_LENGTH);
        assert_eq!(
            report.fallback,
            Some(ReconstructionError::SurplusDetections { count: 9 })
        );
    }

    #[test]
    fn test_zero_minimum_gap_is_degenerate() {
        let mut detections = digits_at(&[0, 10, 20, 30, 40, 50, 60]);
        detections[1].center_x = 0;
        let (sequence, report) = GapReconstructor::new().reconstruct(&detections);
        assert_eq!(sequence.placeholder_count(), PLATE_LENGTH);
        assert_eq!(report.fallback, Some(ReconstructionError::DegenerateGeometry));
    }

    #[test]
    fn test_real_detections_keep_relative_order() {
        // Order preservation across an insertion path.
        let detections = digits_at(&[0, 10, 20, 45, 55, 65, 75]);
        let (sequence, _) = GapReconstructor::new().reconstruct(&detections);
        let reals: Vec<CharacterLabel> = labels(&sequence)
            .into_iter()
            .filter(|l| !l.is_placeholder())
            .collect();
        let inputs: Vec<CharacterLabel> = detections.iter().map(|d| d.label).collect();
        assert_eq!(reals, inputs);
    }

    #[test]
    fn test_output_length_is_always_eight() {
        // The length invariant across representative input sizes.
        for n in 0..12 {
            let centers: Vec<i32> = (0..n).map(|i| i * 10).collect();
            let detections = digits_at(&centers);
            let (sequence, _) = GapReconstructor::new().reconstruct(&detections);
            assert_eq!(sequence.len(), PLATE_LENGTH, "n = {}", n);
        }
    }
}

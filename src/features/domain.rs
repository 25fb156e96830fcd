//! Feature schema of the Wisconsin diagnostic measurements the model consumes.
//!
//! The documented ranges are informational. Nothing in the pipeline rejects a
//! value for falling outside them.

/// Number of features every request and every model must agree on.
pub const FEATURE_COUNT: usize = 8;

/// One named input of the classifier.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FeatureSpec {
    pub index: usize,
    pub name: &'static str,
    /// Documented lower bound, not enforced.
    pub min: f64,
    /// Documented upper bound, not enforced.
    pub max: f64,
}

impl FeatureSpec {
    const fn new(index: usize, name: &'static str, min: f64, max: f64) -> Self {
        Self {
            index,
            name,
            min,
            max,
        }
    }

    /// Whether `value` falls inside the documented range.
    pub fn in_documented_range(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Ordered schema; position in this array is position in the feature vector.
pub const FEATURE_SCHEMA: [FeatureSpec; FEATURE_COUNT] = [
    FeatureSpec::new(0, "radius_mean", 6.0, 28.0),
    FeatureSpec::new(1, "texture_mean", 9.0, 40.0),
    FeatureSpec::new(2, "perimeter_mean", 43.0, 189.0),
    FeatureSpec::new(3, "area_mean", 143.0, 2501.0),
    FeatureSpec::new(4, "smoothness_mean", 0.05, 0.17),
    FeatureSpec::new(5, "compactness_mean", 0.02, 0.35),
    FeatureSpec::new(6, "concavity_mean", 0.0, 0.43),
    FeatureSpec::new(7, "symmetry_mean", 0.1, 0.31),
];

/// Feature names in vector order.
pub fn feature_names() -> [&'static str; FEATURE_COUNT] {
    FEATURE_SCHEMA.map(|spec| spec.name)
}

/// Input to the classifier, already in schema order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub(crate) fn from_ordered(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_positions_match_indices() {
        for (pos, spec) in FEATURE_SCHEMA.iter().enumerate() {
            assert_eq!(spec.index, pos);
            assert!(spec.min < spec.max, "{} has an empty range", spec.name);
        }
    }

    #[test]
    fn names_follow_training_order() {
        assert_eq!(
            feature_names(),
            [
                "radius_mean",
                "texture_mean",
                "perimeter_mean",
                "area_mean",
                "smoothness_mean",
                "compactness_mean",
                "concavity_mean",
                "symmetry_mean",
            ]
        );
    }

    #[test]
    fn documented_range_is_inclusive() {
        let radius = FEATURE_SCHEMA[0];
        assert!(radius.in_documented_range(6.0));
        assert!(radius.in_documented_range(28.0));
        assert!(!radius.in_documented_range(30.5));
    }
}

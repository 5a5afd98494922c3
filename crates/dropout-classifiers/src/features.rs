//! Student feature schema and the fixed-order feature vector.
//!
//! The scaler and both classifiers were fitted on the 23 fields below in this
//! exact order. `FeatureVector` is the only way values reach them, and every
//! value passes through `FieldSpec::validate` on the way in.
use std::fmt;
use std::str::FromStr;

use crate::error::PredictionError;

/// Number of fields in a `FeatureVector`.
pub const FEATURE_COUNT: usize = 23;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Float,
}

/// Declared name, range, default and numeric kind of one input field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn int(name: &'static str, label: &'static str, min: f64, max: f64, default: f64) -> Self {
        FieldSpec {
            name,
            label,
            min,
            max,
            default,
            kind: FieldKind::Integer,
        }
    }

    const fn float(name: &'static str, label: &'static str, min: f64, max: f64, default: f64) -> Self {
        FieldSpec {
            name,
            label,
            min,
            max,
            default,
            kind: FieldKind::Float,
        }
    }

    /// Check a raw value against this field. Values are never clamped.
    pub fn validate(&self, value: f64) -> Result<f64, PredictionError> {
        if !value.is_finite() {
            return Err(PredictionError::invalid_field(
                self.name,
                value,
                "value is not a finite number",
            ));
        }
        if value < self.min || value > self.max {
            return Err(PredictionError::invalid_field(
                self.name,
                value,
                format!("outside the range [{}, {}]", self.min, self.max),
            ));
        }
        if self.kind == FieldKind::Integer && value.fract() != 0.0 {
            return Err(PredictionError::invalid_field(
                self.name,
                value,
                "expected a whole number",
            ));
        }
        Ok(value)
    }

    /// Render a value the way the input form shows it.
    pub fn format_value(&self, value: f64) -> String {
        match self.kind {
            FieldKind::Integer => format!("{}", value as i64),
            FieldKind::Float => format!("{:.2}", value),
        }
    }
}

pub const FIELD_SPECS: [FieldSpec; FEATURE_COUNT] = [
    FieldSpec::int("Marital", "Marital status", 1.0, 4.0, 1.0),
    FieldSpec::int("Mode", "Application mode", 1.0, 18.0, 9.0),
    FieldSpec::int("Order", "Application order", 1.0, 5.0, 2.0),
    FieldSpec::int("Course", "Course type", 1.0, 17.0, 10.0),
    FieldSpec::int("Attendance", "Daytime/evening attendance", 0.0, 1.0, 0.0),
    FieldSpec::int("Qualification", "Previous qualification", 1.0, 14.0, 7.0),
    FieldSpec::int("Nationality", "Nationality", 1.0, 21.0, 1.0),
    FieldSpec::int("Mother_Q", "Mother qualification", 1.0, 28.0, 14.0),
    FieldSpec::int("Father_Q", "Father qualification", 1.0, 28.0, 15.0),
    FieldSpec::int("Mother_O", "Mother occupation", 1.0, 25.0, 18.0),
    FieldSpec::int("Father_O", "Father occupation", 1.0, 26.0, 20.0),
    FieldSpec::int("Displaced", "Displaced", 0.0, 1.0, 0.0),
    FieldSpec::int("Need", "Educational special need", 0.0, 1.0, 0.0),
    FieldSpec::int("Debtor", "Debtor", 0.0, 1.0, 0.0),
    FieldSpec::int("Fee", "Tuition fee", 0.0, 1.0, 0.0),
    FieldSpec::int("Gender", "Gender", 0.0, 1.0, 0.0),
    FieldSpec::int("Scholarship", "Scholarship", 0.0, 1.0, 0.0),
    FieldSpec::int("Age", "Age", 18.0, 59.0, 23.0),
    FieldSpec::int("First", "1st semester approved course", 0.0, 18.0, 9.0),
    FieldSpec::int("Second", "2nd semester approved course", 0.0, 12.0, 4.0),
    FieldSpec::float("Unemployment", "Unemployment rate", 7.6, 16.2, 11.0),
    FieldSpec::float("Inflation", "Inflation rate", -0.8, 3.7, 1.0),
    FieldSpec::float("GDP", "GDP", -4.06, 3.51, 1.00),
];

/// Named positions of the feature vector, in fitted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Marital,
    Mode,
    Order,
    Course,
    Attendance,
    Qualification,
    Nationality,
    MotherQ,
    FatherQ,
    MotherO,
    FatherO,
    Displaced,
    Need,
    Debtor,
    Fee,
    Gender,
    Scholarship,
    Age,
    First,
    Second,
    Unemployment,
    Inflation,
    Gdp,
}

impl Field {
    pub const ALL: [Field; FEATURE_COUNT] = [
        Field::Marital,
        Field::Mode,
        Field::Order,
        Field::Course,
        Field::Attendance,
        Field::Qualification,
        Field::Nationality,
        Field::MotherQ,
        Field::FatherQ,
        Field::MotherO,
        Field::FatherO,
        Field::Displaced,
        Field::Need,
        Field::Debtor,
        Field::Fee,
        Field::Gender,
        Field::Scholarship,
        Field::Age,
        Field::First,
        Field::Second,
        Field::Unemployment,
        Field::Inflation,
        Field::Gdp,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn spec(self) -> &'static FieldSpec {
        &FIELD_SPECS[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Resolve a field by canonical name or form label, ignoring case.
    pub fn from_name(name: &str) -> Option<Field> {
        let name = name.trim();
        Field::ALL.iter().copied().find(|f| {
            f.spec().name.eq_ignore_ascii_case(name) || f.spec().label.eq_ignore_ascii_case(name)
        })
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = PredictionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::from_name(s).ok_or_else(|| PredictionError::UnknownField(s.to_string()))
    }
}

/// Canonical field names in fitted order.
pub fn field_names() -> impl DoubleEndedIterator<Item = &'static str> {
    FIELD_SPECS.iter().map(|spec| spec.name)
}

/// A validated, fixed-order vector of the 23 student features.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Build from raw values given in fitted field order.
    pub fn from_values(values: &[f64]) -> Result<Self, PredictionError> {
        if values.len() != FEATURE_COUNT {
            return Err(PredictionError::FieldCount {
                expected: FEATURE_COUNT,
                found: values.len(),
            });
        }
        let mut out = [0.0; FEATURE_COUNT];
        for ((slot, &value), spec) in out.iter_mut().zip(values).zip(FIELD_SPECS.iter()) {
            *slot = spec.validate(value)?;
        }
        Ok(FeatureVector { values: out })
    }

    /// Every field at its form default.
    pub fn defaults() -> Self {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, spec) in values.iter_mut().zip(FIELD_SPECS.iter()) {
            *slot = spec.default;
        }
        FeatureVector { values }
    }

    /// Wrap already-transformed values; range checks do not apply after scaling.
    pub(crate) fn from_transformed(values: [f64; FEATURE_COUNT]) -> Self {
        FeatureVector { values }
    }

    pub fn get(&self, field: Field) -> f64 {
        self.values[field.index()]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, f64)> + '_ {
        Field::ALL.iter().copied().zip(self.values.iter().copied())
    }

    /// The raw Nationality code. Only meaningful on an unscaled vector.
    pub fn nationality(&self) -> i64 {
        self.get(Field::Nationality) as i64
    }

    /// Return a copy with one field replaced, validating the new value.
    pub fn with(&self, field: Field, value: f64) -> Result<Self, PredictionError> {
        let mut values = self.values;
        values[field.index()] = field.spec().validate(value)?;
        Ok(FeatureVector { values })
    }
}

/// Collects raw field values and assembles a `FeatureVector`.
#[derive(Debug, Clone, Default)]
pub struct FeatureVectorBuilder {
    values: [Option<f64>; FEATURE_COUNT],
}

impl FeatureVectorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with every field at its form default.
    pub fn with_defaults() -> Self {
        let mut builder = Self::new();
        for field in Field::ALL {
            builder.values[field.index()] = Some(field.spec().default);
        }
        builder
    }

    pub fn set(&mut self, field: Field, value: f64) -> &mut Self {
        self.values[field.index()] = Some(value);
        self
    }

    pub fn field(mut self, field: Field, value: f64) -> Self {
        self.set(field, value);
        self
    }

    pub fn set_by_name(&mut self, name: &str, value: f64) -> Result<&mut Self, PredictionError> {
        let field: Field = name.parse()?;
        Ok(self.set(field, value))
    }

    /// Parse a `Field=value` assignment, as given on the command line.
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<&mut Self, PredictionError> {
        let Some((name, raw)) = assignment.split_once('=') else {
            let field: Field = assignment.parse()?;
            return Err(PredictionError::invalid_field(
                field.name(),
                f64::NAN,
                "expected Field=value",
            ));
        };
        let field: Field = name.parse()?;
        let value = raw.trim().parse::<f64>().map_err(|_| {
            PredictionError::invalid_field(field.name(), f64::NAN, format!("'{}' is not a number", raw.trim()))
        })?;
        Ok(self.set(field, value))
    }

    pub fn build(&self) -> Result<FeatureVector, PredictionError> {
        let mut values = [0.0; FEATURE_COUNT];
        for field in Field::ALL {
            let value = self.values[field.index()].ok_or_else(|| {
                PredictionError::invalid_field(field.name(), f64::NAN, "missing value")
            })?;
            values[field.index()] = field.spec().validate(value)?;
        }
        Ok(FeatureVector { values })
    }
}

impl From<FeatureVector> for FeatureVectorBuilder {
    fn from(vector: FeatureVector) -> Self {
        let mut builder = Self::new();
        for (field, value) in vector.iter() {
            builder.set(field, value);
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_order_matches_spec_table() {
        let names: Vec<&str> = field_names().collect();
        assert_eq!(names.len(), FEATURE_COUNT);
        assert_eq!(names[0], "Marital");
        assert_eq!(names[6], "Nationality");
        assert_eq!(names[22], "GDP");
        for field in Field::ALL {
            assert_eq!(field.spec().name, names[field.index()]);
        }
    }

    #[test]
    fn lookup_by_label_and_case() {
        assert_eq!(Field::from_name("mother_q"), Some(Field::MotherQ));
        assert_eq!(Field::from_name("Tuition fee"), Some(Field::Fee));
        assert_eq!(Field::from_name("gdp"), Some(Field::Gdp));
        assert_eq!(Field::from_name("Height"), None);
    }

    #[test]
    fn integer_field_rejects_fraction() {
        let err = Field::Age.spec().validate(23.5).unwrap_err();
        assert!(matches!(err, PredictionError::InvalidFieldValue { ref field, .. } if field == "Age"));
    }

    #[test]
    fn float_field_accepts_bounds() {
        let spec = Field::Gdp.spec();
        assert!(spec.validate(-4.06).is_ok());
        assert!(spec.validate(3.51).is_ok());
        assert!(spec.validate(3.52).is_err());
    }

    #[test]
    fn format_value_follows_kind() {
        assert_eq!(Field::Age.spec().format_value(23.0), "23");
        assert_eq!(Field::Gdp.spec().format_value(1.0), "1.00");
    }
}

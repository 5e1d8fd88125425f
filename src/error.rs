use thiserror::Error;

/// The error type used for inserting points into a triangulation.
///
/// Errors during insertion can only originate from an invalid point position. Points can
/// be checked for validity up front by using [crate::validate_point].
#[derive(Error, Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Debug, Hash)]
pub enum InsertionError {
    /// A coordinate value was too small.
    ///
    /// The absolute value of any inserted coordinate must either be zero or greater than
    /// or equal to [crate::MIN_ALLOWED_VALUE].
    #[error("coordinate magnitude is below the smallest allowed value")]
    TooSmall,

    /// A coordinate value was too large.
    ///
    /// The absolute value of any inserted coordinate must be less than or equal to
    /// [crate::MAX_ALLOWED_VALUE]. This includes infinite values.
    #[error("coordinate magnitude exceeds the largest allowed value")]
    TooLarge,

    /// A coordinate value was NaN.
    #[error("coordinate is NaN")]
    NAN,
}

/// The error type returned by plane interpolation.
#[derive(Error, Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum InterpolationError {
    /// The query point has a non-finite coordinate.
    #[error("query point has a non-finite coordinate")]
    InvalidQuery,

    /// Interpolation was requested on a half-plane face, which has no plane equation.
    #[error("cannot interpolate on a half-plane face")]
    HalfPlane,

    /// The face's corners are collinear and do not span a plane.
    #[error("face corners are collinear")]
    Degenerate,
}

#[cfg(test)]
mod test {
    use super::{InsertionError, InterpolationError};

    #[test]
    fn test_display() {
        assert_eq!(InsertionError::NAN.to_string(), "coordinate is NaN");
        assert_eq!(
            InterpolationError::HalfPlane.to_string(),
            "cannot interpolate on a half-plane face"
        );
    }
}
